//! Option registration and layered resolution.
//!
//! This module provides:
//! - Option registry and typed registration ([`FlagSet`], [`Flag`])
//! - Value cells and live handles ([`Value`], [`TypedValue`], [`Handle`])
//! - Name spec validation ([`FlagName`])
//! - Resolution settings ([`settings`], [`Setting`])
//! - Environment lookup ([`Environment`], [`ProcessEnv`])
//! - Errors ([`ArgsError`], [`ValueError`])
//!
//! # Priority
//!
//! Values are resolved with the following priority (highest to lowest):
//!
//! 1. **Command line** - flags given in the argument list
//! 2. **Environment** - `<PREFIX_><LONG_NAME>` variables, when enabled
//! 3. **Structured sources** - JSON, YAML, TOML or custom providers, in
//!    the order they were added
//! 4. **Defaults** - the value given at registration
//!
//! Once an option is assigned it is claimed, and lower-priority sources
//! leave it alone.
//!
//! # Command Line Syntax
//!
//! - `--name value`, `--name=value`, `-n value`, `-n=value`
//! - Boolean flags take an optional value: `--debug`, `--debug false`,
//!   `--debug=false`. The next token is only consumed when it does not
//!   start with `-`.
//! - `-abc` sets the boolean flags `a`, `b` and `c`; every letter must be
//!   a registered boolean or nothing is set.
//! - Scanning stops at the first non-flag token, at `--` and at `-`.
//! - An unregistered `--help`/`-h` writes usage and stops scanning.
//!
//! # Structured Sources
//!
//! Nested keys are joined with `.`, so `{"log": {"level": "info"}}` sets
//! the option named `log.level`. Unknown keys are ignored. Within one
//! source a later leaf replaces an earlier one for the same option.

mod claims;
mod cli;
pub mod defaults;
mod env;
mod error;
mod name;
mod registry;
mod set;
pub mod settings;
mod usage;
mod value;

#[cfg(test)]
mod name_tests;
#[cfg(test)]
mod test_fixtures;
#[cfg(test)]
mod value_tests;

pub use claims::Claims;
pub use env::{EnvConfig, Environment, ProcessEnv, env_key, normalize_prefix};
pub use error::{ArgsError, ValueError};
pub use name::FlagName;
pub use registry::{Flag, Registry};
pub use set::{FlagSet, Outcome};
pub use settings::Setting;
pub use value::{Handle, TypedValue, Value, parse_bool, parse_signed, parse_unsigned};
