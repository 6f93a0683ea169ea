//! Settings applied to a [`FlagSet`](super::FlagSet) before resolution.
//!
//! Environment lookup is off unless one of the `env*` settings is given;
//! the last one wins. Sources run in the order they were added, after the
//! command line and the environment.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use flagstack::flag::{FlagSet, settings};
//!
//! let mut fs = FlagSet::new();
//! let config = fs.string("config,c", "", "config file").unwrap();
//! let port = fs.uint("port,p", 8080, "listen port").unwrap();
//!
//! let env = HashMap::from([("APP_PORT".to_string(), "9090".to_string())]);
//! fs.parse(
//!     Vec::<String>::new(),
//!     [settings::env_with("app", env), settings::file(&config)],
//! )
//! .unwrap();
//!
//! assert_eq!(port.get(), 9090);
//! ```

use std::fmt;

use crate::source::{FileSource, Format, Provider};

use super::env::{EnvConfig, Environment, ProcessEnv};
use super::value::Handle;

/// One resolution setting.
pub enum Setting {
    /// Enable environment lookup.
    Env(EnvConfig),
    /// Append a structured source.
    Source(Box<dyn Provider>),
}

impl fmt::Debug for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env(config) => f.debug_tuple("Env").field(config).finish(),
            Self::Source(provider) => f.debug_tuple("Source").field(&provider.name()).finish(),
        }
    }
}

/// Enables process environment lookup without a prefix.
#[must_use]
pub fn env() -> Setting {
    env_prefix("")
}

/// Enables process environment lookup under `prefix`.
///
/// The prefix is uppercased and gets a trailing `_` unless it has one.
#[must_use]
pub fn env_prefix(prefix: &str) -> Setting {
    env_with(prefix, ProcessEnv)
}

/// Enables environment lookup under `prefix`, reading from `lookup`.
#[must_use]
pub fn env_with(prefix: &str, lookup: impl Environment + 'static) -> Setting {
    Setting::Env(EnvConfig::new(prefix, Box::new(lookup)))
}

/// Adds a JSON file source read from `path` at resolution time.
#[must_use]
pub fn json(path: &Handle<String>) -> Setting {
    provider(FileSource::new(path.clone(), Format::Json))
}

/// Adds a YAML file source read from `path` at resolution time.
#[must_use]
pub fn yaml(path: &Handle<String>) -> Setting {
    provider(FileSource::new(path.clone(), Format::Yaml))
}

/// Adds a TOML file source read from `path` at resolution time.
#[must_use]
pub fn toml(path: &Handle<String>) -> Setting {
    provider(FileSource::new(path.clone(), Format::Toml))
}

/// Adds a file source whose format follows the path's extension.
#[must_use]
pub fn file(path: &Handle<String>) -> Setting {
    provider(FileSource::infer(path.clone()))
}

/// Adds an arbitrary structured source.
#[must_use]
pub fn provider(provider: impl Provider + 'static) -> Setting {
    Setting::Source(Box::new(provider))
}
