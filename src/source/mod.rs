//! Structured configuration sources.
//!
//! This module provides:
//! - The [`Provider`] contract every source implements
//! - Tree flattening into dotted keys ([`flatten`], [`Tree`])
//! - Lazily read JSON, YAML and TOML files ([`FileSource`], [`Format`])
//!
//! A provider only walks its data and emits `(dotted.key, text)` pairs; the
//! resolver decides whether each pair is applied. Unknown keys and keys
//! already claimed by a higher-precedence source are ignored.

mod file;
mod tree;

#[cfg(test)]
mod file_tests;

pub use file::{FileSource, Format, flatten_str};
pub use tree::{Node, Tree, flatten};

use crate::flag::ArgsError;

/// Callback receiving one flattened `(key, value)` pair.
pub type Setter<'a> = dyn FnMut(&str, &str) -> Result<(), ArgsError> + 'a;

/// A source of flattened key/value pairs.
///
/// Any `Fn(&mut Setter) -> Result<(), ArgsError>` closure is a provider.
///
/// # Example
///
/// ```
/// use flagstack::flag::{FlagSet, settings};
/// use flagstack::source::Setter;
///
/// let mut fs = FlagSet::new();
/// let level = fs.string("log.level", "warn", "log level").unwrap();
///
/// let defaults = |set: &mut Setter<'_>| set("log.level", "debug");
/// fs.parse(["--log.level", "info"], [settings::provider(defaults)]).unwrap();
///
/// assert_eq!(level.get(), "info");
/// ```
pub trait Provider {
    /// Label used in log events.
    fn name(&self) -> &str {
        "provider"
    }

    /// Emits every leaf of the source through `set`.
    ///
    /// # Errors
    ///
    /// Returns the first read, decode or `set` error.
    fn provide(&self, set: &mut Setter<'_>) -> Result<(), ArgsError>;
}

impl<F> Provider for F
where
    F: Fn(&mut Setter<'_>) -> Result<(), ArgsError>,
{
    fn provide(&self, set: &mut Setter<'_>) -> Result<(), ArgsError> {
        self(set)
    }
}
