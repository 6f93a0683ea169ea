//! Environment variable resolution.
//!
//! Every unclaimed option with a long name is looked up under
//! `<PREFIX_><UPPER_SNAKE_LONG_NAME>`, where `-`, `.` and `/` become `_`.
//! Short-only options are skipped. Empty values count as unset.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use super::claims::Claims;
use super::defaults;
use super::error::ArgsError;
use super::registry::Registry;

/// Source of environment variables.
///
/// Lets resolution run against a fixed map instead of the process
/// environment.
pub trait Environment {
    /// Returns the value of `key`, if set.
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<S: BuildHasher> Environment for HashMap<String, String, S> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Environment for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Enabled environment lookup: normalized prefix plus variable source.
pub struct EnvConfig {
    prefix: String,
    lookup: Box<dyn Environment>,
}

impl EnvConfig {
    /// Creates a config reading from `lookup`; the prefix is normalized.
    #[must_use]
    pub fn new(prefix: &str, lookup: Box<dyn Environment>) -> Self {
        Self {
            prefix: normalize_prefix(prefix),
            lookup,
        }
    }

    /// The normalized prefix, including its trailing `_` when non-empty.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The variable name holding the value of the option `long`.
    #[must_use]
    pub fn key_for(&self, long: &str) -> String {
        env_key(&self.prefix, long)
    }
}

impl fmt::Debug for EnvConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvConfig")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

/// Uppercases `prefix` and ensures it ends with `_`.
///
/// An empty prefix stays empty.
#[must_use]
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.is_empty() {
        return String::new();
    }
    let mut normalized = prefix.to_uppercase();
    if !normalized.ends_with(defaults::ENV_PREFIX_SEPARATOR) {
        normalized.push(defaults::ENV_PREFIX_SEPARATOR);
    }
    normalized
}

/// Joins a normalized prefix and a long name into a variable name.
///
/// # Example
///
/// ```
/// use flagstack::flag::env_key;
///
/// assert_eq!(env_key("APP_", "log.level"), "APP_LOG_LEVEL");
/// assert_eq!(env_key("", "max-conns"), "MAX_CONNS");
/// ```
#[must_use]
pub fn env_key(prefix: &str, long: &str) -> String {
    let name = long.to_uppercase().replace(&defaults::ENV_SEPARATORS[..], "_");
    format!("{prefix}{name}")
}

/// Applies environment values to every unclaimed long-named option.
///
/// # Errors
///
/// Returns [`ArgsError::InvalidEnv`] for the first value that fails to
/// parse; options applied before it keep their values.
pub fn resolve(registry: &mut Registry, claims: &mut Claims, config: &EnvConfig) -> Result<(), ArgsError> {
    for flag in registry.iter_mut() {
        let Some(long) = flag.long() else {
            continue;
        };
        if claims.contains(long) {
            continue;
        }

        let key = config.key_for(long);
        let Some(value) = config.lookup.var(&key).filter(|v| !v.is_empty()) else {
            continue;
        };

        flag.value_mut()
            .set(&value)
            .map_err(|source| ArgsError::InvalidEnv {
                key: key.clone(),
                value: value.clone(),
                source,
            })?;
        claims.claim(flag.name());
        tracing::debug!(option = %flag.name().primary(), key = %key, source = "environment", "option claimed");
    }
    Ok(())
}
