//! Error types for option registration and resolution.

use std::path::PathBuf;

use thiserror::Error;

use crate::duration::DurationError;

/// Error produced when text cannot be stored in a value cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The text is not valid for the value's type.
    #[error("invalid {kind} syntax {input:?}")]
    Syntax {
        /// Name of the expected type
        kind: &'static str,
        /// The rejected text
        input: String,
    },

    /// The text is well formed but does not fit the value's type.
    #[error("{kind} value {input:?} out of range")]
    Range {
        /// Name of the expected type
        kind: &'static str,
        /// The rejected text
        input: String,
    },

    /// Duration text failed to parse.
    #[error(transparent)]
    Duration(#[from] DurationError),

    /// Rejection reported by a user-defined value.
    #[error("{0}")]
    Custom(String),
}

impl ValueError {
    /// Creates a `Syntax` error for the given type name.
    #[must_use]
    pub fn syntax(kind: &'static str, input: &str) -> Self {
        Self::Syntax {
            kind,
            input: input.to_string(),
        }
    }
}

/// Error type for registering options and resolving their values.
///
/// Every resolution layer returns the first error it hits; values
/// assigned before the failure keep their state.
#[derive(Debug, Error)]
pub enum ArgsError {
    /// The name spec given at registration is malformed.
    #[error("invalid flag name {spec:?}: {reason}")]
    InvalidName {
        /// The name spec as passed to registration
        spec: String,
        /// What is wrong with it
        reason: String,
    },

    /// A long or short name is already registered.
    #[error("flag redefined: {name}")]
    Redefined {
        /// The clashing name
        name: String,
    },

    /// A command-line token looks like a flag but is malformed.
    #[error("bad flag syntax: {0}")]
    BadSyntax(String),

    /// A command-line flag names no registered option.
    #[error("flag provided but not defined: {0}")]
    Undefined(String),

    /// A bundled short flag names a non-boolean option.
    #[error("flag is not a boolean flag: {0}")]
    NotBoolean(String),

    /// A bundle of short flags was given an `=` value.
    #[error("bundled short flags cannot take a value: {0}")]
    BundleValue(String),

    /// A non-boolean flag is the last token and has no value.
    #[error("flag needs an argument: {0}")]
    MissingValue(String),

    /// Command-line text failed to parse for the flag's type.
    #[error("invalid value {value:?} for flag {flag}: {source}")]
    InvalidValue {
        /// The flag name as written
        flag: String,
        /// The rejected text
        value: String,
        /// Underlying value error
        #[source]
        source: ValueError,
    },

    /// An environment variable failed to parse for the option's type.
    #[error("invalid value {value:?} for environment variable {key}: {source}")]
    InvalidEnv {
        /// The environment variable name
        key: String,
        /// The rejected text
        value: String,
        /// Underlying value error
        #[source]
        source: ValueError,
    },

    /// A structured source value failed to parse for the option's type.
    #[error("invalid value {value:?} for config key {key}: {source}")]
    InvalidSourceValue {
        /// The flattened key
        key: String,
        /// The rejected text
        value: String,
        /// Underlying value error
        #[source]
        source: ValueError,
    },

    /// Failed to read a structured source file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A structured source could not be decoded into a tree.
    #[error("decode {format} config file failed: {reason}")]
    Decode {
        /// Format name (`json`, `yaml`, `toml`)
        format: &'static str,
        /// Decoder message
        reason: String,
    },

    /// A leaf in a structured source has no text representation.
    #[error("unexpected {format} value at {key:?}: {found}")]
    UnsupportedValue {
        /// Format name
        format: &'static str,
        /// The flattened key of the offending leaf
        key: String,
        /// Short description of what was found
        found: String,
    },

    /// The config file extension maps to no known format.
    #[error("cannot infer config format for '{}'", path.display())]
    UnknownFormat {
        /// Path whose extension was not recognized
        path: PathBuf,
    },

    /// Writing usage text failed.
    #[error("failed to write usage: {0}")]
    Output(#[source] std::io::Error),
}

impl ArgsError {
    /// Creates an `InvalidName` error.
    #[must_use]
    pub fn invalid_name(spec: &str, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true for errors raised while defining options.
    #[must_use]
    pub const fn is_definition(&self) -> bool {
        matches!(self, Self::InvalidName { .. } | Self::Redefined { .. })
    }
}
