//! Default values for resolution settings and usage layout.
//!
//! Key separators, help names and usage columns shared by the scanner,
//! the environment resolver and the usage renderer.

/// Characters in a long name that become `_` in an environment key.
pub const ENV_SEPARATORS: [char; 3] = ['-', '.', '/'];

/// Separator placed between an environment prefix and the key.
pub const ENV_PREFIX_SEPARATOR: char = '_';

/// Separator joining nested keys of a structured source.
pub const KEY_SEPARATOR: char = '.';

/// Long names that trigger usage output when not registered.
pub const HELP_NAMES: [&str; 2] = ["help", "h"];

/// Text stored in a boolean flag given without a value.
pub const IMPLICIT_BOOL: &str = "true";

/// Indentation before a usage line.
pub const USAGE_INDENT: &str = "  ";

/// Placeholder width of `-x, ` used to align long-only flags.
pub const SHORT_COLUMN: &str = "    ";
