//! Application startup and utilities.
//!
//! This module contains exit codes, the demo option set, tracing setup and
//! error hints that support the main entry point.

use std::fmt;
use std::time::Duration;

use flagstack::flag::{ArgsError, FlagSet, Handle};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, reload};

/// Handle used to change the log level once options are resolved.
pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Environment prefix for the demo options (`FLAGSTACK_PORT`, ...).
pub const ENV_PREFIX: &str = "flagstack";

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success or help shown (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Resolution error (exit code 1) - bad flag, bad value, unreadable config file.
    pub const RESOLUTION_ERROR: ExitCode = ExitCode::FAILURE;
}

/// Handles to the demo options.
pub struct Options {
    pub port: Handle<String>,
    pub debug: Handle<bool>,
    pub timeout: Handle<Duration>,
    pub workers: Handle<usize>,
    pub log_level: Handle<String>,
    pub config: Handle<String>,
}

impl Options {
    /// Registers every demo option on `fs`.
    ///
    /// # Errors
    ///
    /// Returns a definition error if a name is invalid or taken.
    pub fn register(fs: &mut FlagSet) -> Result<Self, ArgsError> {
        Ok(Self {
            port: fs.string("port,p", "9999", "listen port")?,
            debug: fs.bool("debug,d", false, "enable debug logging")?,
            timeout: fs.duration("timeout", Duration::from_secs(30), "request timeout")?,
            workers: fs.uint("workers", 4, "number of worker threads")?,
            log_level: fs.string("log.level", "info", "log level name")?,
            config: fs.string("config,c", "", "config file (.json, .yaml, .yml or .toml)")?,
        })
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "port={} debug={} timeout={} workers={} log.level={}",
            self.port.get(),
            self.debug.get(),
            flagstack::duration::format(self.timeout.get()),
            self.workers.get(),
            self.log_level.get(),
        )?;
        self.config.with(|config| {
            if config.is_empty() {
                Ok(())
            } else {
                write!(f, " config={config}")
            }
        })
    }
}

/// Prints helpful hints for common resolution errors.
pub fn print_error_hint(error: &ArgsError) {
    match error {
        ArgsError::Undefined(_)
        | ArgsError::BadSyntax(_)
        | ArgsError::NotBoolean(_)
        | ArgsError::BundleValue(_)
        | ArgsError::MissingValue(_) => {
            eprintln!("\nRun 'flagstack --help' to list the available options.");
        }
        ArgsError::UnknownFormat { .. } => {
            eprintln!("\nName the config file with a .json, .yaml, .yml or .toml extension.");
        }
        ArgsError::InvalidEnv { .. } => {
            eprintln!("\nCheck the {}_* environment variables.", ENV_PREFIX.to_uppercase());
        }
        _ => {}
    }
}

fn level_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

/// Installs the subscriber before resolution so library events are kept.
///
/// Events emitted while options resolve follow `RUST_LOG` (default
/// `info`); `--debug` only takes effect through [`set_verbose`].
pub fn setup_tracing() -> FilterHandle {
    let (filter, handle) = reload::Layer::new(level_filter(false));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
    handle
}

/// Switches to debug output when `verbose` is set.
pub fn set_verbose(handle: &FilterHandle, verbose: bool) {
    if !verbose {
        return;
    }
    if let Err(e) = handle.reload(level_filter(true)) {
        tracing::warn!("could not raise log level: {e}");
    }
}
