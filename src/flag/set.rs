//! The option set and its resolution driver.

use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

use crate::source::Provider;

use super::claims::Claims;
use super::cli::{self, Scan};
use super::env::{self, EnvConfig};
use super::error::ArgsError;
use super::registry::{Flag, Registry};
use super::settings::Setting;
use super::usage;
use super::value::{Handle, TypedValue, Value};

/// How a resolution run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every source was applied.
    Resolved,
    /// The command line asked for help; usage was written to the output
    /// and the remaining arguments were not scanned. Environment and
    /// structured sources were still applied.
    HelpShown,
}

/// A set of named options and the state of one resolution run.
///
/// Register options, then call [`parse`](Self::parse) once. Values are
/// resolved in fixed order: command line, environment, then structured
/// sources in the order they were added. An option assigned by one source
/// is claimed and never changed by a later one.
///
/// # Example
///
/// ```
/// use flagstack::flag::FlagSet;
///
/// let mut fs = FlagSet::new();
/// let port = fs.string("port,p", "9999", "listen port").unwrap();
/// let debug = fs.bool("debug", false, "enable debug mode").unwrap();
///
/// fs.parse_args(["-p", "8888", "--debug", "true"]).unwrap();
///
/// assert_eq!(port.get(), "8888");
/// assert!(debug.get());
/// ```
pub struct FlagSet {
    registry: Registry,
    claims: Claims,
    env: Option<EnvConfig>,
    providers: Vec<Box<dyn Provider>>,
    output: Box<dyn Write>,
}

impl Default for FlagSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagSet")
            .field("registry", &self.registry)
            .field("claims", &self.claims)
            .field("env", &self.env)
            .field("providers", &self.providers.len())
            .finish_non_exhaustive()
    }
}

impl FlagSet {
    /// Creates an empty set writing usage to stdout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            claims: Claims::new(),
            env: None,
            providers: Vec::new(),
            output: Box::new(io::stdout()),
        }
    }

    /// Redirects usage output.
    pub fn set_output(&mut self, output: impl Write + 'static) {
        self.output = Box::new(output);
    }

    /// Registers a string option.
    ///
    /// # Errors
    ///
    /// Returns a definition error for a malformed or taken name.
    pub fn string(
        &mut self,
        spec: &str,
        default: impl Into<String>,
        usage: &str,
    ) -> Result<Handle<String>, ArgsError> {
        self.typed(spec, default.into(), TypedValue::String, usage)
    }

    /// Registers a boolean option.
    ///
    /// # Errors
    ///
    /// Returns a definition error for a malformed or taken name.
    pub fn bool(&mut self, spec: &str, default: bool, usage: &str) -> Result<Handle<bool>, ArgsError> {
        self.typed(spec, default, TypedValue::Bool, usage)
    }

    /// Registers a platform-sized signed integer option.
    ///
    /// # Errors
    ///
    /// Returns a definition error for a malformed or taken name.
    pub fn int(&mut self, spec: &str, default: isize, usage: &str) -> Result<Handle<isize>, ArgsError> {
        self.typed(spec, default, TypedValue::Int, usage)
    }

    /// Registers a 64-bit signed integer option.
    ///
    /// # Errors
    ///
    /// Returns a definition error for a malformed or taken name.
    pub fn int64(&mut self, spec: &str, default: i64, usage: &str) -> Result<Handle<i64>, ArgsError> {
        self.typed(spec, default, TypedValue::Int64, usage)
    }

    /// Registers a platform-sized unsigned integer option.
    ///
    /// # Errors
    ///
    /// Returns a definition error for a malformed or taken name.
    pub fn uint(&mut self, spec: &str, default: usize, usage: &str) -> Result<Handle<usize>, ArgsError> {
        self.typed(spec, default, TypedValue::Uint, usage)
    }

    /// Registers a 64-bit unsigned integer option.
    ///
    /// # Errors
    ///
    /// Returns a definition error for a malformed or taken name.
    pub fn uint64(&mut self, spec: &str, default: u64, usage: &str) -> Result<Handle<u64>, ArgsError> {
        self.typed(spec, default, TypedValue::Uint64, usage)
    }

    /// Registers a duration option (`1h30m`, `250ms`, ...).
    ///
    /// # Errors
    ///
    /// Returns a definition error for a malformed or taken name.
    pub fn duration(
        &mut self,
        spec: &str,
        default: Duration,
        usage: &str,
    ) -> Result<Handle<Duration>, ArgsError> {
        self.typed(spec, default, TypedValue::Duration, usage)
    }

    /// Registers any [`Value`] implementation.
    ///
    /// # Errors
    ///
    /// Returns a definition error for a malformed or taken name.
    pub fn add(&mut self, spec: &str, value: impl Value + 'static, usage: &str) -> Result<(), ArgsError> {
        self.registry.add(spec, Box::new(value), usage)?;
        Ok(())
    }

    fn typed<T>(
        &mut self,
        spec: &str,
        default: T,
        wrap: fn(Handle<T>) -> TypedValue,
        usage: &str,
    ) -> Result<Handle<T>, ArgsError> {
        let handle = Handle::new(default);
        self.registry.add(spec, Box::new(wrap(handle.clone())), usage)?;
        Ok(handle)
    }

    /// Looks up an option by its long or short name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Flag> {
        self.registry.lookup(name)
    }

    /// Whether `name` was assigned by some source during resolution.
    #[must_use]
    pub fn is_claimed(&self, name: &str) -> bool {
        self.claims.contains(name)
    }

    /// Registered options in registration order.
    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.registry.iter()
    }

    /// Renders the usage text.
    #[must_use]
    pub fn usage(&self) -> String {
        usage::render(&self.registry)
    }

    /// Resolves options from `args` alone.
    ///
    /// # Errors
    ///
    /// See [`parse`](Self::parse).
    pub fn parse_args<I, S>(&mut self, args: I) -> Result<Outcome, ArgsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parse(args, Vec::<Setting>::new())
    }

    /// Applies `settings`, then resolves every option.
    ///
    /// `args` excludes the program name. Scanning stops at the first
    /// non-flag token, `--` or a bare `-`.
    ///
    /// # Errors
    ///
    /// Returns the first error from the command line, the environment or
    /// a structured source. Values assigned before the error are kept.
    pub fn parse<I, S>(
        &mut self,
        args: I,
        settings: impl IntoIterator<Item = Setting>,
    ) -> Result<Outcome, ArgsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for setting in settings {
            match setting {
                Setting::Env(config) => self.env = Some(config),
                Setting::Source(provider) => self.providers.push(provider),
            }
        }

        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let outcome = match cli::scan(&mut self.registry, &mut self.claims, &args)? {
            Scan::Finished => Outcome::Resolved,
            Scan::HelpRequested => {
                let text = self.usage();
                self.output
                    .write_all(text.as_bytes())
                    .and_then(|()| self.output.flush())
                    .map_err(ArgsError::Output)?;
                Outcome::HelpShown
            }
        };

        if let Some(config) = &self.env {
            env::resolve(&mut self.registry, &mut self.claims, config)?;
        }
        self.apply_sources()?;

        Ok(outcome)
    }

    fn apply_sources(&mut self) -> Result<(), ArgsError> {
        let Self {
            registry,
            claims,
            providers,
            ..
        } = self;

        for provider in providers.iter() {
            let origin = provider.name().to_string();
            let mut pending = Claims::new();
            provider.provide(&mut |key: &str, value: &str| {
                assign(registry, claims, &mut pending, &origin, key, value)
            })?;
            claims.absorb(pending);
        }
        Ok(())
    }
}

/// Applies one structured pair unless its option is claimed or unknown.
///
/// Claims made by the running source are collected in `pending` so a
/// later leaf of the same source may still replace an earlier one.
fn assign(
    registry: &mut Registry,
    claims: &Claims,
    pending: &mut Claims,
    origin: &str,
    key: &str,
    value: &str,
) -> Result<(), ArgsError> {
    if claims.contains(key) {
        tracing::trace!(key, source = origin, "option already claimed, ignoring");
        return Ok(());
    }
    let Some(position) = registry.position(key) else {
        tracing::trace!(key, source = origin, "unknown key, ignoring");
        return Ok(());
    };
    if value.is_empty() {
        return Ok(());
    }

    let flag = registry.flag_mut(position);
    flag.value_mut()
        .set(value)
        .map_err(|source| ArgsError::InvalidSourceValue {
            key: key.to_string(),
            value: value.to_string(),
            source,
        })?;
    pending.claim(flag.name());
    tracing::debug!(option = %flag.name().primary(), key, source = origin, "option claimed");
    Ok(())
}
