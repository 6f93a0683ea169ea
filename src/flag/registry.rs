//! Option registry: names to owned value cells.

use std::collections::HashMap;

use super::error::ArgsError;
use super::name::FlagName;
use super::value::Value;

/// One registered option.
#[derive(Debug)]
pub struct Flag {
    name: FlagName,
    usage: String,
    value: Box<dyn Value>,
    default: String,
    default_is_zero: bool,
}

impl Flag {
    /// The option's names.
    #[must_use]
    pub const fn name(&self) -> &FlagName {
        &self.name
    }

    /// The long name, if any.
    #[must_use]
    pub fn long(&self) -> Option<&str> {
        self.name.long()
    }

    /// The short name, if any.
    #[must_use]
    pub const fn short(&self) -> Option<char> {
        self.name.short()
    }

    /// Usage text given at registration.
    #[must_use]
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// The value rendered at registration time.
    #[must_use]
    pub fn default_text(&self) -> &str {
        &self.default
    }

    /// Whether the default is the zero value of its type.
    #[must_use]
    pub const fn default_is_zero(&self) -> bool {
        self.default_is_zero
    }

    /// The current value rendered as text.
    #[must_use]
    pub fn current(&self) -> String {
        self.value.render()
    }

    /// Whether the option is a boolean switch.
    #[must_use]
    pub fn is_bool(&self) -> bool {
        self.value.is_bool()
    }

    pub(crate) fn value(&self) -> &dyn Value {
        self.value.as_ref()
    }

    pub(crate) fn value_mut(&mut self) -> &mut dyn Value {
        self.value.as_mut()
    }
}

/// Mapping from every long and short name to its option.
///
/// Long and short names share one namespace.
#[derive(Debug, Default)]
pub struct Registry {
    flags: Vec<Flag>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `value` under the names in `spec`.
    ///
    /// The default text is snapshotted from `value` before insertion. The
    /// registry is left untouched when any check fails.
    ///
    /// # Errors
    ///
    /// Returns [`ArgsError::InvalidName`] for a malformed spec and
    /// [`ArgsError::Redefined`] when a name is taken.
    pub fn add(
        &mut self,
        spec: &str,
        value: Box<dyn Value>,
        usage: impl Into<String>,
    ) -> Result<&Flag, ArgsError> {
        let name = FlagName::parse(spec)?;
        if let Some(taken) = name.keys().find(|key| self.index.contains_key(key)) {
            return Err(ArgsError::Redefined { name: taken });
        }

        let position = self.flags.len();
        for key in name.keys() {
            self.index.insert(key, position);
        }
        self.flags.push(Flag {
            default: value.render(),
            default_is_zero: value.is_zero(),
            name,
            usage: usage.into(),
            value,
        });
        Ok(&self.flags[position])
    }

    /// Looks up an option by either of its names.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Flag> {
        self.position(name).map(|i| &self.flags[i])
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub(crate) fn flag(&self, position: usize) -> &Flag {
        &self.flags[position]
    }

    pub(crate) fn flag_mut(&mut self, position: usize) -> &mut Flag {
        &mut self.flags[position]
    }

    /// Options in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Flag> {
        self.flags.iter_mut()
    }

    /// Options sorted by primary name (long, else short).
    #[must_use]
    pub fn sorted(&self) -> Vec<&Flag> {
        let mut flags: Vec<&Flag> = self.flags.iter().collect();
        flags.sort_by_cached_key(|flag| flag.name.primary());
        flags
    }

    /// Number of registered options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}
