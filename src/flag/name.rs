//! Flag name specs: `long`, `s`, `long,s` or `s,long`.

use std::fmt;
use std::str::FromStr;

use super::error::ArgsError;

/// The validated long and short names of one option.
///
/// At least one of the two is present. Long names are two or more
/// characters, never start with `-` and contain neither `=` nor a space.
/// Short names are a single letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagName {
    long: Option<String>,
    short: Option<char>,
}

impl FlagName {
    /// Parses a name spec.
    ///
    /// The spec is split on `,`; a part of length one is always the short
    /// name regardless of its position.
    ///
    /// # Errors
    ///
    /// Returns [`ArgsError::InvalidName`] describing the first violated rule.
    ///
    /// # Example
    ///
    /// ```
    /// use flagstack::flag::FlagName;
    ///
    /// let name = FlagName::parse("p,port").unwrap();
    /// assert_eq!(name.long(), Some("port"));
    /// assert_eq!(name.short(), Some('p'));
    /// ```
    pub fn parse(spec: &str) -> Result<Self, ArgsError> {
        let parts: Vec<&str> = spec.split(',').collect();
        let (mut long, mut short) = match parts.as_slice() {
            [only] => (*only, ""),
            [first, second] => (*first, *second),
            _ => {
                return Err(ArgsError::invalid_name(
                    spec,
                    "expected `long`, `short`, `long,short` or `short,long`",
                ));
            }
        };

        if long.chars().count() == 1 {
            std::mem::swap(&mut long, &mut short);
        }

        if !long.is_empty() {
            validate_long(spec, long)?;
        }
        let short = if short.is_empty() {
            None
        } else {
            Some(validate_short(spec, short)?)
        };

        if long.is_empty() && short.is_none() {
            return Err(ArgsError::invalid_name(spec, "flag name is empty"));
        }

        Ok(Self {
            long: (!long.is_empty()).then(|| long.to_string()),
            short,
        })
    }

    /// The long name, if any.
    #[must_use]
    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// The short name, if any.
    #[must_use]
    pub const fn short(&self) -> Option<char> {
        self.short
    }

    /// The long name, falling back to the short name.
    #[must_use]
    pub fn primary(&self) -> String {
        self.long
            .clone()
            .or_else(|| self.short.map(String::from))
            .unwrap_or_default()
    }

    /// Every registry key of this option: the long name, then the short.
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.long
            .iter()
            .cloned()
            .chain(self.short.map(String::from))
    }
}

fn validate_long(spec: &str, long: &str) -> Result<(), ArgsError> {
    if long.chars().count() == 1 {
        return Err(ArgsError::invalid_name(
            spec,
            format!("long flag {long:?} should be a word"),
        ));
    }
    if long.starts_with('-') {
        return Err(ArgsError::invalid_name(
            spec,
            format!("long flag {long:?} begins with -"),
        ));
    }
    if long.contains('=') {
        return Err(ArgsError::invalid_name(
            spec,
            format!("long flag {long:?} contains ="),
        ));
    }
    if long.contains(' ') {
        return Err(ArgsError::invalid_name(
            spec,
            format!("long flag {long:?} contains space"),
        ));
    }
    Ok(())
}

fn validate_short(spec: &str, short: &str) -> Result<char, ArgsError> {
    let mut chars = short.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => Ok(c),
        _ => Err(ArgsError::invalid_name(
            spec,
            format!("short flag {short:?} should be a letter"),
        )),
    }
}

impl FromStr for FlagName {
    type Err = ArgsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FlagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.long, self.short) {
            (Some(long), Some(short)) => write!(f, "-{short}, --{long}"),
            (Some(long), None) => write!(f, "--{long}"),
            (None, Some(short)) => write!(f, "-{short}"),
            (None, None) => Ok(()),
        }
    }
}
