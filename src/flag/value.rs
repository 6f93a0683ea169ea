//! Typed value cells and the handles that read them.
//!
//! Every option owns one [`Value`]. The built-in kinds are the variants of
//! [`TypedValue`]; anything else can be registered by implementing
//! [`Value`] directly.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::duration;

use super::error::ValueError;

/// Shared read handle to a resolved value.
///
/// Registration returns a handle; it observes every later assignment made
/// during resolution, so read it after [`FlagSet::parse`] returns.
///
/// [`FlagSet::parse`]: super::FlagSet::parse
///
/// # Example
///
/// ```
/// use flagstack::flag::Handle;
///
/// let path = Handle::new(String::from("app.json"));
/// let view = path.clone();
/// path.replace(String::from("app.yaml"));
/// assert_eq!(view.get(), "app.yaml");
/// ```
pub struct Handle<T>(Rc<RefCell<T>>);

impl<T> Handle<T> {
    /// Creates a handle holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Runs `f` with a reference to the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.0.borrow())
    }

    /// Stores `value`, returning the previous one.
    pub fn replace(&self, value: T) -> T {
        self.0.replace(value)
    }
}

impl<T: Clone> Handle<T> {
    /// Returns a copy of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: Default> Default for Handle<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for Handle<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.0.borrow()).finish()
    }
}

/// A self-describing value cell.
///
/// Implementations render their current state as text and parse text back
/// into themselves. A failed [`set`](Value::set) must leave the cell
/// unchanged.
pub trait Value: fmt::Debug {
    /// Renders the current value as text.
    fn render(&self) -> String;

    /// Parses `text` and stores the result.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError`] if `text` is not valid for this value.
    fn set(&mut self, text: &str) -> Result<(), ValueError>;

    /// Whether the flag can be given on the command line without a value.
    fn is_bool(&self) -> bool {
        false
    }

    /// Whether the current value is the zero value of its type.
    ///
    /// Usage output omits defaults that are zero.
    fn is_zero(&self) -> bool;

    /// Whether usage output should quote the default.
    fn quoted(&self) -> bool {
        false
    }
}

/// The built-in value kinds.
#[derive(Debug, Clone)]
pub enum TypedValue {
    /// Arbitrary text.
    String(Handle<String>),
    /// A boolean switch.
    Bool(Handle<bool>),
    /// A platform-sized signed integer.
    Int(Handle<isize>),
    /// A 64-bit signed integer.
    Int64(Handle<i64>),
    /// A platform-sized unsigned integer.
    Uint(Handle<usize>),
    /// A 64-bit unsigned integer.
    Uint64(Handle<u64>),
    /// A time span written as `1h30m`, `250ms`, ...
    Duration(Handle<Duration>),
}

impl Value for TypedValue {
    fn render(&self) -> String {
        match self {
            Self::String(v) => v.get(),
            Self::Bool(v) => v.get().to_string(),
            Self::Int(v) => v.get().to_string(),
            Self::Int64(v) => v.get().to_string(),
            Self::Uint(v) => v.get().to_string(),
            Self::Uint64(v) => v.get().to_string(),
            Self::Duration(v) => duration::format(v.get()),
        }
    }

    fn set(&mut self, text: &str) -> Result<(), ValueError> {
        match self {
            Self::String(v) => {
                v.replace(text.to_string());
            }
            Self::Bool(v) => {
                v.replace(parse_bool(text)?);
            }
            Self::Int(v) => {
                v.replace(parse_signed(text, "int")?);
            }
            Self::Int64(v) => {
                v.replace(parse_signed(text, "int64")?);
            }
            Self::Uint(v) => {
                v.replace(parse_unsigned(text, "uint")?);
            }
            Self::Uint64(v) => {
                v.replace(parse_unsigned(text, "uint64")?);
            }
            Self::Duration(v) => {
                v.replace(duration::parse(text)?);
            }
        }
        Ok(())
    }

    fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    fn is_zero(&self) -> bool {
        match self {
            Self::String(v) => v.with(String::is_empty),
            Self::Bool(v) => !v.get(),
            Self::Int(v) => v.get() == 0,
            Self::Int64(v) => v.get() == 0,
            Self::Uint(v) => v.get() == 0,
            Self::Uint64(v) => v.get() == 0,
            Self::Duration(v) => v.get().is_zero(),
        }
    }

    fn quoted(&self) -> bool {
        matches!(self, Self::String(_))
    }
}

/// Parses boolean text.
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
///
/// # Errors
///
/// Returns [`ValueError::Syntax`] for anything else.
pub fn parse_bool(text: &str) -> Result<bool, ValueError> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ValueError::syntax("bool", text)),
    }
}

/// Parses signed integer text into `T`.
///
/// # Errors
///
/// Returns [`ValueError`] if the text is malformed or out of range for `T`.
pub fn parse_signed<T: TryFrom<i128>>(text: &str, kind: &'static str) -> Result<T, ValueError> {
    let (negative, magnitude) = parse_magnitude(text, kind, true)?;
    let range = || ValueError::Range {
        kind,
        input: text.to_string(),
    };

    let signed = i128::try_from(magnitude).map_err(|_| range())?;
    let signed = if negative { -signed } else { signed };
    T::try_from(signed).map_err(|_| range())
}

/// Parses unsigned integer text into `T`.
///
/// # Errors
///
/// Returns [`ValueError`] if the text is malformed or out of range for `T`.
pub fn parse_unsigned<T: TryFrom<u128>>(text: &str, kind: &'static str) -> Result<T, ValueError> {
    let (_, magnitude) = parse_magnitude(text, kind, false)?;
    T::try_from(magnitude).map_err(|_| ValueError::Range {
        kind,
        input: text.to_string(),
    })
}

/// Splits integer text into sign and magnitude.
///
/// Understands `0x`, `0o`, `0b` prefixes, a bare leading `0` for octal and
/// `_` separators after a prefix.
fn parse_magnitude(
    text: &str,
    kind: &'static str,
    signed: bool,
) -> Result<(bool, u128), ValueError> {
    let syntax = || ValueError::syntax(kind, text);

    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') if signed => (true, &text[1..]),
        Some(b'+') if signed => (false, &text[1..]),
        _ => (false, text),
    };

    let prefix = unsigned.get(..2).map(str::to_ascii_lowercase);
    let (radix, digits, prefixed) = match prefix.as_deref() {
        Some("0x") => (16, &unsigned[2..], true),
        Some("0o") => (8, &unsigned[2..], true),
        Some("0b") => (2, &unsigned[2..], true),
        _ if unsigned.len() > 1 && unsigned.starts_with('0') => (8, &unsigned[1..], true),
        _ => (10, unsigned, false),
    };

    if digits.contains('_') && (!prefixed || digits.ends_with('_') || digits.contains("__")) {
        return Err(syntax());
    }

    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_digit(radix)) {
        return Err(syntax());
    }

    let magnitude = u128::from_str_radix(&cleaned, radix).map_err(|_| ValueError::Range {
        kind,
        input: text.to_string(),
    })?;
    Ok((negative, magnitude))
}
