//! Command-line scanning.
//!
//! A single forward cursor walks the argument list:
//!
//! - Scanning stops without error at the first token that is not a flag:
//!   anything not starting with `-`, a bare `-`, or `--`.
//! - `--name` and `-x` may carry a value after `=`; an empty one counts
//!   as no value at all.
//! - `-abc` sets the boolean options `a`, `b` and `c` together.
//! - A boolean flag consumes the next token only when it does not start
//!   with `-`; other flags consume the next token unconditionally.

use super::claims::Claims;
use super::defaults;
use super::error::ArgsError;
use super::registry::Registry;

/// How command-line scanning ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// Every flag token was applied.
    Finished,
    /// An unregistered `help`/`h` flag was seen; later tokens are untouched.
    HelpRequested,
}

/// A token that looks like a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token<'a> {
    short: bool,
    name: &'a str,
    inline: Option<&'a str>,
}

enum Step {
    Consumed(usize),
    Help,
}

/// Applies the flags at the start of `args` and claims every option set.
///
/// # Errors
///
/// Returns the first syntax or value error; options set by earlier tokens
/// keep their values.
pub fn scan(registry: &mut Registry, claims: &mut Claims, args: &[String]) -> Result<Scan, ArgsError> {
    let mut cursor = 0;
    while let Some(arg) = args.get(cursor) {
        let Some(token) = tokenize(arg)? else {
            break;
        };

        if token.short && token.name.chars().count() > 1 {
            if token.inline.is_some() {
                return Err(ArgsError::BundleValue(arg.clone()));
            }
            set_bundle(registry, claims, token.name)?;
            cursor += 1;
            continue;
        }

        match set_single(registry, claims, token, args.get(cursor + 1))? {
            Step::Consumed(count) => cursor += count,
            Step::Help => return Ok(Scan::HelpRequested),
        }
    }
    Ok(Scan::Finished)
}

/// Splits a flag token into its parts, or `None` when scanning should stop.
fn tokenize(arg: &str) -> Result<Option<Token<'_>>, ArgsError> {
    if arg.len() < 2 || !arg.starts_with('-') || arg == "--" {
        return Ok(None);
    }

    let (short, body) = match arg.strip_prefix("--") {
        Some(rest) => (false, rest),
        None => (true, &arg[1..]),
    };
    if body.is_empty() || body.starts_with('-') || body.starts_with('=') {
        return Err(ArgsError::BadSyntax(arg.to_string()));
    }

    let (name, inline) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value).filter(|v| !v.is_empty())),
        None => (body, None),
    };
    Ok(Some(Token {
        short,
        name,
        inline,
    }))
}

/// Sets every letter of a short-flag bundle to `true`.
///
/// All letters are checked before any option is touched.
fn set_bundle(registry: &mut Registry, claims: &mut Claims, letters: &str) -> Result<(), ArgsError> {
    let mut positions = Vec::with_capacity(letters.len());
    for letter in letters.chars() {
        let key = letter.to_string();
        let position = registry
            .position(&key)
            .ok_or_else(|| ArgsError::Undefined(key.clone()))?;
        if !registry.flag(position).is_bool() {
            return Err(ArgsError::NotBoolean(key));
        }
        positions.push((key, position));
    }

    for (key, position) in positions {
        let flag = registry.flag_mut(position);
        flag.value_mut()
            .set(defaults::IMPLICIT_BOOL)
            .map_err(|source| ArgsError::InvalidValue {
                flag: key,
                value: defaults::IMPLICIT_BOOL.to_string(),
                source,
            })?;
        claims.claim(flag.name());
        tracing::debug!(option = %flag.name().primary(), source = "command line", "option claimed");
    }
    Ok(())
}

fn set_single(
    registry: &mut Registry,
    claims: &mut Claims,
    token: Token<'_>,
    next: Option<&String>,
) -> Result<Step, ArgsError> {
    let Some(position) = registry.position(token.name) else {
        if defaults::HELP_NAMES.contains(&token.name) {
            return Ok(Step::Help);
        }
        return Err(ArgsError::Undefined(token.name.to_string()));
    };

    let flag = registry.flag_mut(position);
    let (value, consumed) = match (token.inline, next) {
        (Some(inline), _) => (inline, 1),
        (None, Some(next)) if !flag.is_bool() && !next.is_empty() => (next.as_str(), 2),
        (None, Some(next)) if !next.is_empty() && !next.starts_with('-') => (next.as_str(), 2),
        (None, _) if flag.is_bool() => (defaults::IMPLICIT_BOOL, 1),
        (None, _) => return Err(ArgsError::MissingValue(token.name.to_string())),
    };

    flag.value_mut()
        .set(value)
        .map_err(|source| ArgsError::InvalidValue {
            flag: token.name.to_string(),
            value: value.to_string(),
            source,
        })?;
    claims.claim(flag.name());
    tracing::debug!(option = %flag.name().primary(), source = "command line", "option claimed");
    Ok(Step::Consumed(consumed))
}
