//! Usage text rendering.

use std::fmt::Write;

use super::defaults;
use super::registry::{Flag, Registry};

/// Renders one line per option, sorted by primary name.
///
/// Names are padded to a common column; the default is appended only when
/// it is not the zero value of its type, quoted for string options.
///
/// ```text
///   -d, --debug	enable debug mode
///   -p, --port 	listen port (default "9999")
///       --timeout	request timeout (default 30s)
/// ```
#[must_use]
pub fn render(registry: &Registry) -> String {
    let rows: Vec<(String, &Flag)> = registry
        .sorted()
        .into_iter()
        .map(|flag| (flag_column(flag), flag))
        .collect();
    let width = rows
        .iter()
        .map(|(names, _)| names.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (names, flag) in rows {
        let _ = write!(out, "{names:<width$}\t{}", flag.usage());
        if let Some(default) = shown_default(flag) {
            let _ = write!(out, " (default {default})");
        }
        out.push('\n');
    }
    out
}

fn flag_column(flag: &Flag) -> String {
    let indent = defaults::USAGE_INDENT;
    match (flag.short(), flag.long()) {
        (Some(short), Some(long)) => format!("{indent}-{short}, --{long}"),
        (Some(short), None) => format!("{indent}-{short}"),
        (None, Some(long)) => format!("{indent}{}--{long}", defaults::SHORT_COLUMN),
        (None, None) => String::new(),
    }
}

fn shown_default(flag: &Flag) -> Option<String> {
    if flag.default_is_zero() {
        return None;
    }
    if flag.value().quoted() {
        Some(format!("{:?}", flag.default_text()))
    } else {
        Some(flag.default_text().to_string())
    }
}
