//! File-backed structured sources.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::flag::{ArgsError, Handle};

use super::tree::flatten;
use super::{Provider, Setter};

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JSON object document.
    Json,
    /// YAML mapping document.
    Yaml,
    /// TOML table document.
    Toml,
}

impl Format {
    /// Infers the format from a file extension (`json`, `yaml`/`yml`, `toml`).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Lowercase format name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decodes `content` and emits its flattened leaves through `set`.
///
/// An empty or whitespace-only YAML document emits nothing.
///
/// # Errors
///
/// Returns [`ArgsError::Decode`] when the text is not a valid document of
/// `format`, plus any flattening or `set` error.
pub fn flatten_str(format: Format, content: &str, set: &mut Setter<'_>) -> Result<(), ArgsError> {
    let decode = |reason: String| ArgsError::Decode {
        format: format.name(),
        reason,
    };

    match format {
        Format::Json => {
            let root: serde_json::Value =
                serde_json::from_str(content).map_err(|e| decode(e.to_string()))?;
            flatten(&root, set)
        }
        Format::Yaml => {
            if content.trim().is_empty() {
                return Ok(());
            }
            let root: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| decode(e.to_string()))?;
            flatten(&root, set)
        }
        Format::Toml => {
            let table: toml::Table = toml::from_str(content).map_err(|e| decode(e.to_string()))?;
            flatten(&toml::Value::Table(table), set)
        }
    }
}

/// A config file whose path is read when resolution runs.
///
/// The path usually comes from another option (`--config`), so it is held
/// as a [`Handle`] and only inspected inside [`Provider::provide`]. An
/// empty path is a silent no-op.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: Handle<String>,
    format: Option<Format>,
    label: String,
}

impl FileSource {
    /// A source decoding `path` as `format`.
    #[must_use]
    pub fn new(path: Handle<String>, format: Format) -> Self {
        Self {
            path,
            format: Some(format),
            label: format!("{format} file"),
        }
    }

    /// A source choosing its format from the file extension.
    #[must_use]
    pub fn infer(path: Handle<String>) -> Self {
        Self {
            path,
            format: None,
            label: "config file".to_string(),
        }
    }

    /// A JSON file source.
    #[must_use]
    pub fn json(path: Handle<String>) -> Self {
        Self::new(path, Format::Json)
    }

    /// A YAML file source.
    #[must_use]
    pub fn yaml(path: Handle<String>) -> Self {
        Self::new(path, Format::Yaml)
    }

    /// A TOML file source.
    #[must_use]
    pub fn toml(path: Handle<String>) -> Self {
        Self::new(path, Format::Toml)
    }

    /// The format, or `None` when it is inferred.
    #[must_use]
    pub const fn format(&self) -> Option<Format> {
        self.format
    }
}

impl Provider for FileSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn provide(&self, set: &mut Setter<'_>) -> Result<(), ArgsError> {
        let path = self.path.get();
        if path.is_empty() {
            tracing::debug!(source = %self.label, "no path configured, skipping");
            return Ok(());
        }

        let path = PathBuf::from(path);
        let format = match self.format {
            Some(format) => format,
            None => Format::from_path(&path).ok_or_else(|| ArgsError::UnknownFormat {
                path: path.clone(),
            })?,
        };

        let content = std::fs::read_to_string(&path).map_err(|e| ArgsError::FileRead {
            path: path.clone(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), %format, "reading config file");

        flatten_str(format, &content, set)
    }
}
