//! Flattening of nested documents into dotted keys.

use crate::flag::ArgsError;
use crate::flag::defaults::KEY_SEPARATOR;

use super::Setter;

/// One level of a decoded document.
#[derive(Debug)]
pub enum Node<'a, T> {
    /// Keyed children.
    Map(Vec<(String, &'a T)>),
    /// Elements emitted one by one under the parent key.
    List(&'a [T]),
    /// A scalar already rendered as text.
    Text(String),
    /// Null or absent; flattens to an empty string.
    Null,
    /// A shape with no text form, described for the error message.
    Unsupported(&'static str),
}

/// A decoded document that can be walked level by level.
pub trait Tree: Sized {
    /// Format name used in error messages.
    const FORMAT: &'static str;

    /// Classifies this node.
    fn node(&self) -> Node<'_, Self>;
}

/// Emits every leaf under `root` as a `(dotted.key, text)` pair.
///
/// List elements are emitted individually under the list's key. A null
/// root emits nothing.
///
/// # Errors
///
/// Returns [`ArgsError::Decode`] when the root is not a map,
/// [`ArgsError::UnsupportedValue`] for leaves without a text form, and
/// any error returned by `set`.
pub fn flatten<T: Tree>(root: &T, set: &mut Setter<'_>) -> Result<(), ArgsError> {
    match root.node() {
        Node::Map(entries) => walk_map::<T>("", entries, set),
        Node::Null => Ok(()),
        Node::Unsupported(found) => Err(ArgsError::Decode {
            format: T::FORMAT,
            reason: format!("unsupported top-level value: {found}"),
        }),
        _ => Err(ArgsError::Decode {
            format: T::FORMAT,
            reason: "top-level value must be a map".to_string(),
        }),
    }
}

fn walk_map<T: Tree>(
    parent: &str,
    entries: Vec<(String, &T)>,
    set: &mut Setter<'_>,
) -> Result<(), ArgsError> {
    for (key, child) in entries {
        let key = if parent.is_empty() {
            key
        } else {
            format!("{parent}{KEY_SEPARATOR}{key}")
        };
        walk::<T>(&key, child.node(), set)?;
    }
    Ok(())
}

fn walk<T: Tree>(key: &str, node: Node<'_, T>, set: &mut Setter<'_>) -> Result<(), ArgsError> {
    match node {
        Node::Map(entries) => walk_map::<T>(key, entries, set),
        Node::List(items) => {
            for item in items {
                let text = leaf_text::<T>(key, item.node())?;
                set(key, &text)?;
            }
            Ok(())
        }
        leaf => {
            let text = leaf_text::<T>(key, leaf)?;
            set(key, &text)
        }
    }
}

fn leaf_text<T: Tree>(key: &str, node: Node<'_, T>) -> Result<String, ArgsError> {
    let found = match node {
        Node::Text(text) => return Ok(text),
        Node::Null => return Ok(String::new()),
        Node::Map(_) => "map",
        Node::List(_) => "list",
        Node::Unsupported(found) => found,
    };
    Err(ArgsError::UnsupportedValue {
        format: T::FORMAT,
        key: key.to_string(),
        found: found.to_string(),
    })
}

impl Tree for serde_json::Value {
    const FORMAT: &'static str = "json";

    fn node(&self) -> Node<'_, Self> {
        match self {
            Self::Object(map) => Node::Map(map.iter().map(|(k, v)| (k.clone(), v)).collect()),
            Self::Array(items) => Node::List(items),
            Self::String(text) => Node::Text(text.clone()),
            Self::Number(number) => Node::Text(number.to_string()),
            Self::Bool(flag) => Node::Text(flag.to_string()),
            Self::Null => Node::Null,
        }
    }
}

impl Tree for serde_yaml::Value {
    const FORMAT: &'static str = "yaml";

    fn node(&self) -> Node<'_, Self> {
        match self {
            Self::Mapping(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (key, value) in map {
                    let Some(key) = yaml_key(key) else {
                        return Node::Unsupported("mapping with a non-scalar key");
                    };
                    entries.push((key, value));
                }
                Node::Map(entries)
            }
            Self::Sequence(items) => Node::List(items),
            Self::String(text) => Node::Text(text.clone()),
            Self::Number(number) => Node::Text(number.to_string()),
            Self::Bool(flag) => Node::Text(flag.to_string()),
            Self::Null => Node::Null,
            Self::Tagged(tagged) => tagged.value.node(),
        }
    }
}

fn yaml_key(key: &serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(text) => Some(text.clone()),
        serde_yaml::Value::Number(number) => Some(number.to_string()),
        serde_yaml::Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

impl Tree for toml::Value {
    const FORMAT: &'static str = "toml";

    fn node(&self) -> Node<'_, Self> {
        match self {
            Self::Table(table) => Node::Map(table.iter().map(|(k, v)| (k.clone(), v)).collect()),
            Self::Array(items) => Node::List(items),
            Self::String(text) => Node::Text(text.clone()),
            Self::Integer(number) => Node::Text(number.to_string()),
            Self::Float(number) => Node::Text(number.to_string()),
            Self::Boolean(flag) => Node::Text(flag.to_string()),
            Self::Datetime(datetime) => Node::Text(datetime.to_string()),
        }
    }
}
