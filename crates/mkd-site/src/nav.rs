//! Typed view over the `nav` tree.
//!
//! MkDocs navigation is a sequence whose entries are bare page paths
//! (`- index.md`), titled pages (`- Home: index.md`), or titled sections
//! holding a nested sequence. Anything else is kept verbatim as
//! [`NavNode::Other`] so converting back with [`NavNode::to_value`] never
//! loses data.

use serde_yaml::{Mapping, Value};

/// Navigation tree entry.
#[derive(Debug, Clone, PartialEq)]
pub enum NavNode {
    /// Link to a document (or URL).
    Page {
        /// Display title; `None` for bare paths.
        title: Option<String>,
        /// Document path relative to the docs root.
        path: String,
    },
    /// Titled group of entries.
    Section {
        /// Display title.
        title: String,
        /// Nested entries in order.
        children: Vec<NavNode>,
    },
    /// Entry of any other shape, kept as-is.
    Other(Value),
}

impl NavNode {
    /// Interpret one raw `nav` entry.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(path) => Self::Page {
                title: None,
                path: path.clone(),
            },
            Value::Mapping(mapping) if mapping.len() == 1 => {
                let Some((Value::String(title), target)) = mapping.iter().next() else {
                    return Self::Other(value.clone());
                };
                match target {
                    Value::String(path) => Self::Page {
                        title: Some(title.clone()),
                        path: path.clone(),
                    },
                    Value::Sequence(items) => Self::Section {
                        title: title.clone(),
                        children: items.iter().map(Self::from_value).collect(),
                    },
                    _ => Self::Other(value.clone()),
                }
            }
            _ => Self::Other(value.clone()),
        }
    }

    /// Convert back into the raw `nav` entry.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Page { title: None, path } => Value::String(path.clone()),
            Self::Page {
                title: Some(title),
                path,
            } => single_entry(title, Value::String(path.clone())),
            Self::Section { title, children } => single_entry(
                title,
                Value::Sequence(children.iter().map(Self::to_value).collect()),
            ),
            Self::Other(value) => value.clone(),
        }
    }

    /// Display title, if the entry has one.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Page { title, .. } => title.as_deref(),
            Self::Section { title, .. } => Some(title),
            Self::Other(_) => None,
        }
    }
}

fn single_entry(key: &str, value: Value) -> Value {
    let mut mapping = Mapping::new();
    mapping.insert(Value::String(key.to_owned()), value);
    Value::Mapping(mapping)
}

/// Interpret a whole `nav` value. A non-sequence becomes a single
/// [`NavNode::Other`].
#[must_use]
pub fn nav_tree(nav: &Value) -> Vec<NavNode> {
    match nav {
        Value::Sequence(items) => items.iter().map(NavNode::from_value).collect(),
        Value::Null => Vec::new(),
        other => vec![NavNode::Other(other.clone())],
    }
}

/// Render the tree as an indented outline, one entry per line.
#[must_use]
pub fn outline(nodes: &[NavNode]) -> String {
    let mut out = String::new();
    write_outline(nodes, 0, &mut out);
    out
}

fn write_outline(nodes: &[NavNode], depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for node in nodes {
        match node {
            NavNode::Page { title: Some(title), path } => {
                out.push_str(&format!("{indent}- {title} ({path})\n"));
            }
            NavNode::Page { title: None, path } => {
                out.push_str(&format!("{indent}- {path}\n"));
            }
            NavNode::Section { title, children } => {
                out.push_str(&format!("{indent}- {title}\n"));
                write_outline(children, depth + 1, out);
            }
            NavNode::Other(value) => {
                let rendered = serde_yaml::to_string(value).unwrap_or_default();
                out.push_str(&format!("{indent}- {}\n", rendered.trim_end()));
            }
        }
    }
}
