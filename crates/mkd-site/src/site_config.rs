//! Site configuration file access.
//!
//! The whole file is parsed as an ordered YAML mapping for reading. Writes
//! replace only the text of the top-level `nav` block; every other byte of
//! the file, including comments, tags and anchors, is kept as written.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::nav::{NavNode, nav_tree};

/// Top-level key holding the navigation tree.
const NAV_KEY: &str = "nav";

/// Site configuration error.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Configuration file not found.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// YAML could not be parsed.
    #[error("Invalid site configuration: {0}")]
    Parse(#[source] serde_yaml::Error),
    /// Top-level value is not a mapping.
    #[error("Invalid site configuration: top level must be a mapping")]
    NotAMapping,
    /// YAML could not be emitted.
    #[error("Failed to serialize site configuration: {0}")]
    Serialize(#[source] serde_yaml::Error),
    /// Replacing `nav` would change other settings.
    #[error("Cannot update navigation in {}: {reason}", path.display())]
    Rewrite {
        /// File that was left untouched.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },
}

/// Parsed site configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SiteConfig {
    raw: Mapping,
}

impl SiteConfig {
    /// Parse configuration text. Blank or `null` documents yield an empty
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Parse`] for malformed YAML and
    /// [`SiteError::NotAMapping`] when the document is not a mapping.
    pub fn parse(text: &str) -> Result<Self, SiteError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        match serde_yaml::from_str::<Value>(text).map_err(SiteError::Parse)? {
            Value::Mapping(raw) => Ok(Self { raw }),
            Value::Null => Ok(Self::default()),
            _ => Err(SiteError::NotAMapping),
        }
    }

    /// `site_name`, if set to a scalar.
    #[must_use]
    pub fn site_name(&self) -> Option<String> {
        self.raw.get("site_name").and_then(scalar_string)
    }

    /// Theme name from `theme.name`, or `theme` itself when it is a string.
    #[must_use]
    pub fn theme_name(&self) -> Option<String> {
        match self.raw.get("theme")? {
            Value::Mapping(theme) => theme.get("name").and_then(scalar_string),
            other => scalar_string(other),
        }
    }

    /// Raw `nav` value, an empty sequence when absent.
    #[must_use]
    pub fn nav(&self) -> Value {
        self.raw
            .get(NAV_KEY)
            .cloned()
            .unwrap_or_else(|| Value::Sequence(Vec::new()))
    }

    /// Typed navigation tree.
    #[must_use]
    pub fn nav_tree(&self) -> Vec<NavNode> {
        nav_tree(&self.nav())
    }

    /// Replace `nav`, keeping its position among the top-level keys.
    pub fn set_nav(&mut self, nav: Value) {
        self.raw.insert(Value::String(NAV_KEY.to_owned()), nav);
    }

    /// Whole configuration mapping.
    #[must_use]
    pub fn raw(&self) -> &Mapping {
        &self.raw
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Site configuration file on disk.
///
/// Each call re-reads the file; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct SiteConfigFile {
    path: PathBuf,
}

impl SiteConfigFile {
    /// Create a handle for the configuration at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the configuration file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::NotFound`] if the file is missing, or a parse error.
    pub fn load(&self) -> Result<SiteConfig, SiteError> {
        SiteConfig::parse(&self.read_text()?)
    }

    fn read_text(&self) -> Result<String, SiteError> {
        fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                SiteError::NotFound(self.path.clone())
            } else {
                SiteError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })
    }

    /// Replace the navigation tree and rewrite the file.
    ///
    /// Only the top-level `nav` block is replaced (or appended when absent).
    /// The result is parsed again and must equal the original configuration
    /// with the new `nav`; otherwise nothing is written. The new value is
    /// stored as given, without shape checks.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError`] if the existing file cannot be loaded, if the
    /// rewrite would alter other settings, or if the write fails.
    pub fn update_navigation(&self, nav: Value) -> Result<(), SiteError> {
        let text = self.read_text()?;
        let mut expected = SiteConfig::parse(&text)?;
        let rewritten = splice_nav(&text, &nav)?;
        expected.set_nav(nav);

        let rejected = |reason: String| SiteError::Rewrite {
            path: self.path.clone(),
            reason,
        };
        match SiteConfig::parse(&rewritten) {
            Ok(actual) if actual == expected => {}
            Ok(_) => return Err(rejected("other settings would change".to_owned())),
            Err(e) => return Err(rejected(e.to_string())),
        }

        fs::write(&self.path, rewritten).map_err(|source| SiteError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), "Updated navigation");
        Ok(())
    }

    /// File name for messages (e.g. `mkdocs.yml`).
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }
}

/// Replace the top-level `nav` block of `text` with `nav`, keeping every other
/// line byte for byte. Appends the block when the key is absent.
fn splice_nav(text: &str, nav: &Value) -> Result<String, SiteError> {
    let mut entry = Mapping::new();
    entry.insert(Value::String(NAV_KEY.to_owned()), nav.clone());
    let block = serde_yaml::to_string(&entry).map_err(SiteError::Serialize)?;

    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let Some(start) = lines.iter().position(|line| is_nav_key(line)) else {
        let mut out = text.to_owned();
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&block);
        return Ok(out);
    };

    let mut end = start + 1;
    while end < lines.len() && continues_block(lines[end]) {
        end += 1;
    }
    // Trailing blank and comment lines stay with whatever follows.
    while end > start + 1 && is_blank_or_comment(lines[end - 1]) {
        end -= 1;
    }

    let mut out = lines[..start].concat();
    out.push_str(&block);
    out.push_str(&lines[end..].concat());
    Ok(out)
}

fn is_nav_key(line: &str) -> bool {
    line.strip_prefix("nav:")
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

/// Line belongs to the block opened by a top-level key: indented, blank,
/// a comment, or a column-0 sequence item.
fn continues_block(line: &str) -> bool {
    let content = line.trim_end_matches(['\r', '\n']);
    if content.starts_with("---") || content.starts_with("...") {
        return false;
    }
    content.is_empty() || content.starts_with([' ', '\t', '#', '-'])
}

fn is_blank_or_comment(line: &str) -> bool {
    let content = line.trim();
    content.is_empty() || content.starts_with('#')
}
