//! YAML frontmatter extraction and serialization.
//!
//! A frontmatter block is a YAML mapping framed by two `---` lines at the very
//! start of a document:
//!
//! ```text
//! ---
//! title: Install
//! tags: [setup]
//! ---
//! # Install
//! ```
//!
//! Extraction never fails. A block that is unterminated, not valid YAML, or not
//! a mapping is reported as [`Frontmatter::Malformed`] and the caller gets the
//! untouched document back as the body.

use serde_yaml::Value;

use crate::MetaError;

/// Ordered frontmatter mapping. Insertion order is kept on write.
pub type Metadata = serde_yaml::Mapping;

/// Delimiter line framing a frontmatter block.
const DELIMITER: &str = "---";

/// Outcome of looking for a frontmatter block.
#[derive(Debug, Clone, PartialEq)]
pub enum Frontmatter {
    /// Document does not start with a delimited block.
    Absent,
    /// Block exists but holds nothing (blank or `null`).
    Empty,
    /// Block parsed into a non-empty mapping.
    Present(Metadata),
    /// Block exists but could not be used; treated as absent.
    Malformed(String),
}

impl Frontmatter {
    /// Parsed mapping, if any.
    #[must_use]
    pub fn metadata(&self) -> Option<&Metadata> {
        match self {
            Self::Present(metadata) => Some(metadata),
            _ => None,
        }
    }

    /// Consume into a mapping, empty unless [`Frontmatter::Present`].
    #[must_use]
    pub fn into_metadata(self) -> Metadata {
        match self {
            Self::Present(metadata) => metadata,
            _ => Metadata::new(),
        }
    }

    /// True when the block yielded at least one key.
    #[must_use]
    pub fn has_metadata(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

/// Document split into frontmatter and body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument<'a> {
    /// Frontmatter status and mapping.
    pub frontmatter: Frontmatter,
    /// Content after the closing delimiter line, or the whole input when no
    /// usable block was found.
    pub body: &'a str,
}

/// Split raw document text into frontmatter and body.
///
/// The body starts right after the newline that ends the closing delimiter.
#[must_use]
pub fn extract(raw: &str) -> ParsedDocument<'_> {
    let Some((block, body)) = split_block(raw) else {
        return ParsedDocument {
            frontmatter: Frontmatter::Absent,
            body: raw,
        };
    };

    match parse_block(block) {
        Frontmatter::Malformed(reason) => ParsedDocument {
            frontmatter: Frontmatter::Malformed(reason),
            body: raw,
        },
        frontmatter => ParsedDocument { frontmatter, body },
    }
}

/// Render metadata as a delimited frontmatter block.
///
/// Returns an empty string for an empty mapping so the result can always be
/// prepended to a body.
pub fn serialize(metadata: &Metadata) -> Result<String, MetaError> {
    if metadata.is_empty() {
        return Ok(String::new());
    }
    let yaml = serde_yaml::to_string(metadata)?;
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n"))
}

/// Build full document text from optional metadata and a body.
pub fn compose(metadata: Option<&Metadata>, body: &str) -> Result<String, MetaError> {
    let mut text = match metadata {
        Some(metadata) => serialize(metadata)?,
        None => String::new(),
    };
    text.push_str(body);
    Ok(text)
}

/// Locate the YAML block between the opening and closing delimiter lines.
fn split_block(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix(DELIMITER)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == DELIMITER {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn parse_block(block: &str) -> Frontmatter {
    if block.trim().is_empty() {
        return Frontmatter::Empty;
    }

    match serde_yaml::from_str::<Value>(block) {
        Ok(Value::Null) => Frontmatter::Empty,
        Ok(Value::Mapping(mapping)) if mapping.is_empty() => Frontmatter::Empty,
        Ok(Value::Mapping(mapping)) => Frontmatter::Present(mapping),
        Ok(_) => Frontmatter::Malformed(MetaError::NotAMapping.to_string()),
        Err(e) => Frontmatter::Malformed(MetaError::from(e).to_string()),
    }
}
