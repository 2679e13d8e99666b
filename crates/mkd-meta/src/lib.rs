//! Frontmatter codec for mkdocs-mcp.
//!
//! Splits Markdown documents into a YAML metadata block and a body, renders
//! metadata back into a block, and resolves display titles.
//!
//! # Example
//!
//! ```
//! use mkd_meta::{extract, Frontmatter};
//!
//! let parsed = extract("---\ntitle: Install\n---\n# Install\n");
//! assert!(matches!(parsed.frontmatter, Frontmatter::Present(_)));
//! assert_eq!(parsed.body, "# Install\n");
//! ```

mod frontmatter;
mod json;
mod title;

pub use frontmatter::{Frontmatter, Metadata, ParsedDocument, compose, extract, serialize};
pub use json::{json_to_yaml, metadata_from_json, metadata_to_json, yaml_to_json};
pub use title::{display_title, extract_title};

/// Error type for metadata operations.
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    /// YAML could not be parsed or emitted.
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Top-level value is not a mapping.
    #[error("Frontmatter must be a mapping of keys to values")]
    NotAMapping,
}
