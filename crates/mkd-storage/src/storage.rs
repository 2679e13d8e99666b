//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for document CRUD against a docs root,
//! along with [`StorageError`] for unified error handling across backends.
//!
//! # Path Convention
//!
//! All path parameters are paths relative to the docs root using `/`
//! separators (e.g., `"index.md"`, `"guide/install.md"`). Paths that would
//! resolve outside the root are rejected with [`StorageErrorKind::InvalidPath`].

use std::path::PathBuf;

use mkd_meta::{Frontmatter, Metadata};
use serde::Serialize;

/// Listing entry for a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentInfo {
    /// Path relative to the docs root.
    pub path: String,
    /// File size in bytes.
    pub size: u64,
    /// Modification time as seconds since Unix epoch.
    pub modified: f64,
    /// Display title (resolved: metadata.title > H1 > path).
    pub title: String,
    /// True if the document carries non-empty frontmatter.
    pub has_metadata: bool,
}

/// Document split into frontmatter and body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Path relative to the docs root.
    pub path: String,
    /// Frontmatter status and mapping.
    pub frontmatter: Frontmatter,
    /// Content without the frontmatter block.
    pub body: String,
}

impl Document {
    /// Frontmatter mapping, empty when absent or malformed.
    #[must_use]
    pub fn metadata(&self) -> Metadata {
        self.frontmatter.metadata().cloned().unwrap_or_default()
    }
}

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Document does not exist.
    NotFound,
    /// Document already exists (for create operations).
    AlreadyExists,
    /// Path escapes the docs root or is otherwise unusable.
    InvalidPath,
    /// Search pattern or glob could not be compiled.
    InvalidQuery,
    /// Permission denied.
    PermissionDenied,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and optional source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Extra detail for the message.
    pub message: Option<String>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            message: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach a detail message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create an already exists error with path.
    #[must_use]
    pub fn already_exists(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::AlreadyExists).with_path(path)
    }

    /// Create an invalid path error with path and reason.
    #[must_use]
    pub fn invalid_path(path: impl Into<PathBuf>, reason: &str) -> Self {
        Self::new(StorageErrorKind::InvalidPath)
            .with_path(path)
            .with_message(reason)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::AlreadyExists => StorageErrorKind::AlreadyExists,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "Kind: path (message) (source)" or "Kind: source"
        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "File not found",
            StorageErrorKind::AlreadyExists => "File already exists",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::InvalidQuery => "Invalid query",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::Other => "Storage error",
        };

        write!(f, "{kind_str}")?;

        if let Some(path) = &self.path {
            write!(f, ": {}", path.display())?;
        }

        let details = self
            .message
            .iter()
            .cloned()
            .chain(self.source.iter().map(ToString::to_string));
        for detail in details {
            if self.path.is_some() {
                write!(f, " ({detail})")?;
            } else {
                write!(f, ": {detail}")?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Document CRUD over a docs root.
///
/// Every call re-reads or re-writes the backing file; implementations hold no
/// document state between calls.
pub trait Storage: Send + Sync {
    /// List documents matching a glob pattern, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::InvalidQuery`] for malformed patterns and
    /// [`StorageErrorKind::InvalidPath`] for patterns reaching outside the root.
    fn list(&self, pattern: &str) -> Result<Vec<DocumentInfo>, StorageError>;

    /// Paths of every Markdown document, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the root cannot be enumerated.
    fn paths(&self) -> Result<Vec<String>, StorageError>;

    /// Read a document and split off its frontmatter.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::NotFound`] if the document doesn't exist.
    fn read(&self, path: &str) -> Result<Document, StorageError>;

    /// Create a new document. Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::AlreadyExists`] if the document exists.
    fn create(&self, path: &str, body: &str, metadata: Option<&Metadata>)
    -> Result<(), StorageError>;

    /// Replace an existing document's body.
    ///
    /// With `metadata` of `None` the current frontmatter is kept; otherwise the
    /// supplied mapping replaces it wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::NotFound`] if the document doesn't exist.
    fn update(&self, path: &str, body: &str, metadata: Option<&Metadata>)
    -> Result<(), StorageError>;

    /// Delete a document.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::NotFound`] if the document doesn't exist.
    fn delete(&self, path: &str) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_storage_error_new() {
        let err = StorageError::new(StorageErrorKind::NotFound);

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert!(err.path.is_none());
        assert!(err.message.is_none());
    }

    #[test]
    fn test_storage_error_with_path() {
        let err = StorageError::not_found("guide/a.md");

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.path.as_deref(), Some(Path::new("guide/a.md")));
    }

    #[test]
    fn test_storage_error_io_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = StorageError::io(io_err, Some(PathBuf::from("a.md")));

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.path.as_deref(), Some(Path::new("a.md")));
    }

    #[test]
    fn test_storage_error_io_already_exists() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AlreadyExists, "exists");
        let err = StorageError::io(io_err, None);

        assert_eq!(err.kind, StorageErrorKind::AlreadyExists);
    }

    #[test]
    fn test_storage_error_io_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StorageError::io(io_err, None);

        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
    }

    #[test]
    fn test_storage_error_display_with_path() {
        assert_eq!(
            StorageError::not_found("a.md").to_string(),
            "File not found: a.md"
        );
        assert_eq!(
            StorageError::already_exists("a.md").to_string(),
            "File already exists: a.md"
        );
    }

    #[test]
    fn test_storage_error_display_with_reason() {
        let err = StorageError::invalid_path("../a.md", "escapes the documentation root");

        assert_eq!(
            err.to_string(),
            "Invalid path: ../a.md (escapes the documentation root)"
        );
    }

    #[test]
    fn test_storage_error_display_source_without_path() {
        let err = StorageError::new(StorageErrorKind::InvalidQuery).with_message("unclosed group");

        assert_eq!(err.to_string(), "Invalid query: unclosed group");
    }

    #[test]
    fn test_storage_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StorageError>();
    }

    #[test]
    fn test_document_metadata_empty_when_absent() {
        let doc = Document {
            path: "a.md".to_owned(),
            frontmatter: Frontmatter::Absent,
            body: "Body".to_owned(),
        };

        assert!(doc.metadata().is_empty());
    }
}
