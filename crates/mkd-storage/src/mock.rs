//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::BTreeMap;
use std::sync::RwLock;

use glob::{MatchOptions, Pattern};
use mkd_meta::{Metadata, compose, display_title, extract};

use crate::fs::{MARKDOWN_PATTERN, codec_error};
use crate::path::{check_pattern, normalize, to_slash};
use crate::storage::{Document, DocumentInfo, Storage, StorageError, StorageErrorKind};

/// In-memory file.
#[derive(Debug, Clone)]
struct MockFile {
    content: String,
    mtime: f64,
}

/// Mock storage for testing.
///
/// Stores documents in memory, keyed by normalized relative path. Use the
/// builder methods to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use mkd_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("guide.md", "# User Guide\n\nContent.");
///
/// let doc = storage.read("guide.md").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: RwLock<BTreeMap<String, MockFile>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with raw content.
    ///
    /// # Panics
    ///
    /// Panics if the path is invalid or the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: &str, content: impl Into<String>) -> Self {
        let key = to_slash(&normalize(path).expect("valid mock path"));
        self.files.write().unwrap().insert(
            key,
            MockFile {
                content: content.into(),
                mtime: 0.0,
            },
        );
        self
    }

    /// Set modification time for a path.
    ///
    /// # Panics
    ///
    /// Panics if the path is invalid or the internal lock is poisoned.
    #[must_use]
    pub fn with_mtime(self, path: &str, mtime: f64) -> Self {
        let key = Self::key(path).expect("valid mock path");
        if let Some(file) = self.files.write().unwrap().get_mut(&key) {
            file.mtime = mtime;
        }
        self
    }

    /// Raw content of a stored file.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn content(&self, path: &str) -> Option<String> {
        self.files
            .read()
            .unwrap()
            .get(path)
            .map(|file| file.content.clone())
    }

    fn key(path: &str) -> Result<String, StorageError> {
        normalize(path).map(|p| to_slash(&p))
    }
}

impl Storage for MockStorage {
    fn list(&self, pattern: &str) -> Result<Vec<DocumentInfo>, StorageError> {
        check_pattern(pattern)?;
        let matcher = Pattern::new(pattern).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidQuery)
                .with_message(format!("invalid glob pattern {pattern:?}: {}", e.msg))
        })?;
        let options = MatchOptions {
            require_literal_separator: true,
            ..MatchOptions::new()
        };

        let files = self.files.read().unwrap();
        Ok(files
            .iter()
            .filter(|(path, _)| matcher.matches_with(path, options))
            .map(|(path, file)| {
                let parsed = extract(&file.content);
                DocumentInfo {
                    path: path.clone(),
                    size: file.content.len() as u64,
                    modified: file.mtime,
                    title: display_title(parsed.frontmatter.metadata(), parsed.body, path),
                    has_metadata: parsed.frontmatter.has_metadata(),
                }
            })
            .collect())
    }

    fn paths(&self) -> Result<Vec<String>, StorageError> {
        Ok(self
            .list(MARKDOWN_PATTERN)?
            .into_iter()
            .map(|info| info.path)
            .collect())
    }

    fn read(&self, path: &str) -> Result<Document, StorageError> {
        let key = Self::key(path)?;
        let files = self.files.read().unwrap();
        let file = files.get(&key).ok_or_else(|| StorageError::not_found(path))?;

        let parsed = extract(&file.content);
        Ok(Document {
            path: key.clone(),
            body: parsed.body.to_owned(),
            frontmatter: parsed.frontmatter,
        })
    }

    fn create(
        &self,
        path: &str,
        body: &str,
        metadata: Option<&Metadata>,
    ) -> Result<(), StorageError> {
        let key = Self::key(path)?;
        let mut files = self.files.write().unwrap();
        if files.contains_key(&key) {
            return Err(StorageError::already_exists(path));
        }
        let content = compose(metadata, body).map_err(|e| codec_error(path, e))?;
        files.insert(
            key,
            MockFile {
                content,
                mtime: 0.0,
            },
        );
        Ok(())
    }

    fn update(
        &self,
        path: &str,
        body: &str,
        metadata: Option<&Metadata>,
    ) -> Result<(), StorageError> {
        let key = Self::key(path)?;
        let mut files = self.files.write().unwrap();
        let file = files
            .get_mut(&key)
            .ok_or_else(|| StorageError::not_found(path))?;

        let content = match metadata {
            Some(metadata) => compose(Some(metadata), body),
            None => compose(extract(&file.content).frontmatter.metadata(), body),
        }
        .map_err(|e| codec_error(path, e))?;
        file.content = content;
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<(), StorageError> {
        let key = Self::key(path)?;
        self.files
            .write()
            .unwrap()
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found(path))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_mock_list_matches_like_fs() {
        let storage = MockStorage::new()
            .with_file("index.md", "# Home")
            .with_file("api/auth.md", "# Auth")
            .with_file("notes.txt", "text");

        let all: Vec<_> = storage
            .list(MARKDOWN_PATTERN)
            .unwrap()
            .into_iter()
            .map(|d| d.path)
            .collect();
        let top: Vec<_> = storage
            .list("*.md")
            .unwrap()
            .into_iter()
            .map(|d| d.path)
            .collect();

        assert_eq!(all, vec!["api/auth.md", "index.md"]);
        assert_eq!(top, vec!["index.md"]);
    }

    #[test]
    fn test_mock_mtime() {
        let storage = MockStorage::new()
            .with_file("a.md", "A")
            .with_mtime("a.md", 42.0);

        assert_eq!(storage.list("a.md").unwrap()[0].modified, 42.0);
    }

    #[test]
    fn test_mock_mtime_normalizes_path() {
        let storage = MockStorage::new()
            .with_file("guide/a.md", "A")
            .with_mtime("./guide/../guide/a.md", 7.0);

        assert_eq!(storage.list("guide/a.md").unwrap()[0].modified, 7.0);
    }

    #[test]
    fn test_mock_crud() {
        let storage = MockStorage::new();

        storage.create("a.md", "Body", None).unwrap();
        assert_eq!(
            storage.create("a.md", "Again", None).unwrap_err().kind,
            StorageErrorKind::AlreadyExists
        );

        storage.update("a.md", "Changed", None).unwrap();
        assert_eq!(storage.content("a.md").as_deref(), Some("Changed"));

        storage.delete("a.md").unwrap();
        assert_eq!(
            storage.read("a.md").unwrap_err().kind,
            StorageErrorKind::NotFound
        );
    }

    #[test]
    fn test_mock_rejects_traversal() {
        let storage = MockStorage::new();

        assert_eq!(
            storage.read("../a.md").unwrap_err().kind,
            StorageErrorKind::InvalidPath
        );
    }
}
