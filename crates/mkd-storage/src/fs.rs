//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for managing Markdown documents under a docs root
//! on the local filesystem.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use glob::{MatchOptions, Pattern};
use mkd_meta::{Frontmatter, Metadata, compose, display_title, extract};

use crate::path::{check_pattern, ensure_inside, normalize, to_slash};
use crate::storage::{Document, DocumentInfo, Storage, StorageError, StorageErrorKind};

/// Pattern enumerating every Markdown document.
pub const MARKDOWN_PATTERN: &str = "**/*.md";

/// Filesystem storage implementation.
///
/// Resolves every path against `source_dir` and refuses to touch anything
/// outside it. Holds no cache: each call goes to disk.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use mkd_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("docs"));
/// for doc in storage.list("**/*.md")? {
///     println!("{}: {}", doc.path, doc.title);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FsStorage {
    /// Root directory for document storage.
    source_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Root directory.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Resolve a relative document path to an absolute location inside the root.
    ///
    /// Returns the normalized relative path alongside the full path.
    fn resolve(&self, path: &str) -> Result<(String, PathBuf), StorageError> {
        let relative = normalize(path)?;
        let full = self.source_dir.join(&relative);
        ensure_inside(&self.source_dir, &full, path)?;
        Ok((to_slash(&relative), full))
    }

    /// Resolve a path that must name an existing regular file.
    fn resolve_existing(&self, path: &str) -> Result<(String, PathBuf), StorageError> {
        let (relative, full) = self.resolve(path)?;
        if !full.is_file() {
            return Err(StorageError::not_found(path));
        }
        Ok((relative, full))
    }

    /// Expand a glob pattern relative to the root into sorted file paths.
    fn glob_files(&self, pattern: &str) -> Result<Vec<PathBuf>, StorageError> {
        check_pattern(pattern)?;

        let root = Pattern::escape(&self.source_dir.to_string_lossy());
        let full_pattern = format!("{}/{pattern}", root.trim_end_matches('/'));
        let entries = glob::glob_with(&full_pattern, MatchOptions::new()).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidQuery)
                .with_message(format!("invalid glob pattern {pattern:?}: {}", e.msg))
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping unreadable glob entry");
                    None
                }
            })
            .filter(|path| path.is_file())
            .filter(|path| {
                let rel = self.relative_of(path);
                match ensure_inside(&self.source_dir, path, &rel) {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::debug!(path = %rel, error = %e, "Skipping document outside root");
                        false
                    }
                }
            })
            .collect();
        files.sort();
        Ok(files)
    }

    /// Path relative to the root with `/` separators.
    fn relative_of(&self, full: &Path) -> String {
        full.strip_prefix(&self.source_dir)
            .map_or_else(|_| full.to_string_lossy().into_owned(), to_slash)
    }

    /// Build a listing entry, or `None` if the file cannot be read as text.
    fn describe(&self, full: &Path) -> Option<DocumentInfo> {
        let relative = self.relative_of(full);
        let (content, metadata) = match fs::read_to_string(full).and_then(|content| {
            let metadata = fs::metadata(full)?;
            Ok((content, metadata))
        }) {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!(path = %relative, error = %e, "Skipping unreadable document");
                return None;
            }
        };

        let parsed = extract(&content);
        warn_if_malformed(&relative, &parsed.frontmatter);
        let title = display_title(parsed.frontmatter.metadata(), parsed.body, &relative);

        Some(DocumentInfo {
            has_metadata: parsed.frontmatter.has_metadata(),
            size: metadata.len(),
            modified: metadata
                .modified()
                .ok()
                .and_then(|m| m.duration_since(UNIX_EPOCH).ok())
                .map_or(0.0, |d| d.as_secs_f64()),
            title,
            path: relative,
        })
    }

    /// Write `text` to an existing file, replacing its content.
    fn overwrite(full: &Path, relative: &str, text: &str) -> Result<(), StorageError> {
        fs::write(full, text).map_err(|e| StorageError::io(e, Some(PathBuf::from(relative))))
    }
}

/// Log frontmatter that was dropped because it could not be parsed.
pub(crate) fn warn_if_malformed(path: &str, frontmatter: &Frontmatter) {
    if let Frontmatter::Malformed(reason) = frontmatter {
        tracing::warn!(path, reason = %reason, "Ignoring malformed frontmatter");
    }
}

/// Convert a codec failure into a storage error.
pub(crate) fn codec_error(path: &str, err: mkd_meta::MetaError) -> StorageError {
    StorageError::new(StorageErrorKind::Other)
        .with_path(path)
        .with_source(err)
}

impl Storage for FsStorage {
    fn list(&self, pattern: &str) -> Result<Vec<DocumentInfo>, StorageError> {
        let files = self.glob_files(pattern)?;
        tracing::debug!(pattern, matches = files.len(), "Listing documents");
        Ok(files.iter().filter_map(|full| self.describe(full)).collect())
    }

    fn paths(&self) -> Result<Vec<String>, StorageError> {
        Ok(self
            .glob_files(MARKDOWN_PATTERN)?
            .iter()
            .map(|full| self.relative_of(full))
            .collect())
    }

    fn read(&self, path: &str) -> Result<Document, StorageError> {
        let (relative, full) = self.resolve_existing(path)?;
        let content = fs::read_to_string(&full)
            .map_err(|e| StorageError::io(e, Some(PathBuf::from(path))))?;

        let parsed = extract(&content);
        warn_if_malformed(&relative, &parsed.frontmatter);
        Ok(Document {
            path: relative,
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
        let (relative, full) = self.resolve(path)?;
        if full.symlink_metadata().is_ok() {
            return Err(StorageError::already_exists(path));
        }

        let text = compose(metadata, body).map_err(|e| codec_error(path, e))?;

        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StorageError::io(e, Some(PathBuf::from(path))))?;
        }

        // create_new fails if the file appeared since the check above
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full)
            .map_err(|e| StorageError::io(e, Some(PathBuf::from(path))))?;
        file.write_all(text.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| StorageError::io(e, Some(PathBuf::from(path))))?;

        tracing::info!(path = %relative, bytes = text.len(), "Created document");
        Ok(())
    }

    fn update(
        &self,
        path: &str,
        body: &str,
        metadata: Option<&Metadata>,
    ) -> Result<(), StorageError> {
        let (relative, full) = self.resolve_existing(path)?;

        let text = match metadata {
            Some(metadata) => compose(Some(metadata), body),
            None => {
                let existing = fs::read_to_string(&full)
                    .map_err(|e| StorageError::io(e, Some(PathBuf::from(path))))?;
                let parsed = extract(&existing);
                warn_if_malformed(&relative, &parsed.frontmatter);
                compose(parsed.frontmatter.metadata(), body)
            }
        }
        .map_err(|e| codec_error(path, e))?;

        Self::overwrite(&full, path, &text)?;
        tracing::info!(
            path = %relative,
            bytes = text.len(),
            replaced_metadata = metadata.is_some(),
            "Updated document"
        );
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<(), StorageError> {
        let (relative, full) = self.resolve_existing(path)?;
        fs::remove_file(&full).map_err(|e| StorageError::io(e, Some(PathBuf::from(path))))?;
        tracing::info!(path = %relative, "Deleted document");
        Ok(())
    }
}
