//! Line-oriented regex search over document bodies.
//!
//! Frontmatter is excluded: each document is split by the codec and only its
//! body is scanned, line by line.

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Maximum matches reported per file. `match_count` still counts all of them.
pub const MAX_MATCHES_PER_FILE: usize = 10;

/// A matching line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineMatch {
    /// 1-based line number within the body.
    pub line: usize,
    /// Line text with surrounding whitespace trimmed.
    pub content: String,
}

/// Matches within one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMatches {
    /// Path relative to the docs root.
    pub file: String,
    /// Total number of matching lines.
    pub match_count: usize,
    /// First [`MAX_MATCHES_PER_FILE`] matches in line order.
    pub matches: Vec<LineMatch>,
}

/// Result of a search across the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    /// Pattern as supplied by the caller.
    pub query: String,
    /// Number of files with at least one match.
    pub total_files: usize,
    /// Per-file matches, sorted by path.
    pub results: Vec<FileMatches>,
}

/// Compiled search over document bodies.
#[derive(Debug, Clone)]
pub struct Searcher {
    query: String,
    regex: Regex,
}

impl Searcher {
    /// Compile `query` as a regular expression.
    ///
    /// Case-insensitive searches use the regex engine's Unicode case folding.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::InvalidQuery`] if the pattern is malformed.
    pub fn new(query: &str, case_sensitive: bool) -> Result<Self, StorageError> {
        let regex = RegexBuilder::new(query)
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|e| StorageError::new(StorageErrorKind::InvalidQuery).with_source(e))?;
        Ok(Self {
            query: query.to_owned(),
            regex,
        })
    }

    /// Scan every Markdown document in `storage`.
    ///
    /// Documents that disappear or cannot be read mid-scan are skipped with a
    /// warning, so results can be partial: a corpus where no document is
    /// readable still yields an empty, successful result.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the document set cannot be enumerated.
    pub fn search(&self, storage: &dyn Storage) -> Result<SearchResults, StorageError> {
        let paths = storage.paths()?;
        tracing::debug!(query = %self.query, files = paths.len(), "Searching documents");

        let mut results = Vec::new();
        for path in paths {
            let document = match storage.read(&path) {
                Ok(document) => document,
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "Skipping document during search");
                    continue;
                }
            };
            if let Some(file_matches) = self.search_body(&path, &document.body) {
                results.push(file_matches);
            }
        }

        Ok(SearchResults {
            query: self.query.clone(),
            total_files: results.len(),
            results,
        })
    }

    /// Match a single body, returning `None` when no line matches.
    #[must_use]
    pub fn search_body(&self, file: &str, body: &str) -> Option<FileMatches> {
        let mut match_count = 0;
        let mut matches = Vec::new();

        for (index, line) in body.split('\n').enumerate() {
            if !self.regex.is_match(line) {
                continue;
            }
            match_count += 1;
            if matches.len() < MAX_MATCHES_PER_FILE {
                matches.push(LineMatch {
                    line: index + 1,
                    content: line.trim().to_owned(),
                });
            }
        }

        (match_count > 0).then(|| FileMatches {
            file: file.to_owned(),
            match_count,
            matches,
        })
    }
}
