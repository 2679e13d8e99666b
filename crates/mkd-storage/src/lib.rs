//! Document storage for mkdocs-mcp.
//!
//! This crate provides a [`Storage`] trait for document CRUD against a docs
//! root, plus the regex [`Searcher`] that scans document bodies through it.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `list()`, `paths()`, `read()`, `create()`, `update()`
//!   and `delete()` methods
//! - [`FsStorage`] implementation for the local filesystem
//! - [`Searcher`] for line-oriented regex search over any [`Storage`]
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use mkd_storage::{FsStorage, Searcher, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! let results = Searcher::new("install", false)?.search(&storage)?;
//! for file in results.results {
//!     println!("{}: {} matches", file.file, file.match_count);
//! }
//! ```

mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod path;
mod search;
mod storage;

pub use fs::{FsStorage, MARKDOWN_PATTERN};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockStorage;
pub use search::{FileMatches, LineMatch, MAX_MATCHES_PER_FILE, SearchResults, Searcher};
pub use storage::{Document, DocumentInfo, Storage, StorageError, StorageErrorKind};
