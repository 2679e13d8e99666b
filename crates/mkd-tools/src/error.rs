//! Error type shared by all operations.
//!
//! Every failure from the lower crates is folded into a [`ToolError`] whose
//! message is what the caller sees in the `{"error": ...}` payload.

use mkd_config::ConfigError;
use mkd_meta::MetaError;
use mkd_site::SiteError;
use mkd_storage::{StorageError, StorageErrorKind};

/// Failure category reported by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A configured root path does not exist.
    ConfigurationMissing,
    /// Referenced document or configuration file is absent.
    NotFound,
    /// Create target already exists.
    AlreadyExists,
    /// Path escapes the docs root or is otherwise unusable.
    InvalidPath,
    /// Search pattern or glob could not be compiled.
    InvalidQuery,
    /// Arguments do not match the operation's input shape.
    InvalidArguments,
    /// No operation with the requested name.
    UnknownOperation,
    /// Site configuration could not be parsed.
    ParseError,
    /// Anything else.
    Unexpected,
}

/// Operation failure with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ToolError {
    /// Failure category.
    pub kind: ErrorKind,
    /// Message returned to the caller.
    pub message: String,
}

impl ToolError {
    /// Create an error of the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Arguments failed to decode.
    #[must_use]
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArguments, message)
    }
}

impl From<StorageError> for ToolError {
    fn from(err: StorageError) -> Self {
        let kind = match err.kind {
            StorageErrorKind::NotFound => ErrorKind::NotFound,
            StorageErrorKind::AlreadyExists => ErrorKind::AlreadyExists,
            StorageErrorKind::InvalidPath => ErrorKind::InvalidPath,
            StorageErrorKind::InvalidQuery => ErrorKind::InvalidQuery,
            _ => ErrorKind::Unexpected,
        };
        Self::new(kind, err.to_string())
    }
}

impl From<ConfigError> for ToolError {
    fn from(err: ConfigError) -> Self {
        let kind = match err {
            ConfigError::MissingPath { .. } => ErrorKind::ConfigurationMissing,
            ConfigError::NotFound(_) => ErrorKind::NotFound,
            ConfigError::Parse(_) => ErrorKind::ParseError,
            _ => ErrorKind::Unexpected,
        };
        Self::new(kind, err.to_string())
    }
}

impl From<SiteError> for ToolError {
    fn from(err: SiteError) -> Self {
        let kind = match err {
            SiteError::NotFound(_) => ErrorKind::NotFound,
            SiteError::Parse(_) | SiteError::NotAMapping | SiteError::Rewrite { .. } => {
                ErrorKind::ParseError
            }
            SiteError::Io { .. } | SiteError::Serialize(_) => ErrorKind::Unexpected,
        };
        Self::new(kind, err.to_string())
    }
}

// Codec errors only reach this layer while converting caller-supplied JSON.
impl From<MetaError> for ToolError {
    fn from(err: MetaError) -> Self {
        Self::invalid_arguments(err.to_string())
    }
}
