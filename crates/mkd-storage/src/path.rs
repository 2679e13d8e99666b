//! Relative path normalization and root containment.

use std::path::{Component, Path, PathBuf};

use crate::storage::StorageError;

/// Reason attached to paths that leave the docs root.
const ESCAPES_ROOT: &str = "escapes the documentation root";

/// Lexically normalize a relative document path.
///
/// `.` segments are dropped and `..` segments pop the previous segment.
/// Absolute paths, empty paths and `..` that would climb above the root are
/// rejected with [`StorageErrorKind::InvalidPath`](crate::StorageErrorKind::InvalidPath).
pub(crate) fn normalize(path: &str) -> Result<PathBuf, StorageError> {
    let mut normalized = PathBuf::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(segment) => normalized.push(segment),
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return Err(StorageError::invalid_path(path, ESCAPES_ROOT));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(StorageError::invalid_path(path, "must be relative"));
            }
        }
    }

    if normalized.as_os_str().is_empty() {
        return Err(StorageError::invalid_path(path, "empty path"));
    }
    Ok(normalized)
}

/// Reject glob patterns that are absolute or climb with `..`.
pub(crate) fn check_pattern(pattern: &str) -> Result<(), StorageError> {
    let escapes = Path::new(pattern)
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
    if escapes {
        return Err(StorageError::invalid_path(pattern, ESCAPES_ROOT));
    }
    Ok(())
}

/// Render a relative path with `/` separators.
pub(crate) fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Ensure `full` still lies inside `root` once symlinks are resolved.
///
/// Checks the deepest existing ancestor of `full`, so paths that are about to
/// be created are covered as well.
pub(crate) fn ensure_inside(root: &Path, full: &Path, display: &str) -> Result<(), StorageError> {
    let canonical_root = root
        .canonicalize()
        .map_err(|e| StorageError::io(e, Some(root.to_path_buf())))?;

    let Some(existing) = full
        .ancestors()
        .find(|ancestor| ancestor.symlink_metadata().is_ok())
    else {
        return Ok(());
    };

    let canonical = existing
        .canonicalize()
        .map_err(|_| StorageError::invalid_path(display, "unresolvable link"))?;
    if canonical.starts_with(&canonical_root) {
        Ok(())
    } else {
        Err(StorageError::invalid_path(display, ESCAPES_ROOT))
    }
}
