//! Error types for the build filesystem abstraction.

use std::io;
use std::path::{Path, PathBuf};

/// Filesystem error type with contextual variants.
///
/// Every failed operation of the contract surfaces as one of these. Variants
/// carry the path (and operation where useful) that caused the failure.
///
/// # Examples
///
/// ```rust
/// use buildfs::FsError;
/// use std::path::PathBuf;
///
/// let err = FsError::NotFound { path: PathBuf::from("/missing") };
/// assert!(err.to_string().contains("/missing"));
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    // Path/Entry Errors
    /// Path, or one of its ancestors, does not exist.
    #[error("not found: {path}")]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A create-style operation found a conflicting entry of another kind.
    #[error("{operation}: already exists: {path}")]
    AlreadyExists {
        /// The path that already exists.
        path: PathBuf,
        /// The operation that failed.
        operation: &'static str,
    },

    /// Expected a file but found something else.
    #[error("not a file: {path}")]
    NotAFile {
        /// The path that is not a file.
        path: PathBuf,
    },

    /// Expected a directory but found something else.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The path that is not a directory.
        path: PathBuf,
    },

    /// Expected a symbolic link but found something else.
    #[error("not a symbolic link: {path}")]
    NotASymbolicLink {
        /// The path that is not a symbolic link.
        path: PathBuf,
    },

    /// Directory is not empty and the removal was not recursive.
    #[error("directory not empty: {path}")]
    DirectoryNotEmpty {
        /// The path to the non-empty directory.
        path: PathBuf,
    },

    /// A read asked for bytes past the end of the file.
    #[error("read out of range: {path} (requested {offset}..{end}, size {size})")]
    OutOfRange {
        /// The file that was read.
        path: PathBuf,
        /// First requested byte.
        offset: usize,
        /// One past the last requested byte.
        end: usize,
        /// Actual size of the file.
        size: usize,
    },

    /// The path is not absolute or cannot be represented.
    #[error("invalid path: {path} ({reason})")]
    InvalidPath {
        /// The offending path.
        path: PathBuf,
        /// Why the path was rejected.
        reason: &'static str,
    },

    // Permission/Access Errors
    /// Permission denied for operation.
    #[error("{operation}: permission denied: {path}")]
    PermissionDenied {
        /// The path where permission was denied.
        path: PathBuf,
        /// The operation that was denied.
        operation: &'static str,
    },

    // Backend/Operation Errors
    /// Operation is not supported by this adapter.
    #[error("operation not supported: {operation}")]
    NotSupported {
        /// The unsupported operation.
        operation: &'static str,
    },

    // Data Errors
    /// File contents could not be interpreted.
    #[error("invalid data: {path} ({details})")]
    InvalidData {
        /// The path with invalid data.
        path: PathBuf,
        /// Details about the invalid data.
        details: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// I/O error with context.
    #[error("{operation} failed for {path}: {source}")]
    Io {
        /// The operation that failed.
        operation: &'static str,
        /// The path involved in the operation.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Convert an OS error into the most specific variant, keeping the path.
    ///
    /// Kinds without a dedicated variant are wrapped in [`FsError::Io`].
    pub fn from_io(operation: &'static str, path: &Path, error: io::Error) -> Self {
        let path = path.to_path_buf();
        match error.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path, operation },
            io::ErrorKind::AlreadyExists => FsError::AlreadyExists { path, operation },
            io::ErrorKind::IsADirectory => FsError::NotAFile { path },
            io::ErrorKind::NotADirectory => FsError::NotADirectory { path },
            io::ErrorKind::DirectoryNotEmpty => FsError::DirectoryNotEmpty { path },
            _ => FsError::Io {
                operation,
                path,
                source: error,
            },
        }
    }
}
