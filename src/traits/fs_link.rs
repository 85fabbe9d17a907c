//! Symbolic link operations.

use std::path::{Path, PathBuf};

use crate::FsError;

/// Symbolic link operations.
///
/// Link targets are stored verbatim and interpreted relative to the
/// directory that contains the link.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` to allow
/// concurrent access.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsLink`.
pub trait FsLink: Send + Sync {
    /// Check if the path itself is a symbolic link (without following it).
    fn is_symbolic_link(&self, path: &Path) -> bool;

    /// Read the target of a symbolic link.
    ///
    /// Returns the raw target (not resolved).
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if `path` does not exist
    /// - [`FsError::NotASymbolicLink`] or an OS error if `path` is not a link
    fn read_symbolic_link(&self, path: &Path) -> Result<PathBuf, FsError>;

    /// Create a symbolic link at `path` pointing to `target`.
    ///
    /// # Errors
    ///
    /// - [`FsError::AlreadyExists`] if `path` already exists
    /// - [`FsError::NotFound`] if the parent of `path` does not exist
    /// - [`FsError::NotSupported`] if the adapter cannot store links
    fn write_symbolic_link(&self, target: &Path, path: &Path) -> Result<(), FsError>;

    /// Copy a symbolic link (not what it points to) to a new path.
    ///
    /// The default reads the source target and writes a new link, replacing a
    /// link already present at the destination.
    fn copy_symbolic_link(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        default_copy_symbolic_link(self, from, to)
    }

    /// Remove a symbolic link.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if `path` does not exist
    /// - [`FsError::NotASymbolicLink`] if `path` exists but is not a link
    fn remove_symbolic_link(&self, path: &Path) -> Result<(), FsError>;
}

/// Copy a symbolic link using only the other [`FsLink`] operations.
pub fn default_copy_symbolic_link<F: FsLink + ?Sized>(
    fs: &F,
    from: &Path,
    to: &Path,
) -> Result<(), FsError> {
    let target = fs.read_symbolic_link(from)?;

    if fs.is_symbolic_link(to) {
        fs.remove_symbolic_link(to)?;
    }

    fs.write_symbolic_link(&target, to)
}
