//! Directory operations.

use std::path::{Path, PathBuf};

use crate::{FsError, FsLink, FsWrite};

/// Directory operations.
///
/// Recursive variants work on a whole subtree. They do not roll back: when
/// one fails, part of the subtree may already have been created, copied or
/// removed.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` to allow
/// concurrent access.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsDir`.
pub trait FsDir: FsWrite + FsLink {
    /// Check if the path is a directory (following symbolic links).
    fn is_directory(&self, path: &Path) -> bool;

    /// Create a directory.
    ///
    /// Succeeds if the directory already exists. With `recursive`, missing
    /// ancestors are created first.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the parent is missing and `recursive` is not set
    /// - [`FsError::AlreadyExists`] if the path, or with `recursive` an
    ///   ancestor, exists as something other than a directory
    fn create_directory(&self, path: &Path, recursive: bool) -> Result<(), FsError>;

    /// Enumerate the contents of a directory.
    ///
    /// `visit` is called once per entry with its path relative to `path`.
    /// Every entry of a directory is reported before any of its
    /// subdirectories is descended into. Links to directories are reported but
    /// not followed.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    /// - [`FsError::NotADirectory`] if the path is not a directory
    fn read_directory(
        &self,
        path: &Path,
        recursive: bool,
        visit: &mut dyn FnMut(&Path),
    ) -> Result<(), FsError>;

    /// Copy a directory to a new path, optionally with its subdirectories.
    ///
    /// A directory already at `to` is removed first; a link at `to` is
    /// removed without touching its target. See
    /// [`default_copy_directory`] for the portable behavior.
    fn copy_directory(&self, from: &Path, to: &Path, recursive: bool) -> Result<(), FsError> {
        default_copy_directory(self, from, to, recursive)
    }

    /// Remove a directory.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    /// - [`FsError::NotADirectory`] if the path is not a directory, including
    ///   a symbolic link to one
    /// - [`FsError::DirectoryNotEmpty`] if it has children and `recursive` is not set
    fn remove_directory(&self, path: &Path, recursive: bool) -> Result<(), FsError>;
}

/// Copy a directory using only primitive contract operations.
///
/// Files are copied with [`FsWrite::copy_file`] and symbolic links are
/// preserved as links with [`FsLink::copy_symbolic_link`], never followed.
/// Without `recursive`, only the files and links directly inside `from` are
/// copied; subdirectories are skipped.
pub fn default_copy_directory<F: FsDir + ?Sized>(
    fs: &F,
    from: &Path,
    to: &Path,
    recursive: bool,
) -> Result<(), FsError> {
    if !fs.is_directory(from) {
        return Err(if fs.exists(from) {
            FsError::NotADirectory {
                path: from.to_path_buf(),
            }
        } else {
            FsError::NotFound {
                path: from.to_path_buf(),
            }
        });
    }

    let mut names: Vec<PathBuf> = Vec::new();
    fs.read_directory(from, false, &mut |name| names.push(name.to_path_buf()))?;

    if fs.is_symbolic_link(to) {
        fs.remove_symbolic_link(to)?;
    } else if fs.is_directory(to) {
        fs.remove_directory(to, recursive)?;
    }
    fs.create_directory(to, false)?;

    for name in names {
        let source = from.join(&name);
        let destination = to.join(&name);

        if fs.is_symbolic_link(&source) {
            fs.copy_symbolic_link(&source, &destination)?;
        } else if fs.is_directory(&source) {
            if recursive {
                fs.copy_directory(&source, &destination, true)?;
            }
        } else {
            fs.copy_file(&source, &destination)?;
        }
    }

    Ok(())
}
