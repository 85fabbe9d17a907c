//! File creation, replacement and removal.

use std::path::Path;

use crate::{FsError, FsRead};

/// Write operations for files.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self`; adapters
/// with mutable state synchronize internally.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsWrite`.
pub trait FsWrite: FsRead {
    /// Create an empty file.
    ///
    /// Succeeds without touching the contents if the path is already a file.
    ///
    /// # Errors
    ///
    /// - [`FsError::AlreadyExists`] if the path exists as something other than a file
    /// - [`FsError::NotFound`] if the parent directory does not exist
    fn create_file(&self, path: &Path) -> Result<(), FsError>;

    /// Write data to a file, creating it or replacing its contents.
    ///
    /// Parent directories must exist.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the parent directory does not exist
    /// - [`FsError::NotADirectory`] if an ancestor is not a directory
    /// - [`FsError::NotAFile`] if the path is a directory
    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), FsError>;

    /// Copy a file to a new path, replacing any file already there.
    ///
    /// The default reads the whole source and writes it to the destination.
    /// Adapters may override it with a native copy.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the source does not exist
    /// - [`FsError::NotAFile`] if the source is not a file
    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        default_copy_file(self, from, to)
    }

    /// Remove a file.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the file does not exist
    /// - [`FsError::NotAFile`] if the path is a directory
    fn remove_file(&self, path: &Path) -> Result<(), FsError>;
}

/// Copy a file using only [`FsRead::read`] and [`FsWrite::write`].
///
/// Adapters without a native copy call this from their override.
pub fn default_copy_file<F: FsWrite + ?Sized>(fs: &F, from: &Path, to: &Path) -> Result<(), FsError> {
    if !fs.is_file(from) {
        return Err(if fs.exists(from) {
            FsError::NotAFile {
                path: from.to_path_buf(),
            }
        } else {
            FsError::NotFound {
                path: from.to_path_buf(),
            }
        });
    }

    let contents = fs.read(from, 0, None)?;
    fs.write(to, &contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Entry, MemoryFilesystem};

    #[test]
    fn fs_write_is_object_safe() {
        fn _check(_: &dyn FsWrite) {}
    }

    #[test]
    fn default_copy_file_duplicates_contents() {
        let fs = MemoryFilesystem::new(vec![Entry::file("a", b"payload".to_vec())]).unwrap();
        default_copy_file(&fs, Path::new("/a"), Path::new("/b")).unwrap();
        assert_eq!(fs.read(Path::new("/b"), 0, None).unwrap(), b"payload");
        assert_eq!(fs.read(Path::new("/a"), 0, None).unwrap(), b"payload");
    }

    #[test]
    fn default_copy_file_replaces_destination() {
        let fs = MemoryFilesystem::new(vec![
            Entry::file("a", b"new".to_vec()),
            Entry::file("b", b"old contents".to_vec()),
        ])
        .unwrap();
        default_copy_file(&fs, Path::new("/a"), Path::new("/b")).unwrap();
        assert_eq!(fs.read(Path::new("/b"), 0, None).unwrap(), b"new");
    }

    #[test]
    fn default_copy_file_rejects_directories_and_missing() {
        let fs = MemoryFilesystem::new(vec![Entry::directory("d", vec![])]).unwrap();
        let err = default_copy_file(&fs, Path::new("/d"), Path::new("/e")).unwrap_err();
        assert!(matches!(err, FsError::NotAFile { .. }));

        let err = default_copy_file(&fs, Path::new("/missing"), Path::new("/e")).unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
        assert!(!fs.exists(Path::new("/e")));
    }
}
