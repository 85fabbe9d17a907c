//! Existence checks and file reads.

use std::path::Path;

use crate::FsError;

/// Existence, permission and file-read operations.
///
/// Predicates answer `false` for any path they cannot inspect, including
/// missing ones; they never fail.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` to allow
/// sharing one instance across build steps.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsRead`.
pub trait FsRead: Send + Sync {
    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if the current process may read the path.
    fn is_readable(&self, path: &Path) -> bool;

    /// Check if the current process may write the path.
    fn is_writable(&self, path: &Path) -> bool;

    /// Check if the current process may execute (or search) the path.
    fn is_executable(&self, path: &Path) -> bool;

    /// Check if the path is a regular file (following symbolic links).
    fn is_file(&self, path: &Path) -> bool;

    /// Read bytes from a file.
    ///
    /// Reads `length` bytes starting at `offset`, or everything from `offset`
    /// to the end of the file when `length` is `None`.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    /// - [`FsError::NotAFile`] if the path is not a file
    /// - [`FsError::OutOfRange`] if the requested range ends past the file
    fn read(&self, path: &Path, offset: usize, length: Option<usize>) -> Result<Vec<u8>, FsError>;
}

/// Compute the end of a read range, or `None` if it does not fit in `size`.
pub(crate) fn range_end(offset: usize, length: Option<usize>, size: usize) -> Option<usize> {
    let end = match length {
        Some(length) => offset.checked_add(length)?,
        None => size,
    };
    (offset <= end && end <= size).then_some(end)
}

/// Build the error for a read that does not fit the file.
pub(crate) fn out_of_range(path: &Path, offset: usize, length: Option<usize>, size: usize) -> FsError {
    FsError::OutOfRange {
        path: path.to_path_buf(),
        offset,
        end: length.map_or(size, |length| offset.saturating_add(length)),
        size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_read_is_object_safe() {
        fn _check(_: &dyn FsRead) {}
    }

    #[test]
    fn fs_read_requires_send_sync() {
        fn _assert_send_sync<T: Send + Sync>() {}
        fn _check<T: FsRead>() {
            _assert_send_sync::<T>();
        }
    }

    #[test]
    fn range_end_whole_file() {
        assert_eq!(range_end(0, None, 5), Some(5));
        assert_eq!(range_end(0, None, 0), Some(0));
    }

    #[test]
    fn range_end_with_length() {
        assert_eq!(range_end(1, Some(3), 5), Some(4));
        assert_eq!(range_end(2, Some(3), 5), Some(5));
        assert_eq!(range_end(3, Some(3), 5), None);
    }

    #[test]
    fn range_end_offset_past_end() {
        assert_eq!(range_end(5, None, 5), Some(5));
        assert_eq!(range_end(6, None, 5), None);
        assert_eq!(range_end(usize::MAX, Some(1), 5), None);
    }

    #[test]
    fn out_of_range_reports_requested_end() {
        let err = out_of_range(Path::new("/f"), 3, Some(4), 5);
        assert!(matches!(err, FsError::OutOfRange { end: 7, size: 5, .. }));
    }
}
