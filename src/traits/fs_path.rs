//! # FsPath Trait
//!
//! Path resolution through symbolic links.
//!
//! ## Usage
//!
//! ```rust
//! use buildfs::{FsPath, MemoryFilesystem, Entry};
//! use std::path::{Path, PathBuf};
//!
//! let fs = MemoryFilesystem::new(vec![Entry::directory("usr", vec![])]).unwrap();
//! let resolved = fs.resolve_path(Path::new("/usr/./lib/..")).unwrap();
//! assert_eq!(resolved, PathBuf::from("/usr"));
//! ```

use std::path::{Path, PathBuf};

use crate::FsError;

/// Path resolution.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsPath`.
pub trait FsPath: Send + Sync {
    /// Resolve symbolic links and normalize `.`, `..` and repeated separators.
    ///
    /// The path must exist.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path, or a component of it, does not exist
    /// - [`FsError::InvalidPath`] if the path cannot be resolved at all
    fn resolve_path(&self, path: &Path) -> Result<PathBuf, FsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_path_is_object_safe() {
        fn _check(_: &dyn FsPath) {}
    }

    #[test]
    fn fs_path_requires_send_sync() {
        fn _assert_send_sync<T: Send + Sync>() {}
        fn _check<T: FsPath>() {
            _assert_send_sync::<T>();
        }
    }
}
