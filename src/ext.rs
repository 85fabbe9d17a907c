//! # Extension Traits
//!
//! Convenience methods for any [`Filesystem`].
//!
//! ## Overview
//!
//! [`FsExt`] provides lookups that are not part of the capability contract.
//! They are implemented as default methods with a blanket implementation, so
//! every adapter, and `dyn Filesystem`, gets them for free.
//!
//! ## Available Methods
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`find_file`](FsExt::find_file) | First file named `name` in a list of directories |
//! | [`find_executable`](FsExt::find_executable) | Same, restricted to executables |
//!
//! ## JSON Support (Feature-Gated)
//!
//! With the `serde` feature enabled, additional methods are available:
//!
//! | Method | Description |
//! |--------|-------------|
//! | `read_json` | Read and deserialize JSON file |
//! | `write_json` | Serialize and write JSON file |
//!
//! Enable with:
//! ```toml
//! [dependencies]
//! buildfs = { version = "0.1", features = ["serde"] }
//! ```

use crate::Filesystem;
use std::path::{Path, PathBuf};

/// Extension methods for any filesystem.
///
/// # Example
///
/// ```rust
/// use buildfs::{Entry, FsExt, MemoryFilesystem};
/// use std::path::PathBuf;
///
/// let fs = MemoryFilesystem::new(vec![Entry::directory(
///     "usr",
///     vec![Entry::directory("bin", vec![Entry::file("clang", Vec::new())])],
/// )])
/// .unwrap();
///
/// let search = ["/usr/local/bin", "/usr/bin"];
/// assert_eq!(fs.find_executable("clang", search), Some(PathBuf::from("/usr/bin/clang")));
/// assert_eq!(fs.find_executable("gcc", search), None);
/// ```
pub trait FsExt: Filesystem {
    /// Find the first `directory/name` that is a file, scanning
    /// `search_paths` in order.
    fn find_file<I, P>(&self, name: &str, search_paths: I) -> Option<PathBuf>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        search_paths
            .into_iter()
            .map(|directory| directory.as_ref().join(name))
            .find(|candidate| self.is_file(candidate))
    }

    /// Find the first `directory/name` that is an executable file, scanning
    /// `search_paths` in order.
    ///
    /// Typically called with the entries of `PATH`.
    fn find_executable<I, P>(&self, name: &str, search_paths: I) -> Option<PathBuf>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        search_paths
            .into_iter()
            .map(|directory| directory.as_ref().join(name))
            .find(|candidate| self.is_file(candidate) && self.is_executable(candidate))
    }
}

// Blanket implementation - any Filesystem gets FsExt for free
impl<F: Filesystem + ?Sized> FsExt for F {}

// =============================================================================
// JSON Support (Feature-Gated)
// =============================================================================

#[cfg(feature = "serde")]
mod json {
    use super::*;
    use crate::FsError;
    use serde::{Serialize, de::DeserializeOwned};

    /// JSON serialization extension methods.
    ///
    /// Available when the `serde` feature is enabled.
    pub trait FsExtJson: Filesystem {
        /// Read a file and deserialize it as JSON.
        ///
        /// # Errors
        ///
        /// - `FsError::NotFound` — File doesn't exist
        /// - `FsError::InvalidData` — File isn't valid UTF-8
        /// - `FsError::Deserialization` — JSON parsing failed
        ///
        /// # Example
        ///
        /// ```rust
        /// use buildfs::{Filesystem, FsError};
        /// #[cfg(feature = "serde")]
        /// use buildfs::FsExtJson;
        /// use std::path::Path;
        ///
        /// #[cfg(feature = "serde")]
        /// fn load_manifest(fs: &dyn Filesystem) -> Result<serde_json::Value, FsError> {
        ///     fs.read_json(Path::new("/build/manifest.json"))
        /// }
        /// ```
        fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T, FsError> {
            let data = self.read(path, 0, None)?;
            let text = String::from_utf8(data).map_err(|e| FsError::InvalidData {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;
            serde_json::from_str(&text).map_err(|e| FsError::Deserialization(e.to_string()))
        }

        /// Serialize a value and write it as JSON.
        ///
        /// Uses pretty-printing with 2-space indentation.
        ///
        /// # Errors
        ///
        /// - `FsError::Serialization` — JSON serialization failed
        /// - Other `FsError` variants from the underlying `write()` call
        fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), FsError> {
            let json = serde_json::to_string_pretty(value)
                .map_err(|e| FsError::Serialization(e.to_string()))?;
            self.write(path, json.as_bytes())
        }
    }

    // Blanket implementation
    impl<F: Filesystem + ?Sized> FsExtJson for F {}
}

#[cfg(feature = "serde")]
pub use json::FsExtJson;
