//! # Filesystem Traits
//!
//! The capability contract shared by every adapter.
//!
//! ## Trait Layout
//!
//! ```text
//! FsRead ──▶ FsWrite ──┐
//!                      ├──▶ FsDir ──┐
//! FsLink ──────────────┘            ├──▶ Filesystem
//! FsPath ───────────────────────────┘
//! ```
//!
//! ## Quick Reference
//!
//! | Trait | Operations |
//! |-------|------------|
//! | [`FsRead`] | `exists`, `is_readable`, `is_writable`, `is_executable`, `is_file`, `read` |
//! | [`FsWrite`] | `create_file`, `write`, `copy_file`, `remove_file` |
//! | [`FsLink`] | `is_symbolic_link`, `read_symbolic_link`, `write_symbolic_link`, `copy_symbolic_link`, `remove_symbolic_link` |
//! | [`FsDir`] | `is_directory`, `create_directory`, `read_directory`, `copy_directory`, `remove_directory` |
//! | [`FsPath`] | `resolve_path` |
//!
//! ## Composite Operations
//!
//! `copy_file`, `copy_symbolic_link` and `copy_directory` have default
//! implementations built from the primitives. Each default delegates to a
//! public `default_*` function so that an adapter overriding the method for a
//! native fast path can still fall back to the portable version.
//!
//! ## Blanket Implementation
//!
//! [`Filesystem`] is implemented for every type implementing all component
//! traits:
//!
//! ```rust
//! use buildfs::{Filesystem, MemoryFilesystem, RealFilesystem};
//!
//! fn use_fs(_fs: &dyn Filesystem) {}
//!
//! use_fs(&MemoryFilesystem::default());
//! use_fs(&RealFilesystem::new());
//! ```

mod fs_dir;
mod fs_link;
mod fs_path;
mod fs_read;
mod fs_write;

pub use fs_dir::{FsDir, default_copy_directory};
pub use fs_link::{FsLink, default_copy_symbolic_link};
pub use fs_path::FsPath;
pub use fs_read::FsRead;
pub use fs_write::{FsWrite, default_copy_file};

pub(crate) use fs_read::{out_of_range, range_end};

/// The complete filesystem capability.
///
/// Collaborators (project parsing, build execution, the driver) receive a
/// `&dyn Filesystem` or a generic `F: Filesystem` at construction and never
/// reach for a global.
///
/// # Blanket Implementation
///
/// Automatically implemented for any type that implements all component
/// traits. Never implement `Filesystem` directly.
///
/// # Example
///
/// ```rust
/// use buildfs::{Filesystem, FsError};
/// use std::path::Path;
///
/// // Stage an output file next to its source.
/// fn stage(fs: &dyn Filesystem, source: &Path, output: &Path) -> Result<(), FsError> {
///     if let Some(parent) = output.parent() {
///         fs.create_directory(parent, true)?;
///     }
///     fs.copy_file(source, output)
/// }
/// ```
pub trait Filesystem: FsRead + FsWrite + FsLink + FsDir + FsPath {}

// Blanket implementation - any type implementing the components gets Filesystem
impl<T: FsRead + FsWrite + FsLink + FsDir + FsPath + ?Sized> Filesystem for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryFilesystem, RealFilesystem};

    #[test]
    fn filesystem_is_object_safe() {
        fn _check(_: &dyn Filesystem) {}
    }

    #[test]
    fn adapters_implement_filesystem() {
        fn assert_filesystem<T: Filesystem>() {}
        assert_filesystem::<MemoryFilesystem>();
        assert_filesystem::<RealFilesystem>();
    }

    #[test]
    fn filesystem_trait_objects_are_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn Filesystem>();
    }
}
