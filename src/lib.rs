//! # buildfs
//!
//! Filesystem capability traits for build tooling, with an adapter over the
//! host operating system and a fully simulated in-memory adapter.
//!
//! Build logic (project-file parsing, build phase execution, dependency
//! resolution) is written once against [`Filesystem`] and receives an
//! instance at construction. Production wiring passes a [`RealFilesystem`];
//! tests pass a [`MemoryFilesystem`] seeded with a literal tree of [`Entry`]
//! values and get deterministic results without touching the disk.
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust
//! use buildfs::{Entry, Filesystem, FsError, FsRead, MemoryFilesystem};
//! use std::path::Path;
//!
//! // Copy every header of a target into the build products directory.
//! fn install_headers(fs: &dyn Filesystem, from: &Path, to: &Path) -> Result<usize, FsError> {
//!     let mut headers = Vec::new();
//!     fs.read_directory(from, true, &mut |name| {
//!         if name.extension().is_some_and(|ext| ext == "h") {
//!             headers.push(name.to_path_buf());
//!         }
//!     })?;
//!
//!     for header in &headers {
//!         let destination = to.join(header);
//!         if let Some(parent) = destination.parent() {
//!             fs.create_directory(parent, true)?;
//!         }
//!         fs.copy_file(&from.join(header), &destination)?;
//!     }
//!     Ok(headers.len())
//! }
//!
//! let fs = MemoryFilesystem::new(vec![Entry::directory("src", vec![
//!     Entry::file("lib.c", b"".to_vec()),
//!     Entry::file("lib.h", b"#pragma once".to_vec()),
//!     Entry::directory("detail", vec![Entry::file("impl.h", b"".to_vec())]),
//! ])])
//! .unwrap();
//!
//! let installed = install_headers(&fs, Path::new("/src"), Path::new("/products/include")).unwrap();
//! assert_eq!(installed, 2);
//! assert!(fs.is_file(Path::new("/products/include/detail/impl.h")));
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Filesystem`] | The full capability contract |
//! | [`RealFilesystem`] | Adapter over the host operating system |
//! | [`MemoryFilesystem`] | Adapter over an in-memory [`Entry`] tree |
//! | [`FsExt`] | `find_file` / `find_executable` lookups |
//! | [`FsError`] | Error type with path and operation context |
//! | [`FileType`] | File, directory or symbolic link |
//!
//! ---
//!
//! ## Trait Hierarchy
//!
//! ```text
//! FsRead ──▶ FsWrite ──┐
//!                      ├──▶ FsDir ──┐
//! FsLink ──────────────┘            ├──▶ Filesystem ──▶ FsExt
//! FsPath ───────────────────────────┘
//! ```
//!
//! [`Filesystem`] and [`FsExt`] have **blanket implementations**. Implement
//! the component traits and you get both for free.
//!
//! ---
//!
//! ## Error Handling
//!
//! Predicates (`exists`, `is_file`, ...) return `bool`. Every other operation
//! returns `Result<T, FsError>`:
//!
//! ```rust
//! use buildfs::FsError;
//! use std::path::PathBuf;
//!
//! let err = FsError::NotFound { path: PathBuf::from("/missing.txt") };
//! assert_eq!(err.to_string(), "not found: /missing.txt");
//! ```
//!
//! Recursive operations do not roll back: when one fails part way, the tree
//! is left somewhere between its start and end states.
//!
//! ---
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync`. Methods take `&self`; the memory adapter
//! serializes operations behind a single lock, and the real adapter leaves
//! arbitration to the operating system.
//!
//! ---
//!
//! ## Logging
//!
//! Operations emit [`tracing`] events: `trace` for each directory created and
//! each change to an in-memory tree, `debug` for native copy fast paths and
//! aborted recursive removals. No subscriber is installed by this crate.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialization for [`Entry`] and [`FileType`], `FsExtJson`, `MemoryFilesystem::from_json` |

// Private modules
mod error;
mod ext;
mod memory;
mod path;
mod real;
mod traits;
mod types;

// Public re-exports - error types
pub use error::FsError;

// Public re-exports - core types
pub use types::FileType;

// Public re-exports - capability contract
pub use traits::{Filesystem, FsDir, FsLink, FsPath, FsRead, FsWrite};

// Public re-exports - portable composite operations
pub use traits::{default_copy_directory, default_copy_file, default_copy_symbolic_link};

// Public re-exports - adapters
pub use memory::{Entry, MemoryFilesystem, Node};
pub use real::RealFilesystem;

// Public re-exports - infrastructure
pub use ext::FsExt;

// Conditional re-exports
#[cfg(feature = "serde")]
pub use ext::FsExtJson;
