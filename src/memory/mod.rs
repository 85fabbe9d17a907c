//! # Memory Filesystem
//!
//! A [`Filesystem`](crate::Filesystem) held entirely in memory, seeded from a
//! literal [`Entry`] tree. Used to drive tests of code that reads and writes
//! project files without touching the disk.
//!
//! ```rust
//! use buildfs::{Entry, FsDir, FsRead, FsWrite, MemoryFilesystem};
//! use std::path::Path;
//!
//! let fs = MemoryFilesystem::new(vec![
//!     Entry::directory("project", vec![Entry::file("main.c", b"int main;".to_vec())]),
//! ])
//! .unwrap();
//!
//! fs.create_directory(Path::new("/project/build"), false).unwrap();
//! fs.write(Path::new("/project/build/main.o"), b"\x7fELF").unwrap();
//! assert!(fs.is_file(Path::new("/project/build/main.o")));
//! ```
//!
//! Every operation is a single walk of the tree through the `walk` module. One lock
//! guards the whole tree, so each call is atomic with respect to the others.
//! The tree holds no symbolic links: `is_symbolic_link` is always false,
//! `read_symbolic_link` never finds a link, and the link mutations fail with
//! [`FsError::NotSupported`].

mod entry;
pub(crate) mod walk;

pub use entry::{Entry, Node};

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::trace;

use self::walk::{Resolution, walk, walk_mut};
use crate::path::{self, join_relative};
use crate::traits::{out_of_range, range_end};
use crate::{FileType, FsDir, FsError, FsLink, FsPath, FsRead, FsWrite};

/// In-memory filesystem rooted at `/`.
#[derive(Debug)]
pub struct MemoryFilesystem {
    root: RwLock<Entry>,
}

impl MemoryFilesystem {
    /// Create a filesystem whose root directory holds `entries`.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidPath`] if an entry name is empty, `.`, `..` or
    ///   contains a separator
    /// - [`FsError::AlreadyExists`] if two siblings share a name
    pub fn new(entries: impl IntoIterator<Item = Entry>) -> Result<Self, FsError> {
        let root = Entry::directory("/", entries);
        root.validate_children(Path::new("/"))?;
        Ok(Self {
            root: RwLock::new(root),
        })
    }

    /// Create a filesystem with an empty root directory.
    pub fn empty() -> Self {
        Self {
            root: RwLock::new(Entry::directory("/", Vec::new())),
        }
    }

    /// Seed a filesystem from a JSON list of entries.
    ///
    /// # Errors
    ///
    /// - [`FsError::Deserialization`] if the document is not a list of entries
    /// - the errors of [`MemoryFilesystem::new`]
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, FsError> {
        let entries: Vec<Entry> =
            serde_json::from_str(json).map_err(|e| FsError::Deserialization(e.to_string()))?;
        Self::new(entries)
    }

    /// A copy of the whole tree, root included.
    pub fn snapshot(&self) -> Entry {
        self.tree().clone()
    }

    fn tree(&self) -> RwLockReadGuard<'_, Entry> {
        self.root.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn tree_mut(&self) -> RwLockWriteGuard<'_, Entry> {
        self.root.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Find the entry at `path` and inspect it under the read lock.
    fn with_entry<R>(
        &self,
        path: &Path,
        inspect: impl FnOnce(&Entry) -> Result<R, FsError>,
    ) -> Result<R, FsError> {
        let root = self.tree();
        let mut target = None;
        walk(&root, path, false, |_, _, entry| match entry {
            Some(entry) => {
                target = Some(entry);
                Resolution::Found(entry)
            }
            None => Resolution::Absent,
        })?;

        match target {
            Some(entry) => inspect(entry),
            None => Err(FsError::NotFound {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Create or update the file at `path`.
    fn put_file(&self, path: &Path, contents: Option<&[u8]>) -> Result<(), FsError> {
        let mut root = self.tree_mut();
        walk_mut(&mut root, path, false, |children, name, found| match found {
            None => {
                trace!(path = %path.display(), "memory: create file");
                children.push(Entry::file(name, contents.unwrap_or_default()));
                Resolution::Found(children.len() - 1)
            }
            Some(index) => {
                let entry = &mut children[index];
                if !entry.is_file() {
                    return match contents {
                        Some(_) => Resolution::WrongKind(FileType::File),
                        None => Resolution::Rejected(FsError::AlreadyExists {
                            path: path.to_path_buf(),
                            operation: "create_file",
                        }),
                    };
                }
                if let Some(contents) = contents {
                    trace!(path = %path.display(), size = contents.len(), "memory: replace file");
                    entry.replace_contents(contents.to_vec());
                }
                Resolution::Found(index)
            }
        })
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::empty()
    }
}

impl FsRead for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.with_entry(path, |_| Ok(())).is_ok()
    }

    fn is_readable(&self, path: &Path) -> bool {
        self.exists(path)
    }

    fn is_writable(&self, path: &Path) -> bool {
        self.exists(path)
    }

    fn is_executable(&self, path: &Path) -> bool {
        self.exists(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.with_entry(path, |entry| Ok(entry.is_file())).unwrap_or(false)
    }

    fn read(&self, path: &Path, offset: usize, length: Option<usize>) -> Result<Vec<u8>, FsError> {
        self.with_entry(path, |entry| {
            let contents = entry.contents().ok_or_else(|| FsError::NotAFile {
                path: path.to_path_buf(),
            })?;
            let end = range_end(offset, length, contents.len())
                .ok_or_else(|| out_of_range(path, offset, length, contents.len()))?;
            Ok(contents[offset..end].to_vec())
        })
    }
}

impl FsWrite for MemoryFilesystem {
    fn create_file(&self, path: &Path) -> Result<(), FsError> {
        self.put_file(path, None)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), FsError> {
        self.put_file(path, Some(contents))
    }

    fn remove_file(&self, path: &Path) -> Result<(), FsError> {
        let mut root = self.tree_mut();
        walk_mut(&mut root, path, false, |children, _, found| match found {
            Some(index) if children[index].is_file() => {
                trace!(path = %path.display(), "memory: remove file");
                children.remove(index);
                Resolution::Removed
            }
            Some(_) => Resolution::WrongKind(FileType::File),
            None => Resolution::Absent,
        })
    }
}

impl FsLink for MemoryFilesystem {
    fn is_symbolic_link(&self, _path: &Path) -> bool {
        false
    }

    fn read_symbolic_link(&self, path: &Path) -> Result<PathBuf, FsError> {
        self.with_entry(path, |_| {
            Err(FsError::NotASymbolicLink {
                path: path.to_path_buf(),
            })
        })
    }

    fn write_symbolic_link(&self, _target: &Path, _path: &Path) -> Result<(), FsError> {
        Err(FsError::NotSupported {
            operation: "write_symbolic_link",
        })
    }

    fn copy_symbolic_link(&self, _from: &Path, _to: &Path) -> Result<(), FsError> {
        Err(FsError::NotSupported {
            operation: "copy_symbolic_link",
        })
    }

    fn remove_symbolic_link(&self, _path: &Path) -> Result<(), FsError> {
        Err(FsError::NotSupported {
            operation: "remove_symbolic_link",
        })
    }
}

impl FsDir for MemoryFilesystem {
    fn is_directory(&self, path: &Path) -> bool {
        self.with_entry(path, |entry| Ok(entry.is_directory())).unwrap_or(false)
    }

    fn create_directory(&self, path: &Path, recursive: bool) -> Result<(), FsError> {
        let target = path::normalize(path)?;
        if target.parent().is_none() {
            // `/` always exists.
            return Ok(());
        }

        let mut root = self.tree_mut();
        let mut at = PathBuf::from("/");
        walk_mut(&mut root, &target, recursive, |children, name, found| {
            if recursive {
                at.push(name);
            } else {
                at.clone_from(&target);
            }

            match found {
                Some(index) if children[index].is_directory() => Resolution::Found(index),
                Some(_) => Resolution::Rejected(FsError::AlreadyExists {
                    path: at.clone(),
                    operation: "create_directory",
                }),
                None => {
                    trace!(path = %at.display(), "memory: create directory");
                    children.push(Entry::directory(name, Vec::new()));
                    Resolution::Found(children.len() - 1)
                }
            }
        })
    }

    fn read_directory(
        &self,
        path: &Path,
        recursive: bool,
        visit: &mut dyn FnMut(&Path),
    ) -> Result<(), FsError> {
        let listing = self.with_entry(path, |entry| {
            if !entry.is_directory() {
                return Err(FsError::NotADirectory {
                    path: path.to_path_buf(),
                });
            }
            let mut listing = Vec::new();
            list(entry, None, recursive, &mut listing);
            Ok(listing)
        })?;

        for name in &listing {
            visit(name.as_path());
        }
        Ok(())
    }

    fn remove_directory(&self, path: &Path, recursive: bool) -> Result<(), FsError> {
        let mut root = self.tree_mut();
        walk_mut(&mut root, path, false, |children, _, found| {
            let Some(index) = found else {
                return Resolution::Absent;
            };
            let is_empty = match children[index].children() {
                Some(grandchildren) => grandchildren.is_empty(),
                None => return Resolution::WrongKind(FileType::Directory),
            };
            if !is_empty && !recursive {
                return Resolution::Rejected(FsError::DirectoryNotEmpty {
                    path: path.to_path_buf(),
                });
            }
            trace!(path = %path.display(), recursive, "memory: remove directory");
            children.remove(index);
            Resolution::Removed
        })
    }
}

impl FsPath for MemoryFilesystem {
    fn resolve_path(&self, path: &Path) -> Result<PathBuf, FsError> {
        self.with_entry(path, |_| Ok(()))?;
        path::normalize(path)
    }
}

/// Append the names below `directory` to `listing`, all of one directory's
/// entries before those of its subdirectories.
fn list(directory: &Entry, prefix: Option<&Path>, recursive: bool, listing: &mut Vec<PathBuf>) {
    let Some(children) = directory.children() else {
        return;
    };

    listing.extend(children.iter().map(|child| join_relative(prefix, child.name())));

    if recursive {
        for child in children.iter().filter(|child| child.is_directory()) {
            let nested = join_relative(prefix, child.name());
            list(child, Some(&nested), true, listing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> MemoryFilesystem {
        MemoryFilesystem::new(vec![
            Entry::directory(
                "project",
                vec![
                    Entry::file("main.c", b"int main(void) { return 0; }".to_vec()),
                    Entry::directory("include", vec![Entry::file("api.h", Vec::new())]),
                ],
            ),
            Entry::file("README", b"hello".to_vec()),
        ])
        .unwrap()
    }

    fn listing(fs: &MemoryFilesystem, path: &str, recursive: bool) -> Vec<PathBuf> {
        let mut names = Vec::new();
        fs.read_directory(Path::new(path), recursive, &mut |name| {
            names.push(name.to_path_buf())
        })
        .unwrap();
        names
    }

    #[test]
    fn new_rejects_duplicate_names() {
        let err = MemoryFilesystem::new(vec![
            Entry::file("a", Vec::new()),
            Entry::file("a", Vec::new()),
        ])
        .unwrap_err();
        assert!(matches!(err, FsError::AlreadyExists { .. }));
    }

    #[test]
    fn root_is_a_directory() {
        let fs = MemoryFilesystem::default();
        assert!(fs.exists(Path::new("/")));
        assert!(fs.is_directory(Path::new("/")));
        assert!(!fs.is_file(Path::new("/")));
    }

    #[test]
    fn predicates_follow_kind() {
        let fs = fixture();
        assert!(fs.is_file(Path::new("/project/main.c")));
        assert!(!fs.is_directory(Path::new("/project/main.c")));
        assert!(fs.is_directory(Path::new("/project/include")));
        assert!(fs.is_readable(Path::new("/README")));
        assert!(fs.is_writable(Path::new("/README")));
        assert!(fs.is_executable(Path::new("/README")));
        assert!(!fs.exists(Path::new("/missing")));
        assert!(!fs.is_readable(Path::new("/missing")));
    }

    #[test]
    fn relative_paths_are_rejected() {
        let fs = fixture();
        assert!(!fs.exists(Path::new("README")));
        let err = fs.write(Path::new("README"), b"x").unwrap_err();
        assert!(matches!(err, FsError::InvalidPath { .. }));
    }

    #[test]
    fn read_honors_offset_and_length() {
        let fs = fixture();
        let path = Path::new("/README");
        assert_eq!(fs.read(path, 0, None).unwrap(), b"hello");
        assert_eq!(fs.read(path, 1, Some(3)).unwrap(), b"ell");
        assert_eq!(fs.read(path, 2, None).unwrap(), b"llo");
        assert_eq!(fs.read(path, 5, None).unwrap(), b"");
    }

    #[test]
    fn read_out_of_range_fails() {
        let fs = fixture();
        let err = fs.read(Path::new("/README"), 2, Some(10)).unwrap_err();
        assert!(matches!(err, FsError::OutOfRange { size: 5, .. }));
        assert!(fs.read(Path::new("/README"), 6, None).is_err());
    }

    #[test]
    fn read_rejects_directories() {
        let fs = fixture();
        let err = fs.read(Path::new("/project"), 0, None).unwrap_err();
        assert!(matches!(err, FsError::NotAFile { .. }));
    }

    #[test]
    fn write_creates_and_replaces() {
        let fs = fixture();
        let path = Path::new("/project/out.txt");
        fs.write(path, b"first").unwrap();
        fs.write(path, b"second").unwrap();
        assert_eq!(fs.read(path, 0, None).unwrap(), b"second");

        fs.write(path, b"").unwrap();
        assert_eq!(fs.read(path, 0, None).unwrap(), b"");
    }

    #[test]
    fn create_file_keeps_existing_contents() {
        let fs = fixture();
        fs.create_file(Path::new("/README")).unwrap();
        assert_eq!(fs.read(Path::new("/README"), 0, None).unwrap(), b"hello");

        fs.create_file(Path::new("/empty")).unwrap();
        assert_eq!(fs.read(Path::new("/empty"), 0, None).unwrap(), b"");
    }

    #[test]
    fn create_file_over_directory_fails() {
        let fs = fixture();
        let err = fs.create_file(Path::new("/project")).unwrap_err();
        assert!(matches!(err, FsError::AlreadyExists { .. }));
        let err = fs.write(Path::new("/project"), b"x").unwrap_err();
        assert!(matches!(err, FsError::NotAFile { .. }));
        assert!(fs.is_directory(Path::new("/project")));
    }

    #[test]
    fn write_under_file_leaves_tree_unchanged() {
        let fs = fixture();
        let before = fs.snapshot();
        let err = fs.write(Path::new("/README/child"), b"x").unwrap_err();
        assert!(matches!(err, FsError::NotADirectory { .. }));
        assert_eq!(fs.snapshot(), before);
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let fs = fixture();
        let err = fs.write(Path::new("/nowhere/file"), b"x").unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
    }

    #[test]
    fn remove_file_only_removes_files() {
        let fs = fixture();
        fs.remove_file(Path::new("/README")).unwrap();
        assert!(!fs.exists(Path::new("/README")));

        assert!(matches!(
            fs.remove_file(Path::new("/project")).unwrap_err(),
            FsError::NotAFile { .. }
        ));
        assert!(matches!(
            fs.remove_file(Path::new("/README")).unwrap_err(),
            FsError::NotFound { .. }
        ));
    }

    #[test]
    fn create_directory_recursive_builds_chain() {
        let fs = fixture();
        fs.create_directory(Path::new("/a/b/c"), true).unwrap();
        assert!(fs.is_directory(Path::new("/a")));
        assert!(fs.is_directory(Path::new("/a/b")));
        assert!(fs.is_directory(Path::new("/a/b/c")));
    }

    #[test]
    fn create_directory_without_parent_fails() {
        let fs = fixture();
        let err = fs.create_directory(Path::new("/a/b"), false).unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
        assert!(!fs.exists(Path::new("/a")));
    }

    #[test]
    fn create_directory_is_idempotent() {
        let fs = fixture();
        fs.create_directory(Path::new("/project"), false).unwrap();
        fs.create_directory(Path::new("/project"), true).unwrap();
        fs.create_directory(Path::new("/"), false).unwrap();
        assert_eq!(listing(&fs, "/project", false).len(), 2);
    }

    #[test]
    fn create_directory_through_file_reports_the_file() {
        let fs = fixture();
        let err = fs
            .create_directory(Path::new("/README/sub"), true)
            .unwrap_err();
        match err {
            FsError::AlreadyExists { path, .. } => assert_eq!(path, PathBuf::from("/README")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn remove_directory_requires_recursive_when_not_empty() {
        let fs = fixture();
        let err = fs
            .remove_directory(Path::new("/project"), false)
            .unwrap_err();
        assert!(matches!(err, FsError::DirectoryNotEmpty { .. }));
        assert!(fs.is_file(Path::new("/project/main.c")));

        fs.remove_directory(Path::new("/project"), true).unwrap();
        assert!(!fs.exists(Path::new("/project")));
        assert!(!fs.exists(Path::new("/project/include/api.h")));
    }

    #[test]
    fn remove_directory_rejects_files_and_root() {
        let fs = fixture();
        assert!(matches!(
            fs.remove_directory(Path::new("/README"), false)
                .unwrap_err(),
            FsError::NotADirectory { .. }
        ));
        assert!(matches!(
            fs.remove_directory(Path::new("/"), true).unwrap_err(),
            FsError::InvalidPath { .. }
        ));
        assert!(fs.is_directory(Path::new("/project")));
    }

    #[test]
    fn read_directory_lists_children_before_grandchildren() {
        let fs = MemoryFilesystem::new(vec![Entry::directory(
            "a",
            vec![
                Entry::file("x", Vec::new()),
                Entry::directory("b", vec![Entry::file("y", Vec::new())]),
            ],
        )])
        .unwrap();

        assert_eq!(
            listing(&fs, "/a", true),
            vec![PathBuf::from("x"), PathBuf::from("b"), PathBuf::from("b/y")]
        );
        assert_eq!(
            listing(&fs, "/a", false),
            vec![PathBuf::from("x"), PathBuf::from("b")]
        );
    }

    #[test]
    fn read_directory_rejects_files() {
        let fs = fixture();
        let err = fs
            .read_directory(Path::new("/README"), false, &mut |_| {})
            .unwrap_err();
        assert!(matches!(err, FsError::NotADirectory { .. }));
    }

    #[test]
    fn read_directory_visitor_may_reenter() {
        let fs = fixture();
        let mut files = 0;
        fs.read_directory(Path::new("/project"), true, &mut |name| {
            if fs.is_file(&Path::new("/project").join(name)) {
                files += 1;
            }
        })
        .unwrap();
        assert_eq!(files, 2);
    }

    #[test]
    fn no_path_is_a_symbolic_link() {
        let fs = fixture();
        for path in ["/", "/project", "/project/main.c", "/missing"] {
            assert!(!fs.is_symbolic_link(Path::new(path)), "{path}");
            assert!(fs.read_symbolic_link(Path::new(path)).is_err(), "{path}");
        }
    }

    #[test]
    fn copy_directory_succeeds_on_whole_tree() {
        let fs = fixture();
        fs.copy_directory(Path::new("/project"), Path::new("/copy"), true)
            .unwrap();
        assert_eq!(
            listing(&fs, "/copy", true),
            listing(&fs, "/project", true)
        );
    }

    #[test]
    fn link_mutations_are_not_supported() {
        let fs = fixture();
        let unsupported = |result: Result<(), FsError>| {
            assert!(matches!(result.unwrap_err(), FsError::NotSupported { .. }));
        };
        unsupported(fs.write_symbolic_link(Path::new("project"), Path::new("/other")));
        unsupported(fs.copy_symbolic_link(Path::new("/README"), Path::new("/other")));
        unsupported(fs.remove_symbolic_link(Path::new("/README")));
        assert!(fs.is_file(Path::new("/README")));
        assert!(!fs.exists(Path::new("/other")));
    }

    #[test]
    fn read_symbolic_link_on_file_fails() {
        let fs = fixture();
        assert!(!fs.is_symbolic_link(Path::new("/README")));
        assert!(matches!(
            fs.read_symbolic_link(Path::new("/README")).unwrap_err(),
            FsError::NotASymbolicLink { .. }
        ));
    }

    #[test]
    fn resolve_path_normalizes_existing_paths() {
        let fs = fixture();
        assert_eq!(
            fs.resolve_path(Path::new("/project/./include/../main.c"))
                .unwrap(),
            PathBuf::from("/project/main.c")
        );
        assert!(fs.resolve_path(Path::new("/project/missing")).is_err());
    }

    #[test]
    fn copy_file_uses_contract_default() {
        let fs = fixture();
        fs.copy_file(Path::new("/README"), Path::new("/project/README"))
            .unwrap();
        assert_eq!(
            fs.read(Path::new("/project/README"), 0, None).unwrap(),
            b"hello"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn from_json_seeds_tree() {
        let json = r#"[
            {"name": "a", "node": {"directory": [
                {"name": "b", "node": {"file": [104, 105]}}
            ]}}
        ]"#;
        let fs = MemoryFilesystem::from_json(json).unwrap();
        assert_eq!(fs.read(Path::new("/a/b"), 0, None).unwrap(), b"hi");

        assert!(matches!(
            MemoryFilesystem::from_json("{").unwrap_err(),
            FsError::Deserialization(_)
        ));
    }
}
