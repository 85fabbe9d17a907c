//! Nodes of the in-memory tree.

use std::path::Path;

use crate::{FileType, FsError};

/// One node of a [`MemoryFilesystem`](crate::MemoryFilesystem) tree.
///
/// An entry owns its children outright; the tree has no sharing and no
/// cycles and no symbolic links. Entries are built with [`Entry::file`] and
/// [`Entry::directory`] and handed to
/// [`MemoryFilesystem::new`](crate::MemoryFilesystem::new) as the initial
/// state.
///
/// # Example
///
/// ```rust
/// use buildfs::Entry;
///
/// let project = Entry::directory("App.xcodeproj", vec![
///     Entry::file("project.pbxproj", b"// !$*UTF8*$!".to_vec()),
/// ]);
/// assert_eq!(project.name(), "App.xcodeproj");
/// assert_eq!(project.children().map(<[Entry]>::len), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    name: String,
    node: Node,
}

/// Payload of an [`Entry`], by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Node {
    /// File contents.
    File(Vec<u8>),
    /// Child entries, names unique.
    Directory(Vec<Entry>),
}

impl Entry {
    /// A file with fixed contents.
    pub fn file(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            node: Node::File(contents.into()),
        }
    }

    /// A directory with the given children.
    pub fn directory(name: impl Into<String>, children: impl IntoIterator<Item = Entry>) -> Self {
        Self {
            name: name.into(),
            node: Node::Directory(children.into_iter().collect()),
        }
    }

    /// Name of the entry within its parent.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entry's payload.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Kind of the entry.
    pub fn file_type(&self) -> FileType {
        match self.node {
            Node::File(_) => FileType::File,
            Node::Directory(_) => FileType::Directory,
        }
    }

    /// Returns `true` if this is a file.
    #[inline]
    pub fn is_file(&self) -> bool {
        matches!(self.node, Node::File(_))
    }

    /// Returns `true` if this is a directory.
    #[inline]
    pub fn is_directory(&self) -> bool {
        matches!(self.node, Node::Directory(_))
    }

    /// File contents, or `None` for other kinds.
    pub fn contents(&self) -> Option<&[u8]> {
        match &self.node {
            Node::File(contents) => Some(contents),
            _ => None,
        }
    }

    /// Directory children, or `None` for other kinds.
    pub fn children(&self) -> Option<&[Entry]> {
        match &self.node {
            Node::Directory(children) => Some(children),
            _ => None,
        }
    }

    /// Look up a direct child by name.
    pub fn child(&self, name: &str) -> Option<&Entry> {
        self.children()?.iter().find(|child| child.name == name)
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<Entry>> {
        match &mut self.node {
            Node::Directory(children) => Some(children),
            _ => None,
        }
    }

    pub(crate) fn replace_contents(&mut self, contents: Vec<u8>) -> bool {
        match &mut self.node {
            Node::File(current) => {
                *current = contents;
                true
            }
            _ => false,
        }
    }

    /// Check the seeding invariants: every name below this entry is a single
    /// component and sibling names are unique.
    ///
    /// `at` is the path of this entry, used for error reporting.
    pub(crate) fn validate_children(&self, at: &Path) -> Result<(), FsError> {
        let Some(children) = self.children() else {
            return Ok(());
        };

        for (index, child) in children.iter().enumerate() {
            let path = at.join(&child.name);
            if !is_valid_name(&child.name) {
                return Err(FsError::InvalidPath {
                    path,
                    reason: "entry name must be a single path component",
                });
            }
            if children[..index].iter().any(|other| other.name == child.name) {
                return Err(FsError::AlreadyExists {
                    path,
                    operation: "seed",
                });
            }
            child.validate_children(&path)?;
        }

        Ok(())
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/') && !name.contains('\0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn constructors_set_kind() {
        assert_eq!(Entry::file("f", Vec::new()).file_type(), FileType::File);
        assert_eq!(
            Entry::directory("d", Vec::new()).file_type(),
            FileType::Directory
        );
    }

    #[test]
    fn accessors_match_kind() {
        let file = Entry::file("f", b"abc".to_vec());
        assert_eq!(file.contents(), Some(&b"abc"[..]));
        assert!(file.children().is_none());

        let dir = Entry::directory("d", vec![Entry::file("f", Vec::new())]);
        assert!(dir.contents().is_none());
        assert_eq!(dir.children().map(<[Entry]>::len), Some(1));
    }

    #[test]
    fn child_lookup_by_name() {
        let dir = Entry::directory(
            "d",
            vec![Entry::file("a", Vec::new()), Entry::directory("b", Vec::new())],
        );
        assert!(dir.child("a").unwrap().is_file());
        assert!(dir.child("b").unwrap().is_directory());
        assert!(dir.child("c").is_none());
        assert!(Entry::file("f", Vec::new()).child("a").is_none());
    }

    #[test]
    fn replace_contents_only_touches_files() {
        let mut file = Entry::file("f", b"old".to_vec());
        assert!(file.replace_contents(b"new".to_vec()));
        assert_eq!(file.contents(), Some(&b"new"[..]));

        let mut dir = Entry::directory("d", Vec::new());
        assert!(!dir.replace_contents(b"new".to_vec()));
        assert!(dir.is_directory());
    }

    #[test]
    fn validate_rejects_duplicate_siblings() {
        let root = Entry::directory(
            "/",
            vec![Entry::file("a", Vec::new()), Entry::directory("a", Vec::new())],
        );
        let err = root.validate_children(Path::new("/")).unwrap_err();
        assert!(matches!(err, FsError::AlreadyExists { .. }));
    }

    #[test]
    fn validate_rejects_bad_names_at_depth() {
        let root = Entry::directory(
            "/",
            vec![Entry::directory("d", vec![Entry::file("x/y", Vec::new())])],
        );
        match root.validate_children(Path::new("/")).unwrap_err() {
            FsError::InvalidPath { path, .. } => assert_eq!(path, PathBuf::from("/d/x/y")),
            other => panic!("unexpected error: {other:?}"),
        }

        for name in ["", ".", ".."] {
            let root = Entry::directory("/", vec![Entry::file(name, Vec::new())]);
            assert!(root.validate_children(Path::new("/")).is_err());
        }
    }

    #[test]
    fn validate_accepts_same_name_in_different_directories() {
        let root = Entry::directory(
            "/",
            vec![
                Entry::directory("a", vec![Entry::file("x", Vec::new())]),
                Entry::directory("b", vec![Entry::file("x", Vec::new())]),
            ],
        );
        assert!(root.validate_children(Path::new("/")).is_ok());
    }
}
