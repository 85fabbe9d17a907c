//! Path Walker: component-by-component descent through an [`Entry`] tree.
//!
//! Every [`MemoryFilesystem`](crate::MemoryFilesystem) operation is one walk
//! plus a step closure. The closure sees the directory being searched, the
//! component name and the child found under that name (if any), and answers
//! with a [`Resolution`] that decides whether the walk goes on, succeeds or
//! fails. With `all` set the closure runs for every component; otherwise only
//! for the last one, and intermediate components must already be directories.

use std::path::{Path, PathBuf};

use super::Entry;
use crate::{FileType, FsError, path};

/// What a step decided about one path component.
#[derive(Debug)]
pub(crate) enum Resolution<T> {
    /// Continue into, or finish at, this entry.
    Found(T),
    /// The step consumed the entry. Only meaningful on the last component.
    Removed,
    /// Nothing usable under this name.
    Absent,
    /// An entry exists, but the step needed this kind.
    WrongKind(FileType),
    /// Fail with this error.
    Rejected(FsError),
}

impl<T> Resolution<T> {
    /// Turn the resolution into the entry to continue with, or an error
    /// reported against `at`.
    fn settle(self, at: &Path) -> Result<Option<T>, FsError> {
        let path = at.to_path_buf();
        match self {
            Resolution::Found(entry) => Ok(Some(entry)),
            Resolution::Removed => Ok(None),
            Resolution::Absent => Err(FsError::NotFound { path }),
            Resolution::WrongKind(FileType::File) => Err(FsError::NotAFile { path }),
            Resolution::WrongKind(FileType::Directory) => Err(FsError::NotADirectory { path }),
            Resolution::WrongKind(FileType::SymbolicLink) => {
                Err(FsError::NotASymbolicLink { path })
            }
            Resolution::Rejected(error) => Err(error),
        }
    }
}

/// Walk a shared tree.
///
/// `/` itself resolves through a single step in which the root is its own
/// parent and the component name is empty.
pub(crate) fn walk<'t, F>(
    root: &'t Entry,
    path: &Path,
    all: bool,
    mut step: F,
) -> Result<(), FsError>
where
    F: FnMut(&'t Entry, &str, Option<&'t Entry>) -> Resolution<&'t Entry>,
{
    let names = path::components(path)?;
    let mut at = PathBuf::from("/");

    if names.is_empty() {
        step(root, "", Some(root)).settle(&at)?;
        return Ok(());
    }

    let last = names.len() - 1;
    let mut current = root;

    for (index, name) in names.iter().enumerate() {
        at.push(name);
        let found = current.child(name);
        let is_final = index == last;

        let next = if all || is_final {
            step(current, name.as_str(), found).settle(&at)?
        } else {
            found
        };

        if is_final {
            break;
        }

        current = descend(next, &at)?;
    }

    Ok(())
}

/// Walk a tree that the step may modify.
///
/// The step receives the children of the directory being searched and the
/// index of the matching child, so it can insert or remove siblings. The root
/// itself has no parent list and cannot be the target of a mutable walk.
pub(crate) fn walk_mut<F>(
    root: &mut Entry,
    path: &Path,
    all: bool,
    mut step: F,
) -> Result<(), FsError>
where
    F: FnMut(&mut Vec<Entry>, &str, Option<usize>) -> Resolution<usize>,
{
    let names = path::components(path)?;
    if names.is_empty() {
        return Err(FsError::InvalidPath {
            path: path.to_path_buf(),
            reason: "the root directory cannot be replaced or removed",
        });
    }

    let last = names.len() - 1;
    let mut at = PathBuf::from("/");
    let mut current = root;

    for (index, name) in names.iter().enumerate() {
        let Some(children) = current.children_mut() else {
            return Err(FsError::NotADirectory { path: at });
        };
        at.push(name);

        let found = children.iter().position(|child| child.name() == name);
        let is_final = index == last;

        let next = if all || is_final {
            step(&mut *children, name.as_str(), found).settle(&at)?
        } else {
            found
        };

        if is_final {
            break;
        }

        current = match next {
            Some(child) => descend(children.get_mut(child), &at)?,
            None => return Err(FsError::NotFound { path: at }),
        };
    }

    Ok(())
}

/// Accept `next` as the directory to search for the following component.
fn descend<E: std::ops::Deref<Target = Entry>>(next: Option<E>, at: &Path) -> Result<E, FsError> {
    match next {
        Some(entry) if entry.is_directory() => Ok(entry),
        Some(_) => Err(FsError::NotADirectory {
            path: at.to_path_buf(),
        }),
        None => Err(FsError::NotFound {
            path: at.to_path_buf(),
        }),
    }
}
