//! Lexical normalization of absolute paths.
//!
//! Normalization never touches a filesystem: repeated separators and `.` are
//! dropped, `..` pops the previous component and never climbs above `/`.

use std::path::{Component, Path, PathBuf};

use crate::FsError;

/// Split an absolute path into its normalized components.
///
/// `/` yields no components. Relative paths and components that are not
/// valid UTF-8 are rejected.
pub(crate) fn components(path: &Path) -> Result<Vec<String>, FsError> {
    if !path.has_root() {
        return Err(FsError::InvalidPath {
            path: path.to_path_buf(),
            reason: "path is not absolute",
        });
    }

    let mut names: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                names.pop();
            }
            Component::Normal(name) => {
                let name = name.to_str().ok_or_else(|| FsError::InvalidPath {
                    path: path.to_path_buf(),
                    reason: "path is not valid UTF-8",
                })?;
                names.push(name.to_owned());
            }
            Component::Prefix(_) => {
                return Err(FsError::InvalidPath {
                    path: path.to_path_buf(),
                    reason: "path prefixes are not supported",
                });
            }
        }
    }

    Ok(names)
}

/// Normalize an absolute path.
pub(crate) fn normalize(path: &Path) -> Result<PathBuf, FsError> {
    let mut normalized = PathBuf::from("/");
    normalized.extend(components(path)?);
    Ok(normalized)
}

/// Join a relative listing prefix with a child name.
///
/// Names are taken as they are stored, so host entries that are not valid
/// UTF-8 come back unchanged.
pub(crate) fn join_relative(prefix: Option<&Path>, name: impl AsRef<Path>) -> PathBuf {
    match prefix {
        Some(prefix) => prefix.join(name),
        None => name.as_ref().to_path_buf(),
    }
}
