//! # Real Filesystem
//!
//! [`RealFilesystem`] maps every contract operation onto the host operating
//! system. It holds no state: two instances are interchangeable.
//!
//! Permission checks use `access(2)` on Unix, so they answer for the real
//! user of the process. On macOS the copy operations use `copyfile(3)`, which
//! preserves metadata and extended attributes; other platforms copy file
//! contents with [`std::fs::copy`] and fall back to the portable defaults for
//! links and directories.

use std::fs;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::path::join_relative;
use crate::traits::{out_of_range, range_end};
use crate::{FsDir, FsError, FsLink, FsPath, FsRead, FsWrite};

/// The host operating system's filesystem.
///
/// # Example
///
/// ```rust
/// use buildfs::{FsDir, FsRead, FsWrite, RealFilesystem};
///
/// let dir = std::env::temp_dir().join("buildfs-doc-real");
/// let fs = RealFilesystem::new();
///
/// fs.create_directory(&dir, true).unwrap();
/// fs.write(&dir.join("out.txt"), b"built").unwrap();
/// assert_eq!(fs.read(&dir.join("out.txt"), 0, None).unwrap(), b"built");
/// fs.remove_directory(&dir, true).unwrap();
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RealFilesystem;

static DEFAULT_FILESYSTEM: RealFilesystem = RealFilesystem;

impl RealFilesystem {
    /// Create a handle on the host filesystem.
    pub const fn new() -> Self {
        Self
    }

    /// Process-wide shared instance.
    ///
    /// Kept for top-level wiring that predates explicit filesystem
    /// parameters. Components should receive a filesystem from their caller.
    #[deprecated(note = "pass a filesystem instance explicitly")]
    pub fn default_unsafe() -> &'static RealFilesystem {
        &DEFAULT_FILESYSTEM
    }
}

impl FsRead for RealFilesystem {
    fn exists(&self, path: &Path) -> bool {
        #[cfg(unix)]
        {
            sys::access(path, libc::F_OK)
        }
        #[cfg(not(unix))]
        {
            fs::metadata(path).is_ok()
        }
    }

    fn is_readable(&self, path: &Path) -> bool {
        #[cfg(unix)]
        {
            sys::access(path, libc::R_OK)
        }
        #[cfg(not(unix))]
        {
            fs::metadata(path).is_ok()
        }
    }

    fn is_writable(&self, path: &Path) -> bool {
        #[cfg(unix)]
        {
            sys::access(path, libc::W_OK)
        }
        #[cfg(not(unix))]
        {
            fs::metadata(path).is_ok_and(|m| !m.permissions().readonly())
        }
    }

    fn is_executable(&self, path: &Path) -> bool {
        #[cfg(unix)]
        {
            sys::access(path, libc::X_OK)
        }
        #[cfg(not(unix))]
        {
            fs::metadata(path).is_ok()
        }
    }

    fn is_file(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok_and(|m| m.is_file())
    }

    fn read(&self, path: &Path, offset: usize, length: Option<usize>) -> Result<Vec<u8>, FsError> {
        let io_err = |e| FsError::from_io("read", path, e);

        let mut file = fs::File::open(path).map_err(io_err)?;
        let metadata = file.metadata().map_err(io_err)?;
        if !metadata.is_file() {
            return Err(FsError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        let end = range_end(offset, length, size)
            .ok_or_else(|| out_of_range(path, offset, length, size))?;

        let mut contents = vec![0; end - offset];
        file.seek(SeekFrom::Start(offset as u64)).map_err(io_err)?;
        file.read_exact(&mut contents).map_err(io_err)?;
        Ok(contents)
    }
}

impl FsWrite for RealFilesystem {
    fn create_file(&self, path: &Path) -> Result<(), FsError> {
        if let Ok(metadata) = fs::metadata(path) {
            if metadata.is_file() {
                return Ok(());
            }
            return Err(FsError::AlreadyExists {
                path: path.to_path_buf(),
                operation: "create_file",
            });
        }

        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map(drop)
            .map_err(|e| FsError::from_io("create_file", path, e))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), FsError> {
        fs::write(path, contents).map_err(|e| FsError::from_io("write", path, e))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        if !self.is_file(from) {
            return Err(missing_or(from, self.exists(from), |path| FsError::NotAFile { path }));
        }

        #[cfg(target_os = "macos")]
        {
            if self.is_file(to) {
                self.remove_file(to)?;
            }
            debug!(from = %from.display(), to = %to.display(), "copyfile fast path");
            sys::copyfile(from, to, false)
        }
        #[cfg(not(target_os = "macos"))]
        {
            debug!(from = %from.display(), to = %to.display(), "kernel copy fast path");
            fs::copy(from, to)
                .map(drop)
                .map_err(|e| FsError::from_io("copy_file", to, e))
        }
    }

    fn remove_file(&self, path: &Path) -> Result<(), FsError> {
        let metadata =
            fs::symlink_metadata(path).map_err(|e| FsError::from_io("remove_file", path, e))?;
        if metadata.is_dir() {
            return Err(FsError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        fs::remove_file(path).map_err(|e| FsError::from_io("remove_file", path, e))
    }
}

impl FsLink for RealFilesystem {
    fn is_symbolic_link(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
    }

    fn read_symbolic_link(&self, path: &Path) -> Result<PathBuf, FsError> {
        fs::read_link(path).map_err(|e| match e.raw_os_error() {
            #[cfg(unix)]
            Some(libc::EINVAL) => FsError::NotASymbolicLink {
                path: path.to_path_buf(),
            },
            _ => FsError::from_io("read_symbolic_link", path, e),
        })
    }

    fn write_symbolic_link(&self, target: &Path, path: &Path) -> Result<(), FsError> {
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(target, path)
                .map_err(|e| FsError::from_io("write_symbolic_link", path, e))
        }
        #[cfg(not(unix))]
        {
            let _ = (target, path);
            Err(FsError::NotSupported {
                operation: "write_symbolic_link",
            })
        }
    }

    #[cfg(target_os = "macos")]
    fn copy_symbolic_link(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        if !self.is_symbolic_link(from) {
            return Err(missing_or(from, self.exists(from), |path| {
                FsError::NotASymbolicLink { path }
            }));
        }
        if self.is_symbolic_link(to) {
            self.remove_symbolic_link(to)?;
        }
        debug!(from = %from.display(), to = %to.display(), "copyfile fast path");
        sys::copyfile(from, to, false)
    }

    fn remove_symbolic_link(&self, path: &Path) -> Result<(), FsError> {
        if !self.is_symbolic_link(path) {
            return Err(missing_or(path, self.exists(path), |path| {
                FsError::NotASymbolicLink { path }
            }));
        }
        fs::remove_file(path).map_err(|e| FsError::from_io("remove_symbolic_link", path, e))
    }
}

impl FsDir for RealFilesystem {
    fn is_directory(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok_and(|m| m.is_dir())
    }

    fn create_directory(&self, path: &Path, recursive: bool) -> Result<(), FsError> {
        if self.is_directory(path) {
            return Ok(());
        }

        let mut missing = Vec::new();
        if recursive {
            let mut current = Some(path);
            while let Some(directory) = current {
                if self.is_directory(directory) || directory.as_os_str().is_empty() {
                    break;
                }
                if fs::symlink_metadata(directory).is_ok() {
                    return Err(FsError::AlreadyExists {
                        path: directory.to_path_buf(),
                        operation: "create_directory",
                    });
                }
                missing.push(directory);
                current = directory.parent();
            }
        } else {
            missing.push(path);
        }

        let mode = sys::directory_mode();
        for directory in missing.into_iter().rev() {
            trace!(path = %directory.display(), mode, "create directory");
            sys::make_directory(directory, mode)
                .map_err(|e| FsError::from_io("create_directory", directory, e))?;
        }
        Ok(())
    }

    fn read_directory(
        &self,
        path: &Path,
        recursive: bool,
        visit: &mut dyn FnMut(&Path),
    ) -> Result<(), FsError> {
        read_directory_from(path, None, recursive, visit)
    }

    #[cfg(target_os = "macos")]
    fn copy_directory(&self, from: &Path, to: &Path, recursive: bool) -> Result<(), FsError> {
        if !self.is_directory(from) {
            return Err(missing_or(from, self.exists(from), |path| {
                FsError::NotADirectory { path }
            }));
        }
        if self.is_symbolic_link(to) {
            self.remove_symbolic_link(to)?;
        } else if self.is_directory(to) {
            self.remove_directory(to, recursive)?;
        }
        debug!(from = %from.display(), to = %to.display(), recursive, "copyfile fast path");
        sys::copyfile(from, to, recursive)
    }

    fn remove_directory(&self, path: &Path, recursive: bool) -> Result<(), FsError> {
        // Listing a link would enumerate, and then empty, its target.
        let metadata =
            fs::symlink_metadata(path).map_err(|e| FsError::from_io("remove_directory", path, e))?;
        if !metadata.is_dir() {
            return Err(FsError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        if recursive {
            let mut names = Vec::new();
            self.read_directory(path, false, &mut |name| names.push(name.to_path_buf()))?;

            for name in names {
                let child = path.join(&name);
                let removed = if self.is_symbolic_link(&child) {
                    self.remove_symbolic_link(&child)
                } else if self.is_directory(&child) {
                    self.remove_directory(&child, true)
                } else {
                    self.remove_file(&child)
                };
                if let Err(error) = removed {
                    debug!(path = %path.display(), child = %child.display(), %error, "recursive removal aborted");
                    return Err(error);
                }
            }
        }

        fs::remove_dir(path).map_err(|e| FsError::from_io("remove_directory", path, e))
    }
}

impl FsPath for RealFilesystem {
    fn resolve_path(&self, path: &Path) -> Result<PathBuf, FsError> {
        fs::canonicalize(path).map_err(|e| FsError::from_io("resolve_path", path, e))
    }
}

/// Report every entry of `directory`, then descend into its real
/// subdirectories. The directory is opened again for the second pass so that
/// a visitor changing its contents cannot disturb the first.
fn read_directory_from(
    directory: &Path,
    prefix: Option<&Path>,
    recursive: bool,
    visit: &mut dyn FnMut(&Path),
) -> Result<(), FsError> {
    let open = || {
        fs::read_dir(directory).map_err(|e| FsError::from_io("read_directory", directory, e))
    };

    for entry in open()? {
        let entry = entry.map_err(|e| FsError::from_io("read_directory", directory, e))?;
        let name = join_relative(prefix, entry.file_name());
        visit(name.as_path());
    }

    if !recursive {
        return Ok(());
    }

    for entry in open()? {
        let entry = entry.map_err(|e| FsError::from_io("read_directory", directory, e))?;
        let is_directory = entry.file_type().is_ok_and(|t| t.is_dir());
        if is_directory {
            let nested = join_relative(prefix, entry.file_name());
            read_directory_from(&entry.path(), Some(&nested), true, visit)?;
        }
    }
    Ok(())
}

/// `NotFound` when `path` does not exist, otherwise the kind error.
fn missing_or(path: &Path, exists: bool, wrong_kind: impl FnOnce(PathBuf) -> FsError) -> FsError {
    let path = path.to_path_buf();
    if exists {
        wrong_kind(path)
    } else {
        FsError::NotFound { path }
    }
}

#[cfg(unix)]
mod sys {
    use std::ffi::CString;
    use std::io;
    use std::os::unix::ffi::OsStrExt;
    use std::os::unix::fs::DirBuilderExt;
    use std::path::Path;

    #[cfg(target_os = "macos")]
    use crate::FsError;

    fn c_path(path: &Path) -> Option<CString> {
        CString::new(path.as_os_str().as_bytes()).ok()
    }

    pub(super) fn access(path: &Path, mode: libc::c_int) -> bool {
        let Some(c_path) = c_path(path) else {
            return false;
        };
        // SAFETY: `c_path` is NUL-terminated and outlives the call.
        unsafe { libc::access(c_path.as_ptr(), mode) == 0 }
    }

    /// The most permissive mode the process creation mask allows.
    pub(super) fn directory_mode() -> u32 {
        // SAFETY: umask cannot fail; the previous mask is put back at once.
        // Another thread creating files in between sees a zero mask.
        let mask = unsafe {
            let mask = libc::umask(0);
            libc::umask(mask);
            mask
        };
        0o777 & !u32::from(mask)
    }

    pub(super) fn make_directory(path: &Path, mode: u32) -> io::Result<()> {
        std::fs::DirBuilder::new().mode(mode).create(path)
    }

    #[cfg(target_os = "macos")]
    pub(super) fn copyfile(from: &Path, to: &Path, recursive: bool) -> Result<(), FsError> {
        let invalid = |path: &Path| FsError::InvalidPath {
            path: path.to_path_buf(),
            reason: "path contains a NUL byte",
        };
        let c_from = c_path(from).ok_or_else(|| invalid(from))?;
        let c_to = c_path(to).ok_or_else(|| invalid(to))?;

        let mut flags = libc::COPYFILE_ALL | libc::COPYFILE_NOFOLLOW;
        if recursive {
            flags |= libc::COPYFILE_RECURSIVE;
        }

        // SAFETY: both paths are NUL-terminated and outlive the call; a null
        // state is allowed and makes copyfile allocate its own.
        let status = unsafe {
            libc::copyfile(c_from.as_ptr(), c_to.as_ptr(), std::ptr::null_mut(), flags)
        };
        if status == 0 {
            Ok(())
        } else {
            Err(FsError::from_io("copyfile", to, io::Error::last_os_error()))
        }
    }
}

#[cfg(not(unix))]
mod sys {
    use std::io;
    use std::path::Path;

    pub(super) fn directory_mode() -> u32 {
        0o777
    }

    pub(super) fn make_directory(path: &Path, _mode: u32) -> io::Result<()> {
        std::fs::create_dir(path)
    }
}
