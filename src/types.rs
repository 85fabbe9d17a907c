//! Core types shared by the contract and its adapters.

/// Kind of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileType {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link.
    SymbolicLink,
}

impl FileType {
    /// Returns `true` for [`FileType::File`].
    #[inline]
    pub const fn is_file(self) -> bool {
        matches!(self, FileType::File)
    }

    /// Returns `true` for [`FileType::Directory`].
    #[inline]
    pub const fn is_directory(self) -> bool {
        matches!(self, FileType::Directory)
    }

    /// Returns `true` for [`FileType::SymbolicLink`].
    #[inline]
    pub const fn is_symbolic_link(self) -> bool {
        matches!(self, FileType::SymbolicLink)
    }
}
