//! The [MatchResult] produced for every entry whose name matches.

use std::fs::FileType;
use std::path::{Path, PathBuf};

/// A matched filesystem path plus the type bits of the entry itself.
///
/// The type comes from the directory listing and never follows symlinks, so a symlink
/// to a directory has [MatchResult::IS_SYMLINK] set and [MatchResult::IS_DIR] clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    path: PathBuf,
    flags: u8,
}

impl MatchResult {
    pub const IS_DIR: u8 = 1 << 0;
    pub const IS_SYMLINK: u8 = 1 << 1;

    pub fn new(path: PathBuf, flags: u8) -> Self {
        MatchResult { path, flags }
    }

    /// Build from a listing's file type.
    pub fn from_file_type(path: PathBuf, ft: FileType) -> Self {
        MatchResult::new(path, flags_for(ft))
    }

    // Accessors

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn into_path(self) -> PathBuf {
        self.path
    }

    #[inline(always)]
    pub fn flags(&self) -> u8 {
        self.flags
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.flags & Self::IS_DIR != 0
    }

    #[inline]
    pub fn is_symlink(&self) -> bool {
        self.flags & Self::IS_SYMLINK != 0
    }
}

/// Type bits for an entry as reported by the listing.
pub(crate) fn flags_for(ft: FileType) -> u8 {
    let mut flags = 0u8;
    if ft.is_symlink() {
        flags |= MatchResult::IS_SYMLINK;
    } else if ft.is_dir() {
        flags |= MatchResult::IS_DIR;
    }
    flags
}
