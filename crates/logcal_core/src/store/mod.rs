//! Storage collaborator contracts.
//!
//! # Responsibility
//! - Describe the host operations the calendar consumes: folder lookup,
//!   child listing, text reads and opening a file for the user.
//! - Provide a local filesystem implementation.
//!
//! # Invariants
//! - The calendar never writes through this interface.

pub mod fs_store;

use std::io;
use std::path::{Path, PathBuf};

/// Kind of entry found at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder,
}

/// Host storage operations used by the log parser and the detail panel.
pub trait LogStore {
    /// Resolves a configured path; `None` when nothing exists there.
    fn entry_kind(&self, path: &Path) -> Option<EntryKind>;
    /// Lists direct children of a folder.
    fn list_children(&self, folder: &Path) -> io::Result<Vec<PathBuf>>;
    /// Reads one file as UTF-8 text.
    fn read_text(&self, path: &Path) -> io::Result<String>;
    /// Opens one file for the user in the host's viewer.
    fn open_file(&self, path: &Path) -> io::Result<()>;
    /// Maps a vault path onto the concrete path it names.
    ///
    /// Stores without a root hand paths through unchanged.
    fn resolve(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }
}

impl<S: LogStore + ?Sized> LogStore for &S {
    fn entry_kind(&self, path: &Path) -> Option<EntryKind> {
        (**self).entry_kind(path)
    }

    fn list_children(&self, folder: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).list_children(folder)
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        (**self).read_text(path)
    }

    fn open_file(&self, path: &Path) -> io::Result<()> {
        (**self).open_file(path)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        (**self).resolve(path)
    }
}
