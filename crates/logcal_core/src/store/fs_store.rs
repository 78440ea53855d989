//! Local filesystem `LogStore`.
//!
//! Paths handed to the store are interpreted relative to a vault root, the
//! same way a note-taking host resolves `Logs/BM` against its vault.

use super::{EntryKind, LogStore};
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem-backed store rooted at one vault directory.
#[derive(Debug, Clone)]
pub struct FsLogStore {
    root: PathBuf,
}

impl FsLogStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Vault directory; also the root a change watcher subscribes to.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl LogStore for FsLogStore {
    /// Joins vault-relative paths onto the root. Absolute paths are kept as-is.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn entry_kind(&self, path: &Path) -> Option<EntryKind> {
        let metadata = std::fs::metadata(self.resolve(path)).ok()?;
        if metadata.is_dir() {
            Some(EntryKind::Folder)
        } else {
            Some(EntryKind::File)
        }
    }

    fn list_children(&self, folder: &Path) -> io::Result<Vec<PathBuf>> {
        let resolved = self.resolve(folder);
        let mut children = std::fs::read_dir(&resolved)?
            .filter_map(|entry| entry.ok())
            .map(|entry| folder.join(entry.file_name()))
            .collect::<Vec<_>>();
        children.sort();
        Ok(children)
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(self.resolve(path))
    }

    fn open_file(&self, path: &Path) -> io::Result<()> {
        let resolved = self.resolve(path);
        if !resolved.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no log file at {}", resolved.display()),
            ));
        }
        open::that(&resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::FsLogStore;
    use crate::store::{EntryKind, LogStore};
    use std::path::{Path, PathBuf};

    #[test]
    fn resolves_relative_paths_against_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("Logs/BM")).expect("create folder");
        std::fs::write(dir.path().join("Logs/BM/2026-02-14.md"), "time: 1").expect("write");

        let store = FsLogStore::new(dir.path());
        assert_eq!(store.root(), dir.path());
        assert_eq!(
            store.resolve(Path::new("Logs/BM")),
            dir.path().join("Logs/BM")
        );
        let absolute = dir.path().join("Logs/BM");
        assert_eq!(store.resolve(&absolute), absolute);
        assert_eq!(
            store.entry_kind(Path::new("Logs/BM")),
            Some(EntryKind::Folder)
        );
        assert_eq!(
            store.entry_kind(Path::new("Logs/BM/2026-02-14.md")),
            Some(EntryKind::File)
        );
        assert_eq!(store.entry_kind(Path::new("Logs/none")), None);

        let children = store
            .list_children(Path::new("Logs/BM"))
            .expect("list children");
        assert_eq!(children, vec![PathBuf::from("Logs/BM/2026-02-14.md")]);
        assert_eq!(
            store.read_text(&children[0]).expect("read text"),
            "time: 1"
        );
    }

    #[test]
    fn open_missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FsLogStore::new(dir.path());
        let err = store
            .open_file(Path::new("2026-02-14.md"))
            .expect_err("missing file must fail");
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
