//! Change notifications for the log folder.
//!
//! # Responsibility
//! - Classify raw filesystem events into create/modify/delete/rename notices.
//! - Decide whether a notice touches a folder by path prefix.
//! - Coalesce bursts of notices into a single reload request.
//!
//! # Invariants
//! - Notice paths are relative to the vault root, like settings paths.
//! - The watcher forwards every notice under its root; folder scoping is
//!   left to the consumer so it follows settings changes.
//! - Dropping the watcher unsubscribes from the filesystem.

use log::{debug, warn};
use notify::event::ModifyKind;
use notify::{recommended_watcher, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

/// Quiet period before a burst of notices turns into one reload.
pub const DEFAULT_DEBOUNCE_MS: u64 = 250;

/// Notification kinds that invalidate the event map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Create,
    Modify,
    Delete,
    Rename,
    /// The backend lost track of individual paths; everything is suspect.
    Rescan,
}

/// One path-scoped change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotice {
    pub kind: ChangeKind,
    pub path: PathBuf,
}

impl ChangeNotice {
    pub fn new(kind: ChangeKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    /// Whether this notice affects `folder` (component-wise prefix match).
    pub fn is_under(&self, folder: &Path) -> bool {
        self.kind == ChangeKind::Rescan || self.path.starts_with(folder)
    }
}

/// Maps a backend event kind onto a notice kind; access events are dropped.
pub fn classify_event_kind(kind: &EventKind) -> Option<ChangeKind> {
    match kind {
        EventKind::Create(_) => Some(ChangeKind::Create),
        EventKind::Modify(ModifyKind::Name(_)) => Some(ChangeKind::Rename),
        EventKind::Modify(_) => Some(ChangeKind::Modify),
        EventKind::Remove(_) => Some(ChangeKind::Delete),
        EventKind::Any | EventKind::Other => Some(ChangeKind::Modify),
        EventKind::Access(_) => None,
    }
}

/// Collapses bursts of notices into one batch once they go quiet.
#[derive(Debug)]
pub struct ReloadCoalescer {
    window: Duration,
    pending: Vec<ChangeNotice>,
    last_seen: Option<Instant>,
}

impl ReloadCoalescer {
    /// A zero window releases every recorded batch on the next poll.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: Vec::new(),
            last_seen: None,
        }
    }

    pub fn record(&mut self, notice: ChangeNotice, now: Instant) {
        self.pending.push(notice);
        self.last_seen = Some(now);
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Returns the pending batch when the burst has been quiet long enough.
    pub fn take_ready(&mut self, now: Instant) -> Option<Vec<ChangeNotice>> {
        let last_seen = self.last_seen?;
        if now.saturating_duration_since(last_seen) < self.window {
            return None;
        }
        self.last_seen = None;
        Some(std::mem::take(&mut self.pending))
    }

    /// Time left until the current burst is released.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.last_seen
            .map(|last_seen| self.window.saturating_sub(now.saturating_duration_since(last_seen)))
    }
}

/// Watcher start-up failures.
#[derive(Debug)]
pub enum WatchError {
    RootUnavailable { path: PathBuf, message: String },
    Backend(notify::Error),
}

impl Display for WatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RootUnavailable { path, message } => {
                write!(f, "cannot watch `{}`: {message}", path.display())
            }
            Self::Backend(err) => write!(f, "filesystem watcher failed: {err}"),
        }
    }
}

impl Error for WatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Backend(err) => Some(err),
            Self::RootUnavailable { .. } => None,
        }
    }
}

impl From<notify::Error> for WatchError {
    fn from(value: notify::Error) -> Self {
        Self::Backend(value)
    }
}

/// Filesystem subscription for a vault root.
///
/// The whole vault is watched so that creating the log folder is seen and a
/// folder setting change needs no new subscription. Consumers scope notices
/// to the folder configured when the batch arrives.
pub struct LogFolderWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<ChangeNotice>,
    coalescer: ReloadCoalescer,
    root: PathBuf,
}

impl LogFolderWatcher {
    /// Subscribes to changes anywhere under `root`.
    ///
    /// # Errors
    /// - `RootUnavailable` when `root` cannot be resolved.
    /// - `Backend` when the platform watcher cannot be created.
    pub fn start(root: &Path, debounce: Duration) -> Result<Self, WatchError> {
        let canonical_root = root
            .canonicalize()
            .map_err(|err| WatchError::RootUnavailable {
                path: root.to_path_buf(),
                message: err.to_string(),
            })?;

        let (tx, rx) = channel();
        let callback_root = canonical_root.clone();
        let raw_root = root.to_path_buf();

        let mut watcher = recommended_watcher(move |result: notify::Result<Event>| match result {
            Ok(event) => {
                let Some(kind) = classify_event_kind(&event.kind) else {
                    return;
                };
                if event.paths.is_empty() {
                    let _ = tx.send(ChangeNotice::new(ChangeKind::Rescan, PathBuf::new()));
                    return;
                }
                for path in &event.paths {
                    let relative = path
                        .strip_prefix(&callback_root)
                        .or_else(|_| path.strip_prefix(&raw_root))
                        .unwrap_or(path.as_path());
                    let _ = tx.send(ChangeNotice::new(kind, relative));
                }
            }
            Err(err) => {
                warn!("event=watch_backend module=watch status=error error={err}");
                let _ = tx.send(ChangeNotice::new(ChangeKind::Rescan, PathBuf::new()));
            }
        })?;
        watcher.watch(&canonical_root, RecursiveMode::Recursive)?;

        debug!(
            "event=watch_start module=watch status=ok root={} debounce_ms={}",
            canonical_root.display(),
            debounce.as_millis()
        );

        Ok(Self {
            _watcher: watcher,
            rx,
            coalescer: ReloadCoalescer::new(debounce),
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Non-blocking: drains pending notices and returns a batch once quiet.
    pub fn poll_reload(&mut self) -> Option<Vec<ChangeNotice>> {
        self.drain(Instant::now());
        self.coalescer.take_ready(Instant::now())
    }

    /// Blocks up to `timeout` for the next coalesced batch.
    pub fn wait_reload(&mut self, timeout: Duration) -> Option<Vec<ChangeNotice>> {
        let deadline = Instant::now() + timeout;
        loop {
            let now = Instant::now();
            self.drain(now);
            if let Some(batch) = self.coalescer.take_ready(now) {
                return Some(batch);
            }
            if now >= deadline {
                return None;
            }

            let wait = self
                .coalescer
                .remaining(now)
                .unwrap_or(deadline - now)
                .min(deadline - now);
            match self.rx.recv_timeout(wait) {
                Ok(notice) => self.coalescer.record(notice, Instant::now()),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    let window = self.coalescer.window;
                    return self.coalescer.take_ready(Instant::now() + window);
                }
            }
        }
    }

    fn drain(&mut self, now: Instant) {
        while let Ok(notice) = self.rx.try_recv() {
            self.coalescer.record(notice, now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_event_kind, ChangeKind, ChangeNotice, ReloadCoalescer};
    use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind, RenameMode};
    use notify::EventKind;
    use std::path::Path;
    use std::time::{Duration, Instant};

    #[test]
    fn classifies_backend_event_kinds() {
        assert_eq!(
            classify_event_kind(&EventKind::Create(CreateKind::File)),
            Some(ChangeKind::Create)
        );
        assert_eq!(
            classify_event_kind(&EventKind::Modify(ModifyKind::Name(RenameMode::Both))),
            Some(ChangeKind::Rename)
        );
        assert_eq!(
            classify_event_kind(&EventKind::Modify(ModifyKind::Any)),
            Some(ChangeKind::Modify)
        );
        assert_eq!(
            classify_event_kind(&EventKind::Remove(RemoveKind::File)),
            Some(ChangeKind::Delete)
        );
        assert_eq!(classify_event_kind(&EventKind::Access(AccessKind::Any)), None);
    }

    #[test]
    fn scope_uses_whole_path_components() {
        let folder = Path::new("Logs/BM");
        assert!(ChangeNotice::new(ChangeKind::Modify, "Logs/BM/2026-02-14.md").is_under(folder));
        assert!(ChangeNotice::new(ChangeKind::Delete, "Logs/BM").is_under(folder));
        assert!(!ChangeNotice::new(ChangeKind::Modify, "Logs/BMX/2026-02-14.md").is_under(folder));
        assert!(!ChangeNotice::new(ChangeKind::Create, "Notes/today.md").is_under(folder));
        assert!(ChangeNotice::new(ChangeKind::Rescan, "").is_under(folder));
    }

    #[test]
    fn coalescer_waits_for_quiet_window() {
        let start = Instant::now();
        let mut coalescer = ReloadCoalescer::new(Duration::from_millis(100));
        assert!(coalescer.take_ready(start).is_none());

        coalescer.record(ChangeNotice::new(ChangeKind::Create, "Logs/BM/a.md"), start);
        coalescer.record(
            ChangeNotice::new(ChangeKind::Modify, "Logs/BM/a.md"),
            start + Duration::from_millis(60),
        );
        assert!(coalescer
            .take_ready(start + Duration::from_millis(120))
            .is_none());

        let batch = coalescer
            .take_ready(start + Duration::from_millis(160))
            .expect("quiet burst should be released");
        assert_eq!(batch.len(), 2);
        assert!(!coalescer.has_pending());
        assert!(coalescer
            .take_ready(start + Duration::from_millis(500))
            .is_none());
    }

    #[test]
    fn zero_window_releases_immediately() {
        let now = Instant::now();
        let mut coalescer = ReloadCoalescer::new(Duration::ZERO);
        coalescer.record(ChangeNotice::new(ChangeKind::Delete, "Logs/BM/a.md"), now);
        assert_eq!(coalescer.take_ready(now).map(|batch| batch.len()), Some(1));
    }
}
