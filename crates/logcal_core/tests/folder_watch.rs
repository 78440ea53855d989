use chrono::NaiveDate;
use logcal_core::{CalendarView, FsLogStore, LogFolderWatcher, Settings, WatchError};
use std::path::Path;
use std::time::Duration;

const DEBOUNCE: Duration = Duration::from_millis(50);
const WAIT: Duration = Duration::from_secs(2);

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()
}

fn vault_with(folders: &[&str]) -> tempfile::TempDir {
    let vault = tempfile::tempdir().unwrap();
    for folder in folders {
        std::fs::create_dir_all(vault.path().join(folder)).unwrap();
    }
    vault
}

#[test]
fn watcher_rejects_missing_vault_root() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no-such-vault");

    let err = LogFolderWatcher::start(&missing, Duration::ZERO)
        .err()
        .unwrap();
    assert!(matches!(err, WatchError::RootUnavailable { .. }));
    assert!(err.to_string().contains("no-such-vault"));
}

#[test]
fn idle_watcher_requests_no_reload() {
    let vault = vault_with(&["Logs/BM"]);

    let mut watcher = LogFolderWatcher::start(vault.path(), DEBOUNCE).unwrap();
    assert_eq!(watcher.root(), vault.path());
    assert!(watcher.poll_reload().is_none());
    assert!(watcher.wait_reload(Duration::from_millis(20)).is_none());
}

#[test]
fn new_log_file_in_folder_reloads_view() {
    let vault = vault_with(&["Logs/BM"]);
    let mut view = CalendarView::mount(
        FsLogStore::new(vault.path()),
        Settings::default(),
        today(),
    );
    let mut watcher = LogFolderWatcher::start(view.store().root(), DEBOUNCE).unwrap();
    assert!(view.state().events.is_empty());

    std::fs::write(
        vault.path().join("Logs/BM/2026-02-14.md"),
        "---\ntime: 08:00\nnotes: \"morning\"",
    )
    .unwrap();

    let batch = watcher.wait_reload(WAIT).unwrap();
    assert!(batch
        .iter()
        .any(|notice| notice.path == Path::new("Logs/BM/2026-02-14.md")));
    assert!(view.handle_changes(&batch));
    assert_eq!(view.state().events.event_count(today()), 1);
}

#[test]
fn changes_outside_folder_do_not_reload() {
    let vault = vault_with(&["Logs/BM", "Notes"]);
    let mut view = CalendarView::mount(
        FsLogStore::new(vault.path()),
        Settings::default(),
        today(),
    );
    let mut watcher = LogFolderWatcher::start(view.store().root(), DEBOUNCE).unwrap();

    std::fs::write(vault.path().join("Notes/2026-02-14.md"), "time: 08:00").unwrap();

    let batch = watcher.wait_reload(WAIT).unwrap();
    assert!(!view.handle_changes(&batch));
    assert!(view.state().events.is_empty());
}

#[test]
fn folder_setting_change_is_followed_without_restarting_watcher() {
    let vault = vault_with(&["Logs/BM", "Journal"]);
    let mut view = CalendarView::mount(
        FsLogStore::new(vault.path()),
        Settings::default(),
        today(),
    );
    let mut watcher = LogFolderWatcher::start(view.store().root(), DEBOUNCE).unwrap();

    view.update_settings(Settings {
        logs_folder: "Journal".to_string(),
        debug_mode: false,
    })
    .unwrap();
    std::fs::write(vault.path().join("Journal/2026-02-14.md"), "time: 21:00").unwrap();

    let batch = watcher.wait_reload(WAIT).unwrap();
    assert!(view.handle_changes(&batch));
    assert_eq!(view.state().events.event_count(today()), 1);
}

#[test]
fn absolute_folder_setting_matches_watcher_notices() {
    let vault = vault_with(&["Logs/BM"]);
    let absolute = vault.path().join("Logs/BM");
    let settings = Settings {
        logs_folder: absolute.to_string_lossy().into_owned(),
        debug_mode: false,
    };
    let mut view = CalendarView::mount(FsLogStore::new(vault.path()), settings, today());
    let mut watcher = LogFolderWatcher::start(view.store().root(), DEBOUNCE).unwrap();

    std::fs::write(absolute.join("2026-02-14.md"), "time: 06:45").unwrap();

    let batch = watcher.wait_reload(WAIT).unwrap();
    assert!(view.handle_changes(&batch));
    assert_eq!(view.state().events.event_count(today()), 1);
}
