use logcal_core::{load_event_map, FsLogStore, LoadError, ParseOptions};
use std::path::Path;

fn write_log(root: &Path, folder: &str, name: &str, content: &str) {
    let dir = root.join(folder);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(name), content).unwrap();
}

#[test]
fn yields_only_blocks_with_time_in_block_order() {
    let vault = tempfile::tempdir().unwrap();
    write_log(
        vault.path(),
        "Logs/BM",
        "2026-02-14.md",
        "---\ntime: 08:00\nnotes: first\n---\nnotes: \"no time here\"\n---\ntime: 12:00\n---\ntime:\nnotes: empty time\n---\ntime: 18:00\nnotes: \"last\"\n",
    );
    let store = FsLogStore::new(vault.path());

    let report = load_event_map(&store, Path::new("Logs/BM"), ParseOptions::default()).unwrap();
    let records = report.events.events_for_key("2026-02-14");
    let times: Vec<&str> = records.iter().map(|r| r.time.as_str()).collect();
    assert_eq!(times, vec!["08:00", "12:00", "18:00"]);
    assert_eq!(records[0].notes, "first");
    assert_eq!(records[1].notes, "");
    assert_eq!(records[2].notes, "last");
    assert!(records.iter().all(|r| r.original_date == "2026-02-14"));
    assert_eq!(report.stats.blocks_skipped, 2);
}

#[test]
fn quoted_notes_are_unwrapped_once() {
    let vault = tempfile::tempdir().unwrap();
    write_log(
        vault.path(),
        "Logs/BM",
        "2026-02-14.md",
        "---\ntime: 2026-02-14T15:19:02-08:00\nnotes: \"Feeling good.\"",
    );
    let store = FsLogStore::new(vault.path());

    let report = load_event_map(&store, Path::new("Logs/BM"), ParseOptions::default()).unwrap();
    let records = report.events.events_for_key("2026-02-14");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].notes, "Feeling good.");
    assert_eq!(records[0].time, "2026-02-14T15:19:02-08:00");
}

#[test]
fn non_date_and_non_markdown_files_contribute_nothing() {
    let vault = tempfile::tempdir().unwrap();
    write_log(vault.path(), "Logs/BM", "not-a-date.md", "time: 09:00");
    write_log(vault.path(), "Logs/BM", "2026-02-14.txt", "time: 09:00");
    write_log(vault.path(), "Logs/BM", "2026-02-15.md", "notes: no time at all");
    std::fs::create_dir_all(vault.path().join("Logs/BM/2026-02-16.md")).unwrap();
    let store = FsLogStore::new(vault.path());

    let report = load_event_map(
        &store,
        Path::new("Logs/BM"),
        ParseOptions { debug_mode: true },
    )
    .unwrap();
    assert!(report.events.is_empty());
    assert_eq!(report.stats.files_scanned, 4);
    assert_eq!(report.stats.files_skipped, 3);
}

#[test]
fn files_in_nested_folders_are_not_scanned() {
    let vault = tempfile::tempdir().unwrap();
    write_log(vault.path(), "Logs/BM/archive", "2026-01-01.md", "time: 1");
    write_log(vault.path(), "Logs/BM", "2026-01-02.md", "time: 2");
    let store = FsLogStore::new(vault.path());

    let report = load_event_map(&store, Path::new("Logs/BM"), ParseOptions::default()).unwrap();
    let keys: Vec<&str> = report.events.keys().collect();
    assert_eq!(keys, vec!["2026-01-02"]);
}

#[test]
fn reloading_unchanged_folder_is_idempotent() {
    let vault = tempfile::tempdir().unwrap();
    write_log(vault.path(), "Logs/BM", "2026-02-13.md", "time: a\n---\ntime: b");
    write_log(vault.path(), "Logs/BM", "2026-02-14.md", "time: c\nnotes: \"d\"");
    let store = FsLogStore::new(vault.path());

    let first = load_event_map(&store, Path::new("Logs/BM"), ParseOptions::default()).unwrap();
    let second = load_event_map(&store, Path::new("Logs/BM"), ParseOptions::default()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.events.total_events(), 3);
}

#[test]
fn missing_folder_and_file_path_are_distinct_errors() {
    let vault = tempfile::tempdir().unwrap();
    write_log(vault.path(), "Logs", "BM", "not a folder");
    let store = FsLogStore::new(vault.path());

    let missing = load_event_map(&store, Path::new("Nope"), ParseOptions::default()).unwrap_err();
    assert_eq!(missing, LoadError::FolderNotFound("Nope".into()));
    assert!(missing.to_string().contains("not found"));

    let not_dir = load_event_map(&store, Path::new("Logs/BM"), ParseOptions::default()).unwrap_err();
    assert_eq!(not_dir, LoadError::NotADirectory("Logs/BM".into()));
}
