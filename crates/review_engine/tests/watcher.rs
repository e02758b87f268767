use std::fs;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use review_core::ChangeKind;
use review_engine::{ChangeWatcher, WatchSignal};
use tempfile::TempDir;

const WAIT: Duration = Duration::from_secs(5);

fn wait_for(
    rx: &mpsc::Receiver<WatchSignal>,
    pred: impl Fn(&WatchSignal) -> bool,
) -> Option<WatchSignal> {
    let deadline = Instant::now() + WAIT;
    while let Some(left) = deadline.checked_duration_since(Instant::now()) {
        match rx.recv_timeout(left) {
            Ok(signal) if pred(&signal) => return Some(signal),
            Ok(_) => continue,
            Err(_) => return None,
        }
    }
    None
}

#[test]
fn reports_created_and_removed_files() {
    let temp = TempDir::new().unwrap();
    let (tx, rx) = mpsc::channel();
    let watcher = ChangeWatcher::start(temp.path(), move |signal| {
        let _ = tx.send(signal);
    })
    .unwrap();
    assert_eq!(watcher.dir(), temp.path());

    let file = temp.path().join("new.pdf");
    fs::write(&file, b"x").unwrap();
    let created = wait_for(&rx, |s| matches!(s, WatchSignal::Created(p) if p.ends_with("new.pdf")));
    assert!(created.is_some(), "no create signal");

    fs::remove_file(&file).unwrap();
    let removed = wait_for(&rx, |s| {
        matches!(s, WatchSignal::Changed { kind: ChangeKind::Removed, path } if path.ends_with("new.pdf"))
    });
    assert!(removed.is_some(), "no remove signal");

    watcher.stop();
}

#[test]
fn subdirectories_are_not_watched() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("nested");
    fs::create_dir(&nested).unwrap();
    let (tx, rx) = mpsc::channel();
    let _watcher = ChangeWatcher::start(temp.path(), move |signal| {
        let _ = tx.send(signal);
    })
    .unwrap();

    fs::write(nested.join("deep.pdf"), b"x").unwrap();
    let deep = wait_for(&rx, |s| match s {
        WatchSignal::Created(p) => p.ends_with("deep.pdf"),
        WatchSignal::Changed { path, .. } => path.ends_with("deep.pdf"),
    });
    assert!(deep.is_none());
}

#[test]
fn stop_ends_delivery() {
    let temp = TempDir::new().unwrap();
    let (tx, rx) = mpsc::channel();
    let watcher = ChangeWatcher::start(temp.path(), move |signal| {
        let _ = tx.send(signal);
    })
    .unwrap();
    watcher.stop();

    fs::write(temp.path().join("late.pdf"), b"x").unwrap();
    // The callback (and its sender) is gone once the forwarding thread exits.
    assert!(rx.recv_timeout(Duration::from_millis(500)).is_err());
}
