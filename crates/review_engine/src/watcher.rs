//! Non-recursive directory watcher.
//!
//! notify delivers raw events on its own thread; they are pushed through a
//! bounded channel to a forwarding thread that maps them to [`WatchSignal`]s
//! and hands them to the caller. Nothing here touches application state.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use review_core::ChangeKind;
use review_logging::{review_debug, review_info, review_warn};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

const CHANNEL_CAPACITY: usize = 100;
const CANCEL_POLL: Duration = Duration::from_millis(100);
const PENDING_RENAMES: usize = 64;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("watch error: {0}")]
    Notify(#[from] notify::Error),
    #[error("failed to spawn watcher thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// A filesystem change worth reporting to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchSignal {
    Created(PathBuf),
    Changed { kind: ChangeKind, path: PathBuf },
}

/// Watches one directory until stopped or dropped.
pub struct ChangeWatcher {
    dir: PathBuf,
    watcher: Option<RecommendedWatcher>,
    cancel: CancellationToken,
    forwarder: Option<JoinHandle<()>>,
}

impl ChangeWatcher {
    pub fn start<F>(dir: &Path, on_signal: F) -> Result<Self, WatchError>
    where
        F: Fn(WatchSignal) + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel::<Event>(CHANNEL_CAPACITY);

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if tx.try_send(event).is_err() {
                    review_debug!("Watcher channel full, dropping event");
                }
            }
            Err(err) => review_warn!("Watcher error: {}", err),
        })?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let forwarder = thread::Builder::new()
            .name("lmreview-watcher".to_string())
            .spawn(move || {
                let mut renames = RenameTracker::default();
                loop {
                    if token.is_cancelled() {
                        break;
                    }
                    match rx.recv_timeout(CANCEL_POLL) {
                        Ok(event) => {
                            for signal in renames.signals_for(event) {
                                on_signal(signal);
                            }
                        }
                        Err(RecvTimeoutError::Timeout) => continue,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;

        review_info!("Watching {:?}", dir);
        Ok(Self {
            dir: dir.to_path_buf(),
            watcher: Some(watcher),
            cancel,
            forwarder: Some(forwarder),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stops watching and waits for the forwarding thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.cancel.cancel();
        // Dropping the watcher closes the channel sender.
        self.watcher.take();
        if let Some(handle) = self.forwarder.take() {
            if handle.join().is_err() {
                review_warn!("Watcher thread for {:?} panicked", self.dir);
            }
            review_debug!("Stopped watching {:?}", self.dir);
        }
    }
}

impl Drop for ChangeWatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Pairs the two halves of a rename by their tracker cookie.
///
/// A rename inside the watched folder arrives as `From` then `To` with the
/// same tracker. A file moved in from elsewhere only produces a `To`, which
/// is reported as a creation.
#[derive(Debug, Default)]
struct RenameTracker {
    pending: VecDeque<usize>,
}

impl RenameTracker {
    fn signals_for(&mut self, event: Event) -> Vec<WatchSignal> {
        let kind = match event.kind {
            EventKind::Create(_) => None,
            EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
                if let Some(tracker) = event.tracker() {
                    self.remember(tracker);
                }
                Some(ChangeKind::Moved)
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::To)) => match event.tracker() {
                Some(tracker) if !self.take(tracker) => None,
                _ => Some(ChangeKind::Moved),
            },
            EventKind::Modify(ModifyKind::Name(_)) => Some(ChangeKind::Moved),
            EventKind::Modify(_) => Some(ChangeKind::Modified),
            EventKind::Remove(_) => Some(ChangeKind::Removed),
            _ => return Vec::new(),
        };
        event
            .paths
            .into_iter()
            .filter_map(|path| match kind {
                None if path.is_dir() => None,
                None => Some(WatchSignal::Created(path)),
                Some(kind) => Some(WatchSignal::Changed { kind, path }),
            })
            .collect()
    }

    fn remember(&mut self, tracker: usize) {
        if self.pending.len() == PENDING_RENAMES {
            self.pending.pop_front();
        }
        self.pending.push_back(tracker);
    }

    fn take(&mut self, tracker: usize) -> bool {
        match self.pending.iter().position(|&t| t == tracker) {
            Some(index) => {
                self.pending.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, RemoveKind, RenameMode};

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    fn signals_for(event: Event) -> Vec<WatchSignal> {
        RenameTracker::default().signals_for(event)
    }

    fn moved(path: &str) -> Vec<WatchSignal> {
        vec![WatchSignal::Changed {
            kind: ChangeKind::Moved,
            path: PathBuf::from(path),
        }]
    }

    #[test]
    fn event_kinds_map_to_signals() {
        assert_eq!(
            signals_for(event(EventKind::Create(CreateKind::File), "/in/a.pdf")),
            vec![WatchSignal::Created(PathBuf::from("/in/a.pdf"))]
        );
        assert_eq!(
            signals_for(event(
                EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
                "/in/b.pdf"
            )),
            vec![WatchSignal::Changed {
                kind: ChangeKind::Moved,
                path: PathBuf::from("/in/b.pdf"),
            }]
        );
        assert_eq!(
            signals_for(event(
                EventKind::Modify(ModifyKind::Data(DataChange::Content)),
                "/in/c.pdf"
            )),
            vec![WatchSignal::Changed {
                kind: ChangeKind::Modified,
                path: PathBuf::from("/in/c.pdf"),
            }]
        );
        assert_eq!(
            signals_for(event(EventKind::Remove(RemoveKind::File), "/in/d.pdf")),
            vec![WatchSignal::Changed {
                kind: ChangeKind::Removed,
                path: PathBuf::from("/in/d.pdf"),
            }]
        );
    }

    #[test]
    fn rename_within_folder_is_a_move() {
        let mut renames = RenameTracker::default();
        let from = event(EventKind::Modify(ModifyKind::Name(RenameMode::From)), "/in/a.pdf")
            .set_tracker(7);
        let to = event(
            EventKind::Modify(ModifyKind::Name(RenameMode::To)),
            "/in/【待審】a.pdf",
        )
        .set_tracker(7);

        assert_eq!(renames.signals_for(from), moved("/in/a.pdf"));
        assert_eq!(renames.signals_for(to), moved("/in/【待審】a.pdf"));
        assert!(renames.pending.is_empty());
    }

    #[test]
    fn file_moved_in_from_elsewhere_is_a_creation() {
        let mut renames = RenameTracker::default();
        let to = event(EventKind::Modify(ModifyKind::Name(RenameMode::To)), "/in/new.pdf")
            .set_tracker(9);

        assert_eq!(
            renames.signals_for(to),
            vec![WatchSignal::Created(PathBuf::from("/in/new.pdf"))]
        );
    }

    #[test]
    fn untracked_rename_target_stays_a_move() {
        let to = event(EventKind::Modify(ModifyKind::Name(RenameMode::To)), "/in/b.pdf");
        assert_eq!(signals_for(to), moved("/in/b.pdf"));
    }

    #[test]
    fn pending_renames_are_bounded() {
        let mut renames = RenameTracker::default();
        for tracker in 0..PENDING_RENAMES + 10 {
            renames.remember(tracker);
        }
        assert_eq!(renames.pending.len(), PENDING_RENAMES);
        assert!(!renames.take(0));
        assert!(renames.take(PENDING_RENAMES + 9));
    }

    #[test]
    fn access_events_are_ignored() {
        let access = EventKind::Access(notify::event::AccessKind::Any);
        assert!(signals_for(event(access, "/in/a.pdf")).is_empty());
    }
}
