use std::path::PathBuf;

use crate::{ActionError, Catalog, ClipboardPurpose, Origin, Scope, Tag, TimerKey};

/// Non-creation filesystem change reported by the watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Modified,
    Moved,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a (project, delivery) pair; also sent once at startup.
    SelectionChanged { project: String, delivery: String },
    /// User asked for an immediate catalog reload.
    RefreshClicked,
    /// Catalog read for `scope` finished.
    CatalogLoaded { scope: Scope, catalog: Catalog },
    /// Catalog read for `scope` failed.
    CatalogFailed { scope: Scope, reason: String },
    /// Watcher saw a new file.
    FileCreated(PathBuf),
    /// Watcher saw a modification, move or removal.
    FileChanged { kind: ChangeKind, path: PathBuf },
    /// The watch could not be installed.
    WatcherFailed(String),
    /// A scheduled timer is due.
    TimerFired(TimerKey),
    /// Result of the post-settle existence check for a new file.
    NewFileChecked { path: PathBuf, exists: bool },
    TagClicked { filename: String, tag: Tag },
    TagFinished {
        filename: String,
        tag: Tag,
        result: Result<String, ActionError>,
    },
    ReviewTargetSelected(String),
    GeneratePromptClicked,
    CopyPromptClicked,
    PromptCopied(Result<(), ActionError>),
    ClearPromptClicked,
    ReplyEdited(String),
    ClearReplyClicked,
    ExportClicked,
    ExportFromClipboardClicked,
    /// User toggled automatic clipboard monitoring.
    ClipboardToggled(bool),
    /// Clipboard text read on behalf of `purpose`; empty when unreadable.
    ClipboardRead { purpose: ClipboardPurpose, text: String },
    ExportFinished {
        origin: Origin,
        result: Result<PathBuf, ActionError>,
    },
    /// Startup had to relocate the base directory.
    BaseRelocated { from: PathBuf, to: PathBuf },
    /// User dismissed the blocking notice.
    NoticeAcknowledged,
    HelpClicked,
    ShutdownRequested,
    /// Fallback for placeholder wiring.
    NoOp,
}
