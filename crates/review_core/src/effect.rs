use std::path::PathBuf;
use std::time::Duration;

use crate::{Scope, Tag, TimerKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Arm `timer`, replacing any pending instance.
    Schedule { timer: TimerKey, delay: Duration },
    Cancel { timer: TimerKey },
    LoadCatalog { scope: Scope, input_dir: PathBuf },
    /// Replace the active directory watch.
    WatchDirectory { input_dir: PathBuf },
    CheckFileExists { path: PathBuf },
    TagFile {
        input_dir: PathBuf,
        filename: String,
        tag: Tag,
    },
    ReadClipboard { purpose: ClipboardPurpose },
    WriteClipboard { text: String },
    Export {
        output_dir: PathBuf,
        source: String,
        content: String,
        origin: Origin,
    },
    /// Cancel every timer, stop the watcher and leave the event loop.
    Shutdown,
}

/// Who asked for an action; decides how failures are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Blocking notice on failure.
    User,
    /// Transient notice on failure.
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardPurpose {
    Poll,
    ExportNow,
}
