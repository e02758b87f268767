use std::sync::Mutex;

use review_logging::{review_debug, review_warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard access failed: {0}")]
    Access(String),
}

pub trait ClipboardSource {
    fn read_text(&self) -> Result<String, ClipboardError>;

    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;

    /// Trimmed clipboard text; unreadable or non-text content reads as empty.
    fn read_text_or_empty(&self) -> String {
        match self.read_text() {
            Ok(text) => text.trim().to_string(),
            Err(err) => {
                review_debug!("Clipboard read failed: {}", err);
                String::new()
            }
        }
    }
}

/// The OS clipboard. The handle is opened on first use and kept, since on
/// X11 the written text only stays available while its owner is alive.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_handle<T>(
        &self,
        op: impl FnOnce(&mut arboard::Clipboard) -> Result<T, arboard::Error>,
    ) -> Result<T, ClipboardError> {
        let mut guard = self
            .handle
            .lock()
            .map_err(|_| ClipboardError::Access("clipboard lock poisoned".to_string()))?;
        if guard.is_none() {
            let clipboard = arboard::Clipboard::new().map_err(|err| {
                review_warn!("Could not open system clipboard: {}", err);
                ClipboardError::Unavailable(err.to_string())
            })?;
            *guard = Some(clipboard);
        }
        let Some(clipboard) = guard.as_mut() else {
            return Err(ClipboardError::Unavailable("no clipboard handle".to_string()));
        };
        op(clipboard).map_err(|err| ClipboardError::Access(err.to_string()))
    }
}

impl ClipboardSource for SystemClipboard {
    fn read_text(&self) -> Result<String, ClipboardError> {
        self.with_handle(|clipboard| clipboard.get_text())
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.with_handle(|clipboard| clipboard.set_text(text.to_string()))
    }
}

/// Process-local clipboard for headless runs and tests.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, text: impl Into<String>) {
        if let Ok(mut guard) = self.text.lock() {
            *guard = Some(text.into());
        }
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.text.lock() {
            *guard = None;
        }
    }
}

impl ClipboardSource for MemoryClipboard {
    fn read_text(&self) -> Result<String, ClipboardError> {
        let guard = self
            .text
            .lock()
            .map_err(|_| ClipboardError::Access("clipboard lock poisoned".to_string()))?;
        guard
            .clone()
            .ok_or_else(|| ClipboardError::Access("clipboard is empty".to_string()))
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.set(text);
        Ok(())
    }
}
