use std::fs;
use std::io;
use std::path::Path;
use std::thread;
use std::time::Duration;

use review_core::Tag;
use review_logging::{review_error, review_info};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("source file not found")]
    NotFound,
    #[error("destination name already exists")]
    Conflict,
    #[error("file is locked by another process")]
    Busy,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Renames files to carry a tag prefix.
#[derive(Debug, Clone)]
pub struct Tagger {
    stability_attempts: u32,
    stability_interval: Duration,
}

impl Default for Tagger {
    fn default() -> Self {
        Self::new(5, Duration::from_millis(100))
    }
}

impl Tagger {
    pub fn new(stability_attempts: u32, stability_interval: Duration) -> Self {
        Self {
            stability_attempts,
            stability_interval,
        }
    }

    /// Renames `dir/filename` to `dir/<tag prefix><filename>` and returns the
    /// new name. Never overwrites an existing file.
    pub fn tag(&self, dir: &Path, filename: &str, tag: Tag) -> Result<String, TagError> {
        let old_path = dir.join(filename);
        let new_filename = tag.apply(filename);
        let new_path = dir.join(&new_filename);

        if !old_path.exists() {
            return Err(TagError::NotFound);
        }
        if new_path.exists() {
            return Err(TagError::Conflict);
        }

        self.wait_until_stable(&old_path);

        match fs::rename(&old_path, &new_path) {
            Ok(()) => {
                review_info!("✓ Tagged: {} → {}", filename, new_filename);
                Ok(new_filename)
            }
            Err(err) => {
                let err = classify_rename_error(err);
                review_error!("Tagging {} failed: {}", filename, err);
                Err(err)
            }
        }
    }

    /// Best effort: waits until two size samples agree or attempts run out.
    /// A writer that pauses between samples can still slip through.
    fn wait_until_stable(&self, path: &Path) {
        for _ in 0..self.stability_attempts {
            let Ok(before) = fs::metadata(path).map(|m| m.len()) else {
                thread::sleep(self.stability_interval);
                continue;
            };
            thread::sleep(self.stability_interval);
            match fs::metadata(path).map(|m| m.len()) {
                Ok(after) if after == before => return,
                _ => {}
            }
        }
    }
}

fn classify_rename_error(err: io::Error) -> TagError {
    if err.kind() == io::ErrorKind::NotFound {
        return TagError::NotFound;
    }
    if err.kind() == io::ErrorKind::PermissionDenied || is_sharing_violation(&err) {
        return TagError::Busy;
    }
    TagError::Io(err)
}

#[cfg(windows)]
fn is_sharing_violation(err: &io::Error) -> bool {
    // ERROR_SHARING_VIOLATION, ERROR_LOCK_VIOLATION
    matches!(err.raw_os_error(), Some(32) | Some(33))
}

#[cfg(not(windows))]
fn is_sharing_violation(err: &io::Error) -> bool {
    // EBUSY
    err.raw_os_error() == Some(16)
}
