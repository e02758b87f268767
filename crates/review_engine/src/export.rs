use std::path::{Path, PathBuf};
use std::sync::Arc;

use review_logging::review_info;
use thiserror::Error;

use crate::docx::{render_docx, DocxError};
use crate::filename::review_filename;
use crate::folder::{write_report, FolderError};

/// One rendered line of the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Bullet(String),
    Paragraph(String),
}

/// Heading plus body blocks, independent of the on-disk format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDocument {
    pub heading: String,
    pub blocks: Vec<Block>,
}

impl ReviewDocument {
    /// Lines starting with `-`, `•` or `●` become bullets with the marker
    /// stripped; blank lines are dropped.
    pub fn from_reply(source: &str, content: &str) -> Self {
        let blocks = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                if line.starts_with(is_bullet_marker) {
                    let item = line.trim_start_matches(|c: char| is_bullet_marker(c) || c == ' ');
                    Block::Bullet(item.trim().to_string())
                } else {
                    Block::Paragraph(line.to_string())
                }
            })
            .collect();
        Self {
            heading: format!("{source} 審查結果"),
            blocks,
        }
    }
}

fn is_bullet_marker(c: char) -> bool {
    matches!(c, '-' | '•' | '●')
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export")]
    EmptyContent,
    #[error("render error: {0}")]
    Render(#[from] DocxError),
    #[error(transparent)]
    Folder(#[from] FolderError),
}

/// Turns reply text into a saved document.
pub trait DocumentExporter: Send + Sync {
    fn export(&self, output_dir: &Path, source: &str, content: &str)
        -> Result<PathBuf, ExportError>;
}

/// Writes `Review_<source>_<timestamp>.docx` files.
#[derive(Clone)]
pub struct DocxExporter {
    timestamp: Arc<dyn Fn() -> String + Send + Sync>,
}

impl Default for DocxExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxExporter {
    /// Timestamps file names with the local clock.
    pub fn new() -> Self {
        Self::with_clock(|| chrono::Local::now().format("%Y%m%d_%H%M%S").to_string())
    }

    pub fn with_clock(timestamp: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self {
            timestamp: Arc::new(timestamp),
        }
    }
}

impl DocumentExporter for DocxExporter {
    fn export(
        &self,
        output_dir: &Path,
        source: &str,
        content: &str,
    ) -> Result<PathBuf, ExportError> {
        if content.trim().is_empty() {
            return Err(ExportError::EmptyContent);
        }
        let doc = ReviewDocument::from_reply(source, content);
        let bytes = render_docx(&doc)?;
        let filename = review_filename(source, &(self.timestamp)());
        let path = write_report(output_dir, &filename, &bytes)?;
        review_info!("Exported review document to {:?}", path);
        Ok(path)
    }
}
