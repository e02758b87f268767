//! Review engine: filesystem, clipboard and document IO behind the core's effects.
mod catalog;
mod clipboard;
mod docx;
mod export;
mod filename;
mod folder;
mod setup;
mod tagger;
mod watcher;

pub use catalog::list_input_files;
pub use clipboard::{ClipboardError, ClipboardSource, MemoryClipboard, SystemClipboard};
pub use docx::{render_docx, DocxError};
pub use export::{Block, DocumentExporter, DocxExporter, ExportError, ReviewDocument};
pub use filename::{review_filename, sanitize_filename};
pub use folder::{ensure_writable_dir, write_report, FolderError, FolderRole};
pub use setup::{default_fallback_base, ensure_structure, prepare_base, PreparedBase, SetupError};
pub use tagger::{TagError, Tagger};
pub use watcher::{ChangeWatcher, WatchError, WatchSignal};
