//! Review core: pure state machine, tag rules and view-model helpers.
mod catalog;
mod effect;
mod error;
mod msg;
mod paths;
mod prompt;
mod state;
mod tag;
mod timer;
mod update;
mod view_model;

pub use catalog::{is_skip_file, Catalog, FileEntry};
pub use effect::{ClipboardPurpose, Effect, Origin};
pub use error::ActionError;
pub use msg::{ChangeKind, Msg};
pub use paths::{shorten_path, PathResolver, Scope};
pub use prompt::{build_prompt, NONE_SELECTED};
pub use state::{AppState, ClipboardMonitor, ClipboardState, Timings};
pub use tag::{ParseTagError, Tag, TagColors};
pub use timer::{TimerKey, TimerQueue};
pub use update::{update, HELP_TEXT};
pub use view_model::{AppViewModel, TagGroupView};
