use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{Catalog, PathResolver, Scope, Tag, NONE_SELECTED};

/// Delays used by the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub refresh_debounce: Duration,
    pub new_file_settle: Duration,
    pub new_file_refresh: Duration,
    pub clipboard_poll: Duration,
    pub clipboard_first_poll: Duration,
    pub notification: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            refresh_debounce: Duration::from_millis(300),
            new_file_settle: Duration::from_millis(800),
            new_file_refresh: Duration::from_millis(200),
            clipboard_poll: Duration::from_millis(700),
            clipboard_first_poll: Duration::from_millis(10),
            notification: Duration::from_millis(3000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardState {
    #[default]
    Disabled,
    Armed,
}

/// Clipboard novelty detector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClipboardMonitor {
    state: ClipboardState,
    last_seen: Option<String>,
}

impl ClipboardMonitor {
    pub fn state(&self) -> ClipboardState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == ClipboardState::Armed
    }

    pub fn last_seen(&self) -> Option<&str> {
        self.last_seen.as_deref()
    }

    /// Enters `Armed` and forgets the last seen value.
    pub fn arm(&mut self) {
        self.state = ClipboardState::Armed;
        self.last_seen = None;
    }

    pub fn disarm(&mut self) {
        self.state = ClipboardState::Disabled;
    }

    /// Returns true when `content` is new and should be exported.
    ///
    /// Empty content and repeats of the last seen value are ignored; nothing
    /// is observed while disabled.
    pub fn observe(&mut self, content: &str) -> bool {
        if !self.is_armed() || content.is_empty() {
            return false;
        }
        if self.last_seen.as_deref() == Some(content) {
            return false;
        }
        self.last_seen = Some(content.to_string());
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    resolver: PathResolver,
    timings: Timings,
    scope: Option<Scope>,
    catalog: Catalog,
    review_target: Option<String>,
    prompt: String,
    reply: String,
    clipboard: ClipboardMonitor,
    in_flight: BTreeSet<PathBuf>,
    refresh_pending: bool,
    status_notice: Option<String>,
    /// Bumped for every notice shown, so a repeated text still reads as new.
    notice_seq: u64,
    alert: Option<String>,
    quitting: bool,
    dirty: bool,
}

impl AppState {
    pub fn new(resolver: PathResolver, timings: Timings) -> Self {
        Self {
            resolver,
            timings,
            ..Self::default()
        }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    pub fn scope(&self) -> Option<&Scope> {
        self.scope.as_ref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Selected 【待審】 file, or the `(無)` sentinel.
    pub fn review_target(&self) -> &str {
        self.review_target.as_deref().unwrap_or(NONE_SELECTED)
    }

    pub fn review_choices(&self) -> Vec<String> {
        self.catalog.with_tag(Tag::Review)
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn reply(&self) -> &str {
        &self.reply
    }

    pub fn clipboard(&self) -> &ClipboardMonitor {
        &self.clipboard
    }

    pub fn is_in_flight(&self, path: &Path) -> bool {
        self.in_flight.contains(path)
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_refresh_pending(&self) -> bool {
        self.refresh_pending
    }

    pub fn status_notice(&self) -> Option<&str> {
        self.status_notice.as_deref()
    }

    pub fn notice_seq(&self) -> u64 {
        self.notice_seq
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    pub fn input_dir(&self) -> Option<PathBuf> {
        self.scope.as_ref().map(|s| self.resolver.input_dir(s))
    }

    pub fn output_dir(&self) -> Option<PathBuf> {
        self.scope.as_ref().map(|s| self.resolver.output_dir(s))
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Switches scope and drops everything derived from the previous one.
    /// Returns the in-flight paths that were abandoned.
    pub(crate) fn set_scope(&mut self, scope: Scope) -> Vec<PathBuf> {
        self.scope = Some(scope);
        self.catalog = Catalog::default();
        self.review_target = None;
        self.refresh_pending = false;
        self.mark_dirty();
        std::mem::take(&mut self.in_flight).into_iter().collect()
    }

    /// Installs a fresh catalog and keeps the review target if it survived.
    pub(crate) fn apply_catalog(&mut self, catalog: Catalog) {
        let choices = catalog.with_tag(Tag::Review);
        let keep = self
            .review_target
            .as_ref()
            .is_some_and(|target| choices.contains(target));
        if !keep {
            self.review_target = choices.into_iter().next();
        }
        self.catalog = catalog;
        self.mark_dirty();
    }

    /// Returns false when `name` is not a current 【待審】 choice.
    pub(crate) fn select_review_target(&mut self, name: &str) -> bool {
        if !self.review_choices().iter().any(|c| c == name) {
            return false;
        }
        self.review_target = Some(name.to_string());
        self.mark_dirty();
        true
    }

    pub(crate) fn set_refresh_pending(&mut self, pending: bool) {
        self.refresh_pending = pending;
    }

    /// Returns false when `path` was already being processed.
    pub(crate) fn begin_in_flight(&mut self, path: PathBuf) -> bool {
        self.in_flight.insert(path)
    }

    pub(crate) fn finish_in_flight(&mut self, path: &Path) -> bool {
        self.in_flight.remove(path)
    }

    pub(crate) fn set_prompt(&mut self, prompt: String) {
        self.prompt = prompt;
        self.mark_dirty();
    }

    pub(crate) fn set_reply(&mut self, reply: String) {
        self.reply = reply;
        self.mark_dirty();
    }

    pub(crate) fn clipboard_mut(&mut self) -> &mut ClipboardMonitor {
        self.mark_dirty();
        &mut self.clipboard
    }

    pub(crate) fn set_status_notice(&mut self, text: Option<String>) {
        if text.is_some() {
            self.notice_seq += 1;
        }
        self.status_notice = text;
        self.mark_dirty();
    }

    pub(crate) fn set_alert(&mut self, text: Option<String>) {
        self.alert = text;
        self.mark_dirty();
    }

    pub(crate) fn set_quitting(&mut self) {
        self.quitting = true;
        self.mark_dirty();
    }
}
