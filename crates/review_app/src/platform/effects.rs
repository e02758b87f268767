use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use review_core::{ActionError, Effect, Msg, TimerKey, TimerQueue};
use review_engine::{
    list_input_files, ChangeWatcher, ClipboardSource, DocumentExporter, ExportError, FolderError,
    TagError, Tagger, WatchSignal,
};
use review_logging::{review_debug, review_error, review_info, review_warn};

use super::app::LoopEvent;

/// Whether the event loop keeps going after a batch of effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Executes effects on the loop thread and reports results as messages.
pub struct EffectRunner {
    msg_tx: mpsc::Sender<LoopEvent>,
    timers: TimerQueue,
    watcher: Option<ChangeWatcher>,
    tagger: Tagger,
    exporter: Box<dyn DocumentExporter>,
    clipboard: Box<dyn ClipboardSource>,
}

impl EffectRunner {
    pub fn new(
        msg_tx: mpsc::Sender<LoopEvent>,
        clipboard: Box<dyn ClipboardSource>,
        exporter: Box<dyn DocumentExporter>,
    ) -> Self {
        Self {
            msg_tx,
            timers: TimerQueue::new(),
            watcher: None,
            tagger: Tagger::default(),
            exporter,
            clipboard,
        }
    }

    pub fn with_tagger(mut self, tagger: Tagger) -> Self {
        self.tagger = tagger;
        self
    }

    pub fn run(&mut self, effects: Vec<Effect>, now: Instant) -> Flow {
        for effect in effects {
            if self.execute(effect, now) == Flow::Exit {
                return Flow::Exit;
            }
        }
        Flow::Continue
    }

    pub fn due_timers(&mut self, now: Instant) -> Vec<TimerKey> {
        self.timers.pop_due(now)
    }

    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.timers.time_until_next(now)
    }

    #[cfg(test)]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn watched_dir(&self) -> Option<&Path> {
        self.watcher.as_ref().map(ChangeWatcher::dir)
    }

    fn execute(&mut self, effect: Effect, now: Instant) -> Flow {
        match effect {
            Effect::Schedule { timer, delay } => {
                self.timers.schedule(timer, now, delay);
            }
            Effect::Cancel { timer } => {
                self.timers.cancel(&timer);
            }
            Effect::LoadCatalog { scope, input_dir } => match list_input_files(&input_dir) {
                Ok(catalog) => {
                    review_debug!("Listed {} files in {:?}", catalog.len(), input_dir);
                    self.send(Msg::CatalogLoaded { scope, catalog });
                }
                Err(err) => {
                    review_error!("Failed to list {:?}: {}", input_dir, err);
                    self.send(Msg::CatalogFailed {
                        scope,
                        reason: err.to_string(),
                    });
                }
            },
            Effect::WatchDirectory { input_dir } => self.watch(&input_dir),
            Effect::CheckFileExists { path } => {
                let exists = path.is_file();
                self.send(Msg::NewFileChecked { path, exists });
            }
            Effect::TagFile {
                input_dir,
                filename,
                tag,
            } => {
                let result = self
                    .tagger
                    .tag(&input_dir, &filename, tag)
                    .map_err(action_error_from_tag);
                self.send(Msg::TagFinished {
                    filename,
                    tag,
                    result,
                });
            }
            Effect::ReadClipboard { purpose } => {
                let text = self.clipboard.read_text_or_empty();
                self.send(Msg::ClipboardRead { purpose, text });
            }
            Effect::WriteClipboard { text } => {
                let result = self
                    .clipboard
                    .write_text(&text)
                    .map_err(|err| ActionError::Clipboard(err.to_string()));
                self.send(Msg::PromptCopied(result));
            }
            Effect::Export {
                output_dir,
                source,
                content,
                origin,
            } => {
                let result = self
                    .exporter
                    .export(&output_dir, &source, &content)
                    .map_err(|err| {
                        review_error!("Export of {} failed: {}", source, err);
                        action_error_from_export(err)
                    });
                self.send(Msg::ExportFinished { origin, result });
            }
            Effect::Shutdown => {
                self.shutdown();
                return Flow::Exit;
            }
        }
        Flow::Continue
    }

    fn watch(&mut self, input_dir: &Path) {
        if let Some(previous) = self.watcher.take() {
            previous.stop();
        }
        let tx = self.msg_tx.clone();
        let started = ChangeWatcher::start(input_dir, move |signal| {
            let msg = match signal {
                WatchSignal::Created(path) => Msg::FileCreated(path),
                WatchSignal::Changed { kind, path } => Msg::FileChanged { kind, path },
            };
            let _ = tx.send(msg.into());
        });
        match started {
            Ok(watcher) => self.watcher = Some(watcher),
            Err(err) => {
                review_warn!("Could not watch {:?}: {}", input_dir, err);
                self.send(Msg::WatcherFailed(err.to_string()));
            }
        }
    }

    fn shutdown(&mut self) {
        self.timers.clear();
        if let Some(watcher) = self.watcher.take() {
            watcher.stop();
        }
        review_info!("Shutdown complete");
    }

    fn send(&self, msg: Msg) {
        if self.msg_tx.send(msg.into()).is_err() {
            review_debug!("Event loop gone; dropping result");
        }
    }
}

pub(crate) fn action_error_from_tag(err: TagError) -> ActionError {
    match err {
        TagError::NotFound => ActionError::NotFound,
        TagError::Conflict => ActionError::Conflict,
        TagError::Busy => ActionError::Busy,
        TagError::Io(err) => ActionError::Io(err.to_string()),
    }
}

pub(crate) fn action_error_from_export(err: ExportError) -> ActionError {
    match err {
        ExportError::EmptyContent => ActionError::EmptyContent,
        ExportError::Folder(
            err @ (FolderError::NotAFolder { .. } | FolderError::NotWritable { .. }),
        ) => ActionError::DirectoryUnwritable(err.path().display().to_string()),
        other => ActionError::ExportFailure(other.to_string()),
    }
}
