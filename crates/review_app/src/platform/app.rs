use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use review_core::{update, AppState, AppViewModel, Msg, Scope, Timings};
use review_engine::{ClipboardSource, DocxExporter, PreparedBase, SystemClipboard};
use review_logging::{review_info, review_warn};

use super::effects::{EffectRunner, Flow};
use super::input::{CommandReader, REPLY_TERMINATOR, USAGE};
use super::render;

/// Upper bound on a blocking wait when no timer is pending.
const IDLE_WAIT: Duration = Duration::from_secs(3600);

/// Everything delivered to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    Core(Msg),
    /// Front-end-only request that never reaches `update`.
    Local(LocalCommand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalCommand {
    Status,
    Notebook,
}

impl From<Msg> for LoopEvent {
    fn from(msg: Msg) -> Self {
        LoopEvent::Core(msg)
    }
}

/// Interactive session settings resolved by `main`.
pub struct SessionConfig {
    pub prepared: PreparedBase,
    pub timings: Timings,
    pub scope: Scope,
    pub notebook_url: String,
}

pub fn run_app(config: SessionConfig) -> anyhow::Result<()> {
    let (msg_tx, msg_rx) = mpsc::channel::<LoopEvent>();
    let clipboard: Box<dyn ClipboardSource> = Box::new(SystemClipboard::new());
    let runner = EffectRunner::new(msg_tx.clone(), clipboard, Box::new(DocxExporter::new()));

    let state = AppState::new(config.prepared.resolver.clone(), config.timings);
    let mut session = Session::new(state, runner, config.notebook_url);

    if let Some(from) = config.prepared.relocated_from {
        let to = config.prepared.resolver.base_path().to_path_buf();
        let _ = msg_tx.send(Msg::BaseRelocated { from, to }.into());
    }
    let _ = msg_tx.send(
        Msg::SelectionChanged {
            project: config.scope.project().to_string(),
            delivery: config.scope.delivery().to_string(),
        }
        .into(),
    );

    spawn_stdin_reader(msg_tx);
    println!("{USAGE}");

    let mut stdout = io::stdout();
    loop {
        let now = Instant::now();
        let (flow, lines) = session.fire_due_timers(now);
        print_lines(&mut stdout, &lines)?;
        if flow == Flow::Exit {
            break;
        }

        let wait = session.time_until_next(Instant::now()).unwrap_or(IDLE_WAIT);
        let event = match msg_rx.recv_timeout(wait) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        let (flow, lines) = session.handle(event);
        print_lines(&mut stdout, &lines)?;
        if flow == Flow::Exit {
            break;
        }
    }
    review_info!("Session ended");
    Ok(())
}

fn print_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

/// Forwards parsed stdin commands; EOF requests shutdown.
fn spawn_stdin_reader(msg_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        let mut reader = CommandReader::new();
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    review_warn!("stdin read failed: {}", err);
                    break;
                }
            };
            let was_in_reply = reader.in_reply();
            match reader.feed(&line) {
                Ok(None) if !was_in_reply && reader.in_reply() => {
                    println!("（逐行輸入回覆，以單獨一行 {REPLY_TERMINATOR} 結束）");
                }
                Ok(Some(event)) => {
                    if msg_tx.send(event).is_err() {
                        return;
                    }
                }
                Ok(None) => {}
                Err(err) => println!("{err}"),
            }
        }
        let _ = msg_tx.send(Msg::ShutdownRequested.into());
    });
}

/// State, effect runner and the last rendered view.
pub struct Session {
    state: AppState,
    runner: EffectRunner,
    shown: Option<AppViewModel>,
    notebook_url: String,
}

impl Session {
    pub fn new(state: AppState, runner: EffectRunner, notebook_url: String) -> Self {
        Self {
            state,
            runner,
            shown: None,
            notebook_url,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.runner.time_until_next(now)
    }

    /// Returns the flow decision and the lines to print.
    pub fn handle(&mut self, event: LoopEvent) -> (Flow, Vec<String>) {
        let mut lines = Vec::new();
        let flow = match event {
            LoopEvent::Core(msg) => self.dispatch(msg, &mut lines),
            LoopEvent::Local(LocalCommand::Status) => {
                lines.extend(render::full(&self.state.view()));
                match self.runner.watched_dir() {
                    Some(dir) => lines.push(format!("監控中：{}", dir.display())),
                    None => lines.push("檔案監控未啟動".to_string()),
                }
                Flow::Continue
            }
            LoopEvent::Local(LocalCommand::Notebook) => {
                lines.push(format!("NotebookLM：{}", self.notebook_url));
                Flow::Continue
            }
        };
        (flow, lines)
    }

    pub fn fire_due_timers(&mut self, now: Instant) -> (Flow, Vec<String>) {
        let mut lines = Vec::new();
        for timer in self.runner.due_timers(now) {
            if self.dispatch(Msg::TimerFired(timer), &mut lines) == Flow::Exit {
                return (Flow::Exit, lines);
            }
        }
        (Flow::Continue, lines)
    }

    fn dispatch(&mut self, msg: Msg, lines: &mut Vec<String>) -> Flow {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        let mut shown_alert = false;
        if was_dirty {
            let view = self.state.view();
            lines.extend(render::changes(self.shown.as_ref(), &view));
            shown_alert = view.alert.is_some();
            self.shown = Some(view);
        }

        let flow = self.runner.run(effects, Instant::now());
        // A printed alert needs no dismissal; acknowledge it so the next
        // identical alert is printed again.
        if shown_alert && flow == Flow::Continue {
            return self.dispatch(Msg::NoticeAcknowledged, lines);
        }
        flow
    }
}
