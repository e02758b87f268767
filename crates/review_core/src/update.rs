use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{
    build_prompt, is_skip_file, ActionError, AppState, ChangeKind, ClipboardPurpose, Effect, Msg,
    Origin, Scope, Tag, TimerKey, NONE_SELECTED,
};

pub const HELP_TEXT: &str = "1) 開啟 input 資料夾，把檔案放進去\n\
2) 為未標記檔案加上【標準/範本/待審】標籤\n\
3) 選擇待審檔案，生成提示詞並貼到 NotebookLM\n\
4) 把 AI 回覆貼回來，輸出 Word 報告\n\
5) 或直接用「從剪貼簿輸出 / 自動監聽剪貼簿」";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if state.is_quitting() {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::SelectionChanged { project, delivery } => {
            let Some(scope) = Scope::new(project, delivery) else {
                return alert(state, "請選擇專案與交付".to_string());
            };
            change_scope(&mut state, scope)
        }
        Msg::RefreshClicked => load_catalog(&mut state),
        Msg::CatalogLoaded { scope, catalog } => {
            // A load for a previous scope may land after a switch.
            if state.scope() == Some(&scope) {
                state.apply_catalog(catalog);
            }
            Vec::new()
        }
        Msg::CatalogFailed { scope, reason } => {
            if state.scope() == Some(&scope) {
                notify(&mut state, format!("⚠ 檔案清單讀取失敗：{reason}"))
            } else {
                Vec::new()
            }
        }
        Msg::FileCreated(path) => on_file_created(&mut state, path),
        Msg::FileChanged { kind, path } => {
            if kind == ChangeKind::Modified && file_name_is_skip(&path) {
                Vec::new()
            } else {
                let delay = state.timings().refresh_debounce;
                request_refresh(&mut state, delay)
            }
        }
        Msg::WatcherFailed(reason) => notify(&mut state, format!("⚠ 檔案監控未啟動：{reason}")),
        Msg::TimerFired(timer) => on_timer(&mut state, timer),
        Msg::NewFileChecked { path, exists } => {
            state.finish_in_flight(&path);
            if exists {
                let mut effects = notify(&mut state, "📥 偵測到新檔案，請標記".to_string());
                let delay = state.timings().new_file_refresh;
                effects.extend(request_refresh(&mut state, delay));
                effects
            } else {
                Vec::new()
            }
        }
        Msg::TagClicked { filename, tag } => match state.input_dir() {
            Some(input_dir) => vec![Effect::TagFile {
                input_dir,
                filename,
                tag,
            }],
            None => return alert(state, "請選擇專案與交付".to_string()),
        },
        Msg::TagFinished {
            filename: _,
            tag,
            result,
        } => match result {
            Ok(_) => {
                let mut effects = notify(&mut state, format!("✓ 已標記為 {tag}"));
                effects.extend(load_catalog(&mut state));
                effects
            }
            Err(err) => return alert(state, format!("標記失敗：{err}")),
        },
        Msg::ReviewTargetSelected(name) => {
            if !state.select_review_target(&name) {
                return alert(state, format!("不是待審檔案：{name}"));
            }
            Vec::new()
        }
        Msg::GeneratePromptClicked => {
            let catalog = state.catalog();
            let standards = catalog.with_tag(Tag::Standard);
            let templates = catalog.with_tag(Tag::Template);
            match build_prompt(&standards, &templates, state.review_target()) {
                Ok(prompt) => {
                    state.set_prompt(prompt);
                    notify(&mut state, "✓ 提示詞已生成".to_string())
                }
                Err(err) => return alert(state, err.to_string()),
            }
        }
        Msg::CopyPromptClicked => {
            let text = state.prompt().trim().to_string();
            if text.is_empty() {
                return alert(state, ActionError::EmptyPrompt.to_string());
            }
            vec![Effect::WriteClipboard { text }]
        }
        Msg::PromptCopied(result) => match result {
            Ok(()) => notify(&mut state, "✓ 已複製到剪貼簿".to_string()),
            Err(err) => return alert(state, err.to_string()),
        },
        Msg::ClearPromptClicked => {
            state.set_prompt(String::new());
            notify(&mut state, "✓ 提示詞已清空".to_string())
        }
        Msg::ReplyEdited(text) => {
            state.set_reply(text);
            Vec::new()
        }
        Msg::ClearReplyClicked => {
            state.set_reply(String::new());
            notify(&mut state, "✓ 回覆內容已清空".to_string())
        }
        Msg::ExportClicked => {
            let content = state.reply().trim().to_string();
            export(&mut state, content, Origin::User)
        }
        Msg::ExportFromClipboardClicked => vec![Effect::ReadClipboard {
            purpose: ClipboardPurpose::ExportNow,
        }],
        Msg::ClipboardToggled(enabled) => toggle_clipboard(&mut state, enabled),
        Msg::ClipboardRead { purpose, text } => on_clipboard_read(&mut state, purpose, text),
        Msg::ExportFinished { origin, result } => match result {
            Ok(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                notify(&mut state, format!("✓ Word 已輸出：{name}"))
            }
            Err(err) => match origin {
                Origin::User => return alert(state, err.to_string()),
                Origin::Background => notify(&mut state, "⚠ Word 輸出失敗".to_string()),
            },
        },
        Msg::BaseRelocated { from, to } => {
            return alert(
                state,
                format!(
                    "原始路徑無法寫入（{}），已改用：\n{}",
                    from.display(),
                    to.display()
                ),
            )
        }
        Msg::NoticeAcknowledged => {
            if state.alert().is_some() {
                state.set_alert(None);
            }
            Vec::new()
        }
        Msg::HelpClicked => return alert(state, HELP_TEXT.to_string()),
        Msg::ShutdownRequested => {
            state.clipboard_mut().disarm();
            state.set_quitting();
            vec![Effect::Shutdown]
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn change_scope(state: &mut AppState, scope: Scope) -> Vec<Effect> {
    let abandoned = state.set_scope(scope);
    let mut effects: Vec<Effect> = abandoned
        .into_iter()
        .map(|path| Effect::Cancel {
            timer: TimerKey::NewFileSettle(path),
        })
        .collect();
    effects.push(Effect::Cancel {
        timer: TimerKey::Refresh,
    });
    effects.extend(load_catalog(state));
    if let Some(input_dir) = state.input_dir() {
        effects.push(Effect::WatchDirectory { input_dir });
    }
    effects
}

fn load_catalog(state: &mut AppState) -> Vec<Effect> {
    match (state.scope().cloned(), state.input_dir()) {
        (Some(scope), Some(input_dir)) => vec![Effect::LoadCatalog { scope, input_dir }],
        _ => Vec::new(),
    }
}

/// Trailing-edge debounce: the queue replaces any pending refresh.
fn request_refresh(state: &mut AppState, delay: Duration) -> Vec<Effect> {
    state.set_refresh_pending(true);
    vec![Effect::Schedule {
        timer: TimerKey::Refresh,
        delay,
    }]
}

fn on_file_created(state: &mut AppState, path: PathBuf) -> Vec<Effect> {
    if file_name_is_skip(&path) || !state.begin_in_flight(path.clone()) {
        return Vec::new();
    }
    vec![Effect::Schedule {
        timer: TimerKey::NewFileSettle(path),
        delay: state.timings().new_file_settle,
    }]
}

fn on_timer(state: &mut AppState, timer: TimerKey) -> Vec<Effect> {
    match timer {
        TimerKey::Refresh => {
            state.set_refresh_pending(false);
            load_catalog(state)
        }
        TimerKey::NewFileSettle(path) => {
            if state.is_in_flight(&path) {
                vec![Effect::CheckFileExists { path }]
            } else {
                Vec::new()
            }
        }
        TimerKey::ClipboardPoll => {
            if state.clipboard().is_armed() {
                vec![Effect::ReadClipboard {
                    purpose: ClipboardPurpose::Poll,
                }]
            } else {
                Vec::new()
            }
        }
        TimerKey::ClearNotice => {
            state.set_status_notice(None);
            Vec::new()
        }
    }
}

fn toggle_clipboard(state: &mut AppState, enabled: bool) -> Vec<Effect> {
    if enabled {
        state.clipboard_mut().arm();
        let mut effects = notify(state, "✓ 已啟用剪貼簿監聽".to_string());
        effects.push(Effect::Schedule {
            timer: TimerKey::ClipboardPoll,
            delay: state.timings().clipboard_first_poll,
        });
        effects
    } else {
        state.clipboard_mut().disarm();
        let mut effects = vec![Effect::Cancel {
            timer: TimerKey::ClipboardPoll,
        }];
        effects.extend(notify(state, "✓ 已停止剪貼簿監聽".to_string()));
        effects
    }
}

fn on_clipboard_read(state: &mut AppState, purpose: ClipboardPurpose, text: String) -> Vec<Effect> {
    let text = text.trim().to_string();
    match purpose {
        ClipboardPurpose::ExportNow => {
            if text.is_empty() {
                state.set_alert(Some(ActionError::EmptyClipboard.to_string()));
                return Vec::new();
            }
            state.set_reply(text.clone());
            export(state, text, Origin::User)
        }
        ClipboardPurpose::Poll => {
            // Disabled while the read was outstanding.
            if !state.clipboard().is_armed() {
                return Vec::new();
            }
            let mut effects = Vec::new();
            if state.clipboard_mut().observe(&text) {
                state.set_reply(text.clone());
                effects.extend(export(state, text, Origin::Background));
            }
            effects.push(Effect::Schedule {
                timer: TimerKey::ClipboardPoll,
                delay: state.timings().clipboard_poll,
            });
            effects
        }
    }
}

/// Validates an export request and emits the write, or surfaces why not.
fn export(state: &mut AppState, content: String, origin: Origin) -> Vec<Effect> {
    let failure = if content.is_empty() {
        Some(ActionError::EmptyContent)
    } else if state.review_target() == NONE_SELECTED {
        Some(ActionError::NoTarget)
    } else {
        None
    };

    if let Some(err) = failure {
        return match origin {
            Origin::User => {
                state.set_alert(Some(err.to_string()));
                Vec::new()
            }
            Origin::Background => {
                let text = match err {
                    ActionError::NoTarget => "⚠ 請先選擇待審檔案".to_string(),
                    other => format!("⚠ {other}"),
                };
                notify(state, text)
            }
        };
    }

    let Some(output_dir) = state.output_dir() else {
        state.set_alert(Some("請選擇專案與交付".to_string()));
        return Vec::new();
    };
    vec![Effect::Export {
        output_dir,
        source: state.review_target().to_string(),
        content,
        origin,
    }]
}

/// Shows a transient notice that clears itself.
fn notify(state: &mut AppState, text: String) -> Vec<Effect> {
    state.set_status_notice(Some(text));
    vec![Effect::Schedule {
        timer: TimerKey::ClearNotice,
        delay: state.timings().notification,
    }]
}

/// Shows a blocking notice; the caller returns no effects.
fn alert(mut state: AppState, text: String) -> (AppState, Vec<Effect>) {
    state.set_alert(Some(text));
    (state, Vec::new())
}

fn file_name_is_skip(path: &Path) -> bool {
    path.file_name()
        .map(|name| is_skip_file(&name.to_string_lossy()))
        .unwrap_or(false)
}
