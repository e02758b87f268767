use std::path::PathBuf;
use std::sync::Once;

use pretty_assertions::assert_eq;
use review_core::{
    update, ActionError, AppState, Catalog, ClipboardPurpose, ClipboardState, Effect, Msg, Origin,
    PathResolver, Scope, Tag, TimerKey, Timings, NONE_SELECTED,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(review_logging::initialize_for_tests);
}

fn scope() -> Scope {
    Scope::new("P", "D").unwrap()
}

fn input_dir() -> PathBuf {
    PathBuf::from("/base/P/D/input")
}

fn output_dir() -> PathBuf {
    PathBuf::from("/base/P/D/output")
}

fn selected_state() -> AppState {
    let state = AppState::new(
        PathResolver::new("/base", "input", "output"),
        Timings::default(),
    );
    let (mut state, _) = update(
        state,
        Msg::SelectionChanged {
            project: "P".to_string(),
            delivery: "D".to_string(),
        },
    );
    state.consume_dirty();
    state
}

fn with_catalog(state: AppState, names: &[&str]) -> AppState {
    let (state, _) = update(
        state,
        Msg::CatalogLoaded {
            scope: scope(),
            catalog: Catalog::from_names(names.iter().copied()),
        },
    );
    state
}

fn clipboard_read(state: AppState, text: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::ClipboardRead {
            purpose: ClipboardPurpose::Poll,
            text: text.to_string(),
        },
    )
}

fn export_count(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|e| matches!(e, Effect::Export { .. }))
        .count()
}

#[test]
fn selection_loads_catalog_and_restarts_watch() {
    init_logging();
    let state = AppState::new(
        PathResolver::new("/base", "input", "output"),
        Timings::default(),
    );

    let (mut next, effects) = update(
        state,
        Msg::SelectionChanged {
            project: "P".to_string(),
            delivery: "D".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![
            Effect::Cancel {
                timer: TimerKey::Refresh
            },
            Effect::LoadCatalog {
                scope: scope(),
                input_dir: input_dir(),
            },
            Effect::WatchDirectory {
                input_dir: input_dir()
            },
        ]
    );
    assert!(next.consume_dirty());
    assert_eq!(next.view().project.as_deref(), Some("P"));
}

#[test]
fn blank_selection_raises_alert() {
    init_logging();
    let (state, effects) = update(
        AppState::default(),
        Msg::SelectionChanged {
            project: String::new(),
            delivery: "D".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert!(state.alert().is_some());
    assert!(state.scope().is_none());
}

#[test]
fn scope_switch_discards_catalog_and_in_flight_files() {
    init_logging();
    let state = with_catalog(selected_state(), &["a.pdf"]);
    let pending = input_dir().join("new.pdf");
    let (state, _) = update(state, Msg::FileCreated(pending.clone()));
    assert_eq!(state.in_flight_count(), 1);

    let (state, effects) = update(
        state,
        Msg::SelectionChanged {
            project: "Q".to_string(),
            delivery: "D".to_string(),
        },
    );

    assert!(state.catalog().is_empty());
    assert_eq!(state.in_flight_count(), 0);
    assert!(effects.contains(&Effect::Cancel {
        timer: TimerKey::NewFileSettle(pending)
    }));
}

#[test]
fn stale_catalog_for_previous_scope_is_ignored() {
    init_logging();
    let state = selected_state();
    let other = Scope::new("Q", "D").unwrap();

    let (state, _) = update(
        state,
        Msg::CatalogLoaded {
            scope: other,
            catalog: Catalog::from_names(["x.pdf"]),
        },
    );

    assert!(state.catalog().is_empty());
}

#[test]
fn repeating_a_tag_bumps_the_notice() {
    init_logging();
    let finished = || Msg::TagFinished {
        filename: "draft.pdf".to_string(),
        tag: Tag::Review,
        result: Ok("【待審】draft.pdf".to_string()),
    };

    let (state, _) = update(selected_state(), finished());
    let first = state.view();
    let (state, _) = update(state, finished());
    let second = state.view();

    assert_eq!(first.status_notice, second.status_notice);
    assert!(second.notice_seq > first.notice_seq);
}

#[test]
fn catalog_failure_shows_transient_notice() {
    init_logging();
    let state = with_catalog(selected_state(), &["a.pdf"]);

    let (state, effects) = update(
        state,
        Msg::CatalogFailed {
            scope: scope(),
            reason: "not a directory".to_string(),
        },
    );

    assert_eq!(state.alert(), None);
    assert_eq!(
        state.status_notice(),
        Some("⚠ 檔案清單讀取失敗：not a directory")
    );
    assert_eq!(
        effects,
        vec![Effect::Schedule {
            timer: TimerKey::ClearNotice,
            delay: Timings::default().notification,
        }]
    );
    // The last good listing stays on screen.
    assert_eq!(state.catalog().untagged, vec!["a.pdf".to_string()]);
}

#[test]
fn catalog_failure_for_previous_scope_is_ignored() {
    init_logging();
    let (state, effects) = update(
        selected_state(),
        Msg::CatalogFailed {
            scope: Scope::new("Q", "D").unwrap(),
            reason: "gone".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.status_notice(), None);
}

#[test]
fn new_file_is_announced_once_after_settle() {
    init_logging();
    let state = selected_state();
    let path = input_dir().join("draft.pdf");

    let (state, effects) = update(state, Msg::FileCreated(path.clone()));
    assert_eq!(
        effects,
        vec![Effect::Schedule {
            timer: TimerKey::NewFileSettle(path.clone()),
            delay: Timings::default().new_file_settle,
        }]
    );

    // Duplicate creation while in flight is ignored.
    let (state, effects) = update(state, Msg::FileCreated(path.clone()));
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::TimerFired(TimerKey::NewFileSettle(path.clone())));
    assert_eq!(effects, vec![Effect::CheckFileExists { path: path.clone() }]);

    let (state, effects) = update(
        state,
        Msg::NewFileChecked {
            path: path.clone(),
            exists: true,
        },
    );
    assert_eq!(state.in_flight_count(), 0);
    assert_eq!(state.status_notice(), Some("📥 偵測到新檔案，請標記"));
    assert!(effects.contains(&Effect::Schedule {
        timer: TimerKey::Refresh,
        delay: Timings::default().new_file_refresh,
    }));
}

#[test]
fn vanished_new_file_clears_in_flight_without_notice() {
    init_logging();
    let state = selected_state();
    let path = input_dir().join("gone.pdf");
    let (state, _) = update(state, Msg::FileCreated(path.clone()));

    let (state, effects) = update(state, Msg::NewFileChecked { path, exists: false });

    assert!(effects.is_empty());
    assert_eq!(state.in_flight_count(), 0);
    assert_eq!(state.status_notice(), None);
}

#[test]
fn skip_files_never_enter_in_flight() {
    init_logging();
    let state = selected_state();

    let (state, effects) = update(state, Msg::FileCreated(input_dir().join("~$draft.docx")));
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::FileCreated(input_dir().join("part.tmp")));
    assert!(effects.is_empty());
    assert_eq!(state.in_flight_count(), 0);
}

#[test]
fn tagging_success_notifies_and_reloads() {
    init_logging();
    let state = with_catalog(selected_state(), &["draft.pdf"]);

    let (state, effects) = update(
        state,
        Msg::TagClicked {
            filename: "draft.pdf".to_string(),
            tag: Tag::Review,
        },
    );
    assert_eq!(
        effects,
        vec![Effect::TagFile {
            input_dir: input_dir(),
            filename: "draft.pdf".to_string(),
            tag: Tag::Review,
        }]
    );

    let (state, effects) = update(
        state,
        Msg::TagFinished {
            filename: "draft.pdf".to_string(),
            tag: Tag::Review,
            result: Ok("【待審】draft.pdf".to_string()),
        },
    );
    assert_eq!(state.status_notice(), Some("✓ 已標記為 【待審】"));
    assert!(effects.contains(&Effect::LoadCatalog {
        scope: scope(),
        input_dir: input_dir(),
    }));
}

#[test]
fn tagging_failure_is_blocking() {
    init_logging();
    let state = selected_state();

    let (state, effects) = update(
        state,
        Msg::TagFinished {
            filename: "draft.pdf".to_string(),
            tag: Tag::Standard,
            result: Err(ActionError::Conflict),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.alert(), Some("標記失敗：目標檔名已存在"));

    let (state, _) = update(state, Msg::NoticeAcknowledged);
    assert_eq!(state.alert(), None);
}

#[test]
fn review_target_follows_catalog() {
    init_logging();
    let state = selected_state();
    assert_eq!(state.review_target(), NONE_SELECTED);
    assert_eq!(state.view().review_choices, vec![NONE_SELECTED]);

    let state = with_catalog(state, &["【待審】b.pdf", "【待審】a.pdf"]);
    assert_eq!(state.review_target(), "【待審】a.pdf");

    let (state, _) = update(state, Msg::ReviewTargetSelected("【待審】b.pdf".to_string()));
    assert_eq!(state.review_target(), "【待審】b.pdf");

    // Selection survives a refresh that still lists it.
    let state = with_catalog(state, &["【待審】b.pdf", "【待審】a.pdf", "c.pdf"]);
    assert_eq!(state.review_target(), "【待審】b.pdf");

    // And falls back once it disappears.
    let state = with_catalog(state, &["【待審】a.pdf"]);
    assert_eq!(state.review_target(), "【待審】a.pdf");
}

#[test]
fn generate_prompt_uses_tagged_groups() {
    init_logging();
    let state = with_catalog(
        selected_state(),
        &["【標準】S1.pdf", "【範本】T1.docx", "【待審】Report.docx", "loose.pdf"],
    );

    let (state, _) = update(state, Msg::GeneratePromptClicked);

    let prompt = state.prompt();
    assert!(prompt.contains("文件：【待審】Report.docx"));
    assert!(prompt.contains("- 【標準】S1.pdf"));
    assert!(prompt.contains("- 【範本】T1.docx"));
    assert!(!prompt.contains("loose.pdf"));
}

#[test]
fn generate_prompt_without_target_alerts() {
    init_logging();
    let state = with_catalog(selected_state(), &["【標準】S1.pdf"]);

    let (state, effects) = update(state, Msg::GeneratePromptClicked);

    assert!(effects.is_empty());
    assert_eq!(state.prompt(), "");
    assert_eq!(state.alert(), Some("沒有選擇待審檔案"));
}

#[test]
fn copy_prompt_requires_content() {
    init_logging();
    let (state, effects) = update(selected_state(), Msg::CopyPromptClicked);
    assert!(effects.is_empty());
    assert_eq!(state.alert(), Some("提示詞是空的"));

    let state = with_catalog(state, &["【待審】r.pdf"]);
    let (state, _) = update(state, Msg::GeneratePromptClicked);
    let (_, effects) = update(state, Msg::CopyPromptClicked);
    assert!(matches!(effects.as_slice(), [Effect::WriteClipboard { .. }]));
}

#[test]
fn user_export_validates_content_then_target() {
    init_logging();
    let state = selected_state();

    let (state, effects) = update(state, Msg::ExportClicked);
    assert!(effects.is_empty());
    assert_eq!(state.alert(), Some("回覆內容是空的"));

    let (state, _) = update(state, Msg::ReplyEdited("- risk A".to_string()));
    let (state, effects) = update(state, Msg::ExportClicked);
    assert!(effects.is_empty());
    assert_eq!(state.alert(), Some("沒有選擇待審檔案"));

    let state = with_catalog(state, &["【待審】draft.pdf"]);
    let (_, effects) = update(state, Msg::ExportClicked);
    assert_eq!(
        effects,
        vec![Effect::Export {
            output_dir: output_dir(),
            source: "【待審】draft.pdf".to_string(),
            content: "- risk A".to_string(),
            origin: Origin::User,
        }]
    );
}

#[test]
fn export_from_empty_clipboard_alerts() {
    init_logging();
    let (state, effects) = update(selected_state(), Msg::ExportFromClipboardClicked);
    assert_eq!(
        effects,
        vec![Effect::ReadClipboard {
            purpose: ClipboardPurpose::ExportNow
        }]
    );

    let (state, effects) = update(
        state,
        Msg::ClipboardRead {
            purpose: ClipboardPurpose::ExportNow,
            text: "   ".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.alert(), Some("剪貼簿沒有文字內容"));
}

#[test]
fn arming_clipboard_schedules_immediate_poll() {
    init_logging();
    let (state, effects) = update(selected_state(), Msg::ClipboardToggled(true));

    assert_eq!(state.clipboard().state(), ClipboardState::Armed);
    assert_eq!(state.clipboard().last_seen(), None);
    assert!(effects.contains(&Effect::Schedule {
        timer: TimerKey::ClipboardPoll,
        delay: Timings::default().clipboard_first_poll,
    }));

    let (_, effects) = update(state, Msg::TimerFired(TimerKey::ClipboardPoll));
    assert_eq!(
        effects,
        vec![Effect::ReadClipboard {
            purpose: ClipboardPurpose::Poll
        }]
    );
}

#[test]
fn repeated_clipboard_content_exports_once() {
    init_logging();
    let state = with_catalog(selected_state(), &["【待審】draft.pdf"]);
    let (state, _) = update(state, Msg::ClipboardToggled(true));

    let (state, first) = clipboard_read(state, "A");
    let (state, second) = clipboard_read(state, "A");
    assert_eq!(export_count(&first), 1);
    assert_eq!(export_count(&second), 0);
    assert_eq!(state.reply(), "A");

    let (state, third) = clipboard_read(state, "B");
    assert_eq!(export_count(&third), 1);
    assert_eq!(state.reply(), "B");

    // Every poll reschedules, whatever happened.
    for effects in [&first, &second, &third] {
        assert!(effects.contains(&Effect::Schedule {
            timer: TimerKey::ClipboardPoll,
            delay: Timings::default().clipboard_poll,
        }));
    }
}

#[test]
fn background_export_problems_are_transient() {
    init_logging();
    let (state, _) = update(selected_state(), Msg::ClipboardToggled(true));

    let (state, effects) = clipboard_read(state, "reply without target");
    assert_eq!(export_count(&effects), 0);
    assert_eq!(state.alert(), None);
    assert_eq!(state.status_notice(), Some("⚠ 請先選擇待審檔案"));

    let (state, _) = update(
        state,
        Msg::ExportFinished {
            origin: Origin::Background,
            result: Err(ActionError::ExportFailure("disk full".to_string())),
        },
    );
    assert_eq!(state.alert(), None);
    assert_eq!(state.status_notice(), Some("⚠ Word 輸出失敗"));
    assert!(state.clipboard().is_armed());
}

#[test]
fn rearming_forgets_last_seen() {
    init_logging();
    let state = with_catalog(selected_state(), &["【待審】draft.pdf"]);
    let (state, _) = update(state, Msg::ClipboardToggled(true));
    let (state, _) = clipboard_read(state, "A");

    let (state, _) = update(state, Msg::ClipboardToggled(false));
    let (state, _) = update(state, Msg::ClipboardToggled(true));
    let (_, effects) = clipboard_read(state, "A");

    assert_eq!(export_count(&effects), 1);
}

#[test]
fn disarming_cancels_poll_and_ignores_late_reads() {
    init_logging();
    let state = with_catalog(selected_state(), &["【待審】draft.pdf"]);
    let (state, _) = update(state, Msg::ClipboardToggled(true));

    let (state, effects) = update(state, Msg::ClipboardToggled(false));
    assert!(effects.contains(&Effect::Cancel {
        timer: TimerKey::ClipboardPoll
    }));

    let (state, effects) = clipboard_read(state, "late");
    assert!(effects.is_empty());
    assert_eq!(state.reply(), "");

    let (_, effects) = update(state, Msg::TimerFired(TimerKey::ClipboardPoll));
    assert!(effects.is_empty());
}

#[test]
fn user_export_failure_is_blocking() {
    init_logging();
    let (state, _) = update(
        selected_state(),
        Msg::ExportFinished {
            origin: Origin::User,
            result: Err(ActionError::ExportFailure("disk full".to_string())),
        },
    );

    assert_eq!(state.alert(), Some("Word 輸出失敗：disk full"));
}

#[test]
fn transient_notice_clears_on_timer() {
    init_logging();
    let (state, effects) = update(
        selected_state(),
        Msg::ExportFinished {
            origin: Origin::User,
            result: Ok(PathBuf::from("/out/Review_x_20240101_000000.docx")),
        },
    );
    assert_eq!(
        state.status_notice(),
        Some("✓ Word 已輸出：Review_x_20240101_000000.docx")
    );
    assert!(effects.contains(&Effect::Schedule {
        timer: TimerKey::ClearNotice,
        delay: Timings::default().notification,
    }));

    let (state, _) = update(state, Msg::TimerFired(TimerKey::ClearNotice));
    assert_eq!(state.status_notice(), None);
}

#[test]
fn shutdown_disarms_clipboard() {
    init_logging();
    let (state, _) = update(selected_state(), Msg::ClipboardToggled(true));

    let (state, effects) = update(state, Msg::ShutdownRequested);

    assert_eq!(effects, vec![Effect::Shutdown]);
    assert!(!state.clipboard().is_armed());
    assert!(state.is_quitting());
}

#[test]
fn view_groups_tagged_files_and_reports_counts() {
    init_logging();
    let state = with_catalog(
        selected_state(),
        &["【範本】T.docx", "【標準】S.pdf", "loose.pdf"],
    );

    let view = state.view();

    assert_eq!(view.untagged, vec!["loose.pdf"]);
    assert_eq!(view.tagged_count, 2);
    let titles: Vec<_> = view.groups.iter().map(|g| g.title).collect();
    assert_eq!(titles, vec!["標準文件", "範本文件"]);
    assert_eq!(view.status_line, "專案：P  交付：D  |  待標記：1  已標記：2");
    assert!(view.paths_line.starts_with("input: /base/P/D/input"));
}
