//! Turns view-model changes into terminal lines.

use review_core::AppViewModel;

const RULE: &str = "────────────────────────────────────────";

/// Every section of the view, as printed by `status` and `list`.
pub fn full(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![view.status_line.clone(), view.paths_line.clone(), RULE.to_string()];
    lines.extend(catalog_lines(view));
    lines.push(format!(
        "待審檔案：{}  （可選：{}）",
        view.review_target,
        view.review_choices.join("、")
    ));
    lines.push(format!(
        "剪貼簿監聽：{}",
        if view.clipboard_armed { "開" } else { "關" }
    ));
    if !view.prompt.is_empty() {
        lines.push(RULE.to_string());
        lines.extend(view.prompt.lines().map(str::to_string));
    }
    if let Some(notice) = &view.status_notice {
        lines.push(notice.clone());
    }
    lines
}

/// Only the sections that changed since `previous`.
pub fn changes(previous: Option<&AppViewModel>, view: &AppViewModel) -> Vec<String> {
    let Some(previous) = previous else {
        return full(view);
    };

    let mut lines = Vec::new();
    if previous.status_line != view.status_line
        || previous.untagged != view.untagged
        || previous.groups != view.groups
    {
        lines.push(view.status_line.clone());
        lines.extend(catalog_lines(view));
    }
    if previous.paths_line != view.paths_line {
        lines.push(view.paths_line.clone());
    }
    if previous.review_target != view.review_target {
        lines.push(format!("待審檔案：{}", view.review_target));
    }
    if previous.prompt != view.prompt && !view.prompt.is_empty() {
        lines.push(RULE.to_string());
        lines.extend(view.prompt.lines().map(str::to_string));
        lines.push(RULE.to_string());
    }
    if previous.notice_seq != view.notice_seq || previous.status_notice != view.status_notice {
        if let Some(notice) = &view.status_notice {
            lines.push(notice.clone());
        }
    }
    if previous.alert != view.alert {
        if let Some(alert) = &view.alert {
            lines.extend(alert_lines(alert));
        }
    }
    lines
}

fn catalog_lines(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![format!("未標記 ({})", view.untagged.len())];
    lines.extend(view.untagged.iter().map(|name| format!("  {name}")));
    for group in &view.groups {
        lines.push(format!("{} ({})", group.title, group.files.len()));
        lines.extend(group.files.iter().map(|name| format!("  {name}")));
    }
    lines
}

fn alert_lines(alert: &str) -> Vec<String> {
    let mut lines = vec!["┌ 提示".to_string()];
    lines.extend(alert.lines().map(|line| format!("│ {line}")));
    lines.push("└".to_string());
    lines
}
