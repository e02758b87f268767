use crate::ActionError;

/// Sentinel shown when no 【待審】 file is available or selected.
pub const NONE_SELECTED: &str = "(無)";

const REQUESTED_OUTPUTS: [&str; 4] = ["不符合之處", "風險", "具體修改建議", "需人工確認事項"];

/// Renders the review prompt for `target` against the reference files.
///
/// Sections are separated by a blank line. Empty lists render as a single
/// `(無)` bullet.
pub fn build_prompt(
    standards: &[String],
    templates: &[String],
    target: &str,
) -> Result<String, ActionError> {
    let target = target.trim();
    if target.is_empty() || target == NONE_SELECTED {
        return Err(ActionError::NoTarget);
    }

    let mut prompt = format!("請以【標準】與【範本】作為依據，逐條審查【待審】文件：{target}\n\n");
    prompt.push_str("【標準】\n");
    push_bullets(&mut prompt, standards);
    prompt.push_str("\n【範本】\n");
    push_bullets(&mut prompt, templates);
    prompt.push_str("\n請輸出：\n");
    for (index, item) in REQUESTED_OUTPUTS.iter().enumerate() {
        prompt.push_str(&format!("{}) {item}\n", index + 1));
    }
    Ok(prompt)
}

fn push_bullets(out: &mut String, items: &[String]) {
    if items.is_empty() {
        out.push_str(&format!("- {NONE_SELECTED}\n"));
        return;
    }
    for item in items {
        out.push_str(&format!("- {item}\n"));
    }
}
