use crate::{shorten_path, AppState, Tag, NONE_SELECTED};

const STATUS_PATH_LEN: usize = 52;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagGroupView {
    pub tag: Tag,
    pub title: &'static str,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub project: Option<String>,
    pub delivery: Option<String>,
    pub untagged: Vec<String>,
    pub tagged_count: usize,
    /// Non-empty tag groups in tag order.
    pub groups: Vec<TagGroupView>,
    /// 【待審】 choices, or just the `(無)` sentinel.
    pub review_choices: Vec<String>,
    pub review_target: String,
    pub prompt: String,
    pub reply: String,
    pub clipboard_armed: bool,
    pub status_line: String,
    pub paths_line: String,
    pub status_notice: Option<String>,
    pub notice_seq: u64,
    pub alert: Option<String>,
}

impl AppState {
    pub fn view(&self) -> AppViewModel {
        let catalog = self.catalog();
        let groups = Tag::ALL
            .into_iter()
            .map(|tag| TagGroupView {
                tag,
                title: tag.group_title(),
                files: catalog.with_tag(tag),
            })
            .filter(|group| !group.files.is_empty())
            .collect();

        let mut review_choices = self.review_choices();
        if review_choices.is_empty() {
            review_choices.push(NONE_SELECTED.to_string());
        }

        let (project, delivery) = match self.scope() {
            Some(scope) => (
                Some(scope.project().to_string()),
                Some(scope.delivery().to_string()),
            ),
            None => (None, None),
        };

        let status_line = format!(
            "專案：{}  交付：{}  |  待標記：{}  已標記：{}",
            project.as_deref().unwrap_or("-"),
            delivery.as_deref().unwrap_or("-"),
            catalog.untagged.len(),
            catalog.tagged.len()
        );
        let paths_line = match (self.input_dir(), self.output_dir()) {
            (Some(input), Some(output)) => format!(
                "input: {}  |  output: {}",
                shorten_path(&input.display().to_string(), STATUS_PATH_LEN),
                shorten_path(&output.display().to_string(), STATUS_PATH_LEN)
            ),
            _ => String::new(),
        };

        AppViewModel {
            project,
            delivery,
            untagged: catalog.untagged.clone(),
            tagged_count: catalog.tagged.len(),
            groups,
            review_choices,
            review_target: self.review_target().to_string(),
            prompt: self.prompt().to_string(),
            reply: self.reply().to_string(),
            clipboard_armed: self.clipboard().is_armed(),
            status_line,
            paths_line,
            status_notice: self.status_notice().map(str::to_string),
            notice_seq: self.notice_seq(),
            alert: self.alert().map(str::to_string),
        }
    }
}
