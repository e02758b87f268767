use std::path::{Path, PathBuf};

/// A (project, delivery) selection. Both parts are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    project: String,
    delivery: String,
}

impl Scope {
    pub fn new(project: impl Into<String>, delivery: impl Into<String>) -> Option<Self> {
        let project = project.into();
        let delivery = delivery.into();
        if project.trim().is_empty() || delivery.trim().is_empty() {
            return None;
        }
        Some(Self { project, delivery })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn delivery(&self) -> &str {
        &self.delivery
    }
}

/// Maps a scope to `<base>/<project>/<delivery>/{input,output}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    base_path: PathBuf,
    input_folder: String,
    output_folder: String,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(PathBuf::from("."), "input", "output")
    }
}

impl PathResolver {
    pub fn new(
        base_path: impl Into<PathBuf>,
        input_folder: impl Into<String>,
        output_folder: impl Into<String>,
    ) -> Self {
        Self {
            base_path: base_path.into(),
            input_folder: input_folder.into(),
            output_folder: output_folder.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Same folder names rooted somewhere else; used by the startup fallback.
    pub fn with_base(&self, base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            ..self.clone()
        }
    }

    pub fn project_root(&self, scope: &Scope) -> PathBuf {
        self.base_path.join(&scope.project).join(&scope.delivery)
    }

    pub fn input_dir(&self, scope: &Scope) -> PathBuf {
        self.project_root(scope).join(&self.input_folder)
    }

    pub fn output_dir(&self, scope: &Scope) -> PathBuf {
        self.project_root(scope).join(&self.output_folder)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.base_path.join("logs")
    }
}

/// Shortens `path` to at most `max_len` characters as `head...tail`.
pub fn shorten_path(path: &str, max_len: usize) -> String {
    let chars: Vec<char> = path.chars().collect();
    if chars.len() <= max_len {
        return path.to_string();
    }
    let head = (max_len / 2).saturating_sub(2);
    let tail = max_len.saturating_sub(head + 3);
    let head_part: String = chars[..head].iter().collect();
    let tail_part: String = chars[chars.len() - tail..].iter().collect();
    format!("{head_part}...{tail_part}")
}
