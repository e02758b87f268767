use std::fmt;

/// Failure of a user- or background-triggered action, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Source file vanished before it could be tagged.
    NotFound,
    /// A file with the tagged name already exists.
    Conflict,
    /// The file is locked by another process.
    Busy,
    /// No 【待審】 file is selected.
    NoTarget,
    /// Nothing to export.
    EmptyContent,
    /// Nothing to copy.
    EmptyPrompt,
    /// Clipboard holds no text.
    EmptyClipboard,
    /// The document writer failed.
    ExportFailure(String),
    /// A folder could not be created or written.
    DirectoryUnwritable(String),
    /// Clipboard access failed.
    Clipboard(String),
    /// Any other filesystem failure, with the underlying message.
    Io(String),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::NotFound => write!(f, "檔案不存在"),
            ActionError::Conflict => write!(f, "目標檔名已存在"),
            ActionError::Busy => write!(f, "檔案被佔用，請關閉後再試"),
            ActionError::NoTarget => write!(f, "沒有選擇待審檔案"),
            ActionError::EmptyContent => write!(f, "回覆內容是空的"),
            ActionError::EmptyPrompt => write!(f, "提示詞是空的"),
            ActionError::EmptyClipboard => write!(f, "剪貼簿沒有文字內容"),
            ActionError::ExportFailure(msg) => write!(f, "Word 輸出失敗：{msg}"),
            ActionError::DirectoryUnwritable(path) => write!(f, "資料夾無法寫入：{path}"),
            ActionError::Clipboard(msg) => write!(f, "剪貼簿存取失敗：{msg}"),
            ActionError::Io(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ActionError {}
