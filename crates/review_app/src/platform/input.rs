//! Parses stdin lines of the interactive session.

use review_core::{Msg, ParseTagError, Tag};
use thiserror::Error;

use super::app::{LocalCommand, LoopEvent};

/// Line that ends a multi-line `reply`.
pub const REPLY_TERMINATOR: &str = ".";

pub const USAGE: &str = "\
指令：
  select <專案> <交付>     切換專案與交付
  refresh                  重新整理檔案清單
  tag <檔名> <標籤>        標記檔案（標準 / 範本 / 待審）
  target <檔名>            選擇待審檔案
  prompt | copy | clear-prompt
  reply [文字]             設定回覆；不帶文字時逐行輸入，以單獨一行 . 結束
  clear-reply | export | export-clip
  clip on|off              自動監聽剪貼簿
  status | notebook | help | quit";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("未知指令：{0}")]
    Unknown(String),
    #[error("用法：{0}")]
    Usage(&'static str),
    #[error("{0}")]
    Tag(#[from] ParseTagError),
}

/// Line-oriented command parser; keeps the buffer of a multi-line reply.
#[derive(Debug, Default)]
pub struct CommandReader {
    reply: Option<Vec<String>>,
}

impl CommandReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_reply(&self) -> bool {
        self.reply.is_some()
    }

    /// `Ok(None)` for blank lines and lines consumed by a pending reply.
    pub fn feed(&mut self, line: &str) -> Result<Option<LoopEvent>, InputError> {
        if let Some(buffer) = self.reply.as_mut() {
            if line.trim_end() == REPLY_TERMINATOR {
                let text = buffer.join("\n");
                self.reply = None;
                return Ok(Some(Msg::ReplyEdited(text).into()));
            }
            buffer.push(line.to_string());
            return Ok(None);
        }

        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        let msg = match command {
            "select" => {
                let mut parts = rest.split_whitespace();
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(project), Some(delivery), None) => Msg::SelectionChanged {
                        project: project.to_string(),
                        delivery: delivery.to_string(),
                    },
                    _ => return Err(InputError::Usage("select <專案> <交付>")),
                }
            }
            "refresh" => Msg::RefreshClicked,
            "tag" => {
                // File names may contain spaces; the tag is the last word.
                let Some((filename, tag)) = rest.rsplit_once(char::is_whitespace) else {
                    return Err(InputError::Usage("tag <檔名> <標籤>"));
                };
                let tag: Tag = tag.parse()?;
                Msg::TagClicked {
                    filename: filename.trim().to_string(),
                    tag,
                }
            }
            "target" if !rest.is_empty() => Msg::ReviewTargetSelected(rest.to_string()),
            "target" => return Err(InputError::Usage("target <檔名>")),
            "prompt" => Msg::GeneratePromptClicked,
            "copy" => Msg::CopyPromptClicked,
            "clear-prompt" => Msg::ClearPromptClicked,
            "reply" if rest.is_empty() => {
                self.reply = Some(Vec::new());
                return Ok(None);
            }
            "reply" => Msg::ReplyEdited(rest.to_string()),
            "clear-reply" => Msg::ClearReplyClicked,
            "export" => Msg::ExportClicked,
            "export-clip" => Msg::ExportFromClipboardClicked,
            "clip" => match rest {
                "on" => Msg::ClipboardToggled(true),
                "off" => Msg::ClipboardToggled(false),
                _ => return Err(InputError::Usage("clip on|off")),
            },
            "help" => Msg::HelpClicked,
            "status" => return Ok(Some(LoopEvent::Local(LocalCommand::Status))),
            "notebook" => return Ok(Some(LoopEvent::Local(LocalCommand::Notebook))),
            "quit" | "exit" => Msg::ShutdownRequested,
            other => return Err(InputError::Unknown(other.to_string())),
        };
        Ok(Some(msg.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(line: &str) -> Result<Option<LoopEvent>, InputError> {
        CommandReader::new().feed(line)
    }

    fn msg(line: &str) -> Msg {
        match parse(line) {
            Ok(Some(LoopEvent::Core(msg))) => msg,
            other => panic!("{line:?} parsed to {other:?}"),
        }
    }

    #[test]
    fn tag_keeps_spaces_in_file_name() {
        assert_eq!(
            msg("tag 規格 說明 v2.pdf 範本"),
            Msg::TagClicked {
                filename: "規格 說明 v2.pdf".to_string(),
                tag: Tag::Template,
            }
        );
    }

    #[test]
    fn tag_rejects_unknown_label() {
        assert!(matches!(parse("tag a.pdf urgent"), Err(InputError::Tag(_))));
        assert_eq!(
            parse("tag a.pdf").unwrap_err(),
            InputError::Usage("tag <檔名> <標籤>")
        );
    }

    #[test]
    fn select_needs_two_words() {
        assert_eq!(
            msg("select 【雲端案】 【契約交付】"),
            Msg::SelectionChanged {
                project: "【雲端案】".to_string(),
                delivery: "【契約交付】".to_string(),
            }
        );
        assert!(parse("select 【雲端案】").is_err());
    }

    #[test]
    fn multi_line_reply_ends_at_terminator() {
        let mut reader = CommandReader::new();
        assert_eq!(reader.feed("reply").unwrap(), None);
        assert!(reader.in_reply());
        assert_eq!(reader.feed("- risk A").unwrap(), None);
        assert_eq!(reader.feed("finding B").unwrap(), None);
        assert_eq!(
            reader.feed(".").unwrap(),
            Some(LoopEvent::Core(Msg::ReplyEdited(
                "- risk A\nfinding B".to_string()
            )))
        );
        assert!(!reader.in_reply());
    }

    #[test]
    fn simple_commands() {
        assert_eq!(msg("clip on"), Msg::ClipboardToggled(true));
        assert_eq!(msg("export-clip"), Msg::ExportFromClipboardClicked);
        assert_eq!(msg("quit"), Msg::ShutdownRequested);
        assert_eq!(
            parse("status").unwrap(),
            Some(LoopEvent::Local(LocalCommand::Status))
        );
        assert_eq!(parse("   ").unwrap(), None);
        assert_eq!(
            parse("frobnicate").unwrap_err(),
            InputError::Unknown("frobnicate".to_string())
        );
    }
}
