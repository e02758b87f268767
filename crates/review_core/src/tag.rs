use std::fmt;
use std::str::FromStr;

/// Review status carried as a filename prefix.
///
/// Declaration order is the matching priority used by [`Tag::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    Standard,
    Template,
    Review,
}

/// Button colors used by front ends when rendering a tag action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagColors {
    pub background: &'static str,
    pub hover: &'static str,
    pub text: &'static str,
}

impl Tag {
    pub const ALL: [Tag; 3] = [Tag::Standard, Tag::Template, Tag::Review];

    pub fn prefix(self) -> &'static str {
        match self {
            Tag::Standard => "【標準】",
            Tag::Template => "【範本】",
            Tag::Review => "【待審】",
        }
    }

    /// Heading used when listing tagged files grouped by tag.
    pub fn group_title(self) -> &'static str {
        match self {
            Tag::Standard => "標準文件",
            Tag::Template => "範本文件",
            Tag::Review => "待審文件",
        }
    }

    pub fn colors(self) -> TagColors {
        match self {
            Tag::Standard => TagColors {
                background: "#e6f0ff",
                hover: "#d6e7ff",
                text: "#007aff",
            },
            Tag::Template => TagColors {
                background: "#eaf7ef",
                hover: "#dff2e7",
                text: "#34c759",
            },
            Tag::Review => TagColors {
                background: "#fdecea",
                hover: "#fbd9d6",
                text: "#ff3b30",
            },
        }
    }

    /// Returns the first tag whose prefix starts `name`.
    pub fn classify(name: &str) -> Option<Tag> {
        Tag::ALL
            .into_iter()
            .find(|tag| name.starts_with(tag.prefix()))
    }

    /// Prepends this tag's prefix to `name`.
    pub fn apply(self, name: &str) -> String {
        format!("{}{}", self.prefix(), name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTagError(String);

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown tag {:?} (expected 標準, 範本, 待審 or standard, template, review)",
            self.0
        )
    }
}

impl std::error::Error for ParseTagError {}

impl FromStr for Tag {
    type Err = ParseTagError;

    /// Accepts the full prefix, the bare label, or an English alias.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let bare = trimmed.trim_start_matches('【').trim_end_matches('】');
        match bare.to_ascii_lowercase().as_str() {
            "標準" | "standard" | "std" => Ok(Tag::Standard),
            "範本" | "template" | "tpl" => Ok(Tag::Template),
            "待審" | "review" | "rev" => Ok(Tag::Review),
            _ => Err(ParseTagError(trimmed.to_string())),
        }
    }
}
