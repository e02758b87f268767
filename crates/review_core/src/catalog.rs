use crate::Tag;

/// Lock files left by office suites, hidden files and temp artifacts never
/// show up in a catalog.
pub fn is_skip_file(name: &str) -> bool {
    name.starts_with("~$") || name.starts_with('.') || name.ends_with(".tmp")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub tag: Option<Tag>,
}

impl FileEntry {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let tag = Tag::classify(&name);
        Self { name, tag }
    }

    pub fn is_skip(&self) -> bool {
        is_skip_file(&self.name)
    }
}

/// Tagged/untagged partition of one input directory, both sides sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    pub tagged: Vec<String>,
    pub untagged: Vec<String>,
}

impl Catalog {
    /// Builds a catalog from raw directory entry names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Catalog::default();
        for entry in names.into_iter().map(FileEntry::new) {
            if entry.is_skip() {
                continue;
            }
            if entry.tag.is_some() {
                catalog.tagged.push(entry.name);
            } else {
                catalog.untagged.push(entry.name);
            }
        }
        catalog.tagged.sort();
        catalog.untagged.sort();
        catalog
    }

    /// Tagged names carrying `tag`, in catalog order.
    pub fn with_tag(&self, tag: Tag) -> Vec<String> {
        self.tagged
            .iter()
            .filter(|name| name.starts_with(tag.prefix()))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tagged.len() + self.untagged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
