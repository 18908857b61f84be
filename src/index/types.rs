use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of an entry within the loaded sequence; wide enough for any `usize` position
pub type EntryId = u64;

/// Kind of documentation fragment an entry describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// A navigable heading within a page
    Section,
    /// A body-text block belonging to a page
    Page,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Section, Category::Page];

    /// Parse the tag used in generated indexes. Matching is exact.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "section" => Some(Category::Section),
            "page" => Some(Category::Page),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Section => "section",
            Category::Page => "page",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry as emitted by the documentation generator, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    pub title: String,
    pub location: String,
    pub category: String,
    pub text: String,
    pub page: String,
}

impl RawEntry {
    pub fn new(
        title: impl Into<String>,
        location: impl Into<String>,
        category: impl Into<String>,
        text: impl Into<String>,
        page: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            location: location.into(),
            category: category.into(),
            text: text.into(),
            page: page.into(),
        }
    }
}

/// Validated documentation fragment held by an [`IndexStore`](super::IndexStore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub title: String,
    /// Anchor relative to the documentation root; empty for the page root
    pub location: String,
    pub category: Category,
    /// Searchable content; empty for bare section headers
    pub text: String,
    /// Title of the top-level page this fragment belongs to
    pub page: String,
}

impl IndexEntry {
    pub fn is_section(&self) -> bool {
        self.category == Category::Section
    }
}

/// Summary counts over a loaded store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub entry_count: usize,
    pub page_count: usize,
    pub section_count: usize,
    pub page_entry_count: usize,
    pub empty_text_count: usize,
}
