use crate::index::types::{Category, IndexEntry};
use globset::{Glob, GlobMatcher};

/// Narrowing applied on top of the substring match
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Only keep entries of this category
    pub category: Option<Category>,
    /// Only keep entries whose page name matches this glob
    pub page: Option<GlobMatcher>,
    /// Maximum number of results; `None` means unbounded
    pub limit: Option<usize>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Restrict to pages matching `pattern` (e.g. `API*`)
    pub fn with_page_glob(mut self, pattern: &str) -> Result<Self, globset::Error> {
        self.page = Some(Glob::new(pattern)?.compile_matcher());
        Ok(self)
    }

    /// A limit of 0 means unbounded
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = (limit > 0).then_some(limit);
        self
    }

    /// Check the non-text filters against an entry
    #[inline]
    pub fn accepts(&self, entry: &IndexEntry) -> bool {
        if let Some(category) = self.category {
            if entry.category != category {
                return false;
            }
        }
        if let Some(page) = &self.page {
            if !page.is_match(&entry.page) {
                return false;
            }
        }
        true
    }
}
