//! The loaded, read-only documentation index.

use crate::index::error::InvalidEntryError;
use crate::index::types::*;
use crate::query::{fold, Matcher, SearchOptions};
use roaring::RoaringTreemap;
use rustc_hash::FxHashMap;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Store size at which `search` starts scanning in parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Lowercased copies of the searchable fields of one entry
#[derive(Debug)]
struct FoldedText {
    title: String,
    text: String,
}

/// Immutable snapshot of a documentation search index.
///
/// Built once by [`IndexStore::load`] and never modified afterwards; every
/// query returns entries in the order they were loaded.
#[derive(Debug)]
pub struct IndexStore {
    entries: Vec<IndexEntry>,
    folded: Vec<FoldedText>,
    /// Page name -> ids of its entries
    page_postings: FxHashMap<String, RoaringTreemap>,
    /// Distinct page names in order of first appearance
    page_order: Vec<String>,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    parallel_threshold: usize,
}

impl IndexStore {
    /// Validate and index a sequence of generator records.
    ///
    /// Fails on the first entry whose category is not a known tag.
    pub fn load<I>(entries: I) -> Result<Self, InvalidEntryError>
    where
        I: IntoIterator<Item = RawEntry>,
    {
        let iter = entries.into_iter();
        let (lower, _) = iter.size_hint();

        let mut validated = Vec::with_capacity(lower);
        let mut folded = Vec::with_capacity(lower);
        let mut page_postings: FxHashMap<String, RoaringTreemap> = FxHashMap::default();
        let mut page_order = Vec::new();

        for (position, raw) in iter.enumerate() {
            let category = Category::from_tag(&raw.category).ok_or_else(|| InvalidEntryError {
                position,
                category: raw.category.clone(),
            })?;

            // usize -> u64 is lossless, so postings never alias positions
            let id = position as EntryId;
            if !page_postings.contains_key(&raw.page) {
                page_order.push(raw.page.clone());
            }
            page_postings.entry(raw.page.clone()).or_default().insert(id);

            folded.push(FoldedText {
                title: fold(&raw.title),
                text: fold(&raw.text),
            });
            validated.push(IndexEntry {
                title: raw.title,
                location: raw.location,
                category,
                text: raw.text,
                page: raw.page,
            });
        }

        debug!(
            entries = validated.len(),
            pages = page_order.len(),
            "loaded index store"
        );

        Ok(Self {
            entries: validated,
            folded,
            page_postings,
            page_order,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        })
    }

    /// Override the store size at which searches scan in parallel
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    /// Entries whose title or text contains `query`, ignoring case.
    ///
    /// Blank queries match nothing.
    pub fn search(&self, query: &str) -> Vec<&IndexEntry> {
        self.search_with(query, &SearchOptions::default())
    }

    /// [`search`](Self::search) narrowed by category, page glob and limit
    pub fn search_with(&self, query: &str, options: &SearchOptions) -> Vec<&IndexEntry> {
        let Some(matcher) = Matcher::new(query) else {
            return Vec::new();
        };

        self.matching_ids(&matcher, options)
            .into_iter()
            .map(|id| &self.entries[id])
            .collect()
    }

    /// Entries of one page, in load order. The name must match exactly.
    pub fn by_page(&self, page: &str) -> Vec<&IndexEntry> {
        match self.page_postings.get(page) {
            Some(bitmap) => bitmap.iter().map(|id| &self.entries[id as usize]).collect(),
            None => Vec::new(),
        }
    }

    /// Distinct page names in order of first appearance
    pub fn pages(&self) -> Vec<&str> {
        self.page_order.iter().map(String::as_str).collect()
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn get(&self, position: usize) -> Option<&IndexEntry> {
        self.entries.get(position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        let section_count = self.entries.iter().filter(|e| e.is_section()).count();
        IndexStats {
            entry_count: self.entries.len(),
            page_count: self.page_order.len(),
            section_count,
            page_entry_count: self.entries.len() - section_count,
            empty_text_count: self.entries.iter().filter(|e| e.text.is_empty()).count(),
        }
    }

    fn is_hit(&self, id: usize, matcher: &Matcher, options: &SearchOptions) -> bool {
        let folded = &self.folded[id];
        options.accepts(&self.entries[id])
            && (matcher.is_match(&folded.title) || matcher.is_match(&folded.text))
    }

    fn matching_ids(&self, matcher: &Matcher, options: &SearchOptions) -> Vec<usize> {
        #[cfg(feature = "parallel")]
        {
            if self.entries.len() >= self.parallel_threshold {
                // Collecting an indexed range keeps load order
                let mut ids: Vec<usize> = (0..self.entries.len())
                    .into_par_iter()
                    .filter(|&id| self.is_hit(id, matcher, options))
                    .collect();
                if let Some(limit) = options.limit {
                    ids.truncate(limit);
                }
                return ids;
            }
        }

        let hits = (0..self.entries.len()).filter(|&id| self.is_hit(id, matcher, options));
        match options.limit {
            Some(limit) => hits.take(limit).collect(),
            None => hits.collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, location: &str, category: &str, text: &str, page: &str) -> RawEntry {
        RawEntry::new(title, location, category, text, page)
    }

    fn doc_entries() -> Vec<RawEntry> {
        vec![
            raw("Installation", "#Installation", "section", "", "Doc"),
            raw("Doc", "", "page", "using Pkg; Pkg.add(\"X\")", "Doc"),
        ]
    }

    fn titles<'a>(entries: &[&'a IndexEntry]) -> Vec<&'a str> {
        entries.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_end_to_end_example() {
        let store = IndexStore::load(doc_entries()).unwrap();

        let hits = store.search("pkg");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Doc");
        assert_eq!(hits[0].category, Category::Page);

        let hits = store.search("installation");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].location, "#Installation");

        let page = store.by_page("Doc");
        assert_eq!(titles(&page), vec!["Installation", "Doc"]);
    }

    #[test]
    fn test_invalid_category_names_position() {
        let mut entries = doc_entries();
        entries.push(raw("Bad", "", "docstring", "", "Doc"));
        entries.push(raw("Worse", "", "other", "", "Doc"));

        let err = IndexStore::load(entries).unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.category, "docstring");
    }

    #[test]
    fn test_category_is_case_sensitive() {
        let err = IndexStore::load(vec![raw("A", "", "Section", "", "A")]).unwrap_err();
        assert_eq!(err.position, 0);
    }

    #[test]
    fn test_blank_queries_return_nothing() {
        let store = IndexStore::load(doc_entries()).unwrap();
        assert!(store.search("").is_empty());
        assert!(store.search("   ").is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let store = IndexStore::load(vec![raw("Intro", "", "page", "Getting Started", "Intro")]).unwrap();
        assert_eq!(store.search("started").len(), 1);
        assert_eq!(store.search("GETTING").len(), 1);
        assert!(store.search("stopped").is_empty());
    }

    #[test]
    fn test_search_unicode_case_folding() {
        let store = IndexStore::load(vec![
            raw("Doc", "", "page", "ΟΔΟΣ", "Doc"),
            raw("Über Julia", "#Über", "section", "", "Doc"),
            raw("Doc", "", "page", "Η Συνάρτηση Σ επιστρέφει", "Doc"),
        ])
        .unwrap();

        // Σ folds to σ wherever it stands, including word-final
        assert_eq!(titles(&store.search("ΟΔΟΣ")).len(), 1);
        assert_eq!(store.search("Σ").len(), 2);
        assert_eq!(store.search("οδοσ").len(), 1);
        assert_eq!(store.search("οδοσ")[0].text, "ΟΔΟΣ");

        assert_eq!(store.search("über")[0].location, "#Über");
        assert_eq!(store.search("ÜBER").len(), 1);

        // Verbatim substring of mixed-case Greek text
        let hits = store.search("Συνάρτηση Σ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "Η Συνάρτηση Σ επιστρέφει");
        assert_eq!(store.search("συνάρτηση σ").len(), 1);
    }

    #[test]
    fn test_by_page_groups_in_load_order() {
        let store = IndexStore::load(vec![
            raw("one", "", "page", "", "A"),
            raw("two", "", "page", "", "B"),
            raw("three", "", "page", "", "A"),
        ])
        .unwrap();

        assert_eq!(titles(&store.by_page("A")), vec!["one", "three"]);
        assert_eq!(titles(&store.by_page("B")), vec!["two"]);
        assert!(store.by_page("a").is_empty());
        assert!(store.by_page("C").is_empty());
        assert_eq!(store.pages(), vec!["A", "B"]);
    }

    #[test]
    fn test_duplicate_locations_tolerated() {
        let store = IndexStore::load(vec![
            raw("Doc", "", "page", "first", "Doc"),
            raw("Doc", "", "page", "second", "Doc"),
        ])
        .unwrap();
        assert_eq!(store.search("doc").len(), 2);
    }

    #[test]
    fn test_load_twice_is_idempotent() {
        let a = IndexStore::load(doc_entries()).unwrap();
        let b = IndexStore::load(doc_entries()).unwrap();

        for query in ["pkg", "doc", "installation", "x", "", "missing"] {
            assert_eq!(a.search(query), b.search(query));
        }
        assert_eq!(a.by_page("Doc"), b.by_page("Doc"));
        assert_eq!(a.stats(), b.stats());
    }

    #[test]
    fn test_search_with_options() {
        let store = IndexStore::load(vec![
            raw("API Reference", "api/#API", "section", "", "API Reference"),
            raw("API Reference", "api/", "page", "Modules = [X]", "API Reference"),
            raw("API Reference", "#API", "section", "", "Home"),
        ])
        .unwrap();

        let sections = SearchOptions::new().with_category(Category::Section);
        assert_eq!(store.search_with("api", &sections).len(), 2);

        let api_pages = SearchOptions::new().with_page_glob("API*").unwrap();
        assert_eq!(store.search_with("api", &api_pages).len(), 2);

        let first = SearchOptions::new().with_limit(1);
        let hits = store.search_with("api", &first);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].location, "api/#API");
    }

    #[test]
    fn test_parallel_scan_matches_sequential() {
        let entries: Vec<RawEntry> = (0..500)
            .map(|i| {
                let text = if i % 7 == 0 { format!("Feature {i}") } else { format!("other {i}") };
                raw(&format!("T{i}"), "", "page", &text, &format!("P{}", i % 3))
            })
            .collect();

        let sequential = IndexStore::load(entries.clone()).unwrap();
        let parallel = IndexStore::load(entries).unwrap().with_parallel_threshold(1);

        let a = sequential.search("feature");
        let b = parallel.search("feature");
        assert_eq!(a.len(), 72);
        assert_eq!(a, b);

        let limited = SearchOptions::new().with_limit(3);
        assert_eq!(
            sequential.search_with("feature", &limited),
            parallel.search_with("feature", &limited)
        );
    }

    #[test]
    fn test_stats() {
        let store = IndexStore::load(doc_entries()).unwrap();
        let stats = store.stats();
        assert_eq!(stats.entry_count, 2);
        assert_eq!(stats.page_count, 1);
        assert_eq!(stats.section_count, 1);
        assert_eq!(stats.page_entry_count, 1);
        assert_eq!(stats.empty_text_count, 1);
    }

    #[test]
    fn test_empty_store() {
        let store = IndexStore::load(Vec::<RawEntry>::new()).unwrap();
        assert!(store.is_empty());
        assert!(store.search("anything").is_empty());
        assert!(store.pages().is_empty());
        assert_eq!(store.get(0), None);
    }
}
