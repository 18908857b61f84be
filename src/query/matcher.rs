use memchr::memmem;
use std::ops::Range;

/// Fold text for case-insensitive comparison.
///
/// Lowercases one char at a time without context, so a letter folds the
/// same way in a query as in the text it is searched in (`Σ` is always `σ`).
#[inline]
pub fn fold(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Case-insensitive substring matcher over pre-folded haystacks
pub struct Matcher {
    needle: String,
    finder: memmem::Finder<'static>,
}

impl Matcher {
    /// Build a matcher for `query`.
    ///
    /// Returns `None` for empty or whitespace-only queries, which match nothing.
    pub fn new(query: &str) -> Option<Self> {
        if query.trim().is_empty() {
            return None;
        }

        let needle = fold(query);
        let finder = memmem::Finder::new(needle.as_bytes()).into_owned();
        Some(Self { needle, finder })
    }

    /// Check a haystack that has already been passed through [`fold`]
    #[inline]
    pub fn is_match(&self, folded: &str) -> bool {
        self.finder.find(folded.as_bytes()).is_some()
    }

    /// Byte range of the first match inside the original (unfolded) text.
    ///
    /// Lowercasing can change byte lengths outside ASCII, so offsets found in
    /// the folded haystack do not carry over; this walks char boundaries of
    /// the original instead.
    pub fn find_span(&self, original: &str) -> Option<Range<usize>> {
        if original.is_ascii() {
            let folded = original.to_ascii_lowercase();
            return self
                .finder
                .find(folded.as_bytes())
                .map(|start| start..start + self.needle.len());
        }

        for (start, _) in original.char_indices() {
            if let Some(end) = self.match_at(original, start) {
                return Some(start..end);
            }
        }
        None
    }

    fn match_at(&self, original: &str, start: usize) -> Option<usize> {
        let mut remaining = self.needle.as_str();
        for (offset, ch) in original[start..].char_indices() {
            for lower in ch.to_lowercase() {
                remaining = remaining.strip_prefix(lower)?;
            }
            if remaining.is_empty() {
                return Some(start + offset + ch.len_utf8());
            }
        }
        None
    }
}
