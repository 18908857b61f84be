#![no_main]

use docsift::index::{IndexStore, RawEntry};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (String, String, String)| {
    let (query, title, text) = input;
    let store = IndexStore::load(vec![RawEntry::new(title.clone(), "", "page", text.clone(), "P")])
        .expect("valid category");

    // A blank query never matches; any hit must really contain the query
    let hits = store.search(&query);
    if query.trim().is_empty() {
        assert!(hits.is_empty());
    }
    let needle = docsift::query::fold(&query);
    for hit in hits {
        assert!(
            docsift::query::fold(&hit.title).contains(&needle)
                || docsift::query::fold(&hit.text).contains(&needle)
        );
    }

    // Highlight spans must land on char boundaries
    if let Some(matcher) = docsift::query::Matcher::new(&query) {
        if let Some(span) = matcher.find_span(&text) {
            let _ = &text[span];
        }
    }
});
