#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Arbitrary text must either load or produce an error, never panic
    if let Ok(store) = docsift::index::load_index_source(data) {
        let _ = store.stats();
        for page in store.pages() {
            let _ = store.by_page(page);
        }
    }
});
