use crate::index::store::IndexStore;
use std::io::{self, Write};
use std::path::Path;

/// Display index statistics
pub fn show_stats(store: &IndexStore, index_path: &Path) -> io::Result<()> {
    let stdout = io::stdout();
    write_stats(&mut stdout.lock(), store, index_path)
}

pub fn write_stats<W: Write>(out: &mut W, store: &IndexStore, index_path: &Path) -> io::Result<()> {
    let stats = store.stats();

    writeln!(out, "Index Statistics")?;
    writeln!(out, "================")?;
    writeln!(out)?;
    writeln!(out, "Index file:       {}", index_path.display())?;
    writeln!(out, "Entries:          {}", stats.entry_count)?;
    writeln!(out, "Pages:            {}", stats.page_count)?;
    writeln!(out, "Section entries:  {}", stats.section_count)?;
    writeln!(out, "Page entries:     {}", stats.page_entry_count)?;
    writeln!(out, "Empty text:       {}", stats.empty_text_count)?;

    let pages = store.pages();
    if !pages.is_empty() {
        writeln!(out)?;
        writeln!(out, "Entries by page:")?;
        for page in pages.iter().take(15) {
            writeln!(out, "  {:30} {}", page, store.by_page(page).len())?;
        }
        if pages.len() > 15 {
            writeln!(out, "  ... and {} more", pages.len() - 15)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::RawEntry;

    #[test]
    fn test_write_stats() {
        let store = IndexStore::load(vec![
            RawEntry::new("Installation", "#Installation", "section", "", "Doc"),
            RawEntry::new("Doc", "", "page", "using Pkg", "Doc"),
            RawEntry::new("API", "api/", "page", "Modules", "API"),
        ])
        .unwrap();

        let mut out = Vec::new();
        write_stats(&mut out, &store, Path::new("build/search_index.js")).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Entries:          3"));
        assert!(text.contains("Pages:            2"));
        assert!(text.contains("Section entries:  1"));
        assert!(text.contains("Empty text:       1"));
        assert!(text.lines().any(|l| l.trim_start().starts_with("Doc") && l.ends_with(" 2")));
    }
}
