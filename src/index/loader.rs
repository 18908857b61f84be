//! Reading generator output into an [`IndexStore`].
//!
//! Documenter writes its search data as a JavaScript assignment:
//!
//! ```text
//! var documenterSearchIndex = {"docs": [
//!     {"title": "...", "location": "...", "category": "section", "text": "", "page": "..."},
//!     ...
//! ]}
//! ```
//!
//! The same payload as plain JSON, with or without the `docs` wrapper, is
//! accepted as well.

use crate::index::error::LoadError;
use crate::index::store::IndexStore;
use crate::index::types::RawEntry;
use ignore::WalkBuilder;
use memmap2::Mmap;
use regex::Regex;
use serde_json::Value;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

/// File name the generator uses for the search index
pub const INDEX_FILE_NAME: &str = "search_index.js";

fn assignment_prefix() -> &'static Regex {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    PREFIX.get_or_init(|| {
        Regex::new(r"^\s*(?:(?:var|let|const)\s+)?(?:window\.)?documenterSearchIndex\s*=\s*")
            .expect("assignment pattern is valid")
    })
}

/// Strip the JavaScript assignment around the JSON payload, if present
fn json_payload(source: &str) -> &str {
    let body = match assignment_prefix().find(source) {
        Some(m) => &source[m.end()..],
        None => source,
    };
    let body = body.trim_end();
    body.strip_suffix(';').unwrap_or(body)
}

/// Parse serialized index data into unvalidated records
pub fn parse_index_source(source: &str) -> Result<Vec<RawEntry>, LoadError> {
    let value: Value = serde_json::from_str(json_payload(source))?;

    let docs = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => map.remove("docs").ok_or(LoadError::MissingDocs)?,
        _ => return Err(LoadError::MissingDocs),
    };
    if !docs.is_array() {
        return Err(LoadError::MissingDocs);
    }

    Ok(serde_json::from_value(docs)?)
}

/// Parse and validate serialized index data
pub fn load_index_source(source: &str) -> Result<IndexStore, LoadError> {
    let entries = parse_index_source(source)?;
    Ok(IndexStore::load(entries)?)
}

/// Load an index file from disk
pub fn load_index_file(path: &Path) -> Result<IndexStore, LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    // SAFETY: the map is read once and dropped before returning
    let mmap = unsafe { Mmap::map(&file) }.map_err(io_err)?;
    let source = std::str::from_utf8(&mmap)?;

    let store = load_index_source(source)?;
    debug!(path = %path.display(), entries = store.len(), "loaded index file");
    Ok(store)
}

/// Find every generated search index below `root`, sorted by path
pub fn discover_index_files(root: &Path) -> Vec<PathBuf> {
    if root.is_file() {
        return vec![root.to_path_buf()];
    }

    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !matches!(name.as_ref(), ".git" | "node_modules" | "target")
        })
        .build();

    let mut found: Vec<PathBuf> = walker
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .filter(|entry| entry.file_name() == INDEX_FILE_NAME)
        .map(|entry| entry.into_path())
        .collect();

    found.sort();
    found
}

/// Resolve a user-supplied path (file or documentation build directory) to one index file
pub fn resolve_index_path(path: &Path) -> Result<PathBuf, LoadError> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    let direct = path.join(INDEX_FILE_NAME);
    if direct.is_file() {
        return Ok(direct);
    }

    let mut found = discover_index_files(path);
    if found.len() > 1 {
        warn!(
            count = found.len(),
            using = %found[0].display(),
            "multiple search indexes found"
        );
    }
    if found.is_empty() {
        return Err(LoadError::Io {
            path: direct,
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no search index found"),
        });
    }
    Ok(found.swap_remove(0))
}
