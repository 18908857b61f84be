//! Error types for loading documentation indexes.

use std::path::PathBuf;
use thiserror::Error;

/// An entry carried a category tag outside the allowed set.
///
/// `position` is the zero-based index of the first offending entry in the
/// sequence passed to [`IndexStore::load`](super::IndexStore::load).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid entry at position {position}: unknown category \"{category}\"")]
pub struct InvalidEntryError {
    pub position: usize,
    pub category: String,
}

/// Failure while reading serialized index data from disk or text.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("index data is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("malformed index data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("index data has no \"docs\" array")]
    MissingDocs,

    #[error(transparent)]
    InvalidEntry(#[from] InvalidEntryError),
}
