//! # docsift - Documentation Search Index Lookup
//!
//! docsift loads the search index a documentation generator writes next to
//! its HTML output (`search_index.js`) and answers text queries against it.
//!
//! ## Architecture
//!
//! - [`index`] - Entry types, the immutable [`IndexStore`](index::IndexStore),
//!   snapshot publication and the file loader
//! - [`query`] - Case-insensitive matching and result filters
//! - [`output`] - Terminal and JSON result formatting
//! - [`utils`] - Configuration
//!
//! ## Quick Start
//!
//! ```
//! use docsift::index::{IndexStore, RawEntry};
//!
//! let store = IndexStore::load(vec![
//!     RawEntry::new("Installation", "#Installation", "section", "", "Doc"),
//!     RawEntry::new("Doc", "", "page", "using Pkg; Pkg.add(\"X\")", "Doc"),
//! ])
//! .unwrap();
//!
//! assert_eq!(store.search("pkg").len(), 1);
//! assert_eq!(store.by_page("Doc").len(), 2);
//! ```
//!
//! ## Reloading
//!
//! A store never changes after it is built. When the documentation is
//! regenerated, build a new store and install it through
//! [`SharedIndex`](index::SharedIndex); readers holding the old snapshot
//! finish against it undisturbed.

pub mod index;
pub mod output;
pub mod query;
pub mod utils;
