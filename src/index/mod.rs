pub mod error;
pub mod loader;
pub mod snapshot;
pub mod stats;
pub mod store;
pub mod types;

pub use error::{InvalidEntryError, LoadError};
pub use loader::{load_index_file, load_index_source, parse_index_source};
pub use snapshot::SharedIndex;
pub use store::IndexStore;
pub use types::*;
