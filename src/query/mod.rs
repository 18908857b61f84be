pub mod filter;
pub mod matcher;

pub use filter::SearchOptions;
pub use matcher::{fold, Matcher};
