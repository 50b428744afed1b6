pub mod analyzer;
pub mod cache;
pub mod error;
pub mod search;

pub use cache::{fingerprint, CacheSource, CacheStore, Fetch, LoadStatus};
pub use error::*;
pub use search::{search_hashtag, SearchOutcome, SearchSettings};
