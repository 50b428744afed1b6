use hashtag_util::build_params;
use search_client::{SEARCH_API, SEARCH_API_DEFAULT_COUNT};

use crate::analyzer::cooccurring_hashtags;
use crate::cache::{CacheSource, CacheStore, Fetch};
use crate::error::Result;

/// Fixed parts of every search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub endpoint: String,
    pub count: u32,
    /// `mixed`, `recent` or `popular`. Left to the API default when unset.
    pub result_type: Option<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: SEARCH_API.to_string(),
            count: SEARCH_API_DEFAULT_COUNT,
            result_type: None,
        }
    }
}

impl SearchSettings {
    pub fn params(&self, hashtag: &str) -> Vec<(String, String)> {
        let result_type = self.result_type.as_deref();
        build_params! {
            required q => hashtag,
            required count => self.count,
            optional result_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub hashtag: String,
    pub source: CacheSource,
    pub cooccurring: Vec<String>,
}

/// Search tweets for `hashtag` (including its marker) through the cache, and rank the hashtags that appear
/// alongside it.
pub async fn search_hashtag<F>(
    store: &mut CacheStore,
    fetcher: &F,
    settings: &SearchSettings,
    hashtag: &str,
) -> Result<SearchOutcome>
where
    F: Fetch + ?Sized,
{
    let params = settings.params(hashtag);
    let (body, source) = store.fetch_with_cache(fetcher, &settings.endpoint, &params).await?;
    let cooccurring = cooccurring_hashtags(&body, hashtag)?;
    tracing::info!("Hashtags co-occurring with {}: {:?}", hashtag, cooccurring);
    Ok(SearchOutcome {
        hashtag: hashtag.to_string(),
        source,
        cooccurring,
    })
}
