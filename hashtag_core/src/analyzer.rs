use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use hashtag_util::HASHTAG_MARKER;
use search_client::SearchResponse;

use crate::error::{Error, Result};

/// Number of co-occurring hashtags reported for a query.
pub const TOP_HASHTAG_COUNT: usize = 3;

lazy_static! {
    // A marker followed by zero or more ASCII letters or digits, so a lone `#` matches too.
    static ref HASHTAG: Regex = Regex::new(r"#[A-Za-z0-9]*").unwrap();
}

/// Every hashtag token in `text`, lowercased and with its marker. Lone markers are included.
pub fn extract_hashtags(text: &str) -> impl Iterator<Item = String> + '_ {
    HASHTAG.find_iter(text).map(|m| m.as_str().to_lowercase())
}

/// Count hashtags across all texts, leaving out `ignored_hashtag` and lone markers.
/// Sorted by descending count; equal counts keep the order in which the hashtags were first seen.
pub fn count_hashtags<'a, I>(texts: I, ignored_hashtag: &str) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let ignored_hashtag = ignored_hashtag.to_lowercase();
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for tag in texts.into_iter().flat_map(extract_hashtags) {
        if tag == ignored_hashtag || is_bare_marker(&tag) {
            continue;
        }
        match positions.get(&tag) {
            Some(&i) => counts[i].1 += 1,
            None => {
                positions.insert(tag.clone(), counts.len());
                counts.push((tag, 1));
            }
        }
    }

    // Stable, so ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// The `limit` most frequent hashtags co-occurring with `ignored_hashtag`, without their marker.
pub fn top_cooccurring<'a, I>(texts: I, ignored_hashtag: &str, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    count_hashtags(texts, ignored_hashtag)
        .into_iter()
        .take(limit)
        .map(|(tag, _)| tag.trim_start_matches(HASHTAG_MARKER).to_string())
        .collect()
}

/// Top co-occurring hashtags of a raw search response body.
/// Statuses without a usable `text` are skipped; a body without `statuses` is an error.
pub fn cooccurring_hashtags(body: &Value, ignored_hashtag: &str) -> Result<Vec<String>> {
    let response = SearchResponse::deserialize(body).map_err(|e| Error::InvalidResponse(e.to_string()))?;
    tracing::debug!("Counting hashtags in {} statuses", response.statuses.len());
    Ok(top_cooccurring(response.texts(), ignored_hashtag, TOP_HASHTAG_COUNT))
}

fn is_bare_marker(tag: &str) -> bool {
    let mut chars = tag.chars();
    chars.next() == Some(HASHTAG_MARKER) && chars.next().is_none()
}
