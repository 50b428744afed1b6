use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, VecSkipError};

use crate::error::{Error, Result};

/// Typed view of a search response body. Only the text of each status is read; statuses without a string
/// `text` are skipped, every other field is ignored whatever its shape.
#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SearchResponse {
    #[serde_as(as = "VecSkipError<_>")]
    pub statuses: Vec<Status>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
}

#[derive(Deserialize, Debug)]
pub(crate) struct TokenResponse {
    pub token_type: String,
    pub access_token: String,
}

impl SearchResponse {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.statuses.iter().map(|s| s.text.as_str())
    }
}

/// Check that a raw body has the shape of a search response, i.e. carries a `statuses` array.
pub fn validate_search_body(body: &Value) -> Result<()> {
    match body.get("statuses") {
        Some(Value::Array(_)) => Ok(()),
        Some(_) => Err(Error::InvalidResponse("`statuses` is not an array".to_string())),
        None => Err(Error::InvalidResponse("missing `statuses`".to_string())),
    }
}
