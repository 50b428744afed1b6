mod consts;
mod error;
mod response;
#[cfg(test)]
mod test;

use std::path::Path;

use reqwest::{header, Client, Response, Url};
use serde_json::Value;

pub use consts::*;
pub use response::*;

pub use crate::error::{Error, Result};
use crate::response::TokenResponse;

/// Credentials used to authenticate search requests.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// A ready-made application bearer token.
    BearerToken(String),
    /// Consumer key and secret, exchanged for a bearer token on connect.
    Consumer { api_key: String, api_secret: String },
}

#[derive(Debug, Clone)]
pub struct SearchClient {
    client: reqwest::Client,
}

impl SearchClient {
    /// Build a client from credentials. Consumer credentials are exchanged for a bearer token first,
    /// so invalid ones fail here instead of on the first search.
    pub async fn connect(credentials: &Credentials) -> Result<SearchClient> {
        match credentials {
            Credentials::BearerToken(token) => Self::with_bearer_token(token),
            Credentials::Consumer { api_key, api_secret } => {
                let client = Client::builder().user_agent(USER_AGENT).build()?;
                let token = request_bearer_token(&client, api_key, api_secret).await?;
                tracing::info!("Obtained application bearer token");
                Self::with_bearer_token(&token)
            }
        }
    }

    pub fn with_bearer_token(token: &str) -> Result<SearchClient> {
        if token.trim().is_empty() {
            return Err(Error::InvalidCredentials("empty bearer token".to_string()));
        }
        let mut auth_value = header::HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|_| Error::InvalidCredentials("bearer token contains invalid characters".to_string()))?;
        auth_value.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth_value);

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;
        Ok(SearchClient { client })
    }

    /// Run a search request and return the raw response body.
    /// Non-success statuses and bodies without a `statuses` array are errors.
    pub async fn search(&self, endpoint: &str, params: &[(String, String)]) -> Result<Value> {
        let body = self.get_json(endpoint, params).await?;
        validate_search_body(&body)?;
        Ok(body)
    }
}

impl SearchClient {
    async fn get_json(&self, endpoint: &str, params: &[(String, String)]) -> Result<Value> {
        let url = Url::parse_with_params(endpoint, params)?;
        tracing::debug!("GET {}", url);
        let response: Response = self.client.get(url).send().await?;

        let status_error = response.error_for_status_ref().err();
        let content = response.text().await?;
        if let Ok(dir) = std::env::var("CLIENT_LOG_DIR") {
            log(Path::new(&dir), &log_name(endpoint), &content).await;
        }
        if let Some(status_error) = status_error {
            return Err(status_error.into());
        }

        serde_json::from_str(&content).map_err(|e| e.into())
    }
}

async fn request_bearer_token(client: &Client, api_key: &str, api_secret: &str) -> Result<String> {
    if api_key.is_empty() || api_secret.is_empty() {
        return Err(Error::InvalidCredentials("empty API key or secret".to_string()));
    }
    let response = client
        .post(TOKEN_API)
        .basic_auth(api_key, Some(api_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?
        .error_for_status()?;
    let token: TokenResponse = response.json().await?;
    if !token.token_type.eq_ignore_ascii_case("bearer") {
        return Err(Error::InvalidResponse(format!("unexpected token type `{}`", token.token_type)));
    }
    Ok(token.access_token)
}

/// File name stem for a dumped response, e.g. `.../1.1/search/tweets.json` -> `search_tweets`.
fn log_name(endpoint: &str) -> String {
    let path = Url::parse(endpoint)
        .map(|url| url.path().to_string())
        .unwrap_or_else(|_| endpoint.to_string());
    let segments: Vec<&str> = path
        .trim_end_matches(".json")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    segments[segments.len().saturating_sub(2)..].join("_")
}

/// Dump a raw response into `dir`. Failing to write only warns, the response is still used.
async fn log(dir: &Path, name: &str, content: &str) {
    if let Err(e) = write_log(dir, name, content).await {
        tracing::warn!("Cannot dump {} response to {}: {}", name, dir.display(), e);
    }
}

async fn write_log(dir: &Path, name: &str, content: &str) -> Result<()> {
    use tokio::{fs::File, io::AsyncWriteExt};

    let time = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let filepath = dir.join(format!("{}_{}.json", name, time));
    let mut file = File::create(filepath).await?;
    file.write_all(content.as_bytes()).await?;
    Ok(())
}
