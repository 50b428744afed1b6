use std::path::PathBuf;

use anyhow::{bail, Context};

use hashtag_core::SearchSettings;
use search_client::Credentials;

const DEFAULT_CACHE_FILE: &str = "twitter_cache.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub cache_file: PathBuf,
    pub search: SearchSettings,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Config> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from a variable lookup. Empty values count as unset.
    pub fn from_lookup<L>(lookup: L) -> anyhow::Result<Config>
    where
        L: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let credentials = match var("TWITTER_BEARER_TOKEN") {
            Some(token) => Credentials::BearerToken(token),
            None => match (var("TWITTER_API_KEY"), var("TWITTER_API_SECRET")) {
                (Some(api_key), Some(api_secret)) => Credentials::Consumer { api_key, api_secret },
                (None, _) => bail!("You need to set TWITTER_BEARER_TOKEN, or TWITTER_API_KEY and TWITTER_API_SECRET"),
                (_, None) => bail!("You need to set TWITTER_API_SECRET along with TWITTER_API_KEY"),
            },
        };

        let mut search = SearchSettings::default();
        if let Some(endpoint) = var("SEARCH_ENDPOINT") {
            search.endpoint = endpoint;
        }
        if let Some(count) = var("SEARCH_COUNT") {
            search.count = count
                .parse()
                .with_context(|| format!("SEARCH_COUNT must be a positive integer, got `{}`", count))?;
            if search.count == 0 {
                bail!("SEARCH_COUNT must be a positive integer, got `0`");
            }
        }
        search.result_type = var("SEARCH_RESULT_TYPE");

        let cache_file = var("HASHTAG_CACHE_FILE").unwrap_or_else(|| DEFAULT_CACHE_FILE.to_string());

        Ok(Config {
            credentials,
            cache_file: PathBuf::from(cache_file),
            search,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use search_client::{SEARCH_API, SEARCH_API_DEFAULT_COUNT};

    use super::*;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_with_bearer_token() {
        let config = config(&[("TWITTER_BEARER_TOKEN", "token")]).unwrap();
        assert!(matches!(config.credentials, Credentials::BearerToken(ref t) if t == "token"));
        assert_eq!(config.cache_file, PathBuf::from(DEFAULT_CACHE_FILE));
        assert_eq!(config.search.endpoint, SEARCH_API);
        assert_eq!(config.search.count, SEARCH_API_DEFAULT_COUNT);
        assert_eq!(config.search.result_type, None);
    }

    #[test]
    fn test_consumer_credentials_and_overrides() {
        let config = config(&[
            ("TWITTER_BEARER_TOKEN", "  "),
            ("TWITTER_API_KEY", "key"),
            ("TWITTER_API_SECRET", "secret"),
            ("HASHTAG_CACHE_FILE", "/tmp/cache.json"),
            ("SEARCH_COUNT", "50"),
            ("SEARCH_RESULT_TYPE", "recent"),
        ])
        .unwrap();
        assert!(matches!(
            config.credentials,
            Credentials::Consumer { ref api_key, ref api_secret } if api_key == "key" && api_secret == "secret"
        ));
        assert_eq!(config.cache_file, PathBuf::from("/tmp/cache.json"));
        assert_eq!(config.search.count, 50);
        assert_eq!(config.search.result_type.as_deref(), Some("recent"));
    }

    #[test]
    fn test_missing_credentials() {
        let err = config(&[]).unwrap_err();
        assert!(err.to_string().contains("TWITTER_BEARER_TOKEN"));
        let err = config(&[("TWITTER_API_KEY", "key"), ("TWITTER_API_SECRET", "")]).unwrap_err();
        assert!(err.to_string().contains("TWITTER_API_SECRET"));
    }

    #[test]
    fn test_invalid_count() {
        assert!(config(&[("TWITTER_BEARER_TOKEN", "t"), ("SEARCH_COUNT", "many")]).is_err());
        assert!(config(&[("TWITTER_BEARER_TOKEN", "t"), ("SEARCH_COUNT", "0")]).is_err());
    }
}
