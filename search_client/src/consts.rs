pub const SEARCH_API: &str = "https://api.twitter.com/1.1/search/tweets.json";
pub const TOKEN_API: &str = "https://api.twitter.com/oauth2/token";
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/113.0.0.0 Safari/537.36";

/// Page size of a single search request. Only one page is ever requested.
pub const SEARCH_API_DEFAULT_COUNT: u32 = 100;
