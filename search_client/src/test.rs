use serde::Deserialize;
use serde_json::{json, Value};

use crate::response::{validate_search_body, SearchResponse};
use crate::{log, log_name, Error, SearchClient};

fn read_response() -> Value {
    serde_json::from_str(include_str!("../testdata/search_tweets.json")).unwrap()
}

#[test]
fn test_parse_search_response() {
    let body = read_response();
    let response = SearchResponse::deserialize(&body).unwrap();
    // The status without `text` is dropped
    assert_eq!(
        response.texts().collect::<Vec<_>>(),
        vec![
            "Bracket is set #MarchMadness2021 #NCAA #FinalFour",
            "Upset alert! #marchmadness2021 #ncaa",
            "#MarchMadness2021 here we go #",
        ]
    );
}

#[test]
fn test_parse_ignores_fields_besides_text() {
    let body = json!({
        "statuses": [
            { "text": "#q #alpha", "id": "1372660387155918850" },
            { "text": "#q #beta", "created_at": 1616101803 },
            { "text": "#q #gamma", "id": -1, "entities": "broken" },
            { "text": 42 },
        ]
    });
    let response = SearchResponse::deserialize(&body).unwrap();
    assert_eq!(response.texts().collect::<Vec<_>>(), vec!["#q #alpha", "#q #beta", "#q #gamma"]);
}

#[test]
fn test_validate_search_body() {
    assert!(validate_search_body(&read_response()).is_ok());
    assert!(validate_search_body(&json!({ "statuses": [] })).is_ok());

    let error_body = json!({ "errors": [{ "code": 32, "message": "Could not authenticate you." }] });
    assert!(matches!(validate_search_body(&error_body), Err(Error::InvalidResponse(_))));
    assert!(matches!(
        validate_search_body(&json!({ "statuses": "nope" })),
        Err(Error::InvalidResponse(_))
    ));
}

#[test]
fn test_log_name() {
    assert_eq!(log_name("https://api.twitter.com/1.1/search/tweets.json"), "search_tweets");
    assert_eq!(log_name("http://localhost:8080/tweets"), "tweets");
}

#[test]
fn test_empty_bearer_token() {
    assert!(matches!(
        SearchClient::with_bearer_token("  "),
        Err(Error::InvalidCredentials(_))
    ));
    assert!(SearchClient::with_bearer_token("AAAA%2Ftoken").is_ok());
}

#[tokio::test]
async fn test_log_writes_response() {
    let dir = tempfile::tempdir().unwrap();
    log(dir.path(), "search_tweets", "{\"statuses\":[]}").await;

    let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().map(|f| f.unwrap().path()).collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].file_name().unwrap().to_str().unwrap().starts_with("search_tweets_"));
    assert_eq!(std::fs::read_to_string(&files[0]).unwrap(), "{\"statuses\":[]}");
}

#[tokio::test]
async fn test_log_to_missing_dir_does_not_fail() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("not_created");
    log(&missing, "search_tweets", "{}").await;
    assert!(!missing.exists());
}
