use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Search client error: {0}")]
    ClientError(#[from] search_client::Error),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Cannot encode/decode JSON: {0}")]
    JSONError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
