use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use hashtag_core::{search_hashtag, CacheSource, CacheStore, Fetch, LoadStatus, SearchOutcome, SearchSettings};
use hashtag_util::{normalize_search_term, to_hashtag};

const PROMPT: &str = "Enter a hashtag that you want to search, or 'exit' to quit: ";
const EXIT_COMMAND: &str = "exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    /// Nothing searchable is left after normalization.
    Empty,
    /// Search for this hashtag, marker included.
    Search(String),
}

pub fn parse_command(line: &str) -> Command {
    let term = normalize_search_term(line);
    if term.is_empty() {
        Command::Empty
    } else if term == EXIT_COMMAND {
        Command::Exit
    } else {
        Command::Search(to_hashtag(&term))
    }
}

pub fn source_line(source: CacheSource) -> &'static str {
    match source {
        CacheSource::Cache => "fetching cached data",
        CacheSource::Network => "making new request",
    }
}

/// Line shown before the first prompt when the cache file could not be used.
pub fn load_notice(status: &LoadStatus, store: &CacheStore) -> Option<String> {
    match status {
        LoadStatus::Corrupt(reason) => Some(format!(
            "Cache file {} is unreadable ({}), starting with an empty cache.",
            store.path().display(),
            reason
        )),
        LoadStatus::Loaded { .. } | LoadStatus::Absent => None,
    }
}

pub fn format_outcome(outcome: &SearchOutcome) -> String {
    if outcome.cooccurring.is_empty() {
        format!("No hashtags co-occur with {}.", outcome.hashtag)
    } else {
        format!(
            "The three most commonly cooccurring hashtags with {} are: {}.",
            outcome.hashtag,
            outcome.cooccurring.join(", ")
        )
    }
}

/// Read search terms line by line until `exit` or end of input. A failed search is reported and the
/// prompt continues.
pub async fn run<F, R, W>(
    store: &mut CacheStore,
    fetcher: &F,
    settings: &SearchSettings,
    input: R,
    mut output: W,
) -> anyhow::Result<()>
where
    F: Fetch + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            output.write_all(b"\nBye!\n").await?;
            break;
        };

        let message = match parse_command(&line) {
            Command::Exit => {
                output.write_all(b"Bye!\n").await?;
                break;
            }
            Command::Empty => "Please enter a hashtag made of letters or digits.".to_string(),
            Command::Search(hashtag) => match search_hashtag(store, fetcher, settings, &hashtag).await {
                Ok(outcome) => format!("{}\n{}", source_line(outcome.source), format_outcome(&outcome)),
                Err(e) => {
                    tracing::error!("Search for {} failed: {}", hashtag, e);
                    format!("Cannot search {}: {}", hashtag, e)
                }
            },
        };
        output.write_all(message.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }
    output.flush().await?;
    Ok(())
}
