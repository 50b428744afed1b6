mod config;
mod repl;

use dotenvy::dotenv;
use tokio::io::{stdin, stdout, BufReader};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use hashtag_core::CacheStore;
use search_client::SearchClient;

use crate::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // 1. Initialize logger
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env()?
        .add_directive("hyper=info".parse()?)
        .add_directive("reqwest=info".parse()?);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    // 2. Load configuration, missing credentials stop here
    let config = Config::from_env()?;

    // 3. Initialize client
    let client = SearchClient::connect(&config.credentials).await?;

    // 4. Initialize cache
    let (mut store, status) = CacheStore::load(&config.cache_file);
    if let Some(notice) = repl::load_notice(&status, &store) {
        println!("{}", notice);
    }

    // 5. Prompt until exit
    repl::run(&mut store, &client, &config.search, BufReader::new(stdin()), stdout()).await
}
