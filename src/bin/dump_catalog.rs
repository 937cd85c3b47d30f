// Print the fee-report catalog as pretty JSON.
//
//   cargo run --bin dump_catalog -- [latest|all]

use anyhow::Result;
use feescraper::{CatalogMode, Config, Scraper};
use std::env;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // logs go to stderr so stdout stays valid JSON
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::from_env()?;
    if let Some(mode) = env::args().nth(1) {
        config = config.with_mode(CatalogMode::parse(&mode));
    }

    let entries = Scraper::new(config)?.fetch_catalog().await?;
    info!(entries = entries.len(), "catalog fetched");
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
