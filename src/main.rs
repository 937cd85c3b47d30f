use anyhow::Result;
use feescraper::{CatalogMode, Config, Scraper};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) configure ────────────────────────────────────────────────
    let mut config = Config::from_env()?;
    if let Some(mode) = env::args().nth(1) {
        config = config.with_mode(CatalogMode::parse(&mode));
    }
    info!(mode = ?config.mode, output = %config.output.display(), "configured");

    // ─── 3) run ──────────────────────────────────────────────────────
    let scraper = Scraper::new(config)?;
    match scraper.run().await {
        Ok(summary) => {
            info!(?summary, "all done");
            Ok(())
        }
        Err(e) => {
            error!("could not write {}: {:#}", scraper.config().output.display(), e);
            std::process::exit(1);
        }
    }
}
