// src/pipeline.rs

use anyhow::Result;
use reqwest::Client;
use std::path::PathBuf;
use tokio::time::Instant;
use tracing::{error, info, warn};

use crate::{
    catalog::{self, CatalogEntry},
    config::Config,
    error::ScrapeResult,
    institution::{self, Institution},
    output,
};

/// What a run did, for the caller to log or assert on.
#[derive(Debug, Default, PartialEq)]
pub struct RunSummary {
    pub catalog_entries: usize,
    pub institutions: usize,
    pub skipped: usize,
    pub rows: usize,
    /// `None` when the catalog could not be fetched and nothing was written.
    pub written: Option<PathBuf>,
}

/// Drives catalog → institutions → table, one request at a time.
pub struct Scraper {
    config: Config,
    catalog_client: Client,
    institution_client: Client,
}

impl Scraper {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            config,
            catalog_client: Client::new(),
            institution_client: institution::insecure_client()?,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>> {
        let url = catalog::catalog_url(
            &self.config.catalog_url,
            self.config.mode,
            self.config.page_size,
        )?;
        info!(%url, "fetching catalog");
        Ok(catalog::fetch_catalog(&self.catalog_client, &url)
            .await?
            .entries)
    }

    pub async fn fetch_institution(&self, entry: &CatalogEntry) -> ScrapeResult<Institution> {
        institution::fetch_institution(&self.institution_client, entry).await
    }

    /// Catalog failure ends the run early without creating the output file.
    /// Per-institution failures are logged and skipped. Table write failures
    /// are returned to the caller.
    pub async fn run(&self) -> Result<RunSummary> {
        let start = Instant::now();

        let entries = match self.fetch_catalog().await {
            Ok(entries) => entries,
            Err(e) => {
                error!("catalog fetch failed, nothing written: {:#}", e);
                return Ok(RunSummary::default());
            }
        };

        let mut summary = RunSummary {
            catalog_entries: entries.len(),
            ..Default::default()
        };

        let mut institutions = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            match self.fetch_institution(entry).await {
                Ok(inst) => {
                    info!(
                        n = i + 1,
                        of = entries.len(),
                        name = %inst.name,
                        records = inst.history.len(),
                        "institution fetched"
                    );
                    institutions.push(inst);
                }
                Err(e) => {
                    warn!(
                        institution = %entry.institution_name,
                        error = %e,
                        "skipping institution"
                    );
                    summary.skipped += 1;
                }
            }
        }
        summary.institutions = institutions.len();

        info!(path = %self.config.output.display(), "saving table");
        summary.rows = output::write_table(&self.config.output, &institutions)?;
        summary.written = Some(self.config.output.clone());

        info!(
            institutions = summary.institutions,
            skipped = summary.skipped,
            rows = summary.rows,
            elapsed = ?start.elapsed(),
            "run complete"
        );
        Ok(summary)
    }
}
