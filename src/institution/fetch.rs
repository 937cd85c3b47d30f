// src/institution/fetch.rs

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, instrument, warn};

use super::normalize::normalize_institution;
use super::types::Institution;
use crate::catalog::CatalogEntry;
use crate::error::{ScrapeError, ScrapeResult};

/// Client for the institution endpoints, which serve certificate chains we do
/// not trust. Certificate verification is off.
pub fn insecure_client() -> Result<Client> {
    Client::builder()
        .danger_accept_invalid_certs(true)
        .build()
        .context("building institution HTTP client")
}

/// GET one institution's fee document and normalize it.
///
/// A transport failure aborts immediately with [`ScrapeError::Fetch`]; the body
/// is never read from a failed request. Any HTTP status is accepted: whether
/// the reply is usable is decided by the name check alone.
#[instrument(level = "info", skip(client, entry), fields(institution = %entry.institution_name))]
pub async fn fetch_institution(client: &Client, entry: &CatalogEntry) -> ScrapeResult<Institution> {
    let url = entry.data_url.as_str();
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        })?;
    if !resp.status().is_success() {
        warn!(status = %resp.status(), "institution answered with non-success status");
    }

    let body = resp.bytes().await.map_err(|source| ScrapeError::Read {
        url: url.to_string(),
        source,
    })?;
    debug!(bytes = body.len(), "institution body read");

    let institution = normalize_institution(&body).ensure_named(&entry.institution_name)?;
    debug!(
        name = %institution.name,
        records = institution.history.len(),
        "institution normalized"
    );
    Ok(institution)
}
