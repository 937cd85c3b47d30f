// src/catalog/fetch.rs

use reqwest::Client;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::types::Catalog;
use crate::error::{ScrapeError, ScrapeResult};

/// GET the catalog and decode its OData envelope.
///
/// The body is decoded whatever the HTTP status; an error page surfaces as
/// [`ScrapeError::Decode`].
#[instrument(level = "info", skip(client), fields(url = %url))]
pub async fn fetch_catalog(client: &Client, url: &Url) -> ScrapeResult<Catalog> {
    let resp = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        })?;
    if !resp.status().is_success() {
        warn!(status = %resp.status(), "catalog answered with non-success status");
    }

    let body = resp.bytes().await.map_err(|source| ScrapeError::Read {
        url: url.to_string(),
        source,
    })?;
    debug!(bytes = body.len(), "catalog body read");

    let catalog: Catalog = serde_json::from_slice(&body).map_err(|source| ScrapeError::Decode {
        url: url.to_string(),
        source,
    })?;
    info!(entries = catalog.entries.len(), "catalog decoded");
    Ok(catalog)
}
