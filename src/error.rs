// src/error.rs

use thiserror::Error;

/// Failures of the two remote fetch paths (catalog and per-institution).
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Request could not be sent or no response arrived.
    #[error("GET {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("reading body from {url} failed: {source}")]
    Read {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Only raised for the catalog; institution documents are never malformed, just sparse.
    #[error("decoding catalog JSON from {url} failed: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("institution {0} returned no results")]
    EmptyResult(String),
}

pub type ScrapeResult<T> = std::result::Result<T, ScrapeError>;
