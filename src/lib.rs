pub mod catalog;
pub mod config;
pub mod error;
pub mod institution;
pub mod output;
pub mod pipeline;

pub use config::{CatalogMode, Config};
pub use error::ScrapeError;
pub use pipeline::{RunSummary, Scraper};
