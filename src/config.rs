// src/config.rs

use anyhow::{Context, Result};
use std::{env, path::PathBuf};
use url::Url;

pub const DEFAULT_CATALOG_URL: &str =
    "https://olinda.bcb.gov.br/olinda/servico/DASFN/versao/v1/odata/Recursos";
pub const DEFAULT_PAGE_SIZE: u32 = 10_000;
pub const DEFAULT_OUTPUT: &str = "result.csv";

/// Which slice of the registry to list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CatalogMode {
    /// Only the most recent report of each institution.
    #[default]
    Latest,
    All,
}

impl CatalogMode {
    /// `latest` (or `ultimo`) selects [`CatalogMode::Latest`]; anything else lists everything.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "latest" | "ultimo" => CatalogMode::Latest,
            _ => CatalogMode::All,
        }
    }

    pub fn resource_path(&self) -> &'static str {
        match self {
            CatalogMode::Latest => "/itens/ultimo",
            CatalogMode::All => "/itens",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub mode: CatalogMode,
    pub catalog_url: Url,
    pub page_size: u32,
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: CatalogMode::default(),
            catalog_url: Url::parse(DEFAULT_CATALOG_URL).expect("default catalog URL is valid"),
            page_size: DEFAULT_PAGE_SIZE,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Config {
    /// Build from `FEES_MODE`, `FEES_CATALOG_URL`, `FEES_PAGE_SIZE` and `FEES_OUTPUT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();

        if let Some(mode) = lookup("FEES_MODE") {
            cfg.mode = CatalogMode::parse(&mode);
        }
        if let Some(raw) = lookup("FEES_CATALOG_URL") {
            cfg.catalog_url =
                Url::parse(&raw).with_context(|| format!("parsing FEES_CATALOG_URL {}", raw))?;
        }
        if let Some(raw) = lookup("FEES_PAGE_SIZE") {
            cfg.page_size = raw
                .trim()
                .parse()
                .with_context(|| format!("parsing FEES_PAGE_SIZE {}", raw))?;
        }
        if let Some(out) = lookup("FEES_OUTPUT") {
            cfg.output = PathBuf::from(out);
        }

        Ok(cfg)
    }

    pub fn with_mode(mut self, mode: CatalogMode) -> Self {
        self.mode = mode;
        self
    }
}
