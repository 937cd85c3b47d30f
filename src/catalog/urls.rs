// src/catalog/urls.rs

use anyhow::{Context, Result};
use url::Url;

use crate::config::CatalogMode;

pub const API_NAME: &str = "taxas_cartoes";
pub const SITUATION: &str = "Produção";

/// OData predicate selecting the production card-fee resources for `mode`.
pub fn catalog_filter(mode: CatalogMode) -> String {
    format!(
        "Api eq '{}' and Recurso eq '{}' and Situacao eq '{}'",
        API_NAME,
        mode.resource_path(),
        SITUATION
    )
}

/// Full catalog query URL.
///
/// The query string is assembled by hand: OData wants literal `$` keys and
/// `%20` spaces, which `Url::query_pairs_mut` would not produce.
pub fn catalog_url(base: &Url, mode: CatalogMode, page_size: u32) -> Result<Url> {
    let mut base = base.clone();
    base.set_query(None);
    let raw = format!(
        "{}?$filter={}&$top={}&$format=json",
        base,
        urlencoding::encode(&catalog_filter(mode)),
        page_size
    );
    Url::parse(&raw).with_context(|| format!("building catalog URL {}", raw))
}
