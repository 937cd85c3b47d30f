pub mod fetch;
pub mod types;
pub mod urls;

pub use fetch::fetch_catalog;
pub use types::{Catalog, CatalogEntry};
pub use urls::catalog_url;
