// src/institution/types.rs

use serde::Serialize;

use crate::error::{ScrapeError, ScrapeResult};

/// One historical fee observation.
#[derive(Debug, Serialize, PartialEq, Clone, Default)]
pub struct FeeRecord {
    pub fee_type: String,
    pub reference_date: String,
    pub conversion_rate: f64,
    pub publication_timestamp: String,
}

#[derive(Debug, Serialize, PartialEq, Clone, Default)]
pub struct Institution {
    pub tax_id: String,
    pub name: String,
    pub history: Vec<FeeRecord>,
}

impl Institution {
    /// A document without a name carried no usable data; `display_name` is the
    /// catalog's name for the institution, used in the error.
    pub fn ensure_named(self, display_name: &str) -> ScrapeResult<Self> {
        if self.name.is_empty() {
            return Err(ScrapeError::EmptyResult(display_name.to_string()));
        }
        Ok(self)
    }
}
