// src/output/write.rs

use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};
use serde::Serialize;
use std::{fs::File, path::Path};
use tracing::{debug, info, instrument};

use crate::institution::Institution;

pub const HEADER: [&str; 6] = [
    "nome_emissor",
    "cnpj_emissor",
    "dt_movimento",
    "tipo_gasto",
    "vl_taxa",
    "data_hora_divulgacao",
];

/// One output line: an institution paired with one of its fee records.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct OutputRow {
    #[serde(rename = "nome_emissor")]
    pub institution_name: String,
    #[serde(rename = "cnpj_emissor")]
    pub tax_id: String,
    #[serde(rename = "dt_movimento")]
    pub reference_date: String,
    #[serde(rename = "tipo_gasto")]
    pub fee_type: String,
    /// Fixed-point, six fractional digits.
    #[serde(rename = "vl_taxa")]
    pub conversion_rate: String,
    #[serde(rename = "data_hora_divulgacao")]
    pub publication_timestamp: String,
}

/// Institutions in order, each followed by its history in order.
pub fn flatten(institutions: &[Institution]) -> Vec<OutputRow> {
    institutions
        .iter()
        .flat_map(|inst| {
            inst.history.iter().map(move |rec| OutputRow {
                institution_name: inst.name.clone(),
                tax_id: inst.tax_id.clone(),
                reference_date: rec.reference_date.clone(),
                fee_type: rec.fee_type.clone(),
                conversion_rate: format!("{:.6}", rec.conversion_rate),
                publication_timestamp: rec.publication_timestamp.clone(),
            })
        })
        .collect()
}

/// Create (or truncate) `path` and write the header plus one row per fee record.
/// Returns the number of data rows written.
///
/// Rows already written stay on disk if a later row fails.
#[instrument(
    level = "info",
    skip(path, institutions),
    fields(file = %path.as_ref().display())
)]
pub fn write_table<P: AsRef<Path>>(path: P, institutions: &[Institution]) -> Result<usize> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("creating {:?}", path))?;
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .terminator(Terminator::Any(b'\n'))
        .has_headers(false)
        .from_writer(file);

    writer
        .write_record(HEADER)
        .with_context(|| format!("writing header to {:?}", path))?;

    let rows = flatten(institutions);
    for (i, row) in rows.iter().enumerate() {
        writer
            .serialize(row)
            .with_context(|| format!("writing row {} to {:?}", i + 1, path))?;
    }
    writer
        .flush()
        .with_context(|| format!("flushing {:?}", path))?;

    debug!(institutions = institutions.len(), "table flattened");
    info!(rows = rows.len(), "table written");
    Ok(rows.len())
}
