// src/catalog/types.rs

use serde::{Deserialize, Serialize};

/// One institution's reporting endpoint as listed by the registry.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
#[serde(default)]
pub struct CatalogEntry {
    #[serde(rename = "Api")]
    pub api: String,
    #[serde(rename = "Versao")]
    pub version: String,
    #[serde(rename = "CnpjInstituicao")]
    pub institution_tax_id: String,
    #[serde(rename = "NomeInstituicao")]
    pub institution_name: String,
    #[serde(rename = "Recurso")]
    pub resource: String,
    #[serde(rename = "Argumento")]
    pub argument: String,
    #[serde(rename = "Situacao")]
    pub situation: String,
    #[serde(rename = "URLDados")]
    pub data_url: String,
    #[serde(rename = "URLConsulta")]
    pub query_url: String,
}

/// OData envelope around the entry list.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct Catalog {
    #[serde(rename = "@odata.context", default)]
    pub context: String,
    #[serde(rename = "Value", alias = "value", default)]
    pub entries: Vec<CatalogEntry>,
}
