// src/institution/normalize.rs
//
// The fee endpoints disagree with each other about shapes: `historicoTaxas` is
// sometimes an array and sometimes a lone object, and `taxaConversao` is either
// a JSON number or a string holding one. Nothing in here fails; absent or
// unusable values fall back to their defaults.

use serde_json::{value::RawValue, Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, trace};

use super::types::{FeeRecord, Institution};

pub const KEY_HISTORY: &str = "historicoTaxas";
pub const KEY_TAX_ID: &str = "emissorCnpj";
pub const KEY_NAME: &str = "emissorNome";

pub const KEY_FEE_TYPE: &str = "taxaTipoGasto";
pub const KEY_REFERENCE_DATE: &str = "taxaData";
pub const KEY_CONVERSION_RATE: &str = "taxaConversao";
pub const KEY_PUBLISHED_AT: &str = "taxaDivulgacaoDataHora";

/// Decode one institution document from raw bytes.
///
/// Invalid UTF-8 is replaced with U+FFFD. Bytes that are not a JSON object
/// decode as an empty document, so the result simply has an empty name.
/// Callers decide what emptiness means.
pub fn normalize_institution(bytes: &[u8]) -> Institution {
    let text = String::from_utf8_lossy(bytes);
    let doc = parse_document(&text);

    let history = match doc.get(KEY_HISTORY) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_object)
            .map(decode_fee_record)
            .collect(),
        Some(Value::Object(single)) => vec![decode_fee_record(single)],
        other => {
            trace!(shape = ?other.map(shape_of), "no usable history");
            Vec::new()
        }
    };

    Institution {
        tax_id: str_field(&doc, KEY_TAX_ID),
        name: str_field(&doc, KEY_NAME),
        history,
    }
}

/// Best-effort decode of a single history entry.
pub fn decode_fee_record(map: &Map<String, Value>) -> FeeRecord {
    FeeRecord {
        fee_type: str_field(map, KEY_FEE_TYPE),
        reference_date: str_field(map, KEY_REFERENCE_DATE),
        conversion_rate: rate_field(map, KEY_CONVERSION_RATE),
        publication_timestamp: str_field(map, KEY_PUBLISHED_AT),
    }
}

fn parse_document(text: &str) -> Map<String, Value> {
    let err = match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(doc)) => return doc,
        Ok(other) => {
            debug!(shape = shape_of(&other), "institution body is not a JSON object");
            return Map::new();
        }
        Err(e) => e,
    };

    // Well-formed but undecodable somewhere inside (e.g. a number out of f64
    // range): keep everything else.
    match serde_json::from_str::<&RawValue>(text).map(lenient_value) {
        Ok(Value::Object(doc)) => {
            debug!(error = %err, "recovered institution body leniently");
            doc
        }
        _ => {
            debug!(error = %err, bytes = text.len(), "institution body is not a JSON object");
            Map::new()
        }
    }
}

/// Decode `raw`, replacing any value that cannot be represented with null.
fn lenient_value(raw: &RawValue) -> Value {
    if let Ok(v) = serde_json::from_str(raw.get()) {
        return v;
    }
    let text = raw.get();
    match text.trim_start().as_bytes().first() {
        Some(b'{') => serde_json::from_str::<BTreeMap<String, &RawValue>>(text)
            .map(|fields| {
                fields
                    .into_iter()
                    .map(|(k, v)| (k, lenient_value(v)))
                    .collect::<Map<String, Value>>()
            })
            .map(Value::Object)
            .unwrap_or(Value::Null),
        Some(b'[') => serde_json::from_str::<Vec<&RawValue>>(text)
            .map(|items| items.into_iter().map(lenient_value).collect())
            .map(Value::Array)
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

fn str_field(map: &Map<String, Value>, key: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}

/// String-encoded number, then native number, then 0.0. Non-finite values
/// (overflow, `inf`, `NaN`) count as unparsable.
fn rate_field(map: &Map<String, Value>, key: &str) -> f64 {
    match map.get(key) {
        Some(Value::String(s)) => s
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or_default(),
        Some(Value::Number(n)) => n.as_f64().unwrap_or_default(),
        _ => 0.0,
    }
}

fn shape_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(v: Value) -> Institution {
        normalize_institution(v.to_string().as_bytes())
    }

    fn record(v: Value) -> FeeRecord {
        decode_fee_record(v.as_object().unwrap())
    }

    #[test]
    fn test_single_object_history() {
        let entry = json!({
            "taxaTipoGasto": "Saque",
            "taxaData": "2024-03-01",
            "taxaConversao": "3.1400",
            "taxaDivulgacaoDataHora": "2024-03-02 10:00:00"
        });
        let inst = normalize(json!({
            "emissorCnpj": "00000000000191",
            "emissorNome": "Bank A",
            "historicoTaxas": entry.clone()
        }));

        assert_eq!(inst.name, "Bank A");
        assert_eq!(inst.tax_id, "00000000000191");
        assert_eq!(inst.history, vec![record(entry)]);
        assert_eq!(inst.history[0].conversion_rate, 3.14);
    }

    #[test]
    fn test_array_history_skips_non_objects_in_order() {
        let inst = normalize(json!({
            "emissorNome": "Bank B",
            "historicoTaxas": [
                { "taxaData": "2024-01-01", "taxaConversao": 1.5 },
                "garbage",
                42,
                null,
                { "taxaData": "2024-01-02", "taxaConversao": "2.5" },
                [ { "taxaData": "nested" } ],
                { "taxaData": "2024-01-03" }
            ]
        }));

        let dates: Vec<&str> = inst.history.iter().map(|r| r.reference_date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
        let rates: Vec<f64> = inst.history.iter().map(|r| r.conversion_rate).collect();
        assert_eq!(rates, vec![1.5, 2.5, 0.0]);
    }

    #[test]
    fn test_other_history_shapes_are_empty() {
        for history in [json!(null), json!("text"), json!(7), json!(true), json!([])] {
            let inst = normalize(json!({ "emissorNome": "X", "historicoTaxas": history.clone() }));
            assert!(inst.history.is_empty(), "history {history} should be empty");
        }
        let inst = normalize(json!({ "emissorNome": "X" }));
        assert!(inst.history.is_empty());
    }

    #[test]
    fn test_conversion_rate_variants() {
        assert_eq!(record(json!({ "taxaConversao": "12.5" })).conversion_rate, 12.5);
        assert_eq!(record(json!({ "taxaConversao": "abc" })).conversion_rate, 0.0);
        assert_eq!(record(json!({ "taxaConversao": 7.25 })).conversion_rate, 7.25);
        assert_eq!(record(json!({ "taxaConversao": 3 })).conversion_rate, 3.0);
        assert_eq!(record(json!({ "taxaConversao": false })).conversion_rate, 0.0);
        assert_eq!(record(json!({})).conversion_rate, 0.0);
    }

    #[test]
    fn test_non_string_text_fields_default() {
        let r = record(json!({
            "taxaTipoGasto": 10,
            "taxaData": { "dia": 1 },
            "taxaDivulgacaoDataHora": null
        }));
        assert_eq!(r, FeeRecord::default());
    }

    #[test]
    fn test_missing_or_non_string_name_is_empty() {
        assert_eq!(normalize(json!({ "historicoTaxas": [{}] })).name, "");
        assert_eq!(normalize(json!({ "emissorNome": 123 })).name, "");
        assert_eq!(normalize(json!({ "emissorNome": "" })).name, "");
    }

    #[test]
    fn test_invalid_utf8_keeps_fields() {
        let body: &[u8] = b"{\"emissorCnpj\":\"123\",\"emissorNome\":\"Bank A\",\
            \"historicoTaxas\":{\"taxaTipoGasto\":\"Saque \xE7\",\"taxaConversao\":\"1.5\"}}";
        let inst = normalize_institution(body);

        assert_eq!(inst.name, "Bank A");
        assert_eq!(inst.tax_id, "123");
        assert_eq!(inst.history.len(), 1);
        assert_eq!(inst.history[0].fee_type, "Saque \u{FFFD}");
        assert_eq!(inst.history[0].conversion_rate, 1.5);
    }

    #[test]
    fn test_non_finite_string_rates_default() {
        for raw in ["1e400", "-1e400", "inf", "NaN"] {
            let r = record(json!({ "taxaConversao": raw }));
            assert_eq!(r.conversion_rate, 0.0, "rate {raw} should default");
        }
    }

    #[test]
    fn test_out_of_range_number_only_loses_that_value() {
        let body = br#"{
            "emissorNome": "Bank A",
            "emissorCnpj": "123",
            "historicoTaxas": [
                { "taxaData": "2024-01-01", "taxaConversao": 1e400 },
                { "taxaData": "2024-01-02", "taxaConversao": 2.5 }
            ]
        }"#;
        let inst = normalize_institution(body);

        assert_eq!(inst.name, "Bank A");
        assert_eq!(inst.tax_id, "123");
        let dates: Vec<&str> = inst.history.iter().map(|r| r.reference_date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02"]);
        let rates: Vec<f64> = inst.history.iter().map(|r| r.conversion_rate).collect();
        assert_eq!(rates, vec![0.0, 2.5]);
    }

    #[test]
    fn test_unparsable_body_yields_empty_institution() {
        assert_eq!(normalize_institution(b"not json"), Institution::default());
        assert_eq!(normalize_institution(b"[1, 2, 3]"), Institution::default());
        assert_eq!(normalize_institution(b""), Institution::default());
        assert_eq!(
            normalize_institution(br#"{"emissorNome": "Bank A", "#),
            Institution::default()
        );
    }
}
