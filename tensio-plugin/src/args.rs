//! Argument extraction for tool calls
//!
//! Tools receive a JSON object. These helpers pull typed values out of it
//! and turn every mismatch into a `TensioError` naming the tool and field.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tensio_core::time::parse_timestamp;
use tensio_core::TensioError;

/// Required list of numbers
pub fn numbers(args: &JsonValue, tool: &str, name: &str) -> Result<Vec<f64>, TensioError> {
    let list = args
        .get(name)
        .ok_or_else(|| TensioError::missing_arg(tool, name))?
        .as_array()
        .ok_or_else(|| TensioError::arg_type(tool, name, "array of numbers"))?;

    list.iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_f64()
                .ok_or_else(|| TensioError::arg_type(tool, name, "array of numbers").at_index(i))
        })
        .collect()
}

/// Optional number with a default
pub fn number_or(args: &JsonValue, tool: &str, name: &str, default: f64) -> Result<f64, TensioError> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Ok(default),
        Some(v) => v.as_f64().ok_or_else(|| TensioError::arg_type(tool, name, "number")),
    }
}

/// Required non-negative integer
pub fn count(args: &JsonValue, tool: &str, name: &str) -> Result<usize, TensioError> {
    args.get(name)
        .ok_or_else(|| TensioError::missing_arg(tool, name))?
        .as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| TensioError::arg_type(tool, name, "non-negative integer"))
}

/// List of records. A missing optional list decodes as empty.
pub fn records<T: DeserializeOwned>(
    args: &JsonValue,
    tool: &str,
    name: &str,
    required: bool,
) -> Result<Vec<T>, TensioError> {
    let list = match args.get(name) {
        None | Some(JsonValue::Null) if required => return Err(TensioError::missing_arg(tool, name)),
        None | Some(JsonValue::Null) => return Ok(Vec::new()),
        Some(v) => v
            .as_array()
            .ok_or_else(|| TensioError::arg_type(tool, name, "array of records"))?,
    };

    list.iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item.clone()).map_err(|e| {
                TensioError::from(e).in_tool(tool).at_field(name).at_index(i)
            })
        })
        .collect()
}

/// Optional RFC 3339 timestamp
pub fn timestamp(args: &JsonValue, tool: &str, name: &str) -> Result<Option<DateTime<Utc>>, TensioError> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => parse_timestamp(s)
            .map(Some)
            .map_err(|e| TensioError::from(e).in_tool(tool).at_field(name)),
        Some(_) => Err(TensioError::arg_type(tool, name, "RFC 3339 timestamp string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use tensio_core::codes;

    #[derive(Debug, Deserialize)]
    struct Point {
        x: f64,
    }

    #[test]
    fn test_numbers() {
        let args = json!({ "values": [1, 2.5, 3] });
        assert_eq!(numbers(&args, "describe", "values").unwrap(), vec![1.0, 2.5, 3.0]);
    }

    #[test]
    fn test_numbers_missing() {
        let err = numbers(&json!({}), "describe", "values").unwrap_err();
        assert_eq!(err.code, codes::MISSING_ARG);
    }

    #[test]
    fn test_numbers_bad_item() {
        let err = numbers(&json!({ "values": [1, "x"] }), "describe", "values").unwrap_err();
        assert_eq!(err.code, codes::ARG_TYPE);
        assert_eq!(err.context.and_then(|c| c.index), Some(1));
    }

    #[test]
    fn test_number_or_default() {
        assert_eq!(number_or(&json!({}), "ci", "level", 0.95).unwrap(), 0.95);
        assert_eq!(number_or(&json!({ "level": 0.9 }), "ci", "level", 0.95).unwrap(), 0.9);
    }

    #[test]
    fn test_optional_records_default_empty() {
        let points: Vec<Point> = records(&json!({}), "t", "points", false).unwrap();
        assert!(points.is_empty());
        assert!(records::<Point>(&json!({}), "t", "points", true).is_err());
    }

    #[test]
    fn test_records_report_index() {
        let err = records::<Point>(&json!({ "points": [{ "x": 1 }, { "y": 2 }] }), "t", "points", true)
            .unwrap_err();
        assert_eq!(err.context.and_then(|c| c.index), Some(1));
        let ok: Vec<Point> = records(&json!({ "points": [{ "x": 4 }] }), "t", "points", true).unwrap();
        assert_eq!(ok[0].x, 4.0);
    }

    #[test]
    fn test_timestamp() {
        let args = json!({ "now": "2025-03-10T12:00:00Z", "bad": "soon" });
        assert!(timestamp(&args, "t", "now").unwrap().is_some());
        assert!(timestamp(&args, "t", "missing").unwrap().is_none());
        assert_eq!(timestamp(&args, "t", "bad").unwrap_err().code, codes::INVALID_TIMESTAMP);
    }
}
