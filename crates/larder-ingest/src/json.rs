//! JSON snapshots: a bare array of records, or `{ "records": [...] }`.

use std::path::Path;

use larder_model::Record;
use serde_json::Value;

use crate::error::{IngestError, Result};

/// Read a JSON snapshot file.
pub fn read_json_records(path: &Path) -> Result<Vec<Record>> {
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_json_records(&text, path)
}

/// Parse snapshot text. `path` is only used for error context.
pub fn parse_json_records(text: &str, path: &Path) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(text).map_err(|e| IngestError::JsonParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let records = match value {
        Value::Array(_) => value,
        Value::Object(mut object) => match object.remove("records") {
            Some(records @ Value::Array(_)) => records,
            Some(_) => {
                return Err(IngestError::SnapshotLayout {
                    path: path.to_path_buf(),
                    reason: "'records' is not an array".to_string(),
                });
            }
            None => {
                return Err(IngestError::SnapshotLayout {
                    path: path.to_path_buf(),
                    reason: "object has no 'records' field".to_string(),
                });
            }
        },
        _ => {
            return Err(IngestError::SnapshotLayout {
                path: path.to_path_buf(),
                reason: "expected an array of records".to_string(),
            });
        }
    };

    serde_json::from_value(records).map_err(|e| IngestError::JsonParse {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Vec<Record>> {
        parse_json_records(text, Path::new("snapshot.json"))
    }

    #[test]
    fn test_bare_array() {
        let records = parse(r#"[{"id": 1, "supplierName": "Harbor"}, {"id": "b"}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[0].supplier(), Some("Harbor"));
    }

    #[test]
    fn test_wrapped_records() {
        let records = parse(r#"{"records": [{"id": "a", "quantity": 3}], "page": 1}"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quantity, Some(3.0));
    }

    #[test]
    fn test_wrong_layout() {
        let err = parse(r#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, IngestError::SnapshotLayout { .. }));
        let err = parse("42").unwrap_err();
        assert!(matches!(err, IngestError::SnapshotLayout { .. }));
        let err = parse(r#"{"records": {}}"#).unwrap_err();
        assert!(matches!(err, IngestError::SnapshotLayout { .. }));
    }

    #[test]
    fn test_schema_mismatch_is_parse_error() {
        let err = parse(r#"[{"id": "a", "quantity": "lots"}]"#).unwrap_err();
        assert!(matches!(err, IngestError::JsonParse { .. }));
        assert!(err.to_string().contains("snapshot.json"));
    }
}
