use std::io::Write;
use std::path::Path;

use larder_ingest::{IngestError, SnapshotFormat, load_records};
use larder_model::{StorageType, VerificationStatus};
use tempfile::NamedTempFile;

fn snapshot(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

const CSV_HEADER: &str = "id,name,quantity,minQuantity,cost,previousCost,category,supplierName,allergens,dietTags,approved,storageType,allergenVerificationStatus,updatedAt";

#[test]
fn test_format_from_extension() {
    assert_eq!(
        SnapshotFormat::from_path(Path::new("a/pantry.JSON")).unwrap(),
        SnapshotFormat::Json
    );
    assert_eq!(
        SnapshotFormat::from_path(Path::new("pantry.csv")).unwrap(),
        SnapshotFormat::Csv
    );
    assert!(matches!(
        SnapshotFormat::from_path(Path::new("pantry.xlsx")),
        Err(IngestError::UnsupportedFormat { .. })
    ));
    assert!(SnapshotFormat::from_path(Path::new("pantry")).is_err());
}

#[test]
fn test_missing_file() {
    let result = load_records(Path::new("/nonexistent/larder/pantry.json"));
    assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
}

#[test]
fn test_load_json_snapshot() {
    let file = snapshot(
        ".json",
        r#"{"records": [
            {"id": 7, "name": "Butter", "quantity": 4, "minQuantity": 5, "cost": 2.5,
             "supplierName": "Harbor", "allergens": ["milk"], "storageType": "refrigerated",
             "allergenVerificationStatus": "verified", "updatedAt": "2024-03-01T10:00:00Z"},
            {"id": "flour", "approved": false}
        ]}"#,
    );
    let records = load_records(file.path()).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "7");
    assert_eq!(records[0].min_quantity, Some(5.0));
    assert_eq!(records[0].storage_type, Some(StorageType::Refrigerated));
    assert_eq!(
        records[0].allergen_verification_status,
        Some(VerificationStatus::Verified)
    );
    assert!(records[0].updated_at.is_some());
    assert!(records[0].approved);
    assert_eq!(records[1].id, "flour");
    assert!(!records[1].approved);
    assert_eq!(records[1].quantity, None);
}

#[test]
fn test_json_nulls_read_as_absent() {
    let file = snapshot(
        ".json",
        r#"[
            {"id": "a", "allergens": null, "dietTags": null, "approved": null,
             "storageType": null, "allergenVerificationStatus": null, "quantity": null},
            {"id": "b", "storageType": "", "allergens": ["egg"]}
        ]"#,
    );
    let records = load_records(file.path()).unwrap();

    assert_eq!(records.len(), 2);
    assert!(records[0].allergens.is_empty());
    assert!(records[0].diet_tags.is_empty());
    assert!(records[0].approved);
    assert_eq!(records[0].storage_type, None);
    assert_eq!(records[0].allergen_verification_status, None);
    assert_eq!(records[0].quantity, None);
    assert_eq!(records[1].storage_type, None);
}

#[test]
fn test_json_and_csv_accept_the_same_enum_spellings() {
    let json = snapshot(
        ".json",
        r#"[{"id": "a", "storageType": "Frozen", "allergenVerificationStatus": "Partially Verified"},
            {"id": "b", "storageType": "Chilled", "allergenVerificationStatus": "VERIFIED"}]"#,
    );
    let csv = snapshot(
        ".csv",
        "id,storageType,allergenVerificationStatus\na,Frozen,Partially Verified\nb,Chilled,VERIFIED\n",
    );
    let from_json = load_records(json.path()).unwrap();
    let from_csv = load_records(csv.path()).unwrap();

    assert_eq!(from_json, from_csv);
    assert_eq!(from_json[0].storage_type, Some(StorageType::Frozen));
    assert_eq!(
        from_json[0].allergen_verification_status,
        Some(VerificationStatus::Partial)
    );
    assert_eq!(from_json[1].storage_type, Some(StorageType::Refrigerated));
}

#[test]
fn test_json_unknown_storage_type() {
    let file = snapshot(".json", r#"[{"id": "a", "storageType": "cellar"}]"#);
    let err = load_records(file.path()).unwrap_err();
    assert!(matches!(err, IngestError::JsonParse { .. }));
}

#[test]
fn test_load_csv_snapshot() {
    let content = format!(
        "{CSV_HEADER}\n\
         1,Butter,4,5,2.5,2.0,Dairy,Harbor,milk,vegetarian,yes,Chilled,Verified,2024-03-01T10:00:00Z\n\
         2,Flour,,,,,Bakery,, gluten | wheat ,vegan;Dairy Free,0,ambient,,\n"
    );
    let file = snapshot(".csv", &content);
    let records = load_records(file.path()).unwrap();

    assert_eq!(records.len(), 2);
    let butter = &records[0];
    assert_eq!(butter.name.as_deref(), Some("Butter"));
    assert_eq!(butter.previous_cost, Some(2.0));
    assert_eq!(butter.storage_type, Some(StorageType::Refrigerated));
    assert_eq!(
        butter.allergen_verification_status,
        Some(VerificationStatus::Verified)
    );
    assert!(butter.approved);

    let flour = &records[1];
    assert_eq!(flour.quantity, None);
    assert_eq!(flour.supplier_name, None);
    assert!(!flour.approved);
    assert_eq!(flour.allergen_names().collect::<Vec<_>>(), vec!["gluten", "wheat"]);
    assert!(flour.diet_tags.contains("Dairy Free"));
    assert_eq!(flour.allergen_verification_status, None);
}

#[test]
fn test_csv_with_subset_of_columns() {
    let file = snapshot(".csv", "id,supplierName\na,Harbor\nb,\n");
    let records = load_records(file.path()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].supplier(), Some("Harbor"));
    assert!(records[1].approved);
    assert_eq!(records[1].supplier(), None);
}

#[test]
fn test_csv_invalid_cell_reports_row_and_column() {
    let file = snapshot(".csv", "id,quantity\na,1\nb,plenty\n");
    let err = load_records(file.path()).unwrap_err();
    match &err {
        IngestError::InvalidValue {
            row, column, value, ..
        } => {
            assert_eq!(*row, 2);
            assert_eq!(*column, "quantity");
            assert_eq!(value, "plenty");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("row 2"));
}

#[test]
fn test_csv_unknown_storage_type() {
    let file = snapshot(".csv", "id,storageType\na,cellar\n");
    let err = load_records(file.path()).unwrap_err();
    assert!(matches!(
        err,
        IngestError::InvalidValue {
            column: "storageType",
            ..
        }
    ));
}

#[test]
fn test_csv_missing_id() {
    let file = snapshot(".csv", "id,name\n,Salt\n");
    let err = load_records(file.path()).unwrap_err();
    assert!(matches!(
        err,
        IngestError::MissingValue {
            row: 1,
            column: "id",
            ..
        }
    ));
}

#[test]
fn test_malformed_json() {
    let file = snapshot(".json", "[{\"id\": \"a\",]");
    let err = load_records(file.path()).unwrap_err();
    assert!(matches!(err, IngestError::JsonParse { .. }));
}
