//! Runs the built `larder` binary against small snapshots.

use std::io::Write;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

const SNAPSHOT: &str = r#"[
  {"id": "rec1", "name": "Butter", "supplierName": "A", "quantity": 5, "minQuantity": 10, "cost": 2},
  {"id": "rec2", "name": "Flour", "supplierName": "B", "quantity": -2, "minQuantity": 5, "cost": 1},
  {"id": "rec3", "name": "Sugar", "supplierName": "A", "quantity": 20, "minQuantity": 5, "cost": 1.5}
]"#;

fn snapshot() -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{SNAPSHOT}").unwrap();
    file
}

fn larder(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_larder"))
        .args(["--color", "never", "--config", "/dev/null"])
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_browse_prints_filtered_records() {
    let file = snapshot();
    let output = larder(&["browse", file.path().to_str().unwrap(), "--supplier", "A"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Filters (1): Supplier: A"));
    assert!(stdout.contains("Butter"));
    assert!(stdout.contains("Sugar"));
    assert!(!stdout.contains("Flour"));
    assert!(stdout.contains("2 / 3"));
    assert!(stdout.contains("Low stock"));
}

#[test]
fn test_facets_cover_whole_snapshot() {
    let file = snapshot();
    let output = larder(&["facets", file.path().to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Snapshot: 3 records"));
    assert!(stdout.contains("Supplier (2)"));
}

#[test]
fn test_missing_snapshot_exits_with_error() {
    let output = larder(&["browse", "/nonexistent/pantry.json"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: load snapshot"));
}

#[test]
fn test_unsupported_extension_exits_with_error() {
    let output = larder(&["facets", "pantry.xlsx"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unsupported snapshot format"));
}

#[test]
fn test_column_flags_change_the_table() {
    let file = snapshot();
    let path = file.path().to_str().unwrap();

    let output = larder(&["browse", path]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Cost"));
    assert!(!stdout.contains("Brand"));

    let output = larder(&[
        "browse",
        path,
        "--hide-column",
        "name",
        "--hide-column",
        "cost",
        "--show-column",
        "brand",
        "--hide-column",
        "shelf",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    // the pinned column stays
    assert!(stdout.contains("Name"));
    assert!(stdout.contains("Butter"));
    assert!(!stdout.contains("Cost"));
    assert!(stdout.contains("Brand"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("column is always visible"));
    assert!(stderr.contains("unknown column key"));
}
