//! CSV snapshots with a camelCase header row.
//!
//! Empty cells are absent values. List columns (`allergens`, `dietTags`)
//! separate entries with `;` or `|`.

use std::collections::BTreeSet;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use larder_model::{Record, StorageType, VerificationStatus};
use serde::Deserialize;

use crate::error::{IngestError, Result};

/// One CSV row as written, before interpretation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordCsvRow {
    id: Option<String>,
    name: Option<String>,
    unit: Option<String>,
    quantity: Option<String>,
    min_quantity: Option<String>,
    cost: Option<String>,
    previous_cost: Option<String>,
    category: Option<String>,
    subcategory: Option<String>,
    brand: Option<String>,
    supplier_name: Option<String>,
    allergens: Option<String>,
    diet_tags: Option<String>,
    approved: Option<String>,
    storage_type: Option<String>,
    allergen_verification_status: Option<String>,
    updated_at: Option<String>,
}

/// Read a CSV snapshot file.
pub fn read_csv_records(path: &Path) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| IngestError::CsvRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut records = Vec::new();
    for (index, result) in reader.deserialize::<RecordCsvRow>().enumerate() {
        let row = result.map_err(|e| IngestError::CsvRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let context = RowContext {
            path,
            row: index + 1,
        };
        records.push(context.record(row)?);
    }
    Ok(records)
}

/// Split a list cell on `;` or `|`, dropping blank entries.
pub fn split_list(cell: &str) -> BTreeSet<String> {
    cell.split([';', '|'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Interpret an approval cell.
pub fn parse_flag(cell: &str) -> Option<bool> {
    match cell.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Position of the row being converted, for error messages.
struct RowContext<'a> {
    path: &'a Path,
    /// 1-based data row; the header is not counted.
    row: usize,
}

impl RowContext<'_> {
    fn record(&self, row: RecordCsvRow) -> Result<Record> {
        let id = non_empty(row.id).ok_or_else(|| IngestError::MissingValue {
            path: self.path.to_path_buf(),
            row: self.row,
            column: "id",
        })?;

        let mut record = Record::new(id);
        record.name = non_empty(row.name);
        record.unit = non_empty(row.unit);
        record.quantity = self.number("quantity", row.quantity)?;
        record.min_quantity = self.number("minQuantity", row.min_quantity)?;
        record.cost = self.number("cost", row.cost)?;
        record.previous_cost = self.number("previousCost", row.previous_cost)?;
        record.category = non_empty(row.category);
        record.subcategory = non_empty(row.subcategory);
        record.brand = non_empty(row.brand);
        record.supplier_name = non_empty(row.supplier_name);
        record.allergens = row.allergens.as_deref().map(split_list).unwrap_or_default();
        record.diet_tags = row.diet_tags.as_deref().map(split_list).unwrap_or_default();
        if let Some(cell) = non_empty(row.approved) {
            record.approved = parse_flag(&cell).ok_or_else(|| {
                self.invalid("approved", &cell, "expected true/false, yes/no or 1/0")
            })?;
        }
        record.storage_type = self.parsed::<StorageType>("storageType", row.storage_type)?;
        record.allergen_verification_status = self.parsed::<VerificationStatus>(
            "allergenVerificationStatus",
            row.allergen_verification_status,
        )?;
        record.updated_at = self.timestamp("updatedAt", row.updated_at)?;
        Ok(record)
    }

    fn invalid(&self, column: &'static str, value: &str, reason: impl Into<String>) -> IngestError {
        IngestError::InvalidValue {
            path: self.path.to_path_buf(),
            row: self.row,
            column,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    fn number(&self, column: &'static str, cell: Option<String>) -> Result<Option<f64>> {
        let Some(cell) = non_empty(cell) else {
            return Ok(None);
        };
        cell.parse::<f64>()
            .map(Some)
            .map_err(|e| self.invalid(column, &cell, e.to_string()))
    }

    fn parsed<T>(&self, column: &'static str, cell: Option<String>) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let Some(cell) = non_empty(cell) else {
            return Ok(None);
        };
        cell.parse::<T>()
            .map(Some)
            .map_err(|e| self.invalid(column, &cell, e.to_string()))
    }

    fn timestamp(
        &self,
        column: &'static str,
        cell: Option<String>,
    ) -> Result<Option<DateTime<Utc>>> {
        let Some(cell) = non_empty(cell) else {
            return Ok(None);
        };
        DateTime::parse_from_rfc3339(&cell)
            .map(|parsed| Some(parsed.with_timezone(&Utc)))
            .map_err(|e| self.invalid(column, &cell, e.to_string()))
    }
}

fn non_empty(cell: Option<String>) -> Option<String> {
    cell.filter(|value| !value.trim().is_empty())
}
