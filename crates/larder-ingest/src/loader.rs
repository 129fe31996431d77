//! Format dispatch for snapshot files.

use std::path::Path;
use std::time::Instant;

use larder_model::Record;
use tracing::{info, info_span};

use crate::delimited::read_csv_records;
use crate::error::{IngestError, Result};
use crate::json::read_json_records;

/// On-disk snapshot format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Csv,
}

impl SnapshotFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Load every record of a snapshot file, in file order.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let format = SnapshotFormat::from_path(path)?;
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let span = info_span!("load_snapshot", path = %path.display(), format = format.as_str());
    let _guard = span.enter();
    let start = Instant::now();

    let records = match format {
        SnapshotFormat::Json => read_json_records(path)?,
        SnapshotFormat::Csv => read_csv_records(path)?,
    };

    info!(
        records = records.len(),
        duration_ms = start.elapsed().as_millis(),
        "snapshot loaded"
    );
    Ok(records)
}
