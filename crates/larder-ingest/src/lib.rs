//! Inventory snapshot loading.
//!
//! Snapshots are the local stand-in for a live record source: a JSON or CSV
//! file holding the full record set, loaded wholesale on every refresh.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use larder_ingest::load_records;
//!
//! let records = load_records(Path::new("pantry.json"))?;
//! ```

mod delimited;
mod error;
mod json;
mod loader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Loading ===
pub use delimited::{parse_flag, read_csv_records, split_list};
pub use json::{parse_json_records, read_json_records};
pub use loader::{SnapshotFormat, load_records};
