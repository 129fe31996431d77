//! Inventory data model shared by the larder crates.

pub mod column;
pub mod enums;
pub mod error;
pub mod record;

pub use column::ColumnDefinition;
pub use enums::{DietTag, StorageType, VerificationStatus, normalize_token};
pub use error::{ModelError, Result};
pub use record::Record;
