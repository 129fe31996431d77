//! Record store and the immutable snapshot it hands out.
//!
//! A [`Universe`] is the complete set of loaded records, each annotated with
//! its [`Classification`] once at load time. Refreshes replace the whole
//! snapshot and bump its version; nothing is patched in place.

use std::sync::Arc;

use larder_model::Record;
use tracing::debug;

use crate::classify::{Classification, classify};

/// A record together with its derived labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRecord {
    pub record: Record,
    pub classification: Classification,
}

impl ClassifiedRecord {
    pub fn new(record: Record) -> Self {
        let classification = classify(&record);
        Self {
            record,
            classification,
        }
    }
}

impl From<Record> for ClassifiedRecord {
    fn from(record: Record) -> Self {
        Self::new(record)
    }
}

/// Immutable, versioned snapshot of all loaded records.
///
/// Cloning is cheap; clones share the same records.
#[derive(Debug, Clone)]
pub struct Universe {
    version: u64,
    records: Arc<[ClassifiedRecord]>,
}

impl Default for Universe {
    fn default() -> Self {
        Self::empty()
    }
}

impl Universe {
    /// Version 0, no records.
    pub fn empty() -> Self {
        Self {
            version: 0,
            records: Arc::from(Vec::new()),
        }
    }

    /// Classify `records` and freeze them under `version`.
    pub fn new(version: u64, records: Vec<Record>) -> Self {
        let classified: Vec<ClassifiedRecord> =
            records.into_iter().map(ClassifiedRecord::new).collect();
        Self {
            version,
            records: Arc::from(classified),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn records(&self) -> &[ClassifiedRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&ClassifiedRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns true if both handles point at the same snapshot.
    pub fn same_snapshot(&self, other: &Universe) -> bool {
        self.version == other.version && Arc::ptr_eq(&self.records, &other.records)
    }
}

/// Holder of the current [`Universe`].
///
/// The loader feeds it complete record sequences; every call to
/// [`RecordStore::replace`] produces a new snapshot with a higher version.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    current: Universe,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole snapshot.
    pub fn replace(&mut self, records: Vec<Record>) -> &Universe {
        let version = self.current.version + 1;
        self.current = Universe::new(version, records);
        debug!(version, records = self.current.len(), "universe replaced");
        &self.current
    }

    pub fn current(&self) -> &Universe {
        &self.current
    }
}
