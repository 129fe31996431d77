//! Host-declared table columns.

use serde::{Deserialize, Serialize};

/// A column the host can show for each record.
///
/// Only `key`, `always_visible` and `order` matter to visibility tracking;
/// `label` is carried through for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub always_visible: bool,
    /// Declared position; lower sorts first.
    pub order: u32,
}

impl ColumnDefinition {
    pub fn new(key: impl Into<String>, label: impl Into<String>, order: u32) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            always_visible: false,
            order,
        }
    }

    /// Mark the column as never hideable.
    #[must_use]
    pub fn pinned(mut self) -> Self {
        self.always_visible = true;
        self
    }
}
