//! Column visibility tracking.

use std::collections::BTreeSet;

use larder_model::ColumnDefinition;
use tracing::warn;

/// Hidden-column set over a fixed list of declared columns.
///
/// Columns flagged `always_visible` never enter the hidden set, whether
/// through the default set or through [`ColumnVisibility::toggle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnVisibility {
    columns: Vec<ColumnDefinition>,
    defaults: BTreeSet<String>,
    hidden: BTreeSet<String>,
}

impl ColumnVisibility {
    /// Declare columns and the default hidden set.
    ///
    /// Unknown keys and always-visible keys in `default_hidden` are dropped.
    pub fn new<I, S>(mut columns: Vec<ColumnDefinition>, default_hidden: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // stable: equal orders keep declaration position
        columns.sort_by_key(|column| column.order);
        let mut defaults = BTreeSet::new();
        for key in default_hidden {
            let key = key.as_ref();
            match columns.iter().find(|column| column.key == key) {
                Some(column) if column.always_visible => {
                    warn!(column = key, "ignoring always-visible column in default hidden set");
                }
                Some(_) => {
                    defaults.insert(key.to_string());
                }
                None => warn!(column = key, "ignoring unknown column in default hidden set"),
            }
        }
        Self {
            columns,
            hidden: defaults.clone(),
            defaults,
        }
    }

    fn column(&self, key: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|column| column.key == key)
    }

    /// Flip a column's visibility. Returns true if the hidden set changed.
    ///
    /// No-op for always-visible and undeclared columns.
    pub fn toggle(&mut self, key: &str) -> bool {
        let hidden = self.hidden.contains(key);
        self.set_hidden(key, !hidden)
    }

    /// Hide or show a column. Returns true if the hidden set changed.
    pub fn set_hidden(&mut self, key: &str, hidden: bool) -> bool {
        let Some(column) = self.column(key) else {
            return false;
        };
        if column.always_visible {
            return false;
        }
        if hidden {
            self.hidden.insert(key.to_string())
        } else {
            self.hidden.remove(key)
        }
    }

    /// Restore the default hidden set.
    pub fn reset(&mut self) {
        self.hidden = self.defaults.clone();
    }

    pub fn is_hidden(&self, key: &str) -> bool {
        self.hidden.contains(key)
    }

    pub fn hidden(&self) -> &BTreeSet<String> {
        &self.hidden
    }

    /// All declared columns, in declared order.
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// Declared columns minus hidden ones, in declared order.
    pub fn visible_columns(&self) -> Vec<&ColumnDefinition> {
        self.columns
            .iter()
            .filter(|column| !self.hidden.contains(&column.key))
            .collect()
    }
}
