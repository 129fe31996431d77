//! Active-filter chips and counts.

use serde::Serialize;

use crate::dimension::{Dimension, ExclusiveDimension, MultiDimension};
use crate::filter::{ExclusiveChoice, FilterAction, FilterState};

/// One active constraint, with the action that removes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFilterDescriptor {
    pub dimension: Dimension,
    /// Machine value (selected value, or the exclusive choice's code).
    pub value: String,
    /// Chip text, e.g. `Supplier: Northfield`.
    pub label: String,
    pub removal: FilterAction,
}

/// Number of dimensions not in their default state.
pub fn active_filter_count(state: &FilterState) -> usize {
    let multi = MultiDimension::ALL
        .iter()
        .filter(|dimension| !state.selection(**dimension).is_empty())
        .count();
    let exclusive = ExclusiveDimension::ALL
        .iter()
        .filter(|dimension| !state.exclusive(**dimension).is_all())
        .count();
    multi + exclusive
}

/// One descriptor per selected value and per non-"all" exclusive choice.
pub fn active_filters(state: &FilterState) -> Vec<ActiveFilterDescriptor> {
    let mut descriptors = Vec::new();
    for dimension in MultiDimension::ALL {
        for value in state.selection(dimension) {
            descriptors.push(ActiveFilterDescriptor {
                dimension: dimension.into(),
                value: value.clone(),
                label: format!("{}: {}", dimension.label(), value),
                removal: FilterAction::deselect(dimension, value.clone()),
            });
        }
    }
    for dimension in ExclusiveDimension::ALL {
        let choice = state.exclusive(dimension);
        if choice.is_all() {
            continue;
        }
        let (value, label) = choice.value_and_label();
        descriptors.push(ActiveFilterDescriptor {
            dimension: dimension.into(),
            value: value.to_string(),
            label: format!("{}: {}", dimension.label(), label),
            removal: FilterAction::set_exclusive(ExclusiveChoice::all(dimension)),
        });
    }
    descriptors
}
