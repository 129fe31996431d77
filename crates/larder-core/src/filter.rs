//! Filter state, its transitions, and the predicate built from it.
//!
//! # Combination rule
//!
//! Active dimensions are ANDed. Inside a multi-select dimension the selected
//! values are ORed: a record matches when its value (or any member of its
//! value set) is selected. An exclusive dimension left at [`Choice::All`] is
//! skipped. Selected values that no record carries are legal and simply
//! match nothing for that dimension.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use larder_model::{DietTag, ModelError, StorageType, VerificationStatus, normalize_token};

use crate::classify::StockStatus;
use crate::dimension::{ExclusiveDimension, Extractor, MultiDimension};
use crate::facet::FacetDefinition;
use crate::universe::{ClassifiedRecord, Universe};

// =============================================================================
// EXCLUSIVE CHOICES
// =============================================================================

/// Exclusive selection: the "all" sentinel or exactly one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: Copy + PartialEq> Choice<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// The selected value, if any.
    pub fn selected(&self) -> Option<T> {
        match self {
            Self::All => None,
            Self::Only(value) => Some(*value),
        }
    }

    /// Returns true for "all" or when `value` is the chosen one.
    pub fn admits(&self, value: T) -> bool {
        match self {
            Self::All => true,
            Self::Only(chosen) => *chosen == value,
        }
    }
}

/// Approval filter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Approval {
    Approved,
    Unapproved,
}

impl Approval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Unapproved => "unapproved",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Unapproved => "Not approved",
        }
    }

    pub fn admits(&self, approved: bool) -> bool {
        match self {
            Self::Approved => approved,
            Self::Unapproved => !approved,
        }
    }
}

impl fmt::Display for Approval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Approval {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "approved" | "yes" | "true" => Ok(Self::Approved),
            "unapproved" | "not-approved" | "no" | "false" => Ok(Self::Unapproved),
            _ => Err(ModelError::UnknownValue {
                kind: "approval",
                value: s.to_string(),
            }),
        }
    }
}

/// A value for one exclusive dimension, used by [`FilterAction::SetExclusive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "dimension", content = "choice", rename_all = "lowercase")]
pub enum ExclusiveChoice {
    Diet(Choice<DietTag>),
    Verification(Choice<VerificationStatus>),
    Approval(Choice<Approval>),
    Storage(Choice<StorageType>),
    Stock(Choice<StockStatus>),
}

impl ExclusiveChoice {
    /// The "all" choice for `dimension`.
    pub fn all(dimension: ExclusiveDimension) -> Self {
        match dimension {
            ExclusiveDimension::Diet => Self::Diet(Choice::All),
            ExclusiveDimension::Verification => Self::Verification(Choice::All),
            ExclusiveDimension::Approval => Self::Approval(Choice::All),
            ExclusiveDimension::Storage => Self::Storage(Choice::All),
            ExclusiveDimension::Stock => Self::Stock(Choice::All),
        }
    }

    pub fn dimension(&self) -> ExclusiveDimension {
        match self {
            Self::Diet(_) => ExclusiveDimension::Diet,
            Self::Verification(_) => ExclusiveDimension::Verification,
            Self::Approval(_) => ExclusiveDimension::Approval,
            Self::Storage(_) => ExclusiveDimension::Storage,
            Self::Stock(_) => ExclusiveDimension::Stock,
        }
    }

    pub fn is_all(&self) -> bool {
        match self {
            Self::Diet(choice) => choice.is_all(),
            Self::Verification(choice) => choice.is_all(),
            Self::Approval(choice) => choice.is_all(),
            Self::Storage(choice) => choice.is_all(),
            Self::Stock(choice) => choice.is_all(),
        }
    }

    /// Machine value and display label of the chosen option ("all" included).
    pub fn value_and_label(&self) -> (&'static str, &'static str) {
        fn pick<T: Copy + PartialEq>(
            choice: &Choice<T>,
            f: impl Fn(T) -> (&'static str, &'static str),
        ) -> (&'static str, &'static str) {
            choice.selected().map_or(("all", "All"), f)
        }
        match self {
            Self::Diet(choice) => pick(choice, |v| (v.as_str(), v.label())),
            Self::Verification(choice) => pick(choice, |v| (v.as_str(), v.label())),
            Self::Approval(choice) => pick(choice, |v| (v.as_str(), v.label())),
            Self::Storage(choice) => pick(choice, |v| (v.as_str(), v.label())),
            Self::Stock(choice) => pick(choice, |v| (v.as_str(), v.label())),
        }
    }
}

// =============================================================================
// FILTER STATE
// =============================================================================

/// The user's current selections. Immutable: transitions return a new state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FilterState {
    suppliers: BTreeSet<String>,
    allergens: BTreeSet<String>,
    categories: BTreeSet<String>,
    subcategories: BTreeSet<String>,
    brands: BTreeSet<String>,
    diet: Choice<DietTag>,
    verification: Choice<VerificationStatus>,
    approval: Choice<Approval>,
    storage: Choice<StorageType>,
    stock: Choice<StockStatus>,
}

/// A user action on the filter state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FilterAction {
    Select {
        dimension: MultiDimension,
        value: String,
    },
    Deselect {
        dimension: MultiDimension,
        value: String,
    },
    SetExclusive {
        choice: ExclusiveChoice,
    },
    ClearAll,
}

impl FilterAction {
    pub fn select(dimension: MultiDimension, value: impl Into<String>) -> Self {
        Self::Select {
            dimension,
            value: value.into(),
        }
    }

    pub fn deselect(dimension: MultiDimension, value: impl Into<String>) -> Self {
        Self::Deselect {
            dimension,
            value: value.into(),
        }
    }

    pub fn set_exclusive(choice: ExclusiveChoice) -> Self {
        Self::SetExclusive { choice }
    }
}

impl FilterState {
    /// The default state: nothing selected, every exclusive dimension at "all".
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one transition, returning the resulting state.
    ///
    /// Values are trimmed; selecting an empty value is a no-op.
    #[must_use]
    pub fn apply(&self, action: &FilterAction) -> Self {
        match action {
            FilterAction::ClearAll => Self::default(),
            FilterAction::Select { dimension, value } => {
                let value = value.trim();
                let mut next = self.clone();
                if !value.is_empty() {
                    next.selection_mut(*dimension).insert(value.to_string());
                }
                next
            }
            FilterAction::Deselect { dimension, value } => {
                let mut next = self.clone();
                next.selection_mut(*dimension).remove(value.trim());
                next
            }
            FilterAction::SetExclusive { choice } => {
                let mut next = self.clone();
                match *choice {
                    ExclusiveChoice::Diet(c) => next.diet = c,
                    ExclusiveChoice::Verification(c) => next.verification = c,
                    ExclusiveChoice::Approval(c) => next.approval = c,
                    ExclusiveChoice::Storage(c) => next.storage = c,
                    ExclusiveChoice::Stock(c) => next.stock = c,
                }
                next
            }
        }
    }

    /// Apply a sequence of transitions in order.
    #[must_use]
    pub fn apply_all<'a>(&self, actions: impl IntoIterator<Item = &'a FilterAction>) -> Self {
        actions
            .into_iter()
            .fold(self.clone(), |state, action| state.apply(action))
    }

    fn selection_mut(&mut self, dimension: MultiDimension) -> &mut BTreeSet<String> {
        match dimension {
            MultiDimension::Supplier => &mut self.suppliers,
            MultiDimension::Allergen => &mut self.allergens,
            MultiDimension::Category => &mut self.categories,
            MultiDimension::Subcategory => &mut self.subcategories,
            MultiDimension::Brand => &mut self.brands,
        }
    }

    /// Selected values of a multi-select dimension.
    pub fn selection(&self, dimension: MultiDimension) -> &BTreeSet<String> {
        match dimension {
            MultiDimension::Supplier => &self.suppliers,
            MultiDimension::Allergen => &self.allergens,
            MultiDimension::Category => &self.categories,
            MultiDimension::Subcategory => &self.subcategories,
            MultiDimension::Brand => &self.brands,
        }
    }

    /// Current choice of an exclusive dimension.
    pub fn exclusive(&self, dimension: ExclusiveDimension) -> ExclusiveChoice {
        match dimension {
            ExclusiveDimension::Diet => ExclusiveChoice::Diet(self.diet),
            ExclusiveDimension::Verification => ExclusiveChoice::Verification(self.verification),
            ExclusiveDimension::Approval => ExclusiveChoice::Approval(self.approval),
            ExclusiveDimension::Storage => ExclusiveChoice::Storage(self.storage),
            ExclusiveDimension::Stock => ExclusiveChoice::Stock(self.stock),
        }
    }

    /// Returns true if no dimension constrains the view.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Evaluate the predicate against one record, reading every
    /// multi-select dimension from its own record field.
    pub fn matches(&self, item: &ClassifiedRecord) -> bool {
        self.matches_with(item, &[])
    }

    /// Evaluate the predicate reading multi-select values through `facets`.
    ///
    /// A dimension with a declared facet uses that facet's extractor, so a
    /// selected option matches exactly the records its count was taken
    /// over. Undeclared dimensions fall back to their own field.
    pub fn matches_with(&self, item: &ClassifiedRecord, facets: &[FacetDefinition]) -> bool {
        let record = &item.record;
        let classification = &item.classification;

        let multi_ok = MultiDimension::ALL.iter().all(|dimension| {
            let selection = self.selection(*dimension);
            if selection.is_empty() {
                return true;
            }
            extractor_for(*dimension, facets)(record)
                .is_some_and(|value| value.intersects(selection))
        });
        if !multi_ok {
            return false;
        }

        let diet_ok = match self.diet {
            Choice::All => true,
            Choice::Only(tag) => record.diet_tags.iter().any(|raw| tag.matches_raw(raw)),
        };
        let storage_ok = match self.storage {
            Choice::All => true,
            Choice::Only(storage) => record.storage_type == Some(storage),
        };
        let approval_ok = match self.approval {
            Choice::All => true,
            Choice::Only(approval) => approval.admits(record.approved),
        };

        diet_ok
            && storage_ok
            && approval_ok
            && self.verification.admits(classification.verification)
            && self.stock.admits(classification.stock)
    }
}

/// First declared facet for `dimension`, else the dimension's own field.
fn extractor_for(dimension: MultiDimension, facets: &[FacetDefinition]) -> Extractor {
    facets
        .iter()
        .find(|facet| facet.id == dimension)
        .map_or_else(|| dimension.extractor(), |facet| facet.extractor)
}

/// Pure predicate form of [`FilterState::matches`].
pub fn matches(state: &FilterState, item: &ClassifiedRecord) -> bool {
    state.matches(item)
}

/// Records of `universe` matching `state`, in universe order.
pub fn filter<'u>(universe: &'u Universe, state: &FilterState) -> Vec<&'u ClassifiedRecord> {
    universe
        .records()
        .iter()
        .filter(|item| state.matches(item))
        .collect()
}

/// Positions in `universe` of the records matching `state`, ascending.
///
/// Multi-select values are read through `facets` as in
/// [`FilterState::matches_with`].
pub fn filter_indices(
    universe: &Universe,
    state: &FilterState,
    facets: &[FacetDefinition],
) -> Vec<usize> {
    universe
        .records()
        .iter()
        .enumerate()
        .filter(|(_, item)| state.matches_with(item, facets))
        .map(|(index, _)| index)
        .collect()
}
