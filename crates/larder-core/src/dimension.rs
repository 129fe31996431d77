//! Filter dimensions and the record values they read.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use larder_model::{ModelError, Record, normalize_token};

/// Value a record exposes for a facet.
///
/// Set-valued fields (allergens) yield [`FacetValue::Many`] with duplicates
/// removed; an empty set is reported as no value at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetValue<'r> {
    One(&'r str),
    Many(BTreeSet<&'r str>),
}

impl<'r> FacetValue<'r> {
    /// Returns true if the value (or any member of the set) is in `selection`.
    pub fn intersects(&self, selection: &BTreeSet<String>) -> bool {
        match self {
            Self::One(value) => selection.contains(*value),
            Self::Many(values) => values.iter().any(|value| selection.contains(*value)),
        }
    }

    /// Distinct values, in order.
    pub fn values(&self) -> Vec<&'r str> {
        match self {
            Self::One(value) => vec![*value],
            Self::Many(values) => values.iter().copied().collect(),
        }
    }
}

/// Pure function reading a facet value from a record.
pub type Extractor = for<'r> fn(&'r Record) -> Option<FacetValue<'r>>;

fn supplier_value(record: &Record) -> Option<FacetValue<'_>> {
    record.supplier().map(FacetValue::One)
}

fn allergen_values(record: &Record) -> Option<FacetValue<'_>> {
    let values: BTreeSet<&str> = record.allergen_names().collect();
    if values.is_empty() {
        None
    } else {
        Some(FacetValue::Many(values))
    }
}

fn category_value(record: &Record) -> Option<FacetValue<'_>> {
    record.category().map(FacetValue::One)
}

fn subcategory_value(record: &Record) -> Option<FacetValue<'_>> {
    record.subcategory().map(FacetValue::One)
}

fn brand_value(record: &Record) -> Option<FacetValue<'_>> {
    record.brand().map(FacetValue::One)
}

// =============================================================================
// MULTI-SELECT
// =============================================================================

/// Dimensions filtered by a set of selected values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiDimension {
    Supplier,
    Allergen,
    Category,
    Subcategory,
    Brand,
}

impl MultiDimension {
    /// All variants in display order.
    pub const ALL: [Self; 5] = [
        Self::Supplier,
        Self::Allergen,
        Self::Category,
        Self::Subcategory,
        Self::Brand,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supplier => "supplier",
            Self::Allergen => "allergen",
            Self::Category => "category",
            Self::Subcategory => "subcategory",
            Self::Brand => "brand",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Supplier => "Supplier",
            Self::Allergen => "Allergen",
            Self::Category => "Category",
            Self::Subcategory => "Subcategory",
            Self::Brand => "Brand",
        }
    }

    /// The record field this dimension reads.
    pub fn extractor(&self) -> Extractor {
        match self {
            Self::Supplier => supplier_value,
            Self::Allergen => allergen_values,
            Self::Category => category_value,
            Self::Subcategory => subcategory_value,
            Self::Brand => brand_value,
        }
    }
}

impl fmt::Display for MultiDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MultiDimension {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "supplier" | "suppliers" => Ok(Self::Supplier),
            "allergen" | "allergens" => Ok(Self::Allergen),
            "category" | "categories" => Ok(Self::Category),
            "subcategory" | "subcategories" => Ok(Self::Subcategory),
            "brand" | "brands" => Ok(Self::Brand),
            _ => Err(ModelError::UnknownValue {
                kind: "filter dimension",
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// EXCLUSIVE
// =============================================================================

/// Dimensions filtered by one choice from a fixed enum, or "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExclusiveDimension {
    Diet,
    Verification,
    #[serde(rename = "approved")]
    Approval,
    Storage,
    Stock,
}

impl ExclusiveDimension {
    /// All variants in display order.
    pub const ALL: [Self; 5] = [
        Self::Diet,
        Self::Verification,
        Self::Approval,
        Self::Storage,
        Self::Stock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diet => "diet",
            Self::Verification => "verification",
            Self::Approval => "approved",
            Self::Storage => "storage",
            Self::Stock => "stock",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Diet => "Diet",
            Self::Verification => "Verification",
            Self::Approval => "Approval",
            Self::Storage => "Storage",
            Self::Stock => "Stock",
        }
    }
}

impl fmt::Display for ExclusiveDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Either kind of filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Multi(MultiDimension),
    Exclusive(ExclusiveDimension),
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Multi(dimension) => dimension.as_str(),
            Self::Exclusive(dimension) => dimension.as_str(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Multi(dimension) => dimension.label(),
            Self::Exclusive(dimension) => dimension.label(),
        }
    }
}

impl From<MultiDimension> for Dimension {
    fn from(dimension: MultiDimension) -> Self {
        Self::Multi(dimension)
    }
}

impl From<ExclusiveDimension> for Dimension {
    fn from(dimension: ExclusiveDimension) -> Self {
        Self::Exclusive(dimension)
    }
}
