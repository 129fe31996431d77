//! Type-safe enumerations for inventory record fields.
//!
//! Snapshot files carry these as free-form strings. Parsing is lenient about
//! case and separators so that `"Gluten Free"`, `"gluten_free"` and
//! `"gluten-free"` all land on the same variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Normalize a raw token: trim, lowercase, and fold `_` and spaces into `-`.
pub fn normalize_token(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Where an ingredient is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    Ambient,
    Refrigerated,
    Frozen,
}

impl StorageType {
    /// All variants in display order.
    pub const ALL: [Self; 3] = [Self::Ambient, Self::Refrigerated, Self::Frozen];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ambient => "ambient",
            Self::Refrigerated => "refrigerated",
            Self::Frozen => "frozen",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ambient => "Ambient",
            Self::Refrigerated => "Refrigerated",
            Self::Frozen => "Frozen",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "ambient" | "dry" | "room-temperature" => Ok(Self::Ambient),
            "refrigerated" | "chilled" | "fridge" => Ok(Self::Refrigerated),
            "frozen" | "freezer" => Ok(Self::Frozen),
            _ => Err(ModelError::UnknownValue {
                kind: "storage type",
                value: s.to_string(),
            }),
        }
    }
}

/// How thoroughly an ingredient's allergen declaration has been checked.
///
/// A record without a status is treated as [`VerificationStatus::Unverified`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    Partial,
    #[default]
    Unverified,
}

impl VerificationStatus {
    /// All variants in display order.
    pub const ALL: [Self; 3] = [Self::Verified, Self::Partial, Self::Unverified];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Partial => "partial",
            Self::Unverified => "unverified",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Verified => "Verified",
            Self::Partial => "Partially verified",
            Self::Unverified => "Unverified",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "verified" => Ok(Self::Verified),
            "partial" | "partially-verified" => Ok(Self::Partial),
            "unverified" | "not-verified" => Ok(Self::Unverified),
            _ => Err(ModelError::UnknownValue {
                kind: "verification status",
                value: s.to_string(),
            }),
        }
    }
}

/// Fixed set of dietary tags offered by the diet filter.
///
/// Records store their tags as free strings; a record carries a tag when one
/// of its strings normalizes to [`DietTag::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietTag {
    Vegan,
    Vegetarian,
    GlutenFree,
    DairyFree,
    NutFree,
    Halal,
    Kosher,
}

impl DietTag {
    /// All variants in display order.
    pub const ALL: [Self; 7] = [
        Self::Vegan,
        Self::Vegetarian,
        Self::GlutenFree,
        Self::DairyFree,
        Self::NutFree,
        Self::Halal,
        Self::Kosher,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vegan => "vegan",
            Self::Vegetarian => "vegetarian",
            Self::GlutenFree => "gluten-free",
            Self::DairyFree => "dairy-free",
            Self::NutFree => "nut-free",
            Self::Halal => "halal",
            Self::Kosher => "kosher",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Vegan => "Vegan",
            Self::Vegetarian => "Vegetarian",
            Self::GlutenFree => "Gluten-free",
            Self::DairyFree => "Dairy-free",
            Self::NutFree => "Nut-free",
            Self::Halal => "Halal",
            Self::Kosher => "Kosher",
        }
    }

    /// Returns true if a raw tag string denotes this diet.
    pub fn matches_raw(&self, raw: &str) -> bool {
        normalize_token(raw) == self.as_str()
    }
}

impl fmt::Display for DietTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DietTag {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_token(s);
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownValue {
                kind: "diet tag",
                value: s.to_string(),
            })
    }
}
