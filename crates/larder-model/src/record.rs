//! Inventory record schema.
//!
//! Every field except `id` is optional. A missing numeric field is `None`,
//! never zero, so callers decide explicitly how absence is treated.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::enums::{StorageType, VerificationStatus};

/// One inventory ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Stable identifier (numeric ids in snapshots are read as strings).
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub min_quantity: Option<f64>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub previous_cost: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub allergens: BTreeSet<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub diet_tags: BTreeSet<String>,
    #[serde(default = "default_approved", deserialize_with = "null_as_approved")]
    pub approved: bool,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub storage_type: Option<StorageType>,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub allergen_verification_status: Option<VerificationStatus>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_approved() -> bool {
    true
}

/// Explicit `null` reads as the field's default, like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_approved<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_else(default_approved))
}

/// Enum field parsed through its lenient `FromStr`; `null` and blank are absent.
fn lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw.parse().map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Signed(value) => value.to_string(),
        RawId::Unsigned(value) => value.to_string(),
    })
}

/// Trimmed, non-empty view of an optional text field.
fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

impl Record {
    /// Create a record with only an id; everything else absent, `approved` true.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            unit: None,
            quantity: None,
            min_quantity: None,
            cost: None,
            previous_cost: None,
            category: None,
            subcategory: None,
            brand: None,
            supplier_name: None,
            allergens: BTreeSet::new(),
            diet_tags: BTreeSet::new(),
            approved: true,
            storage_type: None,
            allergen_verification_status: None,
            updated_at: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    #[must_use]
    pub fn with_min_quantity(mut self, min_quantity: f64) -> Self {
        self.min_quantity = Some(min_quantity);
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    #[must_use]
    pub fn with_previous_cost(mut self, previous_cost: f64) -> Self {
        self.previous_cost = Some(previous_cost);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    #[must_use]
    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier_name = Some(supplier.into());
        self
    }

    #[must_use]
    pub fn with_allergens<I, S>(mut self, allergens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergens = allergens.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_diet_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.diet_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_approved(mut self, approved: bool) -> Self {
        self.approved = approved;
        self
    }

    #[must_use]
    pub fn with_storage_type(mut self, storage_type: StorageType) -> Self {
        self.storage_type = Some(storage_type);
        self
    }

    #[must_use]
    pub fn with_verification(mut self, status: VerificationStatus) -> Self {
        self.allergen_verification_status = Some(status);
        self
    }

    pub fn category(&self) -> Option<&str> {
        non_blank(self.category.as_ref())
    }

    pub fn subcategory(&self) -> Option<&str> {
        non_blank(self.subcategory.as_ref())
    }

    pub fn brand(&self) -> Option<&str> {
        non_blank(self.brand.as_ref())
    }

    pub fn supplier(&self) -> Option<&str> {
        non_blank(self.supplier_name.as_ref())
    }

    /// Allergens with blank entries skipped, trimmed, in sorted order.
    pub fn allergen_names(&self) -> impl Iterator<Item = &str> {
        self.allergens
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// Display name, falling back to the id.
    pub fn display_name(&self) -> &str {
        non_blank(self.name.as_ref()).unwrap_or(&self.id)
    }
}
