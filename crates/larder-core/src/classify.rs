//! Derived labels computed from a record's raw fields.
//!
//! All functions here are total: absent or non-finite numbers are read as
//! their documented default and no result is ever NaN.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use larder_model::{ModelError, Record, VerificationStatus, normalize_token};

/// Price movements smaller than this (in percent, either direction) are stable.
pub const STABLE_BAND_PERCENT: f64 = 0.5;

/// Increases strictly above this percentage are flagged as severe.
pub const SEVERE_INCREASE_PERCENT: f64 = 10.0;

/// Increases strictly above this percentage count toward the price-alert KPI.
pub const PRICE_ALERT_PERCENT: f64 = 5.0;

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

// =============================================================================
// STOCK STATUS
// =============================================================================

/// Stock level bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StockStatus {
    Ok,
    Low,
    Negative,
}

impl StockStatus {
    /// All variants in display order.
    pub const ALL: [Self; 3] = [Self::Ok, Self::Low, Self::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Low => "low",
            Self::Negative => "negative",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Low => "Low stock",
            Self::Negative => "Negative stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "ok" | "in-stock" => Ok(Self::Ok),
            "low" | "low-stock" => Ok(Self::Low),
            "negative" | "negative-stock" => Ok(Self::Negative),
            _ => Err(ModelError::UnknownValue {
                kind: "stock status",
                value: s.to_string(),
            }),
        }
    }
}

/// Classify stock: negative quantity first, then at-or-below a positive minimum.
///
/// Missing quantity and minimum both read as 0, so a record without a
/// positive minimum can never be [`StockStatus::Low`].
pub fn stock_status(record: &Record) -> StockStatus {
    let quantity = finite(record.quantity).unwrap_or(0.0);
    let minimum = finite(record.min_quantity).unwrap_or(0.0);
    if quantity < 0.0 {
        StockStatus::Negative
    } else if minimum > 0.0 && quantity <= minimum {
        StockStatus::Low
    } else {
        StockStatus::Ok
    }
}

// =============================================================================
// PRICE TREND
// =============================================================================

/// Direction of the latest cost change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendDirection {
    Stable,
    Increase,
    Decrease,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Increase => "increase",
            Self::Decrease => "decrease",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price trend of a record relative to its previous cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceTrend {
    pub direction: TrendDirection,
    /// Signed percentage change rounded to one decimal.
    pub percent: f64,
    /// Increase strictly above [`SEVERE_INCREASE_PERCENT`].
    pub severe: bool,
    #[serde(skip)]
    exact_percent: f64,
}

impl PriceTrend {
    /// Unrounded percentage; thresholds are compared against this value.
    pub fn exact_percent(&self) -> f64 {
        self.exact_percent
    }

    /// Increase strictly above [`PRICE_ALERT_PERCENT`].
    pub fn is_price_alert(&self) -> bool {
        self.direction == TrendDirection::Increase && self.exact_percent > PRICE_ALERT_PERCENT
    }
}

fn round_one_decimal(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if !rounded.is_finite() {
        value
    } else if rounded == 0.0 {
        // fold -0.0
        0.0
    } else {
        rounded
    }
}

/// Compare current cost against previous cost.
///
/// A missing previous cost means no history: it reads as the current cost and
/// the trend is stable. A non-positive previous cost yields 0%.
pub fn price_trend(record: &Record) -> PriceTrend {
    let current = finite(record.cost).unwrap_or(0.0);
    let previous = finite(record.previous_cost).unwrap_or(current);
    let exact_percent = if previous > 0.0 {
        // multiply first so that exact decimal ratios stay exact (110 vs 100 is 10.0)
        ((current - previous) * 100.0 / previous).clamp(f64::MIN, f64::MAX)
    } else {
        0.0
    };
    let direction = if exact_percent.abs() < STABLE_BAND_PERCENT {
        TrendDirection::Stable
    } else if exact_percent > 0.0 {
        TrendDirection::Increase
    } else {
        TrendDirection::Decrease
    };
    PriceTrend {
        direction,
        percent: round_one_decimal(exact_percent),
        severe: direction == TrendDirection::Increase && exact_percent > SEVERE_INCREASE_PERCENT,
        exact_percent,
    }
}

// =============================================================================
// VERIFICATION
// =============================================================================

/// Allergen verification status, absent meaning unverified.
pub fn verification_status(record: &Record) -> VerificationStatus {
    record.allergen_verification_status.unwrap_or_default()
}

// =============================================================================
// COMBINED
// =============================================================================

/// All derived labels for one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub stock: StockStatus,
    pub trend: PriceTrend,
    pub verification: VerificationStatus,
}

pub fn classify(record: &Record) -> Classification {
    Classification {
        stock: stock_status(record),
        trend: price_trend(record),
        verification: verification_status(record),
    }
}
