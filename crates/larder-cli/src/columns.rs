//! Column catalogue for the records table and plain-text cell rendering.

use larder_core::{ClassifiedRecord, ColumnVisibility, TrendDirection, stock_value};
use larder_model::ColumnDefinition;

/// Columns hidden unless the config says otherwise.
pub const DEFAULT_HIDDEN: [&str; 5] = [
    "subcategory",
    "brand",
    "min_quantity",
    "diet_tags",
    "updated_at",
];

/// Placeholder for absent values.
pub const EMPTY_CELL: &str = "-";

/// Every column the records table can show, in display order.
pub fn column_catalogue() -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::new("name", "Name", 0).pinned(),
        ColumnDefinition::new("category", "Category", 10),
        ColumnDefinition::new("subcategory", "Subcategory", 20),
        ColumnDefinition::new("brand", "Brand", 30),
        ColumnDefinition::new("supplier", "Supplier", 40),
        ColumnDefinition::new("quantity", "Quantity", 50),
        ColumnDefinition::new("min_quantity", "Min", 60),
        ColumnDefinition::new("stock_status", "Stock", 70),
        ColumnDefinition::new("cost", "Cost", 80),
        ColumnDefinition::new("price_trend", "Trend", 90),
        ColumnDefinition::new("value", "Value", 100),
        ColumnDefinition::new("allergens", "Allergens", 110),
        ColumnDefinition::new("diet_tags", "Diet", 120),
        ColumnDefinition::new("storage", "Storage", 130),
        ColumnDefinition::new("verification", "Verification", 140),
        ColumnDefinition::new("approved", "Approved", 150),
        ColumnDefinition::new("updated_at", "Updated", 160),
    ]
}

/// Whether `key` names a catalogue column.
pub fn is_known_column(key: &str) -> bool {
    column_catalogue().iter().any(|column| column.key == key)
}

/// Visibility state over the catalogue with `hidden` as the default set.
pub fn column_visibility<S: AsRef<str>>(hidden: &[S]) -> ColumnVisibility {
    ColumnVisibility::new(column_catalogue(), hidden)
}

/// Text shown for `key` in one row; `None` for keys outside the catalogue.
pub fn cell_text(key: &str, item: &ClassifiedRecord) -> Option<String> {
    let record = &item.record;
    let classification = &item.classification;
    let text = match key {
        "name" => record.display_name().to_string(),
        "category" => or_empty(record.category()),
        "subcategory" => or_empty(record.subcategory()),
        "brand" => or_empty(record.brand()),
        "supplier" => or_empty(record.supplier()),
        "quantity" => match record.quantity {
            Some(quantity) => with_unit(quantity, record.unit.as_deref()),
            None => EMPTY_CELL.to_string(),
        },
        "min_quantity" => match record.min_quantity {
            Some(minimum) => with_unit(minimum, record.unit.as_deref()),
            None => EMPTY_CELL.to_string(),
        },
        "stock_status" => classification.stock.label().to_string(),
        "cost" => record
            .cost
            .map_or_else(|| EMPTY_CELL.to_string(), format_money),
        "price_trend" => match classification.trend.direction {
            TrendDirection::Stable => "stable".to_string(),
            TrendDirection::Increase | TrendDirection::Decrease => {
                format!("{:+.1}%", classification.trend.percent)
            }
        },
        "value" => format_money(stock_value(record)),
        "allergens" => join_or_empty(record.allergen_names()),
        "diet_tags" => join_or_empty(record.diet_tags.iter().map(String::as_str)),
        "storage" => record
            .storage_type
            .map_or_else(|| EMPTY_CELL.to_string(), |storage| storage.label().to_string()),
        "verification" => classification.verification.label().to_string(),
        "approved" => (if record.approved { "yes" } else { "no" }).to_string(),
        "updated_at" => record.updated_at.map_or_else(
            || EMPTY_CELL.to_string(),
            |at| at.format("%Y-%m-%d %H:%M").to_string(),
        ),
        _ => return None,
    };
    Some(text)
}

/// Two decimals.
pub fn format_money(value: f64) -> String {
    format!("{value:.2}")
}

/// Whole numbers without decimals, everything else with up to two.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn with_unit(value: f64, unit: Option<&str>) -> String {
    match unit.map(str::trim).filter(|unit| !unit.is_empty()) {
        Some(unit) => format!("{} {unit}", format_quantity(value)),
        None => format_quantity(value),
    }
}

fn or_empty(value: Option<&str>) -> String {
    value.unwrap_or(EMPTY_CELL).to_string()
}

fn join_or_empty<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let joined = values.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        EMPTY_CELL.to_string()
    } else {
        joined
    }
}
