//! KPI rollups over the visible records.

use serde::Serialize;

use larder_model::Record;

use crate::classify::StockStatus;
use crate::universe::ClassifiedRecord;

/// Counts and totals over one record subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AggregateView {
    pub total: usize,
    pub ok: usize,
    pub low: usize,
    pub negative: usize,
    /// Increases above the price-alert threshold.
    pub price_alerts: usize,
    /// Increases above the severe threshold (a subset of `price_alerts`).
    pub severe_increases: usize,
    /// Sum of quantity × cost, absent or non-finite factors read as 0.
    pub stock_value: f64,
}

impl AggregateView {
    /// Count for one stock bucket.
    pub fn stock_count(&self, status: StockStatus) -> usize {
        match status {
            StockStatus::Ok => self.ok,
            StockStatus::Low => self.low,
            StockStatus::Negative => self.negative,
        }
    }
}

/// Value of the stock held for one record.
pub fn stock_value(record: &Record) -> f64 {
    let quantity = record.quantity.filter(|v| v.is_finite()).unwrap_or(0.0);
    let cost = record.cost.filter(|v| v.is_finite()).unwrap_or(0.0);
    let value = quantity * cost;
    if value.is_finite() { value } else { 0.0 }
}

/// Single pass over `records`.
pub fn aggregate<'a, I>(records: I) -> AggregateView
where
    I: IntoIterator<Item = &'a ClassifiedRecord>,
{
    let mut view = AggregateView::default();
    for item in records {
        let classification = &item.classification;
        view.total += 1;
        match classification.stock {
            StockStatus::Ok => view.ok += 1,
            StockStatus::Low => view.low += 1,
            StockStatus::Negative => view.negative += 1,
        }
        if classification.trend.is_price_alert() {
            view.price_alerts += 1;
        }
        if classification.trend.severe {
            view.severe_increases += 1;
        }
        view.stock_value += stock_value(&item.record);
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classified(records: Vec<Record>) -> Vec<ClassifiedRecord> {
        records.into_iter().map(ClassifiedRecord::new).collect()
    }

    #[test]
    fn test_empty_subset() {
        let view = aggregate(&Vec::new());
        assert_eq!(view, AggregateView::default());
    }

    #[test]
    fn test_buckets_and_alerts() {
        let records = classified(vec![
            Record::new("1").with_quantity(5.0).with_min_quantity(10.0),
            Record::new("2").with_quantity(-2.0),
            Record::new("3")
                .with_quantity(20.0)
                .with_cost(12.0)
                .with_previous_cost(10.0),
            Record::new("4").with_cost(10.5).with_previous_cost(10.0),
        ]);
        let view = aggregate(&records);
        assert_eq!(view.total, 4);
        assert_eq!(view.ok, 2);
        assert_eq!(view.low, 1);
        assert_eq!(view.negative, 1);
        assert_eq!(view.stock_count(StockStatus::Negative), 1);
        // 20% is an alert and severe; 5% is neither
        assert_eq!(view.price_alerts, 1);
        assert_eq!(view.severe_increases, 1);
        assert_eq!(view.stock_value, 240.0);
    }

    #[test]
    fn test_missing_factors_are_zero() {
        let mut no_cost = Record::new("1").with_quantity(3.0);
        no_cost.cost = None;
        let nan_quantity = Record::new("2").with_quantity(f64::NAN).with_cost(4.0);
        let records = classified(vec![no_cost, nan_quantity, Record::new("3")]);
        let view = aggregate(&records);
        assert_eq!(view.stock_value, 0.0);
        assert!(!view.stock_value.is_nan());
    }

    #[test]
    fn test_negative_quantity_contributes_negative_value() {
        let records = classified(vec![
            Record::new("1").with_quantity(-2.0).with_cost(3.0),
            Record::new("2").with_quantity(4.0).with_cost(0.5),
        ]);
        assert_eq!(aggregate(&records).stock_value, -4.0);
    }
}
