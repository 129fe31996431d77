use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use larder_cli::columns::{EMPTY_CELL, cell_text, format_money};
use larder_core::{
    AggregateView, BrowseSession, ClassifiedRecord, ColumnVisibility, StockStatus,
    TrendDirection,
};
use larder_model::VerificationStatus;

use crate::commands::BrowseOutcome;

/// Columns whose values are numbers.
const NUMERIC_COLUMNS: [&str; 5] = ["quantity", "min_quantity", "cost", "price_trend", "value"];

pub fn print_browse(outcome: &BrowseOutcome) {
    let session = &outcome.session;
    print_active_filters(session);

    let columns = session.visible_columns();
    let filtered = session.filtered();
    let shown = outcome
        .row_limit
        .map_or(filtered.len(), |limit| limit.min(filtered.len()));

    let mut table = Table::new();
    table.set_header(columns.iter().map(|column| header_cell(&column.label)));
    apply_table_style(&mut table);
    for (index, column) in columns.iter().enumerate() {
        if NUMERIC_COLUMNS.contains(&column.key.as_str()) {
            align_column(&mut table, index, CellAlignment::Right);
        }
    }
    for item in filtered.iter().take(shown) {
        table.add_row(
            columns
                .iter()
                .map(|column| record_cell(&column.key, item)),
        );
    }
    println!("{table}");
    if shown < filtered.len() {
        println!(
            "{} more rows not shown (--max-rows 0 prints all)",
            filtered.len() - shown
        );
    }
    print_aggregates(session.aggregates(), session.universe().len());
}

fn print_active_filters(session: &BrowseSession) {
    let chips = session.active_filters();
    if chips.is_empty() {
        println!("Filters: none");
    } else {
        let labels: Vec<&str> = chips.iter().map(|chip| chip.label.as_str()).collect();
        println!("Filters ({}): {}", session.active_filter_count(), labels.join(", "));
    }
}

fn print_aggregates(view: &AggregateView, universe_len: usize) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Records"),
        header_cell("OK"),
        header_cell("Low stock"),
        header_cell("Negative"),
        header_cell("Price alerts"),
        header_cell("Severe"),
        header_cell("Stock value"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(format!("{} / {}", view.total, universe_len)).add_attribute(Attribute::Bold),
        count_cell(view.ok, Color::Green),
        count_cell(view.low, Color::Yellow),
        count_cell(view.negative, Color::Red),
        count_cell(view.price_alerts, Color::Yellow),
        count_cell(view.severe_increases, Color::Red),
        Cell::new(format_money(view.stock_value))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_facets(session: &BrowseSession) {
    let facets = session.facets();
    println!(
        "Snapshot: {} records (version {})",
        session.universe().len(),
        facets.universe_version
    );
    for facet in &facets.facets {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell(&format!("{} ({})", facet.id.label(), facet.options.len())),
            header_cell("Records"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        if facet.options.is_empty() {
            table.add_row(vec![dim_cell("no values"), dim_cell(EMPTY_CELL)]);
        }
        for option in &facet.options {
            table.add_row(vec![Cell::new(&option.label), Cell::new(option.count)]);
        }
        println!("{table}");
    }
}

pub fn print_columns(visibility: &ColumnVisibility) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Label"),
        header_cell("Visibility"),
    ]);
    apply_table_style(&mut table);
    for column in visibility.columns() {
        let state = if column.always_visible {
            Cell::new("always").fg(Color::Cyan)
        } else if visibility.is_hidden(&column.key) {
            dim_cell("hidden")
        } else {
            Cell::new("visible").fg(Color::Green)
        };
        table.add_row(vec![
            Cell::new(&column.key),
            Cell::new(&column.label),
            state,
        ]);
    }
    println!("{table}");
}

fn record_cell(key: &str, item: &ClassifiedRecord) -> Cell {
    let text = cell_text(key, item).unwrap_or_else(|| EMPTY_CELL.to_string());
    if text == EMPTY_CELL {
        return dim_cell(text);
    }
    let classification = &item.classification;
    match key {
        "name" => Cell::new(text).add_attribute(Attribute::Bold),
        "stock_status" => Cell::new(text).fg(stock_color(classification.stock)),
        "price_trend" => {
            let trend = &classification.trend;
            match trend.direction {
                TrendDirection::Increase if trend.severe => {
                    Cell::new(text).fg(Color::Red).add_attribute(Attribute::Bold)
                }
                TrendDirection::Increase if trend.is_price_alert() => {
                    Cell::new(text).fg(Color::Yellow)
                }
                TrendDirection::Increase => Cell::new(text),
                TrendDirection::Decrease => Cell::new(text).fg(Color::Green),
                TrendDirection::Stable => dim_cell(text),
            }
        }
        "verification" => match classification.verification {
            VerificationStatus::Verified => Cell::new(text).fg(Color::Green),
            VerificationStatus::Partial => Cell::new(text).fg(Color::Yellow),
            VerificationStatus::Unverified => dim_cell(text),
        },
        "approved" if !item.record.approved => Cell::new(text).fg(Color::Red),
        _ => Cell::new(text),
    }
}

fn stock_color(status: StockStatus) -> Color {
    match status {
        StockStatus::Ok => Color::Green,
        StockStatus::Low => Color::Yellow,
        StockStatus::Negative => Color::Red,
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
