//! Faceted browsing engine for inventory snapshots.
//!
//! Data flows one way:
//!
//! ```text
//! RecordStore -> Universe (classified records)
//!             -> facet options        (whole universe)
//!             -> filtered records     (FilterState predicate, universe order)
//!             -> aggregates           (filtered records only)
//! ```
//!
//! Column visibility is tracked independently. Every function is pure over
//! its inputs; [`BrowseSession`] only decides when to recompute.
//!
//! # Example
//!
//! ```ignore
//! use larder_core::{BrowseSession, ColumnVisibility, FilterAction, MultiDimension, default_facets};
//!
//! let mut session = BrowseSession::new(default_facets(), ColumnVisibility::new(columns, ["brand"]));
//! session.refresh(records);
//! session.dispatch(&FilterAction::select(MultiDimension::Supplier, "Northfield"));
//! println!("{} visible, {:.2} in stock", session.filtered_len(), session.aggregates().stock_value);
//! ```

pub mod aggregate;
pub mod classify;
pub mod columns;
pub mod dimension;
pub mod facet;
pub mod filter;
pub mod session;
pub mod summary;
pub mod universe;

pub use aggregate::{AggregateView, aggregate, stock_value};
pub use classify::{
    Classification, PRICE_ALERT_PERCENT, PriceTrend, SEVERE_INCREASE_PERCENT,
    STABLE_BAND_PERCENT, StockStatus, TrendDirection, classify, price_trend, stock_status,
    verification_status,
};
pub use columns::ColumnVisibility;
pub use dimension::{Dimension, ExclusiveDimension, Extractor, FacetValue, MultiDimension};
pub use facet::{
    FacetDefinition, FacetOption, FacetOptions, FacetOptionsView, SortPolicy, default_facets,
    extract_facets, facet_options,
};
pub use filter::{
    Approval, Choice, ExclusiveChoice, FilterAction, FilterState, filter, filter_indices, matches,
};
pub use session::BrowseSession;
pub use summary::{ActiveFilterDescriptor, active_filter_count, active_filters};
pub use universe::{ClassifiedRecord, RecordStore, Universe};
