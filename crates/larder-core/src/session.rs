//! Browse session - one universe, one filter state, and the views derived
//! from them.
//!
//! # Invalidation
//!
//! Derived views are recomputed eagerly by the mutation that invalidates
//! them, never on read:
//!
//! | mutation            | facets | filtered + aggregates |
//! |---------------------|--------|-----------------------|
//! | [`refresh`]         | yes    | yes                   |
//! | [`dispatch`]        | no     | yes (if state changed)|
//! | column visibility   | no     | no                    |
//!
//! [`refresh`]: BrowseSession::refresh
//! [`dispatch`]: BrowseSession::dispatch

use larder_model::{ColumnDefinition, Record};
use tracing::{debug, info_span};

use crate::aggregate::{AggregateView, aggregate};
use crate::columns::ColumnVisibility;
use crate::facet::{FacetDefinition, FacetOptionsView, extract_facets};
use crate::filter::{FilterAction, FilterState, filter_indices};
use crate::summary::{ActiveFilterDescriptor, active_filter_count, active_filters};
use crate::universe::{ClassifiedRecord, RecordStore, Universe};

/// State of one browsing session.
#[derive(Debug, Clone)]
pub struct BrowseSession {
    store: RecordStore,
    facet_definitions: Vec<FacetDefinition>,
    facets: FacetOptionsView,
    filters: FilterState,
    visible: Vec<usize>,
    aggregates: AggregateView,
    columns: ColumnVisibility,
}

impl BrowseSession {
    /// Start with an empty universe and the default filter state.
    pub fn new(facet_definitions: Vec<FacetDefinition>, columns: ColumnVisibility) -> Self {
        let store = RecordStore::new();
        let facets = extract_facets(store.current(), &facet_definitions);
        Self {
            store,
            facet_definitions,
            facets,
            filters: FilterState::default(),
            visible: Vec::new(),
            aggregates: AggregateView::default(),
            columns,
        }
    }

    /// Replace the universe wholesale.
    ///
    /// The filter state is kept; selections that no longer occur in the new
    /// records are legal and just match nothing.
    pub fn refresh(&mut self, records: Vec<Record>) {
        let span = info_span!("refresh", records = records.len());
        let _guard = span.enter();
        self.store.replace(records);
        self.facets = extract_facets(self.store.current(), &self.facet_definitions);
        self.recompute_view();
    }

    /// Apply a filter transition. Returns true if the state changed.
    pub fn dispatch(&mut self, action: &FilterAction) -> bool {
        let next = self.filters.apply(action);
        if next == self.filters {
            debug!(?action, "filter action left state unchanged");
            return false;
        }
        // whole-state swap: observers never see a partially applied action
        self.filters = next;
        self.recompute_view();
        true
    }

    /// Reset every dimension in one transition.
    pub fn clear_all(&mut self) -> bool {
        self.dispatch(&FilterAction::ClearAll)
    }

    pub fn toggle_column(&mut self, key: &str) -> bool {
        self.columns.toggle(key)
    }

    pub fn set_column_hidden(&mut self, key: &str, hidden: bool) -> bool {
        self.columns.set_hidden(key, hidden)
    }

    fn recompute_view(&mut self) {
        let universe = self.store.current();
        self.visible = filter_indices(universe, &self.filters, &self.facet_definitions);
        self.aggregates = aggregate(self.visible.iter().filter_map(|&i| universe.get(i)));
        debug!(
            universe_version = universe.version(),
            universe_len = universe.len(),
            visible = self.visible.len(),
            active_filters = active_filter_count(&self.filters),
            "view recomputed"
        );
    }

    pub fn universe(&self) -> &Universe {
        self.store.current()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn facets(&self) -> &FacetOptionsView {
        &self.facets
    }

    /// Visible records in universe order.
    pub fn filtered(&self) -> Vec<&ClassifiedRecord> {
        let universe = self.store.current();
        self.visible
            .iter()
            .filter_map(|&index| universe.get(index))
            .collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.visible.len()
    }

    pub fn aggregates(&self) -> &AggregateView {
        &self.aggregates
    }

    pub fn columns(&self) -> &ColumnVisibility {
        &self.columns
    }

    pub fn visible_columns(&self) -> Vec<&ColumnDefinition> {
        self.columns.visible_columns()
    }

    pub fn active_filters(&self) -> Vec<ActiveFilterDescriptor> {
        active_filters(&self.filters)
    }

    pub fn active_filter_count(&self) -> usize {
        active_filter_count(&self.filters)
    }
}
