//! Facet option extraction.
//!
//! Option counts are always taken over the whole [`Universe`], never over
//! the filtered view, so an unselected value shows how many records it
//! would add. Records without a value for a facet are left out of that
//! facet's options only.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::dimension::{Extractor, FacetValue, MultiDimension};
use crate::universe::Universe;

/// How a facet's options are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortPolicy {
    /// Most frequent first; ties by label ascending.
    ByCountDesc,
    /// Label ascending; counts ignored.
    ByLabelAsc,
}

/// A declared facet: which dimension it feeds, how values are read, how
/// options sort.
#[derive(Debug, Clone, Copy)]
pub struct FacetDefinition {
    pub id: MultiDimension,
    pub extractor: Extractor,
    pub sort: SortPolicy,
}

impl FacetDefinition {
    /// Facet reading the dimension's own field.
    pub fn new(id: MultiDimension, sort: SortPolicy) -> Self {
        Self {
            id,
            extractor: id.extractor(),
            sort,
        }
    }

    #[must_use]
    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }
}

/// The stock facet list: supplier and allergens by frequency, the
/// category hierarchy and brand alphabetically.
pub fn default_facets() -> Vec<FacetDefinition> {
    vec![
        FacetDefinition::new(MultiDimension::Supplier, SortPolicy::ByCountDesc),
        FacetDefinition::new(MultiDimension::Allergen, SortPolicy::ByCountDesc),
        FacetDefinition::new(MultiDimension::Category, SortPolicy::ByLabelAsc),
        FacetDefinition::new(MultiDimension::Subcategory, SortPolicy::ByLabelAsc),
        FacetDefinition::new(MultiDimension::Brand, SortPolicy::ByLabelAsc),
    ]
}

/// One selectable value of a facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
    pub count: usize,
}

/// Options of one facet, already sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOptions {
    pub id: MultiDimension,
    pub options: Vec<FacetOption>,
}

/// Options for every declared facet, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetOptionsView {
    /// Version of the universe these options were computed from.
    pub universe_version: u64,
    pub facets: Vec<FacetOptions>,
}

impl FacetOptionsView {
    pub fn get(&self, id: MultiDimension) -> Option<&[FacetOption]> {
        self.facets
            .iter()
            .find(|facet| facet.id == id)
            .map(|facet| facet.options.as_slice())
    }

    /// Count shown for `value`, or 0 when the facet doesn't offer it.
    pub fn count(&self, id: MultiDimension, value: &str) -> usize {
        self.get(id)
            .and_then(|options| options.iter().find(|option| option.value == value))
            .map_or(0, |option| option.count)
    }
}

fn compare_labels(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn sort_options(options: &mut [FacetOption], policy: SortPolicy) {
    match policy {
        SortPolicy::ByCountDesc => options.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| compare_labels(&a.label, &b.label))
        }),
        SortPolicy::ByLabelAsc => options.sort_by(|a, b| compare_labels(&a.label, &b.label)),
    }
}

/// Distinct values and counts for one facet.
pub fn facet_options(universe: &Universe, definition: &FacetDefinition) -> Vec<FacetOption> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for item in universe.records() {
        let Some(value) = (definition.extractor)(&item.record) else {
            continue;
        };
        // a record counts once per distinct value
        let distinct: BTreeSet<&str> = match value {
            FacetValue::One(single) => BTreeSet::from([single]),
            FacetValue::Many(values) => values,
        };
        for value in distinct {
            *counts.entry(value).or_insert(0) += 1;
        }
    }

    let mut options: Vec<FacetOption> = counts
        .into_iter()
        .map(|(value, count)| FacetOption {
            value: value.to_string(),
            label: value.to_string(),
            count,
        })
        .collect();
    sort_options(&mut options, definition.sort);
    options
}

/// Options for every facet in `definitions`.
pub fn extract_facets(universe: &Universe, definitions: &[FacetDefinition]) -> FacetOptionsView {
    let facets: Vec<FacetOptions> = definitions
        .iter()
        .map(|definition| FacetOptions {
            id: definition.id,
            options: facet_options(universe, definition),
        })
        .collect();
    debug!(
        universe_version = universe.version(),
        facet_count = facets.len(),
        option_count = facets.iter().map(|f| f.options.len()).sum::<usize>(),
        "facet options extracted"
    );
    FacetOptionsView {
        universe_version: universe.version(),
        facets,
    }
}
