//! Randomized properties of the browsing engine.

use proptest::prelude::*;

use larder_core::{
    Approval, BrowseSession, Choice, ColumnVisibility, ExclusiveChoice, FilterAction,
    FilterState, MultiDimension, StockStatus, TrendDirection, Universe, aggregate,
    default_facets, extract_facets, filter, price_trend, stock_status,
};
use larder_model::{ColumnDefinition, DietTag, Record, StorageType, VerificationStatus};

const SUPPLIERS: [&str; 4] = ["Northfield", "Harbor", "Acme", " "];
const CATEGORIES: [&str; 3] = ["Dairy", "Bakery", "Produce"];
const BRANDS: [&str; 3] = ["Alpine", "Bluebell", "Crest"];
const ALLERGENS: [&str; 4] = ["milk", "egg", "gluten", "soy"];

fn pick(values: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
    proptest::option::of(proptest::sample::select(values).prop_map(String::from))
}

fn amount() -> impl Strategy<Value = Option<f64>> {
    proptest::option::of(-50.0f64..500.0)
}

fn record_strategy() -> impl Strategy<Value = Record> {
    let numbers = (amount(), amount(), amount(), amount());
    let text = (pick(&SUPPLIERS), pick(&CATEGORIES), pick(&BRANDS));
    let sets = (
        proptest::sample::subsequence(ALLERGENS.to_vec(), 0..=ALLERGENS.len()),
        proptest::sample::subsequence(vec!["vegan", "Gluten Free", "halal"], 0..=3),
        any::<bool>(),
        proptest::option::of(proptest::sample::select(StorageType::ALL.to_vec())),
        proptest::option::of(proptest::sample::select(VerificationStatus::ALL.to_vec())),
    );
    (numbers, text, sets).prop_map(
        |(
            (quantity, min_quantity, cost, previous_cost),
            (supplier, category, brand),
            (allergens, diet_tags, approved, storage_type, verification),
        )| {
            let mut record = Record::new("placeholder")
                .with_allergens(allergens)
                .with_diet_tags(diet_tags)
                .with_approved(approved);
            record.quantity = quantity;
            record.min_quantity = min_quantity;
            record.cost = cost;
            record.previous_cost = previous_cost;
            record.supplier_name = supplier;
            record.category = category;
            record.brand = brand;
            record.storage_type = storage_type;
            record.allergen_verification_status = verification;
            record
        },
    )
}

fn universe_strategy() -> impl Strategy<Value = Vec<Record>> {
    proptest::collection::vec(record_strategy(), 0..40).prop_map(|records| {
        records
            .into_iter()
            .enumerate()
            .map(|(index, mut record)| {
                record.id = format!("rec{index}");
                record
            })
            .collect()
    })
}

fn multi_dimension() -> impl Strategy<Value = MultiDimension> {
    proptest::sample::select(MultiDimension::ALL.to_vec())
}

fn facet_value() -> impl Strategy<Value = String> {
    let all: Vec<&'static str> = SUPPLIERS
        .iter()
        .chain(CATEGORIES.iter())
        .chain(BRANDS.iter())
        .chain(ALLERGENS.iter())
        .copied()
        .chain(["Unknown"])
        .collect();
    proptest::sample::select(all).prop_map(String::from)
}

fn exclusive_choice() -> impl Strategy<Value = ExclusiveChoice> {
    fn choice<T: Clone + std::fmt::Debug + 'static>(
        values: Vec<T>,
    ) -> impl Strategy<Value = Choice<T>> {
        proptest::option::of(proptest::sample::select(values))
            .prop_map(|value| value.map_or(Choice::All, Choice::Only))
    }
    prop_oneof![
        choice(DietTag::ALL.to_vec()).prop_map(ExclusiveChoice::Diet),
        choice(VerificationStatus::ALL.to_vec()).prop_map(ExclusiveChoice::Verification),
        choice(vec![Approval::Approved, Approval::Unapproved]).prop_map(ExclusiveChoice::Approval),
        choice(StorageType::ALL.to_vec()).prop_map(ExclusiveChoice::Storage),
        choice(StockStatus::ALL.to_vec()).prop_map(ExclusiveChoice::Stock),
    ]
}

fn action_strategy() -> impl Strategy<Value = FilterAction> {
    prop_oneof![
        4 => (multi_dimension(), facet_value())
            .prop_map(|(dimension, value)| FilterAction::select(dimension, value)),
        2 => (multi_dimension(), facet_value())
            .prop_map(|(dimension, value)| FilterAction::deselect(dimension, value)),
        3 => exclusive_choice().prop_map(FilterAction::set_exclusive),
        1 => Just(FilterAction::ClearAll),
    ]
}

fn state_strategy() -> impl Strategy<Value = FilterState> {
    proptest::collection::vec(action_strategy(), 0..8)
        .prop_map(|actions| FilterState::new().apply_all(&actions))
}

fn ids(records: &[&larder_core::ClassifiedRecord]) -> Vec<String> {
    records.iter().map(|item| item.record.id.clone()).collect()
}

proptest! {
    #[test]
    fn filtering_is_idempotent(records in universe_strategy(), state in state_strategy()) {
        let universe = Universe::new(1, records);
        let first = ids(&filter(&universe, &state));
        let second = ids(&filter(&universe, &state));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn default_state_is_identity(records in universe_strategy()) {
        let expected: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
        let universe = Universe::new(1, records);
        let filtered = filter(&universe, &FilterState::default());
        prop_assert_eq!(filtered.len(), universe.len());
        prop_assert_eq!(ids(&filtered), expected);
    }

    #[test]
    fn filtered_view_preserves_universe_order(
        records in universe_strategy(),
        state in state_strategy(),
    ) {
        let universe = Universe::new(1, records);
        let positions: Vec<usize> = filter(&universe, &state)
            .iter()
            .map(|item| {
                universe
                    .records()
                    .iter()
                    .position(|candidate| candidate.record.id == item.record.id)
                    .unwrap_or(usize::MAX)
            })
            .collect();
        prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn activating_a_dimension_never_grows_the_view(
        records in universe_strategy(),
        state in state_strategy(),
        dimension in multi_dimension(),
        value in facet_value(),
    ) {
        let inactive = state
            .selection(dimension)
            .iter()
            .fold(state.clone(), |acc, selected| {
                acc.apply(&FilterAction::deselect(dimension, selected.clone()))
            });
        prop_assert!(inactive.selection(dimension).is_empty());
        let universe = Universe::new(1, records);
        let before = filter(&universe, &inactive).len();
        let narrowed = inactive.apply(&FilterAction::select(dimension, value));
        prop_assert!(filter(&universe, &narrowed).len() <= before);
    }

    #[test]
    fn setting_an_exclusive_choice_never_grows_the_view(
        records in universe_strategy(),
        state in state_strategy(),
        choice in exclusive_choice(),
    ) {
        let inactive = state.apply(&FilterAction::set_exclusive(ExclusiveChoice::all(
            choice.dimension(),
        )));
        let universe = Universe::new(1, records);
        let before = filter(&universe, &inactive).len();
        let narrowed = inactive.apply(&FilterAction::set_exclusive(choice));
        prop_assert!(filter(&universe, &narrowed).len() <= before);
    }

    #[test]
    fn widening_a_selection_never_shrinks_the_view(
        records in universe_strategy(),
        state in state_strategy(),
        dimension in multi_dimension(),
        seed in facet_value().prop_filter("non-blank", |value| !value.trim().is_empty()),
        value in facet_value(),
    ) {
        let active = state.apply(&FilterAction::select(dimension, seed));
        prop_assert!(!active.selection(dimension).is_empty());
        let universe = Universe::new(1, records);
        let before = filter(&universe, &active).len();
        let widened = active.apply(&FilterAction::select(dimension, value));
        prop_assert!(filter(&universe, &widened).len() >= before);
    }

    #[test]
    fn facet_counts_ignore_filter_state(
        records in universe_strategy(),
        actions in proptest::collection::vec(action_strategy(), 1..8),
    ) {
        let mut session = BrowseSession::new(
            default_facets(),
            ColumnVisibility::new(Vec::new(), Vec::<String>::new()),
        );
        session.refresh(records);
        let before = session.facets().clone();
        for action in &actions {
            session.dispatch(action);
            prop_assert_eq!(session.facets(), &before);
        }
        prop_assert_eq!(
            &extract_facets(session.universe(), &default_facets()),
            &before
        );
    }

    #[test]
    fn classifiers_are_total(
        quantity in proptest::option::of(any::<f64>()),
        min_quantity in proptest::option::of(any::<f64>()),
        cost in proptest::option::of(any::<f64>()),
        previous_cost in proptest::option::of(any::<f64>()),
    ) {
        let mut record = Record::new("r");
        record.quantity = quantity;
        record.min_quantity = min_quantity;
        record.cost = cost;
        record.previous_cost = previous_cost;

        let status = stock_status(&record);
        prop_assert!(StockStatus::ALL.contains(&status));

        let trend = price_trend(&record);
        prop_assert!(matches!(
            trend.direction,
            TrendDirection::Stable | TrendDirection::Increase | TrendDirection::Decrease
        ));
        prop_assert!(!trend.percent.is_nan());
        prop_assert!(!trend.exact_percent().is_nan());
        prop_assert!(!trend.severe || trend.direction == TrendDirection::Increase);
    }

    #[test]
    fn stock_value_matches_reference_sum(
        records in universe_strategy(),
        state in state_strategy(),
    ) {
        let universe = Universe::new(1, records);
        let visible = filter(&universe, &state);
        let view = aggregate(visible.iter().copied());

        let mut reference = 0.0f64;
        for item in &visible {
            let quantity = match item.record.quantity {
                Some(q) => q,
                None => 0.0,
            };
            let cost = match item.record.cost {
                Some(c) => c,
                None => 0.0,
            };
            reference += quantity * cost;
        }
        prop_assert!(!view.stock_value.is_nan());
        prop_assert!((view.stock_value - reference).abs() <= 1e-6 * reference.abs().max(1.0));
        prop_assert_eq!(view.total, visible.len());
        prop_assert_eq!(view.ok + view.low + view.negative, view.total);
    }

    #[test]
    fn always_visible_column_survives_any_toggles(
        keys in proptest::collection::vec(
            proptest::sample::select(vec!["name", "cost", "brand", "ghost"]),
            0..20,
        ),
    ) {
        let mut visibility = ColumnVisibility::new(
            vec![
                ColumnDefinition::new("name", "Name", 0).pinned(),
                ColumnDefinition::new("cost", "Cost", 1),
                ColumnDefinition::new("brand", "Brand", 2),
            ],
            ["brand"],
        );
        for key in keys {
            visibility.toggle(key);
            prop_assert!(!visibility.is_hidden("name"));
            prop_assert_eq!(visibility.visible_columns()[0].key.as_str(), "name");
        }
    }
}
