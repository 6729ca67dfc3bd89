//! Property tests for filter engine invariants.
//!
//! Uses proptest to verify:
//! 1. Projection is idempotent
//! 2. Tri-state cycling is total with period three
//! 3. Toggling twice restores the set and the order of other ids
//! 4. Reselecting a single-select value clears it
//! 5. Stale ids never reach the projection
//! 6. clear_all resets everything with one notification
//! 7. Multi-select sets stay duplicate-free and catalog-valid

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;
use tradejournal_core::{
    project, FacetCatalog, FacetKind, FacetValue, FilterEngine, FilterState, TriState,
};

// ── Strategies (proptest) ────────────────────────────────────────────

fn catalog() -> FacetCatalog {
    FacetCatalog::default_journal()
}

/// (facet, option) pairs for every multi-select option in the catalog.
fn multi_pairs() -> Vec<(String, String)> {
    catalog()
        .facets()
        .iter()
        .filter(|f| f.kind == FacetKind::MultiSelect)
        .flat_map(|f| f.options.iter().map(move |o| (f.id.clone(), o.id.clone())))
        .collect()
}

#[derive(Debug, Clone)]
enum Op {
    Toggle(usize),
    CycleFavorites,
    Outcome(usize),
    ClearOutcome,
    Range(Option<u32>, Option<u32>),
    ClearAll,
}

fn arb_op() -> impl Strategy<Value = Op> {
    let pairs = multi_pairs().len();
    prop_oneof![
        4 => (0..pairs).prop_map(Op::Toggle),
        1 => Just(Op::CycleFavorites),
        1 => (0..3usize).prop_map(Op::Outcome),
        1 => Just(Op::ClearOutcome),
        1 => (proptest::option::of(1..365u32), proptest::option::of(1..365u32))
            .prop_map(|(a, b)| Op::Range(a, b)),
        1 => Just(Op::ClearAll),
    ]
}

fn apply(engine: &mut FilterEngine, op: &Op) {
    let pairs = multi_pairs();
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    match op {
        Op::Toggle(i) => {
            let (facet, option) = &pairs[*i];
            engine.toggle_multi_value(facet, option);
        }
        Op::CycleFavorites => {
            engine.cycle_tri_state("favorites");
        }
        Op::Outcome(i) => {
            let id = ["win", "loss", "breakeven"][*i];
            engine.set_single_value("outcome", Some(id));
        }
        Op::ClearOutcome => {
            engine.set_single_value("outcome", None);
        }
        Op::Range(from, to) => {
            let day = |d: &Option<u32>| d.map(|n| base + chrono::Duration::days(n as i64));
            engine.set_range("date", day(from), day(to));
        }
        Op::ClearAll => engine.clear_all(),
    }
}

fn engine_after(ops: &[Op]) -> FilterEngine {
    let mut engine = FilterEngine::new(catalog());
    for op in ops {
        apply(&mut engine, op);
    }
    engine
}

proptest! {
    #[test]
    fn projection_is_idempotent(ops in prop::collection::vec(arb_op(), 0..40)) {
        let engine = engine_after(&ops);
        let first = project(engine.state(), engine.catalog());
        let second = project(engine.state(), engine.catalog());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn tri_state_has_period_three(ops in prop::collection::vec(arb_op(), 0..20)) {
        let mut engine = engine_after(&ops);
        let start = engine.state().flag("favorites");
        let mut seen = vec![start];
        for _ in 0..3 {
            engine.cycle_tri_state("favorites");
            seen.push(engine.state().flag("favorites"));
        }
        prop_assert_eq!(seen[3], start);
        // No state skipped: the first three are pairwise distinct.
        prop_assert!(seen[0] != seen[1] && seen[1] != seen[2] && seen[0] != seen[2]);
    }

    #[test]
    fn toggle_twice_is_identity(
        ops in prop::collection::vec(arb_op(), 0..40),
        pick in 0..multi_pairs().len(),
    ) {
        let mut engine = engine_after(&ops);
        let before = engine.state().clone();
        let (facet, option) = multi_pairs()[pick].clone();
        engine.toggle_multi_value(&facet, &option);
        engine.toggle_multi_value(&facet, &option);

        // Membership restored; every other id keeps its relative order.
        let after = engine.state();
        let others = |s: &FilterState| -> Vec<String> {
            s.selected(&facet).iter().filter(|id| **id != option).cloned().collect()
        };
        prop_assert_eq!(others(&before), others(after));
        prop_assert_eq!(
            before.selected(&facet).contains(&option),
            after.selected(&facet).contains(&option)
        );
        for (id, value) in &before.facets {
            if *id != facet {
                prop_assert_eq!(Some(value), after.value(id));
            }
        }
    }

    #[test]
    fn reselect_clears_single(ops in prop::collection::vec(arb_op(), 0..20), pick in 0..3usize) {
        let mut engine = engine_after(&ops);
        let id = ["win", "loss", "breakeven"][pick];
        engine.set_single_value("outcome", Some(id));
        engine.set_single_value("outcome", Some(id));
        prop_assert_eq!(engine.state().single("outcome"), None);
    }

    #[test]
    fn stale_ids_never_projected(
        ops in prop::collection::vec(arb_op(), 0..20),
        stale in "[a-z]{3,8}-retired",
    ) {
        let engine = engine_after(&ops);
        let mut state = engine.state().clone();
        let mut grades = state.selected("grades").to_vec();
        grades.insert(0, stale.clone());
        state.facets.insert("grades".into(), FacetValue::Multi(grades));
        state.facets.insert("outcome".into(), FacetValue::Single(Some(stale.clone())));

        let tags = project(&state, engine.catalog());
        prop_assert!(tags.iter().all(|t| t.value_id != stale));
        prop_assert!(tags.iter().all(|t| !t.label.is_empty()));
    }

    #[test]
    fn clear_all_is_atomic(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut engine = engine_after(&ops);
        let hits = Rc::new(Cell::new(0usize));
        let h = hits.clone();
        engine.subscribe(move |_: &FilterState| h.set(h.get() + 1));

        engine.clear_all();

        prop_assert_eq!(hits.get(), 1);
        prop_assert!(engine.state().is_clear());
        prop_assert_eq!(engine.state(), &FilterState::empty(engine.catalog()));
        prop_assert_eq!(engine.state().flag("favorites"), TriState::Unset);
    }

    #[test]
    fn multi_sets_stay_valid(ops in prop::collection::vec(arb_op(), 0..60)) {
        let engine = engine_after(&ops);
        for facet in engine.catalog().facets() {
            let ids = engine.state().selected(&facet.id);
            for (i, id) in ids.iter().enumerate() {
                prop_assert!(facet.has_option(id));
                prop_assert!(!ids[i + 1..].contains(id));
            }
        }
    }
}
