//! Filter bar scenarios: chip contents and ordering after realistic click
//! sequences, plus stale-reference handling across catalog changes.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use tradejournal_core::{
    project, FacetCatalog, FacetGroup, FacetOption, FilterEngine, FilterState, Tag, TriState,
};

fn engine() -> FilterEngine {
    FilterEngine::new(FacetCatalog::default_journal())
}

fn labels(tags: &[Tag]) -> Vec<&str> {
    tags.iter().map(|t| t.label.as_str()).collect()
}

#[test]
fn scenario_select_category_produces_one_chip() {
    // GIVEN an empty filter bar
    let mut e = engine();

    // WHEN the user checks "Order Block Reversal"
    assert!(e.toggle_multi_value("categories", "obr"));

    // THEN state and chips reflect exactly that selection
    assert_eq!(e.state().selected("categories"), ["obr"]);
    assert_eq!(
        e.tags(),
        vec![Tag {
            facet_id: "categories".into(),
            value_id: "obr".into(),
            label: "Order Block Reversal".into(),
        }]
    );
}

#[test]
fn scenario_favorites_cycle_chips() {
    let mut e = engine();

    e.cycle_tri_state("favorites");
    assert_eq!(e.state().flag("favorites"), TriState::True);
    assert_eq!(labels(&e.tags()), vec!["Favorites Only"]);

    e.cycle_tri_state("favorites");
    assert_eq!(e.state().flag("favorites"), TriState::False);
    assert_eq!(labels(&e.tags()), vec!["Non-Favorites"]);

    e.cycle_tri_state("favorites");
    assert_eq!(e.state().flag("favorites"), TriState::Unset);
    assert!(e.tags().is_empty());
}

#[test]
fn scenario_outcome_replaces_rather_than_accumulates() {
    let mut e = engine();
    e.set_single_value("outcome", Some("win"));
    e.set_single_value("outcome", Some("loss"));

    assert_eq!(e.state().single("outcome"), Some("loss"));
    let outcome_chips: Vec<Tag> = e
        .tags()
        .into_iter()
        .filter(|t| t.facet_id == "outcome")
        .collect();
    assert_eq!(outcome_chips.len(), 1);
    assert_eq!(outcome_chips[0].label, "Loss");
}

#[test]
fn scenario_grade_removed_keeps_remaining_slot() {
    let mut e = engine();
    e.toggle_multi_value("grades", "a-plus");
    e.toggle_multi_value("grades", "b");
    e.toggle_multi_value("grades", "a-plus");

    assert_eq!(e.state().selected("grades"), ["b"]);
    assert_eq!(labels(&e.tags()), vec!["B"]);
}

#[test]
fn chips_follow_catalog_then_selection_order() {
    let mut e = engine();
    e.cycle_tri_state("favorites");
    e.toggle_multi_value("context", "range-day");
    e.toggle_multi_value("categories", "bos");
    e.toggle_multi_value("context", "htf-aligned");
    e.set_range(
        "date",
        NaiveDate::from_ymd_opt(2024, 1, 1),
        NaiveDate::from_ymd_opt(2024, 6, 30),
    );

    assert_eq!(
        labels(&e.tags()),
        vec![
            "Break of Structure",
            "Range Day",
            "HTF Aligned",
            "Favorites Only",
            "Date: 2024-01-01 to 2024-06-30",
        ]
    );
}

#[test]
fn observers_see_state_before_projection_is_rederived() {
    let mut e = engine();
    let catalog = e.catalog().clone();
    let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    e.subscribe(move |state: &FilterState| {
        s.borrow_mut().push(project(state, &catalog).len());
    });

    e.toggle_multi_value("grades", "a");
    e.toggle_multi_value("grades", "b");
    e.clear_all();

    assert_eq!(*seen.borrow(), vec![1, 2, 0]);
}

#[test]
fn preset_from_older_catalog_loads_cleanly() {
    // GIVEN a state saved against a catalog that had an extra grade
    let old_catalog = FacetCatalog::new(vec![FacetGroup::multi_select(
        "grades",
        "Grades",
        vec![
            FacetOption::new("a", "A"),
            FacetOption::new("d", "D"),
            FacetOption::new("b", "B"),
        ],
    )])
    .unwrap();
    let mut old = FilterEngine::new(old_catalog);
    old.toggle_multi_value("grades", "a");
    old.toggle_multi_value("grades", "d");
    old.toggle_multi_value("grades", "b");
    let saved = old.state().clone();

    // WHEN it is loaded into the current catalog
    let mut e = engine();
    e.replace_state(saved.clone());

    // THEN the retired grade is gone and the rest keep their order
    assert_eq!(e.state().selected("grades"), ["a", "b"]);
    assert_eq!(labels(&e.tags()), vec!["A", "B"]);

    // AND projecting the raw saved state never panics
    let raw = project(&saved, e.catalog());
    assert_eq!(raw.len(), 2);
}

#[test]
fn remove_chip_round_trip() {
    let mut e = engine();
    e.toggle_multi_value("emotions", "fomo");
    e.toggle_multi_value("emotions", "revenge");
    e.set_single_value("outcome", Some("loss"));

    let fomo = e.tags().into_iter().find(|t| t.value_id == "fomo").unwrap();
    assert!(e.remove_tag(&fomo));
    assert_eq!(labels(&e.tags()), vec!["Revenge", "Loss"]);
    assert_eq!(e.badge_count(), 1);
}

#[test]
fn narrowing_leaves_state_alone() {
    let mut e = engine();
    e.toggle_multi_value("grades", "a");
    let before = e.state().clone();
    let revision = e.revision();

    let narrowed = e.narrowed("fomo");
    assert_eq!(narrowed.facet("emotions").unwrap().options.len(), 1);
    assert_eq!(e.state(), &before);
    assert_eq!(e.revision(), revision);
}
