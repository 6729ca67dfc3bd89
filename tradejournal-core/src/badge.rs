//! Badge counts shown next to facet headers and on the filter button.
//!
//! Formula: number of selected options across multi-select facets, plus one
//! for each tri-state flag that is set. Single-select and range facets do
//! not contribute. Stale ids are not counted.

use crate::catalog::{FacetCatalog, FacetKind};
use crate::state::FilterState;

/// Badge for one facet.
pub fn facet_badge(state: &FilterState, catalog: &FacetCatalog, facet: &str) -> usize {
    let Some(group) = catalog.facet(facet) else {
        return 0;
    };
    match group.kind {
        FacetKind::MultiSelect => state
            .selected(facet)
            .iter()
            .filter(|id| group.has_option(id))
            .count(),
        FacetKind::TriState => usize::from(state.flag(facet).is_set()),
        FacetKind::SingleSelect | FacetKind::DateRange | FacetKind::Text => 0,
    }
}

/// Selected options inside one category of a two-level facet.
pub fn category_badge(
    state: &FilterState,
    catalog: &FacetCatalog,
    facet: &str,
    category: &str,
) -> usize {
    let Some(group) = catalog.facet(facet) else {
        return 0;
    };
    state
        .selected(facet)
        .iter()
        .filter_map(|id| group.option(id))
        .filter(|o| o.parent.as_deref() == Some(category))
        .count()
}

/// Sum of every facet badge.
pub fn badge_count(state: &FilterState, catalog: &FacetCatalog) -> usize {
    catalog
        .facets()
        .iter()
        .map(|f| facet_badge(state, catalog, &f.id))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FacetValue, TriState};

    fn state_with(entries: Vec<(&str, FacetValue)>) -> (FacetCatalog, FilterState) {
        let catalog = FacetCatalog::default_journal();
        let mut state = FilterState::empty(&catalog);
        for (facet, value) in entries {
            state.facets.insert(facet.to_string(), value);
        }
        (catalog, state)
    }

    #[test]
    fn counts_options_and_active_flag() {
        let (c, s) = state_with(vec![
            ("grades", FacetValue::Multi(vec!["a".into(), "b".into()])),
            ("emotions", FacetValue::Multi(vec!["fomo".into()])),
            ("favorites", FacetValue::Flag(TriState::False)),
            ("outcome", FacetValue::Single(Some("win".into()))),
        ]);
        assert_eq!(facet_badge(&s, &c, "grades"), 2);
        assert_eq!(facet_badge(&s, &c, "favorites"), 1);
        assert_eq!(facet_badge(&s, &c, "outcome"), 0);
        assert_eq!(badge_count(&s, &c), 4);
    }

    #[test]
    fn stale_ids_do_not_count() {
        let (c, s) = state_with(vec![(
            "grades",
            FacetValue::Multi(vec!["a".into(), "gone".into()]),
        )]);
        assert_eq!(badge_count(&s, &c), 1);
        assert_eq!(facet_badge(&s, &c, "missing"), 0);
    }

    #[test]
    fn category_badges() {
        let (c, s) = state_with(vec![(
            "strategies",
            FacetValue::Multi(vec![
                "turtle-soup".into(),
                "ote".into(),
                "smt-divergence".into(),
            ]),
        )]);
        assert_eq!(category_badge(&s, &c, "strategies", "reversal"), 2);
        assert_eq!(category_badge(&s, &c, "strategies", "continuation"), 1);
        assert_eq!(category_badge(&s, &c, "strategies", "breakout"), 0);
    }
}
