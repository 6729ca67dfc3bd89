//! Evaluate a `FilterState` against journal records.
//!
//! Within a multi-select facet any selected option matches (OR); facets
//! combine with AND. A facet a record does not expose never excludes it.
//! Ids the catalog no longer knows are ignored, so a stale preset narrows
//! by whatever still resolves.

use chrono::NaiveDate;

use tradejournal_core::{FacetCatalog, FacetKind, FilterState};

use crate::trade::TradeEntry;

/// Facet accessors a record offers to the matcher.
pub trait Filterable {
    /// Option ids held for `facet`, or `None` if the record has no such field.
    fn facet_values(&self, facet: &str) -> Option<Vec<&str>>;

    fn facet_flag(&self, facet: &str) -> Option<bool>;

    fn facet_date(&self, facet: &str) -> Option<NaiveDate>;

    /// Haystack for free-text facets.
    fn search_text(&self) -> String;
}

impl Filterable for TradeEntry {
    fn facet_values(&self, facet: &str) -> Option<Vec<&str>> {
        match facet {
            "categories" => Some(vec![self.category.as_str()]),
            "setups" => Some(vec![self.setup.as_str()]),
            "grades" => Some(vec![self.grade.as_str()]),
            "context" => Some(self.context_tags.iter().map(String::as_str).collect()),
            "emotions" => Some(self.emotions.iter().map(String::as_str).collect()),
            "strategies" => Some(self.strategy.iter().map(String::as_str).collect()),
            "outcome" => Some(vec![self.outcome.id()]),
            _ => None,
        }
    }

    fn facet_flag(&self, facet: &str) -> Option<bool> {
        match facet {
            "favorites" => Some(self.favorite),
            _ => None,
        }
    }

    fn facet_date(&self, facet: &str) -> Option<NaiveDate> {
        match facet {
            "date" => Some(self.date),
            _ => None,
        }
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.symbol, self.setup, self.notes)
    }
}

/// Whether `record` satisfies every active facet of `state`.
pub fn matches<T: Filterable>(record: &T, state: &FilterState, catalog: &FacetCatalog) -> bool {
    catalog.facets().iter().all(|facet| {
        let id = facet.id.as_str();
        match facet.kind {
            FacetKind::MultiSelect => {
                let wanted: Vec<&str> = state
                    .selected(id)
                    .iter()
                    .map(String::as_str)
                    .filter(|o| facet.has_option(o))
                    .collect();
                if wanted.is_empty() {
                    return true;
                }
                record
                    .facet_values(id)
                    .map_or(true, |held| held.iter().any(|h| wanted.contains(h)))
            }
            FacetKind::TriState => match state.flag(id).as_bool() {
                None => true,
                Some(want) => record.facet_flag(id).map_or(true, |held| held == want),
            },
            FacetKind::SingleSelect => match state.single(id).filter(|o| facet.has_option(o)) {
                None => true,
                Some(want) => record
                    .facet_values(id)
                    .map_or(true, |held| held.contains(&want)),
            },
            FacetKind::DateRange => {
                let range = state.range(id);
                if range.is_unbounded() {
                    return true;
                }
                record.facet_date(id).map_or(true, |d| range.contains(d))
            }
            FacetKind::Text => {
                let needle = state.text(id).trim().to_lowercase();
                needle.is_empty() || record.search_text().to_lowercase().contains(&needle)
            }
        }
    })
}

/// Records matching `state`, in their original order.
pub fn apply<'a, T: Filterable>(
    records: &'a [T],
    state: &FilterState,
    catalog: &FacetCatalog,
) -> Vec<&'a T> {
    records
        .iter()
        .filter(|r| matches(*r, state, catalog))
        .collect()
}
