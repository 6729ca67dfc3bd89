//! Selection controller — the only mutator of filter state.
//!
//! `FilterEngine` pairs a catalog with a `FilterStore`. Every operation
//! builds the next state off to the side and commits it in one step, so
//! observers see exactly one transition per applied call.
//!
//! Operations on unknown facets, unknown options, or facets of the wrong
//! kind are no-ops: they return `false`, commit nothing, and log at debug.

use chrono::NaiveDate;
use tracing::debug;

use crate::badge;
use crate::catalog::{FacetCatalog, FacetGroup, FacetKind, TRI_STATE_OFF, TRI_STATE_ON};
use crate::narrow;
use crate::projection::{self, Tag, RANGE_VALUE_ID};
use crate::state::{DateRange, FacetValue, FilterState, TriState};
use crate::store::{FilterObserver, FilterStore, ObserverId};

/// A filter bar instance: catalog, state, observers.
#[derive(Debug)]
pub struct FilterEngine {
    catalog: FacetCatalog,
    store: FilterStore,
}

impl FilterEngine {
    /// New engine with every facet at its default.
    pub fn new(catalog: FacetCatalog) -> Self {
        let state = FilterState::empty(&catalog);
        Self {
            catalog,
            store: FilterStore::new(state),
        }
    }

    pub fn catalog(&self) -> &FacetCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &FilterState {
        self.store.state()
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn subscribe(&mut self, observer: impl FilterObserver + 'static) -> ObserverId {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Chips for the current state, derived on every call.
    pub fn tags(&self) -> Vec<Tag> {
        projection::project(self.state(), &self.catalog)
    }

    /// Total active-filter badge for the current state.
    pub fn badge_count(&self) -> usize {
        badge::badge_count(self.state(), &self.catalog)
    }

    /// Catalog narrowed by `query` for display. State is untouched.
    pub fn narrowed(&self, query: &str) -> FacetCatalog {
        narrow::narrow(&self.catalog, query)
    }

    /// Wholesale replace (reset, load preset). Stale ids are dropped
    /// silently; always commits.
    pub fn replace_state(&mut self, state: FilterState) {
        let (state, dropped) = state.conform(&self.catalog);
        if !dropped.is_empty() {
            debug!(count = dropped.len(), ?dropped, "dropped stale filter references");
        }
        self.store.commit(state);
    }

    /// Add `option` to a multi-select facet, or remove it if present.
    /// New ids go to the end; removal keeps the order of the rest.
    pub fn toggle_multi_value(&mut self, facet: &str, option: &str) -> bool {
        let Some(group) = self.facet_of_kind(facet, FacetKind::MultiSelect) else {
            return false;
        };
        if !group.has_option(option) {
            debug!(facet, option, "toggle ignored: unknown option");
            return false;
        }

        let mut ids = self.state().selected(facet).to_vec();
        match ids.iter().position(|id| id == option) {
            Some(pos) => {
                ids.remove(pos);
            }
            None => ids.push(option.to_string()),
        }
        self.commit_value(facet, FacetValue::Multi(ids));
        true
    }

    /// Advance a tri-state flag: unset, true, false, unset.
    pub fn cycle_tri_state(&mut self, facet: &str) -> bool {
        if self.facet_of_kind(facet, FacetKind::TriState).is_none() {
            return false;
        }
        let next = self.state().flag(facet).next();
        self.commit_value(facet, FacetValue::Flag(next));
        true
    }

    /// Select `option` on a single-select facet. Reselecting the active
    /// value clears it; `None` clears.
    pub fn set_single_value(&mut self, facet: &str, option: Option<&str>) -> bool {
        let Some(group) = self.facet_of_kind(facet, FacetKind::SingleSelect) else {
            return false;
        };
        if let Some(id) = option {
            if !group.has_option(id) {
                debug!(facet, option = id, "select ignored: unknown option");
                return false;
            }
        }

        let next = match (self.state().single(facet), option) {
            (Some(current), Some(requested)) if current == requested => None,
            (_, requested) => requested.map(str::to_string),
        };
        self.commit_value(facet, FacetValue::Single(next));
        true
    }

    /// Store date bounds verbatim; an inverted range is accepted.
    pub fn set_range(
        &mut self,
        facet: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> bool {
        if self.facet_of_kind(facet, FacetKind::DateRange).is_none() {
            return false;
        }
        self.commit_value(facet, FacetValue::Range(DateRange::new(from, to)));
        true
    }

    pub fn set_text(&mut self, facet: &str, text: &str) -> bool {
        if self.facet_of_kind(facet, FacetKind::Text).is_none() {
            return false;
        }
        self.commit_value(facet, FacetValue::Text(text.to_string()));
        true
    }

    /// Reset one facet to its default.
    pub fn clear_facet(&mut self, facet: &str) -> bool {
        let Some(group) = self.catalog.facet(facet) else {
            debug!(facet, "clear ignored: unknown facet");
            return false;
        };
        let value = FacetValue::default_for(group.kind);
        self.commit_value(facet, value);
        true
    }

    /// Reset every facet in a single transition.
    pub fn clear_all(&mut self) {
        let state = FilterState::empty(&self.catalog);
        self.store.commit(state);
    }

    /// Undo the selection a chip stands for. A chip that no longer
    /// describes the current value is a no-op.
    pub fn remove_tag(&mut self, tag: &Tag) -> bool {
        let Some(group) = self.catalog.facet(&tag.facet_id) else {
            debug!(facet = %tag.facet_id, "tag removal ignored: unknown facet");
            return false;
        };
        let kind = group.kind;
        let state = self.state();
        let current = match kind {
            FacetKind::MultiSelect => state
                .selected(&tag.facet_id)
                .iter()
                .any(|id| *id == tag.value_id),
            FacetKind::TriState => match state.flag(&tag.facet_id) {
                TriState::Unset => false,
                TriState::True => tag.value_id == TRI_STATE_ON,
                TriState::False => tag.value_id == TRI_STATE_OFF,
            },
            FacetKind::SingleSelect => state.single(&tag.facet_id) == Some(tag.value_id.as_str()),
            FacetKind::DateRange => {
                tag.value_id == RANGE_VALUE_ID && !state.range(&tag.facet_id).is_unbounded()
            }
            FacetKind::Text => false,
        };
        if !current {
            debug!(facet = %tag.facet_id, value = %tag.value_id, "tag removal ignored: stale chip");
            return false;
        }

        match kind {
            FacetKind::MultiSelect => self.toggle_multi_value(&tag.facet_id, &tag.value_id),
            FacetKind::TriState => {
                self.commit_value(&tag.facet_id, FacetValue::Flag(TriState::Unset));
                true
            }
            FacetKind::SingleSelect | FacetKind::DateRange | FacetKind::Text => {
                self.clear_facet(&tag.facet_id)
            }
        }
    }

    fn facet_of_kind(&self, facet: &str, kind: FacetKind) -> Option<&FacetGroup> {
        match self.catalog.facet(facet) {
            Some(group) if group.kind == kind => Some(group),
            Some(group) => {
                debug!(facet, expected = ?kind, actual = ?group.kind, "operation ignored: kind mismatch");
                None
            }
            None => {
                debug!(facet, "operation ignored: unknown facet");
                None
            }
        }
    }

    fn commit_value(&mut self, facet: &str, value: FacetValue) {
        let mut next = self.state().clone();
        next.facets.insert(facet.to_string(), value);
        self.store.commit(next);
    }
}
