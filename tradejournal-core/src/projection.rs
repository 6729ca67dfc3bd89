//! Tag projection — flattens a `FilterState` into removable chips.
//!
//! Chips are derived on demand and never stored. Order:
//! 1. multi-select facets in catalog order, each in selection order
//! 2. tri-state, single-select and range facets in catalog order
//!
//! Ids that no longer resolve against the catalog produce no chip.

use serde::{Deserialize, Serialize};

use crate::catalog::{FacetCatalog, FacetGroup, FacetKind, TRI_STATE_OFF, TRI_STATE_ON};
use crate::state::{DateRange, FilterState, TriState};

/// Value id used for the chip of a date-range facet.
pub const RANGE_VALUE_ID: &str = "range";

/// One removable chip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub facet_id: String,
    pub value_id: String,
    pub label: String,
}

impl Tag {
    fn new(facet: &FacetGroup, value_id: &str, label: impl Into<String>) -> Self {
        Self {
            facet_id: facet.id.clone(),
            value_id: value_id.to_string(),
            label: label.into(),
        }
    }
}

/// Derive the chip list for `state`. Pure: same inputs, same output.
pub fn project(state: &FilterState, catalog: &FacetCatalog) -> Vec<Tag> {
    let mut tags = Vec::new();

    for facet in catalog
        .facets()
        .iter()
        .filter(|f| f.kind == FacetKind::MultiSelect)
    {
        for id in state.selected(&facet.id) {
            if let Some(option) = facet.option(id) {
                tags.push(Tag::new(facet, id, option.name.as_str()));
            }
        }
    }

    for facet in catalog.facets() {
        let tag = match facet.kind {
            FacetKind::TriState => flag_tag(facet, state.flag(&facet.id)),
            FacetKind::SingleSelect => state
                .single(&facet.id)
                .and_then(|id| facet.option(id).map(|o| Tag::new(facet, id, o.name.as_str()))),
            FacetKind::DateRange => range_tag(facet, state.range(&facet.id)),
            FacetKind::MultiSelect | FacetKind::Text => None,
        };
        tags.extend(tag);
    }

    tags
}

fn flag_tag(facet: &FacetGroup, flag: TriState) -> Option<Tag> {
    let value_id = match flag {
        TriState::Unset => return None,
        TriState::True => TRI_STATE_ON,
        TriState::False => TRI_STATE_OFF,
    };
    facet
        .option(value_id)
        .map(|o| Tag::new(facet, value_id, o.name.as_str()))
}

fn range_tag(facet: &FacetGroup, range: DateRange) -> Option<Tag> {
    let label = match (range.from, range.to) {
        (None, None) => return None,
        (Some(from), Some(to)) => format!("{}: {from} to {to}", facet.name),
        (Some(from), None) => format!("{}: from {from}", facet.name),
        (None, Some(to)) => format!("{}: until {to}", facet.name),
    };
    Some(Tag::new(facet, RANGE_VALUE_ID, label))
}
