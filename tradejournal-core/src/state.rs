//! Filter state — the user's current selection across every facet.
//!
//! `FilterState` maps facet ids to typed values. It is a plain value: the
//! engine mutates it only through the selection controller, and presets
//! serialize it as-is. A `BTreeMap` keeps serialization order deterministic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{FacetCatalog, FacetGroup, FacetKind};

/// Three-valued flag, cycled `Unset -> True -> False -> Unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriState {
    #[default]
    Unset,
    True,
    False,
}

impl TriState {
    pub fn next(self) -> TriState {
        match self {
            TriState::Unset => TriState::True,
            TriState::True => TriState::False,
            TriState::False => TriState::Unset,
        }
    }

    pub fn is_set(self) -> bool {
        self != TriState::Unset
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            TriState::Unset => None,
            TriState::True => Some(true),
            TriState::False => Some(false),
        }
    }
}

/// Optional inclusive date bounds. `from > to` is stored verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Inclusive containment. An inverted range contains nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// The value held for one facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FacetValue {
    /// Selected option ids in insertion order, without duplicates.
    Multi(Vec<String>),
    Flag(TriState),
    Single(Option<String>),
    Range(DateRange),
    Text(String),
}

impl FacetValue {
    /// The default value for a facet of `kind`.
    pub fn default_for(kind: FacetKind) -> Self {
        match kind {
            FacetKind::MultiSelect => FacetValue::Multi(Vec::new()),
            FacetKind::TriState => FacetValue::Flag(TriState::Unset),
            FacetKind::SingleSelect => FacetValue::Single(None),
            FacetKind::DateRange => FacetValue::Range(DateRange::default()),
            FacetKind::Text => FacetValue::Text(String::new()),
        }
    }

    pub fn kind(&self) -> FacetKind {
        match self {
            FacetValue::Multi(_) => FacetKind::MultiSelect,
            FacetValue::Flag(_) => FacetKind::TriState,
            FacetValue::Single(_) => FacetKind::SingleSelect,
            FacetValue::Range(_) => FacetKind::DateRange,
            FacetValue::Text(_) => FacetKind::Text,
        }
    }

    pub fn is_default(&self) -> bool {
        match self {
            FacetValue::Multi(ids) => ids.is_empty(),
            FacetValue::Flag(flag) => !flag.is_set(),
            FacetValue::Single(value) => value.is_none(),
            FacetValue::Range(range) => range.is_unbounded(),
            FacetValue::Text(text) => text.is_empty(),
        }
    }
}

/// Current selection across all facets of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub facets: BTreeMap<String, FacetValue>,
}

impl FilterState {
    /// Every facet of `catalog` at its default value.
    pub fn empty(catalog: &FacetCatalog) -> Self {
        let facets = catalog
            .facets()
            .iter()
            .map(|f| (f.id.clone(), FacetValue::default_for(f.kind)))
            .collect();
        Self { facets }
    }

    pub fn value(&self, facet: &str) -> Option<&FacetValue> {
        self.facets.get(facet)
    }

    /// Selected ids of a multi-select facet; empty for anything else.
    pub fn selected(&self, facet: &str) -> &[String] {
        match self.facets.get(facet) {
            Some(FacetValue::Multi(ids)) => ids,
            _ => &[],
        }
    }

    pub fn flag(&self, facet: &str) -> TriState {
        match self.facets.get(facet) {
            Some(FacetValue::Flag(flag)) => *flag,
            _ => TriState::Unset,
        }
    }

    pub fn single(&self, facet: &str) -> Option<&str> {
        match self.facets.get(facet) {
            Some(FacetValue::Single(value)) => value.as_deref(),
            _ => None,
        }
    }

    pub fn range(&self, facet: &str) -> DateRange {
        match self.facets.get(facet) {
            Some(FacetValue::Range(range)) => *range,
            _ => DateRange::default(),
        }
    }

    pub fn text(&self, facet: &str) -> &str {
        match self.facets.get(facet) {
            Some(FacetValue::Text(text)) => text,
            _ => "",
        }
    }

    /// True when no facet holds a non-default value.
    pub fn is_clear(&self) -> bool {
        self.facets.values().all(FacetValue::is_default)
    }

    /// Conform this state to `catalog`: unknown facets and mismatched kinds
    /// are reset, stale option ids are dropped. Returns the ids removed as
    /// `(facet, option)` pairs.
    pub(crate) fn conform(self, catalog: &FacetCatalog) -> (FilterState, Vec<(String, String)>) {
        let mut incoming = self.facets;
        let mut dropped = Vec::new();
        let mut facets = BTreeMap::new();

        for group in catalog.facets() {
            let value = match incoming.remove(&group.id) {
                Some(value) if value.kind() == group.kind => {
                    conform_value(group, value, &mut dropped)
                }
                _ => FacetValue::default_for(group.kind),
            };
            facets.insert(group.id.clone(), value);
        }

        for (facet, _) in incoming {
            dropped.push((facet, String::new()));
        }

        (FilterState { facets }, dropped)
    }
}

fn conform_value(
    group: &FacetGroup,
    value: FacetValue,
    dropped: &mut Vec<(String, String)>,
) -> FacetValue {
    match value {
        FacetValue::Multi(ids) => {
            let mut kept: Vec<String> = Vec::with_capacity(ids.len());
            for id in ids {
                if !group.has_option(&id) {
                    dropped.push((group.id.clone(), id));
                } else if !kept.contains(&id) {
                    kept.push(id);
                }
            }
            FacetValue::Multi(kept)
        }
        FacetValue::Single(Some(id)) if !group.has_option(&id) => {
            dropped.push((group.id.clone(), id));
            FacetValue::Single(None)
        }
        other => other,
    }
}
