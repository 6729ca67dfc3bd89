//! Search narrowing — trims the catalog for display, never the state.

use crate::catalog::{FacetCatalog, FacetGroup};

/// Keep the parts of `catalog` that match `query`, case-insensitively.
///
/// A matching facet name keeps the whole facet; in a two-level facet a
/// matching category name keeps the whole category. Otherwise only matching
/// options survive, and facets or categories left empty are dropped.
/// Facets without an option list pass through unchanged.
pub fn narrow(catalog: &FacetCatalog, query: &str) -> FacetCatalog {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return catalog.clone();
    }

    let facets = catalog
        .facets()
        .iter()
        .filter_map(|facet| narrow_facet(facet, &needle))
        .collect();
    FacetCatalog::from_validated(facets)
}

fn matches(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(needle)
}

fn narrow_facet(facet: &FacetGroup, needle: &str) -> Option<FacetGroup> {
    if !facet.kind.has_option_list() || matches(&facet.name, needle) {
        return Some(facet.clone());
    }

    let categories: Vec<_> = facet
        .categories
        .iter()
        .filter(|c| matches(&c.name, needle))
        .map(|c| c.id.as_str())
        .collect();

    let options: Vec<_> = facet
        .options
        .iter()
        .filter(|o| {
            matches(&o.name, needle)
                || o.parent
                    .as_deref()
                    .is_some_and(|p| categories.contains(&p))
        })
        .cloned()
        .collect();

    if options.is_empty() {
        return None;
    }

    let kept_categories = facet
        .categories
        .iter()
        .filter(|c| options.iter().any(|o| o.parent.as_deref() == Some(c.id.as_str())))
        .cloned()
        .collect();

    Some(FacetGroup {
        options,
        categories: kept_categories,
        ..facet.clone()
    })
}
