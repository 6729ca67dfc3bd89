//! TradeJournal Core — faceted filter engine for a trading journal.
//!
//! This crate holds the filter bar logic, independent of any rendering:
//! - Facet catalog (flat and two-level facets, TOML loadable)
//! - Filter state with typed per-facet values
//! - Store with observers, one notification per committed change
//! - Selection controller (`FilterEngine`), the only mutator
//! - Chip projection derived from state on read
//! - Search narrowing of the catalog and badge counts
//!
//! The engine describes a query. Evaluating it against journal records is
//! the caller's job (see `tradejournal-journal`).

pub mod badge;
pub mod catalog;
pub mod controller;
pub mod narrow;
pub mod projection;
pub mod state;
pub mod store;

pub use badge::{badge_count, category_badge, facet_badge};
pub use catalog::{CatalogError, FacetCatalog, FacetCategory, FacetGroup, FacetKind, FacetOption};
pub use controller::FilterEngine;
pub use narrow::narrow;
pub use projection::{project, Tag};
pub use state::{DateRange, FacetValue, FilterState, TriState};
pub use store::{FilterObserver, FilterStore, ObserverId};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: value types can cross threads, so a host UI may
    /// hand snapshots to a worker.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<FacetCatalog>();
        require_sync::<FacetCatalog>();
        require_send::<FilterState>();
        require_sync::<FilterState>();
        require_send::<Tag>();
        require_sync::<Tag>();
        require_send::<CatalogError>();
        require_sync::<CatalogError>();
    }
}
