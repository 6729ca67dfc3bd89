//! TradeJournal Journal — the consuming side of the filter engine.
//!
//! This crate builds on `tradejournal-core` to provide:
//! - Journaled trade records and a built-in sample journal
//! - Evaluation of a `FilterState` against records
//! - Summary statistics over the filtered set
//! - Named filter presets persisted as JSON

pub mod matcher;
pub mod presets;
pub mod sample;
pub mod summary;
pub mod trade;

pub use matcher::{apply, matches, Filterable};
pub use presets::{preset_id, Preset, PresetError, PresetStore};
pub use sample::sample_journal;
pub use summary::JournalSummary;
pub use trade::{Outcome, TradeEntry};
