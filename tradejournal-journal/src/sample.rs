//! Built-in sample journal for demos and tests.
//!
//! Ids in every facet-backed field come from `FacetCatalog::default_journal`.

use chrono::NaiveDate;

use crate::trade::{Outcome, TradeEntry};

#[allow(clippy::too_many_arguments)]
fn entry(
    id: u64,
    symbol: &str,
    date: (i32, u32, u32),
    category: &str,
    setup: &str,
    grade: &str,
    context_tags: &[&str],
    emotions: &[&str],
    strategy: Option<&str>,
    favorite: bool,
    pnl: f64,
    notes: &str,
) -> TradeEntry {
    TradeEntry {
        id,
        symbol: symbol.to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        category: category.to_string(),
        setup: setup.to_string(),
        grade: grade.to_string(),
        context_tags: context_tags.iter().map(|s| s.to_string()).collect(),
        emotions: emotions.iter().map(|s| s.to_string()).collect(),
        strategy: strategy.map(String::from),
        outcome: Outcome::from_pnl(pnl),
        favorite,
        pnl,
        notes: notes.to_string(),
    }
}

pub fn sample_journal() -> Vec<TradeEntry> {
    vec![
        entry(
            1, "EURUSD", (2024, 1, 8), "obr", "london-open", "a-plus",
            &["htf-aligned"], &["confident", "patient"], Some("ote"), true,
            420.0, "Clean rejection from the 4H order block",
        ),
        entry(
            2, "GBPUSD", (2024, 1, 10), "fvg", "ny-reversal", "b",
            &["counter-trend"], &["fomo"], Some("turtle-soup"), false,
            -180.0, "Entered before confirmation",
        ),
        entry(
            3, "NQ", (2024, 1, 17), "liquidity-sweep", "news-spike", "c",
            &["high-impact-news"], &["revenge"], None, false,
            -350.0, "CPI spike, chased the move",
        ),
        entry(
            4, "ES", (2024, 2, 2), "bos", "trend-pullback", "a",
            &["htf-aligned", "range-day"], &["patient"], Some("silver-bullet"), true,
            275.0, "Pullback into discount after BOS",
        ),
        entry(
            5, "EURUSD", (2024, 2, 14), "breaker", "asian-range", "b",
            &["low-volume"], &["fearful"], Some("power-of-three"), false,
            0.0, "Moved stop to entry, scratched",
        ),
        entry(
            6, "XAUUSD", (2024, 2, 21), "obr", "ny-reversal", "a-plus",
            &["htf-aligned"], &["confident"], Some("smt-divergence"), true,
            610.0, "SMT with DXY at the daily level",
        ),
        entry(
            7, "GBPJPY", (2024, 3, 5), "fvg", "london-open", "a",
            &["counter-trend", "low-volume"], &["greedy"], Some("opening-range"), false,
            -95.0, "Held past target, gave it back",
        ),
        entry(
            8, "NQ", (2024, 3, 12), "bos", "trend-pullback", "a-plus",
            &["htf-aligned"], &["patient", "confident"], Some("ote"), false,
            -140.0, "Valid setup, stopped by a wick",
        ),
        entry(
            9, "EURUSD", (2024, 3, 27), "liquidity-sweep", "london-open", "b",
            &["range-day"], &["fomo", "fearful"], Some("turtle-soup"), true,
            130.0, "Sweep of Asian low then expansion",
        ),
        entry(
            10, "ES", (2024, 4, 9), "fvg", "news-spike", "c",
            &["high-impact-news"], &["revenge"], None, false,
            -220.0, "No plan, traded the candle",
        ),
        entry(
            11, "XAUUSD", (2024, 4, 18), "breaker", "asian-range", "a",
            &["range-day"], &["patient"], Some("power-of-three"), false,
            0.0, "Flat after partials",
        ),
        entry(
            12, "GBPUSD", (2024, 5, 2), "obr", "trend-pullback", "a",
            &["htf-aligned"], &["confident"], Some("silver-bullet"), true,
            340.0, "Continuation from the weekly order block",
        ),
    ]
}
