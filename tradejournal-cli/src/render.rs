//! Plain-text rendering of catalogs, chips, and trades.

use tradejournal_core::{category_badge, facet_badge, FacetCatalog, FacetKind, FilterEngine};
use tradejournal_journal::{JournalSummary, TradeEntry};

pub fn print_catalog(catalog: &FacetCatalog) {
    for facet in catalog.facets() {
        println!("{} [{}] ({})", facet.name, facet.id, kind_label(facet.kind));
        if facet.is_hierarchical() {
            for category in &facet.categories {
                println!("  {} [{}]", category.name, category.id);
                for option in facet.options_in(&category.id) {
                    println!("    - {} [{}]", option.name, option.id);
                }
            }
            for option in facet.options.iter().filter(|o| o.parent.is_none()) {
                println!("  - {} [{}]", option.name, option.id);
            }
        } else if facet.kind != FacetKind::TriState {
            for option in &facet.options {
                println!("  - {} [{}]", option.name, option.id);
            }
        }
    }
}

fn kind_label(kind: FacetKind) -> &'static str {
    match kind {
        FacetKind::MultiSelect => "multi-select",
        FacetKind::TriState => "tri-state",
        FacetKind::SingleSelect => "single-select",
        FacetKind::DateRange => "date range",
        FacetKind::Text => "text",
    }
}

/// Chips line plus per-facet badges.
pub fn print_chips(engine: &FilterEngine) {
    let tags = engine.tags();
    if tags.is_empty() {
        println!("Filters: none");
    } else {
        let chips: Vec<String> = tags.iter().map(|t| format!("[{} x]", t.label)).collect();
        println!("Filters ({}): {}", engine.badge_count(), chips.join(" "));
    }

    let state = engine.state();
    let catalog = engine.catalog();
    for facet in catalog.facets() {
        let badge = facet_badge(state, catalog, &facet.id);
        if badge == 0 {
            continue;
        }
        let mut line = format!("  {}: {badge}", facet.name);
        for category in &facet.categories {
            let n = category_badge(state, catalog, &facet.id, &category.id);
            if n > 0 {
                line.push_str(&format!(" ({} {n})", category.name));
            }
        }
        println!("{line}");
    }
}

pub fn print_trades(trades: &[&TradeEntry]) {
    if trades.is_empty() {
        println!("No trades match.");
        return;
    }
    println!(
        "{:>4}  {:<10}  {:<8}  {:<16}  {:<16}  {:>6}  {:>9}",
        "#", "Date", "Symbol", "Category", "Setup", "Grade", "P&L"
    );
    for t in trades {
        println!(
            "{:>4}  {:<10}  {:<8}  {:<16}  {:<16}  {:>6}  {:>9.2}{}",
            t.id,
            t.date.to_string(),
            t.symbol,
            t.category,
            t.setup,
            t.grade,
            t.pnl,
            if t.favorite { " *" } else { "" }
        );
    }
}

pub fn print_summary(summary: &JournalSummary) {
    println!(
        "{} trades | {}W {}L {}BE | win rate {:.1}% | total P&L {:.2} | avg {:.2}",
        summary.trades,
        summary.wins,
        summary.losses,
        summary.breakevens,
        summary.win_rate * 100.0,
        summary.total_pnl,
        summary.avg_pnl
    );
}
