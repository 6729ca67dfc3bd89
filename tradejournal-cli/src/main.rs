//! TradeJournal CLI — drive the filter engine from the command line.
//!
//! Commands:
//! - `catalog`: print the facet catalog, optionally narrowed by a query
//! - `filter`: apply filter operations, print chips and matching trades
//! - `preset save|list|show|delete`: manage saved filter presets

mod render;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tradejournal_core::{FacetCatalog, FilterEngine};
use tradejournal_journal::{apply, sample_journal, JournalSummary, PresetStore};

#[derive(Parser)]
#[command(
    name = "tradejournal",
    about = "TradeJournal CLI: faceted trade filtering and saved presets"
)]
struct Cli {
    /// Facet catalog TOML file. Defaults to the built-in journal catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Preset directory. Defaults to the platform data directory.
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the facet catalog.
    Catalog {
        /// Only show facets and options whose names contain this text.
        #[arg(long)]
        query: Option<String>,
    },
    /// Apply filter operations and list the matching sample trades.
    Filter {
        #[command(flatten)]
        ops: FilterOps,
    },
    /// Saved filter presets.
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },
}

#[derive(Subcommand)]
enum PresetAction {
    /// Save the selection built from the given operations.
    Save {
        name: String,
        #[command(flatten)]
        ops: FilterOps,
    },
    /// List saved presets.
    List,
    /// Show the chips of one preset.
    Show { name: String },
    /// Delete a preset.
    Delete { name: String },
}

/// Filter operations, applied in the order: preset, toggles, cycles,
/// picks, range, search.
#[derive(Args, Default)]
struct FilterOps {
    /// Start from a saved preset.
    #[arg(long)]
    preset: Option<String>,

    /// Toggle a multi-select option (FACET=OPTION). Repeatable.
    #[arg(long, value_name = "FACET=OPTION")]
    toggle: Vec<String>,

    /// Cycle a tri-state flag (unset, true, false). Repeatable.
    #[arg(long, value_name = "FACET")]
    cycle: Vec<String>,

    /// Select a single-select option (FACET=OPTION). Repeatable.
    #[arg(long, value_name = "FACET=OPTION")]
    pick: Vec<String>,

    /// Range start (YYYY-MM-DD).
    #[arg(long)]
    from: Option<String>,

    /// Range end (YYYY-MM-DD).
    #[arg(long)]
    to: Option<String>,

    /// Facet the --from/--to bounds apply to.
    #[arg(long, default_value = "date")]
    range_facet: String,

    /// Free-text search.
    #[arg(long)]
    search: Option<String>,

    /// Facet the --search text applies to.
    #[arg(long, default_value = "search")]
    search_facet: String,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let catalog = load_catalog(cli.catalog.as_deref())?;
    let store = PresetStore::new(&store_dir(cli.store)?);

    match cli.command {
        Commands::Catalog { query } => run_catalog(&catalog, query.as_deref()),
        Commands::Filter { ops } => run_filter(catalog, &store, &ops),
        Commands::Preset { action } => match action {
            PresetAction::Save { name, ops } => run_preset_save(catalog, &store, &name, &ops),
            PresetAction::List => run_preset_list(&store),
            PresetAction::Show { name } => run_preset_show(catalog, &store, &name),
            PresetAction::Delete { name } => run_preset_delete(&store, &name),
        },
    }
}

fn load_catalog(path: Option<&Path>) -> Result<FacetCatalog> {
    match path {
        Some(path) => FacetCatalog::from_file(path)
            .with_context(|| format!("load catalog {}", path.display())),
        None => Ok(FacetCatalog::default_journal()),
    }
}

fn store_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    dirs::data_dir()
        .map(|d| d.join("tradejournal"))
        .ok_or_else(|| anyhow!("no platform data directory; pass --store"))
}

fn run_catalog(catalog: &FacetCatalog, query: Option<&str>) -> Result<()> {
    let shown = match query {
        Some(q) => tradejournal_core::narrow(catalog, q),
        None => catalog.clone(),
    };
    if shown.is_empty() {
        println!("No facets match.");
        return Ok(());
    }
    render::print_catalog(&shown);
    Ok(())
}

fn run_filter(catalog: FacetCatalog, store: &PresetStore, ops: &FilterOps) -> Result<()> {
    let mut engine = FilterEngine::new(catalog);
    apply_ops(&mut engine, store, ops)?;

    render::print_chips(&engine);

    let journal = sample_journal();
    let hits = apply(&journal, engine.state(), engine.catalog());
    render::print_trades(&hits);
    render::print_summary(&JournalSummary::from_trades(hits.iter().copied()));
    Ok(())
}

fn run_preset_save(
    catalog: FacetCatalog,
    store: &PresetStore,
    name: &str,
    ops: &FilterOps,
) -> Result<()> {
    let mut engine = FilterEngine::new(catalog);
    apply_ops(&mut engine, store, ops)?;
    let preset = store.save(name, engine.state())?;
    println!("Saved preset \"{}\" ({})", preset.name, short_id(&preset.id));
    render::print_chips(&engine);
    Ok(())
}

fn run_preset_list(store: &PresetStore) -> Result<()> {
    let presets = store.list()?;
    if presets.is_empty() {
        println!("No presets in {}", store.path().display());
        return Ok(());
    }
    for preset in presets {
        println!(
            "{:<24} {:<12}  saved {}",
            preset.name,
            short_id(&preset.id),
            preset.saved_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

fn run_preset_show(catalog: FacetCatalog, store: &PresetStore, name: &str) -> Result<()> {
    let mut engine = FilterEngine::new(catalog);
    store.apply_to(name, &mut engine)?;
    render::print_chips(&engine);
    Ok(())
}

fn run_preset_delete(store: &PresetStore, name: &str) -> Result<()> {
    if !store.remove(name)? {
        bail!("no preset named \"{name}\"");
    }
    println!("Deleted preset \"{name}\"");
    Ok(())
}

fn apply_ops(engine: &mut FilterEngine, store: &PresetStore, ops: &FilterOps) -> Result<()> {
    if let Some(name) = &ops.preset {
        store.apply_to(name, engine)?;
    }

    for raw in &ops.toggle {
        let (facet, option) = split_pair(raw)?;
        if !engine.toggle_multi_value(facet, option) {
            warn!("ignored --toggle {raw}: not a multi-select option in the catalog");
        }
    }
    for facet in &ops.cycle {
        if !engine.cycle_tri_state(facet) {
            warn!("ignored --cycle {facet}: not a tri-state facet in the catalog");
        }
    }
    for raw in &ops.pick {
        let (facet, option) = split_pair(raw)?;
        if !engine.set_single_value(facet, Some(option)) {
            warn!("ignored --pick {raw}: not a single-select option in the catalog");
        }
    }

    if ops.from.is_some() || ops.to.is_some() {
        let from = parse_date(ops.from.as_deref())?;
        let to = parse_date(ops.to.as_deref())?;
        if !engine.set_range(&ops.range_facet, from, to) {
            warn!("ignored date range: {} is not a range facet", ops.range_facet);
        }
    }

    if let Some(text) = &ops.search {
        if !engine.set_text(&ops.search_facet, text) {
            warn!("ignored --search: {} is not a text facet", ops.search_facet);
        }
    }
    Ok(())
}

fn short_id(id: &str) -> String {
    id.chars().take(12).collect()
}

fn split_pair(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((facet, option)) if !facet.is_empty() && !option.is_empty() => Ok((facet, option)),
        _ => bail!("expected FACET=OPTION, got \"{raw}\""),
    }
}

fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>> {
    raw.map(|s| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("invalid date \"{s}\""))
    })
    .transpose()
}
