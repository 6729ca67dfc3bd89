//! Facet catalog — the static description of every filterable dimension.
//!
//! The catalog is supplied by the caller (built in code or loaded from a TOML
//! file) and never mutated by the engine. Facets are kept in declaration
//! order; that order drives chip ordering in the tag projection.
//!
//! A facet may be two-level: it then declares `categories`, and each option
//! names its parent category. Option ids stay unique across the whole facet,
//! so lookups never need the parent.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Option id carrying the label of an active (true) tri-state flag.
pub const TRI_STATE_ON: &str = "true";
/// Option id carrying the label of a negated (false) tri-state flag.
pub const TRI_STATE_OFF: &str = "false";

/// How a facet's value is represented in the filter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    /// Any number of options, insertion-ordered.
    MultiSelect,
    /// Unset / true / false, cycled.
    TriState,
    /// At most one option.
    SingleSelect,
    /// Optional `from` / `to` dates.
    DateRange,
    /// Free-text query, never shown as a chip.
    Text,
}

impl FacetKind {
    /// Whether this kind offers a list of options to pick from.
    pub fn has_option_list(self) -> bool {
        matches!(self, FacetKind::MultiSelect | FacetKind::SingleSelect)
    }
}

/// A selectable value within a facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    pub id: String,
    pub name: String,
    /// Category id for two-level facets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl FacetOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent: None,
        }
    }

    /// Place this option under a category of a two-level facet.
    pub fn under(mut self, category: impl Into<String>) -> Self {
        self.parent = Some(category.into());
        self
    }
}

/// A parent grouping inside a two-level facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCategory {
    pub id: String,
    pub name: String,
}

impl FacetCategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One filterable dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetGroup {
    pub id: String,
    pub name: String,
    pub kind: FacetKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<FacetCategory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FacetOption>,
}

impl FacetGroup {
    fn with_kind(id: impl Into<String>, name: impl Into<String>, kind: FacetKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            categories: Vec::new(),
            options: Vec::new(),
        }
    }

    pub fn multi_select(
        id: impl Into<String>,
        name: impl Into<String>,
        options: Vec<FacetOption>,
    ) -> Self {
        Self {
            options,
            ..Self::with_kind(id, name, FacetKind::MultiSelect)
        }
    }

    pub fn single_select(
        id: impl Into<String>,
        name: impl Into<String>,
        options: Vec<FacetOption>,
    ) -> Self {
        Self {
            options,
            ..Self::with_kind(id, name, FacetKind::SingleSelect)
        }
    }

    /// A tri-state flag whose chip reads `on_label` when true and
    /// `off_label` when false.
    pub fn tri_state(
        id: impl Into<String>,
        name: impl Into<String>,
        on_label: impl Into<String>,
        off_label: impl Into<String>,
    ) -> Self {
        Self {
            options: vec![
                FacetOption::new(TRI_STATE_ON, on_label),
                FacetOption::new(TRI_STATE_OFF, off_label),
            ],
            ..Self::with_kind(id, name, FacetKind::TriState)
        }
    }

    pub fn date_range(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_kind(id, name, FacetKind::DateRange)
    }

    pub fn text(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_kind(id, name, FacetKind::Text)
    }

    /// Turn this facet into a two-level facet.
    pub fn with_categories(mut self, categories: Vec<FacetCategory>) -> Self {
        self.categories = categories;
        self
    }

    pub fn is_hierarchical(&self) -> bool {
        !self.categories.is_empty()
    }

    pub fn option(&self, id: &str) -> Option<&FacetOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn has_option(&self, id: &str) -> bool {
        self.option(id).is_some()
    }

    pub fn category(&self, id: &str) -> Option<&FacetCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Options filed under `category`, in declaration order.
    pub fn options_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a FacetOption> {
        self.options
            .iter()
            .filter(move |o| o.parent.as_deref() == Some(category))
    }
}

/// Errors raised while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate facet id `{0}`")]
    DuplicateFacet(String),
    #[error("facet `{facet}` declares option `{option}` twice")]
    DuplicateOption { facet: String, option: String },
    #[error("facet `{facet}` declares category `{category}` twice")]
    DuplicateCategory { facet: String, category: String },
    #[error("option `{option}` in facet `{facet}` references unknown category `{category}`")]
    UnknownCategory {
        facet: String,
        option: String,
        category: String,
    },
    #[error("tri-state facet `{0}` must declare options `true` and `false`")]
    TriStateLabels(String),
    #[error("read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse catalog TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize catalog: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// On-disk shape of a catalog, validated into [`FacetCatalog`].
#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    facets: Vec<FacetGroup>,
}

impl TryFrom<CatalogFile> for FacetCatalog {
    type Error = CatalogError;

    fn try_from(file: CatalogFile) -> Result<Self, Self::Error> {
        FacetCatalog::new(file.facets)
    }
}

/// The validated, ordered set of facets a filter bar offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogFile")]
pub struct FacetCatalog {
    facets: Vec<FacetGroup>,
}

impl FacetCatalog {
    /// Build a catalog, checking id uniqueness and category references.
    pub fn new(facets: Vec<FacetGroup>) -> Result<Self, CatalogError> {
        let mut facet_ids = HashSet::new();
        for facet in &facets {
            if !facet_ids.insert(facet.id.as_str()) {
                return Err(CatalogError::DuplicateFacet(facet.id.clone()));
            }
            validate_facet(facet)?;
        }
        Ok(Self { facets })
    }

    /// Load a catalog from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a catalog from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize the catalog to TOML.
    pub fn to_toml(&self) -> Result<String, CatalogError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn facets(&self) -> &[FacetGroup] {
        &self.facets
    }

    pub fn facet(&self, id: &str) -> Option<&FacetGroup> {
        self.facets.iter().find(|f| f.id == id)
    }

    /// Display name of an option, if both the facet and the option exist.
    pub fn option_label(&self, facet: &str, option: &str) -> Option<&str> {
        self.facet(facet)?.option(option).map(|o| o.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    /// Crate-internal constructor for catalogs derived from an already
    /// validated one (narrowing only removes entries).
    pub(crate) fn from_validated(facets: Vec<FacetGroup>) -> Self {
        Self { facets }
    }

    /// The built-in trading-journal catalog.
    pub fn default_journal() -> Self {
        fn opts(pairs: &[(&str, &str)]) -> Vec<FacetOption> {
            pairs
                .iter()
                .map(|(id, name)| FacetOption::new(*id, *name))
                .collect()
        }

        let facets = vec![
            FacetGroup::multi_select(
                "categories",
                "Categories",
                opts(&[
                    ("obr", "Order Block Reversal"),
                    ("fvg", "Fair Value Gap"),
                    ("liquidity-sweep", "Liquidity Sweep"),
                    ("breaker", "Breaker Block"),
                    ("bos", "Break of Structure"),
                ]),
            ),
            FacetGroup::multi_select(
                "setups",
                "Setups",
                opts(&[
                    ("london-open", "London Open Breakout"),
                    ("ny-reversal", "NY Session Reversal"),
                    ("asian-range", "Asian Range Fade"),
                    ("news-spike", "News Spike"),
                    ("trend-pullback", "Trend Pullback"),
                ]),
            ),
            FacetGroup::multi_select(
                "grades",
                "Grades",
                opts(&[("a-plus", "A+"), ("a", "A"), ("b", "B"), ("c", "C")]),
            ),
            FacetGroup::multi_select(
                "context",
                "Context Tags",
                opts(&[
                    ("htf-aligned", "HTF Aligned"),
                    ("counter-trend", "Counter-Trend"),
                    ("high-impact-news", "High Impact News"),
                    ("low-volume", "Low Volume"),
                    ("range-day", "Range Day"),
                ]),
            ),
            FacetGroup::multi_select(
                "emotions",
                "Emotions",
                opts(&[
                    ("confident", "Confident"),
                    ("patient", "Patient"),
                    ("fearful", "Fearful"),
                    ("fomo", "FOMO"),
                    ("revenge", "Revenge"),
                    ("greedy", "Greedy"),
                ]),
            ),
            FacetGroup::multi_select(
                "strategies",
                "Strategies",
                vec![
                    FacetOption::new("smt-divergence", "SMT Divergence").under("reversal"),
                    FacetOption::new("turtle-soup", "Turtle Soup").under("reversal"),
                    FacetOption::new("ote", "Optimal Trade Entry").under("continuation"),
                    FacetOption::new("silver-bullet", "Silver Bullet").under("continuation"),
                    FacetOption::new("opening-range", "Opening Range Breakout").under("breakout"),
                    FacetOption::new("power-of-three", "Power of Three").under("breakout"),
                ],
            )
            .with_categories(vec![
                FacetCategory::new("reversal", "Reversal"),
                FacetCategory::new("continuation", "Continuation"),
                FacetCategory::new("breakout", "Breakout"),
            ]),
            FacetGroup::tri_state("favorites", "Favorites", "Favorites Only", "Non-Favorites"),
            FacetGroup::single_select(
                "outcome",
                "Outcome",
                opts(&[("win", "Win"), ("loss", "Loss"), ("breakeven", "Break-Even")]),
            ),
            FacetGroup::date_range("date", "Date"),
            FacetGroup::text("search", "Search"),
        ];

        Self::new(facets).expect("built-in catalog is valid")
    }
}

fn validate_facet(facet: &FacetGroup) -> Result<(), CatalogError> {
    let mut category_ids = HashSet::new();
    for category in &facet.categories {
        if !category_ids.insert(category.id.as_str()) {
            return Err(CatalogError::DuplicateCategory {
                facet: facet.id.clone(),
                category: category.id.clone(),
            });
        }
    }

    let mut option_ids = HashSet::new();
    for option in &facet.options {
        if !option_ids.insert(option.id.as_str()) {
            return Err(CatalogError::DuplicateOption {
                facet: facet.id.clone(),
                option: option.id.clone(),
            });
        }
        if let Some(parent) = &option.parent {
            if !category_ids.contains(parent.as_str()) {
                return Err(CatalogError::UnknownCategory {
                    facet: facet.id.clone(),
                    option: option.id.clone(),
                    category: parent.clone(),
                });
            }
        }
    }

    if facet.kind == FacetKind::TriState
        && !(option_ids.contains(TRI_STATE_ON) && option_ids.contains(TRI_STATE_OFF))
    {
        return Err(CatalogError::TriStateLabels(facet.id.clone()));
    }

    Ok(())
}
