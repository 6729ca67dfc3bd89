//! Journaled trade records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a trade closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
    #[serde(rename = "breakeven")]
    BreakEven,
}

impl Outcome {
    /// Option id used by the `outcome` facet.
    pub fn id(self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
            Outcome::BreakEven => "breakeven",
        }
    }

    /// Classify a P&L figure.
    pub fn from_pnl(pnl: f64) -> Self {
        if pnl > 0.0 {
            Outcome::Win
        } else if pnl < 0.0 {
            Outcome::Loss
        } else {
            Outcome::BreakEven
        }
    }
}

/// One journal entry. Facet-backed fields hold catalog option ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeEntry {
    pub id: u64,
    pub symbol: String,
    pub date: NaiveDate,
    pub category: String,
    pub setup: String,
    pub grade: String,
    #[serde(default)]
    pub context_tags: Vec<String>,
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default)]
    pub strategy: Option<String>,
    pub outcome: Outcome,
    #[serde(default)]
    pub favorite: bool,
    pub pnl: f64,
    #[serde(default)]
    pub notes: String,
}
