//! Headline statistics over a filtered set of trades.

use serde::{Deserialize, Serialize};

use crate::trade::{Outcome, TradeEntry};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalSummary {
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub breakevens: usize,
    /// Wins over all trades, 0.0 when empty.
    pub win_rate: f64,
    pub total_pnl: f64,
    pub avg_pnl: f64,
}

impl JournalSummary {
    pub fn from_trades<'a>(trades: impl IntoIterator<Item = &'a TradeEntry>) -> Self {
        let mut summary = JournalSummary::default();
        for trade in trades {
            summary.trades += 1;
            summary.total_pnl += trade.pnl;
            match trade.outcome {
                Outcome::Win => summary.wins += 1,
                Outcome::Loss => summary.losses += 1,
                Outcome::BreakEven => summary.breakevens += 1,
            }
        }
        if summary.trades > 0 {
            summary.win_rate = summary.wins as f64 / summary.trades as f64;
            summary.avg_pnl = summary.total_pnl / summary.trades as f64;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_journal;

    #[test]
    fn empty_summary_is_zeroed() {
        let s = JournalSummary::from_trades(std::iter::empty());
        assert_eq!(s, JournalSummary::default());
    }

    #[test]
    fn sample_summary() {
        let journal = sample_journal();
        let s = JournalSummary::from_trades(&journal);
        assert_eq!(s.trades, 12);
        assert_eq!(s.wins + s.losses + s.breakevens, 12);
        assert_eq!(s.wins, 5);
        assert_eq!(s.losses, 5);
        assert_eq!(s.breakevens, 2);
        assert!((s.win_rate - 5.0 / 12.0).abs() < 1e-12);
        assert!((s.total_pnl - 790.0).abs() < 1e-9);
    }
}
