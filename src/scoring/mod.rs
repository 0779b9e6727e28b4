//! Point computation for finished games.
//!
//! Points are a pure function of the move count, the elapsed seconds and the
//! number of pairs on the board. Two rules are supported:
//!
//! - `Multiplicative`: `round(1000 * (pairs / moves) * (1000 / seconds))`.
//!   Rewards both accuracy and speed; zero denominators are clamped to 1.
//! - `LinearPenalty`: `max(10000 - 50 * moves - 10 * seconds, 0)`.
//!
//! ```
//! use memory_match::scoring::ScoringRule;
//!
//! // Ten pairs, every turn a match, fifty seconds.
//! assert_eq!(ScoringRule::Multiplicative.points(10, 50, 10), 20_000);
//! assert_eq!(ScoringRule::LinearPenalty.points(10, 50, 10), 9_000);
//! ```

use serde::{Deserialize, Serialize};

/// How a finished game is turned into points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringRule {
    /// Accuracy times speed.
    #[default]
    Multiplicative,
    /// Flat budget minus per-move and per-second penalties.
    LinearPenalty,
}

impl ScoringRule {
    /// Compute points for a finished game.
    #[must_use]
    pub fn points(self, moves: u32, seconds: u32, pairs: usize) -> u64 {
        match self {
            ScoringRule::Multiplicative => {
                let moves = f64::from(moves.max(1));
                let seconds = f64::from(seconds.max(1));
                let raw = 1000.0 * (pairs as f64 / moves) * (1000.0 / seconds);
                raw.round() as u64
            }
            ScoringRule::LinearPenalty => {
                let penalty = 50 * i64::from(moves) + 10 * i64::from(seconds);
                (10_000 - penalty).max(0) as u64
            }
        }
    }
}
