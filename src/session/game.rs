//! Session over a board engine and a ranking store.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::board::{BoardEngine, BoardEvent, Selection};
use crate::clock::{ManualClock, Scheduler};
use crate::core::{ConfigError, GameConfig};
use crate::ranking::{Placement, RankingStore, ScoreRecord};
use crate::storage::KeyValueStore;

/// What a selection did, including the leaderboard placement on a win.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Play {
    /// The board's response.
    pub selection: Selection,
    /// Set only when this selection won the game.
    pub placement: Option<Placement>,
}

/// Board engine and ranking store wired together.
pub struct Session<C: Scheduler, S: KeyValueStore> {
    board: BoardEngine<C>,
    ranking: RankingStore<S>,
}

impl<C: Scheduler, S: KeyValueStore> Session<C, S> {
    /// Deal the first game and load the persisted ranking.
    pub fn new(config: &GameConfig, clock: C, store: S) -> Result<Self, ConfigError> {
        let board = BoardEngine::new(config, clock)?;
        let ranking = RankingStore::new(store, config.ranking.clone());
        Ok(Self { board, ranking })
    }

    /// Flip a card, recording the game on the leaderboard if it was won.
    pub fn select_card(&mut self, position: usize) -> Play {
        self.select_card_at(position, Utc::now())
    }

    /// Like `select_card`, stamping any win with `now`.
    pub fn select_card_at(&mut self, position: usize, now: DateTime<Utc>) -> Play {
        let selection = self.board.select_card(position);
        let placement = selection.win().map(|summary| {
            let placement = self.ranking.insert(ScoreRecord::new(&summary, now));
            info!(points = summary.points, ?placement, "win recorded");
            placement
        });
        Play {
            selection,
            placement,
        }
    }

    /// Dispatch due timers to the board.
    pub fn run_due(&mut self) -> Vec<BoardEvent> {
        self.board.run_due()
    }

    /// Abandon the current game and deal a new one.
    pub fn restart(&mut self) {
        self.board.restart();
    }

    /// Empty the leaderboard.
    pub fn clear_ranking(&mut self) {
        self.ranking.clear();
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &BoardEngine<C> {
        &self.board
    }

    /// Mutable board access.
    pub fn board_mut(&mut self) -> &mut BoardEngine<C> {
        &mut self.board
    }

    /// The leaderboard.
    #[must_use]
    pub fn ranking(&self) -> &RankingStore<S> {
        &self.ranking
    }
}

impl<S: KeyValueStore> Session<ManualClock, S> {
    /// Move the manual clock forward.
    pub fn advance(&mut self, by: Duration) -> Vec<BoardEvent> {
        self.board.advance(by)
    }
}
