//! # memory-match
//!
//! Engine for the memory-matching (concentration) card game: a grid of
//! face-down cards hiding paired symbols, flipped two at a time, with move
//! and time tracking and a persisted high-score table.
//!
//! ## Design Principles
//!
//! 1. **Pure logic**: No rendering, input handling or dialogs. A presentation
//!    layer forwards selections in and renders snapshots out.
//!
//! 2. **Injected time**: All deferred work (the mismatch conceal and the
//!    elapsed-time tick) goes through a `Scheduler`, so tests run on a
//!    `ManualClock` with no sleeping.
//!
//! 3. **No process-wide state**: Every counter lives on a `BoardEngine`
//!    instance; every leaderboard lives on a `RankingStore`.
//!
//! ## Modules
//!
//! - `core`: Symbols, RNG, configuration, errors
//! - `board`: Deck, cards, the turn state machine
//! - `scoring`: Points from moves and time
//! - `clock`: Scheduling abstraction and clocks
//! - `ranking`: Bounded, sorted, persisted leaderboard
//! - `storage`: Key-value persistence backends
//! - `session`: Board and leaderboard wired together
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use memory_match::{GameConfig, ManualClock, MemoryStore, Session};
//!
//! let config = GameConfig::new().with_pair_count(2).with_seed(7);
//! let mut session = Session::new(&config, ManualClock::new(), MemoryStore::new()).unwrap();
//!
//! // Play perfectly using the deck layout.
//! let mut placement = None;
//! for p in 0..4 {
//!     if session.board().card(p).unwrap().is_face_up() {
//!         continue;
//!     }
//!     let partner = session.board().deck().partner_of(p).unwrap();
//!     session.select_card(p);
//!     session.advance(Duration::from_secs(1));
//!     placement = session.select_card(partner).placement.or(placement);
//! }
//!
//! assert_eq!(placement.and_then(|p| p.rank()), Some(1));
//! ```

pub mod board;
pub mod clock;
pub mod core;
pub mod ranking;
pub mod scoring;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, GameConfig, GameRng, RankingConfig, StorageError, SymbolId, SymbolPool,
    TimerStart,
};

pub use crate::board::{
    BoardEngine, BoardEvent, BoardSnapshot, Card, Deck, Phase, Selection, Visibility, WinSummary,
};

pub use crate::clock::{Firing, InstantClock, ManualClock, Scheduler, TimerId, TimerTask};

pub use crate::scoring::ScoringRule;

pub use crate::ranking::{
    Placement, RankingCodec, RankingStore, RecordDate, ScoreRecord, TieBreak,
};

pub use crate::storage::{FileStore, KeyValueStore, MemoryStore};

pub use crate::session::{Play, Session};
