//! Board engine: deck, turn state machine, move and time counters.
//!
//! The presentation layer forwards selections to `BoardEngine::select_card`
//! and timer firings to `BoardEngine::on_timer`. Everything else (rendering,
//! input, animation) stays outside the crate.

pub mod card;
pub mod deck;
pub mod engine;
pub mod snapshot;

pub use card::{Card, Visibility};
pub use deck::Deck;
pub use engine::{BoardEngine, BoardEvent, Phase, Selection, WinSummary};
pub use snapshot::BoardSnapshot;
