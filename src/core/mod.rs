//! Core types: symbols, RNG, configuration, errors.
//!
//! These building blocks are shared by the board, the ranking store and the
//! session. They hold no game state of their own.

pub mod config;
pub mod error;
pub mod rng;
pub mod symbol;

pub use config::{GameConfig, RankingConfig, TimerStart};
pub use error::{ConfigError, StorageError};
pub use rng::GameRng;
pub use symbol::{SymbolId, SymbolPool, DEFAULT_SYMBOLS};
