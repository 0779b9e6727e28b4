//! A playable session: one board plus the leaderboard it reports into.
//!
//! The presentation layer talks to `Session` only:
//! - forward clicks to `select_card`
//! - forward timer wake-ups to `run_due` (or `advance` with a manual clock)
//! - call `restart` on a restart command
//! - read `board().snapshot()` and `ranking().entries()` to render

mod game;

pub use game::{Play, Session};
