//! Ranking store: the persisted high-score table.
//!
//! ## Ordering
//!
//! Records sort by points, highest first. Equal points fall back to the
//! configured `TieBreak`. The table keeps at most `capacity` records and
//! only ever changes by insert-then-truncate or by a full clear.

pub mod codec;
pub mod record;
pub mod store;

pub use codec::{DecodedEntry, RankingCodec};
pub use record::{RecordDate, ScoreRecord, TieBreak};
pub use store::{Placement, RankingStore};
