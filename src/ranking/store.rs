//! The bounded, persisted leaderboard.

use tracing::{debug, info, warn};

use super::record::ScoreRecord;
use crate::core::{RankingConfig, StorageError};
use crate::storage::KeyValueStore;

/// Where an inserted record landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// 1-based position in the table.
    Ranked(usize),
    /// Fell outside the top `capacity` entries.
    Unranked,
}

impl Placement {
    /// The 1-based rank, if ranked.
    #[must_use]
    pub fn rank(self) -> Option<usize> {
        match self {
            Placement::Ranked(rank) => Some(rank),
            Placement::Unranked => None,
        }
    }
}

/// Leaderboard of the best `capacity` games, kept sorted and persisted on
/// every change.
///
/// Read problems never surface: a missing or unreadable blob loads as an
/// empty table, and entries that fail to decode or have zero moves are
/// dropped one by one. Write problems during `insert` and `clear` are
/// logged and the in-memory table stays authoritative; `flush` retries and
/// reports them.
pub struct RankingStore<S: KeyValueStore> {
    store: S,
    config: RankingConfig,
    table: Vec<ScoreRecord>,
}

impl<S: KeyValueStore> RankingStore<S> {
    /// Open the store and load whatever is persisted.
    ///
    /// # Panics
    ///
    /// Panics if `config.capacity` is zero.
    pub fn new(store: S, config: RankingConfig) -> Self {
        assert!(config.capacity > 0, "Ranking capacity must be at least 1");

        let mut ranking = Self {
            store,
            config,
            table: Vec::new(),
        };
        ranking.load();
        ranking
    }

    /// Re-read the persisted table, replacing the in-memory copy.
    pub fn load(&mut self) -> &[ScoreRecord] {
        self.table = self.read_persisted();
        &self.table
    }

    fn read_persisted(&self) -> Vec<ScoreRecord> {
        let key = &self.config.storage_key;
        let blob = match self.store.get(key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %key, error = %e, "failed to read ranking, starting empty");
                return Vec::new();
            }
        };

        let entries = match self.config.codec.decode(&blob) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(key = %key, error = %e, "malformed ranking, starting empty");
                return Vec::new();
            }
        };

        let mut records = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match entry {
                Ok(record) if record.is_valid() => records.push(record),
                Ok(record) => {
                    warn!(key = %key, index, moves = record.moves, "dropping invalid ranking entry");
                }
                Err(e) => {
                    warn!(key = %key, index, error = %e, "dropping unreadable ranking entry");
                }
            }
        }

        let tie_break = self.config.tie_break;
        records.sort_by(|a, b| tie_break.compare(a, b));
        records.truncate(self.config.capacity);
        debug!(key = %key, entries = records.len(), "loaded ranking");
        records
    }

    /// Add a finished game, keep the best `capacity`, persist, and report
    /// where it landed.
    ///
    /// A new record ranks below existing records it ties with.
    pub fn insert(&mut self, record: ScoreRecord) -> Placement {
        let tie_break = self.config.tie_break;
        let position = self
            .table
            .partition_point(|existing| tie_break.compare(existing, &record).is_le());

        let placement = if position < self.config.capacity {
            self.table.insert(position, record);
            self.table.truncate(self.config.capacity);
            Placement::Ranked(position + 1)
        } else {
            Placement::Unranked
        };

        if let Err(e) = self.flush() {
            warn!(key = %self.config.storage_key, error = %e, "failed to persist ranking");
        }
        info!(?placement, entries = self.table.len(), "ranking updated");
        placement
    }

    /// Empty the table and delete the persisted copy.
    pub fn clear(&mut self) {
        self.table.clear();
        if let Err(e) = self.store.remove(&self.config.storage_key) {
            warn!(key = %self.config.storage_key, error = %e, "failed to clear ranking");
        }
    }

    /// Write the in-memory table to storage.
    pub fn flush(&mut self) -> Result<(), StorageError> {
        let blob = self.config.codec.encode(&self.table)?;
        self.store.set(&self.config.storage_key, &blob)
    }

    /// `(rank, record)` pairs in table order, ranks starting at 1.
    ///
    /// Each call starts a fresh pass over the current table.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &ScoreRecord)> + '_ {
        self.table.iter().enumerate().map(|(i, record)| (i + 1, record))
    }

    /// The table, best first.
    #[must_use]
    pub fn records(&self) -> &[ScoreRecord] {
        &self.table
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// True when nothing is ranked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Leaderboard settings.
    #[must_use]
    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the backing store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::{RankingCodec, TieBreak};
    use crate::storage::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn record(points: u64, time: u32) -> ScoreRecord {
        ScoreRecord {
            moves: 10,
            time_seconds: time,
            points,
            date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().into(),
        }
    }

    fn ranking() -> RankingStore<MemoryStore> {
        RankingStore::new(MemoryStore::new(), RankingConfig::default())
    }

    #[test]
    fn test_starts_empty() {
        let ranking = ranking();
        assert!(ranking.is_empty());
        assert_eq!(ranking.entries().count(), 0);
    }

    #[test]
    fn test_insert_sorts_descending() {
        let mut ranking = ranking();
        assert_eq!(ranking.insert(record(100, 10)), Placement::Ranked(1));
        assert_eq!(ranking.insert(record(300, 10)), Placement::Ranked(1));
        assert_eq!(ranking.insert(record(200, 10)), Placement::Ranked(2));

        let points: Vec<_> = ranking.records().iter().map(|r| r.points).collect();
        assert_eq!(points, vec![300, 200, 100]);
    }

    #[test]
    fn test_eleventh_insert_evicts_lowest() {
        let mut ranking = ranking();
        for p in 1..=11u64 {
            ranking.insert(record(p * 100, 30));
        }

        assert_eq!(ranking.len(), 10);
        assert!(ranking.records().iter().all(|r| r.points != 100));
        assert_eq!(ranking.records()[0].points, 1100);
    }

    #[test]
    fn test_unranked_when_below_full_table() {
        let mut ranking = ranking();
        for _ in 0..10 {
            ranking.insert(record(500, 30));
        }
        assert_eq!(ranking.insert(record(1, 30)), Placement::Unranked);
        assert_eq!(ranking.insert(record(500, 30)), Placement::Unranked, "ties rank below");
        assert_eq!(ranking.len(), 10);
    }

    #[test]
    fn test_tie_break_faster_first() {
        let mut ranking = ranking();
        ranking.insert(record(500, 40));
        assert_eq!(ranking.insert(record(500, 20)), Placement::Ranked(1));
        assert_eq!(ranking.insert(record(500, 40)), Placement::Ranked(3));
    }

    #[test]
    fn test_tie_break_insertion_order() {
        let config = RankingConfig::default().with_tie_break(TieBreak::InsertionOrder);
        let mut ranking = RankingStore::new(MemoryStore::new(), config);
        ranking.insert(record(500, 40));
        assert_eq!(ranking.insert(record(500, 20)), Placement::Ranked(2));
    }

    #[test]
    fn test_persists_and_reloads() {
        let mut ranking = ranking();
        ranking.insert(record(700, 12));
        ranking.insert(record(900, 30));

        let store = ranking.store().clone();
        let reopened = RankingStore::new(store, RankingConfig::default());
        assert_eq!(reopened.records(), ranking.records());
    }

    #[test]
    fn test_clear_removes_persisted() {
        let mut ranking = ranking();
        ranking.insert(record(700, 12));
        ranking.clear();

        assert!(ranking.is_empty());
        assert!(ranking.store().is_empty());
        assert!(ranking.load().is_empty());
    }

    #[test]
    fn test_malformed_payload_loads_empty() {
        let mut store = MemoryStore::new();
        store.set("memoryGameRanking", b"{oops").unwrap();
        assert!(RankingStore::new(store, RankingConfig::default()).is_empty());
    }

    #[test]
    fn test_wrong_shape_loads_empty() {
        let mut store = MemoryStore::new();
        store
            .set("memoryGameRanking", br#"{"moves": 3, "time": 4}"#)
            .unwrap();
        assert!(RankingStore::new(store, RankingConfig::default()).is_empty());
    }

    #[test]
    fn test_zero_moves_entry_dropped() {
        let mut bad = record(100, 10);
        bad.moves = 0;
        let blob = RankingCodec::Json.encode(&[record(200, 5), bad]).unwrap();

        let mut store = MemoryStore::new();
        store.set("memoryGameRanking", &blob).unwrap();
        let ranking = RankingStore::new(store, RankingConfig::default());

        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking.records()[0].points, 200);
    }

    #[test]
    fn test_load_normalizes_order_and_size() {
        let unsorted: Vec<_> = (1..=12u64).map(|p| record(p, 10)).collect();
        let blob = RankingCodec::Json.encode(&unsorted).unwrap();

        let mut store = MemoryStore::new();
        store.set("memoryGameRanking", &blob).unwrap();
        let ranking = RankingStore::new(store, RankingConfig::default());

        assert_eq!(ranking.len(), 10);
        assert_eq!(ranking.records()[0].points, 12);
        assert_eq!(ranking.records()[9].points, 3);
    }

    #[test]
    fn test_entries_restartable() {
        let mut ranking = ranking();
        ranking.insert(record(10, 1));
        ranking.insert(record(20, 1));

        let first: Vec<_> = ranking.entries().map(|(rank, r)| (rank, r.points)).collect();
        let second: Vec<_> = ranking.entries().map(|(rank, r)| (rank, r.points)).collect();
        assert_eq!(first, vec![(1, 20), (2, 10)]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_binary_codec() {
        let config = RankingConfig::default().with_codec(RankingCodec::Binary);
        let mut ranking = RankingStore::new(MemoryStore::new(), config.clone());
        ranking.insert(record(42, 7));

        let reopened = RankingStore::new(ranking.store().clone(), config);
        assert_eq!(reopened.records(), ranking.records());
    }

    #[test]
    #[should_panic(expected = "Ranking capacity must be at least 1")]
    fn test_zero_capacity_panics() {
        RankingStore::new(MemoryStore::new(), RankingConfig::default().with_capacity(0));
    }
}
