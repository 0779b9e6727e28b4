//! Ranking store integration tests.
//!
//! These tests cover the leaderboard over both storage backends, including
//! reopening the store the way a page reload would.

use chrono::{TimeZone, Utc};
use tempfile::tempdir;

use memory_match::core::RankingConfig;
use memory_match::ranking::{Placement, RankingCodec, RankingStore, RecordDate, ScoreRecord};
use memory_match::scoring::ScoringRule;
use memory_match::storage::{FileStore, KeyValueStore, MemoryStore};

fn record(moves: u32, time: u32) -> ScoreRecord {
    ScoreRecord {
        moves,
        time_seconds: time,
        points: ScoringRule::Multiplicative.points(moves, time, 10),
        date: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap().into(),
    }
}

/// Inserting eleven distinct records keeps ten and drops the lowest.
#[test]
fn test_eleven_records_keep_ten() {
    let mut ranking = RankingStore::new(MemoryStore::new(), RankingConfig::default());
    let records: Vec<_> = (10..21).map(|moves| record(moves, 60)).collect();
    let lowest = records.iter().map(|r| r.points).min().unwrap();

    for r in records {
        ranking.insert(r);
    }

    assert_eq!(ranking.len(), 10);
    assert!(ranking.records().iter().all(|r| r.points != lowest));
    assert!(ranking
        .records()
        .windows(2)
        .all(|w| w[0].points >= w[1].points));
}

/// A record inserted into the file store survives reopening.
#[test]
fn test_file_store_round_trip() {
    let dir = tempdir().unwrap();
    let config = RankingConfig::default();

    let inserted = record(12, 40);
    {
        let mut ranking = RankingStore::new(FileStore::new(dir.path()), config.clone());
        assert_eq!(ranking.insert(inserted.clone()), Placement::Ranked(1));
    }

    let reopened = RankingStore::new(FileStore::new(dir.path()), config);
    assert_eq!(reopened.records(), &[inserted]);
}

/// A hand-edited, corrupt file loads as an empty table and is overwritten
/// by the next insert.
#[test]
fn test_corrupt_file_recovers() {
    let dir = tempdir().unwrap();
    let mut store = FileStore::new(dir.path());
    store.set("memoryGameRanking", b"[{\"moves\":").unwrap();

    let mut ranking = RankingStore::new(store, RankingConfig::default());
    assert!(ranking.is_empty());

    ranking.insert(record(10, 50));
    let reopened = RankingStore::new(FileStore::new(dir.path()), RankingConfig::default());
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.records()[0].points, 20_000);
}

/// A blob written in one codec reads as empty under the other.
#[test]
fn test_codec_mismatch_loads_empty() {
    let mut ranking = RankingStore::new(
        MemoryStore::new(),
        RankingConfig::default().with_codec(RankingCodec::Binary),
    );
    ranking.insert(record(10, 50));

    let as_json = RankingStore::new(ranking.store().clone(), RankingConfig::default());
    assert!(as_json.is_empty());
}

/// Capacity and key come from configuration.
#[test]
fn test_custom_capacity_and_key() {
    let config = RankingConfig::default()
        .with_capacity(3)
        .with_storage_key("easyBoard");
    let mut ranking = RankingStore::new(MemoryStore::new(), config);

    let placements: Vec<_> = [30, 20, 40, 10, 50]
        .into_iter()
        .map(|moves| ranking.insert(record(moves, 60)))
        .collect();

    assert_eq!(
        placements,
        vec![
            Placement::Ranked(1),
            Placement::Ranked(1),
            Placement::Ranked(3),
            Placement::Ranked(1),
            Placement::Unranked,
        ]
    );
    assert_eq!(ranking.len(), 3);
    assert!(ranking.store().get("easyBoard").unwrap().is_some());
    assert!(ranking.store().get("memoryGameRanking").unwrap().is_none());
}

/// The view yields 1-based ranks in table order.
#[test]
fn test_entries_view() {
    let mut ranking = RankingStore::new(MemoryStore::new(), RankingConfig::default());
    ranking.insert(record(20, 60));
    ranking.insert(record(10, 60));

    let ranks: Vec<_> = ranking
        .entries()
        .map(|(rank, r)| (rank, r.moves))
        .collect();
    assert_eq!(ranks, vec![(1, 10), (2, 20)]);
}

/// A table saved by the browser front-end, with locale dates and a
/// `null` score from a zero-second win, keeps its readable entries and
/// survives the next insert.
#[test]
fn test_browser_saved_table_is_kept() {
    let mut store = MemoryStore::new();
    store
        .set(
            "memoryGameRanking",
            br#"[{"moves":15,"time":42,"date":"19/10/2026","points":23810},{"moves":9,"time":0,"date":"18/10/2026","points":null},{"moves":20,"time":100,"date":"17/10/2026","points":7500}]"#,
        )
        .unwrap();

    let mut ranking = RankingStore::new(store, RankingConfig::default());
    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking.records()[0].points, 23_810);
    assert_eq!(
        ranking.records()[0].date,
        RecordDate::Text("19/10/2026".to_string())
    );

    assert_eq!(ranking.insert(record(10, 50)), Placement::Ranked(2));

    let blob = ranking.store().get("memoryGameRanking").unwrap().unwrap();
    let saved: serde_json::Value = serde_json::from_slice(&blob).unwrap();
    assert_eq!(saved.as_array().map(Vec::len), Some(3));
    assert_eq!(saved[0]["date"], "19/10/2026");
    assert_eq!(saved[0]["points"], 23_810);
    assert_eq!(saved[1]["points"], 20_000);
    assert_eq!(saved[2]["time"], 100);
}
