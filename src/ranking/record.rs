//! Score records and their ordering.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::board::WinSummary;

/// One finished game on the leaderboard. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Completed turns. Always at least 1.
    pub moves: u32,

    /// Elapsed seconds.
    #[serde(rename = "time")]
    pub time_seconds: u32,

    /// Points under the rule the game was played with.
    pub points: u64,

    /// When the game was won.
    pub date: RecordDate,
}

impl ScoreRecord {
    /// Record a win at the given time.
    #[must_use]
    pub fn new(summary: &WinSummary, date: DateTime<Utc>) -> Self {
        Self {
            moves: summary.moves,
            time_seconds: summary.time_seconds,
            points: summary.points,
            date: RecordDate::Timestamp(date),
        }
    }

    /// Record a win stamped with the current time.
    #[must_use]
    pub fn now(summary: &WinSummary) -> Self {
        Self::new(summary, Utc::now())
    }

    /// Could this record have come out of a real game?
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.moves >= 1
    }
}

/// Date of a record.
///
/// Tables written by older front-ends carry a locale-formatted date such as
/// `"19/10/2026"`. Those are kept verbatim as `Text` and written back
/// unchanged.
///
/// In human-readable formats both variants are a bare string. Compact formats
/// store the variant explicitly.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RecordDate {
    /// A parsed UTC timestamp.
    Timestamp(DateTime<Utc>),
    /// Free-form date text that is not RFC 3339.
    Text(String),
}

impl RecordDate {
    /// The timestamp, if the date parsed as one.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            RecordDate::Timestamp(at) => Some(*at),
            RecordDate::Text(_) => None,
        }
    }
}

impl From<DateTime<Utc>> for RecordDate {
    fn from(at: DateTime<Utc>) -> Self {
        RecordDate::Timestamp(at)
    }
}

impl fmt::Display for RecordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordDate::Timestamp(at) => write!(f, "{}", at.to_rfc3339()),
            RecordDate::Text(text) => f.write_str(text),
        }
    }
}

/// Tagged form used by non-human-readable formats such as bincode.
#[derive(Serialize, Deserialize)]
enum CompactDate {
    Timestamp(DateTime<Utc>),
    Text(String),
}

impl Serialize for RecordDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            return match self {
                RecordDate::Timestamp(at) => at.serialize(serializer),
                RecordDate::Text(text) => serializer.serialize_str(text),
            };
        }
        let compact = match self {
            RecordDate::Timestamp(at) => CompactDate::Timestamp(*at),
            RecordDate::Text(text) => CompactDate::Text(text.clone()),
        };
        compact.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RecordDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let text = String::deserialize(deserializer)?;
            return Ok(match text.parse::<DateTime<Utc>>() {
                Ok(at) => RecordDate::Timestamp(at),
                Err(_) => RecordDate::Text(text),
            });
        }
        Ok(match CompactDate::deserialize(deserializer)? {
            CompactDate::Timestamp(at) => RecordDate::Timestamp(at),
            CompactDate::Text(text) => RecordDate::Text(text),
        })
    }
}

/// Ordering among records with equal points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Faster games rank higher.
    #[default]
    FasterFirst,
    /// Earlier entries rank higher.
    InsertionOrder,
}

impl TieBreak {
    /// `Less` when `a` ranks ahead of `b`.
    #[must_use]
    pub fn compare(self, a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
        let by_points = b.points.cmp(&a.points);
        match self {
            TieBreak::FasterFirst => by_points.then_with(|| a.time_seconds.cmp(&b.time_seconds)),
            TieBreak::InsertionOrder => by_points,
        }
    }
}
