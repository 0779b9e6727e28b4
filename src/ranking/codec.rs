//! Blob formats for a persisted ranking table.

use serde::{Deserialize, Serialize};

use super::record::ScoreRecord;
use crate::core::StorageError;

/// One decoded table entry, or why it could not be read.
pub type DecodedEntry = Result<ScoreRecord, StorageError>;

/// How the ranking table is serialized before it reaches storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankingCodec {
    /// JSON array of records, readable by web front-ends.
    #[default]
    Json,
    /// Compact `bincode` encoding.
    Binary,
}

impl RankingCodec {
    /// Serialize a table.
    pub fn encode(self, records: &[ScoreRecord]) -> Result<Vec<u8>, StorageError> {
        match self {
            RankingCodec::Json => {
                serde_json::to_vec(records).map_err(|e| StorageError::Encoding(e.to_string()))
            }
            RankingCodec::Binary => {
                bincode::serialize(records).map_err(|e| StorageError::Encoding(e.to_string()))
            }
        }
    }

    /// Deserialize a table entry by entry.
    ///
    /// The outer error means the blob is not a table at all. For JSON, each
    /// array element decodes on its own, so one bad entry does not take the
    /// rest down with it. Binary blobs decode as a whole. Shape checks beyond
    /// decoding happen in the store.
    pub fn decode(self, blob: &[u8]) -> Result<Vec<DecodedEntry>, StorageError> {
        match self {
            RankingCodec::Json => {
                let values: Vec<serde_json::Value> = serde_json::from_slice(blob)
                    .map_err(|e| StorageError::Encoding(e.to_string()))?;
                Ok(values
                    .into_iter()
                    .map(|value| {
                        serde_json::from_value(value)
                            .map_err(|e| StorageError::Encoding(e.to_string()))
                    })
                    .collect())
            }
            RankingCodec::Binary => {
                let records: Vec<ScoreRecord> = bincode::deserialize(blob)
                    .map_err(|e| StorageError::Encoding(e.to_string()))?;
                Ok(records.into_iter().map(Ok).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::RecordDate;
    use chrono::{TimeZone, Utc};

    fn sample() -> Vec<ScoreRecord> {
        vec![
            ScoreRecord {
                moves: 15,
                time_seconds: 42,
                points: 23_810,
                date: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap().into(),
            },
            ScoreRecord {
                moves: 30,
                time_seconds: 120,
                points: 4_167,
                date: Utc.with_ymd_and_hms(2024, 3, 2, 8, 30, 0).unwrap().into(),
            },
        ]
    }

    #[test]
    fn test_both_codecs_preserve_records() {
        for codec in [RankingCodec::Json, RankingCodec::Binary] {
            let blob = codec.encode(&sample()).unwrap();
            let decoded: Vec<_> = codec
                .decode(&blob)
                .unwrap()
                .into_iter()
                .map(Result::unwrap)
                .collect();
            assert_eq!(decoded, sample(), "{codec:?}");
        }
    }

    #[test]
    fn test_json_is_an_array() {
        let blob = RankingCodec::Json.encode(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&blob).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(RankingCodec::Json.decode(b"not json").is_err());
        assert!(RankingCodec::Json.decode(b"{\"moves\": 1}").is_err());
        assert!(RankingCodec::Binary.decode(&[0xFF, 0x01]).is_err());
    }

    #[test]
    fn test_json_bad_entry_is_isolated() {
        let blob = br#"[
            {"moves":15,"time":42,"date":"19/10/2026","points":23810},
            {"moves":8,"time":0,"date":"19/10/2026","points":null},
            "junk"
        ]"#;
        let entries = RankingCodec::Json.decode(blob).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].as_ref().unwrap().points, 23_810);
        assert!(entries[1].is_err());
        assert!(entries[2].is_err());
    }

    #[test]
    fn test_binary_keeps_text_dates() {
        let mut records = sample();
        records[1].date = RecordDate::Text("2/3/2024".to_string());

        let blob = RankingCodec::Binary.encode(&records).unwrap();
        let decoded = RankingCodec::Binary.decode(&blob).unwrap();
        assert_eq!(decoded[1].as_ref().unwrap().date, records[1].date);
    }
}
