//! Error types.
//!
//! Play itself never fails: bad selections are ignored and unreadable
//! rankings load as empty. Errors only surface when configuring a game or
//! when a caller explicitly asks the persistence layer to write.

use std::path::PathBuf;

/// Invalid game configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("symbol pool is empty")]
    EmptyPool,
    #[error("symbol pool has {0} entries, at most 65535 supported")]
    PoolTooLarge(usize),
    #[error("duplicate symbol in pool: {0}")]
    DuplicateSymbol(String),
    #[error("pair count {pairs} must be between 1 and the pool size {pool}")]
    PairCount { pairs: usize, pool: usize },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failure reported by a key-value persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("encoding error: {0}")]
    Encoding(String),
}
