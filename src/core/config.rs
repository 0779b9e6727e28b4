//! Game configuration types.
//!
//! Hosts configure a game at startup by providing:
//! - `GameConfig`: pair count, symbol pool, timer policy, scoring rule
//! - `RankingConfig`: leaderboard capacity, ordering and persistence key
//!
//! Both derive `serde` with defaults for every field, so a TOML file only
//! needs the keys it wants to change:
//!
//! ```
//! use memory_match::core::GameConfig;
//!
//! let config = GameConfig::from_toml_str(r#"
//!     pair_count = 8
//!     flip_delay_ms = 750
//!
//!     [ranking]
//!     capacity = 5
//! "#).unwrap();
//!
//! assert_eq!(config.pair_count, 8);
//! assert_eq!(config.ranking.capacity, 5);
//! assert_eq!(config.ranking.storage_key, "memoryGameRanking");
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::ConfigError;
use super::symbol::SymbolPool;
use crate::ranking::{RankingCodec, TieBreak};
use crate::scoring::ScoringRule;

/// Default delay before a mismatched pair is turned back over.
pub const DEFAULT_FLIP_DELAY_MS: u64 = 1000;

/// Default length of one elapsed-time tick.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Default number of entries kept on the leaderboard.
pub const DEFAULT_RANKING_CAPACITY: usize = 10;

/// Default persistence key for the leaderboard.
pub const DEFAULT_STORAGE_KEY: &str = "memoryGameRanking";

/// When the elapsed-time clock starts running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimerStart {
    /// Start on the first accepted card flip.
    #[default]
    OnFirstFlip,
    /// Start as soon as the deck is dealt.
    OnInitialize,
}

/// Leaderboard configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Maximum entries kept (K).
    pub capacity: usize,

    /// Ordering among records with equal points.
    pub tie_break: TieBreak,

    /// Key under which the table is persisted.
    pub storage_key: String,

    /// Blob format of the persisted table.
    pub codec: RankingCodec,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_RANKING_CAPACITY,
            tie_break: TieBreak::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            codec: RankingCodec::default(),
        }
    }
}

impl RankingConfig {
    /// Set the maximum number of entries.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the tie-break rule.
    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Set the persistence key.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the persisted blob format.
    #[must_use]
    pub fn with_codec(mut self, codec: RankingCodec) -> Self {
        self.codec = codec;
        self
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of symbol pairs dealt (N). The deck holds `2 * pair_count` cards.
    pub pair_count: usize,

    /// Alphabet the dealt symbols are drawn from.
    pub symbols: SymbolPool,

    /// Delay before a mismatched pair is concealed again.
    pub flip_delay_ms: u64,

    /// Length of one elapsed-time tick.
    pub tick_interval_ms: u64,

    /// When the elapsed-time clock starts.
    pub timer_start: TimerStart,

    /// How points are derived from moves and time.
    pub scoring: ScoringRule,

    /// Fixed RNG seed. `None` seeds once from entropy; later deals continue
    /// that stream.
    pub seed: Option<u64>,

    /// Leaderboard settings.
    pub ranking: RankingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        let symbols = SymbolPool::default();
        Self {
            pair_count: symbols.len(),
            symbols,
            flip_delay_ms: DEFAULT_FLIP_DELAY_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            timer_start: TimerStart::default(),
            scoring: ScoringRule::default(),
            seed: None,
            ranking: RankingConfig::default(),
        }
    }
}

impl GameConfig {
    /// Create the default configuration (every symbol of the default pool).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of pairs.
    #[must_use]
    pub fn with_pair_count(mut self, pairs: usize) -> Self {
        self.pair_count = pairs;
        self
    }

    /// Replace the symbol pool.
    #[must_use]
    pub fn with_symbols(mut self, symbols: SymbolPool) -> Self {
        self.symbols = symbols;
        self
    }

    /// Set the mismatch conceal delay.
    #[must_use]
    pub fn with_flip_delay(mut self, delay: Duration) -> Self {
        self.flip_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the tick interval.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the timer start policy.
    #[must_use]
    pub fn with_timer_start(mut self, policy: TimerStart) -> Self {
        self.timer_start = policy;
        self
    }

    /// Set the scoring rule.
    #[must_use]
    pub fn with_scoring(mut self, rule: ScoringRule) -> Self {
        self.scoring = rule;
        self
    }

    /// Fix the RNG seed for reproducible deals.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the leaderboard settings.
    #[must_use]
    pub fn with_ranking(mut self, ranking: RankingConfig) -> Self {
        self.ranking = ranking;
        self
    }

    /// Mismatch conceal delay as a `Duration`.
    #[must_use]
    pub fn flip_delay(&self) -> Duration {
        Duration::from_millis(self.flip_delay_ms)
    }

    /// Tick interval as a `Duration`.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pair_count == 0 || self.pair_count > self.symbols.len() {
            return Err(ConfigError::PairCount {
                pairs: self.pair_count,
                pool: self.symbols.len(),
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Zero("tick_interval_ms"));
        }
        if self.ranking.capacity == 0 {
            return Err(ConfigError::Zero("ranking.capacity"));
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded game config from {}", path.display());
        debug!(
            pairs = config.pair_count,
            pool = config.symbols.len(),
            scoring = ?config.scoring,
            "config"
        );
        Ok(config)
    }
}
