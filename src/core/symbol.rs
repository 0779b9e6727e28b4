//! Face values shown on cards.
//!
//! A `SymbolPool` is the alphabet a deck is drawn from. Cards never carry
//! the symbol text itself, only a `SymbolId` indexing into the pool, so two
//! cards match exactly when their ids are equal.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// The animal set every variant of the game ships with.
pub const DEFAULT_SYMBOLS: [&str; 15] = [
    "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁", "🐮", "🐷", "🐸", "🐵",
];

/// Index of a symbol within its pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub u16);

impl SymbolId {
    /// Create a new symbol ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw pool index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// Ordered set of distinct symbols a deck can be dealt from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SymbolPool {
    symbols: Vec<String>,
}

impl SymbolPool {
    /// Build a pool, rejecting empty pools and duplicate symbols.
    pub fn new<I, S>(symbols: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();

        if symbols.is_empty() {
            return Err(ConfigError::EmptyPool);
        }
        if symbols.len() > u16::MAX as usize {
            return Err(ConfigError::PoolTooLarge(symbols.len()));
        }
        for (i, symbol) in symbols.iter().enumerate() {
            if symbols[..i].contains(symbol) {
                return Err(ConfigError::DuplicateSymbol(symbol.clone()));
            }
        }

        Ok(Self { symbols })
    }

    /// Number of symbols in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Pools are never empty once constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Look up the display text for a symbol.
    #[must_use]
    pub fn get(&self, id: SymbolId) -> Option<&str> {
        self.symbols.get(id.index()).map(String::as_str)
    }

    /// Iterate over all ids in pool order.
    pub fn ids(&self) -> impl Iterator<Item = SymbolId> {
        (0..self.symbols.len() as u16).map(SymbolId)
    }
}

impl Default for SymbolPool {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for SymbolPool {
    type Error = ConfigError;

    fn try_from(symbols: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(symbols)
    }
}

impl From<SymbolPool> for Vec<String> {
    fn from(pool: SymbolPool) -> Self {
        pool.symbols
    }
}
