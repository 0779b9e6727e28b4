//! Dealing a deck of paired cards.

use im::Vector;
use rustc_hash::FxHashMap;
use tracing::debug;

use super::card::Card;
use crate::core::{ConfigError, GameRng, SymbolId, SymbolPool};

/// An ordered deck of `2N` cards, two per chosen symbol.
///
/// Backed by `im::Vector` so snapshots handed to a renderer share structure
/// with the live board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// Deal `pairs` symbols from `pool`, duplicate them and shuffle.
    ///
    /// When `pairs` is smaller than the pool, the symbols are a uniformly
    /// random subset.
    pub fn deal(pairs: usize, pool: &SymbolPool, rng: &mut GameRng) -> Result<Self, ConfigError> {
        if pairs == 0 || pairs > pool.len() {
            return Err(ConfigError::PairCount {
                pairs,
                pool: pool.len(),
            });
        }

        let chosen: Vec<SymbolId> = rng
            .choose_distinct(pool.len(), pairs)
            .into_iter()
            .map(|i| SymbolId::new(i as u16))
            .collect();

        let mut faces: Vec<SymbolId> = chosen.iter().chain(chosen.iter()).copied().collect();
        rng.shuffle(&mut faces);

        debug!(pairs, seed = rng.seed(), "dealt deck");
        Ok(Self::from_faces(&faces))
    }

    /// Lay out cards face-down in the given order, without shuffling.
    #[must_use]
    pub fn from_faces(faces: &[SymbolId]) -> Self {
        Self {
            cards: faces
                .iter()
                .enumerate()
                .map(|(position, &symbol)| Card::new(position, symbol))
                .collect(),
        }
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True for a deck with no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card at a position.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    /// Mutable card at a position.
    pub fn get_mut(&mut self, position: usize) -> Option<&mut Card> {
        self.cards.get_mut(position)
    }

    /// Iterate cards in board order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Occurrences of each face value.
    #[must_use]
    pub fn symbol_counts(&self) -> FxHashMap<SymbolId, usize> {
        let mut counts = FxHashMap::default();
        for card in &self.cards {
            *counts.entry(card.symbol).or_insert(0) += 1;
        }
        counts
    }

    /// Position of the other card carrying the same symbol.
    #[must_use]
    pub fn partner_of(&self, position: usize) -> Option<usize> {
        let symbol = self.get(position)?.symbol;
        self.cards
            .iter()
            .find(|c| c.symbol == symbol && c.position != position)
            .map(|c| c.position)
    }

    pub(crate) fn cards(&self) -> &Vector<Card> {
        &self.cards
    }
}
