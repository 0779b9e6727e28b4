//! Read-only board view for presentation layers.

use std::sync::Arc;

use im::Vector;

use super::card::Card;
use super::engine::Phase;
use crate::core::SymbolPool;

/// Point-in-time copy of the board.
///
/// Cheap to take: the card vector shares structure with the live deck.
#[derive(Clone, Debug)]
pub struct BoardSnapshot {
    pub(crate) cards: Vector<Card>,
    pub(crate) pool: Arc<SymbolPool>,
    pub phase: Phase,
    pub moves: u32,
    pub elapsed_seconds: u32,
    pub matched_pairs: usize,
    pub pair_count: usize,
}

impl BoardSnapshot {
    /// Cards in board order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True for an empty board.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Symbol text at `position` if that card is face-up. Face-down cards
    /// do not leak their value.
    #[must_use]
    pub fn face(&self, position: usize) -> Option<&str> {
        let card = self.cards.get(position)?;
        if !card.is_face_up() {
            return None;
        }
        self.pool.get(card.symbol)
    }
}
