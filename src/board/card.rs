//! Cards on the board.
//!
//! A card's lifecycle is `Hidden -> Revealed -> (Hidden | Matched)`.
//! `Matched` is terminal. The transition methods return `false` instead of
//! changing anything when asked for a move the lifecycle does not allow.

use serde::{Deserialize, Serialize};

use crate::core::SymbolId;

/// Which side of a card is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// Face-down, selectable.
    #[default]
    Hidden,
    /// Face-up while its turn is unresolved.
    Revealed,
    /// Face-up for the rest of the game.
    Matched,
}

/// A card at a fixed board position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Board position, `0..2N`.
    pub position: usize,

    /// Face value. Exactly one other card on the board shares it.
    pub symbol: SymbolId,

    /// Current side showing.
    pub visibility: Visibility,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub fn new(position: usize, symbol: SymbolId) -> Self {
        Self {
            position,
            symbol,
            visibility: Visibility::Hidden,
        }
    }

    /// Is the face showing (revealed or matched)?
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.visibility != Visibility::Hidden
    }

    /// Has this card been matched?
    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.visibility == Visibility::Matched
    }

    /// Hidden -> Revealed.
    pub fn reveal(&mut self) -> bool {
        self.transition(Visibility::Hidden, Visibility::Revealed)
    }

    /// Revealed -> Hidden.
    pub fn conceal(&mut self) -> bool {
        self.transition(Visibility::Revealed, Visibility::Hidden)
    }

    /// Revealed -> Matched.
    pub fn mark_matched(&mut self) -> bool {
        self.transition(Visibility::Revealed, Visibility::Matched)
    }

    fn transition(&mut self, from: Visibility, to: Visibility) -> bool {
        if self.visibility != from {
            return false;
        }
        self.visibility = to;
        true
    }
}
