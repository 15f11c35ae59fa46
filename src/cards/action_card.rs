//! Action cards and the fixed deck.
//!
//! ## Identity
//!
//! Every physical card has its own `CardId`. Cards with the same printed
//! action are not interchangeable: initiatives differ, and conservation
//! checks count ids, not values.
//!
//! ## Initiative
//!
//! Each card carries a unique initiative. Within one register phase,
//! all programmed cards resolve in ascending initiative order.

use serde::{Deserialize, Serialize};

use crate::core::{CardId, Direction, IdGen, Turn};

/// Number of cards in the standard deck.
pub const DECK_SIZE: usize = 54;

/// What a card does when its register resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardAction {
    /// Move along the robot's facing. Negative distance backs up.
    MoveForward { distance: i8 },
    /// Rotate in place.
    Turn(Turn),
}

/// One physical action card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionCard {
    pub id: CardId,
    pub initiative: u32,
    pub action: CardAction,
}

impl ActionCard {
    /// A movement card.
    #[must_use]
    pub fn move_forward(id: CardId, distance: i8, initiative: u32) -> Self {
        Self {
            id,
            initiative,
            action: CardAction::MoveForward { distance },
        }
    }

    /// A turn card.
    #[must_use]
    pub fn turn(id: CardId, turn: Turn, initiative: u32) -> Self {
        Self {
            id,
            initiative,
            action: CardAction::Turn(turn),
        }
    }

    /// Direction of travel for a robot facing `facing`, or `None` for turns.
    #[must_use]
    pub fn travel_direction(&self, facing: Direction) -> Option<Direction> {
        match self.action {
            CardAction::MoveForward { distance } if distance < 0 => Some(facing.opposite()),
            CardAction::MoveForward { .. } => Some(facing),
            CardAction::Turn(_) => None,
        }
    }

    /// Number of single steps this card attempts.
    #[must_use]
    pub fn steps(&self) -> u32 {
        match self.action {
            CardAction::MoveForward { distance } => u32::from(distance.unsigned_abs()),
            CardAction::Turn(_) => 0,
        }
    }
}

impl std::fmt::Display for ActionCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.action {
            CardAction::MoveForward { distance: -1 } => write!(f, "Back Up")?,
            CardAction::MoveForward { distance } => write!(f, "Move {distance}")?,
            CardAction::Turn(Turn::Left) => write!(f, "Turn Left")?,
            CardAction::Turn(Turn::Right) => write!(f, "Turn Right")?,
            CardAction::Turn(Turn::UTurn) => write!(f, "U-Turn")?,
        }
        write!(f, " [{}]", self.initiative)
    }
}

/// Deck composition as `(action, copies)`, in initiative order.
const COMPOSITION: [(CardAction, u32); 7] = [
    (CardAction::Turn(Turn::UTurn), 3),
    (CardAction::Turn(Turn::Left), 12),
    (CardAction::Turn(Turn::Right), 12),
    (CardAction::MoveForward { distance: -1 }, 3),
    (CardAction::MoveForward { distance: 1 }, 12),
    (CardAction::MoveForward { distance: 2 }, 8),
    (CardAction::MoveForward { distance: 3 }, 4),
];

/// Build the fixed 54-card deck.
///
/// Card ids run `0..54` and initiatives `10, 20, .., 540`, so the deck is
/// identical in every game and can be rebuilt to verify conservation.
#[must_use]
pub fn standard_deck() -> Vec<ActionCard> {
    let mut ids = IdGen::new();
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for (action, copies) in COMPOSITION {
        for _ in 0..copies {
            let id = ids.card();
            deck.push(ActionCard {
                id,
                initiative: (id.raw() + 1) * 10,
                action,
            });
        }
    }
    debug_assert_eq!(deck.len(), DECK_SIZE);
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_standard_deck_size() {
        assert_eq!(standard_deck().len(), DECK_SIZE);
    }

    #[test]
    fn test_ids_and_initiatives_unique() {
        let deck = standard_deck();
        let ids: FxHashSet<_> = deck.iter().map(|c| c.id).collect();
        let initiatives: FxHashSet<_> = deck.iter().map(|c| c.initiative).collect();
        assert_eq!(ids.len(), DECK_SIZE);
        assert_eq!(initiatives.len(), DECK_SIZE);
    }

    #[test]
    fn test_deck_is_stable() {
        assert_eq!(standard_deck(), standard_deck());
    }

    #[test]
    fn test_travel_direction() {
        let forward = ActionCard::move_forward(CardId::new(0), 2, 10);
        let back = ActionCard::move_forward(CardId::new(1), -1, 20);
        let turn = ActionCard::turn(CardId::new(2), Turn::Left, 30);

        assert_eq!(forward.travel_direction(Direction::Up), Some(Direction::Up));
        assert_eq!(back.travel_direction(Direction::Up), Some(Direction::Down));
        assert_eq!(turn.travel_direction(Direction::Up), None);

        assert_eq!(forward.steps(), 2);
        assert_eq!(back.steps(), 1);
        assert_eq!(turn.steps(), 0);
    }

    #[test]
    fn test_display() {
        let card = ActionCard::move_forward(CardId::new(0), -1, 40);
        assert_eq!(card.to_string(), "Back Up [40]");
        let card = ActionCard::turn(CardId::new(0), Turn::UTurn, 10);
        assert_eq!(card.to_string(), "U-Turn [10]");
    }
}
