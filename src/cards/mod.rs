//! Action cards: the programmable movement and turn cards.
//!
//! ## Key Types
//!
//! - `ActionCard`: one physical card with a unique id and initiative
//! - `CardAction`: what the card does
//! - `standard_deck()`: the fixed 54-card deck

pub mod action_card;

pub use action_card::{standard_deck, ActionCard, CardAction, DECK_SIZE};
