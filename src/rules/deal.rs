//! Dealing action cards.
//!
//! Cards come off the top of the draw pile (the back of the vector). When
//! the draw pile cannot cover a hand, the discard pile is shuffled with the
//! model's generator and slid under it.

use std::collections::BTreeMap;

use im::Vector;

use crate::cards::ActionCard;
use crate::core::{GameRng, PlayerId};
use crate::state::GameModel;

fn reshuffle(model: &mut GameModel) {
    let mut rng = GameRng::from_state(&model.rng);
    let mut cards: Vec<ActionCard> = std::mem::take(&mut model.action_discard_pile)
        .into_iter()
        .collect();
    rng.shuffle(&mut cards);

    let mut pile: Vector<ActionCard> = cards.into_iter().collect();
    pile.append(std::mem::take(&mut model.action_draw_pile));
    model.action_draw_pile = pile;
    model.rng = rng.state();
    tracing::debug!(cards = model.action_draw_pile.len(), "discard pile reshuffled");
}

/// Cards a player with `locked` locked registers is dealt.
#[must_use]
pub fn hand_size_for(hand_size: usize, locked: usize) -> usize {
    hand_size.saturating_sub(locked)
}

/// Deal every player whose robot still has health a fresh hand.
///
/// A player receives the configured hand size minus their locked registers.
/// Returns the model and the number of cards each player received.
///
/// Panics if draw and discard piles together cannot cover a hand; setup
/// rejects player counts for which that could happen.
pub fn deal_action_cards(state: &GameModel) -> (GameModel, BTreeMap<PlayerId, usize>) {
    let mut next = state.clone();
    let mut dealt = BTreeMap::new();

    for player in &state.players {
        let robot = state.expect_robot(player.robot_id);
        if robot.health == 0 {
            continue;
        }
        let count = hand_size_for(state.config.hand_size, robot.locked_indices().len());

        if next.action_draw_pile.len() < count {
            reshuffle(&mut next);
        }
        let available = next.action_draw_pile.len();
        assert!(
            available >= count,
            "deck exhausted: {} needs {count} cards, {available} left",
            player.id
        );

        let hand = next.action_draw_pile.split_off(available - count);
        next.update_player(player.id, |p| p.hand.append(hand));
        dealt.insert(player.id, count);
    }

    tracing::trace!(players = dealt.len(), "hands dealt");
    (next, dealt)
}
