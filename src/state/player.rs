//! Players: a robot, a hand, and capture progress.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::ActionCard;
use crate::core::{CardId, CheckpointId, PlayerId, RobotId};

/// A player controlling one robot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub robot_id: RobotId,
    /// Cards dealt this round and not yet programmed.
    pub hand: Vector<ActionCard>,
    /// Captured checkpoints in capture order.
    pub captured_checkpoints: Vector<CheckpointId>,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, robot_id: RobotId) -> Self {
        Self {
            id,
            robot_id,
            hand: Vector::new(),
            captured_checkpoints: Vector::new(),
        }
    }

    /// Remove a card from the hand by id.
    ///
    /// Returns the card if it was in the hand.
    pub fn take_from_hand(&mut self, card: CardId) -> Option<ActionCard> {
        let index = self.hand.iter().position(|c| c.id == card)?;
        Some(self.hand.remove(index))
    }

    /// Has this player captured `checkpoint`?
    #[must_use]
    pub fn has_captured(&self, checkpoint: CheckpointId) -> bool {
        self.captured_checkpoints.contains(&checkpoint)
    }
}
