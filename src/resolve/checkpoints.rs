//! Checkpoint capture.

use serde::{Deserialize, Serialize};

use crate::core::{CheckpointId, PlayerId, Pos, RobotId};
use crate::state::GameModel;

/// A player captured a checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointCapture {
    pub player: PlayerId,
    pub robot: RobotId,
    pub checkpoint: CheckpointId,
    pub pos: Pos,
}

/// Capture each player's next required checkpoint if their robot stands on it.
///
/// Only the lowest-order uncaptured checkpoint counts, so standing on a later
/// one does nothing. A capture also moves the robot's spawn point there.
pub fn resolve_checkpoints(state: &GameModel) -> (GameModel, Vec<CheckpointCapture>) {
    let captures: Vec<CheckpointCapture> = state
        .players
        .iter()
        .filter_map(|player| {
            let robot = state.robot(player.robot_id)?;
            let next = state.course.next_checkpoint(&player.captured_checkpoints)?;
            (next.pos == robot.pos).then_some(CheckpointCapture {
                player: player.id,
                robot: robot.id,
                checkpoint: next.id,
                pos: next.pos,
            })
        })
        .collect();

    if captures.is_empty() {
        return (state.clone(), captures);
    }

    let mut next = state.clone();
    for capture in &captures {
        next.update_player(capture.player, |p| {
            p.captured_checkpoints.push_back(capture.checkpoint)
        });
        next.update_robot(capture.robot, |r| r.spawn = capture.pos);
        tracing::debug!(
            player = %capture.player,
            checkpoint = %capture.checkpoint,
            pos = %capture.pos,
            "checkpoint captured"
        );
    }
    (next, captures)
}
