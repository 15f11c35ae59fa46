//! Card movement with pushing, and card rotation.
//!
//! ## One step at a time
//!
//! `resolve_movement` advances a robot by exactly one cell. A `Move 3`
//! card calls it three times so that checkpoints, falls and pushes are
//! observed after every cell.
//!
//! ## Push chain
//!
//! Starting at the mover, every robot standing directly ahead with no gap
//! belongs to the chain. The chain advances together into the first empty
//! cell. A wall in front of any chain member stops the whole chain. Robots
//! that step onto missing floor are destroyed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Direction, Pos, RobotId, Turn};
use crate::state::GameModel;

/// What one movement step did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementStep {
    /// New position of every robot that moved.
    pub moves: BTreeMap<RobotId, Pos>,
    /// Remaining health of every robot that fell.
    pub falls: BTreeMap<RobotId, u8>,
}

impl MovementStep {
    /// A step that moved nobody.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Robots pushed together when the robot at `start` moves towards `dir`.
///
/// Empty when nothing can move.
fn push_chain(state: &GameModel, start: Pos, dir: Direction) -> SmallVec<[RobotId; 4]> {
    let occupancy = state.occupancy();
    let limit = state.course.width.max(state.course.height);
    let mut chain = SmallVec::new();
    let mut cell = start;

    for _ in 0..=limit {
        match occupancy.get(&cell) {
            Some(&id) => chain.push(id),
            None => return chain,
        }
        if state.course.is_blocked(cell, dir) {
            break;
        }
        cell = cell + dir;
    }

    SmallVec::new()
}

/// Move `robot` one cell towards `dir`, pushing any robots in the way.
///
/// A destroyed robot does not move. The returned step is empty when a wall
/// blocks the chain.
pub fn resolve_movement(
    state: &GameModel,
    robot: RobotId,
    dir: Direction,
) -> (GameModel, MovementStep) {
    let mut report = MovementStep::default();
    if state.is_destroyed(robot) {
        return (state.clone(), report);
    }

    let start = match state.robot(robot) {
        Some(r) => r.pos,
        None => panic!("unknown robot id: {robot}"),
    };
    let chain = push_chain(state, start, dir);
    if chain.is_empty() {
        tracing::trace!(%robot, %dir, "movement blocked");
        return (state.clone(), report);
    }

    let mut next = state.clone();
    for &id in &chain {
        let mut to = start;
        next.update_robot(id, |r| {
            r.pos = r.pos + dir;
            to = r.pos;
        });
        report.moves.insert(id, to);
    }

    for &id in &chain {
        let to = report.moves[&id];
        if next.course.is_missing_floor(to) {
            let health = next.destroy_robot(id);
            report.falls.insert(id, health);
        }
    }

    tracing::trace!(%robot, %dir, pushed = chain.len() - 1, "movement step");
    (next, report)
}

/// Rotate `robot` by a card turn.
///
/// Returns the robot's new facing. A destroyed robot keeps its facing.
pub fn resolve_rotation(state: &GameModel, robot: RobotId, turn: Turn) -> (GameModel, RobotId, Direction) {
    let mut next = state.clone();
    if next.is_destroyed(robot) {
        let dir = next.expect_robot(robot).dir;
        return (next, robot, dir);
    }

    let mut dir = Direction::Up;
    next.update_robot(robot, |r| {
        r.dir = r.dir.turned(turn);
        dir = r.dir;
    });
    (next, robot, dir)
}
