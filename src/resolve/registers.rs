//! Register locking and the end-of-round wipe.
//!
//! Locks are a function of current health and are recomputed every time,
//! so a robot that heals gets its registers back.

use std::collections::BTreeMap;

use crate::core::RobotId;
use crate::state::GameModel;

/// Locked register indices for every robot.
pub type LockedRegisters = BTreeMap<RobotId, Vec<usize>>;

fn locked_registers(state: &GameModel) -> LockedRegisters {
    state
        .robots
        .iter()
        .chain(state.destroyed_robots.iter())
        .map(|r| (r.id, r.locked_indices()))
        .collect()
}

/// Lock every register whose index is at or past the robot's health.
///
/// Returns the model and the locked indices of every robot, plus whether
/// any lock changed.
pub fn resolve_register_locking(state: &GameModel) -> (GameModel, LockedRegisters, bool) {
    let mut next = state.clone();
    let mut changed = false;
    for robot in next
        .robots
        .iter_mut()
        .chain(next.destroyed_robots.iter_mut())
    {
        changed |= robot.refresh_locks();
    }
    let locked = locked_registers(&next);
    (next, locked, changed)
}

/// Discard every unlocked register card and every hand card.
///
/// Returns the model and what stayed locked.
pub fn resolve_wipe_registers(state: &GameModel) -> (GameModel, LockedRegisters) {
    let mut next = state.clone();
    let mut discarded = Vec::new();

    for robot in next
        .robots
        .iter_mut()
        .chain(next.destroyed_robots.iter_mut())
    {
        discarded.extend(robot.take_unlocked());
    }
    for player in next.players.iter_mut() {
        discarded.extend(std::mem::take(&mut player.hand));
    }

    tracing::trace!(cards = discarded.len(), "registers wiped");
    next.action_discard_pile.extend(discarded);
    let locked = locked_registers(&next);
    (next, locked)
}
