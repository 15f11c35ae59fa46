//! Returning destroyed robots to the course.
//!
//! A destroyed robot with health left reappears on its spawn point, facing
//! the way it faced when it fell. If another robot holds that cell, the
//! nearest free floor cell is used instead: breadth-first over neighbours
//! in `Direction::CLOCKWISE` order, ignoring walls. Robots at zero health
//! are out of the game and stay destroyed.

use std::collections::{BTreeMap, VecDeque};

use rustc_hash::FxHashSet;

use crate::core::{Direction, Pos, RobotId};
use crate::course::Course;
use crate::state::GameModel;

fn free_cell_near(course: &Course, occupied: &FxHashSet<Pos>, origin: Pos) -> Option<Pos> {
    let mut queue = VecDeque::from([origin]);
    let mut seen = FxHashSet::default();
    seen.insert(origin);

    while let Some(cell) = queue.pop_front() {
        if !course.is_missing_floor(cell) && !occupied.contains(&cell) {
            return Some(cell);
        }
        for dir in Direction::CLOCKWISE {
            let neighbour = cell + dir;
            if course.is_on_course(neighbour) && seen.insert(neighbour) {
                queue.push_back(neighbour);
            }
        }
    }
    None
}

/// Put every destroyed robot with health back on the course.
///
/// Robots respawn in id order. Returns the model and each respawned robot's
/// new position.
pub fn resolve_respawn(state: &GameModel) -> (GameModel, BTreeMap<RobotId, Pos>) {
    let mut respawned = BTreeMap::new();
    let mut waiting: Vec<RobotId> = state
        .destroyed_robots
        .iter()
        .filter(|r| r.health > 0)
        .map(|r| r.id)
        .collect();
    if waiting.is_empty() {
        return (state.clone(), respawned);
    }
    waiting.sort_unstable();

    let mut next = state.clone();
    let mut occupied: FxHashSet<Pos> = next.robots.iter().map(|r| r.pos).collect();

    for id in waiting {
        let Some(index) = next.destroyed_robots.iter().position(|r| r.id == id) else {
            continue;
        };
        let spawn = next.destroyed_robots[index].spawn;
        let Some(pos) = free_cell_near(&next.course, &occupied, spawn) else {
            tracing::debug!(robot = %id, "no free cell to respawn");
            continue;
        };
        let mut robot = next.destroyed_robots.remove(index);
        robot.pos = pos;
        occupied.insert(pos);
        next.robots.push_back(robot);
        respawned.insert(id, pos);
        tracing::debug!(robot = %id, %pos, "robot respawned");
    }
    (next, respawned)
}
