//! Laser fire.
//!
//! Every active robot fires a power-1 beam ahead of itself and every cannon
//! fires its configured power. A beam travels cell by cell until it leaves
//! the course, meets a wall, or enters an occupied cell. The occupied cell is
//! the last cell of the path and its robot takes the beam's power.
//!
//! All beams are traced against the same positions and damage is applied
//! at once. Lasers never destroy a robot; health stops at zero.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Direction, Pos, RobotId};
use crate::course::Course;
use crate::state::GameModel;

/// Power of a robot's own laser.
pub const ROBOT_LASER_POWER: u8 = 1;

/// Who fired a beam.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaserSource {
    Robot(RobotId),
    /// A course cannon, by position.
    Cannon(Pos),
}

/// One traced beam.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaserBeam {
    pub source: LaserSource,
    pub dir: Direction,
    pub power: u8,
    /// Cells the beam covers, in order. Empty when a wall sits in front of
    /// the source.
    pub path: Vec<Pos>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaserReport {
    pub beams: Vec<LaserBeam>,
    /// Remaining health of every robot that was hit.
    pub damage: BTreeMap<RobotId, u8>,
}

impl LaserReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.beams.is_empty()
    }
}

fn trace_beam(
    course: &Course,
    occupancy: &FxHashMap<Pos, RobotId>,
    origin: Pos,
    dir: Direction,
) -> Vec<Pos> {
    let mut path = Vec::new();
    let mut cell = origin;
    let limit = course.width + course.height;

    for _ in 0..limit {
        if !course.is_on_course(cell) {
            break;
        }
        path.push(cell);
        if occupancy.contains_key(&cell) || course.is_blocked(cell, dir) {
            break;
        }
        cell = cell + dir;
    }
    path
}

/// Fire every robot laser and every cannon once.
pub fn resolve_lasers(state: &GameModel) -> (GameModel, LaserReport) {
    let course = &state.course;
    let occupancy = state.occupancy();
    let mut report = LaserReport::default();

    for robot in &state.robots {
        let path = if course.is_blocked(robot.pos, robot.dir) {
            Vec::new()
        } else {
            trace_beam(course, &occupancy, robot.pos + robot.dir, robot.dir)
        };
        report.beams.push(LaserBeam {
            source: LaserSource::Robot(robot.id),
            dir: robot.dir,
            power: ROBOT_LASER_POWER,
            path,
        });
    }

    for cannon in &course.laser_cannons {
        report.beams.push(LaserBeam {
            source: LaserSource::Cannon(cannon.pos),
            dir: cannon.dir,
            power: cannon.power,
            path: trace_beam(course, &occupancy, cannon.pos, cannon.dir),
        });
    }

    let mut hits: BTreeMap<RobotId, u8> = BTreeMap::new();
    for beam in &report.beams {
        if let Some(&target) = beam.path.last().and_then(|cell| occupancy.get(cell)) {
            let total = hits.entry(target).or_default();
            *total = total.saturating_add(beam.power);
        }
    }

    if hits.is_empty() {
        return (state.clone(), report);
    }

    let mut next = state.clone();
    for (id, damage) in hits {
        let mut health = 0;
        next.update_robot(id, |r| {
            r.health = r.health.saturating_sub(damage);
            health = r.health;
        });
        tracing::debug!(robot = %id, damage, health, "laser hit");
        report.damage.insert(id, health);
    }
    (next, report)
}
