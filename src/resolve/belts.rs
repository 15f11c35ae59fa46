//! Conveyor belt transport.
//!
//! All robots on matching belts move as one batch. A candidate move is
//! cancelled when:
//! 1. another candidate targets the same cell
//! 2. it would swap places head-on with a robot belted the opposite way
//! 3. a wall lies between source and destination
//! 4. the destination holds a robot that is not moving this batch
//!
//! Rule 4 runs to a fixed point: a cancelled move leaves its robot in
//! place, which may block the move behind it. Belts never push.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{Direction, Pos, RobotId};
use crate::course::{BeltSpeed, ConveyorBelt};
use crate::state::GameModel;

/// Which belts run in a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeltFilter {
    All,
    ExpressOnly,
}

impl BeltFilter {
    #[must_use]
    pub fn matches(self, belt: &ConveyorBelt) -> bool {
        match self {
            BeltFilter::All => true,
            BeltFilter::ExpressOnly => belt.speed == BeltSpeed::Express,
        }
    }
}

/// What a belt pass did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeltReport {
    pub moves: BTreeMap<RobotId, Pos>,
    /// New facing of robots turned by a curve.
    pub rotations: BTreeMap<RobotId, Direction>,
    pub falls: BTreeMap<RobotId, u8>,
    /// Belt cells that ran this pass.
    pub activated: BTreeSet<Pos>,
}

impl BeltReport {
    /// Did any robot move?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    robot: RobotId,
    from: Pos,
    to: Pos,
    dir: Direction,
}

/// Run every belt matching `filter` once.
pub fn resolve_conveyor_belts(state: &GameModel, filter: BeltFilter) -> (GameModel, BeltReport) {
    let course = &state.course;
    let mut report = BeltReport {
        activated: course
            .conveyor_belts
            .iter()
            .filter(|(_, belt)| filter.matches(belt))
            .map(|(pos, _)| *pos)
            .collect(),
        ..BeltReport::default()
    };

    let candidates: Vec<Candidate> = state
        .robots
        .iter()
        .filter_map(|r| {
            let belt = course.belt_at(r.pos).filter(|b| filter.matches(b))?;
            Some(Candidate {
                robot: r.id,
                from: r.pos,
                to: r.pos + belt.dir,
                dir: belt.dir,
            })
        })
        .collect();

    let mut moving: Vec<Candidate> = candidates
        .iter()
        .copied()
        .filter(|c| candidates.iter().filter(|o| o.to == c.to).count() == 1)
        .filter(|c| {
            !candidates
                .iter()
                .any(|o| o.robot != c.robot && o.from == c.to && o.dir == c.dir.opposite())
        })
        .filter(|c| !course.is_blocked(c.from, c.dir))
        .collect();

    // Each pass either removes a candidate or stops.
    for _ in 0..=candidates.len() {
        let movers: FxHashSet<RobotId> = moving.iter().map(|c| c.robot).collect();
        let stationary: FxHashSet<Pos> = state
            .robots
            .iter()
            .filter(|r| !movers.contains(&r.id))
            .map(|r| r.pos)
            .collect();
        let before = moving.len();
        moving.retain(|c| !stationary.contains(&c.to));
        if moving.len() == before {
            break;
        }
    }

    if moving.is_empty() {
        return (state.clone(), report);
    }

    let mut next = state.clone();
    for c in &moving {
        next.update_robot(c.robot, |r| r.pos = c.to);
        report.moves.insert(c.robot, c.to);
    }

    for c in &moving {
        if let Some(rotation) = course.belt_at(c.to).and_then(|b| c.dir.rotation_to(b.dir)) {
            let mut facing = Direction::Up;
            next.update_robot(c.robot, |r| {
                r.dir = r.dir.rotated(rotation);
                facing = r.dir;
            });
            report.rotations.insert(c.robot, facing);
        }
    }

    for c in &moving {
        if course.is_missing_floor(c.to) {
            let health = next.destroy_robot(c.robot);
            report.falls.insert(c.robot, health);
        }
    }

    tracing::debug!(?filter, moved = report.moves.len(), "belts resolved");
    (next, report)
}
