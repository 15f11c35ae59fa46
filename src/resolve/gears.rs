//! Gear rotation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{Direction, RobotId};
use crate::state::GameModel;

/// New facing of every robot standing on a gear.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearReport {
    pub rotations: BTreeMap<RobotId, Direction>,
}

impl GearReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rotations.is_empty()
    }
}

/// Rotate every active robot on a gear by the gear's quarter turn.
pub fn resolve_gears(state: &GameModel) -> (GameModel, GearReport) {
    let mut report = GearReport::default();
    let turning: Vec<(RobotId, Direction)> = state
        .robots
        .iter()
        .filter_map(|r| {
            let gear = state.course.gear_at(r.pos)?;
            Some((r.id, r.dir.rotated(gear.rotation)))
        })
        .collect();

    if turning.is_empty() {
        return (state.clone(), report);
    }

    let mut next = state.clone();
    for (id, dir) in turning {
        next.update_robot(id, |r| r.dir = dir);
        report.rotations.insert(id, dir);
    }
    (next, report)
}
