//! Static course description.
//!
//! A `Course` never changes during a game. Resolvers query it for walls,
//! floor, belts, gears, lasers and checkpoints.
//!
//! ## Walls
//!
//! A wall sits on one edge of one cell and blocks movement across that
//! edge in both directions. The same physical wall may be recorded from
//! either side: `Wall { pos: (2,0), dir: Right }` and
//! `Wall { pos: (3,0), dir: Left }` are equivalent.

use im::{OrdMap, OrdSet, Vector};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{CheckpointId, CourseError, Direction, Pos, Rotation};

/// A wall on the `dir` edge of `pos`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Wall {
    pub pos: Pos,
    pub dir: Direction,
}

/// Belt speed. Express belts also run in the express-only pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeltSpeed {
    Regular,
    Express,
}

/// Belt tile shape, as drawn on the board.
///
/// The transport direction alone decides where a robot goes; curves and
/// merges rotate robots because the next tile points elsewhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeltShape {
    Straight,
    /// Entered from the side that makes the outgoing direction a clockwise turn.
    CurveClockwise,
    CurveCounterClockwise,
    /// Two side inputs merging into the transport direction.
    MergeY,
    /// One straight input and one side input.
    MergeT,
}

impl BeltShape {
    /// The shape of a tile that turns robots by `rotation`.
    #[must_use]
    pub fn curved(rotation: Rotation) -> Self {
        match rotation {
            Rotation::Clockwise => BeltShape::CurveClockwise,
            Rotation::CounterClockwise => BeltShape::CurveCounterClockwise,
            Rotation::None => BeltShape::Straight,
        }
    }
}

/// A conveyor belt tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConveyorBelt {
    /// Transport direction.
    pub dir: Direction,
    pub shape: BeltShape,
    pub speed: BeltSpeed,
}

/// A gear tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gear {
    pub rotation: Rotation,
}

/// A fixed laser emitter. Its beam starts on its own cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaserCannon {
    pub pos: Pos,
    pub dir: Direction,
    pub power: u8,
}

/// A checkpoint. Players must capture checkpoints in ascending `order`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checkpoint {
    pub order: u32,
    pub pos: Pos,
    pub id: CheckpointId,
}

/// A starting slot. Players take starts in ascending `order`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Start {
    pub pos: Pos,
    pub order: u32,
}

/// The immutable board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub walls: OrdSet<Wall>,
    #[serde(with = "crate::persist::pairs")]
    pub conveyor_belts: OrdMap<Pos, ConveyorBelt>,
    #[serde(with = "crate::persist::pairs")]
    pub gears: OrdMap<Pos, Gear>,
    pub laser_cannons: Vector<LaserCannon>,
    /// Sorted by `order`.
    pub checkpoints: Vector<Checkpoint>,
    pub starts: Vector<Start>,
    pub pits: OrdSet<Pos>,
}

impl Course {
    /// Health a robot loses when it is destroyed.
    pub const DESTROYED_DAMAGE: u8 = 2;

    /// An empty `width` x `height` course.
    #[must_use]
    pub fn empty(name: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            walls: OrdSet::new(),
            conveyor_belts: OrdMap::new(),
            gears: OrdMap::new(),
            laser_cannons: Vector::new(),
            checkpoints: Vector::new(),
            starts: Vector::new(),
            pits: OrdSet::new(),
        }
    }

    #[must_use]
    pub fn destroyed_damage(&self) -> u8 {
        Self::DESTROYED_DAMAGE
    }

    #[must_use]
    pub fn is_on_course(&self, pos: Pos) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// True for pits and every cell outside the course.
    #[must_use]
    pub fn is_missing_floor(&self, pos: Pos) -> bool {
        !self.is_on_course(pos) || self.pits.contains(&pos)
    }

    /// Is there a wall recorded exactly at `pos` on edge `dir`?
    #[must_use]
    pub fn wall_at(&self, pos: Pos, dir: Direction) -> bool {
        self.walls.contains(&Wall { pos, dir })
    }

    /// Does a wall block the step from `from` towards `dir`?
    ///
    /// Checks both the outgoing edge of `from` and the incoming edge of
    /// the neighbour.
    #[must_use]
    pub fn is_blocked(&self, from: Pos, dir: Direction) -> bool {
        self.wall_at(from, dir) || self.wall_at(from + dir, dir.opposite())
    }

    #[must_use]
    pub fn belt_at(&self, pos: Pos) -> Option<&ConveyorBelt> {
        self.conveyor_belts.get(&pos)
    }

    #[must_use]
    pub fn gear_at(&self, pos: Pos) -> Option<&Gear> {
        self.gears.get(&pos)
    }

    #[must_use]
    pub fn checkpoint(&self, id: CheckpointId) -> Option<&Checkpoint> {
        self.checkpoints.iter().find(|c| c.id == id)
    }

    /// The lowest-order checkpoint not yet in `captured`.
    #[must_use]
    pub fn next_checkpoint(&self, captured: &Vector<CheckpointId>) -> Option<&Checkpoint> {
        self.checkpoints.iter().find(|c| !captured.contains(&c.id))
    }

    /// Starts sorted by `order`.
    #[must_use]
    pub fn sorted_starts(&self) -> Vec<Start> {
        let mut starts: Vec<Start> = self.starts.iter().copied().collect();
        starts.sort_by_key(|s| s.order);
        starts
    }

    /// The direction from `pos` towards the course centre.
    ///
    /// Horizontal wins ties, and a cell exactly at the centre faces right.
    #[must_use]
    pub fn facing_center(&self, pos: Pos) -> Direction {
        // Doubled coordinates keep the centre on the integer grid.
        let dx = (self.width - 1) - 2 * pos.x;
        let dy = (self.height - 1) - 2 * pos.y;
        if dx.abs() >= dy.abs() {
            if dx >= 0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if dy > 0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }

    /// Check that every feature lies on the course and that checkpoint ids,
    /// checkpoint orders and start orders are unique.
    pub fn validate(&self) -> Result<(), CourseError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(CourseError::Invalid(format!(
                "{}: dimensions must be positive",
                self.name
            )));
        }

        let off_course = |what: &str, pos: Pos| {
            CourseError::Invalid(format!("{}: {what} at {pos} is off the course", self.name))
        };

        for wall in &self.walls {
            if !self.is_on_course(wall.pos) {
                return Err(off_course("wall", wall.pos));
            }
        }
        for pos in self.conveyor_belts.keys() {
            if !self.is_on_course(*pos) {
                return Err(off_course("belt", *pos));
            }
        }
        for pos in self.gears.keys() {
            if !self.is_on_course(*pos) {
                return Err(off_course("gear", *pos));
            }
        }
        for (pos, gear) in &self.gears {
            if gear.rotation == Rotation::None {
                return Err(CourseError::Invalid(format!(
                    "{}: gear at {pos} does not rotate",
                    self.name
                )));
            }
        }
        for cannon in &self.laser_cannons {
            if !self.is_on_course(cannon.pos) {
                return Err(off_course("laser", cannon.pos));
            }
        }
        for pit in &self.pits {
            if !self.is_on_course(*pit) {
                return Err(off_course("pit", *pit));
            }
        }

        let mut orders: Vec<u32> = self.checkpoints.iter().map(|c| c.order).collect();
        if orders.windows(2).any(|w| w[0] >= w[1]) {
            return Err(CourseError::Invalid(format!(
                "{}: checkpoint orders must be unique and ascending",
                self.name
            )));
        }
        let mut ids = FxHashSet::default();
        for checkpoint in &self.checkpoints {
            if !ids.insert(checkpoint.id) {
                return Err(CourseError::Invalid(format!(
                    "{}: {} is used by more than one checkpoint",
                    self.name, checkpoint.id
                )));
            }
            if self.is_missing_floor(checkpoint.pos) {
                return Err(off_course("checkpoint", checkpoint.pos));
            }
        }

        orders = self.starts.iter().map(|s| s.order).collect();
        orders.sort_unstable();
        if orders.windows(2).any(|w| w[0] == w[1]) {
            return Err(CourseError::Invalid(format!(
                "{}: start orders must be unique",
                self.name
            )));
        }
        for start in &self.starts {
            if self.is_missing_floor(start.pos) {
                return Err(off_course("start", start.pos));
            }
        }

        Ok(())
    }
}
