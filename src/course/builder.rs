//! Fluent course construction.
//!
//! ```
//! use robo_race::core::{Direction, Pos, Rotation};
//! use robo_race::course::{BeltSpeed, CourseBuilder};
//!
//! let course = CourseBuilder::new("demo", 6, 6)
//!     .wall(Pos::new(2, 2), Direction::Right)
//!     .belt(Pos::new(1, 1), Direction::Down, BeltSpeed::Regular)
//!     .gear(Pos::new(4, 4), Rotation::Clockwise)
//!     .checkpoint(1, Pos::new(5, 0))
//!     .start(1, Pos::new(0, 5))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(course.checkpoints.len(), 1);
//! ```

use im::Vector;

use crate::core::{CourseError, Direction, IdGen, Pos, Rotation};

use super::board::{
    BeltShape, BeltSpeed, Checkpoint, ConveyorBelt, Course, Gear, LaserCannon, Start, Wall,
};

/// Builder for a `Course`.
///
/// Checkpoint ids are allocated from the builder's own `IdGen`.
pub struct CourseBuilder {
    course: Course,
    ids: IdGen,
}

impl CourseBuilder {
    pub fn new(name: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            course: Course::empty(name, width, height),
            ids: IdGen::new(),
        }
    }

    pub fn wall(mut self, pos: Pos, dir: Direction) -> Self {
        self.course.walls.insert(Wall { pos, dir });
        self
    }

    /// Walls along the `dir` edge of every cell in `cells`.
    pub fn walls(mut self, cells: impl IntoIterator<Item = Pos>, dir: Direction) -> Self {
        for pos in cells {
            self.course.walls.insert(Wall { pos, dir });
        }
        self
    }

    /// A straight belt.
    pub fn belt(self, pos: Pos, dir: Direction, speed: BeltSpeed) -> Self {
        self.belt_shape(pos, dir, BeltShape::Straight, speed)
    }

    /// A curve whose output is `dir` and which turns robots by `rotation`.
    pub fn curve(self, pos: Pos, dir: Direction, rotation: Rotation, speed: BeltSpeed) -> Self {
        self.belt_shape(pos, dir, BeltShape::curved(rotation), speed)
    }

    pub fn belt_shape(mut self, pos: Pos, dir: Direction, shape: BeltShape, speed: BeltSpeed) -> Self {
        self.course
            .conveyor_belts
            .insert(pos, ConveyorBelt { dir, shape, speed });
        self
    }

    /// A straight run of belts from `from`, `len` cells long, moving in `dir`.
    pub fn belt_line(mut self, from: Pos, dir: Direction, len: u32, speed: BeltSpeed) -> Self {
        let mut pos = from;
        for _ in 0..len {
            self = self.belt(pos, dir, speed);
            pos = pos + dir;
        }
        self
    }

    pub fn gear(mut self, pos: Pos, rotation: Rotation) -> Self {
        self.course.gears.insert(pos, Gear { rotation });
        self
    }

    pub fn laser(mut self, pos: Pos, dir: Direction, power: u8) -> Self {
        self.course
            .laser_cannons
            .push_back(LaserCannon { pos, dir, power });
        self
    }

    pub fn pit(mut self, pos: Pos) -> Self {
        self.course.pits.insert(pos);
        self
    }

    pub fn checkpoint(mut self, order: u32, pos: Pos) -> Self {
        let id = self.ids.checkpoint();
        self.course.checkpoints.push_back(Checkpoint { order, pos, id });
        self
    }

    pub fn start(mut self, order: u32, pos: Pos) -> Self {
        self.course.starts.push_back(Start { pos, order });
        self
    }

    /// Sort checkpoints by order and validate the result.
    pub fn build(self) -> Result<Course, CourseError> {
        let mut course = self.course;
        let mut checkpoints: Vec<Checkpoint> = course.checkpoints.iter().copied().collect();
        checkpoints.sort_by_key(|c| c.order);
        course.checkpoints = checkpoints.into_iter().collect::<Vector<_>>();
        course.validate()?;
        Ok(course)
    }
}

impl From<Course> for CourseBuilder {
    /// Continue editing an existing course. New checkpoint ids continue
    /// after the highest existing one.
    fn from(course: Course) -> Self {
        let mut ids = IdGen::new();
        let highest = course.checkpoints.iter().map(|c| c.id.raw() + 1).max().unwrap_or(0);
        for _ in 0..highest {
            ids.checkpoint();
        }
        Self { course, ids }
    }
}
