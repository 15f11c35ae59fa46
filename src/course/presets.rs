//! Named preset courses.
//!
//! `load_course` is the lookup the host uses to start a game on a known
//! board. Presets are built in code with `CourseBuilder`.

use crate::core::{CourseError, Direction, Pos, Rotation};

use super::board::{BeltSpeed, Course};
use super::builder::CourseBuilder;

/// Names accepted by `load_course`.
pub const PRESET_NAMES: [&str; 3] = ["training-ground", "conveyor-loop", "laser-alley"];

/// Load a preset course by name.
pub fn load_course(name: &str) -> Result<Course, CourseError> {
    match name {
        "training-ground" => training_ground(),
        "conveyor-loop" => conveyor_loop(),
        "laser-alley" => laser_alley(),
        _ => Err(CourseError::NotFound(name.to_string())),
    }
}

/// Small open board with one of everything.
fn training_ground() -> Result<Course, CourseError> {
    CourseBuilder::new("training-ground", 8, 8)
        .wall(Pos::new(3, 3), Direction::Right)
        .wall(Pos::new(4, 4), Direction::Up)
        .pit(Pos::new(5, 4))
        .gear(Pos::new(2, 4), Rotation::Clockwise)
        .laser(Pos::new(0, 5), Direction::Right, 1)
        .belt_line(Pos::new(6, 6), Direction::Up, 3, BeltSpeed::Regular)
        .checkpoint(1, Pos::new(6, 1))
        .checkpoint(2, Pos::new(1, 2))
        .start(1, Pos::new(1, 7))
        .start(2, Pos::new(3, 7))
        .start(3, Pos::new(4, 7))
        .start(4, Pos::new(6, 7))
        .build()
}

/// A clockwise belt loop around two gears, with an express lane on the east edge.
fn conveyor_loop() -> Result<Course, CourseError> {
    CourseBuilder::new("conveyor-loop", 10, 10)
        .curve(Pos::new(2, 2), Direction::Right, Rotation::Clockwise, BeltSpeed::Regular)
        .belt_line(Pos::new(3, 2), Direction::Right, 4, BeltSpeed::Regular)
        .curve(Pos::new(7, 2), Direction::Down, Rotation::Clockwise, BeltSpeed::Regular)
        .belt_line(Pos::new(7, 3), Direction::Down, 4, BeltSpeed::Regular)
        .curve(Pos::new(7, 7), Direction::Left, Rotation::Clockwise, BeltSpeed::Regular)
        .belt_line(Pos::new(6, 7), Direction::Left, 4, BeltSpeed::Regular)
        .curve(Pos::new(2, 7), Direction::Up, Rotation::Clockwise, BeltSpeed::Regular)
        .belt_line(Pos::new(2, 6), Direction::Up, 4, BeltSpeed::Regular)
        .belt_line(Pos::new(9, 8), Direction::Up, 8, BeltSpeed::Express)
        .gear(Pos::new(4, 4), Rotation::Clockwise)
        .gear(Pos::new(5, 5), Rotation::CounterClockwise)
        .pit(Pos::new(0, 0))
        .laser(Pos::new(4, 0), Direction::Down, 1)
        .checkpoint(1, Pos::new(5, 4))
        .checkpoint(2, Pos::new(8, 1))
        .checkpoint(3, Pos::new(1, 5))
        .start(1, Pos::new(1, 9))
        .start(2, Pos::new(3, 9))
        .start(3, Pos::new(5, 9))
        .start(4, Pos::new(7, 9))
        .build()
}

/// Long corridor swept by cannons, with a wall line halfway up.
fn laser_alley() -> Result<Course, CourseError> {
    CourseBuilder::new("laser-alley", 8, 12)
        .walls((2..=5).map(|x| Pos::new(x, 5)), Direction::Up)
        .laser(Pos::new(0, 3), Direction::Right, 2)
        .laser(Pos::new(7, 6), Direction::Left, 1)
        .laser(Pos::new(3, 0), Direction::Down, 1)
        .pit(Pos::new(6, 9))
        .pit(Pos::new(1, 8))
        .checkpoint(1, Pos::new(4, 1))
        .checkpoint(2, Pos::new(6, 4))
        .start(1, Pos::new(1, 11))
        .start(2, Pos::new(3, 11))
        .start(3, Pos::new(4, 11))
        .start(4, Pos::new(6, 11))
        .build()
}
