//! Grid coordinates and facing directions.
//!
//! ## Axes
//!
//! `x` grows to the right and `y` grows downwards, so `Direction::Up`
//! decrements `y`. Coordinates are signed: robots that fall off the
//! course keep an out-of-bounds position while they are destroyed.
//!
//! ## Composition
//!
//! - `Direction + Turn` is how action cards rotate a robot.
//! - `Direction + Rotation` is how gears and belt curves rotate a robot.
//! - `Pos + Direction` is one grid step.

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// A grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    /// Create a position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add<Direction> for Pos {
    type Output = Pos;

    fn add(self, dir: Direction) -> Pos {
        let (dx, dy) = dir.delta();
        Pos::new(self.x + dx, self.y + dy)
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four grid directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in clockwise order starting at `Up`.
    pub const CLOCKWISE: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit step `(dx, dy)` for this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    #[must_use]
    pub const fn clockwise(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    #[must_use]
    pub const fn counter_clockwise(self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    /// Apply a card turn.
    #[must_use]
    pub const fn turned(self, turn: Turn) -> Self {
        match turn {
            Turn::Left => self.counter_clockwise(),
            Turn::Right => self.clockwise(),
            Turn::UTurn => self.opposite(),
        }
    }

    /// Apply a gear or belt rotation.
    #[must_use]
    pub const fn rotated(self, rotation: Rotation) -> Self {
        match rotation {
            Rotation::None => self,
            Rotation::Clockwise => self.clockwise(),
            Rotation::CounterClockwise => self.counter_clockwise(),
        }
    }

    /// The quarter rotation that takes `self` to `to`.
    ///
    /// Returns `None` when the two directions are equal or opposite.
    #[must_use]
    pub fn rotation_to(self, to: Direction) -> Option<Rotation> {
        if self.clockwise() == to {
            Some(Rotation::Clockwise)
        } else if self.counter_clockwise() == to {
            Some(Rotation::CounterClockwise)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// A turn printed on an action card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Turn {
    Left,
    Right,
    UTurn,
}

/// A quarter rotation imparted by a gear or a belt curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    None,
    Clockwise,
    CounterClockwise,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_add_direction() {
        let p = Pos::new(2, 2);
        assert_eq!(p + Direction::Up, Pos::new(2, 1));
        assert_eq!(p + Direction::Down, Pos::new(2, 3));
        assert_eq!(p + Direction::Left, Pos::new(1, 2));
        assert_eq!(p + Direction::Right, Pos::new(3, 2));
    }

    #[test]
    fn test_opposite_is_involution() {
        for dir in Direction::CLOCKWISE {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }

    #[test]
    fn test_turns() {
        assert_eq!(Direction::Up.turned(Turn::Left), Direction::Left);
        assert_eq!(Direction::Up.turned(Turn::Right), Direction::Right);
        assert_eq!(Direction::Up.turned(Turn::UTurn), Direction::Down);
        assert_eq!(Direction::Left.turned(Turn::Right), Direction::Up);
    }

    #[test]
    fn test_rotations() {
        assert_eq!(Direction::Right.rotated(Rotation::None), Direction::Right);
        assert_eq!(Direction::Right.rotated(Rotation::Clockwise), Direction::Down);
        assert_eq!(Direction::Right.rotated(Rotation::CounterClockwise), Direction::Up);
    }

    #[test]
    fn test_four_clockwise_rotations_are_identity() {
        for dir in Direction::CLOCKWISE {
            let mut d = dir;
            for _ in 0..4 {
                d = d.clockwise();
            }
            assert_eq!(d, dir);
        }
    }

    #[test]
    fn test_rotation_to() {
        assert_eq!(Direction::Up.rotation_to(Direction::Right), Some(Rotation::Clockwise));
        assert_eq!(Direction::Up.rotation_to(Direction::Left), Some(Rotation::CounterClockwise));
        assert_eq!(Direction::Up.rotation_to(Direction::Up), None);
        assert_eq!(Direction::Up.rotation_to(Direction::Down), None);
    }
}
