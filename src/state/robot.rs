//! Robots and their program registers.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::ActionCard;
use crate::core::{Direction, Pos, RobotId, REGISTER_COUNT};

/// One program slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Register {
    pub card: ActionCard,
    /// Slot index, `0..REGISTER_COUNT`.
    pub index: usize,
    /// Locked registers keep their card across the end-of-round wipe.
    pub locked: bool,
}

impl Register {
    /// Does a robot with `health` lock the register at `index`?
    ///
    /// Health 5 locks only the last register; health 1 or 0 locks all five.
    #[must_use]
    pub fn locks_at(health: u8, index: usize) -> bool {
        usize::from(health) <= index + 1
    }
}

/// A robot on (or fallen off) the course.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Robot {
    pub id: RobotId,
    pub pos: Pos,
    pub dir: Direction,
    pub health: u8,
    /// Filled registers, sorted by index.
    pub registers: Vector<Register>,
    /// Where the robot reappears after destruction: its start, or the last
    /// checkpoint its player captured.
    pub spawn: Pos,
}

impl Robot {
    #[must_use]
    pub fn new(id: RobotId, pos: Pos, dir: Direction, health: u8) -> Self {
        Self {
            id,
            pos,
            dir,
            health,
            registers: Vector::new(),
            spawn: pos,
        }
    }

    /// The register at `index`, if filled.
    #[must_use]
    pub fn register(&self, index: usize) -> Option<&Register> {
        self.registers.iter().find(|r| r.index == index)
    }

    /// Indices of locked registers.
    #[must_use]
    pub fn locked_indices(&self) -> Vec<usize> {
        self.registers
            .iter()
            .filter(|r| r.locked)
            .map(|r| r.index)
            .collect()
    }

    /// Register indices a new program may fill, ascending.
    #[must_use]
    pub fn free_indices(&self) -> Vec<usize> {
        (0..REGISTER_COUNT)
            .filter(|&i| self.register(i).is_none())
            .collect()
    }

    /// Put `card` in the empty slot `index`, keeping registers sorted.
    ///
    /// Panics if the slot is already filled.
    pub fn fill_register(&mut self, index: usize, card: ActionCard) {
        assert!(index < REGISTER_COUNT, "register index {index} out of range");
        assert!(
            self.register(index).is_none(),
            "register {index} of {} is already filled",
            self.id
        );
        let at = self.registers.iter().take_while(|r| r.index < index).count();
        self.registers.insert(
            at,
            Register {
                card,
                index,
                locked: false,
            },
        );
    }

    /// Remove every unlocked register and return their cards in index order.
    pub fn take_unlocked(&mut self) -> Vec<ActionCard> {
        let (locked, unlocked): (Vector<Register>, Vector<Register>) =
            self.registers.iter().copied().partition(|r| r.locked);
        self.registers = locked;
        unlocked.into_iter().map(|r| r.card).collect()
    }

    /// Apply health-based locking to every register.
    ///
    /// Returns true if any lock flag changed.
    pub fn refresh_locks(&mut self) -> bool {
        let health = self.health;
        let mut changed = false;
        for register in self.registers.iter_mut() {
            let locked = Register::locks_at(health, register.index);
            changed |= register.locked != locked;
            register.locked = locked;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardId, Turn};

    fn card(n: u32) -> ActionCard {
        ActionCard::turn(CardId::new(n), Turn::Left, n * 10 + 10)
    }

    #[test]
    fn test_locks_at() {
        assert!(!Register::locks_at(10, 4));
        assert!(!Register::locks_at(6, 4));
        assert!(Register::locks_at(5, 4));
        assert!(!Register::locks_at(5, 3));
        for index in 0..REGISTER_COUNT {
            assert!(Register::locks_at(1, index));
            assert!(Register::locks_at(0, index));
        }
    }

    #[test]
    fn test_fill_keeps_order() {
        let mut robot = Robot::new(RobotId(0), Pos::new(0, 0), Direction::Up, 10);
        robot.fill_register(3, card(3));
        robot.fill_register(0, card(0));
        robot.fill_register(1, card(1));

        let indices: Vec<usize> = robot.registers.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 3]);
        assert_eq!(robot.free_indices(), vec![2, 4]);
    }

    #[test]
    #[should_panic(expected = "already filled")]
    fn test_fill_twice_panics() {
        let mut robot = Robot::new(RobotId(0), Pos::new(0, 0), Direction::Up, 10);
        robot.fill_register(0, card(0));
        robot.fill_register(0, card(1));
    }

    #[test]
    fn test_refresh_locks_and_take_unlocked() {
        let mut robot = Robot::new(RobotId(0), Pos::new(0, 0), Direction::Up, 4);
        for i in 0..REGISTER_COUNT {
            robot.fill_register(i, card(i as u32));
        }

        assert!(robot.refresh_locks());
        assert_eq!(robot.locked_indices(), vec![3, 4]);
        assert!(!robot.refresh_locks());

        let wiped = robot.take_unlocked();
        assert_eq!(wiped.len(), 3);
        assert_eq!(robot.registers.len(), 2);
        assert_eq!(robot.free_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn test_healing_unlocks() {
        let mut robot = Robot::new(RobotId(0), Pos::new(0, 0), Direction::Up, 5);
        robot.fill_register(4, card(4));
        robot.refresh_locks();
        assert_eq!(robot.locked_indices(), vec![4]);

        robot.health = 9;
        robot.refresh_locks();
        assert!(robot.locked_indices().is_empty());
    }
}
