//! The root game model.
//!
//! ## Immutability
//!
//! Resolvers take `&GameModel` and return a new `GameModel`. Internally they
//! clone and edit the clone; all collections are `im` persistent structures,
//! so the clone is O(1) and unchanged parts are shared with the input.
//!
//! ## Invariants
//!
//! `validate()` checks what must hold between transitions:
//! - the draw pile, discard pile, hands and registers hold the standard
//!   deck exactly once
//! - no two active robots share a cell
//! - register indices are unique per robot
//! - robot and player ids are unique, and each robot has one player
//! - every player's robot exists, active or destroyed
//! - each player's captures are the first checkpoints of the course, in order

use im::Vector;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::cards::{standard_deck, ActionCard};
use crate::core::{
    Direction, GameRngState, IdGen, ModelError, PlayerId, Pos, RobotId, RulesConfig,
    REGISTER_COUNT,
};
use crate::course::Course;

use super::player::Player;
use super::robot::Robot;

/// Where the round state machine is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Waiting for every player's program.
    AwaitingProgramming,
    /// Resolving register `0..REGISTER_COUNT`.
    ResolvingRegister(usize),
    /// Respawn, wipe, deal and winner check.
    EndOfRound,
    /// Terminal: this player captured every checkpoint.
    Winner(PlayerId),
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameModel {
    pub config: RulesConfig,
    pub course: Course,
    /// Robots on the course.
    pub robots: Vector<Robot>,
    /// Robots removed from play, awaiting respawn.
    pub destroyed_robots: Vector<Robot>,
    pub players: Vector<Player>,
    /// Top of the pile is the back of the vector.
    pub action_draw_pile: Vector<ActionCard>,
    pub action_discard_pile: Vector<ActionCard>,
    pub phase: RoundPhase,
    /// Rounds completed so far.
    pub round: u32,
    /// Reshuffle generator position.
    pub rng: GameRngState,
}

impl GameModel {
    /// A model with no robots and the unshuffled standard deck as draw pile.
    #[must_use]
    pub fn new(course: Course, config: RulesConfig) -> Self {
        let rng = GameRngState::seeded(config.seed);
        Self {
            config,
            course,
            robots: Vector::new(),
            destroyed_robots: Vector::new(),
            players: Vector::new(),
            action_draw_pile: standard_deck().into_iter().collect(),
            action_discard_pile: Vector::new(),
            phase: RoundPhase::AwaitingProgramming,
            round: 0,
            rng,
        }
    }

    /// Add a robot at full health and a player who controls it.
    pub fn add_robot(&mut self, ids: &mut IdGen, pos: Pos, dir: Direction) -> (PlayerId, RobotId) {
        let robot_id = ids.robot();
        let player_id = ids.player();
        self.robots
            .push_back(Robot::new(robot_id, pos, dir, self.config.max_health));
        self.players.push_back(Player::new(player_id, robot_id));
        (player_id, robot_id)
    }

    // === Robots ===

    /// An active robot.
    #[must_use]
    pub fn robot(&self, id: RobotId) -> Option<&Robot> {
        self.robots.iter().find(|r| r.id == id)
    }

    /// A robot, active or destroyed.
    #[must_use]
    pub fn any_robot(&self, id: RobotId) -> Option<&Robot> {
        self.robot(id)
            .or_else(|| self.destroyed_robots.iter().find(|r| r.id == id))
    }

    /// Like `any_robot`, but an unknown id is an engine defect.
    #[must_use]
    pub fn expect_robot(&self, id: RobotId) -> &Robot {
        match self.any_robot(id) {
            Some(robot) => robot,
            None => panic!("unknown robot id: {id}"),
        }
    }

    #[must_use]
    pub fn is_destroyed(&self, id: RobotId) -> bool {
        self.destroyed_robots.iter().any(|r| r.id == id)
    }

    /// The active robot standing on `pos`.
    #[must_use]
    pub fn robot_at(&self, pos: Pos) -> Option<&Robot> {
        self.robots.iter().find(|r| r.pos == pos)
    }

    /// Cell -> active robot index for the current positions.
    #[must_use]
    pub fn occupancy(&self) -> FxHashMap<Pos, RobotId> {
        self.robots.iter().map(|r| (r.pos, r.id)).collect()
    }

    /// Edit a robot in place, active or destroyed.
    ///
    /// Panics on an unknown id.
    pub fn update_robot(&mut self, id: RobotId, f: impl FnOnce(&mut Robot)) {
        if let Some(index) = self.robots.iter().position(|r| r.id == id) {
            f(&mut self.robots[index]);
        } else if let Some(index) = self.destroyed_robots.iter().position(|r| r.id == id) {
            f(&mut self.destroyed_robots[index]);
        } else {
            panic!("unknown robot id: {id}");
        }
    }

    /// Move an active robot to the destroyed pool and apply destruction damage.
    ///
    /// Returns the remaining health.
    pub fn destroy_robot(&mut self, id: RobotId) -> u8 {
        let Some(index) = self.robots.iter().position(|r| r.id == id) else {
            panic!("cannot destroy {id}: not an active robot");
        };
        let mut robot = self.robots.remove(index);
        robot.health = robot.health.saturating_sub(self.course.destroyed_damage());
        let health = robot.health;
        tracing::debug!(robot = %id, pos = %robot.pos, health, "robot destroyed");
        self.destroyed_robots.push_back(robot);
        health
    }

    // === Players ===

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// The player controlling `robot`.
    #[must_use]
    pub fn player_of(&self, robot: RobotId) -> Option<&Player> {
        self.players.iter().find(|p| p.robot_id == robot)
    }

    /// Edit a player in place. Panics on an unknown id.
    pub fn update_player(&mut self, id: PlayerId, f: impl FnOnce(&mut Player)) {
        let Some(index) = self.players.iter().position(|p| p.id == id) else {
            panic!("unknown player id: {id}");
        };
        f(&mut self.players[index]);
    }

    /// The first player (by id order) who has captured every checkpoint.
    ///
    /// A course without checkpoints has no finish line, so it never
    /// produces a winner.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        if self.course.checkpoints.is_empty() {
            return None;
        }
        self.players
            .iter()
            .find(|p| self.course.checkpoints.iter().all(|c| p.has_captured(c.id)))
            .map(|p| p.id)
    }

    // === Cards ===

    /// Every card in the game, wherever it is.
    pub fn all_cards(&self) -> impl Iterator<Item = &ActionCard> + '_ {
        let hands = self.players.iter().flat_map(|p| p.hand.iter());
        let registers = self
            .robots
            .iter()
            .chain(self.destroyed_robots.iter())
            .flat_map(|r| r.registers.iter().map(|reg| &reg.card));
        self.action_draw_pile
            .iter()
            .chain(self.action_discard_pile.iter())
            .chain(hands)
            .chain(registers)
    }

    // === Invariants ===

    /// Check the structural invariants.
    pub fn validate(&self) -> Result<(), ModelError> {
        let deck = standard_deck();
        let mut seen = FxHashSet::default();
        let mut found = 0;
        for card in self.all_cards() {
            found += 1;
            if !seen.insert(card.id) {
                return Err(ModelError::DuplicateCard(card.id));
            }
            if !deck.contains(card) {
                return Err(ModelError::CardSetMismatch {
                    expected: deck.len(),
                    found,
                });
            }
        }
        if found != deck.len() {
            return Err(ModelError::CardSetMismatch {
                expected: deck.len(),
                found,
            });
        }

        let mut cells = FxHashSet::default();
        for robot in &self.robots {
            if !cells.insert(robot.pos) {
                return Err(ModelError::SharedPosition(robot.pos));
            }
        }

        for robot in self.robots.iter().chain(self.destroyed_robots.iter()) {
            let mut indices = FxHashSet::default();
            for register in &robot.registers {
                if register.index >= REGISTER_COUNT || !indices.insert(register.index) {
                    return Err(ModelError::DuplicateRegister);
                }
            }
        }

        let mut robot_ids = FxHashSet::default();
        for robot in self.robots.iter().chain(self.destroyed_robots.iter()) {
            if !robot_ids.insert(robot.id) {
                return Err(ModelError::DuplicateRobot(robot.id));
            }
        }

        let mut player_ids = FxHashSet::default();
        let mut controlled = FxHashSet::default();
        for player in &self.players {
            if !player_ids.insert(player.id) {
                return Err(ModelError::DuplicatePlayer(player.id));
            }
            if !controlled.insert(player.robot_id) {
                return Err(ModelError::SharedRobot(player.robot_id));
            }
            if self.any_robot(player.robot_id).is_none() {
                return Err(ModelError::OrphanPlayer(player.id));
            }
            let captured = &player.captured_checkpoints;
            let in_order = captured.len() <= self.course.checkpoints.len()
                && captured
                    .iter()
                    .eq(self.course.checkpoints.iter().take(captured.len()).map(|c| &c.id));
            if !in_order {
                return Err(ModelError::CaptureOrder(player.id));
            }
        }

        Ok(())
    }

    /// Panic with the violated invariant. Used after every round in debug builds.
    pub fn assert_valid(&self) {
        if let Err(err) = self.validate() {
            panic!("game model invariant violated: {err}");
        }
    }
}
