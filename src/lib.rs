//! # robo-race
//!
//! Rules engine for a grid robot-racing board game. Players program robots
//! with movement and turn cards; each round resolves deterministically
//! through a fixed phase pipeline of cards, belts, gears, lasers and
//! checkpoints.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: every resolver takes `&GameModel` and returns a
//!    new `GameModel` plus a report. Nothing is edited in place.
//!
//! 2. **Deterministic**: simultaneous effects are batch transforms ordered
//!    by card initiative or resolved to a fixed point. Deck shuffles use a
//!    seeded generator whose position is saved with the game.
//!
//! 3. **No hidden state**: ids come from an explicit `IdGen`, rules from a
//!    `RulesConfig` carried in the model.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im` keeps the
//!   copy-per-transition style cheap.
//!
//! - **Resolution log**: `resolve_round` returns an ordered list of
//!   `RoundResolution` events for a presentation layer to replay.
//!
//! ## Modules
//!
//! - `core`: positions, directions, ids, RNG, configuration, errors
//! - `cards`: action cards and the fixed deck
//! - `course`: the static board, builder and presets
//! - `state`: robots, players and the root `GameModel`
//! - `resolve`: one pure resolver per rule
//! - `rules`: setup, dealing and round orchestration
//! - `persist`: JSON and binary encoding

pub mod core;
pub mod cards;
pub mod course;
pub mod state;
pub mod resolve;
pub mod rules;
pub mod persist;

// Re-export commonly used types
pub use crate::core::{
    CardId, CheckpointId, Direction, IdGen, PlayerId, Pos, RobotId, Rotation, Turn,
    GameRng, GameRngState, RulesConfig, REGISTER_COUNT,
    ConfigError, CourseError, ModelError, PersistError, RoundError, SetupError,
};

pub use crate::cards::{standard_deck, ActionCard, CardAction, DECK_SIZE};

pub use crate::course::{load_course, Course, CourseBuilder};

pub use crate::state::{GameModel, Player, Register, Robot, RoundPhase};

pub use crate::resolve::{
    resolve_checkpoints, resolve_conveyor_belts, resolve_gears, resolve_lasers,
    resolve_movement, resolve_register_locking, resolve_respawn, resolve_rotation,
    resolve_wipe_registers, BeltFilter,
};

pub use crate::rules::{
    deal_action_cards, resolve_round, setup_game, GameSetup, Programs, RoundResolution,
};
