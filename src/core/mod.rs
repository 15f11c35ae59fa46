//! Core engine types: positions, ids, RNG, configuration and errors.
//!
//! These are the leaf building blocks every other module depends on.

pub mod position;
pub mod ids;
pub mod rng;
pub mod config;
pub mod error;

pub use position::{Direction, Pos, Rotation, Turn};
pub use ids::{CardId, CheckpointId, IdGen, PlayerId, RobotId};
pub use rng::{GameRng, GameRngState};
pub use config::{RulesConfig, REGISTER_COUNT};
pub use error::{ConfigError, CourseError, ModelError, PersistError, RoundError, SetupError};
