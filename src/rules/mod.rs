//! Game flow: setup, dealing and round resolution.
//!
//! ## Key Types
//!
//! - `GameSetup`: builder that places robots and deals the first hands
//! - `resolve_round`: applies one round of programs and returns the log
//! - `RoundResolution`: one entry of that log

pub mod deal;
pub mod round;
pub mod setup;

pub use deal::{deal_action_cards, hand_size_for};
pub use round::{program_registers, resolve_round, Programs, RoundResolution, StepResolution};
pub use setup::{setup_game, GameSetup};
