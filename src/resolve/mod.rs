//! Pure resolvers: `&GameModel -> (GameModel, report)`.
//!
//! Each resolver handles one rule of the round and reports what changed.
//! None of them fail: "nothing happened" is an empty report. The round
//! orchestrator in [`crate::rules`] composes them in a fixed order.
//!
//! ## Modules
//!
//! - `movement`: card movement with pushing, card rotation
//! - `belts`: conveyor belt transport
//! - `gears`: gear rotation
//! - `lasers`: robot and cannon laser fire
//! - `checkpoints`: checkpoint capture
//! - `registers`: register locking and the end-of-round wipe
//! - `respawn`: returning destroyed robots

pub mod belts;
pub mod checkpoints;
pub mod gears;
pub mod lasers;
pub mod movement;
pub mod registers;
pub mod respawn;

pub use belts::{resolve_conveyor_belts, BeltFilter, BeltReport};
pub use checkpoints::{resolve_checkpoints, CheckpointCapture};
pub use gears::{resolve_gears, GearReport};
pub use lasers::{resolve_lasers, LaserBeam, LaserReport, LaserSource, ROBOT_LASER_POWER};
pub use movement::{resolve_movement, resolve_rotation, MovementStep};
pub use registers::{resolve_register_locking, resolve_wipe_registers, LockedRegisters};
pub use respawn::resolve_respawn;
