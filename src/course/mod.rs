//! The static board: grid, walls, floor features and checkpoints.
//!
//! ## Key Types
//!
//! - `Course`: immutable board description with derived queries
//! - `CourseBuilder`: fluent construction with validation
//! - `load_course`: named preset lookup

pub mod board;
pub mod builder;
pub mod presets;

pub use board::{
    BeltShape, BeltSpeed, Checkpoint, ConveyorBelt, Course, Gear, LaserCannon, Start, Wall,
};
pub use builder::CourseBuilder;
pub use presets::{load_course, PRESET_NAMES};
