//! Saving and loading games and courses.
//!
//! Two encodings:
//! - JSON text (`serde_json`), human readable, for saves and course files
//! - bincode bytes, compact, for snapshots
//!
//! Decoding always validates. A document that parses but describes an
//! impossible game (a card twice, two robots on one cell, a checkpoint off
//! the board) is rejected, never repaired.
//!
//! ```
//! use robo_race::course::load_course;
//! use robo_race::persist::{deserialize_game, serialize_game};
//! use robo_race::rules::GameSetup;
//!
//! let model = GameSetup::new(load_course("laser-alley").unwrap()).build().unwrap();
//! let text = serialize_game(&model).unwrap();
//! assert_eq!(deserialize_game(&text).unwrap(), model);
//! ```

pub mod pairs;

use crate::core::PersistError;
use crate::course::Course;
use crate::state::GameModel;

fn validated(model: GameModel) -> Result<GameModel, PersistError> {
    model.course.validate()?;
    model.validate()?;
    Ok(model)
}

/// Encode a game as JSON.
pub fn serialize_game(model: &GameModel) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(model)?)
}

/// Decode and validate a JSON game.
pub fn deserialize_game(text: &str) -> Result<GameModel, PersistError> {
    let model: GameModel = serde_json::from_str(text)?;
    validated(model)
}

/// Encode a course as JSON.
pub fn serialize_course(course: &Course) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(course)?)
}

/// Decode and validate a JSON course.
pub fn deserialize_course(text: &str) -> Result<Course, PersistError> {
    let course: Course = serde_json::from_str(text)?;
    course.validate()?;
    Ok(course)
}

/// Encode a game as bincode.
pub fn to_bytes(model: &GameModel) -> Result<Vec<u8>, PersistError> {
    Ok(bincode::serialize(model)?)
}

/// Decode and validate a bincode game.
pub fn from_bytes(bytes: &[u8]) -> Result<GameModel, PersistError> {
    let model: GameModel = bincode::deserialize(bytes)?;
    validated(model)
}
