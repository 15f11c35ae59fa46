//! Game state: robots, players, piles and the root `GameModel`.

pub mod robot;
pub mod player;
pub mod model;

pub use robot::{Register, Robot};
pub use player::Player;
pub use model::{GameModel, RoundPhase};
