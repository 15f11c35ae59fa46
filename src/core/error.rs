//! Error types.
//!
//! Recoverable failures are returned as these enums. Broken internal
//! invariants (a card in two places, an unknown robot id inside a
//! resolver) are engine defects and panic instead.

use crate::core::ids::{CardId, PlayerId, RobotId};

/// Failures loading a `RulesConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failures building or looking up a course.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CourseError {
    /// No preset course has this name.
    #[error("unknown course: {0}")]
    NotFound(String),

    /// The course description is inconsistent.
    #[error("invalid course: {0}")]
    Invalid(String),
}

/// Failures creating a game.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("not enough starting positions: {requested} players, {available} starts")]
    NotEnoughStartingPositions { requested: usize, available: usize },

    #[error("a game needs at least one player")]
    NoPlayers,

    /// Hands and registers for this many players do not fit in the deck.
    #[error("deck of {deck} cards cannot serve {players} players")]
    DeckTooSmall { players: usize, deck: usize },
}

/// Rejected round input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RoundError {
    /// The game already has a winner.
    #[error("the game is over")]
    GameOver,

    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),

    /// An active player submitted no program.
    #[error("{0} submitted no program")]
    MissingProgram(PlayerId),

    /// More cards than the robot has unlocked registers.
    #[error("{player} programmed {given} cards into {free} free registers")]
    TooManyCards { player: PlayerId, given: usize, free: usize },

    /// The card is not in the player's hand (or was used twice).
    #[error("{card} is not in the hand of {player}")]
    CardNotAvailable { player: PlayerId, card: CardId },
}

/// A game model that breaks a structural invariant.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("{0} appears more than once")]
    DuplicateCard(CardId),

    #[error("card set differs from the deck: expected {expected} cards, found {found}")]
    CardSetMismatch { expected: usize, found: usize },

    #[error("two active robots share {0}")]
    SharedPosition(crate::core::Pos),

    #[error("robot register indices are not unique")]
    DuplicateRegister,

    #[error("{0} has no robot")]
    OrphanPlayer(PlayerId),

    #[error("{0} appears more than once")]
    DuplicateRobot(RobotId),

    #[error("{0} appears more than once")]
    DuplicatePlayer(PlayerId),

    #[error("{0} is controlled by more than one player")]
    SharedRobot(RobotId),

    /// Captures must be a prefix of the course checkpoints in order.
    #[error("{0} captured checkpoints out of order")]
    CaptureOrder(PlayerId),
}

/// Failures encoding or decoding persisted data.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary: {0}")]
    Binary(#[from] bincode::Error),

    /// The data decoded but describes an impossible game.
    #[error("invalid game state: {0}")]
    Invalid(#[from] ModelError),

    #[error(transparent)]
    InvalidCourse(#[from] CourseError),
}
