//! Identifier types and explicit id allocation.
//!
//! Every robot, player, checkpoint and action card carries a typed id.
//! Ids are allocated by an `IdGen` that the caller threads through setup,
//! so two games built in the same process never share hidden counters.
//!
//! ```
//! use robo_race::core::IdGen;
//!
//! let mut ids = IdGen::new();
//! let r0 = ids.robot();
//! let r1 = ids.robot();
//! assert_ne!(r0, r1);
//!
//! // Each kind has its own sequence.
//! assert_eq!(ids.player().raw(), 0);
//! ```

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the raw ID value.
            #[must_use]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, " {}"), self.0)
            }
        }
    };
}

define_id!(
    /// Robot identifier. Stable across destruction and respawn.
    RobotId,
    "Robot"
);

define_id!(
    /// Player identifier.
    PlayerId,
    "Player"
);

define_id!(
    /// Checkpoint identifier, unique within a course.
    CheckpointId,
    "Checkpoint"
);

define_id!(
    /// Identity of one physical action card.
    ///
    /// Two `Move 1` cards are different cards; conservation checks compare ids.
    CardId,
    "Card"
);

/// Allocator for all id kinds.
///
/// Replaces process-wide counters: whoever builds a course or a game owns
/// the generator and passes it where new ids are needed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdGen {
    next_robot: u32,
    next_player: u32,
    next_checkpoint: u32,
    next_card: u32,
}

impl IdGen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new robot id.
    pub fn robot(&mut self) -> RobotId {
        let id = RobotId(self.next_robot);
        self.next_robot += 1;
        id
    }

    /// Allocate a new player id.
    pub fn player(&mut self) -> PlayerId {
        let id = PlayerId(self.next_player);
        self.next_player += 1;
        id
    }

    /// Allocate a new checkpoint id.
    pub fn checkpoint(&mut self) -> CheckpointId {
        let id = CheckpointId(self.next_checkpoint);
        self.next_checkpoint += 1;
        id
    }

    /// Allocate a new card id.
    pub fn card(&mut self) -> CardId {
        let id = CardId(self.next_card);
        self.next_card += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequences_are_independent() {
        let mut ids = IdGen::new();

        assert_eq!(ids.robot(), RobotId(0));
        assert_eq!(ids.robot(), RobotId(1));
        assert_eq!(ids.player(), PlayerId(0));
        assert_eq!(ids.checkpoint(), CheckpointId(0));
        assert_eq!(ids.card(), CardId(0));
        assert_eq!(ids.card(), CardId(1));
    }

    #[test]
    fn test_generators_do_not_share_state() {
        let mut a = IdGen::new();
        let mut b = IdGen::new();

        a.robot();
        a.robot();

        assert_eq!(b.robot(), RobotId(0));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", RobotId(3)), "Robot 3");
        assert_eq!(format!("{}", PlayerId(0)), "Player 0");
        assert_eq!(format!("{}", CheckpointId(2)), "Checkpoint 2");
    }

    #[test]
    fn test_id_serialization() {
        let id = CardId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let back: CardId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
