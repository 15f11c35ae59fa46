//! Game creation.
//!
//! ```
//! use robo_race::course::load_course;
//! use robo_race::rules::GameSetup;
//!
//! let course = load_course("training-ground").unwrap();
//! let model = GameSetup::new(course).players(3).seed(42).build().unwrap();
//!
//! assert_eq!(model.robots.len(), 3);
//! assert!(model.players.iter().all(|p| p.hand.len() == 11));
//! ```

use crate::cards::{standard_deck, DECK_SIZE};
use crate::core::{GameRng, IdGen, RulesConfig, SetupError};
use crate::course::Course;
use crate::state::GameModel;

use super::deal::deal_action_cards;

/// Builder for a new game.
pub struct GameSetup {
    course: Course,
    player_count: usize,
    config: RulesConfig,
}

impl GameSetup {
    /// Two players under the default rules.
    #[must_use]
    pub fn new(course: Course) -> Self {
        Self {
            course,
            player_count: 2,
            config: RulesConfig::default(),
        }
    }

    #[must_use]
    pub fn players(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    #[must_use]
    pub fn config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Place robots, shuffle the deck and deal the first hands.
    pub fn build(self) -> Result<GameModel, SetupError> {
        self.build_with_ids(&mut IdGen::new())
    }

    /// Like `build`, drawing robot and player ids from `ids`.
    ///
    /// Player `n` gets the `n`th start by order, facing the course centre.
    pub fn build_with_ids(self, ids: &mut IdGen) -> Result<GameModel, SetupError> {
        let requested = self.player_count;
        if requested == 0 {
            return Err(SetupError::NoPlayers);
        }
        let starts = self.course.sorted_starts();
        if requested > starts.len() {
            return Err(SetupError::NotEnoughStartingPositions {
                requested,
                available: starts.len(),
            });
        }
        let dealt = requested.checked_mul(self.config.hand_size);
        if dealt.map_or(true, |cards| cards > DECK_SIZE) {
            return Err(SetupError::DeckTooSmall {
                players: requested,
                deck: DECK_SIZE,
            });
        }

        let mut model = GameModel::new(self.course, self.config);
        for start in starts.iter().take(requested) {
            let dir = model.course.facing_center(start.pos);
            model.add_robot(ids, start.pos, dir);
        }

        let mut rng = GameRng::new(model.config.seed);
        let mut deck = standard_deck();
        rng.shuffle(&mut deck);
        model.action_draw_pile = deck.into_iter().collect();
        model.rng = rng.state();

        tracing::debug!(
            course = %model.course.name,
            players = requested,
            seed = model.config.seed,
            "game set up"
        );
        let (model, _) = deal_action_cards(&model);
        Ok(model)
    }
}

/// Create a game for `player_count` players on `course`.
pub fn setup_game(
    course: Course,
    player_count: usize,
    config: RulesConfig,
) -> Result<GameModel, SetupError> {
    GameSetup::new(course)
        .players(player_count)
        .config(config)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Direction, Pos};
    use crate::course::CourseBuilder;

    fn course() -> Course {
        CourseBuilder::new("s", 8, 8)
            .start(2, Pos::new(7, 3))
            .start(1, Pos::new(0, 4))
            .start(3, Pos::new(3, 7))
            .checkpoint(1, Pos::new(4, 4))
            .build()
            .unwrap()
    }

    #[test]
    fn test_robots_take_sorted_starts_facing_center() {
        let model = setup_game(course(), 3, RulesConfig::default()).unwrap();

        let placed: Vec<(Pos, Direction)> = model.robots.iter().map(|r| (r.pos, r.dir)).collect();
        assert_eq!(
            placed,
            vec![
                (Pos::new(0, 4), Direction::Right),
                (Pos::new(7, 3), Direction::Left),
                (Pos::new(3, 7), Direction::Up),
            ]
        );
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_not_enough_starts() {
        let result = setup_game(course(), 4, RulesConfig::default());
        assert_eq!(
            result,
            Err(SetupError::NotEnoughStartingPositions {
                requested: 4,
                available: 3
            })
        );
    }

    #[test]
    fn test_no_players() {
        assert_eq!(
            setup_game(course(), 0, RulesConfig::default()),
            Err(SetupError::NoPlayers)
        );
    }

    #[test]
    fn test_deck_too_small() {
        let config = RulesConfig::default().with_hand_size(20);
        assert_eq!(
            setup_game(course(), 3, config),
            Err(SetupError::DeckTooSmall {
                players: 3,
                deck: DECK_SIZE
            })
        );
    }

    #[test]
    fn test_huge_hand_size_rejected() {
        let config = RulesConfig::default().with_hand_size(usize::MAX);
        assert_eq!(
            setup_game(course(), 2, config),
            Err(SetupError::DeckTooSmall {
                players: 2,
                deck: DECK_SIZE
            })
        );
    }

    #[test]
    fn test_same_seed_same_hands() {
        let a = GameSetup::new(course()).seed(5).build().unwrap();
        let b = GameSetup::new(course()).seed(5).build().unwrap();
        let c = GameSetup::new(course()).seed(6).build().unwrap();

        assert_eq!(a, b);
        assert_ne!(a.players[0].hand, c.players[0].hand);
    }
}
