//! Round resolution.
//!
//! ## Phase order
//!
//! `resolve_round` first moves every program from hand to registers, then
//! for each register index `0..REGISTER_COUNT`:
//!
//! 1. cards of that index, across all players, in ascending initiative;
//!    checkpoints are checked after every single movement step
//! 2. checkpoints
//! 3. board elements (when enabled): all belts, express belts, gears,
//!    lasers, then checkpoints again
//! 4. register locking
//!
//! After the last register: respawn, wipe, deal, winner check.
//!
//! ## Resolution log
//!
//! Every phase that changed something appends a `RoundResolution`. The log
//! is ordered: each entry describes a transition from the state the
//! previous entries produced, so a presentation layer can replay it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{ActionCard, CardAction};
use crate::core::{Direction, PlayerId, Pos, RobotId, RoundError, REGISTER_COUNT};
use crate::resolve::{
    resolve_checkpoints, resolve_conveyor_belts, resolve_gears, resolve_lasers,
    resolve_movement, resolve_register_locking, resolve_respawn, resolve_rotation,
    resolve_wipe_registers, BeltFilter, BeltReport, CheckpointCapture, GearReport,
    LaserReport, LockedRegisters, MovementStep,
};
use crate::state::{GameModel, RoundPhase};

use super::deal::deal_action_cards;

/// Programs for one round: each player's cards in register order.
pub type Programs = BTreeMap<PlayerId, Vec<ActionCard>>;

/// One movement step and the captures it caused.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResolution {
    pub step: MovementStep,
    pub captures: Vec<CheckpointCapture>,
}

/// One entry of the round log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResolution {
    /// A movement card. `steps` holds only steps that moved someone.
    Movement {
        register: usize,
        player: PlayerId,
        robot: RobotId,
        card: ActionCard,
        steps: Vec<StepResolution>,
    },
    Rotation {
        register: usize,
        player: PlayerId,
        robot: RobotId,
        card: ActionCard,
        direction: Direction,
    },
    ConveyorBelts {
        register: usize,
        filter: BeltFilter,
        report: BeltReport,
    },
    Gears {
        register: usize,
        report: GearReport,
    },
    Lasers {
        register: usize,
        report: LaserReport,
    },
    Checkpoints {
        register: usize,
        captures: Vec<CheckpointCapture>,
    },
    RegisterLock {
        register: usize,
        locked: LockedRegisters,
    },
    RegisterWipe {
        locked: LockedRegisters,
    },
    HandsDealt {
        dealt: BTreeMap<PlayerId, usize>,
    },
    Respawn {
        robots: BTreeMap<RobotId, Pos>,
    },
    Winner {
        player: PlayerId,
    },
}

/// Move each program from its player's hand into free registers.
///
/// Cards fill free registers in ascending index order; locked registers
/// keep their card. Fails without touching the model on bad input.
pub fn program_registers(state: &GameModel, programs: &Programs) -> Result<GameModel, RoundError> {
    if let RoundPhase::Winner(_) = state.phase {
        return Err(RoundError::GameOver);
    }
    if let Some(&unknown) = programs.keys().find(|id| state.player(**id).is_none()) {
        return Err(RoundError::UnknownPlayer(unknown));
    }

    let mut next = state.clone();
    for player in &state.players {
        let robot = state.expect_robot(player.robot_id);
        let free = robot.free_indices();

        let Some(cards) = programs.get(&player.id) else {
            if state.robot(robot.id).is_some() && robot.health > 0 && !free.is_empty() {
                return Err(RoundError::MissingProgram(player.id));
            }
            continue;
        };
        if cards.len() > free.len() {
            return Err(RoundError::TooManyCards {
                player: player.id,
                given: cards.len(),
                free: free.len(),
            });
        }

        for (card, &index) in cards.iter().zip(&free) {
            let mut taken = None;
            next.update_player(player.id, |p| taken = p.take_from_hand(card.id));
            let Some(taken) = taken else {
                return Err(RoundError::CardNotAvailable {
                    player: player.id,
                    card: card.id,
                });
            };
            next.update_robot(robot.id, |r| r.fill_register(index, taken));
        }
    }
    Ok(next)
}

fn resolve_card(
    state: &GameModel,
    register: usize,
    player: PlayerId,
    robot: RobotId,
    card: ActionCard,
) -> (GameModel, RoundResolution) {
    let facing = state.expect_robot(robot).dir;

    if let CardAction::Turn(turn) = card.action {
        let (next, robot, direction) = resolve_rotation(state, robot, turn);
        tracing::debug!(%robot, %card, %direction, "card resolved");
        let entry = RoundResolution::Rotation {
            register,
            player,
            robot,
            card,
            direction,
        };
        return (next, entry);
    }

    let dir = card.travel_direction(facing).unwrap_or(facing);
    let mut model = state.clone();
    let mut steps = Vec::new();
    for _ in 0..card.steps() {
        if model.is_destroyed(robot) {
            break;
        }
        let (moved, step) = resolve_movement(&model, robot, dir);
        if step.is_empty() {
            break;
        }
        let (checked, captures) = resolve_checkpoints(&moved);
        model = checked;
        steps.push(StepResolution { step, captures });
    }

    tracing::debug!(%robot, %card, steps = steps.len(), "card resolved");
    let entry = RoundResolution::Movement {
        register,
        player,
        robot,
        card,
        steps,
    };
    (model, entry)
}

fn resolve_board_elements(
    state: &GameModel,
    register: usize,
    log: &mut Vec<RoundResolution>,
) -> GameModel {
    let mut filters: SmallVec<[BeltFilter; 2]> = SmallVec::new();
    filters.push(BeltFilter::All);
    if state.config.express_second_pass {
        filters.push(BeltFilter::ExpressOnly);
    }

    let mut model = state.clone();
    for filter in filters {
        let (next, report) = resolve_conveyor_belts(&model, filter);
        model = next;
        if !report.is_empty() {
            log.push(RoundResolution::ConveyorBelts {
                register,
                filter,
                report,
            });
        }
    }

    let (next, report) = resolve_gears(&model);
    model = next;
    if !report.is_empty() {
        log.push(RoundResolution::Gears { register, report });
    }

    let (next, report) = resolve_lasers(&model);
    model = next;
    if !report.is_empty() {
        log.push(RoundResolution::Lasers { register, report });
    }

    let (next, captures) = resolve_checkpoints(&model);
    if !captures.is_empty() {
        log.push(RoundResolution::Checkpoints { register, captures });
    }
    next
}

fn resolve_register(state: &GameModel, register: usize, log: &mut Vec<RoundResolution>) -> GameModel {
    let mut model = state.clone();
    model.phase = RoundPhase::ResolvingRegister(register);

    let mut batch: SmallVec<[(ActionCard, PlayerId, RobotId); 8]> = model
        .players
        .iter()
        .filter_map(|p| {
            let robot = model.robot(p.robot_id)?;
            let card = robot.register(register)?.card;
            Some((card, p.id, robot.id))
        })
        .collect();
    batch.sort_by_key(|(card, _, _)| card.initiative);

    for (card, player, robot) in batch {
        // Pushed off the course by an earlier card this register.
        if model.is_destroyed(robot) {
            continue;
        }
        let (next, entry) = resolve_card(&model, register, player, robot, card);
        model = next;
        log.push(entry);
    }

    let (next, captures) = resolve_checkpoints(&model);
    model = next;
    if !captures.is_empty() {
        log.push(RoundResolution::Checkpoints { register, captures });
    }

    if model.config.board_elements {
        model = resolve_board_elements(&model, register, log);
    }

    let (next, locked, changed) = resolve_register_locking(&model);
    if changed {
        log.push(RoundResolution::RegisterLock { register, locked });
    }
    next
}

fn finish_round(state: &GameModel, log: &mut Vec<RoundResolution>) -> GameModel {
    let mut model = state.clone();
    model.phase = RoundPhase::EndOfRound;

    let (next, robots) = resolve_respawn(&model);
    model = next;
    if !robots.is_empty() {
        log.push(RoundResolution::Respawn { robots });
    }

    let (next, locked) = resolve_wipe_registers(&model);
    model = next;
    log.push(RoundResolution::RegisterWipe { locked });

    let (next, dealt) = deal_action_cards(&model);
    model = next;
    log.push(RoundResolution::HandsDealt { dealt });

    model.round += 1;
    model.phase = match model.winner() {
        Some(player) => {
            tracing::debug!(%player, round = model.round, "winner");
            log.push(RoundResolution::Winner { player });
            RoundPhase::Winner(player)
        }
        None => RoundPhase::AwaitingProgramming,
    };

    if cfg!(debug_assertions) {
        model.assert_valid();
    }
    model
}

/// Resolve one full round.
///
/// `programs` maps every player to the cards they put in their free
/// registers, in register order. Players whose robot is destroyed, out of
/// health, or has every register locked may be left out.
pub fn resolve_round(
    state: &GameModel,
    programs: &Programs,
) -> Result<(GameModel, Vec<RoundResolution>), RoundError> {
    let mut model = program_registers(state, programs)?;
    let mut log = Vec::new();

    for register in 0..REGISTER_COUNT {
        model = resolve_register(&model, register, &mut log);
    }
    let model = finish_round(&model, &mut log);

    tracing::debug!(round = model.round, events = log.len(), "round resolved");
    Ok((model, log))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{IdGen, RulesConfig, Turn};
    use crate::course::{Course, CourseBuilder};

    fn find_card(model: &GameModel, action: CardAction) -> ActionCard {
        model
            .all_cards()
            .find(|c| c.action == action)
            .copied()
            .unwrap()
    }

    /// Move a specific card from the draw pile into a player's hand.
    fn give(model: &mut GameModel, player: PlayerId, card: ActionCard) {
        let i = model
            .action_draw_pile
            .iter()
            .position(|c| c.id == card.id)
            .expect("card must still be in the draw pile");
        model.action_draw_pile.remove(i);
        model.update_player(player, |p| p.hand.push_back(card));
    }

    fn one_robot(course: Course) -> (GameModel, PlayerId, RobotId) {
        let mut ids = IdGen::new();
        let mut model = GameModel::new(course, RulesConfig::default());
        let (player, robot) = model.add_robot(&mut ids, Pos::new(0, 0), Direction::Right);
        (model, player, robot)
    }

    #[test]
    fn test_program_fills_free_registers() {
        let (mut model, player, robot) = one_robot(Course::empty("r", 5, 1));
        let card = find_card(&model, CardAction::MoveForward { distance: 1 });
        give(&mut model, player, card);

        let programs = Programs::from([(player, vec![card])]);
        let model = program_registers(&model, &programs).unwrap();

        assert_eq!(model.robot(robot).unwrap().register(0).unwrap().card, card);
        assert!(model.player(player).unwrap().hand.is_empty());
    }

    #[test]
    fn test_card_not_in_hand_rejected() {
        let (model, player, _) = one_robot(Course::empty("r", 5, 1));
        let card = find_card(&model, CardAction::MoveForward { distance: 1 });

        let programs = Programs::from([(player, vec![card])]);
        assert_eq!(
            program_registers(&model, &programs),
            Err(RoundError::CardNotAvailable {
                player,
                card: card.id
            })
        );
    }

    #[test]
    fn test_unknown_and_missing_players_rejected() {
        let (model, player, _) = one_robot(Course::empty("r", 5, 1));

        let unknown = Programs::from([(PlayerId(9), vec![])]);
        assert_eq!(
            program_registers(&model, &unknown),
            Err(RoundError::UnknownPlayer(PlayerId(9)))
        );
        assert_eq!(
            program_registers(&model, &Programs::new()),
            Err(RoundError::MissingProgram(player))
        );
    }

    #[test]
    fn test_too_many_cards_rejected() {
        let (model, player, _) = one_robot(Course::empty("r", 5, 1));
        let cards: Vec<ActionCard> = model.action_draw_pile.iter().take(6).copied().collect();

        let programs = Programs::from([(player, cards)]);
        assert_eq!(
            program_registers(&model, &programs),
            Err(RoundError::TooManyCards {
                player,
                given: 6,
                free: 5
            })
        );
    }

    #[test]
    fn test_game_over_rejected() {
        let (mut model, player, _) = one_robot(Course::empty("r", 5, 1));
        model.phase = RoundPhase::Winner(player);
        assert_eq!(
            resolve_round(&model, &Programs::new()),
            Err(RoundError::GameOver)
        );
    }

    #[test]
    fn test_move_card_logs_each_step() {
        let course = CourseBuilder::new("lane", 6, 1).build().unwrap();
        let (mut model, player, robot) = one_robot(course);
        let card = find_card(&model, CardAction::MoveForward { distance: 3 });
        give(&mut model, player, card);

        let (model, log) = resolve_round(&model, &Programs::from([(player, vec![card])])).unwrap();

        let RoundResolution::Movement { steps, register, .. } = &log[0] else {
            panic!("expected movement, got {:?}", log[0]);
        };
        assert_eq!(*register, 0);
        let positions: Vec<Pos> = steps.iter().map(|s| s.step.moves[&robot]).collect();
        assert_eq!(positions, vec![Pos::new(1, 0), Pos::new(2, 0), Pos::new(3, 0)]);
        assert_eq!(model.robot(robot).unwrap().pos, Pos::new(3, 0));
        assert_eq!(model.phase, RoundPhase::AwaitingProgramming);
        assert_eq!(model.round, 1);
    }

    #[test]
    fn test_lower_initiative_resolves_first() {
        let course = CourseBuilder::new("lane", 8, 1).build().unwrap();
        let mut ids = IdGen::new();
        let mut model = GameModel::new(course, RulesConfig::default().without_board_elements());
        let (p1, r1) = model.add_robot(&mut ids, Pos::new(0, 0), Direction::Right);
        let (p2, r2) = model.add_robot(&mut ids, Pos::new(4, 0), Direction::Left);
        let slow = find_card(&model, CardAction::MoveForward { distance: 3 });
        let fast = find_card(&model, CardAction::MoveForward { distance: 1 });
        assert!(fast.initiative < slow.initiative);
        give(&mut model, p1, slow);
        give(&mut model, p2, fast);

        let programs = Programs::from([(p1, vec![slow]), (p2, vec![fast])]);
        let (model, log) = resolve_round(&model, &programs).unwrap();

        assert!(matches!(log[0], RoundResolution::Movement { robot, .. } if robot == r2));
        assert!(matches!(log[1], RoundResolution::Movement { robot, .. } if robot == r1));
        // r2 moved to 3 first; r1 then pushes it back to 4 and stops at 3
        assert_eq!(model.robot(r1).unwrap().pos, Pos::new(3, 0));
        assert_eq!(model.robot(r2).unwrap().pos, Pos::new(4, 0));
    }

    #[test]
    fn test_rotation_card() {
        let (mut model, player, robot) = one_robot(Course::empty("r", 5, 5));
        let card = find_card(&model, CardAction::Turn(Turn::Right));
        give(&mut model, player, card);

        let (model, log) = resolve_round(&model, &Programs::from([(player, vec![card])])).unwrap();

        assert!(matches!(
            log[0],
            RoundResolution::Rotation { direction: Direction::Down, .. }
        ));
        assert_eq!(model.robot(robot).unwrap().dir, Direction::Down);
    }

    #[test]
    fn test_round_ends_with_wipe_and_deal() {
        let (mut model, player, _) = one_robot(Course::empty("r", 5, 5));
        let card = find_card(&model, CardAction::Turn(Turn::Left));
        give(&mut model, player, card);

        let (model, log) = resolve_round(&model, &Programs::from([(player, vec![card])])).unwrap();

        let tail: Vec<&RoundResolution> = log.iter().rev().take(2).collect();
        assert!(matches!(tail[0], RoundResolution::HandsDealt { .. }));
        assert!(matches!(tail[1], RoundResolution::RegisterWipe { .. }));
        assert!(model.action_discard_pile.iter().any(|c| c.id == card.id));
        assert_eq!(model.player(player).unwrap().hand.len(), 11);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_capturing_last_checkpoint_wins() {
        let course = CourseBuilder::new("cp", 5, 1)
            .checkpoint(1, Pos::new(2, 0))
            .build()
            .unwrap();
        let (mut model, player, _) = one_robot(course);
        let card = find_card(&model, CardAction::MoveForward { distance: 3 });
        give(&mut model, player, card);

        let (model, log) = resolve_round(&model, &Programs::from([(player, vec![card])])).unwrap();

        let RoundResolution::Movement { steps, .. } = &log[0] else {
            panic!("expected movement");
        };
        // Captured while passing over, not where the card ended.
        assert_eq!(steps[1].captures.len(), 1);
        assert!(matches!(log.last(), Some(RoundResolution::Winner { player: p }) if *p == player));
        assert_eq!(model.phase, RoundPhase::Winner(player));
    }
}
