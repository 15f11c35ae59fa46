//! Full-round scenarios on preset courses, and card conservation under
//! random play.

mod common;

use common::random_programs;
use proptest::prelude::*;
use robo_race::{
    load_course, resolve_round, GameModel, GameRng, GameSetup, RoundError, RoundPhase,
    RoundResolution, RulesConfig, DECK_SIZE,
};

fn play(model: &GameModel, rounds: usize, seed: u64) -> Vec<GameModel> {
    let mut rng = GameRng::new(seed);
    let mut history = vec![model.clone()];
    let mut model = model.clone();
    for _ in 0..rounds {
        if matches!(model.phase, RoundPhase::Winner(_)) {
            break;
        }
        let programs = random_programs(&model, &mut rng);
        let (next, _) = resolve_round(&model, &programs).unwrap();
        history.push(next.clone());
        model = next;
    }
    history
}

#[test]
fn test_setup_deals_every_player() {
    let model = GameSetup::new(load_course("conveyor-loop").unwrap())
        .players(4)
        .build()
        .unwrap();

    for player in &model.players {
        assert_eq!(player.hand.len(), 11);
    }
    assert_eq!(model.action_draw_pile.len(), DECK_SIZE - 44);
    assert_eq!(model.phase, RoundPhase::AwaitingProgramming);
}

#[test]
fn test_rounds_advance_and_stay_valid() {
    let model = GameSetup::new(load_course("training-ground").unwrap())
        .players(4)
        .seed(3)
        .build()
        .unwrap();

    let history = play(&model, 10, 99);

    for (n, state) in history.iter().enumerate() {
        assert!(state.validate().is_ok(), "round {n}: {:?}", state.validate());
        assert_eq!(state.round as usize, n);
    }
}

#[test]
fn test_same_inputs_same_outcome() {
    let model = GameSetup::new(load_course("laser-alley").unwrap())
        .players(3)
        .seed(8)
        .build()
        .unwrap();

    assert_eq!(play(&model, 6, 1), play(&model, 6, 1));
}

#[test]
fn test_log_order_within_register() {
    let model = GameSetup::new(load_course("training-ground").unwrap())
        .players(2)
        .config(RulesConfig::default().with_seed(4))
        .build()
        .unwrap();
    let programs = random_programs(&model, &mut GameRng::new(4));

    let (_, log) = resolve_round(&model, &programs).unwrap();

    let register_of = |e: &RoundResolution| match e {
        RoundResolution::Movement { register, .. }
        | RoundResolution::Rotation { register, .. }
        | RoundResolution::ConveyorBelts { register, .. }
        | RoundResolution::Gears { register, .. }
        | RoundResolution::Lasers { register, .. }
        | RoundResolution::Checkpoints { register, .. }
        | RoundResolution::RegisterLock { register, .. } => Some(*register),
        _ => None,
    };
    let registers: Vec<usize> = log.iter().filter_map(register_of).collect();
    assert!(registers.windows(2).all(|w| w[0] <= w[1]));

    let initiatives: Vec<(usize, u32)> = log
        .iter()
        .filter_map(|e| match e {
            RoundResolution::Movement { register, card, .. }
            | RoundResolution::Rotation { register, card, .. } => Some((*register, card.initiative)),
            _ => None,
        })
        .collect();
    assert!(initiatives.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_reprogramming_used_card_is_rejected() {
    let model = GameSetup::new(load_course("training-ground").unwrap())
        .players(2)
        .build()
        .unwrap();
    let mut programs = random_programs(&model, &mut GameRng::new(0));
    let player = model.players[0].id;
    let first = programs[&player][0];
    programs.get_mut(&player).unwrap()[1] = first;

    assert_eq!(
        resolve_round(&model, &programs),
        Err(RoundError::CardNotAvailable {
            player,
            card: first.id
        })
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_cards_are_conserved(
        setup_seed in any::<u64>(),
        play_seed in any::<u64>(),
        players in 1usize..=4,
        rounds in 1usize..8,
        preset in 0usize..3,
    ) {
        let name = robo_race::course::PRESET_NAMES[preset];
        let model = GameSetup::new(load_course(name).unwrap())
            .players(players)
            .seed(setup_seed)
            .build()
            .unwrap();

        for state in play(&model, rounds, play_seed) {
            prop_assert_eq!(state.all_cards().count(), DECK_SIZE);
            prop_assert!(state.validate().is_ok());
        }
    }
}
