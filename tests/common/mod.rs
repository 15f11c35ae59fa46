//! Helpers shared by the integration tests.

#![allow(dead_code)]

use robo_race::{
    ActionCard, CardAction, Direction, GameModel, GameRng, IdGen, PlayerId, Pos, Programs,
    RobotId, RulesConfig,
};
use robo_race::course::Course;

/// A model on `course` with robots placed by hand, without dealing.
pub fn model_with(course: Course, robots: &[(Pos, Direction)]) -> (GameModel, Vec<(PlayerId, RobotId)>) {
    let mut ids = IdGen::new();
    let mut model = GameModel::new(course, RulesConfig::default());
    let placed = robots
        .iter()
        .map(|&(pos, dir)| model.add_robot(&mut ids, pos, dir))
        .collect();
    (model, placed)
}

/// Move the first undealt card with `action` from the draw pile into `player`'s hand.
pub fn give(model: &mut GameModel, player: PlayerId, action: CardAction) -> ActionCard {
    let index = model
        .action_draw_pile
        .iter()
        .position(|c| c.action == action)
        .expect("card left in draw pile");
    let card = model.action_draw_pile.remove(index);
    model.update_player(player, |p| p.hand.push_back(card));
    card
}

/// Random legal programs: each active player fills every free register
/// from a shuffled copy of their hand.
pub fn random_programs(model: &GameModel, rng: &mut GameRng) -> Programs {
    let mut programs = Programs::new();
    for player in &model.players {
        let Some(robot) = model.robot(player.robot_id) else {
            continue;
        };
        let mut hand: Vec<ActionCard> = player.hand.iter().copied().collect();
        rng.shuffle(&mut hand);
        hand.truncate(robot.free_indices().len());
        programs.insert(player.id, hand);
    }
    programs
}
