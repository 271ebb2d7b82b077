//! Scripted match scenarios.
//!
//! These tests inject a scripted `RandomSource` so every wall, roll and
//! artifact spawn is known in advance.

use std::collections::VecDeque;

use magic_labyrinth::core::{CELL_COUNT, START_POSITIONS};
use magic_labyrinth::{
    Direction, LabyrinthError, MatchConfig, MatchEvent, MatchPhase, MoveError, MoveOutcome,
    PlayerId, Position, RandomSource, RollError, RulesEngine, TurnResolution, DIE_FACES,
};

// =============================================================================
// Scripted randomness
// =============================================================================

/// Replays queued draws; an exhausted queue yields 0 / `false`.
#[derive(Debug, Default)]
struct ScriptedRng {
    indices: VecDeque<usize>,
    bools: VecDeque<bool>,
}

impl RandomSource for ScriptedRng {
    fn gen_index(&mut self, len: usize) -> usize {
        self.indices.pop_front().unwrap_or(0) % len
    }

    fn gen_bool(&mut self, _probability: f64) -> bool {
        self.bools.pop_front().unwrap_or(false)
    }
}

/// Wall draws for one grid, in generation order (row-major, corners skipped).
fn wall_draws(walls: &[Position]) -> VecDeque<bool> {
    (0..CELL_COUNT)
        .map(|i| Position::new((i % 8) as i32, (i / 8) as i32))
        .filter(|p| !START_POSITIONS.contains(p))
        .map(|p| walls.contains(&p))
        .collect()
}

/// Index draw that makes the die show `value`.
fn face(value: u8) -> usize {
    DIE_FACES.iter().position(|&f| f == value).unwrap()
}

/// Engine whose first match has `walls`, then replays `indices`.
///
/// Index draws for the first match are: starting player, artifact x,
/// artifact y. After that, one per roll and two per artifact respawn.
fn scripted(walls: &[Position], indices: &[usize]) -> RulesEngine<ScriptedRng> {
    let rng = ScriptedRng {
        indices: indices.iter().copied().collect(),
        bools: wall_draws(walls),
    };
    RulesEngine::with_rng(MatchConfig::default(), rng)
}

const P0: PlayerId = PlayerId::FIRST;
const P1: PlayerId = PlayerId::SECOND;

fn pos(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

// =============================================================================
// Initialization
// =============================================================================

#[test]
fn test_scripted_initial_state() {
    let engine = scripted(&[pos(3, 3), pos(5, 1)], &[1, 4, 2]);
    let state = engine.state();

    assert_eq!(state.current_player(), P1);
    assert_eq!(state.artifact(), pos(4, 2));
    assert!(state.is_wall(pos(3, 3)));
    assert!(state.is_wall(pos(5, 1)));
    assert_eq!(state.walls().wall_count(), 2);
    assert_eq!(state.player(P0).position, pos(0, 0));
    assert_eq!(state.player(P1).position, pos(7, 7));
    assert_eq!(state.current_moves(), 0);
    assert!(state.valid_moves().is_empty());
    assert_eq!(engine.phase(), MatchPhase::AwaitingRoll);
}

#[test]
fn test_initial_artifact_rejects_walls() {
    // First sample lands on a wall, second is open.
    let engine = scripted(&[pos(2, 2)], &[0, 2, 2, 6, 1]);
    assert_eq!(engine.state().artifact(), pos(6, 1));
}

// =============================================================================
// Rolling
// =============================================================================

#[test]
fn test_corner_roll_valid_moves() {
    let mut engine = scripted(&[], &[0, 4, 4, face(3)]);

    assert_eq!(engine.roll_die(), Ok(3));
    assert_eq!(engine.state().current_moves(), 3);
    assert_eq!(engine.state().valid_moves(), &[pos(1, 0), pos(0, 1)]);
    assert_eq!(engine.phase(), MatchPhase::Moving { remaining: 3 });
}

#[test]
fn test_roll_mid_turn_is_rejected() {
    let mut engine = scripted(&[], &[0, 4, 4, face(2), face(4)]);

    assert_eq!(engine.roll_die(), Ok(2));
    assert_eq!(engine.roll_die(), Err(RollError::MovesRemaining(2)));
    assert_eq!(engine.state().current_moves(), 2);

    engine.attempt_move(P0, pos(1, 0)).unwrap();
    assert_eq!(engine.roll_die(), Err(RollError::MovesRemaining(1)));
}

// =============================================================================
// Moving
// =============================================================================

#[test]
fn test_step_consumes_one_move() {
    let mut engine = scripted(&[], &[0, 4, 4, face(3)]);
    engine.roll_die().unwrap();

    let outcome = engine.attempt_move(P0, pos(1, 0)).unwrap();

    assert_eq!(outcome, MoveOutcome::Moved { to: pos(1, 0), remaining: 2 });
    assert!(!outcome.ends_turn());
    assert_eq!(engine.state().player(P0).position, pos(1, 0));
    assert_eq!(engine.state().current_moves(), 2);
    assert_eq!(engine.state().valid_moves(), &[pos(2, 0), pos(1, 1), pos(0, 0)]);
}

#[test]
fn test_last_step_clears_valid_moves() {
    let mut engine = scripted(&[], &[0, 4, 4, face(2)]);
    engine.roll_die().unwrap();

    engine.attempt_move(P0, pos(0, 1)).unwrap();
    let outcome = engine.attempt_move(P0, pos(0, 2)).unwrap();

    assert!(outcome.ends_turn());
    assert_eq!(engine.state().current_moves(), 0);
    assert!(engine.state().valid_moves().is_empty());
    assert_eq!(
        engine.attempt_move(P0, pos(0, 3)),
        Err(MoveError::NoMovesRemaining)
    );
}

#[test]
fn test_non_adjacent_moves_rejected_without_mutation() {
    let mut engine = scripted(&[], &[0, 4, 4, face(4)]);
    engine.roll_die().unwrap();
    let before = engine.state().clone();

    for target in [pos(0, 0), pos(1, 1), pos(2, 0), pos(0, 3), pos(7, 7)] {
        assert_eq!(
            engine.attempt_move(P0, target),
            Err(MoveError::NotAdjacent { from: pos(0, 0), to: target })
        );
        assert!(!engine.try_move(P0, target));
    }

    assert_eq!(engine.state(), &before);
}

#[test]
fn test_waiting_player_cannot_move() {
    let mut engine = scripted(&[], &[0, 4, 4, face(2)]);
    engine.roll_die().unwrap();

    assert_eq!(engine.attempt_move(P1, pos(6, 7)), Err(MoveError::NotYourTurn(P1)));
    assert_eq!(engine.state().player(P1).position, pos(7, 7));
}

#[test]
fn test_wall_hit_returns_to_start_and_forfeits() {
    let mut engine = scripted(&[pos(1, 0)], &[0, 4, 4, face(4)]);
    engine.roll_die().unwrap();

    engine.attempt_move(P0, pos(0, 1)).unwrap();
    engine.attempt_move(P0, pos(1, 1)).unwrap();
    let outcome = engine.attempt_move(P0, pos(1, 0)).unwrap();

    assert_eq!(
        outcome,
        MoveOutcome::HitWall {
            wall: pos(1, 0),
            returned_to: pos(0, 0)
        }
    );
    assert!(outcome.ends_turn());
    assert_eq!(engine.state().player(P0).position, pos(0, 0));
    assert_eq!(engine.state().current_moves(), 0);
    assert!(engine.state().valid_moves().is_empty());

    assert_eq!(engine.finish_turn(), TurnResolution::NextTurn(P1));
    assert_eq!(engine.state().current_player(), P1);
}

#[test]
fn test_wall_next_to_start_is_still_offered() {
    let mut engine = scripted(&[pos(1, 0)], &[0, 4, 4, face(1)]);
    engine.roll_die().unwrap();

    assert!(engine.state().is_valid_move(pos(1, 0)));
    let outcome = engine.attempt_move(P0, pos(1, 0)).unwrap();
    assert!(matches!(outcome, MoveOutcome::HitWall { .. }));
    assert_eq!(engine.state().player(P0).position, pos(0, 0));
}

#[test]
fn test_wall_hit_events() {
    let mut engine = scripted(&[pos(1, 0)], &[0, 4, 4, face(2)]);
    engine.drain_events();
    engine.roll_die().unwrap();
    engine.attempt_move(P0, pos(1, 0)).unwrap();
    engine.next_turn();

    let events = engine.drain_events();
    assert_eq!(
        events,
        vec![
            MatchEvent::DieRolled { player: P0, value: 2 },
            MatchEvent::WallHit {
                player: P0,
                wall: pos(1, 0),
                returned_to: pos(0, 0),
            },
            MatchEvent::TurnPassed { to: P1, turn_number: 2 },
        ]
    );
}

#[test]
fn test_step_by_direction() {
    let mut engine = scripted(&[], &[0, 4, 4, face(2)]);
    engine.roll_die().unwrap();

    assert_eq!(
        engine.step(Direction::Right),
        Ok(MoveOutcome::Moved { to: pos(1, 0), remaining: 1 })
    );
    assert_eq!(engine.step(Direction::Up), Err(MoveError::OutOfBounds(pos(1, -1))));
    assert_eq!(engine.state().current_moves(), 1);
}

// =============================================================================
// Paths and whole turns
// =============================================================================

#[test]
fn test_walk_path_checks_every_cell() {
    let mut engine = scripted(&[], &[0, 4, 4, face(3)]);
    engine.roll_die().unwrap();
    let before = engine.state().clone();

    assert_eq!(
        engine.walk_path(P0, &[pos(1, 0), pos(2, 0), pos(3, 0), pos(4, 0)]),
        Err(MoveError::PathTooLong { len: 4, remaining: 3 })
    );
    assert_eq!(
        engine.walk_path(P0, &[pos(1, 0), pos(3, 0)]),
        Err(MoveError::NotAdjacent { from: pos(1, 0), to: pos(3, 0) })
    );
    assert_eq!(engine.state(), &before);

    let outcomes = engine.walk_path(P0, &[pos(0, 1), pos(1, 1)]).unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(engine.state().player(P0).position, pos(1, 1));
    assert_eq!(engine.state().current_moves(), 1);
}

#[test]
fn test_walk_path_stops_at_wall() {
    let mut engine = scripted(&[pos(0, 1)], &[0, 4, 4, face(3)]);
    engine.roll_die().unwrap();

    let outcomes = engine.walk_path(P0, &[pos(0, 1), pos(0, 2), pos(0, 3)]).unwrap();

    assert_eq!(outcomes.len(), 1);
    assert!(matches!(outcomes[0], MoveOutcome::HitWall { .. }));
    assert_eq!(engine.state().player(P0).position, pos(0, 0));
}

#[test]
fn test_take_turn_walks_up_to_roll() {
    let mut engine = scripted(&[], &[0, 4, 4, face(3)]);

    let report = engine
        .take_turn(&[pos(1, 0), pos(2, 0), pos(3, 0), pos(4, 0)])
        .unwrap();

    assert_eq!(report.rolled, 3);
    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.resolution, TurnResolution::NextTurn(P1));
    assert_eq!(engine.state().player(P0).position, pos(3, 0));
    assert_eq!(engine.state().current_player(), P1);
}

#[test]
fn test_take_turn_forfeits_unspent_steps() {
    let mut engine = scripted(&[], &[0, 4, 4, face(3)]);

    let report = engine.take_turn(&[pos(0, 1)]).unwrap();

    assert_eq!(report.outcomes, vec![MoveOutcome::Moved { to: pos(0, 1), remaining: 2 }]);
    assert_eq!(report.resolution, TurnResolution::NextTurn(P1));
    assert_eq!(engine.state().current_moves(), 0);
}

#[test]
fn test_take_turn_rejects_bad_path_before_rolling() {
    let mut engine = scripted(&[], &[0, 4, 4, face(3)]);
    let before = engine.state().clone();
    let events_before = engine.pending_events().len();

    assert_eq!(
        engine.take_turn(&[pos(2, 0)]),
        Err(LabyrinthError::Move(MoveError::NotAdjacent { from: pos(0, 0), to: pos(2, 0) }))
    );
    assert_eq!(engine.state(), &before);
    assert_eq!(engine.pending_events().len(), events_before);
}

#[test]
fn test_take_turn_rejected_mid_roll() {
    let mut engine = scripted(&[], &[0, 4, 4, face(3)]);
    engine.roll_die().unwrap();

    assert_eq!(
        engine.take_turn(&[pos(1, 0)]),
        Err(LabyrinthError::Roll(RollError::MovesRemaining(3)))
    );
}

#[test]
fn test_take_turn_into_wall() {
    let mut engine = scripted(&[pos(1, 0)], &[0, 4, 4, face(3)]);

    let report = engine.take_turn(&[pos(1, 0), pos(2, 0)]).unwrap();

    assert_eq!(
        report.outcomes,
        vec![MoveOutcome::HitWall { wall: pos(1, 0), returned_to: pos(0, 0) }]
    );
    assert_eq!(report.resolution, TurnResolution::NextTurn(P1));
}

// =============================================================================
// Artifacts
// =============================================================================

#[test]
fn test_artifact_pickup_and_respawn() {
    let mut engine = scripted(&[], &[0, 1, 0, face(2), 5, 5]);
    engine.roll_die().unwrap();

    let outcome = engine.attempt_move(P0, pos(1, 0)).unwrap();

    assert_eq!(
        outcome,
        MoveOutcome::CollectedArtifact {
            to: pos(1, 0),
            remaining: 1,
            total: 1,
            respawned_at: pos(5, 5),
        }
    );
    assert_eq!(engine.state().player(P0).artifacts, 1);
    assert_eq!(engine.state().artifact(), pos(5, 5));
    assert_eq!(engine.state().current_moves(), 1);
    assert_eq!(engine.state().valid_moves().len(), 3);
}

#[test]
fn test_respawn_skips_walls() {
    let mut engine = scripted(&[pos(5, 5)], &[0, 1, 0, face(1), 5, 5, 6, 6]);
    engine.roll_die().unwrap();
    engine.attempt_move(P0, pos(1, 0)).unwrap();

    assert_eq!(engine.state().artifact(), pos(6, 6));
}

#[test]
fn test_respawn_may_land_on_a_player() {
    let mut engine = scripted(&[], &[0, 1, 0, face(1), 7, 7]);
    engine.roll_die().unwrap();
    engine.attempt_move(P0, pos(1, 0)).unwrap();

    assert_eq!(engine.state().artifact(), pos(7, 7));
    assert_eq!(engine.state().player_at(pos(7, 7)).map(|p| p.id), Some(P1));
}

#[test]
fn test_respawn_fallback_when_attempts_exhausted() {
    let rng = ScriptedRng {
        indices: [0, 1, 0, face(1)].into_iter().collect(),
        bools: wall_draws(&[]),
    };
    let config = MatchConfig::default().with_max_spawn_attempts(0);
    let engine = RulesEngine::with_rng(config, rng);

    // Zero attempts: the spawn falls back to the first open cell.
    assert_eq!(engine.state().artifact(), pos(0, 0));
}

// =============================================================================
// Winning
// =============================================================================

/// Player 0 collects four artifacts bouncing between (1,0) and (0,0), player
/// 1 takes a single step, then player 0 collects the fifth.
fn five_artifact_script() -> Vec<usize> {
    vec![
        0, 1, 0, // P0 starts, artifact at (1,0)
        face(4), // P0 rolls 4
        0, 0, 1, 0, 0, 0, 1, 0, // four respawns
        face(1), // P1 rolls 1
        face(1), // P0 rolls 1
        3, 3, // fifth respawn
        1, 2, 2, // next match: P1 starts, artifact (2,2)
    ]
}

#[test]
fn test_fifth_artifact_wins() {
    let mut engine = scripted(&[], &five_artifact_script());

    engine.roll_die().unwrap();
    for (i, target) in [pos(1, 0), pos(0, 0), pos(1, 0), pos(0, 0)].into_iter().enumerate() {
        let outcome = engine.attempt_move(P0, target).unwrap();
        assert!(matches!(
            outcome,
            MoveOutcome::CollectedArtifact { total, .. } if total == i as u32 + 1
        ));
    }
    assert_eq!(engine.state().player(P0).artifacts, 4);
    assert!(engine.has_winner().is_none());
    assert_eq!(engine.finish_turn(), TurnResolution::NextTurn(P1));

    engine.roll_die().unwrap();
    engine.attempt_move(P1, pos(6, 7)).unwrap();
    assert!(engine.has_winner().is_none());
    assert_eq!(engine.finish_turn(), TurnResolution::NextTurn(P0));

    engine.roll_die().unwrap();
    engine.drain_events();
    let outcome = engine.attempt_move(P0, pos(1, 0)).unwrap();
    assert!(matches!(outcome, MoveOutcome::CollectedArtifact { total: 5, .. }));

    let winner = engine.has_winner().map(|p| p.id);
    assert_eq!(winner, Some(P0));
    assert_eq!(engine.phase(), MatchPhase::Won(P0));
    assert!(engine.drain_events().contains(&MatchEvent::PlayerWon { player: P0 }));

    // Query is pure.
    assert_eq!(engine.has_winner().map(|p| p.id), Some(P0));
}

#[test]
fn test_reinitialize_after_win_resets_counters() {
    let mut engine = scripted(&[], &five_artifact_script());

    engine.roll_die().unwrap();
    for target in [pos(1, 0), pos(0, 0), pos(1, 0), pos(0, 0)] {
        engine.attempt_move(P0, target).unwrap();
    }
    engine.finish_turn();
    engine.roll_die().unwrap();
    engine.attempt_move(P1, pos(6, 7)).unwrap();
    engine.finish_turn();
    engine.roll_die().unwrap();
    engine.attempt_move(P0, pos(1, 0)).unwrap();

    assert_eq!(engine.finish_turn(), TurnResolution::MatchWon(P0));

    let state = engine.state();
    assert!(engine.has_winner().is_none());
    assert_eq!(state.match_number(), 2);
    assert_eq!(state.turn_number(), 1);
    assert_eq!(state.current_player(), P1);
    assert_eq!(state.artifact(), pos(2, 2));
    assert_eq!(state.current_moves(), 0);
    for player in state.players() {
        assert_eq!(player.artifacts, 0);
        assert_eq!(player.position, player.start_position);
    }
}

// =============================================================================
// Turns
// =============================================================================

#[test]
fn test_next_turn_mid_roll_resets_moves() {
    let mut engine = scripted(&[], &[0, 4, 4, face(4)]);
    engine.roll_die().unwrap();
    engine.next_turn();

    assert_eq!(engine.state().current_player(), P1);
    assert_eq!(engine.state().current_moves(), 0);
    assert!(engine.state().valid_moves().is_empty());
    assert_eq!(engine.phase(), MatchPhase::AwaitingRoll);
}

#[test]
fn test_next_turn_alternates_repeatedly() {
    let mut engine = scripted(&[], &[1, 4, 4]);
    let mut expected = P1;

    for turn in 1..=10 {
        assert_eq!(engine.state().current_player(), expected);
        assert_eq!(engine.state().turn_number(), turn);
        engine.next_turn();
        expected = expected.opponent();
    }
}

// =============================================================================
// Determinism
// =============================================================================

/// Play `turns` turns, always stepping to the first valid move.
fn autoplay(engine: &mut RulesEngine, turns: usize) -> Vec<MatchEvent> {
    for _ in 0..turns {
        engine.roll_die().unwrap();
        loop {
            let player = engine.state().current_player();
            let target = engine.state().valid_moves()[0];
            if engine.attempt_move(player, target).unwrap().ends_turn() {
                break;
            }
        }
        engine.finish_turn();
    }
    engine.drain_events()
}

#[test]
fn test_seeded_sessions_replay_identically() {
    let mut a = RulesEngine::new(MatchConfig::default().with_seed(2024));
    let mut b = RulesEngine::new(MatchConfig::default().with_seed(2024));

    assert_eq!(autoplay(&mut a, 200), autoplay(&mut b, 200));
    assert_eq!(a.state(), b.state());
    assert_eq!(a.rng_state(), b.rng_state());
}

#[test]
fn test_different_seeds_diverge() {
    let mut a = RulesEngine::new(MatchConfig::default().with_seed(1));
    let mut b = RulesEngine::new(MatchConfig::default().with_seed(2));

    assert_ne!(autoplay(&mut a, 50), autoplay(&mut b, 50));
}
