use std::collections::HashSet;

use netships::{
    AiPlayer, AttackResult, Coord, EngineError, MatchController, OpponentHandler, Side, BOARD_SIZE,
    SHIPS, TOTAL_SHIP_CELLS,
};
use proptest::prelude::*;

#[test]
fn test_attack_queue_visits_every_coordinate_once() {
    let mut ai = AiPlayer::seeded(BOARD_SIZE, BOARD_SIZE, 7).unwrap();
    let mut seen = HashSet::new();
    while let Some(pos) = ai.pick_next_attack() {
        assert!(pos.x < BOARD_SIZE && pos.y < BOARD_SIZE);
        assert!(seen.insert(pos), "coordinate {} drawn twice", pos);
    }
    assert_eq!(seen.len(), BOARD_SIZE * BOARD_SIZE);
    assert_eq!(ai.pick_next_attack(), None);
    assert_eq!(ai.remaining_attacks(), 0);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = AiPlayer::seeded(BOARD_SIZE, BOARD_SIZE, 99).unwrap();
    let mut b = AiPlayer::seeded(BOARD_SIZE, BOARD_SIZE, 99).unwrap();
    a.place_all_ships_randomly().unwrap();
    b.place_all_ships_randomly().unwrap();
    for spec in SHIPS.iter() {
        assert_eq!(
            a.player_model().ship(spec.key()).unwrap().cells(),
            b.player_model().ship(spec.key()).unwrap().cells()
        );
    }
    for _ in 0..20 {
        assert_eq!(a.pick_next_attack(), b.pick_next_attack());
    }
}

#[test]
fn test_random_placement_fills_the_roster() {
    let mut ai = AiPlayer::seeded(BOARD_SIZE, BOARD_SIZE, 3).unwrap();
    ai.place_all_ships_randomly().unwrap();
    let model = ai.player_model();
    assert!(model.all_placed());
    assert_eq!(model.board().occupied_count(), TOTAL_SHIP_CELLS);
    for (key, ship) in model.ships() {
        assert_eq!(Some(ship.length()), netships::length_for(key));
    }
}

#[test]
fn test_placement_exhaustion_is_fatal() {
    // a single row is too short for a carrier in either orientation
    let mut ai = AiPlayer::seeded(1, 4, 5).unwrap();
    assert_eq!(
        ai.place_all_ships_randomly(),
        Err(EngineError::PlacementExhausted {
            key: "carrier",
            attempts: netships::MAX_PLACEMENT_ATTEMPTS,
        })
    );
}

#[test]
fn test_handler_stalls_when_exhausted() {
    let ai = AiPlayer::seeded(2, 2, 1).unwrap();
    let (_, mut handler) = ai.into_parts();
    assert!(handler.should_auto_execute_turn());
    let moves: Vec<Coord> = std::iter::from_fn(|| handler.next_attack()).collect();
    assert_eq!(moves.len(), 4);
    assert_eq!(handler.next_attack(), None);
    assert_eq!(handler.remaining_attacks(), 0);
}

#[test]
fn test_ai_vs_ai_game_finishes() {
    let mut p1 = AiPlayer::seeded(BOARD_SIZE, BOARD_SIZE, 123).unwrap();
    let mut p2 = AiPlayer::seeded(BOARD_SIZE, BOARD_SIZE, 124).unwrap();
    p1.place_all_ships_randomly().unwrap();
    p2.place_all_ships_randomly().unwrap();
    let mut mc = MatchController::new(
        p1.player_model().clone(),
        p2.player_model().clone(),
        None,
        BOARD_SIZE,
        BOARD_SIZE,
    );

    let mut turns = 0;
    while !mc.is_all_sunk(Side::A) && !mc.is_all_sunk(Side::B) {
        turns += 1;
        let attacker = mc.current_player();
        let ai = if attacker == Side::A { &mut p1 } else { &mut p2 };
        let pos = ai.pick_next_attack().expect("queue covers the whole board");
        let result = mc.attack(attacker, attacker.opponent(), pos.x, pos.y);
        assert!(result.is_resolved(), "AI produced {:?}", result);
        assert!(turns <= 2 * BOARD_SIZE * BOARD_SIZE, "game took too many turns");
    }
    assert!(mc.is_all_sunk(Side::A) ^ mc.is_all_sunk(Side::B));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn queue_is_a_permutation(seed in any::<u64>(), rows in 1usize..12, cols in 1usize..12) {
        let mut ai = AiPlayer::seeded(rows, cols, seed).unwrap();
        let mut seen = HashSet::new();
        for _ in 0..rows * cols {
            let pos = ai.pick_next_attack();
            prop_assert!(pos.is_some());
            prop_assert!(seen.insert(pos.unwrap()));
        }
        prop_assert_eq!(ai.pick_next_attack(), None);
    }

    #[test]
    fn ai_never_repeats_against_a_fleet(seed in any::<u64>()) {
        let mut attacker = AiPlayer::seeded(BOARD_SIZE, BOARD_SIZE, seed).unwrap();
        let mut defender = AiPlayer::seeded(BOARD_SIZE, BOARD_SIZE, seed ^ 0xdead).unwrap();
        defender.place_all_ships_randomly().unwrap();
        let mut mc = MatchController::new(
            netships::Player::new(BOARD_SIZE, BOARD_SIZE).unwrap(),
            defender.player_model().clone(),
            None,
            BOARD_SIZE,
            BOARD_SIZE,
        );
        while let Some(pos) = attacker.pick_next_attack() {
            if !mc.is_turn(Side::A) {
                mc.end_turn();
            }
            let result = mc.attack(Side::A, Side::B, pos.x, pos.y);
            prop_assert!(!matches!(result, AttackResult::Already | AttackResult::Invalid));
        }
        prop_assert!(mc.is_all_sunk(Side::B));
    }
}
