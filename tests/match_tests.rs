use netships::{AttackResult, Coord, MatchController, Orientation, Player, Ship, Side};

fn empty_player() -> Player {
    Player::new(10, 10).unwrap()
}

/// Defender B holds a single destroyer at (0,0),(1,0),(2,0).
fn single_ship_match() -> MatchController {
    let mut b = empty_player();
    b.place_ship("destroyer", Coord::new(0, 0), Orientation::Horizontal)
        .unwrap();
    MatchController::new(empty_player(), b, None, 10, 10)
}

#[test]
fn test_hit_already_hit_sunk_scenario() {
    let mut mc = single_ship_match();
    assert_eq!(mc.current_player(), Side::A);

    assert_eq!(mc.attack(Side::A, Side::B, 1, 0), AttackResult::Hit("destroyer"));
    assert!(mc.is_turn(Side::A));
    assert_eq!(mc.attack(Side::A, Side::B, 1, 0), AttackResult::Already);
    assert!(mc.is_turn(Side::A));
    assert_eq!(mc.attack(Side::A, Side::B, 0, 0), AttackResult::Hit("destroyer"));
    assert!(mc.is_turn(Side::A));
    assert!(!mc.is_all_sunk(Side::B));
    assert_eq!(mc.attack(Side::A, Side::B, 2, 0), AttackResult::Sunk("destroyer"));
    assert!(mc.is_all_sunk(Side::B));
    assert!(mc.is_turn(Side::B));
}

#[test]
fn test_miss_passes_turn() {
    let mut mc = single_ship_match();
    assert_eq!(mc.attack(Side::A, Side::B, 5, 5), AttackResult::Miss);
    assert_eq!(mc.current_player(), Side::B);
    assert_eq!(mc.attack(Side::B, Side::A, 5, 5), AttackResult::Miss);
    assert_eq!(mc.current_player(), Side::A);
}

#[test]
fn test_out_of_turn_attack_records_nothing() {
    let mut mc = single_ship_match();
    assert_eq!(mc.attack(Side::B, Side::A, 3, 3), AttackResult::Invalid);
    assert!(mc.attacked(Side::A).is_empty());
    assert!(mc.is_turn(Side::A));

    // the rightful attacker can still use that coordinate
    assert_eq!(mc.attack(Side::A, Side::B, 3, 3), AttackResult::Miss);
    assert_eq!(mc.attack(Side::B, Side::A, 3, 3), AttackResult::Miss);
    assert!(mc.attacked(Side::A).contains(&Coord::new(3, 3)));
}

#[test]
fn test_invalid_participants_and_bounds() {
    let mut mc = single_ship_match();
    assert_eq!(mc.attack(Side::A, Side::A, 0, 0), AttackResult::Invalid);
    assert_eq!(mc.attack(Side::A, Side::B, 10, 0), AttackResult::Invalid);
    assert_eq!(mc.attack(Side::A, Side::B, 0, 10), AttackResult::Invalid);
    assert!(mc.attacked(Side::B).is_empty());
    assert!(mc.is_turn(Side::A));
}

#[test]
fn test_attacked_set_grows_once_per_coordinate() {
    let mut mc = single_ship_match();
    mc.attack(Side::A, Side::B, 1, 0);
    mc.attack(Side::A, Side::B, 1, 0);
    mc.attack(Side::A, Side::B, 9, 9);
    assert_eq!(mc.attacked(Side::B).len(), 2);
    assert!(mc.attacked(Side::A).is_empty());
}

#[test]
fn test_is_all_sunk_false_for_empty_roster() {
    let mc = single_ship_match();
    assert!(!mc.is_all_sunk(Side::A));
}

#[test]
fn test_hits_are_recorded_on_the_defender_board() {
    let mut mc = single_ship_match();
    mc.attack(Side::A, Side::B, 2, 0);
    let board = mc.player(Side::B).board();
    assert!(board.get(2, 0).unwrap().is_hit());
    assert!(!board.get(1, 0).unwrap().is_hit());
    assert!(mc.player(Side::B).ship("destroyer").unwrap().is_hit_at(Coord::new(2, 0)));
}

#[test]
fn test_ship_added_without_board_is_still_resolved() {
    let mut b = empty_player();
    let ship = netships::Ship::with_cells(
        "Patrol Boat",
        2,
        vec![Coord::new(5, 5), Coord::new(5, 6)],
    )
    .unwrap();
    assert!(b.add_ship("patrolboat", ship));
    let mut mc = MatchController::new(empty_player(), b, Some(Side::A), 10, 10);
    assert_eq!(mc.attack(Side::A, Side::B, 5, 5), AttackResult::Hit("patrolboat"));
    assert_eq!(mc.attack(Side::A, Side::B, 5, 6), AttackResult::Sunk("patrolboat"));
}

#[test]
fn test_reset_clears_attacks_and_turn() {
    let mut mc = single_ship_match();
    mc.attack(Side::A, Side::B, 7, 7);
    assert!(mc.is_turn(Side::B));
    mc.reset(Some(Side::B));
    assert!(mc.attacked(Side::B).is_empty());
    assert!(mc.is_turn(Side::B));
    mc.reset(None);
    assert!(mc.is_turn(Side::A));
    assert_eq!(mc.attack(Side::A, Side::B, 7, 7), AttackResult::Miss);
}

#[test]
fn test_fresh_coordinate_on_damaged_segment_is_already() {
    let cells = vec![Coord::new(4, 4), Coord::new(4, 5)];
    let mut ship = Ship::with_cells("Patrol Boat", 2, cells).unwrap();
    assert!(ship.mark_hit_at(Coord::new(4, 4)));
    let mut b = empty_player();
    assert!(b.add_ship("patrolboat", ship));
    let mut mc = MatchController::new(empty_player(), b, None, 10, 10);

    assert_eq!(mc.attack(Side::A, Side::B, 4, 4), AttackResult::Already);
    assert!(mc.is_turn(Side::A));
    assert!(mc.attacked(Side::B).contains(&Coord::new(4, 4)));
    assert!(!mc.player(Side::B).ship("patrolboat").unwrap().is_sunk());

    assert_eq!(mc.attack(Side::A, Side::B, 4, 5), AttackResult::Sunk("patrolboat"));
    assert!(mc.is_all_sunk(Side::B));
}

#[test]
fn test_reset_keeps_fleet_damage() {
    let mut mc = single_ship_match();
    assert_eq!(mc.attack(Side::A, Side::B, 1, 0), AttackResult::Hit("destroyer"));
    assert_eq!(mc.attack(Side::A, Side::B, 5, 5), AttackResult::Miss);
    assert!(mc.is_turn(Side::B));

    mc.reset(None);
    assert!(mc.is_turn(Side::A));
    assert!(mc.attacked(Side::B).is_empty());

    // the segment is still damaged after a reset
    assert_eq!(mc.attack(Side::A, Side::B, 1, 0), AttackResult::Already);
    assert!(mc.is_turn(Side::A));
    assert_eq!(mc.attacked(Side::B).len(), 1);
    // a previously missed coordinate is open again
    assert_eq!(mc.attack(Side::A, Side::B, 5, 5), AttackResult::Miss);
}
