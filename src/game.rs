//! Turn arbitration and attack resolution between two fleets.

use alloc::collections::BTreeSet;

use log::{debug, info, warn};

use crate::common::{AttackResult, Coord, ShotState, Side};
use crate::grid::GridCell;
use crate::player::Player;

/// Two-player match state machine.
///
/// The controller owns both fleets. Turns alternate under the
/// extra-turn-on-hit rule: a miss or a sinking hands the turn over, a plain
/// hit lets the attacker fire again. Game over is derived through
/// [`MatchController::is_all_sunk`] rather than stored.
#[derive(Debug, Clone)]
pub struct MatchController {
    player_a: Player,
    player_b: Player,
    current: Side,
    attacked_a: BTreeSet<Coord>,
    attacked_b: BTreeSet<Coord>,
    rows: usize,
    cols: usize,
}

impl MatchController {
    /// Create a match on a rows×cols board. `starting` defaults to [`Side::A`].
    pub fn new(
        player_a: Player,
        player_b: Player,
        starting: Option<Side>,
        rows: usize,
        cols: usize,
    ) -> Self {
        Self {
            player_a,
            player_b,
            current: starting.unwrap_or(Side::A),
            attacked_a: BTreeSet::new(),
            attacked_b: BTreeSet::new(),
            rows,
            cols,
        }
    }

    pub fn current_player(&self) -> Side {
        self.current
    }

    pub fn is_turn(&self, side: Side) -> bool {
        self.current == side
    }

    /// Hand the turn to the other side.
    pub fn end_turn(&mut self) {
        self.current = self.current.opponent();
        debug!("turn passes to {:?}", self.current);
    }

    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::A => &self.player_a,
            Side::B => &self.player_b,
        }
    }

    /// Coordinates already attacked on `defender`'s board.
    pub fn attacked(&self, defender: Side) -> &BTreeSet<Coord> {
        match defender {
            Side::A => &self.attacked_a,
            Side::B => &self.attacked_b,
        }
    }

    /// Resolve `attacker` firing at (`x`, `y`) on `defender`'s board and apply
    /// the turn-advance rule for the outcome.
    pub fn attack(&mut self, attacker: Side, defender: Side, x: usize, y: usize) -> AttackResult {
        let result = self.resolve(attacker, defender, x, y);
        if result.ends_turn() {
            self.end_turn();
        }
        result
    }

    fn resolve(&mut self, attacker: Side, defender: Side, x: usize, y: usize) -> AttackResult {
        if attacker == defender {
            warn!("{:?} attempted to attack its own fleet", attacker);
            return AttackResult::Invalid;
        }
        if !self.is_turn(attacker) {
            warn!("attack attempted out of turn by {:?}", attacker);
            return AttackResult::Invalid;
        }
        if x >= self.cols || y >= self.rows {
            debug!("attack at {},{} is out of bounds", x, y);
            return AttackResult::Invalid;
        }

        let pos = Coord::new(x, y);
        let attacked = match defender {
            Side::A => &mut self.attacked_a,
            Side::B => &mut self.attacked_b,
        };
        if !attacked.insert(pos) {
            info!("coordinate already attacked: {}", pos);
            return AttackResult::Already;
        }

        let fleet = match defender {
            Side::A => &mut self.player_a,
            Side::B => &mut self.player_b,
        };
        match fleet.ship_at_mut(pos) {
            Some((key, ship, cell)) => {
                if ship.is_hit_at(pos) || cell.as_ref().is_some_and(|c| c.is_hit()) {
                    warn!("ship cell already hit at {}", pos);
                    return AttackResult::Already;
                }
                let marked = match cell {
                    Some(cell) => {
                        cell.set_incoming(ShotState::Hit);
                        ship.mark_hit(cell)
                    }
                    None => ship.mark_hit_at(pos),
                };
                if !marked {
                    warn!("failed to mark hit on {} at {}", key, pos);
                }
                let sunk = ship.is_sunk();
                info!("attack at {} -> HIT (ship={}), sunk={}", pos, key, sunk);
                if sunk {
                    AttackResult::Sunk(key)
                } else {
                    AttackResult::Hit(key)
                }
            }
            None => {
                if let Some(cell) = fleet.board_mut().cell_mut(pos) {
                    cell.set_incoming(ShotState::Miss);
                }
                info!("attack at {} -> MISS", pos);
                AttackResult::Miss
            }
        }
    }

    /// Every ship of `side` is sunk. `false` while the roster is empty.
    pub fn is_all_sunk(&self, side: Side) -> bool {
        let mut ships = self.player(side).ships().peekable();
        ships.peek().is_some() && ships.all(|(_, s)| s.is_sunk())
    }

    /// Clear both attacked-sets and restart the turn order for a rematch.
    pub fn reset(&mut self, starting: Option<Side>) {
        self.attacked_a.clear();
        self.attacked_b.clear();
        self.current = starting.unwrap_or(Side::A);
        debug!("match reset, {:?} starts", self.current);
    }
}
