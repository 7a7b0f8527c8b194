//! A player's fleet: the keyed roster of placed ships and the board they sit on.

use alloc::vec::Vec;

use log::{debug, info};

use crate::common::{Coord, EngineError};
use crate::config::{self, NUM_SHIPS};
use crate::grid::{Grid, GridCell, ShipCell};
use crate::placement::{self, Orientation};
use crate::ship::Ship;

/// Owns the ships a participant has placed, keyed by registry key.
///
/// The roster is only mutated through [`Player::add_ship`],
/// [`Player::place_ship`] and [`Player::remove_ship`]; everything else sees it
/// read-only.
#[derive(Debug, Clone)]
pub struct Player {
    roster: Vec<(&'static str, Ship)>,
    board: Grid<ShipCell>,
}

impl Player {
    /// Empty roster on a fresh rows×cols fleet board.
    pub fn new(rows: usize, cols: usize) -> Result<Self, EngineError> {
        Ok(Player {
            roster: Vec::with_capacity(NUM_SHIPS),
            board: Grid::new(rows, cols)?,
        })
    }

    /// Register `ship` under `key`. Rejected when the key is unknown, already
    /// used, or the ship's length differs from the registry's.
    pub fn add_ship(&mut self, key: &str, ship: Ship) -> bool {
        let Some(spec) = config::ship_spec(key) else {
            return false;
        };
        if self.has_placed(key) || ship.length() != spec.length() {
            return false;
        }
        self.roster.push((spec.key(), ship));
        true
    }

    /// Build the registry ship for `key` and place it from `start` along
    /// `orientation` on this player's board.
    pub fn place_ship(
        &mut self,
        key: &str,
        start: Coord,
        orientation: Orientation,
    ) -> Result<(), EngineError> {
        let spec =
            config::ship_spec(key).ok_or_else(|| EngineError::UnknownShipKey(key.into()))?;
        if self.has_placed(key) {
            return Err(EngineError::ShipAlreadyPlaced(spec.key()));
        }

        let candidate = placement::candidate_cells(&self.board, start, spec.length(), orientation);
        if candidate.len() != spec.length() {
            return Err(EngineError::CellOutOfBounds(
                orientation.step(start, candidate.len()),
            ));
        }
        if !placement::is_candidate_valid(&self.board, &candidate, spec.length()) {
            let blocked = candidate
                .iter()
                .copied()
                .find(|&pos| {
                    self.board
                        .cell(pos)
                        .map(|c| !c.is_occupiable() || c.is_occupied())
                        .unwrap_or(true)
                })
                .unwrap_or(start);
            return Err(EngineError::CellUnavailable(blocked));
        }

        let mut ship = spec.build();
        ship.place_on_cells(&mut self.board, &candidate)?;
        info!("placed {} at {:?}", spec.key(), candidate);
        self.roster.push((spec.key(), ship));
        Ok(())
    }

    /// Remove a placed ship, releasing its cells on this player's board.
    pub fn remove_ship(&mut self, key: &str) -> Option<Ship> {
        let idx = self.roster.iter().position(|(k, _)| *k == key)?;
        let (_, ship) = self.roster.remove(idx);
        for &pos in ship.cells() {
            if let Some(cell) = self.board.cell_mut(pos) {
                if cell.occupant().map(|o| o.as_str()) == Some(ship.name()) {
                    cell.clear_occupant();
                }
            }
        }
        debug!("removed {}", key);
        Some(ship)
    }

    pub fn has_placed(&self, key: &str) -> bool {
        self.roster.iter().any(|(k, _)| *k == key)
    }

    pub fn placed_count(&self) -> usize {
        self.roster.len()
    }

    /// Every registry ship type is present.
    pub fn all_placed(&self) -> bool {
        self.roster.len() == config::SHIPS.len()
    }

    pub fn ship(&self, key: &str) -> Option<&Ship> {
        self.roster.iter().find(|(k, _)| *k == key).map(|(_, s)| s)
    }

    /// Read-only view of the roster in insertion order.
    pub fn ships(&self) -> impl Iterator<Item = (&'static str, &Ship)> {
        self.roster.iter().map(|(k, s)| (*k, s))
    }

    pub fn board(&self) -> &Grid<ShipCell> {
        &self.board
    }

    /// Ship occupying `pos` along with its board cell, if any.
    pub(crate) fn ship_at_mut(
        &mut self,
        pos: Coord,
    ) -> Option<(&'static str, &mut Ship, Option<&mut ShipCell>)> {
        let (key, ship) = self
            .roster
            .iter_mut()
            .find(|(_, s)| s.occupies(pos))
            .map(|(k, s)| (*k, s))?;
        Some((key, ship, self.board.cell_mut(pos)))
    }

    pub(crate) fn board_mut(&mut self) -> &mut Grid<ShipCell> {
        &mut self.board
    }
}
