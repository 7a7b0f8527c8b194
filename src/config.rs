//! Board defaults, the ship registry and per-match configuration.

use crate::common::{EngineError, Side};
use crate::ship::{Ship, ShipSpec};

pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;

/// Ship registry in its fixed iteration order. Keys are a stable contract.
pub const SHIPS: [ShipSpec; NUM_SHIPS] = [
    ShipSpec::new("carrier", "Carrier", 5),
    ShipSpec::new("battleship", "Battleship", 4),
    ShipSpec::new("destroyer", "Destroyer", 3),
    ShipSpec::new("submarine", "Submarine", 3),
    ShipSpec::new("patrolboat", "Patrol Boat", 2),
];

/// Total number of ship segments in a full fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Random placement gives up on a ship after this many candidates.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Registry entry for `key`.
pub fn ship_spec(key: &str) -> Option<&'static ShipSpec> {
    SHIPS.iter().find(|s| s.key() == key)
}

pub fn is_valid_key(key: &str) -> bool {
    ship_spec(key).is_some()
}

/// Required length for `key`, if registered.
pub fn length_for(key: &str) -> Option<usize> {
    ship_spec(key).map(ShipSpec::length)
}

/// Canonical static form of a registry key.
pub fn ship_key_static(key: &str) -> Option<&'static str> {
    ship_spec(key).map(ShipSpec::key)
}

/// Build an unplaced ship for a registry key.
pub fn ship_for_key(key: &str) -> Result<Ship, EngineError> {
    ship_spec(key)
        .map(ShipSpec::build)
        .ok_or_else(|| EngineError::UnknownShipKey(key.into()))
}

/// Longest ship in the registry.
pub fn longest_ship() -> usize {
    SHIPS.iter().map(ShipSpec::length).max().unwrap_or(0)
}

/// Settings for a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchConfig {
    pub rows: usize,
    pub cols: usize,
    pub starting: Side,
    /// Fixed RNG seed for reproducible games; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_SIZE,
            cols: BOARD_SIZE,
            starting: Side::A,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Reject boards that are empty or too small to hold the longest ship.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(EngineError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.rows.max(self.cols) < longest_ship() || self.rows * self.cols < TOTAL_SHIP_CELLS {
            return Err(EngineError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}
