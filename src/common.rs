//! Common types for the match engine: coordinates, sides, attack results and errors.

use alloc::string::String;
use core::fmt;

/// A position on a board. `x` is the column, `y` the row, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Coord { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// One of the two fixed participants of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    A,
    B,
}

impl Side {
    /// The other participant.
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// What the attacker knows about a cell of the opponent's board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotState {
    #[default]
    Unknown,
    Hit,
    Miss,
}

/// Outcome of a single attack. Exactly one variant is produced per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum AttackResult {
    /// A ship segment was hit and the ship is still afloat.
    Hit(&'static str),
    /// Nothing occupies the attacked coordinate.
    Miss,
    /// The hit sank the ship with this key.
    Sunk(&'static str),
    /// The coordinate was attacked before.
    Already,
    /// Out of turn, out of bounds, or the participants are not a valid pairing.
    Invalid,
}

impl AttackResult {
    /// Key of the ship involved, for `Hit` and `Sunk`.
    pub fn ship_key(&self) -> Option<&'static str> {
        match self {
            AttackResult::Hit(key) | AttackResult::Sunk(key) => Some(key),
            _ => None,
        }
    }

    /// Whether this result hands the turn to the other side.
    pub fn ends_turn(&self) -> bool {
        matches!(self, AttackResult::Miss | AttackResult::Sunk(_))
    }

    /// Whether the result was resolved against the defender's fleet at all.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, AttackResult::Already | AttackResult::Invalid)
    }
}

/// Errors raised while building boards, ships and fleets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Boards need at least one row and one column.
    #[error("board dimensions must be positive (rows={rows}, cols={cols})")]
    InvalidDimensions { rows: usize, cols: usize },
    /// Ships need a positive length.
    #[error("ship length must be greater than 0 (got {0})")]
    InvalidLength(usize),
    /// A ship was given a different number of cells than its length.
    #[error("ship of length {expected} cannot occupy {actual} cells")]
    CellCountMismatch { expected: usize, actual: usize },
    /// The same coordinate appears twice in a ship's cell list.
    #[error("cell {0} is listed more than once")]
    DuplicateCell(Coord),
    /// A coordinate lies outside the board.
    #[error("cell {0} is out of bounds")]
    CellOutOfBounds(Coord),
    /// A cell is either not occupiable or already taken.
    #[error("cell {0} is not available for placement")]
    CellUnavailable(Coord),
    /// Key not present in the ship registry.
    #[error("unknown ship key '{0}'")]
    UnknownShipKey(String),
    /// The roster already holds a ship under this key.
    #[error("ship '{0}' is already placed")]
    ShipAlreadyPlaced(&'static str),
    /// Random placement gave up.
    #[error("failed to place ship '{key}' after {attempts} attempts")]
    PlacementExhausted { key: &'static str, attempts: usize },
}
