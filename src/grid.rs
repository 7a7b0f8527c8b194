//! Boards as fixed rows×cols arenas of cells.
//!
//! A [`Grid`] owns every cell it holds. Cells may carry an occupant, which is a
//! lookup association only: a ship cell stores the name of the ship sitting on
//! it, a shot board stores a [`ShotState`](crate::ShotState) marker.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::common::{Coord, EngineError, ShotState};

/// Occupancy contract shared by every cell variant a board can hold.
pub trait GridCell {
    type Occupant;

    /// Build a fresh, unoccupied, occupiable cell at `pos`.
    fn at(pos: Coord) -> Self;

    fn position(&self) -> Coord;

    fn is_occupiable(&self) -> bool;

    fn set_occupiable(&mut self, occupiable: bool);

    fn occupant(&self) -> Option<&Self::Occupant>;

    /// Replace the occupant. Returns `false` and leaves the cell untouched
    /// when the cell is not occupiable.
    fn set_occupant(&mut self, occupant: Option<Self::Occupant>) -> bool;

    fn clear_occupant(&mut self);

    fn is_occupied(&self) -> bool {
        self.occupant().is_some()
    }
}

/// Plain occupancy cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell<T> {
    pos: Coord,
    occupiable: bool,
    occupant: Option<T>,
}

impl<T> GridCell for Cell<T> {
    type Occupant = T;

    fn at(pos: Coord) -> Self {
        Cell {
            pos,
            occupiable: true,
            occupant: None,
        }
    }

    fn position(&self) -> Coord {
        self.pos
    }

    fn is_occupiable(&self) -> bool {
        self.occupiable
    }

    fn set_occupiable(&mut self, occupiable: bool) {
        self.occupiable = occupiable;
    }

    fn occupant(&self) -> Option<&T> {
        self.occupant.as_ref()
    }

    fn set_occupant(&mut self, occupant: Option<T>) -> bool {
        if !self.occupiable {
            return false;
        }
        self.occupant = occupant;
        true
    }

    fn clear_occupant(&mut self) {
        self.occupant = None;
    }
}

impl<T> fmt::Display for Cell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cell({})[occ={}, occupiable={}]",
            self.pos,
            self.occupant.is_some(),
            self.occupiable
        )
    }
}

/// Cell of a fleet board: occupancy by ship name plus hit bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipCell {
    base: Cell<String>,
    hit: bool,
    incoming: ShotState,
}

impl ShipCell {
    pub fn is_hit(&self) -> bool {
        self.hit
    }

    pub fn set_hit(&mut self, hit: bool) {
        self.hit = hit;
    }

    /// Last shot received on this cell.
    pub fn incoming(&self) -> ShotState {
        self.incoming
    }

    pub fn set_incoming(&mut self, state: ShotState) {
        self.incoming = state;
    }
}

impl GridCell for ShipCell {
    type Occupant = String;

    fn at(pos: Coord) -> Self {
        ShipCell {
            base: Cell::at(pos),
            hit: false,
            incoming: ShotState::Unknown,
        }
    }

    fn position(&self) -> Coord {
        self.base.position()
    }

    fn is_occupiable(&self) -> bool {
        self.base.is_occupiable()
    }

    fn set_occupiable(&mut self, occupiable: bool) {
        self.base.set_occupiable(occupiable);
    }

    fn occupant(&self) -> Option<&String> {
        self.base.occupant()
    }

    fn set_occupant(&mut self, occupant: Option<String>) -> bool {
        self.base.set_occupant(occupant)
    }

    fn clear_occupant(&mut self) {
        self.base.clear_occupant();
    }
}

impl fmt::Display for ShipCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ShipCell({})[occ={}, hit={}, incoming={:?}]",
            self.position(),
            self.is_occupied(),
            self.hit,
            self.incoming
        )
    }
}

/// A fixed rows×cols board. Cells are stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<C> {
    rows: usize,
    cols: usize,
    cells: Vec<C>,
}

impl<C: GridCell> Grid<C> {
    /// Create a board filled with default cells of type `C`.
    pub fn new(rows: usize, cols: usize) -> Result<Self, EngineError> {
        Self::with_factory(rows, cols, |x, y| C::at(Coord::new(x, y)))
    }

    /// Create a board whose cells are produced by `factory(x, y)`.
    pub fn with_factory<F>(rows: usize, cols: usize, mut factory: F) -> Result<Self, EngineError>
    where
        F: FnMut(usize, usize) -> C,
    {
        if rows == 0 || cols == 0 {
            return Err(EngineError::InvalidDimensions { rows, cols });
        }
        let cells = (0..rows * cols)
            .map(|i| factory(i % cols, i / cols))
            .collect();
        Ok(Grid { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.cols && y < self.rows
    }

    /// Cell at (`x`, `y`), or `None` when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&C> {
        if !self.contains(x, y) {
            return None;
        }
        self.cells.get(y * self.cols + x)
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut C> {
        if !self.contains(x, y) {
            return None;
        }
        self.cells.get_mut(y * self.cols + x)
    }

    pub fn cell(&self, pos: Coord) -> Option<&C> {
        self.get(pos.x, pos.y)
    }

    pub fn cell_mut(&mut self, pos: Coord) -> Option<&mut C> {
        self.get_mut(pos.x, pos.y)
    }

    /// Visit every cell in row-major order.
    pub fn for_each<F: FnMut(&C)>(&self, f: F) {
        self.cells.iter().for_each(f);
    }

    pub fn for_each_mut<F: FnMut(&mut C)>(&mut self, f: F) {
        self.cells.iter_mut().for_each(f);
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.cells.iter()
    }

    /// Number of cells currently holding an occupant.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }
}
