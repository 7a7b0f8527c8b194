//! Candidate-cell computation and validity for placing a ship on a board.

use alloc::vec::Vec;

use crate::common::Coord;
use crate::grid::{Grid, GridCell};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn toggle(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Coordinate of the `i`-th segment of a ship starting at `start`.
    pub fn step(self, start: Coord, i: usize) -> Coord {
        match self {
            Orientation::Horizontal => Coord::new(start.x + i, start.y),
            Orientation::Vertical => Coord::new(start.x, start.y + i),
        }
    }
}

/// Coordinates a ship of `length` would cover from `start`, ignoring bounds.
pub fn line(start: Coord, length: usize, orientation: Orientation) -> Vec<Coord> {
    (0..length).map(|i| orientation.step(start, i)).collect()
}

/// Cells a ship of `length` would cover from `start`. The run stops at the
/// board edge, so the result may be shorter than `length`.
pub fn candidate_cells<C: GridCell>(
    grid: &Grid<C>,
    start: Coord,
    length: usize,
    orientation: Orientation,
) -> Vec<Coord> {
    (0..length)
        .map(|i| orientation.step(start, i))
        .take_while(|&pos| grid.cell(pos).is_some())
        .collect()
}

/// A candidate is valid iff it has exactly `length` cells and every one of
/// them is occupiable and unoccupied.
pub fn is_candidate_valid<C: GridCell>(grid: &Grid<C>, candidate: &[Coord], length: usize) -> bool {
    candidate.len() == length
        && candidate.iter().all(|&pos| {
            grid.cell(pos)
                .map(|c| c.is_occupiable() && !c.is_occupied())
                .unwrap_or(false)
        })
}
