//! Ship definitions and the hit/sunk lifecycle of a placed ship.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::common::{Coord, EngineError};
use crate::grid::{Grid, GridCell, ShipCell};

/// Registry entry: stable key, display name and required length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipSpec {
    key: &'static str,
    name: &'static str,
    length: usize,
}

impl ShipSpec {
    pub const fn new(key: &'static str, name: &'static str, length: usize) -> Self {
        Self { key, name, length }
    }

    /// Stable identifier used in rosters and attack results.
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Build an unplaced ship of this type.
    pub fn build(&self) -> Ship {
        Ship {
            name: String::from(self.name),
            length: self.length,
            cells: Vec::new(),
            hits: vec![false; self.length],
        }
    }
}

/// A ship bound to exactly `length` board cells once placed.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    name: String,
    length: usize,
    cells: Vec<Coord>,
    hits: Vec<bool>,
}

impl Ship {
    /// Create an unplaced ship.
    pub fn new(name: impl Into<String>, length: usize) -> Result<Self, EngineError> {
        if length == 0 {
            return Err(EngineError::InvalidLength(length));
        }
        Ok(Ship {
            name: name.into(),
            length,
            cells: Vec::new(),
            hits: vec![false; length],
        })
    }

    /// Create a ship already bound to `cells`, without touching any board.
    /// The cells must be distinct.
    pub fn with_cells(
        name: impl Into<String>,
        length: usize,
        cells: Vec<Coord>,
    ) -> Result<Self, EngineError> {
        let mut ship = Ship::new(name, length)?;
        if cells.len() != length {
            return Err(EngineError::CellCountMismatch {
                expected: length,
                actual: cells.len(),
            });
        }
        if let Some(pos) = first_duplicate(&cells) {
            return Err(EngineError::DuplicateCell(pos));
        }
        ship.cells = cells;
        Ok(ship)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Bound cells, empty until placed.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn hits(&self) -> &[bool] {
        &self.hits
    }

    pub fn is_placed(&self) -> bool {
        !self.cells.is_empty()
    }

    pub fn occupies(&self, pos: Coord) -> bool {
        self.cells.contains(&pos)
    }

    /// Whether the segment at `pos` has been hit. `false` if the ship does not occupy `pos`.
    pub fn is_hit_at(&self, pos: Coord) -> bool {
        self.segment(pos).map(|i| self.hits[i]).unwrap_or(false)
    }

    /// Bind the ship to `cells` of `grid`, resetting its hit state and marking
    /// each cell as occupied by this ship. Cells it previously occupied on the
    /// same board are released.
    pub fn place_on_cells(
        &mut self,
        grid: &mut Grid<ShipCell>,
        cells: &[Coord],
    ) -> Result<(), EngineError> {
        if cells.len() != self.length {
            return Err(EngineError::CellCountMismatch {
                expected: self.length,
                actual: cells.len(),
            });
        }
        if let Some(pos) = first_duplicate(cells) {
            return Err(EngineError::DuplicateCell(pos));
        }
        for &pos in cells {
            let cell = grid.cell(pos).ok_or(EngineError::CellOutOfBounds(pos))?;
            if !cell.is_occupiable() {
                return Err(EngineError::CellUnavailable(pos));
            }
        }

        for &old in &self.cells {
            if let Some(cell) = grid.cell_mut(old) {
                if cell.occupant().map(String::as_str) == Some(self.name.as_str()) {
                    cell.clear_occupant();
                    cell.set_hit(false);
                }
            }
        }

        self.cells = cells.to_vec();
        self.hits = vec![false; self.length];
        for &pos in cells {
            if let Some(cell) = grid.cell_mut(pos) {
                cell.set_occupant(Some(self.name.clone()));
                cell.set_hit(false);
            }
        }
        Ok(())
    }

    /// Record a hit on `cell` if it is one of this ship's cells, also flagging
    /// the cell itself. Returns whether the cell belongs to this ship.
    pub fn mark_hit(&mut self, cell: &mut ShipCell) -> bool {
        if self.mark_hit_at(cell.position()) {
            cell.set_hit(true);
            true
        } else {
            false
        }
    }

    /// Record a hit by position alone.
    pub fn mark_hit_at(&mut self, pos: Coord) -> bool {
        match self.segment(pos) {
            Some(i) => {
                self.hits[i] = true;
                true
            }
            None => false,
        }
    }

    /// All segments hit. Never true for an unplaced ship.
    pub fn is_sunk(&self) -> bool {
        !self.cells.is_empty() && self.hits.iter().all(|&h| h)
    }

    fn segment(&self, pos: Coord) -> Option<usize> {
        self.cells.iter().position(|&c| c == pos)
    }
}

fn first_duplicate(cells: &[Coord]) -> Option<Coord> {
    cells
        .iter()
        .enumerate()
        .find(|&(i, pos)| cells[..i].contains(pos))
        .map(|(_, &pos)| pos)
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ name: \"{}\", length: {}, cells: {:?}, hits: {} }}",
            self.name,
            self.length,
            self.cells,
            self.hits.iter().filter(|&&h| h).count(),
        )
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.length)
    }
}
