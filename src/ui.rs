#![cfg(feature = "std")]

//! Terminal rendering and coordinate parsing for the command-line binaries.

use std::fmt::Write as _;
use std::string::String;

use crate::common::{Coord, ShotState};
use crate::grid::{Cell, Grid, GridCell, ShipCell};
use crate::manager::BoardUpdater;
use crate::player::Player;

/// Column label in spreadsheet style: `A`..`Z`, then `AA`, `AB`, ...
pub fn column_label(x: usize) -> String {
    let mut rev = String::new();
    let mut n = x;
    loop {
        rev.push(char::from(b'A' + (n % 26) as u8));
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    rev.chars().rev().collect()
}

/// Inverse of [`column_label`]; case-insensitive. `None` on non-letters or overflow.
pub fn column_index(label: &str) -> Option<usize> {
    if label.is_empty() {
        return None;
    }
    let mut acc: usize = 0;
    for ch in label.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        acc = acc.checked_mul(26)?.checked_add(digit)?;
    }
    Some(acc - 1)
}

/// Human-friendly label: column letters then one-based row, e.g. `B5`.
pub fn coord_to_string(pos: Coord) -> String {
    format!("{}{}", column_label(pos.x), pos.y + 1)
}

/// Parse either `A5` style (column letters, one-based row) or `x,y` (zero-based).
pub fn parse_coord(input: &str, rows: usize, cols: usize) -> Result<Coord, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    if let Some((xs, ys)) = input.split_once(',') {
        let x: usize = xs
            .trim()
            .parse()
            .map_err(|_| format!("Invalid column '{}'", xs.trim()))?;
        let y: usize = ys
            .trim()
            .parse()
            .map_err(|_| format!("Invalid row '{}'", ys.trim()))?;
        if x >= cols || y >= rows {
            return Err(format!("{},{} is out of bounds", x, y));
        }
        return Ok(Coord::new(x, y));
    }

    let split = input
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(input.len());
    let (letters, row_str) = input.split_at(split);
    if letters.is_empty() {
        return Err(format!("Invalid column in '{}' - must start with a letter", input));
    }
    let x = column_index(letters).ok_or_else(|| format!("Invalid column '{}'", letters))?;
    if x >= cols {
        return Err(format!("Column '{}' out of bounds", letters.to_ascii_uppercase()));
    }
    let row: usize = row_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number", row_str))?;
    if row == 0 || row > rows {
        return Err(format!("Row {} out of bounds - must be 1-{}", row, rows));
    }
    Ok(Coord::new(x, row - 1))
}

fn label_width(cols: usize) -> usize {
    column_label(cols.saturating_sub(1)).len()
}

fn header(out: &mut String, cols: usize) {
    let width = label_width(cols);
    out.push_str("    ");
    for c in 0..cols {
        let _ = write!(out, " {:>width$}", column_label(c), width = width);
    }
    out.push('\n');
}

/// Fleet board with ships revealed: `S` ship, `X` hit, `o` miss, `.` water.
pub fn render_fleet_board(player: &Player) -> String {
    let board: &Grid<ShipCell> = player.board();
    let width = label_width(board.cols());
    let mut out = String::new();
    header(&mut out, board.cols());
    for y in 0..board.rows() {
        let _ = write!(out, "  {:2}", y + 1);
        for x in 0..board.cols() {
            let ch = match board.get(x, y) {
                Some(cell) if cell.is_hit() => 'X',
                Some(cell) if cell.incoming() == ShotState::Miss => 'o',
                Some(cell) if cell.is_occupied() => 'S',
                _ => '.',
            };
            let _ = write!(out, " {:>width$}", ch, width = width);
        }
        out.push('\n');
    }
    for (key, ship) in player.ships() {
        let status = if ship.is_sunk() { "SUNK" } else { "Active" };
        let _ = writeln!(out, "    {} [{}] ({}): {}", ship.name(), key, ship.length(), status);
    }
    out
}

/// The local player's view of the opponent: `X` hit, `o` miss, `.` unknown.
pub fn render_shot_board(shots: &Grid<Cell<ShotState>>) -> String {
    let width = label_width(shots.cols());
    let mut out = String::new();
    header(&mut out, shots.cols());
    for y in 0..shots.rows() {
        let _ = write!(out, "  {:2}", y + 1);
        for x in 0..shots.cols() {
            let ch = match shots.get(x, y).and_then(|c| c.occupant()) {
                Some(ShotState::Hit) => 'X',
                Some(ShotState::Miss) => 'o',
                _ => '.',
            };
            let _ = write!(out, " {:>width$}", ch, width = width);
        }
        out.push('\n');
    }
    out
}

/// [`BoardUpdater`] that narrates the match on stdout.
pub struct TerminalUpdater;

impl BoardUpdater for TerminalUpdater {
    fn update_local_ship_cell(&mut self, x: usize, y: usize) {
        println!("  incoming fire at {}", coord_to_string(Coord::new(x, y)));
    }

    fn update_opponent_shot_cell(&mut self, x: usize, y: usize, state: ShotState) {
        println!("  {} marked {:?}", coord_to_string(Coord::new(x, y)), state);
    }

    fn show_status(&mut self, message: &str) {
        println!("> {}", message);
    }

    fn on_game_over(&mut self, local_player_won: bool) {
        if local_player_won {
            println!("\nVICTORY! You have sunk all enemy ships!");
        } else {
            println!("\nDEFEAT. All your ships have been destroyed.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Orientation;

    #[test]
    fn parses_letter_and_pair_forms() {
        assert_eq!(parse_coord("A1", 10, 10), Ok(Coord::new(0, 0)));
        assert_eq!(parse_coord("j10", 10, 10), Ok(Coord::new(9, 9)));
        assert_eq!(parse_coord("3, 4", 10, 10), Ok(Coord::new(3, 4)));
        assert!(parse_coord("K1", 10, 10).is_err());
        assert!(parse_coord("A0", 10, 10).is_err());
        assert!(parse_coord("10,0", 10, 10).is_err());
        assert!(parse_coord("", 10, 10).is_err());
        assert_eq!(coord_to_string(Coord::new(1, 4)), "B5");
    }

    #[test]
    fn wide_boards_get_multi_letter_columns() {
        assert_eq!(column_label(25), "Z");
        assert_eq!(column_label(26), "AA");
        assert_eq!(column_label(27), "AB");
        assert_eq!(column_label(701), "ZZ");
        assert_eq!(column_label(702), "AAA");
        for x in [0, 25, 26, 199, 702, 5000] {
            assert_eq!(column_index(&column_label(x)), Some(x));
        }
        assert_eq!(column_index("a1"), None);
        assert_eq!(parse_coord("ab3", 10, 30), Ok(Coord::new(27, 2)));
        assert!(parse_coord("AE1", 10, 30).is_err());
        assert!(parse_coord("5", 10, 30).is_err());
    }

    #[test]
    fn renders_two_hundred_columns() {
        let shots: Grid<Cell<ShotState>> = Grid::new(10, 200).unwrap();
        let out = render_shot_board(&shots);
        let header = out.lines().next().unwrap();
        assert!(header.ends_with(" GR"));
        assert!(!header.contains('['));
        let first_row = out.lines().nth(1).unwrap();
        assert_eq!(first_row.len(), header.len());
    }

    #[test]
    fn fleet_board_shows_ships() {
        let mut player = Player::new(10, 10).unwrap();
        player
            .place_ship("patrolboat", Coord::new(0, 0), Orientation::Horizontal)
            .unwrap();
        let out = render_fleet_board(&player);
        let first_row = out.lines().nth(1).unwrap();
        assert!(first_row.starts_with("   1 S S ."));
        assert!(out.contains("Patrol Boat [patrolboat] (2): Active"));
    }
}
