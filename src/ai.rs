//! Reference opponent: random fleet placement and a shuffled, exhaustive attack order.
//!
//! The AI does not react to hit/miss feedback. Every board coordinate is
//! visited exactly once, in an order fixed when the AI is created.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::common::{Coord, EngineError};
use crate::config::{MAX_PLACEMENT_ATTEMPTS, SHIPS};
use crate::manager::OpponentHandler;
use crate::placement::Orientation;
use crate::player::Player;

/// Simple AI player with its own fleet and a pre-shuffled attack queue.
pub struct AiPlayer {
    model: Player,
    rows: usize,
    cols: usize,
    attacks: VecDeque<Coord>,
    rng: SmallRng,
}

impl AiPlayer {
    /// Create an AI for a rows×cols board. The attack order is drawn from `rng`
    /// immediately.
    pub fn new(rows: usize, cols: usize, mut rng: SmallRng) -> Result<Self, EngineError> {
        let model = Player::new(rows, cols)?;
        let mut coords: Vec<Coord> = (0..cols)
            .flat_map(|x| (0..rows).map(move |y| Coord::new(x, y)))
            .collect();
        coords.shuffle(&mut rng);
        debug!("AI attack queue holds {} coordinates", coords.len());
        Ok(AiPlayer {
            model,
            rows,
            cols,
            attacks: coords.into(),
            rng,
        })
    }

    /// Same as [`AiPlayer::new`] with a fixed seed.
    pub fn seeded(rows: usize, cols: usize, seed: u64) -> Result<Self, EngineError> {
        Self::new(rows, cols, SmallRng::seed_from_u64(seed))
    }

    /// Same as [`AiPlayer::new`] with an entropy-seeded generator.
    #[cfg(feature = "std")]
    pub fn from_entropy(rows: usize, cols: usize) -> Result<Self, EngineError> {
        let mut seed_rng = rand::rng();
        Self::new(rows, cols, SmallRng::from_rng(&mut seed_rng))
    }

    pub fn player_model(&self) -> &Player {
        &self.model
    }

    /// Place every registry ship at random, without overlap, in registry order.
    ///
    /// Fails with [`EngineError::PlacementExhausted`] when a ship cannot be
    /// placed within [`MAX_PLACEMENT_ATTEMPTS`] candidates.
    pub fn place_all_ships_randomly(&mut self) -> Result<(), EngineError> {
        place_fleet_randomly(&mut self.model, &mut self.rng)?;
        info!("AI fleet placed on {}x{} board", self.rows, self.cols);
        Ok(())
    }

    /// Next coordinate to attack, or `None` once every coordinate was used.
    pub fn pick_next_attack(&mut self) -> Option<Coord> {
        self.attacks.pop_front()
    }

    pub fn remaining_attacks(&self) -> usize {
        self.attacks.len()
    }

    /// Split into the fleet (handed to the match) and the turn driver.
    pub fn into_parts(self) -> (Player, AiOpponentHandler) {
        (
            self.model,
            AiOpponentHandler {
                attacks: self.attacks,
            },
        )
    }
}

/// Place every registry ship `player` has not placed yet at a random
/// position, in registry order.
pub fn place_fleet_randomly<R: Rng + ?Sized>(
    player: &mut Player,
    rng: &mut R,
) -> Result<(), EngineError> {
    let rows = player.board().rows();
    let cols = player.board().cols();
    for spec in SHIPS.iter() {
        let len = spec.length();
        let mut placed = player.has_placed(spec.key());
        let mut attempts = 0;
        while !placed && attempts < MAX_PLACEMENT_ATTEMPTS {
            attempts += 1;
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (span_x, span_y) = match orientation {
                Orientation::Horizontal => (cols.checked_sub(len), Some(rows - 1)),
                Orientation::Vertical => (Some(cols - 1), rows.checked_sub(len)),
            };
            // ship longer than the board in this orientation
            let (Some(max_x), Some(max_y)) = (span_x, span_y) else {
                continue;
            };
            let start = Coord::new(rng.random_range(0..=max_x), rng.random_range(0..=max_y));
            match player.place_ship(spec.key(), start, orientation) {
                Ok(()) => placed = true,
                Err(EngineError::CellUnavailable(_)) | Err(EngineError::CellOutOfBounds(_)) => {}
                Err(e) => return Err(e),
            }
        }
        if !placed {
            warn!("giving up on {} after {} attempts", spec.key(), attempts);
            return Err(EngineError::PlacementExhausted {
                key: spec.key(),
                attempts,
            });
        }
    }
    Ok(())
}

/// Drives the AI's turns for a [`GameManager`](crate::GameManager).
#[derive(Debug, Clone)]
pub struct AiOpponentHandler {
    attacks: VecDeque<Coord>,
}

impl AiOpponentHandler {
    pub fn remaining_attacks(&self) -> usize {
        self.attacks.len()
    }
}

impl OpponentHandler for AiOpponentHandler {
    fn next_attack(&mut self) -> Option<Coord> {
        let next = self.attacks.pop_front();
        match next {
            Some(pos) => info!("AI attacking {}", pos),
            None => warn!("AI has no moves left"),
        }
        next
    }

    fn should_auto_execute_turn(&self) -> bool {
        true
    }
}
