//! Match orchestration between the local player, an opponent and a presentation layer.
//!
//! [`GameManager`] resolves every attack through [`MatchController::attack`],
//! whether it comes from the local player or from an [`OpponentHandler`], and
//! reports what happened through a [`BoardUpdater`].

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use log::{debug, info, warn};

use crate::ai::AiPlayer;
use crate::common::{AttackResult, Coord, EngineError, ShotState, Side};
use crate::config::MatchConfig;
use crate::game::MatchController;
use crate::grid::{Cell, Grid, GridCell};
use crate::player::Player;

/// Presentation callbacks. Implemented by whatever renders the boards.
pub trait BoardUpdater {
    /// A cell of the local fleet board changed (it was shot at).
    fn update_local_ship_cell(&mut self, x: usize, y: usize);

    /// The local player's knowledge of an opponent cell changed.
    fn update_opponent_shot_cell(&mut self, x: usize, y: usize, state: ShotState);

    fn show_status(&mut self, message: &str);

    fn on_game_over(&mut self, local_player_won: bool);
}

/// Source of the opponent's moves.
pub trait OpponentHandler {
    /// Next coordinate the opponent fires at, `None` if it has no move.
    fn next_attack(&mut self) -> Option<Coord>;

    /// Whether the manager should play the opponent's turns by itself.
    fn should_auto_execute_turn(&self) -> bool;
}

/// A single presentation callback, as captured by [`RecordingUpdater`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    LocalShipCell { x: usize, y: usize },
    OpponentShotCell { x: usize, y: usize, state: ShotState },
    Status(String),
    GameOver { local_player_won: bool },
}

/// [`BoardUpdater`] that records every callback. Clones share one log.
#[derive(Debug, Clone, Default)]
pub struct RecordingUpdater {
    events: Rc<RefCell<Vec<BoardEvent>>>,
}

impl RecordingUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BoardEvent> {
        self.events.borrow().clone()
    }

    /// Take every event recorded so far.
    pub fn drain(&self) -> Vec<BoardEvent> {
        core::mem::take(&mut *self.events.borrow_mut())
    }

    /// Status messages only, in order.
    pub fn statuses(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                BoardEvent::Status(msg) => Some(msg.clone()),
                _ => None,
            })
            .collect()
    }
}

impl BoardUpdater for RecordingUpdater {
    fn update_local_ship_cell(&mut self, x: usize, y: usize) {
        self.events
            .borrow_mut()
            .push(BoardEvent::LocalShipCell { x, y });
    }

    fn update_opponent_shot_cell(&mut self, x: usize, y: usize, state: ShotState) {
        self.events
            .borrow_mut()
            .push(BoardEvent::OpponentShotCell { x, y, state });
    }

    fn show_status(&mut self, message: &str) {
        self.events
            .borrow_mut()
            .push(BoardEvent::Status(String::from(message)));
    }

    fn on_game_over(&mut self, local_player_won: bool) {
        self.events
            .borrow_mut()
            .push(BoardEvent::GameOver { local_player_won });
    }
}

/// Local player is always [`Side::A`], the opponent [`Side::B`].
pub struct GameManager {
    match_controller: MatchController,
    opponent_handler: Option<Box<dyn OpponentHandler>>,
    board_updater: Option<Box<dyn BoardUpdater>>,
    shots: Grid<Cell<ShotState>>,
}

const LOCAL: Side = Side::A;
const OPPONENT: Side = Side::B;

impl GameManager {
    pub fn new(
        local: Player,
        opponent: Player,
        opponent_handler: Option<Box<dyn OpponentHandler>>,
        config: &MatchConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        for player in [&local, &opponent] {
            let board = player.board();
            if board.rows() != config.rows || board.cols() != config.cols {
                return Err(EngineError::InvalidDimensions {
                    rows: board.rows(),
                    cols: board.cols(),
                });
            }
        }
        let shots = Grid::new(config.rows, config.cols)?;
        Ok(Self {
            match_controller: MatchController::new(
                local,
                opponent,
                Some(config.starting),
                config.rows,
                config.cols,
            ),
            opponent_handler,
            board_updater: None,
            shots,
        })
    }

    /// Match the local player against the reference AI, which auto-plays its turns.
    pub fn against_ai(
        local: Player,
        ai: AiPlayer,
        config: &MatchConfig,
    ) -> Result<Self, EngineError> {
        let (opponent, handler) = ai.into_parts();
        Self::new(local, opponent, Some(Box::new(handler)), config)
    }

    pub fn set_board_updater(&mut self, updater: Box<dyn BoardUpdater>) {
        self.board_updater = Some(updater);
    }

    /// Let an auto-playing opponent take the first turn if it has it.
    pub fn start(&mut self) {
        if self.match_controller.is_turn(OPPONENT) {
            self.run_opponent_turn();
        }
    }

    /// Resolve an attack by the local player. On a result that ends the local
    /// turn, an auto-playing opponent takes its whole turn before this returns.
    pub fn handle_local_attack(&mut self, x: usize, y: usize) -> AttackResult {
        if self.is_game_over() {
            self.update_status("Game over");
            return AttackResult::Invalid;
        }
        if !self.match_controller.is_turn(LOCAL) {
            self.update_status("Not your turn!");
            return AttackResult::Invalid;
        }

        let result = self.match_controller.attack(LOCAL, OPPONENT, x, y);
        self.process_attack_result(result, x, y, true);

        if self.match_controller.is_all_sunk(OPPONENT) {
            info!("local player won");
            if let Some(updater) = self.board_updater.as_mut() {
                updater.on_game_over(true);
            }
            return result;
        }

        if result.ends_turn() {
            self.run_opponent_turn();
        }
        result
    }

    /// Resolve an attack by the opponent against the local fleet.
    pub fn handle_opponent_attack(&mut self, x: usize, y: usize) -> AttackResult {
        if self.is_game_over() {
            return AttackResult::Invalid;
        }
        if !self.match_controller.is_turn(OPPONENT) {
            warn!("opponent attacked out of turn");
            return AttackResult::Invalid;
        }

        let result = self.match_controller.attack(OPPONENT, LOCAL, x, y);
        self.process_attack_result(result, x, y, false);

        if self.match_controller.is_all_sunk(LOCAL) {
            info!("opponent won");
            if let Some(updater) = self.board_updater.as_mut() {
                updater.on_game_over(false);
            }
        }
        result
    }

    /// Play the opponent's turn to completion: keep requesting moves while it
    /// holds the turn, stopping when its queue runs dry, it makes a move that
    /// resolves to `Invalid` or `Already`, or the local fleet is sunk. Returns
    /// the number of attacks made.
    pub fn run_opponent_turn(&mut self) -> usize {
        let mut fired = 0;
        while self.match_controller.is_turn(OPPONENT) && !self.is_game_over() {
            let Some(handler) = self.opponent_handler.as_mut() else {
                break;
            };
            if !handler.should_auto_execute_turn() {
                break;
            }
            let Some(pos) = handler.next_attack() else {
                warn!("opponent has no moves left, match stalled");
                self.update_status("Opponent has no moves left");
                break;
            };
            let result = self.handle_opponent_attack(pos.x, pos.y);
            fired += 1;
            if !result.is_resolved() {
                warn!("opponent move at {} resolved to {:?}, match stalled", pos, result);
                self.update_status("Opponent made an unusable move");
                break;
            }
        }
        debug!("opponent turn finished after {} attacks", fired);
        fired
    }

    fn process_attack_result(&mut self, result: AttackResult, x: usize, y: usize, local: bool) {
        match result {
            AttackResult::Invalid => self.update_status(&format!("Invalid attack at {},{}", x, y)),
            AttackResult::Already => self.update_status(&format!("Already attacked {},{}", x, y)),
            AttackResult::Miss => {
                if local {
                    self.update_opponent_board(x, y, ShotState::Miss);
                    self.update_status(&format!("Miss at {},{}", x, y));
                } else {
                    self.update_local_board(x, y);
                    self.update_status("Opponent missed");
                }
            }
            AttackResult::Hit(key) => {
                if local {
                    self.update_opponent_board(x, y, ShotState::Hit);
                    self.update_status(&format!("Hit! ({})", key));
                } else {
                    self.update_local_board(x, y);
                    self.update_status(&format!("Opponent hit your {}", key));
                }
            }
            AttackResult::Sunk(key) => {
                if local {
                    self.update_opponent_board(x, y, ShotState::Hit);
                    self.update_status(&format!("Sunk {}!", key));
                } else {
                    self.update_local_board(x, y);
                    self.update_status(&format!("Opponent sunk your {}!", key));
                }
            }
        }
    }

    fn update_local_board(&mut self, x: usize, y: usize) {
        if let Some(updater) = self.board_updater.as_mut() {
            updater.update_local_ship_cell(x, y);
        }
    }

    fn update_opponent_board(&mut self, x: usize, y: usize, state: ShotState) {
        if let Some(cell) = self.shots.get_mut(x, y) {
            cell.set_occupant(Some(state));
        }
        if let Some(updater) = self.board_updater.as_mut() {
            updater.update_opponent_shot_cell(x, y, state);
        }
    }

    fn update_status(&mut self, message: &str) {
        if let Some(updater) = self.board_updater.as_mut() {
            updater.show_status(message);
        }
    }

    pub fn is_local_player_turn(&self) -> bool {
        self.match_controller.is_turn(LOCAL)
    }

    pub fn is_game_over(&self) -> bool {
        self.match_controller.is_all_sunk(LOCAL) || self.match_controller.is_all_sunk(OPPONENT)
    }

    /// `Some(true)` if the local player won, `Some(false)` if they lost.
    pub fn winner_is_local(&self) -> Option<bool> {
        if self.match_controller.is_all_sunk(OPPONENT) {
            Some(true)
        } else if self.match_controller.is_all_sunk(LOCAL) {
            Some(false)
        } else {
            None
        }
    }

    pub fn local_player(&self) -> &Player {
        self.match_controller.player(LOCAL)
    }

    pub fn opponent_player(&self) -> &Player {
        self.match_controller.player(OPPONENT)
    }

    pub fn match_controller(&self) -> &MatchController {
        &self.match_controller
    }

    /// What the local player knows about the opponent's waters.
    pub fn shot_state(&self, x: usize, y: usize) -> ShotState {
        self.shots
            .get(x, y)
            .and_then(|c| c.occupant().copied())
            .unwrap_or_default()
    }

    pub fn shots(&self) -> &Grid<Cell<ShotState>> {
        &self.shots
    }
}
