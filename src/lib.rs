#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod ai;
mod common;
mod config;
mod game;
mod grid;
#[cfg(feature = "std")]
mod logging;
mod manager;
pub mod placement;
mod player;
mod ship;
#[cfg(feature = "std")]
pub mod ui;

pub use ai::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use grid::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
pub use manager::*;
pub use placement::Orientation;
pub use player::*;
pub use ship::*;
