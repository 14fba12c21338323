//! The minesweeper board over concept labels.
//!
//! - `cell`: one grid position and its visibility state
//! - `engine`: dealing, reveal with flood fill, flags, win/loss
//! - `snapshot`: the read-only view exposed to hosts

pub mod cell;
pub mod engine;
pub mod snapshot;

pub use cell::{Cell, CellState};
pub use engine::{Board, GameStatus};
pub use snapshot::{BoardSnapshot, CellView};
