//! Core types: RNG, configuration, grid coordinates.
//!
//! Everything else in the crate takes these explicitly; there is no global
//! randomness and no hardcoded board size outside `BoardConfig::default`.

pub mod config;
pub mod coord;
pub mod rng;

pub use config::{BoardConfig, CurationConfig, SweeperConfig};
pub use coord::{Coord, DIRECTIONS};
pub use rng::{GameRng, GameRngState};
