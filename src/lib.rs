//! # theme-sweeper
//!
//! A themed minesweeper engine. Cells carry natural-language concepts:
//! ones related to a player-chosen theme are safe, "confusing" ones that
//! only look related are mines.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: All randomness flows from an injected `GameRng`.
//!    The same seed replays the same curation shuffles and board.
//!
//! 2. **Inert on bad input**: Board moves with stale or out-of-range
//!    coordinates do nothing instead of failing.
//!
//! 3. **Collaborators at the edges**: Generation and credential storage are
//!    traits; the OpenRouter client is one implementation.
//!
//! ## Flow
//!
//! theme + language -> `Curator` (one or more generation attempts) ->
//! `ConceptPool` -> `allocate` (fit to board size) -> `Board::initialize`
//! -> `reveal` / `toggle_flag` until `Won` or `Lost`.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, coordinates
//! - `concepts`: normalization, payload parsing, curation, allocation
//! - `board`: cells, the board state machine, snapshots
//! - `generation`: the generator contract and the OpenRouter client
//! - `credentials`: API token storage
//! - `session`: the end-to-end flow for one player

pub mod board;
pub mod concepts;
pub mod core;
pub mod credentials;
pub mod error;
pub mod generation;
pub mod session;

// Re-export commonly used types
pub use crate::core::{BoardConfig, Coord, CurationConfig, GameRng, GameRngState, SweeperConfig};

pub use crate::board::{Board, BoardSnapshot, Cell, CellState, CellView, GameStatus};

pub use crate::concepts::{
    allocate, normalize, Allocation, Category, ConceptBatch, ConceptPool, CurationState, Curator, GenerationAttempt,
    LabelMap,
};

pub use crate::credentials::{CredentialStore, EnvCredentialStore, MemoryCredentialStore};

pub use crate::error::{
    AttemptError, BoardError, ConfigError, CurationError, GenerationError, SessionError, ValidationError,
};

pub use crate::generation::{AvoidList, ConceptGenerator, GenerationRequest, StaticGenerator};

#[cfg(feature = "openrouter")]
pub use crate::generation::{OpenRouterConfig, OpenRouterGenerator};

pub use crate::session::GameSession;
