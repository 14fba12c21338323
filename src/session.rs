//! End-to-end game flow: theme -> curation -> allocation -> board.
//!
//! ```no_run
//! use std::sync::Arc;
//! use theme_sweeper::{
//!     Coord, CurationConfig, GameSession, MemoryCredentialStore, StaticGenerator, SweeperConfig,
//! };
//!
//! # async fn play() -> Result<(), theme_sweeper::SessionError> {
//! let generator = StaticGenerator::new(["Li Bai", "Du Fu"], ["Su Shi"]);
//! let credentials = Arc::new(MemoryCredentialStore::with_token("offline"));
//! let config = SweeperConfig::new()
//!     .with_curation(CurationConfig::new(2, 1, 1))
//!     .with_seed(7);
//! let mut session = GameSession::new(config, generator, credentials)?;
//!
//! session.start("Tang dynasty poets", "en").await?;
//! session.reveal(Coord::new(0, 0));
//! println!("{:?}", session.snapshot().status);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tracing::info;

use crate::board::{Board, BoardSnapshot, GameStatus};
use crate::concepts::{allocate, ConceptPool, Curator};
use crate::core::{Coord, GameRng, GameRngState, SweeperConfig};
use crate::credentials::CredentialStore;
use crate::error::SessionError;
use crate::generation::ConceptGenerator;

/// One player's game: owns the curator, the board and their RNG streams.
pub struct GameSession<G> {
    config: SweeperConfig,
    seed: u64,
    curator: Curator<G>,
    board: Board,
    allocation_rng: GameRng,
    credentials: Arc<dyn CredentialStore>,
    theme: Option<String>,
    pool: Option<ConceptPool>,
}

impl<G: ConceptGenerator> GameSession<G> {
    /// Create a session. Fails if `config` is invalid.
    pub fn new(config: SweeperConfig, generator: G, credentials: Arc<dyn CredentialStore>) -> Result<Self, SessionError> {
        config.validate()?;
        let root = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        info!(seed = root.seed(), "session created");

        Ok(Self {
            config,
            seed: root.seed(),
            curator: Curator::new(generator, Arc::clone(&credentials), root.for_context("curator")),
            board: Board::new(root.for_context("board")),
            allocation_rng: root.for_context("allocator"),
            credentials,
            theme: None,
            pool: None,
        })
    }

    /// Curate concepts for `theme` and deal a fresh board.
    ///
    /// On failure the previous board, if any, is left untouched.
    pub async fn start(&mut self, theme: &str, language: &str) -> Result<BoardSnapshot, SessionError> {
        let theme = theme.trim();
        if theme.is_empty() {
            return Err(SessionError::EmptyTheme);
        }

        let pool = self.curator.curate(theme, language, &self.config.curation).await?;
        self.deal(&pool)?;
        info!(theme, related = pool.related().len(), confusing = pool.confusing().len(), "game started");

        self.theme = Some(theme.to_string());
        self.pool = Some(pool);
        Ok(self.board.snapshot())
    }

    /// Deal a new board from the last curated pool without generating again.
    ///
    /// Unlike [`GameSession::reset`], this re-runs allocation, so a pool
    /// larger than the board contributes a different subset of concepts.
    pub fn redeal(&mut self) -> Result<BoardSnapshot, SessionError> {
        if let Some(pool) = self.pool.take() {
            let dealt = self.deal(&pool);
            self.pool = Some(pool);
            dealt?;
        }
        Ok(self.board.snapshot())
    }

    fn deal(&mut self, pool: &ConceptPool) -> Result<(), SessionError> {
        let board = self.config.board;
        let allocation = allocate(pool, board.related_count(), board.mine_count, &mut self.allocation_rng);
        self.board.initialize_with(&board, allocation.related, allocation.confusing)?;
        Ok(())
    }

    /// Reveal a cell; see [`Board::reveal`].
    pub fn reveal(&mut self, coord: Coord) -> Vec<Coord> {
        self.board.reveal(coord)
    }

    /// Toggle a flag; see [`Board::toggle_flag`].
    pub fn toggle_flag(&mut self, coord: Coord) -> bool {
        self.board.toggle_flag(coord)
    }

    /// Re-deal the same concepts with new mine positions.
    pub fn reset(&mut self) {
        self.board.reset();
    }

    /// Root seed every stream of this session derives from. Feeding it back
    /// through [`SweeperConfig::with_seed`] replays the session.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Replay point of the board's placement stream; see [`Board::rng_state`].
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.board.rng_state()
    }

    /// Rewind placement to `state`. A following [`GameSession::reset`]
    /// deals the board that followed the capture.
    pub fn restore_rng_state(&mut self, state: &GameRngState) {
        self.board.restore_rng_state(state);
    }

    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    /// The pool curated by the last successful `start`.
    #[must_use]
    pub fn pool(&self) -> Option<&ConceptPool> {
        self.pool.as_ref()
    }

    #[must_use]
    pub fn credentials(&self) -> &dyn CredentialStore {
        self.credentials.as_ref()
    }

    #[must_use]
    pub fn curator(&self) -> &Curator<G> {
        &self.curator
    }

    #[must_use]
    pub fn config(&self) -> &SweeperConfig {
        &self.config
    }
}
