//! Game configuration types.
//!
//! Hosts configure a session by providing:
//! - `BoardConfig`: grid dimensions and mine count
//! - `CurationConfig`: concept quotas and the generation attempt budget
//! - `SweeperConfig`: both of the above plus an optional RNG seed
//!
//! All three deserialize from JSON, and every field falls back to the
//! classic 10x10 / 20 mine setup when omitted.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Board dimensions and mine budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    /// Number of confusing concepts placed as mines.
    pub mine_count: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            mine_count: 20,
        }
    }
}

impl BoardConfig {
    /// Create a board configuration.
    #[must_use]
    pub const fn new(rows: usize, cols: usize, mine_count: usize) -> Self {
        Self { rows, cols, mine_count }
    }

    /// Total number of cells, or `None` if `rows * cols` overflows.
    #[must_use]
    pub const fn cell_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Number of related (safe) concepts the board needs.
    #[must_use]
    pub const fn related_count(&self) -> usize {
        self.rows.saturating_mul(self.cols).saturating_sub(self.mine_count)
    }

    /// Check the grid is non-empty and the mines fit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let Some(cell_count) = self.cell_count() else {
            return Err(ConfigError::GridTooLarge {
                rows: self.rows,
                cols: self.cols,
            });
        };
        if self.mine_count > cell_count {
            return Err(ConfigError::TooManyMines {
                mines: self.mine_count,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

/// Quotas and attempt budget for concept curation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurationConfig {
    /// Minimum distinct related concepts before curation succeeds.
    pub min_related: usize,
    /// Minimum distinct confusing concepts before curation succeeds.
    pub min_confusing: usize,
    /// Maximum generation round-trips.
    pub max_attempts: u32,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            min_related: 90,
            min_confusing: 10,
            max_attempts: 3,
        }
    }
}

impl CurationConfig {
    /// Create a curation configuration.
    #[must_use]
    pub const fn new(min_related: usize, min_confusing: usize, max_attempts: u32) -> Self {
        Self {
            min_related,
            min_confusing,
            max_attempts,
        }
    }

    /// Are both running totals at or above their quotas?
    #[must_use]
    pub const fn is_satisfied(&self, related: usize, confusing: usize) -> bool {
        related >= self.min_related && confusing >= self.min_confusing
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        Ok(())
    }
}

/// Complete session configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweeperConfig {
    pub board: BoardConfig,
    pub curation: CurationConfig,
    /// Fixed seed for replayable games. `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl SweeperConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_board(mut self, board: BoardConfig) -> Self {
        self.board = board;
        self
    }

    #[must_use]
    pub fn with_curation(mut self, curation: CurationConfig) -> Self {
        self.curation = curation;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board.validate()?;
        self.curation.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_defaults() {
        let board = BoardConfig::default();
        assert_eq!(board.cell_count(), Some(100));
        assert_eq!(board.mine_count, 20);
        assert_eq!(board.related_count(), 80);
        assert!(board.validate().is_ok());
    }

    #[test]
    fn test_board_validation() {
        assert_eq!(
            BoardConfig::new(0, 5, 0).validate(),
            Err(ConfigError::EmptyGrid { rows: 0, cols: 5 })
        );
        assert_eq!(
            BoardConfig::new(2, 2, 5).validate(),
            Err(ConfigError::TooManyMines { mines: 5, rows: 2, cols: 2 })
        );
        assert!(BoardConfig::new(2, 2, 4).validate().is_ok());
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let board = BoardConfig::new(usize::MAX, 2, 1);
        assert_eq!(board.cell_count(), None);
        assert_eq!(
            board.validate(),
            Err(ConfigError::GridTooLarge { rows: usize::MAX, cols: 2 })
        );

        let json = format!(r#"{{"board": {{"rows": {}, "cols": 3}}}}"#, usize::MAX);
        let config = SweeperConfig::from_json(&json).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooLarge { rows: usize::MAX, cols: 3 })
        );
    }

    #[test]
    fn test_curation_quota() {
        let curation = CurationConfig::default();
        assert!(!curation.is_satisfied(89, 10));
        assert!(!curation.is_satisfied(90, 9));
        assert!(curation.is_satisfied(90, 10));
        assert_eq!(CurationConfig::new(1, 1, 0).validate(), Err(ConfigError::NoAttempts));
    }

    #[test]
    fn test_sweeper_config_builder() {
        let config = SweeperConfig::new()
            .with_board(BoardConfig::new(8, 8, 10))
            .with_curation(CurationConfig::new(60, 10, 5))
            .with_seed(7);

        assert_eq!(config.board.related_count(), 54);
        assert_eq!(config.curation.max_attempts, 5);
        assert_eq!(config.seed, Some(7));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = SweeperConfig::from_json(r#"{"board": {"mine_count": 15}, "seed": 3}"#).unwrap();

        assert_eq!(config.board, BoardConfig::new(10, 10, 15));
        assert_eq!(config.curation, CurationConfig::default());
        assert_eq!(config.seed, Some(3));
    }
}
