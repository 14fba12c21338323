//! A single grid cell.

use serde::{Deserialize, Serialize};

/// Visibility of a cell. Revealed and flagged are mutually exclusive by
/// construction, and nothing transitions out of `Revealed`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

/// One grid position: a concept label plus mine/visibility state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    label: String,
    is_mine: bool,
    state: CellState,
    /// Mine neighbours, fixed when the board is dealt. Always 0 on mines.
    adjacent_mines: u8,
}

impl Cell {
    pub(crate) fn new(label: String, is_mine: bool, adjacent_mines: u8) -> Self {
        Self {
            label,
            is_mine,
            state: CellState::Hidden,
            adjacent_mines,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn is_mine(&self) -> bool {
        self.is_mine
    }

    #[must_use]
    pub fn state(&self) -> CellState {
        self.state
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.state == CellState::Revealed
    }

    #[must_use]
    pub fn is_flagged(&self) -> bool {
        self.state == CellState::Flagged
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.state == CellState::Hidden
    }

    #[must_use]
    pub fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub(crate) fn reveal(&mut self) {
        self.state = CellState::Revealed;
    }

    /// Flip between hidden and flagged. Revealed cells are left alone.
    pub(crate) fn toggle_flag(&mut self) {
        self.state = match self.state {
            CellState::Hidden => CellState::Flagged,
            CellState::Flagged => CellState::Hidden,
            CellState::Revealed => CellState::Revealed,
        };
    }
}
