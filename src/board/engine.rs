//! The board state machine.
//!
//! ```text
//! Idle --initialize--> Playing --reveal(mine)--> Lost
//!                      Playing --reveal(last safe cell)--> Won
//! Won | Lost --initialize / reset--> Playing
//! ```
//!
//! `reveal` and `toggle_flag` only act while `Playing`. Out-of-range
//! coordinates, flagged targets and moves after the game ended are inert
//! no-ops: they reflect stale input, not errors.
//!
//! The grid lives in an `im::Vector`, so `snapshot` is O(1) and the
//! snapshot never observes later moves.

use std::collections::VecDeque;

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::cell::Cell;
use super::snapshot::BoardSnapshot;
use crate::concepts::allocator;
use crate::concepts::Category;
use crate::core::{BoardConfig, Coord, GameRng, GameRngState};
use crate::error::BoardError;

/// Game progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// No board dealt yet.
    #[default]
    Idle,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    /// Has the game ended?
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

/// Minesweeper board over concept labels.
#[derive(Clone, Debug)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vector<Cell>,
    status: GameStatus,
    mine_count: usize,
    flag_count: usize,
    /// Mine positions in selection order.
    mines: Vec<Coord>,
    related: Vec<String>,
    confusing: Vec<String>,
    rng: GameRng,
}

impl Board {
    /// Create an idle board that will draw placements from `rng`.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self {
            rows: 0,
            cols: 0,
            cells: Vector::new(),
            status: GameStatus::Idle,
            mine_count: 0,
            flag_count: 0,
            mines: Vec::new(),
            related: Vec::new(),
            confusing: Vec::new(),
            rng,
        }
    }

    /// Deal a new game. Every confusing concept becomes a mine.
    ///
    /// `related` should hold `rows * cols - confusing.len()` labels; a
    /// shorter list is cycled and an empty one replaced by placeholders.
    pub fn initialize(
        &mut self,
        rows: usize,
        cols: usize,
        related: Vec<String>,
        confusing: Vec<String>,
    ) -> Result<(), BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::EmptyGrid { rows, cols });
        }
        let Some(cell_count) = rows.checked_mul(cols) else {
            return Err(BoardError::GridTooLarge { rows, cols });
        };
        if confusing.len() > cell_count {
            return Err(BoardError::TooManyMines {
                mines: confusing.len(),
                rows,
                cols,
            });
        }

        self.rows = rows;
        self.cols = cols;
        self.related = related;
        self.confusing = confusing;
        self.deal();
        Ok(())
    }

    /// Deal a board of `config`'s size from already-allocated labels.
    pub fn initialize_with(
        &mut self,
        config: &BoardConfig,
        related: Vec<String>,
        confusing: Vec<String>,
    ) -> Result<(), BoardError> {
        self.initialize(config.rows, config.cols, related, confusing)
    }

    /// Re-deal with the same size and concepts; mines move.
    ///
    /// No-op on a board that was never initialized.
    pub fn reset(&mut self) {
        if self.rows == 0 {
            return;
        }
        self.deal();
    }

    fn deal(&mut self) {
        let (rows, cols) = (self.rows, self.cols);
        // initialize checked that rows * cols fits
        let total = rows * cols;
        let mine_count = self.confusing.len();

        // Reject-and-resample until enough distinct cells are chosen
        let mut chosen = FxHashSet::default();
        let mut mines = Vec::with_capacity(mine_count);
        while mines.len() < mine_count {
            let coord = Coord::new(self.rng.gen_range_usize(0..rows), self.rng.gen_range_usize(0..cols));
            if chosen.insert(coord) {
                mines.push(coord);
            }
        }

        let mine_labels = self.rng.shuffled(&self.confusing);
        let related_shuffled = self.rng.shuffled(&self.related);
        let safe_labels = allocator::cycle(&related_shuffled, total - mine_count, Category::Related);

        let mut labels: Vec<Option<String>> = vec![None; total];
        for (coord, label) in mines.iter().zip(mine_labels) {
            labels[coord.index(cols)] = Some(label);
        }
        let mut safe_iter = safe_labels.into_iter();
        for slot in labels.iter_mut().filter(|slot| slot.is_none()) {
            *slot = safe_iter.next();
        }

        let cells: Vector<Cell> = labels
            .into_iter()
            .enumerate()
            .map(|(index, label)| {
                let coord = Coord::from_index(index, cols);
                let is_mine = chosen.contains(&coord);
                let adjacent = if is_mine {
                    0
                } else {
                    count_adjacent(&chosen, coord, rows, cols)
                };
                Cell::new(label.unwrap_or_default(), is_mine, adjacent)
            })
            .collect();

        self.cells = cells;
        self.mines = mines;
        self.mine_count = mine_count;
        self.flag_count = 0;
        self.status = GameStatus::Playing;
        info!(rows, cols, mines = mine_count, "board dealt");
    }

    /// Reveal a cell. Returns the newly revealed coordinates in reveal order.
    ///
    /// Hitting a mine reveals every mine and loses. Otherwise a breadth-first
    /// flood fill spreads from zero-count cells; numbered cells are revealed
    /// but stop the spread, flagged cells are never touched. The game is won
    /// once every safe cell is revealed.
    pub fn reveal(&mut self, coord: Coord) -> Vec<Coord> {
        if self.status != GameStatus::Playing || !coord.in_bounds(self.rows, self.cols) {
            return Vec::new();
        }
        let target = &self.cells[coord.index(self.cols)];
        if !target.is_hidden() {
            return Vec::new();
        }

        if target.is_mine() {
            let mut revealed = Vec::with_capacity(self.mines.len());
            for &mine in &self.mines {
                let cell = &mut self.cells[mine.index(self.cols)];
                if cell.is_flagged() {
                    self.flag_count -= 1;
                }
                if !cell.is_revealed() {
                    cell.reveal();
                    revealed.push(mine);
                }
            }
            self.status = GameStatus::Lost;
            info!(%coord, "mine revealed, game lost");
            return revealed;
        }

        let revealed = self.flood_reveal(coord);
        debug!(%coord, revealed = revealed.len(), "revealed cells");

        if self.all_safe_revealed() {
            self.status = GameStatus::Won;
            info!("all safe cells revealed, game won");
        }
        revealed
    }

    fn flood_reveal(&mut self, start: Coord) -> Vec<Coord> {
        let mut revealed = Vec::new();
        let mut worklist = VecDeque::new();

        self.cells[start.index(self.cols)].reveal();
        revealed.push(start);
        worklist.push_back(start);

        while let Some(coord) = worklist.pop_front() {
            if self.cells[coord.index(self.cols)].adjacent_mines() != 0 {
                continue;
            }
            for next in coord.neighbours(self.rows, self.cols) {
                let cell = &mut self.cells[next.index(self.cols)];
                if cell.is_hidden() && !cell.is_mine() {
                    cell.reveal();
                    revealed.push(next);
                    worklist.push_back(next);
                }
            }
        }
        revealed
    }

    fn all_safe_revealed(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_mine() || cell.is_revealed())
    }

    /// Flag or unflag a hidden cell. Returns whether anything changed.
    ///
    /// A new flag is refused once `flag_count` reaches `mine_count`.
    pub fn toggle_flag(&mut self, coord: Coord) -> bool {
        if self.status != GameStatus::Playing || !coord.in_bounds(self.rows, self.cols) {
            return false;
        }
        let cell = &mut self.cells[coord.index(self.cols)];
        if cell.is_revealed() {
            return false;
        }
        if cell.is_flagged() {
            cell.toggle_flag();
            self.flag_count -= 1;
            return true;
        }
        if self.flag_count >= self.mine_count {
            return false;
        }
        cell.toggle_flag();
        self.flag_count += 1;
        true
    }

    /// Read-only view for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::new(
            self.rows,
            self.cols,
            self.cells.clone(),
            self.status,
            self.mine_count,
            self.flag_count,
        )
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// `(rows, cols)`
    #[must_use]
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[must_use]
    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    #[must_use]
    pub fn flag_count(&self) -> usize {
        self.flag_count
    }

    /// Flags still available.
    #[must_use]
    pub fn remaining_flags(&self) -> usize {
        self.mine_count - self.flag_count
    }

    #[must_use]
    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        coord
            .in_bounds(self.rows, self.cols)
            .then(|| &self.cells[coord.index(self.cols)])
    }

    /// Cells in row-major order with their coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, &Cell)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (Coord::from_index(index, cols), cell))
    }

    /// Mine positions in the order they were chosen.
    #[must_use]
    pub fn mines(&self) -> &[Coord] {
        &self.mines
    }

    /// Position of the placement stream. Restoring it and calling `reset`
    /// deals the same mines again.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    pub fn restore_rng_state(&mut self, state: &GameRngState) {
        self.rng = GameRng::from_state(state);
    }
}

fn count_adjacent(mines: &FxHashSet<Coord>, coord: Coord, rows: usize, cols: usize) -> u8 {
    coord
        .neighbours(rows, cols)
        .into_iter()
        .filter(|n| mines.contains(n))
        .count() as u8
}
