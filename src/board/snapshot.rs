//! Read-only board view handed to the presentation layer.
//!
//! Mine flags stay hidden until a cell is revealed, so a host cannot leak
//! the answer by rendering a snapshot naively.

use im::Vector;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use super::cell::Cell;
use super::engine::GameStatus;
use crate::core::Coord;

/// What the host may know about one cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CellView<'a> {
    pub label: &'a str,
    /// `Some` only once the cell is revealed.
    pub is_mine: Option<bool>,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub adjacent_mines: u8,
}

impl<'a> From<&'a Cell> for CellView<'a> {
    fn from(cell: &'a Cell) -> Self {
        Self {
            label: cell.label(),
            is_mine: cell.is_revealed().then(|| cell.is_mine()),
            is_revealed: cell.is_revealed(),
            is_flagged: cell.is_flagged(),
            adjacent_mines: cell.adjacent_mines(),
        }
    }
}

/// Point-in-time copy of a board. Shares structure with the live grid.
#[derive(Clone, Debug)]
pub struct BoardSnapshot {
    rows: usize,
    cols: usize,
    cells: Vector<Cell>,
    pub status: GameStatus,
    pub mine_count: usize,
    pub flag_count: usize,
}

impl BoardSnapshot {
    pub(crate) fn new(
        rows: usize,
        cols: usize,
        cells: Vector<Cell>,
        status: GameStatus,
        mine_count: usize,
        flag_count: usize,
    ) -> Self {
        Self {
            rows,
            cols,
            cells,
            status,
            mine_count,
            flag_count,
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<CellView<'_>> {
        coord
            .in_bounds(self.rows, self.cols)
            .then(|| CellView::from(&self.cells[coord.index(self.cols)]))
    }

    /// Cell views in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellView<'_>> + '_ {
        self.cells.iter().map(CellView::from)
    }

    /// Cell views grouped by row.
    #[must_use]
    pub fn grid(&self) -> Vec<Vec<CellView<'_>>> {
        if self.cols == 0 {
            return Vec::new();
        }
        let views: Vec<_> = self.cells().collect();
        views.chunks(self.cols).map(<[CellView<'_>]>::to_vec).collect()
    }
}

impl Serialize for BoardSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BoardSnapshot", 6)?;
        state.serialize_field("rows", &self.rows)?;
        state.serialize_field("cols", &self.cols)?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field("mine_count", &self.mine_count)?;
        state.serialize_field("flag_count", &self.flag_count)?;
        state.serialize_field("grid", &self.grid())?;
        state.end()
    }
}
