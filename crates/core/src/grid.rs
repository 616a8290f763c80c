//! Fixed-size square grids of cells.
//!
//! The 9x9 board and the 3x3 macro-board are the same type over different
//! sizes, so the win/tie routines in [`crate::rules`] run unchanged on both.

use crate::cell::Cell;

/// An owned, value-semantic `N`x`N` grid indexed `[x][y]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Grid<const N: usize> {
    cells: [[Cell; N]; N],
}

/// The full 9x9 board.
pub type Board = Grid<9>;

/// The 3x3 summary of sub-board statuses.
pub type MacroBoard = Grid<3>;

impl<const N: usize> Grid<N> {
    /// Side length.
    pub const SIZE: usize = N;

    /// Create a grid with every cell set to `fill`.
    pub fn filled(fill: Cell) -> Self {
        Self {
            cells: [[fill; N]; N],
        }
    }

    /// Create a grid with every cell empty.
    pub fn new() -> Self {
        Self::filled(Cell::Empty)
    }

    /// Build a grid from rows indexed `[x][y]`.
    pub fn from_cells(cells: [[Cell; N]; N]) -> Self {
        Self { cells }
    }

    /// Get the cell at `(x, y)`.
    ///
    /// # Panics
    /// Panics if either coordinate is `>= N`.
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[x][y]
    }

    /// Set the cell at `(x, y)`.
    ///
    /// # Panics
    /// Panics if either coordinate is `>= N`.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[x][y] = cell;
    }

    /// Iterate over `(x, y, cell)` in x-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(x, col)| col.iter().enumerate().map(move |(y, &c)| (x, y, c)))
    }

    /// Replace every cell equal to `from` with `to`.
    pub fn replace_all(&mut self, from: Cell, to: Cell) {
        for col in self.cells.iter_mut() {
            for cell in col.iter_mut() {
                if *cell == from {
                    *cell = to;
                }
            }
        }
    }

    /// Count cells equal to `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.iter().filter(|&(_, _, c)| c == cell).count()
    }
}

impl<const N: usize> Default for Grid<N> {
    fn default() -> Self {
        Self::new()
    }
}
