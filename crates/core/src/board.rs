//! The well: 10 columns by 20 rows of frozen blocks.
//!
//! Storage is one row-major array, so whole rows can be moved with slice
//! copies. `(x, y)` has `x` growing to the right and `y` growing downwards
//! from the top row. A falling piece may reach into rows above the top
//! (`y < 0`); those rows are never stored.

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{Cell, Rgb, BOARD_HEIGHT, BOARD_WIDTH};

const COLS: usize = BOARD_WIDTH as usize;
const ROWS: usize = BOARD_HEIGHT as usize;

/// Rows of cells, as handed to renderers.
pub type Grid = [[Cell; COLS]; ROWS];

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: [Cell; COLS * ROWS],
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [None; COLS * ROWS],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < COLS && y < ROWS).then_some(y * COLS + x)
    }

    #[inline(always)]
    fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * COLS..(y + 1) * COLS]
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// `None` off the board, otherwise the cell contents.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Some(self.cells[Self::index(x, y)?])
    }

    /// Overwrite a cell. Returns false, changing nothing, off the board.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        let Some(i) = Self::index(x, y) else {
            return false;
        };
        self.cells[i] = cell;
        true
    }

    pub fn is_empty_at(&self, x: i8, y: i8) -> bool {
        self.get(x, y) == Some(None)
    }

    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        self.get(x, y).flatten().is_some()
    }

    /// Whether `shape` with its origin at `(x, y)` fits on the board.
    ///
    /// Every filled cell must land in a column inside the board and a row
    /// above the floor. Cells in rows above the top edge are accepted without
    /// looking at the grid; cells on the grid must be empty.
    pub fn can_place(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.filled().all(|(dx, dy)| {
            // Widened so any origin is safe to offset.
            let px = i16::from(x) + i16::from(dx);
            let py = i16::from(y) + i16::from(dy);
            if !(0..COLS as i16).contains(&px) || py >= ROWS as i16 {
                return false;
            }
            py < 0 || self.is_empty_at(px as i8, py as i8)
        })
    }

    /// Write `color` into every cell covered by `shape` at origin `(x, y)`.
    ///
    /// Cells above the top edge are dropped. Returns how many were dropped.
    pub fn stamp(&mut self, shape: &Shape, x: i8, y: i8, color: Rgb) -> usize {
        let mut dropped = 0;
        for (dx, dy) in shape.filled() {
            let placed = match (x.checked_add(dx), y.checked_add(dy)) {
                (Some(px), Some(py)) => self.set(px, py, Some(color)),
                _ => false,
            };
            if !placed {
                dropped += 1;
            }
        }
        dropped
    }

    /// True when every cell of row `y` holds a block. False off the board.
    pub fn is_row_full(&self, y: usize) -> bool {
        y < ROWS && self.row(y).iter().all(Option::is_some)
    }

    /// Remove all full rows, keeping the order of the others, and refill the
    /// top with empty rows so the height never changes.
    ///
    /// Returns the indices of the removed rows, bottom to top.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, ROWS> {
        let mut cleared = ArrayVec::new();
        // Next row (from the bottom) that a kept row is copied into
        let mut dst = ROWS;

        for src in (0..ROWS).rev() {
            if self.is_row_full(src) {
                cleared.push(src);
                continue;
            }
            dst -= 1;
            if dst != src {
                self.cells.copy_within(src * COLS..(src + 1) * COLS, dst * COLS);
            }
        }
        self.cells[..dst * COLS].fill(None);

        cleared
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the board into `out` without allocating
    pub fn write_grid(&self, out: &mut Grid) {
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
    }

    pub fn from_grid(grid: &Grid) -> Self {
        let mut board = Board::new();
        for (dst, row) in board.cells.chunks_exact_mut(COLS).zip(grid) {
            dst.copy_from_slice(row);
        }
        board
    }

    pub fn to_grid(&self) -> Grid {
        let mut grid = [[None; COLS]; ROWS];
        self.write_grid(&mut grid);
        grid
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
