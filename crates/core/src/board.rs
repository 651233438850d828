//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or hold the kind of
//! the piece that locked there. Uses a flat array for cache locality and
//! zero-allocation row removal.
//! Coordinates: (x, y) where x is the column (0..9, left to right) and y is
//! the row (0..19, top to bottom).

use arrayvec::ArrayVec;

use crate::pieces::Bitmap;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices, at most one entry per board row
pub type RowSet = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// Row-major view of the board used by snapshots
pub type Grid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Result of writing a piece into the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOutcome {
    /// Every occupied cell was written
    Placed,
    /// At least one occupied cell maps above the visible board; nothing was written
    AboveBoard,
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Indices of all complete rows, scanned top to bottom
    pub fn full_rows(&self) -> RowSet {
        (0..BOARD_HEIGHT as usize)
            .filter(|&y| self.is_row_full(y))
            .map(|y| y as u8)
            .collect()
    }

    /// Collision check: can `bitmap` sit with its top-left corner at (x, y)?
    ///
    /// Occupied cells must stay inside the side walls and above the floor, and
    /// must not overlap a filled cell. Cells above the visible board (y < 0)
    /// never collide.
    pub fn can_place(&self, bitmap: &Bitmap, x: i8, y: i8) -> bool {
        bitmap.cells().all(|(dx, dy)| {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px >= BOARD_WIDTH as i8 || py >= BOARD_HEIGHT as i8 {
                return false;
            }
            py < 0 || !self.is_occupied(px, py)
        })
    }

    /// Write the occupied cells of `bitmap` at (x, y) with `kind`.
    ///
    /// If any occupied cell lies above the board the write is refused as a
    /// whole and the board is left untouched.
    pub fn lock(&mut self, bitmap: &Bitmap, x: i8, y: i8, kind: PieceKind) -> LockOutcome {
        if bitmap.cells().any(|(_, dy)| y + dy < 0) {
            return LockOutcome::AboveBoard;
        }

        for (dx, dy) in bitmap.cells() {
            self.set(x + dx, y + dy, Some(kind));
        }

        LockOutcome::Placed
    }

    /// Remove the given rows and shift everything above them down, filling the
    /// top with empty rows. Rows that are out of range are ignored.
    ///
    /// Uses a two-pointer pass from the bottom up, no allocation.
    pub fn remove_rows(&mut self, rows: &[u8]) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;
        let mut removed = 0;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if rows.contains(&(read_y as u8)) {
                removed += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                let dst_start = write_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, dst_start);
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        removed
    }

    /// Copy of this board with `rows` already removed
    pub fn with_rows_removed(&self, rows: &[u8]) -> Board {
        let mut settled = self.clone();
        settled.remove_rows(rows);
        settled
    }

    /// Row-major grid copy
    pub fn rows(&self) -> Grid {
        let mut grid = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.write_grid(&mut grid);
        grid
    }

    /// Write the board into an existing grid without allocating
    pub fn write_grid(&self, out: &mut Grid) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * width..(y + 1) * width]);
        }
    }

    /// Check if every cell is empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Build a board from a row-major grid
    pub fn from_grid(grid: &Grid) -> Self {
        let width = BOARD_WIDTH as usize;
        let mut cells = [None; BOARD_SIZE];
        for (y, row) in grid.iter().enumerate() {
            cells[y * width..(y + 1) * width].copy_from_slice(row);
        }
        Self { cells }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
