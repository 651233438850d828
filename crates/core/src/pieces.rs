//! Pieces module - tetromino bitmaps and rotation
//!
//! Every piece is an NxN bitmap (N is 2, 3 or 4). Rotation is a single
//! clockwise quarter turn computed by transposing the bitmap and reversing
//! each row. There are no wall kicks: a rotation either fits at the same
//! anchor or is discarded by the caller.

use serde::{Deserialize, Serialize};

use crate::types::{PieceKind, BOARD_WIDTH};

/// Largest bitmap side length
pub const MAX_BITMAP_SIZE: usize = 4;

/// Spawn anchor: horizontal center, top row
pub const SPAWN_POSITION: (i8, i8) = ((BOARD_WIDTH / 2) as i8 - 1, 0);

/// Square occupancy grid for a piece, stored in the top-left corner of a 4x4 array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bitmap {
    size: u8,
    rows: [[bool; MAX_BITMAP_SIZE]; MAX_BITMAP_SIZE],
}

impl Bitmap {
    /// Build a bitmap from the first `size` rows/columns of `rows`
    pub const fn new(size: u8, rows: [[bool; MAX_BITMAP_SIZE]; MAX_BITMAP_SIZE]) -> Self {
        Self { size, rows }
    }

    /// Side length N of the NxN bitmap
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the cell at column `x`, row `y` is occupied
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        x < self.size as usize && y < self.size as usize && self.rows[y][x]
    }

    /// Occupied cells as (dx, dy) offsets from the top-left corner
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size as usize;
        (0..n).flat_map(move |y| {
            (0..n)
                .filter(move |&x| self.rows[y][x])
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// Clockwise quarter turn: transpose, then reverse each row
    pub fn rotated_cw(&self) -> Bitmap {
        let n = self.size as usize;
        let mut rows = [[false; MAX_BITMAP_SIZE]; MAX_BITMAP_SIZE];

        for (y, row) in rows.iter_mut().enumerate().take(n) {
            for (x, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.rows[x][y];
            }
            row[..n].reverse();
        }

        Bitmap {
            size: self.size,
            rows,
        }
    }
}

const X: bool = true;
const O: bool = false;

const SHAPE_I: Bitmap = Bitmap::new(
    4,
    [[O, O, O, O], [X, X, X, X], [O, O, O, O], [O, O, O, O]],
);

const SHAPE_J: Bitmap = Bitmap::new(
    3,
    [[X, O, O, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]],
);

const SHAPE_L: Bitmap = Bitmap::new(
    3,
    [[O, O, X, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]],
);

const SHAPE_O: Bitmap = Bitmap::new(
    2,
    [[X, X, O, O], [X, X, O, O], [O, O, O, O], [O, O, O, O]],
);

const SHAPE_S: Bitmap = Bitmap::new(
    3,
    [[O, X, X, O], [X, X, O, O], [O, O, O, O], [O, O, O, O]],
);

const SHAPE_T: Bitmap = Bitmap::new(
    3,
    [[O, X, O, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]],
);

const SHAPE_Z: Bitmap = Bitmap::new(
    3,
    [[X, X, O, O], [O, X, X, O], [O, O, O, O], [O, O, O, O]],
);

/// Spawn bitmap for a piece kind
pub fn shape(kind: PieceKind) -> Bitmap {
    match kind {
        PieceKind::I => SHAPE_I,
        PieceKind::J => SHAPE_J,
        PieceKind::L => SHAPE_L,
        PieceKind::O => SHAPE_O,
        PieceKind::S => SHAPE_S,
        PieceKind::T => SHAPE_T,
        PieceKind::Z => SHAPE_Z,
    }
}

/// The falling piece: kind, current (already rotated) bitmap and anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub bitmap: Bitmap,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece of `kind` at the spawn anchor
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            bitmap: shape(kind),
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Same piece shifted by (dx, dy)
    pub fn moved(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece at the same anchor, bitmap turned clockwise
    pub fn rotated(&self) -> Self {
        Self {
            bitmap: self.bitmap.rotated_cw(),
            ..*self
        }
    }

    /// Occupied board coordinates
    pub fn board_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.bitmap
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}
