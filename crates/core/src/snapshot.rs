use std::time::Duration;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::board::{Grid, RowSet};
use crate::pieces::ActivePiece;
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Board coordinate of a piece anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

/// What a presentation layer should draw in one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellView {
    Empty,
    Locked(PieceKind),
    /// Locked cell in a row that is being cleared
    Clearing(PieceKind),
    Ghost(PieceKind),
    Active(PieceKind),
}

pub type ViewGrid = [[CellView; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Read-only copy of everything a presentation layer or scheduler needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Grid,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub active: Option<ActivePiece>,
    pub queued: Option<PieceKind>,
    pub ghost: Option<Position>,
    pub rows_being_cleared: RowSet,
    pub fall_interval_ms: f64,
    pub paused: bool,
    pub game_over: bool,
    pub hard_dropping: bool,
    pub started: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.active = None;
        self.queued = None;
        self.ghost = None;
        self.rows_being_cleared = ArrayVec::new();
        self.fall_interval_ms = 0.0;
        self.paused = false;
        self.game_over = false;
        self.hard_dropping = false;
        self.started = false;
    }

    /// Whether gameplay commands currently have any effect
    pub fn playable(&self) -> bool {
        self.started && !self.game_over && !self.paused && !self.hard_dropping
    }

    /// Fall interval as a duration, for schedulers that re-arm a timer
    pub fn fall_interval(&self) -> Duration {
        Duration::from_secs_f64(self.fall_interval_ms.max(0.0) / 1000.0)
    }

    /// Board with the ghost and the active piece drawn on top.
    ///
    /// The ghost only fills empty cells. Both ghost and active piece are
    /// hidden while a hard drop is settling. Cells above the board are skipped.
    pub fn compose(&self) -> ViewGrid {
        let mut view = [[CellView::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

        for (y, row) in self.board.iter().enumerate() {
            let clearing = self.rows_being_cleared.contains(&(y as u8));
            for (x, cell) in row.iter().enumerate() {
                view[y][x] = match (cell, clearing) {
                    (Some(kind), true) => CellView::Clearing(*kind),
                    (Some(kind), false) => CellView::Locked(*kind),
                    (None, _) => CellView::Empty,
                };
            }
        }

        if self.hard_dropping {
            return view;
        }

        let Some(active) = self.active else {
            return view;
        };

        if let Some(ghost) = self.ghost {
            let shadow = ActivePiece {
                x: ghost.x,
                y: ghost.y,
                ..active
            };
            for (x, y) in shadow.board_cells() {
                if let Some(slot) = cell_mut(&mut view, x, y) {
                    if *slot == CellView::Empty {
                        *slot = CellView::Ghost(active.kind);
                    }
                }
            }
        }

        for (x, y) in active.board_cells() {
            if let Some(slot) = cell_mut(&mut view, x, y) {
                *slot = CellView::Active(active.kind);
            }
        }

        view
    }
}

fn cell_mut(view: &mut ViewGrid, x: i8, y: i8) -> Option<&mut CellView> {
    if x < 0 || y < 0 {
        return None;
    }
    view.get_mut(y as usize)?.get_mut(x as usize)
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            score: 0,
            lines: 0,
            level: 1,
            active: None,
            queued: None,
            ghost: None,
            rows_being_cleared: ArrayVec::new(),
            fall_interval_ms: 0.0,
            paused: false,
            game_over: false,
            hard_dropping: false,
            started: false,
        };
        s.clear();
        s
    }
}
