//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used by the engine and by any
//! presentation layer sitting on top of it. Everything here is plain data:
//! no game rules, no timing, no I/O.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn anchor**: (4, 0), the top-left of the piece bounding box
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Suggested scheduler step (~60 FPS) |
//! | `INITIAL_FALL_INTERVAL_MS` | 800 | Gravity interval at level 1 |
//! | `SPEED_DECAY` | 0.85 | Fall interval multiplier applied on level-up |
//! | `LINE_CLEAR_DELAY_MS` | 500 | Cleared rows stay visible this long |
//! | `HARD_DROP_SETTLE_MS` | 100 | Commands stay suppressed after a hard drop |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Direction, GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.color(), "purple");
//!
//! assert_eq!(Direction::from_step(-1), Some(Direction::Left));
//! assert_eq!(Direction::from_step(2), None);
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Suggested fixed scheduler step in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1
pub const INITIAL_FALL_INTERVAL_MS: f64 = 800.0;

/// Fall interval multiplier applied once per level-up
pub const SPEED_DECAY: f64 = 0.85;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// How long cleared rows remain on the board before they are removed
pub const LINE_CLEAR_DELAY_MS: u32 = 500;

/// How long movement commands stay suppressed after a hard drop
pub const HARD_DROP_SETTLE_MS: u32 = 100;

/// Line clear scoring table, indexed by `min(lines, 4) - 1`.
///
/// Points are multiplied by the current level (levels start at 1).
pub const LINE_SCORES: [u32; 4] = [40, 100, 300, 1200];

/// The seven tetromino piece kinds
///
/// Each kind carries a color identifier that is written into the board when
/// a piece of that kind locks:
/// - **I**: cyan
/// - **J**: blue
/// - **L**: orange
/// - **O**: yellow
/// - **S**: green
/// - **T**: purple
/// - **Z**: red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in declaration order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Color identifier for cells locked by this kind
    pub fn color(&self) -> &'static str {
        match self {
            PieceKind::I => "cyan",
            PieceKind::J => "blue",
            PieceKind::L => "orange",
            PieceKind::O => "yellow",
            PieceKind::S => "green",
            PieceKind::T => "purple",
            PieceKind::Z => "red",
        }
    }
}

/// Horizontal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Map a raw column step to a direction. Only `-1` and `1` are accepted.
    pub fn from_step(step: i8) -> Option<Self> {
        match step {
            -1 => Some(Direction::Left),
            1 => Some(Direction::Right),
            _ => None,
        }
    }

    /// Column offset for this direction
    pub fn step(&self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Discrete intents a presentation layer forwards to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Drop piece one row, locking it if it cannot fall
    SoftDrop,
    /// Lock the piece at its ghost position
    HardDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Toggle pause state
    TogglePause,
    /// Start a fresh game, discarding the current one
    Start,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "togglepause" | "pause" => Some(GameAction::TogglePause),
            "start" => Some(GameAction::Start),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::TogglePause => "togglePause",
            GameAction::Start => "start",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell locked by a piece of that kind
pub type Cell = Option<PieceKind>;
