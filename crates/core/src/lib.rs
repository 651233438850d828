//! Core game logic - a pure, command-driven falling-block engine
//!
//! This crate contains all the game rules and state transitions. It has no
//! dependencies on rendering, input devices, networking or wall-clock time,
//! which makes it:
//!
//! - **Deterministic**: a seeded engine replays the same piece sequence
//! - **Testable**: every rule is reachable from plain method calls
//! - **Portable**: any presentation layer can drive it
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, collision check, row detection and removal
//! - [`pieces`]: tetromino bitmaps and clockwise rotation
//! - [`scoring`]: line clear points, level brackets, gravity speed-up
//! - [`rng`]: uniform independent piece draws
//! - [`timeline`]: deferred one-shot effects on a logical clock
//! - [`engine`]: the state machine and its commands
//! - [`snapshot`]: read-only view for presentation layers
//! - [`scheduler`]: gravity driver that calls `soft_drop` on cadence
//! - [`config`] / [`error`]: tunables and boundary errors
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every piece is an independent draw, no bag
//! - **Rotation**: clockwise only, no wall kicks
//! - **Locking**: a piece locks when a soft drop cannot move it, or at once on hard drop
//! - **Ghost piece**: shows where the current piece will land
//! - **Line clears**: scored immediately, removed from the board after a delay
//! - **Scoring**: 40/100/300/1200 times level, level up every 10 lines
//!
//! # Example
//!
//! ```
//! use blockfall_core::Engine;
//!
//! let mut engine = Engine::with_seed(12345);
//! engine.start();
//!
//! engine.move_horizontal(1).unwrap();
//! engine.rotate();
//! engine.hard_drop();
//!
//! // Hard drop suppression lifts after a short delay.
//! engine.advance_time(100);
//!
//! let snap = engine.snapshot();
//! assert!(!snap.game_over);
//! assert!(snap.board.iter().flatten().any(|cell| cell.is_some()));
//! ```
//!
//! # Timing
//!
//! The engine never reads a clock. A caller (see [`GravityScheduler`]) calls
//! [`Engine::advance_time`] with elapsed milliseconds and calls
//! [`Engine::soft_drop`] every [`Engine::fall_interval_ms`].

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod pieces;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod snapshot;
pub mod timeline;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, LockOutcome};
pub use config::EngineConfig;
pub use engine::{Engine, LockEvent};
pub use error::{EngineError, Result};
pub use pieces::{shape, ActivePiece, Bitmap};
pub use rng::PieceSource;
pub use scheduler::GravityScheduler;
pub use scoring::line_clear_points;
pub use snapshot::{CellView, GameSnapshot, Position};
pub use timeline::{DeferredEffect, Timeline};
