//! Engine module - owns the complete game state
//!
//! Ties together the board, pieces, piece source, scoring and the deferred
//! effect timeline. Every mutation happens synchronously inside a command
//! call or inside [`Engine::advance_time`]; the engine holds no threads and
//! reads no clock.
//!
//! Commands that cannot apply right now (blocked by a wall, paused, game
//! over, a hard drop still settling) return `false` and change nothing.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::board::{Board, LockOutcome, RowSet};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::pieces::ActivePiece;
use crate::rng::PieceSource;
use crate::scoring::{level_up, line_clear_points, next_fall_interval};
use crate::snapshot::{GameSnapshot, Position};
use crate::timeline::{DeferredEffect, Timeline};
use crate::types::{Direction, GameAction, PieceKind};

/// Record of the most recent lock, consumed by observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    /// Anchor the piece was locked at
    pub position: Position,
    pub lines_cleared: u32,
    pub points: u32,
    /// New level, when this lock crossed a level bracket
    pub level_up: Option<u32>,
    pub game_over: bool,
}

/// The game engine
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    board: Board,
    active: Option<ActivePiece>,
    queued: Option<PieceKind>,
    pieces: PieceSource,
    /// Lowest legal anchor for the active piece, refreshed when it moves
    ghost: Option<Position>,
    /// Complete rows still physically on the board, awaiting removal
    clearing: RowSet,
    timeline: Timeline,
    last_event: Option<LockEvent>,
    score: u32,
    lines: u32,
    level: u32,
    fall_interval_ms: f64,
    paused: bool,
    game_over: bool,
    hard_dropping: bool,
    started: bool,
}

impl Engine {
    /// Create an engine with the given configuration. No game runs until [`Engine::start`].
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    /// Default configuration with a fixed piece seed
    pub fn with_seed(seed: u64) -> Self {
        Self::from_valid_config(EngineConfig::default().with_seed(seed))
    }

    fn from_valid_config(config: EngineConfig) -> Self {
        let pieces = PieceSource::from_seed_option(config.seed);
        let fall_interval_ms = config.initial_fall_interval_ms;

        Self {
            config,
            board: Board::new(),
            active: None,
            queued: None,
            pieces,
            ghost: None,
            clearing: ArrayVec::new(),
            timeline: Timeline::new(),
            last_event: None,
            score: 0,
            lines: 0,
            level: 1,
            fall_interval_ms,
            paused: false,
            game_over: false,
            hard_dropping: false,
            started: false,
        }
    }

    /// Begin a fresh game, discarding any game in progress and its pending effects
    pub fn start(&mut self) {
        self.board.clear();
        self.clearing.clear();
        self.timeline.clear();
        self.last_event = None;
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.fall_interval_ms = self.config.initial_fall_interval_ms;
        self.paused = false;
        self.game_over = false;
        self.hard_dropping = false;

        let active = ActivePiece::spawn(self.pieces.draw());
        self.active = Some(active);
        self.queued = Some(self.pieces.draw());
        self.started = true;
        self.refresh_ghost();

        info!(
            active = ?active.kind,
            queued = ?self.queued,
            seed = ?self.pieces.seed(),
            "game started"
        );
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn is_hard_dropping(&self) -> bool {
        self.hard_dropping
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn queued(&self) -> Option<PieceKind> {
        self.queued
    }

    /// Lowest legal anchor for the active piece
    pub fn ghost(&self) -> Option<Position> {
        self.ghost
    }

    /// Rows marked complete and waiting to be removed
    pub fn rows_being_cleared(&self) -> &[u8] {
        &self.clearing
    }

    /// Current gravity interval; schedulers re-read this after every soft drop
    pub fn fall_interval_ms(&self) -> f64 {
        self.fall_interval_ms
    }

    /// Milliseconds until the next deferred effect fires, if any is pending
    pub fn next_deferred_in_ms(&self) -> Option<u64> {
        self.timeline.next_due_in()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);

        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.active = self.active;
        out.queued = self.queued;
        out.ghost = self.ghost;
        out.rows_being_cleared = self.clearing.clone();
        out.fall_interval_ms = self.fall_interval_ms;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.hard_dropping = self.hard_dropping;
        out.started = self.started;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Gameplay commands run only in a live, unpaused, settled game
    fn accepts_commands(&self) -> bool {
        self.started && !self.paused && !self.game_over && !self.hard_dropping
    }

    /// Move the active piece one column. `step` must be -1 or 1.
    pub fn move_horizontal(&mut self, step: i8) -> Result<bool> {
        let direction = Direction::from_step(step).ok_or(EngineError::InvalidDirection(step))?;
        Ok(self.move_piece(direction))
    }

    /// Move the active piece one column in `direction`
    pub fn move_piece(&mut self, direction: Direction) -> bool {
        if !self.accepts_commands() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let candidate = active.moved(direction.step(), 0);
        if !self.fits(&candidate) {
            return false;
        }

        self.active = Some(candidate);
        self.refresh_ghost();
        true
    }

    /// Rotate the active piece clockwise in place; no kicks
    pub fn rotate(&mut self) -> bool {
        if !self.accepts_commands() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let candidate = active.rotated();
        if !self.fits(&candidate) {
            return false;
        }

        self.active = Some(candidate);
        self.refresh_ghost();
        true
    }

    /// Move the active piece down one row, locking it if it cannot fall
    pub fn soft_drop(&mut self) -> bool {
        if !self.accepts_commands() || !self.clearing.is_empty() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let candidate = active.moved(0, 1);
        if self.fits(&candidate) {
            self.active = Some(candidate);
            self.refresh_ghost();
        } else {
            self.lock_piece(active.x, active.y);
        }
        true
    }

    /// Lock the active piece at its ghost position
    pub fn hard_drop(&mut self) -> bool {
        if !self.accepts_commands() || !self.clearing.is_empty() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let landing = self.compute_ghost(&active);
        self.hard_dropping = true;
        debug!(kind = ?active.kind, x = landing.x, y = landing.y, "hard drop");

        self.lock_piece(landing.x, landing.y);
        self.defer(DeferredEffect::ReleaseHardDrop, self.config.hard_drop_settle_ms);
        true
    }

    /// Flip the pause flag. Ignored before start and after game over.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.started || self.game_over {
            return false;
        }
        self.paused = !self.paused;
        debug!(paused = self.paused, "pause toggled");
        true
    }

    /// Advance the logical clock and run every deferred effect that came due.
    ///
    /// Runs while paused and after game over: scheduled effects always complete.
    pub fn advance_time(&mut self, elapsed_ms: u32) {
        for effect in self.timeline.advance(elapsed_ms) {
            self.apply_effect(effect);
        }
    }

    /// Apply a presentation intent
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(Direction::Left),
            GameAction::MoveRight => self.move_piece(Direction::Right),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::Start => {
                self.start();
                true
            }
        }
    }

    /// While rows are clearing the piece must fit both before and after their removal.
    fn fits(&self, piece: &ActivePiece) -> bool {
        if !self.board.can_place(&piece.bitmap, piece.x, piece.y) {
            return false;
        }
        self.clearing.is_empty()
            || self
                .board
                .with_rows_removed(&self.clearing)
                .can_place(&piece.bitmap, piece.x, piece.y)
    }

    fn compute_ghost(&self, piece: &ActivePiece) -> Position {
        let mut y = piece.y;
        while self.board.can_place(&piece.bitmap, piece.x, y + 1) {
            y += 1;
        }
        Position { x: piece.x, y }
    }

    fn refresh_ghost(&mut self) {
        self.ghost = self.active.map(|piece| self.compute_ghost(&piece));
    }

    fn defer(&mut self, effect: DeferredEffect, delay_ms: u32) {
        if let Some(overflow) = self.timeline.schedule(effect, delay_ms) {
            self.apply_effect(overflow);
        }
    }

    fn apply_effect(&mut self, effect: DeferredEffect) {
        match effect {
            DeferredEffect::RemoveClearedRows => {
                let removed = self.board.remove_rows(&self.clearing);
                self.clearing.clear();
                self.refresh_ghost();
                debug!(removed, "cleared rows removed");
            }
            DeferredEffect::ReleaseHardDrop => {
                self.hard_dropping = false;
            }
        }
    }

    /// Lock the active piece with its anchor at (x, y), then clear lines and
    /// bring in the queued piece.
    fn lock_piece(&mut self, x: i8, y: i8) {
        let Some(active) = self.active else {
            return;
        };
        let position = Position { x, y };

        if self.board.lock(&active.bitmap, x, y, active.kind) == LockOutcome::AboveBoard {
            self.game_over = true;
            self.last_event = Some(LockEvent {
                kind: active.kind,
                position,
                lines_cleared: 0,
                points: 0,
                level_up: None,
                game_over: true,
            });
            info!(
                score = self.score,
                lines = self.lines,
                level = self.level,
                "game over: locked above the board"
            );
            return;
        }

        let (lines_cleared, points, new_level) = self.mark_complete_rows();
        debug!(kind = ?active.kind, x, y, lines_cleared, "piece locked");

        self.promote_queued();

        self.last_event = Some(LockEvent {
            kind: active.kind,
            position,
            lines_cleared,
            points,
            level_up: new_level,
            game_over: self.game_over,
        });
    }

    /// First phase of a line clear: flag complete rows, score them and
    /// schedule their removal. The board keeps the rows until then.
    fn mark_complete_rows(&mut self) -> (u32, u32, Option<u32>) {
        let rows = self.board.full_rows();
        if rows.is_empty() {
            return (0, 0, None);
        }

        let count = rows.len() as u32;
        let points = line_clear_points(rows.len(), self.level);
        self.score = self.score.saturating_add(points);

        let old_lines = self.lines;
        self.lines += count;

        let new_level = level_up(old_lines, self.lines, self.config.lines_per_level);
        if let Some(level) = new_level {
            self.level = level;
            self.fall_interval_ms = next_fall_interval(
                self.fall_interval_ms,
                self.config.speed_decay,
                self.config.min_fall_interval_ms,
            );
            info!(level, fall_interval_ms = self.fall_interval_ms, "level up");
        }

        info!(rows = ?rows.as_slice(), points, total = self.score, "lines cleared");

        self.clearing = rows;
        self.defer(DeferredEffect::RemoveClearedRows, self.config.line_clear_delay_ms);

        (count, points, new_level)
    }

    /// Make the queued piece active at the spawn anchor and draw a new queued piece.
    ///
    /// Spawning into occupied cells ends the game. Rows that are about to be
    /// removed do not count as occupied. Spawn anchors sit at y = 0, so this is
    /// the only game-over path normal play reaches; the above-board lock is a fallback.
    fn promote_queued(&mut self) {
        let kind = match self.queued.take() {
            Some(kind) => kind,
            None => self.pieces.draw(),
        };
        let piece = ActivePiece::spawn(kind);
        self.queued = Some(self.pieces.draw());

        let spawn_clear = if self.clearing.is_empty() {
            self.fits(&piece)
        } else {
            self.board
                .with_rows_removed(&self.clearing)
                .can_place(&piece.bitmap, piece.x, piece.y)
        };

        self.active = Some(piece);
        self.refresh_ghost();

        if !spawn_clear {
            self.game_over = true;
            info!(
                score = self.score,
                lines = self.lines,
                level = self.level,
                "game over: spawn blocked"
            );
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_seed(1)
    }
}
