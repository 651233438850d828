//! Property tests for collision, rotation and engine invariants.
//!
//! Invariants covered:
//! - Collision is mirror symmetric on a mirror symmetric board.
//! - Four clockwise rotations restore any bitmap.
//! - A hard drop locks the piece exactly at its ghost anchor.
//! - Over random play, score and lines never decrease, the level tracks the
//!   line count and every complete row on the board is marked as clearing.

use proptest::prelude::*;

use blockfall::core::board::Grid;
use blockfall::core::scoring::level_for_lines;
use blockfall::core::{shape, Bitmap, Board, Engine, GravityScheduler};
use blockfall::types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, TICK_MS};

const ACTIONS: [GameAction; 6] = [
    GameAction::MoveLeft,
    GameAction::MoveRight,
    GameAction::Rotate,
    GameAction::SoftDrop,
    GameAction::HardDrop,
    GameAction::TogglePause,
];

fn mirrored(bitmap: &Bitmap) -> Bitmap {
    let n = bitmap.size() as usize;
    let mut rows = [[false; 4]; 4];
    for (y, row) in rows.iter_mut().enumerate().take(n) {
        for (x, cell) in row.iter_mut().enumerate().take(n) {
            *cell = bitmap.is_set(n - 1 - x, y);
        }
    }
    Bitmap::new(bitmap.size(), rows)
}

fn rotated(kind: PieceKind, turns: usize) -> Bitmap {
    (0..turns).fold(shape(kind), |bitmap, _| bitmap.rotated_cw())
}

fn symmetric_board(left_half: &[bool]) -> Board {
    let width = BOARD_WIDTH as usize;
    let half = width / 2;
    let mut grid: Grid = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
    for (y, row) in grid.iter_mut().enumerate() {
        for x in 0..half {
            if left_half[y * half + x] {
                row[x] = Some(PieceKind::Z);
                row[width - 1 - x] = Some(PieceKind::Z);
            }
        }
    }
    Board::from_grid(&grid)
}

proptest! {
    #[test]
    fn collision_is_mirror_symmetric(
        left_half in prop::collection::vec(any::<bool>(), (BOARD_WIDTH as usize / 2) * BOARD_HEIGHT as usize),
        kind_idx in 0usize..7,
        turns in 0usize..4,
        x in -4i8..12,
        y in -4i8..22,
    ) {
        let board = symmetric_board(&left_half);
        let bitmap = rotated(PieceKind::ALL[kind_idx], turns);
        let mirror = mirrored(&bitmap);
        let mirror_x = BOARD_WIDTH as i8 - x - bitmap.size() as i8;

        prop_assert_eq!(
            board.can_place(&bitmap, x, y),
            board.can_place(&mirror, mirror_x, y)
        );
    }

    #[test]
    fn four_rotations_restore_bitmap(kind_idx in 0usize..7, turns in 0usize..4) {
        let start = rotated(PieceKind::ALL[kind_idx], turns);
        let back = start.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
        prop_assert_eq!(back, start);
        prop_assert_eq!(start.cells().count(), 4);
    }

    #[test]
    fn hard_drop_lands_on_ghost(
        seed in any::<u64>(),
        moves in prop::collection::vec(0usize..3, 0..12),
    ) {
        let mut engine = Engine::with_seed(seed);
        engine.start();
        for m in moves {
            engine.apply_action(ACTIONS[m]);
        }

        let piece = engine.active().unwrap();
        let ghost = engine.ghost().unwrap();
        prop_assert!(engine.hard_drop());

        let event = engine.take_last_event().unwrap();
        prop_assert_eq!(event.position, ghost);

        let landed = piece.moved(ghost.x - piece.x, ghost.y - piece.y);
        for (x, y) in landed.board_cells() {
            prop_assert_eq!(engine.board().get(x, y), Some(Some(piece.kind)));
        }
    }

    #[test]
    fn random_play_respects_core_invariants(
        seed in any::<u64>(),
        steps in prop::collection::vec((0usize..ACTIONS.len(), 0u32..40), 1..300),
    ) {
        let mut engine = Engine::with_seed(seed);
        let mut gravity = GravityScheduler::new();
        engine.start();

        for (action_idx, ticks) in steps {
            if engine.is_over() {
                break;
            }

            let before_score = engine.score();
            let before_lines = engine.lines();

            engine.apply_action(ACTIONS[action_idx]);
            for _ in 0..ticks {
                gravity.advance(&mut engine, TICK_MS);
            }

            prop_assert!(engine.score() >= before_score);
            prop_assert!(engine.lines() >= before_lines);
            prop_assert_eq!(
                engine.level(),
                level_for_lines(engine.lines(), engine.config().lines_per_level)
            );

            let full = engine.board().full_rows();
            prop_assert_eq!(full.as_slice(), engine.rows_being_cleared());
        }
    }
}
