//! Pieces tests - spawn bitmaps and clockwise rotation

use blockfall::core::pieces::{ActivePiece, SPAWN_POSITION};
use blockfall::core::{shape, Bitmap};
use blockfall::types::PieceKind;

fn cells(bitmap: &Bitmap) -> Vec<(i8, i8)> {
    bitmap.cells().collect()
}

// ============== Shape Tests ==============

#[test]
fn test_bitmap_sizes() {
    assert_eq!(shape(PieceKind::I).size(), 4);
    assert_eq!(shape(PieceKind::O).size(), 2);
    for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
        assert_eq!(shape(kind).size(), 3, "{:?}", kind);
    }
}

#[test]
fn test_every_shape_has_four_cells() {
    for kind in PieceKind::ALL {
        assert_eq!(shape(kind).cells().count(), 4, "{:?}", kind);
    }
}

#[test]
fn test_i_shape() {
    assert_eq!(cells(&shape(PieceKind::I)), vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
}

#[test]
fn test_t_shape() {
    assert_eq!(cells(&shape(PieceKind::T)), vec![(1, 0), (0, 1), (1, 1), (2, 1)]);
}

#[test]
fn test_s_and_z_shapes() {
    assert_eq!(cells(&shape(PieceKind::S)), vec![(1, 0), (2, 0), (0, 1), (1, 1)]);
    assert_eq!(cells(&shape(PieceKind::Z)), vec![(0, 0), (1, 0), (1, 1), (2, 1)]);
}

#[test]
fn test_j_and_l_shapes() {
    assert_eq!(cells(&shape(PieceKind::J)), vec![(0, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(cells(&shape(PieceKind::L)), vec![(2, 0), (0, 1), (1, 1), (2, 1)]);
}

// ============== Rotation Tests ==============

#[test]
fn test_i_rotates_to_vertical() {
    let east = shape(PieceKind::I).rotated_cw();
    assert_eq!(cells(&east), vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
}

#[test]
fn test_t_rotation_cycle() {
    let north = shape(PieceKind::T);
    let east = north.rotated_cw();
    let south = east.rotated_cw();
    let west = south.rotated_cw();

    assert_eq!(cells(&east), vec![(1, 0), (1, 1), (2, 1), (1, 2)]);
    assert_eq!(cells(&south), vec![(0, 1), (1, 1), (2, 1), (1, 2)]);
    assert_eq!(cells(&west), vec![(1, 0), (0, 1), (1, 1), (1, 2)]);
    assert_eq!(west.rotated_cw(), north);
}

#[test]
fn test_o_rotation_is_identity() {
    let o = shape(PieceKind::O);
    assert_eq!(o.rotated_cw(), o);
}

#[test]
fn test_four_rotations_restore_every_shape() {
    for kind in PieceKind::ALL {
        let start = shape(kind);
        let back = start.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
        assert_eq!(back, start, "{:?}", kind);
    }
}

// ============== Active Piece Tests ==============

#[test]
fn test_spawn_position() {
    let piece = ActivePiece::spawn(PieceKind::L);
    assert_eq!((piece.x, piece.y), SPAWN_POSITION);
    assert_eq!(SPAWN_POSITION, (4, 0));
    assert_eq!(piece.bitmap, shape(PieceKind::L));
}

#[test]
fn test_moved_and_rotated_keep_kind() {
    let piece = ActivePiece::spawn(PieceKind::S);

    let moved = piece.moved(-2, 3);
    assert_eq!((moved.x, moved.y), (2, 3));
    assert_eq!(moved.kind, PieceKind::S);

    let rotated = piece.rotated();
    assert_eq!((rotated.x, rotated.y), (piece.x, piece.y));
    assert_eq!(rotated.bitmap, shape(PieceKind::S).rotated_cw());
}

#[test]
fn test_board_cells_are_offset_by_anchor() {
    let piece = ActivePiece::spawn(PieceKind::O).moved(1, 5);
    let cells: Vec<_> = piece.board_cells().collect();
    assert_eq!(cells, vec![(5, 5), (6, 5), (5, 6), (6, 6)]);
}
