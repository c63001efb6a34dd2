//! Shape tests - canonical patterns and clockwise rotation

use teratis::core::{Piece, Shape};
use teratis::types::{Color, ShapeKind};

fn art(shape: &Shape) -> Vec<String> {
    shape
        .occupancy()
        .iter()
        .map(|row| row.iter().map(|&b| if b { 'X' } else { '.' }).collect())
        .collect()
}

// ============== Canonical patterns ==============

#[test]
fn test_canonical_patterns() {
    assert_eq!(art(&Shape::new(ShapeKind::I)), vec!["X", "X", "X", "X"]);
    assert_eq!(art(&Shape::new(ShapeKind::L)), vec!["X.", "X.", "XX"]);
    assert_eq!(art(&Shape::new(ShapeKind::T)), vec!["XXX", ".X."]);
    assert_eq!(art(&Shape::new(ShapeKind::S)), vec![".XX", "XX."]);
    assert_eq!(art(&Shape::new(ShapeKind::O)), vec!["XX", "XX"]);
}

#[test]
fn test_every_shape_has_four_cells() {
    for kind in ShapeKind::ALL {
        assert_eq!(Shape::new(kind).cell_count(), 4, "{:?}", kind);
    }
}

// ============== Rotation ==============

#[test]
fn test_rotation_swaps_dimensions() {
    let t = Shape::new(ShapeKind::T).rotated();
    assert_eq!((t.rows(), t.cols()), (3, 2));
    assert_eq!(art(&t), vec![".X", "XX", ".X"]);

    let i = Shape::new(ShapeKind::I).rotated();
    assert_eq!(art(&i), vec!["XXXX"]);
}

#[test]
fn test_l_rotation_sequence() {
    let mut l = Shape::new(ShapeKind::L);
    l.rotate();
    assert_eq!(art(&l), vec!["XXX", "X.."]);
    l.rotate();
    assert_eq!(art(&l), vec!["XX", ".X", ".X"]);
    l.rotate();
    assert_eq!(art(&l), vec!["..X", "XXX"]);
}

#[test]
fn test_four_rotations_are_identity() {
    for kind in ShapeKind::ALL {
        let start = Shape::new(kind);
        let mut s = start;
        for _ in 0..4 {
            s.rotate();
        }
        assert_eq!(s, start, "{:?}", kind);
    }
}

#[test]
fn test_o_rotation_is_fixed_point() {
    let o = Shape::new(ShapeKind::O);
    assert_eq!(o.rotated(), o);
}

#[test]
fn test_rotated_leaves_original_untouched() {
    let s = Shape::new(ShapeKind::S);
    let _ = s.rotated();
    assert_eq!(art(&s), vec![".XX", "XX."]);
}

// ============== Piece ==============

#[test]
fn test_piece_spawn_anchor() {
    let p = Piece::spawn(ShapeKind::I, Color::Gold, 10);
    assert_eq!((p.x, p.y), (5, 0));
    let cells: Vec<_> = p.cells().collect();
    assert_eq!(cells, vec![(5, 0), (5, 1), (5, 2), (5, 3)]);
}
