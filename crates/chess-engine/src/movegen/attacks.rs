//! Offset tables and the attack oracle.

use super::pseudo_legal_moves;
use crate::Board;
use chess_core::{Color, Coord};

/// Knight jumps as `(file, rank)` deltas.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// King steps as `(file, rank)` deltas.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = KING_OFFSETS;

/// Returns true if any item of the color opposing `defending` has a
/// pseudo-legal move onto `coord`.
///
/// Opposing moves are generated without castling safety. Pawn pushes count,
/// so a square straight ahead of an enemy pawn is reported as attacked.
pub fn is_square_attacked(board: &Board, coord: Coord, defending: Color) -> bool {
    board
        .items_of(defending.opposite())
        .any(|item| pseudo_legal_moves(item, board, false).targets(coord))
}
