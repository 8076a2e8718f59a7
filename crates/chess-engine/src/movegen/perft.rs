//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree to a fixed depth, which
//! can be compared against known values to validate the generator, the
//! legality filter and the commit bookkeeping together.

use super::make_move;
use crate::rules::all_legal_moves;
use crate::Board;
use chess_core::Color;

/// Counts the leaf nodes at the given depth with `turn` to move.
pub fn perft(board: &Board, turn: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = all_legal_moves(board, turn);

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|m| perft(&make_move(board, m, None), turn.opposite(), depth - 1))
        .sum()
}

/// Perft with divide: the node count below each root move.
///
/// Promotions count once per move option, not once per promotion piece.
pub fn perft_divide(board: &Board, turn: Color, depth: u32) -> Vec<(String, u64)> {
    let moves = all_legal_moves(board, turn);
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        let next = make_move(board, m, None);
        let nodes = if depth > 1 {
            perft(&next, turn.opposite(), depth - 1)
        } else {
            1
        };
        results.push((m.to_string(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
