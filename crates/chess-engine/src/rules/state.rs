//! Check, checkmate and stalemate, now and one move ahead.

use crate::movegen::{apply_move, is_square_attacked, pseudo_legal_moves, MoveList};
use crate::Board;
use chess_core::{Color, Item, MoveOption};

/// Returns true if `color`'s king is attacked. A side without a king is
/// never in check.
pub fn is_check(board: &Board, color: Color) -> bool {
    board
        .king(color)
        .is_some_and(|king| is_square_attacked(board, king.coord, color))
}

/// Returns true if `color` is in check and no pseudo-legal move of any of
/// its items gets out of it.
///
/// Castling candidates are generated without transit safety here.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    is_check(board, color) && !has_escape(board, color)
}

/// Returns true if `color` is not in check but every move would put it
/// there.
pub fn is_stalemate(board: &Board, color: Color) -> bool {
    !is_check(board, color) && !has_escape(board, color)
}

/// Returns true if `color` would be in check after `m`.
pub fn will_be_check(board: &Board, color: Color, m: &MoveOption) -> bool {
    is_check(&apply_move(board, m), color)
}

/// Returns true if `color` would be checkmated after `m`.
pub fn will_be_checkmate(board: &Board, color: Color, m: &MoveOption) -> bool {
    let next = apply_move(board, m);
    is_check(&next, color) && !has_escape(&next, color)
}

/// Returns true if `color` would be stalemated after `m`.
pub fn will_be_stalemate(board: &Board, color: Color, m: &MoveOption) -> bool {
    let next = apply_move(board, m);
    !is_check(&next, color) && !has_escape(&next, color)
}

/// Returns the moves of `item` that do not leave its own king in check.
pub fn legal_move_options(item: &Item, board: &Board) -> MoveList {
    let mut moves = pseudo_legal_moves(item, board, true);
    moves.retain(|m| !will_be_check(board, item.color, m));
    moves
}

/// Returns every legal move of `color`, in item order.
pub fn all_legal_moves(board: &Board, color: Color) -> MoveList {
    board
        .items_of(color)
        .flat_map(|item| legal_move_options(item, board))
        .collect()
}

/// Returns true if some item of `color` has a pseudo-legal move after which
/// `color` is not in check.
fn has_escape(board: &Board, color: Color) -> bool {
    board.items_of(color).any(|item| {
        pseudo_legal_moves(item, board, false)
            .iter()
            .any(|m| !will_be_check(board, color, m))
    })
}
