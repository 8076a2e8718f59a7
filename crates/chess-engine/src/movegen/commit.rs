//! Committing a move: simulation plus the bookkeeping a real ply needs.

use super::apply_move;
use crate::rules::{is_check, is_checkmate, is_stalemate};
use crate::{Board, CastlingRights};
use chess_core::{CastleSide, Color, MoveOption, Piece, Special};
use tracing::trace;

/// Plays `m` and updates castling rights, en passant marks and promotion.
///
/// `promotion` picks the piece a `Promote` move turns into; anything that
/// is not a valid promotion target falls back to a queen. The cached
/// check/checkmate/stalemate flags are left as they were, see
/// [`commit_move`].
pub fn make_move(board: &Board, m: &MoveOption, promotion: Option<Piece>) -> Board {
    let mover = m.item;
    if board.item(mover.id).is_none() {
        return board.clone();
    }

    let mut next = apply_move(board, m);

    if m.is(Special::Promote) {
        let piece = promotion
            .filter(|p| p.is_promotion_target())
            .unwrap_or(Piece::Queen);
        if let Some(item) = next.item_mut(mover.id) {
            item.piece = piece;
        }
    }

    let rights = &mut next.side_mut(mover.color).castling;
    match m.special {
        Some(Special::ClearCastle | Special::CastleKingSide | Special::CastleQueenSide) => {
            *rights = CastlingRights::NONE;
        }
        Some(Special::ClearCastleKingSide) => rights.revoke(CastleSide::KingSide),
        Some(Special::ClearCastleQueenSide) => rights.revoke(CastleSide::QueenSide),
        _ => {}
    }

    // A captured original rook takes its owner's right with it
    for captured in board.items_at(m.to).filter(|i| i.color != mover.color) {
        if let Some(side) = captured.castle {
            next.side_mut(captured.color).castling.revoke(side);
        }
    }

    for color in Color::ALL {
        next.side_mut(color).en_passant = None;
    }
    if m.is(Special::RegisterEnPassant) {
        next.side_mut(mover.color).en_passant = Some(m.to);
    }

    next
}

/// Plays `m` like [`make_move`] and refreshes the cached status flags of
/// both sides.
pub fn commit_move(board: &Board, m: &MoveOption, promotion: Option<Piece>) -> Board {
    let mut next = make_move(board, m, promotion);

    for color in Color::ALL {
        let check = is_check(&next, color);
        let checkmate = check && is_checkmate(&next, color);
        let stalemate = !check && is_stalemate(&next, color);

        let side = next.side_mut(color);
        side.check = check;
        side.checkmate = checkmate;
        side.stalemate = stalemate;
    }

    trace!(%m, white = ?next.side(Color::White), black = ?next.side(Color::Black), "committed move");
    next
}
