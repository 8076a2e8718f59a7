//! Board simulation: the position after a move, without bookkeeping.

use crate::Board;
use chess_core::{CastleSide, MoveOption, Piece, Special};

/// Returns the board after `m`, leaving `board` untouched.
///
/// Only item placement changes: the destination is cleared of every other
/// occupant, the mover is relocated and a castling rook follows its king. An
/// en passant capture removes the passed pawn instead and leaves whatever
/// already stands on the landing square. Side state (rights, en passant
/// marks, cached flags) is copied as is. If the moving item is not on the
/// board the result is an unchanged copy.
pub fn apply_move(board: &Board, m: &MoveOption) -> Board {
    let mut next = board.clone();
    let mover = m.item;

    if next.item(mover.id).is_none() {
        return next;
    }

    if !m.is(Special::EnPassant) {
        next.clear_square(m.to, mover.id);
    }
    if let Some(item) = next.item_mut(mover.id) {
        item.coord = m.to;
    }

    match m.special {
        Some(Special::CastleKingSide) => castle_rook(&mut next, m, CastleSide::KingSide),
        Some(Special::CastleQueenSide) => castle_rook(&mut next, m, CastleSide::QueenSide),
        Some(Special::EnPassant) => {
            let behind = m.to.offset(0, -mover.color.pawn_direction());
            let passed = behind.and_then(|sq| {
                next.items_at(sq)
                    .find(|i| i.is(Piece::Pawn, mover.color.opposite()))
                    .map(|i| i.id)
            });
            if let Some(id) = passed {
                next.remove(id);
            }
        }
        _ => {}
    }

    next
}

/// Moves the rook carrying the castle marker for `side` next to the king.
fn castle_rook(board: &mut Board, m: &MoveOption, side: CastleSide) {
    let king = m.item;
    let rook_id = board
        .items_of(king.color)
        .find(|i| i.piece == Piece::Rook && i.castle == Some(side))
        .map(|i| i.id);

    let target = match side {
        CastleSide::KingSide => m.to.offset(-1, 0),
        CastleSide::QueenSide => m.to.offset(1, 0),
    };

    if let (Some(id), Some(to)) = (rook_id, target) {
        if let Some(rook) = board.item_mut(id) {
            rook.coord = to;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::pseudo_legal_moves;
    use chess_core::{Color, Coord, Item, ItemId};

    fn sq(s: &str) -> Coord {
        Coord::from_algebraic(s).unwrap()
    }

    fn find_move(board: &Board, from: &str, to: &str) -> MoveOption {
        let item = *board.item_at(sq(from)).unwrap();
        *pseudo_legal_moves(&item, board, true)
            .find_to(sq(to))
            .unwrap()
    }

    #[test]
    fn quiet_move_relocates_item() {
        let board = Board::startpos();
        let m = find_move(&board, "g1", "f3");
        let next = apply_move(&board, &m);

        assert!(next.is_vacant(sq("g1")));
        assert!(next.item_at(sq("f3")).unwrap().is(Piece::Knight, Color::White));
        assert_eq!(next.item_at(sq("f3")).unwrap().id, m.item.id);
        assert_eq!(next.items().len(), 32);
    }

    #[test]
    fn input_board_is_unchanged() {
        let board = Board::startpos();
        let before = board.clone();
        let m = find_move(&board, "e2", "e4");
        let _ = apply_move(&board, &m);
        assert_eq!(board, before);
    }

    #[test]
    fn side_state_is_copied() {
        let board = Board::startpos();
        let m = find_move(&board, "e2", "e4");
        let next = apply_move(&board, &m);
        assert_eq!(next.side(Color::White), board.side(Color::White));
        assert_eq!(next.side(Color::White).en_passant, None);
    }

    #[test]
    fn capture_clears_every_occupant() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - -").unwrap();
        board.place(Piece::Knight, Color::Black, sq("a5"), None);
        board.place(Piece::Bishop, Color::Black, sq("a5"), None);

        let m = find_move(&board, "a1", "a5");
        let next = apply_move(&board, &m);

        let at: Vec<&Item> = next.items_at(sq("a5")).collect();
        assert_eq!(at.len(), 1);
        assert!(at[0].is(Piece::Rook, Color::White));
        assert_eq!(next.items().len(), 3);
    }

    #[test]
    fn castling_moves_marked_rook() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -").unwrap();

        let ks = find_move(&board, "e1", "g1");
        let next = apply_move(&board, &ks);
        assert!(next.item_at(sq("g1")).unwrap().is(Piece::King, Color::White));
        assert!(next.item_at(sq("f1")).unwrap().is(Piece::Rook, Color::White));
        assert!(next.is_vacant(sq("h1")));
        assert!(next.item_at(sq("a1")).is_some());

        let qs = find_move(&board, "e8", "c8");
        let next = apply_move(&board, &qs);
        assert!(next.item_at(sq("c8")).unwrap().is(Piece::King, Color::Black));
        assert!(next.item_at(sq("d8")).unwrap().is(Piece::Rook, Color::Black));
        assert!(next.is_vacant(sq("a8")));
    }

    #[test]
    fn en_passant_removes_passed_pawn() {
        let board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6").unwrap();
        let m = find_move(&board, "e5", "d6");
        assert!(m.is(Special::EnPassant));

        let next = apply_move(&board, &m);
        assert!(next.item_at(sq("d6")).unwrap().is(Piece::Pawn, Color::White));
        assert!(next.is_vacant(sq("d5")));
        assert!(next.is_vacant(sq("e5")));
        assert_eq!(next.items_of(Color::Black).count(), 1);
    }

    #[test]
    fn en_passant_spares_friendly_occupant_of_landing_square() {
        let board = Board::from_fen("4k3/8/3N4/3pP3/8/8/8/4K3 w - d6").unwrap();
        let pawn = *board.item_at(sq("e5")).unwrap();
        let m = MoveOption::with_special(pawn, sq("d6"), Some(Special::EnPassant));

        let next = apply_move(&board, &m);
        let at: Vec<&Item> = next.items_at(sq("d6")).collect();
        assert_eq!(at.len(), 2);
        assert!(at.iter().any(|i| i.is(Piece::Knight, Color::White)));
        assert!(at.iter().any(|i| i.is(Piece::Pawn, Color::White)));
        assert!(next.is_vacant(sq("d5")));
    }

    #[test]
    fn en_passant_spares_enemy_occupant_of_landing_square() {
        let board = Board::from_fen("4k3/8/3n4/3pP3/8/8/8/4K3 w - d6").unwrap();
        let pawn = *board.item_at(sq("e5")).unwrap();
        let m = *pseudo_legal_moves(&pawn, &board, true)
            .iter()
            .find(|m| m.is(Special::EnPassant))
            .unwrap();

        let next = apply_move(&board, &m);
        assert!(next.has_color_at(sq("d6"), Color::White));
        assert!(next
            .items_at(sq("d6"))
            .any(|i| i.is(Piece::Knight, Color::Black)));
        assert!(next.is_vacant(sq("d5")));
        assert_eq!(next.items_of(Color::Black).count(), 2);
    }

    #[test]
    fn unknown_item_is_a_no_op() {
        let board = Board::startpos();
        let ghost = Item {
            id: ItemId(999),
            piece: Piece::Queen,
            color: Color::White,
            coord: sq("d4"),
            castle: None,
        };
        let next = apply_move(&board, &MoveOption::new(ghost, sq("d5")));
        assert_eq!(next, board);
    }
}
