//! The standard rule set.

use super::{state, RuleSet};
use crate::movegen::commit_move;
use crate::{Board, MoveList};
use chess_core::{Color, Item, MoveOption, Piece};

/// Standard chess movement with the engine's relaxed occupancy rules:
/// - every piece's usual movement, including castling, en passant and
///   promotion
/// - legality by simulating each move and testing the mover's king
/// - check, checkmate and stalemate detection
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChess;

impl RuleSet for StandardChess {
    fn initial_board(&self) -> Board {
        Board::startpos()
    }

    fn legal_moves(&self, item: &Item, board: &Board) -> MoveList {
        state::legal_move_options(item, board)
    }

    fn commit(&self, board: &Board, m: &MoveOption, promotion: Option<Piece>) -> Board {
        commit_move(board, m, promotion)
    }

    fn is_check(&self, board: &Board, color: Color) -> bool {
        state::is_check(board, color)
    }

    fn is_checkmate(&self, board: &Board, color: Color) -> bool {
        state::is_checkmate(board, color)
    }

    fn is_stalemate(&self, board: &Board, color: Color) -> bool {
        state::is_stalemate(board, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{GameResult, Status};
    use chess_core::Coord;

    fn sq(s: &str) -> Coord {
        Coord::from_algebraic(s).unwrap()
    }

    #[test]
    fn initial_board_is_startpos() {
        assert_eq!(StandardChess.initial_board(), Board::startpos());
    }

    #[test]
    fn is_legal_matches_generated_moves() {
        let board = StandardChess.initial_board();
        let moves = StandardChess.all_legal_moves(&board, Color::White);
        assert!(moves.iter().all(|m| StandardChess.is_legal(&board, m)));

        let pawn = *board.item_at(sq("e2")).unwrap();
        assert!(!StandardChess.is_legal(&board, &MoveOption::new(pawn, sq("e5"))));
    }

    #[test]
    fn is_legal_compares_the_item_snapshot() {
        let board = StandardChess.initial_board();
        let mut pawn = *board.item_at(sq("d7")).unwrap();
        assert!(StandardChess.is_legal(&board, &MoveOption::new(pawn, sq("d6"))));

        pawn.color = Color::White;
        assert!(!StandardChess.is_legal(&board, &MoveOption::new(pawn, sq("d6"))));
    }

    #[test]
    fn commit_plays_the_move() {
        let board = StandardChess.initial_board();
        let pawn = *board.item_at(sq("e2")).unwrap();
        let m = *StandardChess
            .legal_moves(&pawn, &board)
            .find_to(sq("e4"))
            .unwrap();
        let next = StandardChess.commit(&board, &m, None);
        assert!(next.is_vacant(sq("e2")));
        assert_eq!(next.side(Color::White).en_passant, Some(sq("e4")));
    }

    #[test]
    fn game_result_after_mate() {
        let board = Board::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - -").unwrap();
        assert_eq!(StandardChess.status(&board, Color::Black), Status::Checkmate);
        assert_eq!(
            StandardChess.game_result(&board, Color::Black),
            Some(GameResult::Checkmate {
                winner: Color::White
            })
        );
        assert_eq!(StandardChess.game_result(&Board::startpos(), Color::White), None);
    }
}
