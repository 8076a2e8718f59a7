//! Legality and game state evaluation.
//!
//! The free functions in this module are the engine's rules. The
//! [`RuleSet`] trait bundles them behind one seam so a front end can be
//! written against a rule set rather than against the functions directly.

mod standard;
mod state;

pub use standard::StandardChess;
pub use state::{
    all_legal_moves, is_check, is_checkmate, is_stalemate, legal_move_options, will_be_check,
    will_be_checkmate, will_be_stalemate,
};

use crate::{Board, MoveList};
use chess_core::{Color, Item, MoveOption, Piece};
use serde::{Deserialize, Serialize};

/// Status of one side on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Normal,
    Check,
    Checkmate,
    Stalemate,
}

impl Status {
    /// Returns true if the side can no longer move.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Status::Checkmate | Status::Stalemate)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Normal => "normal",
            Status::Check => "check",
            Status::Checkmate => "checkmate",
            Status::Stalemate => "stalemate",
        };
        f.write_str(s)
    }
}

/// Evaluates the status of `color` under [`StandardChess`].
pub fn status(board: &Board, color: Color) -> Status {
    StandardChess.status(board, color)
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GameResult {
    /// The winner delivered mate.
    Checkmate { winner: Color },
    /// The side to move had no legal move and was not in check.
    Stalemate,
    /// The loser resigned.
    Resignation { winner: Color },
}

impl GameResult {
    /// Returns the winning color, or `None` for a draw.
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameResult::Checkmate { winner } | GameResult::Resignation { winner } => Some(winner),
            GameResult::Stalemate => None,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Checkmate { winner } => write!(f, "{winner} wins by checkmate"),
            GameResult::Stalemate => f.write_str("draw by stalemate"),
            GameResult::Resignation { winner } => write!(f, "{winner} wins by resignation"),
        }
    }
}

/// A set of rules the game session plays by.
///
/// # Example
///
/// ```
/// use chess_engine::rules::{RuleSet, StandardChess};
/// use chess_core::Color;
///
/// let board = StandardChess.initial_board();
/// let moves = StandardChess.all_legal_moves(&board, Color::White);
/// assert_eq!(moves.len(), 20);
/// ```
pub trait RuleSet {
    /// Returns the board a new game starts from.
    fn initial_board(&self) -> Board;

    /// Returns the legal moves of one item.
    fn legal_moves(&self, item: &Item, board: &Board) -> MoveList;

    /// Plays a move and returns the resulting board.
    fn commit(&self, board: &Board, m: &MoveOption, promotion: Option<Piece>) -> Board;

    fn is_check(&self, board: &Board, color: Color) -> bool;

    fn is_checkmate(&self, board: &Board, color: Color) -> bool;

    fn is_stalemate(&self, board: &Board, color: Color) -> bool;

    /// Returns every legal move of `color`.
    fn all_legal_moves(&self, board: &Board, color: Color) -> MoveList {
        board
            .items_of(color)
            .flat_map(|item| self.legal_moves(item, board))
            .collect()
    }

    /// Returns true if `m` is one of the legal moves of its item, with the
    /// item exactly as it stands on `board`.
    fn is_legal(&self, board: &Board, m: &MoveOption) -> bool {
        board.item(m.item.id).is_some_and(|item| {
            self.legal_moves(item, board)
                .iter()
                .any(|legal| legal == m)
        })
    }

    /// Evaluates the status of `color`.
    fn status(&self, board: &Board, color: Color) -> Status {
        if self.is_check(board, color) {
            if self.is_checkmate(board, color) {
                Status::Checkmate
            } else {
                Status::Check
            }
        } else if self.is_stalemate(board, color) {
            Status::Stalemate
        } else {
            Status::Normal
        }
    }

    /// Returns the result if `to_move` cannot continue, otherwise `None`.
    fn game_result(&self, board: &Board, to_move: Color) -> Option<GameResult> {
        match self.status(board, to_move) {
            Status::Checkmate => Some(GameResult::Checkmate {
                winner: to_move.opposite(),
            }),
            Status::Stalemate => Some(GameResult::Stalemate),
            Status::Normal | Status::Check => None,
        }
    }
}
