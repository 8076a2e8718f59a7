//! Rules engine for relaxed chess.
//!
//! This crate provides:
//! - [`Board`] - placed items plus per-side castling and en passant state,
//!   with the JSON form exchanged with a move authority
//! - [`movegen`] - pseudo-legal move generation, the attack oracle and the
//!   board simulator
//! - [`rules`] - legality, check, checkmate and stalemate, now and one move
//!   ahead, behind the [`RuleSet`] trait
//! - [`Game`] - a game session with turn enforcement, move records and
//!   navigable history
//!
//! # Architecture
//!
//! A board is a list of items rather than a square array, and several items
//! may share a square. Move generation walks fixed offset tables per item.
//! Legality simulates each candidate on a copy and asks the attack oracle
//! whether the mover's king is attacked; the oracle in turn generates the
//! opponent's moves with castling safety switched off.
//!
//! # Example
//!
//! ```
//! use chess_engine::Game;
//! use chess_engine::rules::{is_checkmate, RuleSet, StandardChess};
//! use chess_core::Color;
//!
//! // Stateless queries on a board
//! let board = StandardChess.initial_board();
//! let moves = StandardChess.all_legal_moves(&board, Color::White);
//! println!("Legal moves from starting position: {}", moves.len());
//!
//! // A session that tracks turns and history
//! let mut game = Game::new();
//! game.play("f2", "f3", None).unwrap();
//! game.play("e7", "e5", None).unwrap();
//! game.play("g2", "g4", None).unwrap();
//! let record = game.play("d8", "h4", None).unwrap();
//! assert_eq!(record.to_string(), "queen from d8 to h4 checkmate");
//! assert!(is_checkmate(game.board(), Color::White));
//! ```

mod board;
mod game;
pub mod movegen;
mod record;
pub mod rules;

pub use board::{Board, BoardError, CastlingRights, SideState};
pub use game::{Game, GameError};
pub use movegen::{
    apply_move, commit_move, is_square_attacked, make_move, pseudo_legal_moves, MoveList,
};
pub use record::{MoveRecord, Ply};
pub use rules::{GameResult, RuleSet, StandardChess, Status};
