//! Game session management with history tracking.
//!
//! The [`Game`] struct drives a game between two sides:
//! - the side to move and turn enforcement
//! - move records for a move list
//! - board snapshots that can be stepped through
//! - opponent replies received as whole boards

use crate::record::{MoveRecord, Ply};
use crate::rules::{GameResult, RuleSet, StandardChess, Status};
use crate::{Board, MoveList};
use chess_core::{Color, Coord, CoordError, FenError, MoveOption, Piece};
use thiserror::Error;
use tracing::debug;

const RULES: StandardChess = StandardChess;

/// Error type for game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game has already ended")]
    GameAlreadyOver,

    #[error("it is {0}'s turn")]
    NotYourTurn(Color),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("invalid promotion piece: {0}")]
    InvalidPromotion(String),

    #[error(transparent)]
    InvalidSquare(#[from] CoordError),

    #[error("no position to step to")]
    NoHistory,
}

/// A game with history tracking.
///
/// Unlike [`Board`], which is a single position, `Game` knows whose turn it
/// is, what has been played and whether the game is over.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Color,
    moves: Vec<Ply>,
    /// Every board reached, starting with the initial one.
    history: Vec<Board>,
    /// Index into `history` of the board being viewed.
    cursor: usize,
    result: Option<GameResult>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game from the standard starting position.
    pub fn new() -> Self {
        Self::from_board(RULES.initial_board(), Color::White)
    }

    /// Creates a game from any board with `turn` to move.
    pub fn from_board(board: Board, turn: Color) -> Self {
        let mut game = Game {
            history: vec![board.clone()],
            board,
            turn,
            moves: Vec::new(),
            cursor: 0,
            result: None,
        };
        game.check_game_end();
        game
    }

    /// Creates a game from a FEN string, taking the side to move from it.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let record = chess_core::Fen::parse(fen)?;
        Ok(Self::from_board(
            Board::from_fen_record(&record),
            record.active_color,
        ))
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the move list.
    pub fn moves(&self) -> &[Ply] {
        &self.moves
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    /// Returns the status of the side to move.
    pub fn status(&self) -> Status {
        RULES.status(&self.board, self.turn)
    }

    /// Returns the legal moves of the side to move's items on `coord`.
    pub fn legal_moves_at(&self, coord: Coord) -> MoveList {
        if self.is_game_over() {
            return MoveList::new();
        }
        self.board
            .items_at(coord)
            .filter(|item| item.color == self.turn)
            .flat_map(|item| RULES.legal_moves(item, &self.board))
            .collect()
    }

    /// Returns every legal move of the side to move.
    pub fn all_legal_moves(&self) -> MoveList {
        if self.is_game_over() {
            return MoveList::new();
        }
        RULES.all_legal_moves(&self.board, self.turn)
    }

    /// Plays a move generated for the current board.
    ///
    /// `promotion` is only consulted for promoting moves; `None` promotes to
    /// a queen.
    pub fn make_move(
        &mut self,
        m: MoveOption,
        promotion: Option<Piece>,
    ) -> Result<MoveRecord, GameError> {
        if self.is_game_over() {
            return Err(GameError::GameAlreadyOver);
        }
        // The turn is judged by the item on the board, not the caller's copy
        let Some(item) = self.board.item(m.item.id).filter(|&item| *item == m.item) else {
            return Err(GameError::IllegalMove(m.to_string()));
        };
        if item.color != self.turn {
            return Err(GameError::NotYourTurn(self.turn));
        }
        if let Some(piece) = promotion.filter(|p| !p.is_promotion_target()) {
            return Err(GameError::InvalidPromotion(piece.to_string()));
        }
        if !RULES.is_legal(&self.board, &m) {
            return Err(GameError::IllegalMove(m.to_string()));
        }

        let record = MoveRecord::annotate(&self.board, &m, promotion);
        let next = RULES.commit(&self.board, &m, promotion);
        debug!(turn = %self.turn, "{record}");

        self.moves.push(Ply::Move(record));
        self.advance(next);
        Ok(record)
    }

    /// Plays a move given as origin and destination squares, e.g. `"e2"`,
    /// `"e4"`.
    pub fn play(
        &mut self,
        from: &str,
        to: &str,
        promotion: Option<Piece>,
    ) -> Result<MoveRecord, GameError> {
        let from: Coord = from.parse()?;
        let to: Coord = to.parse()?;

        if self.is_game_over() {
            return Err(GameError::GameAlreadyOver);
        }

        let Some(m) = self.legal_moves_at(from).find_to(to).copied() else {
            let opponents_only = self.board.items_at(from).next().is_some()
                && !self.board.has_color_at(from, self.turn);
            if opponents_only {
                return Err(GameError::NotYourTurn(self.turn));
            }
            return Err(GameError::IllegalMove(format!("{from}{to}")));
        };
        self.make_move(m, promotion)
    }

    /// Accepts the opponent's reply as a whole board, as supplied by a move
    /// authority, and hands the turn back.
    pub fn receive_board(&mut self, board: Board) -> Result<(), GameError> {
        if self.is_game_over() {
            return Err(GameError::GameAlreadyOver);
        }
        debug!(turn = %self.turn, items = board.items().len(), "received board");
        self.advance(board);
        Ok(())
    }

    /// Resigns the game for the side to move.
    pub fn resign(&mut self) -> Result<(), GameError> {
        if self.is_game_over() {
            return Err(GameError::GameAlreadyOver);
        }

        debug!(color = %self.turn, "resigned");
        self.moves.push(Ply::Resign { color: self.turn });
        self.result = Some(GameResult::Resignation {
            winner: self.turn.opposite(),
        });
        Ok(())
    }

    /// Returns the board currently being viewed.
    pub fn viewed_board(&self) -> &Board {
        &self.history[self.cursor]
    }

    /// Returns the number of boards in the history, including the initial one.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_step_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_step_forward(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }

    /// Views the previous board.
    pub fn step_back(&mut self) -> Result<&Board, GameError> {
        if !self.can_step_back() {
            return Err(GameError::NoHistory);
        }
        self.cursor -= 1;
        Ok(self.viewed_board())
    }

    /// Views the next board.
    pub fn step_forward(&mut self) -> Result<&Board, GameError> {
        if !self.can_step_forward() {
            return Err(GameError::NoHistory);
        }
        self.cursor += 1;
        Ok(self.viewed_board())
    }

    fn advance(&mut self, next: Board) {
        self.board = next;
        self.turn = self.turn.opposite();
        self.history.push(self.board.clone());
        self.cursor = self.history.len() - 1;
        self.check_game_end();
    }

    fn check_game_end(&mut self) {
        self.result = RULES.game_result(&self.board, self.turn);
        if let Some(result) = self.result {
            debug!(%result, "game over");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.turn(), Color::White);
        assert!(game.moves().is_empty());
        assert!(!game.is_game_over());
        assert_eq!(game.status(), Status::Normal);
        assert_eq!(game.all_legal_moves().len(), 20);
    }

    #[test]
    fn play_alternates_turns() {
        let mut game = Game::new();
        let record = game.play("e2", "e4", None).unwrap();
        assert_eq!(record.to_string(), "pawn from e2 to e4");
        assert_eq!(game.turn(), Color::Black);
        game.play("e7", "e5", None).unwrap();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.moves().len(), 2);
    }

    #[test]
    fn wrong_turn() {
        let mut game = Game::new();
        assert_eq!(
            game.play("e7", "e5", None),
            Err(GameError::NotYourTurn(Color::White))
        );
    }

    #[test]
    fn illegal_move() {
        let mut game = Game::new();
        assert!(matches!(
            game.play("e2", "e5", None),
            Err(GameError::IllegalMove(_))
        ));
        assert!(matches!(
            game.play("e4", "e5", None),
            Err(GameError::IllegalMove(_))
        ));
    }

    #[test]
    fn invalid_square() {
        let mut game = Game::new();
        assert!(matches!(
            game.play("e9", "e5", None),
            Err(GameError::InvalidSquare(_))
        ));
    }

    #[test]
    fn make_move_rejects_opponent_items() {
        let mut game = Game::new();
        let board = game.board().clone();
        let pawn = *board.item_at(Coord::from_algebraic("d7").unwrap()).unwrap();
        let m = MoveOption::new(pawn, Coord::from_algebraic("d6").unwrap());
        assert_eq!(
            game.make_move(m, None),
            Err(GameError::NotYourTurn(Color::White))
        );
    }

    #[test]
    fn make_move_rejects_stale_item_snapshot() {
        let mut game = Game::new();
        let mut pawn = *game
            .board()
            .item_at(Coord::from_algebraic("d7").unwrap())
            .unwrap();
        pawn.color = Color::White;
        let m = MoveOption::new(pawn, Coord::from_algebraic("d6").unwrap());

        assert!(matches!(
            game.make_move(m, None),
            Err(GameError::IllegalMove(_))
        ));
        assert!(game.board().is_vacant(Coord::from_algebraic("d6").unwrap()));
        assert_eq!(game.turn(), Color::White);
        assert!(game.moves().is_empty());
    }

    #[test]
    fn checkmate_fools_mate() {
        let mut game = Game::new();
        game.play("f2", "f3", None).unwrap();
        game.play("e7", "e5", None).unwrap();
        game.play("g2", "g4", None).unwrap();
        let record = game.play("d8", "h4", None).unwrap();

        assert!(record.checkmate);
        assert_eq!(record.to_string(), "queen from d8 to h4 checkmate");
        assert!(game.board().side(Color::White).checkmate);
        assert_eq!(
            game.result(),
            Some(GameResult::Checkmate {
                winner: Color::Black
            })
        );
        assert!(game.all_legal_moves().is_empty());
        assert_eq!(game.play("a2", "a3", None), Err(GameError::GameAlreadyOver));
    }

    #[test]
    fn stalemate_on_load() {
        let game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.result(), Some(GameResult::Stalemate));
    }

    #[test]
    fn promotion_choice() {
        let mut game = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - -").unwrap();
        let record = game.play("a7", "a8", Some(Piece::Rook)).unwrap();
        assert_eq!(record.promoting, Some(Piece::Rook));
        let a8 = Coord::from_algebraic("a8").unwrap();
        assert_eq!(game.board().item_at(a8).unwrap().piece, Piece::Rook);
    }

    #[test]
    fn invalid_promotion_piece() {
        let mut game = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - -").unwrap();
        assert_eq!(
            game.play("a7", "a8", Some(Piece::King)),
            Err(GameError::InvalidPromotion("king".to_string()))
        );
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn resign() {
        let mut game = Game::new();
        game.resign().unwrap();
        assert_eq!(
            game.result(),
            Some(GameResult::Resignation {
                winner: Color::Black
            })
        );
        assert_eq!(game.moves()[0].to_string(), "resign");
        assert_eq!(game.resign(), Err(GameError::GameAlreadyOver));
    }

    #[test]
    fn receive_board_hands_turn_back() {
        let mut game = Game::new();
        game.play("e2", "e4", None).unwrap();

        // The move authority answers with black's reply already applied
        let mut reply = Game::from_board(game.board().clone(), Color::Black);
        reply.play("c7", "c5", None).unwrap();

        game.receive_board(reply.board().clone()).unwrap();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.board(), reply.board());
        assert_eq!(game.history_len(), 3);
    }

    #[test]
    fn history_navigation() {
        let mut game = Game::new();
        assert!(!game.can_step_back());
        assert_eq!(game.step_back().err(), Some(GameError::NoHistory));

        game.play("e2", "e4", None).unwrap();
        game.play("e7", "e5", None).unwrap();
        assert!(game.can_step_back());
        assert!(!game.can_step_forward());

        game.step_back().unwrap();
        let viewed = game.step_back().unwrap().clone();
        assert_eq!(viewed, Board::startpos());
        assert!(game.can_step_forward());

        game.step_forward().unwrap();
        game.step_forward().unwrap();
        assert_eq!(game.viewed_board(), game.board());
        assert_eq!(game.step_forward().err(), Some(GameError::NoHistory));
    }

    #[test]
    fn new_move_jumps_to_latest() {
        let mut game = Game::new();
        game.play("e2", "e4", None).unwrap();
        game.step_back().unwrap();
        game.play("e7", "e5", None).unwrap();
        assert_eq!(game.viewed_board(), game.board());
        assert_eq!(game.history_len(), 3);
    }

    #[test]
    fn legal_moves_at_square() {
        let game = Game::new();
        assert_eq!(game.legal_moves_at(Coord::from_algebraic("g1").unwrap()).len(), 2);
        assert!(game.legal_moves_at(Coord::from_algebraic("g8").unwrap()).is_empty());
        assert!(game.legal_moves_at(Coord::from_algebraic("e4").unwrap()).is_empty());
    }

    #[test]
    fn error_display() {
        assert_eq!(
            GameError::NotYourTurn(Color::Black).to_string(),
            "it is black's turn"
        );
        assert!(GameError::from(CoordError("z0".to_string()))
            .to_string()
            .contains("z0"));
    }
}
