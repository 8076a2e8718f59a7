//! WebAssembly bindings for the chess engine.
//!
//! This crate provides a JavaScript-friendly API for the web UI: selecting
//! an item shows its legal destinations, a drop plays the move, and the
//! move authority's reply arrives as a whole board in its JSON form.
//!
//! # Usage
//!
//! ```javascript
//! import init, { Game } from 'chess-wasm';
//!
//! await init();
//!
//! const game = new Game();
//! console.log(game.legalMoves("e2")); // ["e3", "e4"]
//!
//! console.log(game.play("e2", "e4")); // "pawn from e2 to e4"
//! game.receiveBoard(replyJson);
//! ```

use chess_core::{Color, Coord, Piece, Special};
use chess_engine::rules::{will_be_check, will_be_checkmate, will_be_stalemate, Status};
use chess_engine::{Board, GameError};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// A move option as handed to JavaScript.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveView {
    from: Coord,
    to: Coord,
    special: Option<Special>,
}

/// A chess game that can be driven from JavaScript.
#[wasm_bindgen]
pub struct Game {
    inner: chess_engine::Game,
}

#[wasm_bindgen]
impl Game {
    /// Creates a new game with the standard starting position.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Game {
            inner: chess_engine::Game::new(),
        }
    }

    /// Creates a game from a FEN string.
    #[wasm_bindgen(js_name = fromFen)]
    pub fn from_fen(fen: &str) -> Result<Game, JsError> {
        Ok(Game {
            inner: chess_engine::Game::from_fen(fen)?,
        })
    }

    /// Creates a game from a board in its JSON form with `turn` ("white" or
    /// "black") to move.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str, turn: &str) -> Result<Game, JsError> {
        let turn = parse_color(turn)?;
        Ok(Game {
            inner: chess_engine::Game::from_board(Board::from_json(json)?, turn),
        })
    }

    /// Returns the current board as JSON.
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsError> {
        Ok(self.inner.board().to_json()?)
    }

    /// Returns the current board as a JavaScript object.
    #[wasm_bindgen(js_name = boardValue)]
    pub fn board_value(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(self.inner.board()).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Returns the destinations the side to move can reach from `square`.
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self, square: &str) -> Result<Vec<String>, JsError> {
        let from: Coord = square.parse()?;
        Ok(self
            .inner
            .legal_moves_at(from)
            .iter()
            .map(|m| m.to.to_algebraic())
            .collect())
    }

    /// Returns every legal move of the side to move as objects with `from`,
    /// `to` and `special`.
    #[wasm_bindgen(js_name = allLegalMoves)]
    pub fn all_legal_moves(&self) -> Result<JsValue, JsError> {
        let moves: Vec<MoveView> = self.all_move_views();
        serde_wasm_bindgen::to_value(&moves).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Plays a move and returns its description.
    ///
    /// `promotion` names the piece a pawn promotes to ("queen", "n", ...);
    /// a queen is chosen when it is omitted.
    pub fn play(
        &mut self,
        from: &str,
        to: &str,
        promotion: Option<String>,
    ) -> Result<String, JsError> {
        let promotion = promotion.as_deref().map(parse_piece).transpose()?;
        let record = self.inner.play(from, to, promotion)?;
        Ok(record.to_string())
    }

    /// Returns what a move would do to the opponent without playing it:
    /// "checkmate", "stalemate", "check" or "normal".
    #[wasm_bindgen(js_name = previewMove)]
    pub fn preview_move(&self, from: &str, to: &str) -> Result<String, JsError> {
        let from: Coord = from.parse()?;
        let to: Coord = to.parse()?;
        let m = self
            .inner
            .legal_moves_at(from)
            .find_to(to)
            .copied()
            .ok_or_else(|| GameError::IllegalMove(format!("{from}{to}")))?;

        let board = self.inner.board();
        let opponent = self.inner.turn().opposite();
        let status = if will_be_checkmate(board, opponent, &m) {
            Status::Checkmate
        } else if will_be_stalemate(board, opponent, &m) {
            Status::Stalemate
        } else if will_be_check(board, opponent, &m) {
            Status::Check
        } else {
            Status::Normal
        };
        Ok(status.to_string())
    }

    /// Accepts the opponent's reply as a board in its JSON form.
    #[wasm_bindgen(js_name = receiveBoard)]
    pub fn receive_board(&mut self, json: &str) -> Result<(), JsError> {
        let board = Board::from_json(json)?;
        self.inner.receive_board(board)?;
        Ok(())
    }

    /// Resigns for the side to move.
    pub fn resign(&mut self) -> Result<(), JsError> {
        Ok(self.inner.resign()?)
    }

    /// Returns the status of the side to move: "normal", "check",
    /// "checkmate" or "stalemate".
    pub fn status(&self) -> String {
        self.inner.status().to_string()
    }

    /// Returns true if the side to move is in check.
    #[wasm_bindgen(js_name = isCheck)]
    pub fn is_check(&self) -> bool {
        matches!(self.inner.status(), Status::Check | Status::Checkmate)
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.inner.is_game_over()
    }

    /// Returns a description of the result, or null while the game is on.
    pub fn result(&self) -> Option<String> {
        self.inner.result().map(|r| r.to_string())
    }

    /// Returns the side to move ("white" or "black").
    #[wasm_bindgen(js_name = sideToMove)]
    pub fn side_to_move(&self) -> String {
        self.inner.turn().to_string()
    }

    /// Returns the move list as descriptions.
    #[wasm_bindgen(js_name = moveList)]
    pub fn move_list(&self) -> Vec<String> {
        self.inner.moves().iter().map(|ply| ply.to_string()).collect()
    }

    /// Returns the FEN letters of the items on `square`, e.g. "P" or "k".
    #[wasm_bindgen(js_name = piecesAt)]
    pub fn pieces_at(&self, square: &str) -> Result<String, JsError> {
        let coord: Coord = square.parse()?;
        Ok(self
            .inner
            .board()
            .items_at(coord)
            .map(|item| item.piece.to_fen_char(item.color))
            .collect())
    }

    /// Steps the history view back; returns false at the first board.
    #[wasm_bindgen(js_name = stepBack)]
    pub fn step_back(&mut self) -> bool {
        self.inner.step_back().is_ok()
    }

    /// Steps the history view forward; returns false at the latest board.
    #[wasm_bindgen(js_name = stepForward)]
    pub fn step_forward(&mut self) -> bool {
        self.inner.step_forward().is_ok()
    }

    /// Returns the board being viewed as JSON.
    #[wasm_bindgen(js_name = viewedJson)]
    pub fn viewed_json(&self) -> Result<String, JsError> {
        Ok(self.inner.viewed_board().to_json()?)
    }

    /// Resets the game to the starting position.
    pub fn reset(&mut self) {
        self.inner = chess_engine::Game::new();
    }
}

impl Game {
    fn all_move_views(&self) -> Vec<MoveView> {
        self.inner
            .all_legal_moves()
            .iter()
            .map(|m| MoveView {
                from: m.from(),
                to: m.to,
                special: m.special,
            })
            .collect()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_color(s: &str) -> Result<Color, GameError> {
    match s {
        "white" => Ok(Color::White),
        "black" => Ok(Color::Black),
        other => Err(GameError::IllegalMove(format!("unknown color {other:?}"))),
    }
}

fn parse_piece(s: &str) -> Result<Piece, GameError> {
    Piece::from_name(s).ok_or_else(|| GameError::InvalidPromotion(s.to_string()))
}

/// Initialization function called when WASM module loads.
#[wasm_bindgen(start)]
pub fn init() {}
