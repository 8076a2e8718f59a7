//! Human-readable records of played moves.

use crate::movegen::make_move;
use crate::rules::{is_check, is_checkmate, is_stalemate};
use crate::Board;
use chess_core::{CastleSide, Color, Coord, MoveOption, Piece, Special};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a move did, as shown in a move list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub piece: Piece,
    pub color: Color,
    pub from: Coord,
    pub to: Coord,
    pub capturing: Option<Piece>,
    pub promoting: Option<Piece>,
    pub castling: Option<CastleSide>,
    /// The opponent is in check after the move.
    pub check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
}

impl MoveRecord {
    /// Describes `m` as played on `board`.
    ///
    /// The check flags are evaluated for the opponent on the board after the
    /// move, with `promotion` applied the same way the commit path does.
    pub fn annotate(board: &Board, m: &MoveOption, promotion: Option<Piece>) -> Self {
        let mover = m.item;
        let opponent = mover.color.opposite();

        let capturing = if m.is(Special::EnPassant) {
            Some(Piece::Pawn)
        } else {
            board
                .items_at(m.to)
                .find(|i| i.color != mover.color)
                .map(|i| i.piece)
        };

        let promoting = m.is(Special::Promote).then(|| {
            promotion
                .filter(|p| p.is_promotion_target())
                .unwrap_or(Piece::Queen)
        });

        let next = make_move(board, m, promotion);
        let check = is_check(&next, opponent);

        MoveRecord {
            piece: mover.piece,
            color: mover.color,
            from: mover.coord,
            to: m.to,
            capturing,
            promoting,
            castling: m.castle_side(),
            check,
            checkmate: check && is_checkmate(&next, opponent),
            stalemate: !check && is_stalemate(&next, opponent),
        }
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(side) = self.castling {
            return write!(f, "castle {side}");
        }

        write!(f, "{} from {} to {}", self.piece, self.from, self.to)?;
        if let Some(captured) = self.capturing {
            write!(f, " capturing {captured}")?;
        }
        if let Some(promoted) = self.promoting {
            write!(f, " promoting to {promoted}")?;
        }

        if self.checkmate {
            f.write_str(" checkmate")
        } else if self.stalemate {
            f.write_str(" stalemate")
        } else if self.check {
            f.write_str(" check")
        } else {
            Ok(())
        }
    }
}

/// One entry of a game's move list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Ply {
    Move(MoveRecord),
    Resign { color: Color },
}

impl fmt::Display for Ply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ply::Move(record) => record.fmt(f),
            Ply::Resign { .. } => f.write_str("resign"),
        }
    }
}
