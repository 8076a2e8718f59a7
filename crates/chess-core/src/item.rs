//! Pieces placed on a board.

use crate::{Color, Coord, Piece};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of an item within one board and every copy derived
/// from it.
///
/// Several items may share a square, so an item cannot be re-found by its
/// piece, color and coordinate alone. Ids are assigned when an item is
/// added to a board, are unique within it, and survive every copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Side of the board a castling move or an original rook belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    /// Number of files the king travels when castling to this side.
    #[inline]
    pub const fn king_step(self) -> i8 {
        match self {
            CastleSide::KingSide => 2,
            CastleSide::QueenSide => -2,
        }
    }
}

impl fmt::Display for CastleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastleSide::KingSide => write!(f, "king side"),
            CastleSide::QueenSide => write!(f, "queen side"),
        }
    }
}

/// A piece standing on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Item {
    pub id: ItemId,
    pub piece: Piece,
    pub color: Color,
    pub coord: Coord,
    /// Set on the two original rooks of each side; used for castling-rights
    /// bookkeeping.
    pub castle: Option<CastleSide>,
}

impl Item {
    /// Returns true if this item is the given piece of the given color.
    #[inline]
    pub fn is(&self, piece: Piece, color: Color) -> bool {
        self.piece == piece && self.color == color
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} on {}", self.color, self.piece, self.coord)
    }
}
