//! Move option representation.

use crate::{CastleSide, Coord, Item};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side effects a move carries beyond relocating the moving item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Special {
    /// King castles toward the h-file; the king-side rook follows.
    CastleKingSide,
    /// King castles toward the a-file; the queen-side rook follows.
    CastleQueenSide,
    /// A king step; forfeits both castling rights.
    ClearCastle,
    /// The original king-side rook moves; forfeits that right.
    ClearCastleKingSide,
    /// The original queen-side rook moves; forfeits that right.
    ClearCastleQueenSide,
    /// Pawn captures en passant.
    EnPassant,
    /// Pawn double-advance; enables an en passant reply.
    RegisterEnPassant,
    /// Pawn reaches the back rank. One option stands for all four
    /// promotion choices.
    Promote,
}

impl Special {
    /// Returns the castling side if this is a castling move.
    #[inline]
    pub const fn castle_side(self) -> Option<CastleSide> {
        match self {
            Special::CastleKingSide => Some(CastleSide::KingSide),
            Special::CastleQueenSide => Some(CastleSide::QueenSide),
            _ => None,
        }
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, Special::CastleKingSide | Special::CastleQueenSide)
    }
}

/// A candidate move of one item to one destination.
///
/// `item` is a snapshot of the mover as it stands on the board the option
/// was generated from, so `item.coord` is the origin square.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveOption {
    pub item: Item,
    pub to: Coord,
    pub special: Option<Special>,
}

impl MoveOption {
    /// Creates an option without a special tag.
    #[inline]
    pub const fn new(item: Item, to: Coord) -> Self {
        MoveOption {
            item,
            to,
            special: None,
        }
    }

    /// Creates an option with an optional special tag.
    #[inline]
    pub const fn with_special(item: Item, to: Coord, special: Option<Special>) -> Self {
        MoveOption { item, to, special }
    }

    /// Origin square of the move.
    #[inline]
    pub const fn from(&self) -> Coord {
        self.item.coord
    }

    /// Returns true if the option carries the given tag.
    #[inline]
    pub fn is(&self, special: Special) -> bool {
        self.special == Some(special)
    }

    /// Returns the castling side if this is a castling move.
    #[inline]
    pub fn castle_side(&self) -> Option<CastleSide> {
        self.special.and_then(Special::castle_side)
    }
}

impl fmt::Debug for MoveOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.special {
            Some(special) => write!(f, "MoveOption({}{} {:?})", self.from(), self.to, special),
            None => write!(f, "MoveOption({}{})", self.from(), self.to),
        }
    }
}

impl fmt::Display for MoveOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to)
    }
}
