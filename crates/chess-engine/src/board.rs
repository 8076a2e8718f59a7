//! Board state: placed items plus per-side bookkeeping.

use chess_core::{CastleSide, Color, Coord, Fen, FenError, Item, ItemId, Piece};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when reading a board from its JSON form.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("invalid board JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Castling rights of one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastlingRights {
    pub king_side: bool,
    pub queen_side: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        king_side: false,
        queen_side: false,
    };
    pub const ALL: CastlingRights = CastlingRights {
        king_side: true,
        queen_side: true,
    };

    /// Returns true if castling to the given side is still allowed.
    #[inline]
    pub const fn has(self, side: CastleSide) -> bool {
        match side {
            CastleSide::KingSide => self.king_side,
            CastleSide::QueenSide => self.queen_side,
        }
    }

    /// Forfeits castling to one side.
    #[inline]
    pub fn revoke(&mut self, side: CastleSide) {
        match side {
            CastleSide::KingSide => self.king_side = false,
            CastleSide::QueenSide => self.queen_side = false,
        }
    }

    #[inline]
    pub fn grant(&mut self, side: CastleSide) {
        match side {
            CastleSide::KingSide => self.king_side = true,
            CastleSide::QueenSide => self.queen_side = true,
        }
    }
}

/// Per-color state carried alongside the items.
///
/// `check`, `checkmate` and `stalemate` are a cache filled in when a move is
/// committed; the engine's predicates never read them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SideState {
    pub check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub castling: CastlingRights,
    /// Square of this side's pawn that has just double-advanced. Only
    /// meaningful for the opponent's very next move.
    pub en_passant: Option<Coord>,
}

impl SideState {
    /// State of a side that has not moved yet.
    pub const fn fresh() -> Self {
        SideState {
            check: false,
            checkmate: false,
            stalemate: false,
            castling: CastlingRights::ALL,
            en_passant: None,
        }
    }
}

/// A board position.
///
/// Several items may stand on the same square. Engine operations take a
/// `&Board` and hand back a new value; nothing in this crate mutates a board
/// it only borrows.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BoardRecord", into = "BoardRecord")]
pub struct Board {
    items: Vec<Item>,
    white: SideState,
    black: SideState,
}

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

impl Board {
    /// Creates a board with no items and no castling rights.
    pub fn empty() -> Self {
        Board {
            items: Vec::new(),
            white: SideState::default(),
            black: SideState::default(),
        }
    }

    /// Creates the standard starting position.
    ///
    /// The a- and h-file rooks carry their castle markers.
    pub fn startpos() -> Self {
        let mut board = Board {
            items: Vec::with_capacity(32),
            white: SideState::fresh(),
            black: SideState::fresh(),
        };

        for color in Color::ALL {
            for coord in Coord::all().filter(|c| c.rank() == color.back_rank()) {
                let castle = match coord.file() {
                    0 => Some(CastleSide::QueenSide),
                    7 => Some(CastleSide::KingSide),
                    _ => None,
                };
                board.place(BACK_RANK[coord.file() as usize], color, coord, castle);
            }
            for coord in Coord::all().filter(|c| c.rank() == color.pawn_start_rank()) {
                board.place(Piece::Pawn, color, coord, None);
            }
        }

        board
    }

    /// Creates a board from a FEN string.
    ///
    /// Castling availability becomes both the side's rights and a castle
    /// marker on the rook standing in the matching corner. An en passant
    /// target is stored as the square of the pawn that skipped it. The
    /// active color and move counters are not part of a board.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_fen_record(&Fen::parse(fen)?))
    }

    /// Creates a board from an already parsed FEN record.
    pub fn from_fen_record(fen: &Fen) -> Self {
        let mut board = Board::empty();

        for &(color, side) in &fen.castling {
            board.side_mut(color).castling.grant(side);
        }

        for &(piece, color, coord) in &fen.placement {
            let castle = if piece == Piece::Rook {
                corner_side(color, coord).filter(|&side| board.side(color).castling.has(side))
            } else {
                None
            };
            board.place(piece, color, coord, castle);
        }

        if let Some(target) = fen.en_passant {
            // rank 3 is skipped by white, rank 6 by black
            let mover = if target.rank() == 2 {
                Color::White
            } else {
                Color::Black
            };
            board.side_mut(mover).en_passant = target.offset(0, mover.pawn_direction());
        }

        board
    }

    /// Parses a board from the JSON exchanged with the move authority.
    ///
    /// Item ids are assigned in array order.
    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialises the board to its JSON form.
    pub fn to_json(&self) -> Result<String, BoardError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Adds an item and returns its id.
    pub(crate) fn place(
        &mut self,
        piece: Piece,
        color: Color,
        coord: Coord,
        castle: Option<CastleSide>,
    ) -> ItemId {
        let id = self.next_id();
        self.items.push(Item {
            id,
            piece,
            color,
            coord,
            castle,
        });
        id
    }

    fn next_id(&self) -> ItemId {
        ItemId(self.items.iter().map(|item| item.id.0 + 1).max().unwrap_or(0))
    }

    /// All items, in insertion order.
    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the item with the given id.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Iterates over the items of one color.
    pub fn items_of(&self, color: Color) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |item| item.color == color)
    }

    /// Iterates over every item standing on `coord`.
    pub fn items_at(&self, coord: Coord) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |item| item.coord == coord)
    }

    /// Returns the first item standing on `coord`.
    pub fn item_at(&self, coord: Coord) -> Option<&Item> {
        self.items_at(coord).next()
    }

    /// Returns true if nothing stands on `coord`.
    #[inline]
    pub fn is_vacant(&self, coord: Coord) -> bool {
        self.item_at(coord).is_none()
    }

    /// Returns true if any item of `color` stands on `coord`.
    pub fn has_color_at(&self, coord: Coord, color: Color) -> bool {
        self.items_at(coord).any(|item| item.color == color)
    }

    /// Returns true if a piece of color `mover` may capture on `coord`: an
    /// opposing item stands there and no friendly one does.
    pub fn is_capturable(&self, coord: Coord, mover: Color) -> bool {
        self.has_color_at(coord, mover.opposite()) && !self.has_color_at(coord, mover)
    }

    /// Returns the king of `color`, if there is one.
    pub fn king(&self, color: Color) -> Option<&Item> {
        self.items_of(color).find(|item| item.piece == Piece::King)
    }

    #[inline]
    pub fn side(&self, color: Color) -> &SideState {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    #[inline]
    pub(crate) fn side_mut(&mut self, color: Color) -> &mut SideState {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    pub(crate) fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Removes every item on `coord` except `keep`.
    pub(crate) fn clear_square(&mut self, coord: Coord, keep: ItemId) {
        self.items.retain(|item| item.coord != coord || item.id == keep);
    }

    pub(crate) fn remove(&mut self, id: ItemId) {
        self.items.retain(|item| item.id != id);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

fn corner_side(color: Color, coord: Coord) -> Option<CastleSide> {
    match (color, coord) {
        (Color::White, c) if c == Coord::H1 => Some(CastleSide::KingSide),
        (Color::White, c) if c == Coord::A1 => Some(CastleSide::QueenSide),
        (Color::Black, c) if c == Coord::H8 => Some(CastleSide::KingSide),
        (Color::Black, c) if c == Coord::A8 => Some(CastleSide::QueenSide),
        _ => None,
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("items", &self.items)
            .field("white", &self.white)
            .field("black", &self.black)
            .finish()
    }
}

/// Renders the board as an 8x8 diagram, rank 8 on top. A square holding
/// several items shows the first one.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let symbol = Coord::new(file, rank)
                    .and_then(|coord| self.item_at(coord))
                    .map(|item| item.piece.to_fen_char(item.color))
                    .unwrap_or('.');
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}

/// Wire form of an item; ids are local to this process and not sent.
#[derive(Serialize, Deserialize)]
struct ItemRecord {
    piece: Piece,
    color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    castle: Option<CastleSide>,
    coord: Coord,
}

#[derive(Serialize, Deserialize)]
struct BoardRecord {
    items: Vec<ItemRecord>,
    #[serde(default)]
    white: SideState,
    #[serde(default)]
    black: SideState,
}

impl From<BoardRecord> for Board {
    fn from(record: BoardRecord) -> Self {
        let mut board = Board {
            items: Vec::with_capacity(record.items.len()),
            white: record.white,
            black: record.black,
        };
        for item in record.items {
            board.place(item.piece, item.color, item.coord, item.castle);
        }
        board
    }
}

impl From<Board> for BoardRecord {
    fn from(board: Board) -> Self {
        BoardRecord {
            items: board
                .items
                .into_iter()
                .map(|item| ItemRecord {
                    piece: item.piece,
                    color: item.color,
                    castle: item.castle,
                    coord: item.coord,
                })
                .collect(),
            white: board.white,
            black: board.black,
        }
    }
}
