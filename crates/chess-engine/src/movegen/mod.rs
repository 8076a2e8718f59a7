//! Move generation.
//!
//! Moves are enumerated per item by walking fixed offset and direction
//! tables over the board's item list. Generation is pseudo-legal: it ignores
//! whether the move leaves the mover's own king attacked. Legality is
//! decided in [`crate::rules`] by simulating each candidate.

mod attacks;
mod commit;
pub mod perft;
mod simulate;

use crate::Board;
use chess_core::{CastleSide, Item, MoveOption, Piece, Special};

pub use attacks::{
    is_square_attacked, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, QUEEN_DIRECTIONS,
    ROOK_DIRECTIONS,
};
pub use commit::{commit_move, make_move};
pub use simulate::apply_move;

/// A growable list of move options.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<MoveOption>,
}

impl MoveList {
    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList { moves: Vec::new() }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: MoveOption) {
        self.moves.push(m);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[MoveOption] {
        &self.moves
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, MoveOption> {
        self.moves.iter()
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&MoveOption) -> bool,
    {
        self.moves.retain(f);
    }

    /// Returns the first move landing on `to`.
    pub fn find_to(&self, to: chess_core::Coord) -> Option<&MoveOption> {
        self.moves.iter().find(|m| m.to == to)
    }

    /// Returns true if any move lands on `to`.
    pub fn targets(&self, to: chess_core::Coord) -> bool {
        self.find_to(to).is_some()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = MoveOption;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a MoveOption;
    type IntoIter = std::slice::Iter<'a, MoveOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = MoveOption;
    type IntoIter = std::vec::IntoIter<MoveOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl Extend<MoveOption> for MoveList {
    fn extend<T: IntoIterator<Item = MoveOption>>(&mut self, iter: T) {
        self.moves.extend(iter);
    }
}

impl FromIterator<MoveOption> for MoveList {
    fn from_iter<T: IntoIterator<Item = MoveOption>>(iter: T) -> Self {
        MoveList {
            moves: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates the pseudo-legal moves of one item.
///
/// `check_castle_safety` makes castling candidates consult the attack oracle
/// for the square the king passes over. The oracle itself generates the
/// opponent's moves with this flag off, which keeps the mutual dependency one
/// level deep.
pub fn pseudo_legal_moves(item: &Item, board: &Board, check_castle_safety: bool) -> MoveList {
    let mut moves = MoveList::new();

    match item.piece {
        Piece::Pawn => generate_pawn_moves(item, board, &mut moves),
        Piece::Knight => generate_step_moves(item, board, &KNIGHT_OFFSETS, None, &mut moves),
        Piece::Bishop => generate_slider_moves(item, board, &BISHOP_DIRECTIONS, None, &mut moves),
        Piece::Rook => {
            let special = item.castle.map(|side| match side {
                CastleSide::KingSide => Special::ClearCastleKingSide,
                CastleSide::QueenSide => Special::ClearCastleQueenSide,
            });
            generate_slider_moves(item, board, &ROOK_DIRECTIONS, special, &mut moves);
        }
        Piece::Queen => generate_slider_moves(item, board, &QUEEN_DIRECTIONS, None, &mut moves),
        Piece::King => {
            generate_step_moves(
                item,
                board,
                &KING_OFFSETS,
                Some(Special::ClearCastle),
                &mut moves,
            );
            generate_castling_moves(item, board, check_castle_safety, &mut moves);
        }
    }

    moves
}

/// Generates pseudo-legal pawn moves: pushes, captures and en passant.
fn generate_pawn_moves(pawn: &Item, board: &Board, moves: &mut MoveList) {
    let us = pawn.color;
    let dir = us.pawn_direction();
    let from = pawn.coord;

    let promote = (from.rank() == us.pawn_promotion_rank()).then_some(Special::Promote);

    // Pushes
    if let Some(one) = from.offset(0, dir).filter(|&sq| board.is_vacant(sq)) {
        moves.push(MoveOption::with_special(*pawn, one, promote));

        if from.rank() == us.pawn_start_rank() {
            if let Some(two) = from.offset(0, 2 * dir).filter(|&sq| board.is_vacant(sq)) {
                moves.push(MoveOption::with_special(
                    *pawn,
                    two,
                    Some(Special::RegisterEnPassant),
                ));
            }
        }
    }

    // Captures
    for df in [1, -1] {
        if let Some(to) = from.offset(df, dir) {
            if board.is_capturable(to, us) {
                moves.push(MoveOption::with_special(*pawn, to, promote));
            }
        }
    }

    // En passant: the passed pawn stands beside us, we land behind it
    if let Some(passed) = board.side(us.opposite()).en_passant {
        let beside = passed.rank() == from.rank() && passed.file().abs_diff(from.file()) == 1;
        if beside {
            let landing = passed
                .offset(0, dir)
                .filter(|&sq| !board.has_color_at(sq, us));
            if let Some(to) = landing {
                moves.push(MoveOption::with_special(*pawn, to, Some(Special::EnPassant)));
            }
        }
    }
}

/// Generates single-step moves from an offset table (knight, king).
fn generate_step_moves(
    item: &Item,
    board: &Board,
    offsets: &[(i8, i8)],
    special: Option<Special>,
    moves: &mut MoveList,
) {
    for &(df, dr) in offsets {
        if let Some(to) = item.coord.offset(df, dr) {
            if !board.has_color_at(to, item.color) {
                moves.push(MoveOption::with_special(*item, to, special));
            }
        }
    }
}

/// Generates sliding moves along each direction until the edge or the first
/// occupied square, which is included only if it can be captured.
fn generate_slider_moves(
    item: &Item,
    board: &Board,
    directions: &[(i8, i8)],
    special: Option<Special>,
    moves: &mut MoveList,
) {
    for &(df, dr) in directions {
        let mut cursor = item.coord.offset(df, dr);
        while let Some(to) = cursor {
            if board.is_vacant(to) {
                moves.push(MoveOption::with_special(*item, to, special));
                cursor = to.offset(df, dr);
                continue;
            }
            if board.is_capturable(to, item.color) {
                moves.push(MoveOption::with_special(*item, to, special));
            }
            break;
        }
    }
}

/// Generates castling moves for a king whose side still holds the right.
///
/// The squares between king and rook must be empty. Only the square the king
/// passes over is tested for attacks, and only when `check_safety` is set.
fn generate_castling_moves(king: &Item, board: &Board, check_safety: bool, moves: &mut MoveList) {
    let rights = board.side(king.color).castling;

    for (side, special, span) in [
        (CastleSide::KingSide, Special::CastleKingSide, 2),
        (CastleSide::QueenSide, Special::CastleQueenSide, 3),
    ] {
        if !rights.has(side) {
            continue;
        }

        let toward = side.king_step().signum();
        let path_clear = (1..=span).all(|step| {
            king.coord
                .offset(toward * step, 0)
                .is_some_and(|sq| board.is_vacant(sq))
        });
        if !path_clear {
            continue;
        }

        if check_safety {
            let transit_attacked = king
                .coord
                .offset(toward, 0)
                .is_some_and(|transit| is_square_attacked(board, transit, king.color));
            if transit_attacked {
                continue;
            }
        }

        if let Some(to) = king.coord.offset(side.king_step(), 0) {
            moves.push(MoveOption::with_special(*king, to, Some(special)));
        }
    }
}
