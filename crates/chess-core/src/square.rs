//! Board coordinates and the algebraic square codec.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A file (column) on the chess board, from A to H.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// Creates a file from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(File::A),
            1 => Some(File::B),
            2 => Some(File::C),
            3 => Some(File::D),
            4 => Some(File::E),
            5 => Some(File::F),
            6 => Some(File::G),
            7 => Some(File::H),
            _ => None,
        }
    }

    /// Creates a file from a lowercase letter ('a'-'h').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'a' => Some(File::A),
            'b' => Some(File::B),
            'c' => Some(File::C),
            'd' => Some(File::D),
            'e' => Some(File::E),
            'f' => Some(File::F),
            'g' => Some(File::G),
            'h' => Some(File::H),
            _ => None,
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

/// A rank (row) on the chess board, from 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    /// Creates a rank from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Rank::R1),
            1 => Some(Rank::R2),
            2 => Some(Rank::R3),
            3 => Some(Rank::R4),
            4 => Some(Rank::R5),
            5 => Some(Rank::R6),
            6 => Some(Rank::R7),
            7 => Some(Rank::R8),
            _ => None,
        }
    }

    /// Creates a rank from a character ('1'-'8').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Rank::R1),
            '2' => Some(Rank::R2),
            '3' => Some(Rank::R3),
            '4' => Some(Rank::R4),
            '5' => Some(Rank::R5),
            '6' => Some(Rank::R6),
            '7' => Some(Rank::R7),
            '8' => Some(Rank::R8),
            _ => None,
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }
}

/// Error returned when a square string cannot be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid square: {0:?} (expected a file a-h followed by a rank 1-8)")]
pub struct CoordError(pub String);

/// A square on the board as (file, rank), both in `0..=7`.
///
/// File 0 is the a-file and rank 0 is white's back rank. A `Coord` is
/// always on the board; stepping off the edge yields `None` from
/// [`Coord::offset`] rather than an out-of-range value.
///
/// On the wire a coordinate is `{"x": file, "y": rank}`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "CoordRecord", into = "CoordRecord")]
pub struct Coord {
    file: u8,
    rank: u8,
}

#[derive(Serialize, Deserialize)]
struct CoordRecord {
    x: i64,
    y: i64,
}

impl TryFrom<CoordRecord> for Coord {
    type Error = CoordError;

    fn try_from(record: CoordRecord) -> Result<Self, Self::Error> {
        let out_of_range = || CoordError(format!("{{x: {}, y: {}}}", record.x, record.y));
        let file = u8::try_from(record.x).map_err(|_| out_of_range())?;
        let rank = u8::try_from(record.y).map_err(|_| out_of_range())?;
        Coord::new(file, rank).ok_or_else(out_of_range)
    }
}

impl From<Coord> for CoordRecord {
    fn from(coord: Coord) -> Self {
        CoordRecord {
            x: coord.file as i64,
            y: coord.rank as i64,
        }
    }
}

impl Coord {
    /// Creates a coordinate from file and rank indices, rejecting values
    /// outside `0..=7`.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Coord { file, rank })
        } else {
            None
        }
    }

    /// Creates a coordinate from typed file and rank.
    #[inline]
    pub const fn from_parts(file: File, rank: Rank) -> Self {
        Coord {
            file: file.index(),
            rank: rank.index(),
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    ///
    /// Exactly two characters: a lowercase file letter and a rank digit.
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = match File::from_char(bytes[0] as char) {
            Some(f) => f,
            None => return None,
        };
        let rank = match Rank::from_char(bytes[1] as char) {
            Some(r) => r,
            None => return None,
        };
        Some(Coord::from_parts(file, rank))
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}", self)
    }

    /// File index, 0 for the a-file.
    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Rank index, 0 for rank 1.
    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Returns the square `df` files and `dr` ranks away, or `None` if that
    /// would leave the board.
    #[inline]
    pub const fn offset(self, df: i8, dr: i8) -> Option<Self> {
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        if file < 0 || rank < 0 {
            return None;
        }
        Coord::new(file as u8, rank as u8)
    }

    /// Iterates over all 64 squares, a1, b1, ..., h8.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Coord { file, rank }))
    }

    // Castling corners
    pub const A1: Coord = Coord { file: 0, rank: 0 };
    pub const E1: Coord = Coord { file: 4, rank: 0 };
    pub const H1: Coord = Coord { file: 7, rank: 0 };
    pub const A8: Coord = Coord { file: 0, rank: 7 };
    pub const E8: Coord = Coord { file: 4, rank: 7 };
    pub const H8: Coord = Coord { file: 7, rank: 7 };
}

impl FromStr for Coord {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coord::from_algebraic(s).ok_or_else(|| CoordError(s.to_string()))
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({})", self)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file) as char,
            (b'1' + self.rank) as char
        )
    }
}
