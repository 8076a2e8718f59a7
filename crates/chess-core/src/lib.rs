//! Core types for the relaxed chess engine.
//!
//! This crate provides the fundamental types shared by the engine and its
//! front ends:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Coord`], [`File`], and [`Rank`] for board coordinates, including the
//!   algebraic square codec (`"e4"`)
//! - [`Item`] and [`ItemId`] for pieces placed on a board
//! - [`MoveOption`] and [`Special`] for candidate moves
//! - FEN parsing

mod color;
mod fen;
mod item;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{Fen, FenError};
pub use item::{CastleSide, Item, ItemId};
pub use mov::{MoveOption, Special};
pub use piece::Piece;
pub use square::{Coord, CoordError, File, Rank};
