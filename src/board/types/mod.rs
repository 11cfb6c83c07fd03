//! Core value types: bitboards, squares, pieces, castling rights and moves.

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::Bitboard;
pub use castling::CastlingRights;
pub use moves::{Move, MoveList};
pub use piece::{Color, Piece};
pub use square::Square;

pub(crate) use piece::PROMOTION_PIECES;

/// Maximum search/undo depth supported by the ply-indexed arenas.
pub(crate) const MAX_PLY: usize = 64;

/// Upper bound on pseudo-legal moves in any reachable position.
pub(crate) const MAX_MOVES: usize = 256;
