//! Packed move encoding and the fixed-capacity move list.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::{Color, Piece};
use super::square::Square;
use super::MAX_MOVES;

// Bit layout of the packed move word:
//   0-5   source square
//   6-11  target square
//   12-14 moving piece kind
//   15    moving side (0 = white)
//   16-18 promotion piece (0 = none, 1 = knight ... 4 = queen)
//   20    capture
//   21    double pawn push
//   22    en passant
//   23    castle
const TARGET_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const SIDE_BIT: u32 = 1 << 15;
const PROMO_SHIFT: u32 = 16;
const CAPTURE_BIT: u32 = 1 << 20;
const DOUBLE_PUSH_BIT: u32 = 1 << 21;
const EN_PASSANT_BIT: u32 = 1 << 22;
const CASTLE_BIT: u32 = 1 << 23;

/// A move packed into 32 bits. Pure value type; never borrows board state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u32);

impl Move {
    /// The all-zero move, used to fill arenas before real moves are written.
    pub const NULL: Move = Move(0);

    /// A quiet, non-special move.
    #[inline]
    #[must_use]
    pub fn quiet(source: Square, target: Square, color: Color, piece: Piece) -> Self {
        Move::encode(source, target, color, piece, 0, 0)
    }

    /// A capture of the piece standing on `target`.
    #[inline]
    #[must_use]
    pub fn capture(source: Square, target: Square, color: Color, piece: Piece) -> Self {
        Move::encode(source, target, color, piece, 0, CAPTURE_BIT)
    }

    /// A two-square pawn advance from its starting rank.
    #[inline]
    #[must_use]
    pub fn double_push(source: Square, target: Square, color: Color) -> Self {
        Move::encode(source, target, color, Piece::Pawn, 0, DOUBLE_PUSH_BIT)
    }

    /// An en-passant capture; the captured pawn is not on `target`.
    #[inline]
    #[must_use]
    pub fn en_passant(source: Square, target: Square, color: Color) -> Self {
        Move::encode(
            source,
            target,
            color,
            Piece::Pawn,
            0,
            CAPTURE_BIT | EN_PASSANT_BIT,
        )
    }

    /// A castling king move; the rook relocation is implied by `target`.
    #[inline]
    #[must_use]
    pub fn castle(source: Square, target: Square, color: Color) -> Self {
        Move::encode(source, target, color, Piece::King, 0, CASTLE_BIT)
    }

    /// A pawn promotion, optionally capturing on `target`.
    #[inline]
    #[must_use]
    pub fn promote(
        source: Square,
        target: Square,
        color: Color,
        promoted: Piece,
        is_capture: bool,
    ) -> Self {
        debug_assert!(!matches!(promoted, Piece::Pawn | Piece::King));
        let flags = if is_capture { CAPTURE_BIT } else { 0 };
        Move::encode(source, target, color, Piece::Pawn, promoted.index() as u32, flags)
    }

    #[inline]
    fn encode(
        source: Square,
        target: Square,
        color: Color,
        piece: Piece,
        promo_bits: u32,
        flags: u32,
    ) -> Self {
        let side = match color {
            Color::White => 0,
            Color::Black => SIDE_BIT,
        };
        Move(
            source.index() as u32
                | (target.index() as u32) << TARGET_SHIFT
                | (piece.index() as u32) << PIECE_SHIFT
                | side
                | promo_bits << PROMO_SHIFT
                | flags,
        )
    }

    /// Source square.
    #[inline]
    #[must_use]
    pub const fn source(self) -> Square {
        Square((self.0 & 0x3F) as u8)
    }

    /// Target square.
    #[inline]
    #[must_use]
    pub const fn target(self) -> Square {
        Square((self.0 >> TARGET_SHIFT & 0x3F) as u8)
    }

    /// The moving piece.
    #[inline]
    #[must_use]
    pub const fn piece(self) -> Piece {
        Piece::from_index((self.0 >> PIECE_SHIFT & 0x7) as usize)
    }

    /// The moving side.
    #[inline]
    #[must_use]
    pub const fn side(self) -> Color {
        if self.0 & SIDE_BIT == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Promotion piece, if any.
    #[inline]
    #[must_use]
    pub const fn promotion(self) -> Option<Piece> {
        match self.0 >> PROMO_SHIFT & 0x7 {
            0 => None,
            idx => Some(Piece::from_index(idx as usize)),
        }
    }

    /// Returns true if this move captures (including en passant).
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        self.0 & CAPTURE_BIT != 0
    }

    /// Returns true for a two-square pawn advance.
    #[inline]
    #[must_use]
    pub const fn is_double_push(self) -> bool {
        self.0 & DOUBLE_PUSH_BIT != 0
    }

    /// Returns true for an en-passant capture.
    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        self.0 & EN_PASSANT_BIT != 0
    }

    /// Returns true for a castling move.
    #[inline]
    #[must_use]
    pub const fn is_castle(self) -> bool {
        self.0 & CASTLE_BIT != 0
    }
}

impl fmt::Display for Move {
    /// UCI long algebraic form: source, target, optional promotion letter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source(), self.target())?;
        if let Some(promo) = self.promotion() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {}{}", self.piece().to_char(), self.source(), self.target())?;
        if let Some(promo) = self.promotion() {
            write!(f, "={}", promo.to_char())?;
        }
        if self.is_capture() {
            write!(f, " x")?;
        }
        if self.is_en_passant() {
            write!(f, " ep")?;
        }
        if self.is_castle() {
            write!(f, " castle")?;
        }
        write!(f, ")")
    }
}

/// Fixed-capacity move list backed by an array; avoids per-node allocation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: [Move::NULL; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Move {
        &self.as_slice()[idx]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
