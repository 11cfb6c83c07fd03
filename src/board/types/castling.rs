//! Castling rights mask and the per-square revocation table.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;

pub(crate) const CASTLE_WHITE_K: u8 = 1 << 0;
pub(crate) const CASTLE_WHITE_Q: u8 = 1 << 1;
pub(crate) const CASTLE_BLACK_K: u8 = 1 << 2;
pub(crate) const CASTLE_BLACK_Q: u8 = 1 << 3;

const ALL_RIGHTS: u8 = CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;

/// Rights kept after a move touches a given square, indexed by square.
///
/// Moving from or to a king or rook home square drops the corresponding
/// rights; every other square keeps all 15. Applied to both the source and
/// target of each move, which also covers rook captures.
#[rustfmt::skip]
pub(crate) const CASTLING_REVOCATION: [u8; 64] = [
     7, 15, 15, 15,  3, 15, 15, 11,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    13, 15, 15, 15, 12, 15, 15, 14,
];

/// Castling rights as a 4-bit mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No castling rights.
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    /// All four castling rights.
    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(ALL_RIGHTS)
    }

    /// Check one right.
    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, kingside: bool) -> bool {
        self.0 & Self::bit_for(color, kingside) != 0
    }

    /// Grant one right.
    #[inline]
    pub fn grant(&mut self, color: Color, kingside: bool) {
        self.0 |= Self::bit_for(color, kingside);
    }

    /// Keep only the rights surviving a move touching `square_index`.
    #[inline]
    pub(crate) fn revoke_for_square(&mut self, square_index: usize) {
        self.0 &= CASTLING_REVOCATION[square_index];
    }

    /// Raw mask, 0-15; used to index the Zobrist castling keys.
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    #[inline]
    const fn bit_for(color: Color, kingside: bool) -> u8 {
        match (color, kingside) {
            (Color::White, true) => CASTLE_WHITE_K,
            (Color::White, false) => CASTLE_WHITE_Q,
            (Color::Black, true) => CASTLE_BLACK_K,
            (Color::Black, false) => CASTLE_BLACK_Q,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    #[test]
    fn revocation_table_home_squares() {
        let mut rights = CastlingRights::all();
        rights.revoke_for_square(Square::E1.index());
        assert!(!rights.has(Color::White, true));
        assert!(!rights.has(Color::White, false));
        assert!(rights.has(Color::Black, true));
        assert!(rights.has(Color::Black, false));
    }

    #[test]
    fn revocation_table_rook_squares() {
        let mut rights = CastlingRights::all();
        rights.revoke_for_square(Square::H8.index());
        assert!(!rights.has(Color::Black, true));
        assert!(rights.has(Color::Black, false));

        rights.revoke_for_square(Square::A1.index());
        assert!(!rights.has(Color::White, false));
        assert!(rights.has(Color::White, true));
    }

    #[test]
    fn revocation_table_neutral_square_is_identity() {
        let mut rights = CastlingRights::all();
        let before = rights;
        rights.revoke_for_square("e4".parse::<Square>().unwrap().index());
        assert_eq!(rights, before);
    }
}
