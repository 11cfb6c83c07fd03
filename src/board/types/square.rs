//! Square index type and algebraic notation.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

/// A board square as an index 0-63, rank-major from the top:
/// a8 = 0, b8 = 1, ..., h1 = 63.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(pub u8);

impl Square {
    pub const A8: Square = Square(0);
    pub const B8: Square = Square(1);
    pub const C8: Square = Square(2);
    pub const D8: Square = Square(3);
    pub const E8: Square = Square(4);
    pub const F8: Square = Square(5);
    pub const G8: Square = Square(6);
    pub const H8: Square = Square(7);
    pub const A1: Square = Square(56);
    pub const B1: Square = Square(57);
    pub const C1: Square = Square(58);
    pub const D1: Square = Square(59);
    pub const E1: Square = Square(60);
    pub const F1: Square = Square(61);
    pub const G1: Square = Square(62);
    pub const H1: Square = Square(63);

    /// Build a square from file (0 = a) and algebraic rank (1-8).
    #[must_use]
    pub fn from_file_rank(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && (1..=8).contains(&rank) {
            Some(Square((8 - rank) * 8 + file))
        } else {
            None
        }
    }

    /// Raw index, 0-63.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// File index, 0 = file a ... 7 = file h.
    #[inline]
    #[must_use]
    pub const fn file(self) -> u8 {
        self.0 & 7
    }

    /// Algebraic rank, 1-8.
    #[inline]
    #[must_use]
    pub const fn rank(self) -> u8 {
        8 - (self.0 >> 3)
    }

    /// Row from the top of the board, 0 = rank 8 ... 7 = rank 1.
    #[inline]
    #[must_use]
    pub(crate) const fn row(self) -> u8 {
        self.0 >> 3
    }

    /// Vertical mirror (a1 <-> a8), used to flip piece-square tables.
    #[inline]
    #[must_use]
    pub(crate) const fn mirror(self) -> Self {
        Square(self.0 ^ 56)
    }

    /// Offset by whole rows; caller guarantees the result stays on the board.
    #[inline]
    #[must_use]
    pub(crate) const fn shifted(self, delta: i8) -> Self {
        Square((self.0 as i8 + delta) as u8)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank())
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(SquareError::InvalidNotation {
                notation: s.to_string(),
            });
        }
        let file = match bytes[0] {
            b'a'..=b'h' => bytes[0] - b'a',
            _ => {
                return Err(SquareError::InvalidNotation {
                    notation: s.to_string(),
                })
            }
        };
        let rank = match bytes[1] {
            b'1'..=b'8' => bytes[1] - b'0',
            _ => {
                return Err(SquareError::InvalidNotation {
                    notation: s.to_string(),
                })
            }
        };
        Ok(Square::from_file_rank(file, rank).expect("validated above"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_match_layout() {
        assert_eq!("a8".parse::<Square>().unwrap(), Square::A8);
        assert_eq!("h1".parse::<Square>().unwrap(), Square::H1);
        assert_eq!(Square::H1.index(), 63);
    }

    #[test]
    fn display_round_trip() {
        for idx in 0..64u8 {
            let sq = Square(idx);
            assert_eq!(sq.to_string().parse::<Square>().unwrap(), sq);
        }
    }

    #[test]
    fn mirror_flips_vertically() {
        assert_eq!(Square::E1.mirror(), Square::E8);
        assert_eq!(Square::A8.mirror(), Square::A1);
    }

    #[test]
    fn rejects_bad_notation() {
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("e".parse::<Square>().is_err());
    }
}
