//! Error types for parsing squares, FEN strings and UCI moves.

use std::error::Error;
use std::fmt;

/// Failure to parse algebraic square notation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SquareError {
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::InvalidNotation { notation } => {
                write!(f, "invalid square notation '{notation}'")
            }
        }
    }
}

impl Error for SquareError {}

/// Failure to parse a FEN record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FenError {
    /// Fewer than the four mandatory fields.
    MissingFields,
    /// The piece-placement field does not describe eight ranks of eight.
    BadPlacement { reason: &'static str },
    /// An unrecognized character in the piece-placement field.
    InvalidPieceChar { ch: char },
    /// The side-to-move field is not `w` or `b`.
    InvalidSideToMove { field: String },
    /// Unrecognized character in the castling-availability field.
    InvalidCastling { ch: char },
    /// The en-passant field is neither `-` nor a valid square.
    InvalidEnPassant { field: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::MissingFields => {
                write!(f, "FEN record is missing mandatory fields")
            }
            FenError::BadPlacement { reason } => {
                write!(f, "bad piece placement: {reason}")
            }
            FenError::InvalidPieceChar { ch } => {
                write!(f, "invalid piece character '{ch}'")
            }
            FenError::InvalidSideToMove { field } => {
                write!(f, "invalid side-to-move field '{field}'")
            }
            FenError::InvalidCastling { ch } => {
                write!(f, "invalid castling character '{ch}'")
            }
            FenError::InvalidEnPassant { field } => {
                write!(f, "invalid en-passant field '{field}'")
            }
        }
    }
}

impl Error for FenError {}

/// Failure to resolve a UCI move string against the current position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveParseError {
    /// The string is too short or malformed.
    Malformed { text: String },
    /// Source or target square failed to parse.
    BadSquare(SquareError),
    /// The promotion suffix is not one of `n`, `b`, `r`, `q`.
    BadPromotion { ch: char },
    /// Well formed, but no legal move matches it here.
    Illegal { text: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::Malformed { text } => {
                write!(f, "malformed move '{text}'")
            }
            MoveParseError::BadSquare(err) => write!(f, "{err}"),
            MoveParseError::BadPromotion { ch } => {
                write!(f, "invalid promotion piece '{ch}'")
            }
            MoveParseError::Illegal { text } => {
                write!(f, "move '{text}' is not legal in this position")
            }
        }
    }
}

impl Error for MoveParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MoveParseError::BadSquare(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SquareError> for MoveParseError {
    fn from(err: SquareError) -> Self {
        MoveParseError::BadSquare(err)
    }
}
