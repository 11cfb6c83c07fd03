//! Bitboard chess core: board state, attack tables, move generation,
//! make/unmake and a fixed-depth alpha-beta search.
//!
//! # Example
//! ```
//! use riposte::board::Engine;
//!
//! let mut engine = Engine::from_start_position();
//! let moves = engine.legal_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

pub mod attack_tables;
mod error;
mod eval;
mod fen;
mod make_unmake;
mod movegen;
mod perft;
mod search;
mod state;
mod types;
mod zobrist;

#[cfg(test)]
mod tests;

pub use attack_tables::AttackTables;
pub use error::{FenError, MoveParseError, SquareError};
pub use eval::evaluate;
pub use search::{SearchResult, MATE_SCORE};
pub use state::{Engine, Position, UndoHistory, UndoState};
pub use types::{Bitboard, CastlingRights, Color, Move, MoveList, Piece, Square};
