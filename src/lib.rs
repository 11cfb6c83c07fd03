pub mod board;
pub mod uci;

pub use board::{
    AttackTables, Bitboard, CastlingRights, Color, Engine, Move, MoveList, Piece, Position,
    SearchResult, Square,
};
