//! Board state, the ply-indexed undo arena and the engine context.

use super::attack_tables::AttackTables;
use super::error::FenError;
use super::types::{Bitboard, CastlingRights, Color, Move, MoveList, Piece, Square, MAX_PLY};
use super::zobrist::ZOBRIST;

/// Mutable board state: piece bitboards, occupancy, side to move, castling
/// rights, en-passant target, incremental Zobrist hash and the search ply.
///
/// Exclusively owned by one [`Engine`] while a search runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// One bitboard per (color, piece-type) pair; a square is set in at most
    /// one of the twelve.
    pub(crate) pieces: [[Bitboard; 6]; 2],
    /// Per-color occupancy, always the OR of that color's six piece boards.
    pub(crate) occupied: [Bitboard; 2],
    /// Union of both occupancy boards.
    pub(crate) all_occupied: Bitboard,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    /// Valid only immediately after a double pawn push.
    pub(crate) en_passant: Option<Square>,
    pub(crate) hash: u64,
    /// Recursion depth; indexes the undo history and the PV table.
    pub(crate) ply: usize,
}

impl Position {
    /// An empty board, white to move, no rights, zero hash.
    #[must_use]
    pub fn empty() -> Self {
        Position {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant: None,
            hash: 0,
            ply: 0,
        }
    }

    /// The standard starting position.
    #[must_use]
    pub fn start_position() -> Self {
        Self::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .expect("start FEN is well formed")
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn ply(&self) -> usize {
        self.ply
    }

    /// Bitboard for one (color, piece) pair.
    #[must_use]
    pub fn piece_board(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// Occupancy of one color.
    #[must_use]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    /// Occupancy of both colors.
    #[must_use]
    pub fn all_occupancy(&self) -> Bitboard {
        self.all_occupied
    }

    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        self.pieces[color.index()][piece.index()].set(sq);
        self.occupied[color.index()].set(sq);
        self.all_occupied.set(sq);
    }

    pub(crate) fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        self.pieces[color.index()][piece.index()].clear(sq);
        self.occupied[color.index()].clear(sq);
        self.all_occupied.clear(sq);
    }

    /// The piece standing on `sq`, if any.
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        if !self.all_occupied.contains(sq) {
            return None;
        }
        let color = if self.occupied[Color::White.index()].contains(sq) {
            Color::White
        } else {
            Color::Black
        };
        for piece in Piece::ALL {
            if self.pieces[color.index()][piece.index()].contains(sq) {
                return Some((color, piece));
            }
        }
        None
    }

    #[inline]
    pub(crate) fn is_square_empty(&self, sq: Square) -> bool {
        !self.all_occupied.contains(sq)
    }

    /// The king square of `color`. A legal position always has one.
    #[inline]
    pub(crate) fn king_square(&self, color: Color) -> Square {
        self.pieces[color.index()][Piece::King.index()].lsb()
    }

    /// Rebuild both occupancy boards and their union from the twelve piece
    /// boards. Called at the end of every make.
    pub(crate) fn rebuild_occupancy(&mut self) {
        for color in Color::BOTH {
            let mut occ = Bitboard::EMPTY;
            for piece in Piece::ALL {
                occ |= self.pieces[color.index()][piece.index()];
            }
            self.occupied[color.index()] = occ;
        }
        self.all_occupied = self.occupied[0] | self.occupied[1];
    }

    /// Hash computed from scratch. The incremental `hash` field must always
    /// equal this; make/unmake asserts it in debug builds.
    #[must_use]
    pub fn recompute_hash(&self) -> u64 {
        let mut hash = 0u64;
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in self.pieces[color.index()][piece.index()].iter() {
                    hash ^= ZOBRIST.piece(color, piece, sq);
                }
            }
        }
        hash ^= ZOBRIST.castling(self.castling_rights.as_u8());
        if let Some(ep) = self.en_passant {
            hash ^= ZOBRIST.en_passant(ep);
        }
        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.side_key;
        }
        hash
    }
}

/// Snapshot of everything a move can touch, taken before the move is
/// applied. Restoring it is an exact rollback.
#[derive(Clone, Copy)]
pub struct UndoState {
    pieces: [[Bitboard; 6]; 2],
    occupied: [Bitboard; 2],
    all_occupied: Bitboard,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant: Option<Square>,
    hash: u64,
}

impl UndoState {
    const EMPTY: UndoState = UndoState {
        pieces: [[Bitboard::EMPTY; 6]; 2],
        occupied: [Bitboard::EMPTY; 2],
        all_occupied: Bitboard::EMPTY,
        side_to_move: Color::White,
        castling_rights: CastlingRights::none(),
        en_passant: None,
        hash: 0,
    };

    fn capture(pos: &Position) -> UndoState {
        UndoState {
            pieces: pos.pieces,
            occupied: pos.occupied,
            all_occupied: pos.all_occupied,
            side_to_move: pos.side_to_move,
            castling_rights: pos.castling_rights,
            en_passant: pos.en_passant,
            hash: pos.hash,
        }
    }

    fn restore(&self, pos: &mut Position) {
        pos.pieces = self.pieces;
        pos.occupied = self.occupied;
        pos.all_occupied = self.all_occupied;
        pos.side_to_move = self.side_to_move;
        pos.castling_rights = self.castling_rights;
        pos.en_passant = self.en_passant;
        pos.hash = self.hash;
    }
}

/// Fixed-capacity undo arena indexed by ply. A slot is written by the make
/// at that ply and consumed by the matching unmake; the ply counter keeps
/// the pairing stack-disciplined.
pub struct UndoHistory {
    slots: Box<[UndoState; MAX_PLY]>,
}

impl UndoHistory {
    #[must_use]
    pub fn new() -> Self {
        UndoHistory {
            slots: Box::new([UndoState::EMPTY; MAX_PLY]),
        }
    }

    #[inline]
    pub(crate) fn save(&mut self, ply: usize, pos: &Position) {
        self.slots[ply] = UndoState::capture(pos);
    }

    #[inline]
    pub(crate) fn restore(&self, ply: usize, pos: &mut Position) {
        self.slots[ply].restore(pos);
    }
}

impl Default for UndoHistory {
    fn default() -> Self {
        UndoHistory::new()
    }
}

/// Engine context: a position, its undo history and a shared reference to
/// the attack tables. All move application and search goes through this.
pub struct Engine {
    pub(crate) pos: Position,
    pub(crate) history: UndoHistory,
    pub(crate) tables: &'static AttackTables,
}

impl Engine {
    #[must_use]
    pub fn new(pos: Position) -> Self {
        Engine {
            pos,
            history: UndoHistory::new(),
            tables: AttackTables::get(),
        }
    }

    /// Engine over the standard starting position.
    #[must_use]
    pub fn from_start_position() -> Self {
        Engine::new(Position::start_position())
    }

    /// Engine over a FEN position.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Engine::new(Position::try_from_fen(fen)?))
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    /// Replace the position, resetting ply and history pairing.
    pub fn set_position(&mut self, mut pos: Position) {
        pos.ply = 0;
        self.pos = pos;
    }

    /// All strictly legal moves in the current position: pseudo-legal
    /// generation filtered through make/unmake.
    pub fn legal_moves(&mut self) -> MoveList {
        let pseudo = self.pos.generate_moves(self.tables);
        let mut legal = MoveList::new();
        for &mv in &pseudo {
            if self.make_move(mv) {
                self.unmake_move();
                legal.push(mv);
            }
        }
        legal
    }

    /// Find a legal move by source, target and promotion piece; used by
    /// the UCI `position ... moves` handler.
    pub(crate) fn find_legal(
        &mut self,
        source: Square,
        target: Square,
        promotion: Option<Piece>,
    ) -> Option<Move> {
        let moves = self.legal_moves();
        moves
            .iter()
            .copied()
            .find(|m| m.source() == source && m.target() == target && m.promotion() == promotion)
    }
}
