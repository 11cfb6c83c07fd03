//! Applying and reverting moves on the engine's position.

use super::state::Engine;
use super::types::{Color, Move, Piece, Square};
use super::zobrist::ZOBRIST;

impl Engine {
    /// Apply a pseudo-legal move. The pre-move state is snapshotted into the
    /// undo slot for the current ply; if the move leaves the mover's king
    /// attacked the snapshot is restored immediately and `false` is returned.
    ///
    /// The ply counter is not changed here; callers descending into a search
    /// or perft recursion bump it between make and unmake.
    pub fn make_move(&mut self, mv: Move) -> bool {
        self.history.save(self.pos.ply, &self.pos);

        let us = mv.side();
        let them = us.opponent();
        let source = mv.source();
        let target = mv.target();
        let piece = mv.piece();

        self.pos.remove_piece(source, us, piece);
        self.pos.hash ^= ZOBRIST.piece(us, piece, source);

        if mv.is_en_passant() {
            // The captured pawn sits behind the target square.
            let captured_sq = match us {
                Color::White => target.shifted(8),
                Color::Black => target.shifted(-8),
            };
            self.pos.remove_piece(captured_sq, them, Piece::Pawn);
            self.pos.hash ^= ZOBRIST.piece(them, Piece::Pawn, captured_sq);
        } else if mv.is_capture() {
            if let Some((_, captured)) = self.pos.piece_at(target) {
                self.pos.remove_piece(target, them, captured);
                self.pos.hash ^= ZOBRIST.piece(them, captured, target);
            }
        }

        let placed = mv.promotion().unwrap_or(piece);
        self.pos.set_piece(target, us, placed);
        self.pos.hash ^= ZOBRIST.piece(us, placed, target);

        if mv.is_castle() {
            // The generator only ever emits these four king targets.
            let (rook_from, rook_to) = match target {
                Square::G1 => (Square::H1, Square::F1),
                Square::C1 => (Square::A1, Square::D1),
                Square::G8 => (Square::H8, Square::F8),
                Square::C8 => (Square::A8, Square::D8),
                other => unreachable!("invalid castle target {other}"),
            };
            self.pos.remove_piece(rook_from, us, Piece::Rook);
            self.pos.hash ^= ZOBRIST.piece(us, Piece::Rook, rook_from);
            self.pos.set_piece(rook_to, us, Piece::Rook);
            self.pos.hash ^= ZOBRIST.piece(us, Piece::Rook, rook_to);
        }

        // The en-passant window lasts exactly one ply.
        if let Some(ep) = self.pos.en_passant.take() {
            self.pos.hash ^= ZOBRIST.en_passant(ep);
        }
        if mv.is_double_push() {
            let ep = match us {
                Color::White => target.shifted(8),
                Color::Black => target.shifted(-8),
            };
            self.pos.en_passant = Some(ep);
            self.pos.hash ^= ZOBRIST.en_passant(ep);
        }

        // Touching a king or rook home square drops the matching rights;
        // applying the table to the target also covers rook captures.
        let old_rights = self.pos.castling_rights;
        self.pos.castling_rights.revoke_for_square(source.index());
        self.pos.castling_rights.revoke_for_square(target.index());
        if self.pos.castling_rights != old_rights {
            self.pos.hash ^= ZOBRIST.castling(old_rights.as_u8());
            self.pos.hash ^= ZOBRIST.castling(self.pos.castling_rights.as_u8());
        }

        self.pos.side_to_move = them;
        self.pos.hash ^= ZOBRIST.side_key;

        self.pos.rebuild_occupancy();

        debug_assert_eq!(self.pos.hash, self.pos.recompute_hash());

        if self
            .pos
            .is_square_attacked(self.pos.king_square(us), them, self.tables)
        {
            self.history.restore(self.pos.ply, &mut self.pos);
            return false;
        }
        true
    }

    /// Revert the most recent successful make at the current ply.
    pub fn unmake_move(&mut self) {
        self.history.restore(self.pos.ply, &mut self.pos);
    }
}
