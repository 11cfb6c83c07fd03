//! Pseudo-legal move generation and attack queries.
//!
//! Generation is pseudo-legal: moves may leave the mover's king in check
//! and are filtered by make/unmake. Castling is the exception; its legality
//! conditions are checked here in full.

use super::attack_tables::AttackTables;
use super::state::Position;
use super::types::{Bitboard, Color, Move, MoveList, Piece, Square, PROMOTION_PIECES};

impl Position {
    /// All pseudo-legal moves for the side to move.
    pub(crate) fn generate_moves(&self, tables: &AttackTables) -> MoveList {
        let mut list = MoveList::new();
        let us = self.side_to_move;
        let own = self.occupied[us.index()];
        let their = self.occupied[us.opponent().index()];

        self.generate_pawn_moves(tables, &mut list);

        for sq in self.piece_board(us, Piece::Knight).iter() {
            push_piece_moves(
                &mut list,
                sq,
                tables.knight_attacks(sq) & !own,
                their,
                us,
                Piece::Knight,
            );
        }
        for sq in self.piece_board(us, Piece::Bishop).iter() {
            push_piece_moves(
                &mut list,
                sq,
                tables.bishop_attacks(sq, self.all_occupied) & !own,
                their,
                us,
                Piece::Bishop,
            );
        }
        for sq in self.piece_board(us, Piece::Rook).iter() {
            push_piece_moves(
                &mut list,
                sq,
                tables.rook_attacks(sq, self.all_occupied) & !own,
                their,
                us,
                Piece::Rook,
            );
        }
        for sq in self.piece_board(us, Piece::Queen).iter() {
            push_piece_moves(
                &mut list,
                sq,
                tables.queen_attacks(sq, self.all_occupied) & !own,
                their,
                us,
                Piece::Queen,
            );
        }
        for sq in self.piece_board(us, Piece::King).iter() {
            push_piece_moves(
                &mut list,
                sq,
                tables.king_attacks(sq) & !own,
                their,
                us,
                Piece::King,
            );
        }

        self.generate_castling(tables, &mut list);
        list
    }

    fn generate_pawn_moves(&self, tables: &AttackTables, list: &mut MoveList) {
        let us = self.side_to_move;
        let their = self.occupied[us.opponent().index()];

        // White pawns move toward row 0 (rank 8), black toward row 7.
        let (push_delta, start_row, promo_row) = match us {
            Color::White => (-8i8, 6u8, 0u8),
            Color::Black => (8i8, 1u8, 7u8),
        };

        for sq in self.piece_board(us, Piece::Pawn).iter() {
            let push = sq.shifted(push_delta);
            if self.is_square_empty(push) {
                if push.row() == promo_row {
                    for promoted in PROMOTION_PIECES {
                        list.push(Move::promote(sq, push, us, promoted, false));
                    }
                } else {
                    list.push(Move::quiet(sq, push, us, Piece::Pawn));
                    if sq.row() == start_row {
                        let double = sq.shifted(push_delta * 2);
                        if self.is_square_empty(double) {
                            list.push(Move::double_push(sq, double, us));
                        }
                    }
                }
            }

            let attacks = tables.pawn_attacks(us, sq);
            for target in (attacks & their).iter() {
                if target.row() == promo_row {
                    for promoted in PROMOTION_PIECES {
                        list.push(Move::promote(sq, target, us, promoted, true));
                    }
                } else {
                    list.push(Move::capture(sq, target, us, Piece::Pawn));
                }
            }

            if let Some(ep) = self.en_passant {
                if attacks.contains(ep) {
                    list.push(Move::en_passant(sq, ep, us));
                }
            }
        }
    }

    /// Castling, each wing checked independently: the right must be held,
    /// the squares between king and rook empty, and the king's start,
    /// transit and landing squares unattacked.
    fn generate_castling(&self, tables: &AttackTables, list: &mut MoveList) {
        let us = self.side_to_move;
        let them = us.opponent();

        let (king_sq, kingside_path, queenside_path, rook_gap) = match us {
            Color::White => (
                Square::E1,
                [Square::F1, Square::G1],
                [Square::D1, Square::C1],
                Square::B1,
            ),
            Color::Black => (
                Square::E8,
                [Square::F8, Square::G8],
                [Square::D8, Square::C8],
                Square::B8,
            ),
        };

        if self.castling_rights.has(us, true)
            && kingside_path.iter().all(|&sq| self.is_square_empty(sq))
            && !self.is_square_attacked(king_sq, them, tables)
            && !kingside_path
                .iter()
                .any(|&sq| self.is_square_attacked(sq, them, tables))
        {
            list.push(Move::castle(king_sq, kingside_path[1], us));
        }

        if self.castling_rights.has(us, false)
            && queenside_path.iter().all(|&sq| self.is_square_empty(sq))
            && self.is_square_empty(rook_gap)
            && !self.is_square_attacked(king_sq, them, tables)
            && !queenside_path
                .iter()
                .any(|&sq| self.is_square_attacked(sq, them, tables))
        {
            list.push(Move::castle(king_sq, queenside_path[1], us));
        }
    }

    /// Returns true if any piece of `by` attacks `sq`.
    pub(crate) fn is_square_attacked(&self, sq: Square, by: Color, tables: &AttackTables) -> bool {
        // A pawn of `by` attacks sq exactly when a pawn of the other color
        // standing on sq would attack the attacker's square.
        if !(tables.pawn_attacks(by.opponent(), sq) & self.piece_board(by, Piece::Pawn)).is_empty()
        {
            return true;
        }
        if !(tables.knight_attacks(sq) & self.piece_board(by, Piece::Knight)).is_empty() {
            return true;
        }
        if !(tables.king_attacks(sq) & self.piece_board(by, Piece::King)).is_empty() {
            return true;
        }

        let diagonal =
            self.piece_board(by, Piece::Bishop) | self.piece_board(by, Piece::Queen);
        if !(tables.bishop_attacks(sq, self.all_occupied) & diagonal).is_empty() {
            return true;
        }

        let orthogonal = self.piece_board(by, Piece::Rook) | self.piece_board(by, Piece::Queen);
        !(tables.rook_attacks(sq, self.all_occupied) & orthogonal).is_empty()
    }

    /// Returns true if the side to move is in check.
    pub(crate) fn is_in_check(&self, tables: &AttackTables) -> bool {
        let us = self.side_to_move;
        self.is_square_attacked(self.king_square(us), us.opponent(), tables)
    }
}

fn push_piece_moves(
    list: &mut MoveList,
    source: Square,
    targets: Bitboard,
    their: Bitboard,
    us: Color,
    piece: Piece,
) {
    for target in targets.iter() {
        if their.contains(target) {
            list.push(Move::capture(source, target, us, piece));
        } else {
            list.push(Move::quiet(source, target, us, piece));
        }
    }
}
