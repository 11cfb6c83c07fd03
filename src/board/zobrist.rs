//! Zobrist hashing keys.
//!
//! Position hashes are the XOR-fold of per-(color, piece, square) keys, a
//! per-castling-mask key, a per-en-passant-file key and a side-to-move key,
//! so every board mutation updates the hash with a handful of XORs.

use once_cell::sync::Lazy;
use rand::prelude::*;

use super::types::{Color, Piece, Square};

pub(crate) struct ZobristKeys {
    // piece_keys[color][piece][square]
    pub(crate) piece_keys: [[[u64; 64]; 6]; 2],
    // One key per 4-bit castling mask; updating rights is xor-out, xor-in.
    pub(crate) castling_keys: [u64; 16],
    // Only the file of the en-passant target matters.
    pub(crate) en_passant_keys: [u64; 8],
    pub(crate) side_key: u64,
}

impl ZobristKeys {
    fn new() -> Self {
        // Fixed seed so hashes are reproducible across runs.
        let mut rng = StdRng::seed_from_u64(0x5EED_1DEA_u64);
        let mut piece_keys = [[[0u64; 64]; 6]; 2];
        let mut castling_keys = [0u64; 16];
        let mut en_passant_keys = [0u64; 8];

        for color in &mut piece_keys {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }
        for key in &mut castling_keys {
            *key = rng.gen();
        }
        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            castling_keys,
            en_passant_keys,
            side_key: rng.gen(),
        }
    }

    #[inline]
    pub(crate) fn piece(&self, color: Color, piece: Piece, sq: Square) -> u64 {
        self.piece_keys[color.index()][piece.index()][sq.index()]
    }

    #[inline]
    pub(crate) fn castling(&self, mask: u8) -> u64 {
        self.castling_keys[mask as usize]
    }

    #[inline]
    pub(crate) fn en_passant(&self, sq: Square) -> u64 {
        self.en_passant_keys[sq.file() as usize]
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);
