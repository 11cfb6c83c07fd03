//! Precomputed attack tables: direct lookups for pawns, knights and kings,
//! magic-bitboard lookups for bishops, rooks and queens.

mod magics;

pub(crate) use magics::{
    bishop_attacks_slow, bishop_relevant_mask, enumerate_subsets, rook_attacks_slow,
    rook_relevant_mask,
};

use std::time::Instant;

use once_cell::sync::Lazy;

use super::types::{Bitboard, Color, Square};
use magics::{BISHOP_MAGICS, ROOK_MAGICS};

static TABLES: Lazy<AttackTables> = Lazy::new(AttackTables::build);

/// Per-square slider lookup: relevant mask, magic multiplier, shift and the
/// offset of this square's slice in the shared attack table.
struct MagicEntry {
    mask: u64,
    magic: u64,
    shift: u32,
    offset: usize,
}

impl MagicEntry {
    #[inline]
    fn table_index(&self, occupancy: u64) -> usize {
        let relevant = occupancy & self.mask;
        self.offset + (relevant.wrapping_mul(self.magic) >> self.shift) as usize
    }
}

/// All attack tables, built once and shared read-only.
pub struct AttackTables {
    pawn: [[u64; 64]; 2],
    knight: [u64; 64],
    king: [u64; 64],
    bishop_magics: Vec<MagicEntry>,
    rook_magics: Vec<MagicEntry>,
    bishop_table: Vec<u64>,
    rook_table: Vec<u64>,
}

impl AttackTables {
    /// The process-wide tables; built on first use.
    #[must_use]
    pub fn get() -> &'static AttackTables {
        &TABLES
    }

    fn build() -> AttackTables {
        let start = Instant::now();

        let mut bishop_magics = Vec::with_capacity(64);
        let mut bishop_table = Vec::new();
        build_slider_tables(
            &BISHOP_MAGICS,
            bishop_relevant_mask,
            bishop_attacks_slow,
            &mut bishop_magics,
            &mut bishop_table,
        );

        let mut rook_magics = Vec::with_capacity(64);
        let mut rook_table = Vec::new();
        build_slider_tables(
            &ROOK_MAGICS,
            rook_relevant_mask,
            rook_attacks_slow,
            &mut rook_magics,
            &mut rook_table,
        );

        log::debug!(
            "attack tables built in {:?} ({} slider entries)",
            start.elapsed(),
            bishop_table.len() + rook_table.len()
        );

        AttackTables {
            pawn: build_pawn_attacks(),
            knight: build_leaper_attacks(&[
                (2, 1),
                (1, 2),
                (-1, 2),
                (-2, 1),
                (-2, -1),
                (-1, -2),
                (1, -2),
                (2, -1),
            ]),
            king: build_leaper_attacks(&[
                (1, 0),
                (-1, 0),
                (0, 1),
                (0, -1),
                (1, 1),
                (1, -1),
                (-1, 1),
                (-1, -1),
            ]),
            bishop_magics,
            rook_magics,
            bishop_table,
            rook_table,
        }
    }

    /// Squares a pawn of `color` on `sq` attacks.
    #[inline]
    #[must_use]
    pub fn pawn_attacks(&self, color: Color, sq: Square) -> Bitboard {
        Bitboard(self.pawn[color.index()][sq.index()])
    }

    /// Squares a knight on `sq` attacks.
    #[inline]
    #[must_use]
    pub fn knight_attacks(&self, sq: Square) -> Bitboard {
        Bitboard(self.knight[sq.index()])
    }

    /// Squares a king on `sq` attacks.
    #[inline]
    #[must_use]
    pub fn king_attacks(&self, sq: Square) -> Bitboard {
        Bitboard(self.king[sq.index()])
    }

    /// Bishop attacks from `sq` given the full board occupancy.
    #[inline]
    #[must_use]
    pub fn bishop_attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        let entry = &self.bishop_magics[sq.index()];
        Bitboard(self.bishop_table[entry.table_index(occupancy.0)])
    }

    /// Rook attacks from `sq` given the full board occupancy.
    #[inline]
    #[must_use]
    pub fn rook_attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        let entry = &self.rook_magics[sq.index()];
        Bitboard(self.rook_table[entry.table_index(occupancy.0)])
    }

    /// Queen attacks: bishop and rook attacks combined.
    #[inline]
    #[must_use]
    pub fn queen_attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.bishop_attacks(sq, occupancy) | self.rook_attacks(sq, occupancy)
    }
}

fn build_pawn_attacks() -> [[u64; 64]; 2] {
    let mut attacks = [[0u64; 64]; 2];
    for sq in 0..64usize {
        let row = (sq / 8) as i8;
        let file = (sq % 8) as i8;
        // Row 0 is rank 8, so white pawns attack toward smaller rows.
        for (color, dr) in [(Color::White, -1i8), (Color::Black, 1i8)] {
            let nr = row + dr;
            if !(0..8).contains(&nr) {
                continue;
            }
            let mut mask = 0u64;
            for df in [-1i8, 1] {
                let nf = file + df;
                if (0..8).contains(&nf) {
                    mask |= 1u64 << (nr as u64 * 8 + nf as u64);
                }
            }
            attacks[color.index()][sq] = mask;
        }
    }
    attacks
}

fn build_leaper_attacks(deltas: &[(i8, i8)]) -> [u64; 64] {
    let mut attacks = [0u64; 64];
    for (sq, slot) in attacks.iter_mut().enumerate() {
        let r = (sq / 8) as i8;
        let f = (sq % 8) as i8;
        let mut mask = 0u64;
        for &(dr, df) in deltas {
            let nr = r + dr;
            let nf = f + df;
            if (0..8).contains(&nr) && (0..8).contains(&nf) {
                mask |= 1u64 << (nr as u64 * 8 + nf as u64);
            }
        }
        *slot = mask;
    }
    attacks
}

fn build_slider_tables(
    magics: &[u64; 64],
    relevant_mask: impl Fn(usize) -> u64,
    attacks_slow: impl Fn(usize, u64) -> u64,
    entries: &mut Vec<MagicEntry>,
    table: &mut Vec<u64>,
) {
    let mut offset = 0usize;
    for sq in 0..64usize {
        let mask = relevant_mask(sq);
        let bits = mask.count_ones();
        let shift = 64 - bits;
        let magic = magics[sq];

        table.resize(offset + (1usize << bits), 0);
        for occ in enumerate_subsets(mask) {
            let idx = (occ.wrapping_mul(magic) >> shift) as usize;
            table[offset + idx] = attacks_slow(sq, occ);
        }

        entries.push(MagicEntry {
            mask,
            magic,
            shift,
            offset,
        });
        offset += 1usize << bits;
    }
}
