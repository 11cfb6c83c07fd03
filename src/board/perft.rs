//! Perft: exhaustive legal-move-tree node counting, the correctness oracle
//! for generation and make/unmake.

use super::state::Engine;
use super::types::{Move, MAX_PLY};

impl Engine {
    /// Number of leaf nodes of the legal move tree at `depth`.
    ///
    /// Depth is clamped to the undo arena's capacity so an oversized
    /// request cannot run the ply counter off the end of it. At depth one
    /// the surviving makes are counted directly instead of recursing,
    /// which roughly halves the work.
    pub fn perft(&mut self, depth: u32) -> u64 {
        self.perft_inner(depth.min(MAX_PLY as u32))
    }

    fn perft_inner(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.pos.generate_moves(self.tables);
        let mut nodes = 0u64;
        for &mv in &moves {
            if !self.make_move(mv) {
                continue;
            }
            if depth == 1 {
                nodes += 1;
            } else {
                self.pos.ply += 1;
                nodes += self.perft_inner(depth - 1);
                self.pos.ply -= 1;
            }
            self.unmake_move();
        }
        nodes
    }

    /// Perft split by root move; the classic tool for pinpointing which
    /// move's subtree disagrees with a reference count.
    pub fn perft_divide(&mut self, depth: u32) -> Vec<(Move, u64)> {
        let depth = depth.min(MAX_PLY as u32);
        let mut counts = Vec::new();
        if depth == 0 {
            return counts;
        }
        let moves = self.pos.generate_moves(self.tables);
        for &mv in &moves {
            if !self.make_move(mv) {
                continue;
            }
            self.pos.ply += 1;
            let nodes = self.perft(depth - 1);
            self.pos.ply -= 1;
            self.unmake_move();
            counts.push((mv, nodes));
        }
        counts
    }
}
