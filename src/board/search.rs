//! Fixed-depth negamax search with fail-hard alpha-beta pruning and a
//! triangular principal-variation table.

use std::time::Instant;

use super::eval::evaluate;
use super::state::Engine;
use super::types::{Move, MAX_PLY};

/// Base magnitude for mate scores. A mate found at ply `p` scores
/// `MATE_SCORE - p` for the winner, so faster mates rank higher.
pub const MATE_SCORE: i32 = 49_000;

/// Alpha-beta window bound; strictly above any reachable score.
const INFINITY: i32 = 50_000;

/// Outcome of a search: the score from the mover's perspective, the chosen
/// move (if any move is legal) and the full principal variation.
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub score: i32,
    pub best_move: Option<Move>,
    pub pv: Vec<Move>,
    pub nodes: u64,
}

/// Triangular PV table: row `p` holds the variation proven best from ply
/// `p` downward, valid in `pv[p][p..len[p]]`.
struct PvTable {
    moves: Box<[[Move; MAX_PLY]; MAX_PLY]>,
    len: [usize; MAX_PLY],
}

impl PvTable {
    fn new() -> Self {
        PvTable {
            moves: Box::new([[Move::NULL; MAX_PLY]; MAX_PLY]),
            len: [0; MAX_PLY],
        }
    }

    /// Record `mv` as best at `ply` and pull up the child variation.
    fn store(&mut self, ply: usize, mv: Move) {
        self.moves[ply][ply] = mv;
        for idx in ply + 1..self.len[ply + 1] {
            self.moves[ply][idx] = self.moves[ply + 1][idx];
        }
        self.len[ply] = self.len[ply + 1].max(ply + 1);
    }
}

struct SearchStats {
    nodes: u64,
}

impl Engine {
    /// Search the current position to `depth` plies and return the score,
    /// best move and principal variation.
    pub fn search(&mut self, depth: u32) -> SearchResult {
        let depth = depth.min(MAX_PLY as u32 - 1);
        self.pos.ply = 0;

        let mut pv = PvTable::new();
        let mut stats = SearchStats { nodes: 0 };
        let start = Instant::now();

        let score = self.negamax(depth, -INFINITY, INFINITY, &mut pv, &mut stats);

        let line: Vec<Move> = pv.moves[0][..pv.len[0]].to_vec();
        log::debug!(
            "search depth {} score {} nodes {} time {:?}",
            depth,
            score,
            stats.nodes,
            start.elapsed()
        );

        SearchResult {
            score,
            best_move: line.first().copied(),
            pv: line,
            nodes: stats.nodes,
        }
    }

    fn negamax(
        &mut self,
        depth: u32,
        mut alpha: i32,
        beta: i32,
        pv: &mut PvTable,
        stats: &mut SearchStats,
    ) -> i32 {
        let ply = self.pos.ply;
        pv.len[ply] = ply;
        stats.nodes += 1;

        if depth == 0 || ply >= MAX_PLY - 1 {
            return evaluate(&self.pos);
        }

        let in_check = self.pos.is_in_check(self.tables);
        let moves = self.pos.generate_moves(self.tables);
        let mut legal_moves = 0u32;

        for &mv in &moves {
            if !self.make_move(mv) {
                continue;
            }
            legal_moves += 1;
            self.pos.ply += 1;
            let score = -self.negamax(depth - 1, -beta, -alpha, pv, stats);
            self.pos.ply -= 1;
            self.unmake_move();

            if score > alpha {
                // Fail-hard: never report a score outside the window.
                if score >= beta {
                    return beta;
                }
                alpha = score;
                pv.store(ply, mv);
            }
        }

        if legal_moves == 0 {
            // Checkmate prefers shorter distance; stalemate is a draw.
            return if in_check {
                -MATE_SCORE + ply as i32
            } else {
                0
            };
        }
        alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    /// Unpruned full-width negamax, the reference the pruned search must
    /// agree with at the root.
    fn full_width(engine: &mut Engine, depth: u32) -> (i32, Option<Move>) {
        let ply = engine.pos.ply;
        if depth == 0 {
            return (evaluate(&engine.pos), None);
        }
        let in_check = engine.pos.is_in_check(engine.tables);
        let moves = engine.pos.generate_moves(engine.tables);
        let mut best: Option<(i32, Move)> = None;

        for &mv in &moves {
            if !engine.make_move(mv) {
                continue;
            }
            engine.pos.ply += 1;
            let (child, _) = full_width(engine, depth - 1);
            engine.pos.ply -= 1;
            engine.unmake_move();

            let score = -child;
            if best.map_or(true, |(b, _)| score > b) {
                best = Some((score, mv));
            }
        }

        match best {
            Some((score, mv)) => (score, Some(mv)),
            None if in_check => (-MATE_SCORE + ply as i32, None),
            None => (0, None),
        }
    }

    #[test]
    fn alpha_beta_agrees_with_full_width_negamax() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
            "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        ] {
            for depth in 1..=3u32 {
                let mut reference = Engine::from_fen(fen).unwrap();
                let (expected_score, expected_move) = full_width(&mut reference, depth);

                let mut engine = Engine::from_fen(fen).unwrap();
                let result = engine.search(depth);
                assert_eq!(result.score, expected_score, "score diverged on {fen} depth {depth}");
                assert_eq!(
                    result.best_move, expected_move,
                    "best move diverged on {fen} depth {depth}"
                );
            }
        }
    }

    #[test]
    fn finds_mate_in_one() {
        // Back-rank mate: Ra8#.
        let mut engine = Engine::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap();
        let result = engine.search(3);
        let best = result.best_move.unwrap();
        assert_eq!(best.source(), "a1".parse::<Square>().unwrap());
        assert_eq!(best.target(), "a8".parse::<Square>().unwrap());
        assert_eq!(result.score, MATE_SCORE - 1);
    }

    #[test]
    fn checkmated_side_scores_negative_mate() {
        // Black to move, already mated in the corner.
        let mut engine = Engine::from_fen("R6k/6pp/8/8/8/8/8/6KR b - - 0 1").unwrap();
        let result = engine.search(2);
        assert_eq!(result.score, -MATE_SCORE);
        assert!(result.best_move.is_none());
    }

    #[test]
    fn stalemate_scores_zero() {
        // Black king cornered on a8 by the c7 queen with no check.
        let mut engine = Engine::from_fen("k7/2Q5/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        let result = engine.search(4);
        assert_eq!(result.score, 0);
        assert!(result.best_move.is_none());
    }

    #[test]
    fn prefers_faster_mate() {
        // Mate in one available; score must reflect distance one, not three.
        let mut engine = Engine::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap();
        let result = engine.search(5);
        assert_eq!(result.score, MATE_SCORE - 1);
    }

    #[test]
    fn pv_starts_with_best_move_and_is_playable() {
        let mut engine = Engine::from_start_position();
        let result = engine.search(4);
        let best = result.best_move.unwrap();
        assert_eq!(result.pv[0], best);
        // Every PV move must be legal in sequence.
        for &mv in &result.pv {
            assert!(engine.make_move(mv));
            engine.pos.ply += 1;
        }
    }
}
