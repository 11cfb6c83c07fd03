//! Make/unmake correctness: exact state restoration, incremental hash
//! maintenance and the legality gate.

use crate::board::types::MAX_PLY;
use crate::board::{CastlingRights, Color, Engine, Piece, Position, Square};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

#[test]
fn every_move_round_trips_exactly() {
    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        KIWIPETE,
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
    ] {
        let mut engine = Engine::from_fen(fen).unwrap();
        let before = engine.position().clone();
        let pseudo = engine.position().generate_moves(engine.tables);
        for &mv in &pseudo {
            if engine.make_move(mv) {
                engine.unmake_move();
            }
            assert_eq!(engine.position(), &before, "state diverged after {mv}");
            assert_eq!(engine.position().hash(), before.hash());
        }
    }
}

#[test]
fn rejected_move_leaves_state_untouched() {
    // The e2 knight is pinned; moving it must be refused and rolled back.
    let mut engine = Engine::from_fen("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
    let before = engine.position().clone();
    let pseudo = engine.position().generate_moves(engine.tables);
    let knight_move = pseudo
        .iter()
        .copied()
        .find(|m| m.piece() == Piece::Knight)
        .unwrap();
    assert!(!engine.make_move(knight_move));
    assert_eq!(engine.position(), &before);
}

#[test]
fn capture_removes_the_captured_piece() {
    let mut engine =
        Engine::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
    engine.apply_uci_move("e4d5").unwrap();
    let pos = engine.position();
    assert_eq!(pos.piece_board(Color::Black, Piece::Pawn).popcount(), 0);
    assert_eq!(
        pos.piece_at("d5".parse().unwrap()),
        Some((Color::White, Piece::Pawn))
    );
}

#[test]
fn en_passant_removes_pawn_behind_target() {
    let mut engine =
        Engine::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
            .unwrap();
    engine.apply_uci_move("e5f6").unwrap();
    let pos = engine.position();
    assert!(pos.piece_at("f5".parse().unwrap()).is_none());
    assert_eq!(
        pos.piece_at("f6".parse().unwrap()),
        Some((Color::White, Piece::Pawn))
    );
}

#[test]
fn castling_relocates_rook_and_drops_rights() {
    let mut engine = Engine::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    engine.apply_uci_move("e1g1").unwrap();
    let pos = engine.position();
    assert_eq!(
        pos.piece_at(Square::G1),
        Some((Color::White, Piece::King))
    );
    assert_eq!(
        pos.piece_at(Square::F1),
        Some((Color::White, Piece::Rook))
    );
    assert!(pos.piece_at(Square::H1).is_none());
    assert!(!pos.castling_rights().has(Color::White, true));
    assert!(!pos.castling_rights().has(Color::White, false));
    assert!(pos.castling_rights().has(Color::Black, true));
}

#[test]
fn black_queenside_castle_relocates_the_a8_rook() {
    let mut engine = Engine::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
    engine.apply_uci_move("e8c8").unwrap();
    let pos = engine.position();
    assert_eq!(
        pos.piece_at(Square::C8),
        Some((Color::Black, Piece::King))
    );
    assert_eq!(
        pos.piece_at(Square::D8),
        Some((Color::Black, Piece::Rook))
    );
    assert!(pos.piece_at(Square::A8).is_none());
    assert!(!pos.castling_rights().has(Color::Black, false));
    assert!(pos.castling_rights().has(Color::White, true));
}

#[test]
fn capturing_a_rook_revokes_its_right() {
    let mut engine = Engine::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    engine.apply_uci_move("a1a8").unwrap();
    assert!(!engine.position().castling_rights().has(Color::Black, false));
    assert!(engine.position().castling_rights().has(Color::Black, true));
    // White gave up its own queenside right by moving the a1 rook.
    assert!(!engine.position().castling_rights().has(Color::White, false));
}

#[test]
fn promotion_swaps_pawn_for_chosen_piece() {
    let mut engine = Engine::from_fen("8/P3k3/8/8/8/8/4K3/8 w - - 0 1").unwrap();
    engine.apply_uci_move("a7a8r").unwrap();
    let pos = engine.position();
    assert_eq!(pos.piece_board(Color::White, Piece::Pawn).popcount(), 0);
    assert_eq!(
        pos.piece_at(Square::A8),
        Some((Color::White, Piece::Rook))
    );
}

#[test]
fn hash_stays_incremental_through_a_game() {
    let mut engine = Engine::from_start_position();
    for mv in [
        "e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1", "f6e4", "d2d4",
    ] {
        engine.apply_uci_move(mv).unwrap();
        assert_eq!(engine.position().hash(), engine.position().recompute_hash());
    }
    assert_eq!(
        engine.position().castling_rights(),
        {
            let mut rights = CastlingRights::none();
            rights.grant(Color::Black, true);
            rights.grant(Color::Black, false);
            rights
        }
    );
}

#[test]
fn same_position_by_transposition_has_same_hash() {
    let mut a = Engine::from_start_position();
    for mv in ["g1f3", "g8f6", "b1c3", "b8c6"] {
        a.apply_uci_move(mv).unwrap();
    }
    let mut b = Engine::from_start_position();
    for mv in ["b1c3", "b8c6", "g1f3", "g8f6"] {
        b.apply_uci_move(mv).unwrap();
    }
    assert_eq!(a.position().hash(), b.position().hash());
    assert_eq!(a.position(), b.position());
}

#[test]
fn set_position_replaces_state_and_resets_ply() {
    let mut engine = Engine::from_start_position();
    engine.pos.ply = 7;
    let mut replacement = Position::try_from_fen(KIWIPETE).unwrap();
    replacement.ply = 3;
    engine.set_position(replacement);
    assert_eq!(engine.position().ply(), 0);
    assert_eq!(engine.position().to_fen(), KIWIPETE);
    assert_eq!(engine.legal_moves().len(), 48);
}

#[test]
fn make_at_deepest_ply_uses_last_undo_slot() {
    let mut engine = Engine::from_start_position();
    engine.pos.ply = MAX_PLY - 1;
    let before = engine.position().clone();
    let mv = engine.legal_moves()[0];
    assert!(engine.make_move(mv));
    engine.unmake_move();
    assert_eq!(engine.position(), &before);
}

#[test]
fn fen_round_trip_after_play() {
    let mut engine = Engine::from_fen(KIWIPETE).unwrap();
    engine.apply_uci_move("e2a6").unwrap();
    let fen = engine.position().to_fen();
    let reparsed = Position::try_from_fen(&fen).unwrap();
    assert_eq!(&reparsed, engine.position());
}
