//! FEN parsing and serialization, plus UCI move resolution.

use std::fmt::Write as _;

use super::error::{FenError, MoveParseError};
use super::state::{Engine, Position};
use super::types::{Color, Move, Piece, Square};

impl Position {
    /// Parse a FEN record. The halfmove clock and fullmove number are
    /// accepted but ignored; the first four fields are mandatory.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or(FenError::MissingFields)?;
        let side = fields.next().ok_or(FenError::MissingFields)?;
        let castling = fields.next().ok_or(FenError::MissingFields)?;
        let en_passant = fields.next().ok_or(FenError::MissingFields)?;

        let mut pos = Position::empty();

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::BadPlacement {
                reason: "expected eight ranks",
            });
        }
        for (row, rank) in ranks.iter().enumerate() {
            let mut file = 0u8;
            for ch in rank.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    if skip == 0 || skip > 8 {
                        return Err(FenError::InvalidPieceChar { ch });
                    }
                    file += skip as u8;
                } else {
                    let piece = Piece::from_char(ch).ok_or(FenError::InvalidPieceChar { ch })?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    if file >= 8 {
                        return Err(FenError::BadPlacement {
                            reason: "rank describes more than eight files",
                        });
                    }
                    pos.set_piece(Square(row as u8 * 8 + file), color, piece);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::BadPlacement {
                    reason: "rank does not describe exactly eight files",
                });
            }
        }

        pos.side_to_move = match side {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    field: other.to_string(),
                })
            }
        };

        if castling != "-" {
            for ch in castling.chars() {
                match ch {
                    'K' => pos.castling_rights.grant(Color::White, true),
                    'Q' => pos.castling_rights.grant(Color::White, false),
                    'k' => pos.castling_rights.grant(Color::Black, true),
                    'q' => pos.castling_rights.grant(Color::Black, false),
                    _ => return Err(FenError::InvalidCastling { ch }),
                }
            }
        }

        if en_passant != "-" {
            let sq = en_passant
                .parse::<Square>()
                .map_err(|_| FenError::InvalidEnPassant {
                    field: en_passant.to_string(),
                })?;
            pos.en_passant = Some(sq);
        }

        pos.hash = pos.recompute_hash();
        Ok(pos)
    }

    /// Serialize back to FEN. The clock fields are emitted as `0 1` since
    /// the position does not track them.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);

        for row in 0..8u8 {
            let mut empty_run = 0u8;
            for file in 0..8u8 {
                let sq = Square(row * 8 + file);
                match self.piece_at(sq) {
                    Some((color, piece)) => {
                        if empty_run > 0 {
                            let _ = write!(fen, "{empty_run}");
                            empty_run = 0;
                        }
                        fen.push(piece.to_fen_char(color));
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                let _ = write!(fen, "{empty_run}");
            }
            if row != 7 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        if self.castling_rights.as_u8() == 0 {
            fen.push('-');
        } else {
            if self.castling_rights.has(Color::White, true) {
                fen.push('K');
            }
            if self.castling_rights.has(Color::White, false) {
                fen.push('Q');
            }
            if self.castling_rights.has(Color::Black, true) {
                fen.push('k');
            }
            if self.castling_rights.has(Color::Black, false) {
                fen.push('q');
            }
        }

        fen.push(' ');
        match self.en_passant {
            Some(sq) => {
                let _ = write!(fen, "{sq}");
            }
            None => fen.push('-'),
        }

        fen.push_str(" 0 1");
        fen
    }
}

impl Engine {
    /// Resolve a UCI long-algebraic move ("e2e4", "a7a8q") against the
    /// current position and apply it.
    pub fn apply_uci_move(&mut self, text: &str) -> Result<Move, MoveParseError> {
        if text.len() < 4 || text.len() > 5 {
            return Err(MoveParseError::Malformed {
                text: text.to_string(),
            });
        }
        let (src_part, tgt_part) = match (text.get(0..2), text.get(2..4)) {
            (Some(s), Some(t)) => (s, t),
            _ => {
                return Err(MoveParseError::Malformed {
                    text: text.to_string(),
                })
            }
        };
        let source = src_part.parse::<Square>()?;
        let target = tgt_part.parse::<Square>()?;
        let promotion = match text.as_bytes().get(4) {
            None => None,
            Some(&b) => match b as char {
                'n' => Some(Piece::Knight),
                'b' => Some(Piece::Bishop),
                'r' => Some(Piece::Rook),
                'q' => Some(Piece::Queen),
                ch => return Err(MoveParseError::BadPromotion { ch }),
            },
        };

        let mv = self
            .find_legal(source, target, promotion)
            .ok_or_else(|| MoveParseError::Illegal {
                text: text.to_string(),
            })?;
        let applied = self.make_move(mv);
        debug_assert!(applied);
        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::types::CastlingRights;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn parses_start_position() {
        let pos = Position::try_from_fen(START_FEN).unwrap();
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.castling_rights(), CastlingRights::all());
        assert_eq!(pos.en_passant(), None);
        assert_eq!(pos.all_occupancy().popcount(), 32);
        assert_eq!(
            pos.piece_at("e1".parse().unwrap()),
            Some((Color::White, Piece::King))
        );
        assert_eq!(
            pos.piece_at("d8".parse().unwrap()),
            Some((Color::Black, Piece::Queen))
        );
    }

    #[test]
    fn round_trips_assorted_positions() {
        for fen in [
            START_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 1",
        ] {
            let pos = Position::try_from_fen(fen).unwrap();
            assert_eq!(pos.to_fen(), fen);
        }
    }

    #[test]
    fn parsed_hash_matches_recomputed() {
        let pos = Position::try_from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        assert_eq!(pos.hash(), pos.recompute_hash());
        assert_ne!(pos.hash(), 0);
    }

    #[test]
    fn rejects_malformed_records() {
        assert!(matches!(
            Position::try_from_fen("8/8/8/8 w - -"),
            Err(FenError::BadPlacement { .. })
        ));
        assert!(matches!(
            Position::try_from_fen("9/8/8/8/8/8/8/8 w - -"),
            Err(FenError::InvalidPieceChar { ch: '9' })
        ));
        assert!(matches!(
            Position::try_from_fen("8/8/8/8/8/8/8/8 x - -"),
            Err(FenError::InvalidSideToMove { .. })
        ));
        assert!(matches!(
            Position::try_from_fen("8/8/8/8/8/8/8/8 w Kx -"),
            Err(FenError::InvalidCastling { ch: 'x' })
        ));
        assert!(matches!(
            Position::try_from_fen("8/8/8/8/8/8/8/8 w - e9"),
            Err(FenError::InvalidEnPassant { .. })
        ));
        assert!(matches!(
            Position::try_from_fen(""),
            Err(FenError::MissingFields)
        ));
    }

    #[test]
    fn uci_move_application() {
        let mut engine = Engine::from_start_position();
        let mv = engine.apply_uci_move("e2e4").unwrap();
        assert!(mv.is_double_push());
        assert_eq!(
            engine.position().en_passant(),
            Some("e3".parse::<Square>().unwrap())
        );

        assert!(matches!(
            engine.apply_uci_move("e2e4"),
            Err(MoveParseError::Illegal { .. })
        ));
        assert!(matches!(
            engine.apply_uci_move("e7e8x"),
            Err(MoveParseError::BadPromotion { ch: 'x' })
        ));
        assert!(matches!(
            engine.apply_uci_move("e2"),
            Err(MoveParseError::Malformed { .. })
        ));
    }
}
