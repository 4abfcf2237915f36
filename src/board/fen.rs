use std::str::FromStr;

use log::debug;

use super::config::BoardConfig;
use super::context::MoveGenContext;
use super::error::{ChessError, FenError};
use super::state::MAX_PIECES_PER_TYPE;
use super::types::{CastlingRights, Color, Piece, PieceKind, Square, PIECE_COUNT};
use super::Board;

/// FEN of the standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Largest halfmove clock or fullmove number accepted from a FEN string.
pub const MAX_FEN_COUNTER: u32 = 1 << 30;

/// Fully validated FEN fields, held until they are committed to a board.
#[derive(Debug)]
struct ParsedFen {
    placement: Vec<(Square, Piece)>,
    side: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove: usize,
}

impl ParsedFen {
    fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::TooFewFields { found: parts.len() });
        }

        let placement = parse_placement(parts[0])?;

        let side = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut castling = 0u8;
        if parts[2] != "-" {
            for c in parts[2].chars() {
                castling |=
                    CastlingRights::bit_for_fen_char(c).ok_or(FenError::InvalidCastling { char: c })?;
            }
        }

        let en_passant = match parts[3] {
            "-" => None,
            field => {
                let invalid = || FenError::InvalidEnPassant {
                    found: field.to_string(),
                };
                let sq: Square = field.parse().map_err(|_| invalid())?;
                // The target sits behind the pawn that just double-pushed.
                let expected_rank = match side {
                    Color::White => 5,
                    Color::Black => 2,
                };
                if sq.rank() != expected_rank {
                    return Err(invalid());
                }
                Some(sq)
            }
        };

        let halfmove_clock = match parts.get(4) {
            Some(field) => parse_counter(field, "halfmove clock")?,
            None => 0,
        };

        let fullmove = match parts.get(5) {
            Some(field) => parse_counter(field, "fullmove number")?.max(1) as usize,
            None => 1,
        };

        Ok(ParsedFen {
            placement,
            side,
            castling: CastlingRights::from_u8(castling),
            en_passant,
            halfmove_clock,
            fullmove,
        })
    }
}

fn parse_counter(field: &str, name: &'static str) -> Result<u32, FenError> {
    field
        .parse::<u32>()
        .ok()
        .filter(|&n| n <= MAX_FEN_COUNTER)
        .ok_or_else(|| FenError::InvalidCounter {
            field: name,
            found: field.to_string(),
        })
}

/// Parse the placement field, rank 8 first, checking board shape, king
/// counts and per-piece limits.
fn parse_placement(field: &str) -> Result<Vec<(Square, Piece)>, FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidRankCount { found: ranks.len() });
    }

    let mut placement = Vec::with_capacity(32);
    let mut counts = [0usize; PIECE_COUNT];
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx;
        let mut file = 0usize;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                if skip == 0 || skip > 8 {
                    return Err(FenError::InvalidPiece { char: c });
                }
                file += skip as usize;
                continue;
            }
            let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPiece { char: c })?;
            let sq = Square::new(file, rank).ok_or(FenError::InvalidFileCount {
                rank: rank + 1,
                files: file + 1,
            })?;
            if piece.is_pawn() && (rank == 0 || rank == 7) {
                return Err(FenError::PawnOnBackRank { square: sq });
            }
            counts[piece.index()] += 1;
            if counts[piece.index()] > MAX_PIECES_PER_TYPE {
                return Err(FenError::TooManyPieces { piece });
            }
            placement.push((sq, piece));
            file += 1;
        }
        if file != 8 {
            return Err(FenError::InvalidFileCount {
                rank: rank + 1,
                files: file,
            });
        }
    }

    for color in Color::BOTH {
        let found = counts[Piece::new(color, PieceKind::King).index()];
        if found != 1 {
            return Err(FenError::InvalidKingCount { color, found });
        }
    }
    Ok(placement)
}

impl Board {
    /// Parse a board position from FEN notation.
    ///
    /// The halfmove and fullmove fields may be omitted; they default to 0
    /// and 1. A fullmove number of 0 is read as 1.
    ///
    /// # Errors
    /// Returns a [`FenError`] describing the first problem found.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        Board::try_from_fen_with_context(fen, MoveGenContext::shared_default())
    }

    /// Like [`Board::try_from_fen`], hashing with the keys of `ctx`.
    ///
    /// # Errors
    /// Returns a [`FenError`] describing the first problem found.
    pub fn try_from_fen_with_context(
        fen: &str,
        ctx: std::sync::Arc<MoveGenContext>,
    ) -> Result<Self, FenError> {
        let parsed = ParsedFen::parse(fen)?;
        let mut board = Board::empty(ctx, &BoardConfig::default());
        board.commit_fen(parsed);
        Ok(board)
    }

    /// Parse a board position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use [`Board::try_from_fen`] for
    /// untrusted input.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Board::try_from_fen(fen).unwrap_or_else(|err| panic!("invalid FEN '{fen}': {err}"))
    }

    /// Replace the position with the one described by `fen`.
    ///
    /// The string is validated completely before anything is written, so on
    /// error the board keeps its previous position.
    ///
    /// # Errors
    /// [`ChessError::MalformedFen`] if the string is not a valid position.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), ChessError> {
        let parsed = ParsedFen::parse(fen).map_err(|err| {
            debug!("rejected FEN '{fen}': {err}");
            err
        })?;
        self.commit_fen(parsed);
        debug!("loaded FEN '{fen}', hash {:#018x}", self.hash);
        Ok(())
    }

    fn commit_fen(&mut self, parsed: ParsedFen) {
        self.reset();
        for (sq, piece) in parsed.placement {
            self.squares[sq.padded()] = piece;
        }
        self.side = parsed.side;
        self.castling = parsed.castling;
        self.en_passant = parsed.en_passant;
        self.halfmove_clock = parsed.halfmove_clock;
        self.start_ply = (parsed.fullmove - 1) * 2 + usize::from(parsed.side == Color::Black);
        self.rebuild_piece_lists();
        self.hash = self.compute_hash();
    }

    /// FEN of the current position, with the fullmove number derived from
    /// the plies played since the game start.
    #[must_use]
    pub fn to_fen(&self) -> String {
        self.to_fen_with_ply_count(self.game_ply())
    }

    /// FEN of the current position with the fullmove field computed as
    /// `ply_count / 2 + 1`.
    #[must_use]
    pub fn to_fen_with_ply_count(&self, ply_count: usize) -> String {
        let mut fen = String::with_capacity(90);

        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                let piece = Square::new(file, rank).map_or(Piece::Empty, |sq| self.piece_at(sq));
                if piece.is_empty() {
                    empty += 1;
                } else {
                    if empty > 0 {
                        fen.push_str(&empty.to_string());
                        empty = 0;
                    }
                    fen.push(piece.to_fen_char());
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side {
            Color::White => 'w',
            Color::Black => 'b',
        });
        fen.push(' ');
        fen.push_str(&self.castling.to_string());
        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.to_string()),
            None => fen.push('-'),
        }
        fen.push_str(&format!(" {} {}", self.halfmove_clock, ply_count / 2 + 1));
        fen
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_round_trip() {
        for fen in [
            START_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w Kq d6 0 3",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 17 42",
        ] {
            assert_eq!(Board::from_fen(fen).to_fen(), fen);
        }
    }

    #[test]
    fn test_fen_black_to_move() {
        let board =
            Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.en_passant_square(), Some("e3".parse().unwrap()));
        assert_eq!(board.game_ply(), 1);
        assert_eq!(board.fullmove_number(), 1);
    }

    #[test]
    fn test_fen_optional_counters() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - -");
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 5 0");
        assert_eq!(board.to_fen(), "4k3/8/8/8/8/8/8/4K3 w - - 5 1");
    }

    #[test]
    fn test_fen_with_explicit_ply_count() {
        let board = Board::new();
        assert!(board.to_fen_with_ply_count(9).ends_with(" 0 5"));
    }

    #[test]
    fn test_fen_error_too_few_fields() {
        let result = Board::try_from_fen("8/8/8/8/8/8/8/8 w");
        assert_eq!(result.err(), Some(FenError::TooFewFields { found: 2 }));
    }

    #[test]
    fn test_fen_error_invalid_piece() {
        let result = Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBXKBNR w KQkq - 0 1");
        assert_eq!(result.err(), Some(FenError::InvalidPiece { char: 'X' }));
    }

    #[test]
    fn test_fen_error_board_shape() {
        assert!(matches!(
            Board::try_from_fen("8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidRankCount { found: 7 })
        ));
        assert!(matches!(
            Board::try_from_fen("4k3/8/8/8/8/8/8/4K4 w - - 0 1"),
            Err(FenError::InvalidFileCount { .. })
        ));
        assert!(matches!(
            Board::try_from_fen("4k3/8/8/8/8/8/8/4K2 w - - 0 1"),
            Err(FenError::InvalidFileCount { rank: 1, files: 7 })
        ));
    }

    #[test]
    fn test_fen_error_invalid_side_to_move() {
        let result = Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1");
        assert!(matches!(result, Err(FenError::InvalidSideToMove { .. })));
    }

    #[test]
    fn test_fen_error_invalid_castling() {
        let result = Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w KX - 0 1");
        assert_eq!(result.err(), Some(FenError::InvalidCastling { char: 'X' }));
    }

    #[test]
    fn test_fen_error_invalid_en_passant() {
        assert!(matches!(
            Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - z9 0 1"),
            Err(FenError::InvalidEnPassant { .. })
        ));
        // Rank 3 target with white to move is impossible.
        assert!(matches!(
            Board::try_from_fen("4k3/8/8/8/4P3/8/8/4K3 w - e3 0 1"),
            Err(FenError::InvalidEnPassant { .. })
        ));
    }

    #[test]
    fn test_fen_error_counters_and_kings() {
        assert!(matches!(
            Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1"),
            Err(FenError::InvalidCounter { field: "halfmove clock", .. })
        ));
        assert!(matches!(
            Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - - -1 1"),
            Err(FenError::InvalidCounter { field: "halfmove clock", .. })
        ));
        assert_eq!(
            Board::try_from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").err(),
            Some(FenError::InvalidKingCount {
                color: Color::Black,
                found: 0
            })
        );
        assert_eq!(
            Board::try_from_fen("4k3/pppppppp/pppp4/8/8/8/8/4K3 w - - 0 1").err(),
            Some(FenError::TooManyPieces {
                piece: Piece::BlackPawn
            })
        );
    }

    #[test]
    fn test_fen_counters_out_of_range() {
        for fen in [
            "4k3/8/8/8/8/8/8/4K3 w - - 0 18446744073709551615",
            "4k3/8/8/8/8/8/8/4K3 w - - 0 4294967295",
            "4k3/8/8/8/8/8/8/4K3 w - - 4294967295 1",
            "4k3/8/8/8/8/8/8/4K3 w - - 99999999999999999999 1",
        ] {
            assert!(
                matches!(Board::try_from_fen(fen), Err(FenError::InvalidCounter { .. })),
                "{fen}"
            );
        }
    }

    #[test]
    fn test_fen_counters_at_limit_keep_playing() {
        let fen = format!("4k3/8/8/8/8/8/8/4K3 b - - {MAX_FEN_COUNTER} {MAX_FEN_COUNTER}");
        let mut board = Board::from_fen(&fen);
        assert_eq!(board.fullmove_number(), MAX_FEN_COUNTER as usize);
        let mv = board.parse_coordinate_move("e8d8").unwrap();
        board.apply_move(mv).unwrap();
        assert_eq!(board.halfmove_clock(), MAX_FEN_COUNTER + 1);
        let counters = format!(" {} {}", MAX_FEN_COUNTER + 1, MAX_FEN_COUNTER + 1);
        assert!(board.to_fen().ends_with(&counters), "{}", board.to_fen());
        assert_eq!(board.check_board(), Ok(()));
    }

    #[test]
    fn test_fen_error_pawn_on_back_rank() {
        assert_eq!(
            Board::try_from_fen("4k3/8/8/8/8/8/8/P3K3 w - - 0 1").err(),
            Some(FenError::PawnOnBackRank { square: Square::A1 })
        );
        assert_eq!(
            Board::try_from_fen("4k2p/8/8/8/8/8/8/4K3 b - - 0 1").err(),
            Some(FenError::PawnOnBackRank { square: Square::H8 })
        );
        assert!(Board::try_from_fen("4k3/P7/8/8/8/8/7p/4K3 w - - 0 1").is_ok());
    }

    #[test]
    fn test_failed_load_keeps_previous_position() {
        let mut board = Board::new();
        let before = board.snapshot();
        let err = board.load_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN w KQkq - 0 1");
        assert!(matches!(err, Err(ChessError::MalformedFen(_))));
        assert_eq!(board.snapshot(), before);
    }

    #[test]
    fn test_load_fen_resets_history() {
        let mut board = Board::new();
        let mv = board.parse_coordinate_move("e2e4").unwrap();
        board.apply_move(mv).unwrap();
        board
            .load_fen("4k3/8/8/8/8/8/8/4K3 b - - 3 12")
            .unwrap();
        assert_eq!(board.history_len(), 0);
        assert_eq!(board.game_ply(), 23);
        assert_eq!(board.check_board(), Ok(()));
    }

    #[test]
    fn test_from_str_trait() {
        let board: Board = START_FEN.parse().unwrap();
        assert_eq!(board.hash(), Board::new().hash());
        assert!("not a fen".parse::<Board>().is_err());
    }

    #[test]
    #[should_panic(expected = "invalid FEN")]
    fn test_from_fen_panics_on_garbage() {
        let _ = Board::from_fen("garbage");
    }
}
