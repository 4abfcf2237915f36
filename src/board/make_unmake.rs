//! Making and unmaking moves.
//!
//! `make_move` applies a pseudo-legal move and then tests king safety. An
//! illegal move is undone before returning, so the caller always gets back a
//! consistent board.

use super::error::ChessError;
use super::state::Undo;
use super::types::{Color, Move, Piece, PieceKind, Square};
use super::Board;

/// Result of [`Board::make_move`].
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was played.
    Applied,
    /// The move left the mover's king attacked and has already been reverted.
    Illegal,
}

impl MoveOutcome {
    #[inline]
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, MoveOutcome::Applied)
    }

    #[inline]
    #[must_use]
    pub const fn is_illegal(self) -> bool {
        matches!(self, MoveOutcome::Illegal)
    }
}

/// Rook relocation for a castling king landing on `king_to`.
const fn castling_rook(king_to: Square) -> Option<(Square, Square)> {
    match king_to {
        Square::G1 => Some((Square::H1, Square::F1)),
        Square::C1 => Some((Square::A1, Square::D1)),
        Square::G8 => Some((Square::H8, Square::F8)),
        Square::C8 => Some((Square::A8, Square::D8)),
        _ => None,
    }
}

/// Square of the pawn removed by an en passant capture landing on `to`.
fn en_passant_victim(to: Square, mover: Color) -> Square {
    Square::from_padded_unchecked(to.offset(-mover.pawn_push()))
}

impl Board {
    /// Place `piece` on an empty square.
    pub(crate) fn add_piece(&mut self, sq: Square, piece: Piece) {
        debug_assert!(self.piece_at(sq).is_empty(), "{sq} is occupied");
        self.hash ^= self.ctx.keys().piece(piece, sq);
        self.squares[sq.padded()] = piece;
        self.list_add(piece, sq);
    }

    /// Remove whatever piece stands on `sq`.
    pub(crate) fn clear_piece(&mut self, sq: Square) {
        let piece = self.piece_at(sq);
        debug_assert!(piece.is_piece(), "no piece on {sq}");
        self.hash ^= self.ctx.keys().piece(piece, sq);
        self.squares[sq.padded()] = Piece::Empty;
        self.list_remove(piece, sq);
    }

    pub(crate) fn move_piece(&mut self, from: Square, to: Square) {
        let piece = self.piece_at(from);
        debug_assert!(piece.is_piece(), "no piece on {from}");
        let keys = self.ctx.keys();
        self.hash ^= keys.piece(piece, from) ^ keys.piece(piece, to);
        self.squares[from.padded()] = Piece::Empty;
        self.squares[to.padded()] = piece;
        self.list_move(piece, from, to);
    }

    fn hash_en_passant(&mut self) {
        if let Some(ep) = self.en_passant {
            self.hash ^= self.ctx.keys().en_passant(ep);
        }
    }

    fn hash_castling(&mut self) {
        self.hash ^= self.ctx.keys().castling(self.castling);
    }

    fn hash_side(&mut self) {
        self.hash ^= self.ctx.keys().side();
    }

    fn push_history(&mut self, undo: Undo) {
        if self.history_len == self.history.len() {
            self.history.push(undo);
        } else {
            self.history[self.history_len] = undo;
        }
    }

    /// Play a pseudo-legal move.
    ///
    /// Returns [`MoveOutcome::Illegal`] if the move leaves the mover's own king
    /// attacked; in that case the board has already been restored. A move
    /// whose from square does not hold a piece of the side to move, or whose
    /// to square holds one, is rejected as `Illegal` without touching the board.
    pub fn make_move(&mut self, mv: Move) -> MoveOutcome {
        let from = mv.from();
        let to = mv.to();
        let mover = self.side;

        if self.piece_at(from).color() != Some(mover) || self.piece_at(to).color() == Some(mover) {
            return MoveOutcome::Illegal;
        }

        self.push_history(Undo {
            mv,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            hash: self.hash,
        });

        if mv.is_en_passant() {
            self.clear_piece(en_passant_victim(to, mover));
        } else if mv.is_castling() {
            if let Some((rook_from, rook_to)) = castling_rook(to) {
                self.move_piece(rook_from, rook_to);
            }
        }

        self.hash_en_passant();
        self.en_passant = None;
        self.hash_castling();
        self.castling
            .restrict(self.ctx.castle_perm(from) & self.ctx.castle_perm(to));
        self.hash_castling();

        self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        if !mv.captured().is_empty() {
            self.clear_piece(to);
            self.halfmove_clock = 0;
        }

        self.history_len += 1;
        self.ply += 1;

        if self.piece_at(from).is_pawn() {
            self.halfmove_clock = 0;
            if mv.is_pawn_start() {
                self.en_passant = Some(Square::from_padded_unchecked(from.offset(mover.pawn_push())));
                self.hash_en_passant();
            }
        }

        self.move_piece(from, to);

        let promoted = mv.promoted();
        if !promoted.is_empty() {
            self.clear_piece(to);
            self.add_piece(to, promoted);
        }

        self.side = mover.opponent();
        self.hash_side();

        let king_attacked = self
            .king_square(mover)
            .is_some_and(|king| self.is_square_attacked(king, self.side));
        if king_attacked {
            self.unmake_move();
            return MoveOutcome::Illegal;
        }
        MoveOutcome::Applied
    }

    /// Undo the last move, returning it; `None` if no move has been made.
    pub fn unmake_move(&mut self) -> Option<Move> {
        if self.history_len == 0 {
            return None;
        }
        self.history_len -= 1;
        self.ply = self.ply.saturating_sub(1);

        let undo = self.history[self.history_len];
        let mv = undo.mv;
        let from = mv.from();
        let to = mv.to();

        self.hash_en_passant();
        self.hash_castling();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.hash_castling();
        self.hash_en_passant();

        self.side = self.side.opponent();
        self.hash_side();
        let mover = self.side;

        if mv.is_en_passant() {
            let victim = Piece::new(mover.opponent(), PieceKind::Pawn);
            self.add_piece(en_passant_victim(to, mover), victim);
        } else if mv.is_castling() {
            if let Some((rook_from, rook_to)) = castling_rook(to) {
                self.move_piece(rook_to, rook_from);
            }
        }

        self.move_piece(to, from);

        let captured = mv.captured();
        if !captured.is_empty() {
            self.add_piece(to, captured);
        }

        if !mv.promoted().is_empty() {
            self.clear_piece(from);
            self.add_piece(from, Piece::new(mover, PieceKind::Pawn));
        }

        debug_assert_eq!(self.hash, undo.hash, "hash drifted undoing {mv}");
        Some(mv)
    }

    /// Play `mv`, reporting an illegal move as an error.
    ///
    /// # Errors
    /// [`ChessError::IllegalMove`] if the move would leave the king in check.
    /// The board is unchanged in that case.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), ChessError> {
        match self.make_move(mv) {
            MoveOutcome::Applied => Ok(()),
            MoveOutcome::Illegal => Err(ChessError::IllegalMove {
                notation: mv.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::types::MoveFlags;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn double_push_sets_en_passant_and_hash() {
        let mut board = Board::new();
        let mv = Move::try_new(sq("e2"), sq("e4"), Piece::Empty, Piece::Empty, MoveFlags::PAWN_START)
            .unwrap();
        assert_eq!(board.make_move(mv), MoveOutcome::Applied);
        assert_eq!(board.en_passant_square(), Some(sq("e3")));
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.hash(), board.compute_hash());
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.unmake_move(), Some(mv));
        assert_eq!(board.hash(), Board::new().hash());
        assert_eq!(board.unmake_move(), None);
    }

    #[test]
    fn pinned_piece_move_is_reverted() {
        // The e2 knight is pinned by the e8 rook.
        let mut board = Board::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 3 10");
        let before = board.snapshot();
        let mv = Move::try_new(sq("e2"), sq("c3"), Piece::Empty, Piece::Empty, MoveFlags::NONE)
            .unwrap();
        assert_eq!(board.make_move(mv), MoveOutcome::Illegal);
        assert_eq!(board.snapshot(), before);
        assert!(matches!(
            board.apply_move(mv),
            Err(ChessError::IllegalMove { .. })
        ));
        assert_eq!(board.snapshot(), before);
    }

    #[test]
    fn move_from_wrong_square_is_rejected() {
        let mut board = Board::new();
        let before = board.snapshot();
        let from_empty = Move::try_new(sq("e4"), sq("e5"), Piece::Empty, Piece::Empty, MoveFlags::NONE)
            .unwrap();
        let opponent_piece =
            Move::try_new(sq("e7"), sq("e5"), Piece::Empty, Piece::Empty, MoveFlags::PAWN_START)
                .unwrap();
        let onto_own_piece =
            Move::try_new(sq("d1"), sq("d2"), Piece::Empty, Piece::Empty, MoveFlags::NONE).unwrap();
        for mv in [from_empty, opponent_piece, onto_own_piece] {
            assert_eq!(board.make_move(mv), MoveOutcome::Illegal, "{mv}");
            assert!(matches!(
                board.apply_move(mv),
                Err(ChessError::IllegalMove { .. })
            ));
            assert_eq!(board.snapshot(), before);
        }
        assert_eq!(board.history_len(), 0);
        assert_eq!(board.check_board(), Ok(()));
    }

    #[test]
    fn capture_resets_clock_and_material() {
        let mut board = Board::from_fen("4k3/8/8/3p4/8/2N5/8/4K3 w - - 7 30");
        let mv = Move::try_new(sq("c3"), sq("d5"), Piece::BlackPawn, Piece::Empty, MoveFlags::NONE)
            .unwrap();
        let black_material = board.material(Color::Black);
        board.apply_move(mv).unwrap();
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.material(Color::Black), black_material - 100);
        assert!(board.squares_of(Piece::BlackPawn).is_empty());
        board.unmake_move();
        assert_eq!(board.halfmove_clock(), 7);
        assert_eq!(board.piece_at(sq("d5")), Piece::BlackPawn);
        assert_eq!(board.check_board(), Ok(()));
    }

    #[test]
    fn history_grows_past_configured_capacity() {
        use crate::board::BoardConfig;
        let mut board = Board::with_config(&BoardConfig::default().with_history_capacity(1));
        let moves = ["g1f3", "g8f6", "f3g1", "f6g8"];
        for uci in moves {
            let mv = board.parse_coordinate_move(uci).unwrap();
            board.apply_move(mv).unwrap();
        }
        assert_eq!(board.history_len(), 4);
        for _ in moves {
            assert!(board.unmake_move().is_some());
        }
        assert_eq!(board.hash(), Board::new().hash());
    }
}
