use super::GenMode;
use crate::board::tables::EN_PASSANT_SCORE;
use crate::board::types::{Move, MoveFlags, Piece, PieceKind, Square};
use crate::board::Board;

impl Board {
    pub(super) fn generate_pawn_moves(&mut self, mode: GenMode) {
        let side = self.side;
        let pawn = Piece::new(side, PieceKind::Pawn);
        let enemy = side.opponent();
        let push = side.pawn_push();

        let count = self.piece_count[pawn.index()];
        for slot in 0..count {
            let from = self.piece_list[pawn.index()][slot];
            let promotes = from.rank() == side.pre_promotion_rank();

            let ahead = from.offset(push);
            if self.squares[ahead].is_empty() {
                let to = Square::from_padded_unchecked(ahead);
                if promotes {
                    self.push_pawn_move(from, to, Piece::Empty, true);
                } else if mode == GenMode::All {
                    self.push_quiet(from, to, MoveFlags::NONE);
                    let two_ahead = to.offset(push);
                    if from.rank() == side.pawn_start_rank() && self.squares[two_ahead].is_empty() {
                        self.push_quiet(
                            from,
                            Square::from_padded_unchecked(two_ahead),
                            MoveFlags::PAWN_START,
                        );
                    }
                }
            }

            for diagonal in [push - 1, push + 1] {
                let index = from.offset(diagonal);
                let target = self.squares[index];
                if target.color() == Some(enemy) {
                    self.push_pawn_move(from, Square::from_padded_unchecked(index), target, promotes);
                } else if target.is_empty()
                    && self.en_passant.map(Square::padded) == Some(index)
                {
                    let mv = Move::encode(
                        from,
                        Square::from_padded_unchecked(index),
                        Piece::Empty,
                        Piece::Empty,
                        MoveFlags::EN_PASSANT,
                    );
                    self.arena.push(mv, EN_PASSANT_SCORE);
                }
            }
        }
    }

    /// Emit a pawn move to `to`, fanning out into the four promotions when the
    /// pawn reaches the last rank.
    fn push_pawn_move(&mut self, from: Square, to: Square, captured: Piece, promotes: bool) {
        if promotes {
            for kind in PieceKind::PROMOTIONS {
                let promoted = Piece::new(self.side, kind);
                if captured.is_empty() {
                    let mv = Move::encode(from, to, Piece::Empty, promoted, MoveFlags::NONE);
                    let score = self.ordering.quiet_score(self.ply, mv, self.piece_at(from));
                    self.arena.push(mv, score);
                } else {
                    self.push_capture(from, to, captured, promoted);
                }
            }
        } else if captured.is_empty() {
            self.push_quiet(from, to, MoveFlags::NONE);
        } else {
            self.push_capture(from, to, captured, Piece::Empty);
        }
    }
}
