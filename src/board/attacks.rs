//! Square attack detection.

use super::tables::{BISHOP_DIRS, KING_DIRS, KNIGHT_DIRS, ROOK_DIRS};
use super::types::{Color, Piece, Square};
use super::Board;

impl Board {
    /// Whether any piece of `by` attacks `sq`.
    ///
    /// Checks pawns, knights, rook/queen rays, bishop/queen rays and finally the
    /// king. A ray stops at the first occupied cell or the border; only that
    /// first piece can attack along it.
    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        let (pawn_steps, pawn) = match by {
            Color::White => ([-11, -9], Piece::WhitePawn),
            Color::Black => ([11, 9], Piece::BlackPawn),
        };
        if pawn_steps
            .iter()
            .any(|&step| self.squares[sq.offset(step)] == pawn)
        {
            return true;
        }

        let owned_by = |piece: Piece| piece.color() == Some(by);

        if KNIGHT_DIRS.iter().any(|&d| {
            let piece = self.squares[sq.offset(d)];
            piece.is_knight() && owned_by(piece)
        }) {
            return true;
        }

        if ROOK_DIRS
            .iter()
            .any(|&d| self.first_piece_on_ray(sq, d).is_some_and(|p| p.is_rook_or_queen() && owned_by(p)))
        {
            return true;
        }

        if BISHOP_DIRS
            .iter()
            .any(|&d| self.first_piece_on_ray(sq, d).is_some_and(|p| p.is_bishop_or_queen() && owned_by(p)))
        {
            return true;
        }

        KING_DIRS.iter().any(|&d| {
            let piece = self.squares[sq.offset(d)];
            piece.is_king() && owned_by(piece)
        })
    }

    /// First piece met walking from `sq` in direction `step`, if any before the border.
    fn first_piece_on_ray(&self, sq: Square, step: isize) -> Option<Piece> {
        let mut index = sq.offset(step);
        loop {
            match self.squares[index] {
                Piece::OffBoard => return None,
                Piece::Empty => index = (index as isize + step) as usize,
                piece => return Some(piece),
            }
        }
    }

    /// Whether the side to move is in check.
    #[must_use]
    pub fn in_check(&self) -> bool {
        self.king_square(self.side)
            .is_some_and(|king| self.is_square_attacked(king, self.side.opponent()))
    }

    /// Every square attacked by `by`, in dense order.
    #[must_use]
    pub fn attacked_squares(&self, by: Color) -> Vec<Square> {
        self.ctx
            .playable_squares()
            .iter()
            .copied()
            .filter(|&sq| self.is_square_attacked(sq, by))
            .collect()
    }
}
