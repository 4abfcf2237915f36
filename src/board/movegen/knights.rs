use super::GenMode;
use crate::board::types::{Piece, PieceKind};
use crate::board::Board;

impl Board {
    pub(super) fn generate_knight_moves(&mut self, mode: GenMode) {
        let knight = Piece::new(self.side, PieceKind::Knight);
        self.generate_offset_moves(knight, mode);
    }
}
