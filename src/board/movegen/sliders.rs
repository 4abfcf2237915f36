use super::GenMode;
use crate::board::types::{Piece, PieceKind};
use crate::board::Board;

const SLIDERS: [PieceKind; 3] = [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen];

impl Board {
    pub(super) fn generate_slider_moves(&mut self, mode: GenMode) {
        for kind in SLIDERS {
            self.generate_offset_moves(Piece::new(self.side, kind), mode);
        }
    }
}
