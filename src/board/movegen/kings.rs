use super::GenMode;
use crate::board::types::{Color, MoveFlags, Piece, PieceKind, Square};
use crate::board::Board;

/// King start, rook start, squares that must be empty and squares that must
/// not be attacked, per castling right.
struct CastlePath {
    color: Color,
    kingside: bool,
    king: Square,
    king_to: Square,
    rook: Square,
    empty: &'static [Square],
    safe: [Square; 2],
}

const CASTLE_PATHS: [CastlePath; 4] = [
    CastlePath {
        color: Color::White,
        kingside: true,
        king: Square::E1,
        king_to: Square::G1,
        rook: Square::H1,
        empty: &[Square::F1, Square::G1],
        safe: [Square::E1, Square::F1],
    },
    CastlePath {
        color: Color::White,
        kingside: false,
        king: Square::E1,
        king_to: Square::C1,
        rook: Square::A1,
        empty: &[Square::D1, Square::C1, Square::B1],
        safe: [Square::E1, Square::D1],
    },
    CastlePath {
        color: Color::Black,
        kingside: true,
        king: Square::E8,
        king_to: Square::G8,
        rook: Square::H8,
        empty: &[Square::F8, Square::G8],
        safe: [Square::E8, Square::F8],
    },
    CastlePath {
        color: Color::Black,
        kingside: false,
        king: Square::E8,
        king_to: Square::C8,
        rook: Square::A8,
        empty: &[Square::D8, Square::C8, Square::B8],
        safe: [Square::E8, Square::D8],
    },
];

impl Board {
    pub(super) fn generate_king_moves(&mut self, mode: GenMode) {
        let king = Piece::new(self.side, PieceKind::King);
        self.generate_offset_moves(king, mode);
    }

    /// Castling moves. The king's landing square is left to the legality
    /// check in `make_move`.
    pub(super) fn generate_castling_moves(&mut self) {
        let side = self.side;
        for path in CASTLE_PATHS.iter().filter(|p| p.color == side) {
            if !self.castling.has(side, path.kingside) {
                continue;
            }
            let in_place = self.piece_at(path.king) == Piece::new(side, PieceKind::King)
                && self.piece_at(path.rook) == Piece::new(side, PieceKind::Rook);
            if !in_place || path.empty.iter().any(|&sq| !self.piece_at(sq).is_empty()) {
                continue;
            }
            if path
                .safe
                .iter()
                .any(|&sq| self.is_square_attacked(sq, side.opponent()))
            {
                continue;
            }
            self.push_quiet(path.king, path.king_to, MoveFlags::CASTLING);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::types::{CastlingRights, Color, Piece, Square};
    use crate::board::Board;

    fn castles(board: &mut Board) -> Vec<String> {
        board
            .legal_moves()
            .iter()
            .filter(|m| m.is_castling())
            .map(|m| m.to_string())
            .collect()
    }

    #[test]
    fn both_sides_available_when_clear() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert_eq!(castles(&mut board), vec!["e1g1", "e1c1"]);
    }

    #[test]
    fn attacked_transit_square_blocks_castling() {
        // Black rook on f8 covers f1.
        let mut board = Board::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let pseudo: Vec<String> = board
            .generate_moves()
            .iter()
            .filter(|m| m.mv.is_castling())
            .map(|m| m.mv.to_string())
            .collect();
        assert_eq!(pseudo, vec!["e1c1"]);
    }

    #[test]
    fn no_castling_out_of_check() {
        let mut board = Board::from_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(castles(&mut board).is_empty());
    }

    #[test]
    fn kingside_castle_moves_rook_and_clears_rights() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let castle = board.parse_coordinate_move("e1g1").unwrap();
        assert!(castle.is_castling());
        board.apply_move(castle).unwrap();
        assert_eq!(board.piece_at(Square::G1), Piece::WhiteKing);
        assert_eq!(board.piece_at(Square::F1), Piece::WhiteRook);
        assert_eq!(board.piece_at(Square::H1), Piece::Empty);
        assert!(!board.castling_rights().has(Color::White, true));
        assert!(!board.castling_rights().has(Color::White, false));
        assert!(board.castling_rights().has(Color::Black, true));
        assert_eq!(board.hash(), board.compute_hash());
        board.unmake_move();
        assert_eq!(board.castling_rights(), CastlingRights::all());
        assert_eq!(board.piece_at(Square::H1), Piece::WhiteRook);
    }

    #[test]
    fn rights_without_rook_do_not_castle() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w KQ - 0 1");
        assert!(castles(&mut board).is_empty());
    }
}
