//! Static lookup tables for the mailbox board.
//!
//! Everything here is a compile-time constant indexed by [`Piece::index`] or by
//! padded square index. Seeded data (hash keys, coordinate maps) lives in
//! [`MoveGenContext`](super::MoveGenContext) instead.

use super::types::{padded_index, Color, Piece, BOARD_SQUARES, PIECE_COUNT};
use super::types::{CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K, CASTLE_WHITE_Q};

// Indexed by Piece::index(): empty, WP..WK, BP..BK, off board.
const W: Option<Color> = Some(Color::White);
const B: Option<Color> = Some(Color::Black);

pub(crate) const PIECE_COLOR: [Option<Color>; 14] =
    [None, W, W, W, W, W, W, B, B, B, B, B, B, None];

pub(crate) const PIECE_VALUE: [i32; 14] = [
    0, 100, 325, 325, 550, 1000, 50000, 100, 325, 325, 550, 1000, 50000, 0,
];

pub(crate) const PIECE_BIG: [bool; 14] = [
    false, false, true, true, true, true, true, false, true, true, true, true, true, false,
];

pub(crate) const PIECE_MAJOR: [bool; 14] = [
    false, false, false, false, true, true, true, false, false, false, true, true, true, false,
];

pub(crate) const PIECE_MINOR: [bool; 14] = [
    false, false, true, true, false, false, false, false, true, true, false, false, false, false,
];

pub(crate) const PIECE_SLIDES: [bool; 14] = [
    false, false, false, true, true, true, false, false, false, true, true, true, false, false,
];

pub(crate) const KNIGHT_DIRS: [isize; 8] = [-8, -19, -21, -12, 8, 19, 21, 12];
pub(crate) const ROOK_DIRS: [isize; 4] = [-1, -10, 1, 10];
pub(crate) const BISHOP_DIRS: [isize; 4] = [-11, -9, 9, 11];
pub(crate) const KING_DIRS: [isize; 8] = [-1, -10, 1, 10, -9, -11, 11, 9];

/// Movement offsets for a piece; pawns are handled separately.
#[must_use]
pub(crate) const fn directions(piece: Piece) -> &'static [isize] {
    match piece {
        Piece::WhiteKnight | Piece::BlackKnight => &KNIGHT_DIRS,
        Piece::WhiteBishop | Piece::BlackBishop => &BISHOP_DIRS,
        Piece::WhiteRook | Piece::BlackRook => &ROOK_DIRS,
        Piece::WhiteQueen | Piece::BlackQueen | Piece::WhiteKing | Piece::BlackKing => &KING_DIRS,
        _ => &[],
    }
}

/// Castling rights kept when a move touches a square: `rights &= perm[from] & perm[to]`.
pub(crate) const CASTLE_PERM: [u8; BOARD_SQUARES] = build_castle_perm();

const fn build_castle_perm() -> [u8; BOARD_SQUARES] {
    let all = CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;
    let mut perm = [all; BOARD_SQUARES];
    perm[padded_index(0, 0)] = all & !CASTLE_WHITE_Q;
    perm[padded_index(4, 0)] = all & !(CASTLE_WHITE_K | CASTLE_WHITE_Q);
    perm[padded_index(7, 0)] = all & !CASTLE_WHITE_K;
    perm[padded_index(0, 7)] = all & !CASTLE_BLACK_Q;
    perm[padded_index(4, 7)] = all & !(CASTLE_BLACK_K | CASTLE_BLACK_Q);
    perm[padded_index(7, 7)] = all & !CASTLE_BLACK_K;
    perm
}

// Move ordering scores.
pub(crate) const CAPTURE_BONUS: i32 = 1_000_000;
pub(crate) const EN_PASSANT_SCORE: i32 = 105 + CAPTURE_BONUS;
pub(crate) const FIRST_KILLER_SCORE: i32 = 900_000;
pub(crate) const SECOND_KILLER_SCORE: i32 = 800_000;

const VICTIM_SCORE: [i32; PIECE_COUNT] = [
    0, 100, 200, 300, 400, 500, 600, 100, 200, 300, 400, 500, 600,
];

/// Most-valuable-victim / least-valuable-attacker scores, `[victim][attacker]`.
pub(crate) const MVV_LVA: [[i32; PIECE_COUNT]; PIECE_COUNT] = build_mvv_lva();

const fn build_mvv_lva() -> [[i32; PIECE_COUNT]; PIECE_COUNT] {
    let mut table = [[0; PIECE_COUNT]; PIECE_COUNT];
    let mut victim = 1;
    while victim < PIECE_COUNT {
        let mut attacker = 1;
        while attacker < PIECE_COUNT {
            table[victim][attacker] = VICTIM_SCORE[victim] + 6 - VICTIM_SCORE[attacker] / 100;
            attacker += 1;
        }
        victim += 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    #[test]
    fn castle_perm_only_touches_home_squares() {
        assert_eq!(CASTLE_PERM[Square::A1.padded()], 13);
        assert_eq!(CASTLE_PERM[Square::E1.padded()], 12);
        assert_eq!(CASTLE_PERM[Square::H1.padded()], 14);
        assert_eq!(CASTLE_PERM[Square::A8.padded()], 7);
        assert_eq!(CASTLE_PERM[Square::E8.padded()], 3);
        assert_eq!(CASTLE_PERM[Square::H8.padded()], 11);
        let d4: Square = "d4".parse().unwrap();
        assert_eq!(CASTLE_PERM[d4.padded()], 15);
    }

    #[test]
    fn mvv_lva_prefers_cheap_attackers_on_dear_victims() {
        let pxq = MVV_LVA[Piece::BlackQueen.index()][Piece::WhitePawn.index()];
        let qxq = MVV_LVA[Piece::BlackQueen.index()][Piece::WhiteQueen.index()];
        let pxp = MVV_LVA[Piece::BlackPawn.index()][Piece::WhitePawn.index()];
        assert!(pxq > qxq);
        assert!(qxq > pxp);
        assert_eq!(pxp, 105);
    }

    #[test]
    fn direction_sets() {
        assert_eq!(directions(Piece::WhiteKnight).len(), 8);
        assert_eq!(directions(Piece::BlackRook), &ROOK_DIRS);
        assert_eq!(directions(Piece::WhiteQueen), &KING_DIRS);
        assert!(directions(Piece::WhitePawn).is_empty());
    }
}
