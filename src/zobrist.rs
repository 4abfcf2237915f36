//! Zobrist hashing keys.
//!
//! Keys are drawn from a seeded `StdRng`, so two key sets built from the same
//! seed are identical and hashes are reproducible across runs.

use rand::prelude::*;

use crate::board::{CastlingRights, Color, Piece, Square, BOARD_SQUARES, PIECE_COUNT};

/// Seed used when no other is configured.
pub const DEFAULT_ZOBRIST_SEED: u64 = 1234567890;

/// Random keys for every hashed feature of a position.
pub struct ZobristKeys {
    // piece_keys[piece index][padded square]; row 0 (empty) is never used
    piece_keys: Box<[[u64; BOARD_SQUARES]; PIECE_COUNT]>,
    side_key: u64,
    // castling_keys[rights mask]
    castling_keys: [u64; 16],
    // en_passant_keys[file]
    en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut piece_keys = Box::new([[0u64; BOARD_SQUARES]; PIECE_COUNT]);
        let mut castling_keys = [0u64; 16];
        let mut en_passant_keys = [0u64; 8];

        for row in piece_keys.iter_mut() {
            for key in row.iter_mut() {
                *key = rng.gen();
            }
        }
        let side_key = rng.gen();
        for key in &mut castling_keys {
            *key = rng.gen();
        }
        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            side_key,
            castling_keys,
            en_passant_keys,
        }
    }

    #[inline]
    #[must_use]
    pub fn piece(&self, piece: Piece, square: Square) -> u64 {
        self.piece_keys[piece.index()][square.padded()]
    }

    /// Present in the hash whenever black is to move.
    #[inline]
    #[must_use]
    pub fn side(&self) -> u64 {
        self.side_key
    }

    #[inline]
    #[must_use]
    pub fn castling(&self, rights: CastlingRights) -> u64 {
        self.castling_keys[rights.as_u8() as usize]
    }

    /// Keyed by the file of the en passant target.
    #[inline]
    #[must_use]
    pub fn en_passant(&self, square: Square) -> u64 {
        self.en_passant_keys[square.file()]
    }

    /// Contribution of the side to move.
    #[inline]
    #[must_use]
    pub fn side_to_move(&self, side: Color) -> u64 {
        match side {
            Color::White => 0,
            Color::Black => self.side_key,
        }
    }
}
