//! Immutable move-generation context.
//!
//! A [`MoveGenContext`] bundles the hash keys and coordinate maps a board needs.
//! It is built once, never mutated, and shared between boards through `Arc`.
//! Boards built from the same seed hash identically, which keeps tests
//! reproducible.

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::tables;
use super::types::{is_playable, Piece, Square, BOARD_SQUARES, PLAYABLE_SQUARES};
use crate::zobrist::{ZobristKeys, DEFAULT_ZOBRIST_SEED};

static DEFAULT_CONTEXT: Lazy<Arc<MoveGenContext>> =
    Lazy::new(|| Arc::new(MoveGenContext::new(DEFAULT_ZOBRIST_SEED)));

pub struct MoveGenContext {
    seed: u64,
    keys: ZobristKeys,
    dense_to_padded: [Square; PLAYABLE_SQUARES],
    padded_to_dense: [Option<u8>; BOARD_SQUARES],
}

impl MoveGenContext {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut dense_to_padded = [Square::A1; PLAYABLE_SQUARES];
        let mut padded_to_dense = [None; BOARD_SQUARES];
        for (dense, square) in Square::all().enumerate() {
            dense_to_padded[dense] = square;
            padded_to_dense[square.padded()] = Some(dense as u8);
        }
        MoveGenContext {
            seed,
            keys: ZobristKeys::new(seed),
            dense_to_padded,
            padded_to_dense,
        }
    }

    /// Shared context for the default seed.
    #[must_use]
    pub fn shared_default() -> Arc<MoveGenContext> {
        Arc::clone(&DEFAULT_CONTEXT)
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    #[must_use]
    pub fn keys(&self) -> &ZobristKeys {
        &self.keys
    }

    /// The 64 playable squares in dense order (a1, b1, ..., h8).
    #[inline]
    #[must_use]
    pub fn playable_squares(&self) -> &[Square; PLAYABLE_SQUARES] {
        &self.dense_to_padded
    }

    /// Dense index of a padded cell, `None` for padding.
    #[inline]
    #[must_use]
    pub fn dense_index(&self, padded: usize) -> Option<usize> {
        self.padded_to_dense
            .get(padded)
            .copied()
            .flatten()
            .map(usize::from)
    }

    /// Offsets a non-pawn piece moves along.
    #[inline]
    #[must_use]
    pub fn directions(&self, piece: Piece) -> &'static [isize] {
        tables::directions(piece)
    }

    /// Rights kept after a move touches `square`.
    #[inline]
    #[must_use]
    pub fn castle_perm(&self, square: Square) -> u8 {
        tables::CASTLE_PERM[square.padded()]
    }
}

impl std::fmt::Debug for MoveGenContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveGenContext")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
