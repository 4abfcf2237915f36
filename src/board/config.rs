//! Board construction settings.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::zobrist::DEFAULT_ZOBRIST_SEED;

/// Plies of history reserved up front; the stack grows past this if needed.
pub const DEFAULT_HISTORY_CAPACITY: usize = 2048;
/// Search depth the move arena and killer table are sized for up front.
pub const DEFAULT_MAX_PLY: usize = 64;
/// Moves reserved per ply in the move arena.
pub const DEFAULT_MOVES_PER_PLY: usize = 256;

/// Settings used to build a [`Board`](super::Board).
///
/// None of the capacities are hard limits: history, arena and killer tables
/// all grow on demand. They only control how much is allocated up front.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    pub zobrist_seed: u64,
    pub history_capacity: usize,
    pub max_ply: usize,
    pub moves_per_ply: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            zobrist_seed: DEFAULT_ZOBRIST_SEED,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            max_ply: DEFAULT_MAX_PLY,
            moves_per_ply: DEFAULT_MOVES_PER_PLY,
        }
    }
}

impl BoardConfig {
    #[must_use]
    pub fn with_zobrist_seed(mut self, seed: u64) -> Self {
        self.zobrist_seed = seed;
        self
    }

    #[must_use]
    pub fn with_history_capacity(mut self, plies: usize) -> Self {
        self.history_capacity = plies;
        self
    }

    #[must_use]
    pub fn with_max_ply(mut self, max_ply: usize) -> Self {
        self.max_ply = max_ply;
        self
    }

    #[must_use]
    pub fn with_moves_per_ply(mut self, moves: usize) -> Self {
        self.moves_per_ply = moves;
        self
    }

    /// Initial move arena capacity.
    #[must_use]
    pub fn arena_capacity(&self) -> usize {
        self.max_ply.saturating_mul(self.moves_per_ply)
    }
}
