//! Quiet-move ordering inputs: killer slots and the history table.
//!
//! The generator only reads these to score quiet moves. Writing them is the
//! job of whatever search drives the board.

use crate::board::tables::{FIRST_KILLER_SCORE, SECOND_KILLER_SCORE};
use crate::board::types::{Move, Piece, Square, BOARD_SQUARES, PIECE_COUNT};

#[derive(Clone, Debug)]
pub struct OrderingTables {
    killers: Vec<[Move; 2]>,
    // history[piece index * BOARD_SQUARES + padded to-square]
    history: Vec<i32>,
}

impl OrderingTables {
    #[must_use]
    pub fn new(max_ply: usize) -> Self {
        OrderingTables {
            killers: vec![[Move::NULL; 2]; max_ply],
            history: vec![0; PIECE_COUNT * BOARD_SQUARES],
        }
    }

    /// Remember a quiet move that caused a cutoff at `ply`.
    pub fn record_killer(&mut self, ply: usize, mv: Move) {
        if ply >= self.killers.len() {
            self.killers.resize(ply + 1, [Move::NULL; 2]);
        }
        let slots = &mut self.killers[ply];
        if slots[0] != mv {
            slots[1] = slots[0];
            slots[0] = mv;
        }
    }

    /// Reward `piece` arriving on `to`.
    pub fn record_history(&mut self, piece: Piece, to: Square, bonus: i32) {
        let entry = &mut self.history[piece.index() * BOARD_SQUARES + to.padded()];
        *entry = entry.saturating_add(bonus);
    }

    #[must_use]
    pub fn killers(&self, ply: usize) -> [Move; 2] {
        self.killers.get(ply).copied().unwrap_or([Move::NULL; 2])
    }

    #[must_use]
    pub fn history(&self, piece: Piece, to: Square) -> i32 {
        self.history[piece.index() * BOARD_SQUARES + to.padded()]
    }

    /// Ordering score of a quiet move by `piece` at `ply`.
    #[must_use]
    pub fn quiet_score(&self, ply: usize, mv: Move, piece: Piece) -> i32 {
        let [first, second] = self.killers(ply);
        if first == mv {
            FIRST_KILLER_SCORE
        } else if second == mv {
            SECOND_KILLER_SCORE
        } else {
            self.history(piece, mv.to())
        }
    }

    pub fn clear(&mut self) {
        self.killers.fill([Move::NULL; 2]);
        self.history.fill(0);
    }
}
