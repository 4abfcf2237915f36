//! Ply-indexed scratch storage for generated moves.

use crate::board::types::{Move, ScoredMove};

/// One growable buffer shared by every ply, split into frames by a stack of
/// start offsets.
///
/// Frame `d` occupies `moves[starts[d]..starts[d + 1]]`. Opening frame `d`
/// discards frames `d` and deeper but leaves shallower frames untouched, so a
/// recursive walk can generate at depth `d + 1` while still iterating the
/// moves of depth `d`. Once the buffer has grown to the deepest walk's needs,
/// generating no longer allocates.
#[derive(Clone, Debug)]
pub struct MoveArena {
    moves: Vec<ScoredMove>,
    starts: Vec<usize>,
}

impl MoveArena {
    #[must_use]
    pub fn with_capacity(moves: usize, plies: usize) -> Self {
        let mut starts = Vec::with_capacity(plies + 1);
        starts.push(0);
        MoveArena {
            moves: Vec::with_capacity(moves),
            starts,
        }
    }

    /// Start a fresh, empty frame at `ply`.
    pub fn open(&mut self, ply: usize) {
        while self.starts.len() <= ply {
            self.starts.push(self.moves.len());
        }
        self.starts.truncate(ply + 1);
        let start = self.starts[ply];
        self.moves.truncate(start);
        self.starts.push(start);
    }

    /// Append to the most recently opened frame.
    #[inline]
    pub fn push(&mut self, mv: Move, score: i32) {
        self.moves.push(ScoredMove { mv, score });
        if let Some(end) = self.starts.last_mut() {
            *end += 1;
        }
    }

    /// Moves of the frame at `ply`; empty if it was never opened.
    #[must_use]
    pub fn frame(&self, ply: usize) -> &[ScoredMove] {
        match (self.starts.get(ply), self.starts.get(ply + 1)) {
            (Some(&start), Some(&end)) => &self.moves[start..end],
            _ => &[],
        }
    }

    /// Mutable view of a frame, for in-place reordering.
    pub fn frame_mut(&mut self, ply: usize) -> &mut [ScoredMove] {
        match (self.starts.get(ply), self.starts.get(ply + 1)) {
            (Some(&start), Some(&end)) => &mut self.moves[start..end],
            _ => &mut [],
        }
    }

    #[must_use]
    pub fn frame_len(&self, ply: usize) -> usize {
        self.frame(ply).len()
    }

    /// Move `index` of frame `ply`.
    #[must_use]
    pub fn get(&self, ply: usize, index: usize) -> Option<ScoredMove> {
        self.frame(ply).get(index).copied()
    }

    /// Drop every frame; capacity is kept.
    pub fn clear(&mut self) {
        self.moves.clear();
        self.starts.truncate(1);
    }
}
