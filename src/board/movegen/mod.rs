//! Pseudo-legal move generation into the ply-indexed move arena.
//!
//! Generation never checks king safety; [`Board::make_move`] does that and
//! reverts illegal moves itself. [`Board::legal_moves`] combines the two.
//!
//! # Example
//! ```
//! use mailbox_chess::board::Board;
//!
//! let mut board = Board::new();
//! assert_eq!(board.legal_moves().len(), 20);
//! ```

mod arena;
mod kings;
mod knights;
mod ordering;
mod pawns;
mod sliders;

pub use arena::MoveArena;
pub use ordering::OrderingTables;

use super::tables::{directions, CAPTURE_BONUS, MVV_LVA};
use super::types::{Move, MoveFlags, Piece, ScoredMove, Square};
use super::Board;

/// Which moves a generation pass emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GenMode {
    All,
    /// Captures and promotions only; no quiet moves, no castling.
    Captures,
}

impl Board {
    /// Generate all pseudo-legal moves for the side to move into the arena
    /// frame of the current ply, and return that frame.
    pub fn generate_moves(&mut self) -> &[ScoredMove] {
        self.generate(GenMode::All);
        self.arena.frame(self.ply)
    }

    /// Like [`Board::generate_moves`], restricted to captures and promotions.
    pub fn generate_captures(&mut self) -> &[ScoredMove] {
        self.generate(GenMode::Captures);
        self.arena.frame(self.ply)
    }

    /// The arena frame generated at `ply`, which stays valid while deeper plies
    /// are generated.
    #[must_use]
    pub fn moves_at(&self, ply: usize) -> &[ScoredMove] {
        self.arena.frame(ply)
    }

    /// Mutable arena frame, for a search that reorders moves in place.
    pub fn moves_at_mut(&mut self, ply: usize) -> &mut [ScoredMove] {
        self.arena.frame_mut(ply)
    }

    pub(crate) fn generate(&mut self, mode: GenMode) {
        self.arena.open(self.ply);
        self.generate_pawn_moves(mode);
        if mode == GenMode::All {
            self.generate_castling_moves();
        }
        self.generate_slider_moves(mode);
        self.generate_knight_moves(mode);
        self.generate_king_moves(mode);
    }

    /// Every legal move, found by trying each pseudo-legal move.
    pub fn legal_moves(&mut self) -> Vec<Move> {
        self.filter_legal(GenMode::All)
    }

    /// Legal captures and promotions.
    pub fn legal_captures(&mut self) -> Vec<Move> {
        self.filter_legal(GenMode::Captures)
    }

    fn filter_legal(&mut self, mode: GenMode) -> Vec<Move> {
        let ply = self.ply;
        self.generate(mode);
        let count = self.arena.frame_len(ply);
        let mut legal = Vec::with_capacity(count);
        for index in 0..count {
            let Some(ScoredMove { mv, .. }) = self.arena.get(ply, index) else {
                break;
            };
            if self.make_move(mv).is_applied() {
                self.unmake_move();
                legal.push(mv);
            }
        }
        legal
    }

    /// Whether `mv` is both generated here and legal.
    pub fn move_exists(&mut self, mv: Move) -> bool {
        let ply = self.ply;
        self.generate(GenMode::All);
        let generated = self.arena.frame(ply).iter().any(|m| m.mv == mv);
        if generated && self.make_move(mv).is_applied() {
            self.unmake_move();
            return true;
        }
        false
    }

    /// Whether the side to move has any legal move.
    pub fn has_legal_move(&mut self) -> bool {
        let ply = self.ply;
        self.generate(GenMode::All);
        let count = self.arena.frame_len(ply);
        for index in 0..count {
            let Some(ScoredMove { mv, .. }) = self.arena.get(ply, index) else {
                break;
            };
            if self.make_move(mv).is_applied() {
                self.unmake_move();
                return true;
            }
        }
        false
    }

    pub fn is_checkmate(&mut self) -> bool {
        self.in_check() && !self.has_legal_move()
    }

    pub fn is_stalemate(&mut self) -> bool {
        !self.in_check() && !self.has_legal_move()
    }

    /// Count leaf nodes of the legal move tree to `depth`.
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let ply = self.ply;
        self.generate(GenMode::All);
        let count = self.arena.frame_len(ply);
        let mut nodes = 0;
        for index in 0..count {
            let Some(ScoredMove { mv, .. }) = self.arena.get(ply, index) else {
                break;
            };
            if self.make_move(mv).is_applied() {
                nodes += if depth == 1 { 1 } else { self.perft(depth - 1) };
                self.unmake_move();
            }
        }
        nodes
    }

    /// Perft split by root move.
    pub fn perft_divide(&mut self, depth: usize) -> Vec<(Move, u64)> {
        let legal = self.legal_moves();
        let mut split = Vec::with_capacity(legal.len());
        for mv in legal {
            if self.make_move(mv).is_applied() {
                let nodes = self.perft(depth.saturating_sub(1));
                self.unmake_move();
                split.push((mv, nodes));
            }
        }
        split
    }

    // Move emitters shared by the per-piece generators.

    fn push_quiet(&mut self, from: Square, to: Square, flags: MoveFlags) {
        let piece = self.piece_at(from);
        let mv = Move::encode(from, to, Piece::Empty, Piece::Empty, flags);
        let score = self.ordering.quiet_score(self.ply, mv, piece);
        self.arena.push(mv, score);
    }

    fn push_capture(&mut self, from: Square, to: Square, captured: Piece, promoted: Piece) {
        let attacker = self.piece_at(from);
        let mv = Move::encode(from, to, captured, promoted, MoveFlags::NONE);
        let score = MVV_LVA[captured.index()][attacker.index()] + CAPTURE_BONUS;
        self.arena.push(mv, score);
    }

    /// Step (and for sliders, walk) from every `piece` along its offsets.
    fn generate_offset_moves(&mut self, piece: Piece, mode: GenMode) {
        let Some(color) = piece.color() else {
            return;
        };
        let enemy = color.opponent();
        let slides = piece.slides();
        let count = self.piece_count[piece.index()];
        for slot in 0..count {
            let from = self.piece_list[piece.index()][slot];
            for &step in directions(piece) {
                let mut index = from.offset(step);
                loop {
                    let target = self.squares[index];
                    if target == Piece::OffBoard {
                        break;
                    }
                    let to = Square::from_padded_unchecked(index);
                    if target.is_empty() {
                        if mode == GenMode::All {
                            self.push_quiet(from, to, MoveFlags::NONE);
                        }
                    } else {
                        if target.color() == Some(enemy) {
                            self.push_capture(from, to, target, Piece::Empty);
                        }
                        break;
                    }
                    if !slides {
                        break;
                    }
                    index = (index as isize + step) as usize;
                }
            }
        }
    }
}
