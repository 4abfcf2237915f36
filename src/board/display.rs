//! Human-readable board dump.

use std::fmt;

use super::types::{Color, Square};
use super::Board;

/// Ranks 8 to 1 with file letters underneath, then side to move, en passant
/// square, castling rights and the position hash.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                if let Some(sq) = Square::new(file, rank) {
                    write!(f, " {}", self.piece_at(sq).to_fen_char())?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        writeln!(
            f,
            "side: {}",
            match self.side {
                Color::White => 'w',
                Color::Black => 'b',
            }
        )?;
        match self.en_passant {
            Some(sq) => writeln!(f, "en passant: {sq}")?,
            None => writeln!(f, "en passant: -")?,
        }
        writeln!(f, "castling: {}", self.castling)?;
        write!(f, "hash: {:#018x}", self.hash)
    }
}
