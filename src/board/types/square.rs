//! Square types and the padded 10x12 coordinate model.
//!
//! The board is stored as a 120-cell array: the 8x8 playing area surrounded by
//! one padding file on each side and two padding ranks above and below. Every
//! padding cell holds the off-board sentinel, so adding a knight or king offset
//! to any playable square always stays inside the array, and ray walks stop on
//! their own when they reach the border.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

/// Width of a padded rank (8 files plus one padding file on each side).
pub const PADDED_WIDTH: usize = 10;
/// Padding files on each side of the playing area.
pub const PADDING_FILES: usize = 1;
/// Padding ranks below rank 1 and above rank 8.
pub const PADDING_RANKS: usize = 2;
/// Total cells in the padded board.
pub const BOARD_SQUARES: usize = PADDED_WIDTH * (8 + 2 * PADDING_RANKS);
/// Number of playable squares.
pub const PLAYABLE_SQUARES: usize = 64;

const FIRST_PLAYABLE: usize = PADDING_RANKS * PADDED_WIDTH + PADDING_FILES;

/// Padded index of `(file, rank)`, both zero based. Not range checked.
#[inline]
#[must_use]
pub const fn padded_index(file: usize, rank: usize) -> usize {
    FIRST_PLAYABLE + file + rank * PADDED_WIDTH
}

/// A playable square, stored as its index in the padded board.
///
/// A `Square` never refers to a padding cell; code that walks offsets works
/// with raw `usize` indices and only converts back once it has confirmed the
/// cell is on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

impl Square {
    pub const A1: Square = Square::at(0, 0);
    pub const B1: Square = Square::at(1, 0);
    pub const C1: Square = Square::at(2, 0);
    pub const D1: Square = Square::at(3, 0);
    pub const E1: Square = Square::at(4, 0);
    pub const F1: Square = Square::at(5, 0);
    pub const G1: Square = Square::at(6, 0);
    pub const H1: Square = Square::at(7, 0);
    pub const A8: Square = Square::at(0, 7);
    pub const B8: Square = Square::at(1, 7);
    pub const C8: Square = Square::at(2, 7);
    pub const D8: Square = Square::at(3, 7);
    pub const E8: Square = Square::at(4, 7);
    pub const F8: Square = Square::at(5, 7);
    pub const G8: Square = Square::at(6, 7);
    pub const H8: Square = Square::at(7, 7);

    /// Create a square from zero-based file and rank, if both are in range.
    #[must_use]
    pub const fn new(file: usize, rank: usize) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square::at(file, rank))
        } else {
            None
        }
    }

    /// Const constructor for in-range coordinates.
    const fn at(file: usize, rank: usize) -> Self {
        Square(padded_index(file, rank) as u8)
    }

    /// Wrap a padded index that is already known to be playable.
    #[inline]
    pub(crate) const fn from_padded_unchecked(index: usize) -> Self {
        debug_assert!(is_playable(index));
        Square(index as u8)
    }

    /// Convert a padded index into a square, rejecting padding cells.
    pub fn from_padded(index: usize) -> Result<Self, SquareError> {
        if is_playable(index) {
            Ok(Square(index as u8))
        } else {
            Err(SquareError::OffBoard { index })
        }
    }

    /// Convert a dense 0-63 index (a1 = 0, h8 = 63) into a square.
    #[must_use]
    pub const fn from_dense(index: usize) -> Option<Self> {
        if index < PLAYABLE_SQUARES {
            Some(Square::at(index % 8, index / 8))
        } else {
            None
        }
    }

    /// Index into the padded 120-cell board.
    #[inline]
    #[must_use]
    pub const fn padded(self) -> usize {
        self.0 as usize
    }

    /// Dense index, a1 = 0 through h8 = 63.
    #[inline]
    #[must_use]
    pub const fn dense(self) -> usize {
        self.rank() * 8 + self.file()
    }

    /// Zero-based file (0 = a).
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        self.0 as usize % PADDED_WIDTH - PADDING_FILES
    }

    /// Zero-based rank (0 = rank 1).
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        self.0 as usize / PADDED_WIDTH - PADDING_RANKS
    }

    /// Padded index reached by stepping `delta` cells; may land on padding.
    #[inline]
    #[must_use]
    pub const fn offset(self, delta: isize) -> usize {
        (self.0 as isize + delta) as usize
    }

    #[must_use]
    pub const fn file_char(self) -> char {
        (b'a' + self.file() as u8) as char
    }

    #[must_use]
    pub const fn rank_char(self) -> char {
        (b'1' + self.rank() as u8) as char
    }

    /// All 64 playable squares in dense order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..PLAYABLE_SQUARES).map(|i| Square::at(i % 8, i / 8))
    }
}

/// Whether a padded index names one of the 64 playable squares.
#[inline]
#[must_use]
pub const fn is_playable(index: usize) -> bool {
    if index >= BOARD_SQUARES {
        return false;
    }
    let file = index % PADDED_WIDTH;
    let rank = index / PADDED_WIDTH;
    file >= PADDING_FILES
        && file < PADDING_FILES + 8
        && rank >= PADDING_RANKS
        && rank < PADDING_RANKS + 8
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let invalid = || SquareError::InvalidNotation {
            notation: s.to_string(),
        };
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = match bytes[0].to_ascii_lowercase() {
            c @ b'a'..=b'h' => (c - b'a') as usize,
            _ => return Err(invalid()),
        };
        let rank = match bytes[1] {
            c @ b'1'..=b'8' => (c - b'1') as usize,
            _ => return Err(invalid()),
        };
        Ok(Square::at(file, rank))
    }
}
