//! Piece, piece kind and color types.
//!
//! A [`Piece`] is one of the 13 cell values of the board (empty plus six kinds
//! for each color), with one extra value for the padding border. Each value is
//! an index into the classification tables in `board::tables`.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::tables;

/// Number of real cell values (empty plus twelve pieces).
pub const PIECE_COUNT: usize = 13;

/// Chess colors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colors in index order (White=0, Black=1)
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Returns the opposite color
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Padded-board step of a single pawn push.
    #[inline]
    #[must_use]
    pub(crate) const fn pawn_push(self) -> isize {
        match self {
            Color::White => 10,
            Color::Black => -10,
        }
    }

    /// Rank a pawn of this color starts on (zero based).
    #[inline]
    #[must_use]
    pub(crate) const fn pawn_start_rank(self) -> usize {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank from which a pawn push promotes (zero based).
    #[inline]
    #[must_use]
    pub(crate) const fn pre_promotion_rank(self) -> usize {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Colorless piece kinds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Promotion choices, queen first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Parse from a letter in either case (p, n, b, r, q, k).
    #[must_use]
    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Uppercase letter as used in SAN.
    #[inline]
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// Contents of one cell of the padded board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Piece {
    #[default]
    Empty = 0,
    WhitePawn,
    WhiteKnight,
    WhiteBishop,
    WhiteRook,
    WhiteQueen,
    WhiteKing,
    BlackPawn,
    BlackKnight,
    BlackBishop,
    BlackRook,
    BlackQueen,
    BlackKing,
    /// Border sentinel; never appears in piece lists or moves.
    OffBoard,
}

impl Piece {
    /// The twelve real pieces in index order.
    pub const ALL: [Piece; 12] = [
        Piece::WhitePawn,
        Piece::WhiteKnight,
        Piece::WhiteBishop,
        Piece::WhiteRook,
        Piece::WhiteQueen,
        Piece::WhiteKing,
        Piece::BlackPawn,
        Piece::BlackKnight,
        Piece::BlackBishop,
        Piece::BlackRook,
        Piece::BlackQueen,
        Piece::BlackKing,
    ];

    #[must_use]
    pub const fn new(color: Color, kind: PieceKind) -> Piece {
        match (color, kind) {
            (Color::White, PieceKind::Pawn) => Piece::WhitePawn,
            (Color::White, PieceKind::Knight) => Piece::WhiteKnight,
            (Color::White, PieceKind::Bishop) => Piece::WhiteBishop,
            (Color::White, PieceKind::Rook) => Piece::WhiteRook,
            (Color::White, PieceKind::Queen) => Piece::WhiteQueen,
            (Color::White, PieceKind::King) => Piece::WhiteKing,
            (Color::Black, PieceKind::Pawn) => Piece::BlackPawn,
            (Color::Black, PieceKind::Knight) => Piece::BlackKnight,
            (Color::Black, PieceKind::Bishop) => Piece::BlackBishop,
            (Color::Black, PieceKind::Rook) => Piece::BlackRook,
            (Color::Black, PieceKind::Queen) => Piece::BlackQueen,
            (Color::Black, PieceKind::King) => Piece::BlackKing,
        }
    }

    /// Table index (0 = empty, 1..=12 pieces, 13 = off board).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Piece::index`] for the 13 real cell values.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Piece> {
        if index == 0 {
            Some(Piece::Empty)
        } else if index <= 12 {
            Some(Piece::ALL[index - 1])
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        tables::PIECE_COLOR[self.index()]
    }

    #[inline]
    #[must_use]
    pub const fn kind(self) -> Option<PieceKind> {
        match self {
            Piece::WhitePawn | Piece::BlackPawn => Some(PieceKind::Pawn),
            Piece::WhiteKnight | Piece::BlackKnight => Some(PieceKind::Knight),
            Piece::WhiteBishop | Piece::BlackBishop => Some(PieceKind::Bishop),
            Piece::WhiteRook | Piece::BlackRook => Some(PieceKind::Rook),
            Piece::WhiteQueen | Piece::BlackQueen => Some(PieceKind::Queen),
            Piece::WhiteKing | Piece::BlackKing => Some(PieceKind::King),
            Piece::Empty | Piece::OffBoard => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Piece::Empty)
    }

    /// True for the twelve real pieces.
    #[inline]
    #[must_use]
    pub const fn is_piece(self) -> bool {
        !matches!(self, Piece::Empty | Piece::OffBoard)
    }

    /// Material value in centipawns.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        tables::PIECE_VALUE[self.index()]
    }

    /// Any piece other than a pawn.
    #[inline]
    #[must_use]
    pub const fn is_big(self) -> bool {
        tables::PIECE_BIG[self.index()]
    }

    /// Rook, queen or king.
    #[inline]
    #[must_use]
    pub const fn is_major(self) -> bool {
        tables::PIECE_MAJOR[self.index()]
    }

    /// Knight or bishop.
    #[inline]
    #[must_use]
    pub const fn is_minor(self) -> bool {
        tables::PIECE_MINOR[self.index()]
    }

    #[inline]
    #[must_use]
    pub const fn is_pawn(self) -> bool {
        matches!(self, Piece::WhitePawn | Piece::BlackPawn)
    }

    #[inline]
    #[must_use]
    pub const fn is_knight(self) -> bool {
        matches!(self, Piece::WhiteKnight | Piece::BlackKnight)
    }

    #[inline]
    #[must_use]
    pub const fn is_king(self) -> bool {
        matches!(self, Piece::WhiteKing | Piece::BlackKing)
    }

    /// Attacks along ranks and files.
    #[inline]
    #[must_use]
    pub const fn is_rook_or_queen(self) -> bool {
        matches!(
            self,
            Piece::WhiteRook | Piece::BlackRook | Piece::WhiteQueen | Piece::BlackQueen
        )
    }

    /// Attacks along diagonals.
    #[inline]
    #[must_use]
    pub const fn is_bishop_or_queen(self) -> bool {
        matches!(
            self,
            Piece::WhiteBishop | Piece::BlackBishop | Piece::WhiteQueen | Piece::BlackQueen
        )
    }

    /// Moves along rays rather than by fixed offsets.
    #[inline]
    #[must_use]
    pub const fn slides(self) -> bool {
        tables::PIECE_SLIDES[self.index()]
    }

    /// Parse a FEN piece letter (uppercase white, lowercase black).
    #[must_use]
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(color, kind))
    }

    /// FEN letter; `.` for empty and `x` for the border.
    #[must_use]
    pub const fn to_fen_char(self) -> char {
        match self {
            Piece::Empty => '.',
            Piece::OffBoard => 'x',
            Piece::WhitePawn => 'P',
            Piece::WhiteKnight => 'N',
            Piece::WhiteBishop => 'B',
            Piece::WhiteRook => 'R',
            Piece::WhiteQueen => 'Q',
            Piece::WhiteKing => 'K',
            Piece::BlackPawn => 'p',
            Piece::BlackKnight => 'n',
            Piece::BlackBishop => 'b',
            Piece::BlackRook => 'r',
            Piece::BlackQueen => 'q',
            Piece::BlackKing => 'k',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen_char())
    }
}
