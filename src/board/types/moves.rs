//! Packed move representation.

use std::fmt;
use std::ops::BitOr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::{Piece, PieceKind};
use super::square::{is_playable, Square};
use crate::board::error::MoveEncodingError;

// Field layout. Squares are padded indices (< 120), pieces are Piece::index() (< 13).
const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 7;
const CAPTURED_SHIFT: u32 = 14;
const PROMOTED_SHIFT: u32 = 20;
const SQUARE_MASK: u32 = 0x7f;
const PIECE_MASK: u32 = 0xf;

const FLAG_EN_PASSANT: u32 = 0x4_0000;
const FLAG_PAWN_START: u32 = 0x8_0000;
const FLAG_CASTLING: u32 = 0x100_0000;

/// Special-move flags carried by a [`Move`]. At most one is ever set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveFlags(u32);

impl MoveFlags {
    pub const NONE: MoveFlags = MoveFlags(0);
    pub const EN_PASSANT: MoveFlags = MoveFlags(FLAG_EN_PASSANT);
    pub const PAWN_START: MoveFlags = MoveFlags(FLAG_PAWN_START);
    pub const CASTLING: MoveFlags = MoveFlags(FLAG_CASTLING);

    #[inline]
    #[must_use]
    pub const fn contains(self, other: MoveFlags) -> bool {
        self.0 & other.0 == other.0
    }

    const fn count(self) -> u32 {
        self.0.count_ones()
    }
}

impl BitOr for MoveFlags {
    type Output = MoveFlags;

    fn bitor(self, rhs: MoveFlags) -> MoveFlags {
        MoveFlags(self.0 | rhs.0)
    }
}

/// A move packed into 25 bits of a `u32`.
///
/// Encoding:
/// - bits 0-6:   from square (padded index)
/// - bits 7-13:  to square (padded index)
/// - bits 14-17: captured piece
/// - bit 18:     en passant
/// - bit 19:     pawn double push
/// - bits 20-23: promoted piece
/// - bit 24:     castling
///
/// En passant captures leave the captured field empty; the removed pawn sits
/// behind `to`, not on it. The all-zero value is the null move.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u32);

impl Move {
    /// The "no move" value.
    pub const NULL: Move = Move(0);

    /// Build a move, validating every field.
    ///
    /// # Errors
    /// Returns a [`MoveEncodingError`] if the squares coincide, a piece field
    /// holds a value it can never hold, or the flags contradict each other.
    pub fn try_new(
        from: Square,
        to: Square,
        captured: Piece,
        promoted: Piece,
        flags: MoveFlags,
    ) -> Result<Move, MoveEncodingError> {
        if from == to {
            return Err(MoveEncodingError::SameSquare { square: from });
        }
        if captured == Piece::OffBoard {
            return Err(MoveEncodingError::InvalidCaptured { piece: captured });
        }
        if !matches!(
            promoted.kind(),
            None | Some(PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
        ) || promoted == Piece::OffBoard
        {
            return Err(MoveEncodingError::InvalidPromotion { piece: promoted });
        }
        if flags.count() > 1 {
            return Err(MoveEncodingError::ConflictingFlags);
        }
        let special = flags != MoveFlags::NONE;
        if special && (!captured.is_empty() || !promoted.is_empty()) {
            return Err(MoveEncodingError::ConflictingFlags);
        }
        Ok(Move::encode(from, to, captured, promoted, flags))
    }

    /// Pack fields that the generator already knows to be consistent.
    #[inline]
    pub(crate) const fn encode(
        from: Square,
        to: Square,
        captured: Piece,
        promoted: Piece,
        flags: MoveFlags,
    ) -> Move {
        Move(
            (from.padded() as u32) << FROM_SHIFT
                | (to.padded() as u32) << TO_SHIFT
                | (captured.index() as u32) << CAPTURED_SHIFT
                | (promoted.index() as u32) << PROMOTED_SHIFT
                | flags.0,
        )
    }

    /// Rebuild a move from its raw packed form.
    ///
    /// # Errors
    /// Fails when the value decodes to fields [`Move::try_new`] would reject.
    pub fn from_raw(raw: u32) -> Result<Move, MoveEncodingError> {
        if raw == 0 {
            return Ok(Move::NULL);
        }
        let field = |shift: u32, mask: u32| ((raw >> shift) & mask) as usize;
        let from = Self::decode_square(field(FROM_SHIFT, SQUARE_MASK))?;
        let to = Self::decode_square(field(TO_SHIFT, SQUARE_MASK))?;
        let captured = Piece::from_index(field(CAPTURED_SHIFT, PIECE_MASK))
            .ok_or(MoveEncodingError::InvalidRaw { raw })?;
        let promoted = Piece::from_index(field(PROMOTED_SHIFT, PIECE_MASK))
            .ok_or(MoveEncodingError::InvalidRaw { raw })?;
        let flags = MoveFlags(raw & (FLAG_EN_PASSANT | FLAG_PAWN_START | FLAG_CASTLING));
        let mv = Move::try_new(from, to, captured, promoted, flags)?;
        if mv.0 != raw {
            return Err(MoveEncodingError::InvalidRaw { raw });
        }
        Ok(mv)
    }

    fn decode_square(index: usize) -> Result<Square, MoveEncodingError> {
        if is_playable(index) {
            Ok(Square::from_padded_unchecked(index))
        } else {
            Err(MoveEncodingError::OffBoard { index })
        }
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Source square. Meaningless for [`Move::NULL`].
    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square::from_padded_unchecked(((self.0 >> FROM_SHIFT) & SQUARE_MASK) as usize)
    }

    /// Destination square. Meaningless for [`Move::NULL`].
    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square::from_padded_unchecked(((self.0 >> TO_SHIFT) & SQUARE_MASK) as usize)
    }

    /// Piece removed from `to`, or [`Piece::Empty`] (including for en passant).
    #[inline]
    #[must_use]
    pub fn captured(self) -> Piece {
        Piece::from_index(((self.0 >> CAPTURED_SHIFT) & PIECE_MASK) as usize).unwrap_or_default()
    }

    /// Piece placed on `to` by a promotion, or [`Piece::Empty`].
    #[inline]
    #[must_use]
    pub fn promoted(self) -> Piece {
        Piece::from_index(((self.0 >> PROMOTED_SHIFT) & PIECE_MASK) as usize).unwrap_or_default()
    }

    /// Kind of the promoted piece, if this is a promotion.
    #[inline]
    #[must_use]
    pub fn promotion(self) -> Option<PieceKind> {
        self.promoted().kind()
    }

    #[inline]
    #[must_use]
    pub const fn flags(self) -> MoveFlags {
        MoveFlags(self.0 & (FLAG_EN_PASSANT | FLAG_PAWN_START | FLAG_CASTLING))
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        self.0 & FLAG_EN_PASSANT != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_pawn_start(self) -> bool {
        self.0 & FLAG_PAWN_START != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_castling(self) -> bool {
        self.0 & FLAG_CASTLING != 0
    }

    /// Captures something, en passant included.
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        (self.0 >> CAPTURED_SHIFT) & PIECE_MASK != 0 || self.is_en_passant()
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        (self.0 >> PROMOTED_SHIFT) & PIECE_MASK != 0
    }
}

/// Coordinate notation: `e2e4`, `e7e8q`, `0000` for the null move.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "0000");
        }
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(kind) = self.promotion() {
            write!(f, "{}", kind.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self})")
    }
}

/// A generated move with its ordering score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}
