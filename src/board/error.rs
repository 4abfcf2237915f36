//! Error types for board, notation and PGN operations.

use std::fmt;

use super::types::{Color, Piece, Square};

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few fields (needs at least 4)
    TooFewFields { found: usize },
    /// Invalid piece character in the placement field
    InvalidPiece { char: char },
    /// Placement field does not describe exactly 8 ranks
    InvalidRankCount { found: usize },
    /// A rank does not describe exactly 8 files
    InvalidFileCount { rank: usize, files: usize },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Halfmove or fullmove counter is not a number
    InvalidCounter { field: &'static str, found: String },
    /// A side does not have exactly one king
    InvalidKingCount { color: Color, found: usize },
    /// More pieces of one type than the piece lists can hold
    TooManyPieces { piece: Piece },
    /// A pawn stands on the first or eighth rank
    PawnOnBackRank { square: Square },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewFields { found } => {
                write!(f, "FEN must have at least 4 fields, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::InvalidRankCount { found } => {
                write!(f, "FEN placement must have 8 ranks, found {found}")
            }
            FenError::InvalidFileCount { rank, files } => {
                write!(f, "Rank {rank} describes {files} files, expected 8")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::InvalidCounter { field, found } => {
                write!(f, "Invalid {field} '{found}' in FEN")
            }
            FenError::InvalidKingCount { color, found } => {
                write!(f, "Expected one {color} king, found {found}")
            }
            FenError::TooManyPieces { piece } => {
                write!(f, "Too many '{piece}' pieces in FEN")
            }
            FenError::PawnOnBackRank { square } => {
                write!(f, "Pawn on back rank square {square} in FEN")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Padded index is a border cell or outside the board
    OffBoard { index: usize },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::OffBoard { index } => {
                write!(f, "Padded index {index} is not a playable square")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Error type for building a [`Move`](super::Move) from raw fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveEncodingError {
    /// From and to squares are the same
    SameSquare { square: Square },
    /// A square field names a border cell
    OffBoard { index: usize },
    /// Captured field holds a value that can never be captured
    InvalidCaptured { piece: Piece },
    /// Promoted field holds a piece no pawn can become
    InvalidPromotion { piece: Piece },
    /// More than one special flag, or a flag combined with capture/promotion
    ConflictingFlags,
    /// Raw value has bits outside the encoding
    InvalidRaw { raw: u32 },
}

impl fmt::Display for MoveEncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveEncodingError::SameSquare { square } => {
                write!(f, "Move starts and ends on {square}")
            }
            MoveEncodingError::OffBoard { index } => {
                write!(f, "Move square index {index} is off the board")
            }
            MoveEncodingError::InvalidCaptured { piece } => {
                write!(f, "Cannot capture '{piece}'")
            }
            MoveEncodingError::InvalidPromotion { piece } => {
                write!(f, "Cannot promote to '{piece}'")
            }
            MoveEncodingError::ConflictingFlags => write!(f, "Conflicting move flags"),
            MoveEncodingError::InvalidRaw { raw } => {
                write!(f, "Raw value {raw:#x} is not a valid move")
            }
        }
    }
}

impl std::error::Error for MoveEncodingError {}

/// Error type for coordinate move strings such as `e2e4` or `e7e8q`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Failures reported by the board, notation and PGN layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Bad character or structurally incomplete FEN
    MalformedFen(FenError),
    /// The PGN tokenizer met an unknown character, or a tag/terminator is missing
    MalformedPgnSyntax {
        line: usize,
        column: usize,
        reason: String,
    },
    /// A SAN or coordinate string matches no legal move
    MoveNotFound {
        notation: String,
        fen: String,
        board: String,
    },
    /// The move would leave the mover's king in check; nothing was changed
    IllegalMove { notation: String },
}

impl fmt::Display for ChessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessError::MalformedFen(err) => write!(f, "Malformed FEN: {err}"),
            ChessError::MalformedPgnSyntax {
                line,
                column,
                reason,
            } => write!(f, "Malformed PGN at line {line}, column {column}: {reason}"),
            ChessError::MoveNotFound {
                notation,
                fen,
                board,
            } => write!(f, "Move not found for: {notation} in {fen}\n{board}"),
            ChessError::IllegalMove { notation } => {
                write!(f, "Illegal move '{notation}' leaves the king in check")
            }
        }
    }
}

impl std::error::Error for ChessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChessError::MalformedFen(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FenError> for ChessError {
    fn from(err: FenError) -> Self {
        ChessError::MalformedFen(err)
    }
}
