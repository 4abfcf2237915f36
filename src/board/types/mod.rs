//! Core chess types.
//!
//! - `Square` - playable square stored as a padded 10x12 index
//! - `Piece`, `PieceKind` and `Color` - cell contents and their classification
//! - `Move` and `ScoredMove` - packed move representation
//! - `CastlingRights` - castling state

mod castling;
mod moves;
mod piece;
mod square;

pub use castling::CastlingRights;
pub use moves::{Move, MoveFlags, ScoredMove};
pub use piece::{Color, Piece, PieceKind, PIECE_COUNT};
pub use square::{
    is_playable, padded_index, Square, BOARD_SQUARES, PADDED_WIDTH, PADDING_FILES, PADDING_RANKS,
    PLAYABLE_SQUARES,
};

pub(crate) use castling::{CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K, CASTLE_WHITE_Q};
