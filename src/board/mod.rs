//! Chess board representation and game logic.
//!
//! The board is a padded 10x12 mailbox: every playable square is surrounded
//! by off-board sentinel cells, so move generation walks offsets without
//! bounds checks. Piece lists, material and the Zobrist hash are maintained
//! incrementally by make/unmake.
//!
//! # Example
//! ```
//! use mailbox_chess::board::{Board, Color, Piece};
//!
//! let mut board = Board::new();
//! let e4 = board.make_move_san("e4").unwrap();
//! assert_eq!(e4.to_string(), "e2e4");
//! assert_eq!(board.side_to_move(), Color::Black);
//! assert_eq!(board.squares_of(Piece::WhitePawn).len(), 8);
//! board.unmake_move();
//! assert_eq!(board.to_fen(), mailbox_chess::board::START_FEN);
//! ```

mod attacks;
mod config;
mod context;
mod display;
mod draw;
mod error;
mod fen;
mod make_unmake;
mod movegen;
mod san;
mod state;
pub(crate) mod tables;
mod types;

#[cfg(test)]
mod tests;

pub use config::{BoardConfig, DEFAULT_HISTORY_CAPACITY, DEFAULT_MAX_PLY, DEFAULT_MOVES_PER_PLY};
pub use context::MoveGenContext;
pub use draw::FIFTY_MOVE_LIMIT;
pub use error::{ChessError, FenError, MoveEncodingError, MoveParseError, SquareError};
pub use fen::{MAX_FEN_COUNTER, START_FEN};
pub use make_unmake::MoveOutcome;
pub use movegen::{MoveArena, OrderingTables};
pub use san::CoordinateMove;
pub use state::{Board, PositionSnapshot, MAX_PIECES_PER_TYPE};
pub use types::{
    is_playable, padded_index, CastlingRights, Color, Move, MoveFlags, Piece, PieceKind,
    ScoredMove, Square, BOARD_SQUARES, PADDED_WIDTH, PADDING_FILES, PADDING_RANKS, PIECE_COUNT,
    PLAYABLE_SQUARES,
};
