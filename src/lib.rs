pub mod board;
pub mod pgn;
pub mod zobrist;

pub use board::{Board, ChessError, Color, Move, MoveOutcome, Piece, Square};
pub use pgn::{parse_pgn, PgnGame, PgnReader};
