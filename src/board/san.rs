//! Standard Algebraic Notation (SAN) and coordinate move strings.
//!
//! SAN is the notation used in scoresheets and PGN files: "e4", "Nf3",
//! "Bxc6+", "O-O", "e8=Q#". Coordinate strings ("e2e4", "e7e8q") are what
//! analysis engines exchange.
//!
//! Both directions resolve against the legal moves of the current position:
//! a string is parsed by formatting every legal move and picking the match.
//!
//! # Examples
//! ```
//! use mailbox_chess::board::Board;
//!
//! let mut board = Board::new();
//! let mv = board.san_to_move("Nf3").unwrap();
//! assert_eq!(mv.to_string(), "g1f3");
//! assert_eq!(board.move_to_san(mv), "Nf3");
//! ```

use std::fmt;
use std::str::FromStr;

use log::{trace, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::{ChessError, MoveParseError};
use super::types::{Move, PieceKind, Square};
use super::Board;

/// A move in coordinate form, independent of any position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoordinateMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl From<Move> for CoordinateMove {
    fn from(mv: Move) -> Self {
        CoordinateMove {
            from: mv.from(),
            to: mv.to(),
            promotion: mv.promotion(),
        }
    }
}

impl fmt::Display for CoordinateMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// Case-insensitive: `E7E8Q` and `e7e8q` parse the same.
impl FromStr for CoordinateMove {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(MoveParseError::InvalidLength {
                len: s.chars().count(),
            });
        }
        let square = |part: &str| {
            part.parse::<Square>()
                .map_err(|_| MoveParseError::InvalidSquare {
                    notation: s.to_string(),
                })
        };
        let from = square(&s[0..2])?;
        let to = square(&s[2..4])?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_char(c) {
                Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
        };
        Ok(CoordinateMove {
            from,
            to,
            promotion,
        })
    }
}

/// Strip check, mate and annotation suffixes; accept zeros in castling.
fn normalize_san(san: &str) -> String {
    let trimmed = san.trim().trim_end_matches(&['+', '#', '!', '?'][..]);
    if trimmed.chars().all(|c| c == '0' || c == '-') {
        trimmed.replace('0', "O")
    } else {
        trimmed.to_string()
    }
}

impl Board {
    /// Format `mv`, which must be legal here, in SAN without a check suffix.
    pub fn move_to_san(&mut self, mv: Move) -> String {
        let legal = self.legal_moves();
        self.format_san(mv, &legal)
    }

    /// Format `mv` in SAN with `+` or `#` appended when it gives check or mate.
    pub fn move_to_san_with_check(&mut self, mv: Move) -> String {
        let mut san = self.move_to_san(mv);
        if self.make_move(mv).is_applied() {
            if self.in_check() {
                san.push(if self.has_legal_move() { '+' } else { '#' });
            }
            self.unmake_move();
        }
        san
    }

    /// SAN for `mv`, disambiguated against `legal`, the legal moves of the
    /// current position.
    fn format_san(&self, mv: Move, legal: &[Move]) -> String {
        if mv.is_castling() {
            return if mv.to().file() > mv.from().file() {
                "O-O".to_string()
            } else {
                "O-O-O".to_string()
            };
        }

        let from = mv.from();
        let piece = self.piece_at(from);
        let mut san = String::with_capacity(8);

        match piece.kind() {
            Some(PieceKind::Pawn) | None => {
                if mv.is_capture() {
                    san.push(from.file_char());
                }
            }
            Some(kind) => {
                san.push(kind.letter());
                let rivals: Vec<Square> = legal
                    .iter()
                    .filter(|other| {
                        other.to() == mv.to()
                            && other.from() != from
                            && self.piece_at(other.from()) == piece
                    })
                    .map(|other| other.from())
                    .collect();
                if !rivals.is_empty() {
                    if rivals.iter().all(|sq| sq.file() != from.file()) {
                        san.push(from.file_char());
                    } else if rivals.iter().all(|sq| sq.rank() != from.rank()) {
                        san.push(from.rank_char());
                    } else {
                        san.push(from.file_char());
                        san.push(from.rank_char());
                    }
                }
            }
        }

        if mv.is_capture() {
            san.push('x');
        }
        san.push_str(&mv.to().to_string());
        if let Some(kind) = mv.promotion() {
            san.push('=');
            san.push(kind.letter());
        }
        san
    }

    /// Resolve a SAN string to the legal move it names.
    ///
    /// Matching is case-sensitive, since `b` and `B` name different moves.
    /// Trailing `+`, `#`, `!` and `?` are ignored, as is `0-0` for `O-O`.
    ///
    /// # Errors
    /// [`ChessError::MoveNotFound`] if no legal move formats to `san`. The
    /// error carries the FEN and a board dump.
    pub fn san_to_move(&mut self, san: &str) -> Result<Move, ChessError> {
        let wanted = normalize_san(san);
        let legal = self.legal_moves();
        if let Some(&mv) = legal.iter().find(|&&mv| self.format_san(mv, &legal) == wanted) {
            trace!("resolved {san} to {mv}");
            return Ok(mv);
        }
        warn!("no legal move matches '{san}' in {}", self.to_fen());
        Err(self.move_not_found(san))
    }

    /// Resolve and play a SAN move.
    ///
    /// # Errors
    /// [`ChessError::MoveNotFound`] if `san` names no legal move; the board is
    /// unchanged.
    pub fn make_move_san(&mut self, san: &str) -> Result<Move, ChessError> {
        let mv = self.san_to_move(san)?;
        self.apply_move(mv)?;
        Ok(mv)
    }

    /// Resolve a coordinate string such as `e2e4` or `E7E8Q` to a legal move.
    ///
    /// # Errors
    /// [`ChessError::MoveNotFound`] if the string is malformed or names no
    /// legal move.
    pub fn parse_coordinate_move(&mut self, s: &str) -> Result<Move, ChessError> {
        let wanted: CoordinateMove = s.parse().map_err(|_| self.move_not_found(s))?;
        self.find_coordinate_move(wanted)
            .ok_or_else(|| self.move_not_found(s))
    }

    /// The legal move matching `wanted`, if any.
    pub fn find_coordinate_move(&mut self, wanted: CoordinateMove) -> Option<Move> {
        self.legal_moves()
            .into_iter()
            .find(|&mv| CoordinateMove::from(mv) == wanted)
    }

    fn move_not_found(&self, notation: &str) -> ChessError {
        ChessError::MoveNotFound {
            notation: notation.to_string(),
            fen: self.to_fen(),
            board: self.to_string(),
        }
    }
}
