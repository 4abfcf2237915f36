//! PGN (Portable Game Notation) reading.
//!
//! A PGN file holds one or more games, each a block of `[Key "Value"]` tag
//! pairs followed by movetext. The movetext is replayed on a [`Board`]: every
//! SAN token is resolved against the legal moves of the position it is played
//! in, so a successfully read game is also a legal one.
//!
//! Comments (`{...}` and `;...`), numeric annotation glyphs (`$6`), move
//! numbers and resumption markers (`12...`) are skipped, as are variations
//! in parentheses, nested or not.
//!
//! # Example
//! ```
//! use mailbox_chess::pgn::parse_pgn;
//!
//! let games = parse_pgn("[Event \"Casual\"]\n\n1. e4 e5 2. Nf3 Nc6 *\n").unwrap();
//! assert_eq!(games.len(), 1);
//! assert_eq!(games[0].tag("Event"), Some("Casual"));
//! assert_eq!(games[0].coordinate_moves(), vec!["e2e4", "e7e5", "g1f3", "b8c6"]);
//! ```

pub mod lexer;

use std::iter::Peekable;
use std::sync::Arc;

use log::{debug, warn};
use once_cell::sync::Lazy;

use crate::board::{Board, ChessError, MoveGenContext, Move, START_FEN};
use lexer::{LexError, Lexer, Token, TokenTable};

/// Token kinds of PGN text, in the order their patterns are registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PgnToken {
    Tag,
    Comment,
    LineComment,
    Resumption,
    MoveNumber,
    Result,
    Nag,
    VariationStart,
    VariationEnd,
    Move,
    Newline,
}

const PGN_PATTERNS: [(PgnToken, &str); 11] = [
    (PgnToken::Tag, r"\[.*?\]"),
    (PgnToken::Comment, r"\{[^}]*\}"),
    (PgnToken::LineComment, r";[^\n]*"),
    (PgnToken::Resumption, r"\d+\.\.\."),
    (PgnToken::MoveNumber, r"\d+\."),
    (PgnToken::Result, r"1-0|0-1|1/2-1/2|\*"),
    (PgnToken::Nag, r"\$\d+"),
    (PgnToken::VariationStart, r"\("),
    (PgnToken::VariationEnd, r"\)"),
    (PgnToken::Move, r"[A-Za-z0-9][A-Za-z0-9\-+#=/!?]*"),
    (PgnToken::Newline, r"\n"),
];

/// Newlines are tokens: a blank line ends a game.
const PGN_WHITESPACE: &str = " \t\r";

static PGN_TOKENS: Lazy<TokenTable<PgnToken>> = Lazy::new(|| {
    let mut table = TokenTable::new().with_whitespace(PGN_WHITESPACE);
    for (kind, pattern) in PGN_PATTERNS {
        table
            .add(kind, pattern)
            .expect("PGN token patterns are valid regular expressions");
    }
    table
});

/// The PGN token table, for callers that want raw tokens.
pub fn pgn_token_table() -> &'static TokenTable<PgnToken> {
    &PGN_TOKENS
}

impl From<LexError> for ChessError {
    fn from(err: LexError) -> Self {
        ChessError::MalformedPgnSyntax {
            line: err.line,
            column: err.column,
            reason: format!("unexpected character '{}'", err.found),
        }
    }
}

/// One replayed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PgnGame {
    /// Tag pairs in file order.
    pub tags: Vec<(String, String)>,
    /// Move tokens as written.
    pub san_moves: Vec<String>,
    /// The resolved moves, one per SAN token.
    pub moves: Vec<Move>,
    /// `1-0`, `0-1`, `1/2-1/2` or `*`, when present.
    pub result: Option<String>,
    pub start_fen: String,
    pub final_fen: String,
}

impl PgnGame {
    /// Value of the first tag named `key`.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Moves as coordinate strings (`e2e4`, `e7e8q`).
    #[must_use]
    pub fn coordinate_moves(&self) -> Vec<String> {
        self.moves.iter().map(Move::to_string).collect()
    }

    #[must_use]
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// A board set to the game's start position, sharing `ctx`.
    ///
    /// # Errors
    /// [`ChessError::MalformedFen`] if the start FEN is invalid, which cannot
    /// happen for a game produced by [`PgnReader`].
    pub fn start_board(&self, ctx: Arc<MoveGenContext>) -> Result<Board, ChessError> {
        Board::try_from_fen_with_context(&self.start_fen, ctx).map_err(ChessError::from)
    }
}

/// Split a `[Key "Value"]` tag into key and unquoted value.
fn parse_tag(token: &Token<'_, PgnToken>) -> Result<(String, String), ChessError> {
    let malformed = |reason: &str| {
        warn!("malformed tag {} at line {}", token.text, token.line);
        ChessError::MalformedPgnSyntax {
            line: token.line,
            column: token.column,
            reason: format!("{reason} in tag {}", token.text),
        }
    };
    let inner = token.text[1..token.text.len() - 1].trim();
    let (key, value) = inner
        .split_once(char::is_whitespace)
        .ok_or_else(|| malformed("missing value"))?;
    let value = value.trim();
    if key.is_empty() || value.len() < 2 || !value.starts_with('"') || !value.ends_with('"') {
        return Err(malformed("unquoted value"));
    }
    Ok((key.to_string(), value[1..value.len() - 1].to_string()))
}

/// Reads games one at a time from PGN text.
///
/// Iteration stops after the first error.
pub struct PgnReader<'a> {
    tokens: Peekable<Lexer<'a, PgnToken>>,
    ctx: Arc<MoveGenContext>,
    failed: bool,
}

impl<'a> PgnReader<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        PgnReader::with_context(text, MoveGenContext::shared_default())
    }

    /// Replay games on boards hashing with the keys of `ctx`.
    #[must_use]
    pub fn with_context(text: &'a str, ctx: Arc<MoveGenContext>) -> Self {
        PgnReader {
            tokens: PGN_TOKENS.tokenize(text).peekable(),
            ctx,
            failed: false,
        }
    }

    fn read_game(&mut self) -> Result<Option<PgnGame>, ChessError> {
        let mut board = Board::with_context(Arc::clone(&self.ctx));
        let mut start_fen = START_FEN.to_string();
        let mut tags = Vec::new();
        let mut san_moves = Vec::new();
        let mut moves = Vec::new();
        let mut result = None;
        let mut in_movetext = false;
        let mut after_newline = true;
        let mut depth = 0usize;
        let mut open_variation = None;

        loop {
            let token = match self.tokens.peek() {
                None => break,
                Some(Err(_)) => match self.tokens.next() {
                    Some(Err(err)) => return Err(err.into()),
                    _ => break,
                },
                Some(Ok(token)) => *token,
            };

            // A tag after movetext opens the next game.
            if token.kind == PgnToken::Tag && in_movetext && depth == 0 {
                break;
            }
            self.tokens.next();

            if token.kind == PgnToken::Newline {
                if after_newline && in_movetext && depth == 0 {
                    break;
                }
                after_newline = true;
                continue;
            }
            after_newline = false;

            match token.kind {
                PgnToken::VariationStart => {
                    if depth == 0 {
                        open_variation = Some((token.line, token.column));
                    }
                    depth += 1;
                    in_movetext = true;
                }
                PgnToken::VariationEnd => {
                    if depth == 0 {
                        return Err(ChessError::MalformedPgnSyntax {
                            line: token.line,
                            column: token.column,
                            reason: "')' without an open variation".to_string(),
                        });
                    }
                    depth -= 1;
                }
                _ if depth > 0 => {}
                PgnToken::Tag => {
                    let (key, value) = parse_tag(&token)?;
                    debug!("tag {key} = {value:?}");
                    if key == "FEN" {
                        board.load_fen(&value)?;
                        start_fen = board.to_fen();
                    }
                    tags.push((key, value));
                }
                PgnToken::Move => {
                    in_movetext = true;
                    let mv = board.make_move_san(token.text)?;
                    san_moves.push(token.text.to_string());
                    moves.push(mv);
                }
                PgnToken::Result => {
                    in_movetext = true;
                    result = Some(token.text.to_string());
                }
                PgnToken::MoveNumber | PgnToken::Resumption => in_movetext = true,
                PgnToken::Comment | PgnToken::LineComment | PgnToken::Nag => {}
                PgnToken::Newline => {}
            }
        }

        if depth > 0 {
            let (line, column) = open_variation.unwrap_or((0, 0));
            return Err(ChessError::MalformedPgnSyntax {
                line,
                column,
                reason: "unterminated variation".to_string(),
            });
        }
        if tags.is_empty() && !in_movetext {
            return Ok(None);
        }

        let game = PgnGame {
            tags,
            san_moves,
            moves,
            result,
            start_fen,
            final_fen: board.to_fen(),
        };
        debug!(
            "read game {:?} with {} plies, result {:?}",
            game.tag("Event"),
            game.ply_count(),
            game.result
        );
        Ok(Some(game))
    }
}

impl Iterator for PgnReader<'_> {
    type Item = Result<PgnGame, ChessError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.read_game() {
            Ok(game) => game.map(Ok),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Read every game in `text`.
///
/// # Errors
/// The first tokenizer, tag, FEN or move resolution error.
pub fn parse_pgn(text: &str) -> Result<Vec<PgnGame>, ChessError> {
    PgnReader::new(text).collect()
}
