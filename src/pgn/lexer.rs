//! A small table-driven tokenizer.
//!
//! Patterns are regular expressions anchored at the current input position.
//! At each step every pattern is tried; the longest match wins and ties go to
//! the pattern registered first. Whitespace characters between tokens are
//! skipped, and which characters count as whitespace is configurable, so a
//! grammar can treat newlines as tokens.
//!
//! # Example
//! ```
//! use mailbox_chess::pgn::lexer::TokenTable;
//!
//! #[derive(Clone, Copy, Debug, PartialEq)]
//! enum Tok { Word, Number }
//!
//! let mut table = TokenTable::new();
//! table.add(Tok::Number, r"\d+").unwrap();
//! table.add(Tok::Word, r"[a-z]+").unwrap();
//!
//! let kinds: Vec<Tok> = table
//!     .tokenize("abc 42")
//!     .map(|t| t.unwrap().kind)
//!     .collect();
//! assert_eq!(kinds, vec![Tok::Word, Tok::Number]);
//! ```

use std::fmt;

use regex::Regex;

/// Default whitespace: space, tab, carriage return, newline, vertical tab
/// and form feed.
pub const DEFAULT_WHITESPACE: &str = " \t\r\n\x0b\x0c";

/// One token, borrowing its text from the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a, K> {
    pub kind: K,
    pub text: &'a str,
    /// 1-based line of the first character.
    pub line: usize,
    /// 1-based column of the first character.
    pub column: usize,
}

/// No pattern matches at `line`:`column`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub line: usize,
    pub column: usize,
    pub found: char,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unexpected character '{}' at line {}, column {}",
            self.found, self.line, self.column
        )
    }
}

impl std::error::Error for LexError {}

/// Ordered set of token patterns plus the whitespace set.
#[derive(Debug, Clone)]
pub struct TokenTable<K> {
    patterns: Vec<(K, Regex)>,
    whitespace: Vec<char>,
}

impl<K: Copy> TokenTable<K> {
    #[must_use]
    pub fn new() -> Self {
        TokenTable {
            patterns: Vec::new(),
            whitespace: DEFAULT_WHITESPACE.chars().collect(),
        }
    }

    /// Replace the set of characters skipped between tokens.
    #[must_use]
    pub fn with_whitespace(mut self, chars: &str) -> Self {
        self.whitespace = chars.chars().collect();
        self
    }

    /// Register `pattern` for `kind`. Earlier patterns win ties.
    ///
    /// # Errors
    /// Returns the regex compile error for an invalid pattern.
    pub fn add(&mut self, kind: K, pattern: &str) -> Result<&mut Self, regex::Error> {
        let anchored = Regex::new(&format!("^(?:{pattern})"))?;
        self.patterns.push((kind, anchored));
        Ok(self)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Lazily tokenize `text`.
    pub fn tokenize<'a>(&'a self, text: &'a str) -> Lexer<'a, K> {
        Lexer {
            table: self,
            rest: text,
            line: 1,
            column: 1,
            failed: false,
        }
    }

    fn is_whitespace(&self, c: char) -> bool {
        self.whitespace.contains(&c)
    }

    /// Longest non-empty match at the start of `text`.
    fn longest_match<'a>(&self, text: &'a str) -> Option<(K, &'a str)> {
        let mut best: Option<(K, &'a str)> = None;
        for (kind, regex) in &self.patterns {
            if let Some(found) = regex.find(text) {
                let len = found.end();
                if len > 0 && best.map_or(true, |(_, current)| len > current.len()) {
                    best = Some((*kind, &text[..len]));
                }
            }
        }
        best
    }
}

impl<K: Copy> Default for TokenTable<K> {
    fn default() -> Self {
        TokenTable::new()
    }
}

/// Iterator over the tokens of one input. Stops after the first error.
#[derive(Debug)]
pub struct Lexer<'a, K> {
    table: &'a TokenTable<K>,
    rest: &'a str,
    line: usize,
    column: usize,
    failed: bool,
}

impl<'a, K: Copy> Lexer<'a, K> {
    /// Consume `len` bytes of input, tracking line and column.
    fn advance(&mut self, len: usize) {
        for c in self.rest[..len].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.rest = &self.rest[len..];
    }

    fn skip_whitespace(&mut self) {
        let skipped = self
            .rest
            .find(|c: char| !self.table.is_whitespace(c))
            .unwrap_or(self.rest.len());
        self.advance(skipped);
    }

    /// Whether only whitespace remains.
    pub fn is_at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.rest.is_empty()
    }
}

impl<'a, K: Copy> Iterator for Lexer<'a, K> {
    type Item = Result<Token<'a, K>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.is_at_end() {
            return None;
        }
        let (line, column) = (self.line, self.column);
        match self.table.longest_match(self.rest) {
            Some((kind, text)) => {
                self.advance(text.len());
                Some(Ok(Token {
                    kind,
                    text,
                    line,
                    column,
                }))
            }
            None => {
                self.failed = true;
                let found = self.rest.chars().next().unwrap_or('\0');
                Some(Err(LexError {
                    line,
                    column,
                    found,
                }))
            }
        }
    }
}
