//! Draw detection by the fifty-move rule and by repetition.

use super::Board;

/// Halfmove clock value at which the fifty-move rule applies.
pub const FIFTY_MOVE_LIMIT: u32 = 100;

impl Board {
    /// Whether 100 halfmoves have passed without a capture or pawn move.
    #[must_use]
    pub fn is_fifty_move_rule(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_LIMIT
    }

    /// How many earlier positions in this game equal the current one.
    ///
    /// Only positions since the last capture or pawn move can repeat, so the
    /// scan covers the last `halfmove_clock` history entries.
    #[must_use]
    pub fn repetition_count(&self) -> usize {
        let start = self
            .history_len
            .saturating_sub(self.halfmove_clock as usize);
        self.history[start..self.history_len]
            .iter()
            .filter(|undo| undo.hash == self.hash)
            .count()
    }

    /// Whether the current position is appearing for at least the third time.
    #[must_use]
    pub fn is_repetition(&self) -> bool {
        self.repetition_count() >= 2
    }

    /// Fifty-move rule or threefold repetition.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.is_fifty_move_rule() || self.is_repetition()
    }
}
