use std::sync::Arc;

use super::config::BoardConfig;
use super::context::MoveGenContext;
use super::movegen::{MoveArena, OrderingTables};
use super::types::{
    CastlingRights, Color, Move, Piece, PieceKind, Square, BOARD_SQUARES, PIECE_COUNT,
};

/// Slots per piece in the piece lists (two originals plus eight promotions).
pub const MAX_PIECES_PER_TYPE: usize = 10;

/// State saved before a move so it can be undone without recomputation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Undo {
    pub(crate) mv: Move,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) hash: u64,
}

/// A mutable chess position on a padded 10x12 mailbox.
///
/// The board is meant to be owned by one caller and changed in place with
/// [`Board::make_move`] and [`Board::unmake_move`]; "what if" exploration is
/// done by making and unmaking, never by copying. Piece lists, material and the
/// hash are all maintained incrementally.
pub struct Board {
    pub(crate) ctx: Arc<MoveGenContext>,
    pub(crate) squares: [Piece; BOARD_SQUARES],
    pub(crate) side: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    /// Search depth below the root; selects the move arena frame.
    pub(crate) ply: usize,
    /// Moves made since the position was set up; next free history slot.
    pub(crate) history_len: usize,
    /// Plies played before the set-up position, derived from the FEN fullmove.
    pub(crate) start_ply: usize,
    pub(crate) piece_count: [usize; PIECE_COUNT],
    pub(crate) piece_list: [[Square; MAX_PIECES_PER_TYPE]; PIECE_COUNT],
    pub(crate) big_pieces: [u32; 2],
    pub(crate) major_pieces: [u32; 2],
    pub(crate) minor_pieces: [u32; 2],
    pub(crate) material: [i32; 2],
    pub(crate) hash: u64,
    pub(crate) history: Vec<Undo>,
    pub(crate) arena: MoveArena,
    pub(crate) ordering: OrderingTables,
}

impl Board {
    /// Standard starting position with the shared default context.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty(MoveGenContext::shared_default(), &BoardConfig::default());
        board.setup_start_position();
        board
    }

    /// Starting position built from `config`.
    #[must_use]
    pub fn with_config(config: &BoardConfig) -> Self {
        let ctx = if config.zobrist_seed == MoveGenContext::shared_default().seed() {
            MoveGenContext::shared_default()
        } else {
            Arc::new(MoveGenContext::new(config.zobrist_seed))
        };
        let mut board = Board::empty(ctx, config);
        board.setup_start_position();
        board
    }

    /// Starting position sharing an existing context.
    #[must_use]
    pub fn with_context(ctx: Arc<MoveGenContext>) -> Self {
        let mut board = Board::empty(ctx, &BoardConfig::default());
        board.setup_start_position();
        board
    }

    pub(crate) fn empty(ctx: Arc<MoveGenContext>, config: &BoardConfig) -> Self {
        let mut board = Board {
            ctx,
            squares: [Piece::OffBoard; BOARD_SQUARES],
            side: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            ply: 0,
            history_len: 0,
            start_ply: 0,
            piece_count: [0; PIECE_COUNT],
            piece_list: [[Square::A1; MAX_PIECES_PER_TYPE]; PIECE_COUNT],
            big_pieces: [0; 2],
            major_pieces: [0; 2],
            minor_pieces: [0; 2],
            material: [0; 2],
            hash: 0,
            history: vec![Undo::default(); config.history_capacity],
            arena: MoveArena::with_capacity(config.arena_capacity(), config.max_ply),
            ordering: OrderingTables::new(config.max_ply),
        };
        board.reset();
        board
    }

    /// Clear to an empty position: padding cells off board, playable cells
    /// empty, no rights, counters zeroed.
    pub(crate) fn reset(&mut self) {
        self.squares = [Piece::OffBoard; BOARD_SQUARES];
        for &sq in self.ctx.playable_squares() {
            self.squares[sq.padded()] = Piece::Empty;
        }
        self.side = Color::White;
        self.castling = CastlingRights::none();
        self.en_passant = None;
        self.halfmove_clock = 0;
        self.ply = 0;
        self.history_len = 0;
        self.start_ply = 0;
        self.piece_count = [0; PIECE_COUNT];
        self.big_pieces = [0; 2];
        self.major_pieces = [0; 2];
        self.minor_pieces = [0; 2];
        self.material = [0; 2];
        self.hash = 0;
        self.arena.clear();
    }

    fn setup_start_position(&mut self) {
        self.reset();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, kind) in back_rank.into_iter().enumerate() {
            for (rank, piece) in [
                (0, Piece::new(Color::White, kind)),
                (1, Piece::WhitePawn),
                (6, Piece::BlackPawn),
                (7, Piece::new(Color::Black, kind)),
            ] {
                if let Some(sq) = Square::new(file, rank) {
                    self.squares[sq.padded()] = piece;
                }
            }
        }
        self.castling = CastlingRights::all();
        self.rebuild_piece_lists();
        self.hash = self.compute_hash();
    }

    /// Rebuild piece lists, counts and material by scanning the squares.
    pub(crate) fn rebuild_piece_lists(&mut self) {
        self.piece_count = [0; PIECE_COUNT];
        self.big_pieces = [0; 2];
        self.major_pieces = [0; 2];
        self.minor_pieces = [0; 2];
        self.material = [0; 2];
        let playable = *self.ctx.playable_squares();
        for sq in playable {
            let piece = self.squares[sq.padded()];
            if piece.is_piece() {
                self.list_add(piece, sq);
            }
        }
    }

    /// Hash computed from scratch; must always equal [`Board::hash`].
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        let keys = self.ctx.keys();
        let mut hash = 0;
        for &sq in self.ctx.playable_squares() {
            let piece = self.squares[sq.padded()];
            if piece.is_piece() {
                hash ^= keys.piece(piece, sq);
            }
        }
        hash ^= keys.side_to_move(self.side);
        if let Some(ep) = self.en_passant {
            hash ^= keys.en_passant(ep);
        }
        hash ^ keys.castling(self.castling)
    }

    // Piece-list bookkeeping. These touch lists, counters and material only;
    // the hashed add/clear/move operations live in make_unmake.

    pub(crate) fn list_add(&mut self, piece: Piece, sq: Square) {
        let index = piece.index();
        debug_assert!(self.piece_count[index] < MAX_PIECES_PER_TYPE);
        self.piece_list[index][self.piece_count[index]] = sq;
        self.piece_count[index] += 1;
        self.count_material(piece, 1);
    }

    pub(crate) fn list_remove(&mut self, piece: Piece, sq: Square) {
        let index = piece.index();
        let count = self.piece_count[index];
        if let Some(slot) = self.piece_list[index][..count].iter().position(|&s| s == sq) {
            self.piece_list[index][slot] = self.piece_list[index][count - 1];
            self.piece_count[index] = count - 1;
            self.count_material(piece, -1);
        } else {
            debug_assert!(false, "{piece} not listed on {sq}");
        }
    }

    pub(crate) fn list_move(&mut self, piece: Piece, from: Square, to: Square) {
        let index = piece.index();
        let count = self.piece_count[index];
        if let Some(slot) = self.piece_list[index][..count].iter().position(|&s| s == from) {
            self.piece_list[index][slot] = to;
        } else {
            debug_assert!(false, "{piece} not listed on {from}");
        }
    }

    fn count_material(&mut self, piece: Piece, sign: i32) {
        let Some(color) = piece.color() else {
            return;
        };
        let c = color.index();
        let adjust = |counter: &mut u32| {
            if sign > 0 {
                *counter += 1;
            } else {
                *counter -= 1;
            }
        };
        if piece.is_big() {
            adjust(&mut self.big_pieces[c]);
        }
        if piece.is_major() {
            adjust(&mut self.major_pieces[c]);
        }
        if piece.is_minor() {
            adjust(&mut self.minor_pieces[c]);
        }
        self.material[c] += sign * piece.value();
    }

    // Accessors

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Piece {
        self.squares[sq.padded()]
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    #[must_use]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant
    }

    /// Half-moves since the last capture or pawn move.
    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Full-move number as written in FEN.
    #[must_use]
    pub fn fullmove_number(&self) -> usize {
        self.game_ply() / 2 + 1
    }

    /// Plies played in the whole game, including those before a FEN set-up.
    #[must_use]
    pub fn game_ply(&self) -> usize {
        self.start_ply + self.history_len
    }

    /// Moves made on this board since it was set up.
    #[inline]
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history_len
    }

    /// Moves made since the current search root.
    #[inline]
    #[must_use]
    pub fn ply(&self) -> usize {
        self.ply
    }

    /// Make the current position the search root.
    pub fn reset_ply(&mut self) {
        self.ply = 0;
    }

    /// Moves made so far, oldest first.
    pub fn move_history(&self) -> impl Iterator<Item = Move> + '_ {
        self.history[..self.history_len].iter().map(|undo| undo.mv)
    }

    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    #[must_use]
    pub fn material(&self, color: Color) -> i32 {
        self.material[color.index()]
    }

    /// Number of non-pawn pieces (king included).
    #[must_use]
    pub fn big_piece_count(&self, color: Color) -> u32 {
        self.big_pieces[color.index()]
    }

    /// Number of rooks, queens and the king.
    #[must_use]
    pub fn major_piece_count(&self, color: Color) -> u32 {
        self.major_pieces[color.index()]
    }

    /// Number of knights and bishops.
    #[must_use]
    pub fn minor_piece_count(&self, color: Color) -> u32 {
        self.minor_pieces[color.index()]
    }

    /// Squares holding `piece`, in piece-list order.
    #[must_use]
    pub fn squares_of(&self, piece: Piece) -> &[Square] {
        if piece.is_piece() {
            &self.piece_list[piece.index()][..self.piece_count[piece.index()]]
        } else {
            &[]
        }
    }

    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.squares_of(Piece::new(color, PieceKind::King))
            .first()
            .copied()
    }

    #[must_use]
    pub fn context(&self) -> &Arc<MoveGenContext> {
        &self.ctx
    }

    #[must_use]
    pub fn ordering(&self) -> &OrderingTables {
        &self.ordering
    }

    /// Killer and history tables, for a search driving this board.
    pub fn ordering_mut(&mut self) -> &mut OrderingTables {
        &mut self.ordering
    }

    /// Compare every incrementally maintained field with a fresh scan.
    ///
    /// # Errors
    /// Describes the first mismatch found.
    pub fn check_board(&self) -> Result<(), String> {
        let mut count = [0usize; PIECE_COUNT];
        let mut big = [0u32; 2];
        let mut major = [0u32; 2];
        let mut minor = [0u32; 2];
        let mut material = [0i32; 2];

        for (index, &piece) in self.squares.iter().enumerate() {
            let playable = self.ctx.dense_index(index).is_some();
            if playable == (piece == Piece::OffBoard) {
                return Err(format!("cell {index} holds {piece:?}"));
            }
        }

        for piece in Piece::ALL {
            for &sq in self.squares_of(piece) {
                if self.piece_at(sq) != piece {
                    return Err(format!("{piece} listed on {sq} but board has {}", self.piece_at(sq)));
                }
            }
        }

        for &sq in self.ctx.playable_squares() {
            let piece = self.piece_at(sq);
            let Some(color) = piece.color() else {
                continue;
            };
            let c = color.index();
            count[piece.index()] += 1;
            if piece.is_big() {
                big[c] += 1;
            }
            if piece.is_major() {
                major[c] += 1;
            }
            if piece.is_minor() {
                minor[c] += 1;
            }
            material[c] += piece.value();
        }

        for piece in Piece::ALL {
            if count[piece.index()] != self.piece_count[piece.index()] {
                return Err(format!(
                    "{piece} count {} but board has {}",
                    self.piece_count[piece.index()],
                    count[piece.index()]
                ));
            }
        }
        if big != self.big_pieces || major != self.major_pieces || minor != self.minor_pieces {
            return Err("big/major/minor counters out of sync".to_string());
        }
        if material != self.material {
            return Err(format!(
                "material {:?} but board has {:?}",
                self.material, material
            ));
        }
        if let Some(ep) = self.en_passant {
            let expected_rank = match self.side {
                Color::White => 5,
                Color::Black => 2,
            };
            if ep.rank() != expected_rank {
                return Err(format!("en passant square {ep} on wrong rank"));
            }
        }
        for color in Color::BOTH {
            if self.squares_of(Piece::new(color, PieceKind::King)).len() != 1 {
                return Err(format!("{color} does not have exactly one king"));
            }
        }
        if self.hash != self.compute_hash() {
            return Err(format!(
                "hash {:#018x} but recomputed {:#018x}",
                self.hash,
                self.compute_hash()
            ));
        }
        Ok(())
    }

    /// Comparable copy of the observable state, for tests and diagnostics.
    #[must_use]
    pub fn snapshot(&self) -> PositionSnapshot {
        let mut piece_lists: Vec<Vec<Square>> = Piece::ALL
            .iter()
            .map(|&p| self.squares_of(p).to_vec())
            .collect();
        for list in &mut piece_lists {
            list.sort();
        }
        PositionSnapshot {
            squares: self.squares.to_vec(),
            side: self.side,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            history_len: self.history_len,
            piece_lists,
            material: self.material,
            hash: self.hash,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

/// Observable board state; piece lists are sorted so that slot order, which
/// make/unmake is free to permute, does not affect equality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionSnapshot {
    pub squares: Vec<Piece>,
    pub side: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub history_len: usize,
    pub piece_lists: Vec<Vec<Square>>,
    pub material: [i32; 2],
    pub hash: u64,
}
