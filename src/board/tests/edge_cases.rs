//! Edge case tests for special chess positions and moves.

use crate::board::{Board, Color, Piece, PieceKind, Square};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

#[test]
fn test_stalemate_position() {
    let mut board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(!board.in_check());
    assert!(!board.is_checkmate());
    assert!(board.is_stalemate());
    assert!(board.legal_moves().is_empty());
    // Pseudo-legal king moves exist; all of them walk into attack.
    assert!(!board.generate_moves().is_empty());
}

#[test]
fn test_underpromotions() {
    for (kind, piece) in [
        (PieceKind::Knight, Piece::WhiteKnight),
        (PieceKind::Bishop, Piece::WhiteBishop),
        (PieceKind::Rook, Piece::WhiteRook),
    ] {
        let mut board = Board::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
        let mv = board
            .legal_moves()
            .into_iter()
            .find(|m| m.promotion() == Some(kind))
            .expect("promotion available");
        board.apply_move(mv).unwrap();
        assert_eq!(board.piece_at(sq("a8")), piece);
        assert_eq!(board.check_board(), Ok(()));
    }
}

#[test]
fn test_black_promotion() {
    let mut board = Board::from_fen("k7/8/8/8/8/8/7p/K7 b - - 0 1");
    let mv = board.san_to_move("h1=Q").unwrap();
    board.apply_move(mv).unwrap();
    assert_eq!(board.piece_at(sq("h1")), Piece::BlackQueen);
    assert!(board.in_check());
}

#[test]
fn test_en_passant_removes_correct_pawn() {
    let mut board =
        Board::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 1");
    let mv = board.parse_coordinate_move("e5d6").unwrap();
    assert!(mv.is_en_passant());
    board.apply_move(mv).unwrap();
    assert_eq!(board.piece_at(sq("d5")), Piece::Empty);
    assert_eq!(board.piece_at(sq("d6")), Piece::WhitePawn);
    assert_eq!(board.squares_of(Piece::BlackPawn).len(), 7);
}

#[test]
fn test_en_passant_exposing_king_is_illegal() {
    // Capturing e.p. would open the fifth rank to the h5 rook.
    let mut board = Board::from_fen("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
    assert!(board.generate_moves().iter().any(|m| m.mv.is_en_passant()));
    assert!(board.legal_moves().iter().all(|m| !m.is_en_passant()));
}

#[test]
fn test_en_passant_expires_after_one_move() {
    let mut board = Board::new();
    for san in ["e4", "Nf6", "e5", "d5"] {
        board.make_move_san(san).unwrap();
    }
    assert_eq!(board.en_passant_square(), Some(sq("d6")));
    assert!(board.san_to_move("exd6").is_ok());
    board.make_move_san("a3").unwrap();
    board.make_move_san("a6").unwrap();
    assert!(board.san_to_move("exd6").is_err());
}

#[test]
fn test_castling_blocked_by_check() {
    let mut board = Board::from_fen("r3k2r/8/8/8/4Q3/8/8/R3K2R b KQkq - 0 1");
    assert!(board.in_check());
    assert!(board.generate_moves().iter().all(|m| !m.mv.is_castling()));
}

#[test]
fn test_castling_with_rook_attacked_is_allowed() {
    // The b1 square and the h1 rook may be attacked; only e1, f1/d1 and g1/c1 matter.
    let mut board = Board::from_fen("1r2k2r/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    let castles: Vec<String> = board
        .legal_moves()
        .into_iter()
        .filter(|m| m.is_castling())
        .map(|m| m.to_string())
        .collect();
    assert_eq!(castles, vec!["e1g1", "e1c1"]);
}

#[test]
fn test_only_king_moves_when_checked_by_rook() {
    let mut board = Board::from_fen("4k3/8/8/1b6/8/8/3r4/3K4 w - - 0 1");
    let moves = board.legal_moves();
    assert!(!moves.is_empty());
    assert!(moves.iter().all(|m| m.from() == sq("d1")));
}

#[test]
fn test_checkmate_back_rank() {
    let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
    let mv = board.san_to_move("Ra8").unwrap();
    assert_eq!(board.move_to_san_with_check(mv), "Ra8#");
    board.apply_move(mv).unwrap();
    assert!(board.is_checkmate());
    assert!(!board.is_stalemate());
    assert_eq!(board.side_to_move(), Color::Black);
}

#[test]
fn test_legal_captures_subset() {
    let mut board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let captures = board.legal_captures();
    let all = board.legal_moves();
    assert_eq!(captures.len(), 8);
    assert!(captures.iter().all(|m| m.is_capture() && all.contains(m)));
}
