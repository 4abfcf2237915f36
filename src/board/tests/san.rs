//! SAN formatting and parsing scenarios.

use crate::board::{Board, ChessError};

fn san_of(board: &mut Board, coordinate: &str) -> String {
    let mv = board.parse_coordinate_move(coordinate).unwrap();
    board.move_to_san(mv)
}

#[test]
fn test_pawn_moves() {
    let mut board = Board::new();
    assert_eq!(san_of(&mut board, "e2e4"), "e4");
    assert_eq!(san_of(&mut board, "a2a3"), "a3");
}

#[test]
fn test_knight_moves() {
    let mut board = Board::new();
    assert_eq!(san_of(&mut board, "g1f3"), "Nf3");
    assert_eq!(san_of(&mut board, "b1c3"), "Nc3");
}

#[test]
fn test_pawn_capture_uses_file() {
    let mut board = Board::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");
    assert_eq!(san_of(&mut board, "e4d5"), "exd5");
    let mut board =
        Board::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3");
    assert_eq!(san_of(&mut board, "e5d6"), "exd6");
}

#[test]
fn test_piece_capture() {
    let mut board = Board::from_fen("4k3/8/8/3p4/8/2N5/8/4K3 w - - 0 1");
    assert_eq!(san_of(&mut board, "c3d5"), "Nxd5");
}

#[test]
fn test_castling() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    assert_eq!(san_of(&mut board, "e1g1"), "O-O");
    assert_eq!(san_of(&mut board, "e1c1"), "O-O-O");
    assert_eq!(board.san_to_move("0-0").unwrap().to_string(), "e1g1");
    board.make_move_san("O-O").unwrap();
    assert_eq!(san_of(&mut board, "e8c8"), "O-O-O");
}

#[test]
fn test_promotion() {
    let mut board = Board::from_fen("3r3k/4P3/8/8/8/8/8/K7 w - - 0 1");
    assert_eq!(san_of(&mut board, "e7e8q"), "e8=Q");
    assert_eq!(san_of(&mut board, "e7d8n"), "exd8=N");
    assert_eq!(board.san_to_move("exd8=N+").unwrap().to_string(), "e7d8n");
}

#[test]
fn test_disambiguation_by_file() {
    let mut board = Board::from_fen("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1");
    assert_eq!(san_of(&mut board, "b1d2"), "Nbd2");
    assert_eq!(san_of(&mut board, "f1d2"), "Nfd2");
    assert_eq!(san_of(&mut board, "f1e3"), "Ne3");
    assert_eq!(board.san_to_move("Nfd2").unwrap().to_string(), "f1d2");
    assert!(board.san_to_move("Nd2").is_err());
}

#[test]
fn test_disambiguation_by_rank() {
    let mut board = Board::from_fen("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1");
    assert_eq!(san_of(&mut board, "a1a3"), "R1a3");
    assert_eq!(san_of(&mut board, "a5a3"), "R5a3");
    assert_eq!(san_of(&mut board, "a1b1"), "Rb1");
}

#[test]
fn test_disambiguation_by_file_and_rank() {
    let mut board = Board::from_fen("6k1/8/8/8/Q6Q/8/8/Q3K3 w - - 0 1");
    assert_eq!(san_of(&mut board, "a4d4"), "Qa4d4");
    assert_eq!(san_of(&mut board, "a1d4"), "Q1d4");
    assert_eq!(san_of(&mut board, "h4d4"), "Qhd4");
}

#[test]
fn test_pinned_piece_does_not_cause_disambiguation() {
    // The d2 knight is pinned by the d8 rook, so only the b1 knight reaches c3 legally.
    let mut board = Board::from_fen("3rk3/8/8/8/8/8/3N4/1N1K4 w - - 0 1");
    assert_eq!(san_of(&mut board, "b1c3"), "Nc3");
    assert!(board.legal_moves().iter().all(|m| m.from().to_string() != "d2"));
}

#[test]
fn test_case_sensitive_matching() {
    let mut board = Board::from_fen("4k3/8/8/B7/8/2p5/1P6/4K3 w - - 0 1");
    assert_eq!(board.san_to_move("bxc3").unwrap().to_string(), "b2c3");
    assert_eq!(board.san_to_move("Bxc3").unwrap().to_string(), "a5c3");
    assert!(matches!(
        board.san_to_move("BXC3"),
        Err(ChessError::MoveNotFound { .. })
    ));
}

#[test]
fn test_every_legal_move_round_trips() {
    let mut board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let moves = board.legal_moves();
    let sans: Vec<String> = moves.iter().map(|&mv| board.move_to_san(mv)).collect();
    for (mv, san) in moves.iter().zip(&sans) {
        assert_eq!(board.san_to_move(san).unwrap(), *mv, "{san}");
    }
    let mut unique = sans.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), sans.len());
}
