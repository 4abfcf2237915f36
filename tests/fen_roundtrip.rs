use serde::Deserialize;

use mailbox_chess::board::{Board, ChessError, FenError, START_FEN};

#[derive(Deserialize)]
struct PositionSet {
    positions: Vec<Position>,
}

#[derive(Deserialize)]
struct Position {
    name: String,
    fen: String,
    perft: Vec<u64>,
}

fn load_positions() -> Vec<Position> {
    let data = include_str!("data/positions.json");
    let set: PositionSet = serde_json::from_str(data).expect("invalid positions.json");
    set.positions
}

#[test]
fn fen_suite_round_trips() {
    for position in load_positions() {
        let board = Board::try_from_fen(&position.fen)
            .unwrap_or_else(|e| panic!("{}: {e}", position.name));
        assert_eq!(board.to_fen(), position.fen, "{}", position.name);
        assert_eq!(board.check_board(), Ok(()), "{}", position.name);
    }
}

#[test]
fn perft_suite() {
    for position in load_positions() {
        let mut board = Board::from_fen(&position.fen);
        for (depth, &expected) in position.perft.iter().enumerate() {
            let depth = depth + 1;
            assert_eq!(
                board.perft(depth),
                expected,
                "{} at depth {depth}",
                position.name
            );
        }
        assert_eq!(board.to_fen(), position.fen);
    }
}

#[test]
fn load_fen_replaces_position() {
    let mut board = Board::new();
    board.make_move_san("e4").unwrap();
    for position in load_positions() {
        board.load_fen(&position.fen).unwrap();
        assert_eq!(board.to_fen(), position.fen);
        assert_eq!(board.hash(), board.compute_hash());
    }
    board.load_fen(START_FEN).unwrap();
    assert_eq!(board.hash(), Board::new().hash());
}

#[test]
fn malformed_fen_is_rejected() {
    let cases = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQ1BNR w kq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w",
    ];
    for fen in cases {
        assert!(Board::try_from_fen(fen).is_err(), "accepted {fen}");
        let mut board = Board::new();
        let err = board.load_fen(fen).unwrap_err();
        assert!(matches!(err, ChessError::MalformedFen(_)), "{fen}: {err}");
        assert_eq!(board.to_fen(), START_FEN);
    }
}

#[test]
fn fen_parse_via_from_str() {
    let board: Board = START_FEN.parse().unwrap();
    assert_eq!(board.to_fen(), START_FEN);
    let err = "8/8/8/8/8/8/8/8 w - - 0 1".parse::<Board>().err();
    assert!(matches!(err, Some(FenError::InvalidKingCount { .. })));
}
