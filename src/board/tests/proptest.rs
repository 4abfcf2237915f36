//! Property-based tests using proptest.

use crate::board::{Board, Move, MoveOutcome};
use proptest::prelude::*;
use rand::prelude::*;

/// Strategy to generate a random legal move sequence length
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=40usize
}

/// Strategy to generate a random seed for move selection
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Play up to `count` random legal moves, returning the moves played.
fn random_playout(board: &mut Board, rng: &mut StdRng, count: usize) -> Vec<Move> {
    let mut played = Vec::with_capacity(count);
    for _ in 0..count {
        let moves = board.legal_moves();
        let Some(&mv) = moves.choose(rng) else {
            break;
        };
        if board.make_move(mv) != MoveOutcome::Applied {
            break;
        }
        played.push(mv);
    }
    played
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// make_move followed by unmake_move restores board state exactly
    #[test]
    fn prop_make_unmake_restores_state(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let initial = board.snapshot();

        let played = random_playout(&mut board, &mut rng, num_moves);
        for mv in played.iter().rev() {
            prop_assert_eq!(board.unmake_move(), Some(*mv));
        }

        prop_assert_eq!(board.snapshot(), initial);
        prop_assert_eq!(board.check_board(), Ok(()));
    }

    /// The incremental hash always equals a fresh computation
    #[test]
    fn prop_hash_consistency(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let moves = board.legal_moves();
            let Some(&mv) = moves.choose(&mut rng) else {
                break;
            };
            board.apply_move(mv).unwrap();
            prop_assert_eq!(board.hash(), board.compute_hash());
        }
    }

    /// FEN round-trip preserves the position and the hash
    #[test]
    fn prop_fen_roundtrip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        random_playout(&mut board, &mut rng, num_moves);

        let fen = board.to_fen();
        let restored = Board::from_fen(&fen);

        prop_assert_eq!(restored.to_fen(), fen);
        prop_assert_eq!(restored.hash(), board.hash());
        prop_assert_eq!(restored.side_to_move(), board.side_to_move());
        prop_assert_eq!(restored.castling_rights(), board.castling_rights());
        prop_assert_eq!(restored.en_passant_square(), board.en_passant_square());
        prop_assert_eq!(restored.game_ply(), board.game_ply());
    }

    /// Piece lists, counters and material stay in step with the squares
    #[test]
    fn prop_piece_lists_consistent(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let moves = board.legal_moves();
            let Some(&mv) = moves.choose(&mut rng) else {
                break;
            };
            board.apply_move(mv).unwrap();
            prop_assert_eq!(board.check_board(), Ok(()));
        }
    }

    /// Legal moves never leave the mover's king attacked
    #[test]
    fn prop_legal_moves_are_legal(seed in seed_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..12 {
            let moves = board.legal_moves();
            let mover = board.side_to_move();
            for &mv in &moves {
                prop_assert!(board.make_move(mv).is_applied());
                let king = board.king_square(mover).unwrap();
                prop_assert!(!board.is_square_attacked(king, mover.opponent()),
                    "legal move left king in check: {:?}", mv);
                board.unmake_move();
            }

            let Some(&mv) = moves.choose(&mut rng) else {
                break;
            };
            board.apply_move(mv).unwrap();
        }
    }

    /// SAN produced for a legal move resolves back to the same move
    #[test]
    fn prop_san_round_trip(seed in seed_strategy(), num_moves in 0..30usize) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        random_playout(&mut board, &mut rng, num_moves);

        for mv in board.legal_moves() {
            let san = board.move_to_san_with_check(mv);
            prop_assert_eq!(board.san_to_move(&san).unwrap(), mv);
        }
    }
}
