use std::env;
use std::fs;
use std::process::ExitCode;
use std::time::Instant;

use mailbox_chess::board::{Board, START_FEN};
use mailbox_chess::pgn::{PgnGame, PgnReader};

const USAGE: &str = "usage: pgn_replay <file.pgn>\n       pgn_replay --perft <depth> [fen]";

fn print_game(index: usize, game: &PgnGame) {
    println!("game {}", index + 1);
    for (key, value) in &game.tags {
        println!("  [{key} \"{value}\"]");
    }

    let mut board = match Board::try_from_fen(&game.start_fen) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("  bad start position: {err}");
            return;
        }
    };
    let mut san = Vec::with_capacity(game.moves.len());
    for &mv in &game.moves {
        san.push(board.move_to_san_with_check(mv));
        if board.apply_move(mv).is_err() {
            break;
        }
    }

    println!("  san: {}", san.join(" "));
    println!("  moves: {}", game.coordinate_moves().join(" "));
    println!("  result: {}", game.result.as_deref().unwrap_or("?"));
    println!("  final: {}", game.final_fen);
}

fn replay(path: &str) -> ExitCode {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("cannot read {path}: {err}");
            return ExitCode::FAILURE;
        }
    };
    for (index, game) in PgnReader::new(&text).enumerate() {
        match game {
            Ok(game) => print_game(index, &game),
            Err(err) => {
                eprintln!("game {}: {err}", index + 1);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

fn perft(depth: &str, fen: Option<&str>) -> ExitCode {
    let Ok(depth) = depth.parse::<usize>() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };
    let mut board = match Board::try_from_fen(fen.unwrap_or(START_FEN)) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let mut total = 0;
    for (mv, nodes) in board.perft_divide(depth) {
        println!("{mv}: {nodes}");
        total += nodes;
    }
    let elapsed = start.elapsed();
    println!();
    println!("nodes: {total}");
    println!("time: {:.3}s", elapsed.as_secs_f64());
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("--perft") if args.len() >= 3 => {
            let fen = if args.len() > 3 {
                Some(args[3..].join(" "))
            } else {
                None
            };
            perft(&args[2], fen.as_deref())
        }
        Some(path) if !path.starts_with("--") => replay(path),
        _ => {
            eprintln!("{USAGE}");
            ExitCode::FAILURE
        }
    }
}
