//! Interactive terminal driver.
//!
//! Usage:
//! `cargo run --bin ray_chess`
//! `cargo run --bin ray_chess -- --fen "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"`
//!
//! Commands: a move such as `e2e4` or `a7a8n`, `undo`, `moves`, `fen`, `quit`.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ray_chess::errors::ChessResult;
use ray_chess::game_state::game_state::GameState;
use ray_chess::utils::long_algebraic::{move_to_long_algebraic, parse_long_algebraic};
use ray_chess::utils::render_game_state::render_game_state;

fn parse_arg_string(flag: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1).cloned())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_position(game: &mut GameState) {
    println!("{}", render_game_state(game));

    let moves = game.get_legal_moves();
    if game.is_checkmate() {
        println!("Checkmate, {} wins.", game.side_to_move().opposite());
    } else if game.is_stalemate() {
        println!("Stalemate.");
    } else if game.in_check() {
        println!("{} to move, in check ({} legal moves).", game.side_to_move(), moves.len());
    } else {
        println!("{} to move ({} legal moves).", game.side_to_move(), moves.len());
    }
}

fn try_move(game: &mut GameState, text: &str) {
    let (candidate, promotion) = match parse_long_algebraic(text, game) {
        Ok(parsed) => parsed,
        Err(err) => {
            println!("{err}");
            return;
        }
    };

    let legal = game.get_legal_moves();
    match legal.iter().find(|mv| **mv == candidate) {
        Some(mv) => {
            game.make_move(mv, promotion);
            print_position(game);
        }
        None => {
            debug!(text, "candidate not in the legal set");
            println!("Illegal move: {text}");
        }
    }
}

fn main() -> ChessResult<()> {
    init_tracing();

    let mut game = match parse_arg_string("--fen") {
        Some(fen) => GameState::from_fen(&fen)?,
        None => GameState::new_game(),
    };
    info!(fen = %game.get_fen(), "starting game");
    print_position(&mut game);

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush().ok();

        input.clear();
        match stdin.lock().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        match input.trim() {
            "" => {}
            "quit" | "exit" => break,
            "undo" => {
                game.undo_move();
                print_position(&mut game);
            }
            "moves" => {
                let mut texts: Vec<String> = game
                    .get_legal_moves()
                    .iter()
                    .map(move_to_long_algebraic)
                    .collect();
                texts.sort();
                println!("{}", texts.join(" "));
            }
            "fen" => println!("{}", game.get_fen()),
            "history" => {
                let texts: Vec<String> = game.move_log().iter().map(move_to_long_algebraic).collect();
                println!("{}", texts.join(" "));
            }
            text => try_move(&mut game, text),
        }
    }

    Ok(())
}
