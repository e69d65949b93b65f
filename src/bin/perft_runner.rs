//! Perft counter for a single position.
//!
//! Usage:
//! `cargo run --release --bin perft_runner`
//! `cargo run --release --bin perft_runner -- --depth 5 --fen "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"`
//! `cargo run --release --bin perft_runner -- --depth 3 --divide`

use std::time::Instant;

use tracing::info;
use tracing_subscriber::EnvFilter;

use ray_chess::errors::ChessResult;
use ray_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use ray_chess::game_state::game_state::GameState;
use ray_chess::move_generation::perft::{perft, perft_divide};

fn parse_arg_u8(flag: &str, default: u8) -> u8 {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            if let Ok(v) = args[i + 1].parse::<u8>() {
                return v.max(1);
            }
        }
    }
    default
}

fn parse_arg_string(flag: &str, default: &str) -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    default.to_owned()
}

fn has_flag(flag: &str) -> bool {
    std::env::args().any(|arg| arg == flag)
}

fn main() -> ChessResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let depth = parse_arg_u8("--depth", 4);
    let fen = parse_arg_string("--fen", STARTING_POSITION_FEN);
    let mut game = GameState::from_fen(&fen)?;
    info!(%fen, depth, "running perft");

    if has_flag("--divide") {
        let divide = perft_divide(&mut game, depth);
        let mut total = 0usize;
        for (text, nodes) in &divide {
            println!("{text}: {nodes}");
            total += nodes;
        }
        println!("total: {total}");
        return Ok(());
    }

    let started = Instant::now();
    let counts = perft(&mut game, depth);
    let elapsed = started.elapsed();
    let nps = (counts.nodes as f64 / elapsed.as_secs_f64().max(1e-9)) as u64;

    println!(
        "depth={depth} nodes={} captures={} en_passant={} promotions={} checks={} checkmates={} elapsed_ms={} nps={nps}",
        counts.nodes,
        counts.captures,
        counts.en_passant,
        counts.promotions,
        counts.checks,
        counts.checkmates,
        elapsed.as_millis(),
    );
    Ok(())
}
