#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::{env, process::ExitCode};

use chess_referee::{fen::Fen, game::Game, repl::repl};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let fen = env::args().skip(1).collect::<Vec<_>>().join(" ");
    let game = if fen.trim().is_empty() {
        Game::new()
    } else {
        match fen.parse::<Fen>() {
            Ok(fen) => Game::from_fen(fen),
            Err(err) => {
                eprintln!("Error: {err}");
                return ExitCode::FAILURE;
            }
        }
    };
    match repl(game) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
