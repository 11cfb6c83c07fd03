//! Minimal UCI front end over the engine: position setup, fixed-depth
//! search and perft.

use std::io::{self, BufRead};
use std::time::Instant;

use crate::board::{Engine, Position};

const DEFAULT_DEPTH: u32 = 6;

fn parse_position_command(engine: &mut Engine, parts: &[&str]) {
    let mut i = 1;
    if i < parts.len() && parts[i] == "startpos" {
        engine.set_position(Position::start_position());
        i += 1;
    } else if i < parts.len() && parts[i] == "fen" {
        i += 1;
        let fen_end = parts[i..]
            .iter()
            .position(|&p| p == "moves")
            .map_or(parts.len(), |n| i + n);
        let fen = parts[i..fen_end].join(" ");
        match Position::try_from_fen(&fen) {
            Ok(pos) => engine.set_position(pos),
            Err(err) => {
                eprintln!("Invalid FEN: {err}");
                return;
            }
        }
        i = fen_end;
    }

    if i < parts.len() && parts[i] == "moves" {
        i += 1;
        while i < parts.len() {
            if let Err(err) = engine.apply_uci_move(parts[i]) {
                eprintln!("Invalid move: {err}");
                break;
            }
            i += 1;
        }
    }
}

fn run_perft(engine: &mut Engine, depth: u32) {
    let start = Instant::now();
    let counts = engine.perft_divide(depth);
    let total: u64 = counts.iter().map(|&(_, n)| n).sum();
    for (mv, nodes) in counts {
        println!("{mv}: {nodes}");
    }
    println!("Nodes searched: {total} ({:?})", start.elapsed());
}

fn run_go(engine: &mut Engine, parts: &[&str]) {
    let mut depth = DEFAULT_DEPTH;
    let mut i = 1;
    while i < parts.len() {
        match parts[i] {
            "depth" => {
                if let Some(d) = parts.get(i + 1).and_then(|s| s.parse().ok()) {
                    depth = d;
                }
                i += 2;
            }
            "perft" => {
                let d = parts.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(1);
                run_perft(engine, d);
                return;
            }
            _ => i += 1,
        }
    }

    let result = engine.search(depth);
    println!(
        "info depth {} score cp {} nodes {}",
        depth, result.score, result.nodes
    );
    match result.best_move {
        Some(mv) => println!("bestmove {mv}"),
        None => println!("bestmove 0000"),
    }
}

/// Read UCI commands from stdin until `quit` or end of input.
pub fn run_uci_loop() {
    let stdin = io::stdin();
    let mut engine = Engine::from_start_position();

    for line in stdin.lock().lines().map_while(Result::ok) {
        let parts: Vec<&str> = line.trim().split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "uci" => {
                println!("id name Riposte");
                println!("id author Riposte contributors");
                println!("uciok");
            }
            "isready" => {
                println!("readyok");
            }
            "ucinewgame" => {
                engine.set_position(Position::start_position());
            }
            "position" => {
                parse_position_command(&mut engine, &parts);
            }
            "go" => {
                run_go(&mut engine, &parts);
            }
            "perft" => {
                let depth = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
                run_perft(&mut engine, depth);
            }
            "quit" => break,
            other => {
                log::debug!("ignoring unknown command '{other}'");
            }
        }
    }
}
