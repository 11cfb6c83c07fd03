//! End-to-end test of the UCI front end over the real binary.

use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};

use riposte::board::Engine;

#[test]
fn uci_smoke_test_returns_legal_move() {
    let exe = env!("CARGO_BIN_EXE_riposte");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn engine binary");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let mut reader = BufReader::new(stdout);

    stdin
        .write_all(b"uci\nisready\nposition startpos moves e2e4\ngo depth 3\n")
        .unwrap();
    stdin.flush().unwrap();

    let mut output = String::new();
    let mut bestmove_line = None;
    loop {
        let mut line = String::new();
        let bytes = reader.read_line(&mut line).expect("read failed");
        if bytes == 0 {
            break;
        }
        output.push_str(&line);
        if line.starts_with("bestmove") {
            bestmove_line = Some(line);
            break;
        }
    }

    let _ = stdin.write_all(b"quit\n");
    let _ = child.wait();

    assert!(output.contains("uciok"));
    assert!(output.contains("readyok"));

    let bestmove = bestmove_line.expect("no bestmove found");
    let parts: Vec<&str> = bestmove.split_whitespace().collect();
    assert!(parts.len() >= 2, "bestmove missing move: {bestmove}");
    let mv = parts[1];
    assert_ne!(mv, "0000", "engine returned null move");

    // The reported move must be legal after 1. e4.
    let mut engine = Engine::from_start_position();
    engine.apply_uci_move("e2e4").unwrap();
    assert!(
        engine.legal_moves().iter().any(|m| m.to_string() == mv),
        "engine returned illegal move {mv}"
    );
}

#[test]
fn uci_perft_reports_reference_count() {
    let exe = env!("CARGO_BIN_EXE_riposte");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn engine binary");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = BufReader::new(stdout);

    stdin.write_all(b"position startpos\nperft 2\nquit\n").unwrap();
    stdin.flush().unwrap();
    drop(stdin);

    let mut total_line = None;
    for line in reader.lines().map_while(Result::ok) {
        if line.starts_with("Nodes searched:") {
            total_line = Some(line);
            break;
        }
    }
    let _ = child.wait();

    let total_line = total_line.expect("no perft total printed");
    assert!(
        total_line.contains("400"),
        "unexpected perft total: {total_line}"
    );
}
