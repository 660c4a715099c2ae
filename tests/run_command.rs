//! End-to-end runs of the `xo` command over scripted I/O

use std::io::Cursor;

use clap::Parser;
use tempfile::TempDir;
use xo_qlearn::{
    adapters::MsgPackRepository,
    cli::{
        commands::run::{RunArgs, run},
        config::RunConfig,
    },
    ports::QTableRepository,
    tictactoe::{GameOutcome, Player},
};

fn config(dir: &TempDir, extra: &[&str]) -> RunConfig {
    let q_table = dir.path().join("q_table.msgpack");
    let mut args = vec![
        "xo",
        "--q-table",
        q_table.to_str().unwrap(),
        "--no-progress",
        "--seed",
        "7",
    ];
    args.extend_from_slice(extra);
    RunArgs::parse_from(args).into_config()
}

#[test]
fn test_first_run_starts_empty_and_saves() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, &["-e", "50", "--skip-play"]);
    let mut output = Vec::new();

    let report = run(&config, std::io::empty(), &mut output).unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Q-table file not found, starting with an empty Q-table."));
    assert!(text.contains("Training start..."));
    assert!(text.contains("Training complete."));
    assert_eq!(report.training.total_games, 50);
    assert!(report.game.is_none());

    let saved = MsgPackRepository::new().load(&config.q_table).unwrap();
    assert_eq!(saved.len(), report.training.q_table_size);
}

#[test]
fn test_second_run_continues_from_saved_table() {
    let dir = TempDir::new().unwrap();
    let first = config(&dir, &["-e", "30", "--skip-play"]);
    run(&first, std::io::empty(), Vec::new()).unwrap();
    let after_first = MsgPackRepository::new().load(&first.q_table).unwrap();

    let second = config(&dir, &["-e", "0", "--skip-play"]);
    let mut output = Vec::new();
    run(&second, std::io::empty(), &mut output).unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Q-table loaded from"));
    assert_eq!(MsgPackRepository::new().load(&second.q_table).unwrap(), after_first);
}

#[test]
fn test_summary_is_written_as_json() {
    let dir = TempDir::new().unwrap();
    let summary = dir.path().join("summary.json");
    let config = config(
        &dir,
        &["-e", "20", "--skip-play", "--summary", summary.to_str().unwrap()],
    );

    run(&config, std::io::empty(), Vec::new()).unwrap();

    let contents = std::fs::read_to_string(&summary).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["total_games"], 20);
}

#[test]
fn test_play_phase_finishes_with_scripted_human() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, &["-e", "200"]);
    // More moves than a game can use; occupied cells are simply re-prompted.
    let input: String = (0..3)
        .flat_map(|row| (0..3).map(move |col| format!("{row} {col}\n")))
        .collect::<String>()
        .repeat(2);
    let mut output = Vec::new();

    let report = run(&config, Cursor::new(input), &mut output).unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Play Phase: "));
    let message = match report.game.unwrap() {
        GameOutcome::Win(Player::X) => "Agent wins!",
        GameOutcome::Win(_) => "You win!",
        GameOutcome::Draw => "It's a tie!",
    };
    assert!(text.trim_end().ends_with(message));
}
