//! Saving and loading Q-tables through the file-backed repository

use std::{fs, path::Path};

use tempfile::TempDir;
use xo_qlearn::{
    Error,
    adapters::MsgPackRepository,
    ports::QTableRepository,
    q_learning::QTable,
    tictactoe::{Action, Board, Player},
};

fn action(row: usize, col: usize) -> Action {
    Action::new(row, col).unwrap()
}

fn save(table: &QTable, path: &Path) {
    MsgPackRepository::new().save(table, path).unwrap();
}

fn load(path: &Path) -> xo_qlearn::Result<QTable> {
    MsgPackRepository::new().load(path)
}

fn sample_table() -> QTable {
    let mut table = QTable::new();
    let mut board = Board::new();
    table.set(board.state(), action(1, 1), 0.42);
    table.set(board.state(), action(0, 0), -0.25);
    board.apply_move(action(1, 1), Player::X);
    board.apply_move(action(0, 2), Player::O);
    table.set(board.state(), action(2, 0), 1.0);
    table
}

#[test]
fn test_round_trip_preserves_explicit_entries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("q_table.msgpack");
    let table = sample_table();

    save(&table, &path);
    let loaded = load(&path).unwrap();

    assert_eq!(loaded, table);
    assert_eq!(loaded.len(), 3);
}

#[test]
fn test_absent_entries_stay_absent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("q_table.msgpack");
    let table = sample_table();
    let empty = Board::new().state();

    assert_eq!(table.lookup(&empty, action(2, 2)), None);
    save(&table, &path);
    let loaded = load(&path).unwrap();

    assert_eq!(loaded.lookup(&empty, action(2, 2)), None);
    assert_eq!(loaded.get(&empty, action(2, 2)), 0.0);
    assert_eq!(loaded.lookup(&empty, action(1, 1)), Some(0.42));
}

#[test]
fn test_untouched_lookups_are_stable() {
    let table = QTable::new();
    let state = Board::new().state();
    for _ in 0..10 {
        assert_eq!(table.get(&state, action(0, 1)), 0.0);
    }
    assert!(table.is_empty());
}

#[test]
fn test_missing_file_is_recoverable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("never_written.msgpack");
    let repo = MsgPackRepository::new();

    assert!(matches!(repo.load(&path), Err(Error::NotFound { .. })));
    assert_eq!(repo.load_if_exists(&path).unwrap(), None);
}

#[test]
fn test_save_replaces_previous_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("q_table.msgpack");

    save(&sample_table(), &path);
    let mut smaller = QTable::new();
    smaller.set(Board::new().state(), action(0, 0), 0.5);
    save(&smaller, &path);

    assert_eq!(load(&path).unwrap(), smaller);
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("q_table.msgpack");
    fs::write(&path, b"definitely not msgpack").unwrap();

    assert!(load(&path).is_err());
    assert!(MsgPackRepository::new().load_if_exists(&path).is_err());
}
