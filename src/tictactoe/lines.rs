//! Winning line analysis for Tic-Tac-Toe

use super::{BOARD_SIZE, CELL_COUNT, Cell, Player};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has won by having three in a row anywhere
    pub fn has_won(cells: &[Cell; CELL_COUNT], player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// Check only the lines passing through `(row, col)`.
    ///
    /// Off-board coordinates never complete a line.
    pub fn completes_line(
        cells: &[Cell; CELL_COUNT],
        row: usize,
        col: usize,
        player: Player,
    ) -> bool {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return false;
        }
        let target = player.to_cell();
        let at = |r: usize, c: usize| cells[r * BOARD_SIZE + c] == target;

        (0..BOARD_SIZE).all(|c| at(row, c))
            || (0..BOARD_SIZE).all(|r| at(r, col))
            || (row == col && (0..BOARD_SIZE).all(|i| at(i, i)))
            || (row + col == BOARD_SIZE - 1 && (0..BOARD_SIZE).all(|i| at(i, BOARD_SIZE - 1 - i)))
    }
}
