//! Board representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;

/// Side length of the board
pub const BOARD_SIZE: usize = 3;

/// Total number of cells on the board
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// Symbol used when printing the board to the console
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// A move target: a `(row, col)` coordinate on the board.
///
/// Both coordinates are always in `0..3`; [`Action::new`] is the only way to
/// build one from untrusted numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Action {
    row: usize,
    col: usize,
}

impl Action {
    /// Create an action, or `None` if either coordinate is off the board
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    /// Action addressing the given row-major cell index (0-8)
    pub fn from_index(index: usize) -> Option<Self> {
        (index < CELL_COUNT).then_some(Self {
            row: index / BOARD_SIZE,
            col: index % BOARD_SIZE,
        })
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    /// Row-major cell index (0-8)
    pub fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// All nine actions in row-major order
    pub fn all() -> impl Iterator<Item = Action> {
        (0..CELL_COUNT).filter_map(Action::from_index)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Hashable snapshot of all nine cells, used as the Q-table key.
///
/// Two boards with identical contents produce the same state regardless of
/// the move order that led to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State(pub [Cell; CELL_COUNT]);

impl State {
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.0
    }
}

/// The 3x3 grid.
///
/// Turn order is not tracked here; the training and play loops alternate
/// players themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Build a board from row-major cells
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Get cell at the given coordinate
    pub fn get(&self, action: Action) -> Cell {
        self.cells[action.index()]
    }

    /// Check whether the cell addressed by `action` is empty
    pub fn is_legal(&self, action: Action) -> bool {
        self.get(action) == Cell::Empty
    }

    /// Coordinates of every empty cell, in row-major order
    pub fn available_moves(&self) -> Vec<Action> {
        Action::all().filter(|&action| self.is_legal(action)).collect()
    }

    /// Place `player`'s mark at `action`.
    ///
    /// The cell is expected to be empty; this is not checked and an occupied
    /// cell is overwritten. Use [`Board::is_legal`] or pick from
    /// [`Board::available_moves`].
    pub fn apply_move(&mut self, action: Action, player: Player) {
        self.cells[action.index()] = player.to_cell();
    }

    /// Whether the move just played at `(row, col)` completed a line for `player`.
    ///
    /// Only the row, the column and any diagonal through that cell are
    /// inspected, since a new line can only be completed by the latest move.
    pub fn check_winner(&self, row: usize, col: usize, player: Player) -> bool {
        LineAnalyzer::completes_line(&self.cells, row, col, player)
    }

    /// True when no empty cell remains
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Full-board scan for a winner
    pub fn winner(&self) -> Option<Player> {
        [Player::X, Player::O]
            .into_iter()
            .find(|&player| LineAnalyzer::has_won(&self.cells, player))
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != Cell::Empty).count()
    }

    /// Snapshot used as the Q-table key
    pub fn state(&self) -> State {
        State(self.cells)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Console rendering: `c | c | c` rows, each followed by a separator line.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(BOARD_SIZE) {
            let symbols: Vec<String> = row.iter().map(|cell| cell.to_char().to_string()).collect();
            writeln!(f, "{}", symbols.join(" | "))?;
            writeln!(f, "---------")?;
        }
        Ok(())
    }
}
