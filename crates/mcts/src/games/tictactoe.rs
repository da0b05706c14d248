//! Tic-tac-toe with random playouts.
//!
//! Tic-tac-toe is a solved game where perfect play always results in a draw.
//! That makes it a useful sanity check for the search:
//! - the engine should take an immediate win when one is on the board
//! - the engine should not lose to a random opponent
//!
//! Scores are zero-sum: +1 for the winner, -1 for the loser, 0 each on a draw.

use arbor_core::{Game, Scores};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tic-tac-toe player.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opposing player.
    pub fn opposite(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Player index used in score vectors (X = 0, O = 1).
    pub fn index(self) -> usize {
        match self {
            Player::X => 0,
            Player::O => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// Tic-tac-toe board state.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct TicTacToeState {
    /// Board: 9 cells, indexed 0-8 (row-major).
    /// ```text
    /// 0 | 1 | 2
    /// ---------
    /// 3 | 4 | 5
    /// ---------
    /// 6 | 7 | 8
    /// ```
    board: [Option<Player>; 9],

    /// Current player to move.
    current: Player,

    /// Cached winner (if any).
    winner: Option<Player>,
}

impl TicTacToeState {
    /// Create a new empty board with X to move.
    pub fn new() -> Self {
        Self {
            board: [None; 9],
            current: Player::X,
            winner: None,
        }
    }

    /// Build a position from a 9-character string of `X`, `O` and `.`.
    ///
    /// The player to move is derived from the piece counts (X moves first).
    /// Returns `None` for malformed input.
    pub fn from_cells(cells: &str) -> Option<Self> {
        let chars: Vec<char> = cells.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != 9 {
            return None;
        }

        let mut board = [None; 9];
        for (cell, c) in board.iter_mut().zip(chars) {
            *cell = match c {
                'X' | 'x' => Some(Player::X),
                'O' | 'o' => Some(Player::O),
                '.' => None,
                _ => return None,
            };
        }

        let xs = board.iter().filter(|c| **c == Some(Player::X)).count();
        let os = board.iter().filter(|c| **c == Some(Player::O)).count();
        let current = match xs.checked_sub(os)? {
            0 => Player::X,
            1 => Player::O,
            _ => return None,
        };

        let mut state = Self {
            board,
            current,
            winner: None,
        };
        state.winner = state.check_winner();
        Some(state)
    }

    /// Get the current player to move.
    pub fn current_player(&self) -> Player {
        self.current
    }

    /// Get the winner, if any.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Get the piece at a cell, if any.
    pub fn get(&self, cell: usize) -> Option<Player> {
        self.board.get(cell).copied().flatten()
    }

    /// Check for a winner on the current board.
    fn check_winner(&self) -> Option<Player> {
        const LINES: [[usize; 3]; 8] = [
            [0, 1, 2], // top row
            [3, 4, 5], // middle row
            [6, 7, 8], // bottom row
            [0, 3, 6], // left column
            [1, 4, 7], // center column
            [2, 5, 8], // right column
            [0, 4, 8], // main diagonal
            [2, 4, 6], // anti-diagonal
        ];

        for line in LINES {
            if let Some(player) = self.board[line[0]] {
                if self.board[line[1]] == Some(player) && self.board[line[2]] == Some(player) {
                    return Some(player);
                }
            }
        }
        None
    }

    /// Check if the board is full (draw if no winner).
    fn is_full(&self) -> bool {
        self.board.iter().all(|c| c.is_some())
    }
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f, "-----------")?;
            }
            for col in 0..3 {
                if col > 0 {
                    write!(f, " | ")?;
                }
                let cell = row * 3 + col;
                match self.board[cell] {
                    Some(Player::X) => write!(f, " X ")?,
                    Some(Player::O) => write!(f, " O ")?,
                    None => write!(f, "   ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Tic-tac-toe move (cell index 0-8).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct TicTacToeMove(pub u8);

impl TicTacToeMove {
    /// Get the row (0-2).
    pub fn row(self) -> u8 {
        self.0 / 3
    }

    /// Get the column (0-2).
    pub fn col(self) -> u8 {
        self.0 % 3
    }
}

impl fmt::Display for TicTacToeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

/// Tic-tac-toe rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct TicTacToe;

impl Game for TicTacToe {
    type State = TicTacToeState;
    type Move = TicTacToeMove;

    fn available_moves(&self, state: &Self::State) -> Vec<Self::Move> {
        if state.winner.is_some() {
            return Vec::new();
        }
        state
            .board
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| TicTacToeMove(i as u8))
            .collect()
    }

    fn current_player(&self, state: &Self::State) -> usize {
        state.current.index()
    }

    fn is_final(&self, state: &Self::State) -> bool {
        state.winner.is_some() || state.is_full()
    }

    fn next_state(&self, state: &Self::State, mv: &Self::Move) -> Self::State {
        let mut new_state = state.clone();
        new_state.board[mv.0 as usize] = Some(state.current);
        new_state.current = state.current.opposite();
        new_state.winner = new_state.check_winner();
        new_state
    }

    fn players_count(&self, _state: &Self::State) -> usize {
        2
    }

    fn scores(&self, state: &Self::State) -> Scores {
        match state.winner {
            Some(winner) => Scores::zero_sum(winner.index(), 2),
            None => Scores::draw(2),
        }
    }
}
