//! Small games used to exercise the engine in tests, benches and docs.

pub mod three_holes;
pub mod tictactoe;

pub use three_holes::{ThreeHoles, ThreeHolesState};
pub use tictactoe::{Player, TicTacToe, TicTacToeMove, TicTacToeState};
