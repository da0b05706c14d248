//! Three holes in a row; whoever fills the middle one wins.
//!
//! ```text
//! [ 0 | 1 | 2 ]
//! ```
//!
//! Two players (0 and 1) alternately drop a piece into an empty hole. The
//! game ends as soon as hole 1 is filled, with +1 for its owner and -1 for
//! the other player. Filling both outer holes first is impossible, so every
//! game is decided in at most three moves.
//!
//! Rollouts are deterministic: the playout always takes the lowest empty
//! hole. Search results are therefore reproducible without a seeded RNG,
//! which makes this game the reference scenario for the engine's tests.

use arbor_core::{Game, Scores};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hole that decides the game.
const MIDDLE: usize = 1;

/// Position of a three-holes game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreeHolesState {
    /// Owner of each hole, if filled.
    holes: [Option<usize>; 3],

    /// Player to move. Left unchanged by the winning move.
    current: usize,
}

impl ThreeHolesState {
    /// Empty board, player 0 to move.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hole(&self, index: usize) -> Option<usize> {
        self.holes.get(index).copied().flatten()
    }

    pub fn current_player(&self) -> usize {
        self.current
    }

    /// Owner of the middle hole.
    pub fn winner(&self) -> Option<usize> {
        self.holes[MIDDLE]
    }
}

impl fmt::Display for ThreeHolesState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, hole) in self.holes.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            match hole {
                Some(0) => write!(f, "X")?,
                Some(_) => write!(f, "O")?,
                None => write!(f, ".")?,
            }
        }
        write!(f, "]")
    }
}

/// Three-holes rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreeHoles;

impl Game for ThreeHoles {
    type State = ThreeHolesState;
    type Move = usize;

    fn available_moves(&self, state: &ThreeHolesState) -> Vec<usize> {
        if self.is_final(state) {
            return Vec::new();
        }
        state
            .holes
            .iter()
            .enumerate()
            .filter(|(_, hole)| hole.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    fn current_player(&self, state: &ThreeHolesState) -> usize {
        state.current
    }

    fn is_final(&self, state: &ThreeHolesState) -> bool {
        state.holes[MIDDLE].is_some()
    }

    fn next_state(&self, state: &ThreeHolesState, mv: &usize) -> ThreeHolesState {
        let mut next = *state;
        next.holes[*mv] = Some(state.current);
        if !self.is_final(&next) {
            next.current = 1 - state.current;
        }
        next
    }

    fn players_count(&self, _state: &ThreeHolesState) -> usize {
        2
    }

    fn scores(&self, state: &ThreeHolesState) -> Scores {
        match state.winner() {
            Some(winner) => Scores::zero_sum(winner, 2),
            None => Scores::draw(2),
        }
    }

    fn next_move<R: Rng>(&self, state: &ThreeHolesState, _rng: &mut R) -> Option<usize> {
        self.available_moves(state).into_iter().next()
    }
}
