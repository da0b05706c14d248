//! Score vector with enforced invariants.
//!
//! A [`Scores`] value holds one accumulated total per player. Its length is
//! fixed when it is created. [`Scores::accumulate`] requires both vectors to
//! cover the same players; [`Scores::accumulate_overlap`] adds the players
//! the two have in common, for totals kept across a change in player count.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-player score totals.
///
/// # Example
/// ```
/// use arbor_core::Scores;
///
/// let mut total = Scores::zeros(2);
/// total.accumulate(&Scores::zero_sum(0, 2));
/// total.accumulate(&Scores::zero_sum(0, 2));
/// assert_eq!(total.as_slice(), &[2.0, -2.0]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scores(Vec<f64>);

impl Scores {
    /// Wrap an explicit score vector.
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// All-zero scores for `players` players.
    pub fn zeros(players: usize) -> Self {
        Self(vec![0.0; players])
    }

    /// Win for `winner`, loss for everyone else.
    ///
    /// # Panics
    /// Panics if `winner` is not a valid player index.
    pub fn zero_sum(winner: usize, players: usize) -> Self {
        assert!(
            winner < players,
            "winner {winner} out of range for {players} players"
        );
        Self(
            (0..players)
                .map(|p| if p == winner { 1.0 } else { -1.0 })
                .collect(),
        )
    }

    /// Draw: every player scores zero.
    pub fn draw(players: usize) -> Self {
        Self::zeros(players)
    }

    /// Score of one player.
    ///
    /// # Panics
    /// Panics if `player` is out of range.
    pub fn get(&self, player: usize) -> f64 {
        self.0[player]
    }

    /// Score of `player`, or 0.0 if this vector does not cover them.
    ///
    /// A node created after `player` left the game never receives results
    /// for them.
    pub fn get_or_zero(&self, player: usize) -> f64 {
        self.0.get(player).copied().unwrap_or(0.0)
    }

    /// Number of players covered.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a zero-player vector (never produced by valid rules).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Add `other` elementwise.
    ///
    /// # Panics
    /// Panics if the lengths differ: the rules produced a score vector that
    /// does not match the player count this total was created with.
    pub fn accumulate(&mut self, other: &Scores) {
        assert_eq!(
            self.0.len(),
            other.0.len(),
            "rules contract violated: score vector has {} entries, expected {}",
            other.0.len(),
            self.0.len()
        );
        for (total, value) in self.0.iter_mut().zip(&other.0) {
            *total += value;
        }
    }

    /// Add `other` elementwise over the players both vectors cover.
    ///
    /// Entries past the shorter length are left alone, so a total created
    /// for three players takes a two-player result on players 0 and 1 only.
    /// Games that drop players are expected to keep the survivors' indices
    /// in front.
    pub fn accumulate_overlap(&mut self, other: &Scores) {
        for (total, value) in self.0.iter_mut().zip(&other.0) {
            *total += value;
        }
    }

    /// Get a reference to the underlying slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Get the underlying vector (consumes self).
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Iterate over the per-player values.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for Scores {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<Vec<f64>> for Scores {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl fmt::Display for Scores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}
