//! MCTS configuration parameters.
//!
//! These parameters bound how long a search runs and tune the default
//! selection formula.

use arbor_core::{ArborError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MctsConfig {
    /// Maximum number of iterations per search.
    #[serde(default)]
    pub max_iterations: Option<usize>,

    /// Soft wall-clock limit per search.
    /// Checked only between iterations, so a search may overshoot it by
    /// the duration of one iteration.
    #[serde(default)]
    pub time_limit: Option<Duration>,

    /// Exploration constant `c` of the UCT formula.
    /// Higher values favor rarely visited children.
    pub exploration: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            max_iterations: Some(100),
            time_limit: None,
            exploration: std::f64::consts::SQRT_2,
        }
    }
}

impl MctsConfig {
    /// Create a new config bounded by the specified number of iterations.
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            max_iterations: Some(iterations),
            ..Default::default()
        }
    }

    /// Create a new config bounded only by wall-clock time.
    pub fn with_time_limit(limit: Duration) -> Self {
        Self {
            max_iterations: None,
            time_limit: Some(limit),
            ..Default::default()
        }
    }

    /// A config with no budget at all. Searching with it is an error.
    pub fn unbounded() -> Self {
        Self {
            max_iterations: None,
            time_limit: None,
            ..Default::default()
        }
    }

    /// Builder pattern: set the iteration bound.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Builder pattern: set the time limit.
    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Builder pattern: set the UCT exploration constant.
    pub fn exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Resolve the configured bounds.
    ///
    /// # Errors
    /// Returns `ArborError::MissingBudget` if neither bound is set.
    pub fn budget(&self) -> Result<Budget> {
        if self.max_iterations.is_none() && self.time_limit.is_none() {
            return Err(ArborError::MissingBudget);
        }
        Ok(Budget {
            max_iterations: self.max_iterations,
            time_limit: self.time_limit,
        })
    }
}

/// Stopping rule for one search: whichever configured bound triggers first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Budget {
    max_iterations: Option<usize>,
    time_limit: Option<Duration>,
}

impl Budget {
    /// True once `iterations` completed cycles or `elapsed` time reach a bound.
    pub fn is_exhausted(&self, iterations: usize, elapsed: Duration) -> bool {
        self.max_iterations.is_some_and(|max| iterations >= max)
            || self.time_limit.is_some_and(|limit| elapsed >= limit)
    }
}
