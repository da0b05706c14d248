//! Arbor Core - game rules contract and shared types
//!
//! This crate provides the `Game` trait a game must implement to be searched
//! by the `arbor-mcts` engine, together with the per-player score vector the
//! engine accumulates.
//!
//! # Types
//!
//! - [`Game`] - Trait for game rules (moves, transitions, terminal scoring)
//! - [`Scores`] - Per-player score vector with a fixed length
//! - [`ArborError`] - Recoverable errors reported by the engine

mod error;
mod game;
mod types;

pub use error::{ArborError, Result};
pub use game::Game;
pub use types::Scores;
