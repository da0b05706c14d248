//! Generic Monte Carlo Tree Search.
//!
//! This crate searches the game tree of any game implementing the
//! `arbor_core::Game` trait and recommends a move for one player.
//!
//! # Features
//!
//! - **Generic**: Works with any `Game` implementation, any number of players
//! - **UCT Selection**: Pluggable via [`SelectionPolicy`] (closures work too)
//! - **Per-player scores**: Every node accumulates one score per player
//! - **Budgets**: Iteration count, soft time limit, or both
//! - **Notifications**: Observe every search step through a [`Notifier`]
//! - **Snapshots**: Trees and configs are serde-serializable and resumable
//!
//! # Example
//!
//! ```
//! use arbor_mcts::{games::{ThreeHoles, ThreeHolesState}, Mcts, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let config = MctsConfig::with_iterations(16);
//! let rng = ChaCha8Rng::seed_from_u64(42);
//! let mut mcts = Mcts::new(ThreeHoles, config, rng);
//!
//! let mut tree = mcts.create_tree(ThreeHolesState::new(), 0)?;
//! let result = mcts.find_best_node(&mut tree)?;
//!
//! // Filling the middle hole wins on the spot.
//! assert_eq!(result.best_move, 1);
//! assert_eq!(tree.root().visits(), 16);
//! # Ok::<(), arbor_mcts::ArborError>(())
//! ```

pub mod config;
pub mod games;
pub mod node;
pub mod notify;
pub mod rollout;
pub mod search;
pub mod selection;
pub mod tree;

pub use arbor_core::{ArborError, Game, Result, Scores};
pub use config::{Budget, MctsConfig};
pub use node::{Node, NodeId};
pub use notify::{EventLog, Notifier, SearchEvent};
pub use rollout::rollout;
pub use search::{Mcts, SearchResult};
pub use selection::{select_child, SelectionPolicy, Uct};
pub use tree::{Tree, TreeStats};
