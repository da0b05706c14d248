//! Monte Carlo Tree Search implementation.
//!
//! Each iteration starts at the root and repeats, one level at a time:
//!
//! 1. expand the current node if it is an unexpanded, non-final leaf;
//! 2. select a child with the selection policy, for the player to move;
//! 3. stop if the child is final (score it directly) or unvisited (roll it
//!    out), otherwise descend into it.
//!
//! The resulting score vector is then added, undiscounted, to every node
//! selected on the way down. The controller also adds it to the root after
//! each iteration, so `root.visits()` equals the number of iterations run.
//!
//! The player count may change from one state to the next (elimination
//! games). A result is always sized for the state it was computed on; nodes
//! created for a different count take the entries for the players they
//! share with it, by index.

use crate::{
    config::MctsConfig,
    node::NodeId,
    notify::{Notifier, SearchEvent},
    rollout::{rollout, score_position},
    selection::{select_child, SelectionPolicy, Uct},
    tree::Tree,
};
use arbor_core::{ArborError, Game, Result, Scores};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Result of an MCTS search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult<M> {
    /// Root child with the highest total score for the root player.
    pub best_node: NodeId,

    /// Move leading to `best_node`.
    pub best_move: M,

    /// Number of iterations run by this call.
    pub iterations: usize,

    /// Wall time spent in this call.
    pub elapsed: Duration,
}

impl<M> SearchResult<M> {
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

/// Monte Carlo Tree Search engine.
///
/// Generic over:
/// - `G`: The game rules
/// - `P`: The selection formula ([`Uct`] unless replaced)
/// - `R`: The random number generator used by rollouts
pub struct Mcts<G: Game, P, R> {
    game: G,
    config: MctsConfig,
    selection: P,
    rng: R,
    notifier: Option<Box<dyn Notifier<G::State, G::Move>>>,
    cancel: Option<Arc<AtomicBool>>,
}

impl<G, R> Mcts<G, Uct, R>
where
    G: Game,
    R: Rng,
{
    /// Create a new engine using UCT with the configured exploration constant.
    pub fn new(game: G, config: MctsConfig, rng: R) -> Self {
        let selection = Uct::new(config.exploration);
        Self {
            game,
            config,
            selection,
            rng,
            notifier: None,
            cancel: None,
        }
    }
}

impl<G, P, R> Mcts<G, P, R>
where
    G: Game,
    P: SelectionPolicy<G::State, G::Move>,
    R: Rng,
{
    /// Replace the selection formula.
    pub fn with_selection<Q>(self, selection: Q) -> Mcts<G, Q, R>
    where
        Q: SelectionPolicy<G::State, G::Move>,
    {
        Mcts {
            game: self.game,
            config: self.config,
            selection,
            rng: self.rng,
            notifier: self.notifier,
            cancel: self.cancel,
        }
    }

    /// Observe the search with `notifier`.
    pub fn with_notifier(mut self, notifier: impl Notifier<G::State, G::Move> + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    /// Stop searching once `flag` is set. Checked between iterations.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn selection(&self) -> &P {
        &self.selection
    }

    /// Build a single-root tree for `state`.
    ///
    /// `root_player` is the player whose score the best-move choice
    /// maximizes.
    ///
    /// # Errors
    /// Returns `ArborError::InvalidRootPlayer` if `root_player` is not a
    /// player of `state`.
    pub fn create_tree(
        &self,
        state: G::State,
        root_player: usize,
    ) -> Result<Tree<G::State, G::Move>> {
        let players = self.game.players_count(&state);
        if root_player >= players {
            return Err(ArborError::InvalidRootPlayer {
                player: root_player,
                count: players,
            });
        }
        Ok(Tree::new(state, players, root_player))
    }

    /// Grow `tree` until the budget runs out and return the best root move.
    ///
    /// The root is expanded before the first iteration, so a move can be
    /// returned even for a zero-iteration budget. Calling this again on the
    /// same tree resumes the search; the budget applies per call.
    ///
    /// # Errors
    /// - `ArborError::MissingBudget` if the config bounds neither iterations
    ///   nor time (checked before anything else).
    /// - `ArborError::NoLegalMoves` if the root has no children and the
    ///   rules offer none. Both errors are returned before any event is
    ///   emitted.
    pub fn find_best_node(
        &mut self,
        tree: &mut Tree<G::State, G::Move>,
    ) -> Result<SearchResult<G::Move>> {
        let budget = self.config.budget()?;
        let start = Instant::now();

        if tree.root().is_leaf() && self.game.available_moves(tree.root().state()).is_empty() {
            return Err(ArborError::NoLegalMoves);
        }

        self.emit(tree, SearchEvent::RunStarted { root: NodeId::ROOT });
        debug!(
            nodes = tree.len(),
            root_visits = tree.root().visits(),
            max_iterations = ?self.config.max_iterations,
            time_limit = ?self.config.time_limit,
            "MCTS search started"
        );

        if tree.root().is_leaf() {
            self.expand(tree, NodeId::ROOT);
        }

        let mut iterations = 0;
        loop {
            let elapsed = start.elapsed();
            if budget.is_exhausted(iterations, elapsed) || self.is_cancelled() {
                break;
            }

            self.emit(
                tree,
                SearchEvent::Iteration {
                    iteration: iterations,
                    elapsed,
                },
            );

            let scores = self.iterate(tree);
            tree.record(NodeId::ROOT, &scores);
            self.emit(tree, SearchEvent::ScoresUpdated { node: NodeId::ROOT });

            iterations += 1;
            trace!(iteration = iterations, scores = %scores, "MCTS iteration complete");
        }

        let best = tree
            .best_child(NodeId::ROOT, tree.root_player())
            .ok_or(ArborError::NoLegalMoves)?;
        let best_move = tree.get(best).mv().cloned().ok_or_else(|| {
            ArborError::CorruptTree(format!("root child {} has no move", best.index()))
        })?;
        let elapsed = start.elapsed();

        self.emit(
            tree,
            SearchEvent::RunFinished {
                best,
                iterations,
                elapsed,
            },
        );
        let stats = tree.stats();
        debug!(
            iterations,
            elapsed_ms = elapsed.as_millis() as u64,
            best = best.index(),
            nodes = stats.total_nodes,
            max_depth = stats.max_depth,
            "MCTS search finished"
        );

        Ok(SearchResult {
            best_node: best,
            best_move,
            iterations,
            elapsed,
        })
    }

    /// Run one select/expand/rollout/backpropagate pass from the root.
    ///
    /// Descends with an explicit path instead of recursion, so the depth of
    /// the tree is not limited by the call stack.
    fn iterate(&mut self, tree: &mut Tree<G::State, G::Move>) -> Scores {
        let mut path: Vec<NodeId> = Vec::new();
        let mut current = NodeId::ROOT;

        let result = loop {
            if tree.get(current).is_leaf() && !self.game.is_final(tree.get(current).state()) {
                self.expand(tree, current);
            }

            let node = tree.get(current);
            if node.is_leaf() {
                // Non-final position without legal moves.
                break score_position(&self.game, node.state());
            }

            let player = self.game.current_player(node.state());
            assert!(
                player < node.scores().len(),
                "rules contract violated: current player {} out of range for {} players",
                player,
                node.scores().len()
            );

            let child = select_child(tree, &self.selection, current, player)
                .expect("BUG: expanded node has no children");
            path.push(child);
            self.emit(tree, SearchEvent::NodeSelected { node: child, player });

            let selected = tree.get(child);
            if self.game.is_final(selected.state()) {
                break score_position(&self.game, selected.state());
            }
            if selected.visits() == 0 {
                self.emit(tree, SearchEvent::Rollout { node: child });
                break rollout(&self.game, tree.get(child).state(), &mut self.rng);
            }

            current = child;
        };

        // Backpropagate the same vector to every selected node.
        // Nodes sized for another player count keep the overlapping entries.
        for &id in path.iter().rev() {
            tree.record(id, &result);
            self.emit(tree, SearchEvent::ScoresUpdated { node: id });
        }

        result
    }

    /// Add one child per legal move, in the order the rules return them.
    fn expand(&mut self, tree: &mut Tree<G::State, G::Move>, id: NodeId) {
        let state = tree.get(id).state();
        let moves = self.game.available_moves(state);
        assert!(
            moves.is_empty() || !self.game.is_final(state),
            "rules contract violated: final state has {} available moves",
            moves.len()
        );

        let children: Vec<_> = moves
            .into_iter()
            .map(|mv| {
                let next = self.game.next_state(state, &mv);
                let players = self.game.players_count(&next);
                (mv, next, players)
            })
            .collect();

        let added = tree.attach_children(id, children);
        trace!(node = id.index(), children = added, "expanded node");
        self.emit(tree, SearchEvent::NodeExpanded { node: id, children: added });
    }

    fn emit(&mut self, tree: &Tree<G::State, G::Move>, event: SearchEvent) {
        if let Some(notifier) = self.notifier.as_mut() {
            notifier.notify(tree, &event);
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
