//! MCTS node types for tree storage.
//!
//! Uses arena allocation with indices for cache locality and simpler memory management.

use arbor_core::Scores;
use serde::{Deserialize, Serialize};

/// Index into the node arena.
///
/// This is a lightweight handle that references a node in the tree.
/// A node's id equals its position in the arena and never changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node in the MCTS tree.
///
/// Each node holds a game state together with the statistics accumulated by
/// every search cycle that passed through it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node<S, M> {
    pub(crate) index: NodeId,

    /// Parent node (None for root).
    pub(crate) parent: Option<NodeId>,

    /// Children in move order. Empty until the node is expanded.
    pub(crate) children: Vec<NodeId>,

    /// Move that led to this node (None for root).
    #[serde(rename = "move")]
    pub(crate) mv: Option<M>,

    pub(crate) state: S,

    /// Accumulated score per player; length fixed at creation.
    pub(crate) scores: Scores,

    pub(crate) visits: usize,

    /// Depth in the tree (root = 0).
    pub(crate) level: u32,
}

impl<S, M> Node<S, M> {
    /// Create the root node.
    pub(crate) fn root(state: S, players: usize) -> Self {
        Self {
            index: NodeId::ROOT,
            parent: None,
            children: Vec::new(),
            mv: None,
            state,
            scores: Scores::zeros(players),
            visits: 0,
            level: 0,
        }
    }

    /// Create an unexpanded child node with zero statistics.
    pub(crate) fn child(
        index: NodeId,
        parent: NodeId,
        level: u32,
        mv: M,
        state: S,
        players: usize,
    ) -> Self {
        Self {
            index,
            parent: Some(parent),
            children: Vec::new(),
            mv: Some(mv),
            state,
            scores: Scores::zeros(players),
            visits: 0,
            level,
        }
    }

    pub fn id(&self) -> NodeId {
        self.index
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The move that produced this node.
    pub fn mv(&self) -> Option<&M> {
        self.mv.as_ref()
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    pub fn visits(&self) -> usize {
        self.visits
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// A node is a leaf until it has been expanded.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Average score of `player` over all visits.
    ///
    /// Returns 0.0 if the node has never been visited or does not count
    /// `player` among its players.
    pub fn mean_score(&self, player: usize) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.scores.get_or_zero(player) / self.visits as f64
        }
    }

    /// Add one cycle's result to the statistics.
    ///
    /// The result may cover a different number of players than this node
    /// (a player was eliminated further down); only the shared players are
    /// updated.
    pub(crate) fn record(&mut self, result: &Scores) {
        self.scores.accumulate_overlap(result);
        self.visits += 1;
    }
}
