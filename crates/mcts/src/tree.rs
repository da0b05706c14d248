//! Arena-allocated MCTS tree.
//!
//! Using a Vec<Node> with indices provides better cache locality
//! and simpler ownership compared to Rc<RefCell<Node>>. The arena is
//! append-only: nodes are never removed or renumbered, so a `NodeId`
//! stays valid for the lifetime of the tree.

use crate::node::{Node, NodeId};
use arbor_core::{ArborError, Result, Scores};
use serde::{Deserialize, Serialize};

/// Arena-allocated search tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tree<S, M> {
    nodes: Vec<Node<S, M>>,

    /// Player whose score the best-move choice maximizes.
    root_player: usize,
}

impl<S, M> Tree<S, M> {
    /// Create a single-root tree with zeroed statistics.
    pub(crate) fn new(state: S, players: usize, root_player: usize) -> Self {
        Self {
            nodes: vec![Node::root(state, players)],
            root_player,
        }
    }

    pub fn root_player(&self) -> usize {
        self.root_player
    }

    /// Get the root node.
    pub fn root(&self) -> &Node<S, M> {
        self.get(NodeId::ROOT)
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId does not belong to this tree.
    pub fn get(&self, id: NodeId) -> &Node<S, M> {
        &self.nodes[id.0]
    }

    /// Get the parent of a node (None for root).
    pub fn parent(&self, id: NodeId) -> Option<&Node<S, M>> {
        self.get(id).parent.map(|p| self.get(p))
    }

    /// Iterate over the children of a node, in move order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node<S, M>> + '_ {
        self.get(id).children.iter().map(|&c| self.get(c))
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> &[Node<S, M>] {
        &self.nodes
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (never true for a tree built by the engine).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Apply an in-place update to a single node.
    pub(crate) fn update_node(&mut self, id: NodeId, update: impl FnOnce(&mut Node<S, M>)) {
        update(&mut self.nodes[id.0]);
    }

    /// Add one cycle's result to a node's statistics.
    pub(crate) fn record(&mut self, id: NodeId, result: &Scores) {
        self.update_node(id, |node| node.record(result));
    }

    /// Append the children of a leaf, returning how many were added.
    ///
    /// Each item is `(move, resulting state, player count at that state)`.
    ///
    /// # Panics
    /// Panics if the node already has children.
    pub(crate) fn attach_children<I>(&mut self, parent: NodeId, children: I) -> usize
    where
        I: IntoIterator<Item = (M, S, usize)>,
    {
        assert!(
            self.get(parent).is_leaf(),
            "BUG: node {} expanded twice",
            parent.0
        );

        let level = self.get(parent).level + 1;
        let first = self.nodes.len();
        for (mv, state, players) in children {
            let id = NodeId(self.nodes.len());
            self.nodes
                .push(Node::child(id, parent, level, mv, state, players));
        }

        let ids: Vec<NodeId> = (first..self.nodes.len()).map(NodeId).collect();
        let added = ids.len();
        self.update_node(parent, |node| node.children = ids);
        added
    }

    /// Child of `parent` with the highest total score for `player`.
    ///
    /// Ties keep the earliest child in creation order. Returns None if
    /// `parent` has no children.
    pub fn best_child(&self, parent: NodeId, player: usize) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for child in self.children(parent) {
            let score = child.scores.get_or_zero(player);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((child.index, score));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Check the structural invariants of the arena.
    ///
    /// Trees built by the engine always pass; this is meant for trees
    /// restored from a serialized snapshot.
    pub fn verify(&self) -> Result<()> {
        let root = self
            .nodes
            .first()
            .ok_or_else(|| ArborError::CorruptTree("arena is empty".to_string()))?;
        if root.parent.is_some() || root.level != 0 {
            return Err(ArborError::CorruptTree(
                "root must have no parent and level 0".to_string(),
            ));
        }
        if root.scores.len() <= self.root_player {
            return Err(ArborError::CorruptTree(format!(
                "root player {} out of range for {} players",
                self.root_player,
                root.scores.len()
            )));
        }

        for (position, node) in self.nodes.iter().enumerate() {
            if node.index.0 != position {
                return Err(ArborError::CorruptTree(format!(
                    "node at position {} claims index {}",
                    position, node.index.0
                )));
            }

            if position > 0 {
                let parent = node.parent.filter(|p| p.0 < position).ok_or_else(|| {
                    ArborError::CorruptTree(format!("node {position} has no valid parent"))
                })?;
                let parent = self.get(parent);
                if !parent.children.contains(&node.index) {
                    return Err(ArborError::CorruptTree(format!(
                        "node {} is not listed as a child of {}",
                        position, parent.index.0
                    )));
                }
                if node.level != parent.level + 1 {
                    return Err(ArborError::CorruptTree(format!(
                        "node {} has level {}, parent has {}",
                        position, node.level, parent.level
                    )));
                }
            }

            for child in &node.children {
                let linked = self
                    .nodes
                    .get(child.0)
                    .is_some_and(|c| c.parent == Some(node.index));
                if !linked {
                    return Err(ArborError::CorruptTree(format!(
                        "child {} of node {} does not point back to it",
                        child.0, position
                    )));
                }
            }
        }

        Ok(())
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: self.root().visits,
            max_depth: self.nodes.iter().map(|n| n.level).max().unwrap_or(0),
        }
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: usize,
    pub max_depth: u32,
}
