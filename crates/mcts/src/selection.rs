//! Child selection.
//!
//! The default formula is UCT:
//!
//! ```text
//! score = scores[p] / n + c * sqrt(ln(max(N, 1)) / n)
//! ```
//!
//! where `p` is the player choosing at the parent, `n` the child's visits,
//! `N` the parent's visits and `c` the exploration constant. Unvisited
//! children score +infinity, so every sibling is tried once before the
//! formula starts exploiting.

use crate::node::NodeId;
use crate::tree::Tree;

/// Scores a child for selection from the perspective of `player`.
///
/// Closures of the shape `Fn(&Tree<S, M>, NodeId, usize) -> f64` implement
/// this trait, so a custom formula can be plugged in without a new type.
pub trait SelectionPolicy<S, M> {
    fn score(&self, tree: &Tree<S, M>, node: NodeId, player: usize) -> f64;
}

impl<S, M, F> SelectionPolicy<S, M> for F
where
    F: Fn(&Tree<S, M>, NodeId, usize) -> f64,
{
    fn score(&self, tree: &Tree<S, M>, node: NodeId, player: usize) -> f64 {
        self(tree, node, player)
    }
}

/// Upper Confidence Bound applied to Trees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Uct {
    exploration: f64,
}

impl Uct {
    pub fn new(exploration: f64) -> Self {
        Self { exploration }
    }

    pub fn exploration(&self) -> f64 {
        self.exploration
    }
}

impl Default for Uct {
    fn default() -> Self {
        Self::new(std::f64::consts::SQRT_2)
    }
}

impl<S, M> SelectionPolicy<S, M> for Uct {
    fn score(&self, tree: &Tree<S, M>, node: NodeId, player: usize) -> f64 {
        let child = tree.get(node);
        if child.visits() == 0 {
            return f64::INFINITY;
        }

        let visits = child.visits() as f64;
        let parent_visits = tree.parent(node).map_or(1, |p| p.visits()).max(1) as f64;

        let exploitation = child.scores().get_or_zero(player) / visits;
        exploitation + self.exploration * (parent_visits.ln() / visits).sqrt()
    }
}

/// Pick the child of `parent` with the highest score for `player`.
///
/// Children are scanned in move order and a later child replaces the
/// current best only if it scores strictly higher, so ties go to the
/// earliest child. Returns None if `parent` has no children.
pub fn select_child<S, M, P>(
    tree: &Tree<S, M>,
    policy: &P,
    parent: NodeId,
    player: usize,
) -> Option<NodeId>
where
    P: SelectionPolicy<S, M> + ?Sized,
{
    let (&first, rest) = tree.get(parent).children().split_first()?;

    let mut best = first;
    let mut best_score = policy.score(tree, first, player);
    for &child in rest {
        let score = policy.score(tree, child, player);
        if score > best_score {
            best = child;
            best_score = score;
        }
    }

    Some(best)
}
