//! Search lifecycle notifications.
//!
//! A [`Notifier`] observes a search synchronously. It receives a read-only
//! view of the tree with every event and cannot influence the search.

use crate::node::NodeId;
use crate::tree::Tree;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Something that happened during a search.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchEvent {
    /// A search call started on the tree rooted at `root`.
    RunStarted { root: NodeId },

    /// An iteration is about to run. `iteration` counts the iterations
    /// already completed in this call.
    Iteration { iteration: usize, elapsed: Duration },

    /// `node` was chosen by the selection formula on behalf of `player`.
    NodeSelected { node: NodeId, player: usize },

    /// `node` received its children.
    NodeExpanded { node: NodeId, children: usize },

    /// A rollout is starting from `node`.
    Rollout { node: NodeId },

    /// The statistics of `node` were updated.
    ScoresUpdated { node: NodeId },

    /// The search call finished.
    RunFinished {
        best: NodeId,
        iterations: usize,
        elapsed: Duration,
    },
}

/// Observer of search events.
///
/// Closures `FnMut(&Tree<S, M>, &SearchEvent)` are notifiers.
pub trait Notifier<S, M> {
    fn notify(&mut self, tree: &Tree<S, M>, event: &SearchEvent);
}

impl<S, M, F> Notifier<S, M> for F
where
    F: FnMut(&Tree<S, M>, &SearchEvent),
{
    fn notify(&mut self, tree: &Tree<S, M>, event: &SearchEvent) {
        self(tree, event)
    }
}

/// Notifier that records every event.
///
/// Clones share the same log, so one clone can be handed to the engine
/// while another is kept for inspection.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<SearchEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<SearchEvent> {
        self.events.borrow().clone()
    }

    /// Number of recorded events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&SearchEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| predicate(e)).count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl<S, M> Notifier<S, M> for EventLog {
    fn notify(&mut self, _tree: &Tree<S, M>, event: &SearchEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
