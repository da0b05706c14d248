//! Property-based tests for the search engine.
//!
//! These tests check the tree invariants that must hold after any search:
//! - root visits equal the number of iterations run
//! - every root iteration is accounted for by exactly one root child
//! - expanded nodes were visited once more than all their children together
//! - children mirror the legal moves of their parent, in order
//! - unvisited nodes are always preferred by UCT
//! - a seeded search is reproducible

use arbor_mcts::games::{TicTacToe, TicTacToeState};
use arbor_mcts::{ArborError, Game, Mcts, MctsConfig, NodeId, Scores, SelectionPolicy, Tree, Uct};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fmt::Debug;

// =============================================================================
// Test games
// =============================================================================

/// Last-stick game for any number of players.
///
/// Players take turns removing one to three sticks; whoever takes the last
/// stick wins.
#[derive(Clone, Copy, Debug)]
struct LastStick {
    players: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Sticks {
    left: u8,
    turn: usize,
}

impl Game for LastStick {
    type State = Sticks;
    type Move = u8;

    fn available_moves(&self, state: &Sticks) -> Vec<u8> {
        (1..=3).filter(|&n| n <= state.left).collect()
    }

    fn current_player(&self, state: &Sticks) -> usize {
        state.turn % self.players
    }

    fn is_final(&self, state: &Sticks) -> bool {
        state.left == 0
    }

    fn next_state(&self, state: &Sticks, mv: &u8) -> Sticks {
        Sticks {
            left: state.left - mv,
            turn: state.turn + 1,
        }
    }

    fn players_count(&self, _state: &Sticks) -> usize {
        self.players
    }

    fn scores(&self, state: &Sticks) -> Scores {
        // The player who moved last took the final stick.
        Scores::zero_sum((state.turn + self.players - 1) % self.players, self.players)
    }
}

// =============================================================================
// Strategies for generating test inputs
// =============================================================================

/// Generate a random seed for the search
fn arb_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Generate a random iteration budget (kept small for fast tests)
fn arb_iterations() -> impl Strategy<Value = usize> {
    1usize..200
}

/// Generate a random tic-tac-toe position by making random moves
fn arb_tictactoe_position() -> impl Strategy<Value = TicTacToeState> {
    (0usize..9, arb_seed()).prop_map(|(num_moves, seed)| {
        let game = TicTacToe;
        let mut state = TicTacToeState::new();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for _ in 0..num_moves {
            match game.next_move(&state, &mut rng) {
                Some(mv) => state = game.next_state(&state, &mv),
                None => break,
            }
        }
        state
    })
}

/// Generate a random last-stick game and starting position
fn arb_last_stick() -> impl Strategy<Value = (LastStick, Sticks)> {
    (1usize..5, 1u8..15, 0usize..4).prop_map(|(players, left, turn)| {
        (LastStick { players }, Sticks { left, turn })
    })
}

// =============================================================================
// Invariant checks
// =============================================================================

fn search<G>(
    game: G,
    state: G::State,
    iterations: usize,
    seed: u64,
) -> (Tree<G::State, G::Move>, NodeId)
where
    G: Game,
{
    let mut mcts = Mcts::new(
        game,
        MctsConfig::with_iterations(iterations),
        ChaCha8Rng::seed_from_u64(seed),
    );
    let player = mcts.game().current_player(&state);
    let mut tree = mcts.create_tree(state, player).unwrap();
    let result = mcts.find_best_node(&mut tree).unwrap();
    (tree, result.best_node)
}

fn check_tree<G>(
    game: &G,
    tree: &Tree<G::State, G::Move>,
    iterations: usize,
) -> Result<(), TestCaseError>
where
    G: Game,
    G::State: PartialEq + Debug,
    G::Move: PartialEq + Debug,
{
    prop_assert!(tree.verify().is_ok());

    let root = tree.root();
    prop_assert_eq!(root.visits(), iterations);

    let child_visits: usize = tree.children(NodeId::ROOT).map(|c| c.visits()).sum();
    prop_assert_eq!(child_visits, root.visits());

    let mut child_scores = Scores::zeros(root.scores().len());
    for child in tree.children(NodeId::ROOT) {
        child_scores.accumulate(child.scores());
    }
    prop_assert_eq!(&child_scores, root.scores());

    for node in tree.nodes() {
        let players = game.players_count(node.state());
        prop_assert_eq!(node.scores().len(), players);
        prop_assert!(node.visits() <= root.visits());

        if node.is_leaf() {
            continue;
        }

        let moves = game.available_moves(node.state());
        let child_moves: Vec<&G::Move> = tree.children(node.id()).filter_map(|c| c.mv()).collect();
        prop_assert_eq!(child_moves, moves.iter().collect::<Vec<_>>());

        for child in tree.children(node.id()) {
            let mv = child.mv().unwrap();
            prop_assert_eq!(child.state(), &game.next_state(node.state(), mv));
            prop_assert_eq!(child.level(), node.level() + 1);
        }

        if !node.is_root() {
            let below: usize = tree.children(node.id()).map(|c| c.visits()).sum();
            prop_assert_eq!(node.visits(), below + 1, "node {}", node.id().index());
        }
    }

    Ok(())
}

// =============================================================================
// Tree accounting
// =============================================================================

proptest! {
    #[test]
    fn prop_tictactoe_tree_invariants(
        seed in arb_seed(),
        iterations in arb_iterations(),
        state in arb_tictactoe_position()
    ) {
        let game = TicTacToe;

        // Skip terminal positions (nothing to search)
        if game.is_final(&state) {
            return Ok(());
        }

        let (tree, _) = search(game, state, iterations, seed);
        check_tree(&game, &tree, iterations)?;
    }

    #[test]
    fn prop_last_stick_tree_invariants(
        seed in arb_seed(),
        iterations in arb_iterations(),
        (game, state) in arb_last_stick()
    ) {
        let (tree, _) = search(game, state, iterations, seed);
        check_tree(&game, &tree, iterations)?;
    }

    /// Two-player zero-sum games keep every node's scores summing to zero.
    #[test]
    fn prop_zero_sum_scores(
        seed in arb_seed(),
        iterations in arb_iterations(),
        state in arb_tictactoe_position()
    ) {
        let game = TicTacToe;
        if game.is_final(&state) {
            return Ok(());
        }

        let (tree, _) = search(game, state, iterations, seed);
        for node in tree.nodes() {
            let total: f64 = node.scores().iter().sum();
            prop_assert_eq!(total, 0.0);
        }
    }
}

// =============================================================================
// Selection and best move
// =============================================================================

proptest! {
    #[test]
    fn prop_unvisited_nodes_score_infinity(
        seed in arb_seed(),
        iterations in arb_iterations(),
        (game, state) in arb_last_stick()
    ) {
        let (tree, _) = search(game, state, iterations, seed);
        let uct = Uct::default();

        for node in tree.nodes().iter().filter(|n| !n.is_root()) {
            let parent = tree.parent(node.id()).unwrap();
            let player = game.current_player(parent.state());
            let score = uct.score(&tree, node.id(), player);
            if node.visits() == 0 {
                prop_assert_eq!(score, f64::INFINITY);
            } else {
                prop_assert!(score.is_finite());
            }
        }
    }

    #[test]
    fn prop_best_node_maximizes_root_player_score(
        seed in arb_seed(),
        iterations in arb_iterations(),
        state in arb_tictactoe_position()
    ) {
        let game = TicTacToe;
        if game.is_final(&state) {
            return Ok(());
        }

        let (tree, best) = search(game, state, iterations, seed);
        let player = tree.root_player();
        let best_score = tree.get(best).scores().get(player);

        let mut seen_best = false;
        for child in tree.children(NodeId::ROOT) {
            let score = child.scores().get(player);
            if child.id() == best {
                seen_best = true;
            } else if seen_best {
                prop_assert!(score <= best_score);
            } else {
                // Earlier children must be strictly worse.
                prop_assert!(score < best_score);
            }
        }
        prop_assert!(seen_best);
    }

    #[test]
    fn prop_final_positions_have_no_moves(state in arb_tictactoe_position()) {
        let game = TicTacToe;
        if !game.is_final(&state) {
            return Ok(());
        }

        let mut mcts = Mcts::new(
            game,
            MctsConfig::with_iterations(10),
            ChaCha8Rng::seed_from_u64(0),
        );
        let mut tree = mcts.create_tree(state, 0).unwrap();
        prop_assert!(matches!(mcts.find_best_node(&mut tree), Err(ArborError::NoLegalMoves)));
    }
}

// =============================================================================
// Determinism
// =============================================================================

proptest! {
    #[test]
    fn prop_search_deterministic_with_seed(
        seed in arb_seed(),
        iterations in arb_iterations(),
        state in arb_tictactoe_position()
    ) {
        let game = TicTacToe;
        if game.is_final(&state) {
            return Ok(());
        }

        let (tree1, best1) = search(game, state.clone(), iterations, seed);
        let (tree2, best2) = search(game, state, iterations, seed);

        prop_assert_eq!(best1, best2);
        prop_assert!(tree1 == tree2, "trees differ for seed {}", seed);
    }
}
