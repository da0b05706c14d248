//! Playouts used to value newly reached nodes.
//!
//! A rollout walks a copy of the state forward with the game's rollout
//! policy ([`Game::next_move`]) until the game ends or no move is
//! available, then scores the position it stopped at. The walk is a plain
//! loop, so its depth is bounded only by the length of the game.

use arbor_core::{Game, Scores};
use rand::Rng;
use tracing::trace;

/// Play `state` out to the end and return the resulting scores.
pub fn rollout<G, R>(game: &G, state: &G::State, rng: &mut R) -> Scores
where
    G: Game,
    R: Rng,
{
    let mut state = state.clone();
    let mut depth = 0usize;

    while !game.is_final(&state) {
        let Some(mv) = game.next_move(&state, rng) else {
            break;
        };
        state = game.next_state(&state, &mv);
        depth += 1;
    }

    let scores = score_position(game, &state);
    trace!(depth, scores = %scores, "rollout finished");
    scores
}

/// Score `state` with the rules, checking the vector covers its players.
///
/// # Panics
/// Panics if the rules return a vector whose length differs from
/// `players_count(state)`.
pub(crate) fn score_position<G: Game>(game: &G, state: &G::State) -> Scores {
    let scores = game.scores(state);
    let players = game.players_count(state);
    assert_eq!(
        scores.len(),
        players,
        "rules contract violated: score vector has {} entries for {} players",
        scores.len(),
        players
    );
    scores
}
