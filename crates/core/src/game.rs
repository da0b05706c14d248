use crate::Scores;
use rand::Rng;

/// Game rules consumed by the search engine.
///
/// The engine never inspects states or moves; it only stores them, hands them
/// back to these methods and clones them. Implementations must be pure: the
/// same inputs always give the same outputs, and `next_state` never mutates
/// its input.
pub trait Game {
    /// A game position.
    type State: Clone;

    /// A move that transforms one position into another.
    type Move: Clone;

    /// Returns the legal moves from `state`, in a stable order.
    ///
    /// An empty vector means no move is available.
    fn available_moves(&self, state: &Self::State) -> Vec<Self::Move>;

    /// Index of the player to move, in `[0, players_count(state))`.
    fn current_player(&self, state: &Self::State) -> usize;

    /// Returns true if the game has ended.
    fn is_final(&self, state: &Self::State) -> bool;

    /// Applies a move, returning a new state.
    fn next_state(&self, state: &Self::State, mv: &Self::Move) -> Self::State;

    /// Number of players still taking part at `state` (at least 1).
    fn players_count(&self, state: &Self::State) -> usize;

    /// Per-player scores of a finished (or abandoned) playout.
    ///
    /// Only called on final states or on states where a rollout stopped
    /// because no move was available.
    fn scores(&self, state: &Self::State) -> Scores;

    /// Picks the next move during a rollout.
    ///
    /// Defaults to a uniformly random legal move. Games with a scripted
    /// playout policy override this and may ignore `rng`. Returning `None`
    /// ends the rollout.
    fn next_move<R: Rng>(&self, state: &Self::State, rng: &mut R) -> Option<Self::Move> {
        let moves = self.available_moves(state);
        if moves.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..moves.len());
        moves.into_iter().nth(idx)
    }
}
