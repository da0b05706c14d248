use thiserror::Error;

/// Errors reported by the search engine.
#[derive(Error, Debug)]
pub enum ArborError {
    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Search budget missing: set max_iterations and/or time_limit")]
    MissingBudget,

    #[error("Invalid root player {player}: game has {count} players")]
    InvalidRootPlayer { player: usize, count: usize },

    #[error("Corrupt tree: {0}")]
    CorruptTree(String),
}

/// Convenience Result type for arbor operations
pub type Result<T> = std::result::Result<T, ArborError>;
