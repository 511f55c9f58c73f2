use thiserror::Error;

/// Errors raised while building boards or choosing a search strategy.
///
/// A grid that is not a permutation of `0..N*N` is deliberately not an
/// error; see [`crate::puzzle::Board::is_permutation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("expected {expected} tiles, found {found}")]
    TileCount { expected: usize, found: usize },

    #[error("invalid tile {token:?}")]
    InvalidTile { token: String },

    #[error("board width must be at least 1, got {0}")]
    InvalidWidth(usize),

    #[error("unsupported search strategy {0}, expected 1-4")]
    UnknownStrategy(u32),
}
