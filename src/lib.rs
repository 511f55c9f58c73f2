//! Sliding-tile puzzle search.
//!
//! [`puzzle::Board`] is the state model; [`search`] holds breadth-first,
//! bounded depth-first, greedy best-first and A* search over any
//! [`search::SearchState`]; [`strategy::Strategy`] wires the two together.

pub mod error;
pub mod frontier;
pub mod node;
pub mod puzzle;
pub mod search;
pub mod strategy;

pub use error::PuzzleError;
pub use node::{Arena, Node, NodeId};
pub use puzzle::{Board, Move, Tile};
pub use search::{a_star, best_first, bfs, dfs, Observer, Outcome, SearchResult, SearchState, Silent};
pub use strategy::Strategy;
