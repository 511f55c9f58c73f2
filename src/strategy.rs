use std::fmt;

use crate::error::PuzzleError;
use crate::node::Node;
use crate::puzzle::Board;
use crate::search::{self, Observer, SearchResult};

/// The four ways a board can be solved, numbered as on the console menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    BreadthFirst,
    DepthFirst { max_depth: usize },
    BestFirst,
    AStar,
}

impl Strategy {
    /// Menu number that needs a depth bound.
    pub const DEPTH_FIRST_OPTION: u32 = 2;

    /// `(option, label)` pairs for the selection menu.
    pub const MENU: [(u32, &'static str); 4] = [
        (1, "Breadth First Search"),
        (2, "Depth First Search"),
        (3, "Best First Search"),
        (4, "A* Search"),
    ];

    /// Maps a menu number to a strategy. `max_depth` is only read for
    /// depth-first search and defaults to zero.
    pub fn from_option(option: u32, max_depth: Option<usize>) -> Result<Self, PuzzleError> {
        match option {
            1 => Ok(Strategy::BreadthFirst),
            2 => Ok(Strategy::DepthFirst {
                max_depth: max_depth.unwrap_or_default(),
            }),
            3 => Ok(Strategy::BestFirst),
            4 => Ok(Strategy::AStar),
            other => Err(PuzzleError::UnknownStrategy(other)),
        }
    }

    /// Runs the strategy from `start` to `target`.
    ///
    /// Best-first ranks nodes by depth plus misplaced tiles; A* uses depth as
    /// path cost and Manhattan distance as the estimate.
    pub fn run<O>(&self, start: &Board, target: &Board, observer: O) -> SearchResult<Board>
    where
        O: Observer<Board>,
    {
        match *self {
            Strategy::BreadthFirst => search::bfs(start, target, observer),
            Strategy::DepthFirst { max_depth } => search::dfs(start, target, max_depth, observer),
            Strategy::BestFirst => search::best_first(
                start,
                target,
                |node: &Node<Board>| node.depth() + target.hamming_distance(node.state()),
                observer,
            ),
            Strategy::AStar => search::a_star(
                start,
                target,
                |node: &Node<Board>| node.depth(),
                |node: &Node<Board>| node.state().manhattan_distance(target),
                observer,
            ),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::BreadthFirst => write!(f, "breadth-first"),
            Strategy::DepthFirst { max_depth } => write!(f, "depth-first (max depth {})", max_depth),
            Strategy::BestFirst => write!(f, "best-first"),
            Strategy::AStar => write!(f, "A*"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Silent;

    fn board(tiles: &[u8]) -> Board {
        Board::from_tiles(3, tiles.to_vec()).unwrap()
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Strategy::from_option(1, None), Ok(Strategy::BreadthFirst));
        assert_eq!(
            Strategy::from_option(2, Some(7)),
            Ok(Strategy::DepthFirst { max_depth: 7 })
        );
        assert_eq!(
            Strategy::from_option(2, None),
            Ok(Strategy::DepthFirst { max_depth: 0 })
        );
        assert_eq!(Strategy::from_option(4, Some(7)), Ok(Strategy::AStar));
        assert_eq!(
            Strategy::from_option(5, None),
            Err(PuzzleError::UnknownStrategy(5))
        );
        assert_eq!(
            Strategy::from_option(0, None),
            Err(PuzzleError::UnknownStrategy(0))
        );
    }

    #[test_log::test]
    fn test_every_strategy_solves_short_instance() {
        let start = board(&[1, 2, 3, 4, 0, 6, 7, 5, 8]);
        let target = board(&[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        let strategies = [
            Strategy::BreadthFirst,
            Strategy::DepthFirst { max_depth: 4 },
            Strategy::BestFirst,
            Strategy::AStar,
        ];
        for strategy in strategies {
            let result = strategy.run(&start, &target, Silent);
            assert!(result.success(), "{strategy} failed");
            assert_eq!(result.path().first(), Some(&start));
            assert_eq!(result.path().last(), Some(&target));
        }
    }

    #[test]
    fn test_a_star_depth_is_two() {
        let start = board(&[1, 2, 3, 4, 0, 6, 7, 5, 8]);
        let target = board(&[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        let result = Strategy::AStar.run(&start, &target, Silent);
        assert_eq!(result.depth(), Some(2));
    }
}
