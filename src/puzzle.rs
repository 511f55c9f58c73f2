use rand::{seq::SliceRandom, Rng};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::PuzzleError;
use crate::search::SearchState;

/// A tile value. `0` is the blank.
pub type Tile = u8;

pub const BLANK: Tile = 0;

const HASH_SEED: u64 = 131;
const HASH_MODULUS: u64 = 0x7FFF_FFFF;

/// Direction the blank slides in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Left,
    Up,
    Right,
    Down,
}

impl Move {
    /// Every direction, in the order children are generated.
    pub const ALL: [Move; 4] = [Move::Left, Move::Up, Move::Right, Move::Down];

    /// `(row, column)` offset of the cell the blank moves into.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Left => (0, -1),
            Move::Up => (-1, 0),
            Move::Right => (0, 1),
            Move::Down => (1, 0),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Down => "Down",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// A square sliding-tile configuration, stored row-major.
///
/// The grid is expected to be a permutation of `0..width*width`. That is not
/// enforced: a malformed grid still builds, moves and compares, but its
/// heuristic values are skewed by the [`Board::locate`] sentinel.
///
/// Equality compares the cached hash first and then every cell, so the hash
/// only short-circuits mismatches.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    grid: Vec<Tile>,
    blank: usize,
    hashcode: u64,
}

impl Board {
    /// Builds a board from row-major tiles.
    pub fn from_tiles(width: usize, tiles: impl Into<Vec<Tile>>) -> Result<Self, PuzzleError> {
        let expected = Self::cell_count(width)?;
        let grid = tiles.into();
        if grid.len() != expected {
            return Err(PuzzleError::TileCount {
                expected,
                found: grid.len(),
            });
        }

        let mut board = Self {
            width,
            grid,
            blank: 0,
            hashcode: 0,
        };
        board.blank = board.locate(BLANK);
        board.hashcode = hash_grid(&board.grid);
        Ok(board)
    }

    /// Parses `width * width` whitespace-separated integers.
    pub fn parse(width: usize, input: &str) -> Result<Self, PuzzleError> {
        let tiles = input
            .split_whitespace()
            .map(|token| {
                token.parse::<Tile>().map_err(|_| PuzzleError::InvalidTile {
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_tiles(width, tiles)
    }

    /// Number of cells on a board `width` tiles wide. Fails for zero and for
    /// widths whose square does not fit in `usize`.
    pub fn cell_count(width: usize) -> Result<usize, PuzzleError> {
        match width.checked_mul(width) {
            Some(size) if size > 0 => Ok(size),
            _ => Err(PuzzleError::InvalidWidth(width)),
        }
    }

    /// The goal layout: `1..width*width` in order, blank last.
    ///
    /// Fails with [`PuzzleError::InvalidWidth`] when the largest tile would
    /// not fit in a [`Tile`].
    pub fn solved(width: usize) -> Result<Self, PuzzleError> {
        let size = Self::cell_count(width)?;
        let tiles = (1..size)
            .map(|value| Tile::try_from(value).map_err(|_| PuzzleError::InvalidWidth(width)))
            .chain(std::iter::once(Ok(BLANK)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_tiles(width, tiles)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.grid
    }

    pub fn blank_index(&self) -> usize {
        self.blank
    }

    pub fn hashcode(&self) -> u64 {
        self.hashcode
    }

    /// Whether the grid holds every value of `0..width*width` exactly once.
    pub fn is_permutation(&self) -> bool {
        let mut seen = vec![false; self.grid.len()];
        for &tile in &self.grid {
            match seen.get_mut(usize::from(tile)) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    /// Index of `tile`, or the grid length when the tile is missing.
    ///
    /// The sentinel is not an error: heuristics computed against a malformed
    /// grid are silently skewed rather than rejected.
    pub fn locate(&self, tile: Tile) -> usize {
        self.grid
            .iter()
            .position(|&t| t == tile)
            .unwrap_or(self.grid.len())
    }

    /// Index the blank would move into, if `direction` stays on the grid.
    fn target_index(&self, direction: Move) -> Option<usize> {
        // A grid without a blank has nothing to slide.
        if self.blank >= self.grid.len() {
            return None;
        }
        let (dx, dy) = direction.as_offset();
        let size = self.width as isize;
        let new_x = (self.blank / self.width) as isize + dx;
        let new_y = (self.blank % self.width) as isize + dy;

        if new_x >= 0 && new_x < size && new_y >= 0 && new_y < size {
            Some(new_x as usize * self.width + new_y as usize)
        } else {
            None
        }
    }

    /// Slides the blank one cell. Returns `false` and leaves the board
    /// untouched when the blank sits on the edge it would cross.
    pub fn move_blank(&mut self, direction: Move) -> bool {
        let Some(next) = self.target_index(direction) else {
            return false;
        };
        self.grid.swap(self.blank, next);
        self.blank = next;
        self.hashcode = hash_grid(&self.grid);
        true
    }

    /// A copy of this board with the blank moved, if the move is legal.
    pub fn moved(&self, direction: Move) -> Option<Self> {
        let mut next = self.clone();
        next.move_blank(direction).then_some(next)
    }

    /// The move that turns `self` into `other`, if they are one move apart.
    pub fn move_to(&self, other: &Board) -> Option<Move> {
        Move::ALL
            .into_iter()
            .find(|&direction| self.moved(direction).as_ref() == Some(other))
    }

    /// Number of cells that differ from `other`, blank included.
    ///
    /// Not admissible; used to steer greedy best-first search.
    pub fn hamming_distance(&self, other: &Board) -> usize {
        self.grid
            .iter()
            .zip(&other.grid)
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Sum over every tile of the row and column distance to its position
    /// in `reference`. The blank is skipped: a move shifts exactly one tile
    /// by one cell, so the sum never exceeds the true move count.
    pub fn manhattan_distance(&self, reference: &Board) -> usize {
        let width = self.width;
        self.grid
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != BLANK)
            .map(|(i, &tile)| {
                let j = reference.locate(tile);
                (i % width).abs_diff(j % width) + (i / width).abs_diff(j / width)
            })
            .sum()
    }

    /// Walks the blank `moves` times at random, never undoing the previous
    /// step. The result is always reachable from `self`.
    pub fn scramble<R: Rng + ?Sized>(&self, moves: usize, rng: &mut R) -> Self {
        let mut board = self.clone();
        let mut last: Option<Move> = None;

        for _ in 0..moves {
            let options: Vec<Move> = Move::ALL
                .into_iter()
                .filter(|&m| Some(m.opposite()) != last && board.target_index(m).is_some())
                .collect();
            let Some(&direction) = options.choose(rng) else {
                break;
            };
            board.move_blank(direction);
            last = Some(direction);
        }

        board
    }
}

// BKDR hash
fn hash_grid(grid: &[Tile]) -> u64 {
    grid.iter()
        .fold(0u64, |hash, &tile| {
            hash.wrapping_mul(HASH_SEED).wrapping_add(u64::from(tile))
        })
        % HASH_MODULUS
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.hashcode == other.hashcode && self.grid == other.grid
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hashcode);
    }
}

impl SearchState for Board {
    fn expand(&self) -> impl Iterator<Item = Self> + '_ {
        Move::ALL
            .into_iter()
            .filter_map(move |direction| self.moved(direction))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid.chunks(self.width) {
            for &val in row {
                write!(f, "{:2} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn board(width: usize, tiles: &[Tile]) -> Board {
        Board::from_tiles(width, tiles.to_vec()).unwrap()
    }

    #[test]
    fn test_blank_index_and_hash_initialized() {
        let b = board(3, &[1, 2, 3, 4, 0, 5, 6, 7, 8]);
        assert_eq!(b.blank_index(), 4);
        assert_eq!(b.hashcode(), hash_grid(b.tiles()));
    }

    #[test]
    fn test_rejects_wrong_tile_count() {
        assert_eq!(
            Board::from_tiles(3, vec![1u8, 2, 3]),
            Err(PuzzleError::TileCount {
                expected: 9,
                found: 3
            })
        );
        assert_eq!(
            Board::from_tiles(0, Vec::<Tile>::new()),
            Err(PuzzleError::InvalidWidth(0))
        );
    }

    #[test]
    fn test_parse() {
        let b = Board::parse(2, " 1 2\n3   0 ").unwrap();
        assert_eq!(b.tiles(), &[1, 2, 3, 0]);
        assert!(matches!(
            Board::parse(2, "1 2 x 0"),
            Err(PuzzleError::InvalidTile { token }) if token == "x"
        ));
        assert!(matches!(
            Board::parse(2, "1 2 300 0"),
            Err(PuzzleError::InvalidTile { .. })
        ));
    }

    #[test]
    fn test_solved() {
        assert_eq!(Board::solved(3).unwrap().tiles(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(Board::solved(1).unwrap().tiles(), &[0]);
        assert_eq!(Board::solved(16).unwrap().tiles().len(), 256);
    }

    #[test]
    fn test_oversized_width_is_invalid() {
        assert_eq!(Board::solved(17), Err(PuzzleError::InvalidWidth(17)));
        assert_eq!(Board::solved(0), Err(PuzzleError::InvalidWidth(0)));
        assert_eq!(
            Board::cell_count(usize::MAX),
            Err(PuzzleError::InvalidWidth(usize::MAX))
        );
        assert_eq!(
            Board::from_tiles(usize::MAX, vec![BLANK]),
            Err(PuzzleError::InvalidWidth(usize::MAX))
        );
        assert_eq!(Board::cell_count(4), Ok(16));
    }

    #[test]
    fn test_equality_ignores_construction_path() {
        let built = board(3, &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        let mut moved = board(3, &[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        assert!(moved.move_blank(Move::Right));
        let copied = built.clone();

        assert_eq!(built, built);
        assert_eq!(built, moved);
        assert_eq!(moved, built);
        assert_eq!(moved, copied);
        assert_eq!(built, copied);
        assert_ne!(built, board(3, &[1, 2, 3, 4, 5, 6, 0, 7, 8]));
    }

    #[test]
    fn test_move_blank_blocked_at_edges() {
        let mut corner = board(3, &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        let before = corner.clone();
        assert!(!corner.move_blank(Move::Up));
        assert!(!corner.move_blank(Move::Left));
        assert_eq!(corner.tiles(), before.tiles());
        assert_eq!(corner.hashcode(), before.hashcode());
        assert_eq!(corner.blank_index(), 0);

        let mut bottom_right = board(3, &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert!(!bottom_right.move_blank(Move::Down));
        assert!(!bottom_right.move_blank(Move::Right));
    }

    #[test]
    fn test_move_then_inverse_restores() {
        let start = board(3, &[1, 2, 3, 4, 0, 5, 6, 7, 8]);
        for direction in Move::ALL {
            let mut b = start.clone();
            assert!(b.move_blank(direction));
            assert_ne!(b, start);
            assert!(b.move_blank(direction.opposite()));
            assert_eq!(b.tiles(), start.tiles());
            assert_eq!(b.hashcode(), start.hashcode());
            assert_eq!(b.blank_index(), start.blank_index());
        }
    }

    #[test]
    fn test_move_updates_blank_index() {
        let mut b = board(3, &[1, 2, 3, 4, 0, 5, 6, 7, 8]);
        assert!(b.move_blank(Move::Left));
        assert_eq!(b.blank_index(), 3);
        assert!(b.move_blank(Move::Up));
        assert_eq!(b.blank_index(), 0);
        assert_eq!(b.tiles(), &[0, 2, 3, 1, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_expand_counts_and_order() {
        for width in 2..=5 {
            let size = width * width;
            for blank in 0..size {
                let mut tiles: Vec<Tile> = (1..size as Tile).collect();
                tiles.insert(blank, BLANK);
                let b = board(width, &tiles);

                let (row, col) = (blank / width, blank % width);
                let on_row_edge = row == 0 || row == width - 1;
                let on_col_edge = col == 0 || col == width - 1;
                let expected = match (on_row_edge, on_col_edge) {
                    (true, true) => 2,
                    (true, false) | (false, true) => 3,
                    (false, false) => 4,
                };
                assert_eq!(b.expand().count(), expected, "width {width} blank {blank}");
            }
        }

        let center = board(3, &[1, 2, 3, 4, 0, 5, 6, 7, 8]);
        let blanks: Vec<usize> = center.expand().map(|c| c.blank_index()).collect();
        assert_eq!(blanks, vec![3, 1, 5, 7]);
    }

    #[test]
    fn test_heuristics_zero_on_self() {
        let b = board(3, &[8, 1, 3, 4, 0, 2, 7, 6, 5]);
        assert_eq!(b.hamming_distance(&b), 0);
        assert_eq!(b.manhattan_distance(&b), 0);
    }

    #[test]
    fn test_heuristic_values() {
        let target = board(3, &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        let one_away = board(3, &[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        assert_eq!(one_away.hamming_distance(&target), 2);
        assert_eq!(one_away.manhattan_distance(&target), 1);

        let far = board(3, &[8, 1, 3, 4, 0, 2, 7, 6, 5]);
        // 8:3 1:1 2:2 6:2 5:2
        assert_eq!(far.manhattan_distance(&target), 10);
        assert_eq!(far.hamming_distance(&target), 6);
    }

    #[test]
    fn test_locate_sentinel_for_missing_tile() {
        let malformed = board(2, &[1, 1, 3, 0]);
        assert!(!malformed.is_permutation());
        assert_eq!(malformed.locate(2), 4);
        assert!(board(2, &[1, 2, 3, 0]).is_permutation());
    }

    #[test]
    fn test_board_without_blank_cannot_move() {
        let mut b = board(2, &[1, 2, 3, 3]);
        assert_eq!(b.blank_index(), 4);
        for direction in Move::ALL {
            assert!(!b.move_blank(direction));
        }
        assert_eq!(b.expand().count(), 0);
    }

    #[test]
    fn test_move_to() {
        let a = board(3, &[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        let b = board(3, &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(a.move_to(&b), Some(Move::Right));
        assert_eq!(b.move_to(&a), Some(Move::Left));
        assert_eq!(a.move_to(&a), None);
    }

    #[test]
    fn test_scramble_is_reproducible() {
        let solved = Board::solved(3).unwrap();
        let a = solved.scramble(30, &mut StdRng::seed_from_u64(7));
        let b = solved.scramble(30, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(a.is_permutation());
        assert_eq!(solved.scramble(0, &mut StdRng::seed_from_u64(7)), solved);
    }

    #[test]
    fn test_display() {
        let b = board(2, &[1, 2, 3, 0]);
        assert_eq!(b.to_string(), " 1  2 \n 3  0 \n");
    }
}
