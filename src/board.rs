//! Immutable n-by-n sliding puzzle board.
//!
//! Tiles are stored as a flat row-major array where 0 marks the blank
//! cell. Every transformation (neighbor move, twin swap) returns a new
//! board; a board is never mutated after construction, so two logically
//! distinct states can never alias the same backing storage.

use std::fmt;

use thiserror::Error;

/// Validation failures raised when constructing or transforming a board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board dimension must be at least 2, got {0}")]
    DimensionTooSmall(usize),
    #[error("expected {expected} tiles for a {n}x{n} board, got {got}")]
    WrongTileCount { n: usize, expected: usize, got: usize },
    #[error("grid is not square: row {row} has {got} columns, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("tile value {0} is outside 0..{1}")]
    TileOutOfRange(u32, u32),
    #[error("tile value {0} appears more than once")]
    DuplicateTile(u32),
    /// Raised by [`Board::twin`] when no row holds two non-blank tiles.
    /// Only a 1x1 board can trigger this, and construction rejects those.
    #[error("no row contains two non-blank tiles to swap")]
    TwinUnavailable,
}

/// An n-by-n arrangement of the tiles `0..n*n`, with 0 as the blank.
///
/// Equality and hashing are structural over the dimension and the full
/// tile sequence.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    n: usize,
    tiles: Vec<u32>,
    /// Index of the blank in `tiles`; kept in sync by construction.
    blank: usize,
}

impl Board {
    /// Creates a board from a flat row-major tile sequence.
    ///
    /// The tiles must be a permutation of `0..n*n` and `n` must be at
    /// least 2.
    pub fn new(n: usize, tiles: Vec<u32>) -> Result<Board, BoardError> {
        if n < 2 {
            return Err(BoardError::DimensionTooSmall(n));
        }
        let expected = n * n;
        if tiles.len() != expected {
            return Err(BoardError::WrongTileCount {
                n,
                expected,
                got: tiles.len(),
            });
        }

        let mut seen = vec![false; expected];
        for &tile in &tiles {
            let slot = seen
                .get_mut(tile as usize)
                .ok_or(BoardError::TileOutOfRange(tile, expected as u32))?;
            if *slot {
                return Err(BoardError::DuplicateTile(tile));
            }
            *slot = true;
        }

        // a full permutation guarantees exactly one blank
        let blank = tiles.iter().position(|&t| t == 0).unwrap_or(0);
        Ok(Board { n, tiles, blank })
    }

    /// Creates a board from a 2-D grid of rows.
    pub fn from_rows(rows: &[Vec<u32>]) -> Result<Board, BoardError> {
        let n = rows.len();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != n {
                return Err(BoardError::NotSquare {
                    row,
                    expected: n,
                    got: cells.len(),
                });
            }
        }
        Board::new(n, rows.iter().flatten().copied().collect())
    }

    /// The solved board: tiles 1..n*n in order with the blank last.
    pub fn goal(n: usize) -> Result<Board, BoardError> {
        if n < 2 {
            return Err(BoardError::DimensionTooSmall(n));
        }
        let mut tiles: Vec<u32> = (1..(n * n) as u32).collect();
        tiles.push(0);
        Board::new(n, tiles)
    }

    /// Grid side length.
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// The tiles in row-major order.
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    /// Number of non-blank tiles that are not in their goal cell.
    pub fn hamming(&self) -> u32 {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(idx, &tile)| tile != 0 && tile != (idx + 1) as u32)
            .count() as u32
    }

    /// Sum over non-blank tiles of the grid distance to their goal cell.
    ///
    /// Never overestimates the true remaining move count: one blank swap
    /// moves exactly one tile by one cell.
    pub fn manhattan(&self) -> u32 {
        let n = self.n;
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != 0)
            .map(|(idx, &tile)| {
                let target = (tile - 1) as usize;
                let row_distance = (idx / n).abs_diff(target / n);
                let col_distance = (idx % n).abs_diff(target % n);
                (row_distance + col_distance) as u32
            })
            .sum()
    }

    /// True iff every non-blank tile sits in its goal cell.
    pub fn is_goal(&self) -> bool {
        self.hamming() == 0
    }

    /// All boards reachable by swapping the blank with an adjacent cell.
    ///
    /// Produced in a fixed up, down, left, right order: 2 boards when
    /// the blank is in a corner, 3 on an edge, 4 in the interior.
    pub fn neighbors(&self) -> Vec<Board> {
        let n = self.n;
        let (row, col) = (self.blank / n, self.blank % n);

        let mut neighbors = Vec::with_capacity(4);
        if row > 0 {
            neighbors.push(self.swapped(self.blank, self.blank - n));
        }
        if row < n - 1 {
            neighbors.push(self.swapped(self.blank, self.blank + n));
        }
        if col > 0 {
            neighbors.push(self.swapped(self.blank, self.blank - 1));
        }
        if col < n - 1 {
            neighbors.push(self.swapped(self.blank, self.blank + 1));
        }
        neighbors
    }

    /// A board with the first two non-blank tiles of the topmost row
    /// that has two swapped.
    ///
    /// Swapping two non-blank tiles flips the permutation's parity, so a
    /// board and its twin are never both solvable and never both
    /// unsolvable. Fails only when no row has two non-blank tiles, which
    /// construction already rules out by requiring `n >= 2`.
    pub fn twin(&self) -> Result<Board, BoardError> {
        for row in 0..self.n {
            let start = row * self.n;
            let mut cells = (start..start + self.n).filter(|&idx| self.tiles[idx] != 0);
            if let (Some(first), Some(second)) = (cells.next(), cells.next()) {
                return Ok(self.swapped(first, second));
            }
        }
        Err(BoardError::TwinUnavailable)
    }

    /// Returns a copy of this board with the tiles at `a` and `b` swapped.
    fn swapped(&self, a: usize, b: usize) -> Board {
        let mut tiles = self.tiles.clone();
        tiles.swap(a, b);
        let blank = if self.blank == a {
            b
        } else if self.blank == b {
            a
        } else {
            self.blank
        };
        Board {
            n: self.n,
            tiles,
            blank,
        }
    }
}

/// Dimension on the first line, then rows of two-digit tile fields.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.n)?;
        for row in self.tiles.chunks(self.n) {
            for (col, tile) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:2}", tile)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({}x{}: {:?})", self.n, self.n, self.tiles)
    }
}
