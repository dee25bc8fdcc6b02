//! Text format for puzzle files.
//!
//! The first whitespace-separated token is the dimension `n`, followed
//! by `n * n` tile values in row-major order. Anything after the last
//! tile is ignored.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::board::{Board, BoardError};

/// Failures while reading a puzzle file into a [`Board`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read puzzle file: {0}")]
    Io(#[from] std::io::Error),
    #[error("puzzle input is empty")]
    Empty,
    #[error("expected an integer, found {0:?}")]
    BadToken(String),
    #[error("expected {expected} tile values, found {found}")]
    MissingTiles { expected: usize, found: usize },
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Parses a board from puzzle text.
pub fn board_from_str(input: &str) -> Result<Board, ParseError> {
    let mut tokens = input.split_whitespace();

    let first = tokens.next().ok_or(ParseError::Empty)?;
    let n: usize = first
        .parse()
        .map_err(|_| ParseError::BadToken(first.to_string()))?;

    // the dimension token is unvalidated input; do not size any
    // allocation from it, let the tile vector grow as tokens arrive
    let expected = n.saturating_mul(n);
    let mut tiles = Vec::new();
    for token in tokens.take(expected) {
        let tile: u32 = token
            .parse()
            .map_err(|_| ParseError::BadToken(token.to_string()))?;
        tiles.push(tile);
    }
    if tiles.len() < expected {
        return Err(ParseError::MissingTiles {
            expected,
            found: tiles.len(),
        });
    }

    Ok(Board::new(n, tiles)?)
}

/// Reads and parses a puzzle file.
pub fn board_from_file(path: &Path) -> Result<Board, ParseError> {
    board_from_str(&fs::read_to_string(path)?)
}
