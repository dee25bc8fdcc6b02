//! Sliding Tile Puzzle Solver Library
//!
//! Provides an immutable board abstraction for the classic blank-tile
//! sliding puzzle and an A* solver that decides solvability with the
//! twin-board parity trick.

pub mod board;
pub mod parse;
pub mod solver;

pub use board::{Board, BoardError};
pub use solver::Solver;
