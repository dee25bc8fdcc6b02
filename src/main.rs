//! Sliding Tile Puzzle Solver
//!
//! Solves the classic blank-tile sliding puzzle with A* search over
//! board states. Solvability is decided without inversion counting:
//! a twin search from a parity-flipped copy of the input runs in
//! lockstep with the main search, and whichever reaches the goal
//! settles the verdict.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rand::seq::SliceRandom;

use npuzzle::board::Board;
use npuzzle::parse;
use npuzzle::solver::Solver;

/// Solves sliding tile puzzles and reports optimal move sequences.
#[derive(Parser)]
#[command(name = "npuzzle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a puzzle file and print the optimal move sequence.
    Solve { file: PathBuf },
    /// Report whether a puzzle file is solvable, without the moves.
    Check { file: PathBuf },
    /// Print a random solvable n-by-n puzzle.
    Random {
        n: usize,
        /// Number of scrambling moves applied to the goal board.
        #[arg(long, default_value_t = 40)]
        scrambles: usize,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Solve { file } => run_solve(&file),
        Command::Check { file } => run_check(&file),
        Command::Random { n, scrambles } => run_random(n, scrambles),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

/// Solves a puzzle file and prints the outcome.
fn run_solve(file: &Path) -> Result<(), String> {
    let board = parse::board_from_file(file).map_err(|e| e.to_string())?;
    let solver = Solver::new(board).map_err(|e| e.to_string())?;
    print!("{}", render_outcome(&solver));
    Ok(())
}

/// Prints the solvability verdict only.
fn run_check(file: &Path) -> Result<(), String> {
    let board = parse::board_from_file(file).map_err(|e| e.to_string())?;
    let solver = Solver::new(board).map_err(|e| e.to_string())?;
    if solver.is_solvable() {
        println!("Solvable in {} moves", solver.moves());
    } else {
        println!("Not solvable");
    }
    Ok(())
}

/// Prints a solvable board scrambled by a random walk from the goal.
///
/// The walk never undoes its previous move, so short walks do not
/// collapse back to the goal board too often.
fn run_random(n: usize, scrambles: usize) -> Result<(), String> {
    let mut board = Board::goal(n).map_err(|e| e.to_string())?;
    let mut previous: Option<Board> = None;
    let mut rng = rand::thread_rng();

    for _ in 0..scrambles {
        let choices: Vec<Board> = board
            .neighbors()
            .into_iter()
            .filter(|b| Some(b) != previous.as_ref())
            .collect();
        let next = choices
            .choose(&mut rng)
            .cloned()
            .ok_or("no scramble move available")?;
        previous = Some(board);
        board = next;
    }

    print!("{board}");
    Ok(())
}

/// Formats a solver outcome the way the solve command prints it.
fn render_outcome(solver: &Solver) -> String {
    match solver.solution() {
        None => "No solution possible\n".to_string(),
        Some(path) => {
            let mut output = format!("Minimum number of moves = {}\n", solver.moves());
            for board in path {
                output.push_str(&board.to_string());
            }
            output
        }
    }
}
