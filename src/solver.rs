//! A* search over board states with a twin-board solvability test.
//!
//! Key points:
//! - Min-ordered binary heap frontier keyed on `f = moves + manhattan`,
//!   ties broken by manhattan and then insertion order for
//!   reproducible output
//! - Two searches advance in strict alternation: one from the given
//!   board, one from its twin; a single tile swap flips permutation
//!   parity, so exactly one of the two can ever reach the goal
//! - FxHashSet of expanded boards for state deduplication
//! - Rc back-references from each node to its predecessor; the solution
//!   path is recovered by walking them from the dequeued goal node

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

use rustc_hash::FxHashSet;

use crate::board::{Board, BoardError};

/// One explored state: the board, its depth, and a link to the state it
/// was expanded from. The links form an acyclic chain back to the start
/// board, kept alive by the frontier and by the recorded goal node.
struct SearchNode {
    board: Board,
    moves: u32,
    manhattan: u32,
    parent: Option<Rc<SearchNode>>,
}

/// Frontier entry, ordered so that `BinaryHeap::pop` yields the lowest
/// `f = moves + manhattan` first.
struct Entry {
    priority: u32,
    manhattan: u32,
    seq: u64,
    node: Rc<SearchNode>,
}

impl Entry {
    fn key(&self) -> (u32, u32, u64) {
        (self.priority, self.manhattan, self.seq)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    // reversed comparison turns the max-heap into a min-heap
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Outcome of dequeuing and expanding one frontier node.
enum Step {
    Goal(Rc<SearchNode>),
    Expanded,
    Exhausted,
}

/// One best-first search instance: a frontier plus its expanded set.
struct Search {
    frontier: BinaryHeap<Entry>,
    expanded: FxHashSet<Board>,
    seq: u64,
}

impl Search {
    fn new(start: Board) -> Search {
        let mut search = Search {
            frontier: BinaryHeap::new(),
            expanded: FxHashSet::default(),
            seq: 0,
        };
        let manhattan = start.manhattan();
        search.push(Rc::new(SearchNode {
            board: start,
            moves: 0,
            manhattan,
            parent: None,
        }));
        search
    }

    fn push(&mut self, node: Rc<SearchNode>) {
        let entry = Entry {
            priority: node.moves + node.manhattan,
            manhattan: node.manhattan,
            seq: self.seq,
            node,
        };
        self.seq += 1;
        self.frontier.push(entry);
    }

    /// Dequeues the minimum-priority node and expands its neighbors.
    ///
    /// Stale entries for boards already expanded at equal or lower cost
    /// are discarded without counting as a step.
    fn step(&mut self) -> Step {
        let node = loop {
            match self.frontier.pop() {
                None => return Step::Exhausted,
                Some(entry) if self.expanded.contains(&entry.node.board) => continue,
                Some(entry) => break entry.node,
            }
        };

        if node.board.is_goal() {
            return Step::Goal(node);
        }
        self.expanded.insert(node.board.clone());

        for neighbor in node.board.neighbors() {
            // never step straight back into the board we came from
            if let Some(parent) = &node.parent {
                if neighbor == parent.board {
                    continue;
                }
            }
            if self.expanded.contains(&neighbor) {
                continue;
            }
            let manhattan = neighbor.manhattan();
            self.push(Rc::new(SearchNode {
                board: neighbor,
                moves: node.moves + 1,
                manhattan,
                parent: Some(Rc::clone(&node)),
            }));
        }
        Step::Expanded
    }
}

/// Runs A* from a board and from its twin in lockstep, and reports
/// solvability, the optimal move count, and the move sequence.
pub struct Solver {
    /// The dequeued goal node of the primary search, if it won.
    goal: Option<Rc<SearchNode>>,
}

impl Solver {
    /// Searches from `initial` until either it or its twin reaches the
    /// goal. Terminates for every valid board: the two searches cover
    /// disjoint parity classes and the goal lies in exactly one.
    ///
    /// The only error is the board's own twin condition, which a board
    /// with dimension >= 2 cannot trigger.
    pub fn new(initial: Board) -> Result<Solver, BoardError> {
        let twin = initial.twin()?;
        let mut primary = Search::new(initial);
        let mut shadow = Search::new(twin);
        let mut shadow_live = true;

        loop {
            match primary.step() {
                Step::Goal(node) => return Ok(Solver { goal: Some(node) }),
                // the whole parity class is explored and holds no goal
                Step::Exhausted => return Ok(Solver { goal: None }),
                Step::Expanded => {}
            }
            if shadow_live {
                match shadow.step() {
                    // the twin is solvable, so the original is not
                    Step::Goal(_) => return Ok(Solver { goal: None }),
                    // the twin's class holds no goal; only the primary
                    // search can still settle the verdict
                    Step::Exhausted => shadow_live = false,
                    Step::Expanded => {}
                }
            }
        }
    }

    /// True iff the initial board can reach the goal.
    pub fn is_solvable(&self) -> bool {
        self.goal.is_some()
    }

    /// Minimum number of moves to the goal, or -1 if unsolvable.
    pub fn moves(&self) -> i32 {
        self.goal.as_ref().map_or(-1, |goal| goal.moves as i32)
    }

    /// The boards from the initial board to the goal, one blank swap
    /// apart, or `None` if unsolvable. Recomputed on each call by
    /// walking the predecessor chain from the goal node.
    pub fn solution(&self) -> Option<Vec<Board>> {
        let mut node = self.goal.as_ref()?;
        let mut path = vec![node.board.clone()];
        while let Some(parent) = &node.parent {
            node = parent;
            path.push(node.board.clone());
        }
        path.reverse();
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&[u32]]) -> Board {
        Board::from_rows(&rows.iter().map(|r| r.to_vec()).collect::<Vec<_>>()).unwrap()
    }

    fn solve(rows: &[&[u32]]) -> Solver {
        Solver::new(board(rows)).unwrap()
    }

    /// Consecutive boards must differ by exactly one blank swap and the
    /// path must run from the input board to the goal.
    fn assert_valid_path(initial: &Board, solver: &Solver) {
        let path = solver.solution().unwrap();
        assert_eq!(path.len() as i32, solver.moves() + 1);
        assert_eq!(&path[0], initial);
        assert!(path.last().unwrap().is_goal());
        for pair in path.windows(2) {
            assert!(pair[0].neighbors().contains(&pair[1]));
        }
    }

    #[test]
    fn test_one_move_puzzle() {
        let initial = board(&[&[1, 2, 3], &[4, 5, 6], &[7, 0, 8]]);
        let solver = Solver::new(initial.clone()).unwrap();
        assert!(solver.is_solvable());
        assert_eq!(solver.moves(), 1);
        let path = solver.solution().unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path[1], board(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 0]]));
        assert_valid_path(&initial, &solver);
    }

    #[test]
    fn test_already_solved_puzzle() {
        let solver = solve(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 0]]);
        assert!(solver.is_solvable());
        assert_eq!(solver.moves(), 0);
        assert_eq!(solver.solution().unwrap().len(), 1);
    }

    #[test]
    fn test_unsolvable_puzzle() {
        // goal layout with tiles 1 and 2 transposed: odd permutation
        let solver = solve(&[&[2, 1, 3], &[4, 5, 6], &[7, 8, 0]]);
        assert!(!solver.is_solvable());
        assert_eq!(solver.moves(), -1);
        assert!(solver.solution().is_none());
    }

    #[test]
    fn test_four_move_puzzle() {
        let initial = board(&[&[0, 1, 3], &[4, 2, 5], &[7, 8, 6]]);
        let solver = Solver::new(initial.clone()).unwrap();
        assert!(solver.is_solvable());
        assert_eq!(solver.moves(), 4);
        assert_valid_path(&initial, &solver);
    }

    #[test]
    fn test_harder_puzzle_is_optimal() {
        let initial = board(&[&[8, 1, 3], &[4, 0, 2], &[7, 6, 5]]);
        let solver = Solver::new(initial.clone()).unwrap();
        assert_eq!(solver.moves(), 14);
        assert_valid_path(&initial, &solver);
    }

    #[test]
    fn test_hardest_3x3_takes_31_moves() {
        let initial = board(&[&[8, 6, 7], &[2, 5, 4], &[3, 0, 1]]);
        let solver = Solver::new(initial.clone()).unwrap();
        assert_eq!(solver.moves(), 31);
        assert_valid_path(&initial, &solver);
    }

    #[test]
    fn test_manhattan_never_overestimates() {
        let boards = [
            board(&[&[1, 2, 3], &[4, 5, 6], &[7, 0, 8]]),
            board(&[&[0, 1, 3], &[4, 2, 5], &[7, 8, 6]]),
            board(&[&[8, 1, 3], &[4, 0, 2], &[7, 6, 5]]),
        ];
        for b in boards {
            let solver = Solver::new(b.clone()).unwrap();
            assert!(solver.is_solvable());
            assert!(b.manhattan() as i32 <= solver.moves());
        }
    }

    #[test]
    fn test_2x2_solvable() {
        let initial = board(&[&[0, 3], &[2, 1]]);
        let solver = Solver::new(initial.clone()).unwrap();
        assert!(solver.is_solvable());
        assert_valid_path(&initial, &solver);
    }

    #[test]
    fn test_solution_is_recomputable() {
        let solver = solve(&[&[0, 1, 3], &[4, 2, 5], &[7, 8, 6]]);
        let first = solver.solution().unwrap();
        let second = solver.solution().unwrap();
        assert_eq!(first, second);
    }

    /// Exactly one of a board and its twin is solvable, checked over
    /// every valid 2x2 tile arrangement.
    #[test]
    fn test_board_and_twin_split_all_2x2_states() {
        for permutation in permutations_of_four() {
            let b = Board::new(2, permutation.to_vec()).unwrap();
            let original = Solver::new(b.clone()).unwrap();
            let twin = Solver::new(b.twin().unwrap()).unwrap();
            assert_ne!(
                original.is_solvable(),
                twin.is_solvable(),
                "board {:?} and its twin must disagree on solvability",
                b
            );
        }
    }

    fn permutations_of_four() -> Vec<[u32; 4]> {
        let mut all = Vec::new();
        for a in 0..4u32 {
            for b in 0..4u32 {
                for c in 0..4u32 {
                    for d in 0..4u32 {
                        if a != b && a != c && a != d && b != c && b != d && c != d {
                            all.push([a, b, c, d]);
                        }
                    }
                }
            }
        }
        all
    }
}
