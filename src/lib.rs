//! Sliding Block Puzzle Solver Library
//!
//! Models 6x6 Rush-Hour style boards and finds the shortest sequence of
//! slides that frees the target block.

pub mod block;
pub mod board;
pub mod hashing;
pub mod logging;
pub mod path;
pub mod puzzle;
pub mod solver;

pub use block::{Block, Direction, Move, Orientation, BOARD_SIZE};
pub use board::BoardError;
pub use path::SearchPath;
pub use puzzle::{GoalRule, PuzzleState};
pub use solver::{Heuristic, SearchOutcome, SearchStats, Solver, SolverConfig};
