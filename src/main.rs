//! Sliding Block Puzzle Solver
//!
//! Reads a 6x6 board file, searches for the shortest sequence of slides
//! that lets the target block leave through the right edge, and prints it.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use unjam::{board, logging, GoalRule, Heuristic, PuzzleState, SearchPath, Solver, SolverConfig};

/// Solves Rush-Hour style sliding block puzzles.
#[derive(Parser)]
#[command(name = "unjam")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a board file and print the number of moves.
    Solve {
        /// Board file to solve.
        file: PathBuf,
        /// Move-count estimate guiding the search.
        #[arg(long, value_enum, default_value_t = HeuristicArg::Zero)]
        heuristic: HeuristicArg,
        /// When the target counts as free.
        #[arg(long, value_enum, default_value_t = GoalArg::Unobstructed)]
        goal: GoalArg,
        /// Give up after expanding this many states.
        #[arg(long)]
        node_limit: Option<usize>,
        /// Print every intermediate board.
        #[arg(long)]
        show_steps: bool,
    },
    /// Print a board and every board one move away.
    Show {
        file: PathBuf,
    },
    /// List the legal moves of a board.
    Moves {
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum HeuristicArg {
    Zero,
    BlockedColumns,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Zero => Heuristic::Zero,
            HeuristicArg::BlockedColumns => Heuristic::BlockedColumns,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GoalArg {
    Unobstructed,
    Flush,
}

impl From<GoalArg> for GoalRule {
    fn from(arg: GoalArg) -> Self {
        match arg {
            GoalArg::Unobstructed => GoalRule::Unobstructed,
            GoalArg::Flush => GoalRule::Flush,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(logging::level_for_verbosity(cli.verbose)) {
        eprintln!("Failed to initialise logging: {}", e);
    }

    match cli.command {
        Command::Solve {
            file,
            heuristic,
            goal,
            node_limit,
            show_steps,
        } => {
            let config = SolverConfig {
                heuristic: heuristic.into(),
                goal: goal.into(),
                node_limit,
            };
            run_solve(load_or_exit(&file), config, show_steps);
        }
        Command::Show { file } => run_show(&load_or_exit(&file)),
        Command::Moves { file } => run_moves(&load_or_exit(&file)),
    }
}

/// Loads a board, exiting with status 1 if it can't be read.
fn load_or_exit(file: &Path) -> PuzzleState {
    match board::load(file) {
        Ok(state) => {
            info!("loaded {} with {} blocks", file.display(), state.len());
            state
        }
        Err(e) => {
            eprintln!("Failed to load {}: {}", file.display(), e);
            process::exit(1);
        }
    }
}

/// Solves the board and prints the result.
fn run_solve(state: PuzzleState, config: SolverConfig, show_steps: bool) {
    let mut solver = Solver::new(config);
    info!("searching with {:?}", solver.config());
    let solution = solver.solve(&state);
    let stats = solver.stats();
    info!(
        "expanded {} states, {} duplicates skipped",
        stats.expanded, stats.duplicates
    );

    match solution {
        Some(path) if show_steps => print!("{}", format_solution(&path)),
        Some(path) => println!("Solved in {} moves", path.depth()),
        None => println!("No solution found ({:?})", stats.outcome),
    }
}

/// Prints the board followed by each successor state.
fn run_show(state: &PuzzleState) {
    let moves = state.valid_moves();
    println!("{}", state);
    println!("There are {} possible moves", moves.len());
    for (i, mv) in moves.iter().enumerate() {
        println!("Move {}: {}", i, mv.describe(state));
        println!("{}", state.make_move(*mv));
    }
}

/// Prints one line per legal move.
fn run_moves(state: &PuzzleState) {
    for mv in state.valid_moves() {
        println!("{}", mv.describe(state));
    }
}

/// Formats a solution as the start board followed by each move and its result.
fn format_solution(path: &SearchPath) -> String {
    let states = path.states();
    let mut output = format!("Solved in {} moves\n\nStart:\n{}", path.depth(), states[0]);

    for (i, (mv, window)) in path.moves().into_iter().zip(states.windows(2)).enumerate() {
        output.push_str(&format!(
            "\nMove {}: {}\n{}",
            i + 1,
            mv.describe(&window[0]),
            window[1]
        ));
    }

    output
}
