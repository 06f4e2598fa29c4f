//! Best-first search for the shortest sequence of slides.
//!
//! Key points:
//! - Frontier is a binary heap ordered by `depth + heuristic`, ties FIFO
//! - FxHashSet of seen states; a state is expanded at most once
//! - Search history is an `Rc`-shared [`SearchPath`] tree
//! - Optional node limit and cancellation flag, checked between expansions

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use log::{debug, trace, warn};
use rustc_hash::FxHashSet;

use crate::path::SearchPath;
use crate::puzzle::{GoalRule, PuzzleState};

/// Estimate of the moves remaining from a state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Heuristic {
    /// Always zero: uniform-cost search, shortest path guaranteed.
    #[default]
    Zero,
    /// Occupied cells in the target's row, minus two.
    ///
    /// Not proven admissible; may return a longer than shortest path.
    BlockedColumns,
}

impl Heuristic {
    pub fn estimate(self, state: &PuzzleState) -> usize {
        match self {
            Heuristic::Zero => 0,
            Heuristic::BlockedColumns => state.blocking_count().saturating_sub(2),
        }
    }
}

/// Search parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverConfig {
    pub heuristic: Heuristic,
    pub goal: GoalRule,
    /// Stop after expanding this many nodes.
    pub node_limit: Option<usize>,
}

/// Where the last search ended up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchOutcome {
    /// No search has run yet.
    #[default]
    Idle,
    Searching,
    Solved,
    /// Every reachable state was expanded without finding a goal.
    Exhausted,
    /// The node limit was reached first.
    Truncated,
    Cancelled,
}

/// Counters for the last search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped from the frontier.
    pub expanded: usize,
    /// Child states produced from valid moves.
    pub generated: usize,
    /// Children discarded because they were already seen.
    pub duplicates: usize,
    pub max_frontier: usize,
    pub outcome: SearchOutcome,
}

/// A frontier node with its cached priority.
struct FrontierEntry {
    priority: usize,
    /// Insertion counter, breaks priority ties first-in first-out.
    sequence: u64,
    node: Rc<SearchPath>,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.sequence == other.sequence
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    // reversed so the max-heap pops the lowest priority, then the oldest entry
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reusable puzzle solver.
///
/// Owns the frontier and seen-set; both are cleared at the start of every search.
#[derive(Default)]
pub struct Solver {
    config: SolverConfig,
    frontier: BinaryHeap<FrontierEntry>,
    seen: FxHashSet<PuzzleState>,
    next_sequence: u64,
    stats: SearchStats,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Counters from the most recent search.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Finds a path from `initial` to a goal state.
    ///
    /// Returns `None` when no goal is reachable, or when the node limit stops the search.
    pub fn solve(&mut self, initial: &PuzzleState) -> Option<Rc<SearchPath>> {
        self.run(initial, None)
    }

    /// Like [`Solver::solve`], but gives up once `cancel` is set.
    pub fn solve_with_cancel(
        &mut self,
        initial: &PuzzleState,
        cancel: &AtomicBool,
    ) -> Option<Rc<SearchPath>> {
        self.run(initial, Some(cancel))
    }

    fn run(&mut self, initial: &PuzzleState, cancel: Option<&AtomicBool>) -> Option<Rc<SearchPath>> {
        self.reset();
        self.stats.outcome = SearchOutcome::Searching;
        debug!(
            "solving {} blocks with {:?} heuristic",
            initial.len(),
            self.config.heuristic
        );

        self.seen.insert(initial.clone());
        self.push(SearchPath::root(initial.clone()));

        let result = self.search(cancel);
        // release the run's nodes; the result keeps its own chain alive
        self.frontier.clear();

        debug!(
            "search {:?}: expanded {}, generated {}, duplicates {}, max frontier {}",
            self.stats.outcome,
            self.stats.expanded,
            self.stats.generated,
            self.stats.duplicates,
            self.stats.max_frontier
        );
        result
    }

    fn search(&mut self, cancel: Option<&AtomicBool>) -> Option<Rc<SearchPath>> {
        while let Some(FrontierEntry { node: current, .. }) = self.frontier.pop() {
            if cancel.is_some_and(|flag| flag.load(AtomicOrdering::Relaxed)) {
                self.stats.outcome = SearchOutcome::Cancelled;
                return None;
            }

            if current.state().is_goal(self.config.goal) {
                self.stats.outcome = SearchOutcome::Solved;
                return Some(current);
            }

            if self
                .config
                .node_limit
                .is_some_and(|limit| self.stats.expanded >= limit)
            {
                warn!("node limit reached after {} expansions", self.stats.expanded);
                self.stats.outcome = SearchOutcome::Truncated;
                return None;
            }

            self.stats.expanded += 1;
            trace!("expanding node at depth {}", current.depth());

            for mv in current.state().valid_moves() {
                let next = current.state().make_move(mv);
                self.stats.generated += 1;

                if !self.seen.insert(next.clone()) {
                    self.stats.duplicates += 1;
                    continue;
                }
                self.push(SearchPath::extend(&current, mv, next));
            }
        }

        self.stats.outcome = SearchOutcome::Exhausted;
        None
    }

    fn push(&mut self, node: Rc<SearchPath>) {
        let priority = node.depth() + self.config.heuristic.estimate(node.state());
        self.frontier.push(FrontierEntry {
            priority,
            sequence: self.next_sequence,
            node,
        });
        self.next_sequence += 1;
        self.stats.max_frontier = self.stats.max_frontier.max(self.frontier.len());
    }

    fn reset(&mut self) {
        self.frontier.clear();
        self.seen.clear();
        self.next_sequence = 0;
        self.stats = SearchStats::default();
    }
}
