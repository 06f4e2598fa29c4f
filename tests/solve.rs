use std::path::PathBuf;

use unjam::{board, Heuristic, PuzzleState, SearchOutcome, Solver, SolverConfig};

fn load_fixture(name: &str) -> PuzzleState {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("puzzles")
        .join(name);
    board::load(&path).unwrap_or_else(|e| panic!("failed to load {}: {e}", path.display()))
}

#[test]
fn test_four_move_fixture_shortest_path() {
    let state = load_fixture("four_moves.puz");
    let mut solver = Solver::default();
    let path = solver.solve(&state).expect("fixture is solvable");

    assert_eq!(path.depth(), 4);
    assert_eq!(solver.stats().outcome, SearchOutcome::Solved);
    assert!(path.state().is_solved());
}

#[test]
fn test_solution_replays_from_start() {
    let state = load_fixture("four_moves.puz");
    let path = Solver::default().solve(&state).expect("fixture is solvable");

    let states = path.states();
    let moves = path.moves();
    assert_eq!(states.len(), moves.len() + 1);
    assert_eq!(states[0], state);

    for (mv, window) in moves.iter().zip(states.windows(2)) {
        assert!(
            window[0].valid_moves().contains(mv),
            "{mv} is not a legal move"
        );
        assert_eq!(window[0].make_move(*mv), window[1]);
    }
}

#[test]
fn test_blocked_columns_heuristic_solves_fixture() {
    let state = load_fixture("four_moves.puz");
    let mut solver = Solver::new(SolverConfig {
        heuristic: Heuristic::BlockedColumns,
        ..SolverConfig::default()
    });
    let path = solver.solve(&state).expect("fixture is solvable");

    assert!(path.depth() >= 4);
    assert!(path.state().is_solved());
}

#[test]
fn test_boxed_in_fixture_has_no_solution() {
    let state = load_fixture("boxed_in.puz");
    let mut solver = Solver::default();

    assert!(solver.solve(&state).is_none());
    assert_eq!(solver.stats().outcome, SearchOutcome::Exhausted);
    assert_eq!(solver.stats().expanded, 1);
}

#[test]
fn test_fixture_round_trips_through_text() {
    let state = load_fixture("four_moves.puz");
    let text = board::render(&state);
    let original = std::fs::read_to_string(
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("puzzles/four_moves.puz"),
    )
    .expect("fixture is readable");

    assert_eq!(text, original);
}
