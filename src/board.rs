//! Text board format for loading and saving puzzles.
//!
//! A board is an 11x11 glyph grid inside a frame:
//!
//! ```text
//! /-----------------------\
//! | c c c c c c c c c c c |    (11 lines)
//! \-----------------------/
//! ```
//!
//! Even grid rows/columns are cell centres, odd ones are borders:
//! - centres: `' '` empty, `'*'` block, `'$'` target, `'#'` vertical unit block
//! - borders: `'-'` between rows, `'|'` between columns, `'+'` at corners,
//!   `' '` where two cells belong to the same block

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::block::{Block, Orientation, BOARD_SIZE};
use crate::puzzle::PuzzleState;

/// Glyphs per grid side: six cells and five borders.
const GRID_SPAN: usize = 2 * BOARD_SIZE as usize - 1;

const HEADER: &str = "/-----------------------\\";
const FOOTER: &str = "\\-----------------------/";

const EMPTY: char = ' ';
const BLOCK: char = '*';
const TARGET: char = '$';
const VERTICAL_UNIT: char = '#';
const OPEN_BORDER: char = ' ';

/// Failures reading, writing or validating a board.
#[derive(Error, Debug)]
pub enum BoardError {
    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("expected {expected} grid lines, found {found}")]
    MissingLines { expected: usize, found: usize },

    #[error("grid line {line} is too short")]
    LineTooShort { line: usize },

    #[error("unexpected glyph {glyph:?} at grid position ({row}, {col})")]
    UnknownGlyph { row: usize, col: usize, glyph: char },

    #[error("board has no target block")]
    MissingTarget,

    #[error("board has more than one target block")]
    MultipleTargets,

    #[error("target block must be horizontal")]
    VerticalTarget,

    #[error("block {index} extends past the board edge")]
    OutOfBounds { index: usize },

    #[error("blocks {first} and {second} overlap")]
    Overlap { first: usize, second: usize },
}

/// What occupies a cell centre.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cell {
    Empty,
    Block,
    Target,
    VerticalUnit,
}

impl Cell {
    fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            EMPTY => Some(Cell::Empty),
            BLOCK => Some(Cell::Block),
            TARGET => Some(Cell::Target),
            VERTICAL_UNIT => Some(Cell::VerticalUnit),
            _ => None,
        }
    }
}

/// Renders a state as a framed glyph grid, one line per grid row.
pub fn render(state: &PuzzleState) -> String {
    let mut grid = [[EMPTY; GRID_SPAN]; GRID_SPAN];
    for (row, line) in grid.iter_mut().enumerate() {
        for (col, glyph) in line.iter_mut().enumerate() {
            *glyph = match (row % 2, col % 2) {
                (0, 0) => EMPTY,
                (1, 0) => '-',
                (0, _) => '|',
                _ => '+',
            };
        }
    }

    let target_index = state.target_index();
    for (index, block) in state.blocks().iter().enumerate() {
        let marker = if index == target_index {
            TARGET
        } else if block.length == 1 && block.orientation == Orientation::Vertical {
            VERTICAL_UNIT
        } else {
            BLOCK
        };

        let cells: Vec<_> = block.cells().collect();
        for (position, &(row, col)) in cells.iter().enumerate() {
            grid[2 * row][2 * col] = marker;
            if position + 1 < cells.len() {
                // open the border towards the next cell of the same block
                match block.orientation {
                    Orientation::Horizontal => grid[2 * row][2 * col + 1] = OPEN_BORDER,
                    Orientation::Vertical => grid[2 * row + 1][2 * col] = OPEN_BORDER,
                }
            }
        }
    }

    let mut output = String::new();
    output.push_str(HEADER);
    output.push('\n');
    for line in &grid {
        output.push_str("| ");
        for &glyph in line {
            output.push(glyph);
            output.push(' ');
        }
        output.push_str("|\n");
    }
    output.push_str(FOOTER);
    output.push('\n');
    output
}

/// Parses a framed glyph grid into a validated state.
///
/// The first line is the frame header and is not inspected.
pub fn parse(text: &str) -> Result<PuzzleState, BoardError> {
    let lines: Vec<Vec<char>> = text
        .lines()
        .skip(1)
        .take(GRID_SPAN)
        .map(|line| line.chars().collect())
        .collect();
    if lines.len() < GRID_SPAN {
        return Err(BoardError::MissingLines {
            expected: GRID_SPAN,
            found: lines.len(),
        });
    }

    let mut glyphs = [[EMPTY; GRID_SPAN]; GRID_SPAN];
    for (row, line) in lines.iter().enumerate() {
        for col in 0..GRID_SPAN {
            // each glyph follows the "| " prefix and is trailed by a space
            glyphs[row][col] = *line
                .get(2 * (col + 1))
                .ok_or(BoardError::LineTooShort { line: row })?;
        }
    }

    let cells = read_cells(&glyphs)?;
    let open = |row: usize, col: usize| -> Result<bool, BoardError> {
        match glyphs[row][col] {
            OPEN_BORDER => Ok(true),
            '-' | '|' | '+' => Ok(false),
            glyph => Err(BoardError::UnknownGlyph { row, col, glyph }),
        }
    };

    let size = BOARD_SIZE as usize;
    let mut visited = [[false; BOARD_SIZE as usize]; BOARD_SIZE as usize];
    let mut others = Vec::new();
    let mut targets = Vec::new();

    for row in 0..size {
        for col in 0..size {
            let kind = cells[row][col];
            if visited[row][col] || kind == Cell::Empty {
                continue;
            }
            visited[row][col] = true;

            let mut length = 1;
            let mut orientation = match kind {
                Cell::VerticalUnit => Orientation::Vertical,
                _ => Orientation::Horizontal,
            };

            // extend downward first, then rightward
            let mut end = row;
            while end + 1 < size
                && open(2 * end + 1, 2 * col)?
                && cells[end + 1][col] == kind
                && !visited[end + 1][col]
            {
                end += 1;
                length += 1;
                orientation = Orientation::Vertical;
                visited[end][col] = true;
            }
            if length == 1 {
                let mut end = col;
                while end + 1 < size
                    && open(2 * row, 2 * end + 1)?
                    && cells[row][end + 1] == kind
                    && !visited[row][end + 1]
                {
                    end += 1;
                    length += 1;
                    orientation = Orientation::Horizontal;
                    visited[row][end] = true;
                }
            }

            let block = Block::new(row as u8, col as u8, length, orientation);
            if kind == Cell::Target {
                targets.push(block);
            } else {
                others.push(block);
            }
        }
    }

    let target = match targets.as_slice() {
        [] => return Err(BoardError::MissingTarget),
        [target] => *target,
        _ => return Err(BoardError::MultipleTargets),
    };
    PuzzleState::try_new(others, target)
}

fn read_cells(
    glyphs: &[[char; GRID_SPAN]; GRID_SPAN],
) -> Result<[[Cell; BOARD_SIZE as usize]; BOARD_SIZE as usize], BoardError> {
    let mut cells = [[Cell::Empty; BOARD_SIZE as usize]; BOARD_SIZE as usize];
    for (row, line) in cells.iter_mut().enumerate() {
        for (col, cell) in line.iter_mut().enumerate() {
            let glyph = glyphs[2 * row][2 * col];
            *cell = Cell::from_glyph(glyph).ok_or(BoardError::UnknownGlyph {
                row: 2 * row,
                col: 2 * col,
                glyph,
            })?;
        }
    }
    Ok(cells)
}

/// Reads a board file.
pub fn load(path: impl AsRef<Path>) -> Result<PuzzleState, BoardError> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// Writes a board file.
pub fn save(state: &PuzzleState, path: impl AsRef<Path>) -> Result<(), BoardError> {
    fs::write(path, render(state))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PuzzleState {
        PuzzleState::new(
            vec![
                Block::vertical(0, 3, 3),
                Block::horizontal(5, 0, 3),
                Block::vertical(4, 5, 1),
                Block::horizontal(0, 0, 1),
            ],
            Block::horizontal(2, 1, 2),
        )
    }

    #[test]
    fn test_render_snapshot() {
        insta::assert_snapshot!(render(&sample()));
    }

    #[test]
    fn test_round_trip_preserves_state() {
        let state = sample();
        let parsed = parse(&render(&state)).expect("rendered board parses");
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_parse_orders_target_last() {
        let parsed = parse(&render(&sample())).expect("rendered board parses");
        assert_eq!(parsed.target_block(), Block::horizontal(2, 1, 2));
        assert_eq!(parsed.len(), 5);
    }

    #[test]
    fn test_adjacent_blocks_stay_separate() {
        let state = PuzzleState::new(
            vec![Block::horizontal(0, 0, 2), Block::horizontal(0, 2, 2)],
            Block::horizontal(2, 0, 2),
        );
        let parsed = parse(&render(&state)).expect("rendered board parses");
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_missing_lines() {
        let text: String = render(&sample()).lines().take(5).collect::<Vec<_>>().join("\n");
        assert!(matches!(
            parse(&text),
            Err(BoardError::MissingLines { expected: 11, found: 4 })
        ));
    }

    #[test]
    fn test_unknown_glyph() {
        let text = render(&sample()).replacen('$', "x", 1);
        assert!(matches!(
            parse(&text),
            Err(BoardError::UnknownGlyph { glyph: 'x', .. })
        ));
    }

    #[test]
    fn test_missing_and_duplicate_targets() {
        let no_target = render(&sample()).replace('$', "*");
        assert!(matches!(parse(&no_target), Err(BoardError::MissingTarget)));

        let two_targets = render(&PuzzleState::new(
            vec![Block::horizontal(0, 0, 2)],
            Block::horizontal(2, 0, 2),
        ))
        .replace('*', "$");
        assert!(matches!(parse(&two_targets), Err(BoardError::MultipleTargets)));
    }

    #[test]
    fn test_vertical_target_rejected() {
        let state = PuzzleState::new(Vec::new(), Block::vertical(0, 0, 2));
        assert!(matches!(parse(&render(&state)), Err(BoardError::VerticalTarget)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("sample.puz");

        save(&sample(), &path).expect("save succeeds");
        let loaded = load(&path).expect("load succeeds");
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(matches!(
            load(dir.path().join("absent.puz")),
            Err(BoardError::Io(_))
        ));
    }
}
