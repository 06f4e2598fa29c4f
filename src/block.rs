//! Block and move value types.
//!
//! A block is a 1xN (horizontal) or Nx1 (vertical) piece anchored at its
//! top-left cell. Blocks never change orientation; they only slide along
//! their own axis.

use std::fmt;
use std::ops::{Neg, Range};

use crate::puzzle::PuzzleState;

/// Side length of the square board.
pub const BOARD_SIZE: u8 = 6;

/// The axis a block slides along.
///
/// Declaration order is part of the canonical block ordering used for hashing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Orientation {
    /// Occupies one row, slides left and right.
    Horizontal,
    /// Occupies one column, slides up and down.
    Vertical,
}

/// A direction along a block's axis.
///
/// `Negative` decreases the row (vertical) or column (horizontal),
/// `Positive` increases it. Flip with [`Neg`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Direction {
    Negative,
    Positive,
}

impl Direction {
    /// Both directions, in enumeration order.
    pub const ALL: [Direction; 2] = [Direction::Negative, Direction::Positive];

    /// Human-readable name for this direction on a block of the given orientation.
    pub fn label(self, orientation: Orientation) -> &'static str {
        match (orientation, self) {
            (Orientation::Horizontal, Direction::Negative) => "left",
            (Orientation::Horizontal, Direction::Positive) => "right",
            (Orientation::Vertical, Direction::Negative) => "up",
            (Orientation::Vertical, Direction::Positive) => "down",
        }
    }
}

impl Neg for Direction {
    type Output = Direction;

    fn neg(self) -> Direction {
        match self {
            Direction::Negative => Direction::Positive,
            Direction::Positive => Direction::Negative,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Negative => "-",
            Direction::Positive => "+",
        })
    }
}

/// A rectangular piece on the board.
///
/// Field order defines the derived `Ord`, which is the canonical
/// `(row, col, length, orientation)` order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Block {
    /// Row of the top-left cell.
    pub row: u8,
    /// Column of the top-left cell.
    pub col: u8,
    /// Number of cells covered, at least 1.
    pub length: u8,
    pub orientation: Orientation,
}

impl Block {
    pub const fn new(row: u8, col: u8, length: u8, orientation: Orientation) -> Self {
        Self {
            row,
            col,
            length,
            orientation,
        }
    }

    pub const fn horizontal(row: u8, col: u8, length: u8) -> Self {
        Self::new(row, col, length, Orientation::Horizontal)
    }

    pub const fn vertical(row: u8, col: u8, length: u8) -> Self {
        Self::new(row, col, length, Orientation::Vertical)
    }

    /// Returns this block moved one cell along its axis.
    ///
    /// Does not check bounds. Stepping below zero wraps to a large value,
    /// which [`Block::is_in_bounds`] rejects.
    #[must_use]
    pub fn advance(self, direction: Direction) -> Self {
        let step = |value: u8| match direction {
            Direction::Negative => value.wrapping_sub(1),
            Direction::Positive => value.wrapping_add(1),
        };

        match self.orientation {
            Orientation::Horizontal => Self {
                col: step(self.col),
                ..self
            },
            Orientation::Vertical => Self {
                row: step(self.row),
                ..self
            },
        }
    }

    /// True if every cell of the block lies on the board.
    pub fn is_in_bounds(&self) -> bool {
        if self.length == 0 || self.row >= BOARD_SIZE || self.col >= BOARD_SIZE {
            return false;
        }
        let far_edge = match self.orientation {
            Orientation::Horizontal => self.col as usize + self.length as usize,
            Orientation::Vertical => self.row as usize + self.length as usize,
        };
        far_edge <= BOARD_SIZE as usize
    }

    /// Half-open range of rows covered by the block.
    #[inline]
    pub fn row_span(&self) -> Range<usize> {
        let start = self.row as usize;
        match self.orientation {
            Orientation::Horizontal => start..start + 1,
            Orientation::Vertical => start..start + self.length as usize,
        }
    }

    /// Half-open range of columns covered by the block.
    #[inline]
    pub fn col_span(&self) -> Range<usize> {
        let start = self.col as usize;
        match self.orientation {
            Orientation::Horizontal => start..start + self.length as usize,
            Orientation::Vertical => start..start + 1,
        }
    }

    /// True if the two blocks share at least one cell.
    #[inline]
    pub fn intersects(&self, other: &Block) -> bool {
        spans_overlap(&self.row_span(), &other.row_span())
            && spans_overlap(&self.col_span(), &other.col_span())
    }

    /// Iterates the `(row, col)` cells covered by the block.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let rows = self.row_span();
        let cols = self.col_span();
        rows.flat_map(move |row| cols.clone().map(move |col| (row, col)))
    }
}

#[inline]
fn spans_overlap(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Slides one block a number of cells in one direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    /// Index of the block within its [`PuzzleState`](crate::puzzle::PuzzleState).
    pub block_index: usize,
    pub direction: Direction,
    /// Cells travelled, at least 1.
    pub num_steps: usize,
}

impl Move {
    pub const fn new(block_index: usize, direction: Direction, num_steps: usize) -> Self {
        Self {
            block_index,
            direction,
            num_steps,
        }
    }

    /// The move that undoes this one.
    #[must_use]
    pub fn reversed(self) -> Self {
        Self {
            direction: -self.direction,
            ..self
        }
    }

    /// Describes the move in board terms, e.g. "block 2 down 1".
    ///
    /// Falls back to the `+`/`-` form when the index is not in `state`.
    pub fn describe(&self, state: &PuzzleState) -> String {
        match state.blocks().get(self.block_index) {
            Some(block) => format!(
                "block {} {} {}",
                self.block_index,
                self.direction.label(block.orientation),
                self.num_steps
            ),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "block {} {} {}",
            self.block_index, self.direction, self.num_steps
        )
    }
}
