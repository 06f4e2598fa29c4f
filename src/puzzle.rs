//! Board configurations and the sliding rules between them.
//!
//! A [`PuzzleState`] is an immutable list of blocks whose last entry is the
//! target block. Moves never mutate a state; they produce a new one.

use std::fmt;

use crate::block::{Block, Direction, Move, Orientation, BOARD_SIZE};
use crate::board::{self, BoardError};

/// Which target position counts as solved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GoalRule {
    /// The target can slide to the exit edge with nothing in the way.
    #[default]
    Unobstructed,
    /// The target already touches the exit edge.
    Flush,
}

/// One configuration of the board.
///
/// Equality treats the non-target blocks as an unordered multiset, so two
/// states listing the same pieces in different orders are the same state.
#[derive(Clone, Debug)]
pub struct PuzzleState {
    /// Every block on the board; the target is always last.
    blocks: Vec<Block>,
}

impl PuzzleState {
    /// Builds a state from the non-target blocks and the target.
    ///
    /// Performs no validation; use [`PuzzleState::try_new`] for untrusted input.
    pub fn new(mut blocks: Vec<Block>, target: Block) -> Self {
        blocks.push(target);
        Self { blocks }
    }

    /// Builds a state, rejecting out-of-bounds blocks, overlaps and a vertical target.
    pub fn try_new(blocks: Vec<Block>, target: Block) -> Result<Self, BoardError> {
        if target.orientation != Orientation::Horizontal {
            return Err(BoardError::VerticalTarget);
        }
        let state = Self::new(blocks, target);

        for (index, block) in state.blocks.iter().enumerate() {
            if !block.is_in_bounds() {
                return Err(BoardError::OutOfBounds { index });
            }
        }
        for (first, block) in state.blocks.iter().enumerate() {
            for (offset, other) in state.blocks[first + 1..].iter().enumerate() {
                if block.intersects(other) {
                    return Err(BoardError::Overlap {
                        first,
                        second: first + 1 + offset,
                    });
                }
            }
        }

        Ok(state)
    }

    /// All blocks, target last.
    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks including the target.
    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Index of the target block within [`PuzzleState::blocks`].
    #[inline]
    pub fn target_index(&self) -> usize {
        self.blocks.len() - 1
    }

    #[inline]
    pub fn target_block(&self) -> Block {
        self.blocks[self.target_index()]
    }

    /// Non-target blocks sorted by `(row, col, length, orientation)`.
    pub fn canonical_blocks(&self) -> Vec<Block> {
        let mut others = self.blocks[..self.target_index()].to_vec();
        others.sort_unstable();
        others
    }

    /// True if `candidate` shares a cell with any block other than the one at `ignore_index`.
    pub fn is_overlapping(&self, candidate: &Block, ignore_index: Option<usize>) -> bool {
        self.blocks
            .iter()
            .enumerate()
            .any(|(index, block)| Some(index) != ignore_index && block.intersects(candidate))
    }

    /// Lists every legal single-block slide.
    ///
    /// For each block and direction the step counts form a contiguous run
    /// `1..=m`; enumeration stops at the first blocked or off-board position.
    pub fn valid_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();

        for (block_index, &block) in self.blocks.iter().enumerate() {
            for direction in Direction::ALL {
                let mut scratch = block;
                let mut num_steps = 0;
                loop {
                    scratch = scratch.advance(direction);
                    if !scratch.is_in_bounds() || self.is_overlapping(&scratch, Some(block_index))
                    {
                        break;
                    }
                    num_steps += 1;
                    moves.push(Move::new(block_index, direction, num_steps));
                }
            }
        }

        moves
    }

    /// Applies a move, returning the resulting state.
    ///
    /// An out-of-range index, or any off-board or blocked cell along the way,
    /// yields an unchanged copy of `self`. Moves from
    /// [`PuzzleState::valid_moves`] always apply.
    #[must_use]
    pub fn make_move(&self, mv: Move) -> PuzzleState {
        let Some(&block) = self.blocks.get(mv.block_index) else {
            return self.clone();
        };

        // step one cell at a time so blocks can't jump over or wrap past anything
        let mut moved = block;
        for _ in 0..mv.num_steps {
            moved = moved.advance(mv.direction);
            if !moved.is_in_bounds() || self.is_overlapping(&moved, Some(mv.block_index)) {
                return self.clone();
            }
        }

        let mut blocks = self.blocks.clone();
        blocks[mv.block_index] = moved;
        PuzzleState { blocks }
    }

    /// True if the target can slide to the exit edge with nothing in the way.
    pub fn is_solved(&self) -> bool {
        let target_index = self.target_index();
        let mut probe = self.target_block();
        loop {
            let next = probe.advance(Direction::Positive);
            if !next.is_in_bounds() || self.is_overlapping(&next, Some(target_index)) {
                break;
            }
            probe = next;
        }
        touches_exit(&probe)
    }

    /// True if the target already touches the exit edge.
    pub fn is_at_exit(&self) -> bool {
        touches_exit(&self.target_block())
    }

    pub fn is_goal(&self, rule: GoalRule) -> bool {
        match rule {
            GoalRule::Unobstructed => self.is_solved(),
            GoalRule::Flush => self.is_at_exit(),
        }
    }

    /// Number of cells in the target's row covered by any block, target included.
    pub fn blocking_count(&self) -> usize {
        let row = self.target_block().row;
        (0..BOARD_SIZE)
            .filter(|&col| self.is_overlapping(&Block::horizontal(row, col, 1), None))
            .count()
    }
}

#[inline]
fn touches_exit(target: &Block) -> bool {
    target.col as usize + target.length as usize == BOARD_SIZE as usize
}

impl PartialEq for PuzzleState {
    fn eq(&self, other: &Self) -> bool {
        self.blocks.len() == other.blocks.len()
            && self.target_block() == other.target_block()
            && self.canonical_blocks() == other.canonical_blocks()
    }
}

impl Eq for PuzzleState {}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&board::render(self))
    }
}
