//! Structural hashing of puzzle states for the solver's seen-set.
//!
//! Equal states must hash identically. Since [`PuzzleState`] equality ignores
//! the order of non-target blocks while the combiner below is order
//! sensitive, blocks are hashed in canonical sorted order.

use std::hash::{Hash, Hasher};

use crate::block::{Block, Orientation};
use crate::puzzle::PuzzleState;

/// 64-bit golden ratio constant used by the combiner.
const GOLDEN_RATIO: u64 = 0x9e37_79b9_7f4a_7c15;

/// Boost-style hash combination.
#[inline]
pub const fn hash_combine(seed: u64, value: u64) -> u64 {
    seed ^ value
        .wrapping_add(GOLDEN_RATIO)
        .wrapping_add(seed << 6)
        .wrapping_add(seed >> 2)
}

/// Hashes the four fields of a block.
#[inline]
pub fn hash_block(block: &Block) -> u64 {
    let orientation = match block.orientation {
        Orientation::Horizontal => 1,
        Orientation::Vertical => 0,
    };
    [
        block.row as u64,
        block.col as u64,
        block.length as u64,
        orientation,
    ]
    .into_iter()
    .fold(0, hash_combine)
}

/// Hashes the target block, then every other block in canonical order.
pub fn hash_state(state: &PuzzleState) -> u64 {
    let seed = hash_combine(0, hash_block(&state.target_block()));
    state
        .canonical_blocks()
        .iter()
        .fold(seed, |seed, block| hash_combine(seed, hash_block(block)))
}

impl Hash for PuzzleState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(hash_state(self));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    fn state_with(others: Vec<Block>) -> PuzzleState {
        PuzzleState::new(others, Block::horizontal(2, 1, 2))
    }

    #[test]
    fn test_hash_combine_is_order_sensitive() {
        let forward = hash_combine(hash_combine(0, 1), 2);
        let backward = hash_combine(hash_combine(0, 2), 1);
        assert_ne!(forward, backward);
    }

    #[test]
    fn test_block_hash_depends_on_every_field() {
        let base = Block::horizontal(1, 2, 3);
        let variants = [
            Block::horizontal(2, 2, 3),
            Block::horizontal(1, 3, 3),
            Block::horizontal(1, 2, 2),
            Block::vertical(1, 2, 3),
        ];
        for variant in variants {
            assert_ne!(hash_block(&base), hash_block(&variant), "{variant:?}");
        }
    }

    #[test]
    fn test_permuted_states_hash_equal() {
        let blocks = vec![
            Block::vertical(0, 0, 2),
            Block::horizontal(5, 2, 3),
            Block::vertical(1, 5, 3),
        ];
        let mut reversed = blocks.clone();
        reversed.reverse();

        let a = state_with(blocks);
        let b = state_with(reversed);
        assert_eq!(a, b);
        assert_eq!(hash_state(&a), hash_state(&b));
    }

    #[test]
    fn test_target_is_distinguished_from_other_blocks() {
        let a = PuzzleState::new(vec![Block::horizontal(0, 0, 2)], Block::horizontal(2, 0, 2));
        let b = PuzzleState::new(vec![Block::horizontal(2, 0, 2)], Block::horizontal(0, 0, 2));
        assert_ne!(hash_state(&a), hash_state(&b));
    }

    #[test]
    fn test_seen_set_deduplicates_permutations() {
        let mut seen = FxHashSet::default();
        assert!(seen.insert(state_with(vec![Block::vertical(0, 0, 2), Block::vertical(0, 4, 2)])));
        assert!(!seen.insert(state_with(vec![Block::vertical(0, 4, 2), Block::vertical(0, 0, 2)])));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn test_hash_is_stable() {
        let state = state_with(vec![Block::vertical(0, 3, 3)]);
        insta::assert_snapshot!(format!("{:#018x}", hash_state(&state)));
    }
}
