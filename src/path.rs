//! Immutable search history.
//!
//! Each node owns its state and shares its predecessor through `Rc`, so
//! frontier entries with a common prefix share one chain. Nodes are never
//! mutated after construction.

use std::rc::Rc;

use crate::block::Move;
use crate::puzzle::PuzzleState;

/// A state together with the chain of states that led to it.
#[derive(Debug)]
pub struct SearchPath {
    state: PuzzleState,
    predecessor: Option<Rc<SearchPath>>,
    /// Move that turned the predecessor's state into `state`.
    last_move: Option<Move>,
    depth: usize,
}

impl SearchPath {
    /// Starts a history at `state`.
    pub fn root(state: PuzzleState) -> Rc<Self> {
        Rc::new(Self {
            state,
            predecessor: None,
            last_move: None,
            depth: 0,
        })
    }

    /// Appends `state`, reached from `parent` by `mv`.
    pub fn extend(parent: &Rc<Self>, mv: Move, state: PuzzleState) -> Rc<Self> {
        Rc::new(Self {
            state,
            predecessor: Some(Rc::clone(parent)),
            last_move: Some(mv),
            depth: parent.depth + 1,
        })
    }

    #[inline]
    pub fn state(&self) -> &PuzzleState {
        &self.state
    }

    #[inline]
    pub fn predecessor(&self) -> Option<&Rc<SearchPath>> {
        self.predecessor.as_ref()
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Number of moves from the root.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Walks from this node back to the root.
    pub fn iter(&self) -> Iter<'_> {
        Iter { next: Some(self) }
    }

    /// States from the root to this node, inclusive.
    pub fn states(&self) -> Vec<PuzzleState> {
        let mut states: Vec<_> = self.iter().map(|node| node.state.clone()).collect();
        states.reverse();
        states
    }

    /// Moves from the root to this node, in the order they are played.
    pub fn moves(&self) -> Vec<Move> {
        let mut moves: Vec<_> = self.iter().filter_map(|node| node.last_move).collect();
        moves.reverse();
        moves
    }
}

impl Drop for SearchPath {
    fn drop(&mut self) {
        // unlink iteratively so long uniquely-owned chains don't recurse
        let mut next = self.predecessor.take();
        while let Some(node) = next {
            match Rc::try_unwrap(node) {
                Ok(mut owned) => next = owned.predecessor.take(),
                Err(_) => break,
            }
        }
    }
}

/// Iterator from a node back to the root; see [`SearchPath::iter`].
pub struct Iter<'a> {
    next: Option<&'a SearchPath>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a SearchPath;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.predecessor.as_deref();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Block, Direction};

    fn start() -> PuzzleState {
        PuzzleState::new(vec![Block::vertical(1, 3, 2)], Block::horizontal(2, 0, 2))
    }

    #[test]
    fn test_root_has_depth_zero() {
        let root = SearchPath::root(start());
        assert_eq!(root.depth(), 0);
        assert!(root.predecessor().is_none());
        assert!(root.last_move().is_none());
        assert_eq!(root.states(), vec![start()]);
    }

    #[test]
    fn test_extend_tracks_depth_and_moves() {
        let root = SearchPath::root(start());
        let down = Move::new(0, Direction::Positive, 2);
        let child = SearchPath::extend(&root, down, root.state().make_move(down));
        let right = Move::new(1, Direction::Positive, 4);
        let grandchild = SearchPath::extend(&child, right, child.state().make_move(right));

        assert_eq!(grandchild.depth(), 2);
        assert_eq!(grandchild.moves(), vec![down, right]);

        let states = grandchild.states();
        assert_eq!(states.len(), 3);
        assert_eq!(states[0], start());
        assert_eq!(states[2].target_block(), Block::horizontal(2, 4, 2));
    }

    #[test]
    fn test_siblings_share_prefix() {
        let root = SearchPath::root(start());
        let up = Move::new(0, Direction::Negative, 1);
        let down = Move::new(0, Direction::Positive, 1);
        let a = SearchPath::extend(&root, up, root.state().make_move(up));
        let b = SearchPath::extend(&root, down, root.state().make_move(down));

        assert_eq!(Rc::strong_count(&root), 3);
        assert!(Rc::ptr_eq(a.predecessor().unwrap(), b.predecessor().unwrap()));

        drop(a);
        assert_eq!(Rc::strong_count(&root), 2);
        assert_eq!(b.predecessor().unwrap().depth(), 0);
    }

    #[test]
    fn test_long_chain_drops_without_overflow() {
        let state = start();
        let mv = Move::new(0, Direction::Positive, 1);
        let mut node = SearchPath::root(state.clone());
        for _ in 0..200_000 {
            node = SearchPath::extend(&node, mv, state.clone());
        }
        assert_eq!(node.depth(), 200_000);
        drop(node);
    }
}
