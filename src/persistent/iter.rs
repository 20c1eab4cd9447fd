//! In-order iterators over a [`PersistentAvlTree`](super::PersistentAvlTree).
//!
//! Both iterators keep an explicit stack of pending nodes instead of
//! collecting the elements up front: the top of the stack is always the next
//! node to yield, and below it are the ancestors whose right subtrees have
//! not been visited yet.
//!
//! - Creating an iterator pushes the leftmost path from the root.
//! - Advancing pops the top node, yields its value, and pushes the leftmost
//!   path of its right subtree.
//!
//! The tree is never touched, so an iterator can be paused, cloned, resumed,
//! or dropped at any point, and any number of them may walk the same tree
//! version at once.

use super::ReferenceCounter;
use super::node::{Link, Node};
use smallvec::SmallVec;
use std::fmt;
use std::iter::FusedIterator;

/// Number of stack frames kept inline before spilling to the heap.
///
/// An AVL tree of height 32 holds millions of elements, and the stack never
/// grows beyond the tree height.
const SPINE_CAPACITY: usize = 32;

// =============================================================================
// Borrowing Iterator
// =============================================================================

/// An iterator over references to the elements of a
/// [`PersistentAvlTree`](super::PersistentAvlTree), in ascending order.
///
/// # Examples
///
/// ```rust
/// use persistent_avl::persistent::PersistentAvlTree;
///
/// let tree: PersistentAvlTree<i32> = [3, 1, 2].into_iter().collect();
/// let mut iterator = tree.iter();
///
/// assert_eq!(iterator.next(), Some(&1));
///
/// // A paused traversal is a plain value and can be forked.
/// let fork = iterator.clone();
/// assert_eq!(iterator.collect::<Vec<_>>(), vec![&2, &3]);
/// assert_eq!(fork.collect::<Vec<_>>(), vec![&2, &3]);
/// ```
pub struct PersistentAvlTreeIterator<'a, T> {
    stack: SmallVec<[&'a Node<T>; SPINE_CAPACITY]>,
    remaining: usize,
}

impl<'a, T> PersistentAvlTreeIterator<'a, T> {
    pub(crate) fn new(root: &'a Link<T>, length: usize) -> Self {
        let mut iterator = Self {
            stack: SmallVec::new(),
            remaining: length,
        };
        iterator.push_left_spine(root);
        iterator
    }

    fn push_left_spine(&mut self, mut link: &'a Link<T>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a, T> Iterator for PersistentAvlTreeIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(&node.right);
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for PersistentAvlTreeIterator<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for PersistentAvlTreeIterator<'_, T> {}

impl<T> Clone for PersistentAvlTreeIterator<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentAvlTreeIterator<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.clone()).finish()
    }
}

// =============================================================================
// Owning Iterator
// =============================================================================

/// An owning iterator over the elements of a
/// [`PersistentAvlTree`](super::PersistentAvlTree), in ascending order.
///
/// Nodes may be shared with other tree versions, so elements are cloned out
/// of them. The stack holds reference-counted nodes, which keeps the visited
/// part of the tree alive only as long as it is still pending.
pub struct PersistentAvlTreeIntoIterator<T> {
    stack: SmallVec<[ReferenceCounter<Node<T>>; SPINE_CAPACITY]>,
    remaining: usize,
}

impl<T> PersistentAvlTreeIntoIterator<T> {
    pub(crate) fn new(root: Link<T>, length: usize) -> Self {
        let mut iterator = Self {
            stack: SmallVec::new(),
            remaining: length,
        };
        iterator.push_left_spine(root);
        iterator
    }

    fn push_left_spine(&mut self, mut link: Link<T>) {
        while let Some(node) = link {
            link = node.left.clone();
            self.stack.push(node);
        }
    }
}

impl<T: Clone> Iterator for PersistentAvlTreeIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.clone());
        self.remaining = self.remaining.saturating_sub(1);
        Some(node.value.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Clone> ExactSizeIterator for PersistentAvlTreeIntoIterator<T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T: Clone> FusedIterator for PersistentAvlTreeIntoIterator<T> {}

impl<T> Clone for PersistentAvlTreeIntoIterator<T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
