//! Persistent (immutable) ordered multiset.
//!
//! This module provides [`PersistentAvlTree`], an immutable AVL tree that
//! uses structural sharing to minimize copying:
//!
//! - every "mutation" returns a new tree
//! - only the path from the root to the changed node is rebuilt
//! - all other subtrees are shared with the previous version by reference
//!
//! # Examples
//!
//! ```rust
//! use persistent_avl::persistent::PersistentAvlTree;
//!
//! let tree = PersistentAvlTree::new().put(3).put(1).put(2);
//! assert_eq!(tree.get_first(), Some(&1));
//!
//! // Structural sharing: the original tree is preserved
//! let extended = tree.put_upper(2);
//! assert_eq!(tree.len(), 3);     // Original unchanged
//! assert_eq!(extended.len(), 4); // New version
//! assert_eq!(extended.iter().copied().collect::<Vec<_>>(), vec![1, 2, 2, 3]);
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod avl_tree;
mod error;
mod iter;
mod node;
#[cfg(feature = "render")]
mod render;

pub use avl_tree::PersistentAvlTree;
pub use error::NotFoundError;
pub use iter::PersistentAvlTreeIntoIterator;
pub use iter::PersistentAvlTreeIterator;

// =============================================================================
// Tests
// =============================================================================
