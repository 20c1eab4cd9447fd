//! # persistent-avl
//!
//! A persistent (immutable, structurally-shared) ordered multiset built on a
//! height-balanced binary search tree.
//!
//! ## Overview
//!
//! - **Persistent AVL tree**: [`PersistentAvlTree`](persistent::PersistentAvlTree)
//!   keeps values sorted by a caller-supplied predicate. Every mutation
//!   returns a new tree and leaves older versions intact.
//! - **Duplicate policies**: `put`/`put_lower`/`put_upper` and the matching
//!   `get_*` and `delete_*` operations decide where equal values go and which
//!   one is read or removed.
//! - **Ordering predicates**: [`ordering`] holds the [`Less`](ordering::Less)
//!   trait and the predicates shipped with the crate.
//! - **Lazy iteration**: in-order iterators backed by an explicit stack.
//!
//! ## Feature Flags
//!
//! - `render` (default): ASCII rendering of the tree shape
//! - `arc`: use `Arc` instead of `Rc`, making trees `Send + Sync`
//! - `serde`: `Serialize`/`Deserialize` as a sequence
//! - `full`: `render` and `serde`
//!
//! ## Example
//!
//! ```rust
//! use persistent_avl::prelude::*;
//!
//! let scores = PersistentAvlTree::with_order(by_key(|entry: &(u32, &str)| entry.0))
//!     .put((30, "carol"))
//!     .put((10, "alice"))
//!     .put_upper((30, "dave"));
//!
//! let names: Vec<&str> = scores.iter().map(|entry| entry.1).collect();
//! assert_eq!(names, vec!["alice", "carol", "dave"]);
//! assert_eq!(scores.get_upper(&(30, "")), Some(&(30, "dave")));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use persistent_avl::prelude::*;
/// ```
pub mod prelude {
    pub use crate::ordering::*;
    pub use crate::persistent::*;
}

pub mod ordering;
pub mod persistent;
