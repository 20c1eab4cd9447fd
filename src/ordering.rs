//! Ordering predicates.
//!
//! A [`PersistentAvlTree`](crate::persistent::PersistentAvlTree) arranges its
//! values with a strict "less than" predicate supplied when the tree is
//! created. The same predicate defines which values are *equal*: `a` and `b`
//! are equal when neither `less(a, b)` nor `less(b, a)` holds.
//!
//! The predicate must be consistent with a strict weak ordering:
//!
//! - irreflexive: `less(a, a)` is always `false`
//! - asymmetric: `less(a, b)` implies `!less(b, a)`
//! - the derived equality is transitive over the values actually compared
//!
//! Equal values need not be identical. A predicate that only looks at a key
//! lets a tree hold several entries sharing that key, which is what the
//! `_lower`/`_upper` operations of the tree are for.
//!
//! # Examples
//!
//! ```rust
//! use persistent_avl::ordering::{Less, NaturalOrder, ReverseOrder, by_key};
//!
//! assert!(NaturalOrder.less(&1, &2));
//! assert!(ReverseOrder.less(&2, &1));
//!
//! let by_first = by_key(|pair: &(i32, char)| pair.0);
//! assert!(by_first.less(&(1, 'z'), &(2, 'a')));
//! assert!(!by_first.less(&(1, 'a'), &(1, 'b')));
//!
//! // Any closure of the right shape is a predicate as well.
//! let by_length = |left: &&str, right: &&str| left.len() < right.len();
//! assert!(by_length.less(&"ab", &"abc"));
//! ```

/// A strict ordering predicate over values of type `T`.
///
/// Implemented for every `Fn(&T, &T) -> bool`, so closures can be passed
/// directly to [`PersistentAvlTree::with_order`](crate::persistent::PersistentAvlTree::with_order).
pub trait Less<T: ?Sized> {
    /// Returns `true` when `left` is strictly ordered before `right`.
    fn less(&self, left: &T, right: &T) -> bool;

    /// Returns `true` when neither value is ordered before the other.
    #[inline]
    fn equivalent(&self, left: &T, right: &T) -> bool {
        !self.less(left, right) && !self.less(right, left)
    }
}

impl<T: ?Sized, F> Less<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, left: &T, right: &T) -> bool {
        self(left, right)
    }
}

/// Ascending order given by [`Ord`]. The default predicate of a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Less<T> for NaturalOrder {
    #[inline]
    fn less(&self, left: &T, right: &T) -> bool {
        left < right
    }
}

/// Descending order given by [`Ord`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ReverseOrder;

impl<T: Ord + ?Sized> Less<T> for ReverseOrder {
    #[inline]
    fn less(&self, left: &T, right: &T) -> bool {
        right < left
    }
}

/// Ascending order of a key extracted from each value.
///
/// Values with equal keys are equal as far as the tree is concerned, even if
/// the rest of the value differs.
#[derive(Debug, Clone, Copy)]
pub struct ByKey<F> {
    extract: F,
}

impl<T: ?Sized, K: Ord, F> Less<T> for ByKey<F>
where
    F: Fn(&T) -> K,
{
    #[inline]
    fn less(&self, left: &T, right: &T) -> bool {
        (self.extract)(left) < (self.extract)(right)
    }
}

/// Creates a [`ByKey`] predicate from a key extraction function.
///
/// # Examples
///
/// ```rust
/// use persistent_avl::ordering::by_key;
/// use persistent_avl::persistent::PersistentAvlTree;
///
/// let tree = PersistentAvlTree::with_order(by_key(|entry: &(u32, &str)| entry.0))
///     .put((2, "two"))
///     .put((1, "one"));
///
/// assert_eq!(tree.get_first(), Some(&(1, "one")));
/// ```
#[inline]
pub const fn by_key<F>(extract: F) -> ByKey<F> {
    ByKey { extract }
}
