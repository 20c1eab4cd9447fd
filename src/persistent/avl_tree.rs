//! Persistent (immutable) ordered multiset based on an AVL tree.
//!
//! This module provides [`PersistentAvlTree`], an immutable sorted container
//! that uses structural sharing for efficient operations.
//!
//! # Overview
//!
//! `PersistentAvlTree` keeps its values in a height-balanced binary search
//! tree arranged by an ordering predicate chosen when the tree is created.
//! Values that the predicate cannot tell apart are *equal*; the tree may hold
//! any number of them.
//!
//! - O(log N) get, membership, first/last, and bound queries
//! - O(log N) put (three duplicate policies)
//! - O(log N) delete (three duplicate policies)
//! - O(1) len, `is_empty`, height and clone
//!
//! Every "mutation" returns a new tree. Only the path from the root to the
//! changed node is rebuilt; all other subtrees are shared with the previous
//! version, which stays valid and unchanged.
//!
//! # Duplicates
//!
//! | Operation      | Equal value present                               |
//! |----------------|---------------------------------------------------|
//! | `put`          | replaces the equal value met on the search path   |
//! | `put_lower`    | inserts before the whole run of equal values      |
//! | `put_upper`    | inserts after the whole run of equal values       |
//! | `get`          | returns the equal value met on the search path    |
//! | `get_lower`    | returns the first value of the run                |
//! | `get_upper`    | returns the last value of the run                 |
//! | `delete`       | removes the equal value met on the search path    |
//! | `delete_lower` | removes the first value of the run                |
//! | `delete_upper` | removes the last value of the run                 |
//!
//! Which duplicate `put`, `get` and `delete` touch depends on the shape of
//! the tree and is left unspecified. Use the `_lower`/`_upper` variants when
//! the choice matters.
//!
//! # Examples
//!
//! ```rust
//! use persistent_avl::persistent::PersistentAvlTree;
//!
//! let tree = [5, 9, 3, 8, 1, 6, 7]
//!     .into_iter()
//!     .fold(PersistentAvlTree::new(), |tree, value| tree.put(value));
//!
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5, 6, 7, 8, 9]);
//! assert_eq!(tree.len(), 7);
//! assert_eq!(tree.height(), 4);
//!
//! // The original is preserved
//! let smaller = tree.delete(&5);
//! assert!(tree.contains(&5));
//! assert!(!smaller.contains(&5));
//! ```

use super::ReferenceCounter;
use super::error::NotFoundError;
use super::iter::{PersistentAvlTreeIntoIterator, PersistentAvlTreeIterator};
use super::node::{self, Link};
use crate::ordering::{Less, NaturalOrder};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

// =============================================================================
// PersistentAvlTree Definition
// =============================================================================

/// A persistent (immutable) ordered multiset based on an AVL tree.
///
/// `L` is the ordering predicate, fixed for the lifetime of the tree and
/// shared by every version derived from it. It defaults to [`NaturalOrder`],
/// the ascending order of [`Ord`].
///
/// # Time Complexity
///
/// | Operation                | Complexity |
/// |--------------------------|------------|
/// | `new`, `with_order`      | O(1)       |
/// | `get*`, `contains`       | O(log N)   |
/// | `put*`                   | O(log N)   |
/// | `delete*`, `try_delete*` | O(log N)   |
/// | `len`, `height`          | O(1)       |
/// | `clone`                  | O(1)       |
/// | full iteration           | O(N)       |
///
/// # Examples
///
/// ```rust
/// use persistent_avl::ordering::by_key;
/// use persistent_avl::persistent::PersistentAvlTree;
///
/// let tree = PersistentAvlTree::with_order(by_key(|entry: &(i32, i32)| entry.0))
///     .put((1, 10))
///     .put((5, 50))
///     .put((9, 90))
///     .put((7, 70))
///     .put((2, 20))
///     .put_lower((7, 71))
///     .put_lower((7, 72));
///
/// let entries: Vec<_> = tree.iter().copied().collect();
/// assert_eq!(
///     entries,
///     vec![(1, 10), (2, 20), (5, 50), (7, 72), (7, 71), (7, 70), (9, 90)]
/// );
///
/// assert_eq!(tree.get_lower(&(7, 0)), Some(&(7, 72)));
/// assert_eq!(tree.get_upper(&(7, 0)), Some(&(7, 70)));
/// ```
pub struct PersistentAvlTree<T, L = NaturalOrder> {
    /// Root node of the tree
    root: Link<T>,
    /// Number of elements
    length: usize,
    /// Ordering predicate shared by all versions
    less: ReferenceCounter<L>,
}

impl<T> PersistentAvlTree<T> {
    /// Creates a new empty tree ordered by [`Ord`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::persistent::PersistentAvlTree;
    ///
    /// let tree: PersistentAvlTree<i32> = PersistentAvlTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_order(NaturalOrder)
    }
}

impl<T, L> PersistentAvlTree<T, L> {
    /// Creates a new empty tree ordered by `less`.
    ///
    /// `less` must behave as a strict weak ordering; see
    /// [`ordering`](crate::ordering) for the exact contract.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::persistent::PersistentAvlTree;
    ///
    /// let tree = PersistentAvlTree::with_order(|left: &i32, right: &i32| left > right)
    ///     .put(1)
    ///     .put(3)
    ///     .put(2);
    ///
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    /// ```
    #[inline]
    #[must_use]
    pub fn with_order(less: L) -> Self {
        Self {
            root: None,
            length: 0,
            less: ReferenceCounter::new(less),
        }
    }

    /// Returns the number of elements in the tree.
    ///
    /// Equal elements are counted individually.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the tree contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single element.
    ///
    /// The balance invariant keeps the height below
    /// `1.4405 * log2(len + 2) - 0.3277`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::persistent::PersistentAvlTree;
    ///
    /// let tree: PersistentAvlTree<u32> = (0..1023).collect();
    /// assert_eq!(tree.height(), 10);
    /// ```
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    /// Returns the ordering predicate of the tree.
    #[inline]
    #[must_use]
    pub fn order(&self) -> &L {
        &self.less
    }

    /// Returns `true` if both trees are the same version, sharing one root.
    ///
    /// Two empty trees are the same version. Trees with equal contents built
    /// independently are not.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::persistent::PersistentAvlTree;
    ///
    /// let tree = PersistentAvlTree::new().put(1).put(2);
    /// assert!(tree.ptr_eq(&tree.delete(&3)));
    /// assert!(!tree.ptr_eq(&tree.put(3)));
    /// ```
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (Some(left), Some(right)) => ReferenceCounter::ptr_eq(left, right),
            (None, None) => true,
            _ => false,
        }
    }

    /// Returns the first element in iteration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::persistent::PersistentAvlTree;
    ///
    /// let tree: PersistentAvlTree<i32> = [3, 1, 2].into_iter().collect();
    /// assert_eq!(tree.get_first(), Some(&1));
    /// assert_eq!(PersistentAvlTree::<i32>::new().get_first(), None);
    /// ```
    #[must_use]
    pub fn get_first(&self) -> Option<&T> {
        node::first(&self.root)
    }

    /// Returns the last element in iteration order.
    #[must_use]
    pub fn get_last(&self) -> Option<&T> {
        node::last(&self.root)
    }

    /// Returns an iterator over the elements in ascending order.
    ///
    /// The iterator is lazy and borrows the tree; it never modifies it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::persistent::PersistentAvlTree;
    ///
    /// let tree: PersistentAvlTree<i32> = [3, 1, 2].into_iter().collect();
    /// let values: Vec<&i32> = tree.iter().collect();
    /// assert_eq!(values, vec![&1, &2, &3]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> PersistentAvlTreeIterator<'_, T> {
        PersistentAvlTreeIterator::new(&self.root, self.length)
    }

    /// Renders the shape of the tree as rows of a character grid.
    ///
    /// Each label is the element's `Display` output, centred over a row of
    /// box-drawing connectors leading to its children. Every row has the same
    /// number of characters; an empty tree renders as no rows.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::persistent::PersistentAvlTree;
    ///
    /// let tree = PersistentAvlTree::new().put(2).put(1).put(3);
    /// assert_eq!(tree.render(), vec![" 2 ", "┌┴┐", "1 3"]);
    /// ```
    #[cfg(feature = "render")]
    #[must_use]
    pub fn render(&self) -> Vec<String>
    where
        T: fmt::Display,
    {
        super::render::render(&self.root)
    }

    /// Creates a new version sharing this tree's predicate.
    fn derive(&self, root: Link<T>, length: usize) -> Self {
        Self {
            root,
            length,
            less: ReferenceCounter::clone(&self.less),
        }
    }
}

impl<T, L: Less<T>> PersistentAvlTree<T, L> {
    /// Returns an element equal to `value`.
    ///
    /// When several equal elements exist, which one is returned is
    /// unspecified. A caller-side default is `tree.get(&value).unwrap_or(&default)`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::ordering::by_key;
    /// use persistent_avl::persistent::PersistentAvlTree;
    ///
    /// let tree = PersistentAvlTree::with_order(by_key(|entry: &(u32, &str)| entry.0))
    ///     .put((3, "apple"))
    ///     .put((5, "pear"));
    ///
    /// assert_eq!(tree.get(&(5, "")), Some(&(5, "pear")));
    /// assert_eq!(tree.get(&(4, "")).unwrap_or(&(4, "none")), &(4, "none"));
    /// ```
    #[must_use]
    pub fn get(&self, value: &T) -> Option<&T> {
        node::get(&self.root, value, &*self.less)
    }

    /// Returns the first element, in iteration order, equal to `value`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn get_lower(&self, value: &T) -> Option<&T> {
        node::get_lower(&self.root, value, &*self.less)
    }

    /// Returns the last element, in iteration order, equal to `value`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn get_upper(&self, value: &T) -> Option<&T> {
        node::get_upper(&self.root, value, &*self.less)
    }

    /// Returns `true` if the tree contains an element equal to `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::persistent::PersistentAvlTree;
    ///
    /// let tree = PersistentAvlTree::new().put("key");
    /// assert!(tree.contains(&"key"));
    /// assert!(!tree.contains(&"other"));
    /// ```
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }
}

impl<T: Clone, L: Less<T>> PersistentAvlTree<T, L> {
    /// Inserts `value`, replacing an equal element if the search meets one.
    ///
    /// The length grows only when nothing was replaced. When several equal
    /// elements exist, which one is replaced is unspecified.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::ordering::by_key;
    /// use persistent_avl::persistent::PersistentAvlTree;
    ///
    /// let first = PersistentAvlTree::with_order(by_key(|entry: &(i32, &str)| entry.0))
    ///     .put((1, "one"));
    /// let second = first.put((1, "ONE"));
    ///
    /// assert_eq!(first.get(&(1, "")), Some(&(1, "one"))); // Original unchanged
    /// assert_eq!(second.get(&(1, "")), Some(&(1, "ONE"))); // New version
    /// assert_eq!(second.len(), 1);
    /// ```
    #[must_use]
    pub fn put(&self, value: T) -> Self {
        let (root, added) = node::put(&self.root, value, &*self.less);
        self.derive(Some(root), self.length + usize::from(added))
    }

    /// Inserts `value` before every element equal to it.
    ///
    /// Never replaces; the length always grows by one.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::ordering::by_key;
    /// use persistent_avl::persistent::PersistentAvlTree;
    ///
    /// let tree = PersistentAvlTree::with_order(by_key(|entry: &(i32, char)| entry.0))
    ///     .put((1, 'a'))
    ///     .put_lower((1, 'b'));
    ///
    /// let tags: String = tree.iter().map(|entry| entry.1).collect();
    /// assert_eq!(tags, "ba");
    /// ```
    #[must_use]
    pub fn put_lower(&self, value: T) -> Self {
        let root = node::put_lower(&self.root, value, &*self.less);
        self.derive(Some(root), self.length + 1)
    }

    /// Inserts `value` after every element equal to it.
    ///
    /// Never replaces; the length always grows by one.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn put_upper(&self, value: T) -> Self {
        let root = node::put_upper(&self.root, value, &*self.less);
        self.derive(Some(root), self.length + 1)
    }

    /// Removes an element equal to `value`.
    ///
    /// If no element is equal to `value`, returns this same version
    /// (see [`ptr_eq`](Self::ptr_eq)). When several equal elements exist,
    /// which one is removed is unspecified.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::persistent::PersistentAvlTree;
    ///
    /// let tree = PersistentAvlTree::new().put(1).put(2);
    /// let removed = tree.delete(&1);
    ///
    /// assert_eq!(tree.len(), 2);     // Original unchanged
    /// assert_eq!(removed.len(), 1);  // New version
    /// assert!(!removed.contains(&1));
    /// ```
    #[must_use]
    pub fn delete(&self, value: &T) -> Self {
        self.try_delete(value).unwrap_or_else(|_| self.clone())
    }

    /// Removes the first element, in iteration order, equal to `value`.
    ///
    /// If no element is equal to `value`, returns this same version.
    #[must_use]
    pub fn delete_lower(&self, value: &T) -> Self {
        self.try_delete_lower(value).unwrap_or_else(|_| self.clone())
    }

    /// Removes the last element, in iteration order, equal to `value`.
    ///
    /// If no element is equal to `value`, returns this same version.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::ordering::by_key;
    /// use persistent_avl::persistent::PersistentAvlTree;
    ///
    /// let tree = PersistentAvlTree::with_order(by_key(|entry: &(i32, i32)| entry.0))
    ///     .put((7, 70))
    ///     .put_lower((7, 71))
    ///     .delete_upper(&(7, 0));
    ///
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![(7, 71)]);
    /// ```
    #[must_use]
    pub fn delete_upper(&self, value: &T) -> Self {
        self.try_delete_upper(value).unwrap_or_else(|_| self.clone())
    }

    /// Removes an element equal to `value`, reporting whether one existed.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] if no element is equal to `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::persistent::PersistentAvlTree;
    ///
    /// let tree = PersistentAvlTree::new().put(1);
    /// assert!(tree.try_delete(&1).is_ok_and(|tree| tree.is_empty()));
    /// assert!(tree.try_delete(&2).is_err());
    /// ```
    pub fn try_delete(&self, value: &T) -> Result<Self, NotFoundError> {
        node::delete(&self.root, value, &*self.less)
            .map(|root| self.derive(root, self.length - 1))
            .ok_or(NotFoundError {
                operation: "try_delete",
            })
    }

    /// Removes the first element, in iteration order, equal to `value`,
    /// reporting whether one existed.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] if no element is equal to `value`.
    pub fn try_delete_lower(&self, value: &T) -> Result<Self, NotFoundError> {
        node::delete_lower(&self.root, value, &*self.less)
            .map(|root| self.derive(root, self.length - 1))
            .ok_or(NotFoundError {
                operation: "try_delete_lower",
            })
    }

    /// Removes the last element, in iteration order, equal to `value`,
    /// reporting whether one existed.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] if no element is equal to `value`.
    pub fn try_delete_upper(&self, value: &T) -> Result<Self, NotFoundError> {
        node::delete_upper(&self.root, value, &*self.less)
            .map(|root| self.derive(root, self.length - 1))
            .ok_or(NotFoundError {
                operation: "try_delete_upper",
            })
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, L> Clone for PersistentAvlTree<T, L> {
    #[inline]
    fn clone(&self) -> Self {
        self.derive(self.root.clone(), self.length)
    }
}

impl<T, L: Default> Default for PersistentAvlTree<T, L> {
    #[inline]
    fn default() -> Self {
        Self::with_order(L::default())
    }
}

/// Collects values with [`put_upper`](PersistentAvlTree::put_upper), so every
/// value is kept and equal values stay in input order.
impl<T: Clone, L: Less<T> + Default> FromIterator<T> for PersistentAvlTree<T, L> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::default(), |tree, value| tree.put_upper(value))
    }
}

impl<T: Clone, L> IntoIterator for PersistentAvlTree<T, L> {
    type Item = T;
    type IntoIter = PersistentAvlTreeIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        PersistentAvlTreeIntoIterator::new(self.root, self.length)
    }
}

impl<'a, T, L> IntoIterator for &'a PersistentAvlTree<T, L> {
    type Item = &'a T;
    type IntoIter = PersistentAvlTreeIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Trees are equal when they hold equal elements in the same order,
/// whatever their shape.
impl<T: PartialEq, L> PartialEq for PersistentAvlTree<T, L> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && (self.ptr_eq(other) || self.iter().eq(other.iter()))
    }
}

impl<T: Eq, L> Eq for PersistentAvlTree<T, L> {}

/// Computes a hash value for this tree.
///
/// The hash covers the length, then each element in iteration order, so
/// trees that compare equal hash equally regardless of their shape.
impl<T: Hash, L> Hash for PersistentAvlTree<T, L> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: fmt::Debug, L> fmt::Debug for PersistentAvlTree<T, L> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, L> fmt::Display for PersistentAvlTree<T, L> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for value in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{value}")?;
        }
        write!(formatter, "]")
    }
}

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(PersistentAvlTree<i32>: Send, Sync);

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(PersistentAvlTree<i32>: Send, Sync);

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T, L> serde::Serialize for PersistentAvlTree<T, L>
where
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut sequence = serializer.serialize_seq(Some(self.len()))?;
        for value in self {
            sequence.serialize_element(value)?;
        }
        sequence.end()
    }
}

#[cfg(feature = "serde")]
struct PersistentAvlTreeVisitor<T, L> {
    value_marker: std::marker::PhantomData<T>,
    order_marker: std::marker::PhantomData<L>,
}

#[cfg(feature = "serde")]
impl<T, L> PersistentAvlTreeVisitor<T, L> {
    const fn new() -> Self {
        Self {
            value_marker: std::marker::PhantomData,
            order_marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T, L> serde::de::Visitor<'de> for PersistentAvlTreeVisitor<T, L>
where
    T: serde::Deserialize<'de> + Clone,
    L: Less<T> + Default,
{
    type Value = PersistentAvlTree<T, L>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut tree = PersistentAvlTree::default();
        while let Some(value) = access.next_element()? {
            tree = tree.put_upper(value);
        }
        Ok(tree)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, L> serde::Deserialize<'de> for PersistentAvlTree<T, L>
where
    T: serde::Deserialize<'de> + Clone,
    L: Less<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PersistentAvlTreeVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================


// =============================================================================
// Multithread Tests (arc feature only)
// =============================================================================

#[cfg(all(test, feature = "arc"))]
mod multithread_tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Arc;
    use std::thread;

    #[rstest]
    fn test_tree_shared_across_threads() {
        let tree: Arc<PersistentAvlTree<i32>> = Arc::new((0..100).collect());

        let handles: Vec<_> = (0..4)
            .map(|index| {
                let tree_clone = Arc::clone(&tree);
                thread::spawn(move || {
                    let updated = tree_clone.put_upper(index);
                    assert_eq!(updated.len(), 101);
                    assert_eq!(tree_clone.len(), 100);
                    updated
                })
            })
            .collect();

        let results: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().expect("Thread panicked"))
            .collect();

        for updated in &results {
            assert_eq!(updated.len(), 101);
        }
        assert_eq!(tree.len(), 100);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_serialize_in_order() {
        let tree = PersistentAvlTree::new().put(3).put(1).put(2);
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, "[1,2,3]");
    }

    #[rstest]
    fn test_deserialize_keeps_duplicates() {
        let tree: PersistentAvlTree<i32> = serde_json::from_str("[2,1,2,3]").unwrap();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 2, 3]);
    }

    #[rstest]
    fn test_roundtrip_large() {
        let original: PersistentAvlTree<String> =
            (0..100).map(|index| format!("value{index:03}")).collect();
        let json = serde_json::to_string(&original).unwrap();
        let restored: PersistentAvlTree<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }
}
