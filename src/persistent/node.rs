//! Node algebra of the persistent AVL tree.
//!
//! Every function here is pure: it reads existing nodes and returns freshly
//! allocated ones, sharing every untouched subtree by reference. Nodes are
//! never modified after construction, so any number of tree versions can
//! point into the same subtrees.
//!
//! The ordering predicate is threaded explicitly through every call that
//! compares values.
//!
//! # Invariants
//!
//! For every node `n`:
//!
//! 1. `n.height == 1 + max(height(n.left), height(n.right))`
//! 2. `|height(n.left) - height(n.right)| <= 1`
//! 3. every value in `n.left` is not greater than `n.value`, and every value
//!    in `n.right` is not less than `n.value`

use super::ReferenceCounter;
use crate::ordering::Less;

/// An optional, shared subtree. `None` is the empty tree.
pub(crate) type Link<T> = Option<ReferenceCounter<Node<T>>>;

/// Internal node structure for the AVL tree.
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) height: usize,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    /// Creates a node over two subtrees, deriving its height.
    fn new(value: T, left: Link<T>, right: Link<T>) -> Self {
        Self {
            height: 1 + height(&left).max(height(&right)),
            value,
            left,
            right,
        }
    }

    /// Creates a node with no children.
    const fn leaf(value: T) -> Self {
        Self {
            value,
            height: 1,
            left: None,
            right: None,
        }
    }
}

/// Height of a subtree; 0 for the empty tree.
#[inline]
pub(crate) fn height<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

// =============================================================================
// Rotations and Rebalancing
// =============================================================================

/// Rotates left around a node whose parts are `value`, `left` and `right`.
///
/// `right` moves up; the rotated node becomes its left child.
fn rotate_left<T: Clone>(value: T, left: Link<T>, right: &Node<T>) -> Node<T> {
    let lowered = Node::new(value, left, right.left.clone());
    Node::new(
        right.value.clone(),
        Some(ReferenceCounter::new(lowered)),
        right.right.clone(),
    )
}

/// Rotates right around a node whose parts are `value`, `left` and `right`.
fn rotate_right<T: Clone>(value: T, left: &Node<T>, right: Link<T>) -> Node<T> {
    let lowered = Node::new(value, left.right.clone(), right);
    Node::new(
        left.value.clone(),
        left.left.clone(),
        Some(ReferenceCounter::new(lowered)),
    )
}

/// Rotates right around the right child, then left around the node.
fn big_rotate_left<T: Clone>(value: T, left: Link<T>, right: &Node<T>) -> Node<T> {
    let raised = match &right.left {
        Some(inner) => rotate_right(right.value.clone(), inner, right.right.clone()),
        None => return rotate_left(value, left, right),
    };
    rotate_left(value, left, &raised)
}

/// Rotates left around the left child, then right around the node.
fn big_rotate_right<T: Clone>(value: T, left: &Node<T>, right: Link<T>) -> Node<T> {
    let raised = match &left.right {
        Some(inner) => rotate_left(left.value.clone(), left.left.clone(), inner),
        None => return rotate_right(value, left, right),
    };
    rotate_right(value, &raised, right)
}

/// Builds a node from its parts, restoring the balance invariant.
///
/// Both subtrees must already be balanced and their heights may differ by at
/// most two.
pub(crate) fn balance<T: Clone>(
    value: T,
    left: Link<T>,
    right: Link<T>,
) -> ReferenceCounter<Node<T>> {
    let left_height = height(&left);
    let right_height = height(&right);

    // Right-heavy
    if right_height > left_height + 1
        && let Some(heavy) = &right
    {
        let node = if height(&heavy.right) >= height(&heavy.left) {
            rotate_left(value, left, heavy)
        } else {
            big_rotate_left(value, left, heavy)
        };
        return ReferenceCounter::new(node);
    }

    // Left-heavy
    if left_height > right_height + 1
        && let Some(heavy) = &left
    {
        let node = if height(&heavy.left) >= height(&heavy.right) {
            rotate_right(value, heavy, right)
        } else {
            big_rotate_right(value, heavy, right)
        };
        return ReferenceCounter::new(node);
    }

    ReferenceCounter::new(Node::new(value, left, right))
}

// =============================================================================
// Insertion
// =============================================================================

/// Inserts `value`, replacing an equal value if the search meets one.
///
/// Returns the new subtree and whether a node was added.
pub(crate) fn put<T, L>(link: &Link<T>, value: T, less: &L) -> (ReferenceCounter<Node<T>>, bool)
where
    T: Clone,
    L: Less<T> + ?Sized,
{
    let Some(node) = link else {
        return (ReferenceCounter::new(Node::leaf(value)), true);
    };

    if less.less(&value, &node.value) {
        let (left, added) = put(&node.left, value, less);
        (
            balance(node.value.clone(), Some(left), node.right.clone()),
            added,
        )
    } else if less.less(&node.value, &value) {
        let (right, added) = put(&node.right, value, less);
        (
            balance(node.value.clone(), node.left.clone(), Some(right)),
            added,
        )
    } else {
        let replaced = Node {
            value,
            height: node.height,
            left: node.left.clone(),
            right: node.right.clone(),
        };
        (ReferenceCounter::new(replaced), false)
    }
}

/// Inserts `value` before every value equal to it.
pub(crate) fn put_lower<T, L>(link: &Link<T>, value: T, less: &L) -> ReferenceCounter<Node<T>>
where
    T: Clone,
    L: Less<T> + ?Sized,
{
    let Some(node) = link else {
        return ReferenceCounter::new(Node::leaf(value));
    };

    if less.less(&node.value, &value) {
        let right = put_lower(&node.right, value, less);
        balance(node.value.clone(), node.left.clone(), Some(right))
    } else {
        let left = put_lower(&node.left, value, less);
        balance(node.value.clone(), Some(left), node.right.clone())
    }
}

/// Inserts `value` after every value equal to it.
pub(crate) fn put_upper<T, L>(link: &Link<T>, value: T, less: &L) -> ReferenceCounter<Node<T>>
where
    T: Clone,
    L: Less<T> + ?Sized,
{
    let Some(node) = link else {
        return ReferenceCounter::new(Node::leaf(value));
    };

    if less.less(&value, &node.value) {
        let left = put_upper(&node.left, value, less);
        balance(node.value.clone(), Some(left), node.right.clone())
    } else {
        let right = put_upper(&node.right, value, less);
        balance(node.value.clone(), node.left.clone(), Some(right))
    }
}

// =============================================================================
// Queries
// =============================================================================

/// Returns the first value equal to `value` on the search path.
pub(crate) fn get<'a, T, L>(mut link: &'a Link<T>, value: &T, less: &L) -> Option<&'a T>
where
    L: Less<T> + ?Sized,
{
    while let Some(node) = link {
        if less.less(value, &node.value) {
            link = &node.left;
        } else if less.less(&node.value, value) {
            link = &node.right;
        } else {
            return Some(&node.value);
        }
    }
    None
}

/// Returns the leftmost value of a subtree.
pub(crate) fn first<T>(link: &Link<T>) -> Option<&T> {
    let mut node = link.as_ref()?;
    while let Some(left) = &node.left {
        node = left;
    }
    Some(&node.value)
}

/// Returns the rightmost value of a subtree.
pub(crate) fn last<T>(link: &Link<T>) -> Option<&T> {
    let mut node = link.as_ref()?;
    while let Some(right) = &node.right {
        node = right;
    }
    Some(&node.value)
}

/// Returns the first value, in iteration order, of the run equal to `value`.
pub(crate) fn get_lower<'a, T, L>(link: &'a Link<T>, value: &T, less: &L) -> Option<&'a T>
where
    L: Less<T> + ?Sized,
{
    let node = link.as_ref()?;
    if less.less(&node.value, value) {
        get_lower(&node.right, value, less)
    } else if less.less(value, &node.value) {
        get_lower(&node.left, value, less)
    } else {
        get_lower(&node.left, value, less).or(Some(&node.value))
    }
}

/// Returns the last value, in iteration order, of the run equal to `value`.
pub(crate) fn get_upper<'a, T, L>(link: &'a Link<T>, value: &T, less: &L) -> Option<&'a T>
where
    L: Less<T> + ?Sized,
{
    let node = link.as_ref()?;
    if less.less(value, &node.value) {
        get_upper(&node.left, value, less)
    } else if less.less(&node.value, value) {
        get_upper(&node.right, value, less)
    } else {
        get_upper(&node.right, value, less).or(Some(&node.value))
    }
}

// =============================================================================
// Deletion
// =============================================================================

/// Removes the leftmost node of a subtree.
///
/// Returns the removed value and the rebalanced remainder.
fn pop_first<T: Clone>(node: &Node<T>) -> (T, Link<T>) {
    match &node.left {
        None => (node.value.clone(), node.right.clone()),
        Some(left) => {
            let (first, rest) = pop_first(left);
            (
                first,
                Some(balance(node.value.clone(), rest, node.right.clone())),
            )
        }
    }
}

/// Removes the rightmost node of a subtree.
fn pop_last<T: Clone>(node: &Node<T>) -> (T, Link<T>) {
    match &node.right {
        None => (node.value.clone(), node.left.clone()),
        Some(right) => {
            let (last, rest) = pop_last(right);
            (
                last,
                Some(balance(node.value.clone(), node.left.clone(), rest)),
            )
        }
    }
}

/// Removes `node` itself, splicing in a neighbour from its taller side.
fn remove_node<T: Clone>(node: &Node<T>) -> Link<T> {
    match (&node.left, &node.right) {
        (_, Some(right)) if height(&node.right) > height(&node.left) => {
            let (successor, rest) = pop_first(right);
            Some(balance(successor, node.left.clone(), rest))
        }
        (Some(left), _) => {
            let (predecessor, rest) = pop_last(left);
            Some(balance(predecessor, rest, node.right.clone()))
        }
        // The right side cannot be taller than an empty left side without
        // taking the first arm, so both children are absent here.
        (None, _) => node.right.clone(),
    }
}

/// Removes some value equal to `value`.
///
/// Returns `None` when no equal value exists, otherwise the new subtree.
pub(crate) fn delete<T, L>(link: &Link<T>, value: &T, less: &L) -> Option<Link<T>>
where
    T: Clone,
    L: Less<T> + ?Sized,
{
    let node = link.as_ref()?;
    if less.less(value, &node.value) {
        let left = delete(&node.left, value, less)?;
        Some(Some(balance(node.value.clone(), left, node.right.clone())))
    } else if less.less(&node.value, value) {
        let right = delete(&node.right, value, less)?;
        Some(Some(balance(node.value.clone(), node.left.clone(), right)))
    } else {
        Some(remove_node(node))
    }
}

/// Removes the first value, in iteration order, of the run equal to `value`.
pub(crate) fn delete_lower<T, L>(link: &Link<T>, value: &T, less: &L) -> Option<Link<T>>
where
    T: Clone,
    L: Less<T> + ?Sized,
{
    let node = link.as_ref()?;
    if less.less(&node.value, value) {
        let right = delete_lower(&node.right, value, less)?;
        Some(Some(balance(node.value.clone(), node.left.clone(), right)))
    } else if less.less(value, &node.value) {
        let left = delete_lower(&node.left, value, less)?;
        Some(Some(balance(node.value.clone(), left, node.right.clone())))
    } else {
        match delete_lower(&node.left, value, less) {
            Some(left) => Some(Some(balance(node.value.clone(), left, node.right.clone()))),
            None => Some(remove_node(node)),
        }
    }
}

/// Removes the last value, in iteration order, of the run equal to `value`.
pub(crate) fn delete_upper<T, L>(link: &Link<T>, value: &T, less: &L) -> Option<Link<T>>
where
    T: Clone,
    L: Less<T> + ?Sized,
{
    let node = link.as_ref()?;
    if less.less(value, &node.value) {
        let left = delete_upper(&node.left, value, less)?;
        Some(Some(balance(node.value.clone(), left, node.right.clone())))
    } else if less.less(&node.value, value) {
        let right = delete_upper(&node.right, value, less)?;
        Some(Some(balance(node.value.clone(), node.left.clone(), right)))
    } else {
        match delete_upper(&node.right, value, less) {
            Some(right) => Some(Some(balance(node.value.clone(), node.left.clone(), right))),
            None => Some(remove_node(node)),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ordering::NaturalOrder;
    use rstest::rstest;

    /// Checks the height, balance and ordering invariants of a subtree.
    ///
    /// Returns the number of nodes.
    pub(crate) fn check_invariants<T, L: Less<T>>(link: &Link<T>, less: &L) -> usize {
        let Some(node) = link else {
            return 0;
        };
        let left_height = height(&node.left);
        let right_height = height(&node.right);
        assert_eq!(node.height, 1 + left_height.max(right_height));
        assert!(left_height.abs_diff(right_height) <= 1, "unbalanced node");
        if let Some(left_last) = last(&node.left) {
            assert!(!less.less(&node.value, left_last), "left subtree out of order");
        }
        if let Some(right_first) = first(&node.right) {
            assert!(!less.less(right_first, &node.value), "right subtree out of order");
        }
        1 + check_invariants(&node.left, less) + check_invariants(&node.right, less)
    }

    fn collect<T: Clone>(link: &Link<T>, values: &mut Vec<T>) {
        if let Some(node) = link {
            collect(&node.left, values);
            values.push(node.value.clone());
            collect(&node.right, values);
        }
    }

    fn build(values: &[i32]) -> Link<i32> {
        values
            .iter()
            .fold(None, |link, &value| Some(put(&link, value, &NaturalOrder).0))
    }

    #[rstest]
    fn test_height_of_empty_is_zero() {
        let link: Link<i32> = None;
        assert_eq!(height(&link), 0);
    }

    #[rstest]
    fn test_leaf_has_height_one() {
        let link = build(&[1]);
        assert_eq!(height(&link), 1);
    }

    #[rstest]
    #[case::ascending(&[1, 2, 3])]
    #[case::descending(&[3, 2, 1])]
    #[case::zig_zag(&[1, 3, 2])]
    #[case::zag_zig(&[3, 1, 2])]
    fn test_three_insertions_rotate_to_perfect_tree(#[case] values: &[i32]) {
        let link = build(values);
        let root = link.as_ref().expect("root");
        assert_eq!(root.value, 2);
        assert_eq!(root.height, 2);
        assert_eq!(root.left.as_ref().map(|node| node.value), Some(1));
        assert_eq!(root.right.as_ref().map(|node| node.value), Some(3));
    }

    #[rstest]
    fn test_sequential_insertions_stay_balanced() {
        let values: Vec<i32> = (0..512).collect();
        let link = build(&values);
        assert_eq!(check_invariants(&link, &NaturalOrder), 512);
        // A perfectly balanced tree of 511 nodes has height 9.
        assert!(height(&link) <= 10);
    }

    #[rstest]
    fn test_put_replaces_equal_value_in_place() {
        let less = |left: &(i32, char), right: &(i32, char)| left.0 < right.0;
        let link = Some(put(&None, (1, 'a'), &less).0);
        let (replaced, added) = put(&link, (1, 'b'), &less);
        assert!(!added);
        assert_eq!(replaced.value, (1, 'b'));
        assert_eq!(replaced.height, 1);
    }

    #[rstest]
    fn test_put_shares_untouched_subtrees() {
        let link = build(&[4, 2, 6, 1, 3, 5, 7]);
        let root = link.as_ref().expect("root");
        let updated = put(&link, 8, &NaturalOrder).0;
        let original_left = root.left.as_ref().expect("left");
        let updated_left = updated.left.as_ref().expect("left");
        assert!(ReferenceCounter::ptr_eq(original_left, updated_left));
    }

    #[rstest]
    fn test_put_lower_and_put_upper_order_duplicates() {
        let less = |left: &(i32, char), right: &(i32, char)| left.0 < right.0;
        let mut link: Link<(i32, char)> = None;
        for value in [(5, 'm'), (3, 'a'), (8, 'z')] {
            link = Some(put(&link, value, &less).0);
        }
        link = Some(put_lower(&link, (5, 'l'), &less));
        link = Some(put_upper(&link, (5, 'n'), &less));
        link = Some(put_lower(&link, (5, 'k'), &less));

        let mut values = Vec::new();
        collect(&link, &mut values);
        let tags: String = values.iter().map(|value| value.1).collect();
        assert_eq!(tags, "aklmnz");
        assert_eq!(check_invariants(&link, &less), 6);
    }

    #[rstest]
    fn test_get_lower_and_get_upper_find_run_bounds() {
        let less = |left: &(i32, i32), right: &(i32, i32)| left.0 < right.0;
        let mut link: Link<(i32, i32)> = None;
        for serial in 0..20 {
            link = Some(put_upper(&link, (serial % 4, serial), &less));
        }
        assert_eq!(get_lower(&link, &(2, 0), &less), Some(&(2, 2)));
        assert_eq!(get_upper(&link, &(2, 0), &less), Some(&(2, 18)));
        assert_eq!(get_lower(&link, &(9, 0), &less), None);
        assert_eq!(get_upper(&link, &(-1, 0), &less), None);
    }

    #[rstest]
    fn test_first_and_last() {
        let link = build(&[5, 9, 3, 8, 1, 6, 7]);
        assert_eq!(first(&link), Some(&1));
        assert_eq!(last(&link), Some(&9));
        assert_eq!(first::<i32>(&None), None);
    }

    #[rstest]
    fn test_delete_every_value_keeps_invariants() {
        let values: Vec<i32> = (0..64).map(|index| (index * 37) % 64).collect();
        let mut link = build(&values);
        for (removed, value) in values.iter().enumerate() {
            link = delete(&link, value, &NaturalOrder).expect("present");
            assert_eq!(check_invariants(&link, &NaturalOrder), 63 - removed);
            assert_eq!(get(&link, value, &NaturalOrder), None);
        }
        assert!(link.is_none());
    }

    #[rstest]
    fn test_delete_missing_value_reports_not_found() {
        let link = build(&[1, 2, 3]);
        assert!(delete(&link, &4, &NaturalOrder).is_none());
        assert!(delete_lower(&link, &0, &NaturalOrder).is_none());
        assert!(delete_upper(&None, &1, &NaturalOrder).is_none());
    }

    #[rstest]
    fn test_delete_lower_and_delete_upper_remove_run_bounds() {
        let less = |left: &(i32, i32), right: &(i32, i32)| left.0 < right.0;
        let mut link: Link<(i32, i32)> = None;
        for serial in 0..30 {
            link = Some(put_upper(&link, (serial % 3, serial), &less));
        }
        link = delete_lower(&link, &(1, 0), &less).expect("present");
        link = delete_upper(&link, &(1, 0), &less).expect("present");
        assert_eq!(check_invariants(&link, &less), 28);
        assert_eq!(get_lower(&link, &(1, 0), &less), Some(&(1, 4)));
        assert_eq!(get_upper(&link, &(1, 0), &less), Some(&(1, 25)));
    }

    #[rstest]
    fn test_remove_node_prefers_taller_right_side() {
        // 2 has a single right child 3, so the successor replaces it.
        let link = build(&[2, 1, 3, 4]);
        let root = link.as_ref().expect("root");
        assert_eq!(root.value, 2);
        let removed = remove_node(root).expect("subtree");
        assert_eq!(removed.value, 3);
        assert_eq!(check_invariants(&Some(removed), &NaturalOrder), 3);
    }
}
