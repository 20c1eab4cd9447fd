//! Character-grid rendering of the tree shape.
//!
//! A debugging aid: it reads only the value, left and right child of each
//! node and never affects the tree.
//!
//! Each subtree is drawn as a rectangular block. A node's label (its
//! [`Display`](std::fmt::Display) output) is centred over a connector row,
//! and the blocks of its children sit below, side by side, one column apart.
//! A missing child takes up a single blank column.
//!
//! ```text
//!    5
//!  ┌─┴──┐
//!  3    8
//! ┌┘   ┌┴─┐
//! 1    6  9
//!      └┐
//!       7
//! ```
//!
//! Connector characters:
//!
//! - `┌` above the left child, `┐` above the right child, `─` in between
//! - `┴` under a label with two children, `┘` with only a left child,
//!   `└` with only a right child
//!
//! Widths are counted in `char`s, so labels are expected to be made of
//! single-column characters.

use super::node::{Link, Node};
use std::fmt::Display;

/// A rendered subtree.
struct Block {
    rows: Vec<Vec<char>>,
    width: usize,
    /// Column of the label's centre, where the parent's connector attaches.
    anchor: usize,
}

impl Block {
    /// A single blank column standing in for a missing child.
    const fn placeholder() -> Self {
        Self {
            rows: Vec::new(),
            width: 1,
            anchor: 0,
        }
    }

    /// Row `index` padded to the block width.
    fn row(&self, index: usize) -> impl Iterator<Item = char> + '_ {
        let row = self.rows.get(index).map_or(&[][..], Vec::as_slice);
        row.iter()
            .copied()
            .chain(std::iter::repeat(' '))
            .take(self.width)
    }
}

/// Renders the subtree rooted at `link` as rows of equal character width.
///
/// An empty subtree renders as no rows.
pub(crate) fn render<T: Display>(link: &Link<T>) -> Vec<String> {
    link.as_ref().map_or_else(Vec::new, |node| {
        render_node(node)
            .rows
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect()
    })
}

fn render_node<T: Display>(node: &Node<T>) -> Block {
    let label: Vec<char> = node.value.to_string().chars().collect();

    if node.left.is_none() && node.right.is_none() {
        // An empty label still takes one column so the parent has a place to attach.
        let width = label.len().max(1);
        let mut row = label;
        row.resize(width, ' ');
        return Block {
            width,
            anchor: (width - 1) / 2,
            rows: vec![row],
        };
    }

    let left = node.left.as_deref().map(render_node);
    let right = node.right.as_deref().map(render_node);
    let has_left = left.is_some();
    let has_right = right.is_some();
    let left = left.unwrap_or_else(Block::placeholder);
    let right = right.unwrap_or_else(Block::placeholder);

    let left_anchor = left.anchor;
    let right_anchor = left.width + 1 + right.anchor;
    let center = (left_anchor + right_anchor) / 2;

    // Shift everything right when the label overhangs the left edge.
    let label_before_center = label.len().saturating_sub(1) / 2;
    let offset = label_before_center.saturating_sub(center);
    let label_start = offset + center - label_before_center;

    let children_width = offset + left.width + 1 + right.width;
    let width = children_width.max(label_start + label.len());

    let mut label_row = vec![' '; width];
    label_row[label_start..label_start + label.len()].copy_from_slice(&label);

    let mut connector_row = vec![' '; width];
    if has_left {
        connector_row[offset + left_anchor] = '┌';
        for cell in &mut connector_row[offset + left_anchor + 1..offset + center] {
            *cell = '─';
        }
    }
    if has_right {
        for cell in &mut connector_row[offset + center + 1..offset + right_anchor] {
            *cell = '─';
        }
        connector_row[offset + right_anchor] = '┐';
    }
    connector_row[offset + center] = match (has_left, has_right) {
        (true, true) => '┴',
        (true, false) => '┘',
        _ => '└',
    };

    let depth = left.rows.len().max(right.rows.len());
    let mut rows = Vec::with_capacity(depth + 2);
    rows.push(label_row);
    rows.push(connector_row);
    for index in 0..depth {
        let mut row: Vec<char> = std::iter::repeat_n(' ', offset)
            .chain(left.row(index))
            .chain(std::iter::once(' '))
            .chain(right.row(index))
            .collect();
        row.resize(width, ' ');
        rows.push(row);
    }

    Block {
        rows,
        width,
        anchor: offset + center,
    }
}

#[cfg(test)]
mod tests {
    use crate::persistent::PersistentAvlTree;
    use rstest::rstest;

    #[rstest]
    fn test_render_empty_tree() {
        let tree: PersistentAvlTree<i32> = PersistentAvlTree::new();
        assert!(tree.render().is_empty());
    }

    #[rstest]
    fn test_render_single_node() {
        let tree = PersistentAvlTree::new().put(42);
        assert_eq!(tree.render(), vec!["42"]);
    }

    #[rstest]
    fn test_render_left_child_only() {
        let tree = PersistentAvlTree::new().put(2).put(1);
        assert_eq!(tree.render(), vec![" 2 ", "┌┘ ", "1  "]);
    }

    #[rstest]
    fn test_render_right_child_only() {
        let tree = PersistentAvlTree::new().put(1).put(2);
        assert_eq!(tree.render(), vec![" 1 ", " └┐", "  2"]);
    }

    #[rstest]
    fn test_render_label_centred_over_connector() {
        let tree = PersistentAvlTree::new().put(500).put(1).put(9000);
        assert_eq!(tree.render(), vec!["500   ", "┌┴─┐  ", "1 9000"]);
    }

    #[rstest]
    fn test_render_wide_label_shifts_children() {
        let tree = PersistentAvlTree::new().put(12345).put(1);
        assert_eq!(tree.render(), vec!["12345", " ┌┘  ", " 1   "]);
    }

    #[rstest]
    fn test_render_empty_label_leaf() {
        let tree = PersistentAvlTree::new()
            .put(String::from("b"))
            .put(String::new());
        assert_eq!(tree.render(), vec![" b ", "┌┘ ", "   "]);
    }

    /// Orders by the wrapped number but displays as nothing.
    #[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
    struct Blank(i32);

    impl std::fmt::Display for Blank {
        fn fmt(&self, _formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            Ok(())
        }
    }

    #[rstest]
    fn test_render_empty_labels_everywhere() {
        let tree = (0..7)
            .map(Blank)
            .fold(PersistentAvlTree::new(), |tree, value| tree.put(value));
        let rows = tree.render();
        assert_eq!(rows.len(), 2 * tree.height() - 1);
        let width = rows[0].chars().count();
        assert!(width > 0);
        assert!(rows.iter().all(|row| row.chars().count() == width));
    }

    #[rstest]
    fn test_render_rows_are_rectangular() {
        let tree = [5, 9, 3, 8, 1, 6, 7, 100, 42, 1234]
            .into_iter()
            .fold(PersistentAvlTree::new(), |tree, value| tree.put(value));
        let rows = tree.render();
        let width = rows[0].chars().count();
        assert!(rows.iter().all(|row| row.chars().count() == width));
        assert_eq!(rows.len(), 2 * tree.height() - 1);
    }

    #[rstest]
    fn test_render_example_from_module_docs() {
        let tree = [5, 9, 3, 8, 1, 6, 7]
            .into_iter()
            .fold(PersistentAvlTree::new(), |tree, value| tree.put(value));
        assert_eq!(
            tree.render(),
            vec![
                "   5     ",
                " ┌─┴──┐  ",
                " 3    8  ",
                "┌┘   ┌┴─┐",
                "1    6  9",
                "     └┐  ",
                "      7  ",
            ]
        );
    }
}
