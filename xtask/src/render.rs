//! Tree rendering
//!
//! This module provides the `render` subcommand, which prints the grid
//! produced by `PersistentAvlTree::render`.

use anyhow::Result;
use clap::{Args, ValueEnum};
use persistent_avl::persistent::PersistentAvlTree;

/// Insertion variant used to build the tree
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// `put`: equal values replace each other
    Put,
    /// `put_lower`: equal values go before existing ones
    Lower,
    /// `put_upper`: equal values go after existing ones
    Upper,
}

/// Arguments for the render subcommand
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Insertion variant
    #[arg(long, short = 'm', value_enum, default_value_t = Mode::Put)]
    pub mode: Mode,

    /// Values to insert, in order
    #[arg(required = true, allow_negative_numbers = true)]
    pub values: Vec<i64>,
}

/// Builds the tree for `values` with the insertion variant `mode`.
pub fn build(mode: Mode, values: &[i64]) -> PersistentAvlTree<i64> {
    values
        .iter()
        .fold(PersistentAvlTree::new(), |tree, &value| match mode {
            Mode::Put => tree.put(value),
            Mode::Lower => tree.put_lower(value),
            Mode::Upper => tree.put_upper(value),
        })
}

pub fn run(args: &RenderArgs) -> Result<()> {
    let tree = build(args.mode, &args.values);
    tracing::debug!(mode = ?args.mode, inserted = args.values.len(), "tree built");

    for row in tree.render() {
        println!("{}", row.trim_end());
    }
    println!();
    println!("size:   {}", tree.len());
    println!("height: {}", tree.height());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Mode::Put, 2)]
    #[case(Mode::Lower, 4)]
    #[case(Mode::Upper, 4)]
    fn test_build_respects_mode(#[case] mode: Mode, #[case] expected_len: usize) {
        let tree = build(mode, &[2, 1, 2, 2]);
        assert_eq!(tree.len(), expected_len);
    }

    #[rstest]
    fn test_build_renders_rows() {
        let tree = build(Mode::Put, &[2, 1, 3]);
        assert_eq!(tree.render(), vec![" 2 ", "┌┴┐", "1 3"]);
    }
}
