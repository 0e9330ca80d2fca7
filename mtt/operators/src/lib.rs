#![deny(clippy::pedantic)]

#[macro_use]
extern crate contracts;

#[macro_use]
extern crate log;

/// Smallest full binary tree with an internal non-root node: a root, one
/// internal node below it and three leaves.
///
/// The height move needs such a node, and both exchange selection loops
/// terminate on any tree of at least this size.
pub const MIN_NODE_COUNT: usize = 5;

pub mod arguments;
pub mod subtree_exchange;
pub mod uniform_height;

#[cfg(test)]
mod fixtures;
