use mtt_core::tree::{Colour, NodeIndex};

#[allow(clippy::module_name_repetitions)]
#[derive(thiserror::Error, displaydoc::Display, Debug, Clone, PartialEq)]
pub enum ArenaColouredTreeError {
    /// the tree has no nodes
    Empty,
    /// node {0} does not exist
    UnknownNode(NodeIndex),
    /// node {0} cannot be both children of the same parent
    DuplicateChild(NodeIndex),
    /// node {0} already hangs below another parent
    AlreadyLinked(NodeIndex),
    /// the tree has {count} parentless nodes instead of a single root
    RootCount { count: usize },
    /// the link between parent {parent} and child {child} is not mirrored
    BrokenLink { parent: NodeIndex, child: NodeIndex },
    /// node {child} at height {child_height} lies above its parent {parent} at height {parent_height}
    ChildAboveParent {
        child: NodeIndex,
        child_height: f64,
        parent: NodeIndex,
        parent_height: f64,
    },
    /// the root {0} cannot carry colour changes
    RootChanges(NodeIndex),
    /// the change at time {time} on the branch above {node} is out of order or outside the branch
    ChangeOutsideBranch { node: NodeIndex, time: f64 },
    /// the branch above {node} ends in {found} but its parent has {expected}
    ColourMismatch {
        node: NodeIndex,
        found: Colour,
        expected: Colour,
    },
}
