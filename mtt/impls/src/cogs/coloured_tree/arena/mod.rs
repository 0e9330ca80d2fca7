use serde::{Deserialize, Serialize};

use mtt_core::{
    cogs::{Backup, ColouredTree},
    tree::{ChangeEvent, Colour, NodeIndex},
};
use mtt_core_bond::NonNegativeF64;

mod builder;
pub mod error;

#[cfg(test)]
mod tests;

pub use builder::ArenaColouredTreeBuilder;
use error::ArenaColouredTreeError;

#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColouredTreeSettings {
    pub max_branch_changes: usize,
    pub discard_when_max_exceeded: bool,
}

impl Default for ColouredTreeSettings {
    fn default() -> Self {
        Self {
            max_branch_changes: 100,
            discard_when_max_exceeded: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ArenaNode {
    height: NonNegativeF64,
    colour: Colour,
    parent: Option<NodeIndex>,
    children: Option<[NodeIndex; 2]>,
    changes: Vec<ChangeEvent>,
}

/// A coloured tree stored as a flat arena of nodes.
///
/// Parent and child links are arena indices, so relinking a subtree is a
/// constant-time index rewrite and node identities never change.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaColouredTree {
    nodes: Vec<ArenaNode>,
    root: NodeIndex,
    settings: ColouredTreeSettings,
}

impl ArenaColouredTree {
    #[must_use]
    pub fn settings(&self) -> &ColouredTreeSettings {
        &self.settings
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Checks the structural and colouring invariants of the whole tree.
    ///
    /// # Errors
    ///
    /// Returns the first `ArenaColouredTreeError` found, if any:
    /// - links between parents and children are not mirrored
    /// - a node lies above its parent
    /// - change times are not strictly increasing inside their branch
    /// - a branch's final colour differs from its parent's colour
    /// - the root carries changes or is not the only parentless node
    pub fn validate(&self) -> Result<(), ArenaColouredTreeError> {
        let roots = self.nodes.iter().filter(|node| node.parent.is_none()).count();

        if roots != 1 || self.nodes[self.root.get()].parent.is_some() {
            return Err(ArenaColouredTreeError::RootCount { count: roots });
        }

        for (index, node) in self.nodes.iter().enumerate() {
            let node_index = NodeIndex::new(index);

            if let Some(children) = node.children {
                for child in children {
                    if self.nodes[child.get()].parent != Some(node_index) {
                        return Err(ArenaColouredTreeError::BrokenLink {
                            parent: node_index,
                            child,
                        });
                    }
                }
            }

            let parent = match node.parent {
                Some(parent) => parent,
                None if node.changes.is_empty() => continue,
                None => return Err(ArenaColouredTreeError::RootChanges(node_index)),
            };
            let parent_node = &self.nodes[parent.get()];

            if !parent_node
                .children
                .map_or(false, |children| children.contains(&node_index))
            {
                return Err(ArenaColouredTreeError::BrokenLink {
                    parent,
                    child: node_index,
                });
            }

            if node.height > parent_node.height {
                return Err(ArenaColouredTreeError::ChildAboveParent {
                    child: node_index,
                    child_height: node.height.get(),
                    parent,
                    parent_height: parent_node.height.get(),
                });
            }

            let mut previous = node.height;

            for change in &node.changes {
                if change.time() <= previous || change.time() >= parent_node.height {
                    return Err(ArenaColouredTreeError::ChangeOutsideBranch {
                        node: node_index,
                        time: change.time().get(),
                    });
                }

                previous = change.time();
            }

            let found = node
                .changes
                .last()
                .map_or(node.colour, ChangeEvent::colour);

            if found != parent_node.colour {
                return Err(ArenaColouredTreeError::ColourMismatch {
                    node: node_index,
                    found,
                    expected: parent_node.colour,
                });
            }
        }

        Ok(())
    }

    /// Total number of colour changes over all branches.
    #[must_use]
    pub fn total_change_count(&self) -> usize {
        self.nodes.iter().map(|node| node.changes.len()).sum()
    }
}

impl Backup for ArenaColouredTree {
    fn backup_state(&self) -> Self {
        self.clone()
    }
}

#[contract_trait]
impl ColouredTree for ArenaColouredTree {
    #[must_use]
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    fn node(&self, index: usize) -> NodeIndex {
        NodeIndex::new(index)
    }

    #[must_use]
    fn root(&self) -> NodeIndex {
        self.root
    }

    #[must_use]
    fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.nodes[node.get()].parent
    }

    #[must_use]
    fn left_child(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.nodes[node.get()].children.map(|[left, _]| left)
    }

    #[must_use]
    fn right_child(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.nodes[node.get()].children.map(|[_, right]| right)
    }

    #[must_use]
    fn height(&self, node: NodeIndex) -> NonNegativeF64 {
        self.nodes[node.get()].height
    }

    fn set_height(&mut self, node: NodeIndex, height: NonNegativeF64) {
        self.nodes[node.get()].height = height;
    }

    fn relink(&mut self, parent: NodeIndex, old_child: NodeIndex, new_child: NodeIndex) {
        if let Some(children) = &mut self.nodes[parent.get()].children {
            for child in children.iter_mut().filter(|child| **child == old_child) {
                *child = new_child;
            }
        }

        self.nodes[new_child.get()].parent = Some(parent);
    }

    #[must_use]
    fn colour(&self, node: NodeIndex) -> Colour {
        self.nodes[node.get()].colour
    }

    #[must_use]
    fn changes(&self, node: NodeIndex) -> &[ChangeEvent] {
        &self.nodes[node.get()].changes
    }

    fn add_change(&mut self, node: NodeIndex, change: ChangeEvent) {
        self.nodes[node.get()].changes.push(change);
    }

    fn clear_changes(&mut self, node: NodeIndex) {
        self.nodes[node.get()].changes.clear();
    }

    #[must_use]
    fn discard_when_max_exceeded(&self) -> bool {
        self.settings.discard_when_max_exceeded
    }

    #[must_use]
    fn max_branch_changes(&self) -> usize {
        self.settings.max_branch_changes
    }
}
