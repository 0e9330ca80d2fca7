use mtt_core_bond::NonNegativeF64;

use crate::tree::{ChangeEvent, Colour, NodeIndex};

/// A rooted binary tree whose nodes carry a colour and whose branches carry
/// an ordered history of colour changes.
///
/// The branch of a node is the lineage from the node up to its parent, so
/// every per-branch query is keyed by the node at the lower end.
#[allow(clippy::inline_always, clippy::inline_fn_without_body)]
#[contract_trait]
pub trait ColouredTree: crate::cogs::Backup + core::fmt::Debug {
    #[must_use]
    fn node_count(&self) -> usize;

    #[must_use]
    #[debug_requires(index < self.node_count(), "index is in bounds")]
    #[debug_ensures(ret.get() == index, "node identities are their indices")]
    fn node(&self, index: usize) -> NodeIndex;

    #[must_use]
    #[debug_ensures(self.parent(ret).is_none(), "the root has no parent")]
    fn root(&self) -> NodeIndex;

    #[must_use]
    fn parent(&self, node: NodeIndex) -> Option<NodeIndex>;

    #[must_use]
    fn left_child(&self, node: NodeIndex) -> Option<NodeIndex>;

    #[must_use]
    fn right_child(&self, node: NodeIndex) -> Option<NodeIndex>;

    #[must_use]
    fn height(&self, node: NodeIndex) -> NonNegativeF64;

    #[debug_ensures(self.height(node) == old(height), "updates the height")]
    fn set_height(&mut self, node: NodeIndex, height: NonNegativeF64);

    /// Replaces `old_child` by `new_child` in the child slot of `parent`
    /// and points `new_child` back at `parent`.
    ///
    /// `old_child` keeps its own parent link, so two calls can swap the
    /// attachment points of two subtrees.
    #[debug_requires(
        self.left_child(parent) == Some(old_child) || self.right_child(parent) == Some(old_child),
        "old_child hangs below parent"
    )]
    #[debug_ensures(self.parent(new_child) == Some(parent), "new_child hangs below parent")]
    #[debug_ensures(
        self.node_count() == old(self.node_count()),
        "relinking never creates or destroys nodes"
    )]
    fn relink(&mut self, parent: NodeIndex, old_child: NodeIndex, new_child: NodeIndex);

    #[must_use]
    fn colour(&self, node: NodeIndex) -> Colour;

    /// Colour changes on the branch above `node`, ordered by increasing time.
    #[must_use]
    fn changes(&self, node: NodeIndex) -> &[ChangeEvent];

    #[debug_requires(!self.is_root(node), "the root has no branch to change colour on")]
    #[debug_requires(change.time() > self.height(node), "change happens above the node")]
    #[debug_requires(
        self.changes(node).last().map_or(true, |last| last.time() < change.time()),
        "changes are appended in time order"
    )]
    #[debug_ensures(
        self.changes(node).len() == old(self.changes(node).len()) + 1,
        "appends exactly one change"
    )]
    fn add_change(&mut self, node: NodeIndex, change: ChangeEvent);

    #[debug_ensures(self.changes(node).is_empty(), "removes all changes")]
    fn clear_changes(&mut self, node: NodeIndex);

    /// Whether a recolouring that exceeds [`Self::max_branch_changes`]
    /// should merely reject the proposal instead of aborting the chain.
    #[must_use]
    fn discard_when_max_exceeded(&self) -> bool;

    #[must_use]
    fn max_branch_changes(&self) -> usize;

    #[must_use]
    fn is_root(&self, node: NodeIndex) -> bool {
        self.parent(node).is_none()
    }

    #[must_use]
    fn is_leaf(&self, node: NodeIndex) -> bool {
        self.left_child(node).is_none() && self.right_child(node).is_none()
    }

    #[must_use]
    fn change_count(&self, node: NodeIndex) -> usize {
        self.changes(node).len()
    }

    #[must_use]
    fn change_time(&self, node: NodeIndex, index: usize) -> Option<NonNegativeF64> {
        self.changes(node).get(index).map(ChangeEvent::time)
    }

    /// The colour just below the parent end of the branch above `node`.
    #[must_use]
    fn final_branch_colour(&self, node: NodeIndex) -> Colour {
        self.changes(node)
            .last()
            .map_or_else(|| self.colour(node), ChangeEvent::colour)
    }

    /// The other child of `node`'s parent.
    #[must_use]
    fn sibling(&self, node: NodeIndex) -> Option<NodeIndex> {
        let parent = self.parent(node)?;

        if self.left_child(parent) == Some(node) {
            self.right_child(parent)
        } else {
            self.left_child(parent)
        }
    }

    #[must_use]
    fn internal_non_root_nodes(&self) -> Vec<NodeIndex> {
        (0..self.node_count())
            .map(|index| self.node(index))
            .filter(|node| !self.is_root(*node) && !self.is_leaf(*node))
            .collect()
    }
}
