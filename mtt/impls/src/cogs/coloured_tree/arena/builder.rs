use mtt_core::tree::{ChangeEvent, Colour, NodeIndex};
use mtt_core_bond::NonNegativeF64;

use super::{error::ArenaColouredTreeError, ArenaColouredTree, ArenaNode, ColouredTreeSettings};

/// Assembles an [`ArenaColouredTree`] bottom-up, children before parents.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Default)]
pub struct ArenaColouredTreeBuilder {
    nodes: Vec<ArenaNode>,
    settings: ColouredTreeSettings,
}

impl ArenaColouredTreeBuilder {
    #[must_use]
    pub fn new(settings: ColouredTreeSettings) -> Self {
        Self {
            nodes: Vec::new(),
            settings,
        }
    }

    pub fn leaf(&mut self, height: NonNegativeF64, colour: Colour) -> NodeIndex {
        self.push(ArenaNode {
            height,
            colour,
            parent: None,
            children: None,
            changes: Vec::new(),
        })
    }

    /// # Errors
    ///
    /// Returns `ArenaColouredTreeError` if either child does not exist yet,
    /// both children are the same node, or a child already has a parent.
    pub fn internal(
        &mut self,
        height: NonNegativeF64,
        colour: Colour,
        left: NodeIndex,
        right: NodeIndex,
    ) -> Result<NodeIndex, ArenaColouredTreeError> {
        if left == right {
            return Err(ArenaColouredTreeError::DuplicateChild(left));
        }

        for child in [left, right] {
            match self.nodes.get(child.get()) {
                None => return Err(ArenaColouredTreeError::UnknownNode(child)),
                Some(node) if node.parent.is_some() => {
                    return Err(ArenaColouredTreeError::AlreadyLinked(child))
                },
                Some(_) => (),
            }
        }

        let parent = self.push(ArenaNode {
            height,
            colour,
            parent: None,
            children: Some([left, right]),
            changes: Vec::new(),
        });

        self.nodes[left.get()].parent = Some(parent);
        self.nodes[right.get()].parent = Some(parent);

        Ok(parent)
    }

    /// Appends a colour change to the branch above `node`.
    ///
    /// # Errors
    ///
    /// Returns `ArenaColouredTreeError::UnknownNode` if `node` does not exist.
    pub fn change(
        &mut self,
        node: NodeIndex,
        time: NonNegativeF64,
        colour: Colour,
    ) -> Result<&mut Self, ArenaColouredTreeError> {
        self.nodes
            .get_mut(node.get())
            .ok_or(ArenaColouredTreeError::UnknownNode(node))?
            .changes
            .push(ChangeEvent::new(time, colour));

        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `ArenaColouredTreeError` if the tree is empty, does not have
    /// exactly one root, or violates [`ArenaColouredTree::validate`].
    pub fn build(self) -> Result<ArenaColouredTree, ArenaColouredTreeError> {
        if self.nodes.is_empty() {
            return Err(ArenaColouredTreeError::Empty);
        }

        let mut roots = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(index, _)| NodeIndex::new(index));

        let root = match (roots.next(), roots.count()) {
            (Some(root), 0) => root,
            (first, rest) => {
                return Err(ArenaColouredTreeError::RootCount {
                    count: usize::from(first.is_some()) + rest,
                })
            },
        };

        let tree = ArenaColouredTree {
            nodes: self.nodes,
            root,
            settings: self.settings,
        };

        tree.validate()?;

        info!(
            "Built a coloured tree with {} nodes and {} colour changes rooted at {}.",
            tree.nodes.len(),
            tree.total_change_count(),
            root
        );

        Ok(tree)
    }

    fn push(&mut self, node: ArenaNode) -> NodeIndex {
        self.nodes.push(node);

        NodeIndex::new(self.nodes.len() - 1)
    }
}
