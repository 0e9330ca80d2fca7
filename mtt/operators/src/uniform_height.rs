use core::num::NonZeroUsize;

use mtt_core::{
    cogs::{ColouredTree, OperatorError, RngCore, RngSampler, TreeOperator},
    tree::{ChangeEvent, NodeIndex},
};
use mtt_core_bond::NonNegativeF64;

use crate::{arguments::UniformHeightArguments, MIN_NODE_COUNT};

/// Moves the height of a random internal non-root node uniformly between
/// the nearest constraints above and below it.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Default)]
pub struct UniformHeight(());

impl UniformHeight {
    #[must_use]
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(_arguments: UniformHeightArguments) -> Self {
        Self(())
    }

    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn name(&self) -> &'static str {
        "uniform height"
    }
}

impl<T: ColouredTree, G: RngCore> TreeOperator<T, G> for UniformHeight {
    fn name(&self) -> &'static str {
        UniformHeight::name(self)
    }

    fn propose(&mut self, tree: &mut T, rng: &mut G) -> Result<f64, OperatorError> {
        let Some(length) = NonZeroUsize::new(internal_non_root_nodes(tree).count()) else {
            return Err(OperatorError::TreeTooSmall {
                operator: self.name(),
                node_count: tree.node_count(),
                required: MIN_NODE_COUNT,
            });
        };

        let index = rng.sample_index(length);

        let Some((node, (lower, upper))) = internal_non_root_nodes(tree)
            .nth(index)
            .and_then(|node| height_bounds(tree, node).map(|bounds| (node, bounds)))
        else {
            unreachable!("{}: candidate {} vanished", self.name(), index);
        };

        assert!(
            lower < upper,
            "{}: empty height interval [{}, {}] for {}",
            self.name(),
            lower,
            upper,
            node
        );

        tree.set_height(node, lower.interpolate(upper, rng.sample_uniform()));

        Ok(0.0_f64)
    }
}

/// Same members and order as [`ColouredTree::internal_non_root_nodes`],
/// without collecting them.
fn internal_non_root_nodes<T: ColouredTree>(tree: &T) -> impl Iterator<Item = NodeIndex> + '_ {
    (0..tree.node_count())
        .map(|index| tree.node(index))
        .filter(|node| !tree.is_root(*node) && !tree.is_leaf(*node))
}

/// The interval a new height for `node` must lie in, or `None` for the root
/// and for leaves.
///
/// The upper bound is the first colour change above `node`, else its
/// parent's height. The lower bound is the latest of the last change on
/// each child's branch, else that child's height.
#[must_use]
#[debug_ensures(
    ret.map_or(true, |(lower, upper)| lower <= tree.height(node) && tree.height(node) <= upper),
    "the current height lies inside its bounds"
)]
pub fn height_bounds<T: ColouredTree>(
    tree: &T,
    node: NodeIndex,
) -> Option<(NonNegativeF64, NonNegativeF64)> {
    let upper = tree
        .change_time(node, 0)
        .or_else(|| tree.parent(node).map(|parent| tree.height(parent)))?;

    let below = |child: NodeIndex| {
        tree.changes(child)
            .last()
            .map_or_else(|| tree.height(child), ChangeEvent::time)
    };

    let lower = below(tree.left_child(node)?).max(below(tree.right_child(node)?));

    Some((lower, upper))
}
