use core::num::NonZeroUsize;

use mtt_core::{
    cogs::{BranchRecolourer, ColouredTree, OperatorError, RngCore, RngSampler, TreeOperator},
    tree::NodeIndex,
};

use crate::{
    arguments::{ExchangeMode, SubtreeExchangeArguments},
    MIN_NODE_COUNT,
};


/// Swaps two subtrees and resamples the migration history on the two
/// branches whose parent changed.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct SubtreeExchange<B> {
    mode: ExchangeMode,
    recolourer: B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Exchange {
    src: NodeIndex,
    src_parent: NodeIndex,
    dest: NodeIndex,
    dest_parent: NodeIndex,
}

impl<B> SubtreeExchange<B> {
    #[must_use]
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(arguments: SubtreeExchangeArguments, recolourer: B) -> Self {
        Self {
            mode: arguments.mode,
            recolourer,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self.mode {
            ExchangeMode::Narrow => "narrow subtree exchange",
            ExchangeMode::Wide => "wide subtree exchange",
        }
    }

    #[must_use]
    pub fn mode(&self) -> ExchangeMode {
        self.mode
    }

    #[must_use]
    pub fn recolourer(&self) -> &B {
        &self.recolourer
    }
}

impl<T: ColouredTree, G: RngCore, B: BranchRecolourer<T, G>> TreeOperator<T, G>
    for SubtreeExchange<B>
{
    fn name(&self) -> &'static str {
        SubtreeExchange::name(self)
    }

    fn propose(&mut self, tree: &mut T, rng: &mut G) -> Result<f64, OperatorError> {
        let node_count = match NonZeroUsize::new(tree.node_count()) {
            Some(node_count) if node_count.get() >= MIN_NODE_COUNT => node_count,
            _ => {
                return Err(OperatorError::TreeTooSmall {
                    operator: self.name(),
                    node_count: tree.node_count(),
                    required: MIN_NODE_COUNT,
                })
            },
        };

        let exchange = match self.mode {
            ExchangeMode::Narrow => select_narrow(tree, node_count, rng),
            ExchangeMode::Wide => select_wide(tree, node_count, rng),
        };
        let Exchange {
            src,
            src_parent,
            dest,
            dest_parent,
        } = exchange;

        if tree.height(dest) > tree.height(src_parent) || tree.height(src) > tree.height(dest_parent)
        {
            debug!(
                "{} rejected {:?}: a subtree would lie above its new parent.",
                self.name(),
                exchange
            );

            return Ok(f64::NEG_INFINITY);
        }

        if is_ancestor_or_self(tree, dest, src_parent) || is_ancestor_or_self(tree, src, dest_parent)
        {
            debug!(
                "{} rejected {:?}: a subtree would become its own ancestor.",
                self.name(),
                exchange
            );

            return Ok(f64::NEG_INFINITY);
        }

        tree.relink(src_parent, src, dest);
        tree.relink(dest_parent, dest, src);

        let mut log_hastings_ratio = 0.0_f64;

        for node in [src, dest] {
            match self.recolourer.recolour_branch(tree, node, rng) {
                Ok(log_density) => log_hastings_ratio -= log_density,
                Err(error) if error.is_infeasible_history() && tree.discard_when_max_exceeded() => {
                    warn!("{} discarded {:?}: {}.", self.name(), exchange, error);

                    return Ok(f64::NEG_INFINITY);
                },
                Err(source) => {
                    return Err(OperatorError::Recolouring {
                        operator: self.name(),
                        source,
                    })
                },
            }
        }

        if tree.final_branch_colour(src) != tree.colour(dest_parent)
            || tree.final_branch_colour(dest) != tree.colour(src_parent)
        {
            debug!(
                "{} rejected {:?}: a recoloured branch disagrees with its new parent.",
                self.name(),
                exchange
            );

            return Ok(f64::NEG_INFINITY);
        }

        Ok(log_hastings_ratio)
    }
}

/// Picks a node with a grandparent and the sibling of its parent.
fn select_narrow<T: ColouredTree, G: RngCore>(
    tree: &T,
    node_count: NonZeroUsize,
    rng: &mut G,
) -> Exchange {
    loop {
        let src = tree.node(rng.sample_index(node_count));

        let Some(src_parent) = tree.parent(src) else {
            continue;
        };

        if let (Some(dest), Some(dest_parent)) =
            (tree.sibling(src_parent), tree.parent(src_parent))
        {
            return Exchange {
                src,
                src_parent,
                dest,
                dest_parent,
            };
        }
    }
}

/// Picks two non-root nodes that do not share a parent.
fn select_wide<T: ColouredTree, G: RngCore>(
    tree: &T,
    node_count: NonZeroUsize,
    rng: &mut G,
) -> Exchange {
    let (src, src_parent) = loop {
        let src = tree.node(rng.sample_index(node_count));

        if let Some(src_parent) = tree.parent(src) {
            break (src, src_parent);
        }
    };

    loop {
        let dest = tree.node(rng.sample_index(node_count));

        match tree.parent(dest) {
            Some(dest_parent) if dest != src && dest_parent != src_parent => {
                return Exchange {
                    src,
                    src_parent,
                    dest,
                    dest_parent,
                };
            },
            _ => (),
        }
    }
}

fn is_ancestor_or_self<T: ColouredTree>(tree: &T, ancestor: NodeIndex, node: NodeIndex) -> bool {
    let mut current = Some(node);

    while let Some(node) = current {
        if node == ancestor {
            return true;
        }

        current = tree.parent(node);
    }

    false
}
