use crate::cogs::{ColouredTree, RecolouringError, RngCore};

/// A Metropolis-Hastings proposal on a coloured tree.
///
/// `propose` mutates `tree` in place and returns the log Hastings-ratio
/// correction. `f64::NEG_INFINITY` forces the engine to reject, after which
/// the engine restores its own backup of the tree.
#[allow(clippy::module_name_repetitions)]
pub trait TreeOperator<T: ColouredTree, G: RngCore>: core::fmt::Debug {
    #[must_use]
    fn name(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns an `OperatorError` if the chain cannot continue, e.g. if a
    /// recolouring failed under the fatal policy or the tree is too small
    /// for the operator.
    fn propose(&mut self, tree: &mut T, rng: &mut G) -> Result<f64, OperatorError>;
}

#[allow(clippy::module_name_repetitions)]
#[derive(thiserror::Error, displaydoc::Display, Debug, Clone, PartialEq, Eq)]
pub enum OperatorError {
    /// {operator} could not recolour a branch: {source}
    Recolouring {
        operator: &'static str,
        source: RecolouringError,
    },
    /// {operator} needs a tree with at least {required} nodes but got {node_count}
    TreeTooSmall {
        operator: &'static str,
        node_count: usize,
        required: usize,
    },
}
