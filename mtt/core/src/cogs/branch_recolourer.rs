use crate::{
    cogs::{ColouredTree, RngCore},
    tree::{Colour, NodeIndex},
};

/// Resamples the migration history on the branch above a node.
///
/// On success the branch's previous changes have been replaced and the log
/// density of the realised history under the proposal kernel is returned.
#[allow(clippy::module_name_repetitions)]
pub trait BranchRecolourer<T: ColouredTree, G: RngCore>: core::fmt::Debug {
    /// # Errors
    ///
    /// Returns `RecolouringError::InfeasibleHistory` if the realised history
    /// needs more than `tree.max_branch_changes()` colour changes. The branch
    /// may then hold a partial history and must be restored by the caller.
    ///
    /// Returns `RecolouringError::RootBranch` if `node` is the root, and
    /// `RecolouringError::UnknownColour` if the node's colour is outside the
    /// recolourer's colour alphabet.
    fn recolour_branch(
        &self,
        tree: &mut T,
        node: NodeIndex,
        rng: &mut G,
    ) -> Result<f64, RecolouringError>;
}

#[allow(clippy::module_name_repetitions)]
#[derive(thiserror::Error, displaydoc::Display, Debug, Clone, PartialEq, Eq)]
pub enum RecolouringError {
    /// the branch above node {node} needs more than {max_changes} colour changes
    InfeasibleHistory { node: NodeIndex, max_changes: usize },
    /// node {node} is the root and has no branch to recolour
    RootBranch { node: NodeIndex },
    /// node {node} has {colour}, which is outside the migration model's {colours} colours
    UnknownColour {
        node: NodeIndex,
        colour: Colour,
        colours: usize,
    },
}

impl RecolouringError {
    /// Infeasible histories are an expected, if rare, outcome of sampling.
    /// All other failures point at a misconfigured model.
    #[must_use]
    pub fn is_infeasible_history(&self) -> bool {
        matches!(self, Self::InfeasibleHistory { .. })
    }
}
