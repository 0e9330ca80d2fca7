use mtt_core::{
    cogs::{BranchRecolourer, ColouredTree, RecolouringError, RngCore, RngSampler},
    tree::{ChangeEvent, NodeIndex},
};
use mtt_core_bond::PositiveF64;

use crate::migration::MigrationModel;

/// Simulates the migration process forward along a branch, from the node
/// up to its parent, without conditioning on the parent's colour.
///
/// The realised history may end in a colour that disagrees with the parent;
/// callers are expected to reject such proposals.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone)]
pub struct ForwardBranchRecolourer {
    model: MigrationModel,
}

impl ForwardBranchRecolourer {
    #[must_use]
    pub fn new(model: MigrationModel) -> Self {
        Self { model }
    }

    #[must_use]
    pub fn model(&self) -> &MigrationModel {
        &self.model
    }
}

impl<T: ColouredTree, G: RngCore> BranchRecolourer<T, G> for ForwardBranchRecolourer {
    fn recolour_branch(
        &self,
        tree: &mut T,
        node: NodeIndex,
        rng: &mut G,
    ) -> Result<f64, RecolouringError> {
        let end = tree
            .parent(node)
            .map(|parent| tree.height(parent))
            .ok_or(RecolouringError::RootBranch { node })?;

        let mut colour = tree.colour(node);

        if !self.model.contains(colour) {
            return Err(RecolouringError::UnknownColour {
                node,
                colour,
                colours: self.model.colour_count(),
            });
        }

        let max_changes = tree.max_branch_changes();

        tree.clear_changes(node);

        let mut time = tree.height(node);
        let mut log_density = 0.0_f64;

        // A colour without outgoing migration keeps the lineage until the parent
        while let Ok(total_rate) = PositiveF64::new(self.model.total_out_rate(colour).get()) {
            let next = time + rng.sample_exponential(total_rate);

            if next >= end {
                log_density -= total_rate.get() * (end.get() - time.get());
                break;
            }

            // A waiting time that vanishes against `time` would need unboundedly
            // many changes before the parent is reached
            if next <= time || tree.change_count(node) >= max_changes {
                return Err(RecolouringError::InfeasibleHistory { node, max_changes });
            }

            let destination = self.model.sample_destination(colour, rng);

            log_density += self.model.rate(colour, destination).get().ln()
                - total_rate.get() * (next.get() - time.get());

            tree.add_change(node, ChangeEvent::new(next, destination));

            time = next;
            colour = destination;
        }

        Ok(log_density)
    }
}
