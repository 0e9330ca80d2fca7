use mtt_core::{
    cogs::{BranchRecolourer, ColouredTree, RecolouringError, RngCore},
    tree::{Colour, NodeIndex},
};
use mtt_core_bond::NonNegativeF64;
use mtt_impls::cogs::coloured_tree::arena::{
    ArenaColouredTree, ArenaColouredTreeBuilder, ColouredTreeSettings,
};

pub fn nn(value: f64) -> NonNegativeF64 {
    NonNegativeF64::new(value).unwrap()
}

/// `R(10) -> [N1(6) -> [N2(3) -> {A(0), B(0)}, C(0)], D(0)]`, all in colour 0.
///
/// Nodes are indexed `A = 0, B = 1, N2 = 2, C = 3, N1 = 4, D = 5, R = 6`.
pub fn caterpillar(settings: ColouredTreeSettings) -> ArenaColouredTree {
    let mut builder = ArenaColouredTreeBuilder::new(settings);
    let colour = Colour::new(0);

    let a = builder.leaf(nn(0.0), colour);
    let b = builder.leaf(nn(0.0), colour);
    let n2 = builder.internal(nn(3.0), colour, a, b).unwrap();
    let c = builder.leaf(nn(0.0), colour);
    let n1 = builder.internal(nn(6.0), colour, n2, c).unwrap();
    let d = builder.leaf(nn(0.0), colour);
    builder.internal(nn(10.0), colour, n1, d).unwrap();

    builder.build().unwrap()
}

pub const N2: NodeIndex = NodeIndex::new(2);
pub const N1: NodeIndex = NodeIndex::new(4);

/// `R(4) -> {A(0), B(0)}`
pub fn cherry() -> ArenaColouredTree {
    let mut builder = ArenaColouredTreeBuilder::new(ColouredTreeSettings::default());

    let a = builder.leaf(nn(0.0), Colour::new(0));
    let b = builder.leaf(nn(0.0), Colour::new(0));
    builder.internal(nn(4.0), Colour::new(0), a, b).unwrap();

    builder.build().unwrap()
}

/// Every node of `tree` reaches the root without revisiting a node.
pub fn is_acyclic<T: ColouredTree>(tree: &T) -> bool {
    (0..tree.node_count()).all(|index| {
        let mut node = tree.node(index);

        for _ in 0..tree.node_count() {
            match tree.parent(node) {
                Some(parent) => node = parent,
                None => return node == tree.root(),
            }
        }

        false
    })
}

/// Removes all changes and reports a fixed log density.
#[derive(Debug)]
pub struct ClearingRecolourer(pub f64);

impl<T: ColouredTree, G: RngCore> BranchRecolourer<T, G> for ClearingRecolourer {
    fn recolour_branch(
        &self,
        tree: &mut T,
        node: NodeIndex,
        _rng: &mut G,
    ) -> Result<f64, RecolouringError> {
        tree.clear_changes(node);

        Ok(self.0)
    }
}

/// Always fails with the configured error kind.
#[derive(Debug)]
pub enum FailingRecolourer {
    Infeasible,
    UnknownColour,
}

impl<T: ColouredTree, G: RngCore> BranchRecolourer<T, G> for FailingRecolourer {
    fn recolour_branch(
        &self,
        tree: &mut T,
        node: NodeIndex,
        _rng: &mut G,
    ) -> Result<f64, RecolouringError> {
        Err(match self {
            Self::Infeasible => RecolouringError::InfeasibleHistory {
                node,
                max_changes: tree.max_branch_changes(),
            },
            Self::UnknownColour => RecolouringError::UnknownColour {
                node,
                colour: tree.colour(node),
                colours: 0,
            },
        })
    }
}
