pub mod backup;
pub use backup::{BackedUp, Backup};

pub mod rng;
pub use rng::{RngCore, RngSampler, SeedableRng};

pub mod coloured_tree;
pub use coloured_tree::ColouredTree;

pub mod branch_recolourer;
pub use branch_recolourer::{BranchRecolourer, RecolouringError};

pub mod tree_operator;
pub use tree_operator::{OperatorError, TreeOperator};
