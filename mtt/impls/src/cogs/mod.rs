pub mod branch_recolourer;
pub mod coloured_tree;
pub mod rng;
