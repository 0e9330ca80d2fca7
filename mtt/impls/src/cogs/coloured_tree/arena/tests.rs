use mtt_core::{
    cogs::{Backup, ColouredTree},
    tree::{ChangeEvent, Colour, NodeIndex},
};
use mtt_core_bond::NonNegativeF64;

use super::{
    error::ArenaColouredTreeError, ArenaColouredTree, ArenaColouredTreeBuilder,
    ColouredTreeSettings,
};

fn nn(value: f64) -> NonNegativeF64 {
    NonNegativeF64::new(value).unwrap()
}

const A: NodeIndex = NodeIndex::new(0);
const B: NodeIndex = NodeIndex::new(1);
const C: NodeIndex = NodeIndex::new(2);
const N: NodeIndex = NodeIndex::new(3);
const R: NodeIndex = NodeIndex::new(4);

// R(10, c1) -> [N(5, c0) -> {A(0, c0), B(0, c0)}, C(0, c1)]
// with a switch to c1 at 7.0 on the branch above N
fn two_colour_builder() -> ArenaColouredTreeBuilder {
    let mut builder = ArenaColouredTreeBuilder::new(ColouredTreeSettings::default());

    let a = builder.leaf(nn(0.0), Colour::new(0));
    let b = builder.leaf(nn(0.0), Colour::new(0));
    let c = builder.leaf(nn(0.0), Colour::new(1));
    let n = builder.internal(nn(5.0), Colour::new(0), a, b).unwrap();
    builder.internal(nn(10.0), Colour::new(1), n, c).unwrap();

    builder
}

fn two_colour_tree() -> ArenaColouredTree {
    let mut builder = two_colour_builder();
    builder.change(N, nn(7.0), Colour::new(1)).unwrap();
    builder.build().unwrap()
}

#[test]
fn builds_a_linked_tree() {
    let tree = two_colour_tree();

    assert_eq!(tree.node_count(), 5);
    assert_eq!(tree.root(), R);
    assert!(tree.is_root(R));
    assert!(tree.is_leaf(A) && tree.is_leaf(C));
    assert!(!tree.is_leaf(N));

    assert_eq!(tree.parent(A), Some(N));
    assert_eq!(tree.parent(N), Some(R));
    assert_eq!(tree.left_child(R), Some(N));
    assert_eq!(tree.right_child(R), Some(C));
    assert_eq!(tree.left_child(A), None);

    assert_eq!(tree.height(N), 5.0_f64);
    assert_eq!(tree.colour(C), Colour::new(1));
    assert_eq!(tree.max_branch_changes(), 100);
    assert!(tree.discard_when_max_exceeded());
}

#[test]
fn branch_queries_follow_the_changes() {
    let tree = two_colour_tree();

    assert_eq!(tree.change_count(N), 1);
    assert_eq!(tree.change_time(N, 0), Some(nn(7.0)));
    assert_eq!(tree.change_time(N, 1), None);
    assert_eq!(tree.final_branch_colour(N), Colour::new(1));
    assert_eq!(tree.final_branch_colour(A), Colour::new(0));

    assert_eq!(tree.sibling(N), Some(C));
    assert_eq!(tree.sibling(B), Some(A));
    assert_eq!(tree.sibling(R), None);

    assert_eq!(tree.internal_non_root_nodes(), vec![N]);
}

#[test]
fn builder_rejects_malformed_links() {
    let mut builder = ArenaColouredTreeBuilder::new(ColouredTreeSettings::default());

    let a = builder.leaf(nn(0.0), Colour::new(0));
    let b = builder.leaf(nn(0.0), Colour::new(0));

    assert_eq!(
        builder.internal(nn(1.0), Colour::new(0), a, a),
        Err(ArenaColouredTreeError::DuplicateChild(a))
    );
    assert_eq!(
        builder.internal(nn(1.0), Colour::new(0), a, NodeIndex::new(9)),
        Err(ArenaColouredTreeError::UnknownNode(NodeIndex::new(9)))
    );

    let n = builder.internal(nn(1.0), Colour::new(0), a, b).unwrap();
    let c = builder.leaf(nn(0.0), Colour::new(0));

    assert_eq!(
        builder.internal(nn(2.0), Colour::new(0), a, c).unwrap_err(),
        ArenaColouredTreeError::AlreadyLinked(a)
    );
    assert!(matches!(
        builder.change(NodeIndex::new(9), nn(0.5), Colour::new(1)),
        Err(ArenaColouredTreeError::UnknownNode(_))
    ));

    assert_eq!(
        builder.build(),
        Err(ArenaColouredTreeError::RootCount { count: 2 })
    );
    assert_ne!(n, c);

    assert_eq!(
        ArenaColouredTreeBuilder::default().build(),
        Err(ArenaColouredTreeError::Empty)
    );
}

#[test]
fn builder_rejects_inconsistent_histories() {
    assert_eq!(
        two_colour_builder().build(),
        Err(ArenaColouredTreeError::ColourMismatch {
            node: N,
            found: Colour::new(0),
            expected: Colour::new(1),
        })
    );

    let mut builder = two_colour_builder();
    builder.change(N, nn(12.0), Colour::new(1)).unwrap();
    assert_eq!(
        builder.build(),
        Err(ArenaColouredTreeError::ChangeOutsideBranch {
            node: N,
            time: 12.0,
        })
    );

    let mut builder = two_colour_builder();
    builder
        .change(N, nn(8.0), Colour::new(0))
        .unwrap()
        .change(N, nn(6.0), Colour::new(1))
        .unwrap();
    assert!(matches!(
        builder.build(),
        Err(ArenaColouredTreeError::ChangeOutsideBranch { node: N, .. })
    ));

    let mut builder = ArenaColouredTreeBuilder::new(ColouredTreeSettings::default());
    let a = builder.leaf(nn(3.0), Colour::new(0));
    let b = builder.leaf(nn(0.0), Colour::new(0));
    builder.internal(nn(2.0), Colour::new(0), a, b).unwrap();
    assert!(matches!(
        builder.build(),
        Err(ArenaColouredTreeError::ChildAboveParent { child, .. }) if child == a
    ));
}

#[test]
fn relinking_swaps_subtrees() {
    let mut tree = two_colour_tree();

    tree.relink(N, A, C);
    tree.relink(R, C, A);

    assert_eq!(tree.node_count(), 5);
    assert_eq!(tree.parent(C), Some(N));
    assert_eq!(tree.parent(A), Some(R));
    assert_eq!(tree.left_child(N), Some(C));
    assert_eq!(tree.right_child(R), Some(A));
    assert_eq!(tree.height(A), 0.0_f64);
    assert_eq!(tree.height(N), 5.0_f64);

    // The leaves kept their colours but now hang below the other colour
    assert_eq!(
        tree.validate(),
        Err(ArenaColouredTreeError::ColourMismatch {
            node: A,
            found: Colour::new(0),
            expected: Colour::new(1),
        })
    );
}

#[test]
fn change_mutators_update_the_branch() {
    let mut tree = two_colour_tree();

    tree.clear_changes(N);
    assert_eq!(tree.change_count(N), 0);
    assert!(!tree.is_valid());

    tree.add_change(N, ChangeEvent::new(nn(6.0), Colour::new(2)));
    tree.add_change(N, ChangeEvent::new(nn(9.5), Colour::new(1)));
    assert_eq!(tree.change_count(N), 2);
    assert_eq!(tree.total_change_count(), 2);
    assert!(tree.is_valid());

    tree.set_height(N, nn(6.5));
    assert!(matches!(
        tree.validate(),
        Err(ArenaColouredTreeError::ChangeOutsideBranch { node: N, .. })
    ));
}

#[test]
fn backup_restores_the_tree() {
    let mut tree = two_colour_tree();
    let backup = tree.backup();

    tree.relink(N, A, C);
    tree.relink(R, C, A);
    tree.clear_changes(N);
    assert_ne!(tree, *backup);

    let tree = backup.resume();
    assert_eq!(tree, two_colour_tree());
    assert_eq!(*backup, two_colour_tree());
}

#[test]
fn settings_parse_from_ron() {
    let settings: ColouredTreeSettings = ron::from_str("(max_branch_changes: 3)").unwrap();

    assert_eq!(
        settings,
        ColouredTreeSettings {
            max_branch_changes: 3,
            discard_when_max_exceeded: true,
        }
    );

    let settings: ColouredTreeSettings = ron::from_str("(discard_when_max_exceeded: false)").unwrap();
    assert_eq!(settings.max_branch_changes, 100);
    assert!(!settings.discard_when_max_exceeded);

    assert!(ron::from_str::<ColouredTreeSettings>("(max_changes: 3)").is_err());
}
