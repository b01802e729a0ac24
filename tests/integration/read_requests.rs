use core::error::Error;

use assert_matches::assert_matches;
use circuit_objects::{
    Felt, NULLIFIER_TREE_HEIGHT, ReadRequestHintsError, ZERO,
    hash::silo_nullifier,
    hints::{
        LeafDataHint, NullifierMembershipOracle, ReadRequestHintsBuilder, ReadRequestState,
        build_nullifier_non_existent_read_request_hints, verify_non_existent_read_requests,
        verify_read_requests,
    },
    merkle::{NonMembershipHint, NullifierLeafPreimage},
    side_effects::{Nullifier, ReadRequest, ScopedReadRequest, SideEffect},
    testing::IndexedTree,
    types::AztecAddress,
};

const HEIGHT: usize = NULLIFIER_TREE_HEIGHT;

type NullifierTree = IndexedTree<NullifierLeafPreimage, HEIGHT>;

// HELPERS
// ================================================================================================

fn contract() -> AztecAddress {
    AztecAddress::new(Felt::new(0xc0ffee))
}

/// A nullifier tree holding the siloed forms of `nullifiers`.
fn siloed_tree(nullifiers: &[u64]) -> NullifierTree {
    let mut tree = NullifierTree::new();
    for nullifier in nullifiers {
        tree.insert(silo_nullifier(contract(), Felt::new(*nullifier)));
    }
    tree
}

fn read(value: u64, counter: u32) -> ScopedReadRequest {
    ReadRequest::new(Felt::new(value), counter).scope(contract())
}

/// Answers low leaf queries from an in-memory tree.
struct TreeOracle<'a>(&'a NullifierTree);

impl NullifierMembershipOracle<HEIGHT> for TreeOracle<'_> {
    fn low_nullifier_hint(
        &self,
        siloed_nullifier: Felt,
    ) -> Result<NonMembershipHint<HEIGHT, NullifierLeafPreimage>, Box<dyn Error + Send + Sync>> {
        self.0
            .non_membership_hint(siloed_nullifier)
            .ok_or_else(|| "nullifier is in the tree".into())
    }
}

// NON EXISTENT READS
// ================================================================================================

#[test]
fn absent_nullifier_read_is_proven() -> anyhow::Result<()> {
    let tree = siloed_tree(&[5, 20]);
    let reads = [read(12, 3)];

    let hints = build_nullifier_non_existent_read_request_hints::<_, 4, 4, HEIGHT>(
        &TreeOracle(&tree),
        &reads,
        &[],
    )?;

    verify_non_existent_read_requests(&reads, &[], tree.root(), &hints)?;
    Ok(())
}

#[test]
fn absent_nullifier_read_is_checked_against_pending_nullifiers() -> anyhow::Result<()> {
    let tree = siloed_tree(&[5, 20]);
    let reads = [read(12, 9), read(13, 9)];
    let pending = [
        Nullifier::new(silo_nullifier(contract(), Felt::new(30)), 1, ZERO),
        Nullifier::new(silo_nullifier(contract(), Felt::new(2)), 2, ZERO),
    ];

    let hints = build_nullifier_non_existent_read_request_hints::<_, 4, 4, HEIGHT>(
        &TreeOracle(&tree),
        &reads,
        &pending,
    )?;
    let sorted = hints.sorted_pending_values();
    assert!(sorted[0].value().as_int() < sorted[1].value().as_int());

    verify_non_existent_read_requests(&reads, &pending, tree.root(), &hints)?;
    Ok(())
}

#[test]
fn reading_a_settled_nullifier_fails_the_oracle() {
    let tree = siloed_tree(&[5, 20]);

    let result = build_nullifier_non_existent_read_request_hints::<_, 4, 4, HEIGHT>(
        &TreeOracle(&tree),
        &[read(20, 3)],
        &[],
    );
    assert_matches!(result, Err(ReadRequestHintsError::OracleFailed(target, _)) => {
        assert_eq!(target, silo_nullifier(contract(), Felt::new(20)));
    });
}

#[test]
fn reading_a_pending_nullifier_is_rejected() {
    let tree = siloed_tree(&[5, 20]);
    let siloed = silo_nullifier(contract(), Felt::new(12));
    let pending = [Nullifier::new(siloed, 1, ZERO)];

    let result = build_nullifier_non_existent_read_request_hints::<_, 4, 4, HEIGHT>(
        &TreeOracle(&tree),
        &[read(12, 3)],
        &pending,
    );
    assert_matches!(
        result,
        Err(ReadRequestHintsError::NullifierExistsInPendingSet(value)) if value == siloed
    );
}

#[test]
fn hints_do_not_verify_against_another_root() -> anyhow::Result<()> {
    let tree = siloed_tree(&[5, 20]);
    let reads = [read(12, 3)];
    let hints = build_nullifier_non_existent_read_request_hints::<_, 4, 4, HEIGHT>(
        &TreeOracle(&tree),
        &reads,
        &[],
    )?;

    let other = siloed_tree(&[5, 20, 40]);
    assert_matches!(
        verify_non_existent_read_requests(&reads, &[], other.root(), &hints),
        Err(ReadRequestHintsError::NonExistentReadIsMember { index: 0, .. })
    );
    Ok(())
}

// EXISTING READS
// ================================================================================================

#[test]
fn pending_and_settled_reads_are_resolved() -> anyhow::Result<()> {
    let mut tree = NullifierTree::new();
    tree.insert(Felt::new(5));
    tree.insert(Felt::new(20));

    let pending = [Nullifier::new(Felt::new(7), 1, ZERO)];
    let reads = [ReadRequest::new(Felt::new(7), 4), ReadRequest::new(Felt::new(20), 5)];

    let settled_key = Felt::new(20);
    let leaf_data = [LeafDataHint::new(
        tree.membership_witness(settled_key).expect("leaf is in the tree"),
        *tree.leaf(settled_key).expect("leaf is in the tree"),
    )];

    let mut builder = ReadRequestHintsBuilder::<4, 4, 4>::new(reads.len())?;
    builder.add_pending_read_request(0, 0)?;
    builder.add_leaf_data_read_request(1, 0)?;
    let hints = builder.to_hints();

    assert_eq!(hints.read_request_statuses()[0].state(), ReadRequestState::Pending);
    assert_eq!(hints.read_request_statuses()[1].state(), ReadRequestState::Settled);
    assert_eq!(hints.read_request_statuses()[2].state(), ReadRequestState::Nada);

    verify_read_requests(&reads, &pending, &leaf_data, tree.root(), &hints)?;
    Ok(())
}

#[test]
fn unresolved_read_is_rejected() -> anyhow::Result<()> {
    let tree = NullifierTree::new();
    let reads = [ReadRequest::new(Felt::new(7), 4)];
    let leaf_data: [LeafDataHint<HEIGHT, NullifierLeafPreimage>; 0] = [];

    let hints = ReadRequestHintsBuilder::<4, 4, 4>::new(reads.len())?.to_hints();

    assert_matches!(
        verify_read_requests(&reads, &[] as &[Nullifier], &leaf_data, tree.root(), &hints),
        Err(ReadRequestHintsError::UnresolvedReadRequest(0))
    );
    Ok(())
}

#[test]
fn pending_value_emitted_after_the_read_is_rejected() -> anyhow::Result<()> {
    let tree = NullifierTree::new();
    let pending = [Nullifier::new(Felt::new(7), 6, ZERO)];
    let reads = [ReadRequest::new(Felt::new(7), 4)];
    let leaf_data: [LeafDataHint<HEIGHT, NullifierLeafPreimage>; 0] = [];

    let mut builder = ReadRequestHintsBuilder::<4, 4, 4>::new(reads.len())?;
    builder.add_pending_read_request(0, 0)?;

    assert_matches!(
        verify_read_requests(&reads, &pending, &leaf_data, tree.root(), &builder.to_hints()),
        Err(ReadRequestHintsError::PendingValueEmittedLater {
            index: 0,
            read_counter: 4,
            value_counter: 6
        })
    );
    Ok(())
}
