use alloc::{boxed::Box, vec::Vec};
use core::error::Error;

use crate::{
    Felt, FieldDeserializationError, ReadRequestHintsError, ZERO,
    codec::{
        BoundedArray, Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter,
    },
    merkle::{NonMembershipHint, NullifierLeafPreimage},
    side_effects::{Nullifier, ScopedReadRequest, SideEffect},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

type NullifierNonMembershipHint<const HEIGHT: usize> =
    NonMembershipHint<HEIGHT, NullifierLeafPreimage>;

// NULLIFIER MEMBERSHIP ORACLE
// ================================================================================================

/// Provides low-leaf hints from the nullifier tree of the block a transaction is built against.
pub trait NullifierMembershipOracle<const HEIGHT: usize> {
    /// Returns the low leaf of `siloed_nullifier` and its membership witness.
    ///
    /// # Errors
    /// Returns an error if the nullifier is in the tree or the tree cannot be queried.
    fn low_nullifier_hint(
        &self,
        siloed_nullifier: Felt,
    ) -> Result<NullifierNonMembershipHint<HEIGHT>, Box<dyn Error + Send + Sync + 'static>>;
}

// NULLIFIER NON EXISTENT READ REQUEST HINTS
// ================================================================================================

/// Hints proving that up to `R` siloed nullifiers exist neither in the nullifier tree nor among
/// the up to `P` nullifiers emitted so far in the transaction.
///
/// - `non_membership_hints[i]` proves absence from the tree of the i-th non-empty read request.
/// - `sorted_pending_values` holds the pending nullifiers sorted by value, empty ones last.
/// - `sorted_pending_value_index_hints[j]` is the position of the j-th pending nullifier in
///   `sorted_pending_values`.
/// - `next_pending_value_indices[i]` is the position in `sorted_pending_values` of the smallest
///   pending nullifier greater than the i-th read, or the number of pending nullifiers if there is
///   none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullifierNonExistentReadRequestHints<const R: usize, const P: usize, const HEIGHT: usize>
{
    non_membership_hints: BoundedArray<NullifierNonMembershipHint<HEIGHT>, R>,
    sorted_pending_values: BoundedArray<Nullifier, P>,
    sorted_pending_value_index_hints: BoundedArray<u32, P>,
    next_pending_value_indices: BoundedArray<u32, R>,
}

impl<const R: usize, const P: usize, const HEIGHT: usize>
    NullifierNonExistentReadRequestHints<R, P, HEIGHT>
{
    pub fn non_membership_hints(&self) -> &BoundedArray<NullifierNonMembershipHint<HEIGHT>, R> {
        &self.non_membership_hints
    }

    pub fn sorted_pending_values(&self) -> &BoundedArray<Nullifier, P> {
        &self.sorted_pending_values
    }

    pub fn sorted_pending_value_index_hints(&self) -> &BoundedArray<u32, P> {
        &self.sorted_pending_value_index_hints
    }

    pub fn next_pending_value_indices(&self) -> &BoundedArray<u32, R> {
        &self.next_pending_value_indices
    }
}

impl<const R: usize, const P: usize, const HEIGHT: usize> FieldSerializable
    for NullifierNonExistentReadRequestHints<R, P, HEIGHT>
{
    const NUM_FIELDS: usize = BoundedArray::<NullifierNonMembershipHint<HEIGHT>, R>::NUM_FIELDS
        + BoundedArray::<Nullifier, P>::NUM_FIELDS
        + BoundedArray::<u32, P>::NUM_FIELDS
        + BoundedArray::<u32, R>::NUM_FIELDS;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.non_membership_hints);
        target.write(&self.sorted_pending_values);
        target.write(&self.sorted_pending_value_index_hints);
        target.write(&self.next_pending_value_indices);
    }
}

impl<const R: usize, const P: usize, const HEIGHT: usize> FieldDeserializable
    for NullifierNonExistentReadRequestHints<R, P, HEIGHT>
{
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            non_membership_hints: source.read()?,
            sorted_pending_values: source.read()?,
            sorted_pending_value_index_hints: source.read()?,
            next_pending_value_indices: source.read()?,
        })
    }
}

impl<const R: usize, const P: usize, const HEIGHT: usize> Serializable
    for NullifierNonExistentReadRequestHints<R, P, HEIGHT>
{
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.non_membership_hints.write_into(target);
        self.sorted_pending_values.write_into(target);
        self.sorted_pending_value_index_hints.write_into(target);
        self.next_pending_value_indices.write_into(target);
    }
}

impl<const R: usize, const P: usize, const HEIGHT: usize> Deserializable
    for NullifierNonExistentReadRequestHints<R, P, HEIGHT>
{
    fn read_from<Rd: ByteReader>(source: &mut Rd) -> Result<Self, DeserializationError> {
        Ok(Self {
            non_membership_hints: BoundedArray::read_from(source)?,
            sorted_pending_values: BoundedArray::read_from(source)?,
            sorted_pending_value_index_hints: BoundedArray::read_from(source)?,
            next_pending_value_indices: BoundedArray::read_from(source)?,
        })
    }
}

// BUILDER
// ================================================================================================

/// Incrementally builds [NullifierNonExistentReadRequestHints].
#[derive(Debug, Clone)]
pub struct NullifierNonExistentReadRequestHintsBuilder<
    const R: usize,
    const P: usize,
    const HEIGHT: usize,
> {
    non_membership_hints: Vec<NullifierNonMembershipHint<HEIGHT>>,
    next_pending_value_indices: Vec<u32>,
    sorted_pending_values: Vec<Nullifier>,
    sorted_pending_value_index_hints: Vec<u32>,
    num_pending: usize,
}

impl<const R: usize, const P: usize, const HEIGHT: usize>
    NullifierNonExistentReadRequestHintsBuilder<R, P, HEIGHT>
{
    /// Returns a builder for reads checked against `pending_nullifiers`, whose values must already
    /// be siloed.
    ///
    /// # Errors
    /// Returns an error if more than `P` pending nullifiers are provided.
    pub fn new(pending_nullifiers: &[Nullifier]) -> Result<Self, ReadRequestHintsError> {
        if pending_nullifiers.len() > P {
            return Err(ReadRequestHintsError::CapacityExceeded {
                kind: "pending nullifier",
                capacity: P,
            });
        }

        let mut padded: Vec<Nullifier> = pending_nullifiers.to_vec();
        padded.resize(P, Nullifier::empty());

        let mut order: Vec<usize> = (0..P).collect();
        order.sort_by_key(|&i| (padded[i].is_empty(), padded[i].value().as_int()));

        let mut sorted_pending_value_index_hints = vec![0u32; P];
        for (sorted_index, &original_index) in order.iter().enumerate() {
            sorted_pending_value_index_hints[original_index] = sorted_index as u32;
        }

        let num_pending = padded.iter().filter(|nullifier| !nullifier.is_empty()).count();
        let sorted_pending_values = order.into_iter().map(|i| padded[i]).collect();

        Ok(Self {
            non_membership_hints: Vec::new(),
            next_pending_value_indices: Vec::new(),
            sorted_pending_values,
            sorted_pending_value_index_hints,
            num_pending,
        })
    }

    /// Records the hints proving that `target` does not exist.
    ///
    /// # Errors
    /// Returns an error if `R` hints were already added or `target` is one of the pending
    /// nullifiers.
    pub fn add_hint(
        &mut self,
        non_membership_hint: NullifierNonMembershipHint<HEIGHT>,
        target: Felt,
    ) -> Result<(), ReadRequestHintsError> {
        if self.non_membership_hints.len() == R {
            return Err(ReadRequestHintsError::CapacityExceeded {
                kind: "nullifier non-existent read",
                capacity: R,
            });
        }

        let next_pending_value_index = self.sorted_pending_values[..self.num_pending]
            .binary_search_by_key(&target.as_int(), |nullifier| nullifier.value().as_int())
            .err()
            .ok_or(ReadRequestHintsError::NullifierExistsInPendingSet(target))?;

        self.non_membership_hints.push(non_membership_hint);
        self.next_pending_value_indices.push(next_pending_value_index as u32);

        #[cfg(feature = "log")]
        ::log::trace!(
            "Added nullifier non-existent read hint [target={target}, next_pending_value_index={next_pending_value_index}]"
        );

        Ok(())
    }

    pub fn to_hints(&self) -> NullifierNonExistentReadRequestHints<R, P, HEIGHT> {
        let mut hints = self.non_membership_hints.iter().copied();
        let mut next_indices = self.next_pending_value_indices.iter().copied();

        NullifierNonExistentReadRequestHints {
            non_membership_hints: BoundedArray::from_fn(|_| {
                hints.next().unwrap_or_else(NonMembershipHint::empty)
            }),
            sorted_pending_values: BoundedArray::from_fn(|i| self.sorted_pending_values[i]),
            sorted_pending_value_index_hints: BoundedArray::from_fn(|i| {
                self.sorted_pending_value_index_hints[i]
            }),
            next_pending_value_indices: BoundedArray::from_fn(|_| next_indices.next().unwrap_or(0)),
        }
    }
}

// BUILD AND VERIFY
// ================================================================================================

/// Builds the hints proving that none of `read_requests` reads an existing nullifier.
///
/// Every non-empty read request is siloed with its contract address before the oracle is asked
/// for the low leaf; `pending_nullifiers` must hold siloed values.
///
/// # Errors
/// Returns an error if the oracle fails, a read request reads a pending nullifier, or the bounds
/// are exceeded.
pub fn build_nullifier_non_existent_read_request_hints<
    O,
    const R: usize,
    const P: usize,
    const HEIGHT: usize,
>(
    oracle: &O,
    read_requests: &[ScopedReadRequest],
    pending_nullifiers: &[Nullifier],
) -> Result<NullifierNonExistentReadRequestHints<R, P, HEIGHT>, ReadRequestHintsError>
where
    O: NullifierMembershipOracle<HEIGHT>,
{
    let mut builder =
        NullifierNonExistentReadRequestHintsBuilder::<R, P, HEIGHT>::new(pending_nullifiers)?;

    for read_request in read_requests.iter().filter(|read| !read.is_empty()) {
        let target = silo_read(read_request);
        let hint = oracle
            .low_nullifier_hint(target)
            .map_err(|err| ReadRequestHintsError::OracleFailed(target, err))?;
        builder.add_hint(hint, target)?;
    }

    #[cfg(feature = "log")]
    ::log::debug!(
        "Built nullifier non-existent read request hints [num_reads={}, num_pending={}]",
        builder.non_membership_hints.len(),
        builder.num_pending,
    );

    Ok(builder.to_hints())
}

/// Checks that `hints` prove that none of `read_requests` reads a nullifier which exists in the
/// tree with root `nullifier_tree_root` or among `pending_nullifiers`.
///
/// # Errors
/// Returns an error describing the first violated check.
pub fn verify_non_existent_read_requests<const R: usize, const P: usize, const HEIGHT: usize>(
    read_requests: &[ScopedReadRequest],
    pending_nullifiers: &[Nullifier],
    nullifier_tree_root: Felt,
    hints: &NullifierNonExistentReadRequestHints<R, P, HEIGHT>,
) -> Result<(), ReadRequestHintsError> {
    if pending_nullifiers.len() > P {
        return Err(ReadRequestHintsError::CapacityExceeded {
            kind: "pending nullifier",
            capacity: P,
        });
    }

    let sorted = hints.sorted_pending_values.as_slice();

    // the sorted values must be a permutation of the pending values
    for (index, pending) in pending_nullifiers.iter().enumerate() {
        let sorted_index = hints.sorted_pending_value_index_hints[index] as usize;
        let hinted = sorted.get(sorted_index).ok_or(ReadRequestHintsError::HintIndexOutOfBounds {
            kind: "sorted pending values",
            index: sorted_index,
            len: P,
        })?;
        if hinted != pending {
            return Err(ReadRequestHintsError::ValueMismatch {
                index,
                read: pending.value(),
                hinted: hinted.value(),
            });
        }
    }

    let num_pending = sorted.iter().take_while(|nullifier| !nullifier.is_empty()).count();
    for pair in sorted[..num_pending].windows(2) {
        if pair[0].value().as_int() >= pair[1].value().as_int() {
            return Err(ReadRequestHintsError::PendingValueOrderViolated {
                target: pair[1].value(),
                low: pair[0].value(),
                high: pair[1].value(),
            });
        }
    }

    let reads = read_requests.iter().filter(|read| !read.is_empty());
    for (index, read_request) in reads.enumerate() {
        if index >= R {
            return Err(ReadRequestHintsError::ReadRequestIndexOutOfBounds {
                index,
                num_read_requests: R,
            });
        }

        let target = silo_read(read_request);
        hints.non_membership_hints[index]
            .verify(target, nullifier_tree_root)
            .map_err(|source| ReadRequestHintsError::NonExistentReadIsMember { index, source })?;

        let next = hints.next_pending_value_indices[index] as usize;
        if next > num_pending {
            return Err(ReadRequestHintsError::HintIndexOutOfBounds {
                kind: "sorted pending values",
                index: next,
                len: num_pending,
            });
        }

        let low = if next == 0 { None } else { Some(sorted[next - 1].value()) };
        let high = if next == num_pending { None } else { Some(sorted[next].value()) };
        let above_low = low.is_none_or(|low| low.as_int() < target.as_int());
        let below_high = high.is_none_or(|high| target.as_int() < high.as_int());
        if !above_low || !below_high {
            return Err(ReadRequestHintsError::PendingValueOrderViolated {
                target,
                low: low.unwrap_or(ZERO),
                high: high.unwrap_or(ZERO),
            });
        }
    }

    Ok(())
}

fn silo_read(read_request: &ScopedReadRequest) -> Felt {
    crate::hash::silo_nullifier(read_request.contract_address(), read_request.value())
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{
        MerkleWitnessError, hash::silo_nullifier, side_effects::ReadRequest, testing::IndexedTree,
        types::AztecAddress,
    };

    const HEIGHT: usize = 4;
    type Hints = NullifierNonExistentReadRequestHints<2, 4, HEIGHT>;
    type Builder = NullifierNonExistentReadRequestHintsBuilder<2, 4, HEIGHT>;

    fn pending(values: &[u64]) -> Vec<Nullifier> {
        values
            .iter()
            .enumerate()
            .map(|(i, value)| Nullifier::new(Felt::new(*value), i as u32 + 1, ZERO))
            .collect()
    }

    #[test]
    fn sorts_pending_values_with_empties_last() {
        let builder = Builder::new(&pending(&[30, 10, 20])).unwrap();
        let hints = builder.to_hints();

        let sorted: Vec<Felt> = hints.sorted_pending_values().iter().map(|n| n.value()).collect();
        assert_eq!(sorted, vec![Felt::new(10), Felt::new(20), Felt::new(30), ZERO]);
        assert_eq!(hints.sorted_pending_value_index_hints().as_slice(), &[2, 0, 1, 3]);
    }

    #[test]
    fn next_pending_index_points_past_the_target() {
        let tree = IndexedTree::<NullifierLeafPreimage, HEIGHT>::new();
        let mut builder = Builder::new(&pending(&[30, 10, 20])).unwrap();

        builder.add_hint(tree.non_membership_hint(Felt::new(15)).unwrap(), Felt::new(15)).unwrap();
        builder.add_hint(tree.non_membership_hint(Felt::new(35)).unwrap(), Felt::new(35)).unwrap();

        assert_eq!(builder.to_hints().next_pending_value_indices().as_slice(), &[1, 3]);
        assert_matches!(
            builder.add_hint(NonMembershipHint::empty(), Felt::new(1)),
            Err(ReadRequestHintsError::CapacityExceeded { capacity: 2, .. })
        );
    }

    #[test]
    fn pending_nullifier_cannot_be_read_as_non_existent() {
        let mut builder = Builder::new(&pending(&[10, 20])).unwrap();

        assert_matches!(
            builder.add_hint(NonMembershipHint::empty(), Felt::new(20)),
            Err(ReadRequestHintsError::NullifierExistsInPendingSet(value)) if value == Felt::new(20)
        );
    }

    struct TreeOracle(IndexedTree<NullifierLeafPreimage, HEIGHT>);

    impl NullifierMembershipOracle<HEIGHT> for TreeOracle {
        fn low_nullifier_hint(
            &self,
            siloed_nullifier: Felt,
        ) -> Result<NullifierNonMembershipHint<HEIGHT>, Box<dyn Error + Send + Sync + 'static>> {
            self.0.non_membership_hint(siloed_nullifier).ok_or_else(|| "nullifier exists".into())
        }
    }

    #[test]
    fn built_hints_verify() {
        let contract = AztecAddress::from(Felt::new(99));
        let existing = silo_nullifier(contract, Felt::new(1));

        let mut tree = IndexedTree::new();
        tree.insert(existing);
        let root = tree.root();
        let oracle = TreeOracle(tree);

        let reads = [ReadRequest::new(Felt::new(2), 4).scope(contract), ScopedReadRequest::empty()];
        let pending_values = pending(&[7, 3]);

        let hints: Hints =
            build_nullifier_non_existent_read_request_hints(&oracle, &reads, &pending_values)
                .unwrap();
        verify_non_existent_read_requests(&reads, &pending_values, root, &hints).unwrap();

        let existing_read = [ReadRequest::new(Felt::new(1), 4).scope(contract)];
        assert_matches!(
            build_nullifier_non_existent_read_request_hints::<_, 2, 4, HEIGHT>(
                &oracle,
                &existing_read,
                &pending_values
            ),
            Err(ReadRequestHintsError::OracleFailed(value, _)) if value == existing
        );
    }

    #[test]
    fn verification_rejects_wrong_neighbours() {
        let contract = AztecAddress::from(Felt::new(99));
        let tree = IndexedTree::<NullifierLeafPreimage, HEIGHT>::new();
        let reads = [ReadRequest::new(Felt::new(2), 4).scope(contract)];
        let target = silo_nullifier(contract, Felt::new(2));

        // a single pending value, just above the target
        let pending_values = [Nullifier::new(Felt::new(target.as_int() + 1), 1, ZERO)];

        let mut builder = Builder::new(&pending_values).unwrap();
        builder.add_hint(tree.non_membership_hint(target).unwrap(), target).unwrap();
        let hints = builder.to_hints();
        verify_non_existent_read_requests(&reads, &pending_values, tree.root(), &hints).unwrap();

        let mut corrupted = hints.clone();
        corrupted.next_pending_value_indices = BoundedArray::from([1, 0]);
        assert_matches!(
            verify_non_existent_read_requests(&reads, &pending_values, tree.root(), &corrupted),
            Err(ReadRequestHintsError::PendingValueOrderViolated { .. })
        );
    }

    #[test]
    fn settled_nullifier_cannot_be_hidden_behind_an_unused_slot() {
        let contract = AztecAddress::from(Felt::new(99));
        let existing = silo_nullifier(contract, Felt::new(1));
        let mut tree = IndexedTree::<NullifierLeafPreimage, HEIGHT>::new();
        tree.insert(existing);

        let reads = [ReadRequest::new(Felt::new(1), 4).scope(contract)];
        let unused_slot = tree.membership_witness_at(5).unwrap();
        let mut builder = Builder::new(&[]).unwrap();
        builder
            .add_hint(NonMembershipHint::new(unused_slot, NullifierLeafPreimage::empty()), existing)
            .unwrap();

        assert_matches!(
            verify_non_existent_read_requests(&reads, &[], tree.root(), &builder.to_hints()),
            Err(ReadRequestHintsError::NonExistentReadIsMember {
                index: 0,
                source: MerkleWitnessError::RootMismatch { .. }
            })
        );
    }

    #[test]
    fn field_form_has_declared_length() {
        let hints = Builder::new(&pending(&[5])).unwrap().to_hints();
        let expected = 2 * (1 + HEIGHT + 3) + 4 * 3 + 4 + 2;

        assert_eq!(Hints::NUM_FIELDS, expected);
        assert_eq!(Hints::read_from_fields(&hints.to_fields()).unwrap(), hints);
        assert_eq!(Hints::read_from_bytes(&hints.to_bytes()).unwrap(), hints);
    }
}
