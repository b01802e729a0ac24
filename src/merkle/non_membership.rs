use super::{IndexedTreeLeafPreimage, MembershipWitness};
use crate::{
    Felt, FieldDeserializationError, MerkleWitnessError,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// NON MEMBERSHIP HINT
// ================================================================================================

/// A proof that a key is absent from an indexed tree.
///
/// The hint carries the low leaf of the absent key together with the leaf's membership witness.
/// The key is absent if the low leaf is in the tree, the low leaf's key is less than the target,
/// and the low leaf's successor key is greater than the target (or the low leaf is the last leaf).
///
/// # Field layout
///
/// ```text
/// [membership_witness (1 + HEIGHT), leaf_preimage (P::NUM_FIELDS)]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonMembershipHint<const HEIGHT: usize, P> {
    membership_witness: MembershipWitness<HEIGHT>,
    leaf_preimage: P,
}

impl<const HEIGHT: usize, P: IndexedTreeLeafPreimage> NonMembershipHint<HEIGHT, P> {
    pub fn new(membership_witness: MembershipWitness<HEIGHT>, leaf_preimage: P) -> Self {
        Self { membership_witness, leaf_preimage }
    }

    pub fn membership_witness(&self) -> &MembershipWitness<HEIGHT> {
        &self.membership_witness
    }

    pub fn leaf_preimage(&self) -> &P {
        &self.leaf_preimage
    }

    /// Checks that `target` is not a key of the indexed tree with the given `root`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The low leaf is not a member of the tree.
    /// - The low leaf's key is not less than `target`.
    /// - The low leaf has a successor whose key is not greater than `target`.
    pub fn verify(&self, target: Felt, root: Felt) -> Result<(), MerkleWitnessError> {
        self.membership_witness.verify(self.leaf_preimage.hash(), root)?;

        let low_key = self.leaf_preimage.key();
        if low_key.as_int() >= target.as_int() {
            return Err(MerkleWitnessError::LowLeafKeyNotLess { low_key, target });
        }

        let next_key = self.leaf_preimage.next_key();
        if !self.leaf_preimage.is_last() && next_key.as_int() <= target.as_int() {
            return Err(MerkleWitnessError::LowLeafNextKeyNotGreater { next_key, target });
        }

        Ok(())
    }
}

impl<const HEIGHT: usize, P: Empty + PartialEq> Empty for NonMembershipHint<HEIGHT, P> {
    fn empty() -> Self {
        Self {
            membership_witness: MembershipWitness::empty(),
            leaf_preimage: P::empty(),
        }
    }

    fn is_empty(&self) -> bool {
        self.membership_witness.is_empty() && self.leaf_preimage.is_empty()
    }
}

// SERIALIZATION
// ================================================================================================

impl<const HEIGHT: usize, P: FieldSerializable> FieldSerializable for NonMembershipHint<HEIGHT, P> {
    const NUM_FIELDS: usize = MembershipWitness::<HEIGHT>::NUM_FIELDS + P::NUM_FIELDS;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.membership_witness);
        target.write(&self.leaf_preimage);
    }
}

impl<const HEIGHT: usize, P: FieldDeserializable> FieldDeserializable
    for NonMembershipHint<HEIGHT, P>
{
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        let membership_witness = source.read()?;
        let leaf_preimage = source.read()?;
        Ok(Self { membership_witness, leaf_preimage })
    }
}

impl<const HEIGHT: usize, P: Serializable> Serializable for NonMembershipHint<HEIGHT, P> {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.membership_witness.write_into(target);
        self.leaf_preimage.write_into(target);
    }
}

impl<const HEIGHT: usize, P: Deserializable> Deserializable for NonMembershipHint<HEIGHT, P> {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let membership_witness = MembershipWitness::read_from(source)?;
        let leaf_preimage = P::read_from(source)?;
        Ok(Self { membership_witness, leaf_preimage })
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{merkle::NullifierLeafPreimage, testing::IndexedTree};

    fn tree_with_5_and_20() -> IndexedTree<NullifierLeafPreimage, 4> {
        let mut tree = IndexedTree::new();
        tree.insert(Felt::new(5));
        tree.insert(Felt::new(20));
        tree
    }

    #[test]
    fn low_leaf_of_12_is_5() {
        let tree = tree_with_5_and_20();
        let hint = tree.non_membership_hint(Felt::new(12)).unwrap();

        assert_eq!(hint.leaf_preimage().key(), Felt::new(5));
        assert_eq!(hint.leaf_preimage().next_key(), Felt::new(20));
        hint.verify(Felt::new(12), tree.root()).unwrap();
    }

    #[test]
    fn leaf_20_is_not_a_low_leaf_for_12() {
        let tree = tree_with_5_and_20();
        let hint = NonMembershipHint::new(
            tree.membership_witness(Felt::new(20)).unwrap(),
            *tree.leaf(Felt::new(20)).unwrap(),
        );

        assert_matches!(
            hint.verify(Felt::new(12), tree.root()),
            Err(MerkleWitnessError::LowLeafKeyNotLess { low_key, .. }) if low_key == Felt::new(20)
        );
    }

    #[test]
    fn leaf_5_is_not_a_low_leaf_for_30() {
        let tree = tree_with_5_and_20();
        let hint = NonMembershipHint::new(
            tree.membership_witness(Felt::new(5)).unwrap(),
            *tree.leaf(Felt::new(5)).unwrap(),
        );

        assert_matches!(
            hint.verify(Felt::new(30), tree.root()),
            Err(MerkleWitnessError::LowLeafNextKeyNotGreater { next_key, .. })
                if next_key == Felt::new(20)
        );
    }

    #[test]
    fn forged_leaf_is_rejected() {
        let tree = tree_with_5_and_20();
        let hint = tree.non_membership_hint(Felt::new(12)).unwrap();
        let forged = NonMembershipHint::new(
            *hint.membership_witness(),
            NullifierLeafPreimage::new(Felt::new(5), Felt::new(30), 2),
        );

        assert_matches!(
            forged.verify(Felt::new(25), tree.root()),
            Err(MerkleWitnessError::RootMismatch { .. })
        );
    }

    #[test]
    fn unused_slot_is_not_a_low_leaf() {
        let tree = tree_with_5_and_20();
        let unused_slot = tree.membership_witness_at(3).unwrap();
        let hint = NonMembershipHint::new(unused_slot, NullifierLeafPreimage::empty());

        // 20 is in the tree, 12 is not; neither may be proven absent through an unused slot
        for target in [20, 12] {
            assert_matches!(
                hint.verify(Felt::new(target), tree.root()),
                Err(MerkleWitnessError::RootMismatch { .. })
            );
        }
    }

    #[test]
    fn empty_tree_is_proven_empty_by_its_first_leaf() {
        let tree = IndexedTree::<NullifierLeafPreimage, 4>::new();
        let hint = tree.non_membership_hint(Felt::new(20)).unwrap();

        assert!(hint.leaf_preimage().is_empty());
        assert_eq!(hint.membership_witness().leaf_index(), 0);
        hint.verify(Felt::new(20), tree.root()).unwrap();
    }

    #[test]
    fn field_form_has_declared_length() {
        let hint = tree_with_5_and_20().non_membership_hint(Felt::new(12)).unwrap();
        let fields = hint.to_fields();

        assert_eq!(fields.len(), 1 + 4 + crate::NULLIFIER_LEAF_PREIMAGE_LENGTH);
        assert_eq!(NonMembershipHint::read_from_fields(&fields).unwrap(), hint);
    }
}
