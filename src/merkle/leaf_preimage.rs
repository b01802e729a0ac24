use crate::{
    Felt, FieldDeserializationError, ZERO,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    hash::{GeneratorIndex, hash_in_domain},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// INDEXED TREE LEAF PREIMAGE
// ================================================================================================

/// The preimage of a leaf of an indexed Merkle tree.
///
/// Leaves of an indexed tree form a linked list sorted by key: every leaf stores the key and the
/// tree index of its successor. The last leaf of the list has a zero `next_key` and `next_index`.
pub trait IndexedTreeLeafPreimage: Empty + FieldSerializable {
    /// The key the list is sorted by.
    fn key(&self) -> Felt;

    fn next_key(&self) -> Felt;

    fn next_index(&self) -> u64;

    /// The value a settled read request resolves against.
    fn value(&self) -> Felt;

    /// Returns the hash of the leaf as it is stored in the tree.
    ///
    /// Unused slots of a tree hold zero, while every preimage, including the empty one, is hashed.
    /// An unused slot can therefore never be presented as a leaf.
    fn hash(&self) -> Felt;

    /// Returns true if this leaf is the low leaf for `target`, i.e. its key is less than `target`
    /// and its successor's key is greater than `target`, or it has no successor.
    fn is_low_leaf_for(&self, target: Felt) -> bool {
        let target = target.as_int();
        self.key().as_int() < target && (self.next_key().as_int() > target || self.is_last())
    }

    /// Returns true if this leaf is the last element of the sorted list.
    fn is_last(&self) -> bool {
        self.next_index() == 0 && self.next_key() == ZERO
    }
}

// NULLIFIER LEAF PREIMAGE
// ================================================================================================

/// A leaf of the nullifier tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NullifierLeafPreimage {
    nullifier: Felt,
    next_nullifier: Felt,
    next_index: u64,
}

impl NullifierLeafPreimage {
    pub fn new(nullifier: Felt, next_nullifier: Felt, next_index: u64) -> Self {
        Self { nullifier, next_nullifier, next_index }
    }

    pub fn nullifier(&self) -> Felt {
        self.nullifier
    }

    pub fn next_nullifier(&self) -> Felt {
        self.next_nullifier
    }
}

impl IndexedTreeLeafPreimage for NullifierLeafPreimage {
    fn key(&self) -> Felt {
        self.nullifier
    }

    fn next_key(&self) -> Felt {
        self.next_nullifier
    }

    fn next_index(&self) -> u64 {
        self.next_index
    }

    fn value(&self) -> Felt {
        self.nullifier
    }

    fn hash(&self) -> Felt {
        hash_in_domain(&self.to_fields(), GeneratorIndex::NullifierLeaf)
    }
}

impl Empty for NullifierLeafPreimage {
    fn empty() -> Self {
        Self {
            nullifier: ZERO,
            next_nullifier: ZERO,
            next_index: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.nullifier == ZERO && self.next_nullifier == ZERO && self.next_index == 0
    }
}

impl FieldSerializable for NullifierLeafPreimage {
    const NUM_FIELDS: usize = crate::NULLIFIER_LEAF_PREIMAGE_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_felt(self.nullifier);
        target.write_felt(self.next_nullifier);
        target.write_u64(self.next_index);
    }
}

impl FieldDeserializable for NullifierLeafPreimage {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            nullifier: source.read_felt()?,
            next_nullifier: source.read_felt()?,
            next_index: source.read_u64()?,
        })
    }
}

impl Serializable for NullifierLeafPreimage {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.nullifier.write_into(target);
        self.next_nullifier.write_into(target);
        target.write_u64(self.next_index);
    }
}

impl Deserializable for NullifierLeafPreimage {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let nullifier = Felt::read_from(source)?;
        let next_nullifier = Felt::read_from(source)?;
        let next_index = source.read_u64()?;
        Ok(Self { nullifier, next_nullifier, next_index })
    }
}

// PUBLIC DATA TREE LEAF PREIMAGE
// ================================================================================================

/// A leaf of the public data tree, mapping a (siloed) storage slot to its current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublicDataTreeLeafPreimage {
    slot: Felt,
    value: Felt,
    next_slot: Felt,
    next_index: u64,
}

impl PublicDataTreeLeafPreimage {
    pub fn new(slot: Felt, value: Felt, next_slot: Felt, next_index: u64) -> Self {
        Self { slot, value, next_slot, next_index }
    }

    pub fn slot(&self) -> Felt {
        self.slot
    }

    pub fn next_slot(&self) -> Felt {
        self.next_slot
    }
}

impl IndexedTreeLeafPreimage for PublicDataTreeLeafPreimage {
    fn key(&self) -> Felt {
        self.slot
    }

    fn next_key(&self) -> Felt {
        self.next_slot
    }

    fn next_index(&self) -> u64 {
        self.next_index
    }

    fn value(&self) -> Felt {
        self.value
    }

    fn hash(&self) -> Felt {
        hash_in_domain(&self.to_fields(), GeneratorIndex::PublicDataLeaf)
    }
}

impl Empty for PublicDataTreeLeafPreimage {
    fn empty() -> Self {
        Self {
            slot: ZERO,
            value: ZERO,
            next_slot: ZERO,
            next_index: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.slot == ZERO && self.value == ZERO && self.next_slot == ZERO && self.next_index == 0
    }
}

impl FieldSerializable for PublicDataTreeLeafPreimage {
    const NUM_FIELDS: usize = crate::PUBLIC_DATA_TREE_LEAF_PREIMAGE_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_felt(self.slot);
        target.write_felt(self.value);
        target.write_felt(self.next_slot);
        target.write_u64(self.next_index);
    }
}

impl FieldDeserializable for PublicDataTreeLeafPreimage {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            slot: source.read_felt()?,
            value: source.read_felt()?,
            next_slot: source.read_felt()?,
            next_index: source.read_u64()?,
        })
    }
}

impl Serializable for PublicDataTreeLeafPreimage {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.slot.write_into(target);
        self.value.write_into(target);
        self.next_slot.write_into(target);
        target.write_u64(self.next_index);
    }
}

impl Deserializable for PublicDataTreeLeafPreimage {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let slot = Felt::read_from(source)?;
        let value = Felt::read_from(source)?;
        let next_slot = Felt::read_from(source)?;
        let next_index = source.read_u64()?;
        Ok(Self { slot, value, next_slot, next_index })
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::between_keys(NullifierLeafPreimage::new(Felt::new(5), Felt::new(20), 1), 12, true)]
    #[case::equal_to_key(NullifierLeafPreimage::new(Felt::new(5), Felt::new(20), 1), 5, false)]
    #[case::equal_to_next_key(
        NullifierLeafPreimage::new(Felt::new(5), Felt::new(20), 1),
        20,
        false
    )]
    #[case::above_next_key(NullifierLeafPreimage::new(Felt::new(5), Felt::new(20), 1), 21, false)]
    #[case::last_leaf(NullifierLeafPreimage::new(Felt::new(20), ZERO, 0), 100, true)]
    #[case::below_last_leaf(NullifierLeafPreimage::new(Felt::new(20), ZERO, 0), 12, false)]
    fn low_leaf_selection(
        #[case] leaf: NullifierLeafPreimage,
        #[case] target: u64,
        #[case] expected: bool,
    ) {
        assert_eq!(leaf.is_low_leaf_for(Felt::new(target)), expected);
    }

    #[test]
    fn leaf_hashes_are_domain_separated() {
        let nullifier_leaf = NullifierLeafPreimage::new(Felt::new(1), Felt::new(2), 3);
        let public_data_leaf =
            PublicDataTreeLeafPreimage::new(Felt::new(1), Felt::new(2), Felt::new(3), 0);

        assert_ne!(nullifier_leaf.hash(), ZERO);
        assert_ne!(NullifierLeafPreimage::empty().hash(), ZERO);
        assert_ne!(PublicDataTreeLeafPreimage::empty().hash(), ZERO);
        assert_ne!(
            nullifier_leaf.hash(),
            hash_in_domain(&nullifier_leaf.to_fields(), GeneratorIndex::PublicDataLeaf)
        );
        assert_eq!(public_data_leaf.value(), Felt::new(2));
        assert_eq!(
            public_data_leaf.to_fields().len(),
            crate::PUBLIC_DATA_TREE_LEAF_PREIMAGE_LENGTH
        );
    }
}
