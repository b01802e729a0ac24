use alloc::string::ToString;

use crate::{
    Felt, FieldDeserializationError, MerkleWitnessError, ZERO,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    hash::merge_nodes,
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// MEMBERSHIP WITNESS
// ================================================================================================

/// The authentication path of a leaf in a binary Merkle tree of height `HEIGHT`.
///
/// `sibling_path[0]` is the sibling of the leaf and `sibling_path[HEIGHT - 1]` is the child of the
/// root which is not on the path. The bits of `leaf_index`, least significant first, select
/// whether the running node is a left (0) or a right (1) child at each level.
///
/// # Field layout
///
/// ```text
/// [leaf_index, sibling_path[0], ..., sibling_path[HEIGHT - 1]]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipWitness<const HEIGHT: usize> {
    leaf_index: u64,
    sibling_path: [Felt; HEIGHT],
}

impl<const HEIGHT: usize> MembershipWitness<HEIGHT> {
    /// Returns a new [MembershipWitness] for the leaf at `leaf_index`.
    ///
    /// # Errors
    /// Returns an error if `leaf_index` does not address a leaf of a tree of height `HEIGHT`.
    pub fn new(leaf_index: u64, sibling_path: [Felt; HEIGHT]) -> Result<Self, MerkleWitnessError> {
        if HEIGHT < u64::BITS as usize && leaf_index >> HEIGHT != 0 {
            return Err(MerkleWitnessError::LeafIndexOutOfRange { leaf_index, height: HEIGHT });
        }
        Ok(Self { leaf_index, sibling_path })
    }

    pub fn leaf_index(&self) -> u64 {
        self.leaf_index
    }

    pub fn sibling_path(&self) -> &[Felt; HEIGHT] {
        &self.sibling_path
    }

    /// Returns the root of the tree obtained by placing `leaf_hash` at the witnessed index.
    pub fn compute_root(&self, leaf_hash: Felt) -> Felt {
        let mut index = self.leaf_index;
        let mut node = leaf_hash;
        for sibling in self.sibling_path.iter() {
            node = if index & 1 == 0 {
                merge_nodes(node, *sibling)
            } else {
                merge_nodes(*sibling, node)
            };
            index >>= 1;
        }
        node
    }

    /// Checks that `leaf_hash` is the leaf at the witnessed index of the tree with the given
    /// `root`.
    ///
    /// # Errors
    /// Returns an error if the root computed from the path differs from `root`.
    pub fn verify(&self, leaf_hash: Felt, root: Felt) -> Result<(), MerkleWitnessError> {
        let computed = self.compute_root(leaf_hash);
        if computed != root {
            return Err(MerkleWitnessError::RootMismatch { expected: root, computed });
        }
        Ok(())
    }
}

impl<const HEIGHT: usize> Empty for MembershipWitness<HEIGHT> {
    fn empty() -> Self {
        Self { leaf_index: 0, sibling_path: [ZERO; HEIGHT] }
    }

    fn is_empty(&self) -> bool {
        self.leaf_index == 0 && self.sibling_path.iter().all(|node| *node == ZERO)
    }
}

// SERIALIZATION
// ================================================================================================

impl<const HEIGHT: usize> FieldSerializable for MembershipWitness<HEIGHT> {
    const NUM_FIELDS: usize = 1 + HEIGHT;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_u64(self.leaf_index);
        target.write(&self.sibling_path);
    }
}

impl<const HEIGHT: usize> FieldDeserializable for MembershipWitness<HEIGHT> {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        let leaf_index = source.read_u64()?;
        let sibling_path = source.read_array::<Felt, HEIGHT>()?;
        Self::new(leaf_index, sibling_path)
            .map_err(|err| FieldDeserializationError::InvalidStruct(err.to_string()))
    }
}

impl<const HEIGHT: usize> Serializable for MembershipWitness<HEIGHT> {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_u64(self.leaf_index);
        for node in self.sibling_path.iter() {
            node.write_into(target);
        }
    }
}

impl<const HEIGHT: usize> Deserializable for MembershipWitness<HEIGHT> {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let leaf_index = source.read_u64()?;
        let mut sibling_path = [ZERO; HEIGHT];
        for node in sibling_path.iter_mut() {
            *node = Felt::read_from(source)?;
        }
        Self::new(leaf_index, sibling_path)
            .map_err(|err| DeserializationError::InvalidValue(err.to_string()))
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::ONE;

    fn leaves() -> [Felt; 4] {
        [Felt::new(10), Felt::new(11), Felt::new(12), Felt::new(13)]
    }

    fn root() -> Felt {
        let [a, b, c, d] = leaves();
        merge_nodes(merge_nodes(a, b), merge_nodes(c, d))
    }

    #[test]
    fn verifies_every_leaf_of_a_small_tree() {
        let [a, b, c, d] = leaves();
        let witnesses = [
            MembershipWitness::<2>::new(0, [b, merge_nodes(c, d)]).unwrap(),
            MembershipWitness::<2>::new(1, [a, merge_nodes(c, d)]).unwrap(),
            MembershipWitness::<2>::new(2, [d, merge_nodes(a, b)]).unwrap(),
            MembershipWitness::<2>::new(3, [c, merge_nodes(a, b)]).unwrap(),
        ];

        for (witness, leaf) in witnesses.iter().zip(leaves()) {
            witness.verify(leaf, root()).unwrap();
        }
    }

    #[test]
    fn wrong_leaf_does_not_verify() {
        let [_, b, c, d] = leaves();
        let witness = MembershipWitness::<2>::new(0, [b, merge_nodes(c, d)]).unwrap();

        assert_matches!(
            witness.verify(Felt::new(99), root()),
            Err(MerkleWitnessError::RootMismatch { expected, .. }) if expected == root()
        );
    }

    #[test]
    fn rejects_out_of_range_leaf_index() {
        assert_matches!(
            MembershipWitness::<2>::new(4, [ZERO; 2]),
            Err(MerkleWitnessError::LeafIndexOutOfRange { leaf_index: 4, height: 2 })
        );

        let fields = [Felt::new(4), ZERO, ZERO];
        assert_matches!(
            MembershipWitness::<2>::read_from_fields(&fields),
            Err(FieldDeserializationError::InvalidStruct(_))
        );
    }

    #[test]
    fn field_and_byte_forms() {
        let witness = MembershipWitness::<3>::new(5, [ONE, Felt::new(2), Felt::new(3)]).unwrap();
        let fields = witness.to_fields();

        assert_eq!(fields, vec![Felt::new(5), ONE, Felt::new(2), Felt::new(3)]);
        assert_eq!(MembershipWitness::<3>::read_from_fields(&fields).unwrap(), witness);
        assert_eq!(MembershipWitness::<3>::read_from_bytes(&witness.to_bytes()).unwrap(), witness);
        assert!(MembershipWitness::<3>::empty().is_empty());
    }
}
