//! Verification keys of the protocol circuits.
//!
//! A verification key is transmitted in byte form only. Its commitments are kept in the order in
//! which they were inserted since that order is part of both the byte form and the hash.

use alloc::{string::String, vec::Vec};

use crate::{
    Felt,
    codec::{FieldSerializable, FieldWriter},
    hash::{GeneratorIndex, hash_in_domain},
    types::Point,
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// COMMITMENT MAP
// ================================================================================================

/// An insertion-ordered map from commitment labels to curve points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitmentMap {
    entries: Vec<(String, Point)>,
}

impl CommitmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a commitment under `label`.
    ///
    /// If the label is already present its point is replaced in place, keeping the original
    /// position, and the previous point is returned.
    pub fn insert(&mut self, label: impl Into<String>, point: Point) -> Option<Point> {
        let label = label.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, existing)) => Some(core::mem::replace(existing, point)),
            None => {
                self.entries.push((label, point));
                None
            },
        }
    }

    pub fn get(&self, label: &str) -> Option<&Point> {
        self.entries.iter().find(|(existing, _)| existing == label).map(|(_, point)| point)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Point)> {
        self.entries.iter().map(|(label, point)| (label.as_str(), point))
    }
}

impl<L: Into<String>> FromIterator<(L, Point)> for CommitmentMap {
    fn from_iter<I: IntoIterator<Item = (L, Point)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (label, point) in iter {
            map.insert(label, point);
        }
        map
    }
}

impl Serializable for CommitmentMap {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_usize(self.entries.len());
        for (label, point) in self.entries.iter() {
            label.write_into(target);
            point.write_into(target);
        }
    }
}

impl Deserializable for CommitmentMap {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let num_entries = source.read_usize()?;
        let mut map = Self::new();
        for _ in 0..num_entries {
            let label = String::read_from(source)?;
            let point = Point::read_from(source)?;
            if map.insert(label.clone(), point).is_some() {
                return Err(DeserializationError::InvalidValue(format!(
                    "duplicate commitment label {label}"
                )));
            }
        }
        Ok(map)
    }
}

// VERIFICATION KEY
// ================================================================================================

/// The verification key of a circuit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationKey {
    circuit_type: u32,
    circuit_size: u32,
    num_public_inputs: u32,
    commitments: CommitmentMap,
    contains_recursive_proof: bool,
    recursive_proof_public_input_indices: Vec<u32>,
}

impl VerificationKey {
    pub fn new(
        circuit_type: u32,
        circuit_size: u32,
        num_public_inputs: u32,
        commitments: CommitmentMap,
        contains_recursive_proof: bool,
        recursive_proof_public_input_indices: Vec<u32>,
    ) -> Self {
        Self {
            circuit_type,
            circuit_size,
            num_public_inputs,
            commitments,
            contains_recursive_proof,
            recursive_proof_public_input_indices,
        }
    }

    pub fn circuit_type(&self) -> u32 {
        self.circuit_type
    }

    pub fn circuit_size(&self) -> u32 {
        self.circuit_size
    }

    pub fn num_public_inputs(&self) -> u32 {
        self.num_public_inputs
    }

    pub fn commitments(&self) -> &CommitmentMap {
        &self.commitments
    }

    pub fn contains_recursive_proof(&self) -> bool {
        self.contains_recursive_proof
    }

    pub fn recursive_proof_public_input_indices(&self) -> &[u32] {
        &self.recursive_proof_public_input_indices
    }

    /// Returns the hash of this key in the verification key domain.
    ///
    /// The hash covers the commitment points in insertion order but not their labels.
    pub fn hash(&self) -> Felt {
        let mut fields = FieldWriter::with_capacity(
            4 + self.commitments.len() * Point::NUM_FIELDS
                + self.recursive_proof_public_input_indices.len(),
        );
        fields.write_u32(self.circuit_type);
        fields.write_u32(self.circuit_size);
        fields.write_u32(self.num_public_inputs);
        for (_, point) in self.commitments.iter() {
            fields.write(point);
        }
        fields.write_bool(self.contains_recursive_proof);
        for index in self.recursive_proof_public_input_indices.iter() {
            fields.write_u32(*index);
        }

        hash_in_domain(&fields.into_fields(), GeneratorIndex::Vk)
    }
}

impl Serializable for VerificationKey {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_u32(self.circuit_type);
        target.write_u32(self.circuit_size);
        target.write_u32(self.num_public_inputs);
        self.commitments.write_into(target);
        target.write_bool(self.contains_recursive_proof);
        self.recursive_proof_public_input_indices.write_into(target);
    }
}

impl Deserializable for VerificationKey {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let circuit_type = source.read_u32()?;
        let circuit_size = source.read_u32()?;
        let num_public_inputs = source.read_u32()?;
        let commitments = CommitmentMap::read_from(source)?;
        let contains_recursive_proof = source.read_bool()?;
        let recursive_proof_public_input_indices = Vec::<u32>::read_from(source)?;

        if let Some(index) = recursive_proof_public_input_indices
            .iter()
            .find(|index| **index >= num_public_inputs)
        {
            return Err(DeserializationError::InvalidValue(format!(
                "recursive proof public input index {index} exceeds {num_public_inputs}"
            )));
        }

        Ok(Self {
            circuit_type,
            circuit_size,
            num_public_inputs,
            commitments,
            contains_recursive_proof,
            recursive_proof_public_input_indices,
        })
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: u64) -> Point {
        Point::new(Felt::new(x), Felt::new(x + 1), false)
    }

    fn key(commitments: CommitmentMap) -> VerificationKey {
        VerificationKey::new(1, 1 << 16, 12, commitments, true, vec![4, 5])
    }

    #[test]
    fn insertion_order_is_preserved() {
        let map: CommitmentMap = [("Q_M", point(1)), ("Q_C", point(3)), ("ID_1", point(5))]
            .into_iter()
            .collect();

        assert_eq!(map.labels().collect::<Vec<_>>(), vec!["Q_M", "Q_C", "ID_1"]);

        let decoded = CommitmentMap::read_from_bytes(&map.to_bytes()).unwrap();
        assert_eq!(decoded.labels().collect::<Vec<_>>(), vec!["Q_M", "Q_C", "ID_1"]);
    }

    #[test]
    fn replacing_keeps_position() {
        let mut map = CommitmentMap::new();
        map.insert("A", point(1));
        map.insert("B", point(2));

        assert_eq!(map.insert("A", point(9)), Some(point(1)));
        assert_eq!(map.iter().next(), Some(("A", &point(9))));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn hash_depends_on_commitment_order() {
        let forward: CommitmentMap = [("A", point(1)), ("B", point(2))].into_iter().collect();
        let backward: CommitmentMap = [("B", point(2)), ("A", point(1))].into_iter().collect();

        assert_ne!(key(forward.clone()).hash(), key(backward).hash());

        let vk = key(forward);
        assert_eq!(VerificationKey::read_from_bytes(&vk.to_bytes()).unwrap(), vk);
    }

    #[test]
    fn rejects_out_of_range_recursive_indices() {
        let vk = VerificationKey::new(0, 8, 2, CommitmentMap::new(), true, vec![2]);
        assert!(VerificationKey::read_from_bytes(&vk.to_bytes()).is_err());
    }
}
