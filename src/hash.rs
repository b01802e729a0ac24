//! Domain-separated hashing of field forms.
//!
//! Every struct identity is computed as a hash of its field form prefixed with a domain tag
//! ([GeneratorIndex]) unique to the struct's semantic role. Two structs whose field forms happen
//! to coincide therefore hash differently whenever their roles differ.

use alloc::vec::Vec;

use crate::{Digest, Felt, Hasher, ZERO, codec::FieldSerializable, types::AztecAddress};

// GENERATOR INDEX
// ================================================================================================

/// Domain separation tags.
///
/// The discriminants are part of the protocol: changing one changes every hash computed in that
/// domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum GeneratorIndex {
    NoteHash = 1,
    NoteHashNonce = 2,
    UniqueNoteHash = 3,
    SiloedNoteHash = 4,
    OuterNullifier = 7,
    FunctionData = 10,
    CallContext = 17,
    CallStackItem = 18,
    TxContext = 22,
    PublicLeafIndex = 23,
    PublicDataLeaf = 24,
    GlobalVariables = 26,
    BlockHash = 28,
    FeePayload = 30,
    TxRequest = 33,
    SignaturePayload = 34,
    Vk = 41,
    PrivateCircuitPublicInputs = 42,
    PublicCircuitPublicInputs = 43,
    FunctionArgs = 44,
    NullifierLeaf = 45,
    MerkleNode = 46,
    GasSettings = 47,
}

impl GeneratorIndex {
    /// Returns the tag as a field element.
    pub fn as_felt(self) -> Felt {
        Felt::from(self as u32)
    }
}

// HASHING
// ================================================================================================

/// Returns the full digest of `fields` in the given domain.
///
/// The domain tag is absorbed ahead of the fields.
pub fn digest_in_domain(fields: &[Felt], domain: GeneratorIndex) -> Digest {
    let mut elements = Vec::with_capacity(fields.len() + 1);
    elements.push(domain.as_felt());
    elements.extend_from_slice(fields);
    Hasher::hash_elements(&elements)
}

/// Hashes `fields` in the given domain into a single field element.
///
/// The hash is the first element of [digest_in_domain]. A single element offers about 32 bits of
/// collision resistance; it is the form the circuits embed in other field layouts. Identities
/// which must resist collisions, such as the message an account signs, use the full digest.
pub fn hash_in_domain(fields: &[Felt], domain: GeneratorIndex) -> Felt {
    digest_in_domain(fields, domain).as_elements()[0]
}

/// A struct with a canonical, domain-separated hash over its field form.
pub trait DomainHashable: FieldSerializable {
    /// The domain this struct is hashed in.
    const DOMAIN: GeneratorIndex;

    /// Returns the hash of the field form of `self` in [`Self::DOMAIN`].
    ///
    /// # Panics
    /// Panics if the field form of `self` violates its declared length, before anything is
    /// hashed.
    fn hash(&self) -> Felt {
        hash_in_domain(&self.to_fields(), Self::DOMAIN)
    }

    /// Returns the full digest of the field form of `self` in [`Self::DOMAIN`].
    ///
    /// The first element of the digest is [`DomainHashable::hash`].
    fn digest(&self) -> Digest {
        digest_in_domain(&self.to_fields(), Self::DOMAIN)
    }
}

// PROTOCOL HASHES
// ================================================================================================

/// Returns the parent of two Merkle tree nodes.
pub fn merge_nodes(left: Felt, right: Felt) -> Felt {
    hash_in_domain(&[left, right], GeneratorIndex::MerkleNode)
}

/// Returns the hash of a variable-length argument list.
///
/// An empty argument list hashes to zero so that calls without arguments do not need a packed
/// preimage.
pub fn compute_var_args_hash(args: &[Felt]) -> Felt {
    if args.is_empty() {
        return ZERO;
    }
    hash_in_domain(args, GeneratorIndex::FunctionArgs)
}

/// Binds a note hash to the contract which emitted it.
pub fn silo_note_hash(contract_address: AztecAddress, note_hash: Felt) -> Felt {
    hash_in_domain(&[contract_address.to_field(), note_hash], GeneratorIndex::SiloedNoteHash)
}

/// Binds a nullifier to the contract which emitted it.
pub fn silo_nullifier(contract_address: AztecAddress, nullifier: Felt) -> Felt {
    hash_in_domain(&[contract_address.to_field(), nullifier], GeneratorIndex::OuterNullifier)
}

/// Returns the nonce of the note hash at `note_hash_index` within a transaction whose first
/// nullifier is `first_nullifier`.
pub fn compute_note_hash_nonce(first_nullifier: Felt, note_hash_index: u32) -> Felt {
    hash_in_domain(&[first_nullifier, Felt::from(note_hash_index)], GeneratorIndex::NoteHashNonce)
}

/// Makes a siloed note hash unique across transactions.
pub fn compute_unique_note_hash(nonce: Felt, siloed_note_hash: Felt) -> Felt {
    hash_in_domain(&[nonce, siloed_note_hash], GeneratorIndex::UniqueNoteHash)
}

/// Returns the leaf slot of a contract's storage slot in the public data tree.
pub fn compute_public_data_tree_index(contract_address: AztecAddress, storage_slot: Felt) -> Felt {
    hash_in_domain(&[contract_address.to_field(), storage_slot], GeneratorIndex::PublicLeafIndex)
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ONE;

    #[test]
    fn same_fields_in_different_domains_differ() {
        let fields = [Felt::new(1), Felt::new(2), Felt::new(3)];

        let call_context = hash_in_domain(&fields, GeneratorIndex::CallContext);
        let function_data = hash_in_domain(&fields, GeneratorIndex::FunctionData);
        assert_ne!(call_context, function_data);

        assert_eq!(call_context, hash_in_domain(&fields, GeneratorIndex::CallContext));
    }

    #[test]
    fn hash_is_the_first_element_of_the_digest() {
        let fields = [Felt::new(1), Felt::new(2)];
        let digest = digest_in_domain(&fields, GeneratorIndex::TxRequest);

        assert_eq!(hash_in_domain(&fields, GeneratorIndex::TxRequest), digest.as_elements()[0]);
        assert_ne!(digest, digest_in_domain(&fields, GeneratorIndex::TxContext));
    }

    #[test]
    fn empty_args_hash_to_zero() {
        assert_eq!(compute_var_args_hash(&[]), ZERO);
        assert_ne!(compute_var_args_hash(&[ZERO]), ZERO);
    }

    #[test]
    fn siloing_depends_on_the_contract() {
        let a = AztecAddress::from(Felt::new(10));
        let b = AztecAddress::from(Felt::new(11));

        assert_ne!(silo_nullifier(a, ONE), silo_nullifier(b, ONE));
        assert_ne!(silo_note_hash(a, ONE), silo_nullifier(a, ONE));
    }

    #[test]
    fn merging_is_order_sensitive() {
        assert_ne!(merge_nodes(ONE, ZERO), merge_nodes(ZERO, ONE));
    }
}
