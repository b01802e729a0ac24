use super::{
    KeyValidationRequestAndGenerator, L2ToL1Message, LogHash, NoteHash, Nullifier, Ordered,
    ReadRequest, SideEffect,
};
use crate::{
    AZTEC_ADDRESS_LENGTH, Felt, FieldDeserializationError, ZERO,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    hash::{silo_note_hash, silo_nullifier},
    types::AztecAddress,
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

pub type ScopedNoteHash = Scoped<NoteHash>;
pub type ScopedNullifier = Scoped<Nullifier>;
pub type ScopedReadRequest = Scoped<ReadRequest>;
pub type ScopedLogHash = Scoped<LogHash>;
pub type ScopedL2ToL1Message = Scoped<L2ToL1Message>;
pub type ScopedKeyValidationRequestAndGenerator = Scoped<KeyValidationRequestAndGenerator>;

// SCOPED
// ================================================================================================

/// A value paired with the address of the contract that emitted it.
///
/// Side effects are collected transaction-wide across many contracts; the scope makes each one
/// attributable in later stages. Wrapping does not change the value itself: its counter and
/// payload are accessible through the same traits as the unwrapped value.
///
/// # Field layout
///
/// ```text
/// [inner value fields..., contract_address]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoped<T> {
    inner: T,
    contract_address: AztecAddress,
}

impl<T> Scoped<T> {
    pub fn new(inner: T, contract_address: AztecAddress) -> Self {
        Self { inner, contract_address }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn contract_address(&self) -> AztecAddress {
        self.contract_address
    }

    pub fn into_parts(self) -> (T, AztecAddress) {
        (self.inner, self.contract_address)
    }
}

impl<T: Ordered> Ordered for Scoped<T> {
    fn counter(&self) -> u32 {
        self.inner.counter()
    }
}

impl<T: SideEffect> SideEffect for Scoped<T> {
    fn value(&self) -> Felt {
        self.inner.value()
    }
}

impl<T: Empty + PartialEq> Empty for Scoped<T> {
    fn empty() -> Self {
        Self {
            inner: T::empty(),
            contract_address: AztecAddress::ZERO,
        }
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty() && self.contract_address.is_zero()
    }
}

impl Scoped<NoteHash> {
    /// Returns the note hash bound to its emitting contract, or zero for an empty note hash.
    pub fn silo(&self) -> Felt {
        if self.inner.value() == ZERO {
            return ZERO;
        }
        silo_note_hash(self.contract_address, self.inner.value())
    }
}

impl Scoped<Nullifier> {
    /// Returns the nullifier bound to its emitting contract, or zero for an empty nullifier.
    pub fn silo(&self) -> Felt {
        if self.inner.value() == ZERO {
            return ZERO;
        }
        silo_nullifier(self.contract_address, self.inner.value())
    }

    pub fn nullified_note_hash(&self) -> Felt {
        self.inner.note_hash()
    }
}

// SERIALIZATION
// ================================================================================================

impl<T: FieldSerializable> FieldSerializable for Scoped<T> {
    const NUM_FIELDS: usize = T::NUM_FIELDS + AZTEC_ADDRESS_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.inner);
        target.write(&self.contract_address);
    }
}

impl<T: FieldDeserializable> FieldDeserializable for Scoped<T> {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        let inner = source.read()?;
        let contract_address = source.read()?;
        Ok(Self { inner, contract_address })
    }
}

impl<T: Serializable> Serializable for Scoped<T> {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.inner.write_into(target);
        self.contract_address.write_into(target);
    }
}

impl<T: Deserializable> Deserializable for Scoped<T> {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let inner = T::read_from(source)?;
        let contract_address = AztecAddress::read_from(source)?;
        Ok(Self { inner, contract_address })
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SCOPED_NOTE_HASH_LENGTH, SCOPED_NULLIFIER_LENGTH};

    #[test]
    fn delegates_to_the_inner_value() {
        let note_hash = NoteHash::new(Felt::new(42), 7);
        let scoped = note_hash.scope(AztecAddress::from(Felt::new(3)));

        assert_eq!(scoped.value(), Felt::new(42));
        assert_eq!(scoped.counter(), 7);
        assert_eq!(scoped.inner(), &note_hash);
        assert_eq!(scoped.to_fields(), vec![Felt::new(42), Felt::new(7), Felt::new(3)]);
        assert_eq!(ScopedNoteHash::NUM_FIELDS, SCOPED_NOTE_HASH_LENGTH);
    }

    #[test]
    fn empty_requires_zero_address() {
        assert!(ScopedNullifier::empty().is_empty());

        let addressed_only = Nullifier::empty().scope(AztecAddress::from(Felt::new(1)));
        assert!(!addressed_only.is_empty());
        assert_ne!(addressed_only, ScopedNullifier::empty());
    }

    #[test]
    fn equality_includes_the_address() {
        let nullifier = Nullifier::new(Felt::new(9), 2, ZERO);
        let a = nullifier.scope(AztecAddress::from(Felt::new(1)));
        let b = nullifier.scope(AztecAddress::from(Felt::new(2)));

        assert_ne!(a, b);
        assert_ne!(a.silo(), b.silo());
        assert_eq!(ScopedNullifier::read_from_fields(&a.to_fields()).unwrap(), a);
        assert_eq!(ScopedNullifier::NUM_FIELDS, SCOPED_NULLIFIER_LENGTH);
    }

    #[test]
    fn empty_values_silo_to_zero() {
        let scoped = NoteHash::empty().scope(AztecAddress::from(Felt::new(1)));
        assert_eq!(scoped.silo(), ZERO);
    }
}
