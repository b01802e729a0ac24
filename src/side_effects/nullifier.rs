use super::{Ordered, Scoped, SideEffect};
use crate::{
    Felt, FieldDeserializationError, ZERO,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    types::AztecAddress,
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

/// A nullifier emitted during execution.
///
/// `note_hash` is the hash of the note this nullifier consumes, or zero if the nullifier does not
/// consume a note created in the same transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Nullifier {
    value: Felt,
    counter: u32,
    note_hash: Felt,
}

impl Nullifier {
    pub fn new(value: Felt, counter: u32, note_hash: Felt) -> Self {
        Self { value, counter, note_hash }
    }

    pub fn note_hash(&self) -> Felt {
        self.note_hash
    }

    pub fn scope(self, contract_address: AztecAddress) -> Scoped<Self> {
        Scoped::new(self, contract_address)
    }
}

impl Ordered for Nullifier {
    fn counter(&self) -> u32 {
        self.counter
    }
}

impl SideEffect for Nullifier {
    fn value(&self) -> Felt {
        self.value
    }
}

impl Empty for Nullifier {
    fn empty() -> Self {
        Self { value: ZERO, counter: 0, note_hash: ZERO }
    }

    fn is_empty(&self) -> bool {
        self.value == ZERO && self.counter == 0 && self.note_hash == ZERO
    }
}

impl FieldSerializable for Nullifier {
    const NUM_FIELDS: usize = crate::NULLIFIER_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_felt(self.value);
        target.write_u32(self.counter);
        target.write_felt(self.note_hash);
    }
}

impl FieldDeserializable for Nullifier {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            value: source.read_felt()?,
            counter: source.read_u32()?,
            note_hash: source.read_felt()?,
        })
    }
}

impl Serializable for Nullifier {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.value.write_into(target);
        target.write_u32(self.counter);
        self.note_hash.write_into(target);
    }
}

impl Deserializable for Nullifier {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let value = Felt::read_from(source)?;
        let counter = source.read_u32()?;
        let note_hash = Felt::read_from(source)?;
        Ok(Self { value, counter, note_hash })
    }
}
