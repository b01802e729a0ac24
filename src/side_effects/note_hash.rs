use super::{Ordered, Scoped, SideEffect};
use crate::{
    Felt, FieldDeserializationError, ZERO,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    types::AztecAddress,
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

/// A commitment to a note created during execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoteHash {
    value: Felt,
    counter: u32,
}

impl NoteHash {
    pub fn new(value: Felt, counter: u32) -> Self {
        Self { value, counter }
    }

    /// Attributes this note hash to the contract which emitted it.
    pub fn scope(self, contract_address: AztecAddress) -> Scoped<Self> {
        Scoped::new(self, contract_address)
    }
}

impl Ordered for NoteHash {
    fn counter(&self) -> u32 {
        self.counter
    }
}

impl SideEffect for NoteHash {
    fn value(&self) -> Felt {
        self.value
    }
}

impl Empty for NoteHash {
    fn empty() -> Self {
        Self { value: ZERO, counter: 0 }
    }

    fn is_empty(&self) -> bool {
        self.value == ZERO && self.counter == 0
    }
}

impl FieldSerializable for NoteHash {
    const NUM_FIELDS: usize = crate::NOTE_HASH_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_felt(self.value);
        target.write_u32(self.counter);
    }
}

impl FieldDeserializable for NoteHash {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            value: source.read_felt()?,
            counter: source.read_u32()?,
        })
    }
}

impl Serializable for NoteHash {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.value.write_into(target);
        target.write_u32(self.counter);
    }
}

impl Deserializable for NoteHash {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let value = Felt::read_from(source)?;
        let counter = source.read_u32()?;
        Ok(Self { value, counter })
    }
}
