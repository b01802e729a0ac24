use super::{Ordered, Scoped, SideEffect};
use crate::{
    Felt, FieldDeserializationError, ZERO,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    types::AztecAddress,
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

/// A request to prove that `value` exists (or, for non-existent reads, does not exist) at the
/// time the read happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadRequest {
    value: Felt,
    counter: u32,
}

impl ReadRequest {
    pub fn new(value: Felt, counter: u32) -> Self {
        Self { value, counter }
    }

    pub fn scope(self, contract_address: AztecAddress) -> Scoped<Self> {
        Scoped::new(self, contract_address)
    }
}

impl Ordered for ReadRequest {
    fn counter(&self) -> u32 {
        self.counter
    }
}

impl SideEffect for ReadRequest {
    fn value(&self) -> Felt {
        self.value
    }
}

impl Empty for ReadRequest {
    fn empty() -> Self {
        Self { value: ZERO, counter: 0 }
    }

    fn is_empty(&self) -> bool {
        self.value == ZERO && self.counter == 0
    }
}

impl FieldSerializable for ReadRequest {
    const NUM_FIELDS: usize = crate::READ_REQUEST_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_felt(self.value);
        target.write_u32(self.counter);
    }
}

impl FieldDeserializable for ReadRequest {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            value: source.read_felt()?,
            counter: source.read_u32()?,
        })
    }
}

impl Serializable for ReadRequest {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.value.write_into(target);
        target.write_u32(self.counter);
    }
}

impl Deserializable for ReadRequest {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let value = Felt::read_from(source)?;
        let counter = source.read_u32()?;
        Ok(Self { value, counter })
    }
}
