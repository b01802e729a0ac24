use alloc::string::ToString;

use crate::{
    Felt, FieldDeserializationError,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

/// The outcome of the public phases of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum RevertCode {
    #[default]
    Ok = 0,
    AppLogicReverted = 1,
    TeardownReverted = 2,
    BothReverted = 3,
}

impl RevertCode {
    pub fn is_ok(&self) -> bool {
        *self == Self::Ok
    }

    pub fn to_field(&self) -> Felt {
        Felt::from(*self as u8)
    }
}

impl TryFrom<u8> for RevertCode {
    type Error = FieldDeserializationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Ok),
            1 => Ok(Self::AppLogicReverted),
            2 => Ok(Self::TeardownReverted),
            3 => Ok(Self::BothReverted),
            _ => Err(FieldDeserializationError::invalid_value(Felt::from(value), "revert code")),
        }
    }
}

impl Empty for RevertCode {
    fn empty() -> Self {
        Self::Ok
    }
}

impl FieldSerializable for RevertCode {
    const NUM_FIELDS: usize = crate::REVERT_CODE_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_u8(*self as u8);
    }
}

impl FieldDeserializable for RevertCode {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Self::try_from(source.read_u8()?)
    }
}

impl Serializable for RevertCode {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_u8(*self as u8);
    }
}

impl Deserializable for RevertCode {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        Self::try_from(source.read_u8()?)
            .map_err(|err| DeserializationError::InvalidValue(err.to_string()))
    }
}
