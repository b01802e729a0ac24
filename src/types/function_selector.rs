use core::fmt;

use crate::{
    Felt, FieldDeserializationError, Hasher,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

/// A 4-byte identifier of a function within a contract.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FunctionSelector(u32);

impl FunctionSelector {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Derives the selector of a function from its signature, e.g. `transfer(Field,Field)`.
    ///
    /// The selector is the low 32 bits of the first element of the signature's digest.
    pub fn from_signature(signature: &str) -> Self {
        let digest = Hasher::hash(signature.as_bytes());
        Self(digest.as_elements()[0].as_int() as u32)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn to_field(&self) -> Felt {
        Felt::from(self.0)
    }

    /// Returns the selector encoded by `value`.
    ///
    /// # Errors
    /// Returns an error if `value` does not fit into 32 bits.
    pub fn from_field(value: Felt) -> Result<Self, FieldDeserializationError> {
        u32::try_from(value.as_int())
            .map(Self)
            .map_err(|_| FieldDeserializationError::invalid_value(value, "function selector"))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for FunctionSelector {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for FunctionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl fmt::Debug for FunctionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Empty for FunctionSelector {
    fn empty() -> Self {
        Self(0)
    }

    fn is_empty(&self) -> bool {
        self.is_zero()
    }
}

impl FieldSerializable for FunctionSelector {
    const NUM_FIELDS: usize = crate::FUNCTION_SELECTOR_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_u32(self.0);
    }
}

impl FieldDeserializable for FunctionSelector {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Self::from_field(source.read_felt()?)
    }
}

impl Serializable for FunctionSelector {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_u32(self.0);
    }
}

impl Deserializable for FunctionSelector {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        Ok(Self(source.read_u32()?))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn signature_selectors_are_deterministic() {
        let transfer = FunctionSelector::from_signature("transfer(Field,Field)");
        assert_eq!(transfer, FunctionSelector::from_signature("transfer(Field,Field)"));
        assert_ne!(transfer, FunctionSelector::from_signature("transfer(Field)"));
    }

    #[test]
    fn from_field_rejects_values_above_u32() {
        assert_matches!(
            FunctionSelector::from_field(Felt::new(1 << 32)),
            Err(FieldDeserializationError::InvalidValue { .. })
        );
        assert_eq!(FunctionSelector::from_field(Felt::new(7)).unwrap(), FunctionSelector::new(7));
    }
}
