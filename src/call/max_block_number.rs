use crate::{
    FieldDeserializationError,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

/// The last block in which a transaction may be included, if any.
///
/// Laid out in field form as `[is_some, value]`. When unset the value is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaxBlockNumber {
    is_some: bool,
    value: u32,
}

impl MaxBlockNumber {
    pub fn new(value: Option<u32>) -> Self {
        match value {
            Some(value) => Self { is_some: true, value },
            None => Self::default(),
        }
    }

    pub fn get(&self) -> Option<u32> {
        self.is_some.then_some(self.value)
    }

    /// Returns the stricter of the two limits.
    pub fn min(self, other: Self) -> Self {
        match (self.get(), other.get()) {
            (Some(a), Some(b)) => Self::new(Some(a.min(b))),
            (Some(_), None) => self,
            (None, _) => other,
        }
    }
}

impl From<Option<u32>> for MaxBlockNumber {
    fn from(value: Option<u32>) -> Self {
        Self::new(value)
    }
}

impl Empty for MaxBlockNumber {
    fn empty() -> Self {
        Self::default()
    }
}

impl FieldSerializable for MaxBlockNumber {
    const NUM_FIELDS: usize = crate::MAX_BLOCK_NUMBER_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_bool(self.is_some);
        target.write_u32(self.value);
    }
}

impl FieldDeserializable for MaxBlockNumber {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        let is_some = source.read_bool()?;
        let value = source.read_u32()?;
        if !is_some && value != 0 {
            return Err(FieldDeserializationError::InvalidStruct(format!(
                "unset max block number carries value {value}"
            )));
        }
        Ok(Self { is_some, value })
    }
}

impl Serializable for MaxBlockNumber {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.get().write_into(target);
    }
}

impl Deserializable for MaxBlockNumber {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        Ok(Self::new(Option::<u32>::read_from(source)?))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, None, None)]
    #[case(Some(10), None, Some(10))]
    #[case(None, Some(7), Some(7))]
    #[case(Some(10), Some(7), Some(7))]
    #[case(Some(3), Some(7), Some(3))]
    fn min_picks_the_stricter_limit(
        #[case] a: Option<u32>,
        #[case] b: Option<u32>,
        #[case] expected: Option<u32>,
    ) {
        assert_eq!(MaxBlockNumber::new(a).min(MaxBlockNumber::new(b)).get(), expected);
    }

    #[test]
    fn unset_value_must_be_zero() {
        let fields = [crate::ZERO, crate::Felt::new(5)];
        assert!(MaxBlockNumber::read_from_fields(&fields).is_err());
    }

    #[test]
    fn byte_form_round_trips() {
        for value in [MaxBlockNumber::new(None), MaxBlockNumber::new(Some(42))] {
            assert_eq!(MaxBlockNumber::read_from_bytes(&value.to_bytes()).unwrap(), value);
        }
    }
}
