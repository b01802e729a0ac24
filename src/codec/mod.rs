//! The field/byte dual codec.
//!
//! Every struct that crosses the circuit boundary has two independent encodings:
//!
//! - A field form: a vector of exactly [`FieldSerializable::NUM_FIELDS`] field elements, in the
//!   order the circuits read them. Nested structs are flattened recursively.
//! - A byte form: the denser [`Serializable`](crate::utils::serde::Serializable) encoding used for
//!   storage and transport.
//!
//! Both forms decode through a cursor so that a caller composing a larger struct can decode the
//! members one after another.

use alloc::vec::Vec;
use core::any::type_name;

use crate::{Felt, FieldDeserializationError, ONE, ZERO};

mod bounded_array;
pub use bounded_array::BoundedArray;

// EMPTY
// ================================================================================================

/// A value with a canonical empty instance.
///
/// Empty values are used as padding in fixed-size arrays, so the empty instance of a side effect
/// is indistinguishable from "no side effect".
pub trait Empty: Sized {
    /// Returns the canonical empty instance.
    fn empty() -> Self;

    /// Returns `true` if `self` is structurally equal to [`Empty::empty`].
    fn is_empty(&self) -> bool
    where
        Self: PartialEq,
    {
        *self == Self::empty()
    }
}

// FIELD SERIALIZATION
// ================================================================================================

/// Conversion of a struct into its circuit-facing field form.
pub trait FieldSerializable {
    /// The number of field elements this type occupies.
    const NUM_FIELDS: usize;

    /// Writes the field form of `self` into `target`.
    fn write_fields_into(&self, target: &mut FieldWriter);

    /// Returns the field form of `self`.
    ///
    /// # Panics
    /// Panics if the number of produced elements is not [`Self::NUM_FIELDS`]. The circuits read
    /// inputs at fixed offsets, so a struct of the wrong length is never usable.
    fn to_fields(&self) -> Vec<Felt> {
        let mut writer = FieldWriter::with_capacity(Self::NUM_FIELDS);
        self.write_fields_into(&mut writer);
        let fields = writer.into_fields();
        assert_field_count::<Self>(fields.len());
        fields
    }
}

/// Conversion of a circuit-facing field form back into a struct.
pub trait FieldDeserializable: Sized {
    /// Reads a value from the current position of `source`, advancing it past the consumed
    /// elements.
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError>;

    /// Reads a value from `fields`, which must be consumed entirely.
    fn read_from_fields(fields: &[Felt]) -> Result<Self, FieldDeserializationError> {
        let mut reader = FieldReader::new(fields);
        let value = Self::read_fields_from(&mut reader)?;
        reader.finish()?;
        Ok(value)
    }
}

fn assert_field_count<T: FieldSerializable + ?Sized>(actual: usize) {
    assert_eq!(
        actual,
        T::NUM_FIELDS,
        "{} produced {actual} field elements but its layout defines {}",
        type_name::<T>(),
        T::NUM_FIELDS,
    );
}

// FIELD WRITER
// ================================================================================================

/// Accumulates the field form of a struct.
#[derive(Debug, Default)]
pub struct FieldWriter {
    fields: Vec<Felt>,
}

impl FieldWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { fields: Vec::with_capacity(capacity) }
    }

    /// Writes the field form of a nested value.
    ///
    /// # Panics
    /// Panics if the nested value does not produce exactly `T::NUM_FIELDS` elements.
    pub fn write<T: FieldSerializable + ?Sized>(&mut self, value: &T) {
        let start = self.fields.len();
        value.write_fields_into(self);
        assert_field_count::<T>(self.fields.len() - start);
    }

    /// Writes all values of `values` one after another.
    pub fn write_many<'a, T: FieldSerializable + 'a>(
        &mut self,
        values: impl IntoIterator<Item = &'a T>,
    ) {
        for value in values {
            self.write(value);
        }
    }

    pub fn write_felt(&mut self, value: Felt) {
        self.fields.push(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.fields.push(if value { ONE } else { ZERO });
    }

    pub fn write_u8(&mut self, value: u8) {
        self.fields.push(Felt::from(value));
    }

    pub fn write_u32(&mut self, value: u32) {
        self.fields.push(Felt::from(value));
    }

    /// Writes a `u64`. Values at or above the field modulus wrap around.
    pub fn write_u64(&mut self, value: u64) {
        self.fields.push(Felt::new(value));
    }

    /// Returns the number of elements written so far.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_fields(self) -> Vec<Felt> {
        self.fields
    }
}

// FIELD READER
// ================================================================================================

/// A cursor over a field form.
#[derive(Debug, Clone)]
pub struct FieldReader<'a> {
    fields: &'a [Felt],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    pub fn new(fields: &'a [Felt]) -> Self {
        Self { fields, pos: 0 }
    }

    /// Returns the number of elements not yet consumed.
    pub fn remaining(&self) -> usize {
        self.fields.len() - self.pos
    }

    /// Returns the number of elements consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Reads a nested value.
    pub fn read<T: FieldDeserializable>(&mut self) -> Result<T, FieldDeserializationError> {
        T::read_fields_from(self)
    }

    /// Reads `N` consecutive nested values.
    pub fn read_array<T: FieldDeserializable, const N: usize>(
        &mut self,
    ) -> Result<[T; N], FieldDeserializationError> {
        let mut values = Vec::with_capacity(N);
        for _ in 0..N {
            values.push(self.read()?);
        }
        // the vector was filled with exactly N elements above
        values.try_into().map_err(|_| {
            FieldDeserializationError::InvalidStruct(format!("expected {N} array elements"))
        })
    }

    /// Returns the next `len` elements.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [Felt], FieldDeserializationError> {
        if self.remaining() < len {
            return Err(FieldDeserializationError::UnexpectedEnd {
                expected: len,
                available: self.remaining(),
            });
        }
        let slice = &self.fields[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn read_felt(&mut self) -> Result<Felt, FieldDeserializationError> {
        Ok(self.read_slice(1)?[0])
    }

    /// Reads a boolean, which must be encoded as exactly 0 or 1.
    pub fn read_bool(&mut self) -> Result<bool, FieldDeserializationError> {
        let value = self.read_felt()?;
        match value.as_int() {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(FieldDeserializationError::invalid_value(value, "bool")),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8, FieldDeserializationError> {
        let value = self.read_felt()?;
        u8::try_from(value.as_int())
            .map_err(|_| FieldDeserializationError::invalid_value(value, "u8"))
    }

    pub fn read_u32(&mut self) -> Result<u32, FieldDeserializationError> {
        let value = self.read_felt()?;
        u32::try_from(value.as_int())
            .map_err(|_| FieldDeserializationError::invalid_value(value, "u32"))
    }

    pub fn read_u64(&mut self) -> Result<u64, FieldDeserializationError> {
        Ok(self.read_felt()?.as_int())
    }

    /// Returns an error if any elements were left unconsumed.
    pub fn finish(self) -> Result<(), FieldDeserializationError> {
        match self.remaining() {
            0 => Ok(()),
            left => Err(FieldDeserializationError::TrailingFields(left)),
        }
    }
}

// PRIMITIVE IMPLEMENTATIONS
// ================================================================================================

impl FieldSerializable for Felt {
    const NUM_FIELDS: usize = 1;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_felt(*self);
    }
}

impl FieldDeserializable for Felt {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        source.read_felt()
    }
}

impl Empty for Felt {
    fn empty() -> Self {
        ZERO
    }

    fn is_empty(&self) -> bool {
        *self == ZERO
    }
}

impl FieldSerializable for bool {
    const NUM_FIELDS: usize = 1;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_bool(*self);
    }
}

impl FieldDeserializable for bool {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        source.read_bool()
    }
}

impl Empty for bool {
    fn empty() -> Self {
        false
    }
}

impl FieldSerializable for u8 {
    const NUM_FIELDS: usize = 1;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_u8(*self);
    }
}

impl FieldDeserializable for u8 {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        source.read_u8()
    }
}

impl FieldSerializable for u32 {
    const NUM_FIELDS: usize = 1;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_u32(*self);
    }
}

impl FieldDeserializable for u32 {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        source.read_u32()
    }
}

impl Empty for u32 {
    fn empty() -> Self {
        0
    }
}

impl FieldSerializable for u64 {
    const NUM_FIELDS: usize = 1;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_u64(*self);
    }
}

impl FieldDeserializable for u64 {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        source.read_u64()
    }
}

impl<T: FieldSerializable, const N: usize> FieldSerializable for [T; N] {
    const NUM_FIELDS: usize = T::NUM_FIELDS * N;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_many(self.iter());
    }
}

impl<T: FieldDeserializable, const N: usize> FieldDeserializable for [T; N] {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        source.read_array()
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[derive(Debug)]
    struct Pair {
        a: u32,
        b: bool,
    }

    impl FieldSerializable for Pair {
        const NUM_FIELDS: usize = 2;

        fn write_fields_into(&self, target: &mut FieldWriter) {
            target.write_u32(self.a);
            target.write_bool(self.b);
        }
    }

    impl FieldDeserializable for Pair {
        fn read_fields_from(
            source: &mut FieldReader<'_>,
        ) -> Result<Self, FieldDeserializationError> {
            Ok(Self { a: source.read_u32()?, b: source.read_bool()? })
        }
    }

    /// A struct whose layout claims more elements than it writes.
    struct Truncated;

    impl FieldSerializable for Truncated {
        const NUM_FIELDS: usize = 3;

        fn write_fields_into(&self, target: &mut FieldWriter) {
            target.write_felt(ONE);
        }
    }

    #[test]
    fn reader_advances_past_consumed_fields() {
        let fields = [Felt::new(7), ONE, Felt::new(9), ZERO, Felt::new(42)];
        let mut reader = FieldReader::new(&fields);

        let first: Pair = reader.read().unwrap();
        let second: Pair = reader.read().unwrap();
        assert_eq!((first.a, first.b), (7, true));
        assert_eq!((second.a, second.b), (9, false));
        assert_eq!(reader.position(), 4);
        assert_eq!(reader.read_felt().unwrap(), Felt::new(42));
        reader.finish().unwrap();
    }

    #[test]
    fn trailing_fields_are_rejected() {
        let fields = [Felt::new(7), ONE, ZERO];
        assert_matches!(
            Pair::read_from_fields(&fields),
            Err(FieldDeserializationError::TrailingFields(1))
        );
    }

    #[test]
    fn short_input_is_rejected() {
        assert_matches!(
            Pair::read_from_fields(&[Felt::new(7)]),
            Err(FieldDeserializationError::UnexpectedEnd { expected: 1, available: 0 })
        );
    }

    #[test]
    fn non_binary_bool_is_rejected() {
        assert_matches!(
            Pair::read_from_fields(&[Felt::new(7), Felt::new(2)]),
            Err(FieldDeserializationError::InvalidValue { expected: "bool", .. })
        );
    }

    #[test]
    fn oversized_u32_is_rejected() {
        let fields = [Felt::new(u32::MAX as u64 + 1), ZERO];
        assert_matches!(
            Pair::read_from_fields(&fields),
            Err(FieldDeserializationError::InvalidValue { expected: "u32", .. })
        );
    }

    #[test]
    #[should_panic(expected = "layout defines 3")]
    fn length_mismatch_panics() {
        Truncated.to_fields();
    }

    #[test]
    #[should_panic(expected = "layout defines 3")]
    fn nested_length_mismatch_panics() {
        let mut writer = FieldWriter::new();
        writer.write(&Truncated);
    }

    #[test]
    fn arrays_flatten_in_order() {
        let values = [Felt::new(1), Felt::new(2), Felt::new(3)];
        assert_eq!(<[Felt; 3]>::NUM_FIELDS, 3);
        assert_eq!(values.to_fields(), values.to_vec());
        assert_eq!(<[Felt; 3]>::read_from_fields(&values).unwrap(), values);
    }
}
