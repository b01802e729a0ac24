use alloc::vec::Vec;
use core::{ops::Index, slice};

use super::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter};
use crate::{
    BoundedArrayError, FieldDeserializationError,
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// BOUNDED ARRAY
// ================================================================================================

/// An array of exactly `N` elements, of which any suffix may be padding.
///
/// The circuits accept "at most `N`" collections as arrays of exactly `N` elements where unused
/// slots hold the element's [`Empty::empty`] value. Elements keep the order in which they were
/// supplied; that order determines the order of side effects downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedArray<T, const N: usize> {
    items: [T; N],
}

impl<T: Empty, const N: usize> BoundedArray<T, N> {
    /// Returns a new [BoundedArray] holding `items` followed by empty padding.
    ///
    /// # Errors
    /// Returns an error if more than `N` items are provided.
    pub fn new(items: Vec<T>) -> Result<Self, BoundedArrayError> {
        if items.len() > N {
            return Err(BoundedArrayError::TooManyItems { max: N, actual: items.len() });
        }

        let mut items = items.into_iter();
        Ok(Self::from_fn(|_| items.next().unwrap_or_else(T::empty)))
    }
}

impl<T, const N: usize> BoundedArray<T, N> {
    /// Returns a new [BoundedArray] whose element at index `i` is `f(i)`.
    pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        Self { items: core::array::from_fn(f) }
    }

    /// Returns the capacity of the array, which is also its length.
    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn into_inner(self) -> [T; N] {
        self.items
    }
}

impl<T: Empty + PartialEq, const N: usize> BoundedArray<T, N> {
    /// Returns the number of leading elements which are not empty.
    ///
    /// Counting stops at the first empty slot, so a non-empty element after a gap is not
    /// counted. This is the length the circuits read off a padded array.
    pub fn num_non_empty(&self) -> usize {
        self.items.iter().take_while(|item| !item.is_empty()).count()
    }

    /// Returns an iterator over the elements which are not empty.
    pub fn non_empty(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter(|item| !item.is_empty())
    }
}

impl<T, const N: usize> From<[T; N]> for BoundedArray<T, N> {
    fn from(items: [T; N]) -> Self {
        Self { items }
    }
}

impl<T, const N: usize> Index<usize> for BoundedArray<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a BoundedArray<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Empty + PartialEq, const N: usize> Empty for BoundedArray<T, N> {
    fn empty() -> Self {
        Self::from_fn(|_| T::empty())
    }

    fn is_empty(&self) -> bool {
        self.items.iter().all(T::is_empty)
    }
}

// FIELD SERIALIZATION
// ================================================================================================

impl<T: FieldSerializable, const N: usize> FieldSerializable for BoundedArray<T, N> {
    const NUM_FIELDS: usize = T::NUM_FIELDS * N;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_many(self.items.iter());
    }
}

impl<T: FieldDeserializable, const N: usize> FieldDeserializable for BoundedArray<T, N> {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self { items: source.read_array()? })
    }
}

// SERIALIZATION
// ================================================================================================

impl<T: Serializable, const N: usize> Serializable for BoundedArray<T, N> {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_many(&self.items);
    }
}

impl<T: Deserializable, const N: usize> Deserializable for BoundedArray<T, N> {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let items = source.read_many::<T>(N)?;
        let items: [T; N] = items.try_into().map_err(|_| {
            DeserializationError::InvalidValue(format!("expected {N} array elements"))
        })?;
        Ok(Self { items })
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{Felt, ONE, ZERO};

    #[test]
    fn pads_with_trailing_empty_slots() {
        let array = BoundedArray::<Felt, 5>::new(vec![Felt::new(3), Felt::new(1)]).unwrap();

        assert_eq!(
            array.as_slice(),
            &[Felt::new(3), Felt::new(1), ZERO, ZERO, ZERO],
            "order must be preserved and the remainder padded"
        );
        assert_eq!(array.num_non_empty(), 2);
        assert!(!array.is_empty());
    }

    #[test]
    fn counts_only_leading_non_empty_slots() {
        let array = BoundedArray::from([ONE, ZERO, Felt::new(7), ZERO]);

        assert_eq!(array.num_non_empty(), 1);
        assert_eq!(array.non_empty().count(), 2);
    }

    #[test]
    fn rejects_more_items_than_capacity() {
        let items = vec![ONE; 4];
        assert_matches!(
            BoundedArray::<Felt, 3>::new(items),
            Err(BoundedArrayError::TooManyItems { max: 3, actual: 4 })
        );
    }

    #[test]
    fn is_empty_only_when_every_slot_is_empty() {
        assert!(BoundedArray::<Felt, 4>::empty().is_empty());
        assert!(BoundedArray::<Felt, 4>::new(vec![]).unwrap().is_empty());

        let last_set = BoundedArray::<Felt, 4>::from_fn(|i| if i == 3 { ONE } else { ZERO });
        assert!(!last_set.is_empty());
    }

    #[test]
    fn field_and_byte_round_trip() {
        let array = BoundedArray::<Felt, 4>::from_fn(|i| Felt::new(i as u64 * 10));

        let fields = array.to_fields();
        assert_eq!(fields.len(), BoundedArray::<Felt, 4>::NUM_FIELDS);
        assert_eq!(BoundedArray::<Felt, 4>::read_from_fields(&fields).unwrap(), array);

        let bytes = array.to_bytes();
        assert_eq!(BoundedArray::<Felt, 4>::read_from_bytes(&bytes).unwrap(), array);
    }
}
