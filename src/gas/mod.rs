//! The two-dimensional gas model: data-availability gas and L2 execution gas.

use core::ops::{Add, Sub};

use crate::{
    Felt, FieldDeserializationError, ZERO,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

mod fees;
pub use fees::GasFees;

mod settings;
pub use settings::GasSettings;

#[cfg(feature = "std")]
mod toml;

// GAS DIMENSION
// ================================================================================================

/// A dimension along which gas is metered and priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasDimension {
    Da,
    L2,
}

impl GasDimension {
    pub const ALL: [GasDimension; 2] = [GasDimension::Da, GasDimension::L2];
}

// GAS
// ================================================================================================

/// An amount of gas in each dimension.
///
/// Arithmetic wraps on overflow and underflow; callers which may subtract more gas than is
/// available must compare with [Gas::gt_any] first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct Gas {
    da_gas: u32,
    l2_gas: u32,
}

impl Gas {
    pub const fn new(da_gas: u32, l2_gas: u32) -> Self {
        Self { da_gas, l2_gas }
    }

    /// Returns gas with the same amount in both dimensions.
    pub const fn uniform(amount: u32) -> Self {
        Self::new(amount, amount)
    }

    pub fn da_gas(&self) -> u32 {
        self.da_gas
    }

    pub fn l2_gas(&self) -> u32 {
        self.l2_gas
    }

    pub fn get(&self, dimension: GasDimension) -> u32 {
        match dimension {
            GasDimension::Da => self.da_gas,
            GasDimension::L2 => self.l2_gas,
        }
    }

    pub fn mul(&self, scalar: u32) -> Gas {
        Gas::new(self.da_gas.wrapping_mul(scalar), self.l2_gas.wrapping_mul(scalar))
    }

    /// Returns true if `self` exceeds `other` in at least one dimension.
    pub fn gt_any(&self, other: &Gas) -> bool {
        self.da_gas > other.da_gas || self.l2_gas > other.l2_gas
    }

    /// Returns the fee charged for this gas at the given prices.
    pub fn compute_fee(&self, fees: &GasFees) -> Felt {
        GasDimension::ALL
            .into_iter()
            .map(|dimension| Felt::from(self.get(dimension)) * fees.get(dimension))
            .fold(ZERO, |fee, dimension_fee| fee + dimension_fee)
    }
}

impl Add for Gas {
    type Output = Gas;

    fn add(self, rhs: Gas) -> Gas {
        Gas::new(self.da_gas.wrapping_add(rhs.da_gas), self.l2_gas.wrapping_add(rhs.l2_gas))
    }
}

impl Sub for Gas {
    type Output = Gas;

    /// Subtracts `rhs` in every dimension. Underflow wraps.
    fn sub(self, rhs: Gas) -> Gas {
        Gas::new(self.da_gas.wrapping_sub(rhs.da_gas), self.l2_gas.wrapping_sub(rhs.l2_gas))
    }
}

impl Empty for Gas {
    fn empty() -> Self {
        Self::new(0, 0)
    }

    fn is_empty(&self) -> bool {
        self.da_gas == 0 && self.l2_gas == 0
    }
}

impl FieldSerializable for Gas {
    const NUM_FIELDS: usize = crate::GAS_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_u32(self.da_gas);
        target.write_u32(self.l2_gas);
    }
}

impl FieldDeserializable for Gas {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            da_gas: source.read_u32()?,
            l2_gas: source.read_u32()?,
        })
    }
}

impl Serializable for Gas {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_u32(self.da_gas);
        target.write_u32(self.l2_gas);
    }
}

impl Deserializable for Gas {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let da_gas = source.read_u32()?;
        let l2_gas = source.read_u32()?;
        Ok(Self { da_gas, l2_gas })
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::da_only(Gas::new(11, 10), Gas::new(10, 10), true)]
    #[case::l2_only(Gas::new(10, 11), Gas::new(10, 10), true)]
    #[case::equal(Gas::new(10, 10), Gas::new(10, 10), false)]
    #[case::smaller(Gas::new(1, 9), Gas::new(10, 10), false)]
    fn gt_any(#[case] gas: Gas, #[case] other: Gas, #[case] expected: bool) {
        assert_eq!(gas.gt_any(&other), expected);
    }

    #[test]
    fn arithmetic() {
        let a = Gas::new(10, 20);
        let b = Gas::new(1, 2);

        assert_eq!(a + b, Gas::new(11, 22));
        assert_eq!(a - b, Gas::new(9, 18));
        assert_eq!(a.mul(3), Gas::new(30, 60));
        assert_eq!(a.get(GasDimension::L2), 20);
    }

    #[test]
    fn sub_wraps_on_underflow() {
        assert_eq!(Gas::new(0, 5) - Gas::new(1, 5), Gas::new(u32::MAX, 0));
    }

    #[test]
    fn fee_is_the_dot_product_with_prices() {
        let fees = GasFees::new(Felt::new(2), Felt::new(3));
        assert_eq!(Gas::new(100, 200).compute_fee(&fees), Felt::new(800));
        assert_eq!(Gas::empty().compute_fee(&fees), Felt::new(0));
    }
}
