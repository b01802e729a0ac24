use super::{Gas, GasFees};
use crate::{
    DEFAULT_GAS_LIMIT, DEFAULT_INCLUSION_FEE, DEFAULT_TEARDOWN_GAS_LIMIT, Felt,
    FieldDeserializationError, ZERO,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    hash::{DomainHashable, GeneratorIndex},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// GAS SETTINGS
// ================================================================================================

/// The gas limits and prices a transaction is willing to pay for.
///
/// `gas_limits` covers the whole transaction, teardown included. `teardown_gas_limits` is set
/// aside for the teardown phase, which is charged its full limit regardless of usage.
///
/// # Field layout
///
/// ```text
/// [gas_limits (2), teardown_gas_limits (2), max_fees_per_gas (2), inclusion_fee]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasSettings {
    pub(super) gas_limits: Gas,
    pub(super) teardown_gas_limits: Gas,
    pub(super) max_fees_per_gas: GasFees,
    pub(super) inclusion_fee: Felt,
}

impl GasSettings {
    pub fn new(
        gas_limits: Gas,
        teardown_gas_limits: Gas,
        max_fees_per_gas: GasFees,
        inclusion_fee: Felt,
    ) -> Self {
        Self {
            gas_limits,
            teardown_gas_limits,
            max_fees_per_gas,
            inclusion_fee,
        }
    }

    pub fn gas_limits(&self) -> Gas {
        self.gas_limits
    }

    pub fn teardown_gas_limits(&self) -> Gas {
        self.teardown_gas_limits
    }

    pub fn max_fees_per_gas(&self) -> GasFees {
        self.max_fees_per_gas
    }

    pub fn inclusion_fee(&self) -> Felt {
        self.inclusion_fee
    }

    /// Returns the gas available to the setup and app logic phases.
    pub fn initial_available(&self) -> Gas {
        self.gas_limits - self.teardown_gas_limits
    }

    /// Returns the gas available to the teardown phase.
    pub fn teardown_limits(&self) -> Gas {
        self.teardown_gas_limits
    }

    /// Returns the maximum fee the transaction can be charged: every unit of gas at its maximum
    /// price, plus the inclusion fee.
    pub fn fee_limit(&self) -> Felt {
        self.gas_limits.compute_fee(&self.max_fees_per_gas) + self.inclusion_fee
    }
}

impl Default for GasSettings {
    fn default() -> Self {
        Self::new(
            Gas::uniform(DEFAULT_GAS_LIMIT),
            Gas::uniform(DEFAULT_TEARDOWN_GAS_LIMIT),
            GasFees::default(),
            Felt::new(DEFAULT_INCLUSION_FEE),
        )
    }
}

impl DomainHashable for GasSettings {
    const DOMAIN: GeneratorIndex = GeneratorIndex::GasSettings;
}

impl Empty for GasSettings {
    fn empty() -> Self {
        Self::new(Gas::empty(), Gas::empty(), GasFees::empty(), ZERO)
    }

    fn is_empty(&self) -> bool {
        self.gas_limits.is_empty()
            && self.teardown_gas_limits.is_empty()
            && self.max_fees_per_gas.is_empty()
            && self.inclusion_fee == ZERO
    }
}

// SERIALIZATION
// ================================================================================================

impl FieldSerializable for GasSettings {
    const NUM_FIELDS: usize = crate::GAS_SETTINGS_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.gas_limits);
        target.write(&self.teardown_gas_limits);
        target.write(&self.max_fees_per_gas);
        target.write_felt(self.inclusion_fee);
    }
}

impl FieldDeserializable for GasSettings {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            gas_limits: source.read()?,
            teardown_gas_limits: source.read()?,
            max_fees_per_gas: source.read()?,
            inclusion_fee: source.read_felt()?,
        })
    }
}

impl Serializable for GasSettings {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.gas_limits.write_into(target);
        self.teardown_gas_limits.write_into(target);
        self.max_fees_per_gas.write_into(target);
        self.inclusion_fee.write_into(target);
    }
}

impl Deserializable for GasSettings {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let gas_limits = Gas::read_from(source)?;
        let teardown_gas_limits = Gas::read_from(source)?;
        let max_fees_per_gas = GasFees::read_from(source)?;
        let inclusion_fee = Felt::read_from(source)?;
        Ok(Self::new(gas_limits, teardown_gas_limits, max_fees_per_gas, inclusion_fee))
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reserves_teardown_gas() {
        let settings = GasSettings::default();

        assert_eq!(
            settings.initial_available(),
            Gas::uniform(DEFAULT_GAS_LIMIT - DEFAULT_TEARDOWN_GAS_LIMIT)
        );
        let expected = settings.gas_limits() - settings.teardown_limits();
        assert_eq!(settings.initial_available(), expected);
    }

    #[test]
    fn fee_limit_includes_the_inclusion_fee() {
        let settings = GasSettings::new(
            Gas::new(100, 200),
            Gas::new(10, 20),
            GasFees::new(Felt::new(2), Felt::new(3)),
            Felt::new(5),
        );

        assert_eq!(settings.fee_limit(), Felt::new(805));
    }

    #[test]
    fn field_form_and_hash() {
        let settings = GasSettings::default();
        let fields = settings.to_fields();

        assert_eq!(fields.len(), crate::GAS_SETTINGS_LENGTH);
        assert_eq!(GasSettings::read_from_fields(&fields).unwrap(), settings);
        assert_eq!(GasSettings::read_from_bytes(&settings.to_bytes()).unwrap(), settings);
        assert_ne!(settings.hash(), GasSettings::empty().hash());
    }
}
