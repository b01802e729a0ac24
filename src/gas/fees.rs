use super::GasDimension;
use crate::{
    DEFAULT_MAX_FEE_PER_GAS, Felt, FieldDeserializationError, ZERO,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

/// The price of one unit of gas in each dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasFees {
    fee_per_da_gas: Felt,
    fee_per_l2_gas: Felt,
}

impl GasFees {
    pub fn new(fee_per_da_gas: Felt, fee_per_l2_gas: Felt) -> Self {
        Self { fee_per_da_gas, fee_per_l2_gas }
    }

    pub fn fee_per_da_gas(&self) -> Felt {
        self.fee_per_da_gas
    }

    pub fn fee_per_l2_gas(&self) -> Felt {
        self.fee_per_l2_gas
    }

    pub fn get(&self, dimension: GasDimension) -> Felt {
        match dimension {
            GasDimension::Da => self.fee_per_da_gas,
            GasDimension::L2 => self.fee_per_l2_gas,
        }
    }
}

impl Default for GasFees {
    /// Returns the default maximum fee per gas in both dimensions.
    fn default() -> Self {
        let fee = Felt::new(DEFAULT_MAX_FEE_PER_GAS);
        Self::new(fee, fee)
    }
}

impl Empty for GasFees {
    fn empty() -> Self {
        Self::new(ZERO, ZERO)
    }

    fn is_empty(&self) -> bool {
        self.fee_per_da_gas == ZERO && self.fee_per_l2_gas == ZERO
    }
}

impl FieldSerializable for GasFees {
    const NUM_FIELDS: usize = crate::GAS_FEES_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_felt(self.fee_per_da_gas);
        target.write_felt(self.fee_per_l2_gas);
    }
}

impl FieldDeserializable for GasFees {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            fee_per_da_gas: source.read_felt()?,
            fee_per_l2_gas: source.read_felt()?,
        })
    }
}

impl Serializable for GasFees {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.fee_per_da_gas.write_into(target);
        self.fee_per_l2_gas.write_into(target);
    }
}

impl Deserializable for GasFees {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let fee_per_da_gas = Felt::read_from(source)?;
        let fee_per_l2_gas = Felt::read_from(source)?;
        Ok(Self { fee_per_da_gas, fee_per_l2_gas })
    }
}
