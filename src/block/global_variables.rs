use crate::{
    Felt, FieldDeserializationError, ZERO,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    gas::GasFees,
    hash::{DomainHashable, GeneratorIndex},
    types::{AztecAddress, EthAddress},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

/// Values shared by every transaction of a block.
///
/// # Field layout
///
/// ```text
/// [chain_id, version, block_number, slot_number, timestamp, coinbase (5), fee_recipient,
///  gas_fees (2)]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalVariables {
    chain_id: Felt,
    version: Felt,
    block_number: u32,
    slot_number: Felt,
    timestamp: u64,
    coinbase: EthAddress,
    fee_recipient: AztecAddress,
    gas_fees: GasFees,
}

impl GlobalVariables {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        chain_id: Felt,
        version: Felt,
        block_number: u32,
        slot_number: Felt,
        timestamp: u64,
        coinbase: EthAddress,
        fee_recipient: AztecAddress,
        gas_fees: GasFees,
    ) -> Self {
        Self {
            chain_id,
            version,
            block_number,
            slot_number,
            timestamp,
            coinbase,
            fee_recipient,
            gas_fees,
        }
    }

    pub fn chain_id(&self) -> Felt {
        self.chain_id
    }

    pub fn version(&self) -> Felt {
        self.version
    }

    pub fn block_number(&self) -> u32 {
        self.block_number
    }

    pub fn slot_number(&self) -> Felt {
        self.slot_number
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn coinbase(&self) -> EthAddress {
        self.coinbase
    }

    pub fn fee_recipient(&self) -> AztecAddress {
        self.fee_recipient
    }

    pub fn gas_fees(&self) -> &GasFees {
        &self.gas_fees
    }
}

impl DomainHashable for GlobalVariables {
    const DOMAIN: GeneratorIndex = GeneratorIndex::GlobalVariables;
}

impl Empty for GlobalVariables {
    fn empty() -> Self {
        Self {
            chain_id: ZERO,
            version: ZERO,
            block_number: 0,
            slot_number: ZERO,
            timestamp: 0,
            coinbase: EthAddress::ZERO,
            fee_recipient: AztecAddress::ZERO,
            gas_fees: GasFees::empty(),
        }
    }

    fn is_empty(&self) -> bool {
        self.chain_id == ZERO
            && self.version == ZERO
            && self.block_number == 0
            && self.slot_number == ZERO
            && self.timestamp == 0
            && self.coinbase.is_zero()
            && self.fee_recipient.is_zero()
            && self.gas_fees.is_empty()
    }
}

impl FieldSerializable for GlobalVariables {
    const NUM_FIELDS: usize = crate::GLOBAL_VARIABLES_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_felt(self.chain_id);
        target.write_felt(self.version);
        target.write_u32(self.block_number);
        target.write_felt(self.slot_number);
        target.write_u64(self.timestamp);
        target.write(&self.coinbase);
        target.write(&self.fee_recipient);
        target.write(&self.gas_fees);
    }
}

impl FieldDeserializable for GlobalVariables {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            chain_id: source.read_felt()?,
            version: source.read_felt()?,
            block_number: source.read_u32()?,
            slot_number: source.read_felt()?,
            timestamp: source.read_u64()?,
            coinbase: source.read()?,
            fee_recipient: source.read()?,
            gas_fees: source.read()?,
        })
    }
}

impl Serializable for GlobalVariables {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.chain_id.write_into(target);
        self.version.write_into(target);
        target.write_u32(self.block_number);
        self.slot_number.write_into(target);
        target.write_u64(self.timestamp);
        self.coinbase.write_into(target);
        self.fee_recipient.write_into(target);
        self.gas_fees.write_into(target);
    }
}

impl Deserializable for GlobalVariables {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        Ok(Self {
            chain_id: Felt::read_from(source)?,
            version: Felt::read_from(source)?,
            block_number: source.read_u32()?,
            slot_number: Felt::read_from(source)?,
            timestamp: source.read_u64()?,
            coinbase: EthAddress::read_from(source)?,
            fee_recipient: AztecAddress::read_from(source)?,
            gas_fees: GasFees::read_from(source)?,
        })
    }
}
