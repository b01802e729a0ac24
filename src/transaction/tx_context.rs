use crate::{
    Felt, FieldDeserializationError, ZERO,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    gas::GasSettings,
    hash::{DomainHashable, GeneratorIndex},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

/// Values fixed for the whole lifetime of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxContext {
    chain_id: Felt,
    version: Felt,
    gas_settings: GasSettings,
}

impl TxContext {
    pub fn new(chain_id: Felt, version: Felt, gas_settings: GasSettings) -> Self {
        Self { chain_id, version, gas_settings }
    }

    pub fn chain_id(&self) -> Felt {
        self.chain_id
    }

    pub fn version(&self) -> Felt {
        self.version
    }

    pub fn gas_settings(&self) -> &GasSettings {
        &self.gas_settings
    }
}

impl DomainHashable for TxContext {
    const DOMAIN: GeneratorIndex = GeneratorIndex::TxContext;
}

impl Empty for TxContext {
    fn empty() -> Self {
        Self::new(ZERO, ZERO, GasSettings::empty())
    }

    fn is_empty(&self) -> bool {
        self.chain_id == ZERO && self.version == ZERO && self.gas_settings.is_empty()
    }
}

impl FieldSerializable for TxContext {
    const NUM_FIELDS: usize = crate::TX_CONTEXT_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_felt(self.chain_id);
        target.write_felt(self.version);
        target.write(&self.gas_settings);
    }
}

impl FieldDeserializable for TxContext {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            chain_id: source.read_felt()?,
            version: source.read_felt()?,
            gas_settings: source.read()?,
        })
    }
}

impl Serializable for TxContext {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.chain_id.write_into(target);
        self.version.write_into(target);
        self.gas_settings.write_into(target);
    }
}

impl Deserializable for TxContext {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let chain_id = Felt::read_from(source)?;
        let version = Felt::read_from(source)?;
        let gas_settings = GasSettings::read_from(source)?;
        Ok(Self { chain_id, version, gas_settings })
    }
}
