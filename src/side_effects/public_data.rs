use super::Ordered;
use crate::{
    Felt, FieldDeserializationError, ZERO,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// CONTRACT STORAGE READ
// ================================================================================================

/// A read of a public storage slot performed by the currently executing contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContractStorageRead {
    storage_slot: Felt,
    current_value: Felt,
    counter: u32,
}

impl ContractStorageRead {
    pub fn new(storage_slot: Felt, current_value: Felt, counter: u32) -> Self {
        Self { storage_slot, current_value, counter }
    }

    pub fn storage_slot(&self) -> Felt {
        self.storage_slot
    }

    pub fn current_value(&self) -> Felt {
        self.current_value
    }
}

impl Ordered for ContractStorageRead {
    fn counter(&self) -> u32 {
        self.counter
    }
}

impl Empty for ContractStorageRead {
    fn empty() -> Self {
        Self {
            storage_slot: ZERO,
            current_value: ZERO,
            counter: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.storage_slot == ZERO && self.current_value == ZERO && self.counter == 0
    }
}

impl FieldSerializable for ContractStorageRead {
    const NUM_FIELDS: usize = crate::CONTRACT_STORAGE_READ_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_felt(self.storage_slot);
        target.write_felt(self.current_value);
        target.write_u32(self.counter);
    }
}

impl FieldDeserializable for ContractStorageRead {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            storage_slot: source.read_felt()?,
            current_value: source.read_felt()?,
            counter: source.read_u32()?,
        })
    }
}

impl Serializable for ContractStorageRead {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.storage_slot.write_into(target);
        self.current_value.write_into(target);
        target.write_u32(self.counter);
    }
}

impl Deserializable for ContractStorageRead {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let storage_slot = Felt::read_from(source)?;
        let current_value = Felt::read_from(source)?;
        let counter = source.read_u32()?;
        Ok(Self { storage_slot, current_value, counter })
    }
}

// CONTRACT STORAGE UPDATE REQUEST
// ================================================================================================

/// A write of `new_value` to a public storage slot of the currently executing contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContractStorageUpdateRequest {
    storage_slot: Felt,
    new_value: Felt,
    counter: u32,
}

impl ContractStorageUpdateRequest {
    pub fn new(storage_slot: Felt, new_value: Felt, counter: u32) -> Self {
        Self { storage_slot, new_value, counter }
    }

    pub fn storage_slot(&self) -> Felt {
        self.storage_slot
    }

    pub fn new_value(&self) -> Felt {
        self.new_value
    }
}

impl Ordered for ContractStorageUpdateRequest {
    fn counter(&self) -> u32 {
        self.counter
    }
}

impl Empty for ContractStorageUpdateRequest {
    fn empty() -> Self {
        Self { storage_slot: ZERO, new_value: ZERO, counter: 0 }
    }

    fn is_empty(&self) -> bool {
        self.storage_slot == ZERO && self.new_value == ZERO && self.counter == 0
    }
}

impl FieldSerializable for ContractStorageUpdateRequest {
    const NUM_FIELDS: usize = crate::CONTRACT_STORAGE_UPDATE_REQUEST_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_felt(self.storage_slot);
        target.write_felt(self.new_value);
        target.write_u32(self.counter);
    }
}

impl FieldDeserializable for ContractStorageUpdateRequest {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            storage_slot: source.read_felt()?,
            new_value: source.read_felt()?,
            counter: source.read_u32()?,
        })
    }
}

impl Serializable for ContractStorageUpdateRequest {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.storage_slot.write_into(target);
        self.new_value.write_into(target);
        target.write_u32(self.counter);
    }
}

impl Deserializable for ContractStorageUpdateRequest {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let storage_slot = Felt::read_from(source)?;
        let new_value = Felt::read_from(source)?;
        let counter = source.read_u32()?;
        Ok(Self { storage_slot, new_value, counter })
    }
}
