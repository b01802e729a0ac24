use super::{Ordered, Scoped, SideEffect};
use crate::{
    Felt, FieldDeserializationError, ZERO,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    types::AztecAddress,
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// LOG HASH
// ================================================================================================

/// The hash of an emitted log together with the length of the log preimage.
///
/// The length is counted towards data-availability gas, so it travels alongside the hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogHash {
    value: Felt,
    counter: u32,
    length: Felt,
}

impl LogHash {
    pub fn new(value: Felt, counter: u32, length: Felt) -> Self {
        Self { value, counter, length }
    }

    pub fn length(&self) -> Felt {
        self.length
    }

    pub fn scope(self, contract_address: AztecAddress) -> Scoped<Self> {
        Scoped::new(self, contract_address)
    }
}

impl Ordered for LogHash {
    fn counter(&self) -> u32 {
        self.counter
    }
}

impl SideEffect for LogHash {
    fn value(&self) -> Felt {
        self.value
    }
}

impl Empty for LogHash {
    fn empty() -> Self {
        Self { value: ZERO, counter: 0, length: ZERO }
    }

    fn is_empty(&self) -> bool {
        self.value == ZERO && self.counter == 0 && self.length == ZERO
    }
}

impl FieldSerializable for LogHash {
    const NUM_FIELDS: usize = crate::LOG_HASH_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_felt(self.value);
        target.write_u32(self.counter);
        target.write_felt(self.length);
    }
}

impl FieldDeserializable for LogHash {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            value: source.read_felt()?,
            counter: source.read_u32()?,
            length: source.read_felt()?,
        })
    }
}

impl Serializable for LogHash {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.value.write_into(target);
        target.write_u32(self.counter);
        self.length.write_into(target);
    }
}

impl Deserializable for LogHash {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let value = Felt::read_from(source)?;
        let counter = source.read_u32()?;
        let length = Felt::read_from(source)?;
        Ok(Self { value, counter, length })
    }
}

// NOTE LOG HASH
// ================================================================================================

/// The hash of an encrypted note log, linked to the note hash it was emitted for through
/// `note_hash_counter`.
///
/// Note logs are never scoped: the note hash they point at already carries the contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoteLogHash {
    value: Felt,
    counter: u32,
    length: Felt,
    note_hash_counter: u32,
}

impl NoteLogHash {
    pub fn new(value: Felt, counter: u32, length: Felt, note_hash_counter: u32) -> Self {
        Self { value, counter, length, note_hash_counter }
    }

    pub fn length(&self) -> Felt {
        self.length
    }

    pub fn note_hash_counter(&self) -> u32 {
        self.note_hash_counter
    }

    /// Drops the link to the note hash, keeping only the log hash.
    pub fn expose_to_public(&self) -> LogHash {
        LogHash::new(self.value, self.counter, self.length)
    }
}

impl Ordered for NoteLogHash {
    fn counter(&self) -> u32 {
        self.counter
    }
}

impl SideEffect for NoteLogHash {
    fn value(&self) -> Felt {
        self.value
    }
}

impl Empty for NoteLogHash {
    fn empty() -> Self {
        Self {
            value: ZERO,
            counter: 0,
            length: ZERO,
            note_hash_counter: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.value == ZERO
            && self.counter == 0
            && self.length == ZERO
            && self.note_hash_counter == 0
    }
}

impl FieldSerializable for NoteLogHash {
    const NUM_FIELDS: usize = crate::NOTE_LOG_HASH_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_felt(self.value);
        target.write_u32(self.counter);
        target.write_felt(self.length);
        target.write_u32(self.note_hash_counter);
    }
}

impl FieldDeserializable for NoteLogHash {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            value: source.read_felt()?,
            counter: source.read_u32()?,
            length: source.read_felt()?,
            note_hash_counter: source.read_u32()?,
        })
    }
}

impl Serializable for NoteLogHash {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.value.write_into(target);
        target.write_u32(self.counter);
        self.length.write_into(target);
        target.write_u32(self.note_hash_counter);
    }
}

impl Deserializable for NoteLogHash {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let value = Felt::read_from(source)?;
        let counter = source.read_u32()?;
        let length = Felt::read_from(source)?;
        let note_hash_counter = source.read_u32()?;
        Ok(Self { value, counter, length, note_hash_counter })
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_log_hash_layout() {
        let log = NoteLogHash::new(Felt::new(11), 3, Felt::new(64), 2);
        assert_eq!(
            log.to_fields(),
            vec![Felt::new(11), Felt::new(3), Felt::new(64), Felt::new(2)]
        );
        assert_eq!(NoteLogHash::read_from_bytes(&log.to_bytes()).unwrap(), log);
        assert_eq!(log.expose_to_public(), LogHash::new(Felt::new(11), 3, Felt::new(64)));
    }

    #[test]
    fn empty_log_hashes() {
        assert!(LogHash::empty().is_empty());
        assert!(NoteLogHash::default().is_empty());
        assert!(!NoteLogHash::new(ZERO, 0, ZERO, 1).is_empty());
        assert_eq!(LogHash::empty().to_fields(), vec![ZERO; crate::LOG_HASH_LENGTH]);
    }
}
