use super::{CallContext, MaxBlockNumber, PrivateCallRequest, PublicCallRequest};
use crate::{
    Felt, FieldDeserializationError, MAX_ENCRYPTED_LOGS_PER_CALL,
    MAX_KEY_VALIDATION_REQUESTS_PER_CALL, MAX_L2_TO_L1_MSGS_PER_CALL,
    MAX_NOTE_ENCRYPTED_LOGS_PER_CALL, MAX_NOTE_HASH_READ_REQUESTS_PER_CALL,
    MAX_NOTE_HASHES_PER_CALL, MAX_NULLIFIER_READ_REQUESTS_PER_CALL, MAX_NULLIFIERS_PER_CALL,
    MAX_PRIVATE_CALL_STACK_LENGTH_PER_CALL, MAX_PUBLIC_CALL_STACK_LENGTH_PER_CALL,
    MAX_UNENCRYPTED_LOGS_PER_CALL, ZERO,
    block::Header,
    codec::{
        BoundedArray, Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter,
    },
    hash::{DomainHashable, GeneratorIndex},
    side_effects::{
        KeyValidationRequestAndGenerator, L2ToL1Message, LogHash, NoteHash, NoteLogHash, Nullifier,
        ReadRequest,
    },
    transaction::TxContext,
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// PRIVATE CIRCUIT PUBLIC INPUTS
// ================================================================================================

/// The public inputs of a private function circuit.
///
/// Everything a private function exposes to the private kernel: the requests it made, the side
/// effects it emitted and the historical state it executed against. Side effects are
/// unscoped here because the kernel knows which contract produced them.
///
/// The field order of this struct is the order in which the fields are laid out in the field
/// form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateCircuitPublicInputs {
    pub call_context: CallContext,
    pub args_hash: Felt,
    pub returns_hash: Felt,
    pub min_revertible_side_effect_counter: u32,
    pub is_fee_payer: bool,
    pub max_block_number: MaxBlockNumber,
    pub note_hash_read_requests: BoundedArray<ReadRequest, MAX_NOTE_HASH_READ_REQUESTS_PER_CALL>,
    pub nullifier_read_requests: BoundedArray<ReadRequest, MAX_NULLIFIER_READ_REQUESTS_PER_CALL>,
    pub key_validation_requests_and_generators:
        BoundedArray<KeyValidationRequestAndGenerator, MAX_KEY_VALIDATION_REQUESTS_PER_CALL>,
    pub note_hashes: BoundedArray<NoteHash, MAX_NOTE_HASHES_PER_CALL>,
    pub nullifiers: BoundedArray<Nullifier, MAX_NULLIFIERS_PER_CALL>,
    pub private_call_requests:
        BoundedArray<PrivateCallRequest, MAX_PRIVATE_CALL_STACK_LENGTH_PER_CALL>,
    pub public_call_requests:
        BoundedArray<PublicCallRequest, MAX_PUBLIC_CALL_STACK_LENGTH_PER_CALL>,
    pub public_teardown_call_request: PublicCallRequest,
    pub l2_to_l1_msgs: BoundedArray<L2ToL1Message, MAX_L2_TO_L1_MSGS_PER_CALL>,
    pub start_side_effect_counter: u32,
    pub end_side_effect_counter: u32,
    pub note_encrypted_logs_hashes: BoundedArray<NoteLogHash, MAX_NOTE_ENCRYPTED_LOGS_PER_CALL>,
    pub encrypted_logs_hashes: BoundedArray<LogHash, MAX_ENCRYPTED_LOGS_PER_CALL>,
    pub unencrypted_logs_hashes: BoundedArray<LogHash, MAX_UNENCRYPTED_LOGS_PER_CALL>,
    pub historical_header: Header,
    pub tx_context: TxContext,
}

impl DomainHashable for PrivateCircuitPublicInputs {
    const DOMAIN: GeneratorIndex = GeneratorIndex::PrivateCircuitPublicInputs;
}

impl Empty for PrivateCircuitPublicInputs {
    fn empty() -> Self {
        Self {
            call_context: CallContext::empty(),
            args_hash: ZERO,
            returns_hash: ZERO,
            min_revertible_side_effect_counter: 0,
            is_fee_payer: false,
            max_block_number: MaxBlockNumber::empty(),
            note_hash_read_requests: BoundedArray::empty(),
            nullifier_read_requests: BoundedArray::empty(),
            key_validation_requests_and_generators: BoundedArray::empty(),
            note_hashes: BoundedArray::empty(),
            nullifiers: BoundedArray::empty(),
            private_call_requests: BoundedArray::empty(),
            public_call_requests: BoundedArray::empty(),
            public_teardown_call_request: PublicCallRequest::empty(),
            l2_to_l1_msgs: BoundedArray::empty(),
            start_side_effect_counter: 0,
            end_side_effect_counter: 0,
            note_encrypted_logs_hashes: BoundedArray::empty(),
            encrypted_logs_hashes: BoundedArray::empty(),
            unencrypted_logs_hashes: BoundedArray::empty(),
            historical_header: Header::empty(),
            tx_context: TxContext::empty(),
        }
    }
}

impl FieldSerializable for PrivateCircuitPublicInputs {
    const NUM_FIELDS: usize = crate::PRIVATE_CIRCUIT_PUBLIC_INPUTS_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.call_context);
        target.write_felt(self.args_hash);
        target.write_felt(self.returns_hash);
        target.write_u32(self.min_revertible_side_effect_counter);
        target.write_bool(self.is_fee_payer);
        target.write(&self.max_block_number);
        target.write(&self.note_hash_read_requests);
        target.write(&self.nullifier_read_requests);
        target.write(&self.key_validation_requests_and_generators);
        target.write(&self.note_hashes);
        target.write(&self.nullifiers);
        target.write(&self.private_call_requests);
        target.write(&self.public_call_requests);
        target.write(&self.public_teardown_call_request);
        target.write(&self.l2_to_l1_msgs);
        target.write_u32(self.start_side_effect_counter);
        target.write_u32(self.end_side_effect_counter);
        target.write(&self.note_encrypted_logs_hashes);
        target.write(&self.encrypted_logs_hashes);
        target.write(&self.unencrypted_logs_hashes);
        target.write(&self.historical_header);
        target.write(&self.tx_context);
    }
}

impl FieldDeserializable for PrivateCircuitPublicInputs {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            call_context: source.read()?,
            args_hash: source.read_felt()?,
            returns_hash: source.read_felt()?,
            min_revertible_side_effect_counter: source.read_u32()?,
            is_fee_payer: source.read_bool()?,
            max_block_number: source.read()?,
            note_hash_read_requests: source.read()?,
            nullifier_read_requests: source.read()?,
            key_validation_requests_and_generators: source.read()?,
            note_hashes: source.read()?,
            nullifiers: source.read()?,
            private_call_requests: source.read()?,
            public_call_requests: source.read()?,
            public_teardown_call_request: source.read()?,
            l2_to_l1_msgs: source.read()?,
            start_side_effect_counter: source.read_u32()?,
            end_side_effect_counter: source.read_u32()?,
            note_encrypted_logs_hashes: source.read()?,
            encrypted_logs_hashes: source.read()?,
            unencrypted_logs_hashes: source.read()?,
            historical_header: source.read()?,
            tx_context: source.read()?,
        })
    }
}

impl Serializable for PrivateCircuitPublicInputs {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.call_context.write_into(target);
        self.args_hash.write_into(target);
        self.returns_hash.write_into(target);
        target.write_u32(self.min_revertible_side_effect_counter);
        target.write_bool(self.is_fee_payer);
        self.max_block_number.write_into(target);
        self.note_hash_read_requests.write_into(target);
        self.nullifier_read_requests.write_into(target);
        self.key_validation_requests_and_generators.write_into(target);
        self.note_hashes.write_into(target);
        self.nullifiers.write_into(target);
        self.private_call_requests.write_into(target);
        self.public_call_requests.write_into(target);
        self.public_teardown_call_request.write_into(target);
        self.l2_to_l1_msgs.write_into(target);
        target.write_u32(self.start_side_effect_counter);
        target.write_u32(self.end_side_effect_counter);
        self.note_encrypted_logs_hashes.write_into(target);
        self.encrypted_logs_hashes.write_into(target);
        self.unencrypted_logs_hashes.write_into(target);
        self.historical_header.write_into(target);
        self.tx_context.write_into(target);
    }
}

impl Deserializable for PrivateCircuitPublicInputs {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        Ok(Self {
            call_context: CallContext::read_from(source)?,
            args_hash: Felt::read_from(source)?,
            returns_hash: Felt::read_from(source)?,
            min_revertible_side_effect_counter: source.read_u32()?,
            is_fee_payer: source.read_bool()?,
            max_block_number: MaxBlockNumber::read_from(source)?,
            note_hash_read_requests: BoundedArray::read_from(source)?,
            nullifier_read_requests: BoundedArray::read_from(source)?,
            key_validation_requests_and_generators: BoundedArray::read_from(source)?,
            note_hashes: BoundedArray::read_from(source)?,
            nullifiers: BoundedArray::read_from(source)?,
            private_call_requests: BoundedArray::read_from(source)?,
            public_call_requests: BoundedArray::read_from(source)?,
            public_teardown_call_request: PublicCallRequest::read_from(source)?,
            l2_to_l1_msgs: BoundedArray::read_from(source)?,
            start_side_effect_counter: source.read_u32()?,
            end_side_effect_counter: source.read_u32()?,
            note_encrypted_logs_hashes: BoundedArray::read_from(source)?,
            encrypted_logs_hashes: BoundedArray::read_from(source)?,
            unencrypted_logs_hashes: BoundedArray::read_from(source)?,
            historical_header: Header::read_from(source)?,
            tx_context: TxContext::read_from(source)?,
        })
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PRIVATE_CIRCUIT_PUBLIC_INPUTS_LENGTH;

    #[test]
    fn empty_inputs_are_all_zero() {
        let inputs = PrivateCircuitPublicInputs::empty();
        let fields = inputs.to_fields();

        assert_eq!(fields.len(), PRIVATE_CIRCUIT_PUBLIC_INPUTS_LENGTH);
        assert!(fields.iter().all(|field| *field == ZERO));
        assert!(inputs.is_empty());
    }

    #[test]
    fn populated_inputs_round_trip() {
        let inputs = PrivateCircuitPublicInputs::random();

        assert_eq!(
            PrivateCircuitPublicInputs::read_from_fields(&inputs.to_fields()).unwrap(),
            inputs
        );
        assert_eq!(
            PrivateCircuitPublicInputs::read_from_bytes(&inputs.to_bytes()).unwrap(),
            inputs
        );
    }

    #[test]
    fn hash_depends_on_every_side_effect_slot() {
        let inputs = PrivateCircuitPublicInputs::empty();
        let mut with_note_hash = inputs.clone();
        with_note_hash.note_hashes =
            BoundedArray::new(vec![NoteHash::new(Felt::new(1), 1)]).unwrap();

        assert_ne!(inputs.hash(), with_note_hash.hash());
    }
}
