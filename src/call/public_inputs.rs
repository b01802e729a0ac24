use super::CallContext;
use crate::{
    Felt, FieldDeserializationError, MAX_L2_TO_L1_MSGS_PER_CALL,
    MAX_NOTE_HASH_READ_REQUESTS_PER_CALL, MAX_NOTE_HASHES_PER_CALL,
    MAX_NULLIFIER_NON_EXISTENT_READ_REQUESTS_PER_CALL, MAX_NULLIFIER_READ_REQUESTS_PER_CALL,
    MAX_NULLIFIERS_PER_CALL, MAX_PUBLIC_CALL_STACK_LENGTH_PER_CALL, MAX_PUBLIC_DATA_READS_PER_CALL,
    MAX_PUBLIC_DATA_UPDATE_REQUESTS_PER_CALL, MAX_UNENCRYPTED_LOGS_PER_CALL, ZERO,
    block::{GlobalVariables, Header},
    codec::{
        BoundedArray, Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter,
    },
    gas::Gas,
    hash::{DomainHashable, GeneratorIndex},
    side_effects::{
        ContractStorageRead, ContractStorageUpdateRequest, L2ToL1Message, LogHash, NoteHash,
        Nullifier, ReadRequest,
    },
    types::{AztecAddress, RevertCode},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// PUBLIC CIRCUIT PUBLIC INPUTS
// ================================================================================================

/// The public inputs of a public function execution.
///
/// Nested public calls are referenced by the hashes of their call stack items. The gas fields
/// record the gas left before and after the execution in each dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicCircuitPublicInputs {
    pub call_context: CallContext,
    pub args_hash: Felt,
    pub returns_hash: Felt,
    pub note_hash_read_requests: BoundedArray<ReadRequest, MAX_NOTE_HASH_READ_REQUESTS_PER_CALL>,
    pub nullifier_read_requests: BoundedArray<ReadRequest, MAX_NULLIFIER_READ_REQUESTS_PER_CALL>,
    pub nullifier_non_existent_read_requests:
        BoundedArray<ReadRequest, MAX_NULLIFIER_NON_EXISTENT_READ_REQUESTS_PER_CALL>,
    pub contract_storage_update_requests:
        BoundedArray<ContractStorageUpdateRequest, MAX_PUBLIC_DATA_UPDATE_REQUESTS_PER_CALL>,
    pub contract_storage_reads: BoundedArray<ContractStorageRead, MAX_PUBLIC_DATA_READS_PER_CALL>,
    pub public_call_stack_hashes: BoundedArray<Felt, MAX_PUBLIC_CALL_STACK_LENGTH_PER_CALL>,
    pub note_hashes: BoundedArray<NoteHash, MAX_NOTE_HASHES_PER_CALL>,
    pub nullifiers: BoundedArray<Nullifier, MAX_NULLIFIERS_PER_CALL>,
    pub l2_to_l1_msgs: BoundedArray<L2ToL1Message, MAX_L2_TO_L1_MSGS_PER_CALL>,
    pub start_side_effect_counter: u32,
    pub end_side_effect_counter: u32,
    pub unencrypted_logs_hashes: BoundedArray<LogHash, MAX_UNENCRYPTED_LOGS_PER_CALL>,
    pub historical_header: Header,
    pub global_variables: GlobalVariables,
    pub prover_address: AztecAddress,
    pub revert_code: RevertCode,
    pub start_gas_left: Gas,
    pub end_gas_left: Gas,
    pub transaction_fee: Felt,
}

impl PublicCircuitPublicInputs {
    /// Returns the gas consumed by the execution.
    pub fn gas_used(&self) -> Gas {
        self.start_gas_left - self.end_gas_left
    }
}

impl DomainHashable for PublicCircuitPublicInputs {
    const DOMAIN: GeneratorIndex = GeneratorIndex::PublicCircuitPublicInputs;
}

impl Empty for PublicCircuitPublicInputs {
    fn empty() -> Self {
        Self {
            call_context: CallContext::empty(),
            args_hash: ZERO,
            returns_hash: ZERO,
            note_hash_read_requests: BoundedArray::empty(),
            nullifier_read_requests: BoundedArray::empty(),
            nullifier_non_existent_read_requests: BoundedArray::empty(),
            contract_storage_update_requests: BoundedArray::empty(),
            contract_storage_reads: BoundedArray::empty(),
            public_call_stack_hashes: BoundedArray::empty(),
            note_hashes: BoundedArray::empty(),
            nullifiers: BoundedArray::empty(),
            l2_to_l1_msgs: BoundedArray::empty(),
            start_side_effect_counter: 0,
            end_side_effect_counter: 0,
            unencrypted_logs_hashes: BoundedArray::empty(),
            historical_header: Header::empty(),
            global_variables: GlobalVariables::empty(),
            prover_address: AztecAddress::ZERO,
            revert_code: RevertCode::empty(),
            start_gas_left: Gas::empty(),
            end_gas_left: Gas::empty(),
            transaction_fee: ZERO,
        }
    }
}

impl FieldSerializable for PublicCircuitPublicInputs {
    const NUM_FIELDS: usize = crate::PUBLIC_CIRCUIT_PUBLIC_INPUTS_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.call_context);
        target.write_felt(self.args_hash);
        target.write_felt(self.returns_hash);
        target.write(&self.note_hash_read_requests);
        target.write(&self.nullifier_read_requests);
        target.write(&self.nullifier_non_existent_read_requests);
        target.write(&self.contract_storage_update_requests);
        target.write(&self.contract_storage_reads);
        target.write(&self.public_call_stack_hashes);
        target.write(&self.note_hashes);
        target.write(&self.nullifiers);
        target.write(&self.l2_to_l1_msgs);
        target.write_u32(self.start_side_effect_counter);
        target.write_u32(self.end_side_effect_counter);
        target.write(&self.unencrypted_logs_hashes);
        target.write(&self.historical_header);
        target.write(&self.global_variables);
        target.write(&self.prover_address);
        target.write(&self.revert_code);
        target.write(&self.start_gas_left);
        target.write(&self.end_gas_left);
        target.write_felt(self.transaction_fee);
    }
}

impl FieldDeserializable for PublicCircuitPublicInputs {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            call_context: source.read()?,
            args_hash: source.read_felt()?,
            returns_hash: source.read_felt()?,
            note_hash_read_requests: source.read()?,
            nullifier_read_requests: source.read()?,
            nullifier_non_existent_read_requests: source.read()?,
            contract_storage_update_requests: source.read()?,
            contract_storage_reads: source.read()?,
            public_call_stack_hashes: source.read()?,
            note_hashes: source.read()?,
            nullifiers: source.read()?,
            l2_to_l1_msgs: source.read()?,
            start_side_effect_counter: source.read_u32()?,
            end_side_effect_counter: source.read_u32()?,
            unencrypted_logs_hashes: source.read()?,
            historical_header: source.read()?,
            global_variables: source.read()?,
            prover_address: source.read()?,
            revert_code: source.read()?,
            start_gas_left: source.read()?,
            end_gas_left: source.read()?,
            transaction_fee: source.read_felt()?,
        })
    }
}

impl Serializable for PublicCircuitPublicInputs {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.call_context.write_into(target);
        self.args_hash.write_into(target);
        self.returns_hash.write_into(target);
        self.note_hash_read_requests.write_into(target);
        self.nullifier_read_requests.write_into(target);
        self.nullifier_non_existent_read_requests.write_into(target);
        self.contract_storage_update_requests.write_into(target);
        self.contract_storage_reads.write_into(target);
        self.public_call_stack_hashes.write_into(target);
        self.note_hashes.write_into(target);
        self.nullifiers.write_into(target);
        self.l2_to_l1_msgs.write_into(target);
        target.write_u32(self.start_side_effect_counter);
        target.write_u32(self.end_side_effect_counter);
        self.unencrypted_logs_hashes.write_into(target);
        self.historical_header.write_into(target);
        self.global_variables.write_into(target);
        self.prover_address.write_into(target);
        self.revert_code.write_into(target);
        self.start_gas_left.write_into(target);
        self.end_gas_left.write_into(target);
        self.transaction_fee.write_into(target);
    }
}

impl Deserializable for PublicCircuitPublicInputs {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        Ok(Self {
            call_context: CallContext::read_from(source)?,
            args_hash: Felt::read_from(source)?,
            returns_hash: Felt::read_from(source)?,
            note_hash_read_requests: BoundedArray::read_from(source)?,
            nullifier_read_requests: BoundedArray::read_from(source)?,
            nullifier_non_existent_read_requests: BoundedArray::read_from(source)?,
            contract_storage_update_requests: BoundedArray::read_from(source)?,
            contract_storage_reads: BoundedArray::read_from(source)?,
            public_call_stack_hashes: BoundedArray::read_from(source)?,
            note_hashes: BoundedArray::read_from(source)?,
            nullifiers: BoundedArray::read_from(source)?,
            l2_to_l1_msgs: BoundedArray::read_from(source)?,
            start_side_effect_counter: source.read_u32()?,
            end_side_effect_counter: source.read_u32()?,
            unencrypted_logs_hashes: BoundedArray::read_from(source)?,
            historical_header: Header::read_from(source)?,
            global_variables: GlobalVariables::read_from(source)?,
            prover_address: AztecAddress::read_from(source)?,
            revert_code: RevertCode::read_from(source)?,
            start_gas_left: Gas::read_from(source)?,
            end_gas_left: Gas::read_from(source)?,
            transaction_fee: Felt::read_from(source)?,
        })
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PUBLIC_CIRCUIT_PUBLIC_INPUTS_LENGTH;

    #[test]
    fn empty_inputs_layout() {
        let inputs = PublicCircuitPublicInputs::empty();

        assert_eq!(inputs.to_fields().len(), PUBLIC_CIRCUIT_PUBLIC_INPUTS_LENGTH);
        assert_eq!(
            PublicCircuitPublicInputs::read_from_fields(&inputs.to_fields()).unwrap(),
            inputs
        );
    }

    #[test]
    fn transaction_fee_is_the_last_field() {
        let mut inputs = PublicCircuitPublicInputs::empty();
        inputs.transaction_fee = Felt::new(1234);
        inputs.start_gas_left = Gas::new(100, 50);
        inputs.end_gas_left = Gas::new(60, 20);

        let fields = inputs.to_fields();
        assert_eq!(fields[PUBLIC_CIRCUIT_PUBLIC_INPUTS_LENGTH - 1], Felt::new(1234));
        assert_eq!(inputs.gas_used(), Gas::new(40, 30));
    }

    #[test]
    fn populated_inputs_round_trip() {
        let inputs = PublicCircuitPublicInputs::random();

        assert_eq!(
            PublicCircuitPublicInputs::read_from_bytes(&inputs.to_bytes()).unwrap(),
            inputs
        );
        assert_ne!(inputs.hash(), PublicCircuitPublicInputs::empty().hash());
    }
}
