use winter_rand_utils as rand;

use crate::{
    Felt,
    block::{
        AppendOnlyTreeSnapshot, ContentCommitment, GlobalVariables, Header, PartialStateReference,
        StateReference,
    },
    call::{
        CallContext, FunctionData, MaxBlockNumber, PrivateCallRequest, PrivateCircuitPublicInputs,
        PublicCallRequest, PublicCircuitPublicInputs,
    },
    codec::BoundedArray,
    gas::{Gas, GasFees, GasSettings},
    side_effects::{
        ContractStorageRead, ContractStorageUpdateRequest, KeyValidationRequest,
        KeyValidationRequestAndGenerator, L2ToL1Message, LogHash, NoteHash, NoteLogHash, Nullifier,
        ReadRequest,
    },
    transaction::{TxContext, TxRequest},
    types::{AztecAddress, EthAddress, FunctionSelector, Point, RevertCode},
};

// PRIMITIVES
// ================================================================================================

fn felt() -> Felt {
    rand::rand_value()
}

fn counter() -> u32 {
    rand::rand_value()
}

fn flag() -> bool {
    rand::rand_value::<u8>() & 1 == 1
}

/// Returns an array in which every slot is populated.
fn filled<T, const N: usize>(f: impl Fn() -> T) -> BoundedArray<T, N> {
    BoundedArray::from_fn(|_| f())
}

impl AztecAddress {
    pub fn random() -> Self {
        Self::new(felt())
    }
}

impl EthAddress {
    pub fn random() -> Self {
        Self::new(rand::rand_array())
    }
}

impl FunctionSelector {
    pub fn random() -> Self {
        Self::new(rand::rand_value())
    }
}

impl Point {
    pub fn random() -> Self {
        Self::new(felt(), felt(), false)
    }
}

impl RevertCode {
    pub fn random() -> Self {
        Self::try_from(rand::rand_value::<u8>() % 4).expect("revert codes 0 to 3 are valid")
    }
}

// GAS
// ================================================================================================

impl Gas {
    pub fn random() -> Self {
        Self::new(rand::rand_value(), rand::rand_value())
    }
}

impl GasFees {
    pub fn random() -> Self {
        Self::new(felt(), felt())
    }
}

impl GasSettings {
    /// Returns random gas settings whose teardown limits do not exceed the total limits.
    pub fn random() -> Self {
        let gas_limits = Gas::random();
        let teardown = Gas::new(gas_limits.da_gas() / 2, gas_limits.l2_gas() / 2);
        Self::new(gas_limits, teardown, GasFees::random(), felt())
    }
}

// SIDE EFFECTS
// ================================================================================================

impl NoteHash {
    pub fn random() -> Self {
        Self::new(felt(), counter())
    }
}

impl Nullifier {
    pub fn random() -> Self {
        Self::new(felt(), counter(), felt())
    }
}

impl ReadRequest {
    pub fn random() -> Self {
        Self::new(felt(), counter())
    }
}

impl LogHash {
    pub fn random() -> Self {
        Self::new(felt(), counter(), felt())
    }
}

impl NoteLogHash {
    pub fn random() -> Self {
        Self::new(felt(), counter(), felt(), counter())
    }
}

impl L2ToL1Message {
    pub fn random() -> Self {
        Self::new(EthAddress::random(), felt(), counter())
    }
}

impl KeyValidationRequestAndGenerator {
    pub fn random() -> Self {
        Self::new(KeyValidationRequest::new(Point::random(), felt()), felt())
    }
}

impl ContractStorageRead {
    pub fn random() -> Self {
        Self::new(felt(), felt(), counter())
    }
}

impl ContractStorageUpdateRequest {
    pub fn random() -> Self {
        Self::new(felt(), felt(), counter())
    }
}

// BLOCK
// ================================================================================================

impl AppendOnlyTreeSnapshot {
    pub fn random() -> Self {
        Self::new(felt(), counter())
    }
}

impl StateReference {
    pub fn random() -> Self {
        Self::new(
            AppendOnlyTreeSnapshot::random(),
            PartialStateReference::new(
                AppendOnlyTreeSnapshot::random(),
                AppendOnlyTreeSnapshot::random(),
                AppendOnlyTreeSnapshot::random(),
            ),
        )
    }
}

impl GlobalVariables {
    pub fn random() -> Self {
        Self::new(
            felt(),
            felt(),
            counter(),
            felt(),
            u64::from(counter()),
            EthAddress::random(),
            AztecAddress::random(),
            GasFees::random(),
        )
    }
}

impl Header {
    pub fn random() -> Self {
        Self::new(
            AppendOnlyTreeSnapshot::random(),
            ContentCommitment::new(felt(), felt(), felt(), felt()),
            StateReference::random(),
            GlobalVariables::random(),
            felt(),
        )
    }
}

// CALLS AND TRANSACTIONS
// ================================================================================================

impl CallContext {
    pub fn random() -> Self {
        Self::new(
            AztecAddress::random(),
            AztecAddress::random(),
            FunctionSelector::random(),
            flag(),
            flag(),
        )
    }
}

impl FunctionData {
    pub fn random() -> Self {
        Self::new(FunctionSelector::random(), flag())
    }
}

impl PrivateCallRequest {
    pub fn random() -> Self {
        let start = counter() / 2;
        Self::new(CallContext::random(), felt(), felt(), start, start + 10)
    }
}

impl PublicCallRequest {
    pub fn random() -> Self {
        Self::new(CallContext::random(), felt(), counter())
    }
}

impl TxContext {
    pub fn random() -> Self {
        Self::new(felt(), felt(), GasSettings::random())
    }
}

impl TxRequest {
    pub fn random() -> Self {
        Self::new(AztecAddress::random(), FunctionData::random(), felt(), TxContext::random())
    }
}

impl PrivateCircuitPublicInputs {
    /// Returns public inputs in which every side effect slot is populated.
    pub fn random() -> Self {
        Self {
            call_context: CallContext::random(),
            args_hash: felt(),
            returns_hash: felt(),
            min_revertible_side_effect_counter: counter(),
            is_fee_payer: flag(),
            max_block_number: MaxBlockNumber::new(Some(counter())),
            note_hash_read_requests: filled(ReadRequest::random),
            nullifier_read_requests: filled(ReadRequest::random),
            key_validation_requests_and_generators: filled(
                KeyValidationRequestAndGenerator::random,
            ),
            note_hashes: filled(NoteHash::random),
            nullifiers: filled(Nullifier::random),
            private_call_requests: filled(PrivateCallRequest::random),
            public_call_requests: filled(PublicCallRequest::random),
            public_teardown_call_request: PublicCallRequest::random(),
            l2_to_l1_msgs: filled(L2ToL1Message::random),
            start_side_effect_counter: counter(),
            end_side_effect_counter: counter(),
            note_encrypted_logs_hashes: filled(NoteLogHash::random),
            encrypted_logs_hashes: filled(LogHash::random),
            unencrypted_logs_hashes: filled(LogHash::random),
            historical_header: Header::random(),
            tx_context: TxContext::random(),
        }
    }
}

impl PublicCircuitPublicInputs {
    /// Returns public inputs in which every side effect slot is populated.
    pub fn random() -> Self {
        let start_gas_left = Gas::random();
        Self {
            call_context: CallContext::random(),
            args_hash: felt(),
            returns_hash: felt(),
            note_hash_read_requests: filled(ReadRequest::random),
            nullifier_read_requests: filled(ReadRequest::random),
            nullifier_non_existent_read_requests: filled(ReadRequest::random),
            contract_storage_update_requests: filled(ContractStorageUpdateRequest::random),
            contract_storage_reads: filled(ContractStorageRead::random),
            public_call_stack_hashes: filled(felt),
            note_hashes: filled(NoteHash::random),
            nullifiers: filled(Nullifier::random),
            l2_to_l1_msgs: filled(L2ToL1Message::random),
            start_side_effect_counter: counter(),
            end_side_effect_counter: counter(),
            unencrypted_logs_hashes: filled(LogHash::random),
            historical_header: Header::random(),
            global_variables: GlobalVariables::random(),
            prover_address: AztecAddress::random(),
            revert_code: RevertCode::random(),
            start_gas_left,
            end_gas_left: Gas::new(start_gas_left.da_gas() / 2, start_gas_left.l2_gas() / 2),
            transaction_fee: felt(),
        }
    }
}
