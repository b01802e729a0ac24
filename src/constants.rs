// PER-CALL MAXIMA
// ================================================================================================

/// The maximum number of note hashes a single function call can emit.
pub const MAX_NOTE_HASHES_PER_CALL: usize = 16;

/// The maximum number of nullifiers a single function call can emit.
pub const MAX_NULLIFIERS_PER_CALL: usize = 16;

/// The maximum number of private calls a single private function can enqueue.
pub const MAX_PRIVATE_CALL_STACK_LENGTH_PER_CALL: usize = 4;

/// The maximum number of public calls a single function can enqueue.
pub const MAX_PUBLIC_CALL_STACK_LENGTH_PER_CALL: usize = 16;

/// The maximum number of L2 to L1 messages a single function call can emit.
pub const MAX_L2_TO_L1_MSGS_PER_CALL: usize = 2;

/// The maximum number of public storage writes a single public call can request.
pub const MAX_PUBLIC_DATA_UPDATE_REQUESTS_PER_CALL: usize = 32;

/// The maximum number of public storage reads a single public call can perform.
pub const MAX_PUBLIC_DATA_READS_PER_CALL: usize = 32;

pub const MAX_NOTE_HASH_READ_REQUESTS_PER_CALL: usize = 32;
pub const MAX_NULLIFIER_READ_REQUESTS_PER_CALL: usize = 32;
pub const MAX_NULLIFIER_NON_EXISTENT_READ_REQUESTS_PER_CALL: usize = 32;
pub const MAX_KEY_VALIDATION_REQUESTS_PER_CALL: usize = 16;
pub const MAX_NOTE_ENCRYPTED_LOGS_PER_CALL: usize = 16;
pub const MAX_ENCRYPTED_LOGS_PER_CALL: usize = 4;
pub const MAX_UNENCRYPTED_LOGS_PER_CALL: usize = 4;

// PER-TRANSACTION MAXIMA
// ================================================================================================

pub const MAX_NOTE_HASHES_PER_TX: usize = 64;
pub const MAX_NULLIFIERS_PER_TX: usize = 64;
pub const MAX_NOTE_HASH_READ_REQUESTS_PER_TX: usize = 128;
pub const MAX_NULLIFIER_READ_REQUESTS_PER_TX: usize = 128;
pub const MAX_NULLIFIER_NON_EXISTENT_READ_REQUESTS_PER_TX: usize = 8;
pub const MAX_PUBLIC_DATA_READS_PER_TX: usize = 64;

// TREE HEIGHTS
// ================================================================================================

/// Height of the append-only tree holding note hashes.
pub const NOTE_HASH_TREE_HEIGHT: usize = 32;

/// Height of the indexed tree holding nullifiers.
pub const NULLIFIER_TREE_HEIGHT: usize = 20;

/// Height of the indexed tree holding public storage.
pub const PUBLIC_DATA_TREE_HEIGHT: usize = 40;

/// Height of the tree holding the hashes of all block headers.
pub const ARCHIVE_HEIGHT: usize = 16;

pub const L1_TO_L2_MSG_TREE_HEIGHT: usize = 16;

// ENTRYPOINT
// ================================================================================================

/// The number of calls an app-phase entrypoint payload is padded to.
pub const APP_MAX_CALLS: usize = 4;

/// The number of calls a fee-phase entrypoint payload is padded to.
pub const FEE_MAX_CALLS: usize = 2;

// GAS
// ================================================================================================

pub const DEFAULT_GAS_LIMIT: u32 = 1_000_000_000;
pub const DEFAULT_TEARDOWN_GAS_LIMIT: u32 = 100_000_000;
pub const DEFAULT_MAX_FEE_PER_GAS: u64 = 10;
pub const DEFAULT_INCLUSION_FEE: u64 = 0;

// FIELD LENGTHS
// ================================================================================================
//
// The number of field elements each struct occupies in its circuit-facing form. The circuits read
// inputs at fixed offsets, so each of these must match the circuit definitions exactly.

pub const AZTEC_ADDRESS_LENGTH: usize = 1;
pub const ETH_ADDRESS_LENGTH: usize = 5;
pub const FUNCTION_SELECTOR_LENGTH: usize = 1;
pub const POINT_LENGTH: usize = 3;
pub const REVERT_CODE_LENGTH: usize = 1;

pub const GAS_LENGTH: usize = 2;
pub const GAS_FEES_LENGTH: usize = 2;
pub const GAS_SETTINGS_LENGTH: usize = GAS_LENGTH * 2 + GAS_FEES_LENGTH + 1;

pub const NOTE_HASH_LENGTH: usize = 2;
pub const SCOPED_NOTE_HASH_LENGTH: usize = NOTE_HASH_LENGTH + AZTEC_ADDRESS_LENGTH;
pub const NULLIFIER_LENGTH: usize = 3;
pub const SCOPED_NULLIFIER_LENGTH: usize = NULLIFIER_LENGTH + AZTEC_ADDRESS_LENGTH;
pub const READ_REQUEST_LENGTH: usize = 2;
pub const SCOPED_READ_REQUEST_LENGTH: usize = READ_REQUEST_LENGTH + AZTEC_ADDRESS_LENGTH;
pub const LOG_HASH_LENGTH: usize = 3;
pub const SCOPED_LOG_HASH_LENGTH: usize = LOG_HASH_LENGTH + AZTEC_ADDRESS_LENGTH;
pub const NOTE_LOG_HASH_LENGTH: usize = 4;
pub const L2_TO_L1_MESSAGE_LENGTH: usize = ETH_ADDRESS_LENGTH + 2;
pub const SCOPED_L2_TO_L1_MESSAGE_LENGTH: usize = L2_TO_L1_MESSAGE_LENGTH + AZTEC_ADDRESS_LENGTH;
pub const KEY_VALIDATION_REQUEST_LENGTH: usize = POINT_LENGTH + 1;
pub const KEY_VALIDATION_REQUEST_AND_GENERATOR_LENGTH: usize = KEY_VALIDATION_REQUEST_LENGTH + 1;
pub const SCOPED_KEY_VALIDATION_REQUEST_AND_GENERATOR_LENGTH: usize =
    KEY_VALIDATION_REQUEST_AND_GENERATOR_LENGTH + AZTEC_ADDRESS_LENGTH;
pub const CONTRACT_STORAGE_READ_LENGTH: usize = 3;
pub const CONTRACT_STORAGE_UPDATE_REQUEST_LENGTH: usize = 3;

pub const NULLIFIER_LEAF_PREIMAGE_LENGTH: usize = 3;
pub const PUBLIC_DATA_TREE_LEAF_PREIMAGE_LENGTH: usize = 4;

pub const APPEND_ONLY_TREE_SNAPSHOT_LENGTH: usize = 2;
pub const PARTIAL_STATE_REFERENCE_LENGTH: usize = APPEND_ONLY_TREE_SNAPSHOT_LENGTH * 3;
pub const STATE_REFERENCE_LENGTH: usize =
    APPEND_ONLY_TREE_SNAPSHOT_LENGTH + PARTIAL_STATE_REFERENCE_LENGTH;
pub const CONTENT_COMMITMENT_LENGTH: usize = 4;
pub const GLOBAL_VARIABLES_LENGTH: usize =
    5 + ETH_ADDRESS_LENGTH + AZTEC_ADDRESS_LENGTH + GAS_FEES_LENGTH;
pub const HEADER_LENGTH: usize = APPEND_ONLY_TREE_SNAPSHOT_LENGTH
    + CONTENT_COMMITMENT_LENGTH
    + STATE_REFERENCE_LENGTH
    + GLOBAL_VARIABLES_LENGTH
    + 1;

pub const CALL_CONTEXT_LENGTH: usize = 2 * AZTEC_ADDRESS_LENGTH + FUNCTION_SELECTOR_LENGTH + 2;
pub const FUNCTION_DATA_LENGTH: usize = FUNCTION_SELECTOR_LENGTH + 1;
pub const MAX_BLOCK_NUMBER_LENGTH: usize = 2;
pub const PRIVATE_CALL_REQUEST_LENGTH: usize = CALL_CONTEXT_LENGTH + 4;
pub const SCOPED_PRIVATE_CALL_REQUEST_LENGTH: usize =
    PRIVATE_CALL_REQUEST_LENGTH + AZTEC_ADDRESS_LENGTH;
pub const PUBLIC_CALL_REQUEST_LENGTH: usize = CALL_CONTEXT_LENGTH + 2;

pub const TX_CONTEXT_LENGTH: usize = 2 + GAS_SETTINGS_LENGTH;
pub const TX_REQUEST_LENGTH: usize =
    AZTEC_ADDRESS_LENGTH + FUNCTION_DATA_LENGTH + 1 + TX_CONTEXT_LENGTH;

pub const PRIVATE_CIRCUIT_PUBLIC_INPUTS_LENGTH: usize = CALL_CONTEXT_LENGTH
    + 4
    + MAX_BLOCK_NUMBER_LENGTH
    + READ_REQUEST_LENGTH * MAX_NOTE_HASH_READ_REQUESTS_PER_CALL
    + READ_REQUEST_LENGTH * MAX_NULLIFIER_READ_REQUESTS_PER_CALL
    + KEY_VALIDATION_REQUEST_AND_GENERATOR_LENGTH * MAX_KEY_VALIDATION_REQUESTS_PER_CALL
    + NOTE_HASH_LENGTH * MAX_NOTE_HASHES_PER_CALL
    + NULLIFIER_LENGTH * MAX_NULLIFIERS_PER_CALL
    + PRIVATE_CALL_REQUEST_LENGTH * MAX_PRIVATE_CALL_STACK_LENGTH_PER_CALL
    + PUBLIC_CALL_REQUEST_LENGTH * MAX_PUBLIC_CALL_STACK_LENGTH_PER_CALL
    + PUBLIC_CALL_REQUEST_LENGTH
    + L2_TO_L1_MESSAGE_LENGTH * MAX_L2_TO_L1_MSGS_PER_CALL
    + 2
    + NOTE_LOG_HASH_LENGTH * MAX_NOTE_ENCRYPTED_LOGS_PER_CALL
    + LOG_HASH_LENGTH * MAX_ENCRYPTED_LOGS_PER_CALL
    + LOG_HASH_LENGTH * MAX_UNENCRYPTED_LOGS_PER_CALL
    + HEADER_LENGTH
    + TX_CONTEXT_LENGTH;

pub const PUBLIC_CIRCUIT_PUBLIC_INPUTS_LENGTH: usize = CALL_CONTEXT_LENGTH
    + 2
    + READ_REQUEST_LENGTH * MAX_NOTE_HASH_READ_REQUESTS_PER_CALL
    + READ_REQUEST_LENGTH * MAX_NULLIFIER_READ_REQUESTS_PER_CALL
    + READ_REQUEST_LENGTH * MAX_NULLIFIER_NON_EXISTENT_READ_REQUESTS_PER_CALL
    + CONTRACT_STORAGE_UPDATE_REQUEST_LENGTH * MAX_PUBLIC_DATA_UPDATE_REQUESTS_PER_CALL
    + CONTRACT_STORAGE_READ_LENGTH * MAX_PUBLIC_DATA_READS_PER_CALL
    + MAX_PUBLIC_CALL_STACK_LENGTH_PER_CALL
    + NOTE_HASH_LENGTH * MAX_NOTE_HASHES_PER_CALL
    + NULLIFIER_LENGTH * MAX_NULLIFIERS_PER_CALL
    + L2_TO_L1_MESSAGE_LENGTH * MAX_L2_TO_L1_MSGS_PER_CALL
    + 2
    + LOG_HASH_LENGTH * MAX_UNENCRYPTED_LOGS_PER_CALL
    + HEADER_LENGTH
    + GLOBAL_VARIABLES_LENGTH
    + AZTEC_ADDRESS_LENGTH
    + REVERT_CODE_LENGTH
    + 2 * GAS_LENGTH
    + 1;

pub const PRIVATE_CALL_STACK_ITEM_LENGTH: usize =
    AZTEC_ADDRESS_LENGTH + FUNCTION_DATA_LENGTH + PRIVATE_CIRCUIT_PUBLIC_INPUTS_LENGTH;
pub const PUBLIC_CALL_STACK_ITEM_LENGTH: usize =
    AZTEC_ADDRESS_LENGTH + FUNCTION_DATA_LENGTH + PUBLIC_CIRCUIT_PUBLIC_INPUTS_LENGTH + 1;

pub const FUNCTION_CALL_LENGTH: usize = 1 + FUNCTION_SELECTOR_LENGTH + AZTEC_ADDRESS_LENGTH + 2;
pub const APP_ENTRYPOINT_PAYLOAD_LENGTH: usize = FUNCTION_CALL_LENGTH * APP_MAX_CALLS + 1;
pub const FEE_ENTRYPOINT_PAYLOAD_LENGTH: usize = FUNCTION_CALL_LENGTH * FEE_MAX_CALLS + 2;

// Spot checks against the circuit definitions.
const _: () = assert!(HEADER_LENGTH == 28);
const _: () = assert!(PRIVATE_CIRCUIT_PUBLIC_INPUTS_LENGTH == 595);
const _: () = assert!(APP_ENTRYPOINT_PAYLOAD_LENGTH == 21);
