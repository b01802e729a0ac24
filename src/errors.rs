use alloc::{boxed::Box, string::String};
use core::error::Error;

use thiserror::Error;

use crate::{Felt, hints::ReadRequestState};

// FIELD DESERIALIZATION ERROR
// ================================================================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldDeserializationError {
    #[error("expected {expected} more field elements but only {available} remain")]
    UnexpectedEnd { expected: usize, available: usize },
    #[error("{0} field elements were left over after decoding")]
    TrailingFields(usize),
    #[error("field element {value} is not a valid {expected}")]
    InvalidValue { value: Felt, expected: &'static str },
    #[error("{0}")]
    InvalidStruct(String),
}

impl FieldDeserializationError {
    pub fn invalid_value(value: Felt, expected: &'static str) -> Self {
        Self::InvalidValue { value, expected }
    }
}

// BOUNDED ARRAY ERROR
// ================================================================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoundedArrayError {
    #[error("{actual} items were provided but the array can hold at most {max}")]
    TooManyItems { max: usize, actual: usize },
}

// MERKLE WITNESS ERROR
// ================================================================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MerkleWitnessError {
    #[error("leaf index {leaf_index} does not fit into a tree of height {height}")]
    LeafIndexOutOfRange { leaf_index: u64, height: usize },
    #[error("computed root {computed} does not match expected root {expected}")]
    RootMismatch { expected: Felt, computed: Felt },
    #[error("low leaf key {low_key} is not less than the target key {target}")]
    LowLeafKeyNotLess { low_key: Felt, target: Felt },
    #[error("low leaf successor key {next_key} is not greater than the target key {target}")]
    LowLeafNextKeyNotGreater { next_key: Felt, target: Felt },
}

// READ REQUEST HINTS ERROR
// ================================================================================================

#[derive(Debug, Error)]
pub enum ReadRequestHintsError {
    #[error("cannot add more than {capacity} {kind} hints")]
    CapacityExceeded { kind: &'static str, capacity: usize },
    #[error("read request index {index} is out of bounds for {num_read_requests} read requests")]
    ReadRequestIndexOutOfBounds { index: usize, num_read_requests: usize },
    #[error("read request {index} was already resolved as {state:?}")]
    ReadRequestAlreadyResolved { index: usize, state: ReadRequestState },
    #[error("read request {0} is not empty but was never resolved")]
    UnresolvedReadRequest(usize),
    #[error("hint index {index} is out of bounds for {len} {kind}")]
    HintIndexOutOfBounds { kind: &'static str, index: usize, len: usize },
    #[error("{kind} index {index} does not fit in 32 bits")]
    IndexTooLarge { kind: &'static str, index: usize },
    #[error("read request {index} reads value {read} but the hinted value is {hinted}")]
    ValueMismatch { index: usize, read: Felt, hinted: Felt },
    #[error(
        "read request {index} with counter {read_counter} reads a pending value emitted later at counter {value_counter}"
    )]
    PendingValueEmittedLater { index: usize, read_counter: u32, value_counter: u32 },
    #[error("read request {index} does not match hint {hint_index}")]
    HintMismatch { index: usize, hint_index: usize },
    #[error("value {0} is being read as non-existent but exists in the pending set")]
    NullifierExistsInPendingSet(Felt),
    #[error("value {target} is not between pending values {low} and {high}")]
    PendingValueOrderViolated { target: Felt, low: Felt, high: Felt },
    #[error("settled read request {index} is not a member of the tree")]
    SettledReadNotMember {
        index: usize,
        #[source]
        source: MerkleWitnessError,
    },
    #[error("non-existent read request {index} is a member of the tree")]
    NonExistentReadIsMember {
        index: usize,
        #[source]
        source: MerkleWitnessError,
    },
    #[error("membership oracle failed to provide a low leaf for {0}")]
    OracleFailed(Felt, #[source] Box<dyn Error + Send + Sync + 'static>),
}

// ENTRYPOINT ERROR
// ================================================================================================

#[derive(Debug, Error)]
pub enum EntrypointError {
    #[error("entrypoint payload accepts at most {max} calls but {actual} were provided")]
    TooManyCalls { max: usize, actual: usize },
    #[error("fee payment method failed")]
    FeePaymentMethod(#[source] Box<dyn Error + Send + Sync + 'static>),
    #[error("fee payment method requires a fee payer but did not resolve one")]
    FeePayerNotResolved,
}

// GAS SETTINGS ERROR
// ================================================================================================

#[derive(Debug, Error)]
pub enum GasSettingsError {
    #[cfg(feature = "std")]
    #[error("error trying to deserialize gas settings from toml")]
    TomlDeserializationError(#[source] toml::de::Error),
    #[cfg(feature = "std")]
    #[error("error trying to serialize gas settings into toml")]
    TomlSerializationError(#[source] toml::ser::Error),
    #[error("teardown gas limits {teardown} exceed the total gas limits {total}")]
    TeardownExceedsLimits { total: String, teardown: String },
}
