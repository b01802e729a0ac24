//! Side effects emitted while executing a transaction.
//!
//! Every side effect carries a counter assigned in emission order. The counter totally orders the
//! side effects of one execution trace. Empty side effects have a zero payload and counter 0, so
//! they are indistinguishable from "no side effect"; callers that need zero as a legitimate value
//! must track array lengths separately.

use crate::Felt;

mod scoped;
pub use scoped::{
    Scoped, ScopedKeyValidationRequestAndGenerator, ScopedL2ToL1Message, ScopedLogHash,
    ScopedNoteHash, ScopedNullifier, ScopedReadRequest,
};

mod note_hash;
pub use note_hash::NoteHash;

mod nullifier;
pub use nullifier::Nullifier;

mod read_request;
pub use read_request::ReadRequest;

mod log_hash;
pub use log_hash::{LogHash, NoteLogHash};

mod l2_to_l1_message;
pub use l2_to_l1_message::L2ToL1Message;

mod key_validation_request;
pub use key_validation_request::{KeyValidationRequest, KeyValidationRequestAndGenerator};

mod public_data;
pub use public_data::{ContractStorageRead, ContractStorageUpdateRequest};

// TRAITS
// ================================================================================================

/// A value ordered by the counter assigned to it at emission.
pub trait Ordered {
    fn counter(&self) -> u32;
}

/// A side effect: a single payload value ordered by its counter.
pub trait SideEffect: Ordered {
    fn value(&self) -> Felt;
}
