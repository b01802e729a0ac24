//! Hints which let the kernel circuits resolve read requests without searching.
//!
//! A read request is resolved either against a value emitted earlier in the same transaction
//! (pending) or against a leaf of a tree committed in an earlier block (settled). The builders in
//! this module record which of the two applies to each read request and where the matching value
//! lives; the `verify_*` functions reproduce the checks the circuits perform on those hints.

mod read_request_hints;
pub use read_request_hints::{
    LeafDataHint, LeafDataReadHint, PendingReadHint, ReadRequestHints, ReadRequestHintsBuilder,
    ReadRequestState, ReadRequestStatus, verify_read_requests,
};

mod nullifier_non_existent;
pub use nullifier_non_existent::{
    NullifierMembershipOracle, NullifierNonExistentReadRequestHints,
    NullifierNonExistentReadRequestHintsBuilder, build_nullifier_non_existent_read_request_hints,
    verify_non_existent_read_requests,
};
