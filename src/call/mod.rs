//! Call-level protocol structs.
//!
//! A function execution is described by its [CallContext], the public inputs of the function
//! circuit and, once the call is complete, a call stack item binding those public inputs to the
//! called contract and function.

mod call_context;
pub use call_context::{CallContext, FunctionData};

mod max_block_number;
pub use max_block_number::MaxBlockNumber;

mod call_request;
pub use call_request::{PrivateCallRequest, PublicCallRequest, ScopedPrivateCallRequest};

mod private_inputs;
pub use private_inputs::PrivateCircuitPublicInputs;

mod public_inputs;
pub use public_inputs::PublicCircuitPublicInputs;

mod call_stack_item;
pub use call_stack_item::{PrivateCallStackItem, PublicCallStackItem};
