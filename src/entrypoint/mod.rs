//! Entrypoint payloads.
//!
//! An account executes the calls of its user through an entrypoint function which takes the
//! calls as a fixed-size payload. The app payload carries the calls of the app logic phase and
//! is signed by the account owner. The fee payload carries the calls which pay the fee.

mod function_call;
pub use function_call::{EncodedFunctionCall, FunctionCall, PackedValues};

mod fee;
pub use fee::{FeeOptions, FeePaymentMethod, NativeFeePaymentMethod};

mod payload;
pub use payload::{AppEntrypointPayload, FeeEntrypointPayload};
