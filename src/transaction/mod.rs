//! Transaction-level protocol structs.

mod tx_context;
pub use tx_context::TxContext;

mod tx_request;
pub use tx_request::TxRequest;
