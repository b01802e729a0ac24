//! Value types shared by the protocol structs.
//!
//! These are opaque, comparable values: the codec layer only needs their field and byte forms,
//! their zero check and their empty instance.

mod address;
pub use address::{AztecAddress, EthAddress};

mod function_selector;
pub use function_selector::FunctionSelector;

mod point;
pub use point::Point;

mod revert_code;
pub use revert_code::RevertCode;
