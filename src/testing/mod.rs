//! Test utilities: random instances of the protocol structs, an in-memory indexed tree and a
//! configurable fee payment method.

mod fee_payment;
pub use fee_payment::{MockFeePaymentError, MockFeePaymentMethod};

mod indexed_tree;
pub use indexed_tree::{IndexedTree, IndexedTreeLeaf};

mod random;
