//! Block-level protocol structs: tree snapshots, state references and the block header.

mod state;
pub use state::{AppendOnlyTreeSnapshot, PartialStateReference, StateReference};

mod global_variables;
pub use global_variables::GlobalVariables;

mod header;
pub use header::{ContentCommitment, Header};
