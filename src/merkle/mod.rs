//! Witnesses proving membership and non-membership of leaves in the protocol's Merkle trees.
//!
//! The trees themselves live outside this crate. Only the data handed to the circuits is modelled
//! here: sibling paths, the preimages of indexed-tree leaves, and the low-leaf hints used to prove
//! that a key is absent from an indexed tree.

mod membership_witness;
pub use membership_witness::MembershipWitness;

mod leaf_preimage;
pub use leaf_preimage::{IndexedTreeLeafPreimage, NullifierLeafPreimage, PublicDataTreeLeafPreimage};

mod non_membership;
pub use non_membership::NonMembershipHint;
