#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod block;
pub mod call;
pub mod codec;
pub mod entrypoint;
pub mod gas;
pub mod hash;
pub mod hints;
pub mod merkle;
pub mod side_effects;
pub mod transaction;
pub mod types;
pub mod verification_key;

#[cfg(any(feature = "testing", test))]
pub mod testing;

mod constants;
mod errors;

// RE-EXPORTS
// ================================================================================================

pub use constants::*;
pub use errors::{
    BoundedArrayError, EntrypointError, FieldDeserializationError, GasSettingsError,
    MerkleWitnessError, ReadRequestHintsError,
};
pub use miden_crypto::{
    EMPTY_WORD, Felt, FieldElement, ONE, StarkField, WORD_SIZE, Word, ZERO,
    hash::rpo::{Rpo256 as Hasher, RpoDigest as Digest},
};

pub mod crypto {
    pub use miden_crypto::{hash, rand};
}

pub mod utils {
    pub use miden_crypto::utils::{HexParseError, bytes_to_hex_string, collections, hex_to_bytes};

    pub mod serde {
        pub use miden_crypto::utils::{
            ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable,
            SliceReader,
        };
    }
}
