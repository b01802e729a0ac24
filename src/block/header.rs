use super::{AppendOnlyTreeSnapshot, GlobalVariables, StateReference};
use crate::{
    Felt, FieldDeserializationError, ZERO,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    hash::{DomainHashable, GeneratorIndex},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// CONTENT COMMITMENT
// ================================================================================================

/// Commitments to the contents of a block: its transaction effects and its L1 message traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentCommitment {
    num_txs: Felt,
    txs_effects_hash: Felt,
    in_hash: Felt,
    out_hash: Felt,
}

impl ContentCommitment {
    pub fn new(num_txs: Felt, txs_effects_hash: Felt, in_hash: Felt, out_hash: Felt) -> Self {
        Self { num_txs, txs_effects_hash, in_hash, out_hash }
    }

    pub fn num_txs(&self) -> Felt {
        self.num_txs
    }

    pub fn txs_effects_hash(&self) -> Felt {
        self.txs_effects_hash
    }

    /// Commitment to the L1 to L2 messages consumed by the block.
    pub fn in_hash(&self) -> Felt {
        self.in_hash
    }

    /// Commitment to the L2 to L1 messages emitted by the block.
    pub fn out_hash(&self) -> Felt {
        self.out_hash
    }
}

impl Empty for ContentCommitment {
    fn empty() -> Self {
        Self::default()
    }

    fn is_empty(&self) -> bool {
        [self.num_txs, self.txs_effects_hash, self.in_hash, self.out_hash]
            .iter()
            .all(|value| *value == ZERO)
    }
}

impl FieldSerializable for ContentCommitment {
    const NUM_FIELDS: usize = crate::CONTENT_COMMITMENT_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_felt(self.num_txs);
        target.write_felt(self.txs_effects_hash);
        target.write_felt(self.in_hash);
        target.write_felt(self.out_hash);
    }
}

impl FieldDeserializable for ContentCommitment {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            num_txs: source.read_felt()?,
            txs_effects_hash: source.read_felt()?,
            in_hash: source.read_felt()?,
            out_hash: source.read_felt()?,
        })
    }
}

impl Serializable for ContentCommitment {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.num_txs.write_into(target);
        self.txs_effects_hash.write_into(target);
        self.in_hash.write_into(target);
        self.out_hash.write_into(target);
    }
}

impl Deserializable for ContentCommitment {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        Ok(Self {
            num_txs: Felt::read_from(source)?,
            txs_effects_hash: Felt::read_from(source)?,
            in_hash: Felt::read_from(source)?,
            out_hash: Felt::read_from(source)?,
        })
    }
}

// HEADER
// ================================================================================================

/// The header of an L2 block.
///
/// The hash of the header (in the block hash domain) is the leaf of the archive tree which
/// historical-state proofs are made against.
///
/// # Field layout
///
/// ```text
/// [last_archive (2), content_commitment (4), state (8), global_variables (13), total_fees]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    last_archive: AppendOnlyTreeSnapshot,
    content_commitment: ContentCommitment,
    state: StateReference,
    global_variables: GlobalVariables,
    total_fees: Felt,
}

impl Header {
    pub fn new(
        last_archive: AppendOnlyTreeSnapshot,
        content_commitment: ContentCommitment,
        state: StateReference,
        global_variables: GlobalVariables,
        total_fees: Felt,
    ) -> Self {
        Self {
            last_archive,
            content_commitment,
            state,
            global_variables,
            total_fees,
        }
    }

    pub fn last_archive(&self) -> &AppendOnlyTreeSnapshot {
        &self.last_archive
    }

    pub fn content_commitment(&self) -> &ContentCommitment {
        &self.content_commitment
    }

    pub fn state(&self) -> &StateReference {
        &self.state
    }

    pub fn global_variables(&self) -> &GlobalVariables {
        &self.global_variables
    }

    pub fn total_fees(&self) -> Felt {
        self.total_fees
    }

    pub fn block_number(&self) -> u32 {
        self.global_variables.block_number()
    }
}

impl DomainHashable for Header {
    const DOMAIN: GeneratorIndex = GeneratorIndex::BlockHash;
}

impl Empty for Header {
    fn empty() -> Self {
        Self {
            last_archive: AppendOnlyTreeSnapshot::empty(),
            content_commitment: ContentCommitment::empty(),
            state: StateReference::empty(),
            global_variables: GlobalVariables::empty(),
            total_fees: ZERO,
        }
    }

    fn is_empty(&self) -> bool {
        self.last_archive.is_empty()
            && self.content_commitment.is_empty()
            && self.state.is_empty()
            && self.global_variables.is_empty()
            && self.total_fees == ZERO
    }
}

impl FieldSerializable for Header {
    const NUM_FIELDS: usize = crate::HEADER_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.last_archive);
        target.write(&self.content_commitment);
        target.write(&self.state);
        target.write(&self.global_variables);
        target.write_felt(self.total_fees);
    }
}

impl FieldDeserializable for Header {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            last_archive: source.read()?,
            content_commitment: source.read()?,
            state: source.read()?,
            global_variables: source.read()?,
            total_fees: source.read_felt()?,
        })
    }
}

impl Serializable for Header {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.last_archive.write_into(target);
        self.content_commitment.write_into(target);
        self.state.write_into(target);
        self.global_variables.write_into(target);
        self.total_fees.write_into(target);
    }
}

impl Deserializable for Header {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        Ok(Self {
            last_archive: AppendOnlyTreeSnapshot::read_from(source)?,
            content_commitment: ContentCommitment::read_from(source)?,
            state: StateReference::read_from(source)?,
            global_variables: GlobalVariables::read_from(source)?,
            total_fees: Felt::read_from(source)?,
        })
    }
}

// TESTS
// ================================================================================================
