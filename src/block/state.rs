use crate::{
    Felt, FieldDeserializationError, ZERO,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// APPEND ONLY TREE SNAPSHOT
// ================================================================================================

/// The state of an append-only tree at some point in time: its root and the index at which the
/// next leaf will be inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppendOnlyTreeSnapshot {
    root: Felt,
    next_available_leaf_index: u32,
}

impl AppendOnlyTreeSnapshot {
    pub fn new(root: Felt, next_available_leaf_index: u32) -> Self {
        Self { root, next_available_leaf_index }
    }

    pub fn root(&self) -> Felt {
        self.root
    }

    pub fn next_available_leaf_index(&self) -> u32 {
        self.next_available_leaf_index
    }
}

impl Empty for AppendOnlyTreeSnapshot {
    fn empty() -> Self {
        Self::new(ZERO, 0)
    }

    fn is_empty(&self) -> bool {
        self.root == ZERO && self.next_available_leaf_index == 0
    }
}

impl FieldSerializable for AppendOnlyTreeSnapshot {
    const NUM_FIELDS: usize = crate::APPEND_ONLY_TREE_SNAPSHOT_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_felt(self.root);
        target.write_u32(self.next_available_leaf_index);
    }
}

impl FieldDeserializable for AppendOnlyTreeSnapshot {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            root: source.read_felt()?,
            next_available_leaf_index: source.read_u32()?,
        })
    }
}

impl Serializable for AppendOnlyTreeSnapshot {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.root.write_into(target);
        target.write_u32(self.next_available_leaf_index);
    }
}

impl Deserializable for AppendOnlyTreeSnapshot {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let root = Felt::read_from(source)?;
        let next_available_leaf_index = source.read_u32()?;
        Ok(Self { root, next_available_leaf_index })
    }
}

// PARTIAL STATE REFERENCE
// ================================================================================================

/// Snapshots of the trees a transaction can write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartialStateReference {
    note_hash_tree: AppendOnlyTreeSnapshot,
    nullifier_tree: AppendOnlyTreeSnapshot,
    public_data_tree: AppendOnlyTreeSnapshot,
}

impl PartialStateReference {
    pub fn new(
        note_hash_tree: AppendOnlyTreeSnapshot,
        nullifier_tree: AppendOnlyTreeSnapshot,
        public_data_tree: AppendOnlyTreeSnapshot,
    ) -> Self {
        Self { note_hash_tree, nullifier_tree, public_data_tree }
    }

    pub fn note_hash_tree(&self) -> &AppendOnlyTreeSnapshot {
        &self.note_hash_tree
    }

    pub fn nullifier_tree(&self) -> &AppendOnlyTreeSnapshot {
        &self.nullifier_tree
    }

    pub fn public_data_tree(&self) -> &AppendOnlyTreeSnapshot {
        &self.public_data_tree
    }
}

impl Empty for PartialStateReference {
    fn empty() -> Self {
        Self::default()
    }

    fn is_empty(&self) -> bool {
        self.note_hash_tree.is_empty()
            && self.nullifier_tree.is_empty()
            && self.public_data_tree.is_empty()
    }
}

impl FieldSerializable for PartialStateReference {
    const NUM_FIELDS: usize = crate::PARTIAL_STATE_REFERENCE_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.note_hash_tree);
        target.write(&self.nullifier_tree);
        target.write(&self.public_data_tree);
    }
}

impl FieldDeserializable for PartialStateReference {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            note_hash_tree: source.read()?,
            nullifier_tree: source.read()?,
            public_data_tree: source.read()?,
        })
    }
}

impl Serializable for PartialStateReference {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.note_hash_tree.write_into(target);
        self.nullifier_tree.write_into(target);
        self.public_data_tree.write_into(target);
    }
}

impl Deserializable for PartialStateReference {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let note_hash_tree = AppendOnlyTreeSnapshot::read_from(source)?;
        let nullifier_tree = AppendOnlyTreeSnapshot::read_from(source)?;
        let public_data_tree = AppendOnlyTreeSnapshot::read_from(source)?;
        Ok(Self { note_hash_tree, nullifier_tree, public_data_tree })
    }
}

// STATE REFERENCE
// ================================================================================================

/// Snapshots of every tree of the L2 state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateReference {
    l1_to_l2_message_tree: AppendOnlyTreeSnapshot,
    partial: PartialStateReference,
}

impl StateReference {
    pub fn new(
        l1_to_l2_message_tree: AppendOnlyTreeSnapshot,
        partial: PartialStateReference,
    ) -> Self {
        Self { l1_to_l2_message_tree, partial }
    }

    pub fn l1_to_l2_message_tree(&self) -> &AppendOnlyTreeSnapshot {
        &self.l1_to_l2_message_tree
    }

    pub fn partial(&self) -> &PartialStateReference {
        &self.partial
    }
}

impl Empty for StateReference {
    fn empty() -> Self {
        Self::default()
    }

    fn is_empty(&self) -> bool {
        self.l1_to_l2_message_tree.is_empty() && self.partial.is_empty()
    }
}

impl FieldSerializable for StateReference {
    const NUM_FIELDS: usize = crate::STATE_REFERENCE_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.l1_to_l2_message_tree);
        target.write(&self.partial);
    }
}

impl FieldDeserializable for StateReference {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            l1_to_l2_message_tree: source.read()?,
            partial: source.read()?,
        })
    }
}

impl Serializable for StateReference {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.l1_to_l2_message_tree.write_into(target);
        self.partial.write_into(target);
    }
}

impl Deserializable for StateReference {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let l1_to_l2_message_tree = AppendOnlyTreeSnapshot::read_from(source)?;
        let partial = PartialStateReference::read_from(source)?;
        Ok(Self { l1_to_l2_message_tree, partial })
    }
}
