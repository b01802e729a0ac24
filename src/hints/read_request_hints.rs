use alloc::vec::Vec;

use crate::{
    Felt, FieldDeserializationError, ReadRequestHintsError,
    codec::{
        BoundedArray, Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter,
    },
    merkle::{IndexedTreeLeafPreimage, MembershipWitness},
    side_effects::SideEffect,
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// READ REQUEST STATE
// ================================================================================================

/// How a read request is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ReadRequestState {
    /// Not resolved. Only valid for empty read requests.
    #[default]
    Nada = 0,
    /// Resolved against a value emitted earlier in the same transaction.
    Pending = 1,
    /// Resolved against a leaf of a tree committed in an earlier block.
    Settled = 2,
}

impl TryFrom<u8> for ReadRequestState {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Nada),
            1 => Ok(Self::Pending),
            2 => Ok(Self::Settled),
            _ => Err(value),
        }
    }
}

// READ REQUEST STATUS
// ================================================================================================

/// The resolution of one read request: its state and the index of the hint which resolves it in
/// the hint array of that state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadRequestStatus {
    state: ReadRequestState,
    hint_index: u32,
}

impl ReadRequestStatus {
    pub fn new(state: ReadRequestState, hint_index: u32) -> Self {
        Self { state, hint_index }
    }

    pub fn state(&self) -> ReadRequestState {
        self.state
    }

    pub fn hint_index(&self) -> u32 {
        self.hint_index
    }
}

impl Empty for ReadRequestStatus {
    fn empty() -> Self {
        Self::default()
    }

    fn is_empty(&self) -> bool {
        self.state == ReadRequestState::Nada && self.hint_index == 0
    }
}

impl FieldSerializable for ReadRequestStatus {
    const NUM_FIELDS: usize = 2;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_u8(self.state as u8);
        target.write_u32(self.hint_index);
    }
}

impl FieldDeserializable for ReadRequestStatus {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        let state = source.read_u8()?;
        let state = ReadRequestState::try_from(state).map_err(|_| {
            FieldDeserializationError::invalid_value(Felt::from(state), "read request state")
        })?;
        let hint_index = source.read_u32()?;
        Ok(Self { state, hint_index })
    }
}

impl Serializable for ReadRequestStatus {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_u8(self.state as u8);
        target.write_u32(self.hint_index);
    }
}

impl Deserializable for ReadRequestStatus {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let state = source.read_u8()?;
        let state = ReadRequestState::try_from(state).map_err(|state| {
            DeserializationError::InvalidValue(format!("invalid read request state {state}"))
        })?;
        let hint_index = source.read_u32()?;
        Ok(Self { state, hint_index })
    }
}

// INDEX PAIR HINTS
// ================================================================================================

/// Points a read request at the pending value it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingReadHint {
    read_request_index: u32,
    pending_value_index: u32,
}

impl PendingReadHint {
    pub fn new(read_request_index: u32, pending_value_index: u32) -> Self {
        Self { read_request_index, pending_value_index }
    }

    pub fn read_request_index(&self) -> u32 {
        self.read_request_index
    }

    pub fn pending_value_index(&self) -> u32 {
        self.pending_value_index
    }
}

/// Points a read request at the leaf data hint proving the settled value it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeafDataReadHint {
    read_request_index: u32,
    data_hint_index: u32,
}

impl LeafDataReadHint {
    pub fn new(read_request_index: u32, data_hint_index: u32) -> Self {
        Self { read_request_index, data_hint_index }
    }

    pub fn read_request_index(&self) -> u32 {
        self.read_request_index
    }

    pub fn data_hint_index(&self) -> u32 {
        self.data_hint_index
    }
}

macro_rules! impl_index_pair_codec {
    ($hint:ident, $first:ident, $second:ident) => {
        impl Empty for $hint {
            fn empty() -> Self {
                Self::default()
            }

            fn is_empty(&self) -> bool {
                self.$first == 0 && self.$second == 0
            }
        }

        impl FieldSerializable for $hint {
            const NUM_FIELDS: usize = 2;

            fn write_fields_into(&self, target: &mut FieldWriter) {
                target.write_u32(self.$first);
                target.write_u32(self.$second);
            }
        }

        impl FieldDeserializable for $hint {
            fn read_fields_from(
                source: &mut FieldReader<'_>,
            ) -> Result<Self, FieldDeserializationError> {
                Ok(Self {
                    $first: source.read_u32()?,
                    $second: source.read_u32()?,
                })
            }
        }

        impl Serializable for $hint {
            fn write_into<W: ByteWriter>(&self, target: &mut W) {
                target.write_u32(self.$first);
                target.write_u32(self.$second);
            }
        }

        impl Deserializable for $hint {
            fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
                Ok(Self {
                    $first: source.read_u32()?,
                    $second: source.read_u32()?,
                })
            }
        }
    };
}

impl_index_pair_codec!(PendingReadHint, read_request_index, pending_value_index);
impl_index_pair_codec!(LeafDataReadHint, read_request_index, data_hint_index);

// LEAF DATA HINT
// ================================================================================================

/// The preimage of a settled leaf together with the witness of its membership in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafDataHint<const HEIGHT: usize, L> {
    membership_witness: MembershipWitness<HEIGHT>,
    leaf_preimage: L,
}

impl<const HEIGHT: usize, L: IndexedTreeLeafPreimage> LeafDataHint<HEIGHT, L> {
    pub fn new(membership_witness: MembershipWitness<HEIGHT>, leaf_preimage: L) -> Self {
        Self { membership_witness, leaf_preimage }
    }

    pub fn membership_witness(&self) -> &MembershipWitness<HEIGHT> {
        &self.membership_witness
    }

    pub fn leaf_preimage(&self) -> &L {
        &self.leaf_preimage
    }
}

impl<const HEIGHT: usize, L: Empty + PartialEq> Empty for LeafDataHint<HEIGHT, L> {
    fn empty() -> Self {
        Self {
            membership_witness: MembershipWitness::empty(),
            leaf_preimage: L::empty(),
        }
    }

    fn is_empty(&self) -> bool {
        self.membership_witness.is_empty() && self.leaf_preimage.is_empty()
    }
}

impl<const HEIGHT: usize, L: FieldSerializable> FieldSerializable for LeafDataHint<HEIGHT, L> {
    const NUM_FIELDS: usize = MembershipWitness::<HEIGHT>::NUM_FIELDS + L::NUM_FIELDS;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.membership_witness);
        target.write(&self.leaf_preimage);
    }
}

impl<const HEIGHT: usize, L: FieldDeserializable> FieldDeserializable for LeafDataHint<HEIGHT, L> {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        let membership_witness = source.read()?;
        let leaf_preimage = source.read()?;
        Ok(Self { membership_witness, leaf_preimage })
    }
}

impl<const HEIGHT: usize, L: Serializable> Serializable for LeafDataHint<HEIGHT, L> {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.membership_witness.write_into(target);
        self.leaf_preimage.write_into(target);
    }
}

impl<const HEIGHT: usize, L: Deserializable> Deserializable for LeafDataHint<HEIGHT, L> {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let membership_witness = MembershipWitness::read_from(source)?;
        let leaf_preimage = L::read_from(source)?;
        Ok(Self { membership_witness, leaf_preimage })
    }
}

// READ REQUEST HINTS
// ================================================================================================

/// The resolution of up to `R` read requests, of which at most `P` are pending and at most `S`
/// are settled.
///
/// # Field layout
///
/// ```text
/// [read_request_statuses (2 * R), pending_read_hints (2 * P), leaf_data_read_hints (2 * S)]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRequestHints<const R: usize, const P: usize, const S: usize> {
    read_request_statuses: BoundedArray<ReadRequestStatus, R>,
    pending_read_hints: BoundedArray<PendingReadHint, P>,
    leaf_data_read_hints: BoundedArray<LeafDataReadHint, S>,
}

impl<const R: usize, const P: usize, const S: usize> ReadRequestHints<R, P, S> {
    pub fn read_request_statuses(&self) -> &BoundedArray<ReadRequestStatus, R> {
        &self.read_request_statuses
    }

    pub fn pending_read_hints(&self) -> &BoundedArray<PendingReadHint, P> {
        &self.pending_read_hints
    }

    pub fn leaf_data_read_hints(&self) -> &BoundedArray<LeafDataReadHint, S> {
        &self.leaf_data_read_hints
    }
}

impl<const R: usize, const P: usize, const S: usize> Empty for ReadRequestHints<R, P, S> {
    fn empty() -> Self {
        Self {
            read_request_statuses: BoundedArray::empty(),
            pending_read_hints: BoundedArray::empty(),
            leaf_data_read_hints: BoundedArray::empty(),
        }
    }

    fn is_empty(&self) -> bool {
        self.read_request_statuses.is_empty()
            && self.pending_read_hints.is_empty()
            && self.leaf_data_read_hints.is_empty()
    }
}

impl<const R: usize, const P: usize, const S: usize> FieldSerializable
    for ReadRequestHints<R, P, S>
{
    const NUM_FIELDS: usize = BoundedArray::<ReadRequestStatus, R>::NUM_FIELDS
        + BoundedArray::<PendingReadHint, P>::NUM_FIELDS
        + BoundedArray::<LeafDataReadHint, S>::NUM_FIELDS;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.read_request_statuses);
        target.write(&self.pending_read_hints);
        target.write(&self.leaf_data_read_hints);
    }
}

impl<const R: usize, const P: usize, const S: usize> FieldDeserializable
    for ReadRequestHints<R, P, S>
{
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            read_request_statuses: source.read()?,
            pending_read_hints: source.read()?,
            leaf_data_read_hints: source.read()?,
        })
    }
}

impl<const R: usize, const P: usize, const S: usize> Serializable for ReadRequestHints<R, P, S> {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.read_request_statuses.write_into(target);
        self.pending_read_hints.write_into(target);
        self.leaf_data_read_hints.write_into(target);
    }
}

impl<const R: usize, const P: usize, const S: usize> Deserializable
    for ReadRequestHints<R, P, S>
{
    fn read_from<Rd: ByteReader>(source: &mut Rd) -> Result<Self, DeserializationError> {
        Ok(Self {
            read_request_statuses: BoundedArray::read_from(source)?,
            pending_read_hints: BoundedArray::read_from(source)?,
            leaf_data_read_hints: BoundedArray::read_from(source)?,
        })
    }
}

// READ REQUEST HINTS BUILDER
// ================================================================================================

/// Incrementally builds [ReadRequestHints].
///
/// Every read request may be resolved exactly once. Hints are appended in the order they are
/// added, and the status of the read request records the position of its hint.
#[derive(Debug, Clone)]
pub struct ReadRequestHintsBuilder<const R: usize, const P: usize, const S: usize> {
    num_read_requests: usize,
    read_request_statuses: [ReadRequestStatus; R],
    pending_read_hints: Vec<PendingReadHint>,
    leaf_data_read_hints: Vec<LeafDataReadHint>,
}

impl<const R: usize, const P: usize, const S: usize> ReadRequestHintsBuilder<R, P, S> {
    /// Returns a builder for `num_read_requests` read requests, all of them unresolved.
    ///
    /// # Errors
    /// Returns an error if `num_read_requests` exceeds `R`.
    pub fn new(num_read_requests: usize) -> Result<Self, ReadRequestHintsError> {
        if num_read_requests > R {
            return Err(ReadRequestHintsError::CapacityExceeded {
                kind: "read request",
                capacity: R,
            });
        }

        Ok(Self {
            num_read_requests,
            read_request_statuses: [ReadRequestStatus::empty(); R],
            pending_read_hints: Vec::new(),
            leaf_data_read_hints: Vec::new(),
        })
    }

    /// Resolves the read request at `read_request_index` against the pending value at
    /// `pending_value_index`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - `P` pending read hints were already added.
    /// - `read_request_index` is out of bounds.
    /// - The read request was already resolved.
    /// - `pending_value_index` does not fit in 32 bits.
    pub fn add_pending_read_request(
        &mut self,
        read_request_index: usize,
        pending_value_index: usize,
    ) -> Result<(), ReadRequestHintsError> {
        if self.pending_read_hints.len() == P {
            return Err(ReadRequestHintsError::CapacityExceeded {
                kind: "pending read",
                capacity: P,
            });
        }
        self.check_unresolved(read_request_index)?;
        let pending_value_index = index_to_u32("pending value", pending_value_index)?;

        let hint_index = self.pending_read_hints.len() as u32;
        self.pending_read_hints.push(PendingReadHint::new(
            index_to_u32("read request", read_request_index)?,
            pending_value_index,
        ));
        self.read_request_statuses[read_request_index] =
            ReadRequestStatus::new(ReadRequestState::Pending, hint_index);

        #[cfg(feature = "log")]
        ::log::trace!(
            "Added pending read hint [read_request_index={read_request_index}, pending_value_index={pending_value_index}, hint_index={hint_index}]"
        );

        Ok(())
    }

    /// Resolves the read request at `read_request_index` against the leaf data hint at
    /// `data_hint_index`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - `S` leaf data read hints were already added.
    /// - `read_request_index` is out of bounds.
    /// - The read request was already resolved.
    /// - `data_hint_index` does not fit in 32 bits.
    pub fn add_leaf_data_read_request(
        &mut self,
        read_request_index: usize,
        data_hint_index: usize,
    ) -> Result<(), ReadRequestHintsError> {
        if self.leaf_data_read_hints.len() == S {
            return Err(ReadRequestHintsError::CapacityExceeded {
                kind: "leaf data read",
                capacity: S,
            });
        }
        self.check_unresolved(read_request_index)?;
        let data_hint_index = index_to_u32("leaf data hint", data_hint_index)?;

        let hint_index = self.leaf_data_read_hints.len() as u32;
        self.leaf_data_read_hints.push(LeafDataReadHint::new(
            index_to_u32("read request", read_request_index)?,
            data_hint_index,
        ));
        self.read_request_statuses[read_request_index] =
            ReadRequestStatus::new(ReadRequestState::Settled, hint_index);

        #[cfg(feature = "log")]
        ::log::trace!(
            "Added leaf data read hint [read_request_index={read_request_index}, data_hint_index={data_hint_index}, hint_index={hint_index}]"
        );

        Ok(())
    }

    /// Returns the hints recorded so far, padded to their bounds.
    pub fn to_hints(&self) -> ReadRequestHints<R, P, S> {
        let mut pending = self.pending_read_hints.iter().copied();
        let mut leaf_data = self.leaf_data_read_hints.iter().copied();

        ReadRequestHints {
            read_request_statuses: BoundedArray::from(self.read_request_statuses),
            pending_read_hints: BoundedArray::from_fn(|_| pending.next().unwrap_or_default()),
            leaf_data_read_hints: BoundedArray::from_fn(|_| leaf_data.next().unwrap_or_default()),
        }
    }

    fn check_unresolved(&self, read_request_index: usize) -> Result<(), ReadRequestHintsError> {
        if read_request_index >= self.num_read_requests {
            return Err(ReadRequestHintsError::ReadRequestIndexOutOfBounds {
                index: read_request_index,
                num_read_requests: self.num_read_requests,
            });
        }

        let state = self.read_request_statuses[read_request_index].state();
        if state != ReadRequestState::Nada {
            return Err(ReadRequestHintsError::ReadRequestAlreadyResolved {
                index: read_request_index,
                state,
            });
        }

        Ok(())
    }
}

// VERIFICATION
// ================================================================================================

/// Checks that `hints` resolve every non-empty read request.
///
/// A pending read must point at a value in `pending_values` which equals the read value and was
/// emitted before the read. A settled read must point at a leaf data hint whose preimage holds the
/// read value and whose leaf is a member of the tree with the given `root`.
///
/// Values are compared as given; callers silo read requests and values beforehand where the tree
/// stores siloed values.
///
/// # Errors
/// Returns an error describing the first read request which is not correctly resolved.
pub fn verify_read_requests<
    T,
    V,
    L,
    const HEIGHT: usize,
    const R: usize,
    const P: usize,
    const S: usize,
>(
    read_requests: &[T],
    pending_values: &[V],
    leaf_data_hints: &[LeafDataHint<HEIGHT, L>],
    root: Felt,
    hints: &ReadRequestHints<R, P, S>,
) -> Result<(), ReadRequestHintsError>
where
    T: SideEffect + Empty + PartialEq,
    V: SideEffect,
    L: IndexedTreeLeafPreimage,
{
    if read_requests.len() > R {
        return Err(ReadRequestHintsError::ReadRequestIndexOutOfBounds {
            index: R,
            num_read_requests: read_requests.len(),
        });
    }

    for (index, read_request) in read_requests.iter().enumerate() {
        let status = hints.read_request_statuses[index];
        let hint_index = status.hint_index() as usize;

        match status.state() {
            ReadRequestState::Nada => {
                if !read_request.is_empty() {
                    return Err(ReadRequestHintsError::UnresolvedReadRequest(index));
                }
            },
            ReadRequestState::Pending => {
                let hint = hints.pending_read_hints.get(hint_index).ok_or(
                    ReadRequestHintsError::HintIndexOutOfBounds {
                        kind: "pending read hints",
                        index: hint_index,
                        len: P,
                    },
                )?;
                check_hint_target(index, hint_index, hint.read_request_index())?;

                let value_index = hint.pending_value_index() as usize;
                let value = pending_values.get(value_index).ok_or(
                    ReadRequestHintsError::HintIndexOutOfBounds {
                        kind: "pending values",
                        index: value_index,
                        len: pending_values.len(),
                    },
                )?;
                check_value(index, read_request.value(), value.value())?;
                if value.counter() >= read_request.counter() {
                    return Err(ReadRequestHintsError::PendingValueEmittedLater {
                        index,
                        read_counter: read_request.counter(),
                        value_counter: value.counter(),
                    });
                }
            },
            ReadRequestState::Settled => {
                let hint = hints.leaf_data_read_hints.get(hint_index).ok_or(
                    ReadRequestHintsError::HintIndexOutOfBounds {
                        kind: "leaf data read hints",
                        index: hint_index,
                        len: S,
                    },
                )?;
                check_hint_target(index, hint_index, hint.read_request_index())?;

                let data_index = hint.data_hint_index() as usize;
                let data = leaf_data_hints.get(data_index).ok_or(
                    ReadRequestHintsError::HintIndexOutOfBounds {
                        kind: "leaf data hints",
                        index: data_index,
                        len: leaf_data_hints.len(),
                    },
                )?;
                check_value(index, read_request.value(), data.leaf_preimage.value())?;
                data.membership_witness
                    .verify(data.leaf_preimage.hash(), root)
                    .map_err(|source| ReadRequestHintsError::SettledReadNotMember {
                        index,
                        source,
                    })?;
            },
        }
    }

    Ok(())
}

fn check_hint_target(
    index: usize,
    hint_index: usize,
    read_request_index: u32,
) -> Result<(), ReadRequestHintsError> {
    if read_request_index as usize != index {
        return Err(ReadRequestHintsError::HintMismatch { index, hint_index });
    }
    Ok(())
}

fn check_value(index: usize, read: Felt, hinted: Felt) -> Result<(), ReadRequestHintsError> {
    if read != hinted {
        return Err(ReadRequestHintsError::ValueMismatch { index, read, hinted });
    }
    Ok(())
}

// TESTS
// ================================================================================================

/// Narrows an index into the 32-bit form the hints store.
fn index_to_u32(kind: &'static str, index: usize) -> Result<u32, ReadRequestHintsError> {
    u32::try_from(index).map_err(|_| ReadRequestHintsError::IndexTooLarge { kind, index })
}
