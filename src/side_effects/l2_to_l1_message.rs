use super::{Ordered, Scoped};
use crate::{
    Felt, FieldDeserializationError, ZERO,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    types::{AztecAddress, EthAddress},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

/// A message sent from an L2 contract to a recipient on L1.
///
/// # Field layout
///
/// ```text
/// [recipient (5 limbs), content, counter]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct L2ToL1Message {
    recipient: EthAddress,
    content: Felt,
    counter: u32,
}

impl L2ToL1Message {
    pub fn new(recipient: EthAddress, content: Felt, counter: u32) -> Self {
        Self { recipient, content, counter }
    }

    pub fn recipient(&self) -> EthAddress {
        self.recipient
    }

    pub fn content(&self) -> Felt {
        self.content
    }

    pub fn scope(self, contract_address: AztecAddress) -> Scoped<Self> {
        Scoped::new(self, contract_address)
    }
}

impl Ordered for L2ToL1Message {
    fn counter(&self) -> u32 {
        self.counter
    }
}

impl Empty for L2ToL1Message {
    fn empty() -> Self {
        Self {
            recipient: EthAddress::ZERO,
            content: ZERO,
            counter: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.recipient.is_zero() && self.content == ZERO && self.counter == 0
    }
}

impl FieldSerializable for L2ToL1Message {
    const NUM_FIELDS: usize = crate::L2_TO_L1_MESSAGE_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.recipient);
        target.write_felt(self.content);
        target.write_u32(self.counter);
    }
}

impl FieldDeserializable for L2ToL1Message {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            recipient: source.read()?,
            content: source.read_felt()?,
            counter: source.read_u32()?,
        })
    }
}

impl Serializable for L2ToL1Message {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.recipient.write_into(target);
        self.content.write_into(target);
        target.write_u32(self.counter);
    }
}

impl Deserializable for L2ToL1Message {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let recipient = EthAddress::read_from(source)?;
        let content = Felt::read_from(source)?;
        let counter = source.read_u32()?;
        Ok(Self { recipient, content, counter })
    }
}
