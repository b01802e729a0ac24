use super::CallContext;
use crate::{
    Felt, FieldDeserializationError, ZERO,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    side_effects::{Ordered, Scoped},
    types::AztecAddress,
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

pub type ScopedPrivateCallRequest = Scoped<PrivateCallRequest>;

// PRIVATE CALL REQUEST
// ================================================================================================

/// A request, made by a private function, to call another private function.
///
/// The side effects of the callee are emitted with counters in
/// `start_side_effect_counter..=end_side_effect_counter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrivateCallRequest {
    call_context: CallContext,
    args_hash: Felt,
    returns_hash: Felt,
    start_side_effect_counter: u32,
    end_side_effect_counter: u32,
}

impl PrivateCallRequest {
    pub fn new(
        call_context: CallContext,
        args_hash: Felt,
        returns_hash: Felt,
        start_side_effect_counter: u32,
        end_side_effect_counter: u32,
    ) -> Self {
        Self {
            call_context,
            args_hash,
            returns_hash,
            start_side_effect_counter,
            end_side_effect_counter,
        }
    }

    pub fn call_context(&self) -> &CallContext {
        &self.call_context
    }

    pub fn args_hash(&self) -> Felt {
        self.args_hash
    }

    pub fn returns_hash(&self) -> Felt {
        self.returns_hash
    }

    pub fn start_side_effect_counter(&self) -> u32 {
        self.start_side_effect_counter
    }

    pub fn end_side_effect_counter(&self) -> u32 {
        self.end_side_effect_counter
    }

    /// Attributes this request to the contract which made it.
    pub fn scope(self, caller_contract_address: AztecAddress) -> Scoped<Self> {
        Scoped::new(self, caller_contract_address)
    }
}

impl Ordered for PrivateCallRequest {
    fn counter(&self) -> u32 {
        self.start_side_effect_counter
    }
}

impl Empty for PrivateCallRequest {
    fn empty() -> Self {
        Self::default()
    }
}

impl FieldSerializable for PrivateCallRequest {
    const NUM_FIELDS: usize = crate::PRIVATE_CALL_REQUEST_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.call_context);
        target.write_felt(self.args_hash);
        target.write_felt(self.returns_hash);
        target.write_u32(self.start_side_effect_counter);
        target.write_u32(self.end_side_effect_counter);
    }
}

impl FieldDeserializable for PrivateCallRequest {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            call_context: source.read()?,
            args_hash: source.read_felt()?,
            returns_hash: source.read_felt()?,
            start_side_effect_counter: source.read_u32()?,
            end_side_effect_counter: source.read_u32()?,
        })
    }
}

impl Serializable for PrivateCallRequest {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.call_context.write_into(target);
        self.args_hash.write_into(target);
        self.returns_hash.write_into(target);
        target.write_u32(self.start_side_effect_counter);
        target.write_u32(self.end_side_effect_counter);
    }
}

impl Deserializable for PrivateCallRequest {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        Ok(Self {
            call_context: CallContext::read_from(source)?,
            args_hash: Felt::read_from(source)?,
            returns_hash: Felt::read_from(source)?,
            start_side_effect_counter: source.read_u32()?,
            end_side_effect_counter: source.read_u32()?,
        })
    }
}

// PUBLIC CALL REQUEST
// ================================================================================================

/// A request to enqueue a public function call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublicCallRequest {
    call_context: CallContext,
    args_hash: Felt,
    counter: u32,
}

impl PublicCallRequest {
    pub fn new(call_context: CallContext, args_hash: Felt, counter: u32) -> Self {
        Self { call_context, args_hash, counter }
    }

    pub fn call_context(&self) -> &CallContext {
        &self.call_context
    }

    pub fn args_hash(&self) -> Felt {
        self.args_hash
    }
}

impl Ordered for PublicCallRequest {
    fn counter(&self) -> u32 {
        self.counter
    }
}

impl Empty for PublicCallRequest {
    fn empty() -> Self {
        Self::default()
    }

    fn is_empty(&self) -> bool {
        self.call_context.is_empty() && self.args_hash == ZERO && self.counter == 0
    }
}

impl FieldSerializable for PublicCallRequest {
    const NUM_FIELDS: usize = crate::PUBLIC_CALL_REQUEST_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.call_context);
        target.write_felt(self.args_hash);
        target.write_u32(self.counter);
    }
}

impl FieldDeserializable for PublicCallRequest {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            call_context: source.read()?,
            args_hash: source.read_felt()?,
            counter: source.read_u32()?,
        })
    }
}

impl Serializable for PublicCallRequest {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.call_context.write_into(target);
        self.args_hash.write_into(target);
        target.write_u32(self.counter);
    }
}

impl Deserializable for PublicCallRequest {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let call_context = CallContext::read_from(source)?;
        let args_hash = Felt::read_from(source)?;
        let counter = source.read_u32()?;
        Ok(Self { call_context, args_hash, counter })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SCOPED_PRIVATE_CALL_REQUEST_LENGTH, types::FunctionSelector};

    #[test]
    fn scoped_private_call_request_appends_the_caller() {
        let context = CallContext::new(
            AztecAddress::from(Felt::new(1)),
            AztecAddress::from(Felt::new(2)),
            FunctionSelector::new(9),
            false,
            false,
        );
        let request = PrivateCallRequest::new(context, Felt::new(11), Felt::new(12), 3, 8);
        let scoped = request.scope(AztecAddress::from(Felt::new(1)));

        let fields = scoped.to_fields();
        assert_eq!(fields.len(), SCOPED_PRIVATE_CALL_REQUEST_LENGTH);
        assert_eq!(fields[fields.len() - 1], Felt::new(1));
        assert_eq!(scoped.counter(), 3);
        assert_eq!(ScopedPrivateCallRequest::read_from_fields(&fields).unwrap(), scoped);
    }
}
