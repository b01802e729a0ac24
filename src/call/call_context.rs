use crate::{
    FieldDeserializationError,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    hash::{DomainHashable, GeneratorIndex},
    types::{AztecAddress, FunctionSelector},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// CALL CONTEXT
// ================================================================================================

/// The context a function is executed in.
///
/// For a delegate call the storage contract address is the caller's rather than the address of
/// the contract whose code is executed.
///
/// # Field layout
///
/// ```text
/// [msg_sender, storage_contract_address, function_selector, is_delegate_call, is_static_call]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallContext {
    msg_sender: AztecAddress,
    storage_contract_address: AztecAddress,
    function_selector: FunctionSelector,
    is_delegate_call: bool,
    is_static_call: bool,
}

impl CallContext {
    pub fn new(
        msg_sender: AztecAddress,
        storage_contract_address: AztecAddress,
        function_selector: FunctionSelector,
        is_delegate_call: bool,
        is_static_call: bool,
    ) -> Self {
        Self {
            msg_sender,
            storage_contract_address,
            function_selector,
            is_delegate_call,
            is_static_call,
        }
    }

    pub fn msg_sender(&self) -> AztecAddress {
        self.msg_sender
    }

    pub fn storage_contract_address(&self) -> AztecAddress {
        self.storage_contract_address
    }

    pub fn function_selector(&self) -> FunctionSelector {
        self.function_selector
    }

    pub fn is_delegate_call(&self) -> bool {
        self.is_delegate_call
    }

    pub fn is_static_call(&self) -> bool {
        self.is_static_call
    }
}

impl DomainHashable for CallContext {
    const DOMAIN: GeneratorIndex = GeneratorIndex::CallContext;
}

impl Empty for CallContext {
    fn empty() -> Self {
        Self::default()
    }
}

impl FieldSerializable for CallContext {
    const NUM_FIELDS: usize = crate::CALL_CONTEXT_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.msg_sender);
        target.write(&self.storage_contract_address);
        target.write(&self.function_selector);
        target.write_bool(self.is_delegate_call);
        target.write_bool(self.is_static_call);
    }
}

impl FieldDeserializable for CallContext {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            msg_sender: source.read()?,
            storage_contract_address: source.read()?,
            function_selector: source.read()?,
            is_delegate_call: source.read_bool()?,
            is_static_call: source.read_bool()?,
        })
    }
}

impl Serializable for CallContext {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.msg_sender.write_into(target);
        self.storage_contract_address.write_into(target);
        self.function_selector.write_into(target);
        target.write_bool(self.is_delegate_call);
        target.write_bool(self.is_static_call);
    }
}

impl Deserializable for CallContext {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        Ok(Self {
            msg_sender: AztecAddress::read_from(source)?,
            storage_contract_address: AztecAddress::read_from(source)?,
            function_selector: FunctionSelector::read_from(source)?,
            is_delegate_call: source.read_bool()?,
            is_static_call: source.read_bool()?,
        })
    }
}

// FUNCTION DATA
// ================================================================================================

/// Identifies a function within a contract and the domain it executes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FunctionData {
    selector: FunctionSelector,
    is_private: bool,
}

impl FunctionData {
    pub fn new(selector: FunctionSelector, is_private: bool) -> Self {
        Self { selector, is_private }
    }

    pub fn selector(&self) -> FunctionSelector {
        self.selector
    }

    pub fn is_private(&self) -> bool {
        self.is_private
    }
}

impl DomainHashable for FunctionData {
    const DOMAIN: GeneratorIndex = GeneratorIndex::FunctionData;
}

impl Empty for FunctionData {
    fn empty() -> Self {
        Self::default()
    }
}

impl FieldSerializable for FunctionData {
    const NUM_FIELDS: usize = crate::FUNCTION_DATA_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.selector);
        target.write_bool(self.is_private);
    }
}

impl FieldDeserializable for FunctionData {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            selector: source.read()?,
            is_private: source.read_bool()?,
        })
    }
}

impl Serializable for FunctionData {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.selector.write_into(target);
        target.write_bool(self.is_private);
    }
}

impl Deserializable for FunctionData {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let selector = FunctionSelector::read_from(source)?;
        let is_private = source.read_bool()?;
        Ok(Self { selector, is_private })
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Felt, ONE, ZERO};

    #[test]
    fn call_context_layout() {
        let context = CallContext::new(
            AztecAddress::from(Felt::new(1)),
            AztecAddress::from(Felt::new(2)),
            FunctionSelector::new(3),
            false,
            true,
        );

        assert_eq!(
            context.to_fields(),
            vec![Felt::new(1), Felt::new(2), Felt::new(3), ZERO, ONE]
        );
        assert_eq!(CallContext::read_from_fields(&context.to_fields()).unwrap(), context);
        assert_eq!(CallContext::read_from_bytes(&context.to_bytes()).unwrap(), context);
    }

    #[test]
    fn function_data_hash_depends_on_domain() {
        let selector = FunctionSelector::from_signature("transfer(Field,Field)");
        let data = FunctionData::new(selector, true);

        assert_eq!(data.to_fields().len(), crate::FUNCTION_DATA_LENGTH);
        assert_ne!(data.hash(), FunctionData::new(data.selector(), false).hash());
        assert_ne!(
            data.hash(),
            crate::hash::hash_in_domain(&data.to_fields(), GeneratorIndex::CallContext)
        );
    }
}
