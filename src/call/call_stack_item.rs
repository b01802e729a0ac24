use super::{FunctionData, PrivateCircuitPublicInputs, PublicCircuitPublicInputs};
use crate::{
    Felt, FieldDeserializationError,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    hash::{DomainHashable, GeneratorIndex, hash_in_domain},
    types::AztecAddress,
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// PRIVATE CALL STACK ITEM
// ================================================================================================

/// A private function call together with the public inputs of its execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateCallStackItem {
    contract_address: AztecAddress,
    function_data: FunctionData,
    public_inputs: PrivateCircuitPublicInputs,
}

impl PrivateCallStackItem {
    pub fn new(
        contract_address: AztecAddress,
        function_data: FunctionData,
        public_inputs: PrivateCircuitPublicInputs,
    ) -> Self {
        Self { contract_address, function_data, public_inputs }
    }

    pub fn contract_address(&self) -> AztecAddress {
        self.contract_address
    }

    pub fn function_data(&self) -> &FunctionData {
        &self.function_data
    }

    pub fn public_inputs(&self) -> &PrivateCircuitPublicInputs {
        &self.public_inputs
    }
}

impl DomainHashable for PrivateCallStackItem {
    const DOMAIN: GeneratorIndex = GeneratorIndex::CallStackItem;
}

impl Empty for PrivateCallStackItem {
    fn empty() -> Self {
        Self::new(AztecAddress::ZERO, FunctionData::empty(), PrivateCircuitPublicInputs::empty())
    }
}

impl FieldSerializable for PrivateCallStackItem {
    const NUM_FIELDS: usize = crate::PRIVATE_CALL_STACK_ITEM_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.contract_address);
        target.write(&self.function_data);
        target.write(&self.public_inputs);
    }
}

impl FieldDeserializable for PrivateCallStackItem {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            contract_address: source.read()?,
            function_data: source.read()?,
            public_inputs: source.read()?,
        })
    }
}

impl Serializable for PrivateCallStackItem {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.contract_address.write_into(target);
        self.function_data.write_into(target);
        self.public_inputs.write_into(target);
    }
}

impl Deserializable for PrivateCallStackItem {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let contract_address = AztecAddress::read_from(source)?;
        let function_data = FunctionData::read_from(source)?;
        let public_inputs = PrivateCircuitPublicInputs::read_from(source)?;
        Ok(Self { contract_address, function_data, public_inputs })
    }
}

// PUBLIC CALL STACK ITEM
// ================================================================================================

/// A public function call together with the public inputs of its execution.
///
/// A private function enqueueing a public call only knows the call context and arguments of the
/// call, not the outcome of its execution. Such an item is marked as an execution request, and
/// its hash commits only to what the caller knows, so the same hash is obtained once the call
/// has actually been executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicCallStackItem {
    contract_address: AztecAddress,
    function_data: FunctionData,
    public_inputs: PublicCircuitPublicInputs,
    is_execution_request: bool,
}

impl PublicCallStackItem {
    pub fn new(
        contract_address: AztecAddress,
        function_data: FunctionData,
        public_inputs: PublicCircuitPublicInputs,
        is_execution_request: bool,
    ) -> Self {
        Self {
            contract_address,
            function_data,
            public_inputs,
            is_execution_request,
        }
    }

    pub fn contract_address(&self) -> AztecAddress {
        self.contract_address
    }

    pub fn function_data(&self) -> &FunctionData {
        &self.function_data
    }

    pub fn public_inputs(&self) -> &PublicCircuitPublicInputs {
        &self.public_inputs
    }

    pub fn is_execution_request(&self) -> bool {
        self.is_execution_request
    }

    /// Returns the part of this item known before execution: the public inputs are reduced to
    /// the call context and arguments hash.
    pub fn to_execution_request(&self) -> Self {
        let mut public_inputs = PublicCircuitPublicInputs::empty();
        public_inputs.call_context = self.public_inputs.call_context;
        public_inputs.args_hash = self.public_inputs.args_hash;

        Self::new(self.contract_address, self.function_data, public_inputs, false)
    }
}

impl DomainHashable for PublicCallStackItem {
    const DOMAIN: GeneratorIndex = GeneratorIndex::CallStackItem;

    fn hash(&self) -> Felt {
        if self.is_execution_request {
            return self.to_execution_request().hash();
        }
        hash_in_domain(&self.to_fields(), Self::DOMAIN)
    }
}

impl Empty for PublicCallStackItem {
    fn empty() -> Self {
        Self::new(
            AztecAddress::ZERO,
            FunctionData::empty(),
            PublicCircuitPublicInputs::empty(),
            false,
        )
    }
}

impl FieldSerializable for PublicCallStackItem {
    const NUM_FIELDS: usize = crate::PUBLIC_CALL_STACK_ITEM_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.contract_address);
        target.write(&self.function_data);
        target.write(&self.public_inputs);
        target.write_bool(self.is_execution_request);
    }
}

impl FieldDeserializable for PublicCallStackItem {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            contract_address: source.read()?,
            function_data: source.read()?,
            public_inputs: source.read()?,
            is_execution_request: source.read_bool()?,
        })
    }
}

impl Serializable for PublicCallStackItem {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.contract_address.write_into(target);
        self.function_data.write_into(target);
        self.public_inputs.write_into(target);
        target.write_bool(self.is_execution_request);
    }
}

impl Deserializable for PublicCallStackItem {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        Ok(Self {
            contract_address: AztecAddress::read_from(source)?,
            function_data: FunctionData::read_from(source)?,
            public_inputs: PublicCircuitPublicInputs::read_from(source)?,
            is_execution_request: source.read_bool()?,
        })
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        PRIVATE_CALL_STACK_ITEM_LENGTH, PUBLIC_CALL_STACK_ITEM_LENGTH, call::CallContext,
        types::FunctionSelector,
    };

    fn executed_item() -> PublicCallStackItem {
        let mut public_inputs = PublicCircuitPublicInputs::random();
        public_inputs.call_context = CallContext::new(
            AztecAddress::from(Felt::new(1)),
            AztecAddress::from(Felt::new(2)),
            FunctionSelector::new(3),
            false,
            false,
        );
        public_inputs.args_hash = Felt::new(99);

        PublicCallStackItem::new(
            AztecAddress::from(Felt::new(2)),
            FunctionData::new(FunctionSelector::new(3), false),
            public_inputs,
            false,
        )
    }

    #[test]
    fn execution_request_hash_ignores_execution_results() {
        let executed = executed_item();

        let mut request = executed.clone();
        request.is_execution_request = true;

        let mut other_outcome = request.clone();
        other_outcome.public_inputs.returns_hash = Felt::new(1_000);
        other_outcome.public_inputs.transaction_fee = Felt::new(7);

        assert_eq!(request.hash(), other_outcome.hash());
        assert_eq!(request.hash(), executed.to_execution_request().hash());
        assert_ne!(request.hash(), executed.hash());
    }

    #[test]
    fn call_stack_item_lengths() {
        assert_eq!(executed_item().to_fields().len(), PUBLIC_CALL_STACK_ITEM_LENGTH);
        assert_eq!(PrivateCallStackItem::empty().to_fields().len(), PRIVATE_CALL_STACK_ITEM_LENGTH);
    }

    #[test]
    fn private_item_round_trips() {
        let item = PrivateCallStackItem::new(
            AztecAddress::from(Felt::new(8)),
            FunctionData::new(FunctionSelector::new(4), true),
            PrivateCircuitPublicInputs::random(),
        );

        assert_eq!(PrivateCallStackItem::read_from_fields(&item.to_fields()).unwrap(), item);
        assert_eq!(PrivateCallStackItem::read_from_bytes(&item.to_bytes()).unwrap(), item);
    }
}
