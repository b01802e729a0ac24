use super::TxContext;
use crate::{
    Felt, FieldDeserializationError, ZERO,
    call::FunctionData,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    hash::{DomainHashable, GeneratorIndex},
    types::AztecAddress,
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// TRANSACTION REQUEST
// ================================================================================================

/// A request to execute a transaction, signed by the account it originates from.
///
/// The request hash commits to the entrypoint function, its arguments and the transaction
/// context, and is what the first private kernel iteration checks the account's call against.
///
/// # Field layout
///
/// ```text
/// [origin, function_data (2), args_hash, tx_context (9)]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxRequest {
    origin: AztecAddress,
    function_data: FunctionData,
    args_hash: Felt,
    tx_context: TxContext,
}

impl TxRequest {
    pub fn new(
        origin: AztecAddress,
        function_data: FunctionData,
        args_hash: Felt,
        tx_context: TxContext,
    ) -> Self {
        Self { origin, function_data, args_hash, tx_context }
    }

    pub fn origin(&self) -> AztecAddress {
        self.origin
    }

    pub fn function_data(&self) -> &FunctionData {
        &self.function_data
    }

    pub fn args_hash(&self) -> Felt {
        self.args_hash
    }

    pub fn tx_context(&self) -> &TxContext {
        &self.tx_context
    }
}

impl DomainHashable for TxRequest {
    const DOMAIN: GeneratorIndex = GeneratorIndex::TxRequest;
}

impl Empty for TxRequest {
    fn empty() -> Self {
        Self::new(AztecAddress::ZERO, FunctionData::empty(), ZERO, TxContext::empty())
    }

    fn is_empty(&self) -> bool {
        self.origin.is_zero()
            && self.function_data.is_empty()
            && self.args_hash == ZERO
            && self.tx_context.is_empty()
    }
}

impl FieldSerializable for TxRequest {
    const NUM_FIELDS: usize = crate::TX_REQUEST_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.origin);
        target.write(&self.function_data);
        target.write_felt(self.args_hash);
        target.write(&self.tx_context);
    }
}

impl FieldDeserializable for TxRequest {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            origin: source.read()?,
            function_data: source.read()?,
            args_hash: source.read_felt()?,
            tx_context: source.read()?,
        })
    }
}

impl Serializable for TxRequest {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.origin.write_into(target);
        self.function_data.write_into(target);
        self.args_hash.write_into(target);
        self.tx_context.write_into(target);
    }
}

impl Deserializable for TxRequest {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        Ok(Self {
            origin: AztecAddress::read_from(source)?,
            function_data: FunctionData::read_from(source)?,
            args_hash: Felt::read_from(source)?,
            tx_context: TxContext::read_from(source)?,
        })
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TX_CONTEXT_LENGTH, TX_REQUEST_LENGTH, gas::GasSettings, types::FunctionSelector};

    fn request() -> TxRequest {
        TxRequest::new(
            AztecAddress::from(Felt::new(77)),
            FunctionData::new(FunctionSelector::from_signature("entrypoint(Field)"), true),
            Felt::new(5),
            TxContext::new(Felt::new(1), Felt::new(2), GasSettings::default()),
        )
    }

    #[test]
    fn tx_context_is_the_trailing_block() {
        let request = request();
        let fields = request.to_fields();

        assert_eq!(fields.len(), TX_REQUEST_LENGTH);
        let tx_context_fields = &fields[TX_REQUEST_LENGTH - TX_CONTEXT_LENGTH..];
        assert_eq!(tx_context_fields, request.tx_context().to_fields().as_slice());
        assert_eq!(fields[0], Felt::new(77));
    }

    #[test]
    fn hash_commits_to_the_gas_settings() {
        let request = request();
        let cheaper = TxRequest::new(
            request.origin(),
            *request.function_data(),
            request.args_hash(),
            TxContext::new(Felt::new(1), Felt::new(2), GasSettings::empty()),
        );

        assert_ne!(request.hash(), cheaper.hash());
        assert_eq!(TxRequest::read_from_bytes(&request.to_bytes()).unwrap(), request);
    }
}
