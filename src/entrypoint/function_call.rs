use alloc::vec::Vec;

use crate::{
    Felt, FieldDeserializationError, ZERO,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    hash::compute_var_args_hash,
    types::{AztecAddress, FunctionSelector},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// FUNCTION CALL
// ================================================================================================

/// A call to a contract function, as requested by the user of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    to: AztecAddress,
    selector: FunctionSelector,
    args: Vec<Felt>,
    is_public: bool,
    is_static: bool,
}

impl FunctionCall {
    pub fn new(
        to: AztecAddress,
        selector: FunctionSelector,
        args: Vec<Felt>,
        is_public: bool,
        is_static: bool,
    ) -> Self {
        Self { to, selector, args, is_public, is_static }
    }

    /// Returns a call to a private function which may modify state.
    pub fn private(to: AztecAddress, selector: FunctionSelector, args: Vec<Felt>) -> Self {
        Self::new(to, selector, args, false, false)
    }

    /// Returns a call to a public function which may modify state.
    pub fn public(to: AztecAddress, selector: FunctionSelector, args: Vec<Felt>) -> Self {
        Self::new(to, selector, args, true, false)
    }

    pub fn to(&self) -> AztecAddress {
        self.to
    }

    pub fn selector(&self) -> FunctionSelector {
        self.selector
    }

    pub fn args(&self) -> &[Felt] {
        &self.args
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Returns the arguments of this call together with their hash.
    pub fn packed_arguments(&self) -> PackedValues {
        PackedValues::new(self.args.clone())
    }

    /// Returns the fixed-size form of this call in which the arguments are replaced by their
    /// hash.
    pub fn encode(&self) -> EncodedFunctionCall {
        EncodedFunctionCall {
            args_hash: compute_var_args_hash(&self.args),
            function_selector: self.selector,
            target_address: self.to,
            is_public: self.is_public,
            is_static: self.is_static,
        }
    }
}

// PACKED VALUES
// ================================================================================================

/// A list of values together with their hash.
///
/// Circuits refer to variable-length argument lists by hash only; the values are supplied to the
/// execution oracle separately and looked up by that hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedValues {
    values: Vec<Felt>,
    hash: Felt,
}

impl PackedValues {
    pub fn new(values: Vec<Felt>) -> Self {
        let hash = compute_var_args_hash(&values);
        Self { values, hash }
    }

    pub fn values(&self) -> &[Felt] {
        &self.values
    }

    pub fn hash(&self) -> Felt {
        self.hash
    }

    pub fn into_values(self) -> Vec<Felt> {
        self.values
    }
}

impl Serializable for PackedValues {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.values.write_into(target);
    }
}

impl Deserializable for PackedValues {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        Ok(Self::new(Vec::<Felt>::read_from(source)?))
    }
}

// ENCODED FUNCTION CALL
// ================================================================================================

/// A [FunctionCall] as it appears in an entrypoint payload.
///
/// # Field layout
///
/// ```text
/// [args_hash, function_selector, target_address, is_public, is_static]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodedFunctionCall {
    args_hash: Felt,
    function_selector: FunctionSelector,
    target_address: AztecAddress,
    is_public: bool,
    is_static: bool,
}

impl EncodedFunctionCall {
    pub fn args_hash(&self) -> Felt {
        self.args_hash
    }

    pub fn function_selector(&self) -> FunctionSelector {
        self.function_selector
    }

    pub fn target_address(&self) -> AztecAddress {
        self.target_address
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }
}

impl From<&FunctionCall> for EncodedFunctionCall {
    fn from(call: &FunctionCall) -> Self {
        call.encode()
    }
}

impl Empty for EncodedFunctionCall {
    fn empty() -> Self {
        Self::default()
    }

    fn is_empty(&self) -> bool {
        self.args_hash == ZERO
            && self.function_selector.is_zero()
            && self.target_address.is_zero()
            && !self.is_public
            && !self.is_static
    }
}

impl FieldSerializable for EncodedFunctionCall {
    const NUM_FIELDS: usize = crate::FUNCTION_CALL_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_felt(self.args_hash);
        target.write(&self.function_selector);
        target.write(&self.target_address);
        target.write_bool(self.is_public);
        target.write_bool(self.is_static);
    }
}

impl FieldDeserializable for EncodedFunctionCall {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            args_hash: source.read_felt()?,
            function_selector: source.read()?,
            target_address: source.read()?,
            is_public: source.read_bool()?,
            is_static: source.read_bool()?,
        })
    }
}

impl Serializable for EncodedFunctionCall {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.args_hash.write_into(target);
        self.function_selector.write_into(target);
        self.target_address.write_into(target);
        target.write_bool(self.is_public);
        target.write_bool(self.is_static);
    }
}

impl Deserializable for EncodedFunctionCall {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        Ok(Self {
            args_hash: Felt::read_from(source)?,
            function_selector: FunctionSelector::read_from(source)?,
            target_address: AztecAddress::read_from(source)?,
            is_public: source.read_bool()?,
            is_static: source.read_bool()?,
        })
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ONE;

    #[test]
    fn encoding_replaces_args_with_their_hash() {
        let args = vec![Felt::new(1), Felt::new(2), Felt::new(3)];
        let call = FunctionCall::public(
            AztecAddress::from(Felt::new(10)),
            FunctionSelector::new(20),
            args.clone(),
        );

        let encoded = call.encode();
        assert_eq!(encoded.args_hash(), compute_var_args_hash(&args));
        assert_eq!(encoded.args_hash(), call.packed_arguments().hash());
        assert_eq!(
            encoded.to_fields(),
            vec![encoded.args_hash(), Felt::new(20), Felt::new(10), ONE, ZERO]
        );
    }

    #[test]
    fn call_without_args_has_zero_args_hash() {
        let call = FunctionCall::private(
            AztecAddress::from(Felt::new(1)),
            FunctionSelector::new(2),
            Vec::new(),
        );

        assert_eq!(call.packed_arguments().hash(), ZERO);
        assert!(!call.encode().is_empty());
    }

    #[test]
    fn packed_values_recompute_the_hash_on_decode() {
        let packed = PackedValues::new(vec![Felt::new(4), Felt::new(5)]);
        let decoded = PackedValues::read_from_bytes(&packed.to_bytes()).unwrap();

        assert_eq!(decoded, packed);
        assert_eq!(decoded.hash(), compute_var_args_hash(packed.values()));
    }
}
