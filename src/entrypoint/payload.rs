use alloc::{boxed::Box, vec::Vec};

use super::{EncodedFunctionCall, FeeOptions, FeePaymentMethod, FunctionCall, PackedValues};
use crate::{
    APP_MAX_CALLS, Digest, EntrypointError, FEE_MAX_CALLS, Felt,
    codec::{BoundedArray, FieldSerializable, FieldWriter},
    crypto::rand::FeltRng,
    hash::{GeneratorIndex, digest_in_domain},
    types::AztecAddress,
};

// APP ENTRYPOINT PAYLOAD
// ================================================================================================

/// The calls an account makes on behalf of its user in the app logic phase of a transaction.
///
/// The payload hash is what the account signs. The nonce makes two payloads with the same calls
/// hash differently.
///
/// # Field layout
///
/// ```text
/// [function_calls (APP_MAX_CALLS x 5), nonce]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEntrypointPayload {
    function_calls: BoundedArray<EncodedFunctionCall, APP_MAX_CALLS>,
    packed_arguments: Vec<PackedValues>,
    nonce: Felt,
}

impl AppEntrypointPayload {
    /// Returns a new payload for the provided calls.
    ///
    /// # Errors
    /// Returns an error if more than [APP_MAX_CALLS] calls are provided.
    pub fn new(calls: &[FunctionCall], nonce: Felt) -> Result<Self, EntrypointError> {
        let (function_calls, packed_arguments) = encode_calls::<APP_MAX_CALLS>(calls)?;

        #[cfg(feature = "log")]
        ::log::debug!("Built app entrypoint payload [num_calls={}]", calls.len());

        Ok(Self { function_calls, packed_arguments, nonce })
    }

    /// Returns a new payload for the provided calls with a nonce drawn from `rng`.
    ///
    /// # Errors
    /// Returns an error if more than [APP_MAX_CALLS] calls are provided.
    pub fn from_app_execution<R: FeltRng>(
        calls: &[FunctionCall],
        rng: &mut R,
    ) -> Result<Self, EntrypointError> {
        Self::new(calls, rng.draw_element())
    }

    pub fn function_calls(&self) -> &BoundedArray<EncodedFunctionCall, APP_MAX_CALLS> {
        &self.function_calls
    }

    pub fn nonce(&self) -> Felt {
        self.nonce
    }

    /// Returns the arguments of every call in this payload, in call order.
    pub fn packed_arguments(&self) -> &[PackedValues] {
        &self.packed_arguments
    }

    /// Returns the digest of the field form of this payload in the
    /// [`GeneratorIndex::SignaturePayload`] domain. This is the message the account signs.
    pub fn hash(&self) -> Digest {
        digest_in_domain(&self.to_fields(), GeneratorIndex::SignaturePayload)
    }
}

impl FieldSerializable for AppEntrypointPayload {
    const NUM_FIELDS: usize = crate::APP_ENTRYPOINT_PAYLOAD_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.function_calls);
        target.write_felt(self.nonce);
    }
}

// FEE ENTRYPOINT PAYLOAD
// ================================================================================================

/// The calls an account makes in the fee payment phase of a transaction.
///
/// # Field layout
///
/// ```text
/// [function_calls (FEE_MAX_CALLS x 5), nonce, is_fee_payer]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeEntrypointPayload {
    function_calls: BoundedArray<EncodedFunctionCall, FEE_MAX_CALLS>,
    packed_arguments: Vec<PackedValues>,
    nonce: Felt,
    is_fee_payer: bool,
}

impl FeeEntrypointPayload {
    /// Returns a new payload for the provided calls.
    ///
    /// # Errors
    /// Returns an error if more than [FEE_MAX_CALLS] calls are provided.
    pub fn new(
        calls: &[FunctionCall],
        nonce: Felt,
        is_fee_payer: bool,
    ) -> Result<Self, EntrypointError> {
        let (function_calls, packed_arguments) = encode_calls::<FEE_MAX_CALLS>(calls)?;
        Ok(Self {
            function_calls,
            packed_arguments,
            nonce,
            is_fee_payer,
        })
    }

    /// Returns the fee payload of a transaction sent by `sender`.
    ///
    /// The calls are those required by the payment method of `fee_options`. The sender is marked
    /// as fee payer if the payment method resolves the fee payer to the sender.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The payment method fails to provide its calls or its fee payer.
    /// - The payment method resolves the fee payer to the zero address.
    /// - The payment method requires more than [FEE_MAX_CALLS] calls.
    pub fn from_fee_options<M: FeePaymentMethod, R: FeltRng>(
        sender: AztecAddress,
        fee_options: &FeeOptions<M>,
        rng: &mut R,
    ) -> Result<Self, EntrypointError> {
        let gas_settings = fee_options.gas_settings();
        let payment_method = fee_options.payment_method();

        let calls = payment_method
            .function_calls(gas_settings)
            .map_err(|err| EntrypointError::FeePaymentMethod(Box::new(err)))?;
        let fee_payer = payment_method
            .fee_payer(gas_settings)
            .map_err(|err| EntrypointError::FeePaymentMethod(Box::new(err)))?;
        if fee_payer.is_zero() {
            return Err(EntrypointError::FeePayerNotResolved);
        }
        let is_fee_payer = fee_payer == sender;

        #[cfg(feature = "log")]
        ::log::debug!(
            "Built fee entrypoint payload [num_calls={}, fee_payer={fee_payer}, is_fee_payer={is_fee_payer}]",
            calls.len()
        );

        Self::new(&calls, rng.draw_element(), is_fee_payer)
    }

    pub fn function_calls(&self) -> &BoundedArray<EncodedFunctionCall, FEE_MAX_CALLS> {
        &self.function_calls
    }

    pub fn nonce(&self) -> Felt {
        self.nonce
    }

    pub fn is_fee_payer(&self) -> bool {
        self.is_fee_payer
    }

    /// Returns the arguments of every call in this payload, in call order.
    pub fn packed_arguments(&self) -> &[PackedValues] {
        &self.packed_arguments
    }

    /// Returns the digest of the field form of this payload in the
    /// [`GeneratorIndex::FeePayload`] domain. This is the message the account signs.
    pub fn hash(&self) -> Digest {
        digest_in_domain(&self.to_fields(), GeneratorIndex::FeePayload)
    }
}

impl FieldSerializable for FeeEntrypointPayload {
    const NUM_FIELDS: usize = crate::FEE_ENTRYPOINT_PAYLOAD_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.function_calls);
        target.write_felt(self.nonce);
        target.write_bool(self.is_fee_payer);
    }
}

// HELPERS
// ================================================================================================

fn encode_calls<const N: usize>(
    calls: &[FunctionCall],
) -> Result<(BoundedArray<EncodedFunctionCall, N>, Vec<PackedValues>), EntrypointError> {
    let encoded = calls.iter().map(FunctionCall::encode).collect();
    let function_calls = BoundedArray::new(encoded)
        .map_err(|_| EntrypointError::TooManyCalls { max: N, actual: calls.len() })?;
    let packed_arguments = calls.iter().map(FunctionCall::packed_arguments).collect();

    Ok((function_calls, packed_arguments))
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{
        APP_ENTRYPOINT_PAYLOAD_LENGTH, FEE_ENTRYPOINT_PAYLOAD_LENGTH, FUNCTION_CALL_LENGTH, ONE,
        ZERO,
        codec::Empty,
        crypto::rand::RpoRandomCoin,
        entrypoint::NativeFeePaymentMethod,
        gas::GasSettings,
        hash::hash_in_domain,
        types::FunctionSelector,
    };

    fn rng() -> RpoRandomCoin {
        RpoRandomCoin::new([ONE, Felt::new(2), Felt::new(3), Felt::new(4)])
    }

    fn call(target: u64) -> FunctionCall {
        FunctionCall::private(
            AztecAddress::from(Felt::new(target)),
            FunctionSelector::new(7),
            vec![Felt::new(target), Felt::new(target + 1)],
        )
    }

    #[test]
    fn app_payload_pads_to_max_calls() {
        let payload = AppEntrypointPayload::new(&[call(1), call(2)], Felt::new(99)).unwrap();
        let fields = payload.to_fields();

        assert_eq!(fields.len(), APP_ENTRYPOINT_PAYLOAD_LENGTH);
        assert_eq!(fields.len(), APP_MAX_CALLS * FUNCTION_CALL_LENGTH + 1);
        assert_eq!(fields[APP_ENTRYPOINT_PAYLOAD_LENGTH - 1], Felt::new(99));
        assert_eq!(payload.function_calls().num_non_empty(), 2);
        assert!(payload.function_calls().iter().skip(2).all(EncodedFunctionCall::is_empty));
        assert_eq!(payload.packed_arguments().len(), 2);
    }

    #[test]
    fn app_payload_rejects_too_many_calls() {
        let calls: Vec<_> = (1..=5).map(call).collect();

        assert_matches!(
            AppEntrypointPayload::new(&calls, ZERO),
            Err(EntrypointError::TooManyCalls { max: APP_MAX_CALLS, actual: 5 })
        );
    }

    #[test]
    fn payload_domains_differ() {
        let calls = [call(1), call(2)];
        let app = AppEntrypointPayload::new(&calls, ONE).unwrap();
        let fee = FeeEntrypointPayload::new(&calls, ONE, false).unwrap();

        assert_eq!(
            app.hash(),
            digest_in_domain(&app.to_fields(), GeneratorIndex::SignaturePayload)
        );
        assert_eq!(fee.hash(), digest_in_domain(&fee.to_fields(), GeneratorIndex::FeePayload));
        assert_ne!(app.hash(), digest_in_domain(&app.to_fields(), GeneratorIndex::FeePayload));
        assert_eq!(fee.to_fields().len(), FEE_ENTRYPOINT_PAYLOAD_LENGTH);
    }

    #[test]
    fn signed_hash_is_a_full_digest() {
        let payload = AppEntrypointPayload::new(&[call(1)], ONE).unwrap();
        let digest = payload.hash();

        assert_eq!(
            digest.as_elements()[0],
            hash_in_domain(&payload.to_fields(), GeneratorIndex::SignaturePayload)
        );
        assert!(digest.as_elements()[1..].iter().any(|element| *element != ZERO));
    }

    #[test]
    fn native_payment_marks_the_sender_as_fee_payer() {
        let sender = AztecAddress::from(Felt::new(5));
        let options = FeeOptions::new(NativeFeePaymentMethod::new(sender), GasSettings::default());
        let mut rng = rng();

        let payload = FeeEntrypointPayload::from_fee_options(sender, &options, &mut rng).unwrap();
        assert!(payload.is_fee_payer());
        assert!(payload.function_calls().is_empty());

        let other = AztecAddress::from(Felt::new(6));
        let payload = FeeEntrypointPayload::from_fee_options(other, &options, &mut rng).unwrap();
        assert!(!payload.is_fee_payer());
    }

    #[test]
    fn unresolved_fee_payer_is_rejected() {
        let method = NativeFeePaymentMethod::new(AztecAddress::ZERO);
        let options = FeeOptions::new(method, GasSettings::default());
        let mut rng = rng();

        assert_matches!(
            FeeEntrypointPayload::from_fee_options(AztecAddress::ZERO, &options, &mut rng),
            Err(EntrypointError::FeePayerNotResolved)
        );
    }
}
