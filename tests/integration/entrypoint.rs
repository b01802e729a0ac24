use assert_matches::assert_matches;
use circuit_objects::{
    APP_ENTRYPOINT_PAYLOAD_LENGTH, APP_MAX_CALLS, EntrypointError, FEE_ENTRYPOINT_PAYLOAD_LENGTH,
    FEE_MAX_CALLS, FUNCTION_CALL_LENGTH, Felt, ONE, ZERO,
    codec::{Empty, FieldSerializable},
    crypto::rand::RpoRandomCoin,
    entrypoint::{
        AppEntrypointPayload, FeeEntrypointPayload, FeeOptions, FunctionCall,
        NativeFeePaymentMethod,
    },
    gas::GasSettings,
    hash::{DomainHashable, compute_var_args_hash},
    testing::MockFeePaymentMethod,
    types::{AztecAddress, FunctionSelector},
};
use rstest::rstest;

// HELPERS
// ================================================================================================

fn rng() -> RpoRandomCoin {
    RpoRandomCoin::new([ONE, Felt::new(2), Felt::new(3), Felt::new(4)])
}

fn transfer(to: u64, amount: u64) -> FunctionCall {
    FunctionCall::private(
        AztecAddress::new(Felt::new(to)),
        FunctionSelector::new(0x1234),
        vec![Felt::new(to), Felt::new(amount)],
    )
}

fn calls(count: u64) -> Vec<FunctionCall> {
    (1..=count).map(|i| transfer(i, 100 * i)).collect()
}

// APP PAYLOAD
// ================================================================================================

#[rstest]
#[case::no_calls(0)]
#[case::one_call(1)]
#[case::max_calls(4)]
fn app_payload_has_fixed_length(#[case] num_calls: u64) -> anyhow::Result<()> {
    let calls = calls(num_calls);
    let payload = AppEntrypointPayload::from_app_execution(&calls, &mut rng())?;
    let fields = payload.to_fields();

    assert_eq!(fields.len(), APP_ENTRYPOINT_PAYLOAD_LENGTH);
    assert_eq!(payload.function_calls().num_non_empty(), calls.len());
    assert_eq!(payload.packed_arguments().len(), calls.len());
    assert_eq!(fields[APP_MAX_CALLS * FUNCTION_CALL_LENGTH], payload.nonce());

    for (call, packed) in calls.iter().zip(payload.packed_arguments()) {
        assert_eq!(packed.values(), call.args());
        assert_eq!(packed.hash(), compute_var_args_hash(call.args()));
    }
    Ok(())
}

#[test]
fn app_payload_rejects_five_calls() {
    assert_matches!(
        AppEntrypointPayload::from_app_execution(&calls(5), &mut rng()),
        Err(EntrypointError::TooManyCalls { max: 4, actual: 5 })
    );
}

#[test]
fn app_payload_hash_depends_on_nonce() -> anyhow::Result<()> {
    let calls = calls(2);
    let first = AppEntrypointPayload::new(&calls, ONE)?;
    let second = AppEntrypointPayload::new(&calls, Felt::new(2))?;

    assert_ne!(first.hash(), second.hash());
    assert_eq!(first.hash(), AppEntrypointPayload::new(&calls, ONE)?.hash());
    Ok(())
}

// FEE PAYLOAD
// ================================================================================================

#[test]
fn fee_payload_carries_payment_method_calls() -> anyhow::Result<()> {
    let sender = AztecAddress::new(Felt::new(10));
    let paymaster = AztecAddress::new(Felt::new(11));
    let method = MockFeePaymentMethod::new(paymaster, calls(2));
    let options = FeeOptions::new(method, GasSettings::default());

    let payload = FeeEntrypointPayload::from_fee_options(sender, &options, &mut rng())?;

    assert!(!payload.is_fee_payer());
    assert_eq!(payload.function_calls().num_non_empty(), FEE_MAX_CALLS);
    assert_eq!(payload.to_fields().len(), FEE_ENTRYPOINT_PAYLOAD_LENGTH);
    assert_eq!(*payload.to_fields().last().unwrap(), ZERO);
    Ok(())
}

#[test]
fn fee_payload_marks_the_paying_sender() -> anyhow::Result<()> {
    let sender = AztecAddress::new(Felt::new(10));
    let options = FeeOptions::new(NativeFeePaymentMethod::new(sender), GasSettings::default());

    let payload = FeeEntrypointPayload::from_fee_options(sender, &options, &mut rng())?;

    assert!(payload.is_fee_payer());
    assert!(payload.function_calls().iter().all(|call| call.is_empty()));
    assert_eq!(*payload.to_fields().last().unwrap(), ONE);
    Ok(())
}

#[test]
fn failing_payment_method_is_reported() {
    let options =
        FeeOptions::new(MockFeePaymentMethod::failing("no balance"), GasSettings::default());

    let result = FeeEntrypointPayload::from_fee_options(AztecAddress::ZERO, &options, &mut rng());
    assert_matches!(result, Err(EntrypointError::FeePaymentMethod(source)) => {
        assert!(source.to_string().contains("no balance"));
    });
}

#[test]
fn fee_payload_rejects_too_many_payment_calls() {
    let sender = AztecAddress::new(Felt::new(10));
    let options =
        FeeOptions::new(MockFeePaymentMethod::new(sender, calls(3)), GasSettings::default());

    assert_matches!(
        FeeEntrypointPayload::from_fee_options(sender, &options, &mut rng()),
        Err(EntrypointError::TooManyCalls { max: FEE_MAX_CALLS, actual: 3 })
    );
}
