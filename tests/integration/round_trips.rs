use core::fmt::Debug;

use circuit_objects::{
    CALL_CONTEXT_LENGTH, FUNCTION_DATA_LENGTH, GAS_SETTINGS_LENGTH, GLOBAL_VARIABLES_LENGTH,
    HEADER_LENGTH, PRIVATE_CALL_REQUEST_LENGTH, PRIVATE_CALL_STACK_ITEM_LENGTH,
    PRIVATE_CIRCUIT_PUBLIC_INPUTS_LENGTH, PUBLIC_CALL_REQUEST_LENGTH, PUBLIC_CALL_STACK_ITEM_LENGTH,
    PUBLIC_CIRCUIT_PUBLIC_INPUTS_LENGTH, STATE_REFERENCE_LENGTH, TX_CONTEXT_LENGTH,
    TX_REQUEST_LENGTH, ZERO,
    block::{GlobalVariables, Header, StateReference},
    call::{
        CallContext, FunctionData, PrivateCallRequest, PrivateCallStackItem,
        PrivateCircuitPublicInputs, PublicCallRequest, PublicCallStackItem,
        PublicCircuitPublicInputs,
    },
    codec::{Empty, FieldDeserializable, FieldSerializable},
    gas::GasSettings,
    hash::DomainHashable,
    transaction::{TxContext, TxRequest},
    types::AztecAddress,
    utils::serde::{Deserializable, Serializable},
};

// HELPERS
// ================================================================================================

/// Checks that `value` survives both codecs and occupies exactly `length` fields.
fn assert_round_trips<T>(value: &T, length: usize) -> anyhow::Result<()>
where
    T: FieldSerializable + FieldDeserializable + Serializable + Deserializable + PartialEq + Debug,
{
    let fields = value.to_fields();
    assert_eq!(fields.len(), length);
    assert_eq!(T::NUM_FIELDS, length);
    assert_eq!(&T::read_from_fields(&fields)?, value);
    let decoded = T::read_from_bytes(&value.to_bytes()).map_err(|err| anyhow::anyhow!("{err}"))?;
    assert_eq!(&decoded, value);
    Ok(())
}

fn assert_empty_and_random<T>(random: impl Fn() -> T, length: usize) -> anyhow::Result<()>
where
    T: Empty
        + FieldSerializable
        + FieldDeserializable
        + Serializable
        + Deserializable
        + PartialEq
        + Debug,
{
    let empty = T::empty();
    assert!(empty.is_empty());
    assert_round_trips(&empty, length)?;

    let value = random();
    assert!(!value.is_empty());
    assert_round_trips(&value, length)
}

// TESTS
// ================================================================================================

#[test]
fn block_structs_round_trip() -> anyhow::Result<()> {
    assert_empty_and_random(StateReference::random, STATE_REFERENCE_LENGTH)?;
    assert_empty_and_random(GlobalVariables::random, GLOBAL_VARIABLES_LENGTH)?;
    assert_empty_and_random(Header::random, HEADER_LENGTH)
}

#[test]
fn call_structs_round_trip() -> anyhow::Result<()> {
    assert_empty_and_random(CallContext::random, CALL_CONTEXT_LENGTH)?;
    assert_empty_and_random(FunctionData::random, FUNCTION_DATA_LENGTH)?;
    assert_empty_and_random(PrivateCallRequest::random, PRIVATE_CALL_REQUEST_LENGTH)?;
    assert_empty_and_random(PublicCallRequest::random, PUBLIC_CALL_REQUEST_LENGTH)?;
    assert_empty_and_random(
        PrivateCircuitPublicInputs::random,
        PRIVATE_CIRCUIT_PUBLIC_INPUTS_LENGTH,
    )?;
    assert_empty_and_random(
        PublicCircuitPublicInputs::random,
        PUBLIC_CIRCUIT_PUBLIC_INPUTS_LENGTH,
    )
}

#[test]
fn call_stack_items_round_trip() -> anyhow::Result<()> {
    let private = PrivateCallStackItem::new(
        AztecAddress::random(),
        FunctionData::random(),
        PrivateCircuitPublicInputs::random(),
    );
    assert_round_trips(&private, PRIVATE_CALL_STACK_ITEM_LENGTH)?;

    let public = PublicCallStackItem::new(
        AztecAddress::random(),
        FunctionData::random(),
        PublicCircuitPublicInputs::random(),
        true,
    );
    assert_round_trips(&public, PUBLIC_CALL_STACK_ITEM_LENGTH)?;
    assert_round_trips(&PublicCallStackItem::empty(), PUBLIC_CALL_STACK_ITEM_LENGTH)
}

#[test]
fn transaction_structs_round_trip() -> anyhow::Result<()> {
    assert_empty_and_random(GasSettings::random, GAS_SETTINGS_LENGTH)?;
    assert_empty_and_random(TxContext::random, TX_CONTEXT_LENGTH)?;
    assert_empty_and_random(TxRequest::random, TX_REQUEST_LENGTH)
}

#[test]
fn empty_structs_hash_per_domain() {
    // all of these are zero in field form but are hashed in different domains
    let hashes = [
        CallContext::empty().hash(),
        FunctionData::empty().hash(),
        TxContext::empty().hash(),
        GlobalVariables::empty().hash(),
    ];

    assert!(CallContext::empty().to_fields().iter().all(|field| *field == ZERO));
    for (i, a) in hashes.iter().enumerate() {
        for b in hashes.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn truncated_field_input_is_rejected() {
    let header = Header::random();
    let fields = header.to_fields();

    assert!(Header::read_from_fields(&fields[..HEADER_LENGTH - 1]).is_err());
}
