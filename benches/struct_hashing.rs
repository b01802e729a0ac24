use std::hint::black_box;

use circuit_objects::{
    call::{
        FunctionData, PrivateCallStackItem, PrivateCircuitPublicInputs, PublicCallStackItem,
        PublicCircuitPublicInputs,
    },
    codec::FieldSerializable,
    hash::DomainHashable,
    types::AztecAddress,
};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use pprof::criterion::{Output, PProfProfiler};

/// Hashes fully populated private circuit public inputs.
///
/// To produce a flamegraph, set `STRUCT_HASHING_FLAMEGRAPH` and run with `--profile-time`:
///
/// ```sh
/// STRUCT_HASHING_FLAMEGRAPH=1 cargo bench --bench struct_hashing -- --profile-time 10
/// ```
fn private_inputs_hash(c: &mut Criterion) {
    let inputs = PrivateCircuitPublicInputs::random();
    c.bench_function("private_circuit_public_inputs_hash", |b| {
        b.iter(|| black_box(inputs.hash()));
    });
    c.bench_function("private_circuit_public_inputs_to_fields", |b| {
        b.iter(|| black_box(inputs.to_fields()));
    });
}

fn public_inputs_hash(c: &mut Criterion) {
    let inputs = PublicCircuitPublicInputs::random();
    c.bench_function("public_circuit_public_inputs_hash", |b| {
        b.iter(|| black_box(inputs.hash()));
    });
}

fn call_stack_item_hash(c: &mut Criterion) {
    c.bench_function("private_call_stack_item_hash", |b| {
        b.iter_batched(
            || {
                PrivateCallStackItem::new(
                    AztecAddress::random(),
                    FunctionData::random(),
                    PrivateCircuitPublicInputs::random(),
                )
            },
            |item| black_box(item.hash()),
            BatchSize::SmallInput,
        );
    });

    let item = PublicCallStackItem::new(
        AztecAddress::random(),
        FunctionData::random(),
        PublicCircuitPublicInputs::random(),
        true,
    );
    c.bench_function("public_call_stack_item_execution_request_hash", |b| {
        b.iter(|| black_box(item.hash()));
    });
}

fn build_criterion() -> Criterion {
    let mut crit = Criterion::default().configure_from_args();
    if std::env::var_os("STRUCT_HASHING_FLAMEGRAPH").is_some() {
        crit = crit.with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    }
    crit
}

criterion_group!(
    name = struct_hashing;
    config = build_criterion();
    targets = private_inputs_hash, public_inputs_hash, call_stack_item_hash
);
criterion_main!(struct_hashing);
