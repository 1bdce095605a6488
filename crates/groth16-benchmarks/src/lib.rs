//! Benchmarks for Groth16 components.
//!
//! Every benchmark runs over `generate_r1cs_example` systems so sizes are
//! comparable across phases.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput};
use groth16_core::{codec, generate, prepare_verification_key, CodecConfig, Proof, Prover, Verifier};
use groth16_field::{FieldLike, Fr};
use groth16_qap::QAP;
use groth16_r1cs::r1cs_example::{generate_r1cs_example, R1CSExample};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Constraint counts exercised by the heavier benchmarks
pub const SIZES: [usize; 3] = [16, 256, 1024];

const PRIMARY_INPUT_SIZE: usize = 4;

fn rng() -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(0x6731_3620)
}

fn example(num_constraints: usize) -> R1CSExample<Fr> {
    generate_r1cs_example(num_constraints, PRIMARY_INPUT_SIZE, &mut rng())
}

/// Constraint satisfaction check
pub fn bench_r1cs(c: &mut Criterion) {
    let mut group = c.benchmark_group("r1cs");
    for &size in &SIZES {
        let ex = example(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("is_satisfied", size), &ex, |b, ex| {
            b.iter(|| {
                ex.constraint_system
                    .is_satisfied(&ex.primary_input, &ex.auxiliary_input)
                    .unwrap()
            })
        });
    }
    group.finish();
}

/// QAP instance and witness maps
pub fn bench_qap(c: &mut Criterion) {
    let mut group = c.benchmark_group("qap");
    for &size in &SIZES {
        let ex = example(size);
        let qap = QAP::from_r1cs(&ex.constraint_system).unwrap();
        let assignment = ex
            .constraint_system
            .create_assignment(&ex.primary_input, &ex.auxiliary_input)
            .unwrap();
        let point = Fr::random(&mut rng());

        group.bench_with_input(BenchmarkId::new("evaluate_at", size), &point, |b, &point| {
            b.iter(|| qap.evaluate_at(point))
        });
        group.bench_with_input(BenchmarkId::new("compute_quotient", size), &assignment, |b, assignment| {
            b.iter(|| qap.compute_quotient(assignment).unwrap())
        });
    }
    group.finish();
}

/// Key generation
pub fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.sample_size(10);
    for &size in &SIZES {
        let ex = example(size);
        let mut rng = rng();
        group.bench_with_input(BenchmarkId::from_parameter(size), &ex, |b, ex| {
            b.iter(|| generate(&ex.constraint_system, &mut rng).unwrap())
        });
    }
    group.finish();
}

/// Proof generation
pub fn bench_prove(c: &mut Criterion) {
    let mut group = c.benchmark_group("prove");
    group.sample_size(10);
    for &size in &SIZES {
        let ex = example(size);
        let mut rng = rng();
        let keypair = generate(&ex.constraint_system, &mut rng).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &ex, |b, ex| {
            b.iter(|| Prover::prove(&keypair.pk, &ex.primary_input, &ex.auxiliary_input, &mut rng).unwrap())
        });
    }
    group.finish();
}

/// Verification, plain and with a prepared key, plus proof decoding
pub fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify");
    let ex = example(SIZES[0]);
    let mut rng = rng();
    let keypair = generate(&ex.constraint_system, &mut rng).unwrap();
    let proof = Prover::prove(&keypair.pk, &ex.primary_input, &ex.auxiliary_input, &mut rng).unwrap();
    let pvk = prepare_verification_key(&keypair.vk);

    group.bench_function("verify", |b| {
        b.iter(|| Verifier::verify(&keypair.vk, &ex.primary_input, &proof).unwrap())
    });
    group.bench_function("verify_prepared", |b| {
        b.iter(|| Verifier::verify_prepared(&pvk, &ex.primary_input, &proof).unwrap())
    });

    let config = CodecConfig::default();
    let bytes = codec::serialize(&proof, &config).unwrap();
    group.bench_function("decode_proof", |b| {
        b.iter(|| codec::deserialize::<Proof>(&bytes, &config).unwrap())
    });
    group.finish();
}
