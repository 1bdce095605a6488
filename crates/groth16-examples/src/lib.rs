//! Example circuits driven through the full Groth16 pipeline.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use anyhow::{ensure, Context, Result};
use groth16_core::{
    codec, generate, prepare_verification_key, BatchVerifier, CodecConfig, Proof, Prover, VerificationKey, Verifier,
};
use groth16_field::{FieldLike, Fr};
use groth16_qap::QAP;
use groth16_r1cs::r1cs_example::generate_r1cs_example;
use groth16_r1cs::{utils, ConstraintSystem, LinearCombination, Variable};
use rand::thread_rng;

/// `x * y = z` with `z` public
pub fn multiplication_circuit() -> ConstraintSystem<Fr> {
    let mut cs = ConstraintSystem::<Fr>::new(1);
    let z = Variable::new(1);
    let x = cs.alloc_auxiliary();
    let y = cs.alloc_auxiliary();
    cs.enforce_multiplication(x.into(), y.into(), z.into());
    cs
}

/// `x^3 + x + 5 = out` with `out` public and `x` private
pub fn cubic_circuit() -> ConstraintSystem<Fr> {
    let mut cs = ConstraintSystem::<Fr>::new(1);
    let out = Variable::new(1);
    let x = cs.alloc_auxiliary();
    let x_squared = cs.alloc_auxiliary();
    let x_cubed = cs.alloc_auxiliary();

    cs.enforce_multiplication(x.into(), x.into(), x_squared.into());
    cs.enforce_multiplication(x_squared.into(), x.into(), x_cubed.into());

    let mut lhs = LinearCombination::from_variable(x_cubed) + LinearCombination::from_variable(x);
    lhs.add_term(Variable::ONE, Fr::from(5u64));
    cs.enforce_equal(lhs, out.into());
    cs
}

/// Public `value` fits in `num_bits` bits
pub fn range_circuit(num_bits: usize) -> ConstraintSystem<Fr> {
    let mut cs = ConstraintSystem::<Fr>::new(1);
    utils::bit_decomposition(&mut cs, Variable::new(1), num_bits);
    cs
}

/// Proves `3 * 4 = 12`, then shows the same proof fails for `13`
pub fn multiplication_example() -> Result<()> {
    println!("=== Multiplication Circuit Example ===");
    let mut rng = thread_rng();
    let cs = multiplication_circuit();
    let primary = [Fr::from(12u64)];
    let auxiliary = [Fr::from(3u64), Fr::from(4u64)];

    let qap = QAP::from_r1cs(&cs)?;
    println!(
        "Circuit has {} variables and {} constraints (QAP domain size {})",
        cs.num_variables(),
        cs.num_constraints(),
        qap.domain_size()
    );

    let keypair = generate(&cs, &mut rng)?;
    let proof = Prover::prove_checked(&keypair.pk, &primary, &auxiliary, &mut rng)?;

    ensure!(Verifier::verify(&keypair.vk, &primary, &proof)?, "valid proof rejected");
    println!("✓ Proof for z = 12 accepted");
    ensure!(
        !Verifier::verify(&keypair.vk, &[Fr::from(13u64)], &proof)?,
        "proof accepted for the wrong statement"
    );
    println!("✓ Same proof rejected for z = 13");
    Ok(())
}

/// Proves knowledge of the cube root input `x = 3` for `out = 35`, passing
/// every artifact through the codec first
pub fn cubic_example() -> Result<()> {
    println!("\n=== Cubic Circuit Example ===");
    let mut rng = thread_rng();
    let cs = cubic_circuit();
    let x = 3u64;
    let primary = [Fr::from(x * x * x + x + 5)];
    let auxiliary = [Fr::from(x), Fr::from(x * x), Fr::from(x * x * x)];

    let config = CodecConfig::default();
    let keypair = generate(&cs, &mut rng)?;
    let vk_bytes = codec::serialize(&keypair.vk, &config)?;
    let proof = Prover::prove_checked(&keypair.pk, &primary, &auxiliary, &mut rng)?;
    let proof_bytes = codec::serialize(&proof, &config)?;
    println!(
        "Verification key is {} bytes, proof is {} bytes",
        vk_bytes.len(),
        proof_bytes.len()
    );

    let vk: VerificationKey = codec::deserialize(&vk_bytes, &config).context("decoding verification key")?;
    let proof: Proof = codec::deserialize(&proof_bytes, &config).context("decoding proof")?;
    ensure!(Verifier::verify(&vk, &primary, &proof)?, "valid proof rejected");
    println!("✓ Decoded proof accepted for out = 35");
    Ok(())
}

/// Range check on a public value, verified with a prepared key
pub fn range_check_example(value: u64, num_bits: usize) -> Result<()> {
    println!("\n=== Range Check Example ({num_bits} bits) ===");
    let mut rng = thread_rng();
    let cs = range_circuit(num_bits);
    let primary = [Fr::from(value)];
    let auxiliary = utils::bit_values::<Fr>(value, num_bits);

    if !cs.is_satisfied(&primary, &auxiliary)? {
        println!("✗ {value} does not fit in {num_bits} bits; nothing to prove");
        return Ok(());
    }

    let keypair = generate(&cs, &mut rng)?;
    let pvk = prepare_verification_key(&keypair.vk);
    let proof = Prover::prove_checked(&keypair.pk, &primary, &auxiliary, &mut rng)?;
    ensure!(Verifier::verify_prepared(&pvk, &primary, &proof)?, "valid proof rejected");
    println!("✓ {value} < 2^{num_bits} proven");
    Ok(())
}

/// Batch-verifies proofs for random satisfiable systems
pub fn batch_example(num_proofs: usize) -> Result<()> {
    println!("\n=== Batch Verification Example ===");
    let mut rng = thread_rng();
    let example = generate_r1cs_example::<Fr, _>(32, 4, &mut rng);
    let keypair = generate(&example.constraint_system, &mut rng)?;

    let mut batch = Vec::with_capacity(num_proofs);
    for _ in 0..num_proofs {
        let proof = Prover::prove(&keypair.pk, &example.primary_input, &example.auxiliary_input, &mut rng)?;
        batch.push((proof, example.primary_input.clone()));
    }
    ensure!(
        BatchVerifier::verify_batch(&keypair.vk, &batch, &mut rng)?,
        "valid batch rejected"
    );
    println!("✓ {num_proofs} proofs accepted in one batch");

    if let Some((_, primary)) = batch.first_mut() {
        primary[0] += <Fr as FieldLike>::one();
    }
    ensure!(
        !BatchVerifier::verify_batch(&keypair.vk, &batch, &mut rng)?,
        "batch with a wrong statement accepted"
    );
    println!("✓ Batch with one altered primary input rejected");
    Ok(())
}

/// Run all examples
pub fn run_all_examples() -> Result<()> {
    println!("Running Groth16 example circuits...\n");

    multiplication_example()?;
    cubic_example()?;
    range_check_example(200, 8)?;
    batch_example(4)?;

    println!("\nAll examples completed successfully!");
    Ok(())
}
