mod common;

use common::*;
use groth16_core::groth16_field::Fr;
use groth16_core::groth16_r1cs::r1cs_example::generate_r1cs_example;
use groth16_core::groth16_r1cs::{ConstraintSystem, LinearCombination, Variable};
use groth16_core::groth16_setup::ToxicWaste;
use groth16_core::{codec, generate, generate_with_toxic_waste, CodecConfig, Prover, Verifier};

#[test]
fn test_corrupted_auxiliary_values_are_rejected() {
    let mut rng = seeded_rng(200);
    let example = generate_r1cs_example::<Fr, _>(8, 2, &mut rng);
    let cs = &example.constraint_system;
    let keypair = generate(cs, &mut rng).unwrap();

    let mut checked = 0;
    for j in 0..example.auxiliary_input.len() {
        let var = Variable::new(1 + cs.primary_input_size + j);
        if !cs.constraints.iter().any(|c| c.variables().contains(&var)) {
            continue;
        }
        let mut auxiliary = example.auxiliary_input.clone();
        auxiliary[j] += fr(1);
        if cs.is_satisfied(&example.primary_input, &auxiliary).unwrap() {
            continue;
        }

        let proof = Prover::prove(&keypair.pk, &example.primary_input, &auxiliary, &mut rng).unwrap();
        assert!(
            !Verifier::verify(&keypair.vk, &example.primary_input, &proof).unwrap(),
            "corrupting auxiliary input {j} was not detected"
        );
        checked += 1;
    }
    assert!(checked >= 8);
}

#[test]
fn test_wrong_primary_input_is_rejected() {
    let mut rng = seeded_rng(201);
    let keypair = generate(&multiplication_circuit(), &mut rng).unwrap();
    let proof = Prover::prove(&keypair.pk, &[fr(12)], &[fr(3), fr(4)], &mut rng).unwrap();

    for wrong in [0u64, 1, 11, 13, 24] {
        assert!(!Verifier::verify(&keypair.vk, &[fr(wrong)], &proof).unwrap());
    }
}

#[test]
fn test_unsatisfied_witness_proof_is_rejected() {
    let mut rng = seeded_rng(202);
    let keypair = generate(&multiplication_circuit(), &mut rng).unwrap();
    // 3 * 4 != 13, but proving is not refused
    let proof = Prover::prove(&keypair.pk, &[fr(13)], &[fr(3), fr(4)], &mut rng).unwrap();
    assert!(!Verifier::verify(&keypair.vk, &[fr(13)], &proof).unwrap());
}

// x * y = k * z: scaling the public output changes its instance polynomial
fn scaled_output_circuit(k: u64) -> ConstraintSystem<Fr> {
    let mut cs = ConstraintSystem::<Fr>::new(1);
    let z = cs.primary(0).unwrap();
    let x = cs.alloc_auxiliary();
    let y = cs.alloc_auxiliary();
    cs.enforce_multiplication(x.into(), y.into(), LinearCombination::from_variable(z) * fr(k));
    cs
}

#[test]
fn test_keys_are_bound_to_their_circuit() {
    // Same trapdoor for both keys, so only the circuit differs
    let toxic_waste = || ToxicWaste::from_parts(fr(1_234_567), fr(11), fr(13), fr(17), fr(19)).unwrap();
    let plain = generate_with_toxic_waste(&scaled_output_circuit(1), &toxic_waste()).unwrap();
    let doubled = generate_with_toxic_waste(&scaled_output_circuit(2), &toxic_waste()).unwrap();
    assert_eq!(plain.vk.alpha_g1, doubled.vk.alpha_g1);
    assert_eq!(plain.vk.delta_g2, doubled.vk.delta_g2);
    assert_ne!(plain.vk.gamma_abc_g1, doubled.vk.gamma_abc_g1);

    let mut rng = seeded_rng(203);
    let proof = Prover::prove(&plain.pk, &[fr(12)], &[fr(3), fr(4)], &mut rng).unwrap();
    assert!(Verifier::verify(&plain.vk, &[fr(12)], &proof).unwrap());
    assert!(!Verifier::verify(&doubled.vk, &[fr(12)], &proof).unwrap());
    assert!(!Verifier::verify(&doubled.vk, &[fr(6)], &proof).unwrap());
}

#[test]
fn test_keys_from_separate_setups_do_not_mix() {
    let mut rng = seeded_rng(204);
    let cs = multiplication_circuit();
    let first = generate(&cs, &mut rng).unwrap();
    let second = generate(&cs, &mut rng).unwrap();

    let proof = Prover::prove(&first.pk, &[fr(12)], &[fr(3), fr(4)], &mut rng).unwrap();
    assert!(!Verifier::verify(&second.vk, &[fr(12)], &proof).unwrap());
}

#[test]
fn test_tampered_proof_elements_are_rejected() {
    let mut rng = seeded_rng(205);
    let keypair = generate(&multiplication_circuit(), &mut rng).unwrap();
    let proof = Prover::prove(&keypair.pk, &[fr(12)], &[fr(3), fr(4)], &mut rng).unwrap();

    let mut swapped = proof;
    swapped.a = proof.c;
    swapped.c = proof.a;
    assert!(!Verifier::verify(&keypair.vk, &[fr(12)], &swapped).unwrap());

    let mut negated = proof;
    negated.c = -proof.c;
    assert!(!Verifier::verify(&keypair.vk, &[fr(12)], &negated).unwrap());
}

#[test]
fn test_blinding_makes_proofs_distinct() {
    let mut rng = seeded_rng(206);
    let keypair = generate(&multiplication_circuit(), &mut rng).unwrap();
    let first = Prover::prove(&keypair.pk, &[fr(12)], &[fr(3), fr(4)], &mut rng).unwrap();
    let second = Prover::prove(&keypair.pk, &[fr(12)], &[fr(3), fr(4)], &mut rng).unwrap();

    assert!(Verifier::verify(&keypair.vk, &[fr(12)], &first).unwrap());
    assert!(Verifier::verify(&keypair.vk, &[fr(12)], &second).unwrap());
    assert_ne!(first, second);

    let config = CodecConfig::default();
    assert_ne!(
        codec::serialize(&first, &config).unwrap(),
        codec::serialize(&second, &config).unwrap()
    );
}

#[test]
fn test_different_witnesses_same_statement() {
    let mut rng = seeded_rng(207);
    let keypair = generate(&multiplication_circuit(), &mut rng).unwrap();
    // Both factorizations of 12 yield accepting proofs for the same statement
    let first = Prover::prove(&keypair.pk, &[fr(12)], &[fr(3), fr(4)], &mut rng).unwrap();
    let second = Prover::prove(&keypair.pk, &[fr(12)], &[fr(2), fr(6)], &mut rng).unwrap();
    assert!(Verifier::verify(&keypair.vk, &[fr(12)], &first).unwrap());
    assert!(Verifier::verify(&keypair.vk, &[fr(12)], &second).unwrap());
}
