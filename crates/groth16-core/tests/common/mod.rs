#![allow(dead_code)]

use groth16_core::groth16_field::Fr;
use groth16_core::groth16_r1cs::{utils, ConstraintSystem, LinearCombination, Variable};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

pub fn fr(value: u64) -> Fr {
    Fr::from(value)
}

/// `x * y = z` with `z` public, `x` and `y` private
pub fn multiplication_circuit() -> ConstraintSystem<Fr> {
    scaled_multiplication_circuit(1)
}

/// `(k * x) * y = z`; same shape for every `k`
pub fn scaled_multiplication_circuit(k: u64) -> ConstraintSystem<Fr> {
    let mut cs = ConstraintSystem::<Fr>::new(1);
    let z = cs.primary(0).unwrap();
    let x = cs.alloc_auxiliary();
    let y = cs.alloc_auxiliary();
    cs.enforce_multiplication(LinearCombination::from_variable(x) * fr(k), y.into(), z.into());
    cs
}

/// `x^3 + x + 5 = out` with `out` public
///
/// Returns the system and the auxiliary input for `x`.
pub fn cubic_circuit(x: u64) -> (ConstraintSystem<Fr>, Vec<Fr>, Vec<Fr>) {
    let mut cs = ConstraintSystem::<Fr>::new(1);
    let out = cs.primary(0).unwrap();
    let xv = cs.alloc_auxiliary();
    let x2 = cs.alloc_auxiliary();
    let x3 = cs.alloc_auxiliary();
    cs.enforce_multiplication(xv.into(), xv.into(), x2.into());
    cs.enforce_multiplication(x2.into(), xv.into(), x3.into());
    let mut sum = LinearCombination::from_variable(x3) + LinearCombination::from_variable(xv);
    sum.add_term(Variable::ONE, fr(5));
    cs.enforce_equal(sum, out.into());

    let primary = vec![fr(x * x * x + x + 5)];
    let auxiliary = vec![fr(x), fr(x * x), fr(x * x * x)];
    (cs, primary, auxiliary)
}

/// Bit decomposition of a public value into `num_bits` private booleans
pub fn range_circuit(value: u64, num_bits: usize) -> (ConstraintSystem<Fr>, Vec<Fr>, Vec<Fr>) {
    let mut cs = ConstraintSystem::<Fr>::new(1);
    let v = cs.primary(0).unwrap();
    utils::bit_decomposition(&mut cs, v, num_bits);
    (cs, vec![fr(value)], utils::bit_values(value, num_bits))
}
