//! Random satisfiable constraint systems for tests and benchmarks

use crate::{ConstraintSystem, LinearCombination, Variable};
use groth16_field::FieldLike;
use rand::Rng;

/// A constraint system together with an assignment that satisfies it
#[derive(Debug, Clone)]
pub struct R1CSExample<F: FieldLike> {
    /// The constraint system
    pub constraint_system: ConstraintSystem<F>,
    /// Satisfying public input
    pub primary_input: Vec<F>,
    /// Satisfying private input
    pub auxiliary_input: Vec<F>,
}

/// Generate a random system of `num_constraints` constraints over
/// `primary_input_size` random public inputs.
///
/// Two free auxiliary seeds are allocated first; constraint `k` is
/// `(α·u + 1) * (β·v) = w_k` with a fresh auxiliary output `w_k`, where `u` is
/// the `k`-th primary input while any remain and a random earlier variable
/// afterwards. Every primary input is referenced as long as
/// `num_constraints >= primary_input_size`.
pub fn generate_r1cs_example<F: FieldLike, R: Rng + ?Sized>(
    num_constraints: usize,
    primary_input_size: usize,
    rng: &mut R,
) -> R1CSExample<F> {
    let mut cs = ConstraintSystem::<F>::new(primary_input_size);
    let mut assignment: Vec<F> = Vec::with_capacity(1 + primary_input_size + 2 + num_constraints);
    assignment.push(<F as FieldLike>::one());
    assignment.extend((0..primary_input_size).map(|_| F::random(rng)));

    for _ in 0..2 {
        cs.alloc_auxiliary();
        assignment.push(F::random(rng));
    }

    for k in 0..num_constraints {
        let u = if k < primary_input_size {
            Variable::new(1 + k)
        } else {
            Variable::new(rng.gen_range(1..assignment.len()))
        };
        let v = Variable::new(rng.gen_range(1..assignment.len()));
        let alpha = F::random_nonzero(rng);
        let beta = F::random_nonzero(rng);

        let mut a = LinearCombination::new();
        a.add_term(u, alpha);
        a.add_term(Variable::ONE, <F as FieldLike>::one());
        let mut b = LinearCombination::new();
        b.add_term(v, beta);

        let output = (alpha * assignment[u.index()] + <F as FieldLike>::one()) * (beta * assignment[v.index()]);
        let w = cs.alloc_auxiliary();
        debug_assert_eq!(w.index(), assignment.len());
        assignment.push(output);
        cs.enforce_multiplication(a, b, w.into());
    }

    let auxiliary_input = assignment.split_off(1 + primary_input_size);
    let primary_input = assignment.split_off(1);

    R1CSExample {
        constraint_system: cs,
        primary_input,
        auxiliary_input,
    }
}
