//! Trusted setup (generator) for Groth16.
//!
//! `generate` samples toxic waste, evaluates the QAP of a constraint system at
//! the secret point `tau` and encodes the results in G1 and G2. The toxic
//! waste is dropped (and wiped) before `generate` returns. Keys are bound to
//! the exact constraint system they were generated for and must not be
//! reused for any other circuit.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod crs;
pub mod toxic_waste;

pub use crs::*;
pub use toxic_waste::*;

use ark_ec::{CurveGroup, Group};
use groth16_field::{utils::powers, FieldLike, Fr, G1Projective, G2Projective};
use groth16_qap::{QAPError, QAP};
use groth16_r1cs::{ConstraintSystem, R1CSError};
use rand::{CryptoRng, Rng};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info_span};

pub use groth16_field;
pub use groth16_qap;
pub use groth16_r1cs;

/// Errors raised by the generator
#[derive(Error, Debug)]
pub enum SetupError {
    /// The constraint system references variables outside its range
    #[error("Malformed constraint system: {0}")]
    MalformedConstraintSystem(R1CSError),

    /// Parameter failure: no usable domain, degenerate toxic waste
    #[error("Generator failed: {0}")]
    Generator(String),

    /// Other QAP failure
    #[error("QAP error: {0}")]
    QAP(QAPError),
}

impl From<QAPError> for SetupError {
    fn from(err: QAPError) -> Self {
        match err {
            QAPError::R1CS(inner) => SetupError::MalformedConstraintSystem(inner),
            err @ QAPError::DomainTooLarge { .. } => SetupError::Generator(err.to_string()),
            other => SetupError::QAP(other),
        }
    }
}

/// Multiply a fixed base by every scalar and normalize in one batch
fn fixed_base_mul<G>(base: G, scalars: &[Fr]) -> Vec<G::Affine>
where
    G: CurveGroup<ScalarField = Fr>,
{
    let projective: Vec<G> = scalars.par_iter().map(|s| base * s).collect();
    G::normalize_batch(&projective)
}

/// Run the generator with freshly sampled toxic waste
pub fn generate<R: Rng + CryptoRng + ?Sized>(cs: &ConstraintSystem<Fr>, rng: &mut R) -> Result<Keypair, SetupError> {
    cs.validate().map_err(SetupError::MalformedConstraintSystem)?;
    let qap = QAP::from_r1cs(cs)?;
    let toxic_waste = ToxicWaste::sample(&qap.domain, rng);
    generate_with_toxic_waste(cs, &toxic_waste)
}

/// Run the generator with caller-supplied toxic waste
///
/// Deterministic: the same constraint system and toxic waste always yield the
/// same keypair.
pub fn generate_with_toxic_waste(cs: &ConstraintSystem<Fr>, toxic_waste: &ToxicWaste) -> Result<Keypair, SetupError> {
    let _span = info_span!(
        "generate",
        num_constraints = cs.num_constraints(),
        primary_input_size = cs.primary_input_size,
        auxiliary_input_size = cs.auxiliary_input_size,
    )
    .entered();

    cs.validate().map_err(SetupError::MalformedConstraintSystem)?;
    let qap = QAP::from_r1cs(cs)?;
    if toxic_waste.tau_in_domain(&qap.domain) {
        return Err(SetupError::Generator("tau lies in the evaluation domain".to_string()));
    }
    let gamma_inverse = toxic_waste
        .gamma
        .inverse()
        .ok_or_else(|| SetupError::Generator("gamma is not invertible".to_string()))?;
    let delta_inverse = toxic_waste
        .delta
        .inverse()
        .ok_or_else(|| SetupError::Generator("delta is not invertible".to_string()))?;

    let eval = qap.evaluate_at(toxic_waste.tau);
    debug!(domain_size = eval.domain_size, num_variables = eval.a.len(), "evaluated QAP");

    let num_instance = cs.num_instance_variables();
    let (alpha, beta) = (toxic_waste.alpha, toxic_waste.beta);
    let abc: Vec<Fr> = eval
        .a
        .par_iter()
        .zip(&eval.b)
        .zip(&eval.c)
        .map(|((a, b), c)| beta * a + alpha * b + c)
        .collect();
    let gamma_abc: Vec<Fr> = abc[..num_instance].iter().map(|x| *x * gamma_inverse).collect();
    let l: Vec<Fr> = abc[num_instance..].iter().map(|x| *x * delta_inverse).collect();

    let zt_over_delta = eval.zt * delta_inverse;
    let h: Vec<Fr> = powers(toxic_waste.tau, eval.domain_size - 1)
        .into_iter()
        .map(|p| p * zt_over_delta)
        .collect();

    let g1 = G1Projective::generator();
    let g2 = G2Projective::generator();

    let a_query = fixed_base_mul(g1, &eval.a);
    let b_g1_query = fixed_base_mul(g1, &eval.b);
    let b_g2_query = fixed_base_mul(g2, &eval.b);
    let h_query = fixed_base_mul(g1, &h);
    let l_query = fixed_base_mul(g1, &l);
    let gamma_abc_g1 = fixed_base_mul(g1, &gamma_abc);

    let vk = VerificationKey {
        alpha_g1: (g1 * alpha).into_affine(),
        beta_g2: (g2 * beta).into_affine(),
        gamma_g2: (g2 * toxic_waste.gamma).into_affine(),
        delta_g2: (g2 * toxic_waste.delta).into_affine(),
        gamma_abc_g1,
    };
    let pk = ProvingKey {
        vk: vk.clone(),
        beta_g1: (g1 * beta).into_affine(),
        delta_g1: (g1 * toxic_waste.delta).into_affine(),
        a_query,
        b_g1_query,
        b_g2_query,
        h_query,
        l_query,
        constraint_system: cs.clone(),
    };

    debug!(
        h_query = pk.h_query.len(),
        l_query = pk.l_query.len(),
        gamma_abc = vk.gamma_abc_g1.len(),
        "keypair generated"
    );
    Ok(Keypair { pk, vk })
}
