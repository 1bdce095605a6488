//! Groth16 prover

use crate::Proof;
use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM};
use groth16_field::{FieldLike, Fr, G1Projective, G2Projective};
use groth16_qap::{QAPError, QAP};
use groth16_r1cs::R1CSError;
use groth16_setup::ProvingKey;
use rand::{CryptoRng, Rng};
use tracing::{debug, info_span, warn};

/// Errors raised by the prover
#[derive(Debug, thiserror::Error)]
pub enum ProverError {
    /// Primary input has the wrong length
    #[error("Primary input has length {actual}, the proving key expects {expected}")]
    PrimaryInputLength {
        /// Length required by the key
        expected: usize,
        /// Length supplied
        actual: usize,
    },

    /// Auxiliary input has the wrong length
    #[error("Auxiliary input has length {actual}, the proving key expects {expected}")]
    AuxiliaryInputLength {
        /// Length required by the key
        expected: usize,
        /// Length supplied
        actual: usize,
    },

    /// The proving key is internally inconsistent
    #[error("Malformed proving key: {0}")]
    MalformedKey(String),

    /// The witness does not satisfy the constraint system
    #[error("Witness does not satisfy constraint {constraint}")]
    UnsatisfiedWitness {
        /// First violated constraint
        constraint: usize,
    },

    /// QAP failure
    #[error("QAP error: {0}")]
    QAP(#[from] QAPError),

    /// Constraint system failure
    #[error("R1CS error: {0}")]
    R1CS(#[from] R1CSError),
}

fn msm<G: VariableBaseMSM>(bases: &[G::MulBase], scalars: &[G::ScalarField], what: &str) -> Result<G, ProverError> {
    G::msm(bases, scalars).map_err(|_| {
        ProverError::MalformedKey(format!("{what} has {} bases for {} scalars", bases.len(), scalars.len()))
    })
}

/// Groth16 prover
pub struct Prover;

impl Prover {
    /// Produce a proof for `primary` and `auxiliary` under `pk`
    ///
    /// Satisfaction is not checked: an assignment that violates the
    /// constraint system yields a proof that fails verification. Use
    /// [`Prover::prove_checked`] to reject it up front.
    pub fn prove<R: Rng + CryptoRng + ?Sized>(
        pk: &ProvingKey,
        primary: &[Fr],
        auxiliary: &[Fr],
        rng: &mut R,
    ) -> Result<Proof, ProverError> {
        let _span = info_span!(
            "prove",
            primary_input_size = primary.len(),
            auxiliary_input_size = auxiliary.len()
        )
        .entered();

        Self::check_lengths(pk, primary, auxiliary)?;
        if !pk.is_consistent() {
            return Err(ProverError::MalformedKey(
                "query lengths do not match the embedded constraint system".to_string(),
            ));
        }

        let cs = &pk.constraint_system;
        let assignment = cs.create_assignment(primary, auxiliary)?;
        let qap = QAP::from_r1cs(cs)?;
        let quotient = qap.compute_quotient(&assignment)?;
        if !quotient.exact {
            warn!("assignment does not satisfy the constraint system; the proof will not verify");
        }
        let h = quotient.coefficients(pk.h_query.len());

        let r = Fr::random(rng);
        let s = Fr::random(rng);

        let ((a_sum, b1_sum), (b2_sum, (l_sum, h_sum))) = rayon::join(
            || {
                rayon::join(
                    || msm::<G1Projective>(&pk.a_query, &assignment, "a_query"),
                    || msm::<G1Projective>(&pk.b_g1_query, &assignment, "b_g1_query"),
                )
            },
            || {
                rayon::join(
                    || msm::<G2Projective>(&pk.b_g2_query, &assignment, "b_g2_query"),
                    || {
                        rayon::join(
                            || msm::<G1Projective>(&pk.l_query, auxiliary, "l_query"),
                            || msm::<G1Projective>(&pk.h_query, &h, "h_query"),
                        )
                    },
                )
            },
        );

        let a = pk.vk.alpha_g1.into_group() + a_sum? + pk.delta_g1 * r;
        let b1 = pk.beta_g1.into_group() + b1_sum? + pk.delta_g1 * s;
        let b2 = pk.vk.beta_g2.into_group() + b2_sum? + pk.vk.delta_g2 * s;
        let c = l_sum? + h_sum? + a * s + b1 * r - pk.delta_g1 * (r * s);

        debug!(h_degree = quotient.h.coeffs.len(), "proof assembled");
        Ok(Proof {
            a: a.into_affine(),
            b: b2.into_affine(),
            c: c.into_affine(),
        })
    }

    /// Like [`Prover::prove`], but first checks the assignment against the
    /// constraint system embedded in `pk`
    pub fn prove_checked<R: Rng + CryptoRng + ?Sized>(
        pk: &ProvingKey,
        primary: &[Fr],
        auxiliary: &[Fr],
        rng: &mut R,
    ) -> Result<Proof, ProverError> {
        Self::check_lengths(pk, primary, auxiliary)?;
        let assignment = pk.constraint_system.create_assignment(primary, auxiliary)?;
        if let Some(constraint) = pk.constraint_system.first_unsatisfied(&assignment)? {
            return Err(ProverError::UnsatisfiedWitness { constraint });
        }
        Self::prove(pk, primary, auxiliary, rng)
    }

    fn check_lengths(pk: &ProvingKey, primary: &[Fr], auxiliary: &[Fr]) -> Result<(), ProverError> {
        if primary.len() != pk.primary_input_size() {
            return Err(ProverError::PrimaryInputLength {
                expected: pk.primary_input_size(),
                actual: primary.len(),
            });
        }
        if auxiliary.len() != pk.auxiliary_input_size() {
            return Err(ProverError::AuxiliaryInputLength {
                expected: pk.auxiliary_input_size(),
                actual: auxiliary.len(),
            });
        }
        Ok(())
    }
}
