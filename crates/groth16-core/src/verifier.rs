//! Groth16 verifier
//!
//! A proof `(A, B, C)` is accepted for primary input `x` iff
//! `e(A, B) = e(alpha, beta) * e(IC, gamma) * e(C, delta)` where
//! `IC = gamma_abc_0 + sum x_i * gamma_abc_{i+1}`.

use crate::Proof;
use ark_ec::{
    pairing::{Pairing, PairingOutput},
    AffineRepr, CurveGroup, VariableBaseMSM,
};
use ark_std::Zero;
use groth16_field::{Bls12_381, FieldLike, Fr, G1Affine, G1Projective};
use groth16_setup::VerificationKey;
use rand::{CryptoRng, Rng};
use tracing::{debug, info_span};

type G2Prepared = <Bls12_381 as Pairing>::G2Prepared;

/// Errors raised by the verifier
///
/// An invalid proof is not an error; it is reported as `Ok(false)`.
#[derive(Debug, thiserror::Error)]
pub enum VerifierError {
    /// Primary input has the wrong length
    #[error("Primary input has length {actual}, the verification key expects {expected}")]
    PrimaryInputLength {
        /// Length required by the key
        expected: usize,
        /// Length supplied
        actual: usize,
    },

    /// The verification key cannot be used
    #[error("Malformed verification key: {0}")]
    MalformedKey(String),
}

/// Verification key with the input-independent pairing work done up front
#[derive(Debug, Clone)]
pub struct PreparedVerificationKey {
    /// The original key
    pub vk: VerificationKey,
    /// `e(alpha, beta)`
    pub alpha_g1_beta_g2: PairingOutput<Bls12_381>,
    /// `-gamma`, prepared for the Miller loop
    pub gamma_g2_neg_pc: G2Prepared,
    /// `-delta`, prepared for the Miller loop
    pub delta_g2_neg_pc: G2Prepared,
}

/// Precompute `e(alpha, beta)` and the prepared `-gamma`, `-delta`
pub fn prepare_verification_key(vk: &VerificationKey) -> PreparedVerificationKey {
    PreparedVerificationKey {
        vk: vk.clone(),
        alpha_g1_beta_g2: Bls12_381::pairing(vk.alpha_g1, vk.beta_g2),
        gamma_g2_neg_pc: (-vk.gamma_g2).into(),
        delta_g2_neg_pc: (-vk.delta_g2).into(),
    }
}

fn check_input_shape(vk: &VerificationKey, primary: &[Fr]) -> Result<(), VerifierError> {
    if vk.gamma_abc_g1.is_empty() {
        return Err(VerifierError::MalformedKey("gamma_abc_g1 is empty".to_string()));
    }
    if primary.len() + 1 != vk.gamma_abc_g1.len() {
        return Err(VerifierError::PrimaryInputLength {
            expected: vk.gamma_abc_g1.len() - 1,
            actual: primary.len(),
        });
    }
    Ok(())
}

/// `gamma_abc_0 + sum x_i * gamma_abc_{i+1}`; the shape must already be checked
fn input_commitment(gamma_abc_g1: &[G1Affine], primary: &[Fr]) -> Result<G1Projective, VerifierError> {
    let tail = G1Projective::msm(&gamma_abc_g1[1..], primary)
        .map_err(|_| VerifierError::MalformedKey("gamma_abc_g1 does not match the primary input".to_string()))?;
    Ok(gamma_abc_g1[0].into_group() + tail)
}

/// Groth16 verifier
pub struct Verifier;

impl Verifier {
    /// Check `proof` for `primary` under `vk`
    pub fn verify(vk: &VerificationKey, primary: &[Fr], proof: &Proof) -> Result<bool, VerifierError> {
        let _span = info_span!("verify", primary_input_size = primary.len()).entered();
        check_input_shape(vk, primary)?;

        let ic = input_commitment(&vk.gamma_abc_g1, primary)?;

        // e(A, B) * e(-alpha, beta) * e(-IC, gamma) * e(-C, delta) = 1
        let g1_inputs = [proof.a, -vk.alpha_g1, (-ic).into_affine(), -proof.c];
        let g2_inputs = [proof.b, vk.beta_g2, vk.gamma_g2, vk.delta_g2];
        let accepted = Bls12_381::multi_pairing(g1_inputs, g2_inputs).is_zero();

        debug!(accepted, "pairing check done");
        Ok(accepted)
    }

    /// Check `proof` for `primary` under a prepared key
    pub fn verify_prepared(
        pvk: &PreparedVerificationKey,
        primary: &[Fr],
        proof: &Proof,
    ) -> Result<bool, VerifierError> {
        let _span = info_span!("verify_prepared", primary_input_size = primary.len()).entered();
        check_input_shape(&pvk.vk, primary)?;

        let ic = input_commitment(&pvk.vk.gamma_abc_g1, primary)?;
        let g1_inputs = [proof.a, ic.into_affine(), proof.c];
        let g2_inputs: [G2Prepared; 3] = [
            proof.b.into(),
            pvk.gamma_g2_neg_pc.clone(),
            pvk.delta_g2_neg_pc.clone(),
        ];
        let miller = Bls12_381::multi_miller_loop(g1_inputs, g2_inputs);
        let accepted = Bls12_381::final_exponentiation(miller).map_or(false, |out| out == pvk.alpha_g1_beta_g2);

        debug!(accepted, "pairing check done");
        Ok(accepted)
    }
}

/// Batch verification for multiple proofs
pub struct BatchVerifier;

impl BatchVerifier {
    /// Verify many proofs under one key with a single multi-pairing
    ///
    /// Each proof's equation is raised to an independent random power before
    /// the equations are multiplied together, so one invalid proof makes the
    /// batch fail except with negligible probability. The result does not say
    /// which proof was invalid. The coefficients must be unpredictable to
    /// the prover, hence the `CryptoRng` bound.
    pub fn verify_batch<R: Rng + CryptoRng + ?Sized>(
        vk: &VerificationKey,
        proofs_and_inputs: &[(Proof, Vec<Fr>)],
        rng: &mut R,
    ) -> Result<bool, VerifierError> {
        let _span = info_span!("verify_batch", batch_size = proofs_and_inputs.len()).entered();
        if proofs_and_inputs.is_empty() {
            return Ok(true);
        }

        let mut g1_inputs = Vec::with_capacity(proofs_and_inputs.len() + 3);
        let mut g2_inputs = Vec::with_capacity(proofs_and_inputs.len() + 3);
        let mut coeff_sum = <Fr as FieldLike>::zero();
        let mut ic_acc = G1Projective::zero();
        let mut c_acc = G1Projective::zero();

        for (proof, primary) in proofs_and_inputs {
            check_input_shape(vk, primary)?;
            let coeff = Fr::random_nonzero(rng);

            g1_inputs.push((proof.a * coeff).into_affine());
            g2_inputs.push(proof.b);
            ic_acc += input_commitment(&vk.gamma_abc_g1, primary)? * coeff;
            c_acc += proof.c * coeff;
            coeff_sum += coeff;
        }

        g1_inputs.push((-(vk.alpha_g1 * coeff_sum)).into_affine());
        g2_inputs.push(vk.beta_g2);
        g1_inputs.push((-ic_acc).into_affine());
        g2_inputs.push(vk.gamma_g2);
        g1_inputs.push((-c_acc).into_affine());
        g2_inputs.push(vk.delta_g2);

        let accepted = Bls12_381::multi_pairing(g1_inputs, g2_inputs).is_zero();
        debug!(accepted, "batch pairing check done");
        Ok(accepted)
    }
}
