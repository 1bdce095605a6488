//! Proving and verification keys

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use groth16_field::{Fr, G1Affine, G2Affine};
use groth16_qap::QAP;
use groth16_r1cs::ConstraintSystem;

/// Verification key
///
/// Field order matches `ark-groth16`'s `VerifyingKey`, so the canonical
/// encoding of this type is interchangeable with it.
#[derive(Debug, Clone, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct VerificationKey {
    /// `alpha * G1`
    pub alpha_g1: G1Affine,
    /// `beta * G2`
    pub beta_g2: G2Affine,
    /// `gamma * G2`
    pub gamma_g2: G2Affine,
    /// `delta * G2`
    pub delta_g2: G2Affine,
    /// One element per instance variable (the constant one, then each
    /// primary input)
    pub gamma_abc_g1: Vec<G1Affine>,
}

impl VerificationKey {
    /// Number of primary inputs this key verifies against
    pub fn primary_input_size(&self) -> usize {
        self.gamma_abc_g1.len().saturating_sub(1)
    }
}

/// Proving key
///
/// The group elements come first, in `ark-groth16`'s `ProvingKey` order; the
/// constraint system the key was generated for is carried at the end, since
/// the prover needs its rows to build the quotient polynomial.
#[derive(Debug, Clone, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct ProvingKey {
    /// Embedded verification key
    pub vk: VerificationKey,
    /// `beta * G1`
    pub beta_g1: G1Affine,
    /// `delta * G1`
    pub delta_g1: G1Affine,
    /// `A_i(tau) * G1` per variable
    pub a_query: Vec<G1Affine>,
    /// `B_i(tau) * G1` per variable
    pub b_g1_query: Vec<G1Affine>,
    /// `B_i(tau) * G2` per variable
    pub b_g2_query: Vec<G2Affine>,
    /// `tau^k * Z(tau) / delta * G1` for `k < domain_size - 1`
    pub h_query: Vec<G1Affine>,
    /// `(beta * A_j + alpha * B_j + C_j)(tau) / delta * G1` per auxiliary variable
    pub l_query: Vec<G1Affine>,
    /// The constraint system the key is bound to
    pub constraint_system: ConstraintSystem<Fr>,
}

impl ProvingKey {
    /// Number of primary inputs expected by `prove`
    pub fn primary_input_size(&self) -> usize {
        self.constraint_system.primary_input_size
    }

    /// Number of auxiliary inputs expected by `prove`
    pub fn auxiliary_input_size(&self) -> usize {
        self.constraint_system.auxiliary_input_size
    }

    /// Length of the full assignment
    pub fn num_variables(&self) -> usize {
        self.constraint_system.num_variables()
    }

    /// Check that every query has the length its constraint system implies
    ///
    /// Keys from `generate` always pass. A decoded key can fail this when it
    /// was assembled by hand or by an incompatible generator.
    pub fn is_consistent(&self) -> bool {
        let Ok(qap) = QAP::from_r1cs(&self.constraint_system) else {
            return false;
        };
        let n = self.num_variables();
        self.a_query.len() == n
            && self.b_g1_query.len() == n
            && self.b_g2_query.len() == n
            && self.l_query.len() == self.auxiliary_input_size()
            && self.h_query.len() == qap.domain_size() - 1
            && self.vk.gamma_abc_g1.len() == self.constraint_system.num_instance_variables()
    }
}

/// Output of the generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypair {
    /// Key for the prover
    pub pk: ProvingKey,
    /// Key for the verifier
    pub vk: VerificationKey,
}
