//! Toxic waste: the secret trapdoor of a trusted setup

use crate::SetupError;
use ark_poly::{EvaluationDomain, Radix2EvaluationDomain};
use groth16_field::{FieldLike, Fr};
use groth16_qap::utils::random_evaluation_point;
use rand::{CryptoRng, Rng};
use std::fmt;
use std::sync::atomic::{compiler_fence, Ordering};

/// Setup trapdoor `(tau, alpha, beta, gamma, delta)`
///
/// Anyone holding these values can forge proofs for the keys generated from
/// them. The type is deliberately not `Clone` and not serializable, its
/// `Debug` output is redacted, and the values are overwritten on drop.
pub struct ToxicWaste {
    pub(crate) tau: Fr,
    pub(crate) alpha: Fr,
    pub(crate) beta: Fr,
    pub(crate) gamma: Fr,
    pub(crate) delta: Fr,
}

impl ToxicWaste {
    /// Sample fresh toxic waste for the given evaluation domain
    ///
    /// `tau` is resampled until it lies outside the domain; the other four
    /// values are non-zero.
    pub fn sample<R: Rng + CryptoRng + ?Sized>(domain: &Radix2EvaluationDomain<Fr>, rng: &mut R) -> Self {
        Self {
            tau: random_evaluation_point(domain, rng),
            alpha: Fr::random_nonzero(rng),
            beta: Fr::random_nonzero(rng),
            gamma: Fr::random_nonzero(rng),
            delta: Fr::random_nonzero(rng),
        }
    }

    /// Build toxic waste from explicit values
    ///
    /// Only for reproducible test vectors. `gamma` and `delta` must be
    /// invertible; whether `tau` avoids the domain is checked at generation.
    pub fn from_parts(tau: Fr, alpha: Fr, beta: Fr, gamma: Fr, delta: Fr) -> Result<Self, SetupError> {
        if gamma.is_zero() || delta.is_zero() {
            return Err(SetupError::Generator("gamma and delta must be non-zero".to_string()));
        }
        Ok(Self {
            tau,
            alpha,
            beta,
            gamma,
            delta,
        })
    }

    /// Whether `tau` is a root of the domain's vanishing polynomial
    pub fn tau_in_domain(&self, domain: &Radix2EvaluationDomain<Fr>) -> bool {
        domain.evaluate_vanishing_polynomial(self.tau).is_zero()
    }

    fn wipe(&mut self) {
        // Best effort: the values may still have been copied by the optimizer.
        for value in [
            &mut self.tau,
            &mut self.alpha,
            &mut self.beta,
            &mut self.gamma,
            &mut self.delta,
        ] {
            *value = <Fr as FieldLike>::zero();
        }
        compiler_fence(Ordering::SeqCst);
    }
}

impl Drop for ToxicWaste {
    fn drop(&mut self) {
        self.wipe();
    }
}

impl fmt::Debug for ToxicWaste {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ToxicWaste { <redacted> }")
    }
}
