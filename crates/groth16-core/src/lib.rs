//! Core Groth16 prover and verifier implementation.
//!
//! A proof is three group elements `(A, B, C)`. The prover combines the
//! proving key with the full assignment and the quotient polynomial of the
//! QAP, blinding with fresh randomness on every call. The verifier checks a
//! single pairing-product equation whose cost depends only on the number of
//! primary inputs.
//!
//! Keys and proofs persist through [`codec`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use groth16_field::{G1Affine, G2Affine};

pub mod codec;
pub mod pipeline;
pub mod prover;
pub mod verifier;

pub use codec::{Artifact, ArtifactKind, CodecConfig, CodecError, PointCompression, WireFormat};
pub use prover::{Prover, ProverError};
pub use verifier::{prepare_verification_key, BatchVerifier, PreparedVerificationKey, Verifier, VerifierError};

pub use groth16_field;
pub use groth16_qap;
pub use groth16_r1cs;
pub use groth16_setup;
pub use groth16_setup::{generate, generate_with_toxic_waste, Keypair, ProvingKey, SetupError, VerificationKey};

/// A Groth16 proof
///
/// Field order matches `ark-groth16`'s `Proof`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Proof {
    /// π_A in G1
    pub a: G1Affine,
    /// π_B in G2
    pub b: G2Affine,
    /// π_C in G1
    pub c: G1Affine,
}

/// Any failure of the pipeline
#[derive(Debug, thiserror::Error)]
pub enum GrothError {
    /// Setup error
    #[error("Setup error: {0}")]
    Setup(#[from] SetupError),

    /// Prover error
    #[error("Prover error: {0}")]
    Prover(#[from] ProverError),

    /// Verifier error
    #[error("Verifier error: {0}")]
    Verifier(#[from] VerifierError),

    /// Codec error
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Constraint system error
    #[error("R1CS error: {0}")]
    R1CS(#[from] groth16_r1cs::R1CSError),
}
