//! One-shot generator, prover and verifier run over a single example

use crate::codec::{self, CodecConfig};
use crate::{GrothError, Proof, Prover, Verifier};
use groth16_field::Fr;
use groth16_r1cs::ConstraintSystem;
use groth16_setup::{generate, ProvingKey, VerificationKey};
use rand::{CryptoRng, Rng};
use tracing::{info, info_span};

/// Options for [`run`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Push the keys and the proof through the codec between phases
    pub test_serialization: bool,
    /// Codec settings used when `test_serialization` is set
    pub codec: CodecConfig,
}

/// Everything a pipeline run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Generated verification key
    pub vk: VerificationKey,
    /// Produced proof
    pub proof: Proof,
    /// Verifier verdict
    pub accepted: bool,
}

fn reload<T: codec::Artifact>(value: &T, config: &CodecConfig) -> Result<T, GrothError> {
    let bytes = codec::serialize(value, config)?;
    Ok(codec::deserialize(&bytes, config)?)
}

/// Run generator, prover and verifier in sequence
///
/// The witness is checked against the constraint system before the generator
/// runs. With `test_serialization`, every artifact is serialized and read back
/// before the next phase uses it.
pub fn run<R: Rng + CryptoRng + ?Sized>(
    cs: &ConstraintSystem<Fr>,
    primary: &[Fr],
    auxiliary: &[Fr],
    options: &RunOptions,
    rng: &mut R,
) -> Result<RunReport, GrothError> {
    let _span = info_span!("run", test_serialization = options.test_serialization).entered();
    cs.check_satisfied(primary, auxiliary)?;

    let keypair = generate(cs, rng)?;
    let (pk, vk): (ProvingKey, VerificationKey) = if options.test_serialization {
        (reload(&keypair.pk, &options.codec)?, reload(&keypair.vk, &options.codec)?)
    } else {
        (keypair.pk, keypair.vk)
    };

    let mut proof = Prover::prove(&pk, primary, auxiliary, rng)?;
    if options.test_serialization {
        proof = reload(&proof, &options.codec)?;
    }

    let accepted = Verifier::verify(&vk, primary, &proof)?;
    info!(accepted, "pipeline finished");
    Ok(RunReport { vk, proof, accepted })
}
