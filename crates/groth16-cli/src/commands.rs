//! Subcommand arguments and their implementations
//!
//! Every command reads its inputs from files and writes its outputs to files,
//! so each phase can be run on its own.

use crate::common::{CliConfig, FileOps};
use crate::{CliError, Result};
use clap::Args;
use groth16_core::groth16_r1cs::interchange::PrimaryInputFile;
use groth16_core::pipeline::{self, RunOptions};
use groth16_core::{generate, GrothError, Proof, Prover, ProvingKey, VerificationKey, Verifier};
use rand::{CryptoRng, Rng};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Arguments of `generate`
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Circuit file (JSON)
    #[arg(short, long)]
    pub circuit: PathBuf,

    /// Where to write the proving key
    #[arg(short, long, default_value = "pk.bin")]
    pub proving_key: PathBuf,

    /// Where to write the verification key
    #[arg(short = 'k', long, default_value = "vk.bin")]
    pub verification_key: PathBuf,

    /// Overwrite existing key files
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments of `prove`
#[derive(Debug, Args)]
pub struct ProveArgs {
    /// Circuit file (JSON)
    #[arg(short, long)]
    pub circuit: PathBuf,

    /// Witness file (JSON)
    #[arg(short, long)]
    pub witness: PathBuf,

    /// Proving key produced by `generate`
    #[arg(short, long, default_value = "pk.bin")]
    pub proving_key: PathBuf,

    /// Where to write the proof
    #[arg(short = 'o', long, default_value = "proof.bin")]
    pub proof: PathBuf,

    /// Also write the primary input for the verifier
    #[arg(long)]
    pub primary_input_out: Option<PathBuf>,

    /// Overwrite existing output files
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments of `verify`
#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Verification key produced by `generate`
    #[arg(short = 'k', long, default_value = "vk.bin")]
    pub verification_key: PathBuf,

    /// Primary input file (JSON)
    #[arg(short = 'i', long)]
    pub primary_input: PathBuf,

    /// Proof produced by `prove`
    #[arg(short, long, default_value = "proof.bin")]
    pub proof: PathBuf,
}

/// Arguments of `run`
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Circuit file (JSON)
    #[arg(short, long)]
    pub circuit: PathBuf,

    /// Witness file (JSON)
    #[arg(short, long)]
    pub witness: PathBuf,

    /// Serialize and reload the keys and the proof between phases
    #[arg(long)]
    pub test_serialization: bool,
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::InvalidArguments(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Ok(())
}

/// Runs the generator on a circuit file and writes both keys
pub fn generate_keys<R: Rng + CryptoRng + ?Sized>(
    args: &GenerateArgs,
    config: &CliConfig,
    rng: &mut R,
) -> Result<()> {
    ensure_writable(&args.proving_key, args.force)?;
    ensure_writable(&args.verification_key, args.force)?;

    let cs = FileOps::read_circuit(&args.circuit)?;
    let keypair = generate(&cs, rng).map_err(GrothError::from)?;

    FileOps::write_artifact(&keypair.pk, &args.proving_key, config)?;
    FileOps::write_artifact(&keypair.vk, &args.verification_key, config)?;
    info!(
        num_variables = keypair.pk.num_variables(),
        h_query = keypair.pk.h_query.len(),
        "keys generated"
    );
    Ok(())
}

/// Proves a witness against a proving key and writes the proof
///
/// The circuit file must be the one the key was generated for, and the
/// witness must satisfy it.
pub fn prove<R: Rng + CryptoRng + ?Sized>(args: &ProveArgs, config: &CliConfig, rng: &mut R) -> Result<()> {
    ensure_writable(&args.proof, args.force)?;
    if let Some(path) = &args.primary_input_out {
        ensure_writable(path, args.force)?;
    }

    let cs = FileOps::read_circuit(&args.circuit)?;
    let (primary, auxiliary) = FileOps::read_witness(&args.witness)?;
    let pk: ProvingKey = FileOps::read_artifact(&args.proving_key, config)?;
    if pk.constraint_system != cs {
        return Err(CliError::InvalidArguments(format!(
            "proving key {} was not generated for circuit {}",
            args.proving_key.display(),
            args.circuit.display()
        )));
    }

    let proof = Prover::prove_checked(&pk, &primary, &auxiliary, rng).map_err(GrothError::from)?;
    FileOps::write_artifact(&proof, &args.proof, config)?;
    if let Some(path) = &args.primary_input_out {
        FileOps::write_json(&PrimaryInputFile::new(&primary), path)?;
    }
    Ok(())
}

/// Checks a proof, returning the verdict
///
/// `Ok(false)` is a rejected proof; errors are reserved for inputs that
/// cannot be read or do not fit the key.
pub fn verify(args: &VerifyArgs, config: &CliConfig) -> Result<bool> {
    let vk: VerificationKey = FileOps::read_artifact(&args.verification_key, config)?;
    let proof: Proof = FileOps::read_artifact(&args.proof, config)?;
    let primary = FileOps::read_primary_input(&args.primary_input)?;

    let accepted = Verifier::verify(&vk, &primary, &proof).map_err(GrothError::from)?;
    if accepted {
        info!("proof accepted");
    } else {
        warn!("proof rejected");
    }
    Ok(accepted)
}

/// Runs generator, prover and verifier in one process
pub fn run<R: Rng + CryptoRng + ?Sized>(args: &RunArgs, config: &CliConfig, rng: &mut R) -> Result<bool> {
    let cs = FileOps::read_circuit(&args.circuit)?;
    let (primary, auxiliary) = FileOps::read_witness(&args.witness)?;
    let options = RunOptions {
        test_serialization: args.test_serialization,
        codec: config.codec,
    };
    let report = pipeline::run(&cs, &primary, &auxiliary, &options, rng)?;
    Ok(report.accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use groth16_core::groth16_field::Fr;
    use groth16_core::groth16_r1cs::interchange::{CircuitFile, WitnessFile};
    use groth16_core::groth16_r1cs::{ConstraintSystem, LinearCombination, Variable};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use tempfile::TempDir;

    fn fr(v: u64) -> Fr {
        Fr::from(v)
    }

    // out = x * y with out public
    fn multiplication_circuit() -> ConstraintSystem<Fr> {
        let mut cs = ConstraintSystem::new(1);
        let x = cs.alloc_auxiliary();
        let y = cs.alloc_auxiliary();
        cs.add_constraint(
            LinearCombination::from_variable(x),
            LinearCombination::from_variable(y),
            LinearCombination::from_variable(Variable::new(1)),
        );
        cs
    }

    struct Workspace {
        dir: TempDir,
    }

    impl Workspace {
        fn new(primary: u64) -> Self {
            let dir = tempfile::tempdir().unwrap();
            FileOps::write_json(
                &CircuitFile::from_constraint_system(&multiplication_circuit()),
                &dir.path().join("cs.json"),
            )
            .unwrap();
            FileOps::write_json(
                &WitnessFile::new(&[fr(primary)], &[fr(3), fr(4)]),
                &dir.path().join("w.json"),
            )
            .unwrap();
            Self { dir }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        fn generate_args(&self) -> GenerateArgs {
            GenerateArgs {
                circuit: self.path("cs.json"),
                proving_key: self.path("pk.bin"),
                verification_key: self.path("vk.bin"),
                force: false,
            }
        }

        fn prove_args(&self) -> ProveArgs {
            ProveArgs {
                circuit: self.path("cs.json"),
                witness: self.path("w.json"),
                proving_key: self.path("pk.bin"),
                proof: self.path("proof.bin"),
                primary_input_out: Some(self.path("primary.json")),
                force: false,
            }
        }

        fn verify_args(&self, primary: &str) -> VerifyArgs {
            VerifyArgs {
                verification_key: self.path("vk.bin"),
                primary_input: self.path(primary),
                proof: self.path("proof.bin"),
            }
        }
    }

    #[test]
    fn test_generate_prove_verify() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let config = CliConfig::default();
        let ws = Workspace::new(12);

        generate_keys(&ws.generate_args(), &config, &mut rng).unwrap();
        prove(&ws.prove_args(), &config, &mut rng).unwrap();
        assert!(verify(&ws.verify_args("primary.json"), &config).unwrap());

        FileOps::write_json(&PrimaryInputFile::new(&[fr(13)]), &ws.path("wrong.json")).unwrap();
        assert!(!verify(&ws.verify_args("wrong.json"), &config).unwrap());
    }

    #[test]
    fn test_prove_refuses_unsatisfied_witness() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let config = CliConfig::default();
        let ws = Workspace::new(13);

        generate_keys(&ws.generate_args(), &config, &mut rng).unwrap();
        assert!(prove(&ws.prove_args(), &config, &mut rng).is_err());
        assert!(!ws.path("proof.bin").exists());
    }

    #[test]
    fn test_prove_refuses_foreign_circuit() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let config = CliConfig::default();
        let ws = Workspace::new(12);
        generate_keys(&ws.generate_args(), &config, &mut rng).unwrap();

        let mut other = multiplication_circuit();
        other.enforce_equal(Variable::new(1).into(), Variable::new(1).into());
        FileOps::write_json(&CircuitFile::from_constraint_system(&other), &ws.path("cs.json")).unwrap();
        assert!(matches!(
            prove(&ws.prove_args(), &config, &mut rng),
            Err(CliError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_existing_outputs_need_force() {
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let config = CliConfig::default();
        let ws = Workspace::new(12);

        generate_keys(&ws.generate_args(), &config, &mut rng).unwrap();
        assert!(matches!(
            generate_keys(&ws.generate_args(), &config, &mut rng),
            Err(CliError::InvalidArguments(_))
        ));

        let mut args = ws.generate_args();
        args.force = true;
        generate_keys(&args, &config, &mut rng).unwrap();
    }

    #[test]
    fn test_run_with_serialization() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let ws = Workspace::new(12);
        let args = RunArgs {
            circuit: ws.path("cs.json"),
            witness: ws.path("w.json"),
            test_serialization: true,
        };
        assert!(run(&args, &CliConfig::default(), &mut rng).unwrap());
    }
}
