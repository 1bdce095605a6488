//! Shared file and configuration helpers

use crate::{CliError, Result};
use groth16_core::codec::{self, Artifact};
use groth16_core::CodecConfig;
use groth16_field::Fr;
use groth16_r1cs::interchange::{CircuitFile, PrimaryInputFile, WitnessFile};
use groth16_r1cs::ConstraintSystem;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::{debug, info};

/// Settings read from `--config`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// How keys and proofs are written and read
    pub codec: CodecConfig,
}

/// Common file operations for CLI tools
pub struct FileOps;

impl FileOps {
    /// Reads a JSON file and deserializes it
    pub fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Writes data to a JSON file
    pub fn write_json<T: Serialize>(data: &T, path: &Path) -> Result<()> {
        let file = OpenOptions::new().create(true).write(true).truncate(true).open(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), data)?;
        debug!(path = %path.display(), "wrote JSON");
        Ok(())
    }

    /// Reads a circuit file and validates it
    pub fn read_circuit(path: &Path) -> Result<ConstraintSystem<Fr>> {
        let circuit: CircuitFile<Fr> = Self::read_json(path)?;
        let cs = circuit.into_constraint_system()?;
        info!(
            path = %path.display(),
            num_constraints = cs.num_constraints(),
            primary_input_size = cs.primary_input_size,
            auxiliary_input_size = cs.auxiliary_input_size,
            "loaded circuit"
        );
        Ok(cs)
    }

    /// Reads a witness file as `(primary, auxiliary)`
    pub fn read_witness(path: &Path) -> Result<(Vec<Fr>, Vec<Fr>)> {
        let witness: WitnessFile<Fr> = Self::read_json(path)?;
        Ok(witness.into_parts())
    }

    /// Reads a primary input file
    pub fn read_primary_input(path: &Path) -> Result<Vec<Fr>> {
        let primary: PrimaryInputFile<Fr> = Self::read_json(path)?;
        Ok(primary.into_values())
    }

    /// Encodes a key or proof to `path`
    pub fn write_artifact<T: Artifact>(value: &T, path: &Path, config: &CliConfig) -> Result<()> {
        codec::write_to_file(value, path, &config.codec)?;
        let kind = T::KIND;
        info!(path = %path.display(), %kind, "wrote artifact");
        Ok(())
    }

    /// Decodes a key or proof from `path`
    pub fn read_artifact<T: Artifact>(path: &Path, config: &CliConfig) -> Result<T> {
        Ok(codec::read_from_file(path, &config.codec)?)
    }
}

/// Configuration loading
pub struct ConfigUtils;

impl ConfigUtils {
    /// Loads the configuration file, or the defaults when none is given
    pub fn load_or_default(config_path: Option<&Path>) -> Result<CliConfig> {
        match config_path {
            Some(path) => {
                if !path.is_file() {
                    return Err(CliError::InvalidArguments(format!(
                        "configuration file {} does not exist",
                        path.display()
                    )));
                }
                info!(path = %path.display(), "loading configuration");
                FileOps::read_json(path)
            }
            None => {
                debug!("using default configuration");
                Ok(CliConfig::default())
            }
        }
    }
}
