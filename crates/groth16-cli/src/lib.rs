//! Command-line front end for the Groth16 pipeline.
//!
//! Each phase is its own subcommand and persists its output, so the
//! generator, prover and verifier can run on different machines:
//!
//! * `generate`: circuit JSON to proving key and verification key
//! * `prove`: circuit, witness and proving key to a proof
//! * `verify`: verification key, primary input and proof to accept/reject
//! * `run`: all three in one process, optionally round-tripping every
//!   artifact through the codec

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod commands;
pub mod common;

use groth16_core::{CodecError, GrothError};
use groth16_r1cs::R1CSError;
use thiserror::Error;

pub use groth16_core;

/// Error types for CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// File access failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON input could not be parsed or written
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Key or proof file could not be decoded
    #[error("Codec error: {0}")]
    CodecError(#[from] CodecError),

    /// Circuit or witness is inconsistent
    #[error("R1CS error: {0}")]
    R1CSError(#[from] R1CSError),

    /// Generator, prover or verifier failure
    #[error("Groth16 error: {0}")]
    GrothError(#[from] GrothError),

    /// Inputs that parse but do not fit together
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

/// Result alias for CLI helpers
pub type Result<T> = std::result::Result<T, CliError>;
