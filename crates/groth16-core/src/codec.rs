//! Key and proof codec
//!
//! Two wire formats are supported:
//!
//! * `Framed` (default):
//!   `"G16\0" | version | kind | compression | body | sha256(everything before)`.
//!   The digest catches corruption that would still decode to valid points.
//! * `Raw`: only the canonical arkworks body, for exchanging artifacts with
//!   other arkworks-based Groth16 implementations.
//!
//! Both formats decode every group element with subgroup checks and reject
//! truncated input and trailing bytes.

use crate::Proof;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, Compress, SerializationError, Validate};
use groth16_setup::{ProvingKey, VerificationKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;
use tracing::debug;

const MAGIC: &[u8; 4] = b"G16\0";
const VERSION: u8 = 1;
const HEADER_LEN: usize = 7;
const DIGEST_LEN: usize = 32;

/// Which artifact a framed encoding carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ArtifactKind {
    /// Proving key
    ProvingKey = 1,
    /// Verification key
    VerificationKey = 2,
    /// Proof
    Proof = 3,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::ProvingKey => write!(f, "proving key"),
            ArtifactKind::VerificationKey => write!(f, "verification key"),
            ArtifactKind::Proof => write!(f, "proof"),
        }
    }
}

/// A value the codec can persist
pub trait Artifact: CanonicalSerialize + CanonicalDeserialize {
    /// Tag written into framed encodings
    const KIND: ArtifactKind;
}

impl Artifact for ProvingKey {
    const KIND: ArtifactKind = ArtifactKind::ProvingKey;
}

impl Artifact for VerificationKey {
    const KIND: ArtifactKind = ArtifactKind::VerificationKey;
}

impl Artifact for Proof {
    const KIND: ArtifactKind = ArtifactKind::Proof;
}

/// Outer layout of an encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireFormat {
    /// Header, canonical body and SHA-256 digest
    #[default]
    Framed,
    /// Canonical body only
    Raw,
}

/// Group element encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointCompression {
    /// x-coordinate plus flags
    #[default]
    Compressed,
    /// Both coordinates
    Uncompressed,
}

impl PointCompression {
    fn to_byte(self) -> u8 {
        match self {
            PointCompression::Compressed => 0,
            PointCompression::Uncompressed => 1,
        }
    }

    fn from_byte(byte: u8) -> Result<Self, CodecError> {
        match byte {
            0 => Ok(PointCompression::Compressed),
            1 => Ok(PointCompression::Uncompressed),
            other => Err(CodecError::InvalidCompressionFlag(other)),
        }
    }
}

impl From<PointCompression> for Compress {
    fn from(value: PointCompression) -> Self {
        match value {
            PointCompression::Compressed => Compress::Yes,
            PointCompression::Uncompressed => Compress::No,
        }
    }
}

/// Codec settings
///
/// Framed encodings record their compression in the header, so `compression`
/// only matters when writing, or when reading `Raw` data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Outer layout
    pub format: WireFormat,
    /// Group element encoding
    pub compression: PointCompression,
}

/// Errors raised while encoding or decoding
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Input ended early
    #[error("Input is truncated")]
    Truncated,

    /// Bytes left over after the artifact
    #[error("{count} trailing bytes after the encoded artifact")]
    TrailingBytes {
        /// Number of unread bytes
        count: usize,
    },

    /// Framed input does not start with the magic bytes
    #[error("Not a framed Groth16 artifact (bad magic)")]
    BadMagic,

    /// Framed input has an unknown version
    #[error("Unsupported format version {0}")]
    UnsupportedVersion(u8),

    /// Framed input carries a different artifact
    #[error("Expected a {expected}, found kind byte {found}")]
    KindMismatch {
        /// Kind requested by the caller
        expected: ArtifactKind,
        /// Kind byte in the header
        found: u8,
    },

    /// Unknown compression byte in the header
    #[error("Invalid compression flag {0}")]
    InvalidCompressionFlag(u8),

    /// The SHA-256 digest does not match the content
    #[error("Digest mismatch: the artifact is corrupted")]
    DigestMismatch,

    /// Canonical decoding failed (invalid point, field element, length)
    #[error("Serialization error: {0}")]
    Serialization(SerializationError),

    /// File access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SerializationError> for CodecError {
    fn from(err: SerializationError) -> Self {
        match err {
            SerializationError::IoError(ref io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
                CodecError::Truncated
            }
            other => CodecError::Serialization(other),
        }
    }
}

/// Encode an artifact
pub fn serialize<T: Artifact>(value: &T, config: &CodecConfig) -> Result<Vec<u8>, CodecError> {
    let compress: Compress = config.compression.into();
    let body_len = value.serialized_size(compress);

    let mut out = match config.format {
        WireFormat::Raw => Vec::with_capacity(body_len),
        WireFormat::Framed => {
            let mut out = Vec::with_capacity(HEADER_LEN + body_len + DIGEST_LEN);
            out.extend_from_slice(MAGIC);
            out.push(VERSION);
            out.push(T::KIND as u8);
            out.push(config.compression.to_byte());
            out
        }
    };
    value.serialize_with_mode(&mut out, compress)?;

    if config.format == WireFormat::Framed {
        let digest = Sha256::digest(&out);
        out.extend_from_slice(&digest);
    }
    let kind = T::KIND;
    debug!(%kind, bytes = out.len(), "encoded artifact");
    Ok(out)
}

/// Decode an artifact
pub fn deserialize<T: Artifact>(bytes: &[u8], config: &CodecConfig) -> Result<T, CodecError> {
    match config.format {
        WireFormat::Raw => decode_body(bytes, config.compression),
        WireFormat::Framed => {
            if bytes.len() < HEADER_LEN + DIGEST_LEN {
                return Err(CodecError::Truncated);
            }
            if &bytes[..4] != MAGIC {
                return Err(CodecError::BadMagic);
            }
            let (content, digest) = bytes.split_at(bytes.len() - DIGEST_LEN);
            if Sha256::digest(content).as_slice() != digest {
                return Err(CodecError::DigestMismatch);
            }
            if content[4] != VERSION {
                return Err(CodecError::UnsupportedVersion(content[4]));
            }
            if content[5] != T::KIND as u8 {
                return Err(CodecError::KindMismatch {
                    expected: T::KIND,
                    found: content[5],
                });
            }
            let compression = PointCompression::from_byte(content[6])?;
            decode_body(&content[HEADER_LEN..], compression)
        }
    }
}

fn decode_body<T: Artifact>(body: &[u8], compression: PointCompression) -> Result<T, CodecError> {
    let mut reader = body;
    let value = T::deserialize_with_mode(&mut reader, compression.into(), Validate::Yes)?;
    if !reader.is_empty() {
        return Err(CodecError::TrailingBytes { count: reader.len() });
    }
    Ok(value)
}

/// Encode an artifact and write it to `path`
pub fn write_to_file<T: Artifact, P: AsRef<Path>>(value: &T, path: P, config: &CodecConfig) -> Result<(), CodecError> {
    let bytes = serialize(value, config)?;
    std::fs::write(path.as_ref(), &bytes)?;
    debug!(path = %path.as_ref().display(), bytes = bytes.len(), "wrote artifact");
    Ok(())
}

/// Read `path` and decode the artifact it holds
pub fn read_from_file<T: Artifact, P: AsRef<Path>>(path: P, config: &CodecConfig) -> Result<T, CodecError> {
    let bytes = std::fs::read(path.as_ref())?;
    debug!(path = %path.as_ref().display(), bytes = bytes.len(), "read artifact");
    deserialize(&bytes, config)
}
