//! Text encoding of field elements for the JSON interchange files.
//!
//! Elements are written as `0x`-prefixed big-endian hex of the canonical
//! integer representative. On input both that form and plain decimal are
//! accepted; hex values at or above the modulus are rejected, decimal values
//! are reduced modulo the field order.

use crate::{FieldError, FieldLike};
use ark_ff::BigInteger;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Format a field element as `0x`-prefixed big-endian hex
pub fn format_field_element<F: FieldLike>(value: &F) -> String {
    format!("0x{}", hex::encode(value.into_bigint().to_bytes_be()))
}

/// Parse a field element from `0x`-prefixed hex or decimal text
pub fn parse_field_element<F: FieldLike>(text: &str) -> Result<F, FieldError> {
    let text = text.trim();
    let invalid = |reason| FieldError::InvalidElement {
        input: text.to_string(),
        reason,
    };

    if let Some(digits) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        if digits.is_empty() {
            return Err(invalid("empty hex literal"));
        }
        let padded = if digits.len() % 2 == 1 {
            format!("0{digits}")
        } else {
            digits.to_string()
        };
        let mut bytes = hex::decode(padded).map_err(|_| invalid("not a hex literal"))?;

        let width = <F as FieldLike>::zero().compressed_size();
        let leading = bytes.len().saturating_sub(width);
        if bytes[..leading].iter().any(|&b| b != 0) {
            return Err(invalid("value exceeds the field modulus"));
        }
        bytes.drain(..leading);

        // Canonical encoding is little-endian and fixed width.
        let mut le = vec![0u8; width];
        for (dst, src) in le.iter_mut().zip(bytes.iter().rev()) {
            *dst = *src;
        }
        return F::deserialize_compressed(&le[..]).map_err(|_| invalid("value exceeds the field modulus"));
    }

    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("expected decimal digits or a 0x-prefixed hex literal"));
    }
    F::from_str(text).map_err(|_| invalid("not a decimal integer"))
}

/// Serde wrapper that reads and writes a field element in its text encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldHex<F: FieldLike>(pub F);

impl<F: FieldLike> Serialize for FieldHex<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_field_element(&self.0))
    }
}

impl<'de, F: FieldLike> Deserialize<'de> for FieldHex<F> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_field_element(&text).map(FieldHex).map_err(de::Error::custom)
    }
}

impl<F: FieldLike> FromStr for FieldHex<F> {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_field_element(s).map(FieldHex)
    }
}

impl<F: FieldLike> From<F> for FieldHex<F> {
    fn from(value: F) -> Self {
        FieldHex(value)
    }
}
