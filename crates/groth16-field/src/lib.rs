//! Field operations and traits for the Groth16 zk-SNARK pipeline.
//!
//! This crate pins the arithmetic foundation to the BLS12-381 pairing-friendly
//! curve and defines the `FieldLike` trait used by the constraint system and
//! QAP crates. Everything above this crate treats the field, group and pairing
//! operations as supplied primitives.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use ark_ff::{Field, One, PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use std::fmt::{Debug, Display};

pub mod encoding;

pub use ark_bls12_381::{Bls12_381, Fr, G1Affine, G1Projective, G2Affine, G2Projective};
pub use encoding::{format_field_element, parse_field_element, FieldHex};

/// Alias for the default field used in the Groth16 implementation: BLS12-381 scalar field
pub type F = Fr;

/// Trait representing field-like operations needed for Groth16
///
/// This trait provides a convenient abstraction over arkworks field operations
/// and ensures compatibility with our constraint system and polynomial operations.
pub trait FieldLike:
    Field + PrimeField + CanonicalSerialize + CanonicalDeserialize + Debug + Display + Send + Sync + 'static
{
    /// Returns the zero element of the field
    fn zero() -> Self {
        <Self as Zero>::zero()
    }

    /// Returns the one element of the field
    fn one() -> Self {
        <Self as One>::one()
    }

    /// Check if the element is zero
    fn is_zero(&self) -> bool {
        <Self as Zero>::is_zero(self)
    }

    /// Check if the element is one
    fn is_one(&self) -> bool {
        <Self as One>::is_one(self)
    }

    /// Compute the multiplicative inverse
    fn inverse(&self) -> Option<Self> {
        <Self as Field>::inverse(self)
    }

    /// Generate a random field element
    fn random<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        Self::rand(rng)
    }

    /// Generate a random non-zero field element
    fn random_nonzero<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let candidate = Self::rand(rng);
            if !<Self as Zero>::is_zero(&candidate) {
                return candidate;
            }
        }
    }

    /// Convert from a u64 value
    fn from_u64(val: u64) -> Self {
        Self::from(val)
    }
}

impl FieldLike for Fr {}

/// Errors that can occur in field operations
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// Text that does not denote a canonical field element
    #[error("Invalid field element {input:?}: {reason}")]
    InvalidElement {
        /// The rejected input
        input: String,
        /// Why it was rejected
        reason: &'static str,
    },
}

/// Utility functions for field operations
pub mod utils {
    use super::*;

    /// Powers `[1, x, x^2, ..., x^(count-1)]`
    pub fn powers<F: FieldLike>(x: F, count: usize) -> Vec<F> {
        let mut powers = Vec::with_capacity(count);
        let mut current = <F as FieldLike>::one();
        for _ in 0..count {
            powers.push(current);
            current *= x;
        }
        powers
    }
}
