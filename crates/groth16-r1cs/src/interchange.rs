//! JSON interchange between a circuit frontend and the proving pipeline.
//!
//! A frontend writes a `CircuitFile` (the constraint system) and a
//! `WitnessFile` (primary and auxiliary input). The verifier side only needs a
//! `PrimaryInputFile`. Linear combinations are lists of
//! `[coefficient, variable index]` pairs.

use crate::{Constraint, ConstraintSystem, LinearCombination, R1CSError, Variable};
use groth16_field::{FieldHex, FieldLike};
use serde::{Deserialize, Serialize};

/// `[coefficient, variable index]` pairs of one linear combination
pub type TermsFile<F> = Vec<(FieldHex<F>, usize)>;

/// Serialized constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ConstraintFile<F: FieldLike> {
    /// Left factor
    pub a: TermsFile<F>,
    /// Right factor
    pub b: TermsFile<F>,
    /// Product
    pub c: TermsFile<F>,
}

/// Serialized constraint system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct CircuitFile<F: FieldLike> {
    /// Number of public variables
    pub primary_input_size: usize,
    /// Number of private variables
    pub auxiliary_input_size: usize,
    /// Constraints in order
    pub constraints: Vec<ConstraintFile<F>>,
}

/// Serialized full witness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct WitnessFile<F: FieldLike> {
    /// Public values
    pub primary_input: Vec<FieldHex<F>>,
    /// Private values
    pub auxiliary_input: Vec<FieldHex<F>>,
}

/// Serialized public input, as consumed by the verifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PrimaryInputFile<F: FieldLike> {
    /// Public values
    pub primary_input: Vec<FieldHex<F>>,
}

fn terms_to_file<F: FieldLike>(lc: &LinearCombination<F>) -> TermsFile<F> {
    lc.terms
        .iter()
        .map(|t| (FieldHex(t.coefficient), t.variable.index()))
        .collect()
}

fn terms_from_file<F: FieldLike>(terms: TermsFile<F>) -> LinearCombination<F> {
    LinearCombination::from_terms(terms.into_iter().map(|(coeff, index)| (coeff.0, Variable::new(index))))
}

fn unwrap_values<F: FieldLike>(values: Vec<FieldHex<F>>) -> Vec<F> {
    values.into_iter().map(|v| v.0).collect()
}

fn wrap_values<F: FieldLike>(values: &[F]) -> Vec<FieldHex<F>> {
    values.iter().copied().map(FieldHex).collect()
}

impl<F: FieldLike> CircuitFile<F> {
    /// Snapshot a constraint system
    pub fn from_constraint_system(cs: &ConstraintSystem<F>) -> Self {
        Self {
            primary_input_size: cs.primary_input_size,
            auxiliary_input_size: cs.auxiliary_input_size,
            constraints: cs
                .constraints
                .iter()
                .map(|c| ConstraintFile {
                    a: terms_to_file(&c.a),
                    b: terms_to_file(&c.b),
                    c: terms_to_file(&c.c),
                })
                .collect(),
        }
    }

    /// Rebuild the constraint system, validating variable ranges
    pub fn into_constraint_system(self) -> Result<ConstraintSystem<F>, R1CSError> {
        let constraints = self
            .constraints
            .into_iter()
            .map(|c| Constraint::new(terms_from_file(c.a), terms_from_file(c.b), terms_from_file(c.c)))
            .collect();
        ConstraintSystem::from_parts(constraints, self.primary_input_size, self.auxiliary_input_size)
    }
}

impl<F: FieldLike> WitnessFile<F> {
    /// Wrap primary and auxiliary values
    pub fn new(primary: &[F], auxiliary: &[F]) -> Self {
        Self {
            primary_input: wrap_values(primary),
            auxiliary_input: wrap_values(auxiliary),
        }
    }

    /// Split back into `(primary, auxiliary)`
    pub fn into_parts(self) -> (Vec<F>, Vec<F>) {
        (unwrap_values(self.primary_input), unwrap_values(self.auxiliary_input))
    }

    /// Public part of the witness
    pub fn primary_input_file(&self) -> PrimaryInputFile<F> {
        PrimaryInputFile {
            primary_input: self.primary_input.clone(),
        }
    }
}

impl<F: FieldLike> PrimaryInputFile<F> {
    /// Wrap primary values
    pub fn new(primary: &[F]) -> Self {
        Self {
            primary_input: wrap_values(primary),
        }
    }

    /// Unwrap primary values
    pub fn into_values(self) -> Vec<F> {
        unwrap_values(self.primary_input)
    }
}
