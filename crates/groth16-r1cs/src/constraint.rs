//! R1CS constraint representation

use crate::{LinearCombination, R1CSError, Variable};
use groth16_field::FieldLike;
use std::fmt;

/// Which linear combination of a constraint is meant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSide {
    /// Left factor
    A,
    /// Right factor
    B,
    /// Product
    C,
}

impl fmt::Display for ConstraintSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintSide::A => write!(f, "A"),
            ConstraintSide::B => write!(f, "B"),
            ConstraintSide::C => write!(f, "C"),
        }
    }
}

/// R1CS constraint: <A, z> * <B, z> = <C, z>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint<F: FieldLike> {
    /// Left linear combination (A)
    pub a: LinearCombination<F>,
    /// Right linear combination (B)
    pub b: LinearCombination<F>,
    /// Output linear combination (C)
    pub c: LinearCombination<F>,
}

impl<F: FieldLike> Constraint<F> {
    /// Create a new constraint
    pub fn new(a: LinearCombination<F>, b: LinearCombination<F>, c: LinearCombination<F>) -> Self {
        Self { a, b, c }
    }

    /// The three sides tagged with their position
    pub fn sides(&self) -> [(ConstraintSide, &LinearCombination<F>); 3] {
        [
            (ConstraintSide::A, &self.a),
            (ConstraintSide::B, &self.b),
            (ConstraintSide::C, &self.c),
        ]
    }

    /// Check if this constraint is satisfied by the given variable assignments
    pub fn is_satisfied(&self, assignment: &[F]) -> Result<bool, R1CSError> {
        let a_val = self.a.evaluate(assignment)?;
        let b_val = self.b.evaluate(assignment)?;
        let c_val = self.c.evaluate(assignment)?;

        Ok(a_val * b_val == c_val)
    }

    /// Get all variables referenced in this constraint, sorted and deduplicated
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars: Vec<Variable> = self
            .a
            .variables()
            .chain(self.b.variables())
            .chain(self.c.variables())
            .collect();
        vars.sort();
        vars.dedup();
        vars
    }
}

impl<F: FieldLike> fmt::Display for Constraint<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) * ({}) = ({})", self.a, self.b, self.c)
    }
}
