//! R1CS (Rank-1 Constraint System) implementation for Groth16 zk-SNARK.
//!
//! This crate provides the constraint system builder API and data structures
//! for constructing R1CS constraints of the form: <a, z> * <b, z> = <c, z>
//! where z = [1 | primary input | auxiliary input].
//!
//! A `ConstraintSystem` is produced by a circuit frontend and consumed
//! read-only by the generator and prover. Both refuse to run on a system
//! whose `validate` fails.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod constraint;
pub mod interchange;
pub mod linear_combination;
pub mod r1cs_example;
mod serialization;
pub mod variable;

pub use constraint::*;
pub use linear_combination::*;
pub use variable::*;

use groth16_field::FieldLike;

pub use groth16_field;

/// R1CS constraint system
///
/// Constraints plus the sizes of the public (primary) and private
/// (auxiliary) ranges of the assignment vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSystem<F: FieldLike> {
    /// All constraints in the system, in order
    pub constraints: Vec<Constraint<F>>,
    /// Number of public input variables (excluding the constant 1)
    pub primary_input_size: usize,
    /// Number of private witness variables
    pub auxiliary_input_size: usize,
}

impl<F: FieldLike> ConstraintSystem<F> {
    /// Create a new empty system with the given number of public inputs
    pub fn new(primary_input_size: usize) -> Self {
        Self {
            constraints: Vec::new(),
            primary_input_size,
            auxiliary_input_size: 0,
        }
    }

    /// Assemble a system from frontend output, rejecting it if malformed
    pub fn from_parts(
        constraints: Vec<Constraint<F>>,
        primary_input_size: usize,
        auxiliary_input_size: usize,
    ) -> Result<Self, R1CSError> {
        let cs = Self {
            constraints,
            primary_input_size,
            auxiliary_input_size,
        };
        cs.validate()?;
        Ok(cs)
    }

    /// Index layout of the full assignment
    pub fn layout(&self) -> VariableLayout {
        VariableLayout::new(self.primary_input_size, self.auxiliary_input_size)
    }

    /// Handle of the `i`-th public input
    pub fn primary(&self, i: usize) -> Result<Variable, R1CSError> {
        self.layout().primary(i).ok_or(R1CSError::UnknownPrimaryInput {
            index: i,
            primary_input_size: self.primary_input_size,
        })
    }

    /// Handles of all public inputs
    pub fn primary_input_variables(&self) -> Vec<Variable> {
        (1..=self.primary_input_size).map(Variable::new).collect()
    }

    /// Allocate a new witness variable and return its handle
    pub fn alloc_auxiliary(&mut self) -> Variable {
        let var = Variable::new(self.num_variables());
        self.auxiliary_input_size += 1;
        var
    }

    /// Add a constraint to the system: A * B = C
    pub fn add_constraint(&mut self, a: LinearCombination<F>, b: LinearCombination<F>, c: LinearCombination<F>) {
        self.constraints.push(Constraint::new(a, b, c));
    }

    /// Enforce equality: left = right, as (left - right) * 1 = 0
    pub fn enforce_equal(&mut self, left: LinearCombination<F>, right: LinearCombination<F>) {
        self.add_constraint(
            left - right,
            LinearCombination::from_constant(<F as FieldLike>::one()),
            LinearCombination::new(),
        );
    }

    /// Enforce multiplication: left * right = output
    pub fn enforce_multiplication(
        &mut self,
        left: LinearCombination<F>,
        right: LinearCombination<F>,
        output: LinearCombination<F>,
    ) {
        self.add_constraint(left, right, output);
    }

    /// Length of the full assignment, including the constant
    pub fn num_variables(&self) -> usize {
        self.layout().num_variables()
    }

    /// Number of instance variables (constant plus primary input)
    pub fn num_instance_variables(&self) -> usize {
        self.layout().num_instance_variables()
    }

    /// Get the number of constraints
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Check that the sizes are representable and that every referenced
    /// variable lies inside the layout
    ///
    /// Reports the first offending term.
    pub fn validate(&self) -> Result<(), R1CSError> {
        let layout = self.layout();
        let num_variables = layout.checked_num_variables().ok_or(R1CSError::LayoutOverflow {
            primary_input_size: self.primary_input_size,
            auxiliary_input_size: self.auxiliary_input_size,
        })?;
        for (index, constraint) in self.constraints.iter().enumerate() {
            for (side, lc) in constraint.sides() {
                if let Some(var) = lc.variables().find(|v| layout.classify(*v).is_none()) {
                    return Err(R1CSError::MalformedConstraintSystem {
                        constraint: index,
                        side,
                        var_index: var.index(),
                        num_variables,
                    });
                }
            }
        }
        Ok(())
    }

    /// Whether `validate` succeeds
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Create an assignment vector `[1 | primary | auxiliary]`
    pub fn create_assignment(&self, primary: &[F], auxiliary: &[F]) -> Result<Vec<F>, R1CSError> {
        if primary.len() != self.primary_input_size {
            return Err(R1CSError::InvalidPrimaryInputSize {
                expected: self.primary_input_size,
                actual: primary.len(),
            });
        }
        if auxiliary.len() != self.auxiliary_input_size {
            return Err(R1CSError::InvalidAuxiliaryInputSize {
                expected: self.auxiliary_input_size,
                actual: auxiliary.len(),
            });
        }

        let mut assignment = Vec::with_capacity(self.num_variables());
        assignment.push(<F as FieldLike>::one());
        assignment.extend_from_slice(primary);
        assignment.extend_from_slice(auxiliary);
        Ok(assignment)
    }

    /// Index of the first constraint the full assignment violates
    pub fn first_unsatisfied(&self, assignment: &[F]) -> Result<Option<usize>, R1CSError> {
        if assignment.len() != self.num_variables() {
            return Err(R1CSError::InvalidAssignmentSize {
                expected: self.num_variables(),
                actual: assignment.len(),
            });
        }
        if !<F as FieldLike>::is_one(&assignment[0]) {
            return Err(R1CSError::InvalidConstantVariable);
        }

        for (i, constraint) in self.constraints.iter().enumerate() {
            if !constraint.is_satisfied(assignment)? {
                return Ok(Some(i));
            }
        }
        Ok(None)
    }

    /// Check if every constraint holds under `[1 | primary | auxiliary]`
    pub fn is_satisfied(&self, primary: &[F], auxiliary: &[F]) -> Result<bool, R1CSError> {
        let assignment = self.create_assignment(primary, auxiliary)?;
        Ok(self.first_unsatisfied(&assignment)?.is_none())
    }

    /// Like `is_satisfied`, but names the failing constraint
    pub fn check_satisfied(&self, primary: &[F], auxiliary: &[F]) -> Result<(), R1CSError> {
        let assignment = self.create_assignment(primary, auxiliary)?;
        match self.first_unsatisfied(&assignment)? {
            Some(constraint_index) => Err(R1CSError::UnsatisfiedConstraint { constraint_index }),
            None => Ok(()),
        }
    }
}

impl<F: FieldLike> Default for ConstraintSystem<F> {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Errors that can occur in R1CS operations
#[derive(Debug, thiserror::Error)]
pub enum R1CSError {
    /// A constraint references a variable outside the layout
    #[error(
        "Malformed constraint system: constraint {constraint} side {side} references v{var_index} \
         but only {num_variables} variables exist"
    )]
    MalformedConstraintSystem {
        /// Index of the offending constraint
        constraint: usize,
        /// Side of the offending term
        side: ConstraintSide,
        /// Referenced index
        var_index: usize,
        /// Length of the full assignment
        num_variables: usize,
    },

    /// The declared sizes do not fit an assignment vector
    #[error(
        "Malformed constraint system: {primary_input_size} primary and {auxiliary_input_size} \
         auxiliary variables overflow the assignment length"
    )]
    LayoutOverflow {
        /// Declared public input count
        primary_input_size: usize,
        /// Declared private input count
        auxiliary_input_size: usize,
    },

    /// Variable index out of bounds during evaluation
    #[error("Variable index {var_index} out of bounds (have {num_vars} variables)")]
    VariableOutOfBounds {
        /// Index of the variable that was out of bounds
        var_index: usize,
        /// Total number of variables available
        num_vars: usize,
    },

    /// Invalid assignment size
    #[error("Invalid assignment size: expected {expected}, got {actual}")]
    InvalidAssignmentSize {
        /// Expected number of variables
        expected: usize,
        /// Actual number of variables provided
        actual: usize,
    },

    /// Invalid primary input size
    #[error("Invalid primary input size: expected {expected}, got {actual}")]
    InvalidPrimaryInputSize {
        /// Expected number of public inputs
        expected: usize,
        /// Actual number of public inputs provided
        actual: usize,
    },

    /// Invalid auxiliary input size
    #[error("Invalid auxiliary input size: expected {expected}, got {actual}")]
    InvalidAuxiliaryInputSize {
        /// Expected number of witness variables
        expected: usize,
        /// Actual number of witness variables provided
        actual: usize,
    },

    /// Requested a primary input past the declared count
    #[error("Primary input {index} does not exist (primary input size is {primary_input_size})")]
    UnknownPrimaryInput {
        /// Requested position
        index: usize,
        /// Declared count
        primary_input_size: usize,
    },

    /// Constraint not satisfied
    #[error("Constraint {constraint_index} not satisfied")]
    UnsatisfiedConstraint {
        /// Index of the constraint that failed
        constraint_index: usize,
    },

    /// Invalid constant variable (should always be 1)
    #[error("Invalid constant variable: should always be 1")]
    InvalidConstantVariable,
}

/// Utility functions for building common constraints
pub mod utils {
    use super::*;

    /// Create a constraint enforcing that a variable is boolean (0 or 1)
    pub fn boolean_constraint<F: FieldLike>(cs: &mut ConstraintSystem<F>, var: Variable) {
        // var * var = var
        let var_lc = LinearCombination::from_variable(var);
        cs.enforce_multiplication(var_lc.clone(), var_lc.clone(), var_lc);
    }

    /// Allocate `num_bits` boolean witnesses whose weighted sum equals `value_var`
    pub fn bit_decomposition<F: FieldLike>(
        cs: &mut ConstraintSystem<F>,
        value_var: Variable,
        num_bits: usize,
    ) -> Vec<Variable> {
        let mut bit_vars = Vec::with_capacity(num_bits);
        for _ in 0..num_bits {
            let bit_var = cs.alloc_auxiliary();
            boolean_constraint(cs, bit_var);
            bit_vars.push(bit_var);
        }

        let mut sum_lc = LinearCombination::new();
        let mut power_of_two = <F as FieldLike>::one();
        for &bit_var in &bit_vars {
            sum_lc.add_term(bit_var, power_of_two);
            power_of_two = power_of_two + power_of_two;
        }

        cs.enforce_equal(LinearCombination::from_variable(value_var), sum_lc);
        bit_vars
    }

    /// Little-endian bits of `value` as field elements
    pub fn bit_values<F: FieldLike>(value: u64, num_bits: usize) -> Vec<F> {
        (0..num_bits).map(|i| F::from_u64((value >> i) & 1)).collect()
    }
}
