//! QAP (Quadratic Arithmetic Program) reduction for Groth16.
//!
//! An R1CS with `m` constraints and `l` primary inputs is interpolated over a
//! radix-2 domain of size at least `m + l + 1`. Row `k < m` of the domain
//! carries constraint `k`; row `m + i` is an input-consistency row whose A
//! evaluation is 1 for instance variable `i` (the constant one and the
//! primary inputs). Those extra rows make every instance polynomial linearly
//! independent, which the verifier's input packing relies on.
//!
//! The generator only needs the per-variable polynomials evaluated at a
//! single secret point (`evaluate_at`). The prover needs the quotient
//! `H(x) = (A(x) * B(x) - C(x)) / Z(x)` for its assignment
//! (`compute_quotient`).

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use ark_poly::{univariate::DensePolynomial, DenseUVPolynomial, EvaluationDomain, Radix2EvaluationDomain};
use ark_std::Zero;
use groth16_field::FieldLike;
use groth16_r1cs::{ConstraintSide, ConstraintSystem, LinearCombination, R1CSError};
use rand::Rng;
use rayon::prelude::*;
use tracing::debug_span;

pub use groth16_field;
pub use groth16_r1cs;

/// QAP view of a constraint system
///
/// Borrows the constraint system; the A, B, C polynomials are never
/// materialized, only evaluated through the domain.
#[derive(Debug, Clone)]
pub struct QAP<'a, F: FieldLike> {
    cs: &'a ConstraintSystem<F>,
    /// Evaluation domain the constraint rows are interpolated over
    pub domain: Radix2EvaluationDomain<F>,
}

/// Every variable's A, B and C polynomial evaluated at one point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceEvaluation<F: FieldLike> {
    /// `A_i(t)` for each variable `i`
    pub a: Vec<F>,
    /// `B_i(t)` for each variable `i`
    pub b: Vec<F>,
    /// `C_i(t)` for each variable `i`
    pub c: Vec<F>,
    /// Vanishing polynomial `Z(t)`
    pub zt: F,
    /// Size of the interpolation domain
    pub domain_size: usize,
}

/// Result of dividing `A(x) * B(x) - C(x)` by the vanishing polynomial
#[derive(Debug, Clone)]
pub struct Quotient<F: FieldLike> {
    /// Quotient polynomial H(x)
    pub h: DensePolynomial<F>,
    /// Whether the division left no remainder
    pub exact: bool,
}

impl<F: FieldLike> Quotient<F> {
    /// Coefficients of H, zero-padded to `len`
    pub fn coefficients(&self, len: usize) -> Vec<F> {
        let mut coeffs = self.h.coeffs.clone();
        coeffs.resize(len, <F as FieldLike>::zero());
        coeffs
    }
}

/// Errors that can occur during QAP operations
#[derive(Debug, thiserror::Error)]
pub enum QAPError {
    /// No radix-2 domain of the required size exists for the field
    #[error("No evaluation domain of size >= {required} exists for this field")]
    DomainTooLarge {
        /// Rows needed: constraints plus instance variables
        required: usize,
    },

    /// Assignment length differs from the number of variables
    #[error("Invalid assignment size: expected {expected}, got {actual}")]
    InvalidAssignmentSize {
        /// Expected number of variables
        expected: usize,
        /// Actual number of values provided
        actual: usize,
    },

    /// Polynomial division failed (remainder should be zero)
    #[error("Polynomial division failed: non-zero remainder")]
    PolynomialDivisionFailed,

    /// Constraint system error
    #[error("R1CS error: {0}")]
    R1CS(#[from] R1CSError),
}

fn side_of<F: FieldLike>(constraint: &groth16_r1cs::Constraint<F>, side: ConstraintSide) -> &LinearCombination<F> {
    match side {
        ConstraintSide::A => &constraint.a,
        ConstraintSide::B => &constraint.b,
        ConstraintSide::C => &constraint.c,
    }
}

impl<'a, F: FieldLike> QAP<'a, F> {
    /// Reduce a constraint system to QAP form
    ///
    /// Fails if the system references variables outside its declared range
    /// or if the field has no large enough radix-2 domain.
    pub fn from_r1cs(cs: &'a ConstraintSystem<F>) -> Result<Self, QAPError> {
        cs.validate()?;
        let required = cs
            .num_constraints()
            .checked_add(cs.num_instance_variables())
            .ok_or(QAPError::DomainTooLarge { required: usize::MAX })?;
        let domain = Radix2EvaluationDomain::<F>::new(required).ok_or(QAPError::DomainTooLarge { required })?;
        Ok(Self { cs, domain })
    }

    /// The underlying constraint system
    pub fn constraint_system(&self) -> &'a ConstraintSystem<F> {
        self.cs
    }

    /// Number of domain points
    pub fn domain_size(&self) -> usize {
        self.domain.size()
    }

    /// Length of the full assignment, constant one included
    pub fn num_variables(&self) -> usize {
        self.cs.num_variables()
    }

    /// Constant one plus primary inputs
    pub fn num_instance_variables(&self) -> usize {
        self.cs.num_instance_variables()
    }

    /// Number of R1CS constraints
    pub fn num_constraints(&self) -> usize {
        self.cs.num_constraints()
    }

    /// Degree of the vanishing polynomial
    pub fn degree(&self) -> usize {
        self.domain.size()
    }

    fn side_evaluations(&self, side: ConstraintSide, lagrange: &[F]) -> Vec<F> {
        let mut evals = vec![<F as FieldLike>::zero(); self.num_variables()];
        for (row, constraint) in self.cs.constraints.iter().enumerate() {
            let l = lagrange[row];
            for term in &side_of(constraint, side).terms {
                evals[term.variable.index()] += term.coefficient * l;
            }
        }
        if side == ConstraintSide::A {
            let offset = self.num_constraints();
            for (i, eval) in evals.iter_mut().take(self.num_instance_variables()).enumerate() {
                *eval += lagrange[offset + i];
            }
        }
        evals
    }

    /// Evaluate every variable's A, B and C polynomial at `point`
    pub fn evaluate_at(&self, point: F) -> InstanceEvaluation<F> {
        let _span = debug_span!("qap_instance_map", domain_size = self.domain_size()).entered();

        let lagrange = self.domain.evaluate_all_lagrange_coefficients(point);
        let (a, (b, c)) = rayon::join(
            || self.side_evaluations(ConstraintSide::A, &lagrange),
            || {
                rayon::join(
                    || self.side_evaluations(ConstraintSide::B, &lagrange),
                    || self.side_evaluations(ConstraintSide::C, &lagrange),
                )
            },
        );

        InstanceEvaluation {
            a,
            b,
            c,
            zt: self.domain.evaluate_vanishing_polynomial(point),
            domain_size: self.domain_size(),
        }
    }

    fn check_assignment(&self, assignment: &[F]) -> Result<(), QAPError> {
        if assignment.len() != self.num_variables() {
            return Err(QAPError::InvalidAssignmentSize {
                expected: self.num_variables(),
                actual: assignment.len(),
            });
        }
        Ok(())
    }

    /// Compute `H(x) = (A(x) * B(x) - C(x)) / Z(x)` for a full assignment
    ///
    /// An assignment that does not satisfy the system still yields a
    /// quotient, flagged with `exact == false`.
    pub fn compute_quotient(&self, assignment: &[F]) -> Result<Quotient<F>, QAPError> {
        self.check_assignment(assignment)?;
        let _span = debug_span!("qap_witness_map", domain_size = self.domain_size()).entered();

        let rows = self
            .cs
            .constraints
            .par_iter()
            .map(|c| Ok((c.a.evaluate(assignment)?, c.b.evaluate(assignment)?, c.c.evaluate(assignment)?)))
            .collect::<Result<Vec<_>, R1CSError>>()?;

        let size = self.domain_size();
        let mut a_evals = vec![<F as FieldLike>::zero(); size];
        let mut b_evals = vec![<F as FieldLike>::zero(); size];
        let mut c_evals = vec![<F as FieldLike>::zero(); size];
        for (row, (a, b, c)) in rows.into_iter().enumerate() {
            a_evals[row] = a;
            b_evals[row] = b;
            c_evals[row] = c;
        }
        let offset = self.num_constraints();
        for i in 0..self.num_instance_variables() {
            a_evals[offset + i] = assignment[i];
        }

        self.domain.ifft_in_place(&mut a_evals);
        self.domain.ifft_in_place(&mut b_evals);
        self.domain.ifft_in_place(&mut c_evals);
        let a_poly = DensePolynomial::from_coefficients_vec(a_evals);
        let b_poly = DensePolynomial::from_coefficients_vec(b_evals);
        let c_poly = DensePolynomial::from_coefficients_vec(c_evals);

        let numerator = &(&a_poly * &b_poly) - &c_poly;
        let (h, remainder) = numerator
            .divide_by_vanishing_poly(self.domain)
            .ok_or(QAPError::PolynomialDivisionFailed)?;

        Ok(Quotient {
            h,
            exact: remainder.is_zero(),
        })
    }
}

/// Utility functions for QAP operations
pub mod utils {
    use super::*;

    /// Sample a point outside the domain, so that `Z(point) != 0`
    pub fn random_evaluation_point<F: FieldLike, R: Rng + ?Sized>(domain: &Radix2EvaluationDomain<F>, rng: &mut R) -> F {
        loop {
            let point = F::random(rng);
            if !<F as FieldLike>::is_zero(&domain.evaluate_vanishing_polynomial(point)) {
                return point;
            }
        }
    }
}
