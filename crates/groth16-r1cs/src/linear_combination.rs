//! Linear combination representation for R1CS

use crate::{R1CSError, Variable};
use groth16_field::{format_field_element, FieldLike};
use std::collections::BTreeMap;
use std::fmt;

/// A term in a linear combination: coefficient * variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term<F: FieldLike> {
    /// Field coefficient
    pub coefficient: F,
    /// Variable the coefficient multiplies
    pub variable: Variable,
}

impl<F: FieldLike> Term<F> {
    /// Create a new term
    pub fn new(coefficient: F, variable: Variable) -> Self {
        Self { coefficient, variable }
    }
}

/// Linear combination of variables with field coefficients
///
/// An ordered sequence of terms `Σ(coeff_i * var_i)`. A variable may appear
/// more than once; its coefficients add up on evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearCombination<F: FieldLike> {
    /// Terms in insertion order
    pub terms: Vec<Term<F>>,
}

impl<F: FieldLike> LinearCombination<F> {
    /// Create a new empty linear combination
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Create a linear combination from a single variable
    pub fn from_variable(var: Variable) -> Self {
        Self {
            terms: vec![Term::new(<F as FieldLike>::one(), var)],
        }
    }

    /// Create a linear combination from a constant
    pub fn from_constant(constant: F) -> Self {
        let mut lc = Self::new();
        lc.add_term(Variable::ONE, constant);
        lc
    }

    /// Build from `(coefficient, variable)` pairs, keeping their order
    pub fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = (F, Variable)>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(|(coefficient, variable)| Term::new(coefficient, variable))
                .collect(),
        }
    }

    /// Append a term (variable * coefficient); zero coefficients are dropped
    pub fn add_term(&mut self, var: Variable, coeff: F) {
        if !<F as FieldLike>::is_zero(&coeff) {
            self.terms.push(Term::new(coeff, var));
        }
    }

    /// Multiply this linear combination by a scalar
    pub fn mul_scalar(&mut self, scalar: F) {
        if <F as FieldLike>::is_zero(&scalar) {
            self.terms.clear();
            return;
        }

        for term in &mut self.terms {
            term.coefficient *= scalar;
        }
    }

    /// Add another linear combination to this one
    pub fn add_lc(&mut self, other: &LinearCombination<F>) {
        self.terms.extend_from_slice(&other.terms);
    }

    /// Subtract another linear combination from this one
    pub fn sub_lc(&mut self, other: &LinearCombination<F>) {
        self.terms
            .extend(other.terms.iter().map(|t| Term::new(-t.coefficient, t.variable)));
    }

    /// Merge repeated variables, drop zero coefficients and sort by index
    pub fn normalize(&mut self) {
        let mut merged: BTreeMap<Variable, F> = BTreeMap::new();
        for term in &self.terms {
            *merged.entry(term.variable).or_insert_with(<F as FieldLike>::zero) += term.coefficient;
        }
        self.terms = merged
            .into_iter()
            .filter(|(_, coeff)| !<F as FieldLike>::is_zero(coeff))
            .map(|(variable, coefficient)| Term::new(coefficient, variable))
            .collect();
    }

    /// Check if this linear combination has no terms
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluate this linear combination given variable assignments
    pub fn evaluate(&self, assignment: &[F]) -> Result<F, R1CSError> {
        let mut result = <F as FieldLike>::zero();

        for term in &self.terms {
            let value = assignment
                .get(term.variable.index())
                .ok_or(R1CSError::VariableOutOfBounds {
                    var_index: term.variable.index(),
                    num_vars: assignment.len(),
                })?;
            result += term.coefficient * value;
        }

        Ok(result)
    }

    /// Number of stored terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Get all variables referenced in this linear combination
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.terms.iter().map(|t| t.variable)
    }

    /// Largest referenced variable index, if any
    pub fn max_index(&self) -> Option<usize> {
        self.variables().map(|v| v.index()).max()
    }
}

impl<F: FieldLike> Default for LinearCombination<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FieldLike> From<Variable> for LinearCombination<F> {
    fn from(var: Variable) -> Self {
        Self::from_variable(var)
    }
}

impl<F: FieldLike> std::ops::Add for LinearCombination<F> {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self.add_lc(&other);
        self
    }
}

impl<F: FieldLike> std::ops::Sub for LinearCombination<F> {
    type Output = Self;

    fn sub(mut self, other: Self) -> Self {
        self.sub_lc(&other);
        self
    }
}

impl<F: FieldLike> std::ops::Mul<F> for LinearCombination<F> {
    type Output = Self;

    fn mul(mut self, scalar: F) -> Self {
        self.mul_scalar(scalar);
        self
    }
}

impl<F: FieldLike> fmt::Display for LinearCombination<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            if <F as FieldLike>::is_one(&term.coefficient) {
                write!(f, "{}", term.variable)?;
            } else {
                write!(f, "{}*{}", format_field_element(&term.coefficient), term.variable)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groth16_field::F;

    #[test]
    fn test_linear_combination_basic() {
        let mut lc = LinearCombination::<F>::new();
        lc.add_term(Variable::new(1), F::from(2u64));
        lc.add_term(Variable::new(2), F::from(3u64));

        // 2*5 + 3*7 = 31
        let assignment = vec![<F as FieldLike>::one(), F::from(5u64), F::from(7u64)];
        assert_eq!(lc.evaluate(&assignment).unwrap(), F::from(31u64));
    }

    #[test]
    fn test_zero_coefficient_dropped() {
        let mut lc = LinearCombination::<F>::new();
        lc.add_term(Variable::new(1), <F as FieldLike>::zero());
        assert!(lc.is_zero());
        assert!(LinearCombination::<F>::from_constant(<F as FieldLike>::zero()).is_zero());
    }

    #[test]
    fn test_duplicate_terms_sum() {
        let lc = LinearCombination::<F>::from_terms([
            (F::from(2u64), Variable::new(1)),
            (F::from(3u64), Variable::new(1)),
        ]);
        let assignment = vec![<F as FieldLike>::one(), F::from(4u64)];
        assert_eq!(lc.evaluate(&assignment).unwrap(), F::from(20u64));
    }

    #[test]
    fn test_normalize_merges_and_sorts() {
        let x = Variable::new(1);
        let y = Variable::new(2);
        let mut lc = LinearCombination::<F>::from_variable(y) + LinearCombination::from_variable(x)
            - LinearCombination::from_variable(y);
        lc.normalize();
        assert_eq!(lc.terms, vec![Term::new(<F as FieldLike>::one(), x)]);
    }

    #[test]
    fn test_linear_combination_operations() {
        let var1 = Variable::new(1);
        let var2 = Variable::new(2);

        let lc = (LinearCombination::<F>::from_variable(var1) + LinearCombination::from_variable(var2))
            * F::from(2u64);

        // 2 * (3 + 4)
        let assignment = vec![<F as FieldLike>::one(), F::from(3u64), F::from(4u64)];
        assert_eq!(lc.evaluate(&assignment).unwrap(), F::from(14u64));
        assert_eq!(lc.max_index(), Some(2));
    }

    #[test]
    fn test_evaluate_out_of_bounds() {
        let lc = LinearCombination::<F>::from_variable(Variable::new(5));
        let assignment = vec![<F as FieldLike>::one()];
        assert!(matches!(
            lc.evaluate(&assignment),
            Err(R1CSError::VariableOutOfBounds { var_index: 5, num_vars: 1 })
        ));
    }

    #[test]
    fn test_display() {
        let lc = LinearCombination::<F>::from_variable(Variable::new(3));
        assert_eq!(lc.to_string(), "v3");
        assert_eq!(LinearCombination::<F>::new().to_string(), "0");
    }
}
