//! Variables and the index layout of a full assignment
//!
//! The assignment vector is `z = [1 | primary input | auxiliary input]`.
//! `VariableLayout` is the arena that owns that convention: every index is
//! classified against it instead of being compared with loose integers.

use std::fmt;

/// Variable index in the constraint system
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(pub usize);

impl Variable {
    /// The constant variable (always has value 1)
    pub const ONE: Variable = Variable(0);

    /// Create a new variable with given index
    pub fn new(index: usize) -> Self {
        Variable(index)
    }

    /// Get the index of this variable
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Role of a variable within the assignment vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// Index 0, the constant one
    One,
    /// Public input, by position within the primary input
    Primary(usize),
    /// Private witness value, by position within the auxiliary input
    Auxiliary(usize),
}

/// Sizes of the contiguous primary and auxiliary ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VariableLayout {
    /// Number of public variables, starting at index 1
    pub primary_input_size: usize,
    /// Number of private variables, following the primary ones
    pub auxiliary_input_size: usize,
}

impl VariableLayout {
    /// Create a layout from the two range sizes
    pub fn new(primary_input_size: usize, auxiliary_input_size: usize) -> Self {
        Self {
            primary_input_size,
            auxiliary_input_size,
        }
    }

    /// Length of the full assignment, including the constant
    ///
    /// Only meaningful for a layout whose `checked_num_variables` is `Some`.
    pub fn num_variables(&self) -> usize {
        1 + self.primary_input_size + self.auxiliary_input_size
    }

    /// Length of the full assignment, or `None` if it does not fit a `usize`
    pub fn checked_num_variables(&self) -> Option<usize> {
        self.primary_input_size
            .checked_add(self.auxiliary_input_size)?
            .checked_add(1)
    }

    /// Number of instance variables: the constant plus the primary input
    pub fn num_instance_variables(&self) -> usize {
        1 + self.primary_input_size
    }

    /// Whether `var` addresses a slot of the assignment
    pub fn contains(&self, var: Variable) -> bool {
        self.classify(var).is_some()
    }

    /// Classify `var`, or `None` when it is out of range
    pub fn classify(&self, var: Variable) -> Option<VariableKind> {
        let Some(offset) = var.index().checked_sub(1) else {
            return Some(VariableKind::One);
        };
        if offset < self.primary_input_size {
            return Some(VariableKind::Primary(offset));
        }
        let offset = offset - self.primary_input_size;
        (offset < self.auxiliary_input_size).then_some(VariableKind::Auxiliary(offset))
    }

    /// Variable handle of the `i`-th primary input
    pub fn primary(&self, i: usize) -> Option<Variable> {
        (i < self.primary_input_size).then(|| Variable(1 + i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_classification() {
        let layout = VariableLayout::new(2, 3);
        assert_eq!(layout.num_variables(), 6);
        assert_eq!(layout.num_instance_variables(), 3);

        assert_eq!(layout.classify(Variable::ONE), Some(VariableKind::One));
        assert_eq!(layout.classify(Variable(1)), Some(VariableKind::Primary(0)));
        assert_eq!(layout.classify(Variable(2)), Some(VariableKind::Primary(1)));
        assert_eq!(layout.classify(Variable(3)), Some(VariableKind::Auxiliary(0)));
        assert_eq!(layout.classify(Variable(5)), Some(VariableKind::Auxiliary(2)));
        assert_eq!(layout.classify(Variable(6)), None);
        assert!(!layout.contains(Variable(6)));
    }

    #[test]
    fn test_layout_handles() {
        let layout = VariableLayout::new(1, 2);
        assert_eq!(layout.primary(0), Some(Variable(1)));
        assert_eq!(layout.primary(1), None);
    }

    #[test]
    fn test_oversized_layout() {
        assert_eq!(VariableLayout::new(2, 3).checked_num_variables(), Some(6));
        assert_eq!(VariableLayout::new(usize::MAX, 0).checked_num_variables(), None);
        assert_eq!(VariableLayout::new(usize::MAX - 1, 1).checked_num_variables(), None);
        assert_eq!(VariableLayout::new(1, usize::MAX).checked_num_variables(), None);

        // Classification never computes the total length
        let layout = VariableLayout::new(usize::MAX, 0);
        assert_eq!(layout.classify(Variable(usize::MAX)), Some(VariableKind::Primary(usize::MAX - 1)));
        assert_eq!(layout.classify(Variable::ONE), Some(VariableKind::One));
    }

    #[test]
    fn test_empty_layout() {
        let layout = VariableLayout::default();
        assert_eq!(layout.num_variables(), 1);
        assert_eq!(layout.classify(Variable(1)), None);
    }
}
