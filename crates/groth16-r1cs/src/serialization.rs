//! Canonical binary encoding of a constraint system
//!
//! Layout: `primary_input_size: u64`, `auxiliary_input_size: u64`,
//! `num_constraints: u64`, then per constraint the A, B and C linear
//! combinations, each as `num_terms: u64` followed by
//! `(coefficient, variable index: u64)` pairs. Checking a decoded system
//! runs `ConstraintSystem::validate`.

use crate::{Constraint, ConstraintSystem, LinearCombination, Variable};
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate, Write,
};
use groth16_field::FieldLike;

fn write_len<W: Write>(len: usize, writer: W, compress: Compress) -> Result<(), SerializationError> {
    (len as u64).serialize_with_mode(writer, compress)
}

fn read_len<R: Read>(reader: R, compress: Compress, validate: Validate) -> Result<usize, SerializationError> {
    let len = u64::deserialize_with_mode(reader, compress, validate)?;
    usize::try_from(len).map_err(|_| SerializationError::InvalidData)
}

fn lc_size<F: FieldLike>(lc: &LinearCombination<F>, compress: Compress) -> usize {
    8 + lc
        .terms
        .iter()
        .map(|t| t.coefficient.serialized_size(compress) + 8)
        .sum::<usize>()
}

fn write_lc<F: FieldLike, W: Write>(
    lc: &LinearCombination<F>,
    mut writer: W,
    compress: Compress,
) -> Result<(), SerializationError> {
    write_len(lc.terms.len(), &mut writer, compress)?;
    for term in &lc.terms {
        term.coefficient.serialize_with_mode(&mut writer, compress)?;
        write_len(term.variable.index(), &mut writer, compress)?;
    }
    Ok(())
}

fn read_lc<F: FieldLike, R: Read>(
    mut reader: R,
    compress: Compress,
    validate: Validate,
) -> Result<LinearCombination<F>, SerializationError> {
    let len = read_len(&mut reader, compress, validate)?;
    let mut terms = Vec::new();
    for _ in 0..len {
        let coefficient = F::deserialize_with_mode(&mut reader, compress, validate)?;
        let index = read_len(&mut reader, compress, validate)?;
        terms.push((coefficient, Variable::new(index)));
    }
    Ok(LinearCombination::from_terms(terms))
}

impl<F: FieldLike> CanonicalSerialize for ConstraintSystem<F> {
    fn serialize_with_mode<W: Write>(&self, mut writer: W, compress: Compress) -> Result<(), SerializationError> {
        write_len(self.primary_input_size, &mut writer, compress)?;
        write_len(self.auxiliary_input_size, &mut writer, compress)?;
        write_len(self.constraints.len(), &mut writer, compress)?;
        for constraint in &self.constraints {
            for (_, lc) in constraint.sides() {
                write_lc(lc, &mut writer, compress)?;
            }
        }
        Ok(())
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        24 + self
            .constraints
            .iter()
            .flat_map(|c| c.sides())
            .map(|(_, lc)| lc_size(lc, compress))
            .sum::<usize>()
    }
}

impl<F: FieldLike> Valid for ConstraintSystem<F> {
    fn check(&self) -> Result<(), SerializationError> {
        self.validate().map_err(|_| SerializationError::InvalidData)
    }
}

impl<F: FieldLike> CanonicalDeserialize for ConstraintSystem<F> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let primary_input_size = read_len(&mut reader, compress, validate)?;
        let auxiliary_input_size = read_len(&mut reader, compress, validate)?;
        let num_constraints = read_len(&mut reader, compress, validate)?;

        let mut constraints = Vec::new();
        for _ in 0..num_constraints {
            let a = read_lc(&mut reader, compress, validate)?;
            let b = read_lc(&mut reader, compress, validate)?;
            let c = read_lc(&mut reader, compress, validate)?;
            constraints.push(Constraint::new(a, b, c));
        }

        let cs = Self {
            constraints,
            primary_input_size,
            auxiliary_input_size,
        };
        if let Validate::Yes = validate {
            cs.check()?;
        }
        Ok(cs)
    }
}
