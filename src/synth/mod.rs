//! Builds the abstract description of the data-holder and contract types of a
//! table.
//!
//! [`DataHolderShape::decide`] picks the constructor layout from the column
//! count; the members of every layout are produced by the pure functions in
//! [`members`], fed with the [`TablePlan`] of the table.

mod contract;
pub mod members;
mod plan;
mod pojo;

pub use contract::synthesize_contract;
pub use plan::{ColumnPlan, TablePlan, qualified_column_name};
pub use pojo::synthesize_data_holder;

use crate::error::{ARITY_CEILING, GenError, GenResult};
use crate::options::GenerationOptions;

/// Columns per `copyN` function of an oversized data holder.
pub const COPY_CHUNK_SIZE: usize = 200;

/// Destructuring components are generated up to this many columns.
pub const MAX_COMPONENTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Too many columns for one parameter per column.
    Oversized,
    Compact,
}

impl Shape {
    pub fn of(column_count: usize) -> Self {
        if column_count > ARITY_CEILING {
            Shape::Oversized
        } else {
            Shape::Compact
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataHolderShape {
    pub shape: Shape,
    pub immutable: bool,
    /// Language-level data class; only ever set for compact, non-empty tables.
    pub data: bool,
}

impl DataHolderShape {
    /// Fails when an immutable oversized holder has no contract type to be
    /// constructed from.
    pub fn decide(table: &str, column_count: usize, options: &GenerationOptions) -> GenResult<Self> {
        let shape = Shape::of(column_count);
        let immutable = options.emit_immutable_data_holders;
        if shape == Shape::Oversized && immutable && !options.emit_contract_types {
            return Err(GenError::OversizedWithoutContract {
                table: table.to_string(),
                columns: column_count,
            });
        }

        Ok(Self {
            shape,
            immutable,
            data: options.emit_data_shape && shape == Shape::Compact && column_count > 0,
        })
    }

    /// Classic shape: members the language would otherwise derive are written
    /// out by hand.
    pub fn is_classic(&self) -> bool {
        !self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceiling_is_inclusive_for_compact() {
        assert_eq!(Shape::of(ARITY_CEILING), Shape::Compact);
        assert_eq!(Shape::of(ARITY_CEILING + 1), Shape::Oversized);
    }

    #[test]
    fn immutable_oversized_needs_a_contract() {
        let mut options = GenerationOptions::default();
        options.emit_immutable_data_holders = true;

        let err = DataHolderShape::decide("wide", 260, &options).unwrap_err();
        assert!(err.is_configuration_error());
        assert!(matches!(err, GenError::OversizedWithoutContract { columns: 260, .. }));

        options.emit_contract_types = true;
        let shape = DataHolderShape::decide("wide", 260, &options).unwrap();
        assert_eq!(shape.shape, Shape::Oversized);
    }

    #[test]
    fn data_shape_only_for_compact_tables() {
        let mut options = GenerationOptions::default();
        options.emit_data_shape = true;

        assert!(DataHolderShape::decide("t", 3, &options).unwrap().data);
        let wide = DataHolderShape::decide("t", 300, &options).unwrap();
        assert!(!wide.data);
        assert!(wide.is_classic());
    }
}
