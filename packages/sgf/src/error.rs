//! Error types for the record store

use crate::{PropertyType, ValueType};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SgfError {
    #[error("Property {property:?} holds {expected:?} values, got {found:?}")]
    ValueMismatch {
        property: PropertyType,
        expected: ValueType,
        found: ValueType,
    },

    #[error("Unknown property identifier: {0}")]
    UnknownIdentifier(String),
}
