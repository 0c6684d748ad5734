//! Error types for field construction.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("grid of {width}x{height} has no cells")]
    EmptyGrid { width: usize, height: usize },

    #[error("field shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

pub type Result<T> = std::result::Result<T, FieldError>;
