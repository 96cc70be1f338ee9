use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid value {value:?} for {field}")]
    InvalidCategory { field: &'static str, value: String },

    #[error("invalid number {value} for {field}: {reason}")]
    InvalidNumber {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// A collaborator handed back a vector that does not have the feature layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected {expected} feature slots, got {found}")]
pub struct ShapeError {
    pub expected: usize,
    pub found: usize,
}
