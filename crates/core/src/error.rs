//! Errors raised by value parsing and client-side domain rules.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// A deterministic failure detected before any request is made.
///
/// Per-field form problems are reported through
/// [`FieldErrors`](crate::validation::FieldErrors) instead; this type covers
/// single values (ids, roles, movement kinds) and rule violations such as
/// picking a product outside the selected warehouse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Text that does not parse as the requested value.
    #[error("invalid value: {0}")]
    Validation(String),

    #[error("not allowed: {0}")]
    InvariantViolation(String),

    /// Record ids are positive integers assigned by the API.
    #[error("invalid id: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_detail() {
        assert_eq!(
            DomainError::invalid_id("product_id: must be positive").to_string(),
            "invalid id: product_id: must be positive"
        );
        assert_eq!(DomainError::validation("x").to_string(), "invalid value: x");
    }
}
