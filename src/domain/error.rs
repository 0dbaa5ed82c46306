//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid inputs caught before any request is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0} must not be empty")]
    EmptyIdentifier(&'static str),

    #[error("missing credential: {0}")]
    MissingCredential(&'static str),
}
