//! Domain error types.

use fixity_core::ModelError;
use fixity_exchange::ExchangeError;
use thiserror::Error;

/// Domain errors.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A constraint could not be built.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// State could not be moved.
    #[error("exchange error: {0}")]
    Exchange(#[from] ExchangeError),

    /// No hypothesis with this name.
    #[error("hypothesis not found: {name}")]
    UnknownHypothesis { name: String },
}

impl DomainError {
    pub fn unknown_hypothesis(name: impl Into<String>) -> Self {
        Self::UnknownHypothesis { name: name.into() }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
