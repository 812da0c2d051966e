//! Error kinds raised by the reflectance pipeline.
//!
//! Two kinds exist: [`OpticsError::InvalidInput`] for arguments outside the
//! accepted range (non-positive wavelength, angle bounds, unknown material)
//! and [`OpticsError::DomainError`] for true mathematical singularities met
//! during evaluation (zero frequency, vanishing Fresnel denominators). Neither
//! is ever retried or replaced by a default value.

use thiserror::Error;

pub type OpticsResult<T> = Result<T, OpticsError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OpticsError {
    /// An argument lies outside the range the computation accepts.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The evaluation hit a singularity for otherwise valid input.
    #[error("domain error: {0}")]
    DomainError(String),
}

impl OpticsError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn domain(msg: impl Into<String>) -> Self {
        Self::DomainError(msg.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_domain_error(&self) -> bool {
        matches!(self, Self::DomainError(_))
    }
}
