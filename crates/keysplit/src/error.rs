//! error types for splitting and reconstruction

use keysplit_fields::FieldError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure is local and deterministic; nothing here is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("zero has no multiplicative inverse")]
    NoInverse,

    #[error("two shares at x = {x} carry different values")]
    DuplicateShare { x: String },

    #[error("not enough shares: have {have}, need {need}")]
    InsufficientShares { have: usize, need: usize },

    #[error("field mismatch: expected {expected}, found {found}")]
    FieldMismatch { expected: String, found: String },

    #[error("shares do not lie on a single polynomial")]
    InconsistentShares,

    #[error("config error: {0}")]
    Config(String),
}

impl From<FieldError> for Error {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::FieldMismatch { left, right } => Error::FieldMismatch {
                expected: left,
                found: right,
            },
            FieldError::NoInverse => Error::NoInverse,
            other @ (FieldError::OutOfRange { .. } | FieldError::NotPrime(_)) => {
                Error::InvalidParameters(other.to_string())
            }
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
