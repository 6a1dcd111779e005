//! error types for field arithmetic

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FieldError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("cannot combine elements of {left} and {right}")]
    FieldMismatch { left: String, right: String },

    #[error("zero has no multiplicative inverse")]
    NoInverse,

    #[error("value {value} is out of range for {field}")]
    OutOfRange { value: String, field: String },

    #[error("modulus {0} is not prime")]
    NotPrime(String),
}
