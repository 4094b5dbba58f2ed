use thiserror::Error;

use crate::crypto::{MAX_COST, MIN_COST};

/// Errors returned by hashing and verification.
#[derive(Debug, Error)]
pub enum PwdHashError {
    #[error(
        "cost {0} is outside the valid range of iterations [{min}, {max}]",
        min = MIN_COST,
        max = MAX_COST
    )]
    InvalidCost(u32),

    #[error("key length {0} must be a positive number of bytes")]
    InvalidKeyLength(usize),

    #[error("hash function '{0}' is not supported")]
    InvalidHashFunction(String),

    #[error("hashed password is not of the expected format: {0}")]
    InvalidHashFormat(#[from] FormatError),

    #[error("hashed password does not match the given password")]
    MismatchedHashAndPassword,

    #[error("OS random generator unavailable: {0}")]
    Random(getrandom::Error),
}

impl PwdHashError {
    /// True when a well-formed token simply did not match the password.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::MismatchedHashAndPassword)
    }

    /// True when the stored token itself is corrupt.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::InvalidHashFormat(_))
    }
}

/// Which structural check a token failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("invalid format: wrong field count")]
    FieldCount,

    #[error("invalid cost encoding")]
    CostEncoding,

    #[error("invalid salt encoding")]
    SaltEncoding,

    #[error("invalid digest encoding")]
    DigestEncoding,
}

pub type Result<T> = std::result::Result<T, PwdHashError>;
