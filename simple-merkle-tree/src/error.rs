use thiserror::Error;

/// Errors from converting external data into a [`crate::Hash`].
///
/// Building a tree never fails; only the digest conversion boundary does.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    /// A digest was built from a slice of the wrong length.
    #[error("invalid hash length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    /// A digest string was not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

/// Alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;
