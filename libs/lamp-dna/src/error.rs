//! Design code errors.

use thiserror::Error;

/// Errors raised while decoding a design code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DnaError {
    #[error("Design code is empty")]
    Empty,

    /// Neither base64 alphabet accepts the code.
    #[error("Design code is not valid base64: {0}")]
    InvalidBase64(String),

    /// A packed code with the wrong byte count.
    #[error("Design code has {actual} bytes, expected {expected}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Design code version {0} is not supported")]
    UnsupportedVersion(u8),

    #[error("Design code checksum mismatch")]
    Checksum,

    /// A packed index that names no known variant.
    #[error("Design code field `{field}` has unknown value {value}")]
    InvalidField { field: &'static str, value: u32 },

    /// A legacy code whose payload is not a parameter record.
    #[error("Legacy design code is not a parameter record: {0}")]
    Legacy(String),
}

impl DnaError {
    /// Returns the offending field for field-level failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidField { field, .. } => Some(field),
            _ => None,
        }
    }
}
