//! # Kernel Errors
//!
//! Error types for shell and lithophane generation.
//!
//! ## Error Policy
//!
//! - Out-of-range parameters fail fast, nothing is generated
//! - Degenerate radii are clamped silently and never surface here
//! - Every user-facing variant names the parameter that caused it

use thiserror::Error;

/// Errors that can occur during mesh generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    /// A numeric field is outside its accepted range.
    #[error("Invalid parameter `{parameter}`: {message}")]
    InvalidParameter {
        parameter: &'static str,
        message: String,
    },

    /// A sampled coordinate is outside its domain (e.g. height fraction).
    #[error("Value {value} for `{parameter}` is outside [0, 1]")]
    OutOfRange { parameter: &'static str, value: f64 },

    /// The requested pattern cannot be combined with a feature.
    #[error("Pattern `{pattern}` cannot be combined with {feature}")]
    UnsupportedFamilyCombination {
        pattern: &'static str,
        feature: &'static str,
    },

    /// Index/vertex inconsistency after merging sub-meshes.
    #[error("Mesh assembly failed: {message}")]
    MeshAssembly { message: String },
}

impl KernelError {
    /// Creates an invalid parameter error.
    pub fn invalid(parameter: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            message: message.into(),
        }
    }

    /// Creates an unsupported combination error.
    pub fn unsupported(pattern: &'static str, feature: &'static str) -> Self {
        Self::UnsupportedFamilyCombination { pattern, feature }
    }

    /// Creates a mesh assembly error.
    pub fn assembly(message: impl Into<String>) -> Self {
        Self::MeshAssembly {
            message: message.into(),
        }
    }

    /// Returns the name of the parameter responsible for the failure.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            Self::InvalidParameter { parameter, .. } | Self::OutOfRange { parameter, .. } => {
                Some(parameter)
            }
            Self::UnsupportedFamilyCombination { feature, .. } => Some(feature),
            Self::MeshAssembly { .. } => None,
        }
    }
}

/// Result type alias for kernel operations.
pub type KernelResult<T> = Result<T, KernelError>;
