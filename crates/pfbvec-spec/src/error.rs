//! Error types for parameter handling and tag parsing.

use thiserror::Error;

/// Errors produced while building or parsing vector identity types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// Wrong number of positional parameter values for a domain.
    #[error("domain '{domain}' expects {expected} parameter(s), got {got}")]
    ArityMismatch {
        /// Domain name.
        domain: String,
        /// Number of parameters the domain's schema defines.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// A named parameter not present in the domain's schema.
    #[error("domain '{domain}' has no parameter named '{name}'")]
    UnknownParameter {
        /// Domain name.
        domain: String,
        /// Offending parameter name.
        name: String,
    },

    /// A schema parameter missing from a named mapping.
    #[error("domain '{domain}' requires parameter '{name}'")]
    MissingParameter {
        /// Domain name.
        domain: String,
        /// Missing parameter name.
        name: String,
    },

    /// Unrecognized domain tag.
    #[error("unknown domain: '{0}' (expected 'time' or 'freq')")]
    UnknownDomain(String),

    /// Unrecognized dtype tag.
    #[error("unknown dtype: '{0}' (expected f32, f64, c64, or c128)")]
    UnknownDtype(String),

    /// Unrecognized backend tag.
    #[error("unknown backend: '{0}' (expected 'matlab' or 'python')")]
    UnknownBackend(String),
}

impl ParamError {
    /// Creates an arity mismatch error.
    pub fn arity(domain: impl Into<String>, expected: usize, got: usize) -> Self {
        Self::ArityMismatch {
            domain: domain.into(),
            expected,
            got,
        }
    }

    /// Creates an unknown-parameter error.
    pub fn unknown_parameter(domain: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownParameter {
            domain: domain.into(),
            name: name.into(),
        }
    }

    /// Creates a missing-parameter error.
    pub fn missing_parameter(domain: impl Into<String>, name: impl Into<String>) -> Self {
        Self::MissingParameter {
            domain: domain.into(),
            name: name.into(),
        }
    }
}
