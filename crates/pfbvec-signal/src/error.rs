//! Error types for signal generation and the dump container.

use thiserror::Error;

/// Errors from the native generators and the dump file format.
#[derive(Debug, Error)]
pub enum SignalError {
    /// Paired argument lists of unequal length.
    #[error("'{left_name}' has {left} value(s) but '{right_name}' has {right}")]
    ArgumentLengthMismatch {
        /// Name of the first list.
        left_name: &'static str,
        /// Length of the first list.
        left: usize,
        /// Name of the second list.
        right_name: &'static str,
        /// Length of the second list.
        right: usize,
    },

    /// A generator asked to produce samples it cannot represent.
    #[error("{handler} cannot produce '{dtype}' samples")]
    DtypeMismatch {
        /// Generator name.
        handler: &'static str,
        /// Requested dtype tag.
        dtype: String,
    },

    /// Header shorter than the fixed header size.
    #[error("dump header truncated: got {0} byte(s)")]
    TruncatedHeader(usize),

    /// A required header key is absent.
    #[error("dump header missing key '{0}'")]
    MissingHeaderKey(&'static str),

    /// A header value failed to parse.
    #[error("dump header key '{key}' has invalid value '{value}'")]
    InvalidHeaderValue {
        /// Header key.
        key: &'static str,
        /// Raw value text.
        value: String,
    },

    /// Payload length inconsistent with the header's geometry.
    #[error("dump payload is {got} byte(s), header implies {expected}")]
    PayloadSizeMismatch {
        /// Bytes the header geometry implies.
        expected: usize,
        /// Bytes actually present.
        got: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SignalError {
    /// Creates an argument-length mismatch error.
    pub fn length_mismatch(
        left_name: &'static str,
        left: usize,
        right_name: &'static str,
        right: usize,
    ) -> Self {
        Self::ArgumentLengthMismatch {
            left_name,
            left,
            right_name,
            right,
        }
    }
}
