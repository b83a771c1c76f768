//! Pipeline error types.
//!
//! Every failure here is fatal to the run that raised it: nothing is
//! retried, nothing is downgraded to a warning. Partially generated
//! artifacts stay on disk uncommitted.

use std::path::PathBuf;

use thiserror::Error;

use pfbvec_spec::ParamError;
use pfbvec_signal::SignalError;

/// Errors raised by the cache, the invoker, and the sequencer.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A cache entry directory exists but its metadata is unusable.
    #[error("cache entry '{path}' is corrupt: {reason}")]
    CacheCorruption {
        /// Entry directory.
        path: PathBuf,
        /// What made the entry unusable.
        reason: String,
    },

    /// An external tool exited non-zero.
    #[error("external tool '{tool}' failed with exit code {code} (see {log})")]
    ExternalToolFailure {
        /// Tool name.
        tool: String,
        /// Exit code, -1 if terminated by signal.
        code: i32,
        /// Log file that captured the tool's output.
        log: String,
    },

    /// A stage was requested that the selected backend cannot run.
    #[error("backend '{backend}' does not support {operation}")]
    UnsupportedCapability {
        /// Backend tag.
        backend: &'static str,
        /// Operation the caller asked for.
        operation: &'static str,
    },

    /// Stage arguments supplied out of order.
    #[error("pipeline in state '{state}' cannot accept {payload} arguments")]
    SequencingViolation {
        /// State the producer was in.
        state: &'static str,
        /// Tag of the rejected payload.
        payload: &'static str,
    },

    /// Writing the metadata record failed after all stages succeeded.
    #[error("failed to persist metadata to '{path}': {source}")]
    PersistenceFailure {
        /// Metadata file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An executable was found in neither the build dir nor on PATH.
    #[error("tool '{0}' not found in build directory or on PATH")]
    ToolNotFound(String),

    /// Configuration file unreadable or undecodable.
    #[error("failed to load config '{path}': {reason}")]
    Config {
        /// Config file path.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// Invalid vector identity inputs.
    #[error(transparent)]
    Param(#[from] ParamError),

    /// Native generation or dump container error.
    #[error(transparent)]
    Signal(#[from] SignalError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Creates a cache corruption error.
    pub fn corruption(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::CacheCorruption {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
