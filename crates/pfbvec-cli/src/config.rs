//! Pipeline configuration.
//!
//! Configuration is an explicit value constructed once and threaded into
//! the cache, invoker, and sequencer; there is no process-wide state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use pfbvec_spec::Backend;

use crate::error::PipelineError;

/// Settings shared by every pipeline component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding the external toolchain executables.
    pub build_dir: PathBuf,

    /// Header template handed to the stage-1 tool.
    pub header_template: PathBuf,

    /// Backend used when the caller does not override it.
    pub backend: Backend,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from("./build"),
            header_template: PathBuf::from("./config/default_header.json"),
            backend: Backend::Matlab,
        }
    }
}

impl PipelineConfig {
    /// Loads configuration from a JSON file, or returns defaults when no
    /// path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, PipelineError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|e| PipelineError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| PipelineError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
