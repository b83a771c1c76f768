//! The per-entry metadata record.
//!
//! One `meta.json` lives at the root of each cache entry directory. It
//! records the generation parameters (flattened at the top level, one
//! key per parameter name) and the basenames of the three stage outputs.
//! The record is written once, after all stages have succeeded; a cache
//! hit loads it read-only.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::ParameterSet;

/// File name of the metadata record inside a cache entry directory.
pub const META_FILE_NAME: &str = "meta.json";

/// Metadata persisted for one fully generated vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Generation parameters, keyed by parameter name.
    #[serde(flatten)]
    pub params: BTreeMap<String, f64>,

    /// Basename of the stage-1 (generated) data file.
    pub input_file: String,

    /// Basename of the stage-2 (channelized) data file.
    pub channelized_file: String,

    /// Basename of the stage-3 (inverted) data file.
    pub inverted_file: String,
}

impl Metadata {
    /// Assembles the record from a parameter set and the three stage
    /// output basenames.
    pub fn new(
        params: &ParameterSet,
        input_file: impl Into<String>,
        channelized_file: impl Into<String>,
        inverted_file: impl Into<String>,
    ) -> Self {
        Self {
            params: params
                .named()
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            input_file: input_file.into(),
            channelized_file: channelized_file.into(),
            inverted_file: inverted_file.into(),
        }
    }
}
