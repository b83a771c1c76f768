//! pfbvec core vocabulary.
//!
//! This crate provides the shared types that identify a synthetic test
//! vector: the signal domain and its ordered parameter schema, the
//! precision-bounded cache key, the sample dtype and backend tags, the
//! canonical artifact naming scheme, and the metadata record persisted
//! alongside each cached entry.
//!
//! # Overview
//!
//! A test vector is identified by a [`Domain`] (time or frequency) and a
//! [`ParameterSet`] holding the domain's parameters in a fixed canonical
//! order. Formatting the parameters at three decimal places yields the
//! [cache key](ParameterSet::cache_key) under which all artifacts for
//! that vector live; two parameter sets that format identically name the
//! same cached artifact.
//!
//! # Example
//!
//! ```
//! use pfbvec_spec::{Domain, ParameterSet};
//!
//! let params = ParameterSet::from_ordered(Domain::Freq, &[0.1, 0.0, 0.0]).unwrap();
//! assert_eq!(params.cache_key().as_str(), "f-0.100_b-0.000_p-0.000");
//! ```
//!
//! # Modules
//!
//! - [`backend`]: Generation backend tags
//! - [`domain`]: Signal domains, parameter sets, and cache keys
//! - [`dtype`]: Sample dtype enumeration
//! - [`error`]: Parameter and parse errors
//! - [`meta`]: The per-entry metadata record
//! - [`naming`]: Canonical artifact naming

pub mod backend;
pub mod domain;
pub mod dtype;
pub mod error;
pub mod meta;
pub mod naming;

pub use backend::Backend;
pub use domain::{CacheKey, Domain, ParameterSet};
pub use dtype::Dtype;
pub use error::ParamError;
pub use meta::{Metadata, META_FILE_NAME};
pub use naming::{
    canonical_basename, channelize_basename, dump_name, log_name, output_file_names,
    synthesize_basename, OutputNames,
};
