//! pfbvec native signal generation.
//!
//! This crate holds the in-process generation path: the closed-form
//! signal generators (impulses and superposed complex sinusoids) and the
//! dump-file container stage outputs are written to. Everything here is
//! deterministic; the same inputs always produce byte-identical files.
//!
//! # Modules
//!
//! - [`dump`]: Fixed-header dump file reader and writer
//! - [`error`]: Signal and container errors
//! - [`generators`]: Closed-form deterministic signal generators
//! - [`signal`]: Sample buffer with dtype-tagged storage

pub mod dump;
pub mod error;
pub mod generators;
pub mod signal;

pub use dump::{DumpFile, DumpHeader, HEADER_SIZE};
pub use error::SignalError;
pub use generators::{complex_sinusoid, time_domain_impulse};
pub use signal::Signal;
