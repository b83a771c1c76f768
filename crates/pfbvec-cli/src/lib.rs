//! pfbvec CLI library.
//!
//! This crate provides the core functionality for the pfbvec CLI:
//! the parameter-keyed vector cache, the external toolchain invoker,
//! the staged pipeline sequencer, and the command implementations.

pub mod cache;
pub mod commands;
pub mod config;
pub mod error;
pub mod invoker;
pub mod sequencer;

pub use cache::{CacheInfo, VectorCache};
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use invoker::ToolInvoker;
pub use sequencer::{OsFactor, PipelineState, StageArgs, VectorProducer};
