//! Staged pipeline sequencing.
//!
//! A `VectorProducer` owns one cache entry and walks it through the
//! three stages in fixed order. Construction performs the cache lookup;
//! each `advance` call consumes the argument payload for exactly one
//! stage. An out-of-order payload or a stage error parks the producer
//! in `Failed` permanently; partial artifacts stay on disk uncommitted.

use std::fmt;
use std::mem;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::info;

use pfbvec_signal::{complex_sinusoid, time_domain_impulse, DumpFile};
use pfbvec_spec::naming::join_args;
use pfbvec_spec::{
    canonical_basename, channelize_basename, output_file_names, synthesize_basename, Backend,
    Domain, Dtype, Metadata, ParameterSet,
};

use crate::cache::VectorCache;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::invoker::{ToolInvoker, CHANNELIZE_TOOL, GENERATE_TOOL, SYNTHESIZE_TOOL};

/// Observable lifecycle of a producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Pre-lookup state; resolved during construction.
    Init,
    /// Waiting for stage-1 arguments.
    AwaitGenerateArgs,
    /// Waiting for stage-2 arguments.
    AwaitChannelizeArgs,
    /// Waiting for stage-3 arguments.
    AwaitSynthesizeArgs,
    /// All stages complete, metadata committed.
    Done,
    /// A stage failed or a payload arrived out of order.
    Failed,
}

impl PipelineState {
    /// State name used in errors and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::AwaitGenerateArgs => "await_generate_args",
            Self::AwaitChannelizeArgs => "await_channelize_args",
            Self::AwaitSynthesizeArgs => "await_synthesize_args",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Oversampling factor of the channelizer, written `num/den`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OsFactor {
    /// Numerator, e.g. 8 in `8/7`.
    pub numerator: u32,
    /// Denominator, e.g. 7 in `8/7`.
    pub denominator: u32,
}

impl fmt::Display for OsFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for OsFactor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (num, den) = s
            .split_once('/')
            .ok_or_else(|| format!("invalid oversampling factor '{s}', expected 'num/den'"))?;
        let numerator: u32 = num
            .parse()
            .map_err(|_| format!("invalid oversampling numerator '{num}'"))?;
        let denominator: u32 = den
            .parse()
            .map_err(|_| format!("invalid oversampling denominator '{den}'"))?;
        if numerator == 0 || denominator == 0 {
            return Err(format!("oversampling factor '{s}' must be positive"));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }
}

/// Argument payload for exactly one pipeline stage.
#[derive(Debug, Clone, PartialEq)]
pub enum StageArgs {
    /// Stage-1 arguments.
    Generate {
        /// Vector length in samples.
        n_bins: usize,
        /// Polarization count replicated into the output.
        n_pol: u32,
        /// Sample dtype of the generated vector.
        dtype: Dtype,
    },
    /// Stage-2 arguments.
    Channelize {
        /// Number of output channels.
        channels: u32,
        /// Oversampling factor.
        os_factor: OsFactor,
        /// FIR filter coefficient file.
        fir_path: PathBuf,
    },
    /// Stage-3 arguments.
    Synthesize {
        /// Inverse transform FFT length.
        fft_length: usize,
    },
}

impl StageArgs {
    /// Payload tag used in sequencing errors.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Generate { .. } => "generate",
            Self::Channelize { .. } => "channelize",
            Self::Synthesize { .. } => "synthesize",
        }
    }
}

/// Internal stage, carrying the outputs accumulated so far.
enum Stage {
    AwaitGenerate,
    AwaitChannelize {
        input_file: String,
    },
    AwaitSynthesize {
        input_file: String,
        channelized_file: String,
    },
    Done,
    Failed,
}

impl Stage {
    fn public(&self) -> PipelineState {
        match self {
            Self::AwaitGenerate => PipelineState::AwaitGenerateArgs,
            Self::AwaitChannelize { .. } => PipelineState::AwaitChannelizeArgs,
            Self::AwaitSynthesize { .. } => PipelineState::AwaitSynthesizeArgs,
            Self::Done => PipelineState::Done,
            Self::Failed => PipelineState::Failed,
        }
    }
}

/// Drives one (domain, params) cache entry through the three stages.
pub struct VectorProducer {
    cache: VectorCache,
    params: ParameterSet,
    backend: Backend,
    config: PipelineConfig,
    invoker: ToolInvoker,
    entry_dir: PathBuf,
    stage: Stage,
    meta: Option<Metadata>,
}

impl VectorProducer {
    /// Create a producer, resolving the cache lookup immediately.
    ///
    /// On a hit the producer is born `Done` with the committed metadata
    /// loaded. On a miss the entry directory is created and the producer
    /// parks in `AwaitGenerateArgs`.
    pub fn new(
        cache: VectorCache,
        params: ParameterSet,
        backend: Backend,
        config: PipelineConfig,
    ) -> Result<Self, PipelineError> {
        let invoker = ToolInvoker::new(&config.build_dir);
        let entry_dir = cache.entry_dir(&params);

        let (stage, meta) = match cache.lookup(&params)? {
            Some(meta) => {
                info!(entry = %entry_dir.display(), "cache hit");
                (Stage::Done, Some(meta))
            }
            None => {
                std::fs::create_dir_all(&entry_dir)?;
                info!(entry = %entry_dir.display(), "cache miss, entry created");
                (Stage::AwaitGenerate, None)
            }
        };

        Ok(Self {
            cache,
            params,
            backend,
            config,
            invoker,
            entry_dir,
            stage,
            meta,
        })
    }

    /// Current observable state.
    pub fn state(&self) -> PipelineState {
        self.stage.public()
    }

    /// The committed metadata, available once the producer is `Done`.
    pub fn meta(&self) -> Option<&Metadata> {
        self.meta.as_ref()
    }

    /// Directory the producer writes its artifacts into.
    pub fn entry_dir(&self) -> &Path {
        &self.entry_dir
    }

    /// Parameter set this producer serves.
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Feed the argument payload for the next stage.
    ///
    /// Exactly one payload tag is accepted per state; anything else is a
    /// `SequencingViolation`, including any payload once the producer is
    /// `Done` or `Failed`.
    pub fn advance(&mut self, args: StageArgs) -> Result<(), PipelineError> {
        let stage = mem::replace(&mut self.stage, Stage::Failed);
        match (stage, args) {
            (
                Stage::AwaitGenerate,
                StageArgs::Generate {
                    n_bins,
                    n_pol,
                    dtype,
                },
            ) => {
                let input_file = self.run_generate(n_bins, n_pol, dtype)?;
                self.stage = Stage::AwaitChannelize { input_file };
                Ok(())
            }
            (
                Stage::AwaitChannelize { input_file },
                StageArgs::Channelize {
                    channels,
                    os_factor,
                    fir_path,
                },
            ) => {
                let channelized_file =
                    self.run_channelize(&input_file, channels, os_factor, &fir_path)?;
                self.stage = Stage::AwaitSynthesize {
                    input_file,
                    channelized_file,
                };
                Ok(())
            }
            (
                Stage::AwaitSynthesize {
                    input_file,
                    channelized_file,
                },
                StageArgs::Synthesize { fft_length },
            ) => {
                let inverted_file = self.run_synthesize(&channelized_file, fft_length)?;
                let meta = Metadata::new(&self.params, input_file, channelized_file, inverted_file);
                self.cache.commit(&self.params, &meta)?;
                self.meta = Some(meta);
                self.stage = Stage::Done;
                Ok(())
            }
            (stage, args) => Err(PipelineError::SequencingViolation {
                state: stage.public().as_str(),
                payload: args.tag(),
            }),
        }
    }

    fn run_generate(
        &mut self,
        n_bins: usize,
        n_pol: u32,
        dtype: Dtype,
    ) -> Result<String, PipelineError> {
        let handler = self.params.domain().handler_name();
        let base = canonical_basename(
            handler,
            n_bins,
            self.params.values(),
            n_pol,
            dtype,
            self.backend,
        );
        let names = output_file_names(None, &base);
        let values = self.params.values();

        match self.backend {
            Backend::Python => {
                let signal = match self.params.domain() {
                    Domain::Time => {
                        time_domain_impulse(n_bins, &[values[0]], &[values[1]], dtype)?
                    }
                    Domain::Freq => {
                        complex_sinusoid(n_bins, &[values[0]], &[values[1]], values[2], dtype)?
                    }
                };
                DumpFile::write(&self.entry_dir.join(&names.data_file), &signal, n_pol)?;
            }
            Backend::Matlab => {
                let args = vec![
                    handler.to_string(),
                    n_bins.to_string(),
                    join_args(values, ","),
                    dtype.tag().to_string(),
                    n_pol.to_string(),
                    self.config.header_template.display().to_string(),
                    names.data_file.clone(),
                    self.entry_dir.display().to_string(),
                    "1".to_string(),
                ];
                self.invoker.run(
                    GENERATE_TOOL,
                    &args,
                    &self.entry_dir.join(&names.log_file),
                )?;
            }
        }
        Ok(names.data_file)
    }

    fn run_channelize(
        &mut self,
        input_file: &str,
        channels: u32,
        os_factor: OsFactor,
        fir_path: &Path,
    ) -> Result<String, PipelineError> {
        if !self.backend.supports_transforms() {
            return Err(PipelineError::UnsupportedCapability {
                backend: self.backend.as_str(),
                operation: "channelize",
            });
        }

        let base = channelize_basename(channels, os_factor.numerator, os_factor.denominator);
        let names = output_file_names(None, &base);

        let args = vec![
            self.entry_dir.join(input_file).display().to_string(),
            channels.to_string(),
            os_factor.to_string(),
            fir_path.display().to_string(),
            names.data_file.clone(),
            self.entry_dir.display().to_string(),
            "1".to_string(),
        ];
        self.invoker.run(
            CHANNELIZE_TOOL,
            &args,
            &self.entry_dir.join(&names.log_file),
        )?;
        Ok(names.data_file)
    }

    fn run_synthesize(
        &mut self,
        channelized_file: &str,
        fft_length: usize,
    ) -> Result<String, PipelineError> {
        if !self.backend.supports_transforms() {
            return Err(PipelineError::UnsupportedCapability {
                backend: self.backend.as_str(),
                operation: "synthesize",
            });
        }

        let base = synthesize_basename(fft_length);
        let names = output_file_names(None, &base);

        let args = vec![
            self.entry_dir.join(channelized_file).display().to_string(),
            fft_length.to_string(),
            names.data_file.clone(),
            self.entry_dir.display().to_string(),
            "1".to_string(),
        ];
        self.invoker.run(
            SYNTHESIZE_TOOL,
            &args,
            &self.entry_dir.join(&names.log_file),
        )?;
        Ok(names.data_file)
    }
}
