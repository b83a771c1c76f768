//! Full-pipeline generate command.
//!
//! Resolves the parameter identity, then either reuses the committed
//! cache entry or drives all three stages and commits the result.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;

use pfbvec_spec::{Backend, Domain, Dtype, ParameterSet};

use crate::cache::VectorCache;
use crate::config::PipelineConfig;
use crate::sequencer::{OsFactor, PipelineState, StageArgs, VectorProducer};

/// Run the generate command.
#[allow(clippy::too_many_arguments)]
pub fn run(
    base_dir: &Path,
    domain: &str,
    params: &[f64],
    n_bins: usize,
    n_pol: u32,
    dtype: &str,
    channels: u32,
    os_factor: &str,
    fir: &Path,
    fft_length: usize,
    backend: Option<&str>,
    config_path: Option<&Path>,
    json: bool,
) -> Result<ExitCode> {
    let config = PipelineConfig::load(config_path)?;
    let backend = match backend {
        Some(tag) => tag.parse::<Backend>()?,
        None => config.backend,
    };
    let domain: Domain = domain.parse()?;
    let dtype: Dtype = dtype.parse()?;
    let os_factor: OsFactor = os_factor.parse().map_err(anyhow::Error::msg)?;
    let params = ParameterSet::from_ordered(domain, params)?;

    let cache = VectorCache::new(base_dir);
    let mut producer = VectorProducer::new(cache, params, backend, config)?;

    let hit = producer.state() == PipelineState::Done;
    if hit {
        if !json {
            println!(
                "{} {}",
                "ok".green(),
                "cache hit, reusing committed vector set".dimmed()
            );
        }
    } else {
        producer.advance(StageArgs::Generate {
            n_bins,
            n_pol,
            dtype,
        })?;
        producer.advance(StageArgs::Channelize {
            channels,
            os_factor,
            fir_path: fir.to_path_buf(),
        })?;
        producer.advance(StageArgs::Synthesize { fft_length })?;
    }

    let Some(meta) = producer.meta() else {
        anyhow::bail!("pipeline finished without a metadata record");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(meta)?);
    } else {
        println!("{}", "Vector Set".cyan().bold());
        println!(
            "  {}: {}",
            "Entry".dimmed(),
            producer.entry_dir().display()
        );
        for (name, value) in producer.params().named() {
            println!("  {}: {}", name.dimmed(), value);
        }
        println!("  {}: {}", "input".dimmed(), meta.input_file);
        println!("  {}: {}", "channelized".dimmed(), meta.channelized_file);
        println!("  {}: {}", "inverted".dimmed(), meta.inverted_file);
        println!("{} Vector set ready", "SUCCESS".green().bold());
    }

    Ok(ExitCode::SUCCESS)
}
