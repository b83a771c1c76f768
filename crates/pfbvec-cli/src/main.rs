//! pfbvec CLI - cached deterministic test vector generation
//!
//! This binary provides commands for generating vector sets through the
//! staged toolchain pipeline and for maintaining the parameter-keyed
//! cache that stores them.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// Use modules from the library crate
use pfbvec_cli::commands;

/// pfbvec - Deterministic PFB test vector pipeline
#[derive(Parser)]
#[command(name = "pfbvec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a vector set through the three-stage pipeline
    Generate {
        /// Cache base directory
        #[arg(long, default_value = "./cache")]
        base_dir: PathBuf,

        /// Parameter domain (time, freq)
        #[arg(short, long)]
        domain: String,

        /// Ordered domain parameter values (comma-separated)
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
        params: Vec<f64>,

        /// Vector length in samples
        #[arg(long, default_value = "1000")]
        n_bins: usize,

        /// Polarization count
        #[arg(long, default_value = "2")]
        n_pol: u32,

        /// Sample dtype (f32, f64, c64, c128)
        #[arg(long, default_value = "c64")]
        dtype: String,

        /// Channelizer output channels
        #[arg(long, default_value = "8")]
        channels: u32,

        /// Channelizer oversampling factor (num/den)
        #[arg(long, default_value = "8/7")]
        os_factor: String,

        /// FIR filter coefficient file for the channelizer
        #[arg(long)]
        fir: PathBuf,

        /// Inverse transform FFT length
        #[arg(long, default_value = "1024")]
        fft_length: usize,

        /// Backend override (matlab, python; default from config)
        #[arg(short, long)]
        backend: Option<String>,

        /// Path to a pipeline config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output the metadata record as JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Manage the vector cache
    Cache {
        /// Cache base directory
        #[arg(long, default_value = "./cache")]
        base_dir: PathBuf,

        #[command(subcommand)]
        command: CacheCommands,
    },

    /// Check the external toolchain and configuration
    Doctor {
        /// Path to a pipeline config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Cache base directory
        #[arg(long, default_value = "./cache")]
        base_dir: PathBuf,
    },
}

#[derive(Subcommand)]
enum CacheCommands {
    /// Clear all cache entries
    Clear,
    /// Show cache information (entry count, total size)
    Info,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            base_dir,
            domain,
            params,
            n_bins,
            n_pol,
            dtype,
            channels,
            os_factor,
            fir,
            fft_length,
            backend,
            config,
            json,
        } => commands::generate::run(
            &base_dir,
            &domain,
            &params,
            n_bins,
            n_pol,
            &dtype,
            channels,
            &os_factor,
            &fir,
            fft_length,
            backend.as_deref(),
            config.as_deref(),
            json,
        ),
        Commands::Cache { base_dir, command } => match command {
            CacheCommands::Clear => commands::cache::clear(&base_dir),
            CacheCommands::Info => commands::cache::info(&base_dir),
        },
        Commands::Doctor { config, base_dir } => {
            commands::doctor::run(config.as_deref(), &base_dir)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "pfbvec",
            "generate",
            "--domain",
            "freq",
            "--params",
            "0.1,0.0,0.0",
            "--fir",
            "fir.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                domain,
                params,
                n_bins,
                n_pol,
                dtype,
                channels,
                os_factor,
                fft_length,
                backend,
                json,
                ..
            } => {
                assert_eq!(domain, "freq");
                assert_eq!(params, vec![0.1, 0.0, 0.0]);
                assert_eq!(n_bins, 1000);
                assert_eq!(n_pol, 2);
                assert_eq!(dtype, "c64");
                assert_eq!(channels, 8);
                assert_eq!(os_factor, "8/7");
                assert_eq!(fft_length, 1024);
                assert_eq!(backend, None);
                assert!(!json);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_parses_negative_params() {
        let cli = Cli::try_parse_from([
            "pfbvec",
            "generate",
            "--domain",
            "freq",
            "--params",
            "0.1,-0.5,1.0",
            "--fir",
            "fir.json",
            "--backend",
            "python",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                params, backend, ..
            } => {
                assert_eq!(params, vec![0.1, -0.5, 1.0]);
                assert_eq!(backend.as_deref(), Some("python"));
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_requires_domain_and_fir() {
        let err = Cli::try_parse_from(["pfbvec", "generate", "--params", "0.1"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("--domain"));

        let err = Cli::try_parse_from(["pfbvec", "generate", "--domain", "time"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("--fir"));
    }

    #[test]
    fn test_cli_parses_cache_subcommands() {
        let cli = Cli::try_parse_from(["pfbvec", "cache", "info"]).unwrap();
        match cli.command {
            Commands::Cache { base_dir, command } => {
                assert_eq!(base_dir, PathBuf::from("./cache"));
                assert!(matches!(command, CacheCommands::Info));
            }
            _ => panic!("expected cache command"),
        }

        let cli =
            Cli::try_parse_from(["pfbvec", "cache", "--base-dir", "/tmp/vectors", "clear"])
                .unwrap();
        match cli.command {
            Commands::Cache { base_dir, command } => {
                assert_eq!(base_dir, PathBuf::from("/tmp/vectors"));
                assert!(matches!(command, CacheCommands::Clear));
            }
            _ => panic!("expected cache command"),
        }
    }

    #[test]
    fn test_cli_parses_doctor() {
        let cli = Cli::try_parse_from(["pfbvec", "doctor"]).unwrap();
        match cli.command {
            Commands::Doctor { config, base_dir } => {
                assert_eq!(config, None);
                assert_eq!(base_dir, PathBuf::from("./cache"));
            }
            _ => panic!("expected doctor command"),
        }
    }
}
