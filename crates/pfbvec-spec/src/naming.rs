//! Canonical artifact naming.
//!
//! Every artifact a pipeline stage writes is named deterministically from
//! the values that produced it, so a basename alone identifies the vector
//! it belongs to. Stage-1 basenames follow
//! `{handler}.{n_bins}.{args}.{n_pol}.{dtype}.{backend}` with parameter
//! values at three decimals joined by `-`; the data file appends `.dump`
//! and its captured tool output appends `.log`.

use crate::backend::Backend;
use crate::domain::KEY_PRECISION;
use crate::dtype::Dtype;

/// Extension of vector data files.
pub const DUMP_EXT: &str = "dump";

/// Extension of captured tool output files.
pub const LOG_EXT: &str = "log";

/// Formats parameter values at key precision, joined by the given
/// separator.
pub fn join_args(args: &[f64], sep: &str) -> String {
    args.iter()
        .map(|a| format!("{:.prec$}", a, prec = KEY_PRECISION))
        .collect::<Vec<_>>()
        .join(sep)
}

/// Builds the canonical stage-1 basename.
pub fn canonical_basename(
    handler: &str,
    n_bins: usize,
    args: &[f64],
    n_pol: u32,
    dtype: Dtype,
    backend: Backend,
) -> String {
    format!(
        "{}.{}.{}.{}.{}.{}",
        handler,
        n_bins,
        join_args(args, "-"),
        n_pol,
        dtype.tag(),
        backend.as_str()
    )
}

/// Builds the default stage-2 basename.
pub fn channelize_basename(channels: u32, os_num: u32, os_den: u32) -> String {
    format!("channelize.{}.{}-{}", channels, os_num, os_den)
}

/// Builds the default stage-3 basename.
pub fn synthesize_basename(fft_length: usize) -> String {
    format!("synthesize.{}", fft_length)
}

/// Appends the data-file extension to a basename.
pub fn dump_name(base: &str) -> String {
    format!("{}.{}", base, DUMP_EXT)
}

/// Appends the log-file extension to a basename.
pub fn log_name(base: &str) -> String {
    format!("{}.{}", base, LOG_EXT)
}

/// The resolved (base, log, data) file-name triple for one stage output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNames {
    /// Stem shared by the data and log files.
    pub base: String,
    /// Name of the captured tool output file.
    pub log_file: String,
    /// Name of the data file.
    pub data_file: String,
}

/// Resolves stage output file names.
///
/// An explicit data-file name wins over the canonical default; its stem
/// then also names the log file. The canonical basename still governs
/// where the entry lives in the cache, only the file names change.
pub fn output_file_names(explicit: Option<&str>, default_base: &str) -> OutputNames {
    match explicit {
        Some(name) => {
            let base = match name.rfind('.') {
                Some(idx) => &name[..idx],
                None => name,
            };
            OutputNames {
                base: base.to_string(),
                log_file: log_name(base),
                data_file: name.to_string(),
            }
        }
        None => OutputNames {
            base: default_base.to_string(),
            log_file: log_name(default_base),
            data_file: dump_name(default_base),
        },
    }
}
