//! External toolchain invocation.
//!
//! Stage 1 under the Matlab backend and stages 2 and 3 always run as
//! external executables. Each invocation captures combined stdout and
//! stderr into a log file next to the data it produces, waits for exit
//! without a deadline, and treats any non-zero exit as fatal.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::PipelineError;

/// Stage-1 generator executable name.
pub const GENERATE_TOOL: &str = "generate_test_vector";

/// Stage-2 channelizer executable name.
pub const CHANNELIZE_TOOL: &str = "channelize";

/// Stage-3 synthesizer executable name.
pub const SYNTHESIZE_TOOL: &str = "synthesize";

/// Locates and runs the external toolchain executables.
#[derive(Debug, Clone)]
pub struct ToolInvoker {
    build_dir: PathBuf,
}

impl ToolInvoker {
    /// Create an invoker that searches `build_dir` before `PATH`.
    pub fn new(build_dir: impl Into<PathBuf>) -> Self {
        Self {
            build_dir: build_dir.into(),
        }
    }

    /// Resolve a tool name to an executable path.
    ///
    /// The build directory wins over `PATH` so a local toolchain build
    /// shadows an installed one.
    pub fn find_tool(&self, name: &str) -> Result<PathBuf, PipelineError> {
        let candidate = self.build_dir.join(name);
        if candidate.is_file() {
            return Ok(candidate);
        }
        which::which(name).map_err(|_| PipelineError::ToolNotFound(name.to_string()))
    }

    /// Run a tool to completion, logging its combined output to
    /// `log_path`.
    pub fn run(&self, name: &str, args: &[String], log_path: &Path) -> Result<(), PipelineError> {
        let tool = self.find_tool(name)?;

        debug!(
            tool = %tool.display(),
            args = %args.join(" "),
            log = %log_path.display(),
            "invoking external tool"
        );

        let log = File::create(log_path)?;
        let status = Command::new(&tool)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log.try_clone()?))
            .stderr(Stdio::from(log))
            .status()?;

        if !status.success() {
            return Err(PipelineError::ExternalToolFailure {
                tool: name.to_string(),
                code: status.code().unwrap_or(-1),
                log: log_path.display().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_tool_is_reported_by_name() {
        let dir = TempDir::new().unwrap();
        let invoker = ToolInvoker::new(dir.path());

        let err = invoker
            .find_tool("no_such_tool_pfbvec_test")
            .unwrap_err();
        assert!(matches!(err, PipelineError::ToolNotFound(name) if name == "no_such_tool_pfbvec_test"));
    }

    #[test]
    fn build_dir_shadows_path() {
        let dir = TempDir::new().unwrap();
        let local = dir.path().join("generate_test_vector");
        std::fs::write(&local, b"").unwrap();

        let invoker = ToolInvoker::new(dir.path());
        assert_eq!(invoker.find_tool(GENERATE_TOOL).unwrap(), local);
    }

    #[cfg(unix)]
    #[test]
    fn failing_tool_surfaces_exit_code_and_log() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let tool = dir.path().join("channelize");
        std::fs::write(&tool, "#!/bin/sh\necho broken\nexit 3\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        let invoker = ToolInvoker::new(dir.path());
        let log_path = dir.path().join("channelize.log");
        let err = invoker
            .run(CHANNELIZE_TOOL, &[], &log_path)
            .unwrap_err();

        match err {
            PipelineError::ExternalToolFailure { tool, code, .. } => {
                assert_eq!(tool, "channelize");
                assert_eq!(code, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            std::fs::read_to_string(&log_path).unwrap().trim(),
            "broken"
        );
    }

    #[cfg(unix)]
    #[test]
    fn successful_tool_leaves_its_log_behind() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let tool = dir.path().join("synthesize");
        std::fs::write(&tool, "#!/bin/sh\necho \"args: $@\"\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        let invoker = ToolInvoker::new(dir.path());
        let log_path = dir.path().join("synthesize.log");
        invoker
            .run(SYNTHESIZE_TOOL, &["in.dump".to_string(), "1024".to_string()], &log_path)
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(&log_path).unwrap().trim(),
            "args: in.dump 1024"
        );
    }
}
