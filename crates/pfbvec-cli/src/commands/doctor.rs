//! Doctor command implementation.
//!
//! Checks the external toolchain, configuration, and cache permissions.

use std::path::Path;
use std::process::{Command, ExitCode};

use anyhow::Result;
use colored::Colorize;

use crate::config::PipelineConfig;
use crate::invoker::{ToolInvoker, CHANNELIZE_TOOL, GENERATE_TOOL, SYNTHESIZE_TOOL};

/// Run the doctor command
///
/// Checks:
/// - External toolchain executables (build dir, then PATH)
/// - Header template and configuration
/// - Cache base directory permissions
///
/// # Returns
/// Exit code: 0 if all checks pass, 1 if any fail
pub fn run(config_path: Option<&Path>, base_dir: &Path) -> Result<ExitCode> {
    println!("{}", "pfbvec Doctor".cyan().bold());
    println!("{}", "=============".cyan());
    println!();

    let mut all_ok = true;

    println!("{}", "Versions:".bold());
    println!(
        "  {} pfbvec-cli v{}",
        "->".green(),
        env!("CARGO_PKG_VERSION")
    );
    match get_rustc_version() {
        Some(version) => {
            println!("  {} rustc {}", "->".green(), version);
        }
        None => {
            println!("  {} rustc (not found)", "->".yellow());
        }
    }

    println!();

    let config = match PipelineConfig::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("{}", "Configuration:".bold());
            println!("  {} {}", "!!".red(), e);
            println!();
            println!(
                "{} Some checks failed. See above for details.",
                "WARNING".yellow().bold()
            );
            return Ok(ExitCode::from(1));
        }
    };

    println!("{}", "Toolchain:".bold());
    let invoker = ToolInvoker::new(&config.build_dir);
    for tool in [GENERATE_TOOL, CHANNELIZE_TOOL, SYNTHESIZE_TOOL] {
        match invoker.find_tool(tool) {
            Ok(path) => {
                println!("  {} {} ({})", "ok".green(), tool, path.display());
            }
            Err(_) => {
                println!(
                    "  {} {} not found in {} or on PATH",
                    "!!".yellow(),
                    tool,
                    config.build_dir.display()
                );
                println!(
                    "     {}",
                    "Required for the matlab backend and the channelize/synthesize stages."
                        .dimmed()
                );
                // Not a hard failure, stage 1 can run natively
            }
        }
    }

    println!();

    println!("{}", "Configuration:".bold());
    if config.header_template.is_file() {
        println!(
            "  {} header template ({})",
            "ok".green(),
            config.header_template.display()
        );
    } else {
        println!(
            "  {} header template not found ({})",
            "!!".yellow(),
            config.header_template.display()
        );
        println!(
            "     {}",
            "Required by the external stage-1 generator.".dimmed()
        );
    }
    println!("  {} default backend: {}", "->".green(), config.backend);

    println!();

    println!("{}", "Permissions:".bold());
    match std::fs::create_dir_all(base_dir) {
        Ok(()) => {
            let test_file = base_dir.join(".pfbvec_write_test");
            match std::fs::write(&test_file, "test") {
                Ok(()) => {
                    let _ = std::fs::remove_file(&test_file);
                    println!(
                        "  {} Cache base directory is writable ({})",
                        "ok".green(),
                        base_dir.display()
                    );
                }
                Err(e) => {
                    println!(
                        "  {} Cannot write to cache base directory: {}",
                        "!!".red(),
                        e
                    );
                    all_ok = false;
                }
            }
        }
        Err(e) => {
            println!(
                "  {} Cannot create cache base directory: {}",
                "!!".red(),
                e
            );
            all_ok = false;
        }
    }

    println!();

    if all_ok {
        println!("{} All checks passed!", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} Some checks failed. See above for details.",
            "WARNING".yellow().bold()
        );
        Ok(ExitCode::from(1))
    }
}

fn parse_rustc_version(output: &str) -> Option<String> {
    // Parse "rustc 1.75.0 (..."
    output.split_whitespace().nth(1).map(|s| s.to_string())
}

/// Get the rustc version
fn get_rustc_version() -> Option<String> {
    let output = Command::new("rustc").arg("--version").output().ok()?;

    if output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_rustc_version(&stdout)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rustc_version() {
        let out = "rustc 1.75.0 (82e1608df 2023-12-21)\n";
        assert_eq!(parse_rustc_version(out).as_deref(), Some("1.75.0"));
        assert_eq!(parse_rustc_version("rustc\n"), None);
    }
}
