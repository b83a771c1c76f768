//! Cache maintenance commands.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;

use crate::cache::VectorCache;

/// Clear all cache entries.
pub fn clear(base_dir: &Path) -> Result<ExitCode> {
    let cache = VectorCache::new(base_dir);

    println!("{}", "Clearing vector cache...".cyan().bold());

    let count = cache.clear()?;

    if count == 0 {
        println!("  {}", "Cache is already empty".dimmed());
    } else {
        println!(
            "  {} Removed {} cache {}",
            "SUCCESS".green().bold(),
            count,
            if count == 1 { "entry" } else { "entries" }
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Show cache information.
pub fn info(base_dir: &Path) -> Result<ExitCode> {
    let cache = VectorCache::new(base_dir);

    println!("{}", "Cache Information".cyan().bold());

    let info = cache.info()?;

    println!(
        "  {}: {}",
        "Cache directory".dimmed(),
        info.base_dir.display()
    );
    println!("  {}: {}", "Entry count".dimmed(), info.entry_count);

    let size_mb = info.total_size_bytes as f64 / (1024.0 * 1024.0);
    if size_mb >= 1.0 {
        println!("  {}: {:.2} MB", "Total size".dimmed(), size_mb);
    } else {
        let size_kb = info.total_size_bytes as f64 / 1024.0;
        println!("  {}: {:.2} KB", "Total size".dimmed(), size_kb);
    }

    Ok(ExitCode::SUCCESS)
}
