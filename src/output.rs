use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Write the report to `path`, creating parent directories and replacing
/// any existing file.
pub fn save_report(report: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, report)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    info!("Report saved to: {}", path.display());
    Ok(())
}
