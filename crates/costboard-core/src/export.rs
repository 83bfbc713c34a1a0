//! Write report artifacts to disk

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::models::Dataset;
use crate::report::{render_csv, render_json, ReportFormat};

/// Render and write a report artifact
///
/// Creates parent directories as needed; the destination is overwritten.
pub fn write_report(
    dataset: &Dataset,
    format: ReportFormat,
    exported_at: DateTime<Utc>,
    path: &Path,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let content = match format {
        ReportFormat::Json => render_json(dataset, exported_at)?,
        ReportFormat::Csv => render_csv(dataset),
    };

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report: {}", path.display()))
}
