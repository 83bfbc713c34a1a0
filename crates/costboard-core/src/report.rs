//! Report assembly for cost-center exports
//!
//! Pure string/byte rendering; writing the artifact to disk lives in
//! [`crate::export`]. Both formats cover the full dataset, deleted centers
//! included.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{json, Value};

use crate::models::Dataset;

/// Export artifact format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        }
    }
}

/// Default artifact name: `cost-center-report-<YYYY-MM-DD>.<ext>`
pub fn report_file_name(format: ReportFormat, date: NaiveDate) -> String {
    format!(
        "cost-center-report-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Render the JSON report document
///
/// Original records plus a computed `resourceCounts` per record, wrapped in
/// a timestamped envelope with the summary. Re-validating the output
/// through `DocumentParser` reproduces the same records (the envelope is
/// the recognized `costCenters` shape).
pub fn render_json(dataset: &Dataset, exported_at: DateTime<Utc>) -> Result<String> {
    let records: Vec<Value> = dataset
        .cost_centers
        .iter()
        .map(|center| {
            let mut value = serde_json::to_value(center.as_ref())
                .with_context(|| format!("Failed to serialize cost center {}", center.id))?;
            let counts = serde_json::to_value(center.resource_counts())
                .context("Failed to serialize resource counts")?;
            value
                .as_object_mut()
                .context("Cost center did not serialize to an object")?
                .insert("resourceCounts".to_string(), counts);
            Ok(value)
        })
        .collect::<Result<_>>()?;

    let document = json!({
        "exportedAt": exported_at.to_rfc3339(),
        "summary": dataset.summary,
        "costCenters": records,
    });

    serde_json::to_string_pretty(&document).context("Failed to serialize report")
}

/// Render the CSV report
///
/// Fixed column order; string fields are naively double-quoted, embedded
/// quotes are not escaped.
pub fn render_csv(dataset: &Dataset) -> String {
    let mut out = String::from(
        "Name,ID,State,Total Resources,Organizations,Repositories,Members\n",
    );

    for center in &dataset.cost_centers {
        let counts = center.resource_counts();
        out.push_str(&format!(
            "\"{}\",\"{}\",\"{}\",{},{},{},{}\n",
            center.name,
            center.id,
            center.state,
            center.resources.len(),
            counts.organizations,
            counts.repositories,
            counts.members,
        ));
    }

    out
}
