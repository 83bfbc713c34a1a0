//! CLI argument parsing helpers and output formatting

use std::sync::Arc;

use anyhow::{bail, Result};
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use costboard_core::{
    CostCenter, KindFilter, PresenceFilter, ReportFormat, SortOrder, Summary,
};

// ============================================================================
// Argument Parsers
// ============================================================================

/// Parse a `--kind` value: all | org | repo | user
pub fn parse_kind(s: &str) -> Result<KindFilter> {
    match s {
        "all" => Ok(KindFilter::All),
        "org" => Ok(KindFilter::Org),
        "repo" => Ok(KindFilter::Repo),
        "user" => Ok(KindFilter::User),
        other => bail!("invalid kind '{}' (expected: all, org, repo, user)", other),
    }
}

/// Parse a `--presence` value: all | with-resources | empty
pub fn parse_presence(s: &str) -> Result<PresenceFilter> {
    match s {
        "all" => Ok(PresenceFilter::All),
        "with-resources" => Ok(PresenceFilter::WithResources),
        "empty" => Ok(PresenceFilter::Empty),
        other => bail!(
            "invalid presence filter '{}' (expected: all, with-resources, empty)",
            other
        ),
    }
}

/// Parse a `--sort` value: name | total-resources | orgs | repos | users
pub fn parse_sort(s: &str) -> Result<SortOrder> {
    match s {
        "name" => Ok(SortOrder::Name),
        "total-resources" => Ok(SortOrder::TotalResources),
        "orgs" => Ok(SortOrder::Organizations),
        "repos" => Ok(SortOrder::Repositories),
        "users" => Ok(SortOrder::Members),
        other => bail!(
            "invalid sort order '{}' (expected: name, total-resources, orgs, repos, users)",
            other
        ),
    }
}

/// Parse a `--format` value: json | csv
pub fn parse_format(s: &str) -> Result<ReportFormat> {
    match s {
        "json" => Ok(ReportFormat::Json),
        "csv" => Ok(ReportFormat::Csv),
        other => bail!("invalid export format '{}' (expected: json, csv)", other),
    }
}

// ============================================================================
// Formatters
// ============================================================================

/// Format cost centers as a table (human) or JSON
pub fn format_cost_center_table(
    centers: &[Arc<CostCenter>],
    json: bool,
    no_color: bool,
) -> String {
    if json {
        let refs: Vec<&CostCenter> = centers.iter().map(|c| c.as_ref()).collect();
        return serde_json::to_string_pretty(&refs).unwrap_or_else(|_| "[]".to_string());
    }

    if centers.is_empty() {
        return "No cost centers match.".to_string();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let headers = ["Name", "ID", "Resources", "Orgs", "Repos", "Members"];
    if no_color {
        table.set_header(headers.to_vec());
    } else {
        let cells: Vec<Cell> = headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)).collect();
        table.set_header(cells);
    }

    for center in centers {
        let counts = center.resource_counts();
        let name = truncate(&center.name, 40);
        let total = center.resources.len().to_string();
        let orgs = counts.organizations.to_string();
        let repos = counts.repositories.to_string();
        let members = counts.members.to_string();

        table.add_row(Row::from(vec![
            &name,
            &center.id,
            &total,
            &orgs,
            &repos,
            &members,
        ]));
    }

    table.to_string()
}

/// Format the dataset summary (human or JSON)
pub fn format_summary(summary: &Summary, json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string());
    }

    let mut lines = vec![];
    lines.push(format!("Active cost centers:   {}", summary.total_active));
    lines.push(format!("Deleted cost centers:  {}", summary.total_deleted));
    lines.push(format!("Organizations:         {}", summary.total_organizations));
    lines.push(format!("Repositories:          {}", summary.total_repositories));
    lines.push(format!("Members:               {}", summary.total_members));
    if summary.total_unclassified > 0 {
        lines.push(format!(
            "Unclassified resources: {}",
            summary.total_unclassified
        ));
    }

    lines.join("\n")
}

fn truncate(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        s.chars().take(max - 1).collect::<String>() + "…"
    }
}

// ============================================================================
// Tests
// ============================================================================
