//! Dataset-wide aggregates
//!
//! Recomputed wholesale on every load by a single pass over the active
//! centers; there is no incremental-update path.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::cost_center::{CostCenter, ResourceKind};

/// Summary counts over a validated cost-center list
///
/// Resource totals cover active centers only. `total_unclassified` counts
/// resources of unrecognized kind on active centers, so schema drift is
/// visible instead of silently vanishing from every total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_active: usize,
    pub total_deleted: usize,
    pub total_organizations: usize,
    pub total_repositories: usize,
    pub total_members: usize,
    #[serde(default)]
    pub total_unclassified: usize,
}

impl Summary {
    /// Compute aggregates over the full cost-center list
    ///
    /// O(total resource count); pure function of its input.
    pub fn compute(cost_centers: &[Arc<CostCenter>]) -> Self {
        let mut summary = Summary::default();

        for center in cost_centers {
            if center.is_deleted() {
                summary.total_deleted += 1;
                continue;
            }
            if !center.is_active() {
                // Unrecognized state: neither view, no resource totals
                continue;
            }

            summary.total_active += 1;
            for resource in &center.resources {
                match resource.kind {
                    ResourceKind::Org => summary.total_organizations += 1,
                    ResourceKind::Repo => summary.total_repositories += 1,
                    ResourceKind::User => summary.total_members += 1,
                    ResourceKind::Other(_) => summary.total_unclassified += 1,
                }
            }
        }

        summary
    }

    pub fn total_resources(&self) -> usize {
        self.total_organizations + self.total_repositories + self.total_members
            + self.total_unclassified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cost_center::{CostCenterState, Resource};

    fn center(id: &str, state: &str, kinds: &[&str]) -> Arc<CostCenter> {
        Arc::new(CostCenter {
            id: id.to_string(),
            name: id.to_string(),
            state: CostCenterState::parse(state),
            resources: kinds
                .iter()
                .map(|k| Resource {
                    kind: ResourceKind::parse(k),
                    name: format!("{}-res", k),
                })
                .collect(),
        })
    }

    #[test]
    fn test_compute_counts_active_resources_only() {
        let centers = vec![
            center("a", "active", &["Org", "Repo", "User", "User"]),
            center("b", "active", &[]),
            center("c", "deleted", &["Org", "Org"]),
        ];

        let summary = Summary::compute(&centers);
        assert_eq!(summary.total_active, 2);
        assert_eq!(summary.total_deleted, 1);
        assert_eq!(summary.total_organizations, 1);
        assert_eq!(summary.total_repositories, 1);
        assert_eq!(summary.total_members, 2);
        assert_eq!(summary.total_unclassified, 0);
    }

    #[test]
    fn test_compute_empty_list() {
        let summary = Summary::compute(&[]);
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_unrecognized_state_in_neither_count() {
        let centers = vec![
            center("a", "active", &["Org"]),
            center("b", "archived", &["Repo"]),
        ];

        let summary = Summary::compute(&centers);
        assert_eq!(summary.total_active, 1);
        assert_eq!(summary.total_deleted, 0);
        // Resources of the archived center count nowhere
        assert_eq!(summary.total_repositories, 0);
    }

    #[test]
    fn test_unrecognized_kind_counted_as_unclassified() {
        let centers = vec![center("a", "active", &["Org", "Team"])];

        let summary = Summary::compute(&centers);
        assert_eq!(summary.total_organizations, 1);
        assert_eq!(summary.total_unclassified, 1);
        assert_eq!(summary.total_resources(), 2);
    }

    #[test]
    fn test_serde_wire_names() {
        let summary = Summary {
            total_active: 2,
            total_deleted: 1,
            total_organizations: 1,
            ..Summary::default()
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["totalActive"], 2);
        assert_eq!(json["totalDeleted"], 1);
        assert_eq!(json["totalOrganizations"], 1);
        assert_eq!(json["totalMembers"], 0);
    }
}
