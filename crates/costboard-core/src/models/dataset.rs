//! Validated dataset with derived views
//!
//! A `Dataset` is rebuilt from scratch for every loaded document; nothing
//! is mutated in place and nothing survives a reload.

use std::sync::Arc;

use super::cost_center::{CostCenter, CostCenterState};
use super::summary::Summary;

/// A validated cost-center list plus its derived views and aggregates
///
/// `active` and `deleted` partition the centers whose state is exactly
/// Active/Deleted; centers with other states stay in `cost_centers` (and in
/// exports) but belong to neither view. Records are shared as
/// `Arc<CostCenter>` so views and filter results clone handles, not data.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub cost_centers: Vec<Arc<CostCenter>>,
    pub active: Vec<Arc<CostCenter>>,
    pub deleted: Vec<Arc<CostCenter>>,
    pub summary: Summary,
}

impl Dataset {
    /// Build views and aggregates from freshly validated records
    pub fn from_cost_centers(cost_centers: Vec<CostCenter>) -> Self {
        let cost_centers: Vec<Arc<CostCenter>> =
            cost_centers.into_iter().map(Arc::new).collect();

        let active: Vec<_> = cost_centers
            .iter()
            .filter(|c| c.state == CostCenterState::Active)
            .cloned()
            .collect();
        let deleted: Vec<_> = cost_centers
            .iter()
            .filter(|c| c.state == CostCenterState::Deleted)
            .cloned()
            .collect();

        let summary = Summary::compute(&cost_centers);

        Self {
            cost_centers,
            active,
            deleted,
            summary,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cost_centers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cost_centers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cost_center::Resource;
    use crate::models::ResourceKind;

    fn center(id: &str, state: &str) -> CostCenter {
        CostCenter {
            id: id.to_string(),
            name: id.to_string(),
            state: CostCenterState::parse(state),
            resources: vec![Resource {
                kind: ResourceKind::Org,
                name: "o".to_string(),
            }],
        }
    }

    #[test]
    fn test_partition_is_exact() {
        let dataset = Dataset::from_cost_centers(vec![
            center("a", "active"),
            center("b", "deleted"),
            center("c", "active"),
        ]);

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.active.len() + dataset.deleted.len(), dataset.len());
        assert!(dataset.active.iter().all(|c| c.is_active()));
        assert!(dataset.deleted.iter().all(|c| c.is_deleted()));
    }

    #[test]
    fn test_unrecognized_state_outside_both_views() {
        let dataset = Dataset::from_cost_centers(vec![
            center("a", "active"),
            center("b", "archived"),
        ]);

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.active.len(), 1);
        assert_eq!(dataset.deleted.len(), 0);
    }

    #[test]
    fn test_summary_matches_views() {
        let dataset = Dataset::from_cost_centers(vec![
            center("a", "active"),
            center("b", "deleted"),
        ]);

        assert_eq!(dataset.summary.total_active, dataset.active.len());
        assert_eq!(dataset.summary.total_deleted, dataset.deleted.len());
        // Only the active center's Org resource counts
        assert_eq!(dataset.summary.total_organizations, 1);
    }
}
