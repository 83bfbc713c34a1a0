//! Filter and sort engine for the active cost-center view
//!
//! Every call re-runs the full pass over the source list and returns a new
//! sequence of handles; the source is never mutated and nothing is cached.

use std::cmp::Reverse;
use std::sync::Arc;

use crate::models::{CostCenter, ResourceKind};

/// Resource-kind filter: whole centers are included or excluded, never
/// trimmed down to only the matching resources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KindFilter {
    #[default]
    All,
    Org,
    Repo,
    User,
}

impl KindFilter {
    fn matches(&self, center: &CostCenter) -> bool {
        let target = match self {
            KindFilter::All => return true,
            KindFilter::Org => ResourceKind::Org,
            KindFilter::Repo => ResourceKind::Repo,
            KindFilter::User => ResourceKind::User,
        };
        center.resources.iter().any(|r| r.kind == target)
    }
}

/// Emptiness filter on a center's resource list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PresenceFilter {
    #[default]
    All,
    WithResources,
    Empty,
}

impl PresenceFilter {
    fn matches(&self, center: &CostCenter) -> bool {
        match self {
            PresenceFilter::All => true,
            PresenceFilter::WithResources => center.has_resources(),
            PresenceFilter::Empty => !center.has_resources(),
        }
    }
}

/// Sort order for the filtered view
///
/// `Name` sorts ascending; every count-based order sorts descending. Sorts
/// are stable, so ties keep their prior relative order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Name,
    TotalResources,
    Organizations,
    Repositories,
    Members,
}

/// One query over the active view: three ANDed filters plus a sort order
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Case-insensitive substring; empty matches everything
    pub search: String,
    pub kind: KindFilter,
    pub presence: PresenceFilter,
    pub sort: SortOrder,
}

/// Apply a query to a cost-center list, producing a new ordered sequence
pub fn apply(centers: &[Arc<CostCenter>], query: &ListQuery) -> Vec<Arc<CostCenter>> {
    let needle = query.search.trim().to_lowercase();

    let mut result: Vec<Arc<CostCenter>> = centers
        .iter()
        .filter(|c| {
            matches_search(c, &needle) && query.kind.matches(c) && query.presence.matches(c)
        })
        .cloned()
        .collect();

    match query.sort {
        SortOrder::Name => {
            result.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
        SortOrder::TotalResources => result.sort_by_key(|c| Reverse(c.resources.len())),
        SortOrder::Organizations => {
            result.sort_by_key(|c| Reverse(c.count_of(&ResourceKind::Org)))
        }
        SortOrder::Repositories => {
            result.sort_by_key(|c| Reverse(c.count_of(&ResourceKind::Repo)))
        }
        SortOrder::Members => result.sort_by_key(|c| Reverse(c.count_of(&ResourceKind::User))),
    }

    result
}

/// A center matches when the needle is empty, or appears in its name, its
/// id, or any of its resources' names
fn matches_search(center: &CostCenter, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    center.name.to_lowercase().contains(needle)
        || center.id.to_lowercase().contains(needle)
        || center
            .resources
            .iter()
            .any(|r| r.name.to_lowercase().contains(needle))
}
