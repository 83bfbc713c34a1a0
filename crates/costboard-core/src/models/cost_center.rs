//! Cost center and resource records
//!
//! Wire format matches the enterprise billing API: records carry `id`,
//! `name`, `state` and a `resources` array of `{type, name}` entries.

use serde::{Deserialize, Serialize};

/// Kind of a billable resource attributed to a cost center
///
/// The recognized set is Org/Repo/User; anything else the API starts
/// emitting is preserved verbatim rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Org,
    Repo,
    User,
    #[serde(untagged)]
    Other(String),
}

impl ResourceKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Org" => ResourceKind::Org,
            "Repo" => ResourceKind::Repo,
            "User" => ResourceKind::User,
            other => ResourceKind::Other(other.to_string()),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ResourceKind::Other(_))
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Org => write!(f, "Org"),
            ResourceKind::Repo => write!(f, "Repo"),
            ResourceKind::User => write!(f, "User"),
            ResourceKind::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// A named entity billed against a cost center
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub name: String,
}

/// Lifecycle state of a cost center
///
/// Deleted centers are excluded from aggregates and the primary table but
/// retained in exports. Unrecognized states are kept as `Other` so they
/// survive a round trip; they contribute to neither the active nor the
/// deleted view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostCenterState {
    Active,
    Deleted,
    #[serde(untagged)]
    Other(String),
}

impl CostCenterState {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "active" => CostCenterState::Active,
            "deleted" => CostCenterState::Deleted,
            other => CostCenterState::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for CostCenterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CostCenterState::Active => write!(f, "active"),
            CostCenterState::Deleted => write!(f, "deleted"),
            CostCenterState::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// Per-center resource tally, split by kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCounts {
    pub organizations: usize,
    pub repositories: usize,
    pub members: usize,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub unclassified: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl ResourceCounts {
    pub fn total(&self) -> usize {
        self.organizations + self.repositories + self.members + self.unclassified
    }
}

/// A billing-allocation grouping containing zero or more resources
///
/// Identity is `id`; uniqueness across a document is not enforced. Records
/// are immutable once validated and wholesale replaced on a new load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenter {
    pub id: String,
    pub name: String,
    pub state: CostCenterState,
    pub resources: Vec<Resource>,
}

impl CostCenter {
    pub fn is_active(&self) -> bool {
        self.state == CostCenterState::Active
    }

    pub fn is_deleted(&self) -> bool {
        self.state == CostCenterState::Deleted
    }

    pub fn has_resources(&self) -> bool {
        !self.resources.is_empty()
    }

    /// Tally this center's resources by kind
    pub fn resource_counts(&self) -> ResourceCounts {
        let mut counts = ResourceCounts::default();
        for resource in &self.resources {
            match resource.kind {
                ResourceKind::Org => counts.organizations += 1,
                ResourceKind::Repo => counts.repositories += 1,
                ResourceKind::User => counts.members += 1,
                ResourceKind::Other(_) => counts.unclassified += 1,
            }
        }
        counts
    }

    /// Number of resources of one kind
    pub fn count_of(&self, kind: &ResourceKind) -> usize {
        self.resources.iter().filter(|r| &r.kind == kind).count()
    }
}
