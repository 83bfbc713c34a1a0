//! Data models for costboard

pub mod cost_center;
pub mod dataset;
pub mod summary;

pub use cost_center::{CostCenter, CostCenterState, Resource, ResourceCounts, ResourceKind};
pub use dataset::Dataset;
pub use summary::Summary;
