//! costboard-core - Core library for costboard
//!
//! Provides the cost-center models, document validator, aggregator,
//! filter/sort engine, report assembler, billing API client, and the
//! application state store.

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod models;
pub mod parsers;
pub mod report;
pub mod store;

pub use api::BillingClient;
pub use config::ApiConfig;
pub use error::{CoreError, NetworkErrorKind};
pub use filter::{KindFilter, ListQuery, PresenceFilter, SortOrder};
pub use models::{CostCenter, CostCenterState, Dataset, Resource, ResourceCounts, ResourceKind, Summary};
pub use parsers::DocumentParser;
pub use report::{report_file_name, ReportFormat};
pub use store::{FetchToken, ReportStore};
