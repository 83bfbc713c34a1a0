//! Application state store
//!
//! Owns the current dataset and query so presentation layers stay free of
//! pipeline state. A loaded document wholesale replaces the previous one;
//! fetches carry a generation token so a stale response can never overwrite
//! a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::filter::{self, ListQuery};
use crate::models::{CostCenter, Dataset, Summary};

/// Ticket for one in-flight fetch; only the latest ticket may install
/// its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

/// Central state for a costboard session
#[derive(Debug, Default)]
pub struct ReportStore {
    /// Current dataset, if any document has been loaded
    dataset: RwLock<Option<Dataset>>,

    /// Current filter/sort parameters
    query: RwLock<ListQuery>,

    /// Generation counter for in-flight fetch arbitration
    fetch_generation: AtomicU64,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current dataset (local file load)
    pub fn replace(&self, dataset: Dataset) {
        let mut guard = self.dataset.write();
        *guard = Some(dataset);
    }

    /// Drop the current dataset, reverting to the empty state
    pub fn clear(&self) {
        let mut guard = self.dataset.write();
        *guard = None;
    }

    pub fn dataset(&self) -> Option<Dataset> {
        self.dataset.read().clone()
    }

    pub fn summary(&self) -> Option<Summary> {
        self.dataset.read().as_ref().map(|d| d.summary)
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.read().is_some()
    }

    pub fn set_query(&self, query: ListQuery) {
        let mut guard = self.query.write();
        *guard = query;
    }

    pub fn query(&self) -> ListQuery {
        self.query.read().clone()
    }

    /// The filtered, sorted active view under the current query
    ///
    /// Re-runs the full filter+sort pass; empty when no dataset is loaded.
    pub fn visible(&self) -> Vec<Arc<CostCenter>> {
        let guard = self.dataset.read();
        match guard.as_ref() {
            Some(dataset) => filter::apply(&dataset.active, &self.query.read()),
            None => Vec::new(),
        }
    }

    /// Start a fetch, invalidating any earlier in-flight fetch
    pub fn begin_fetch(&self) -> FetchToken {
        FetchToken(self.fetch_generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Install a fetched dataset if its token is still current
    ///
    /// Returns `false` (and discards the dataset) when a newer fetch has
    /// started since the token was issued.
    pub fn install_fetched(&self, dataset: Dataset, token: FetchToken) -> bool {
        if token.0 != self.fetch_generation.load(Ordering::SeqCst) {
            tracing::debug!(token = token.0, "Discarding stale fetch result");
            return false;
        }
        self.replace(dataset);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostCenter, CostCenterState};

    fn dataset(ids: &[&str]) -> Dataset {
        Dataset::from_cost_centers(
            ids.iter()
                .map(|id| CostCenter {
                    id: id.to_string(),
                    name: id.to_string(),
                    state: CostCenterState::Active,
                    resources: vec![],
                })
                .collect(),
        )
    }

    #[test]
    fn test_replace_and_clear() {
        let store = ReportStore::new();
        assert!(!store.is_loaded());

        store.replace(dataset(&["a"]));
        assert!(store.is_loaded());
        assert_eq!(store.summary().unwrap().total_active, 1);

        store.clear();
        assert!(!store.is_loaded());
        assert!(store.visible().is_empty());
    }

    #[test]
    fn test_visible_applies_query() {
        let store = ReportStore::new();
        store.replace(dataset(&["zeta", "alpha"]));

        let visible = store.visible();
        assert_eq!(visible.len(), 2);
        // Default query sorts by name ascending
        assert_eq!(visible[0].name, "alpha");

        store.set_query(ListQuery {
            search: "zet".to_string(),
            ..ListQuery::default()
        });
        let visible = store.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "zeta");
    }

    #[test]
    fn test_stale_fetch_discarded() {
        let store = ReportStore::new();

        let first = store.begin_fetch();
        let second = store.begin_fetch();

        // First response arrives after a newer fetch started
        assert!(!store.install_fetched(dataset(&["stale"]), first));
        assert!(!store.is_loaded());

        assert!(store.install_fetched(dataset(&["fresh"]), second));
        assert_eq!(store.visible()[0].name, "fresh");
    }

    #[test]
    fn test_current_fetch_installs() {
        let store = ReportStore::new();
        let token = store.begin_fetch();
        assert!(store.install_fetched(dataset(&["a"]), token));
        assert!(store.is_loaded());
    }
}
