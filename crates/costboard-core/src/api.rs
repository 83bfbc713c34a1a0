//! Billing API client
//!
//! One authenticated GET against the enterprise billing endpoint; the
//! response body flows straight into the document validator. No retry, no
//! pagination, no partial results.

use crate::config::ApiConfig;
use crate::error::{CoreError, NetworkErrorKind};
use crate::models::CostCenter;
use crate::parsers::DocumentParser;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("costboard/", env!("CARGO_PKG_VERSION"));

/// Client for the enterprise billing cost-centers endpoint
#[derive(Debug, Clone)]
pub struct BillingClient {
    base_url: String,
    client: reqwest::Client,
}

impl Default for BillingClient {
    fn default() -> Self {
        Self::new()
    }
}

impl BillingClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    /// Client against a non-default base URL (tests, GHES installs)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Endpoint URL for an enterprise slug
    pub fn cost_centers_url(&self, enterprise: &str) -> String {
        format!(
            "{}/enterprises/{}/settings/billing/cost-centers",
            self.base_url, enterprise
        )
    }

    /// Fetch and validate the enterprise's cost centers
    pub async fn fetch_cost_centers(
        &self,
        config: &ApiConfig,
    ) -> Result<Vec<CostCenter>, CoreError> {
        let url = self.cost_centers_url(&config.enterprise);
        tracing::info!(enterprise = %config.enterprise, "Fetching cost centers");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&config.token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Billing API transport failure");
                CoreError::Network {
                    kind: NetworkErrorKind::Failed(None),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::Network {
                kind: NetworkErrorKind::from_status(status.as_u16()),
            });
        }

        let body = response.text().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read billing API response body");
            CoreError::Network {
                kind: NetworkErrorKind::Failed(None),
            }
        })?;

        let centers = DocumentParser::new().parse_str(&body)?;
        tracing::info!(count = centers.len(), "Fetched cost centers");
        Ok(centers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_centers_url() {
        let client = BillingClient::new();
        assert_eq!(
            client.cost_centers_url("acme"),
            "https://api.github.com/enterprises/acme/settings/billing/cost-centers"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = BillingClient::with_base_url("http://localhost:8080/");
        assert_eq!(
            client.cost_centers_url("acme"),
            "http://localhost:8080/enterprises/acme/settings/billing/cost-centers"
        );
    }

    #[test]
    fn test_response_body_feeds_validator() {
        // The parse path the client hands the body to, exercised directly
        let body = r#"{"costCenters":[{"id":"A","name":"Zeta","state":"active","resources":[]}]}"#;
        let centers = DocumentParser::new().parse_str(body).unwrap();
        assert_eq!(centers.len(), 1);
    }
}
