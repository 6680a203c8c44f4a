//! API endpoint discovery.
//!
//! The active API base URL is published by a discovery endpoint and may move
//! between deployments. Resolution is best-effort: when discovery cannot
//! produce a usable URL the client falls back to a hardcoded origin.

use serde::Deserialize;

/// Discovery endpoint that publishes the current API base URL.
const DISCOVERY_URL: &str =
    "https://pipe-network-backend.pipecanary.workers.dev/api/getBaseUrl";

/// Base URL used when discovery is unavailable.
const FALLBACK_BASE_URL: &str = "https://api.pipecdn.app";

/// The pair of fixed URLs the resolver works from. Tests substitute a mock
/// server for both.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub discovery_url: String,
    pub fallback_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            discovery_url: DISCOVERY_URL.to_string(),
            fallback_base_url: FALLBACK_BASE_URL.to_string(),
        }
    }
}

/// Response body of the discovery endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct DiscoveryResponse {
    #[serde(rename = "baseUrl")]
    pub base_url: String,
}

/// Holds the resolved base URL for the lifetime of the process.
///
/// The base URL starts out equal to the fallback and is overwritten by a
/// successful discovery. A base URL still equal to the fallback is treated
/// as "not yet resolved" and re-attempted on the next `ensure_resolved`
/// call; a discovery that legitimately returns the fallback value is
/// therefore indistinguishable from one that never ran. That ambiguity is
/// inherited from the service contract and kept as-is.
#[derive(Debug, Clone)]
pub struct EndpointResolver {
    endpoints: Endpoints,
    base_url: String,
}

impl EndpointResolver {
    pub fn new(endpoints: Endpoints) -> Self {
        let base_url = endpoints.fallback_base_url.clone();
        Self { endpoints, base_url }
    }

    /// The base URL to issue API calls against. Never empty: either a
    /// discovered origin or the hardcoded fallback.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Whether a discovered (non-fallback) base URL is in effect.
    pub fn is_resolved(&self) -> bool {
        self.base_url != self.endpoints.fallback_base_url
    }

    pub(crate) fn set_base_url(&mut self, url: String) {
        self.base_url = url;
    }
}

impl Default for EndpointResolver {
    fn default() -> Self {
        Self::new(Endpoints::default())
    }
}
