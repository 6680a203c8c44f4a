//! API client for the Pipe Network points service.
//!
//! This module provides the `ApiClient` struct for endpoint discovery,
//! login, and authenticated points requests.

use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{ApiError, EndpointResolver, Endpoints, RetryPolicy};

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PointsResponse {
    points: u64,
}

/// API client for the points service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    resolver: EndpointResolver,
    retry: RetryPolicy,
}

impl ApiClient {
    /// Create a client against the production endpoints.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_endpoints(Endpoints::default())
    }

    /// Create a client against explicit endpoints (tests point this at a
    /// mock server).
    pub fn with_endpoints(endpoints: Endpoints) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            resolver: EndpointResolver::new(endpoints),
            retry: RetryPolicy::default(),
        })
    }

    /// Override the retry policy used for discovery.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The base URL currently in effect for API calls.
    pub fn base_url(&self) -> &str {
        self.resolver.base_url()
    }

    /// Whether a discovered (non-fallback) base URL is in effect.
    pub fn is_resolved(&self) -> bool {
        self.resolver.is_resolved()
    }

    /// Issue a request, retrying on transport failure or a non-2xx status.
    ///
    /// The first successful response is returned immediately; remaining
    /// attempts are not consumed. The delay between attempts is fixed.
    pub async fn fetch_with_retry(
        &self,
        request: RequestBuilder,
        policy: &RetryPolicy,
    ) -> Result<Response, ApiError> {
        for attempt in 1..=policy.max_attempts {
            let req = request.try_clone().ok_or(ApiError::UnreplayableRequest)?;
            match req.send().await {
                Ok(response) if response.status().is_success() => {
                    debug!(attempt, "request succeeded");
                    return Ok(response);
                }
                Ok(response) => {
                    warn!(attempt, status = %response.status(), "request failed");
                }
                Err(e) => {
                    warn!(attempt, error = %e, "request failed");
                }
            }
            if attempt < policy.max_attempts {
                tokio::time::sleep(policy.delay).await;
            }
        }
        warn!(attempts = policy.max_attempts, "all retry attempts failed");
        Err(ApiError::ExhaustedRetries {
            attempts: policy.max_attempts,
        })
    }

    /// Ask the discovery endpoint for the current base URL.
    ///
    /// Never fails: any problem (retry exhaustion, malformed body, missing
    /// or empty field) falls back to the hardcoded origin.
    pub async fn resolve_base_url(&self) -> String {
        match self.try_discover().await {
            Ok(url) => {
                info!(base_url = %url, "fetched base URL");
                url
            }
            Err(e) => {
                warn!(error = %e, "base URL discovery failed, using fallback");
                self.resolver.endpoints().fallback_base_url.clone()
            }
        }
    }

    async fn try_discover(&self) -> Result<String, ApiError> {
        let request = self
            .client
            .get(&self.resolver.endpoints().discovery_url);
        let response = self.fetch_with_retry(request, &self.retry).await?;

        let body: super::resolver::DiscoveryResponse = response
            .json()
            .await
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;

        if body.base_url.is_empty() {
            return Err(ApiError::MalformedResponse(
                "discovery response contained an empty baseUrl".to_string(),
            ));
        }
        Ok(body.base_url)
    }

    /// Run discovery unless a non-fallback base URL is already in effect.
    pub async fn ensure_resolved(&mut self) {
        if self.resolver.is_resolved() {
            return;
        }
        debug!("initializing base URL");
        let url = self.resolve_base_url().await;
        self.resolver.set_base_url(url);
    }

    /// Authenticate and return the issued bearer token.
    ///
    /// A single attempt, never retried: a duplicate login must not be
    /// issued on a slow response.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let url = format!("{}/api/login", self.base_url());
        info!(email = %email, "logging in");

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;

        body.token.ok_or_else(|| {
            warn!("login response did not include a token");
            ApiError::MalformedResponse("login response missing token field".to_string())
        })
    }

    /// Fetch the points balance for the given bearer token. Single attempt.
    pub async fn fetch_points(&self, token: &str) -> Result<u64, ApiError> {
        let url = format!("{}/api/points", self.base_url());

        let response = self.client.get(&url).bearer_auth(token).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body));
        }

        let body: PointsResponse = response
            .json()
            .await
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;

        debug!(points = body.points, "points fetched");
        Ok(body.points)
    }
}
