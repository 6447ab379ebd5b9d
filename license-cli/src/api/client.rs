//! Microsoft Graph HTTP client with pagination and bounded retries.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::auth::TokenCache;
use super::error::{GraphError, GraphResult};
use super::models::{
    AssignLicenseRequest, LicensedUser, ODataCollection, ODataError, SubscribedSku,
};
use super::resilience::RetryConfig;

pub const DEFAULT_GRAPH_URL: &str = "https://graph.microsoft.com";
const API_VERSION: &str = "v1.0";

/// Microsoft Graph API client scoped to license administration.
#[derive(Debug)]
pub struct GraphClient {
    http_client: reqwest::Client,
    token_cache: TokenCache,
    graph_url: String,
    retry: RetryConfig,
}

impl GraphClient {
    pub fn new(token_cache: TokenCache, graph_url: impl Into<String>) -> GraphResult<Self> {
        Self::with_retry_config(token_cache, graph_url, RetryConfig::default())
    }

    pub fn with_retry_config(
        token_cache: TokenCache,
        graph_url: impl Into<String>,
        retry: RetryConfig,
    ) -> GraphResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GraphError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            token_cache,
            graph_url: graph_url.into().trim_end_matches('/').to_string(),
            retry,
        })
    }

    fn base_url(&self) -> String {
        format!("{}/{}", self.graph_url, API_VERSION)
    }

    /// Fetches every subscribed SKU in the tenant, following pagination.
    pub async fn list_subscribed_skus(&self) -> GraphResult<Vec<SubscribedSku>> {
        let mut url = format!("{}/subscribedSkus", self.base_url());
        let mut skus = Vec::new();

        loop {
            log::debug!("Fetching SKU page: {url}");
            let page: ODataCollection<SubscribedSku> = self.get(&url).await?;
            skus.extend(page.value);

            match page.next_link {
                Some(next) => url = next,
                None => break,
            }
        }

        log::info!("Fetched {} subscribed SKUs", skus.len());
        Ok(skus)
    }

    /// Fetches one user with its current license assignments. The identifier
    /// may be an object id or a user principal name.
    pub async fn get_user(&self, id_or_upn: &str) -> GraphResult<LicensedUser> {
        let url = format!(
            "{}/users/{}?$select=id,displayName,userPrincipalName,assignedLicenses",
            self.base_url(),
            urlencoding::encode(id_or_upn)
        );

        match self.get(&url).await {
            Err(e) if e.is_not_found() => Err(GraphError::UserNotFound(id_or_upn.to_string())),
            other => other,
        }
    }

    /// Applies the supplied license change to the user.
    pub async fn assign_license(
        &self,
        id_or_upn: &str,
        request: &AssignLicenseRequest,
    ) -> GraphResult<()> {
        let url = format!(
            "{}/users/{}/assignLicense",
            self.base_url(),
            urlencoding::encode(id_or_upn)
        );

        // Graph returns the updated user object; we only care that it worked
        let result = self
            .execute(reqwest::Method::POST, &url, Some(request))
            .await
            .map(|_| ());
        match result {
            Err(e) if e.is_not_found() => Err(GraphError::UserNotFound(id_or_upn.to_string())),
            other => other,
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> GraphResult<T> {
        let response = self
            .execute(reqwest::Method::GET, url, None::<&()>)
            .await?;
        response.json().await.map_err(GraphError::from)
    }

    /// Performs one request with token injection and bounded retries for
    /// throttling and transient upstream failures. Returns the raw response
    /// on success; non-2xx responses become `GraphError::GraphApi`.
    async fn execute<B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> GraphResult<reqwest::Response> {
        let mut attempt = 0u32;

        loop {
            let token = self.token_cache.get_token().await?;

            let mut request = self
                .http_client
                .request(method.clone(), url)
                .bearer_auth(&token);
            if let Some(b) = body {
                request = request.json(b);
            }

            let response = request.send().await?;
            let status = response.status();

            let retryable = status == reqwest::StatusCode::TOO_MANY_REQUESTS
                || matches!(
                    status,
                    reqwest::StatusCode::BAD_GATEWAY
                        | reqwest::StatusCode::SERVICE_UNAVAILABLE
                        | reqwest::StatusCode::GATEWAY_TIMEOUT
                );

            if retryable && attempt + 1 < self.retry.max_attempts {
                // Prefer the server's Retry-After over our own backoff
                let delay = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .map(Duration::from_secs)
                    .unwrap_or_else(|| self.retry.delay_for_attempt(attempt));

                attempt += 1;
                log::warn!(
                    "Transient error {status}, retry {attempt}/{} after {delay:?}",
                    self.retry.max_attempts - 1
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            if status.is_success() {
                return Ok(response);
            }

            let error_body = response.text().await.unwrap_or_default();
            if let Ok(odata_error) = serde_json::from_str::<ODataError>(&error_body) {
                return Err(GraphError::GraphApi {
                    code: odata_error.error.code,
                    message: odata_error.error.message,
                });
            }

            return Err(GraphError::GraphApi {
                code: status.to_string(),
                message: error_body,
            });
        }
    }
}
