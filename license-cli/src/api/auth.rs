//! OAuth2 client-credentials authentication for Microsoft Graph.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::error::{GraphError, GraphResult};
use crate::config::Credentials;

const DEFAULT_LOGIN_URL: &str = "https://login.microsoftonline.com";

/// OAuth2 token response from the Microsoft identity platform.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Cached access token with its expiry.
#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// True if the token is expired or expires within the grace period.
    fn is_expired(&self, grace_period: Duration) -> bool {
        Utc::now() + grace_period >= self.expires_at
    }
}

/// Acquires and caches access tokens for the Graph API.
#[derive(Debug)]
pub struct TokenCache {
    credentials: Credentials,
    login_url: String,
    scope: String,
    http_client: reqwest::Client,
    cached_token: RwLock<Option<CachedToken>>,
    /// Refresh this long before actual expiry.
    grace_period: Duration,
}

impl TokenCache {
    pub fn new(credentials: Credentials, graph_url: &str) -> Self {
        Self {
            credentials,
            login_url: DEFAULT_LOGIN_URL.to_string(),
            scope: format!("{}/.default", graph_url.trim_end_matches('/')),
            http_client: reqwest::Client::new(),
            cached_token: RwLock::new(None),
            grace_period: Duration::minutes(5),
        }
    }

    /// Overrides the login endpoint, used by tests to point at a mock server.
    pub fn with_login_url(mut self, login_url: impl Into<String>) -> Self {
        self.login_url = login_url.into();
        self
    }

    /// Returns a valid access token, refreshing it if necessary.
    pub async fn get_token(&self) -> GraphResult<String> {
        {
            let cache = self.cached_token.read().await;
            if let Some(ref token) = *cache {
                if !token.is_expired(self.grace_period) {
                    log::debug!("Using cached access token");
                    return Ok(token.access_token.clone());
                }
            }
        }

        log::debug!("Acquiring access token for tenant {}", self.credentials.tenant_id);
        let new_token = self.acquire_token().await?;

        {
            let mut cache = self.cached_token.write().await;
            *cache = Some(new_token.clone());
        }

        Ok(new_token.access_token)
    }

    async fn acquire_token(&self) -> GraphResult<CachedToken> {
        let token_url = format!(
            "{}/{}/oauth2/v2.0/token",
            self.login_url.trim_end_matches('/'),
            self.credentials.tenant_id
        );

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("scope", self.scope.as_str()),
        ];

        let response = self
            .http_client
            .post(&token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| GraphError::Auth(format!("Token request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GraphError::Auth(format!(
                "Token request failed with status {status}: {body}"
            )));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| GraphError::Auth(format!("Failed to parse token response: {e}")))?;

        Ok(CachedToken {
            access_token: token_response.access_token,
            expires_at: Utc::now() + Duration::seconds(token_response.expires_in),
        })
    }
}
