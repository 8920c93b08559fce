//! Application-token cache for the Browse API.
//!
//! Holds at most one bearer token. A token is reused while it has more than
//! [`SAFETY_MARGIN`] left before expiry; otherwise a client-credentials grant
//! replaces it wholesale. The lock is only held to read or swap the snapshot,
//! never across the refresh call, so concurrent refreshes may both hit the
//! token endpoint and the last writer wins.

use std::time::{Duration, Instant};

use reqwest::{Client, Url};
use tokio::sync::RwLock;

use crate::client::read_json;
use crate::error::EbayError;
use crate::types::TokenResponse;

/// Lead time before expiry at which a cached token stops being served.
pub const SAFETY_MARGIN: Duration = Duration::from_secs(60);

/// Lifetime assumed when the token endpoint omits `expires_in`.
pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(7200);

const OAUTH_SCOPE: &str = "https://api.ebay.com/oauth/api_scope";

/// Application id and client secret for the client-credentials grant.
#[derive(Clone)]
pub struct ClientCredentials {
    app_id: String,
    client_secret: String,
}

impl ClientCredentials {
    #[must_use]
    pub fn new(app_id: &str, client_secret: &str) -> Self {
        Self {
            app_id: app_id.to_owned(),
            client_secret: client_secret.to_owned(),
        }
    }
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("app_id", &self.app_id)
            .field("client_secret", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct CachedToken {
    value: String,
    expires_at: Instant,
}

impl CachedToken {
    /// A lifetime too large to represent as an `Instant` falls back to
    /// [`DEFAULT_LIFETIME`].
    #[must_use]
    pub fn new(value: String, lifetime: Duration, now: Instant) -> Self {
        let expires_at = now
            .checked_add(lifetime)
            .or_else(|| now.checked_add(DEFAULT_LIFETIME))
            .unwrap_or(now);
        Self { value, expires_at }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// `now < expires_at - SAFETY_MARGIN`.
    #[must_use]
    pub fn is_usable_at(&self, now: Instant) -> bool {
        self.expires_at
            .checked_sub(SAFETY_MARGIN)
            .is_some_and(|deadline| now < deadline)
    }
}

/// Process-wide Browse API token, owned by the [`crate::EbayClient`].
#[derive(Debug)]
pub struct TokenCache {
    client: Client,
    token_url: Url,
    credentials: Option<ClientCredentials>,
    cached: RwLock<Option<CachedToken>>,
}

impl TokenCache {
    #[must_use]
    pub fn new(client: Client, token_url: Url, credentials: Option<ClientCredentials>) -> Self {
        Self {
            client,
            token_url,
            credentials,
            cached: RwLock::new(None),
        }
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Returns a usable bearer token, refreshing it from the token endpoint
    /// when none is cached or the cached one is inside the safety margin.
    ///
    /// # Errors
    ///
    /// - [`EbayError::MissingCredentials`] when no credentials are configured.
    /// - [`EbayError::Http`] / [`EbayError::UnexpectedStatus`] when the token
    ///   endpoint call fails.
    /// - [`EbayError::MissingAccessToken`] / [`EbayError::Deserialize`] when the
    ///   response cannot be used.
    pub async fn acquire_token(&self) -> Result<String, EbayError> {
        {
            let cached = self.cached.read().await;
            if let Some(token) = cached.as_ref().filter(|t| t.is_usable_at(Instant::now())) {
                return Ok(token.value.clone());
            }
        }

        let credentials = self
            .credentials
            .as_ref()
            .ok_or(EbayError::MissingCredentials)?;
        let fresh = self.request_token(credentials).await?;
        let value = fresh.value.clone();
        *self.cached.write().await = Some(fresh);
        Ok(value)
    }

    async fn request_token(
        &self,
        credentials: &ClientCredentials,
    ) -> Result<CachedToken, EbayError> {
        let response = self
            .client
            .post(self.token_url.clone())
            .basic_auth(&credentials.app_id, Some(&credentials.client_secret))
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", OAUTH_SCOPE),
            ])
            .send()
            .await?;

        let body = read_json(response, &self.token_url).await?;
        let parsed: TokenResponse =
            serde_json::from_value(body).map_err(|e| EbayError::Deserialize {
                context: "oauth2 token response".to_owned(),
                source: e,
            })?;

        let value = parsed
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(EbayError::MissingAccessToken)?;
        let lifetime = parsed.expires_in.map_or(DEFAULT_LIFETIME, Duration::from_secs);

        tracing::info!(
            expires_in_secs = lifetime.as_secs(),
            "oauth: refreshed Browse API application token"
        );
        Ok(CachedToken::new(value, lifetime, Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_with_thirty_seconds_left_is_not_usable() {
        let now = Instant::now();
        let token = CachedToken::new("t".to_owned(), Duration::from_secs(30), now);
        assert!(!token.is_usable_at(now));
    }

    #[test]
    fn token_with_two_minutes_left_is_usable() {
        let now = Instant::now();
        let token = CachedToken::new("t".to_owned(), Duration::from_secs(120), now);
        assert!(token.is_usable_at(now));
        assert!(token.is_usable_at(now + Duration::from_secs(59)));
        assert!(!token.is_usable_at(now + Duration::from_secs(60)));
    }

    #[test]
    fn default_lifetime_token_is_usable_for_most_of_its_life() {
        let now = Instant::now();
        let token = CachedToken::new("t".to_owned(), DEFAULT_LIFETIME, now);
        assert!(token.is_usable_at(now + Duration::from_secs(7_000)));
        assert!(!token.is_usable_at(now + Duration::from_secs(7_140)));
    }

    #[test]
    fn unrepresentable_lifetime_falls_back_to_default() {
        let now = Instant::now();
        let token = CachedToken::new("t".to_owned(), Duration::from_secs(u64::MAX), now);
        assert!(token.is_usable_at(now));
        assert!(!token.is_usable_at(now + DEFAULT_LIFETIME));
    }

    #[test]
    fn credentials_debug_redacts_secret() {
        let creds = ClientCredentials::new("MyApp-PRD-123", "PRD-secret");
        let debug = format!("{creds:?}");
        assert!(debug.contains("MyApp-PRD-123"));
        assert!(!debug.contains("PRD-secret"));
    }

    #[tokio::test]
    async fn acquire_without_credentials_fails_before_any_request() {
        let url = Url::parse("http://127.0.0.1:9/identity/v1/oauth2/token").expect("url");
        let cache = TokenCache::new(Client::new(), url, None);
        let result = cache.acquire_token().await;
        assert!(matches!(result, Err(EbayError::MissingCredentials)));
    }
}
