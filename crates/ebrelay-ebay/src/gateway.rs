//! Search gateway: one outbound call per inbound search, normalized into a
//! [`SearchEnvelope`].
//!
//! The gateway never returns an error. Upstream and configuration failures are
//! logged and folded into a `success: false` envelope so the HTTP layer can
//! always answer with well-formed JSON.

use ebrelay_core::{demo_envelope, AppConfig, EbayEnvironment, SearchEnvelope, SearchPath};

use crate::client::EbayClient;
use crate::error::EbayError;
use crate::normalize::{normalize, UpstreamRecord};

/// Result of one gateway search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The path that actually served the request (may be [`SearchPath::Demo`]
    /// even when `Legacy` was requested).
    pub path: SearchPath,
    pub envelope: SearchEnvelope,
}

impl SearchOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.envelope.success
    }
}

pub struct SearchGateway {
    client: EbayClient,
    sandbox: bool,
}

impl SearchGateway {
    #[must_use]
    pub fn new(client: EbayClient, env: EbayEnvironment) -> Self {
        Self {
            client,
            sandbox: env.is_sandbox(),
        }
    }

    /// Builds the client for `config.env` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`EbayError::Http`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, EbayError> {
        Ok(Self::new(EbayClient::new(config)?, config.env))
    }

    /// Legacy requests fall back to demo fixtures when no application id is
    /// configured. Modern requests are never downgraded.
    #[must_use]
    pub fn resolve(&self, requested: SearchPath) -> SearchPath {
        match requested {
            SearchPath::Legacy if !self.client.has_app_id() => SearchPath::Demo,
            other => other,
        }
    }

    pub async fn search(&self, query: &str, requested: SearchPath) -> SearchOutcome {
        let path = self.resolve(requested);
        let result = match path {
            SearchPath::Demo => {
                tracing::warn!(query, "no EBAY_APP_ID configured; returning demo listings");
                Ok(demo_envelope(query))
            }
            SearchPath::Legacy => self.search_legacy(query).await,
            SearchPath::Modern => self.search_modern(query).await,
        };

        let envelope = result.unwrap_or_else(|e| {
            let details = e.details();
            tracing::error!(%path, query, error = %e, ?details, "search failed");
            SearchEnvelope::failure(e.to_string(), details)
        });

        SearchOutcome { path, envelope }
    }

    async fn search_legacy(&self, query: &str) -> Result<SearchEnvelope, EbayError> {
        tracing::info!(query, "calling Finding API");
        let items = self.client.find_items_by_keywords(query).await?;
        Ok(self.envelope(
            SearchPath::Legacy,
            items.into_iter().map(UpstreamRecord::Legacy),
        ))
    }

    async fn search_modern(&self, query: &str) -> Result<SearchEnvelope, EbayError> {
        if !self.client.has_oauth_credentials() {
            return Err(EbayError::MissingCredentials);
        }
        tracing::info!(query, "calling Browse API");
        let items = self.client.search_item_summaries(query).await?;
        Ok(self.envelope(
            SearchPath::Modern,
            items.into_iter().map(UpstreamRecord::Modern),
        ))
    }

    fn envelope(
        &self,
        path: SearchPath,
        records: impl Iterator<Item = UpstreamRecord>,
    ) -> SearchEnvelope {
        let items: Vec<_> = records.map(normalize).collect();
        if items.is_empty() {
            tracing::info!(%path, "no items found in API response");
        } else {
            tracing::info!(%path, count = items.len(), "search returned items");
        }
        SearchEnvelope::found(items, path.source_label(self.sandbox))
    }
}
