//! HTTP client for the eBay Finding and Browse APIs.
//!
//! Wraps `reqwest` with eBay-specific authentication (app id in the query
//! string for Finding, OAuth bearer for Browse), a fixed marketplace, and
//! typed response deserialization. Nothing here retries: every failure is
//! surfaced to the caller on the first attempt.

use std::time::Duration;

use ebrelay_core::{AppConfig, EbayEnvironment};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, Url};

use crate::error::EbayError;
use crate::token::{ClientCredentials, TokenCache};
use crate::types::{BrowseSearchResponse, FindingItem, FindingResponse, ItemSummary};

const PRODUCTION_FINDING_BASE: &str = "https://svcs.ebay.com/";
const SANDBOX_FINDING_BASE: &str = "https://svcs.sandbox.ebay.com/";
const PRODUCTION_API_BASE: &str = "https://api.ebay.com/";
const SANDBOX_API_BASE: &str = "https://api.sandbox.ebay.com/";

const FINDING_PATH: &str = "services/search/FindingService/v1";
const BROWSE_SEARCH_PATH: &str = "buy/browse/v1/item_summary/search";
const TOKEN_PATH: &str = "identity/v1/oauth2/token";

/// Results per page on both paths.
const PAGE_SIZE: &str = "20";
const FINDING_GLOBAL_ID: &str = "EBAY-FR";
const BROWSE_MARKETPLACE_ID: &str = "EBAY_FR";

const MARKETPLACE_HEADER: &str = "X-EBAY-C-MARKETPLACE-ID";
const END_USER_CTX_HEADER: &str = "X-EBAY-C-ENDUSERCTX";

/// Resolved URLs for the three eBay endpoints the relay calls.
#[derive(Debug, Clone)]
pub struct EbayEndpoints {
    pub finding: Url,
    pub browse_search: Url,
    pub token: Url,
}

impl EbayEndpoints {
    /// Production or sandbox hosts.
    ///
    /// # Errors
    ///
    /// Never in practice; the hosts are constants. Kept fallible to share
    /// [`EbayEndpoints::from_base_urls`].
    pub fn for_environment(env: EbayEnvironment) -> Result<Self, EbayError> {
        match env {
            EbayEnvironment::Production => {
                Self::from_base_urls(PRODUCTION_FINDING_BASE, PRODUCTION_API_BASE)
            }
            EbayEnvironment::Sandbox => Self::from_base_urls(SANDBOX_FINDING_BASE, SANDBOX_API_BASE),
        }
    }

    /// Custom hosts (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`EbayError::InvalidBaseUrl`] if either base is not a valid URL.
    pub fn from_base_urls(finding_base: &str, api_base: &str) -> Result<Self, EbayError> {
        let finding_base = parse_base(finding_base)?;
        let api_base = parse_base(api_base)?;
        Ok(Self {
            finding: join(&finding_base, FINDING_PATH)?,
            browse_search: join(&api_base, BROWSE_SEARCH_PATH)?,
            token: join(&api_base, TOKEN_PATH)?,
        })
    }
}

/// Ensures exactly one trailing slash so `join` appends instead of replacing
/// the last path segment.
fn parse_base(base: &str) -> Result<Url, EbayError> {
    let normalised = format!("{}/", base.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| EbayError::InvalidBaseUrl {
        url: base.to_owned(),
        reason: e.to_string(),
    })
}

fn join(base: &Url, path: &str) -> Result<Url, EbayError> {
    base.join(path).map_err(|e| EbayError::InvalidBaseUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })
}

/// Client for the eBay search APIs.
///
/// Owns the Browse API [`TokenCache`]; share the client (or the gateway that
/// wraps it) behind an `Arc` so every request sees the same cached token.
pub struct EbayClient {
    client: Client,
    endpoints: EbayEndpoints,
    app_id: Option<String>,
    end_user_ctx: Option<String>,
    token_cache: TokenCache,
}

impl EbayClient {
    /// Creates a client pointed at the production or sandbox hosts selected
    /// by `config.env`.
    ///
    /// # Errors
    ///
    /// Returns [`EbayError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, EbayError> {
        Self::with_endpoints(config, EbayEndpoints::for_environment(config.env)?)
    }

    /// Creates a client with custom endpoints (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`EbayError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_endpoints(config: &AppConfig, endpoints: EbayEndpoints) -> Result<Self, EbayError> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .user_agent("ebrelay/0.1 (search-relay)")
            .build()?;

        let credentials = config
            .oauth_credentials()
            .map(|(app_id, secret)| ClientCredentials::new(app_id, secret));
        let token_cache = TokenCache::new(client.clone(), endpoints.token.clone(), credentials);

        Ok(Self {
            client,
            endpoints,
            app_id: config.app_id.clone(),
            end_user_ctx: config.end_user_ctx.clone(),
            token_cache,
        })
    }

    #[must_use]
    pub fn has_app_id(&self) -> bool {
        self.app_id.is_some()
    }

    #[must_use]
    pub fn has_oauth_credentials(&self) -> bool {
        self.token_cache.has_credentials()
    }

    #[must_use]
    pub fn token_cache(&self) -> &TokenCache {
        &self.token_cache
    }

    /// Keyword search through the legacy Finding API.
    ///
    /// # Errors
    ///
    /// - [`EbayError::MissingCredentials`] if no application id is configured.
    /// - [`EbayError::Http`] on network failure or timeout.
    /// - [`EbayError::UnexpectedStatus`] on a non-2xx response.
    /// - [`EbayError::ApiError`] if eBay acknowledges the call as a failure.
    /// - [`EbayError::Deserialize`] if the body does not match the expected shape.
    pub async fn find_items_by_keywords(
        &self,
        keywords: &str,
    ) -> Result<Vec<FindingItem>, EbayError> {
        let app_id = self.app_id.as_deref().ok_or(EbayError::MissingCredentials)?;
        let url = self.finding_url(app_id, keywords);

        let response = self.client.get(url.clone()).send().await?;
        let body = read_json(response, &url).await?;
        check_finding_ack(&body)?;

        let parsed: FindingResponse =
            serde_json::from_value(body).map_err(|e| EbayError::Deserialize {
                context: format!("findItemsByKeywords(keywords={keywords})"),
                source: e,
            })?;
        Ok(parsed.into_items())
    }

    /// Item summary search through the Browse API, authenticated with the
    /// cached application token.
    ///
    /// # Errors
    ///
    /// - [`EbayError::MissingCredentials`] if the client secret or app id is missing.
    /// - Any token-cache error from [`TokenCache::acquire_token`].
    /// - [`EbayError::Http`] on network failure or timeout.
    /// - [`EbayError::UnexpectedStatus`] on a non-2xx response.
    /// - [`EbayError::Deserialize`] if the body does not match the expected shape.
    pub async fn search_item_summaries(&self, query: &str) -> Result<Vec<ItemSummary>, EbayError> {
        let token = self.token_cache.acquire_token().await?;
        let url = self.browse_url(query);

        let mut request = self
            .client
            .get(url.clone())
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json")
            .header(MARKETPLACE_HEADER, BROWSE_MARKETPLACE_ID);
        if let Some(ctx) = &self.end_user_ctx {
            request = request.header(END_USER_CTX_HEADER, ctx);
        }

        let response = request.send().await?;
        let body = read_json(response, &url).await?;
        let parsed: BrowseSearchResponse =
            serde_json::from_value(body).map_err(|e| EbayError::Deserialize {
                context: format!("item_summary/search(q={query})"),
                source: e,
            })?;
        Ok(parsed.item_summaries)
    }

    fn finding_url(&self, app_id: &str, keywords: &str) -> Url {
        let mut url = self.endpoints.finding.clone();
        url.query_pairs_mut()
            .append_pair("OPERATION-NAME", "findItemsByKeywords")
            .append_pair("SERVICE-VERSION", "1.0.0")
            .append_pair("SECURITY-APPNAME", app_id)
            .append_pair("RESPONSE-DATA-FORMAT", "JSON")
            .append_pair("REST-PAYLOAD", "true")
            .append_pair("keywords", keywords)
            .append_pair("paginationInput.entriesPerPage", PAGE_SIZE)
            .append_pair("GLOBAL-ID", FINDING_GLOBAL_ID);
        url
    }

    fn browse_url(&self, query: &str) -> Url {
        let mut url = self.endpoints.browse_search.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", PAGE_SIZE)
            .append_pair("marketplace_id", BROWSE_MARKETPLACE_ID);
        url
    }
}

/// Reads the response body, failing on a non-2xx status, and parses it as
/// JSON.
///
/// On a non-2xx status the body is kept (as JSON when it parses, as a string
/// otherwise) so it can be echoed in the error envelope.
///
/// # Errors
///
/// Returns [`EbayError::UnexpectedStatus`] on a non-2xx status,
/// [`EbayError::Http`] if the body cannot be read, and
/// [`EbayError::Deserialize`] if the body is not valid JSON.
pub(crate) async fn read_json(
    response: Response,
    url: &Url,
) -> Result<serde_json::Value, EbayError> {
    let status = response.status();
    let text = response.text().await?;
    let endpoint = without_query(url);

    if !status.is_success() {
        let body: Option<serde_json::Value> = serde_json::from_str(&text)
            .ok()
            .or_else(|| (!text.is_empty()).then(|| serde_json::Value::String(text)));
        return Err(EbayError::UnexpectedStatus {
            status: status.as_u16(),
            endpoint,
            body,
        });
    }

    serde_json::from_str(&text).map_err(|e| EbayError::Deserialize {
        context: endpoint,
        source: e,
    })
}

/// Query strings can carry the app id, so they never go into error messages.
fn without_query(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

/// Checks the Finding API `ack` field and turns `"Failure"` into an error
/// carrying the first `errorMessage[0].error[0].message[0]`.
fn check_finding_ack(body: &serde_json::Value) -> Result<(), EbayError> {
    let response = &body["findItemsByKeywordsResponse"][0];
    if response["ack"][0].as_str() != Some("Failure") {
        return Ok(());
    }
    let message = response["errorMessage"][0]["error"][0]["message"][0]
        .as_str()
        .unwrap_or("unknown error")
        .to_string();
    Err(EbayError::ApiError {
        message,
        body: body.clone(),
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
