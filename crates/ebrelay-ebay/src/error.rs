use thiserror::Error;

/// Errors returned by the eBay client, token cache, and search gateway.
#[derive(Debug, Error)]
pub enum EbayError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The OAuth path needs both the application id and the client secret.
    #[error("Missing EBAY_APP_ID or EBAY_CLIENT_SECRET")]
    MissingCredentials,

    /// eBay answered with a non-2xx status.
    #[error("Request failed with status code {status} ({endpoint})")]
    UnexpectedStatus {
        status: u16,
        /// Endpoint URL without its query string.
        endpoint: String,
        body: Option<serde_json::Value>,
    },

    /// The Finding API acknowledged the call with `"ack": ["Failure"]`.
    #[error("eBay API error: {message}")]
    ApiError {
        message: String,
        body: serde_json::Value,
    },

    /// The token endpoint answered 2xx without an `access_token`.
    #[error("OAuth token response did not contain an access_token")]
    MissingAccessToken,

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl EbayError {
    /// Upstream payload worth echoing back to the caller, if eBay sent one.
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            EbayError::UnexpectedStatus { body, .. } => body.clone(),
            EbayError::ApiError { body, .. } => Some(body.clone()),
            _ => None,
        }
    }
}
