//! Canonical item and response envelope shared by every search path.
//!
//! Whatever upstream produced a listing, callers only ever see a
//! [`CanonicalItem`] inside a [`SearchEnvelope`].

use serde::{Deserialize, Serialize};

/// Fixed label used by the legacy path when shipping costs nothing.
pub const FREE_SHIPPING_LABEL: &str = "Livraison gratuite";

/// Prefix for non-free shipping costs on the legacy path.
pub const SHIPPING_LABEL: &str = "Livraison";

const EMPTY_RESULT_MESSAGE: &str = "No items found for this search";

/// One normalized listing.
///
/// Every field is independently optional and always serialized, as `null`
/// when the upstream record did not carry it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalItem {
    pub title: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub alt: Option<String>,
    /// `"<amount> <currency>"`.
    pub price: Option<String>,
    pub shipping: Option<String>,
}

/// Uniform response returned by the search gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEnvelope {
    pub success: bool,
    pub count: usize,
    #[serde(default)]
    pub items: Vec<CanonicalItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Upstream error payload, when the provider returned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl SearchEnvelope {
    /// Success envelope. An empty item list is still a success but carries an
    /// explanatory message.
    #[must_use]
    pub fn found(items: Vec<CanonicalItem>, source: impl Into<String>) -> Self {
        let message = items.is_empty().then(|| EMPTY_RESULT_MESSAGE.to_string());
        Self {
            success: true,
            count: items.len(),
            items,
            source: Some(source.into()),
            message,
            note: None,
            error: None,
            details: None,
        }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>, details: Option<serde_json::Value>) -> Self {
        Self {
            success: false,
            count: 0,
            items: Vec::new(),
            source: None,
            message: None,
            note: None,
            error: Some(error.into()),
            details,
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Which integration served (or should serve) a search.
///
/// Callers ask for [`SearchPath::Legacy`] or [`SearchPath::Modern`];
/// [`SearchPath::Demo`] is picked by the gateway when credentials are absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPath {
    Demo,
    /// Finding API, app-id query-string auth.
    Legacy,
    /// Browse API, OAuth bearer auth.
    Modern,
}

impl SearchPath {
    #[must_use]
    pub fn source_label(self, sandbox: bool) -> &'static str {
        match (self, sandbox) {
            (SearchPath::Demo, _) => "Demo Mode - Configure your eBay API keys in .env",
            (SearchPath::Legacy, true) => "eBay Sandbox API",
            (SearchPath::Legacy, false) => "eBay Production API",
            (SearchPath::Modern, true) => "Browse API Sandbox",
            (SearchPath::Modern, false) => "Browse API Production",
        }
    }
}

impl std::fmt::Display for SearchPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchPath::Demo => write!(f, "demo"),
            SearchPath::Legacy => write!(f, "legacy"),
            SearchPath::Modern => write!(f, "modern"),
        }
    }
}
