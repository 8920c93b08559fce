use std::net::SocketAddr;

/// Which eBay deployment the relay talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EbayEnvironment {
    Sandbox,
    Production,
}

impl EbayEnvironment {
    #[must_use]
    pub fn is_sandbox(self) -> bool {
        matches!(self, EbayEnvironment::Sandbox)
    }
}

impl std::fmt::Display for EbayEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EbayEnvironment::Sandbox => write!(f, "sandbox"),
            EbayEnvironment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: EbayEnvironment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub app_id: Option<String>,
    pub client_secret: Option<String>,
    pub site_id: String,
    pub notification_token: Option<String>,
    pub notification_endpoint: Option<String>,
    pub end_user_ctx: Option<String>,
    /// Acknowledge notification payloads without verifying `x-ebay-signature`.
    pub accept_unverified_notifications: bool,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// The legacy search path serves fixture data when no application id is set.
    #[must_use]
    pub fn is_demo_mode(&self) -> bool {
        self.app_id.is_none()
    }

    /// Both halves of the client-credentials pair, if configured.
    #[must_use]
    pub fn oauth_credentials(&self) -> Option<(&str, &str)> {
        match (&self.app_id, &self.client_secret) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }

    /// Human-readable mode for the startup banner.
    #[must_use]
    pub fn mode_label(&self) -> &'static str {
        if self.is_demo_mode() {
            "demo (no API key)"
        } else if self.env.is_sandbox() {
            "sandbox"
        } else {
            "production"
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("app_id", &self.app_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("site_id", &self.site_id)
            .field(
                "notification_token",
                &self.notification_token.as_ref().map(|_| "[redacted]"),
            )
            .field("notification_endpoint", &self.notification_endpoint)
            .field("end_user_ctx", &self.end_user_ctx)
            .field(
                "accept_unverified_notifications",
                &self.accept_unverified_notifications,
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
