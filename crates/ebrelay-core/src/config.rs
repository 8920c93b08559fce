use crate::app_config::{AppConfig, EbayEnvironment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional. Blank values are treated as unset so that an
/// `.env` line like `EBAY_CLIENT_SECRET=` does not count as a credential.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_flag = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match optional(var) {
            None => Ok(default),
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| invalid(var, format!("expected true or false, got '{raw}'"))),
        }
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let port = or_default("PORT", "3001")
        .parse::<u16>()
        .map_err(|e| invalid("PORT", e.to_string()))?;
    let host = or_default("EBRELAY_BIND_HOST", "0.0.0.0");
    let bind_addr = format!("{host}:{port}")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("EBRELAY_BIND_HOST", e.to_string()))?;

    let env = if parse_flag("EBAY_SANDBOX", false)? {
        EbayEnvironment::Sandbox
    } else {
        EbayEnvironment::Production
    };

    let request_timeout_secs = parse_u64("EBRELAY_REQUEST_TIMEOUT_SECS", "12")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "EBRELAY_REQUEST_TIMEOUT_SECS",
            "timeout must be at least 1 second".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level: or_default("EBRELAY_LOG_LEVEL", "info"),
        app_id: optional("EBAY_APP_ID"),
        client_secret: optional("EBAY_CLIENT_SECRET"),
        site_id: or_default("EBAY_SITE_ID", "71"),
        notification_token: optional("EBAY_NOTIFICATION_TOKEN"),
        notification_endpoint: optional("EBAY_NOTIFICATION_ENDPOINT"),
        end_user_ctx: optional("EBAY_ENDUSERCTX"),
        accept_unverified_notifications: parse_flag("EBAY_NOTIFICATIONS_UNVERIFIED", true)?,
        request_timeout_secs,
    })
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
