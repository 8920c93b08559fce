//! Shared data model and configuration for the eBay search relay.

pub mod app_config;
pub mod config;
pub mod demo;
pub mod item;

use thiserror::Error;

pub use app_config::{AppConfig, EbayEnvironment};
pub use config::{load_app_config, load_app_config_from_env};
pub use demo::demo_envelope;
pub use item::{CanonicalItem, SearchEnvelope, SearchPath, FREE_SHIPPING_LABEL, SHIPPING_LABEL};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
