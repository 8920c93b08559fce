//! eBay search integration: wire types for the Finding and Browse APIs, the
//! OAuth token cache, item normalization, the search gateway, and the
//! account-deletion notification handshake.

pub mod client;
pub mod error;
pub mod gateway;
pub mod normalize;
pub mod notification;
pub mod token;
pub mod types;

pub use client::{EbayClient, EbayEndpoints};
pub use error::EbayError;
pub use gateway::{SearchGateway, SearchOutcome};
pub use normalize::{normalize, UpstreamRecord};
pub use notification::{
    challenge_response, extract_challenge_code, NotificationError, NotificationRecord,
    SIGNATURE_HEADER,
};
pub use token::{CachedToken, ClientCredentials, TokenCache};
