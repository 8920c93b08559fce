//! `search` subcommand: query a running relay and print the result.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use ebrelay_core::SearchEnvelope;
use reqwest::Url;

use crate::render;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const PAGE_SIZE: &str = "20";

/// Relay endpoint to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SearchApi {
    /// Browse API (OAuth)
    Browse,
    /// Finding API, or demo listings when the server has no app id
    Search,
}

impl SearchApi {
    fn route(self) -> &'static str {
        match self {
            SearchApi::Browse => "/api/ebay/browse",
            SearchApi::Search => "/api/ebay/search",
        }
    }
}

/// Fetches results and prints them as cards.
///
/// # Errors
///
/// Returns an error if the server URL is invalid, the server cannot be
/// reached, or the response is not a search envelope.
pub(crate) async fn run_search(server: &str, api: SearchApi, query: &str) -> anyhow::Result<()> {
    let envelope = fetch_envelope(server, api, query).await?;
    print!("{}", render::render_envelope(&envelope));
    Ok(())
}

pub(crate) async fn fetch_envelope(
    server: &str,
    api: SearchApi,
    query: &str,
) -> anyhow::Result<SearchEnvelope> {
    let url = search_url(server, api, query)?;
    tracing::debug!(%url, "fetching search results");

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    let response = client.get(url).send().await.with_context(|| {
        format!("Impossible de joindre le serveur {server}; vérifiez que le backend est lancé")
    })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .context("lecture de la réponse du serveur impossible")?;

    // Failure envelopes come back with a 500; anything else unparseable on an
    // error status is reported through the envelope too.
    match serde_json::from_str::<SearchEnvelope>(&body) {
        Ok(envelope) => Ok(envelope),
        Err(_) if !status.is_success() => Ok(SearchEnvelope::failure(
            format!("API request failed: {status}"),
            None,
        )),
        Err(e) => Err(e).context("réponse du serveur illisible"),
    }
}

fn search_url(server: &str, api: SearchApi, query: &str) -> anyhow::Result<Url> {
    let mut url = Url::parse(server).with_context(|| format!("URL de serveur invalide: {server}"))?;
    url.set_path(api.route());
    url.query_pairs_mut()
        .append_pair("query", query)
        .append_pair("limit", PAGE_SIZE);
    Ok(url)
}
