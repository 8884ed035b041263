//! Scryfall HTTP client

use crate::error::{Result, ScryfallError};
use crate::types::{Card, SearchResponse};
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_USER_AGENT: &str = concat!("scryfall-api-rs/", env!("CARGO_PKG_VERSION"));

/// Client for the Scryfall card search endpoint
pub struct ScryfallClient {
    http: reqwest::Client,
    base_url: String,
    language: String,
}

impl ScryfallClient {
    /// Public Scryfall API
    pub const DEFAULT_BASE_URL: &'static str = "https://api.scryfall.com";
    /// Printing language requested when none is configured
    pub const DEFAULT_LANGUAGE: &'static str = "en";

    /// Create a new client against the public API (30 second timeout)
    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }

    /// Create a new client against a custom base URL
    pub fn with_base_url(base_url: &str) -> Self {
        Self::with_base_url_and_language(base_url, Self::DEFAULT_LANGUAGE)
    }

    /// Create a new client with a custom base URL and preferred language
    pub fn with_base_url_and_language(base_url: &str, language: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
        }
    }

    /// Search for cards, returning at most `max_results` of them
    ///
    /// Every failure (network, parse, or a Scryfall error object such as
    /// "no cards found") is logged and reported as an empty list.
    pub async fn search(&self, query: &str, max_results: usize) -> Vec<Card> {
        match self.try_search(query, max_results).await {
            Ok(cards) => cards,
            Err(e) if e.is_not_found() => {
                debug!(query, "No cards matched");
                Vec::new()
            }
            Err(e) => {
                warn!(query, error = %e, "Card search failed");
                Vec::new()
            }
        }
    }

    /// Search for cards, surfacing the underlying error
    pub async fn try_search(&self, query: &str, max_results: usize) -> Result<Vec<Card>> {
        let url = self.search_url(query);
        debug!(url = %url, "Searching Scryfall");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        // Scryfall returns its error object with a non-2xx status, so the
        // body is parsed either way.
        let body = response.bytes().await?;

        match serde_json::from_slice::<SearchResponse>(&body)? {
            SearchResponse::Error(err) => Err(ScryfallError::Api {
                status: err.status,
                code: err.code,
                details: err.details,
            }),
            SearchResponse::List(list) => {
                debug!(
                    total = list.total_cards.unwrap_or(0),
                    has_more = list.has_more,
                    "Scryfall search returned"
                );
                Ok(list
                    .data
                    .into_iter()
                    .take(max_results)
                    .map(Card::from)
                    .collect())
            }
        }
    }

    /// Build the first-page search URL for a query
    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/cards/search?q={}&format=json&include_extras=false&include_multilingual=false&include_variations=false&order=name&dir=asc&page=1&lang={}",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.language)
        )
    }
}

impl Default for ScryfallClient {
    fn default() -> Self {
        Self::new()
    }
}
