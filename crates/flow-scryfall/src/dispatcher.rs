//! Routes one launcher invocation to its handler

use crate::config::{Icons, PluginConfig};
use crate::error::{PluginError, Result};
use crate::formatter::{cache_menu, format_card, help_menu};
use crate::types::{Invocation, Method, QueryResponse, Settings};
use card_image_cache::CardImageCache;
use scryfall_api::ScryfallClient;
use tracing::{debug, info, warn};

/// Query prefix for the cache management menu
pub const CACHE_TOKEN: &str = ":cache";
/// Query prefixes for the help menu
pub const HELP_TOKENS: [&str; 2] = [":help", ":?"];

/// Queries shorter than this return nothing
///
/// Counted in `char`s, so a single emoji is one character and stays below
/// the cut-off.
const MIN_QUERY_CHARS: usize = 2;

/// OS handler for opening paths and URLs
pub trait Opener {
    fn open(&self, target: &str) -> std::io::Result<()>;
}

/// Opens targets with the platform's default handler
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&self, target: &str) -> std::io::Result<()> {
        open::that_detached(target)
    }
}

/// What the process should write to stdout
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Respond(QueryResponse),
    Silent,
}

/// Handles one invocation against the search client and image cache
///
/// Built fresh for every process; holds no state between calls.
pub struct Dispatcher<O = SystemOpener> {
    settings: Settings,
    client: ScryfallClient,
    cache: CardImageCache,
    icons: Icons,
    opener: O,
}

impl<O: Opener> Dispatcher<O> {
    pub fn new(settings: Settings, config: &PluginConfig, opener: O) -> Self {
        let client = ScryfallClient::with_base_url_and_language(&config.api_url, &config.language);
        let cache = CardImageCache::new(config.cache_dir(), settings.cache_size);

        Self {
            settings,
            client,
            cache,
            icons: config.icons(),
            opener,
        }
    }

    pub async fn dispatch(&self, invocation: &Invocation) -> Result<Outcome> {
        match &invocation.method {
            Method::Query => {
                let text = invocation.first_parameter().unwrap_or_default();
                Ok(Outcome::Respond(self.handle_query(text).await?))
            }
            Method::Open => {
                let target = invocation
                    .first_parameter()
                    .ok_or(PluginError::MissingParameter("open"))?;
                info!(path = target, "Opening");
                self.opener.open(target)?;
                Ok(Outcome::Silent)
            }
            Method::DeleteCache => {
                self.cache.delete_all().await?;
                Ok(Outcome::Silent)
            }
            Method::Other(name) => {
                warn!(method = %name, "Ignoring unsupported method");
                Ok(Outcome::Silent)
            }
        }
    }

    async fn handle_query(&self, text: &str) -> Result<QueryResponse> {
        if text.chars().count() < MIN_QUERY_CHARS {
            return Ok(QueryResponse::empty());
        }

        if text.starts_with(CACHE_TOKEN) {
            let summary = self.cache.describe().await?;
            return Ok(QueryResponse {
                result: cache_menu(&summary, &self.icons),
            });
        }

        if HELP_TOKENS.iter().any(|token| text.starts_with(token)) {
            return Ok(QueryResponse {
                result: help_menu(&self.icons),
            });
        }

        Ok(self.search(text).await)
    }

    /// Debounce, search, then resolve each card image in order
    async fn search(&self, text: &str) -> QueryResponse {
        // The launcher spawns one process per keystroke; the delay lets a
        // newer invocation supersede this one before it hits the network.
        tokio::time::sleep(self.settings.search_delay).await;

        let cards = self.client.search(text, self.settings.max_results).await;
        debug!(query = text, count = cards.len(), "Search complete");

        let mut result = Vec::with_capacity(cards.len());
        for card in &cards {
            let artifact = self
                .cache
                .resolve(&card.id, card.image_uri.as_deref())
                .await;
            result.push(format_card(card, &artifact, &self.icons));
        }

        QueryResponse { result }
    }
}
