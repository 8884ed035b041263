//! Minimal client for the [Scryfall](https://scryfall.com/docs/api) card search API
//!
//! Only the `GET /cards/search` endpoint is covered. Raw card records are
//! normalized into [`Card`], with absent optional fields replaced by empty
//! strings or zero so callers never have to unwrap.
//!
//! # Example
//!
//! ```no_run
//! use scryfall_api::ScryfallClient;
//!
//! # async fn example() {
//! let client = ScryfallClient::new();
//!
//! // Failures and "no match" both come back as an empty list
//! for card in client.search("lightning bolt", 10).await {
//!     println!("{} ({})", card.name, card.set_name);
//! }
//! # }
//! ```

mod client;
mod error;
mod types;

pub use client::ScryfallClient;
pub use error::{Result, ScryfallError};
pub use types::{ApiErrorBody, Card, CardFace, CardList, ImageUris, RawCard, SearchResponse};
