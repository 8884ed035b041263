//! Scryfall response types and the normalized [`Card`]

use serde::Deserialize;

/// Top-level body of a `/cards/search` response
#[derive(Debug, Deserialize)]
#[serde(tag = "object", rename_all = "lowercase")]
pub enum SearchResponse {
    List(CardList),
    Error(ApiErrorBody),
}

/// A page of search results
#[derive(Debug, Deserialize)]
pub struct CardList {
    #[serde(default)]
    pub data: Vec<RawCard>,
    #[serde(default)]
    pub has_more: bool,
    pub total_cards: Option<u64>,
}

/// Scryfall error object
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub code: String,
    #[serde(default)]
    pub details: String,
}

/// A card record as Scryfall returns it
#[derive(Debug, Clone, Deserialize)]
pub struct RawCard {
    pub id: String,
    pub name: String,
    pub mana_cost: Option<String>,
    pub type_line: Option<String>,
    pub oracle_text: Option<String>,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub loyalty: Option<String>,
    pub cmc: Option<f64>,
    pub colors: Option<Vec<String>>,
    pub rarity: Option<String>,
    pub set_name: Option<String>,
    pub scryfall_uri: Option<String>,
    pub image_uris: Option<ImageUris>,
    pub card_faces: Option<Vec<CardFace>>,
    pub artist: Option<String>,
}

/// Image URLs in the sizes Scryfall renders
#[derive(Debug, Clone, Deserialize)]
pub struct ImageUris {
    pub small: Option<String>,
    pub normal: Option<String>,
    pub large: Option<String>,
    pub png: Option<String>,
}

/// One face of a multi-faced card
#[derive(Debug, Clone, Deserialize)]
pub struct CardFace {
    pub name: Option<String>,
    pub image_uris: Option<ImageUris>,
}

/// Normalized card used by the rest of the plugin
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub mana_cost: String,
    pub type_line: String,
    pub oracle_text: String,
    pub power: String,
    pub toughness: String,
    pub loyalty: String,
    pub cmc: f64,
    pub colors: Vec<String>,
    pub rarity: String,
    pub set_name: String,
    pub scryfall_uri: String,
    pub image_uri: Option<String>,
    pub artist: String,
}

impl From<RawCard> for Card {
    fn from(raw: RawCard) -> Self {
        // Multi-faced cards only carry images on their faces
        let image_uri = raw
            .image_uris
            .as_ref()
            .and_then(|uris| uris.normal.clone())
            .or_else(|| {
                raw.card_faces
                    .as_ref()
                    .and_then(|faces| faces.first())
                    .and_then(|face| face.image_uris.as_ref())
                    .and_then(|uris| uris.normal.clone())
            });

        Self {
            id: raw.id,
            name: raw.name,
            mana_cost: raw.mana_cost.unwrap_or_default(),
            type_line: raw.type_line.unwrap_or_default(),
            oracle_text: raw.oracle_text.unwrap_or_default(),
            power: raw.power.unwrap_or_default(),
            toughness: raw.toughness.unwrap_or_default(),
            loyalty: raw.loyalty.unwrap_or_default(),
            cmc: raw.cmc.unwrap_or(0.0),
            colors: raw.colors.unwrap_or_default(),
            rarity: raw.rarity.unwrap_or_default(),
            set_name: raw.set_name.unwrap_or_default(),
            scryfall_uri: raw.scryfall_uri.unwrap_or_default(),
            image_uri,
            artist: raw.artist.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_deserialization() {
        let json = r#"{
            "object": "list",
            "total_cards": 1,
            "has_more": false,
            "data": [{
                "object": "card",
                "id": "e3285e6b-3e79-4d7c-bf96-d920f973b122",
                "name": "Lightning Bolt",
                "mana_cost": "{R}",
                "cmc": 1.0,
                "type_line": "Instant",
                "oracle_text": "Lightning Bolt deals 3 damage to any target.",
                "colors": ["R"],
                "rarity": "common",
                "set_name": "Limited Edition Alpha",
                "scryfall_uri": "https://scryfall.com/card/lea/161/lightning-bolt",
                "image_uris": {
                    "small": "https://cards.scryfall.io/small/front/e/3/e3285e6b.jpg",
                    "normal": "https://cards.scryfall.io/normal/front/e/3/e3285e6b.jpg"
                },
                "artist": "Christopher Rush"
            }]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        let SearchResponse::List(list) = response else {
            panic!("expected a list response");
        };
        assert_eq!(list.total_cards, Some(1));
        assert_eq!(list.data.len(), 1);

        let card = Card::from(list.data[0].clone());
        assert_eq!(card.name, "Lightning Bolt");
        assert_eq!(card.mana_cost, "{R}");
        assert_eq!(card.cmc, 1.0);
        assert_eq!(card.colors, vec!["R".to_string()]);
        assert_eq!(
            card.image_uri.as_deref(),
            Some("https://cards.scryfall.io/normal/front/e/3/e3285e6b.jpg")
        );
        assert_eq!(card.power, "");
        assert_eq!(card.loyalty, "");
    }

    #[test]
    fn test_error_response_deserialization() {
        let json = r#"{
            "object": "error",
            "code": "not_found",
            "status": 404,
            "details": "Your query didn't match any cards. Adjust your search terms or refer to the syntax guide at https://scryfall.com/docs/reference"
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        let SearchResponse::Error(err) = response else {
            panic!("expected an error response");
        };
        assert_eq!(err.status, 404);
        assert_eq!(err.code, "not_found");
    }

    #[test]
    fn test_card_face_image_fallback() {
        let json = r#"{
            "id": "abc",
            "name": "Delver of Secrets // Insectile Aberration",
            "card_faces": [
                { "name": "Delver of Secrets", "image_uris": { "normal": "https://img/front.jpg" } },
                { "name": "Insectile Aberration", "image_uris": { "normal": "https://img/back.jpg" } }
            ]
        }"#;

        let raw: RawCard = serde_json::from_str(json).unwrap();
        let card = Card::from(raw);
        assert_eq!(card.image_uri.as_deref(), Some("https://img/front.jpg"));
        assert_eq!(card.mana_cost, "");
        assert_eq!(card.cmc, 0.0);
        assert!(card.colors.is_empty());
    }

    #[test]
    fn test_card_without_any_image() {
        let raw: RawCard = serde_json::from_str(r#"{"id": "x", "name": "Plainless"}"#).unwrap();
        assert!(Card::from(raw).image_uri.is_none());
    }
}
