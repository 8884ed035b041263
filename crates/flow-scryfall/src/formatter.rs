//! Shapes cards and fixed menus into launcher result rows

use crate::config::Icons;
use crate::types::{path_string, DisplayRecord, JsonRpcAction, Preview};
use card_image_cache::{CacheSummary, ResolvedArtifact};
use scryfall_api::Card;

pub const SYNTAX_DOCS_URL: &str = "https://scryfall.com/docs/syntax";
pub const QUICKLOOK_URL: &str = "https://github.com/QL-Win/QuickLook";

/// Build the result row for one card
pub fn format_card(card: &Card, artifact: &ResolvedArtifact, icons: &Icons) -> DisplayRecord {
    let preview = artifact
        .cached_path()
        .filter(|path| path.is_file())
        .map(|path| Preview {
            file_path: path_string(path),
            description: format!("{} - {}", card.name, card.set_name),
            is_media: true,
        });

    DisplayRecord {
        title: card.name.clone(),
        subtitle: card_subtitle(card),
        action: JsonRpcAction::open(card.scryfall_uri.clone()),
        icon_path: path_string(artifact.path_or(&icons.app)),
        score: 0,
        preview,
    }
}

/// One-line summary: cost, type, stats, rarity, set
pub fn card_subtitle(card: &Card) -> String {
    let mut subtitle = String::new();

    if !card.mana_cost.is_empty() {
        subtitle.push_str(&card.mana_cost);
        subtitle.push(' ');
    }

    subtitle.push_str(&card.type_line);

    if !card.power.is_empty() && !card.toughness.is_empty() {
        subtitle.push_str(&format!(" | {}/{}", card.power, card.toughness));
    } else if !card.loyalty.is_empty() {
        subtitle.push_str(&format!(" | Loyalty: {}", card.loyalty));
    }

    if !card.rarity.is_empty() {
        subtitle.push_str(" | ");
        subtitle.push_str(&capitalize(&card.rarity));
    }

    if !card.set_name.is_empty() {
        subtitle.push_str(" | ");
        subtitle.push_str(&card.set_name);
    }

    subtitle
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Rows offered for the `:cache` keyword
pub fn cache_menu(summary: &CacheSummary, icons: &Icons) -> Vec<DisplayRecord> {
    let directory = path_string(&summary.directory);

    vec![
        DisplayRecord {
            title: "Delete Card Image Cache".to_string(),
            subtitle: format!("{} cached images at {}", summary.count, directory),
            action: JsonRpcAction::delete_cache(),
            icon_path: path_string(&icons.trash),
            score: 0,
            preview: None,
        },
        DisplayRecord {
            title: "Open Card Image Cache".to_string(),
            subtitle: directory.clone(),
            action: JsonRpcAction::open(directory),
            icon_path: path_string(&icons.folder),
            score: 10,
            preview: None,
        },
    ]
}

/// Rows offered for the `:help` / `:?` keywords
pub fn help_menu(icons: &Icons) -> Vec<DisplayRecord> {
    vec![
        DisplayRecord {
            title: "Scryfall Search Documentation".to_string(),
            subtitle: "'Lightning Bolt', 'c:red cmc:1', 'type:creature power>=4'".to_string(),
            action: JsonRpcAction::open(SYNTAX_DOCS_URL),
            icon_path: path_string(&icons.scryfall),
            score: 1,
            preview: None,
        },
        DisplayRecord {
            title: "Manage Card Image Cache".to_string(),
            subtitle: "Try ':cache' to manage (delete) cached card images".to_string(),
            action: JsonRpcAction::query(crate::dispatcher::CACHE_TOKEN),
            icon_path: path_string(&icons.trash),
            score: 0,
            preview: None,
        },
        DisplayRecord {
            title: "QuickLook (requires QL FlowLauncher plugin)".to_string(),
            subtitle: "F1 will preview card images in quicklook if it is installed".to_string(),
            action: JsonRpcAction::open(QUICKLOOK_URL),
            icon_path: path_string(&icons.quicklook),
            score: 0,
            preview: None,
        },
    ]
}
