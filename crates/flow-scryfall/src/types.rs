//! Host launcher protocol types

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use std::time::Duration;

/// One JSON-RPC call from the launcher, passed as the process argument
#[derive(Debug, Clone, Deserialize)]
pub struct Invocation {
    pub method: Method,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub settings: Settings,
}

impl Invocation {
    pub fn first_parameter(&self) -> Option<&str> {
        self.parameters.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Query,
    Open,
    DeleteCache,
    /// Any method this plugin does not implement (e.g. `context_menu`)
    Other(String),
}

impl<'de> Deserialize<'de> for Method {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(match name.as_str() {
            "query" => Method::Query,
            "open" => Method::Open,
            "deleteCache" => Method::DeleteCache,
            _ => Method::Other(name),
        })
    }
}

/// Per-invocation plugin settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawSettings")]
pub struct Settings {
    pub search_delay: Duration,
    pub max_results: usize,
    pub cache_size: usize,
}

impl Settings {
    pub const DEFAULT_SEARCH_DELAY_MS: u64 = 69;
    pub const DEFAULT_MAX_RESULTS: usize = 10;
    pub const DEFAULT_CACHE_SIZE: usize = 100;
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_delay: Duration::from_millis(Self::DEFAULT_SEARCH_DELAY_MS),
            max_results: Self::DEFAULT_MAX_RESULTS,
            cache_size: Self::DEFAULT_CACHE_SIZE,
        }
    }
}

/// Settings as the launcher sends them: numbers or numeric strings
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    #[serde(default, deserialize_with = "lenient_u64")]
    search_delay: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    max_results: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    cache_size: Option<u64>,
}

impl From<RawSettings> for Settings {
    fn from(raw: RawSettings) -> Self {
        let defaults = Settings::default();
        Self {
            search_delay: raw
                .search_delay
                .map(Duration::from_millis)
                .unwrap_or(defaults.search_delay),
            max_results: raw
                .max_results
                .map(saturating_usize)
                .unwrap_or(defaults.max_results),
            cache_size: raw
                .cache_size
                .map(saturating_usize)
                .unwrap_or(defaults.cache_size),
        }
    }
}

fn saturating_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// Accept `12`, `12.0`, `"12"`; treat `null` and `""` as unset
fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Integer(u64),
        Float(f64),
        Text(String),
    }

    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Integer(n)) => Ok(Some(n)),
        Some(NumberOrText::Float(f)) if f.is_finite() && f >= 0.0 => Ok(Some(f as u64)),
        Some(NumberOrText::Float(f)) => Err(D::Error::custom(format!(
            "expected a non-negative number, got {}",
            f
        ))),
        Some(NumberOrText::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse().map(Some).map_err(|_| {
                D::Error::custom(format!("expected a non-negative number, got {:?}", text))
            })
        }
    }
}

/// Action the launcher performs when a result is selected
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcAction {
    pub method: String,
    pub parameters: Vec<String>,
}

impl JsonRpcAction {
    pub fn open(target: impl Into<String>) -> Self {
        Self {
            method: "open".to_string(),
            parameters: vec![target.into()],
        }
    }

    pub fn query(text: impl Into<String>) -> Self {
        Self {
            method: "query".to_string(),
            parameters: vec![text.into()],
        }
    }

    pub fn delete_cache() -> Self {
        Self {
            method: "deleteCache".to_string(),
            parameters: Vec::new(),
        }
    }
}

/// Inline preview for hosts that support it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Preview {
    pub file_path: String,
    pub description: String,
    pub is_media: bool,
}

/// One row in the launcher's result list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Subtitle")]
    pub subtitle: String,
    #[serde(rename = "JsonRPCAction")]
    pub action: JsonRpcAction,
    #[serde(rename = "IcoPath")]
    pub icon_path: String,
    pub score: i32,
    #[serde(rename = "Preview", skip_serializing_if = "Option::is_none")]
    pub preview: Option<Preview>,
}

/// Body written to stdout for every query
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResponse {
    pub result: Vec<DisplayRecord>,
}

impl QueryResponse {
    pub fn empty() -> Self {
        Self::default()
    }
}

pub(crate) fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
