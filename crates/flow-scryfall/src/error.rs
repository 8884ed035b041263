//! Error types for the Flow Scryfall plugin

use std::fmt;

#[derive(Debug)]
pub enum PluginError {
    /// Invocation payload could not be read or parsed
    Payload(String),
    /// A method was invoked without the parameter it needs
    MissingParameter(&'static str),
    Cache(card_image_cache::CacheError),
    Io(Box<std::io::Error>),
    Config(String),
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginError::Payload(msg) => write!(f, "Invalid invocation payload: {}", msg),
            PluginError::MissingParameter(method) => {
                write!(f, "Method '{}' requires a parameter", method)
            }
            PluginError::Cache(err) => write!(f, "Cache error: {}", err),
            PluginError::Io(err) => write!(f, "IO error: {}", err),
            PluginError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for PluginError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PluginError::Cache(err) => Some(err),
            PluginError::Io(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<card_image_cache::CacheError> for PluginError {
    fn from(err: card_image_cache::CacheError) -> Self {
        PluginError::Cache(err)
    }
}

impl From<std::io::Error> for PluginError {
    fn from(err: std::io::Error) -> Self {
        PluginError::Io(Box::new(err))
    }
}

impl From<serde_json::Error> for PluginError {
    fn from(err: serde_json::Error) -> Self {
        PluginError::Payload(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PluginError>;
