//! Error types for the card image cache

use std::fmt;

#[derive(Debug)]
pub enum CacheError {
    Io(Box<std::io::Error>),
    Http(Box<reqwest::Error>),
    /// Image host answered with a non-success status
    Status(u16),
    /// Identity cannot be used as a file name
    InvalidKey(String),
    InvalidUrl(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Io(err) => write!(f, "IO error: {}", err),
            CacheError::Http(err) => write!(f, "HTTP error: {}", err),
            CacheError::Status(status) => write!(f, "Image host returned status {}", status),
            CacheError::InvalidKey(key) => write!(f, "Invalid cache key: {:?}", key),
            CacheError::InvalidUrl(msg) => write!(f, "Invalid image URL: {}", msg),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::Io(err) => Some(err.as_ref()),
            CacheError::Http(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CacheError {
    fn from(err: std::io::Error) -> Self {
        CacheError::Io(Box::new(err))
    }
}

impl From<reqwest::Error> for CacheError {
    fn from(err: reqwest::Error) -> Self {
        CacheError::Http(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
