//! Error types for the Scryfall client

use std::fmt;

/// Errors that can occur when searching Scryfall
#[derive(Debug)]
pub enum ScryfallError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// Failed to parse JSON response
    Json(serde_json::Error),
    /// Scryfall answered with an error object
    Api {
        status: u16,
        code: String,
        details: String,
    },
}

impl ScryfallError {
    /// True when Scryfall simply found no cards for the query
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { code, .. } if code == "not_found")
    }
}

impl fmt::Display for ScryfallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "Scryfall HTTP error: {}", e),
            Self::Json(e) => write!(f, "Scryfall JSON parse error: {}", e),
            Self::Api {
                status,
                code,
                details,
            } => write!(f, "Scryfall API error {} ({}): {}", status, code, details),
        }
    }
}

impl std::error::Error for ScryfallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Api { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ScryfallError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for ScryfallError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Result type for Scryfall operations
pub type Result<T> = std::result::Result<T, ScryfallError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ScryfallError::Api {
            status: 400,
            code: "bad_request".to_string(),
            details: "All of your terms were ignored.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Scryfall API error 400 (bad_request): All of your terms were ignored."
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_detection() {
        let err = ScryfallError::Api {
            status: 404,
            code: "not_found".to_string(),
            details: "Your query didn't match any cards.".to_string(),
        };
        assert!(err.is_not_found());
    }

    #[test]
    fn test_json_error_has_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ScryfallError::from(json_err);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("Scryfall JSON parse error"));
    }
}
