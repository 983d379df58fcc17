//! Error types and HTTP status classification for metadata operations

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Main error type for metadata operations
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failure reported by a reader or session collaborator. The message is
    /// passed through verbatim so that embedded status codes survive.
    #[error("{0}")]
    Sdk(String),

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Specialized Result type for metadata operations
pub type Result<T> = std::result::Result<T, MetadataError>;

impl From<serde_json::Error> for MetadataError {
    fn from(err: serde_json::Error) -> Self {
        MetadataError::Serialization(err.to_string())
    }
}

/// Outward status and detail for a failed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorClass {
    pub status: u16,
    pub detail: String,
}

fn http_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"HTTP (\d{3})\b").expect("static regex is valid"))
}

/// Find an `HTTP nnn` status code embedded in a collaborator message.
///
/// Only codes in the 100..=599 range are accepted.
pub fn embedded_status(message: &str) -> Option<u16> {
    http_code_pattern()
        .captures_iter(message)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u16>().ok())
        .find(|code| (100..=599).contains(code))
}

impl MetadataError {
    /// Map this error to the status code and detail returned to the caller.
    ///
    /// Credential failures are always 401. Otherwise an embedded `HTTP nnn`
    /// code wins over the error category, and anything not classified becomes
    /// a 500 carrying the message.
    pub fn classify(&self) -> ErrorClass {
        let detail = self.to_string();
        if let MetadataError::Authorization(_) = self {
            return ErrorClass {
                status: 401,
                detail,
            };
        }
        if let Some(status) = embedded_status(&detail) {
            return ErrorClass { status, detail };
        }

        let status = match self {
            MetadataError::Authorization(_) => 401,
            MetadataError::InvalidInput(_) | MetadataError::InvalidUrl(_) => 400,
            _ => 500,
        };
        ErrorClass { status, detail }
    }

    /// Whether the status comes from the error itself rather than the caller
    pub fn is_classified(&self) -> bool {
        matches!(self, MetadataError::Authorization(_))
            || embedded_status(&self.to_string()).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_code_passes_through() {
        let err = MetadataError::Sdk("open failed: [seismic-store] HTTP 404 dataset missing".into());
        let class = err.classify();
        assert_eq!(class.status, 404);
        assert_eq!(
            class.detail,
            "open failed: [seismic-store] HTTP 404 dataset missing"
        );
    }

    #[test]
    fn test_unclassified_sdk_error_is_internal() {
        let err = MetadataError::Sdk("segmentation of brick failed".into());
        assert_eq!(err.classify().status, 500);
        assert!(!err.is_classified());
    }

    #[test]
    fn test_category_statuses() {
        assert_eq!(MetadataError::Authorization("x".into()).classify().status, 401);
        assert_eq!(MetadataError::InvalidInput("x".into()).classify().status, 400);
        assert_eq!(MetadataError::Computation("x".into()).classify().status, 500);
    }

    #[test]
    fn test_out_of_range_code_ignored() {
        assert_eq!(embedded_status("HTTP 999 nonsense"), None);
        assert_eq!(embedded_status("HTTP 999 then HTTP 403"), Some(403));
        assert_eq!(embedded_status("HTTP/1.1 404"), None);
    }

    #[test]
    fn test_embedded_code_needs_word_boundary() {
        assert_eq!(embedded_status("HTTP 4041 upstream"), None);
        assert_eq!(embedded_status("failed with HTTP 404."), Some(404));
        assert_eq!(embedded_status("HTTP 4041 then HTTP 503"), Some(503));
    }

    #[test]
    fn test_authorization_ignores_embedded_code() {
        let err = MetadataError::Authorization("token rejected: HTTP 403 Forbidden".into());
        let class = err.classify();
        assert_eq!(class.status, 401);
        assert_eq!(
            class.detail,
            "Authorization failed: token rejected: HTTP 403 Forbidden"
        );
    }
}
