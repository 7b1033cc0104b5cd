use std::fmt;

/// Error type for SDK and CLI operations
#[derive(Debug)]
pub enum PsError {
    /// HTTP request failed (connect, timeout, body read)
    Http(reqwest::Error),
    /// API returned a non-success status
    Api { status: u16, message: String },
    /// Caller supplied an unusable argument; never reaches the network
    InvalidArgument(String),
    /// `get_next()` called on a pager with no more pages
    Exhausted,
    /// A `next` link could not be followed
    Pagination(String),
    /// JSON decoding error
    Json(String),
    /// No credentials found in any source
    CredentialsNotFound(String),
    /// Failed to read or parse the credentials file
    Credentials(String),
    /// Configuration error
    Config(String),
}

impl fmt::Display for PsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PsError::Http(e) => write!(f, "HTTP request failed: {}", e),
            PsError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            PsError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            PsError::Exhausted => write!(f, "no more results available"),
            PsError::Pagination(msg) => write!(f, "Pagination error: {}", msg),
            PsError::Json(msg) => write!(f, "JSON error: {}", msg),
            PsError::CredentialsNotFound(msg) => write!(f, "{}", msg),
            PsError::Credentials(msg) => write!(f, "{}", msg),
            PsError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for PsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PsError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PsError {
    fn from(err: reqwest::Error) -> Self {
        PsError::Http(err)
    }
}

impl From<serde_json::Error> for PsError {
    fn from(err: serde_json::Error) -> Self {
        PsError::Json(err.to_string())
    }
}

impl From<std::io::Error> for PsError {
    fn from(err: std::io::Error) -> Self {
        PsError::Credentials(err.to_string())
    }
}

impl PsError {
    /// Shorthand for [`PsError::InvalidArgument`]
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        PsError::InvalidArgument(msg.into())
    }
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, PsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = PsError::Api {
            status: 404,
            message: "Not found".to_string(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("Not found"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PsError>();
    }

    #[test]
    fn test_exhausted_display() {
        assert_eq!(PsError::Exhausted.to_string(), "no more results available");
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = PsError::invalid("the 'start' field should not be set");
        assert!(err.to_string().starts_with("Invalid argument"));
        assert!(err.to_string().contains("'start'"));
    }

    #[test]
    fn test_pagination_error_display() {
        let err = PsError::Pagination("bad link".to_string());
        assert!(err.to_string().contains("Pagination error"));
    }

    #[test]
    fn test_config_error_display() {
        let err = PsError::Config("Missing service URL".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("Missing service URL"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: PsError = json_err.into();
        match err {
            PsError::Json(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected PsError::Json"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PsError = io_err.into();
        match err {
            PsError::Credentials(msg) => assert!(msg.contains("file not found")),
            _ => panic!("Expected PsError::Credentials"),
        }
    }

    #[test]
    fn test_error_source_non_http() {
        use std::error::Error;
        let err = PsError::Exhausted;
        assert!(err.source().is_none());
    }
}
