use std::result;

use thiserror::Error;

/// Error types for E-utilities service operations
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The term shown to the user is empty or whitespace-only
    #[error("Invalid query string: {term:?}")]
    InvalidQueryString { term: String },

    /// ESearch succeeded but matched no articles
    #[error("No results found for {term}")]
    EmptySearchResult { term: String },

    /// ESearch matched more articles than the configured ceiling
    #[error("Too many results for {term}: found {found}, limit is {limit}")]
    TooManyResults {
        term: String,
        limit: usize,
        found: usize,
    },

    /// A successful response lacked a field the caller depends on
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    /// A required query parameter was not supplied
    #[error("Missing required parameter: {name}")]
    MissingParameter { name: String },

    /// HTTP request failed (connection, timeout or non-2xx status)
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// XML parsing failed
    #[error("XML parsing failed: {0}")]
    XmlError(String),

    /// Configuration could not be loaded or applied
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = result::Result<T, ServiceError>;

impl ServiceError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        ServiceError::MalformedResponse {
            message: message.into(),
        }
    }

    /// Whether the error was raised by the transport rather than by this crate
    pub fn is_transport(&self) -> bool {
        matches!(self, ServiceError::RequestError(_))
    }

    /// Whether the error was raised by the transport because the per-operation timeout elapsed
    pub fn is_timeout(&self) -> bool {
        match self {
            ServiceError::RequestError(err) => err.is_timeout(),
            _ => false,
        }
    }
}

impl From<quick_xml::Error> for ServiceError {
    fn from(err: quick_xml::Error) -> Self {
        ServiceError::XmlError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ServiceError {
    fn from(err: serde_yaml::Error) -> Self {
        ServiceError::ConfigError(err.to_string())
    }
}
