//! Service configuration
//!
//! A [`ServiceConfig`] is handed to the service once at construction and is
//! never changed afterwards. It can be built in code with the `with_*` methods
//! or loaded from YAML (JSON is valid YAML, so JSON files work too).

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};
use crate::pubmed::query::QueryOptions;

const DEFAULT_BASE_URI: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Configuration for [`PubMedService`](crate::PubMedService)
///
/// # Example
///
/// ```
/// use pubmed_service::ServiceConfig;
/// use std::time::Duration;
///
/// let config = ServiceConfig::new()
///     .with_results_limit(500)
///     .with_esearch_timeout(Duration::from_secs(5))
///     .with_email("researcher@university.edu");
///
/// assert_eq!(config.results_limit, 500);
/// assert_eq!(config.query_options.get("email"), Some("researcher@university.edu"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URI all operation paths are appended to
    pub base_uri: String,
    /// Path of the ESearch endpoint
    pub search_path: String,
    /// Path of the ELink endpoint
    pub elink_path: String,
    /// Path of the ESummary endpoint
    pub summary_path: String,
    /// Path of the EFetch endpoint
    pub efetch_path: String,
    /// Timeout for ESearch requests
    #[serde(rename = "esearch_timeout_ms", with = "duration_ms")]
    pub esearch_timeout: Duration,
    /// Timeout for ELink requests
    #[serde(rename = "elink_timeout_ms", with = "duration_ms")]
    pub elink_timeout: Duration,
    /// Timeout for every other request
    #[serde(rename = "default_timeout_ms", with = "duration_ms")]
    pub default_timeout: Duration,
    /// Database summarised when the caller names none
    pub default_db: String,
    /// Largest ESearch hit count the service accepts
    pub results_limit: usize,
    /// Number of summaries requested when the caller names no maximum
    pub summary_page_size: usize,
    /// Parameters sent with every request, underneath the operation's own
    pub query_options: QueryOptions,
    /// User agent override for the underlying HTTP client
    pub user_agent: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_uri: DEFAULT_BASE_URI.to_string(),
            search_path: "/esearch.fcgi".to_string(),
            elink_path: "/elink.fcgi".to_string(),
            summary_path: "/esummary.fcgi".to_string(),
            efetch_path: "/efetch.fcgi".to_string(),
            esearch_timeout: Duration::from_secs(10),
            elink_timeout: Duration::from_secs(10),
            default_timeout: Duration::from_secs(30),
            default_db: "pubmed".to_string(),
            results_limit: 1000,
            summary_page_size: 20,
            query_options: QueryOptions::new().with("db", "pubmed"),
            user_agent: None,
        }
    }
}

impl ServiceConfig {
    /// Create a configuration pointing at the public NCBI E-utilities
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a YAML (or JSON) document
    ///
    /// Missing fields keep their default values.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a configuration from a YAML (or JSON) file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ServiceError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&contents)
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_uri: S) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    pub fn with_esearch_timeout(mut self, timeout: Duration) -> Self {
        self.esearch_timeout = timeout;
        self
    }

    pub fn with_elink_timeout(mut self, timeout: Duration) -> Self {
        self.elink_timeout = timeout;
        self
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn with_default_db<S: Into<String>>(mut self, db: S) -> Self {
        self.default_db = db.into();
        self
    }

    pub fn with_results_limit(mut self, limit: usize) -> Self {
        self.results_limit = limit;
        self
    }

    pub fn with_summary_page_size(mut self, size: usize) -> Self {
        self.summary_page_size = size;
        self
    }

    /// Add a parameter sent with every request
    pub fn with_query_option<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.query_options.insert(key, value);
        self
    }

    /// Replace the whole set of default parameters
    pub fn with_query_options(mut self, options: QueryOptions) -> Self {
        self.query_options = options;
        self
    }

    /// NCBI API key, raising the server-side rate limit
    pub fn with_api_key<S: Into<String>>(self, api_key: S) -> Self {
        self.with_query_option("api_key", api_key.into())
    }

    /// Contact email NCBI asks registered tools to send
    pub fn with_email<S: Into<String>>(self, email: S) -> Self {
        self.with_query_option("email", email.into())
    }

    /// Tool name NCBI asks registered tools to send
    pub fn with_tool<S: Into<String>>(self, tool: S) -> Self {
        self.with_query_option("tool", tool.into())
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("pubmed-service/{}", env!("CARGO_PKG_VERSION")))
    }

    fn endpoint(&self, path: &str) -> String {
        if self.base_uri.ends_with('/') && path.starts_with('/') {
            format!("{}{}", self.base_uri.trim_end_matches('/'), path)
        } else {
            format!("{}{}", self.base_uri, path)
        }
    }

    pub fn search_url(&self) -> String {
        self.endpoint(&self.search_path)
    }

    pub fn elink_url(&self) -> String {
        self.endpoint(&self.elink_path)
    }

    pub fn summary_url(&self) -> String {
        self.endpoint(&self.summary_path)
    }

    pub fn efetch_url(&self) -> String {
        self.endpoint(&self.efetch_path)
    }
}

/// Serde helpers storing a [`Duration`] as whole milliseconds
mod duration_ms {
    use std::result;
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(duration: &Duration, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> result::Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
