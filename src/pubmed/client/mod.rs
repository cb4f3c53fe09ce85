mod efetch;
mod elink;
mod summary;

use std::time::Duration;

use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::ServiceConfig;
use crate::error::{Result, ServiceError};
use crate::pubmed::document;
use crate::pubmed::models::SearchResult;
use crate::pubmed::query::{QueryOptions, combine_search_terms, is_empty_term, merge_query_options};

/// High-level access to the NCBI E-utilities search, link, summary and fetch APIs
///
/// Every operation issues exactly one GET request. The service holds only an
/// immutable [`ServiceConfig`] and a `reqwest::Client`, so it is cheap to clone
/// and safe to use from concurrent tasks.
#[derive(Clone)]
pub struct PubMedService {
    client: Client,
    config: ServiceConfig,
}

impl PubMedService {
    /// Create a new service with the default configuration
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_service::PubMedService;
    ///
    /// let service = PubMedService::new().unwrap();
    /// assert_eq!(service.config().default_db, "pubmed");
    /// ```
    pub fn new() -> Result<Self> {
        Self::with_config(ServiceConfig::new())
    }

    /// Create a new service with a custom configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoints, timeouts, result ceiling and default parameters
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_service::{PubMedService, ServiceConfig};
    ///
    /// let config = ServiceConfig::new()
    ///     .with_api_key("your_api_key_here")
    ///     .with_email("researcher@university.edu")
    ///     .with_results_limit(200);
    ///
    /// let service = PubMedService::with_config(config).unwrap();
    /// ```
    pub fn with_config(config: ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.effective_user_agent())
            .build()
            .map_err(|e| ServiceError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create a new service around an existing HTTP client
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_service::{PubMedService, ServiceConfig};
    /// use reqwest::Client;
    ///
    /// let service = PubMedService::with_client(Client::new(), ServiceConfig::new());
    /// ```
    pub fn with_client(client: Client, config: ServiceConfig) -> Self {
        Self { client, config }
    }

    /// Get a reference to the service configuration
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Search and return the hit count plus the history session holding the hits
    ///
    /// The request parameters are the configured defaults, overlaid with
    /// `term`, `retmode=json` and `usehistory=y`, overlaid with `options`.
    ///
    /// # Arguments
    ///
    /// * `terms` - Search terms, combined with `AND`
    /// * `options` - Extra ESearch parameters, applied last
    /// * `display_term` - Term used in error messages; defaults to the first term
    ///
    /// # Errors
    ///
    /// * `ServiceError::InvalidQueryString` - If the display term or the combined query is empty.
    ///   No request is sent.
    /// * `ServiceError::EmptySearchResult` - If the search matched nothing
    /// * `ServiceError::TooManyResults` - If the search matched more than `results_limit`
    /// * `ServiceError::MalformedResponse` - If the count or history session is missing
    /// * `ServiceError::RequestError` - If the HTTP request fails or times out
    /// * `ServiceError::JsonError` - If the response body is not valid JSON
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_service::{PubMedService, QueryOptions};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let service = PubMedService::new()?;
    ///     let result = service
    ///         .search(&["quiet eye", "archery"], &QueryOptions::new(), None)
    ///         .await?;
    ///     println!("Found {} articles", result.items_found);
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self, terms, options), fields(terms_count = terms.len()))]
    pub async fn search<S: AsRef<str>>(
        &self,
        terms: &[S],
        options: &QueryOptions,
        display_term: Option<&str>,
    ) -> Result<SearchResult> {
        let user_term = match display_term.or_else(|| terms.first().map(|t| t.as_ref())) {
            Some(term) if !is_empty_term(Some(term)) => term,
            other => {
                warn!("Empty search term provided");
                return Err(ServiceError::InvalidQueryString {
                    term: other.unwrap_or_default().to_string(),
                });
            }
        };

        let combined = combine_search_terms(terms);
        if combined.is_empty() {
            warn!(term = %user_term, "No usable search terms provided");
            return Err(ServiceError::InvalidQueryString {
                term: user_term.to_string(),
            });
        }

        let operation = QueryOptions::new()
            .with("term", combined)
            .with("retmode", "json")
            .with("usehistory", "y");
        let query = merge_query_options(&[&self.config.query_options, &operation, options]);

        let raw = self
            .get_json(&self.config.search_url(), &query, self.config.esearch_timeout)
            .await?;

        let data = document::parse_esearch(&raw, user_term)?;
        let items_found = data.item_count(user_term)?;
        info!(items_found, term = %user_term, "ESearch completed");

        if items_found == 0 {
            return Err(ServiceError::EmptySearchResult {
                term: user_term.to_string(),
            });
        }
        if items_found > self.config.results_limit {
            return Err(ServiceError::TooManyResults {
                term: user_term.to_string(),
                limit: self.config.results_limit,
                found: items_found,
            });
        }

        data.into_search_result(items_found, user_term)
    }

    /// Issue a single GET request with the given parameters and timeout
    ///
    /// Transport failures and non-2xx statuses are returned as the
    /// underlying `reqwest::Error`.
    pub(crate) async fn get(
        &self,
        url: &str,
        query: &QueryOptions,
        timeout: Duration,
    ) -> Result<Response> {
        debug!(url = %url, query = %query, timeout = ?timeout, "Making API request");

        let response = self
            .client
            .get(url)
            .query(query)
            .timeout(timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("API request failed with status: {}", response.status());
        }

        Ok(response.error_for_status()?)
    }

    /// Issue a GET request and decode the body as JSON
    ///
    /// A body that is not valid JSON is reported as `ServiceError::JsonError`,
    /// not as a transport failure.
    pub(crate) async fn get_json(
        &self,
        url: &str,
        query: &QueryOptions,
        timeout: Duration,
    ) -> Result<Value> {
        let body = self.get(url, query, timeout).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
