//! ELink API operations for cross-referencing between NCBI databases

use tracing::{info, instrument};

use crate::error::{Result, ServiceError};
use crate::pubmed::document;
use crate::pubmed::models::SearchEnvironment;
use crate::pubmed::query::{QueryOptions, merge_query_options};

use super::PubMedService;

impl PubMedService {
    /// Link a stored result set to another database and return the new history session
    ///
    /// The request parameters are the configured defaults, overlaid with
    /// `retmode=json` and `usehistory=y`, overlaid with `options`.
    ///
    /// # Arguments
    ///
    /// * `options` - ELink parameters; must contain `query_key`
    ///
    /// # Errors
    ///
    /// * `ServiceError::MissingParameter` - If `options` has no `query_key`. No request is sent.
    /// * `ServiceError::MalformedResponse` - If the response carries no WebEnv
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
    ///     let options = QueryOptions::new()
    ///         .with("dbfrom", "pubmed")
    ///         .with("db", "pmc")
    ///         .with("cmd", "neighbor_history")
    ///         .with("WebEnv", "MCID_123")
    ///         .with("query_key", "1");
    ///     let environment = service.link(&options).await?;
    ///     println!("Linked session: {}", environment.webenv);
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self, options), fields(query_key = ?options.get("query_key")))]
    pub async fn link(&self, options: &QueryOptions) -> Result<SearchEnvironment> {
        let query_key = options
            .get("query_key")
            .ok_or_else(|| ServiceError::MissingParameter {
                name: "query_key".to_string(),
            })?
            .to_string();

        let operation = QueryOptions::new()
            .with("retmode", "json")
            .with("usehistory", "y");
        let query = merge_query_options(&[&self.config.query_options, &operation, options]);

        let raw = self
            .get_json(&self.config.elink_url(), &query, self.config.elink_timeout)
            .await?;

        info!("Processing ELink result");
        document::extract_environment_from_link_results(&raw, &query_key)
    }

    /// Link the result set of a previous search into another database
    ///
    /// Fills in `WebEnv`, `query_key` and `cmd=neighbor_history` from
    /// `environment`, then defers to [`link`](Self::link). Entries in `options`
    /// take precedence.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_service::{PubMedService, QueryOptions};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let service = PubMedService::new()?;
    ///     let found = service.search(&["quiet eye"], &QueryOptions::new(), None).await?;
    ///     let in_pmc = service
    ///         .link_environment(
    ///             &found.environment,
    ///             &QueryOptions::new().with("dbfrom", "pubmed").with("db", "pmc"),
    ///         )
    ///         .await?;
    ///     println!("PMC session: {}", in_pmc.webenv);
    ///     Ok(())
    /// }
    /// ```
    pub async fn link_environment(
        &self,
        environment: &SearchEnvironment,
        options: &QueryOptions,
    ) -> Result<SearchEnvironment> {
        let history = QueryOptions::new()
            .with("WebEnv", &environment.webenv)
            .with("query_key", &environment.query_key)
            .with("cmd", "neighbor_history");
        self.link(&merge_query_options(&[&history, options])).await
    }
}
