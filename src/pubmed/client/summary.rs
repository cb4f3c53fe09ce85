//! ESummary API operations for fetching lightweight article metadata

use serde_json::Value;
use tracing::{error, info, instrument};

use crate::error::Result;
use crate::pubmed::document;
use crate::pubmed::models::{ArticleSummary, SearchEnvironment, SummaryOptions};
use crate::pubmed::query::{QueryOptions, merge_query_options};

use super::PubMedService;

impl PubMedService {
    /// Fetch the raw ESummary JSON for a page of a stored result set
    ///
    /// The request parameters are the configured defaults overlaid with `db`
    /// (falling back to `default_db`), `WebEnv`, `query_key`, `retstart`
    /// (default 0), `retmax` (default `summary_page_size`) and `retmode=json`.
    ///
    /// A failed request is logged together with its parameters and returned
    /// unchanged.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_service::{PubMedService, QueryOptions, SummaryOptions};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let service = PubMedService::new()?;
    ///     let found = service.search(&["oligodendrocyte"], &QueryOptions::new(), None).await?;
    ///     let raw = service
    ///         .fetch_summary(&found.environment, &SummaryOptions::new().with_max(5))
    ///         .await?;
    ///     println!("{}", raw["result"]["uids"]);
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self, environment, options), fields(query_key = %environment.query_key))]
    pub async fn fetch_summary(
        &self,
        environment: &SearchEnvironment,
        options: &SummaryOptions,
    ) -> Result<Value> {
        let operation = QueryOptions::new()
            .with(
                "db",
                options.db.as_deref().unwrap_or(&self.config.default_db),
            )
            .with("WebEnv", &environment.webenv)
            .with("query_key", &environment.query_key)
            .with("retstart", options.start.unwrap_or(0))
            .with(
                "retmax",
                options.max.unwrap_or(self.config.summary_page_size),
            )
            .with("retmode", "json");
        let query = merge_query_options(&[&self.config.query_options, &operation]);
        let url = self.config.summary_url();

        self.get_json(&url, &query, self.config.default_timeout)
            .await
            .inspect_err(|err| {
                error!(error = %err, url = %url, query = %query, "Error performing ESummary");
            })
    }

    /// Fetch a page of a stored result set as typed summaries
    ///
    /// Same request as [`fetch_summary`](Self::fetch_summary); documents the
    /// server reports as errors are skipped.
    pub async fn fetch_summaries(
        &self,
        environment: &SearchEnvironment,
        options: &SummaryOptions,
    ) -> Result<Vec<ArticleSummary>> {
        let raw = self.fetch_summary(environment, options).await?;
        let summaries = document::extract_summaries(&raw)?;

        info!(parsed = summaries.len(), "ESummary page parsed");
        Ok(summaries)
    }
}
