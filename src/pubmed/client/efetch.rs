//! EFetch API operations for article details

use tracing::{info, instrument};

use crate::error::Result;
use crate::pubmed::document;
use crate::pubmed::models::ArticleAbstract;
use crate::pubmed::query::{QueryOptions, merge_query_options};

use super::PubMedService;

impl PubMedService {
    /// Fetch an article as XML and return its abstract
    ///
    /// The request parameters are the configured defaults, overlaid with
    /// `retmode=xml` and `id`, overlaid with `options`.
    ///
    /// # Errors
    ///
    /// * `ServiceError::MalformedResponse` - If the document has no abstract
    /// * `ServiceError::XmlError` - If the document is not well-formed XML
    /// * `ServiceError::RequestError` - If the HTTP request fails or times out
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_service::{PubMedService, QueryOptions};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let service = PubMedService::new()?;
    ///     let details = service
    ///         .fetch_article_details("31978945", &QueryOptions::new())
    ///         .await?;
    ///     println!("{}", details.abstract_text);
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self, options), fields(article_id = %article_id))]
    pub async fn fetch_article_details(
        &self,
        article_id: &str,
        options: &QueryOptions,
    ) -> Result<ArticleAbstract> {
        let operation = QueryOptions::new()
            .with("retmode", "xml")
            .with("id", article_id);
        let query = merge_query_options(&[&self.config.query_options, &operation, options]);

        info!("Fetching details for {}", article_id);
        let response = self
            .get(&self.config.efetch_url(), &query, self.config.default_timeout)
            .await?;
        let xml = response.text().await?;

        document::extract_abstract(&xml)
    }
}
