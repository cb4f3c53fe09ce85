//! # PubMed Service
//!
//! An async wrapper around NCBI's E-utilities literature search API, built on
//! the history server: a search stores its hits server-side and hands back a
//! `WebEnv`/`query_key` pair that later link and summary calls refer to.
//!
//! ## Features
//!
//! - **ESearch**: hit counting with empty and too-many-results checks
//! - **ELink**: cross-database linking of a stored result set
//! - **ESummary**: paged summaries, raw or typed
//! - **EFetch**: article abstracts from the XML record
//! - **Table view**: static HTML rendering of a featured article list
//!
//! ## Quick Start
//!
//! ```no_run
//! use pubmed_service::{PubMedService, QueryOptions, ServiceConfig, SummaryOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServiceConfig::new()
//!         .with_email("researcher@university.edu")
//!         .with_results_limit(500);
//!     let service = PubMedService::with_config(config)?;
//!
//!     let found = service
//!         .search(&["quiet eye", "motor expertise"], &QueryOptions::new(), None)
//!         .await?;
//!     println!("{} articles", found.items_found);
//!
//!     let summaries = service
//!         .fetch_summaries(&found.environment, &SummaryOptions::new().with_max(10))
//!         .await?;
//!     for summary in summaries {
//!         println!("{}: {}", summary.pmid, summary.title);
//!     }
//!
//!     let details = service
//!         .fetch_article_details("31978945", &QueryOptions::new())
//!         .await?;
//!     println!("{}", details.abstract_text);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod pubmed;
pub mod table;

// Re-export main types for convenience
pub use config::ServiceConfig;
pub use error::{Result, ServiceError};
pub use pubmed::{
    ArticleAbstract, ArticleSummary, PubMedService, QueryOptions, SearchEnvironment,
    SearchResult, SummaryOptions,
};
pub use table::{ArticleRecord, TableView};
