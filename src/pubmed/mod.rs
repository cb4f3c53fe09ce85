//! PubMed service for searching, linking and fetching article metadata
//!
//! This module wraps the NCBI E-utilities history-server workflow:
//! - `client` - The [`PubMedService`] struct and its ESearch, ELink, ESummary and EFetch calls
//! - `query` - Merging of query parameter sets and search term combination
//! - `document` - Extraction of counts, sessions, abstracts and summaries from responses
//! - `models` - Public value types returned by the service

pub mod client;
pub mod document;
pub mod models;
pub mod query;
mod responses;

// Re-export public types
pub use client::PubMedService;
pub use models::{
    ArticleAbstract, ArticleSummary, SearchEnvironment, SearchResult, SummaryOptions,
};
pub use query::QueryOptions;
