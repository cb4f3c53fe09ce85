use serde::{Deserialize, Serialize};

/// History server session returned by ESearch and consumed by ELink/ESummary
///
/// The pair lets later requests refer to a stored result set without resending
/// the query. The service never looks inside either value; it only passes them
/// through as `WebEnv` and `query_key`.
///
/// # Note
///
/// WebEnv sessions typically expire after 1 hour of inactivity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEnvironment {
    /// WebEnv session identifier
    pub webenv: String,
    /// Query key within the session
    #[serde(rename = "querykey")]
    pub query_key: String,
}

impl SearchEnvironment {
    pub fn new(webenv: impl Into<String>, query_key: impl Into<String>) -> Self {
        Self {
            webenv: webenv.into(),
            query_key: query_key.into(),
        }
    }
}

/// Outcome of a successful ESearch call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Total number of matching articles reported by ESearch
    pub items_found: usize,
    /// History session holding the matched articles
    pub environment: SearchEnvironment,
}

/// Optional paging and database overrides for ESummary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Database to summarise; falls back to the configured default
    pub db: Option<String>,
    /// Offset into the stored result set (`retstart`)
    pub start: Option<usize>,
    /// Number of summaries to return (`retmax`)
    pub max: Option<usize>,
}

impl SummaryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_db(mut self, db: impl Into<String>) -> Self {
        self.db = Some(db.into());
        self
    }

    pub fn with_start(mut self, start: usize) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }
}

/// Abstract extracted from an EFetch document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleAbstract {
    /// Abstract text; structured sections are prefixed with their label
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

/// Lightweight article metadata from the ESummary API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    /// PubMed ID
    pub pmid: String,
    /// Article title
    pub title: String,
    /// Author names (e.g., ["Zhu N", "Zhang D", "Wang W"])
    pub authors: Vec<String>,
    /// Journal name (source field)
    pub journal: String,
    /// Full journal name (e.g., "The New England journal of medicine")
    pub full_journal_name: String,
    /// Publication date (e.g., "2020 Feb")
    pub pub_date: String,
    /// DOI (Digital Object Identifier)
    pub doi: Option<String>,
    /// PMC ID if available (e.g., "PMC7092803")
    pub pmc_id: Option<String>,
    /// Publication types (e.g., ["Journal Article", "Review"])
    pub pub_types: Vec<String>,
}
