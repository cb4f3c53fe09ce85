use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ESearchResult {
    pub esearchresult: ESearchData,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ESearchData {
    #[serde(default, rename = "ERROR")]
    pub error: Option<String>,
    /// NCBI sends the count as a string, but some mirrors send a number
    #[serde(default)]
    pub count: Option<serde_json::Value>,
    /// WebEnv session identifier for history server
    #[serde(default)]
    pub webenv: Option<String>,
    /// Query key for history server
    #[serde(default, rename = "querykey")]
    pub query_key: Option<String>,
}

// ELink (usehistory=y) response structures
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ELinkHistoryResponse {
    #[serde(rename = "linksets", default)]
    pub linksets: Vec<ELinkHistorySet>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ELinkHistorySet {
    #[serde(default)]
    pub webenv: Option<String>,
}

// ESummary API response structures

// ESummary returns a JSON object with "result" containing a "uids" array and one
// object per UID. The per-UID keys are dynamic, so only the documents are typed.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ESummaryAuthor {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ESummaryArticleId {
    pub idtype: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ESummaryDocSum {
    pub uid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub authors: Vec<ESummaryAuthor>,
    #[serde(default)]
    pub pubdate: String,
    #[serde(default)]
    pub pubtype: Vec<String>,
    #[serde(default)]
    pub articleids: Vec<ESummaryArticleId>,
    #[serde(default)]
    pub fulljournalname: String,
}
