//! Extraction of structured results from raw E-utilities responses
//!
//! These functions hold no state and perform no I/O. A response that parses
//! but lacks a field the caller depends on is reported as
//! [`ServiceError::MalformedResponse`] rather than replaced by a default.

use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::{Result, ServiceError};
use crate::pubmed::models::{ArticleAbstract, ArticleSummary, SearchEnvironment, SearchResult};
use crate::pubmed::responses::{ELinkHistoryResponse, ESearchData, ESearchResult, ESummaryDocSum};

/// Parse an ESearch JSON response once, rejecting bodies that carry an NCBI `ERROR`
pub(crate) fn parse_esearch(raw: &Value, user_term: &str) -> Result<ESearchData> {
    let parsed = ESearchResult::deserialize(raw).map_err(|e| {
        ServiceError::malformed(format!(
            "ESearch response for {user_term} has no esearchresult: {e}"
        ))
    })?;

    // NCBI sometimes returns 200 OK with an ERROR field
    if let Some(error) = parsed.esearchresult.error {
        return Err(ServiceError::malformed(format!(
            "NCBI ESearch error for {user_term}: {error}"
        )));
    }

    Ok(parsed.esearchresult)
}

fn parse_count(count: &Value) -> Option<usize> {
    match count {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        _ => None,
    }
}

impl ESearchData {
    /// Total number of matches
    pub(crate) fn item_count(&self, user_term: &str) -> Result<usize> {
        self.count.as_ref().and_then(parse_count).ok_or_else(|| {
            ServiceError::malformed(format!(
                "ESearch response for {user_term} has no usable esearchresult.count"
            ))
        })
    }

    /// Pair an already checked count with the history session
    pub(crate) fn into_search_result(
        self,
        items_found: usize,
        user_term: &str,
    ) -> Result<SearchResult> {
        let webenv = self.webenv.ok_or_else(|| {
            ServiceError::malformed(format!(
                "ESearch response for {user_term} has no esearchresult.webenv"
            ))
        })?;
        let query_key = self.query_key.ok_or_else(|| {
            ServiceError::malformed(format!(
                "ESearch response for {user_term} has no esearchresult.querykey"
            ))
        })?;

        Ok(SearchResult {
            items_found,
            environment: SearchEnvironment { webenv, query_key },
        })
    }
}

/// Read the total number of matches from an ESearch JSON response
pub fn extract_item_count(raw: &Value, user_term: &str) -> Result<usize> {
    parse_esearch(raw, user_term)?.item_count(user_term)
}

/// Read the match count and history session from an ESearch JSON response
///
/// # Arguments
///
/// * `raw` - The decoded ESearch response
/// * `user_term` - The term shown to the user, used in error messages
///
/// # Example
///
/// ```
/// use pubmed_service::pubmed::document::extract_search_results;
///
/// let raw = serde_json::json!({
///     "esearchresult": {"count": "42", "webenv": "MCID_1", "querykey": "1"}
/// });
/// let result = extract_search_results(&raw, "asthma").unwrap();
/// assert_eq!(result.items_found, 42);
/// assert_eq!(result.environment.webenv, "MCID_1");
/// ```
#[instrument(skip(raw))]
pub fn extract_search_results(raw: &Value, user_term: &str) -> Result<SearchResult> {
    let data = parse_esearch(raw, user_term)?;
    let items_found = data.item_count(user_term)?;
    data.into_search_result(items_found, user_term)
}

/// Read the history session produced by an ELink call made with `usehistory=y`
///
/// The WebEnv comes from the first linkset that carries one and is paired
/// with `query_key`, the key the caller linked from.
#[instrument(skip(raw))]
pub fn extract_environment_from_link_results(
    raw: &Value,
    query_key: &str,
) -> Result<SearchEnvironment> {
    let parsed = ELinkHistoryResponse::deserialize(raw)
        .map_err(|e| ServiceError::malformed(format!("Unexpected ELink response shape: {e}")))?;

    let webenv = parsed
        .linksets
        .into_iter()
        .find_map(|linkset| linkset.webenv)
        .ok_or_else(|| ServiceError::malformed("ELink response has no linksets[].webenv"))?;

    debug!(webenv = %webenv, "Found WebEnv in ELink response");

    Ok(SearchEnvironment {
        webenv,
        query_key: query_key.to_string(),
    })
}

struct AbstractSection {
    label: Option<String>,
    text: String,
}

impl AbstractSection {
    fn render(self) -> Option<String> {
        let text = self.text.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.is_empty() {
            return None;
        }
        Some(match self.label {
            Some(label) if !label.trim().is_empty() => format!("{}: {}", label.trim(), text),
            _ => text,
        })
    }
}

/// Extract the abstract from an EFetch XML document
///
/// Every `AbstractText` element of the first `Abstract` is kept. Sections of
/// a structured abstract are prefixed with their `Label` and separated by
/// newlines. Inline markup such as `<i>` or `<sup>` is flattened to its text.
///
/// # Example
///
/// ```
/// use pubmed_service::pubmed::document::extract_abstract;
///
/// let xml = r#"<PubmedArticleSet><PubmedArticle><MedlineCitation><Article>
///   <Abstract><AbstractText>Short abstract.</AbstractText></Abstract>
/// </Article></MedlineCitation></PubmedArticle></PubmedArticleSet>"#;
///
/// let details = extract_abstract(xml).unwrap();
/// assert_eq!(details.abstract_text, "Short abstract.");
/// ```
#[instrument(skip(xml), fields(xml_size = xml.len()))]
pub fn extract_abstract(xml: &str) -> Result<ArticleAbstract> {
    let mut reader = Reader::from_str(xml);

    let mut sections: Vec<String> = Vec::new();
    let mut in_abstract = false;
    let mut current: Option<AbstractSection> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"Abstract" => in_abstract = true,
                b"AbstractText" if in_abstract => {
                    let label = e
                        .try_get_attribute("Label")
                        .map_err(|err| ServiceError::XmlError(err.to_string()))?
                        .map(|attr| attr.unescape_value().map(|v| v.into_owned()))
                        .transpose()?;
                    current = Some(AbstractSection {
                        label,
                        text: String::new(),
                    });
                }
                _ => {}
            },
            Event::Text(e) => {
                if let Some(section) = current.as_mut() {
                    section.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(section) = current.as_mut() {
                    section.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"AbstractText" => {
                    if let Some(rendered) = current.take().and_then(AbstractSection::render) {
                        sections.push(rendered);
                    }
                }
                b"Abstract" if in_abstract => break,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if sections.is_empty() {
        return Err(ServiceError::malformed("EFetch document has no abstract"));
    }

    debug!(sections = sections.len(), "Abstract extracted");

    Ok(ArticleAbstract {
        abstract_text: sections.join("\n"),
    })
}

/// Parse the documents of an ESummary JSON response
///
/// Documents the server flags with an `error`, or that cannot be read, are
/// skipped and logged.
#[instrument(skip(raw))]
pub fn extract_summaries(raw: &Value) -> Result<Vec<ArticleSummary>> {
    if let Some(error) = raw.get("error").and_then(Value::as_str) {
        return Err(ServiceError::malformed(format!(
            "NCBI ESummary error: {error}"
        )));
    }

    let result = raw
        .get("result")
        .filter(|r| r.is_object())
        .ok_or_else(|| ServiceError::malformed("ESummary response has no result object"))?;

    let uids: Vec<&str> = result
        .get("uids")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let mut summaries = Vec::with_capacity(uids.len());

    for uid in uids {
        let Some(doc_value) = result.get(uid) else {
            warn!(uid = %uid, "UID not found in ESummary response");
            continue;
        };

        if doc_value.get("error").is_some() {
            warn!(uid = %uid, "ESummary returned error for UID");
            continue;
        }

        let doc = match ESummaryDocSum::deserialize(doc_value) {
            Ok(d) => d,
            Err(e) => {
                warn!(uid = %uid, error = %e, "Failed to parse ESummary document");
                continue;
            }
        };

        let article_id = |idtype: &str| {
            doc.articleids
                .iter()
                .find(|aid| aid.idtype == idtype && !aid.value.is_empty())
                .map(|aid| aid.value.clone())
        };
        let doi = article_id("doi");
        let pmc_id = article_id("pmc");

        summaries.push(ArticleSummary {
            pmid: doc.uid,
            title: doc.title,
            authors: doc.authors.into_iter().map(|a| a.name).collect(),
            journal: doc.source,
            full_journal_name: doc.fulljournalname,
            pub_date: doc.pubdate,
            doi,
            pmc_id,
            pub_types: doc.pubtype,
        });
    }

    Ok(summaries)
}
