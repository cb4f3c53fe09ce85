//! Common helpers for mocked E-utilities tests

#![allow(dead_code)]

use std::time::Duration;

use pubmed_service::{PubMedService, ServiceConfig};
use serde_json::{Value, json};
use wiremock::MockServer;

/// Configuration pointing at a mock server, with a recognisable default parameter
pub fn mock_config(mock_server: &MockServer) -> ServiceConfig {
    ServiceConfig::new()
        .with_base_url(mock_server.uri())
        .with_tool("test-client")
        .with_results_limit(100)
        .with_esearch_timeout(Duration::from_secs(5))
        .with_elink_timeout(Duration::from_secs(5))
        .with_default_timeout(Duration::from_secs(5))
}

/// Service pointing at a mock server
pub fn create_mock_service(mock_server: &MockServer) -> PubMedService {
    PubMedService::with_config(mock_config(mock_server)).expect("service should build")
}

/// ESearch JSON response with history session
pub fn esearch_response(count: usize, webenv: &str, query_key: &str) -> Value {
    json!({
        "header": {"type": "esearch", "version": "0.3"},
        "esearchresult": {
            "count": count.to_string(),
            "retmax": "20",
            "retstart": "0",
            "querykey": query_key,
            "webenv": webenv,
            "idlist": [],
            "querytranslation": ""
        }
    })
}

/// ELink JSON response produced with `cmd=neighbor_history`
pub fn elink_history_response(webenv: &str) -> Value {
    json!({
        "header": {"type": "elink", "version": "0.3"},
        "linksets": [{
            "dbfrom": "pubmed",
            "ids": ["5818267", "5809435"],
            "webenv": webenv,
            "linksetdbhistories": [
                {"dbto": "pmc", "linkname": "pubmed_pmc", "querykey": "2"}
            ]
        }]
    })
}

/// ESummary JSON response for the given `(uid, title)` pairs
pub fn esummary_response(docs: &[(&str, &str)]) -> Value {
    let mut result = serde_json::Map::new();
    let uids: Vec<&str> = docs.iter().map(|(uid, _)| *uid).collect();
    result.insert("uids".to_string(), json!(uids));
    for (uid, title) in docs {
        result.insert(
            uid.to_string(),
            json!({
                "uid": uid,
                "title": title,
                "source": "Front Psychol",
                "fulljournalname": "Frontiers in psychology",
                "pubdate": "2018 Feb 13",
                "authors": [{"name": "Vickers JN", "authtype": "Author"}],
                "pubtype": ["Journal Article"],
                "articleids": [{"idtype": "pubmed", "value": uid}]
            }),
        );
    }
    json!({"header": {"type": "esummary", "version": "0.3"}, "result": result})
}

/// EFetch XML document with an unstructured abstract
pub fn efetch_xml(pmid: &str, abstract_text: &str) -> String {
    format!(
        r#"<?xml version="1.0" ?>
<!DOCTYPE PubmedArticleSet PUBLIC "-//NLM//DTD PubMedArticle, 1st January 2024//EN" "https://dtd.nlm.nih.gov/ncbi/pubmed/out/pubmed_240101.dtd">
<PubmedArticleSet>
    <PubmedArticle>
        <MedlineCitation Status="MEDLINE" Owner="NLM">
            <PMID Version="1">{pmid}</PMID>
            <Article PubModel="Print">
                <Journal><Title>Test Journal</Title></Journal>
                <ArticleTitle>Test Article</ArticleTitle>
                <Abstract>
                    <AbstractText>{abstract_text}</AbstractText>
                </Abstract>
            </Article>
        </MedlineCitation>
    </PubmedArticle>
</PubmedArticleSet>"#
    )
}
