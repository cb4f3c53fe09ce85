//! Integration tests for the ELink operation using mocked HTTP responses

mod common;

use std::time::Duration;

use common::{create_mock_service, elink_history_response, esearch_response, mock_config};
use pubmed_service::{PubMedService, QueryOptions, SearchEnvironment, ServiceError};
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
#[traced_test]
async fn test_link_returns_environment_for_query_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/elink.fcgi"))
        .and(query_param("dbfrom", "pubmed"))
        .and(query_param("db", "pmc"))
        .and(query_param("query_key", "1"))
        .and(query_param("WebEnv", "MCID_search"))
        .and(query_param("retmode", "json"))
        .and(query_param("usehistory", "y"))
        .and(query_param("tool", "test-client"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(elink_history_response("MCID_linked")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = create_mock_service(&mock_server);
    let options = QueryOptions::new()
        .with("dbfrom", "pubmed")
        .with("db", "pmc")
        .with("cmd", "neighbor_history")
        .with("WebEnv", "MCID_search")
        .with("query_key", "1");

    let environment = service.link(&options).await.expect("link should succeed");

    assert_eq!(environment, SearchEnvironment::new("MCID_linked", "1"));
    assert!(logs_contain("Processing ELink result"));
}

#[tokio::test]
async fn test_link_without_query_key_sends_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(elink_history_response("W")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = create_mock_service(&mock_server);

    let err = service
        .link(&QueryOptions::new().with("dbfrom", "pubmed"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::MissingParameter { ref name } if name == "query_key"));
}

#[tokio::test]
async fn test_link_response_without_webenv_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/elink.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "header": {"type": "elink", "version": "0.3"},
            "linksets": [{"dbfrom": "pubmed", "ids": ["1"]}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = create_mock_service(&mock_server);

    let err = service
        .link(&QueryOptions::new().with("query_key", "1"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_search_then_link_environment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(esearch_response(12, "MCID_search", "3")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/elink.fcgi"))
        .and(query_param("WebEnv", "MCID_search"))
        .and(query_param("query_key", "3"))
        .and(query_param("cmd", "neighbor_history"))
        .and(query_param("db", "pmc"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(elink_history_response("MCID_pmc")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = create_mock_service(&mock_server);

    let found = service
        .search(&["quiet eye"], &QueryOptions::new(), None)
        .await
        .expect("search should succeed");
    let linked = service
        .link_environment(
            &found.environment,
            &QueryOptions::new().with("dbfrom", "pubmed").with("db", "pmc"),
        )
        .await
        .expect("link should succeed");

    assert_eq!(linked, SearchEnvironment::new("MCID_pmc", "3"));
}

#[tokio::test]
async fn test_link_not_found_propagates_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/elink.fcgi"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let service = create_mock_service(&mock_server);

    let err = service
        .link(&QueryOptions::new().with("query_key", "1"))
        .await
        .unwrap_err();

    assert!(err.is_transport());
}

#[tokio::test]
async fn test_link_non_json_body_is_json_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/elink.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = create_mock_service(&mock_server);

    let err = service
        .link(&QueryOptions::new().with("query_key", "1"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::JsonError(_)), "got {err:?}");
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_link_uses_elink_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/elink.fcgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(elink_history_response("MCID_slow"))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    // Only the ELink timeout is short; the others stay at 5s
    let config = mock_config(&mock_server).with_elink_timeout(Duration::from_millis(50));
    let service = PubMedService::with_config(config).unwrap();

    let err = service
        .link(&QueryOptions::new().with("query_key", "1"))
        .await
        .unwrap_err();

    assert!(err.is_timeout(), "expected a timeout, got {err:?}");
}

#[tokio::test]
async fn test_link_ignores_esearch_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/elink.fcgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(elink_history_response("MCID_slow"))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&mock_server)
        .await;

    let config = mock_config(&mock_server)
        .with_esearch_timeout(Duration::from_millis(20))
        .with_default_timeout(Duration::from_millis(20));
    let service = PubMedService::with_config(config).unwrap();

    let environment = service
        .link(&QueryOptions::new().with("query_key", "1"))
        .await
        .expect("link should only be bound by the ELink timeout");

    assert_eq!(environment.webenv, "MCID_slow");
}
