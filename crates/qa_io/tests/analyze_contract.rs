//! `/analyze` wire contract against a mock backend.

use std::time::Duration;

use qa_core::{AnalysisResult, SchemaSelect, SchemaVersion};
use qa_io::{AnalyzeClient, ClientConfig, TransportError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AnalyzeClient {
    let config = ClientConfig::new(&server.uri()).unwrap();
    AnalyzeClient::new(&config).unwrap()
}

#[tokio::test]
async fn posts_url_as_json_and_decodes_contract_a() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "url": "https://example.com/page" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "score_matrix": { "final_score": 82 },
            "clarity_readability": { "score": 7.3 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let analysis = client_for(&server).analyze("https://example.com/page").await.unwrap();
    assert_eq!(analysis.result.schema(), SchemaVersion::ScoreMatrix);
    assert_eq!(analysis.result.arc_rank(), Some(82.0));
    let AnalysisResult::ScoreMatrix(report) = analysis.result else {
        panic!("expected contract A");
    };
    assert_eq!(report.clarity_readability.score, Some(7.3));
}

#[tokio::test]
async fn decodes_contract_b_when_pinned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "evaluation": { "scores": { "overall": 6 }, "llm_ready": true }
        })))
        .mount(&server)
        .await;

    let config = ClientConfig::new(&server.uri())
        .unwrap()
        .with_schema(SchemaSelect::Fixed(SchemaVersion::Evaluation));
    let analysis = AnalyzeClient::new(&config).unwrap().analyze("https://e.x").await.unwrap();
    assert_eq!(analysis.result.arc_rank(), Some(60.0));
    assert_eq!(analysis.result.backend_llm_ready(), Some(true));
}

#[tokio::test]
async fn non_2xx_with_detail_surfaces_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "detail": "bad url" })))
        .mount(&server)
        .await;

    let err = client_for(&server).analyze("nope").await.unwrap_err();
    assert_eq!(err.to_string(), "bad url");
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn non_2xx_without_body_mentions_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).analyze("https://example.com").await.unwrap_err();
    assert!(err.to_string().contains("503"), "{err}");
}

#[tokio::test]
async fn success_with_html_body_is_invalid_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).analyze("https://example.com").await.unwrap_err();
    assert!(matches!(err, TransportError::InvalidBody(_)), "{err:?}");
}

#[tokio::test]
async fn slow_backend_hits_configured_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(800)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::new(&server.uri())
        .unwrap()
        .with_timeout(Some(Duration::from_millis(50)));
    let err = AnalyzeClient::new(&config).unwrap().analyze("https://e.x").await.unwrap_err();
    assert!(matches!(err, TransportError::Timeout(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    // Port 9 (discard) on localhost is closed in test environments.
    let config = ClientConfig::new("http://127.0.0.1:9").unwrap();
    let err = AnalyzeClient::new(&config).unwrap().analyze("https://e.x").await.unwrap_err();
    assert!(matches!(err, TransportError::Network(_)), "{err:?}");
}
